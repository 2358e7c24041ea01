//! Polygon Clipping
//!
//! Computes `union(subjects) - union(clips)` for closed paths and returns the
//! boundary of the result as outer contours with holes.
//!
//! How does this work
//!
//!   add_path() -- subject or clip, open paths are refused
//!   generate_clipped_shapes()
//!     build_edges()  -- horizontal edges dropped, they never change a winding
//!     split_edges()  -- crossings and touching points become shared vertices
//!     sweep()        -- every vertex y is an event
//!       scanbeam between two events: active edges sorted by x,
//!         winding counted per role, boundary where inside/outside flips
//!       horizontal boundary at an event: inside just above != inside just below
//!     link()         -- directed pieces joined end to start into rings
//!     simplify()     -- collinear and repeated vertices removed
//!     assemble()     -- positive area rings are outers, negative ones holes
//!
//! Pieces are directed with the inside on their left (y pointing up), so
//! outer rings have positive signed area and holes negative. All geometry
//! is carried in `f64` and rounded back to `f32` at the end.

use std::collections::HashMap;

use glam::DVec2;
use log::{debug, trace, warn};

use crate::contour::{signed_area, Contour};
use crate::error::{Error, Result};
use crate::raster::FillingRule;
use crate::shape::{ComplexPolygon, Shape};

/// Parameter slack when deciding if a crossing is at an edge end
const PARAM_EPSILON : f64 = 1e-9;
/// Sine of the angle below which three points are collinear
const COLLINEAR_EPSILON : f64 = 1e-9;
/// Distance below which two parallel edges lie on the same line
const COINCIDENT_EPSILON : f64 = 1e-9;
/// Rings with less area are dropped
const AREA_EPSILON : f64 = 1e-9;

/// Role of a path in a clip operation
#[derive(Debug,Copy,Clone,PartialEq,Eq)]
pub enum ClippingRole {
    /// Area to keep, subjects are merged
    Subject,
    /// Area to remove, clips are merged
    Clip,
}

/// Boolean combination of closed paths
#[derive(Debug,Default)]
pub struct Clipper {
    paths: Vec<(Vec<DVec2>, ClippingRole)>,
    offered: usize,
    filling_rule: FillingRule,
}

/// Non-horizontal edge, top has the smaller y
#[derive(Debug,Copy,Clone)]
struct Edge {
    top: DVec2,
    bottom: DVec2,
    winding: i32,
    role: ClippingRole,
}

/// Directed piece of the result boundary
type Piece = (DVec2, DVec2);

impl Edge {
    fn new(a: DVec2, b: DVec2, role: ClippingRole) -> Option<Self> {
        if a.y < b.y {
            Some(Self { top: a, bottom: b, winding: 1, role })
        } else if a.y > b.y {
            Some(Self { top: b, bottom: a, winding: -1, role })
        } else {
            None
        }
    }
    /// x on the edge at y, exact at both ends
    fn x_at(&self, y: f64) -> f64 {
        if y <= self.top.y {
            self.top.x
        } else if y >= self.bottom.y {
            self.bottom.x
        } else {
            self.top.x + (self.bottom.x - self.top.x) * (y - self.top.y) / (self.bottom.y - self.top.y)
        }
    }
    fn min_x(&self) -> f64 {
        self.top.x.min(self.bottom.x)
    }
    fn max_x(&self) -> f64 {
        self.top.x.max(self.bottom.x)
    }
    /// Is y strictly inside the edge's y range
    fn spans(&self, y: f64) -> bool {
        y > self.top.y && y < self.bottom.y
    }
}

impl Clipper {
    /// Create a new Clipper using the non-zero rule
    pub fn new() -> Self {
        Self::default()
    }
    /// Create a new Clipper with a rule deciding which windings are filled
    pub fn with_filling_rule(filling_rule: FillingRule) -> Self {
        Self { filling_rule, .. Self::default() }
    }
    /// Rule deciding which windings are filled
    pub fn filling_rule(&self) -> FillingRule {
        self.filling_rule
    }
    /// Add a closed path
    ///
    /// Open paths are refused with [Error::OpenPath]; `index` counts every
    /// path offered so far, accepted or not.
    pub fn add_path(&mut self, contour: &Contour, role: ClippingRole) -> Result<()> {
        let index = self.offered;
        self.offered += 1;
        if ! contour.is_closed() {
            return Err(Error::OpenPath { index });
        }
        let points = contour.points().iter().map(|p| p.as_dvec2()).collect();
        self.paths.push((points, role));
        Ok(())
    }
    /// Add every contour of a shape
    pub fn add_shape<S: Shape + ?Sized>(&mut self, shape: &S, role: ClippingRole) -> Result<()> {
        for c in shape.contours() {
            self.add_path(c, role)?;
        }
        Ok(())
    }
    /// Add every contour of several shapes
    pub fn add_shapes<'a, I, S>(&mut self, shapes: I, role: ClippingRole) -> Result<()>
        where I: IntoIterator<Item=&'a S>, S: Shape + ?Sized + 'a
    {
        for s in shapes {
            self.add_shape(s, role)?;
        }
        Ok(())
    }

    /// Run the clip, one polygon per disjoint piece of the result
    pub fn generate_clipped_shapes(&self) -> Vec<ComplexPolygon> {
        let edges = split_edges(self.build_edges());
        let pieces = self.sweep(&edges);
        let rings : Vec<_> = link(&pieces).into_iter()
            .map(simplify)
            .filter(|r| r.len() >= 3)
            .collect();
        let polygons = assemble(rings);
        debug!("CLIP: {} paths {} edges {} pieces -> {} polygons",
               self.paths.len(), edges.len(), pieces.len(), polygons.len());
        polygons
    }

    fn build_edges(&self) -> Vec<Edge> {
        let mut edges = vec![];
        for (points, role) in &self.paths {
            let n = points.len();
            for i in 0 .. n {
                if let Some(e) = Edge::new(points[i], points[(i+1) % n], *role) {
                    edges.push(e);
                }
            }
        }
        edges
    }

    fn filled(&self, winding: i32) -> bool {
        match self.filling_rule {
            FillingRule::NonZero => winding != 0,
            FillingRule::EvenOdd => winding % 2 != 0,
        }
    }
    fn inside(&self, subject: i32, clip: i32) -> bool {
        self.filled(subject) && ! self.filled(clip)
    }

    /// Sweep down through every scanbeam collecting boundary pieces
    fn sweep(&self, edges: &[Edge]) -> Vec<Piece> {
        let mut ys = Vec::with_capacity(edges.len() * 2);
        for e in edges {
            ys.push(e.top.y);
            ys.push(e.bottom.y);
        }
        ys.sort_by(|a, b| a.total_cmp(b));
        ys.dedup();

        let mut order : Vec<usize> = (0 .. edges.len()).collect();
        order.sort_by(|&a, &b| edges[a].top.y.total_cmp(&edges[b].top.y));

        let mut pieces = vec![];
        let mut active : Vec<usize> = vec![];
        let mut next = 0;
        // Inside intervals just above the current event
        let mut above = vec![];
        for (k, &y) in ys.iter().enumerate() {
            active.retain(|&i| edges[i].bottom.y > y);
            while next < order.len() && edges[order[next]].top.y <= y {
                active.push(order[next]);
                next += 1;
            }
            let (top, bottom) = match ys.get(k + 1) {
                Some(&y1) => self.scanbeam(edges, &active, y, y1, &mut pieces),
                None => (vec![], vec![]),
            };
            horizontal_pieces(y, &above, &top, &mut pieces);
            above = bottom;
        }
        pieces
    }

    /// Boundary pieces between y0 and y1
    ///
    /// Returns the inside intervals along y0 and along y1.
    fn scanbeam(&self, edges: &[Edge], active: &[usize], y0: f64, y1: f64,
                pieces: &mut Vec<Piece>) -> (Vec<(f64,f64)>, Vec<(f64,f64)>) {
        let mut xs : Vec<(f64, f64, usize)> = active.iter()
            .map(|&i| (edges[i].x_at(y0), edges[i].x_at(y1), i))
            .collect();
        xs.sort_by(|a, b| (a.0 + a.1).total_cmp(&(b.0 + b.1))
                   .then(a.0.total_cmp(&b.0)));

        let (mut subject, mut clip) = (0, 0);
        let mut top = vec![];
        let mut bottom = vec![];
        let mut open = None;
        let mut g = 0;
        while g < xs.len() {
            let (xa, xb, _) = xs[g];
            let was_inside = self.inside(subject, clip);
            // Coincident edges act as one
            while g < xs.len() && xs[g].0 == xa && xs[g].1 == xb {
                let e = &edges[xs[g].2];
                match e.role {
                    ClippingRole::Subject => subject += e.winding,
                    ClippingRole::Clip    => clip    += e.winding,
                }
                g += 1;
            }
            let now_inside = self.inside(subject, clip);
            if was_inside == now_inside {
                continue;
            }
            if now_inside {
                pieces.push((DVec2::new(xb, y1), DVec2::new(xa, y0)));
                open = Some((xa, xb));
            } else {
                pieces.push((DVec2::new(xa, y0), DVec2::new(xb, y1)));
                if let Some((sa, sb)) = open.take() {
                    top.push((sa, xa));
                    bottom.push((sb, xb));
                }
            }
        }
        trace!("SCANBEAM: {} -> {} active {} inside {}", y0, y1, xs.len(), top.len());
        (top, bottom)
    }
}

/// Clip holes out of a shape
///
/// Every disjoint piece of the result, with its holes, is gathered into one
/// [ComplexPolygon]. Fails with [Error::OpenPath] if any path is open.
pub fn clip<'a, S, H, I>(shape: &S, holes: I) -> Result<ComplexPolygon>
    where S: Shape + ?Sized, H: Shape + ?Sized + 'a, I: IntoIterator<Item=&'a H>
{
    let mut clipper = Clipper::new();
    clipper.add_shape(shape, ClippingRole::Subject)?;
    clipper.add_shapes(holes, ClippingRole::Clip)?;
    Ok(ComplexPolygon::merge(clipper.generate_clipped_shapes()))
}

fn cross(a: DVec2, b: DVec2) -> f64 {
    a.x * b.y - a.y * b.x
}

/// Split edges wherever they cross or touch another edge
///
/// Both edges get the very same point, so the sweep sees a shared vertex.
fn split_edges(edges: Vec<Edge>) -> Vec<Edge> {
    let n = edges.len();
    let mut cuts : Vec<Vec<DVec2>> = vec![vec![]; n];
    for i in 0 .. n {
        for j in i+1 .. n {
            let (a, b) = (&edges[i], &edges[j]);
            if a.bottom.y < b.top.y || b.bottom.y < a.top.y ||
                a.max_x() < b.min_x() || b.max_x() < a.min_x() {
                    continue;
                }
            let (ca, cb) = edge_cuts(a, b);
            cuts[i].extend(ca);
            cuts[j].extend(cb);
        }
    }
    let mut out = Vec::with_capacity(n);
    for (e, mut cut) in edges.into_iter().zip(cuts) {
        cut.retain(|p| e.spans(p.y));
        cut.sort_by(|a, b| a.y.total_cmp(&b.y));
        cut.dedup_by(|a, b| a.y == b.y);
        let mut top = e.top;
        for p in cut {
            out.push(Edge { top, bottom: p, .. e });
            top = p;
        }
        out.push(Edge { top, .. e });
    }
    out
}

/// Points where `a` and `b` have to be cut
fn edge_cuts(a: &Edge, b: &Edge) -> (Vec<DVec2>, Vec<DVec2>) {
    let r = a.bottom - a.top;
    let s = b.bottom - b.top;
    let qp = b.top - a.top;
    let denom = cross(r, s);

    if denom.abs() <= PARAM_EPSILON * r.length() * s.length() {
        // Parallel, only overlapping collinear edges need cuts
        if cross(r, qp).abs() > COINCIDENT_EPSILON * r.length() {
            return (vec![], vec![]);
        }
        let ca = [b.top, b.bottom].iter().copied().filter(|p| a.spans(p.y)).collect();
        let cb = [a.top, a.bottom].iter().copied().filter(|p| b.spans(p.y)).collect();
        return (ca, cb);
    }
    let t = cross(qp, s) / denom;
    let u = cross(qp, r) / denom;
    let outside = |v: f64| v < -PARAM_EPSILON || v > 1.0 + PARAM_EPSILON;
    if outside(t) || outside(u) {
        return (vec![], vec![]);
    }
    let at_end = |v: f64| v <= PARAM_EPSILON || v >= 1.0 - PARAM_EPSILON;
    match (at_end(t), at_end(u)) {
        (true, true) => (vec![], vec![]),
        (false, true) => {
            let p = if u < 0.5 { b.top } else { b.bottom };
            (vec![p], vec![])
        },
        (true, false) => {
            let p = if t < 0.5 { a.top } else { a.bottom };
            (vec![], vec![p])
        },
        (false, false) => {
            let p = a.top + r * t;
            (vec![p], vec![p])
        },
    }
}

/// Horizontal pieces where the inside changes across the event line
fn horizontal_pieces(y: f64, above: &[(f64,f64)], below: &[(f64,f64)],
                     pieces: &mut Vec<Piece>) {
    let mut xs = Vec::with_capacity((above.len() + below.len()) * 2);
    for &(a, b) in above.iter().chain(below) {
        xs.push(a);
        xs.push(b);
    }
    xs.sort_by(|a, b| a.total_cmp(b));
    xs.dedup();
    let covered = |iv: &[(f64,f64)], x: f64| iv.iter().any(|&(a, b)| a < x && x < b);
    for w in xs.windows(2) {
        let (xl, xr) = (w[0], w[1]);
        let mid = 0.5 * (xl + xr);
        match (covered(above, mid), covered(below, mid)) {
            (false, true) => pieces.push((DVec2::new(xl, y), DVec2::new(xr, y))),
            (true, false) => pieces.push((DVec2::new(xr, y), DVec2::new(xl, y))),
            _ => {}
        }
    }
}

/// Exact key for a point, -0.0 and 0.0 are the same
fn key(p: DVec2) -> (u64, u64) {
    ((p.x + 0.0).to_bits(), (p.y + 0.0).to_bits())
}

/// Join pieces end to start into closed rings
fn link(pieces: &[Piece]) -> Vec<Vec<DVec2>> {
    let mut starts : HashMap<(u64,u64), Vec<usize>> = HashMap::new();
    for (i, p) in pieces.iter().enumerate() {
        starts.entry(key(p.0)).or_default().push(i);
    }
    let mut used = vec![false; pieces.len()];
    let mut rings = vec![];
    for i in 0 .. pieces.len() {
        if used[i] {
            continue;
        }
        used[i] = true;
        let origin = key(pieces[i].0);
        let mut ring = vec![pieces[i].0];
        let mut cur = pieces[i].1;
        let closed = loop {
            if key(cur) == origin {
                break true;
            }
            ring.push(cur);
            let next = starts.get(&key(cur))
                .and_then(|c| c.iter().copied().find(|&j| ! used[j]));
            match next {
                Some(j) => {
                    used[j] = true;
                    cur = pieces[j].1;
                },
                None => break false,
            }
        };
        if closed {
            rings.push(ring);
        } else {
            warn!("CLIP: dropping unterminated ring of {} points at {:?}", ring.len(), ring[0]);
        }
    }
    rings
}

/// Remove repeated and collinear vertices
fn simplify(mut pts: Vec<DVec2>) -> Vec<DVec2> {
    let mut changed = true;
    while changed && pts.len() >= 3 {
        changed = false;
        let mut i = 0;
        while i < pts.len() && pts.len() >= 3 {
            let n = pts.len();
            let (prev, cur, next) = (pts[(i + n - 1) % n], pts[i], pts[(i + 1) % n]);
            if redundant(prev, cur, next) {
                pts.remove(i);
                changed = true;
            } else {
                i += 1;
            }
        }
    }
    pts
}

fn redundant(prev: DVec2, cur: DVec2, next: DVec2) -> bool {
    let (a, b) = (cur - prev, next - cur);
    let (la, lb) = (a.length(), b.length());
    la == 0.0 || lb == 0.0 || cross(a, b).abs() <= COLLINEAR_EPSILON * la * lb
}

fn ring_area(ring: &[DVec2]) -> f64 {
    signed_area(ring.iter().copied())
}

#[derive(Debug,PartialEq)]
enum Location {
    Inside,
    Outside,
    Boundary,
}

fn locate(ring: &[DVec2], p: DVec2) -> Location {
    let n = ring.len();
    let mut inside = false;
    for i in 0 .. n {
        let (a, b) = (ring[i], ring[(i+1) % n]);
        let ab = b - a;
        if cross(ab, p - a).abs() <= COINCIDENT_EPSILON * ab.length() &&
            (p - a).dot(ab) >= 0.0 && (p - b).dot(ab) <= 0.0 {
                return Location::Boundary;
            }
        if (a.y > p.y) != (b.y > p.y) {
            let x = a.x + (p.y - a.y) * ab.x / ab.y;
            if p.x < x {
                inside = !inside;
            }
        }
    }
    if inside { Location::Inside } else { Location::Outside }
}

/// Does the outer ring enclose the hole, judged by its first vertex off the
/// outer boundary
fn encloses(outer: &[DVec2], hole: &[DVec2]) -> bool {
    for &p in hole {
        match locate(outer, p) {
            Location::Inside => return true,
            Location::Outside => return false,
            Location::Boundary => {},
        }
    }
    true
}

/// Pair holes with the smallest outer ring around them
fn assemble(rings: Vec<Vec<DVec2>>) -> Vec<ComplexPolygon> {
    let mut outers : Vec<(Vec<DVec2>, f64, Vec<Vec<DVec2>>)> = vec![];
    let mut holes = vec![];
    for r in rings {
        let area = ring_area(&r);
        if area.abs() <= AREA_EPSILON {
            trace!("CLIP: dropping empty ring of {} points", r.len());
        } else if area > 0.0 {
            outers.push((r, area, vec![]));
        } else {
            holes.push(r);
        }
    }
    for h in holes {
        let owner = outers.iter()
            .enumerate()
            .filter(|(_, o)| encloses(&o.0, &h))
            .min_by(|a, b| (a.1).1.total_cmp(&(b.1).1))
            .map(|(k, _)| k);
        match owner {
            Some(k) => outers[k].2.push(h),
            None => warn!("CLIP: dropping hole of {} points outside every outer ring", h.len()),
        }
    }
    outers.into_iter()
        .filter_map(|(outer, _, holes)| {
            let outer = to_contour(&outer)?;
            let mut contours = vec![outer];
            contours.extend(holes.iter().filter_map(|h| to_contour(h)));
            Some(ComplexPolygon::new(contours))
        })
        .collect()
}

/// Round back to `f32`, dropping points that collapse together
fn to_contour(ring: &[DVec2]) -> Option<Contour> {
    let mut points : Vec<_> = ring.iter().map(|p| p.as_vec2()).collect();
    points.dedup();
    while points.len() > 1 && points.first() == points.last() {
        points.pop();
    }
    if points.len() < 3 {
        return None;
    }
    Some(Contour::new_unchecked(points, true))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edge(ax: f64, ay: f64, bx: f64, by: f64) -> Edge {
        Edge::new(DVec2::new(ax, ay), DVec2::new(bx, by), ClippingRole::Subject).unwrap()
    }

    #[test]
    fn horizontal_edges_are_skipped() {
        assert!(Edge::new(DVec2::new(0., 1.), DVec2::new(5., 1.), ClippingRole::Clip).is_none());
        let e = edge(0., 10., 10., 0.);
        assert_eq!(e.winding, -1);
        assert_eq!(e.top, DVec2::new(10., 0.));
        assert_eq!(e.x_at(5.), 5.0);
        assert_eq!(e.x_at(0.), 10.0);
    }
    #[test]
    fn crossing_edges_share_a_cut() {
        let (ca, cb) = edge_cuts(&edge(0., 0., 10., 10.), &edge(10., 0., 0., 10.));
        assert_eq!(ca, vec![DVec2::new(5., 5.)]);
        assert_eq!(ca, cb);
    }
    #[test]
    fn touching_edge_is_cut_at_the_vertex() {
        let (ca, cb) = edge_cuts(&edge(0., 0., 0., 10.), &edge(0., 5., 8., 9.));
        assert_eq!(ca, vec![DVec2::new(0., 5.)]);
        assert!(cb.is_empty());
    }
    #[test]
    fn collinear_overlap_is_cut_both_ways() {
        let (ca, cb) = edge_cuts(&edge(0., 0., 0., 10.), &edge(0., 5., 0., 15.));
        assert_eq!(ca, vec![DVec2::new(0., 5.)]);
        assert_eq!(cb, vec![DVec2::new(0., 10.)]);
    }
    #[test]
    fn collinear_points_removed() {
        let ring = vec![DVec2::new(0., 0.), DVec2::new(5., 0.), DVec2::new(10., 0.),
                        DVec2::new(10., 10.), DVec2::new(10., 10.), DVec2::new(0., 10.)];
        assert_eq!(simplify(ring).len(), 4);
    }
    #[test]
    fn hole_goes_to_smallest_outer() {
        let square = |x0: f64, s: f64| vec![DVec2::new(x0, x0), DVec2::new(x0 + s, x0),
                                            DVec2::new(x0 + s, x0 + s), DVec2::new(x0, x0 + s)];
        let mut hole = square(4., 2.);
        hole.reverse();
        let polys = assemble(vec![square(0., 10.), hole, square(3., 4.)]);
        assert_eq!(polys.len(), 2);
        assert_eq!(polys[0].len(), 1);
        assert_eq!(polys[1].len(), 2);
    }
}
