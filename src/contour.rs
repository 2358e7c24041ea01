//! Contours
//!
//! A contour is one boundary loop: an ordered list of points, either closed
//! (last point joins the first) or open.

use glam::{DVec2, Vec2};
use log::trace;

use crate::error::{Error, Result};
use crate::rect::Rectangle;
use crate::segment::{find_intersection, Segment, CONTAINMENT_EPSILON};

/// Points closer than this to an edge are on the boundary
pub const ON_BOUNDARY_TOLERANCE : f64 = 1e-4;

/// Direction a contour winds
#[derive(Debug,Copy,Clone,PartialEq)]
pub enum PathOrientation {
    Clockwise,
    CounterClockwise
}

/// Ordered sequence of points forming one boundary
///
/// Edges are computed once on construction. The closing edge, from the last
/// point back to the first, is always stored so the contour can be filled;
/// it only counts as an edge of the path when the contour is closed.
#[derive(Debug,Clone,PartialEq)]
pub struct Contour {
    points: Vec<Vec2>,
    segments: Vec<Segment>,
    closed: bool,
    bounds: Rectangle<f32>,
}

impl Contour {
    /// Create a new contour
    ///
    /// At least two points are required
    pub fn new(points: Vec<Vec2>, closed: bool) -> Result<Self> {
        if points.len() < 2 {
            return Err(Error::TooFewPoints { count: points.len() });
        }
        Ok(Self::new_unchecked(points, closed))
    }
    /// Create a contour from two or more points
    pub(crate) fn new_unchecked(points: Vec<Vec2>, closed: bool) -> Self {
        let mut bounds = Rectangle::new(points[0].x, points[0].y,
                                        points[0].x, points[0].y);
        for p in &points {
            bounds.expand(p.x, p.y);
        }
        Self::build(points, closed, bounds)
    }
    /// Create a new closed contour
    pub fn closed(points: Vec<Vec2>) -> Result<Self> {
        Self::new(points, true)
    }
    /// Create a new open contour
    pub fn open(points: Vec<Vec2>) -> Result<Self> {
        Self::new(points, false)
    }
    /// Points of the contour
    pub fn points(&self) -> &[Vec2] {
        &self.points
    }
    /// Number of points
    pub fn len(&self) -> usize {
        self.points.len()
    }
    /// Contours always have points, provided for symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
    /// Does the last point join the first
    pub fn is_closed(&self) -> bool {
        self.closed
    }
    /// Edges of the path, including the closing edge only when closed
    pub fn segments(&self) -> &[Segment] {
        if self.closed {
            &self.segments
        } else {
            &self.segments[.. self.segments.len() - 1]
        }
    }
    /// Edges used for filling, always including the closing edge
    pub fn fill_segments(&self) -> &[Segment] {
        &self.segments
    }
    /// Bounding box of all points
    pub fn bounds(&self) -> Rectangle<f32> {
        self.bounds
    }
    /// Upper bound on crossings of any probe line, one per point
    pub fn max_intersections(&self) -> usize {
        self.points.len()
    }
    /// Signed area from the shoelace formula
    ///
    /// Positive for counter-clockwise with y pointing up, which is
    /// clockwise on screen where y points down.
    pub fn signed_area(&self) -> f64 {
        signed_area(self.points.iter().map(|p| p.as_dvec2()))
    }
    /// Orientation from the sign of the area
    pub fn orientation(&self) -> PathOrientation {
        if self.signed_area() < 0.0 {
            PathOrientation::Clockwise
        } else {
            PathOrientation::CounterClockwise
        }
    }
    /// Same contour traversed in the opposite direction
    pub fn reversed(&self) -> Contour {
        let mut points = self.points.clone();
        points.reverse();
        Self::build(points, self.closed, self.bounds)
    }
    /// Same points, closed
    pub fn to_closed(&self) -> Contour {
        let mut c = self.clone();
        c.closed = true;
        c
    }
    fn build(points: Vec<Vec2>, closed: bool, bounds: Rectangle<f32>) -> Self {
        let n = points.len();
        let segments = (0 .. n)
            .map(|i| Segment::new(points[i], points[(i+1) % n]))
            .collect();
        Self { points, segments, closed, bounds }
    }

    /// Find where the line from start to end crosses the contour
    ///
    /// Crossing points are written into `out`, the count is returned. Never
    /// more than [max_intersections](Contour::max_intersections) points
    /// are written.
    ///
    /// When the line runs through a vertex both edges meeting there report
    /// the same crossing. If the path passes through the line at that vertex
    /// only one crossing is kept; if it touches the line and turns back both
    /// are kept, so the count stays even for closed contours. Edges lying
    /// along the line are skipped over when deciding this.
    pub fn find_intersections(&self, start: Vec2, end: Vec2, out: &mut [Vec2]) -> Result<usize> {
        let probe = Segment::new(start, end);
        let line = ProbeLine::new(start, end);
        let edges = self.segments();

        let mut count = 0;
        // Last crossing written and whether every edge since lies on the line
        let mut last : Option<usize> = None;
        let mut along_since_last = true;
        let mut first : Option<usize> = None;
        let mut along_before_first = true;

        for (i, edge) in edges.iter().enumerate() {
            let hit = match find_intersection(&probe, edge) {
                Some(hit) => hit,
                None => {
                    if ! line.lies_along(edge) {
                        along_since_last = false;
                        if first.is_none() {
                            along_before_first = false;
                        }
                    }
                    continue;
                }
            };
            if let Some(j) = last {
                if along_since_last && line.passes_through(&edges[j], edge) {
                    trace!("FIND_INTERSECTIONS: pass through at {:?}, edges {} {}", hit, j, i);
                    if line.keeps_later(&edges[j], edge) {
                        out[count-1] = hit;
                    }
                    last = None;
                    along_since_last = false;
                    continue;
                }
            }
            match out.get_mut(count) {
                Some(slot) => *slot = hit,
                None => return Err(Error::BufferTooSmall {
                    required: self.max_intersections(),
                    available: out.len(),
                }),
            }
            count += 1;
            if first.is_none() {
                first = Some(i);
            }
            last = Some(i);
            along_since_last = true;
        }
        // Junction across the start of a closed contour
        if self.closed && count > 1 {
            if let (Some(f), Some(l)) = (first, last) {
                if along_before_first && along_since_last &&
                    line.passes_through(&edges[l], &edges[f]) {
                        trace!("FIND_INTERSECTIONS: pass through at start, edges {} {}", l, f);
                        if ! line.keeps_later(&edges[l], &edges[f]) {
                            out[0] = out[count-1];
                        }
                        count -= 1;
                    }
            }
        }
        Ok(count)
    }

    /// Is the point inside or on the boundary
    ///
    /// The contour is treated as closed
    pub fn contains(&self, p: Vec2) -> bool {
        if self.on_boundary(p) {
            return true;
        }
        self.crossing_parity(p)
    }
    /// Is the point within [ON_BOUNDARY_TOLERANCE] of an edge
    pub fn on_boundary(&self, p: Vec2) -> bool {
        self.boundary_distance(p) <= ON_BOUNDARY_TOLERANCE
    }
    /// Distance to the closest edge, closing edge included
    pub fn boundary_distance(&self, p: Vec2) -> f64 {
        let p = p.as_dvec2();
        self.segments.iter()
            .map(|s| point_segment_distance(p, s.start.as_dvec2(), s.end.as_dvec2()))
            .fold(f64::INFINITY, f64::min)
    }
    /// Signed distance to the boundary: negative inside, zero on the edge
    pub fn distance(&self, p: Vec2) -> f32 {
        let d = self.boundary_distance(p);
        if d <= ON_BOUNDARY_TOLERANCE {
            0.0
        } else if self.crossing_parity(p) {
            -d as f32
        } else {
            d as f32
        }
    }
    /// Even-odd test with a ray towards +x, half open in y
    pub(crate) fn crossing_parity(&self, p: Vec2) -> bool {
        let p = p.as_dvec2();
        let mut inside = false;
        for s in &self.segments {
            let (a, b) = (s.start.as_dvec2(), s.end.as_dvec2());
            if (a.y > p.y) != (b.y > p.y) {
                let x = a.x + (p.y - a.y) * (b.x - a.x) / (b.y - a.y);
                if p.x < x {
                    inside = !inside;
                }
            }
        }
        inside
    }
}

/// Shoelace area of a closed ring of points
pub(crate) fn signed_area<I: Iterator<Item=DVec2> + Clone>(points: I) -> f64 {
    let first = match points.clone().next() {
        Some(p) => p,
        None => return 0.0,
    };
    let mut area = 0.0;
    let mut prev = first;
    for p in points.skip(1) {
        area += prev.x * p.y - p.x * prev.y;
        prev = p;
    }
    area += prev.x * first.y - first.x * prev.y;
    area * 0.5
}

pub(crate) fn point_segment_distance(p: DVec2, a: DVec2, b: DVec2) -> f64 {
    let ab = b - a;
    let len2 = ab.length_squared();
    if len2 == 0.0 {
        return p.distance(a);
    }
    let t = ((p - a).dot(ab) / len2).clamp(0.0, 1.0);
    p.distance(a + ab * t)
}

/// Infinite line through a probe, used to place vertices on either side
struct ProbeLine {
    origin: DVec2,
    dir: DVec2,
    len: f64,
}

impl ProbeLine {
    fn new(start: Vec2, end: Vec2) -> Self {
        let origin = start.as_dvec2();
        let dir = end.as_dvec2() - origin;
        Self { origin, dir, len: dir.length() }
    }
    fn cross(&self, p: Vec2) -> f64 {
        let d = p.as_dvec2() - self.origin;
        self.dir.x * d.y - self.dir.y * d.x
    }
    /// Within [CONTAINMENT_EPSILON] of the line
    fn near(&self, p: Vec2) -> bool {
        self.len > 0.0 &&
            self.cross(p).abs() <= f64::from(CONTAINMENT_EPSILON) * self.len
    }
    /// Edge with both ends near the line
    fn lies_along(&self, edge: &Segment) -> bool {
        self.near(edge.start) && self.near(edge.end)
    }
    /// Are the ends of the edge strictly on opposite sides
    fn straddled_by(&self, edge: &Segment) -> bool {
        self.cross(edge.start) * self.cross(edge.end) < 0.0
    }
    /// Which crossing to keep where the path passes through from `a` to `b`
    ///
    /// An edge that really spans the line wins. Otherwise the edge reaching
    /// to the positive side does, so the choice is the same wherever the
    /// contour starts and whichever way it runs.
    fn keeps_later(&self, a: &Segment, b: &Segment) -> bool {
        match (self.straddled_by(a), self.straddled_by(b)) {
            (true, false) => false,
            (false, true) => true,
            _ => self.cross(b.end) > 0.0,
        }
    }
    /// Does the path cross the line where edge `a` hands over to edge `b`
    ///
    /// The hand-over point has to be near the line and the far ends of the
    /// two edges have to sit on opposite sides.
    fn passes_through(&self, a: &Segment, b: &Segment) -> bool {
        if ! self.near(a.end) {
            return false;
        }
        let (sa, sb) = (self.cross(a.start), self.cross(b.end));
        (sa < 0.0 && sb > 0.0) || (sa > 0.0 && sb < 0.0)
    }
}
