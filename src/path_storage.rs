//! Path Storage
//!
//! Paths are built from drawing commands and split into [Contour]s, one per
//! sub-path. Curves are flattened into line segments as they are added.

use glam::Vec2;

use crate::contour::{Contour, PathOrientation};
use crate::error::Result;
use crate::rect::Rectangle;
use crate::shape::ComplexPolygon;

/// Line segments used for each flattened curve
pub const CURVE_SUBDIVISIONS : usize = 16;

pub trait VertexSource {
    fn vertices(&self) -> &[Vertex];
}

#[derive(Debug,Copy,Clone,PartialEq)]
pub enum PathCommand {
    Stop,
    MoveTo,
    LineTo,
    Close,
}
impl Default for PathCommand {
    fn default() -> PathCommand {
        PathCommand::MoveTo
    }
}

#[derive(Debug,Default,Copy,Clone,PartialEq)]
pub struct Vertex {
    pub x: f32,
    pub y: f32,
    pub cmd: PathCommand
}

impl Vertex {
    pub fn new(x: f32, y: f32, cmd: PathCommand) -> Self {
        Self { x, y, cmd }
    }
    pub fn move_to(x: f32, y: f32) -> Self {
        Self { x, y, cmd: PathCommand::MoveTo }
    }
    pub fn line_to(x: f32, y: f32) -> Self {
        Self { x, y, cmd: PathCommand::LineTo }
    }
    pub fn close_polygon(x: f32, y: f32) -> Self {
        Self { x, y, cmd: PathCommand::Close }
    }
    pub fn pos(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

#[derive(Debug,Default,Clone)]
pub struct PathStorage {
    pub vertices: Vec<Vertex>,
}

impl VertexSource for PathStorage {
    fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }
}

impl PathStorage {
    pub fn new() -> Self {
        Self { vertices: vec![] }
    }
    pub fn remove_all(&mut self) {
        self.vertices.clear();
    }
    pub fn move_to(&mut self, x: f32, y: f32) {
        self.vertices.push( Vertex::move_to(x,y) );
    }
    pub fn line_to(&mut self, x: f32, y: f32) {
        self.vertices.push( Vertex::line_to(x,y) );
    }
    /// Close the current sub-path back to its first point
    pub fn close_polygon(&mut self) {
        if let Some(last) = self.vertices.last().copied() {
            if last.cmd == PathCommand::LineTo {
                self.vertices.push( Vertex::close_polygon(last.x, last.y) );
            }
        }
    }
    /// Quadratic Bezier from the current point through control (cx,cy)
    pub fn curve3(&mut self, cx: f32, cy: f32, x: f32, y: f32) {
        let p0 = self.current_point(cx, cy);
        let (p1, p2) = (Vec2::new(cx, cy), Vec2::new(x, y));
        for i in 1 ..= CURVE_SUBDIVISIONS {
            let t = i as f32 / CURVE_SUBDIVISIONS as f32;
            let mt = 1.0 - t;
            let p = p0 * (mt * mt) + p1 * (2.0 * mt * t) + p2 * (t * t);
            self.line_to(p.x, p.y);
        }
    }
    /// Cubic Bezier from the current point with controls (c1x,c1y) and (c2x,c2y)
    pub fn curve4(&mut self, c1x: f32, c1y: f32, c2x: f32, c2y: f32, x: f32, y: f32) {
        let p0 = self.current_point(c1x, c1y);
        let (p1, p2, p3) = (Vec2::new(c1x, c1y), Vec2::new(c2x, c2y), Vec2::new(x, y));
        for i in 1 ..= CURVE_SUBDIVISIONS {
            let t = i as f32 / CURVE_SUBDIVISIONS as f32;
            let mt = 1.0 - t;
            let p = p0 * (mt * mt * mt)
                + p1 * (3.0 * mt * mt * t)
                + p2 * (3.0 * mt * t * t)
                + p3 * (t * t * t);
            self.line_to(p.x, p.y);
        }
    }
    /// Last point, or a move to (x,y) on an empty sub-path
    fn current_point(&mut self, x: f32, y: f32) -> Vec2 {
        match self.vertices.last() {
            Some(v) if v.cmd != PathCommand::Close && v.cmd != PathCommand::Stop => v.pos(),
            _ => {
                self.move_to(x, y);
                Vec2::new(x, y)
            }
        }
    }
    /// Split into one contour per sub-path
    ///
    /// A sub-path ending in [PathCommand::Close] gives a closed contour.
    /// Sub-paths with fewer than two points are skipped.
    pub fn contours(&self) -> Result<Vec<Contour>> {
        let mut out = vec![];
        let mut points : Vec<Vec2> = vec![];
        for v in &self.vertices {
            match v.cmd {
                PathCommand::MoveTo => {
                    flush(&mut points, false, &mut out)?;
                    points.push(v.pos());
                },
                PathCommand::LineTo => points.push(v.pos()),
                PathCommand::Close => flush(&mut points, true, &mut out)?,
                PathCommand::Stop => {},
            }
        }
        flush(&mut points, false, &mut out)?;
        Ok(out)
    }
    /// Shape filled from every sub-path
    pub fn to_shape(&self) -> Result<ComplexPolygon> {
        Ok(ComplexPolygon::new(self.contours()?))
    }
    pub fn arrange_orientations(&mut self, dir: PathOrientation) {
        arrange_orientations(self, dir);
    }
}

fn flush(points: &mut Vec<Vec2>, closed: bool, out: &mut Vec<Contour>) -> Result<()> {
    let pts = std::mem::take(points);
    if pts.len() >= 2 {
        out.push(Contour::new(pts, closed)?);
    }
    Ok(())
}

/// Vertex ranges `[start, end]` of each sub-path with at least one segment
fn sub_paths(vertices: &[Vertex]) -> Vec<(usize, usize)> {
    let (mut start, mut end) = (None, None);
    let mut pairs = vec![];
    for (i,v) in vertices.iter().enumerate() {
        match v.cmd {
            PathCommand::MoveTo => {
                if let (Some(s), Some(e)) = (start, end) {
                    pairs.push((s,e));
                }
                start = Some(i);
                end = None;
            },
            PathCommand::LineTo  |
            PathCommand::Close   |
            PathCommand::Stop => {
                if start.is_some() {
                    end = Some(i);
                }
            },
        }
    }
    if let (Some(s), Some(e)) = (start, end) {
        pairs.push((s,e));
    }
    pairs
}

fn arrange_orientations(path: &mut PathStorage, dir: PathOrientation) {
    for (s,e) in sub_paths(&path.vertices) {
        if polygon_orientation(&path.vertices[s..e+1]) != dir {
            invert_polygon(&mut path.vertices[s..e+1]);
        }
    }
}

/// Reverse a sub-path, keeping its first and last commands in place
///
/// A trailing `Close` stays last.
pub fn invert_polygon(v: &mut [Vertex]) {
    let n = match v.last() {
        Some(last) if last.cmd == PathCommand::Close => v.len() - 1,
        _ => v.len(),
    };
    if n == 0 {
        return;
    }
    let v = &mut v[..n];
    v.reverse();
    let tmp  = v[0].cmd;
    v[0].cmd = v[n-1].cmd;
    v[n-1].cmd = tmp;
}

/// Orientation of a sub-path, `Close` vertices stand for the first point
pub fn polygon_orientation(vertices: &[Vertex]) -> PathOrientation {
    let n = vertices.len();
    if n == 0 {
        return PathOrientation::CounterClockwise;
    }
    let p0 = vertices[0];
    let at = |v: &Vertex| if v.cmd == PathCommand::Close { p0.pos() } else { v.pos() };
    let mut area = 0.0;
    for (i,p1) in vertices.iter().enumerate() {
        let a = at(p1).as_dvec2();
        let b = at(&vertices[(i+1) % n]).as_dvec2();
        area += a.x * b.y - a.y * b.x;
    }
    if area < 0.0 {
        PathOrientation::Clockwise
    } else {
        PathOrientation::CounterClockwise
    }
}

pub fn bounding_rect<VS: VertexSource>(path: &VS) -> Option<Rectangle<f32>> {
    let pts = path.vertices();
    let first = pts.first()?;
    let mut r = Rectangle::new(first.x, first.y, first.x, first.y);
    for p in pts {
        r.expand(p.x, p.y);
    }
    Some(r)
}
