//! Shapes
//!
//! A shape is one or more contours filled together. [Polygon] holds a single
//! closed contour, [ComplexPolygon] any number of them, holes included.
//! Shapes are immutable once built.

use glam::Vec2;
use log::warn;

use crate::contour::{Contour, PathOrientation, ON_BOUNDARY_TOLERANCE};
use crate::error::{Error, Result};
use crate::rect::Rectangle;
use crate::scratch::ScratchBuffer;

/// Geometry that can be scanned and clipped
pub trait Shape {
    /// Contours making up the shape
    fn contours(&self) -> &[Contour];

    /// Bounding box of every contour
    fn bounds(&self) -> Rectangle<f32> {
        let mut iter = self.contours().iter();
        let mut r = match iter.next() {
            Some(c) => c.bounds(),
            None => return Rectangle::default(),
        };
        for c in iter {
            r.expand_rect(&c.bounds());
        }
        r
    }
    /// Upper bound on crossings of any line with the shape
    fn max_intersections(&self) -> usize {
        self.contours().iter().map(Contour::max_intersections).sum()
    }
    /// Are all contours closed
    fn is_closed(&self) -> bool {
        self.contours().iter().all(Contour::is_closed)
    }
    /// Find crossings of the line from start to end, see
    /// [Contour::find_intersections]
    fn find_intersections(&self, start: Vec2, end: Vec2, out: &mut [Vec2]) -> Result<usize> {
        let mut count = 0;
        for c in self.contours() {
            count += c.find_intersections(start, end, &mut out[count..])
                .map_err(|_| Error::BufferTooSmall {
                    required: self.max_intersections(),
                    available: out.len(),
                })?;
        }
        Ok(count)
    }
    /// All crossings of the line from start to end
    fn intersections(&self, start: Vec2, end: Vec2) -> Vec<Vec2> {
        let (buf, n) = crossings(self, start, end);
        buf[..n].to_vec()
    }
    /// Number of crossings of the line from start to end
    fn count_intersections(&self, start: Vec2, end: Vec2) -> usize {
        crossings(self, start, end).1
    }
    /// Is the point inside the shape or on its boundary
    ///
    /// Interior uses the even-odd rule over all contours, so holes are
    /// outside regardless of their orientation.
    fn contains(&self, p: Vec2) -> bool {
        let contours = self.contours();
        if contours.iter().any(|c| c.on_boundary(p)) {
            return true;
        }
        contours.iter().filter(|c| c.crossing_parity(p)).count() % 2 == 1
    }
    /// Signed distance to the boundary, negative inside
    fn distance(&self, p: Vec2) -> f32 {
        let d = self.contours().iter()
            .map(|c| c.boundary_distance(p))
            .fold(f64::INFINITY, f64::min);
        if d <= ON_BOUNDARY_TOLERANCE {
            0.0
        } else if self.contains(p) {
            -d as f32
        } else {
            d as f32
        }
    }
}

impl Shape for Contour {
    fn contours(&self) -> &[Contour] {
        std::slice::from_ref(self)
    }
}

/// Single closed contour
#[derive(Debug,Clone,PartialEq)]
pub struct Polygon {
    contour: Contour,
}

impl Polygon {
    /// Closed polygon through the points
    pub fn new(points: Vec<Vec2>) -> Result<Self> {
        Ok(Self { contour: Contour::closed(points)? })
    }
    /// Polygon from a contour, closing it
    pub fn from_contour(contour: Contour) -> Self {
        Self { contour: contour.to_closed() }
    }
    /// Axis aligned rectangle with its corner at (x,y)
    pub fn rectangle(x: f32, y: f32, width: f32, height: f32) -> Self {
        let points = vec![
            Vec2::new(x, y),
            Vec2::new(x + width, y),
            Vec2::new(x + width, y + height),
            Vec2::new(x, y + height),
        ];
        Self { contour: Contour::new_unchecked(points, true) }
    }
    /// The polygon's contour
    pub fn contour(&self) -> &Contour {
        &self.contour
    }
    /// Points of the polygon
    pub fn points(&self) -> &[Vec2] {
        self.contour.points()
    }
}

impl Shape for Polygon {
    fn contours(&self) -> &[Contour] {
        std::slice::from_ref(&self.contour)
    }
}

/// Contours filled together, outer boundaries and holes
///
/// The clipper produces outer contours with positive signed area and holes
/// with negative area, so a crossing count treats both the same way.
#[derive(Debug,Clone,Default,PartialEq)]
pub struct ComplexPolygon {
    contours: Vec<Contour>,
}

impl ComplexPolygon {
    /// Shape made of the given contours, used as is
    pub fn new(contours: Vec<Contour>) -> Self {
        Self { contours }
    }
    /// Outer contour with holes
    ///
    /// Everything is closed, the outer contour is turned counter-clockwise
    /// and the holes clockwise.
    pub fn with_holes(outer: Contour, holes: Vec<Contour>) -> Self {
        let mut contours = Vec::with_capacity(holes.len() + 1);
        contours.push(oriented(outer.to_closed(), PathOrientation::CounterClockwise));
        contours.extend(holes.into_iter()
                        .map(|h| oriented(h.to_closed(), PathOrientation::Clockwise)));
        Self { contours }
    }
    /// Combine several shapes into one
    pub fn merge<I: IntoIterator<Item=ComplexPolygon>>(polygons: I) -> Self {
        let contours = polygons.into_iter()
            .flat_map(|p| p.contours)
            .collect();
        Self { contours }
    }
    /// Contours with positive area
    pub fn outers(&self) -> impl Iterator<Item=&Contour> {
        self.contours.iter().filter(|c| c.signed_area() >= 0.0)
    }
    /// Contours with negative area
    pub fn holes(&self) -> impl Iterator<Item=&Contour> {
        self.contours.iter().filter(|c| c.signed_area() < 0.0)
    }
    /// Number of contours
    pub fn len(&self) -> usize {
        self.contours.len()
    }
    /// No contours at all
    pub fn is_empty(&self) -> bool {
        self.contours.is_empty()
    }
    /// Total signed area, holes subtracted
    pub fn area(&self) -> f64 {
        self.contours.iter().map(Contour::signed_area).sum()
    }
}

impl Shape for ComplexPolygon {
    fn contours(&self) -> &[Contour] {
        &self.contours
    }
}

impl From<Polygon> for ComplexPolygon {
    fn from(p: Polygon) -> Self {
        Self { contours: vec![p.contour] }
    }
}

/// Crossings into a scratch buffer sized for the worst case
///
/// A contour never reports more crossings than it has points, so a buffer of
/// [max_intersections](Shape::max_intersections) cannot overflow. Should that
/// ever change the error is logged rather than passed over in silence.
fn crossings<S: Shape + ?Sized>(shape: &S, start: Vec2, end: Vec2) -> (ScratchBuffer, usize) {
    let mut buf = ScratchBuffer::acquire(shape.max_intersections());
    let n = match shape.find_intersections(start, end, &mut buf) {
        Ok(n) => n,
        Err(e) => {
            warn!("INTERSECTIONS: {}", e);
            0
        }
    };
    (buf, n)
}

fn oriented(c: Contour, dir: PathOrientation) -> Contour {
    if c.orientation() == dir {
        c
    } else {
        c.reversed()
    }
}
