//! Line Segments and their Intersection
//!
//! The intersection test is not exact. Two tolerances are used:
//!
//! - [DETERMINANT_EPSILON] decides when two lines are parallel or coincident.
//!   Both cases are "no usable intersection".
//! - [CONTAINMENT_EPSILON] widens each segment's bounding box before the
//!   candidate point is accepted, so a crossing right on a segment end is
//!   not lost to rounding.
//!
//! Both values were tuned for bitmaps up to about 1500 pixels and decide
//! which pixels near a boundary count as crossed.

use glam::Vec2;

/// Determinant magnitude below which lines are treated as parallel
pub const DETERMINANT_EPSILON : f64 = 0.003;

/// Expansion of a segment's bounding box when accepting an intersection
pub const CONTAINMENT_EPSILON : f32 = 0.2;

/// Directed line segment with cached bounding corners
#[derive(Debug,Copy,Clone,PartialEq)]
pub struct Segment {
    /// Starting point
    pub start: Vec2,
    /// Ending point
    pub end: Vec2,
    /// Component-wise minimum of start and end
    pub min: Vec2,
    /// Component-wise maximum of start and end
    pub max: Vec2,
}

impl Segment {
    /// Create a new segment from start to end
    pub fn new(start: Vec2, end: Vec2) -> Self {
        Self { start, end, min: start.min(end), max: start.max(end) }
    }
    /// Vector from start to end
    pub fn vector(&self) -> Vec2 {
        self.end - self.start
    }
    /// Zero length segment
    pub fn is_degenerate(&self) -> bool {
        self.start == self.end
    }
    /// Intersection with another segment, see [find_intersection]
    pub fn intersect(&self, other: &Segment) -> Option<Vec2> {
        find_intersection(self, other)
    }
    /// Is q inside this segment's bounding box widened by [CONTAINMENT_EPSILON]
    fn loosely_contains(&self, q: Vec2) -> bool {
        q.x - CONTAINMENT_EPSILON <= self.max.x &&
            q.x + CONTAINMENT_EPSILON >= self.min.x &&
            q.y - CONTAINMENT_EPSILON <= self.max.y &&
            q.y + CONTAINMENT_EPSILON >= self.min.y
    }
}

/// Intersection point of two segments
///
/// Returns `None` when the lines are parallel, coincident, or when the
/// crossing of the infinite lines falls outside either segment.
///
/// The determinant and the crossing are computed in `f64`; single precision
/// loses too much once coordinates pass a thousand or two.
pub fn find_intersection(a: &Segment, b: &Segment) -> Option<Vec2> {
    let (x1, y1) = (f64::from(a.start.x), f64::from(a.start.y));
    let (x2, y2) = (f64::from(a.end.x),   f64::from(a.end.y));
    let (x3, y3) = (f64::from(b.start.x), f64::from(b.start.y));
    let (x4, y4) = (f64::from(b.end.x),   f64::from(b.end.y));

    let x12 = x1 - x2;
    let y12 = y1 - y2;
    let x34 = x3 - x4;
    let y34 = y3 - y4;

    let det = x12 * y34 - y12 * x34;
    if det.abs() < DETERMINANT_EPSILON {
        return None;
    }

    let u = x1 * y2 - x2 * y1;
    let v = x3 * y4 - x4 * y3;
    let x = (x34 * u - x12 * v) / det;
    let y = (y34 * u - y12 * v) / det;

    let q = Vec2::new(x as f32, y as f32);
    if a.loosely_contains(q) && b.loosely_contains(q) {
        Some(q)
    } else {
        None
    }
}
