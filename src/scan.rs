//! Region Scanning
//!
//! A [Region] answers one question per pixel row: where does the boundary
//! cross the horizontal line at `y`. The crossings come back unsorted and
//! without any fill rule applied, see [raster](crate::raster) for a
//! consumer.
//!
//! Scanning only reads the shape, so one region may be scanned from many
//! threads at once for different rows.

use glam::Vec2;
use log::trace;

use crate::error::{Error, Result};
use crate::rect::Rectangle;
use crate::scratch::ScratchBuffer;
use crate::shape::{ComplexPolygon, Shape};

/// Fillable area queried one scanline at a time
pub trait Region {
    /// Integer rectangle covering every pixel of the region
    fn bounds(&self) -> Rectangle<i32>;
    /// Most crossings a single scanline can produce
    fn max_intersections(&self) -> usize;
    /// Write the x values where the boundary crosses the line at y
    ///
    /// Values are written to `buffer` starting at `offset`, the number
    /// written is returned. The buffer must have room for
    /// [max_intersections](Region::max_intersections) values past the
    /// offset, otherwise [Error::BufferTooSmall] is returned.
    fn scan(&self, y: f32, buffer: &mut [f32], offset: usize) -> Result<usize>;
}

/// Region over a shape's closed contours
#[derive(Debug,Clone)]
pub struct ShapeRegion {
    shape: ComplexPolygon,
    bounds: Rectangle<i32>,
}

impl ShapeRegion {
    /// Region for a shape
    ///
    /// Open contours are closed, filling always joins the last point to the
    /// first.
    pub fn new<S: Shape + ?Sized>(shape: &S) -> Self {
        let contours = shape.contours().iter()
            .map(|c| c.to_closed())
            .collect();
        let bounds = shape.bounds().to_pixel_bounds();
        Self { shape: ComplexPolygon::new(contours), bounds }
    }
    /// The shape being scanned
    pub fn shape(&self) -> &ComplexPolygon {
        &self.shape
    }
    /// Crossings at y, sorted from left to right
    pub fn scan_sorted(&self, y: f32) -> Result<Vec<f32>> {
        let mut xs = vec![0.0; self.max_intersections()];
        let n = self.scan(y, &mut xs, 0)?;
        xs.truncate(n);
        xs.sort_by(|a, b| a.total_cmp(b));
        Ok(xs)
    }
}

impl Region for ShapeRegion {
    fn bounds(&self) -> Rectangle<i32> {
        self.bounds
    }
    fn max_intersections(&self) -> usize {
        self.shape.max_intersections()
    }
    fn scan(&self, y: f32, buffer: &mut [f32], offset: usize) -> Result<usize> {
        let required = self.max_intersections();
        let available = buffer.len().saturating_sub(offset);
        if offset > buffer.len() || available < required {
            return Err(Error::BufferTooSmall { required, available });
        }
        // One pixel past the bounds so the probe never ends on a vertex
        let start = Vec2::new((self.bounds.x1 - 1) as f32, y);
        let end   = Vec2::new((self.bounds.x2 + 1) as f32, y);

        let mut points = ScratchBuffer::acquire(required);
        let count = self.shape.find_intersections(start, end, &mut points)?;
        if count == 0 {
            return Ok(0);
        }
        trace!("SCAN: y {} crossings {}", y, count);
        for (dst, p) in buffer[offset..].iter_mut().zip(&points[..count]) {
            *dst = p.x;
        }
        Ok(count)
    }
}
