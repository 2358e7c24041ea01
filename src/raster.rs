//! Rasterizing Regions
//!
//! Turns the crossings a [Region] reports into horizontal spans of covered
//! pixels. A pixel is covered when its centre lies inside, there is no
//! anti-aliasing.

use std::path::Path;

use image::{GrayImage, Luma};
use log::trace;

use crate::error::Result;
use crate::scan::Region;

/// Which windings count as filled
#[derive(Debug,PartialEq,Copy,Clone)]
pub enum FillingRule {
    NonZero,
    EvenOdd,
}
impl Default for FillingRule {
    fn default() -> FillingRule {
        FillingRule::NonZero
    }
}

/// Run of covered pixels on one row
#[derive(Debug,Copy,Clone,PartialEq,Eq)]
pub struct Span {
    /// First pixel
    pub x: i32,
    /// Number of pixels
    pub len: usize,
}

impl Span {
    /// One past the last pixel
    pub fn end(&self) -> i32 {
        self.x + self.len as i32
    }
}

/// Covered pixels on row y
///
/// The row is sampled along its centre line and filled between pairs of
/// sorted crossings. Spans are clipped to the region bounds.
pub fn scanline_spans<R: Region + ?Sized>(region: &R, y: i32) -> Result<Vec<Span>> {
    let b = region.bounds();
    if y < b.y1 || y >= b.y2 {
        return Ok(vec![]);
    }
    let mut xs = vec![0.0; region.max_intersections()];
    let n = region.scan(y as f32 + 0.5, &mut xs, 0)?;
    xs.truncate(n);
    xs.sort_by(|a, b| a.total_cmp(b));

    let mut spans = vec![];
    for pair in xs.chunks_exact(2) {
        let x0 = ((pair[0] - 0.5).ceil() as i32).max(b.x1);
        let x1 = ((pair[1] - 0.5).ceil() as i32).min(b.x2);
        if x1 > x0 {
            spans.push(Span { x: x0, len: (x1 - x0) as usize });
        }
    }
    Ok(spans)
}

/// Coverage mask of a region, 255 inside and 0 outside
pub fn rasterize_mask<R: Region + ?Sized>(region: &R, width: u32, height: u32) -> Result<GrayImage> {
    let mut img = GrayImage::new(width, height);
    let b = region.bounds();
    for y in b.y1.max(0) .. b.y2.min(height as i32) {
        for span in scanline_spans(region, y)? {
            let x0 = span.x.max(0);
            let x1 = span.end().min(width as i32);
            for x in x0 .. x1 {
                img.put_pixel(x as u32, y as u32, Luma([255]));
            }
        }
    }
    Ok(img)
}

/// Save a mask, the format follows the file extension
pub fn write_mask<P: AsRef<Path>>(mask: &GrayImage, filename: P) -> Result<()> {
    mask.save(filename)?;
    Ok(())
}

/// Number of pixels that differ, None if the sizes differ
pub fn mask_diff(a: &GrayImage, b: &GrayImage) -> Option<usize> {
    if a.dimensions() != b.dimensions() {
        return None;
    }
    let mut n = 0;
    for (x, y, p) in a.enumerate_pixels() {
        let q = b.get_pixel(x, y);
        if p != q {
            trace!("MASK DIFF: [{},{}]: {} {}", x, y, p[0], q[0]);
            n += 1;
        }
    }
    Some(n)
}
