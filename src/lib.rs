//! How does this work
//!    shape  = Polygon / ComplexPolygon ( Contour( points ) )
//!    region = ShapeRegion::new( shape )
//!  Scan Operations
//!    region.scan(y, buffer, offset)
//!      probe line one pixel past the bounds at y
//!      shape.find_intersections()
//!        contour.find_intersections()  -- 'FIND_INTERSECTIONS: pass through'
//!          find_intersection()         -- f64 determinant, widened boxes
//!     Output: unsorted x of every crossing
//!  Clip Operations
//!    clipper.add_path() / add_shape()  -- Subject or Clip
//!    clipper.generate_clipped_shapes()
//!      split_edges()
//!      sweep()                         -- 'SCANBEAM: y0 -> y1'
//!      link(), simplify(), assemble()
//!     Output: outer contours (positive area) with holes (negative area)
//!  Render to Mask
//!   rasterize_mask(region, width, height)
//!     scanline_spans()  -- pixel centres, even-odd between crossings

pub mod error;
pub mod rect;
pub mod segment;
pub mod contour;
pub mod scratch;
pub mod shape;
pub mod scan;
pub mod clip;
pub mod raster;
pub mod path_storage;

pub use error::*;
pub use rect::*;
pub use segment::*;
pub use contour::*;
pub use scratch::*;
pub use shape::*;
pub use scan::*;
pub use clip::*;
pub use raster::*;
pub use path_storage::*;
