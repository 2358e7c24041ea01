//! Errors

use thiserror::Error;

/// Errors reported by path construction, scanning and clipping
///
/// Degenerate geometry (parallel edges, zero length edges, zero area
/// results) is never an error, it is absorbed where it is found.
#[derive(Debug, Error)]
pub enum Error {
    /// An open path was handed to the clipper
    ///
    /// Open paths have no inside or outside, so clipping cannot continue.
    #[error("open path {index} cannot be clipped, open paths have been disabled")]
    OpenPath {
        /// Position of the path in the order it was added
        index: usize,
    },
    /// Output buffer smaller than the advertised intersection bound
    #[error("buffer too small: {required} intersections possible, room for {available}")]
    BufferTooSmall {
        /// Upper bound on the number of crossings
        required: usize,
        /// Slots left in the buffer after the offset
        available: usize,
    },
    /// A contour needs at least two points
    #[error("contour needs at least 2 points, got {count}")]
    TooFewPoints {
        /// Number of points supplied
        count: usize,
    },
    /// Failure reading or writing a mask image
    #[error("image: {0}")]
    Image(#[from] image::ImageError),
}

/// Result with the crate [`Error`]
pub type Result<T> = std::result::Result<T, Error>;
