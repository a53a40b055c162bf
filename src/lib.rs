//! qr_corners - QR finder corner and alignment point location
//!
//! Given a rectified image of a QR symbol, find the centers of the three
//! finder patterns and estimate the bottom-right alignment point. These four
//! reference points are what a sampler needs to discretize the symbol into
//! its module grid. Decoding the grid is delegated to an external service
//! behind [`decode::SymbolDecoder`].

#![warn(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

/// Tunable detection parameters
pub mod config;
/// External decoding collaborator (grid validation, rendering, HTTP client)
pub mod decode;
/// Detection stages (row scan, verification, dedup, alignment, sampling)
pub mod detector;
/// Error types
pub mod error;
/// Core data structures (PixelGrid, BitMatrix, Cell, Point, CornerPoints)
pub mod models;
/// Pipeline wiring and result assembly
pub mod pipeline;
/// Command-line helpers (image loading, grid text format)
pub mod tools;
/// Utility functions (binarization)
pub mod utils;

pub use config::LocatorConfig;
pub use error::{DecodeError, GridError, LocateError};
pub use models::{BitMatrix, Cell, CornerPoints, FinderTriple, PixelGrid, Point, Sample};
pub use pipeline::{CornerLocator, LocateTelemetry};

/// Locate the four reference points of a QR symbol with default parameters
///
/// # Arguments
/// * `grid` - Raw pixels of any numeric type, 0..=1 or 0..=255 scale, 1 to 4 channels
///
/// # Returns
/// Top-left, top-right and bottom-left finder centers plus the estimated
/// alignment point, in (x, y) image coordinates
pub fn get_corner_points(grid: &PixelGrid) -> Result<CornerPoints, LocateError> {
    CornerLocator::default().locate(grid)
}

/// Locate corner points in 8-bit grayscale bytes
pub fn get_corner_points_from_grayscale(
    gray: &[u8],
    width: usize,
    height: usize,
) -> Result<CornerPoints, LocateError> {
    let grid = PixelGrid::from_gray(gray, width, height)?;
    get_corner_points(&grid)
}
