//! Fixed-threshold binarization of raw pixel grids

use crate::models::{BitMatrix, PixelGrid};

/// Normalized intensity above which a pixel is white
pub const WHITE_THRESHOLD: f32 = 0.5;

/// Convert a raw grid to a two-level matrix (true = black)
///
/// If any sample exceeds 1 the grid is treated as 8-bit and scaled by 1/255.
/// Only channel 0 is read. A pixel is white when its normalized value is
/// strictly greater than [`WHITE_THRESHOLD`].
pub fn binarize(grid: &PixelGrid) -> BitMatrix {
    let width = grid.width();
    let height = grid.height();
    let scale = grid.unit_scale();

    let mut binary = BitMatrix::new(width, height);
    for y in 0..height {
        for x in 0..width {
            let value = grid.get(x, y, 0) * scale;
            binary.set(x, y, value <= WHITE_THRESHOLD);
        }
    }

    binary
}
