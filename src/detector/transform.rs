//! Module grid extraction from located corner points
//!
//! The image is assumed rectified, so an affine map spanned by the three
//! finder centers is enough. Finder centers sit on module index 3 of a
//! `dimension`-module symbol.
use crate::error::LocateError;
use crate::models::{BitMatrix, CornerPoints};

/// Smallest valid symbol side (version 1)
pub const MIN_DIMENSION: usize = 21;

/// Sample the center of every module into a `dimension` x `dimension` grid
///
/// Pixels that map outside the image read as white.
pub fn sample_modules(
    matrix: &BitMatrix,
    corners: &CornerPoints,
    dimension: usize,
) -> Result<BitMatrix, LocateError> {
    if dimension < MIN_DIMENSION || (dimension - 17) % 4 != 0 {
        return Err(LocateError::InvalidDimension(dimension));
    }

    let tl = corners.top_left;
    let span = (dimension - 7) as f32;
    let (ux, uy) = (
        (corners.top_right.x - tl.x) / span,
        (corners.top_right.y - tl.y) / span,
    );
    let (vx, vy) = (
        (corners.bottom_left.x - tl.x) / span,
        (corners.bottom_left.y - tl.y) / span,
    );

    let mut grid = BitMatrix::new(dimension, dimension);
    for v in 0..dimension {
        let dv = v as f32 - 3.0;
        for u in 0..dimension {
            let du = u as f32 - 3.0;
            let x = (tl.x + du * ux + dv * vx).round();
            let y = (tl.y + du * uy + dv * vy).round();
            if x < 0.0 || y < 0.0 {
                continue;
            }
            grid.set(u, v, matrix.get(x as usize, y as usize));
        }
    }

    Ok(grid)
}
