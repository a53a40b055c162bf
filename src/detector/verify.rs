//! Multi-directional confirmation of finder candidates
//!
//! From a candidate center a ray sees half of the finder cross-section:
//! 1.5 units of center black, 1 unit of white, 1 unit of outer black.

use crate::models::{BitMatrix, Cell};

/// Default absolute tolerance (pixels) for [`verify_ratio`]
pub const DEFAULT_VERIFY_TOLERANCE: f32 = 1.0;

/// Ray directions as (d_row, d_col): up, down, diagonal down-right
const DIRECTIONS: [(i32, i32); 3] = [(-1, 0), (1, 0), (1, 1)];

/// Test a half-pattern profile against the 1.5:1:1 ratio
pub fn verify_ratio(c1: usize, c2: usize, c3: usize, tolerance: f32) -> bool {
    let unit = (c1 + c2 + c3) as f32 / 3.5;

    (c1 as f32 - 1.5 * unit).abs() < tolerance
        && (c2 as f32 - unit).abs() < tolerance
        && (c3 as f32 - unit).abs() < tolerance
}

/// Walk from `start` in steps of (d_row, d_col) and check the half-pattern profile
///
/// Runs are collected as black (c1), white (c2), black (c3). The walk stops
/// at the first white pixel after the second black run, or at the border.
pub fn verify_direction(
    matrix: &BitMatrix,
    start: Cell,
    d_row: i32,
    d_col: i32,
    tolerance: f32,
) -> bool {
    let height = matrix.height() as i32;
    let width = matrix.width() as i32;

    // 0: first black run, 1: white run, 2: second black run
    let mut state = 0u8;
    let (mut c1, mut c2, mut c3) = (0usize, 0usize, 0usize);
    let mut cell = start;

    while cell.row >= 0 && cell.row < height && cell.col >= 0 && cell.col < width {
        if matrix.is_white(cell.col as usize, cell.row as usize) {
            if state == 2 {
                return verify_ratio(c1, c2, c3, tolerance);
            }
            c2 += 1;
            state = 1;
        } else if state == 0 {
            c1 += 1;
        } else {
            c3 += 1;
            state = 2;
        }
        cell = cell.shifted(d_row, d_col);
    }

    // Reached the border
    verify_ratio(c1, c2, c3, tolerance)
}

/// True when the candidate passes the up, down and diagonal checks
///
/// Candidates outside the image are rejected outright; the empty profile
/// would otherwise satisfy [`verify_ratio`] trivially.
pub fn verify_center(matrix: &BitMatrix, candidate: Cell, tolerance: f32) -> bool {
    let inside = candidate.row >= 0
        && candidate.col >= 0
        && (candidate.row as usize) < matrix.height()
        && (candidate.col as usize) < matrix.width();
    if !inside {
        return false;
    }

    DIRECTIONS
        .iter()
        .all(|&(d_row, d_col)| verify_direction(matrix, candidate, d_row, d_col, tolerance))
}
