//! Finder pattern candidate scanning using 1:1:3:1:1 run-length ratios
//!
//! Each row is walked once with five rolling counters holding the runs
//! black, white, black, white, black that straddle the current position.
//! Every closed black run is tested; a pass emits two adjacent columns at
//! the middle of the center run (integer halving drops the half pixel).

use crate::models::{BitMatrix, Cell};
use rayon::prelude::*;

/// Default absolute tolerance (pixels) for [`check_ratio`]
pub const DEFAULT_RATIO_TOLERANCE: f32 = 2.0;

/// Test five run lengths against the 1:1:3:1:1 finder cross-section
///
/// The unit width is the total divided by 7. Patterns narrower than one
/// pixel per unit are rejected; otherwise every outer run must be within
/// `tolerance` of one unit and the center run within `tolerance` of three.
pub fn check_ratio(runs: &[usize; 5], tolerance: f32) -> bool {
    let total: usize = runs.iter().sum();
    let unit = total as f32 / 7.0;

    if unit < 1.0 {
        return false;
    }

    let [c1, c2, c3, c4, c5] = runs.map(|r| r as f32);
    (c1 - unit).abs() < tolerance
        && (c2 - unit).abs() < tolerance
        && (c3 - 3.0 * unit).abs() < tolerance
        && (c4 - unit).abs() < tolerance
        && (c5 - unit).abs() < tolerance
}

/// Row scanner producing raw finder candidates
pub struct FinderScanner;

impl FinderScanner {
    /// Scan every row and return candidates in row-major discovery order
    ///
    /// Duplicates are expected: each hit emits two columns and a finder
    /// pattern matches on several consecutive rows.
    pub fn scan(matrix: &BitMatrix, tolerance: f32) -> Vec<Cell> {
        (0..matrix.height())
            .flat_map(|y| Self::scan_row(matrix, y, tolerance))
            .collect()
    }

    /// Same output as [`FinderScanner::scan`], rows processed on the rayon pool
    pub fn scan_parallel(matrix: &BitMatrix, tolerance: f32) -> Vec<Cell> {
        let rows: Vec<Vec<Cell>> = (0..matrix.height())
            .into_par_iter()
            .map(|y| Self::scan_row(matrix, y, tolerance))
            .collect();
        rows.into_iter().flatten().collect()
    }

    /// Scan a single row, including the trailing-edge check
    pub fn scan_row(matrix: &BitMatrix, y: usize, tolerance: f32) -> Vec<Cell> {
        let width = matrix.width();
        let mut candidates = Vec::new();
        if width == 0 {
            return candidates;
        }

        // runs = [black, white, black, white, black], newest run last
        let mut runs = [0usize; 5];
        // Row starts as if preceded by white
        let mut prev_white = true;

        for x in 0..width {
            let white = matrix.is_white(x, y);
            match (white, prev_white) {
                (true, true) => runs[3] += 1,
                (true, false) => {
                    if check_ratio(&runs, tolerance) {
                        Self::push_center(&mut candidates, y, x, &runs);
                    }
                    runs[1] = runs[3];
                    runs[3] = 1;
                }
                (false, true) => {
                    runs[0] = runs[2];
                    runs[2] = runs[4];
                    runs[4] = 1;
                }
                (false, false) => runs[4] += 1,
            }
            prev_white = white;
        }

        // Pattern flush against the right border
        if check_ratio(&runs, tolerance) {
            Self::push_center(&mut candidates, y, width, &runs);
        }

        candidates
    }

    /// Emit the center-run midpoint for a window that closed just before column `end`
    fn push_center(candidates: &mut Vec<Cell>, y: usize, end: usize, runs: &[usize; 5]) {
        let center = end as i32 - runs[4] as i32 - runs[3] as i32 - (runs[2] / 2) as i32;
        candidates.push(Cell::new(y as i32, center));
        candidates.push(Cell::new(y as i32, center + 1));
    }
}
