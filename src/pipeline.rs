use crate::config::LocatorConfig;
use crate::detector::alignment::{classify_finders, estimate_alignment};
use crate::detector::finder::FinderScanner;
use crate::detector::verify::verify_center;
use crate::error::LocateError;
use crate::models::{BitMatrix, Cell, CornerPoints, FinderTriple, PixelGrid};
use crate::utils::binarization::binarize;
use log::{debug, trace};
use rayon::prelude::*;

/// Stage counts from one locate call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LocateTelemetry {
    /// Raw row-scan hits, duplicates included
    pub candidates: usize,
    /// Hits that passed the up/down/diagonal checks
    pub verified: usize,
    /// Centers left after deduplication
    pub deduplicated: usize,
}

/// Build the public result: three finder centers then the alignment estimate, in (x, y)
pub fn assemble(finders: &FinderTriple) -> CornerPoints {
    let alignment = estimate_alignment(finders);
    CornerPoints {
        top_left: finders.top_left.to_point(),
        top_right: finders.top_right.to_point(),
        bottom_left: finders.bottom_left.to_point(),
        alignment: alignment.to_point(),
    }
}

/// Finder-corner locator for rectified QR images
#[derive(Debug, Clone, Default)]
pub struct CornerLocator {
    config: LocatorConfig,
}

impl CornerLocator {
    /// Create a locator with the given parameters
    pub fn new(config: LocatorConfig) -> Self {
        Self { config }
    }

    /// Active parameters
    pub fn config(&self) -> &LocatorConfig {
        &self.config
    }

    /// Binarize a raw grid and locate its corner points
    pub fn locate(&self, grid: &PixelGrid) -> Result<CornerPoints, LocateError> {
        self.locate_binary(&binarize(grid))
    }

    /// Locate corner points in an already two-level image
    pub fn locate_binary(&self, matrix: &BitMatrix) -> Result<CornerPoints, LocateError> {
        self.locate_with_telemetry(matrix).0
    }

    /// Locate corner points and report how many points survived each stage
    pub fn locate_with_telemetry(
        &self,
        matrix: &BitMatrix,
    ) -> (Result<CornerPoints, LocateError>, LocateTelemetry) {
        let mut tel = LocateTelemetry::default();

        let centers = self.finder_centers(matrix, &mut tel);
        let result = classify_finders(&centers, self.config.ordering).map(|finders| {
            trace!("LOCATE: roles {:?}", finders);
            assemble(&finders)
        });

        if let Err(err) = &result {
            debug!("LOCATE: failed after {:?}: {}", tel, err);
        }
        (result, tel)
    }

    /// Scan, verify and deduplicate; the returned centers keep discovery order
    pub fn finder_centers(&self, matrix: &BitMatrix, tel: &mut LocateTelemetry) -> Vec<Cell> {
        let cfg = &self.config;

        let candidates = if cfg.parallel {
            FinderScanner::scan_parallel(matrix, cfg.ratio_tolerance)
        } else {
            FinderScanner::scan(matrix, cfg.ratio_tolerance)
        };
        tel.candidates = candidates.len();

        let verified: Vec<Cell> = if cfg.parallel {
            candidates
                .par_iter()
                .copied()
                .filter(|&c| verify_center(matrix, c, cfg.verify_tolerance))
                .collect()
        } else {
            candidates
                .iter()
                .copied()
                .filter(|&c| verify_center(matrix, c, cfg.verify_tolerance))
                .collect()
        };
        tel.verified = verified.len();

        let threshold = cfg.neighbor_threshold(matrix.height());
        let centers = cfg.dedup.apply(&verified, threshold);
        tel.deduplicated = centers.len();

        debug!(
            "LOCATE: {}x{} candidates={} verified={} centers={} (threshold {:.2}, {:?})",
            matrix.width(),
            matrix.height(),
            tel.candidates,
            tel.verified,
            tel.deduplicated,
            threshold,
            cfg.dedup
        );
        trace!("LOCATE: centers {:?}", centers);

        centers
    }
}
