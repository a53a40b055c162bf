//! Tunable parameters for corner location
//!
//! Defaults reproduce the reference behavior. Every field can be overridden
//! from the environment through [`LocatorConfig::from_env`].

use crate::detector::alignment::FinderOrdering;
use crate::detector::dedup::DedupStrategy;
use crate::detector::finder::DEFAULT_RATIO_TOLERANCE;
use crate::detector::verify::DEFAULT_VERIFY_TOLERANCE;

fn parse_env_f32(name: &str, default: f32) -> f32 {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<f32>().ok())
        .filter(|v| v.is_finite() && *v > 0.0)
        .unwrap_or(default)
}

fn parse_env_bool_u8(name: &str, default: bool) -> bool {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<u8>().ok())
        .map(|v| v != 0)
        .unwrap_or(default)
}

fn parse_env_dedup(name: &str, default: DedupStrategy) -> DedupStrategy {
    match std::env::var(name).ok().as_deref().map(str::trim) {
        Some("sequential") => DedupStrategy::Sequential,
        Some("clustered") => DedupStrategy::Clustered,
        _ => default,
    }
}

fn parse_env_ordering(name: &str, default: FinderOrdering) -> FinderOrdering {
    match std::env::var(name).ok().as_deref().map(str::trim) {
        Some("geometric") => FinderOrdering::Geometric,
        Some("discovery") => FinderOrdering::Discovery,
        _ => default,
    }
}

/// Parameters for [`crate::CornerLocator`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocatorConfig {
    /// Absolute pixel tolerance of the 1:1:3:1:1 row check
    pub ratio_tolerance: f32,
    /// Absolute pixel tolerance of the 1.5:1:1 ray check
    pub verify_tolerance: f32,
    /// Dedup threshold is `image_rows / neighbor_divisor`, compared to squared distance
    pub neighbor_divisor: f32,
    /// Duplicate collapsing strategy
    pub dedup: DedupStrategy,
    /// Finder role assignment
    pub ordering: FinderOrdering,
    /// Scan rows and verify candidates on the rayon pool
    pub parallel: bool,
}

impl Default for LocatorConfig {
    fn default() -> Self {
        Self {
            ratio_tolerance: DEFAULT_RATIO_TOLERANCE,
            verify_tolerance: DEFAULT_VERIFY_TOLERANCE,
            neighbor_divisor: 5.0,
            dedup: DedupStrategy::default(),
            ordering: FinderOrdering::default(),
            parallel: true,
        }
    }
}

impl LocatorConfig {
    /// Defaults overridden by `QR_RATIO_TOLERANCE`, `QR_VERIFY_TOLERANCE`,
    /// `QR_NEIGHBOR_DIVISOR`, `QR_DEDUP`, `QR_ORDERING` and `QR_PARALLEL`
    pub fn from_env() -> Self {
        let base = Self::default();
        Self {
            ratio_tolerance: parse_env_f32("QR_RATIO_TOLERANCE", base.ratio_tolerance),
            verify_tolerance: parse_env_f32("QR_VERIFY_TOLERANCE", base.verify_tolerance),
            neighbor_divisor: parse_env_f32("QR_NEIGHBOR_DIVISOR", base.neighbor_divisor),
            dedup: parse_env_dedup("QR_DEDUP", base.dedup),
            ordering: parse_env_ordering("QR_ORDERING", base.ordering),
            parallel: parse_env_bool_u8("QR_PARALLEL", base.parallel),
        }
    }

    /// Squared-distance threshold for an image with `rows` rows
    pub fn neighbor_threshold(&self, rows: usize) -> f32 {
        rows as f32 / self.neighbor_divisor
    }
}
