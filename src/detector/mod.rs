//! Finder corner detection
//!
//! - Row scanning for the 1:1:3:1:1 finder cross-section
//! - Up/down/diagonal verification of each hit
//! - Deduplication of adjacent hits
//! - Role assignment and alignment-point estimate
//! - Module sampling from the located corners

/// Finder role assignment and parallelogram completion
pub mod alignment;
/// Duplicate-hit collapsing (sequential and clustered)
pub mod dedup;
/// Row scanning using 1:1:3:1:1 ratio checks
pub mod finder;
/// Module grid sampling from corner points
pub mod transform;
/// Three-ray 1.5:1:1 candidate verification
pub mod verify;
