//! Utility functions for image preparation
//!
//! - Binarization (normalize and threshold raw grids)

pub mod binarization;
