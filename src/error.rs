//! Error types for corner location and the external decode path

/// Problems with the shape of an input pixel grid
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    /// Sample count does not equal `width * height * channels`
    #[error("sample buffer has {actual} values, expected {expected}")]
    ShapeMismatch {
        /// Samples implied by the declared shape
        expected: usize,
        /// Samples actually supplied
        actual: usize,
    },

    /// Channel count outside 1..=4
    #[error("unsupported channel count: {0}")]
    UnsupportedChannels(usize),
}

/// Failures of the corner-location pipeline
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LocateError {
    /// Input grid was malformed
    #[error(transparent)]
    Grid(#[from] GridError),

    /// Deduplication left too few or too many finder centers
    #[error("expected exactly 3 finder centers, found {found}")]
    FinderCount {
        /// Number of centers that survived deduplication
        found: usize,
    },

    /// The three centers are collinear, coincident or have no single right-angle corner
    #[error("finder centers do not form an unambiguous top-left/top-right/bottom-left layout")]
    AmbiguousOrdering,

    /// Module count is not a valid QR symbol side
    #[error("invalid symbol dimension {0}: must be 17 + 4 * version with version >= 1")]
    InvalidDimension(usize),
}

/// Failures of the external decode collaborator
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// Grid exceeds the largest side the service is fed
    #[error("grid is {width}x{height}, larger than {max}x{max}; it was likely not discretized")]
    TooLarge {
        /// Grid width in modules
        width: usize,
        /// Grid height in modules
        height: usize,
        /// Largest accepted side
        max: usize,
    },

    /// Grid values are not exclusively 0 and 1
    #[error("grid is not strictly boolean; it was likely not discretized")]
    NotBoolean,

    /// Response HTML has no "Parsed Result" row
    #[error("decode service response has no \"Parsed Result\" field")]
    MissingResult,

    /// Service answered with a non-success status
    #[error("decode service returned HTTP {0}")]
    Status(u16),

    /// Transport or client failure
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// PNG rendering failed
    #[error("image encoding error: {0}")]
    Image(#[from] image::ImageError),
}
