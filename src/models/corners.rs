use super::{Cell, Point};

/// Three verified finder centers with their roles assigned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FinderTriple {
    /// Finder at the symbol origin
    pub top_left: Cell,
    /// Finder along the first row
    pub top_right: Cell,
    /// Finder along the first column
    pub bottom_left: Cell,
}

impl FinderTriple {
    /// Create a triple from already-classified centers
    pub fn new(top_left: Cell, top_right: Cell, bottom_left: Cell) -> Self {
        Self {
            top_left,
            top_right,
            bottom_left,
        }
    }
}

/// The four reference points of a located symbol, in (x, y) image coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CornerPoints {
    /// Top-left finder center
    pub top_left: Point,
    /// Top-right finder center
    pub top_right: Point,
    /// Bottom-left finder center
    pub bottom_left: Point,
    /// Estimated bottom-right alignment point
    pub alignment: Point,
}

impl CornerPoints {
    /// Points in output order: top-left, top-right, bottom-left, alignment
    pub fn to_array(&self) -> [Point; 4] {
        [
            self.top_left,
            self.top_right,
            self.bottom_left,
            self.alignment,
        ]
    }

    /// Same as [`CornerPoints::to_array`], as a `Vec`
    pub fn to_vec(&self) -> Vec<Point> {
        self.to_array().to_vec()
    }
}
