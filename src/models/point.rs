/// 2D point with floating point coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    /// X coordinate (column)
    pub x: f32,
    /// Y coordinate (row)
    pub y: f32,
}

impl Point {
    /// Create a new point
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Calculate distance to another point
    pub fn distance(&self, other: &Point) -> f32 {
        self.distance_squared(other).sqrt()
    }

    /// Calculate squared distance (faster, no sqrt)
    pub fn distance_squared(&self, other: &Point) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    /// Translate point by (dx, dy)
    pub fn translate(&self, dx: f32, dy: f32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Integer pixel location in image space, stored as (row, column).
///
/// Every detection stage works in this form. Signed so a parallelogram
/// completion may land outside the image without wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Cell {
    /// Row index (y)
    pub row: i32,
    /// Column index (x)
    pub col: i32,
}

impl Cell {
    /// Create a new cell
    pub fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Component-wise difference `self - other`
    pub fn offset_from(&self, other: &Cell) -> (i32, i32) {
        (self.row - other.row, self.col - other.col)
    }

    /// Translate by (d_row, d_col)
    pub fn shifted(&self, d_row: i32, d_col: i32) -> Self {
        Self {
            row: self.row + d_row,
            col: self.col + d_col,
        }
    }

    /// Squared euclidean distance in pixels
    pub fn distance_squared(&self, other: &Cell) -> i64 {
        let dr = (self.row - other.row) as i64;
        let dc = (self.col - other.col) as i64;
        dr * dr + dc * dc
    }

    /// Convert to display form: `x = col`, `y = row`. No scaling.
    pub fn to_point(&self) -> Point {
        Point::new(self.col as f32, self.row as f32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_to_point_swaps_axes() {
        let p = Cell::new(7, 19).to_point();
        assert_eq!(p, Point::new(19.0, 7.0));
    }

    #[test]
    fn test_cell_arithmetic() {
        let a = Cell::new(2, 3);
        let b = Cell::new(5, -1);
        assert_eq!(b.offset_from(&a), (3, -4));
        assert_eq!(a.shifted(3, -4), b);
        assert_eq!(a.distance_squared(&b), 25);
    }

    #[test]
    fn test_point_distance() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert_eq!(a.distance(&b), 5.0);
        assert_eq!(a.translate(3.0, 4.0), b);
    }
}
