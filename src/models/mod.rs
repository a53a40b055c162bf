pub mod corners;
pub mod matrix;
pub mod pixels;
pub mod point;

pub use corners::{CornerPoints, FinderTriple};
pub use matrix::BitMatrix;
pub use pixels::{PixelGrid, Sample};
pub use point::{Cell, Point};
