//! Helpers shared by the command-line tools

use crate::decode::grid_from_pixels;
use crate::error::DecodeError;
use crate::models::{BitMatrix, PixelGrid};
use std::path::Path;

/// Load an image file as a raw pixel grid (gray stays 1 channel, color becomes RGB).
pub fn load_pixels<P: AsRef<Path>>(path: P) -> Result<PixelGrid, image::ImageError> {
    let img = image::open(path)?;
    Ok(PixelGrid::from_dynamic_image(&img))
}

/// Load a one-pixel-per-module grayscale image as a module grid.
///
/// Pixels must be pure black or pure white; anything else is
/// [`DecodeError::NotBoolean`], as is a color image.
pub fn load_module_image<P: AsRef<Path>>(path: P) -> Result<BitMatrix, DecodeError> {
    let pixels = load_pixels(path)?;
    grid_from_pixels(&pixels.to_unit_range())
}

/// True when the path has an image extension the loader understands.
pub fn is_image_path<P: AsRef<Path>>(path: P) -> bool {
    image::ImageFormat::from_path(path).is_ok()
}

/// Summary statistics for a binary matrix.
#[derive(Debug, Clone, Copy)]
pub struct BinaryStats {
    /// Count of black pixels.
    pub black_pixels: usize,
    /// Total pixels in the matrix.
    pub total_pixels: usize,
    /// Ratio of black pixels to total pixels.
    pub black_ratio: f64,
}

/// Compute black pixel stats for a binary matrix.
pub fn binary_stats(binary: &BitMatrix) -> BinaryStats {
    let black = binary.count_black();
    let total = binary.width() * binary.height();
    let ratio = if total == 0 {
        0.0
    } else {
        black as f64 / total as f64
    };
    BinaryStats {
        black_pixels: black,
        total_pixels: total,
        black_ratio: ratio,
    }
}

/// Render a module grid as text: `#` dark, `.` light, one line per row.
pub fn format_grid(grid: &BitMatrix) -> String {
    let mut out = String::with_capacity((grid.width() + 1) * grid.height());
    for y in 0..grid.height() {
        for x in 0..grid.width() {
            out.push(if grid.get(x, y) { '#' } else { '.' });
        }
        out.push('\n');
    }
    out
}

/// Parse the text form written by [`format_grid`].
///
/// `#`, `1` and `X` are dark; `.`, `0` and space are light. Blank lines and
/// lines starting with `;` are skipped. Returns `None` for ragged rows or
/// unknown characters.
pub fn parse_grid(text: &str) -> Option<BitMatrix> {
    let rows: Vec<&str> = text
        .lines()
        .map(str::trim_end)
        .filter(|l| !l.is_empty() && !l.starts_with(';'))
        .collect();
    let width = rows.first()?.chars().count();
    if rows.iter().any(|r| r.chars().count() != width) {
        return None;
    }

    let mut grid = BitMatrix::new(width, rows.len());
    for (y, row) in rows.iter().enumerate() {
        for (x, ch) in row.chars().enumerate() {
            let dark = match ch {
                '#' | '1' | 'X' => true,
                '.' | '0' | ' ' => false,
                _ => return None,
            };
            grid.set(x, y, dark);
        }
    }
    Some(grid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::time::{SystemTime, UNIX_EPOCH};

    static TEMP_FILE_COUNTER: AtomicU64 = AtomicU64::new(0);

    fn temp_path(ext: &str) -> std::path::PathBuf {
        let mut path = std::env::temp_dir();
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock before UNIX epoch")
            .as_nanos();
        let sequence = TEMP_FILE_COUNTER.fetch_add(1, Ordering::Relaxed);
        path.push(format!("qr_corners_tools_{nanos}_{sequence}.{ext}"));
        path
    }

    #[test]
    fn test_load_pixels_gray_png() {
        let path = temp_path("png");
        let mut img = image::GrayImage::new(4, 3);
        img.put_pixel(2, 1, image::Luma([255]));
        img.save(&path).expect("failed to write temp png");

        let grid = load_pixels(&path).unwrap();
        let _ = fs::remove_file(&path);

        assert_eq!((grid.width(), grid.height(), grid.channels()), (4, 3, 1));
        assert_eq!(grid.get(2, 1, 0), 255.0);
        assert_eq!(grid.get(0, 0, 0), 0.0);
    }

    #[test]
    fn test_load_pixels_missing_file() {
        assert!(load_pixels(temp_path("png")).is_err());
    }

    #[test]
    fn test_load_module_image() {
        let path = temp_path("png");
        let mut grid = BitMatrix::new(21, 21);
        grid.fill_rect(0, 0, 7, 7, true);
        grid.fill_rect(1, 1, 5, 5, false);
        grid.set(20, 20, true);
        let png = crate::decode::render_png(&grid, &crate::decode::RenderOptions::default())
            .unwrap();
        fs::write(&path, png).expect("failed to write temp png");

        let loaded = load_module_image(&path);
        let _ = fs::remove_file(&path);
        assert_eq!(loaded.unwrap(), grid);
    }

    #[test]
    fn test_load_module_image_rejects_gray_levels() {
        let path = temp_path("png");
        let mut img = image::GrayImage::from_pixel(3, 3, image::Luma([255]));
        img.put_pixel(1, 1, image::Luma([128]));
        img.save(&path).expect("failed to write temp png");

        let loaded = load_module_image(&path);
        let _ = fs::remove_file(&path);
        assert!(matches!(loaded, Err(DecodeError::NotBoolean)));
    }

    #[test]
    fn test_is_image_path() {
        assert!(is_image_path("grid.png"));
        assert!(!is_image_path("grid.txt"));
        assert!(!is_image_path("grid"));
    }

    #[test]
    fn test_parse_grid() {
        let grid = parse_grid("; comment\n#.#\n\n.1.\n").unwrap();
        assert_eq!((grid.width(), grid.height()), (3, 2));
        assert!(grid.get(0, 0) && grid.get(2, 0) && grid.get(1, 1));
        assert_eq!(grid.count_black(), 3);
        assert_eq!(format_grid(&grid), "#.#\n.#.\n");

        assert!(parse_grid("##\n#\n").is_none());
        assert!(parse_grid("#?\n").is_none());
        assert!(parse_grid("").is_none());
    }

    #[test]
    fn test_binary_stats() {
        let mut m = BitMatrix::new(4, 2);
        m.fill_rect(0, 0, 2, 1, true);
        let stats = binary_stats(&m);
        assert_eq!(stats.black_pixels, 2);
        assert_eq!(stats.total_pixels, 8);
        assert!((stats.black_ratio - 0.25).abs() < 1e-9);
    }
}
