//! External decoding collaborator
//!
//! Bit extraction and error correction are delegated to a remote service.
//! This module validates a discretized module grid, renders it to PNG and
//! defines the [`SymbolDecoder`] seam that the HTTP client implements.

pub mod zxing;

pub use zxing::{ZxingClient, ZxingConfig, parse_parsed_result};

use crate::error::DecodeError;
use crate::models::{BitMatrix, PixelGrid};
use image::codecs::png::PngEncoder;
use image::{ColorType, GrayImage, ImageEncoder, Luma};
use log::warn;

/// Largest grid side accepted for decoding (version 6 symbol)
pub const MAX_GRID_SIDE: usize = 41;

/// Something that turns a module grid into the encoded text
pub trait SymbolDecoder {
    /// Decode a grid where a set bit is a dark module
    fn decode(&self, grid: &BitMatrix) -> Result<String, DecodeError>;
}

/// Reject grids too large to be a discretized symbol
pub fn check_grid_size(width: usize, height: usize) -> Result<(), DecodeError> {
    if width > MAX_GRID_SIDE || height > MAX_GRID_SIDE {
        warn!(
            "DECODE: grid {}x{} exceeds {}x{}; it was likely not discretized",
            width, height, MAX_GRID_SIDE, MAX_GRID_SIDE
        );
        return Err(DecodeError::TooLarge {
            width,
            height,
            max: MAX_GRID_SIDE,
        });
    }
    Ok(())
}

/// Convert a strictly boolean single-channel grid (0.0 = dark, 1.0 = light)
pub fn grid_from_pixels(grid: &PixelGrid) -> Result<BitMatrix, DecodeError> {
    let boolean = grid.channels() == 1 && grid.samples().iter().all(|&v| v == 0.0 || v == 1.0);
    if !boolean {
        warn!("DECODE: grid is not strictly boolean; it was likely not discretized");
        return Err(DecodeError::NotBoolean);
    }

    let mut matrix = BitMatrix::new(grid.width(), grid.height());
    for y in 0..grid.height() {
        for x in 0..grid.width() {
            matrix.set(x, y, grid.get(x, y, 0) == 0.0);
        }
    }
    Ok(matrix)
}

/// Rendering of a module grid into an image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Pixels per module side
    pub module_px: u32,
    /// White border width, in modules
    pub quiet_zone: u32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            module_px: 1,
            quiet_zone: 0,
        }
    }
}

/// Render a module grid to an 8-bit grayscale image (dark = 0, light = 255)
pub fn render_image(grid: &BitMatrix, options: &RenderOptions) -> GrayImage {
    let scale = options.module_px.max(1);
    let border = options.quiet_zone * scale;
    let width = grid.width() as u32 * scale + 2 * border;
    let height = grid.height() as u32 * scale + 2 * border;

    GrayImage::from_fn(width, height, |px, py| {
        if px < border || py < border {
            return Luma([255]);
        }
        let x = ((px - border) / scale) as usize;
        let y = ((py - border) / scale) as usize;
        // Out of range reads as light, which covers the far border
        if grid.get(x, y) { Luma([0]) } else { Luma([255]) }
    })
}

/// Encode a module grid as an in-memory PNG
pub fn render_png(grid: &BitMatrix, options: &RenderOptions) -> Result<Vec<u8>, DecodeError> {
    let image = render_image(grid, options);
    let mut bytes = Vec::new();
    PngEncoder::new(&mut bytes).write_image(
        image.as_raw(),
        image.width(),
        image.height(),
        ColorType::L8,
    )?;
    Ok(bytes)
}
