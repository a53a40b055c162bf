//! Raw pixel grid of arbitrary numeric scale
//!
//! Samples are stored row-major and interleaved by channel as `f32`. The
//! binarizer decides the scale (0..=1 or 0..=255) from the data itself.

use super::BitMatrix;
use crate::error::GridError;
use image::DynamicImage;

/// Primitive numeric types accepted as raw samples
///
/// Conversion is a plain `as` cast, so wide integers and `f64` lose precision
/// beyond what `f32` holds. `bool` maps to 0.0 and 1.0.
pub trait Sample: Copy {
    /// Sample value as `f32`
    fn to_f32(self) -> f32;
}

macro_rules! impl_sample {
    ($($t:ty),*) => {
        $(impl Sample for $t {
            #[inline]
            fn to_f32(self) -> f32 {
                self as f32
            }
        })*
    };
}

impl_sample!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize, f32, f64);

impl Sample for bool {
    #[inline]
    fn to_f32(self) -> f32 {
        if self { 1.0 } else { 0.0 }
    }
}

/// Row-major, channel-interleaved intensity samples
#[derive(Debug, Clone, PartialEq)]
pub struct PixelGrid {
    width: usize,
    height: usize,
    channels: usize,
    data: Vec<f32>,
}

impl PixelGrid {
    /// Build a grid from samples of any primitive numeric type
    pub fn from_samples<T: Sample>(
        samples: &[T],
        width: usize,
        height: usize,
        channels: usize,
    ) -> Result<Self, GridError> {
        if !(1..=4).contains(&channels) {
            return Err(GridError::UnsupportedChannels(channels));
        }
        let expected = width * height * channels;
        if samples.len() != expected {
            return Err(GridError::ShapeMismatch {
                expected,
                actual: samples.len(),
            });
        }
        Ok(Self {
            width,
            height,
            channels,
            data: samples.iter().map(|&v| v.to_f32()).collect(),
        })
    }

    /// Single-channel grid from 8-bit luminance
    pub fn from_gray(gray: &[u8], width: usize, height: usize) -> Result<Self, GridError> {
        Self::from_samples(gray, width, height, 1)
    }

    /// Single-channel 0/1 grid from a bit matrix (white = 1.0, black = 0.0)
    pub fn from_bit_matrix(matrix: &BitMatrix) -> Self {
        let (width, height) = (matrix.width(), matrix.height());
        let mut data = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                data.push(if matrix.is_white(x, y) { 1.0 } else { 0.0 });
            }
        }
        Self {
            width,
            height,
            channels: 1,
            data,
        }
    }

    /// Convert a decoded image. Gray images keep one channel, everything else becomes RGB.
    pub fn from_dynamic_image(img: &DynamicImage) -> Self {
        let channels = img.color().channel_count();
        if channels <= 2 {
            let luma = img.to_luma8();
            let (w, h) = luma.dimensions();
            Self {
                width: w as usize,
                height: h as usize,
                channels: 1,
                data: luma.as_raw().iter().map(|&v| v as f32).collect(),
            }
        } else {
            let rgb = img.to_rgb8();
            let (w, h) = rgb.dimensions();
            Self {
                width: w as usize,
                height: h as usize,
                channels: 3,
                data: rgb.as_raw().iter().map(|&v| v as f32).collect(),
            }
        }
    }

    /// Grid width in pixels
    pub fn width(&self) -> usize {
        self.width
    }

    /// Grid height in pixels
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of interleaved channels
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Sample at (x, y) in `channel`
    pub fn get(&self, x: usize, y: usize, channel: usize) -> f32 {
        self.data[(y * self.width + x) * self.channels + channel]
    }

    /// Largest sample across all channels, 0.0 for an empty grid
    pub fn max_value(&self) -> f32 {
        self.data.iter().copied().fold(0.0f32, f32::max)
    }

    /// Factor mapping samples into 0..=1: 1/255 if any sample exceeds 1, else 1
    pub fn unit_scale(&self) -> f32 {
        if self.max_value() > 1.0 { 1.0 / 255.0 } else { 1.0 }
    }

    /// Copy rescaled into 0..=1 by the same rule as [`Self::unit_scale`]
    ///
    /// Divides rather than multiplies so 255 maps to exactly 1.0.
    pub fn to_unit_range(&self) -> Self {
        let divisor = if self.max_value() > 1.0 { 255.0 } else { 1.0 };
        Self {
            data: self.data.iter().map(|&v| v / divisor).collect(),
            ..self.clone()
        }
    }

    /// All samples
    pub fn samples(&self) -> &[f32] {
        &self.data
    }
}
