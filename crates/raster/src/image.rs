//! Row-major RGB image buffer.

use crate::error::{RasterError, Result};

/// A single 8-bit RGB pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Same value on every channel.
    pub const fn gray(value: u8) -> Self {
        Self::new(value, value, value)
    }

    /// Integer mean of the three channels (truncating).
    #[inline]
    pub fn mean(self) -> u8 {
        ((self.r as u16 + self.g as u16 + self.b as u16) / 3) as u8
    }

    #[inline]
    pub fn channels(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

impl From<[u8; 3]> for Rgb {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self::new(r, g, b)
    }
}

/// An RGB image stored row by row.
///
/// Invariant: `pixels.len() == width * height`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    width: usize,
    height: usize,
    pixels: Vec<Rgb>,
}

impl Image {
    /// Wrap an existing pixel buffer, checking it matches the dimensions.
    pub fn new(width: usize, height: usize, pixels: Vec<Rgb>) -> Result<Self> {
        let expected = width.checked_mul(height).ok_or_else(|| {
            RasterError::invalid_header(format!("dimensions {width}x{height} overflow"))
        })?;
        if pixels.len() != expected {
            return Err(RasterError::DimensionMismatch {
                width,
                height,
                len: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Create an image with every pixel set to `color`.
    pub fn filled(width: usize, height: usize, color: Rgb) -> Self {
        Self {
            width,
            height,
            pixels: vec![color; width * height],
        }
    }

    /// Build an image by evaluating `f(row, col)` for every pixel.
    pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(usize, usize) -> Rgb) -> Self {
        let mut pixels = Vec::with_capacity(width * height);
        for row in 0..height {
            for col in 0..width {
                pixels.push(f(row, col));
            }
        }
        Self {
            width,
            height,
            pixels,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    pub fn pixels(&self) -> &[Rgb] {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut [Rgb] {
        &mut self.pixels
    }

    pub fn into_pixels(self) -> Vec<Rgb> {
        self.pixels
    }

    /// Pixel at (`row`, `col`). Panics when out of bounds.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Rgb {
        self.pixels[row * self.width + col]
    }

    #[inline]
    pub fn set(&mut self, row: usize, col: usize, color: Rgb) {
        self.pixels[row * self.width + col] = color;
    }

    /// One row of pixels.
    pub fn row(&self, row: usize) -> &[Rgb] {
        let start = row * self.width;
        &self.pixels[start..start + self.width]
    }

    /// Flatten to interleaved `RGBRGB...` bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|p| p.channels()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_truncates() {
        assert_eq!(Rgb::new(255, 255, 254).mean(), 254);
        assert_eq!(Rgb::new(1, 1, 0).mean(), 0);
        assert_eq!(Rgb::WHITE.mean(), 255);
    }

    #[test]
    fn test_new_rejects_wrong_length() {
        let err = Image::new(2, 2, vec![Rgb::BLACK; 3]).unwrap_err();
        assert!(matches!(
            err,
            RasterError::DimensionMismatch {
                width: 2,
                height: 2,
                len: 3
            }
        ));
    }

    #[test]
    fn test_from_fn_is_row_major() {
        let image = Image::from_fn(3, 2, |row, col| Rgb::gray((row * 10 + col) as u8));
        assert_eq!(image.get(1, 2), Rgb::gray(12));
        assert_eq!(image.pixels()[5], Rgb::gray(12));
        assert_eq!(image.row(1), &[Rgb::gray(10), Rgb::gray(11), Rgb::gray(12)]);
    }
}
