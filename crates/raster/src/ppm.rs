//! Portable pixel-map (PPM) encoding and decoding.
//!
//! Supports the two RGB variants:
//! - **`P3`**: ASCII samples separated by whitespace
//! - **`P6`**: raw bytes, three per pixel
//!
//! Parsing and serialization are done by the `image` crate's PNM codec; this
//! module restricts it to 8-bit pixel maps and converts to and from [`Image`].
//! The declared raster size is checked against the input length before any
//! pixel buffer is allocated.

use std::fs;
use std::path::Path;

use ::image::codecs::pnm::{PnmDecoder, PnmEncoder, PnmSubtype, SampleEncoding};
use ::image::{ColorType, ImageDecoder, ImageEncoder};
use tracing::debug;

use crate::error::{RasterError, Result};
use crate::image::{Image, Rgb};

/// On-disk variant of a pixel map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PpmFormat {
    /// `P3`, human readable.
    Ascii,
    /// `P6`, compact.
    #[default]
    Binary,
}

impl PpmFormat {
    fn subtype(self) -> PnmSubtype {
        match self {
            PpmFormat::Ascii => PnmSubtype::Pixmap(SampleEncoding::Ascii),
            PpmFormat::Binary => PnmSubtype::Pixmap(SampleEncoding::Binary),
        }
    }
}

/// Magic number of a PNM subtype, for error messages.
fn magic(subtype: PnmSubtype) -> &'static str {
    match subtype {
        PnmSubtype::Bitmap(SampleEncoding::Ascii) => "P1",
        PnmSubtype::Graymap(SampleEncoding::Ascii) => "P2",
        PnmSubtype::Pixmap(SampleEncoding::Ascii) => "P3",
        PnmSubtype::Bitmap(SampleEncoding::Binary) => "P4",
        PnmSubtype::Graymap(SampleEncoding::Binary) => "P5",
        PnmSubtype::Pixmap(SampleEncoding::Binary) => "P6",
        PnmSubtype::ArbitraryMap => "P7",
    }
}

/// Read a PPM file from disk.
pub fn read_file(path: impl AsRef<Path>) -> Result<Image> {
    let path = path.as_ref();
    let bytes = fs::read(path)?;
    let image = decode(&bytes)?;
    debug!(
        path = %path.display(),
        width = image.width(),
        height = image.height(),
        "decoded PPM"
    );
    Ok(image)
}

/// Write an image to disk in the given format.
pub fn write_file(image: &Image, path: impl AsRef<Path>, format: PpmFormat) -> Result<()> {
    let path = path.as_ref();
    fs::write(path, encode(image, format)?)?;
    debug!(
        path = %path.display(),
        width = image.width(),
        height = image.height(),
        ?format,
        "wrote PPM"
    );
    Ok(())
}

/// Decode a `P3` or `P6` byte stream.
pub fn decode(bytes: &[u8]) -> Result<Image> {
    let decoder = PnmDecoder::new(bytes)?;

    let subtype = decoder.subtype();
    if !matches!(subtype, PnmSubtype::Pixmap(_)) {
        return Err(RasterError::UnsupportedFormat(magic(subtype).to_string()));
    }
    let color = decoder.color_type();
    if color != ColorType::Rgb8 {
        return Err(RasterError::UnsupportedDepth(format!("{color:?}")));
    }

    let (width, height) = decoder.dimensions();
    if width == 0 || height == 0 {
        return Err(RasterError::invalid_header(format!(
            "empty image {width}x{height}"
        )));
    }

    // Every sample takes at least one input byte in either encoding, so a
    // header declaring more samples than the input holds is rejected here.
    let expected = u64::from(width)
        .checked_mul(u64::from(height))
        .and_then(|pixels| pixels.checked_mul(3))
        .ok_or_else(|| RasterError::invalid_header(format!("dimensions {width}x{height} overflow")))?;
    if expected > bytes.len() as u64 {
        return Err(RasterError::Truncated {
            expected,
            available: bytes.len(),
        });
    }

    let mut samples = vec![0u8; expected as usize];
    decoder.read_image(&mut samples)?;
    let pixels = samples
        .chunks_exact(3)
        .map(|c| Rgb::new(c[0], c[1], c[2]))
        .collect();

    Image::new(width as usize, height as usize, pixels)
}

/// Encode an image as `P3` or `P6`.
pub fn encode(image: &Image, format: PpmFormat) -> Result<Vec<u8>> {
    let too_large = || RasterError::TooLarge {
        width: image.width(),
        height: image.height(),
    };
    let width = u32::try_from(image.width()).map_err(|_| too_large())?;
    let height = u32::try_from(image.height()).map_err(|_| too_large())?;

    let mut out = Vec::new();
    PnmEncoder::new(&mut out)
        .with_subtype(format.subtype())
        .write_image(&image.to_bytes(), width, height, ColorType::Rgb8)?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_comments_are_skipped() {
        let data = b"P3\n# made by hand\n2 1\n255\n1 2 3 4 5 6\n";
        let image = decode(data).unwrap();
        assert_eq!(image.width(), 2);
        assert_eq!(image.height(), 1);
        assert_eq!(image.get(0, 1), Rgb::new(4, 5, 6));
    }

    #[test]
    fn test_magic_numbers() {
        assert_eq!(magic(PpmFormat::Ascii.subtype()), "P3");
        assert_eq!(magic(PpmFormat::Binary.subtype()), "P6");
    }

    #[test]
    fn test_encode_starts_with_magic() {
        let image = Image::filled(3, 2, Rgb::WHITE);
        assert!(encode(&image, PpmFormat::Ascii).unwrap().starts_with(b"P3"));
        assert!(encode(&image, PpmFormat::Binary).unwrap().starts_with(b"P6"));
    }
}
