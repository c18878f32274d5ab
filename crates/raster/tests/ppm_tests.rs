//! Tests for the portable pixel-map codec.

use raster::ppm::{decode, encode, read_file, write_file};
use raster::{Image, PpmFormat, RasterError, Rgb};

// ============================================================================
// Helper functions
// ============================================================================

/// Deterministic image with distinct values per channel.
fn pattern_image(width: usize, height: usize) -> Image {
    Image::from_fn(width, height, |row, col| {
        Rgb::new(
            (row * 7 + col * 3) as u8,
            (row * 13) as u8,
            (255 - col * 5) as u8,
        )
    })
}

// ============================================================================
// Decoding tests
// ============================================================================

#[test]
fn test_decode_ascii_basic() {
    let data = b"P3\n2 2\n255\n255 0 0  0 255 0\n0 0 255  10 20 30\n";
    let image = decode(data).unwrap();

    assert_eq!(image.width(), 2);
    assert_eq!(image.height(), 2);
    assert_eq!(image.get(0, 0), Rgb::new(255, 0, 0));
    assert_eq!(image.get(0, 1), Rgb::new(0, 255, 0));
    assert_eq!(image.get(1, 0), Rgb::new(0, 0, 255));
    assert_eq!(image.get(1, 1), Rgb::new(10, 20, 30));
}

#[test]
fn test_decode_binary_basic() {
    let mut data = b"P6\n3 1\n255\n".to_vec();
    data.extend_from_slice(&[1, 2, 3, 4, 5, 6, 7, 8, 9]);
    let image = decode(&data).unwrap();

    assert_eq!(image.width(), 3);
    assert_eq!(image.height(), 1);
    assert_eq!(image.row(0), &[Rgb::new(1, 2, 3), Rgb::new(4, 5, 6), Rgb::new(7, 8, 9)]);
}

#[test]
fn test_decode_rejects_graymap() {
    let err = decode(b"P5\n1 1\n255\n\x00").unwrap_err();
    assert!(matches!(err, RasterError::UnsupportedFormat(ref m) if m == "P5"));
}

#[test]
fn test_decode_rejects_sixteen_bit() {
    let err = decode(b"P3\n1 1\n65535\n0 0 0\n").unwrap_err();
    assert!(matches!(err, RasterError::UnsupportedDepth(_)));
}

#[test]
fn test_decode_rejects_short_binary_payload() {
    let mut data = b"P6\n2 2\n255\n".to_vec();
    data.extend_from_slice(&[0; 9]);
    assert!(decode(&data).is_err());
}

#[test]
fn test_decode_rejects_short_ascii() {
    assert!(decode(b"P3\n2 1\n255\n1 2 3 4 5\n").is_err());
}

#[test]
fn test_decode_rejects_malformed_header() {
    assert!(matches!(decode(b"").unwrap_err(), RasterError::Codec(_)));
    assert!(matches!(decode(b"P6 4").unwrap_err(), RasterError::Codec(_)));
    assert!(matches!(decode(b"P6 x 4 255\n").unwrap_err(), RasterError::Codec(_)));
    assert!(matches!(decode(b"P9\n1 1\n255\n").unwrap_err(), RasterError::Codec(_)));
}

#[test]
fn test_decode_rejects_empty_image() {
    assert!(matches!(
        decode(b"P3\n0 4\n255\n").unwrap_err(),
        RasterError::InvalidHeader(_) | RasterError::Codec(_)
    ));
}

// ============================================================================
// Oversized headers: rejected before any pixel buffer is allocated
// ============================================================================

#[test]
fn test_decode_overflowing_ascii_header_is_an_error() {
    // width * height * 3 does not fit in 64 bits
    let err = decode(b"P3 4294967295 4294967295 255\n1 2 3\n").unwrap_err();
    assert!(matches!(err, RasterError::InvalidHeader(_) | RasterError::Codec(_)));
}

#[test]
fn test_decode_overflowing_binary_header_is_an_error() {
    let err = decode(b"P6 4294967295 4294967295 255\n\x01\x02\x03").unwrap_err();
    assert!(matches!(err, RasterError::InvalidHeader(_) | RasterError::Codec(_)));
}

#[test]
fn test_decode_large_header_with_tiny_payload() {
    let data = b"P6 100000 100000 255\n\x00\x00\x00";
    let err = decode(data).unwrap_err();
    match err {
        RasterError::Truncated { expected, available } => {
            assert_eq!(expected, 30_000_000_000);
            assert_eq!(available, data.len());
        }
        other => panic!("unexpected error: {other:?}"),
    }

    let err = decode(b"P3 100000 100000 255\n0 0 0\n").unwrap_err();
    assert!(matches!(err, RasterError::Truncated { .. }));
}

// ============================================================================
// Encoding tests
// ============================================================================

#[test]
fn test_encode_binary_layout() {
    let image = Image::new(2, 1, vec![Rgb::new(1, 2, 3), Rgb::new(4, 5, 6)]).unwrap();
    let bytes = encode(&image, PpmFormat::Binary).unwrap();

    assert!(bytes.starts_with(b"P6"));
    assert!(bytes.ends_with(&[1, 2, 3, 4, 5, 6]));
}

#[test]
fn test_encode_ascii_is_text() {
    let image = Image::new(1, 1, vec![Rgb::new(0, 128, 255)]).unwrap();
    let text = String::from_utf8(encode(&image, PpmFormat::Ascii).unwrap()).unwrap();
    assert!(text.starts_with("P3"));
    assert_eq!(decode(text.as_bytes()).unwrap(), image);
}

// ============================================================================
// Round trip through disk
// ============================================================================

#[test]
fn test_file_round_trip_is_exact() {
    let dir = tempfile::tempdir().unwrap();
    let image = pattern_image(37, 23);

    for format in [PpmFormat::Binary, PpmFormat::Ascii] {
        let path = dir.path().join(format!("out_{format:?}.ppm"));
        write_file(&image, &path, format).unwrap();
        let back = read_file(&path).unwrap();
        assert_eq!(back, image, "format {format:?}");
        assert_eq!(back.to_bytes(), image.to_bytes());
    }
}

#[test]
fn test_read_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = read_file(dir.path().join("nope.ppm")).unwrap_err();
    assert!(matches!(err, RasterError::Io(_)));
}
