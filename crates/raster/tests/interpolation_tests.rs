//! Tests for bicubic sampling.

use raster::{sample_bicubic, Image, Rgb};

#[test]
fn test_sampling_on_pixel_centres_is_identity() {
    let image = Image::from_fn(9, 5, |row, col| Rgb::new((row * 40) as u8, (col * 25) as u8, 77));

    for row in 0..image.height() {
        for col in 0..image.width() {
            let u = col as f32 / (image.width() - 1) as f32;
            let v = row as f32 / (image.height() - 1) as f32;
            assert_eq!(sample_bicubic(&image, u, v), image.get(row, col), "({row}, {col})");
        }
    }
}

#[test]
fn test_corners() {
    let image = Image::from_fn(4, 4, |row, col| Rgb::gray((row * 4 + col) as u8 * 10));
    assert_eq!(sample_bicubic(&image, 0.0, 0.0), image.get(0, 0));
    assert_eq!(sample_bicubic(&image, 1.0, 0.0), image.get(0, 3));
    assert_eq!(sample_bicubic(&image, 0.0, 1.0), image.get(3, 0));
    assert_eq!(sample_bicubic(&image, 1.0, 1.0), image.get(3, 3));
}

#[test]
fn test_out_of_range_coordinates_clamp() {
    let image = Image::from_fn(3, 3, |row, col| Rgb::gray((row * 3 + col) as u8 * 20));
    assert_eq!(sample_bicubic(&image, -0.5, -2.0), image.get(0, 0));
    assert_eq!(sample_bicubic(&image, 4.0, 1.5), image.get(2, 2));
}

#[test]
fn test_uniform_image_stays_uniform() {
    let color = Rgb::new(12, 200, 99);
    let image = Image::filled(6, 6, color);
    for k in 0..=10 {
        let t = k as f32 / 10.0;
        assert_eq!(sample_bicubic(&image, t, 1.0 - t), color);
    }
}

#[test]
fn test_midpoint_of_linear_ramp() {
    // Horizontal ramp 0, 50, 100, 150, 200: halfway between columns 1 and 2
    let image = Image::from_fn(5, 1, |_, col| Rgb::gray((col * 50) as u8));
    let sample = sample_bicubic(&image, 0.375, 0.0);
    assert_eq!(sample, Rgb::gray(75));
}

#[test]
fn test_undershoot_is_clamped_to_zero() {
    // Catmull-Rom dips below zero just before a sharp step.
    let image = Image::from_fn(4, 1, |_, col| if col < 2 { Rgb::BLACK } else { Rgb::WHITE });
    let sample = sample_bicubic(&image, 0.5 / 3.0, 0.0);
    assert_eq!(sample, Rgb::BLACK);
}
