//! Bicubic sampling of RGB images.
//!
//! Coordinates are normalized: `u` runs across the width and `v` down the
//! height, both in `[0, 1]`, so `(0, 0)` is the top-left pixel centre and
//! `(1, 1)` the bottom-right one. Samples that fall between pixels are
//! reconstructed from the surrounding 4x4 neighbourhood with a Catmull-Rom
//! spline, clamping at the borders.

use crate::image::{Image, Rgb};

/// Sample `image` at normalized coordinates with bicubic interpolation.
///
/// Values outside `[0, 1]` are clamped to the border. Panics on an empty image.
pub fn sample_bicubic(image: &Image, u: f32, v: f32) -> Rgb {
    let x = u.clamp(0.0, 1.0) * (image.width() - 1) as f32;
    let y = v.clamp(0.0, 1.0) * (image.height() - 1) as f32;

    let xi = x.floor() as i64;
    let yi = y.floor() as i64;
    let xf = x - xi as f32;
    let yf = y - yi as f32;

    let max_col = image.width() as i64 - 1;
    let max_row = image.height() as i64 - 1;

    // 4x4 neighbourhood, one array per channel
    let mut values = [[[0.0f32; 4]; 4]; 3];
    for j in 0..4 {
        let row = (yi + j - 1).clamp(0, max_row) as usize;
        for i in 0..4 {
            let col = (xi + i - 1).clamp(0, max_col) as usize;
            let pixel = image.get(row, col).channels();
            for (channel, value) in pixel.iter().enumerate() {
                values[channel][j as usize][i as usize] = *value as f32;
            }
        }
    }

    let mut out = [0u8; 3];
    for (channel, grid) in values.iter().enumerate() {
        // Cubic interpolation along x for each row, then along y
        let mut row_values = [0.0f32; 4];
        for (j, row) in grid.iter().enumerate() {
            row_values[j] = cubic_1d(row[0], row[1], row[2], row[3], xf);
        }
        let value = cubic_1d(row_values[0], row_values[1], row_values[2], row_values[3], yf);
        out[channel] = value.round().clamp(0.0, 255.0) as u8;
    }

    Rgb::from(out)
}

/// 1D cubic interpolation using Catmull-Rom spline.
fn cubic_1d(p0: f32, p1: f32, p2: f32, p3: f32, t: f32) -> f32 {
    let t2 = t * t;
    let t3 = t2 * t;

    // Catmull-Rom coefficients
    let a = -0.5 * p0 + 1.5 * p1 - 1.5 * p2 + 0.5 * p3;
    let b = p0 - 2.5 * p1 + 2.0 * p2 - 0.5 * p3;
    let c = -0.5 * p0 + 0.5 * p2;
    let d = p1;

    a * t3 + b * t2 + c * t + d
}
