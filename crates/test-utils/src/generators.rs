//! Synthetic images with predictable sampling grids.
//!
//! Dark pixels fall inside the contour at the default threshold (200) and
//! light pixels fall outside, so tests can work out the expected grid by hand.

use raster::{Image, Rgb};

/// Channel mean well below the default threshold.
pub const DARK: Rgb = Rgb::new(20, 30, 40);

/// Channel mean well above the default threshold.
pub const LIGHT: Rgb = Rgb::new(250, 240, 230);

/// Creates an image with a single color everywhere.
pub fn solid_image(width: usize, height: usize, color: Rgb) -> Image {
    Image::filled(width, height, color)
}

/// Creates a checkerboard of `cell x cell` squares.
///
/// The square containing pixel (0, 0) is `DARK`; squares alternate in both
/// axes from there. With `cell` equal to the grid step every interior sample
/// point lands on the top-left pixel of its own square.
pub fn checkerboard(width: usize, height: usize, cell: usize) -> Image {
    Image::from_fn(width, height, |row, col| {
        if (row / cell + col / cell) % 2 == 0 {
            DARK
        } else {
            LIGHT
        }
    })
}

/// Creates a `DARK` disc of `radius` pixels centred in a `LIGHT` image.
pub fn disc_image(width: usize, height: usize, radius: f32) -> Image {
    let cy = (height as f32 - 1.0) / 2.0;
    let cx = (width as f32 - 1.0) / 2.0;
    Image::from_fn(width, height, |row, col| {
        let dy = row as f32 - cy;
        let dx = col as f32 - cx;
        if dx * dx + dy * dy <= radius * radius {
            DARK
        } else {
            LIGHT
        }
    })
}

/// Creates a horizontal gray ramp from black (left) to white (right).
pub fn horizontal_gradient(width: usize, height: usize) -> Image {
    let span = width.saturating_sub(1).max(1);
    Image::from_fn(width, height, |_, col| Rgb::gray((col * 255 / span) as u8))
}

/// Creates deterministic pseudo-random pixels from `seed` (xorshift).
///
/// The same seed always produces the same image, which makes it useful for
/// comparing runs with different worker counts.
pub fn noise_image(width: usize, height: usize, seed: u64) -> Image {
    let mut state = seed.wrapping_mul(0x9E37_79B9_7F4A_7C15) | 1;
    Image::from_fn(width, height, |_, _| {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        let [r, g, b, ..] = state.to_le_bytes();
        Rgb::new(r, g, b)
    })
}
