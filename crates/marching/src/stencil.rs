//! Contour stencils, one per marching-squares configuration.
//!
//! A stencil is a `step x step` image that replaces one grid square in the
//! output. Stencil `k` is drawn for configuration index `k`, so the asset
//! numbering has to agree with the corner weights used by
//! [`crate::march::configuration_index`]: top-left 8, top-right 4,
//! bottom-right 2, bottom-left 1.

use std::path::Path;

use raster::{ppm, Image, Rgb};
use tracing::{debug, info};

use crate::error::StencilError;
use crate::march::{BOTTOM_LEFT, BOTTOM_RIGHT, TOP_LEFT, TOP_RIGHT};

/// Number of distinct 4-bit corner configurations.
pub const CONFIGURATION_COUNT: usize = 16;

/// Background of generated stencils.
const BACKGROUND: Rgb = Rgb::WHITE;

/// Contour line colour of generated stencils.
const LINE: Rgb = Rgb::BLACK;

/// The 16 stencils, indexed by configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContourMap {
    size: usize,
    stencils: Vec<Image>,
}

impl ContourMap {
    /// Load `0.ppm` .. `15.ppm` from `dir`.
    pub fn load(dir: impl AsRef<Path>) -> Result<Self, StencilError> {
        let dir = dir.as_ref();
        let stencils = (0..CONFIGURATION_COUNT)
            .map(|index| {
                let path = dir.join(format!("{index}.ppm"));
                ppm::read_file(&path).map_err(|source| StencilError::Load { index, source })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let map = Self::from_stencils(stencils)?;
        info!(dir = %dir.display(), size = map.size, "loaded contour stencils");
        Ok(map)
    }

    /// Build from 16 square stencils of one size.
    pub fn from_stencils(stencils: Vec<Image>) -> Result<Self, StencilError> {
        if stencils.len() != CONFIGURATION_COUNT {
            return Err(StencilError::WrongCount {
                expected: CONFIGURATION_COUNT,
                actual: stencils.len(),
            });
        }

        let size = stencils[0].width();
        for (index, stencil) in stencils.iter().enumerate() {
            if stencil.width() != stencil.height() {
                return Err(StencilError::NotSquare {
                    index,
                    width: stencil.width(),
                    height: stencil.height(),
                });
            }
            if stencil.width() != size {
                return Err(StencilError::SizeMismatch {
                    index,
                    size: stencil.width(),
                    expected: size,
                });
            }
        }

        Ok(Self { size, stencils })
    }

    /// Generated stencil set of `size x size` pixels.
    ///
    /// White squares with a one-pixel black segment joining the midpoints of
    /// every edge whose two corners differ. The saddles 5 and 10 get two
    /// segments, each cutting off one inside corner. `size` is clamped to at
    /// least one pixel.
    pub fn builtin(size: usize) -> Self {
        let size = size.max(1);
        let stencils = (0..CONFIGURATION_COUNT as u8)
            .map(|k| draw_stencil(k, size))
            .collect();
        debug!(size, "generated builtin contour stencils");
        Self { size, stencils }
    }

    /// Side length of every stencil in pixels.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Stencil for configuration `index`. Only the low four bits are used.
    #[inline]
    pub fn get(&self, index: u8) -> &Image {
        &self.stencils[(index & 0x0F) as usize]
    }

    pub fn stencils(&self) -> &[Image] {
        &self.stencils
    }
}

/// Edge midpoints as (row, col).
struct Midpoints {
    top: (usize, usize),
    right: (usize, usize),
    bottom: (usize, usize),
    left: (usize, usize),
}

fn draw_stencil(k: u8, size: usize) -> Image {
    let mut image = Image::filled(size, size, BACKGROUND);
    let mid = size / 2;
    let last = size - 1;
    let edges = Midpoints {
        top: (0, mid),
        right: (mid, last),
        bottom: (last, mid),
        left: (mid, 0),
    };

    let tl = (k & TOP_LEFT) != 0;
    let tr = (k & TOP_RIGHT) != 0;
    let br = (k & BOTTOM_RIGHT) != 0;
    let bl = (k & BOTTOM_LEFT) != 0;

    let segments = match k {
        // Saddles: isolate each inside corner
        5 => vec![(edges.top, edges.right), (edges.left, edges.bottom)],
        10 => vec![(edges.left, edges.top), (edges.right, edges.bottom)],
        _ => {
            let crossed: Vec<(usize, usize)> = [
                (tl != tr, edges.top),
                (tr != br, edges.right),
                (bl != br, edges.bottom),
                (tl != bl, edges.left),
            ]
            .into_iter()
            .filter_map(|(crossed, point)| crossed.then_some(point))
            .collect();
            match crossed.as_slice() {
                [a, b] => vec![(*a, *b)],
                _ => vec![],
            }
        }
    };

    for (from, to) in segments {
        draw_line(&mut image, from, to);
    }
    image
}

/// Bresenham line between two (row, col) points, inclusive.
fn draw_line(image: &mut Image, from: (usize, usize), to: (usize, usize)) {
    let (mut row, mut col) = (from.0 as i64, from.1 as i64);
    let (end_row, end_col) = (to.0 as i64, to.1 as i64);

    let d_row = (end_row - row).abs();
    let d_col = -(end_col - col).abs();
    let step_row = if row < end_row { 1 } else { -1 };
    let step_col = if col < end_col { 1 } else { -1 };
    let mut err = d_row + d_col;

    loop {
        image.set(row as usize, col as usize, LINE);
        if row == end_row && col == end_col {
            break;
        }
        let e2 = 2 * err;
        if e2 >= d_col {
            err += d_col;
            row += step_row;
        }
        if e2 <= d_row {
            err += d_row;
            col += step_col;
        }
    }
}
