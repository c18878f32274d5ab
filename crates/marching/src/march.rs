//! March phase: stamp one contour stencil per grid square.
//!
//! Square (i, j) spans grid points (i, j) .. (i + 1, j + 1) and covers the
//! `step x step` pixel block whose top-left pixel is (i * step, j * step).

use tracing::debug;

use crate::error::Result;
use crate::pipeline::WorkerTask;

/// Weight of the top-left corner in a configuration index.
pub const TOP_LEFT: u8 = 8;
/// Weight of the top-right corner.
pub const TOP_RIGHT: u8 = 4;
/// Weight of the bottom-right corner.
pub const BOTTOM_RIGHT: u8 = 2;
/// Weight of the bottom-left corner.
pub const BOTTOM_LEFT: u8 = 1;

/// 4-bit configuration of a square from its corner values (each 0 or 1).
///
/// The weighting order matches the numbering of the stencil assets.
#[inline]
pub fn configuration_index(top_left: u8, top_right: u8, bottom_right: u8, bottom_left: u8) -> u8 {
    TOP_LEFT * top_left + TOP_RIGHT * top_right + BOTTOM_RIGHT * bottom_right + BOTTOM_LEFT * bottom_left
}

pub(crate) fn march_squares(task: &mut WorkerTask<'_, '_>) -> Result<()> {
    let ctx = task.ctx;
    let image = ctx.working()?;
    let grid = ctx.grid()?;
    let step = ctx.config.step;
    let width = image.width();
    let cols = grid.cols();
    let p = grid.rows() - 1;
    let q = cols - 1;

    let rows = task.assign(p);
    // SAFETY: the grid is read-only from the sampling checkpoint onwards.
    let cells = unsafe { grid.cells() };
    // SAFETY: grid rows map to disjoint pixel bands of `step` rows each.
    let band = unsafe { image.rows_mut(rows.start * step..rows.end * step) };

    for i in rows.clone() {
        let top = &cells[i * cols..(i + 1) * cols];
        let bottom = &cells[(i + 1) * cols..(i + 2) * cols];
        let band_row = (i - rows.start) * step;

        for j in 0..q {
            let k = configuration_index(top[j], top[j + 1], bottom[j + 1], bottom[j]);
            let stencil = ctx.contour_map.get(k);
            for r in 0..step {
                let dst = (band_row + r) * width + j * step;
                band[dst..dst + step].copy_from_slice(stencil.row(r));
            }
        }
    }

    debug!(worker = task.id, rows = ?rows, "marched squares");
    Ok(())
}
