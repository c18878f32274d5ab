//! Sampling phase: threshold the working image into the occupancy grid.
//!
//! With `P = height / step` and `Q = width / step` the grid has `P + 1` rows
//! and `Q + 1` columns. Interior sample points sit on multiples of `step`.
//! The extra last column and row have no sample point inside the image, so
//! they read the image's rightmost column and bottom row instead.

use raster::Rgb;
use tracing::debug;

use crate::error::{PipelineError, Result};
use crate::pipeline::WorkerTask;
use crate::shared::SharedGrid;

/// Grid value of one sample pixel: 1 inside (dark), 0 outside.
#[inline]
pub(crate) fn classify(pixel: Rgb, threshold: u8) -> u8 {
    u8::from(pixel.mean() <= threshold)
}

pub(crate) fn sample_grid(task: &mut WorkerTask<'_, '_>) -> Result<()> {
    let ctx = task.ctx;
    let image = ctx.working()?;
    let step = ctx.config.step;
    let threshold = ctx.config.threshold;
    let width = image.width();
    let height = image.height();
    let p = height / step;
    let q = width / step;

    if task.is_leader() {
        let mut grid = SharedGrid::try_new(p + 1, q + 1)?;
        grid.set(p, q, 0);
        if ctx.grid.set(grid).is_err() {
            return Err(PipelineError::Unpublished("grid"));
        }
        debug!(worker = task.id, rows = p + 1, cols = q + 1, "allocated grid");
    }

    // Checkpoint 3: grid published
    task.checkpoint()?;

    let grid = ctx.grid()?;
    // SAFETY: nobody writes the working image while the grid is sampled.
    let pixels = unsafe { image.pixels() };

    // Interior rows plus their right-edge cell
    let rows = task.assign(p);
    {
        // SAFETY: grid rows are partitioned disjointly; row `p` is never in
        // any worker's range.
        let cells = unsafe { grid.rows_mut(rows.clone()) };
        for (offset, cells_row) in cells.chunks_exact_mut(q + 1).enumerate() {
            let y = (rows.start + offset) * step;
            let line = &pixels[y * width..(y + 1) * width];
            for (j, cell) in cells_row[..q].iter_mut().enumerate() {
                *cell = classify(line[j * step], threshold);
            }
            cells_row[q] = classify(line[width - 1], threshold);
        }
    }

    // Bottom boundary row, excluding the corner
    let cols = task.assign(q);
    if !cols.is_empty() {
        let last_line = &pixels[(height - 1) * width..height * width];
        // SAFETY: columns of row `p` are partitioned disjointly and the corner
        // `q` lies outside every range.
        let boundary = unsafe { grid.row_segment_mut(p, cols.clone()) };
        for (cell, j) in boundary.iter_mut().zip(cols.clone()) {
            *cell = classify(last_line[j * step], threshold);
        }
    }

    debug!(worker = task.id, rows = ?rows, cols = ?cols, "sampled grid");
    Ok(())
}
