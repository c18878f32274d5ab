//! Rescale phase: resample an oversized source to the working resolution.
//!
//! Runs only when the source exceeds the target in either axis. The leader
//! allocates the target buffer, every worker fills its own band of rows by
//! bicubic sampling of the original, and the leader drops the original once
//! all workers are past the second checkpoint.

use raster::sample_bicubic;
use tracing::debug;

use crate::error::{PipelineError, Result};
use crate::pipeline::WorkerTask;
use crate::shared::SharedImage;

pub(crate) fn rescale_image(task: &mut WorkerTask<'_, '_>) -> Result<()> {
    let ctx = task.ctx;
    let width = ctx.config.target_width;
    let height = ctx.config.target_height;

    if task.is_leader() {
        let target = SharedImage::try_new(width, height)?;
        if ctx.working.set(target).is_err() {
            return Err(PipelineError::Unpublished("working image"));
        }
        debug!(worker = task.id, width, height, "allocated rescale buffer");
    }

    // Checkpoint 1: target buffer published
    task.checkpoint()?;

    let target = ctx.working()?;
    let rows = task.assign(height);
    {
        let source = ctx.source.read();
        let source = source
            .as_ref()
            .ok_or(PipelineError::Unpublished("source image"))?;

        // SAFETY: partition hands each worker a disjoint band of rows and
        // nothing else touches the target until the next checkpoint.
        let band = unsafe { target.rows_mut(rows.clone()) };
        let x_scale = (width - 1) as f32;
        let y_scale = (height - 1) as f32;

        for (offset, line) in band.chunks_exact_mut(width).enumerate() {
            let v = (rows.start + offset) as f32 / y_scale;
            for (col, pixel) in line.iter_mut().enumerate() {
                let u = col as f32 / x_scale;
                *pixel = sample_bicubic(source, u, v);
            }
        }
    }
    debug!(worker = task.id, rows = ?rows, "resampled rows");

    // Checkpoint 2: every worker is done reading the source
    task.checkpoint()?;

    if task.is_leader() {
        if let Some(source) = ctx.source.write().take() {
            debug!(
                width = source.width(),
                height = source.height(),
                "released source image"
            );
        }
    }

    Ok(())
}
