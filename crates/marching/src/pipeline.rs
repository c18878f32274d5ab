//! Pipeline coordinator.
//!
//! ## Design
//!
//! - **One shared context**: built before any worker starts. It holds the
//!   barrier, the stencils, the source image and write-once slots for the
//!   working image and the grid.
//! - **Leader allocates**: worker 0 allocates every buffer shared by the pool
//!   and publishes it into its slot; the next barrier crossing makes it
//!   visible to everyone else.
//! - **Disjoint writes**: inside a phase each worker writes only the rows or
//!   columns [`partition`] assigns it, so no locks are taken.
//!
//! Checkpoints, in order: rescale buffer published (rescale only), resampling
//! done (rescale only), grid published, grid sampled, squares marched.

use std::ops::Range;
use std::sync::OnceLock;
use std::thread;
use std::time::Instant;

use parking_lot::RwLock;
use raster::Image;
use tracing::{debug, info, warn};

use crate::barrier::{PhaseBarrier, PoisonOnPanic};
use crate::config::ContourConfig;
use crate::error::{PipelineError, Result};
use crate::grid::Grid;
use crate::partition::partition;
use crate::shared::{SharedGrid, SharedImage};
use crate::stencil::ContourMap;
use crate::{march, rescale, sample};

/// Result of a pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    /// Working image with every grid square replaced by its stencil.
    pub image: Image,
    /// Occupancy grid the stencils were chosen from.
    pub grid: Grid,
    /// Whether the source was resampled to the target resolution.
    pub rescaled: bool,
}

/// State shared by every worker for the whole run.
pub(crate) struct TaskContext<'a> {
    pub config: &'a ContourConfig,
    pub contour_map: &'a ContourMap,
    pub barrier: PhaseBarrier,
    pub workers: usize,
    /// Whether the rescale phase runs. Fixed before spawn so every worker
    /// passes the same number of checkpoints.
    pub rescale: bool,
    /// Original image; only populated when it has to be resampled.
    ///
    /// Never contended: workers only take read guards between checkpoints 1
    /// and 2, and the leader takes the write guard after checkpoint 2.
    pub source: RwLock<Option<Image>>,
    pub working: OnceLock<SharedImage>,
    pub grid: OnceLock<SharedGrid>,
}

impl TaskContext<'_> {
    /// The published working image.
    pub fn working(&self) -> Result<&SharedImage> {
        self.working
            .get()
            .ok_or(PipelineError::Unpublished("working image"))
    }

    /// The published grid.
    pub fn grid(&self) -> Result<&SharedGrid> {
        self.grid.get().ok_or(PipelineError::Unpublished("grid"))
    }
}

/// One worker's view of the run.
pub(crate) struct WorkerTask<'c, 'a> {
    pub id: usize,
    pub workers: usize,
    /// Range owned in the current phase.
    pub range: Range<usize>,
    pub ctx: &'c TaskContext<'a>,
}

impl<'c, 'a> WorkerTask<'c, 'a> {
    fn new(id: usize, ctx: &'c TaskContext<'a>) -> Self {
        Self {
            id,
            workers: ctx.workers,
            range: 0..0,
            ctx,
        }
    }

    /// Worker 0 allocates and frees the shared buffers.
    pub fn is_leader(&self) -> bool {
        self.id == 0
    }

    /// Claim this worker's share of `total` items for the next phase.
    pub fn assign(&mut self, total: usize) -> Range<usize> {
        self.range = partition(self.id, self.workers, total);
        self.range.clone()
    }

    pub fn checkpoint(&self) -> Result<u64> {
        self.ctx.barrier.wait()
    }
}

/// Trace contours over `source` with `workers` threads.
///
/// The source is consumed: it either becomes the working image or is dropped
/// once it has been resampled.
pub fn run(
    source: Image,
    workers: usize,
    contour_map: &ContourMap,
    config: &ContourConfig,
) -> Result<PipelineOutput> {
    config.validate()?;
    if workers == 0 {
        return Err(PipelineError::InvalidWorkerCount(workers));
    }
    if source.is_empty() {
        return Err(PipelineError::EmptyImage {
            width: source.width(),
            height: source.height(),
        });
    }
    if contour_map.size() != config.step {
        return Err(PipelineError::StencilMismatch {
            stencil: contour_map.size(),
            step: config.step,
        });
    }

    let rescale = config.needs_rescale(source.width(), source.height());
    info!(
        width = source.width(),
        height = source.height(),
        workers,
        rescale,
        step = config.step,
        threshold = config.threshold,
        "starting contour pipeline"
    );

    // Without a rescale the source itself is the working image.
    let (source, working) = if rescale {
        (Some(source), OnceLock::new())
    } else {
        (None, OnceLock::from(SharedImage::from_image(source)))
    };
    let ctx = TaskContext {
        config,
        contour_map,
        barrier: PhaseBarrier::new(workers),
        workers,
        rescale,
        source: RwLock::new(source),
        working,
        grid: OnceLock::new(),
    };

    let started = Instant::now();
    let results = spawn_and_join(&ctx);
    let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;

    if let Some(err) = first_error(results) {
        warn!(error = %err, "contour pipeline failed");
        return Err(err);
    }

    let TaskContext { working, grid, .. } = ctx;
    let image = working
        .into_inner()
        .ok_or(PipelineError::Unpublished("working image"))?
        .into_image();
    let grid = grid
        .into_inner()
        .ok_or(PipelineError::Unpublished("grid"))?
        .into_grid();

    info!(
        width = image.width(),
        height = image.height(),
        grid_rows = grid.rows(),
        grid_cols = grid.cols(),
        elapsed_ms,
        "contour pipeline complete"
    );

    Ok(PipelineOutput {
        image,
        grid,
        rescaled: rescale,
    })
}

/// Start one scoped thread per worker and collect their results in id order.
fn spawn_and_join(ctx: &TaskContext<'_>) -> Vec<Result<()>> {
    thread::scope(|scope| {
        let mut handles = Vec::with_capacity(ctx.workers);
        let mut results = Vec::new();

        for id in 0..ctx.workers {
            let spawned = thread::Builder::new()
                .name(format!("contour-worker-{id}"))
                .spawn_scoped(scope, move || run_worker(WorkerTask::new(id, ctx)));
            match spawned {
                Ok(handle) => handles.push(handle),
                Err(source) => {
                    // Peers already running would otherwise wait for us forever.
                    ctx.barrier.poison();
                    results.push(Err(PipelineError::Spawn { worker: id, source }));
                    break;
                }
            }
        }

        for (worker, handle) in handles.into_iter().enumerate() {
            let result = handle
                .join()
                .unwrap_or(Err(PipelineError::WorkerPanicked { worker }));
            results.push(result);
        }
        results
    })
}

/// Body of every worker thread.
fn run_worker(mut task: WorkerTask<'_, '_>) -> Result<()> {
    let ctx = task.ctx;
    let _guard = PoisonOnPanic(&ctx.barrier);
    let result = run_phases(&mut task);
    if let Err(ref err) = result {
        if !matches!(err, PipelineError::BarrierPoisoned) {
            debug!(worker = task.id, error = %err, "worker failed, poisoning barrier");
        }
        ctx.barrier.poison();
    }
    result
}

fn run_phases(task: &mut WorkerTask<'_, '_>) -> Result<()> {
    if task.ctx.rescale {
        rescale::rescale_image(task)?;
    }

    sample::sample_grid(task)?;
    task.checkpoint()?;

    march::march_squares(task)?;
    task.checkpoint()?;

    Ok(())
}

/// The error that caused the run to fail.
///
/// Workers released by a poisoned barrier only report the symptom, so any
/// other error takes precedence.
fn first_error(results: Vec<Result<()>>) -> Option<PipelineError> {
    let mut poisoned = None;
    for result in results {
        match result {
            Ok(()) => {}
            Err(PipelineError::BarrierPoisoned) => poisoned = Some(PipelineError::BarrierPoisoned),
            Err(err) => return Some(err),
        }
    }
    poisoned
}
