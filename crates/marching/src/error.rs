//! Error types for the contour pipeline.

use raster::RasterError;
use thiserror::Error;

/// Invalid pipeline configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A field holds a value the pipeline cannot run with.
    #[error("invalid configuration: {0}")]
    Invalid(String),

    /// The configuration file could not be read.
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    /// The configuration file is not valid JSON for [`crate::ContourConfig`].
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

impl ConfigError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::Invalid(msg.into())
    }
}

/// Errors raised while loading the contour stencil set.
#[derive(Error, Debug)]
pub enum StencilError {
    /// A stencil file could not be read or decoded.
    #[error("failed to load stencil {index}: {source}")]
    Load {
        index: usize,
        #[source]
        source: RasterError,
    },

    /// Stencils must be square.
    #[error("stencil {index} is {width}x{height}, expected a square")]
    NotSquare {
        index: usize,
        width: usize,
        height: usize,
    },

    /// All stencils must share one size.
    #[error("stencil {index} is {size}px wide, expected {expected}px")]
    SizeMismatch {
        index: usize,
        size: usize,
        expected: usize,
    },

    /// Exactly one stencil per 4-bit configuration is required.
    #[error("expected {expected} stencils, got {actual}")]
    WrongCount { expected: usize, actual: usize },
}

/// Errors that end a pipeline run.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Configuration rejected before any work started.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Worker count must be at least one.
    #[error("worker count must be positive, got {0}")]
    InvalidWorkerCount(usize),

    /// The source image has no pixels.
    #[error("source image is empty ({width}x{height})")]
    EmptyImage { width: usize, height: usize },

    /// Stencil size and grid step disagree.
    #[error("stencils are {stencil}px but the grid step is {step}px")]
    StencilMismatch { stencil: usize, step: usize },

    /// A shared buffer could not be allocated.
    #[error("failed to allocate {what} ({bytes} bytes)")]
    Allocation { what: &'static str, bytes: usize },

    /// A worker thread could not be started.
    #[error("failed to spawn worker {worker}: {source}")]
    Spawn {
        worker: usize,
        #[source]
        source: std::io::Error,
    },

    /// A worker thread panicked.
    #[error("worker {worker} panicked")]
    WorkerPanicked { worker: usize },

    /// Another worker failed and released the barrier without completing the phase.
    #[error("phase barrier poisoned by a failed worker")]
    BarrierPoisoned,

    /// A shared buffer was read before the leader published it.
    #[error("{0} was not published before the checkpoint")]
    Unpublished(&'static str),
}

impl PipelineError {
    /// Create an Allocation error for `len` elements of `T`.
    pub fn allocation<T>(what: &'static str, len: usize) -> Self {
        Self::Allocation {
            what,
            bytes: len.saturating_mul(std::mem::size_of::<T>()),
        }
    }
}

/// Result type for pipeline operations.
pub type Result<T> = std::result::Result<T, PipelineError>;
