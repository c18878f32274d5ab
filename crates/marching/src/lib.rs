//! Marching-squares contour tracing on a fixed pool of worker threads.
//!
//! The pipeline runs three phases on every worker, separated by barrier
//! checkpoints:
//! 1. Rescale: bicubic resample to the working resolution (only when the
//!    source is larger than the target)
//! 2. Sample: threshold the working image into a binary grid
//! 3. March: classify each grid cell and stamp the matching contour stencil
//!
//! The entry point is [`pipeline::run`].

pub mod barrier;
pub mod config;
pub mod error;
pub mod grid;
pub mod march;
pub mod partition;
pub mod pipeline;
pub mod stencil;

mod rescale;
mod sample;
mod shared;

pub use barrier::PhaseBarrier;
pub use config::ContourConfig;
pub use error::{ConfigError, PipelineError, Result, StencilError};
pub use grid::Grid;
pub use march::configuration_index;
pub use partition::partition;
pub use pipeline::{run, PipelineOutput};
pub use stencil::{ContourMap, CONFIGURATION_COUNT};
