//! Helpers shared by the tests and benches of the contour tracer.
//!
//! - [`generators`]: synthetic images whose sampling grids can be worked out
//!   by hand (`DARK` samples inside, `LIGHT` outside at the default threshold)
//! - [`fixtures`]: write images and stencil sets into temporary directories
//! - [`paths`]: locate the repository's `contours/` asset set
//!
//! ```ignore
//! use test_utils::{checkerboard, contours_dir};
//!
//! let map = ContourMap::load(contours_dir())?;
//! let out = marching::run(checkerboard(16, 16, 8), 2, &map, &ContourConfig::default())?;
//! ```

pub mod fixtures;
pub mod generators;
pub mod paths;

pub use fixtures::*;
pub use generators::*;
pub use paths::*;
