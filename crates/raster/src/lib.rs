//! RGB raster support for the contour tracer.
//!
//! Provides:
//! - [`Image`] / [`Rgb`]: row-major 8-bit RGB buffers
//! - [`ppm`]: portable pixel-map codec (ASCII `P3` and binary `P6`)
//! - [`interpolation`]: Catmull-Rom bicubic sampling with normalized coordinates

pub mod error;
pub mod image;
pub mod interpolation;
pub mod ppm;

pub use error::{RasterError, Result};
pub use image::{Image, Rgb};
pub use interpolation::sample_bicubic;
pub use ppm::PpmFormat;
