//! Configuration for the contour pipeline.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Geometry and threshold used by every phase of the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContourConfig {
    /// Working width; larger sources are resampled to exactly this.
    pub target_width: usize,

    /// Working height; larger sources are resampled to exactly this.
    pub target_height: usize,

    /// Grid sampling step in pixels, in both axes. Stencils are `step x step`.
    pub step: usize,

    /// A pixel whose channel mean is at or below this is inside the contour.
    pub threshold: u8,
}

impl Default for ContourConfig {
    fn default() -> Self {
        Self {
            target_width: 2048,
            target_height: 2048,
            step: 8,
            threshold: 200,
        }
    }
}

impl ContourConfig {
    /// Load configuration from environment variables over the defaults.
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// Load a JSON configuration file. Missing fields keep their defaults.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Apply `CONTOUR_*` environment variables on top of `self`.
    ///
    /// Unparseable values are ignored.
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(val) = std::env::var("CONTOUR_TARGET_WIDTH") {
            if let Ok(width) = val.parse() {
                self.target_width = width;
            }
        }

        if let Ok(val) = std::env::var("CONTOUR_TARGET_HEIGHT") {
            if let Ok(height) = val.parse() {
                self.target_height = height;
            }
        }

        if let Ok(val) = std::env::var("CONTOUR_STEP") {
            if let Ok(step) = val.parse() {
                self.step = step;
            }
        }

        if let Ok(val) = std::env::var("CONTOUR_THRESHOLD") {
            if let Ok(threshold) = val.parse() {
                self.threshold = threshold;
            }
        }

        self
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.step == 0 {
            return Err(ConfigError::invalid("step must be > 0"));
        }

        // Normalized coordinates divide by (target - 1)
        if self.target_width < 2 || self.target_height < 2 {
            return Err(ConfigError::invalid(format!(
                "target resolution must be at least 2x2, got {}x{}",
                self.target_width, self.target_height
            )));
        }

        Ok(())
    }

    /// Whether an image of this size has to be resampled first.
    pub fn needs_rescale(&self, width: usize, height: usize) -> bool {
        width > self.target_width || height > self.target_height
    }
}
