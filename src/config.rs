//! Engine configuration.
//!
//! Every field has a default, so a config can be deserialized from a partial
//! document (e.g. `{"num_clusters": 4}`).

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Rounds per run: one per 500 ms animation frame over a 3 s run.
pub const DEFAULT_ROUNDS: usize = 6;

/// Default dispersion threshold, in canvas units.
pub const DEFAULT_DISPERSION_THRESHOLD: f32 = 150.0;

/// Smallest cluster count a UI selector should offer. The engine itself accepts 1.
pub const MIN_UI_CLUSTERS: usize = 2;

/// Largest cluster count a UI selector should offer.
pub const MAX_UI_CLUSTERS: usize = 8;

/// Drawing area used to place categorical points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Canvas {
    /// Width in canvas units.
    pub width: f32,
    /// Height in canvas units.
    pub height: f32,
}

impl Default for Canvas {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 500.0,
        }
    }
}

/// Configuration for [`crate::Engine`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Cluster count used when `run` has to seed an empty engine.
    pub num_clusters: usize,

    /// Lloyd rounds per run.
    pub rounds: usize,

    /// Members farther than this from their centroid are split off after a run.
    pub dispersion_threshold: f32,

    /// Area in which categorical points are placed.
    pub canvas: Canvas,

    /// Optional RNG seed for reproducible seeding and placement.
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            num_clusters: MIN_UI_CLUSTERS,
            rounds: DEFAULT_ROUNDS,
            dispersion_threshold: DEFAULT_DISPERSION_THRESHOLD,
            canvas: Canvas::default(),
            seed: None,
        }
    }
}

impl EngineConfig {
    /// Default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the cluster count used for implicit seeding.
    pub fn with_num_clusters(mut self, num_clusters: usize) -> Self {
        self.num_clusters = num_clusters;
        self
    }

    /// Set the number of rounds per run.
    pub fn with_rounds(mut self, rounds: usize) -> Self {
        self.rounds = rounds;
        self
    }

    /// Set the dispersion threshold.
    pub fn with_dispersion_threshold(mut self, threshold: f32) -> Self {
        self.dispersion_threshold = threshold;
        self
    }

    /// Set the canvas size.
    pub fn with_canvas(mut self, width: f32, height: f32) -> Self {
        self.canvas = Canvas { width, height };
        self
    }

    /// Fix the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check every field.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        validate_num_clusters(self.num_clusters)?;
        if self.rounds == 0 {
            return Err(Error::InvalidConfig {
                name: "rounds",
                message: "must be at least 1",
            });
        }
        validate_dispersion_threshold(self.dispersion_threshold)?;
        if !(self.canvas.width.is_finite() && self.canvas.width > 0.0) {
            return Err(Error::InvalidConfig {
                name: "canvas.width",
                message: "must be positive and finite",
            });
        }
        if !(self.canvas.height.is_finite() && self.canvas.height > 0.0) {
            return Err(Error::InvalidConfig {
                name: "canvas.height",
                message: "must be positive and finite",
            });
        }
        Ok(())
    }
}

pub(crate) fn validate_num_clusters(k: usize) -> Result<()> {
    if k == 0 {
        return Err(Error::InvalidConfig {
            name: "num_clusters",
            message: "must be at least 1",
        });
    }
    Ok(())
}

pub(crate) fn validate_dispersion_threshold(threshold: f32) -> Result<()> {
    // Also rejects NaN.
    if !(threshold.is_finite() && threshold > 0.0) {
        return Err(Error::InvalidConfig {
            name: "dispersion_threshold",
            message: "must be positive and finite",
        });
    }
    Ok(())
}
