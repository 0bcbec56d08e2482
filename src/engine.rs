//! The interactive clustering engine.
//!
//! [`Engine`] owns the point set and the centroid list and moves between three
//! states:
//!
//! ```text
//! Empty ──initialize──▶ Initialized ──begin_run──▶ Running
//!   ▲                        ▲                        │
//!   └────────reset───────────┴───last step / stop─────┘
//! ```
//!
//! A run is a fixed number of Lloyd rounds followed by one dispersion-split pass.
//! Hosts that animate the run drive it with [`Engine::begin_run`] and
//! [`Engine::step`], redrawing between steps; everyone else calls [`Engine::run`].
//! While a run is active the point set is frozen: inserts, re-seeding, resets and
//! a second run are rejected with [`Error::RunInProgress`].

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use rand::prelude::*;
use tracing::{debug, info, warn};

use crate::cluster::lloyd::reassign;
use crate::cluster::{lloyd_round, nearest_cluster, seed_centroids, split_dispersed, SplitReport};
use crate::config::{self, EngineConfig};
use crate::encode::encode;
use crate::error::{Error, Result};
use crate::point::{IdGen, Point};

/// Cluster given to points added before any centroid exists.
///
/// This is a display choice (everything starts in the first colour), not a
/// nearest-centroid result.
pub const DEFAULT_CLUSTER_ID: usize = 0;

/// Lifecycle state of an [`Engine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    /// No centroids.
    Empty,
    /// Centroids seeded; idle.
    Initialized,
    /// A run is in progress.
    Running,
}

/// Shared flag a host can set to stop a run before its next round.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// A token that has not been cancelled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. Idempotent.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    /// Whether cancellation was requested.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Result of [`Engine::step`].
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// A round was applied and more remain.
    Round {
        /// Rounds applied so far in this run.
        completed: usize,
    },
    /// The last round was applied and the split pass ran; the engine is idle again.
    Finished {
        /// Rounds applied in this run.
        rounds: usize,
        /// Clusters created by the split pass.
        split: SplitReport,
    },
}

/// How a call to [`Engine::run`] ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    /// All rounds ran, followed by the split pass.
    Completed,
    /// Cancelled before finishing; the split pass did not run.
    Stopped,
    /// The engine had no centroids, so the call seeded them instead of iterating.
    Seeded,
}

/// Final state after a run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunOutcome {
    /// How the run ended.
    pub status: RunStatus,
    /// Rounds applied.
    pub rounds_completed: usize,
    /// Clusters created by the split pass (empty unless `Completed`).
    pub split: SplitReport,
    /// All points after the run.
    pub points: Vec<Point>,
    /// All centroids after the run.
    pub centroids: Vec<Point>,
}

/// In-memory k-means engine for interactive use.
#[derive(Debug)]
pub struct Engine<R = StdRng> {
    config: EngineConfig,
    points: Vec<Point>,
    centroids: Vec<Point>,
    state: EngineState,
    rounds_done: usize,
    rng: R,
    ids: IdGen,
}

impl Engine<StdRng> {
    /// Create an engine whose random source is seeded from `config.seed`, or from
    /// the thread RNG when no seed is set.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if `config` does not validate.
    pub fn new(config: EngineConfig) -> Result<Self> {
        let rng = match config.seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_rng(&mut rand::rng()),
        };
        Self::with_rng(config, rng)
    }
}

impl<R: Rng> Engine<R> {
    /// Create an engine with an explicit random source. `config.seed` is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if `config` does not validate.
    pub fn with_rng(config: EngineConfig, rng: R) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            points: Vec::new(),
            centroids: Vec::new(),
            state: EngineState::Empty,
            rounds_done: 0,
            rng,
            ids: IdGen::default(),
        })
    }

    /// Current configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Current state.
    pub fn state(&self) -> EngineState {
        self.state
    }

    /// All data points, in insertion order.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// All centroids. Index `i` has `cluster_id == i`.
    pub fn centroids(&self) -> &[Point] {
        &self.centroids
    }

    /// Points currently labelled `cluster_id`.
    pub fn members(&self, cluster_id: usize) -> impl Iterator<Item = &Point> + '_ {
        self.points.iter().filter(move |p| p.cluster_id == cluster_id)
    }

    fn ensure_idle(&self) -> Result<()> {
        if self.state == EngineState::Running {
            return Err(Error::RunInProgress);
        }
        Ok(())
    }

    fn cluster_for(&self, point: &Point) -> usize {
        nearest_cluster(point, &self.centroids).unwrap_or(DEFAULT_CLUSTER_ID)
    }

    fn insert(&mut self, mut point: Point) -> Point {
        point.cluster_id = self.cluster_for(&point);
        self.points.push(point.clone());
        point
    }

    /// Add a data point, labelled with its nearest centroid (or
    /// [`DEFAULT_CLUSTER_ID`] if there are none yet).
    ///
    /// # Errors
    ///
    /// - [`Error::RunInProgress`] while a run is active.
    /// - [`Error::InvalidPoint`] if `x` or `y` is NaN or infinite; nothing is added.
    pub fn add_point(&mut self, x: f32, y: f32) -> Result<Point> {
        self.ensure_idle()?;
        if !(x.is_finite() && y.is_finite()) {
            warn!(x, y, "rejected non-finite point");
            return Err(Error::InvalidPoint { x, y });
        }
        let point = Point::new(self.ids.point(), x, y, DEFAULT_CLUSTER_ID);
        Ok(self.insert(point))
    }

    /// Encode categorical text. See [`crate::encode::encode`].
    pub fn encode_categorical(&self, text: &str) -> u64 {
        encode(text)
    }

    /// Add a point for a categorical value at a random canvas position.
    ///
    /// The encoded value is stored on the point for display; the position is
    /// unrelated to it.
    ///
    /// # Errors
    ///
    /// [`Error::RunInProgress`] while a run is active.
    pub fn add_categorical_point(&mut self, text: &str) -> Result<Point> {
        self.ensure_idle()?;
        let x = self.rng.random_range(0.0..self.config.canvas.width);
        let y = self.rng.random_range(0.0..self.config.canvas.height);
        let point = Point {
            original_value: Some(text.to_owned()),
            numeric_value: Some(encode(text)),
            ..Point::new(self.ids.point(), x, y, DEFAULT_CLUSTER_ID)
        };
        Ok(self.insert(point))
    }

    /// Seed `k` centroids from distinct random points and assign every point once.
    ///
    /// Existing centroids are replaced.
    ///
    /// # Errors
    ///
    /// - [`Error::RunInProgress`] while a run is active.
    /// - [`Error::InvalidConfig`] if `k == 0`.
    /// - [`Error::InsufficientData`] if there are fewer than `k` points.
    pub fn initialize(&mut self, k: usize) -> Result<Vec<Point>> {
        self.ensure_idle()?;
        let mut centroids = seed_centroids(&self.points, k, &mut self.rng)?;
        for c in &mut centroids {
            c.id = self.ids.centroid();
        }
        reassign(&mut self.points, &centroids);
        self.centroids = centroids;
        self.state = EngineState::Initialized;

        info!(k, points = self.points.len(), "initialized clusters");
        Ok(self.centroids.clone())
    }

    /// Start a stepwise run.
    ///
    /// # Errors
    ///
    /// - [`Error::RunInProgress`] if a run is already active.
    /// - [`Error::NotInitialized`] if there are no centroids.
    pub fn begin_run(&mut self) -> Result<()> {
        match self.state {
            EngineState::Running => Err(Error::RunInProgress),
            EngineState::Empty => Err(Error::NotInitialized),
            EngineState::Initialized => {
                self.state = EngineState::Running;
                self.rounds_done = 0;
                debug!(rounds = self.config.rounds, "run started");
                Ok(())
            }
        }
    }

    /// Apply one round of the active run.
    ///
    /// After the final round the split pass runs and the engine returns to
    /// [`EngineState::Initialized`].
    ///
    /// # Errors
    ///
    /// [`Error::NotRunning`] if no run is active.
    pub fn step(&mut self) -> Result<Step> {
        if self.state != EngineState::Running {
            return Err(Error::NotRunning);
        }

        let round = lloyd_round(&self.points, &self.centroids);
        let empty = round.empty_clusters.len();
        round.apply(&mut self.points, &mut self.centroids);
        self.rounds_done += 1;
        debug!(round = self.rounds_done, empty_clusters = empty, "round applied");

        if self.rounds_done < self.config.rounds {
            return Ok(Step::Round {
                completed: self.rounds_done,
            });
        }

        self.state = EngineState::Initialized;
        let split = self.split();
        info!(
            rounds = self.rounds_done,
            clusters = self.centroids.len(),
            "run completed"
        );
        Ok(Step::Finished {
            rounds: self.rounds_done,
            split,
        })
    }

    fn split(&mut self) -> SplitReport {
        let ids = &mut self.ids;
        split_dispersed(
            &mut self.points,
            &mut self.centroids,
            self.config.dispersion_threshold,
            || ids.centroid(),
        )
    }

    /// Stop the active run before its next round.
    ///
    /// Rounds already applied stay applied; the split pass is skipped. Returns
    /// `false` if no run was active.
    pub fn stop(&mut self) -> bool {
        if self.state != EngineState::Running {
            return false;
        }
        self.state = EngineState::Initialized;
        info!(rounds = self.rounds_done, "run stopped");
        true
    }

    /// Run all rounds and the split pass.
    ///
    /// With no centroids yet, this seeds `config.num_clusters` clusters instead and
    /// reports [`RunStatus::Seeded`].
    ///
    /// # Errors
    ///
    /// - [`Error::RunInProgress`] if a stepwise run is active.
    /// - Any error from [`Engine::initialize`] when seeding.
    pub fn run(&mut self) -> Result<RunOutcome> {
        self.run_until(&CancelToken::new())
    }

    /// Like [`Engine::run`], checking `cancel` before every round.
    pub fn run_until(&mut self, cancel: &CancelToken) -> Result<RunOutcome> {
        self.run_with(cancel, |_, _| {})
    }

    /// Like [`Engine::run_until`], calling `on_round` with the rounds applied so far
    /// and the engine after every round except the last. Hosts redraw from it.
    pub fn run_with<F>(&mut self, cancel: &CancelToken, mut on_round: F) -> Result<RunOutcome>
    where
        F: FnMut(usize, &Self),
    {
        if self.state == EngineState::Empty {
            self.initialize(self.config.num_clusters)?;
            return Ok(self.outcome(RunStatus::Seeded, 0, SplitReport::default()));
        }

        self.begin_run()?;
        loop {
            if cancel.is_cancelled() {
                self.stop();
                let rounds = self.rounds_done;
                return Ok(self.outcome(RunStatus::Stopped, rounds, SplitReport::default()));
            }
            match self.step()? {
                Step::Round { completed } => on_round(completed, self),
                Step::Finished { rounds, split } => {
                    return Ok(self.outcome(RunStatus::Completed, rounds, split));
                }
            }
        }
    }

    fn outcome(
        &self,
        status: RunStatus,
        rounds_completed: usize,
        split: SplitReport,
    ) -> RunOutcome {
        RunOutcome {
            status,
            rounds_completed,
            split,
            points: self.points.clone(),
            centroids: self.centroids.clone(),
        }
    }

    /// Remove all points and centroids.
    ///
    /// # Errors
    ///
    /// [`Error::RunInProgress`] while a run is active; stop it first.
    pub fn reset(&mut self) -> Result<()> {
        self.ensure_idle()?;
        self.points.clear();
        self.centroids.clear();
        self.state = EngineState::Empty;
        info!("engine reset");
        Ok(())
    }

    /// Change the dispersion threshold used by the next split pass.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidConfig`] unless `threshold` is positive and finite; the
    /// previous value is kept.
    pub fn set_dispersion_threshold(&mut self, threshold: f32) -> Result<()> {
        if let Err(e) = config::validate_dispersion_threshold(threshold) {
            warn!(threshold, "rejected dispersion threshold");
            return Err(e);
        }
        self.config.dispersion_threshold = threshold;
        Ok(())
    }

    /// Change the cluster count used when [`Engine::run`] seeds an empty engine.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidConfig`] if `k == 0`; the previous value is kept.
    pub fn set_num_clusters(&mut self, k: usize) -> Result<()> {
        if let Err(e) = config::validate_num_clusters(k) {
            warn!(k, "rejected cluster count");
            return Err(e);
        }
        self.config.num_clusters = k;
        Ok(())
    }
}
