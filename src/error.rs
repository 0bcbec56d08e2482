use thiserror::Error;

/// Errors returned by the clustering engine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Input slice is empty.
    #[error("empty input")]
    EmptyInput,

    /// Fewer points exist than the requested number of clusters.
    #[error("insufficient data: requested {requested} clusters, but only {available} points exist")]
    InsufficientData {
        /// Requested number of clusters.
        requested: usize,
        /// Number of points available for seeding.
        available: usize,
    },

    /// A cluster had no members when its centroid was recomputed.
    ///
    /// The engine recovers from this by keeping the previous centroid position;
    /// it is never returned from the public `Engine` operations.
    #[error("cluster {cluster_id} has no members")]
    EmptyCluster {
        /// Id of the empty cluster.
        cluster_id: usize,
    },

    /// Invalid configuration value. The previous valid value is kept.
    #[error("invalid config {name}: {message}")]
    InvalidConfig {
        /// Parameter name.
        name: &'static str,
        /// Human-readable explanation.
        message: &'static str,
    },

    /// A point position is NaN or infinite.
    #[error("invalid point: ({x}, {y}) is not a finite position")]
    InvalidPoint {
        /// Rejected horizontal coordinate.
        x: f32,
        /// Rejected vertical coordinate.
        y: f32,
    },

    /// A run is in progress; the engine rejects mutations until it finishes or is stopped.
    #[error("a run is in progress")]
    RunInProgress,

    /// The operation needs centroids, but none have been seeded yet.
    #[error("clusters have not been initialized")]
    NotInitialized,

    /// A run step was requested while no run is active.
    #[error("no run is in progress")]
    NotRunning,
}

/// Result type used by this crate.
pub type Result<T> = std::result::Result<T, Error>;
