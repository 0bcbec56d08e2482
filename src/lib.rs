//! Interactive k-means over 2D points.
//!
//! `lloyd` is the clustering core of a point-and-click k-means demo. A host (a
//! canvas UI, a terminal app, a test) feeds it points and renders whatever state
//! it produces.
//!
//! - [`Engine`]: the stateful core: add points, seed clusters, run a fixed number
//!   of Lloyd rounds, split dispersed clusters. Runs can be stepped and stopped.
//! - [`cluster`]: the stateless pieces (distance, centroid, nearest-cluster
//!   assignment, the Lloyd round, the dispersion split) plus a batch [`Kmeans`].
//! - [`encode`]: the toy categorical encoder used for non-spatial demo points.
//!
//! ```rust
//! use lloyd::{Engine, EngineConfig, RunStatus};
//!
//! let mut engine = Engine::new(EngineConfig::new().with_seed(7)).unwrap();
//! for (x, y) in [(10.0, 10.0), (12.0, 11.0), (300.0, 200.0), (302.0, 198.0)] {
//!     engine.add_point(x, y).unwrap();
//! }
//! engine.initialize(2).unwrap();
//! let outcome = engine.run().unwrap();
//! assert_eq!(outcome.status, RunStatus::Completed);
//! assert_eq!(outcome.points.len(), 4);
//! ```

#![forbid(unsafe_code)]

pub mod cluster;
pub mod config;
pub mod encode;
pub mod engine;
pub mod error;
pub mod point;

pub use cluster::{Clustering, Kmeans, KmeansFit, SplitReport};
pub use config::{Canvas, EngineConfig};
pub use engine::{CancelToken, Engine, EngineState, RunOutcome, RunStatus, Step, DEFAULT_CLUSTER_ID};
pub use error::{Error, Result};
pub use point::Point;
