//! Clustering primitives for 2D points.
//!
//! ## K-means (Lloyd's algorithm)
//!
//! Assign each point to the nearest centroid, then move each centroid to the mean
//! of its points. Repeat for a fixed number of rounds.
//!
//! **Objective**: minimize the within-cluster sum of squares:
//!
//! ```text
//! J = Σ_k Σ_{x ∈ C_k} ||x - μ_k||²
//! ```
//!
//! Both steps can only lower `J`, so a handful of rounds is usually enough for
//! points placed by hand. This crate does not test for convergence.
//!
//! ## Dispersion split
//!
//! k-means has no notion of an outlier; a lone far-away point simply drags its
//! centroid. After a run, [`split_dispersed`] pulls every member that sits beyond
//! a distance threshold out of its cluster and into a new one. The number of
//! clusters therefore grows over successive runs when the data is spread out.
//!
//! ## Usage
//!
//! ```rust
//! use lloyd::cluster::{Clustering, Kmeans};
//!
//! let data = vec![[0.0, 0.0], [0.1, 0.1], [10.0, 10.0], [10.1, 10.1]];
//!
//! let labels = Kmeans::new(2).with_seed(42).fit_predict(&data).unwrap();
//! assert_eq!(labels[0], labels[1]);
//! assert_ne!(labels[0], labels[2]);
//! ```

mod assign;
mod geometry;
pub(crate) mod lloyd;
mod split;
mod traits;

pub use assign::{assign_all, nearest_cluster};
pub use geometry::{centroid, distance, squared_distance};
pub use lloyd::{lloyd_round, recompute_centroid, seed_centroids, Kmeans, KmeansFit, Round};
pub use split::{split_dispersed, SplitReport};
pub use traits::Clustering;
