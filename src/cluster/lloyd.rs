//! Lloyd's algorithm with a fixed number of rounds.
//!
//! Each round has two phases:
//!
//! 1. **Recompute**: move every centroid to the mean of its current members.
//! 2. **Reassign**: give every point the id of its nearest recomputed centroid.
//!
//! There is no convergence check. The interactive engine runs a small fixed number
//! of rounds and lets the viewer watch the centroids settle.
//!
//! ## Empty clusters
//!
//! A centroid can lose all of its members during reassignment. Its mean is then
//! undefined; we keep the centroid where it was. It may pick members back up in a
//! later round.
//!
//! ## Seeding
//!
//! Initial centroids are `k` distinct input points drawn with a Fisher–Yates
//! shuffle over point indices, so every `k`-subset is equally likely. The random
//! source is a parameter, which makes seeded runs reproducible.

use rand::prelude::*;
use tracing::debug;

use super::assign::{assign_all, nearest_cluster};
use super::geometry;
use super::traits::Clustering;
use crate::error::{Error, Result};
use crate::point::Point;

/// Pick `k` distinct points as initial centroids.
///
/// Centroid `i` gets `cluster_id = i` and keeps the id of the point it was drawn from;
/// callers that need fresh ids overwrite them.
///
/// # Errors
///
/// - [`Error::InvalidConfig`] if `k == 0`.
/// - [`Error::InsufficientData`] if fewer than `k` points exist.
pub fn seed_centroids<R: Rng + ?Sized>(
    points: &[Point],
    k: usize,
    rng: &mut R,
) -> Result<Vec<Point>> {
    crate::config::validate_num_clusters(k)?;
    if points.len() < k {
        return Err(Error::InsufficientData {
            requested: k,
            available: points.len(),
        });
    }

    let mut order: Vec<usize> = (0..points.len()).collect();
    order.shuffle(rng);

    Ok(order[..k]
        .iter()
        .enumerate()
        .map(|(cluster_id, &idx)| {
            let p = &points[idx];
            Point::centroid(p.id.clone(), p.x, p.y, cluster_id)
        })
        .collect())
}

/// Move `centroid` to the mean of the points labelled with its `cluster_id`.
///
/// The returned centroid keeps the input's `id` and `cluster_id`.
///
/// # Errors
///
/// Returns [`Error::EmptyCluster`] if no point carries the centroid's id.
pub fn recompute_centroid(centroid: &Point, points: &[Point]) -> Result<Point> {
    let members = points.iter().filter(|p| p.cluster_id == centroid.cluster_id);
    match geometry::centroid(members) {
        Ok(mean) => Ok(Point {
            id: centroid.id.clone(),
            cluster_id: centroid.cluster_id,
            ..mean
        }),
        Err(Error::EmptyInput) => Err(Error::EmptyCluster {
            cluster_id: centroid.cluster_id,
        }),
        Err(e) => Err(e),
    }
}

/// Result of one Lloyd round, computed without touching the inputs.
#[derive(Debug, Clone, PartialEq)]
pub struct Round {
    /// Recomputed centroids, in the same order as the input centroids.
    pub centroids: Vec<Point>,
    /// New label for each point, in input order.
    pub labels: Vec<usize>,
    /// Ids of clusters that had no members and kept their previous position.
    pub empty_clusters: Vec<usize>,
}

impl Round {
    /// Write this round into `points` and `centroids`.
    ///
    /// Both halves are applied together; a round is never half-committed.
    pub fn apply(self, points: &mut [Point], centroids: &mut Vec<Point>) {
        debug_assert_eq!(points.len(), self.labels.len());
        for (p, label) in points.iter_mut().zip(self.labels) {
            p.cluster_id = label;
        }
        *centroids = self.centroids;
    }
}

/// Compute one recompute-then-reassign round.
///
/// Empty clusters keep their previous centroid. With no centroids there is nothing
/// to refine, and every label stays as it is.
pub fn lloyd_round(points: &[Point], centroids: &[Point]) -> Round {
    let mut empty_clusters = Vec::new();
    let next: Vec<Point> = centroids
        .iter()
        .map(|c| match recompute_centroid(c, points) {
            Ok(moved) => moved,
            Err(_) => {
                debug!(cluster_id = c.cluster_id, "empty cluster; keeping previous centroid");
                empty_clusters.push(c.cluster_id);
                c.clone()
            }
        })
        .collect();

    let labels = assign_all(points, &next)
        .unwrap_or_else(|| points.iter().map(|p| p.cluster_id).collect());

    Round {
        centroids: next,
        labels,
        empty_clusters,
    }
}

/// Label every point with its nearest centroid in place.
///
/// Points keep their label when `centroids` is empty.
pub(crate) fn reassign(points: &mut [Point], centroids: &[Point]) {
    for p in points.iter_mut() {
        if let Some(id) = nearest_cluster(p, centroids) {
            p.cluster_id = id;
        }
    }
}

/// Batch k-means over plain positions: random seeding plus a fixed number of
/// Lloyd rounds.
///
/// This is the non-interactive form of [`crate::Engine`]; it does not run the
/// dispersion split, so labels are always in `0..k`.
#[derive(Debug, Clone)]
pub struct Kmeans {
    k: usize,
    rounds: usize,
    seed: Option<u64>,
}

impl Kmeans {
    /// Create a k-means clusterer with `k` clusters and the default 6 rounds.
    pub fn new(k: usize) -> Self {
        Self {
            k,
            rounds: crate::config::DEFAULT_ROUNDS,
            seed: None,
        }
    }

    /// Set the number of Lloyd rounds.
    pub fn with_rounds(mut self, rounds: usize) -> Self {
        self.rounds = rounds;
        self
    }

    /// Fix the random seed used for centroid seeding.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Fit and return both the labels and the final centroids.
    pub fn fit(&self, data: &[[f32; 2]]) -> Result<KmeansFit> {
        if data.is_empty() {
            return Err(Error::EmptyInput);
        }

        let mut points: Vec<Point> = data
            .iter()
            .enumerate()
            .map(|(i, &[x, y])| Point::new(format!("point-{i}"), x, y, 0))
            .collect();

        let mut rng = match self.seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_rng(&mut rand::rng()),
        };
        let mut centroids = seed_centroids(&points, self.k, &mut rng)?;
        reassign(&mut points, &centroids);

        for _ in 0..self.rounds {
            lloyd_round(&points, &centroids).apply(&mut points, &mut centroids);
        }

        Ok(KmeansFit {
            labels: points.iter().map(|p| p.cluster_id).collect(),
            centroids: centroids.iter().map(Point::position).collect(),
        })
    }
}

/// Output of [`Kmeans::fit`].
#[derive(Debug, Clone, PartialEq)]
pub struct KmeansFit {
    /// One label per input position.
    pub labels: Vec<usize>,
    /// Final centroid positions; index `i` is cluster `i`.
    pub centroids: Vec<[f32; 2]>,
}

impl Clustering for Kmeans {
    fn fit_predict(&self, data: &[[f32; 2]]) -> Result<Vec<usize>> {
        Ok(self.fit(data)?.labels)
    }

    fn n_clusters(&self) -> usize {
        self.k
    }
}
