//! Dispersion-triggered cluster splitting.
//!
//! After a run, any member lying farther than `threshold` from its centroid is
//! considered an outlier of that cluster. All outliers of one cluster are moved
//! together into a new cluster centred on their mean.
//!
//! The pass is single-level: clusters created during a pass are not examined
//! again until the next pass. New ids come from one counter that starts at the
//! centroid count when the pass begins, so two splits in the same pass never
//! share an id.

use tracing::info;

use super::geometry::{centroid, distance};
use crate::point::Point;

/// Clusters created by one split pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SplitReport {
    /// `(parent_cluster_id, new_cluster_id)` for every split, in pass order.
    pub splits: Vec<(usize, usize)>,
}

impl SplitReport {
    /// Ids of the newly created clusters.
    pub fn new_clusters(&self) -> impl Iterator<Item = usize> + '_ {
        self.splits.iter().map(|&(_, new_id)| new_id)
    }

    /// Whether the pass created no clusters.
    pub fn is_empty(&self) -> bool {
        self.splits.is_empty()
    }
}

/// Split dispersed clusters in place.
///
/// `new_centroid_id` produces the `id` string of each appended centroid.
/// Points are only relabelled, never removed.
pub fn split_dispersed(
    points: &mut [Point],
    centroids: &mut Vec<Point>,
    threshold: f32,
    mut new_centroid_id: impl FnMut() -> String,
) -> SplitReport {
    let candidates = centroids.len();
    let mut next_id = candidates;
    let mut report = SplitReport::default();

    for i in 0..candidates {
        let parent = centroids[i].clone();

        let far: Vec<usize> = points
            .iter()
            .enumerate()
            .filter(|(_, p)| {
                p.cluster_id == parent.cluster_id && distance(p, &parent) > threshold
            })
            .map(|(idx, _)| idx)
            .collect();

        let view: &[Point] = points;
        let Ok(mean) = centroid(far.iter().map(|&idx| &view[idx])) else {
            continue;
        };

        let new_id = next_id;
        next_id += 1;

        centroids.push(Point {
            id: new_centroid_id(),
            cluster_id: new_id,
            ..mean
        });
        for idx in &far {
            points[*idx].cluster_id = new_id;
        }

        info!(
            parent = parent.cluster_id,
            cluster_id = new_id,
            moved = far.len(),
            threshold,
            "split dispersed cluster"
        );
        report.splits.push((parent.cluster_id, new_id));
    }

    report
}
