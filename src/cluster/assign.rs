//! Nearest-centroid assignment.

use super::geometry::squared_distance;
use crate::point::Point;

/// Return the `cluster_id` of the centroid closest to `point`.
///
/// Ties resolve to the earliest centroid in `centroids`. Centroids at a NaN distance
/// are never chosen. Returns `None` when no centroid is comparable (including an
/// empty list); what an unassigned point should fall back to is up to the caller.
pub fn nearest_cluster(point: &Point, centroids: &[Point]) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for c in centroids {
        let d = squared_distance(point, c);
        if d.is_nan() {
            continue;
        }
        // Strict `<` keeps the first of equally distant centroids.
        if best.map_or(true, |(_, best_d)| d < best_d) {
            best = Some((c.cluster_id, d));
        }
    }
    best.map(|(id, _)| id)
}

/// Compute the nearest-centroid label for every point.
///
/// Returns `None` if some point has no comparable centroid, e.g. when `centroids`
/// is empty.
pub fn assign_all(points: &[Point], centroids: &[Point]) -> Option<Vec<usize>> {
    if centroids.is_empty() {
        return None;
    }
    points
        .iter()
        .map(|p| nearest_cluster(p, centroids))
        .collect()
}
