//! Distance and mean over 2D points.

use crate::error::{Error, Result};
use crate::point::Point;

/// Squared Euclidean distance. Cheaper than [`distance`] when only ordering matters.
#[inline]
pub fn squared_distance(a: &Point, b: &Point) -> f32 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    dx * dx + dy * dy
}

/// Euclidean distance between two points.
#[inline]
pub fn distance(a: &Point, b: &Point) -> f32 {
    squared_distance(a, b).sqrt()
}

/// Arithmetic mean of a non-empty set of points.
///
/// The result is marked as a centroid and carries the first member's `cluster_id`;
/// callers are expected to overwrite both `cluster_id` and `id`.
///
/// # Errors
///
/// Returns [`Error::EmptyInput`] if `points` is empty.
pub fn centroid<'a, I>(points: I) -> Result<Point>
where
    I: IntoIterator<Item = &'a Point>,
{
    let mut iter = points.into_iter();
    let first = iter.next().ok_or(Error::EmptyInput)?;

    // Accumulate in f64 so large clusters of screen coordinates keep their precision.
    let mut sum_x = f64::from(first.x);
    let mut sum_y = f64::from(first.y);
    let mut n = 1usize;
    for p in iter {
        sum_x += f64::from(p.x);
        sum_y += f64::from(p.y);
        n += 1;
    }

    Ok(Point::centroid(
        String::new(),
        (sum_x / n as f64) as f32,
        (sum_y / n as f64) as f32,
        first.cluster_id,
    ))
}
