//! Point records shared by data points and centroids.

use serde::{Deserialize, Serialize};

/// A 2D point, either a data point or a centroid.
///
/// Centroids are ordinary points with `is_centroid = true`; their `cluster_id`
/// names the cluster they represent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Opaque identifier, unique within one engine.
    pub id: String,
    /// Horizontal coordinate.
    pub x: f32,
    /// Vertical coordinate.
    pub y: f32,
    /// Cluster this point belongs to (or represents, for centroids).
    pub cluster_id: usize,
    /// Whether this record is a centroid rather than a data point.
    pub is_centroid: bool,
    /// Source text for points created from categorical input.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_value: Option<String>,
    /// Encoded value of `original_value`. Display only; clustering ignores it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub numeric_value: Option<u64>,
}

impl Point {
    /// Create a data point in the given cluster.
    pub fn new(id: impl Into<String>, x: f32, y: f32, cluster_id: usize) -> Self {
        Self {
            id: id.into(),
            x,
            y,
            cluster_id,
            is_centroid: false,
            original_value: None,
            numeric_value: None,
        }
    }

    /// Create a centroid record for `cluster_id`.
    pub fn centroid(id: impl Into<String>, x: f32, y: f32, cluster_id: usize) -> Self {
        Self {
            is_centroid: true,
            ..Self::new(id, x, y, cluster_id)
        }
    }

    /// Anonymous point, handy for queries and tests.
    pub fn at(x: f32, y: f32) -> Self {
        Self::new(String::new(), x, y, 0)
    }

    /// Position as an `[x, y]` pair.
    #[inline]
    pub fn position(&self) -> [f32; 2] {
        [self.x, self.y]
    }

    /// Whether this point came from categorical input.
    pub fn is_categorical(&self) -> bool {
        self.original_value.is_some()
    }
}

/// Issues unique point and centroid ids.
///
/// The counter is never rewound, so ids stay unique across resets.
#[derive(Debug, Default, Clone)]
pub(crate) struct IdGen {
    next: u64,
}

impl IdGen {
    fn bump(&mut self) -> u64 {
        let n = self.next;
        self.next += 1;
        n
    }

    pub(crate) fn point(&mut self) -> String {
        format!("point-{}", self.bump())
    }

    pub(crate) fn centroid(&mut self) -> String {
        format!("centroid-{}", self.bump())
    }
}
