use crate::error::Result;

/// Common interface for hard clustering of 2D positions (one label per point).
pub trait Clustering {
    /// Fit the model and return one cluster label per input position.
    fn fit_predict(&self, data: &[[f32; 2]]) -> Result<Vec<usize>>;

    /// The configured number of clusters.
    fn n_clusters(&self) -> usize;
}
