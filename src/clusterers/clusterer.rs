use thiserror::Error;

/// Failure raised by a clustering backend mid-fit or mid-assignment.
///
/// Callers treat this as "no clustering available this round" and fall back;
/// it must never take the stream down.
#[derive(Debug, Error)]
#[error("clustering failed: {0}")]
pub struct ClusteringError(pub String);

/// Batch clustering backend consumed by the ensemble.
///
/// The ensemble hands it a dense feature matrix (one row per model, one
/// column per window position) and reads back a cluster id per row. The
/// backend is order-agnostic internally; row-to-model correspondence is the
/// caller's responsibility.
pub trait Clusterer: Send {
    /// Fits the backend on `data`, returning the number of clusters found.
    fn fit(&mut self, data: &[Vec<f64>]) -> Result<usize, ClusteringError>;

    /// Cluster id for one row of the fitted matrix.
    fn assign(&self, row: &[f64]) -> Result<usize, ClusteringError>;

    /// Drops the fitted state so the backend can be reused for the next pass.
    fn reset(&mut self);
}
