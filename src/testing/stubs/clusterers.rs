use crate::clusterers::{Clusterer, ClusteringError};

/// Splits rows into at most two clusters by their mean value: rows that are
/// mostly 1s (mean >= 0.5) land in cluster 1, the rest in cluster 0. The
/// fit reports how many of the two sides are actually populated.
pub struct MeanSplitClusterer {
    fitted: bool,
}

impl MeanSplitClusterer {
    pub fn new() -> Self {
        Self { fitted: false }
    }

    fn label(row: &[f64]) -> usize {
        if row.is_empty() {
            return 0;
        }
        let mean: f64 = row.iter().sum::<f64>() / row.len() as f64;
        usize::from(mean >= 0.5)
    }
}

impl Default for MeanSplitClusterer {
    fn default() -> Self {
        Self::new()
    }
}

impl Clusterer for MeanSplitClusterer {
    fn fit(&mut self, data: &[Vec<f64>]) -> Result<usize, ClusteringError> {
        if data.is_empty() {
            return Err(ClusteringError("no rows to cluster".into()));
        }
        self.fitted = true;
        let has_low = data.iter().any(|row| Self::label(row) == 0);
        let has_high = data.iter().any(|row| Self::label(row) == 1);
        Ok(usize::from(has_low) + usize::from(has_high))
    }

    fn assign(&self, row: &[f64]) -> Result<usize, ClusteringError> {
        if !self.fitted {
            return Err(ClusteringError("assign before fit".into()));
        }
        Ok(Self::label(row))
    }

    fn reset(&mut self) {
        self.fitted = false;
    }
}

/// Puts every row into cluster 0. Exercises the no-structure fallback.
pub struct SingleClusterer;

impl Clusterer for SingleClusterer {
    fn fit(&mut self, _data: &[Vec<f64>]) -> Result<usize, ClusteringError> {
        Ok(1)
    }

    fn assign(&self, _row: &[f64]) -> Result<usize, ClusteringError> {
        Ok(0)
    }

    fn reset(&mut self) {}
}

/// Always errors. Exercises the clustering-failure fallback paths.
pub struct FailingClusterer;

impl Clusterer for FailingClusterer {
    fn fit(&mut self, _data: &[Vec<f64>]) -> Result<usize, ClusteringError> {
        Err(ClusteringError("backend unavailable".into()))
    }

    fn assign(&self, _row: &[f64]) -> Result<usize, ClusteringError> {
        Err(ClusteringError("backend unavailable".into()))
    }

    fn reset(&mut self) {}
}
