use crate::classifiers::meta::cdcms::CdcmsError;
use serde::{Deserialize, Serialize};

/// Tunables of the drift-adaptive ensemble.
///
/// Defaults match the values the algorithm was published with; hosts
/// typically deserialize this from their own option system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CdcmsConfig {
    /// Maximum number of models in the active (and recovered) pool, `K`.
    pub pool_size: usize,
    /// Repository capacity multiplier `n`; the repository holds up to `n * K`
    /// retired models. Doubles as the stride when sampling the repository
    /// without cluster information.
    pub repository_multiple: usize,
    /// Sliding-window length `W`, in instances. Drives the rotation and
    /// recovery schedule and bounds the clustering/diversity sample.
    pub window_size: usize,
    /// Fading factor of every prequential-accuracy estimator, in `(0, 1)`.
    pub fading_factor: f64,
    /// Diversity threshold `τ` in `[0, 1]` for repository admission. Compared
    /// against Q-statistics after negation, since more negative means more
    /// diverse.
    pub similarity_threshold: f64,
}

impl Default for CdcmsConfig {
    fn default() -> Self {
        Self {
            pool_size: 10,
            repository_multiple: 10,
            window_size: 500,
            fading_factor: 0.999,
            similarity_threshold: 0.8,
        }
    }
}

impl CdcmsConfig {
    /// Total capacity of the repository, `n * K`.
    pub fn repository_capacity(&self) -> usize {
        self.repository_multiple * self.pool_size
    }

    pub fn validate(&self) -> Result<(), CdcmsError> {
        if self.pool_size == 0 {
            return Err(CdcmsError::InvalidParameter(
                "pool_size must be at least 1".into(),
            ));
        }
        if self.repository_multiple == 0 {
            return Err(CdcmsError::InvalidParameter(
                "repository_multiple must be at least 1".into(),
            ));
        }
        if self.window_size == 0 {
            return Err(CdcmsError::InvalidParameter(
                "window_size must be at least 1".into(),
            ));
        }
        if !(self.fading_factor > 0.0 && self.fading_factor < 1.0) {
            return Err(CdcmsError::InvalidParameter(format!(
                "fading_factor must be in (0, 1), got {}",
                self.fading_factor
            )));
        }
        if !(0.0..=1.0).contains(&self.similarity_threshold) {
            return Err(CdcmsError::InvalidParameter(format!(
                "similarity_threshold must be in [0, 1], got {}",
                self.similarity_threshold
            )));
        }
        Ok(())
    }
}
