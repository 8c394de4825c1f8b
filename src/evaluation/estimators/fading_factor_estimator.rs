use crate::evaluation::estimators::Estimator;

/// Prequential accuracy estimator with exponential fading.
///
/// Both the numerator and the denominator decay by a fixed factor
/// `fading_factor` in `(0, 1)` before each observation, so recent outcomes
/// dominate the estimate:
///
/// `numerator = fade * numerator + v`, `denominator = fade * denominator + 1`.
///
/// Inputs are 0/1 correctness indicators. An estimator with no observations
/// reports `0.0`, which downstream voting treats as "no usable signal".
#[derive(Debug, Clone, Copy)]
pub struct FadingFactorEstimator {
    fading_factor: f64,
    numerator: f64,
    denominator: f64,
}

impl FadingFactorEstimator {
    pub fn new(fading_factor: f64) -> Self {
        Self {
            fading_factor,
            numerator: 0.0,
            denominator: 0.0,
        }
    }

    /// Discards all observations, keeping the fading factor.
    pub fn reset(&mut self) {
        self.numerator = 0.0;
        self.denominator = 0.0;
    }
}

impl Estimator for FadingFactorEstimator {
    #[inline]
    fn add(&mut self, v: f64) {
        if v.is_nan() {
            return;
        }
        self.numerator = self.fading_factor * self.numerator + v;
        self.denominator = self.fading_factor * self.denominator + 1.0;
    }

    #[inline]
    fn estimation(&self) -> f64 {
        if self.denominator > 0.0 {
            self.numerator / self.denominator
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_estimator_reports_zero() {
        let est = FadingFactorEstimator::new(0.9);
        assert_eq!(est.estimation(), 0.0);
    }

    #[test]
    fn constant_sequences_converge_to_their_value() {
        for fade in [0.5, 0.9, 0.999] {
            let mut ones = FadingFactorEstimator::new(fade);
            let mut zeros = FadingFactorEstimator::new(fade);
            for _ in 0..500 {
                ones.add(1.0);
                zeros.add(0.0);
            }
            assert!((ones.estimation() - 1.0).abs() < 1e-9, "fade {fade}");
            assert!(zeros.estimation().abs() < 1e-9, "fade {fade}");
        }
    }

    #[test]
    fn reset_then_single_observation_reports_it_exactly() {
        let mut est = FadingFactorEstimator::new(0.9);
        for _ in 0..10 {
            est.add(0.0);
        }
        est.reset();
        est.add(1.0);
        assert_eq!(est.estimation(), 1.0);

        est.reset();
        est.add(0.0);
        assert_eq!(est.estimation(), 0.0);
    }

    #[test]
    fn recent_outcomes_outweigh_old_ones() {
        let mut est = FadingFactorEstimator::new(0.9);
        for _ in 0..100 {
            est.add(0.0);
        }
        for _ in 0..10 {
            est.add(1.0);
        }
        // Plain mean would be 10/110; the fading estimator sits far above it.
        assert!(est.estimation() > 0.5);
    }

    #[test]
    fn nan_observations_are_ignored() {
        let mut est = FadingFactorEstimator::new(0.9);
        est.add(1.0);
        est.add(f64::NAN);
        assert_eq!(est.estimation(), 1.0);
    }
}
