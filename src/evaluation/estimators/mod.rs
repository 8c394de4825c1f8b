mod estimator;
mod fading_factor_estimator;

pub use estimator::Estimator;
pub use fading_factor_estimator::FadingFactorEstimator;
