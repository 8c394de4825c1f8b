pub mod estimators;
pub mod measurement;

pub use estimators::Estimator;
pub use estimators::FadingFactorEstimator;
pub use measurement::Measurement;
