pub mod classifier;
pub mod drift_detection;
pub mod meta;

pub use classifier::Classifier;
