mod clusterers;
mod detectors;
mod learners;

pub use clusterers::FailingClusterer;
pub use clusterers::MeanSplitClusterer;
pub use clusterers::SingleClusterer;
pub use detectors::ScriptedDetector;
pub use learners::ConstantLearner;
pub use learners::TableLearner;
