pub mod classifiers;
pub mod clusterers;
pub mod core;
pub mod evaluation;
pub mod utils;

#[cfg(any(test, feature = "test-support"))]
pub mod testing;
