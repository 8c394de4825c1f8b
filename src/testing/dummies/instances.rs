use crate::core::instances::{DenseInstance, InstanceRef};
use crate::testing::dummies::header_numeric_binary;
use std::sync::Arc;

/// Binary-class instance with feature `x` and label `y` (0.0 or 1.0).
pub fn labeled(x: f64, y: f64) -> InstanceRef {
    Arc::new(DenseInstance::new(header_numeric_binary(), vec![x, y], 1.0))
}
