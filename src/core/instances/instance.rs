use crate::core::instance_header::InstanceHeader;
use std::sync::Arc;

/// Shared handle to an immutable instance.
///
/// The ensemble keeps a sliding window of recent instances while the host
/// may hold its own reference; `Arc` lets both sides share one allocation.
pub type InstanceRef = Arc<dyn Instance>;

/// A single labeled example: a feature vector plus a class label.
///
/// Instances are read-only. Nothing downstream of the stream source ever
/// mutates one, which is what allows the same instance to be handed to many
/// models in parallel.
pub trait Instance: Send + Sync {
    fn weight(&self) -> f64;

    fn value_at_index(&self, index: usize) -> Option<f64>;

    fn class_index(&self) -> usize;

    /// Class label as a value of the class attribute, `None` when missing.
    fn class_value(&self) -> Option<f64>;

    fn number_of_classes(&self) -> usize;

    fn to_vec(&self) -> Vec<f64>;

    fn header(&self) -> &InstanceHeader;
}
