use crate::core::instances::Instance;
use crate::utils::votes;

/// Capability interface of a trainable online classifier.
///
/// This is the only contract the ensemble machinery depends on: any model
/// that can train on one instance at a time, vote a class-score vector and
/// report how much training weight it has seen can act as a base learner.
///
/// `Send + Sync` is required so pool members can be trained and queried in
/// parallel; each model owns disjoint internal state.
pub trait Classifier: Send + Sync {
    /// Class-score vector for `instance`. May be empty when the model has
    /// nothing to say yet (e.g., before any training).
    fn get_votes_for_instance(&self, instance: &dyn Instance) -> Vec<f64>;

    fn train_on_instance(&mut self, instance: &dyn Instance);

    /// Discards all learned state, returning the model to its untrained
    /// configuration.
    fn reset_learning(&mut self);

    /// Cumulative weight of all training instances seen. Monotonically
    /// non-decreasing between resets.
    fn training_weight_seen(&self) -> f64;

    /// Clones the model, learned state included, behind a fresh box.
    fn clone_box(&self) -> Box<dyn Classifier>;

    /// Whether the model's top-voted class matches the instance's label.
    ///
    /// Unlabeled instances and empty votes both count as misclassified.
    fn correctly_classifies(&self, instance: &dyn Instance) -> bool {
        let votes = self.get_votes_for_instance(instance);
        match (votes::max_index(&votes), instance.class_value()) {
            (Some(predicted), Some(label)) => predicted == label as usize,
            _ => false,
        }
    }
}
