use crate::classifiers::Classifier;
use crate::core::instances::{Instance, InstanceRef};
use crate::evaluation::{Estimator, FadingFactorEstimator};

/// A model under pool management: the classifier itself plus the bookkeeping
/// used to score, retire and recall it.
///
/// A `ScoredModel` exclusively owns its classifier. It moves between the
/// candidate slot, the pools and the repository by ownership transfer;
/// independent copies exist only through an explicit
/// [`deep_clone`](ScoredModel::deep_clone).
pub struct ScoredModel {
    model: Box<dyn Classifier>,
    cluster_tag: i32,
    accuracy: FadingFactorEstimator,
}

impl ScoredModel {
    /// Tag of a model no clustering pass has labeled yet.
    pub const UNASSIGNED_CLUSTER: i32 = -1;

    pub fn new(model: Box<dyn Classifier>, fading_factor: f64) -> Self {
        Self {
            model,
            cluster_tag: Self::UNASSIGNED_CLUSTER,
            accuracy: FadingFactorEstimator::new(fading_factor),
        }
    }

    pub fn model(&self) -> &dyn Classifier {
        &*self.model
    }

    /// Independent copy: the classifier is cloned learned-state included,
    /// and the accuracy history and cluster tag travel with it.
    pub fn deep_clone(&self) -> ScoredModel {
        ScoredModel {
            model: self.model.clone_box(),
            cluster_tag: self.cluster_tag,
            accuracy: self.accuracy,
        }
    }

    pub fn get_votes_for_instance(&self, instance: &dyn Instance) -> Vec<f64> {
        self.model.get_votes_for_instance(instance)
    }

    pub fn train_on_instance(&mut self, instance: &dyn Instance) {
        self.model.train_on_instance(instance);
    }

    pub fn correctly_classifies(&self, instance: &dyn Instance) -> bool {
        self.model.correctly_classifies(instance)
    }

    pub fn training_weight_seen(&self) -> f64 {
        self.model.training_weight_seen()
    }

    pub fn update_accuracy(&mut self, instance: &dyn Instance) {
        let correct = self.model.correctly_classifies(instance);
        self.accuracy.add(if correct { 1.0 } else { 0.0 });
    }

    pub fn accuracy(&self) -> f64 {
        self.accuracy.estimation()
    }

    pub fn reset_accuracy(&mut self) {
        self.accuracy.reset();
    }

    pub fn cluster_tag(&self) -> i32 {
        self.cluster_tag
    }

    pub fn set_cluster_tag(&mut self, tag: i32) {
        self.cluster_tag = tag;
    }

    /// Returns the model to its untrained state. Learned parameters, the
    /// cluster tag and the accuracy history are all discarded; the underlying
    /// classifier object is kept.
    pub fn reset_learning(&mut self) {
        self.model.reset_learning();
        self.cluster_tag = Self::UNASSIGNED_CLUSTER;
        self.accuracy.reset();
    }

    /// 0/1 correctness of this model over the window, one entry per window
    /// position. Rows from several models stack into the feature matrix the
    /// clustering backend consumes.
    pub fn correctness_row(&self, window: &[InstanceRef]) -> Vec<f64> {
        window
            .iter()
            .map(|instance| {
                if self.model.correctly_classifies(&**instance) {
                    1.0
                } else {
                    0.0
                }
            })
            .collect()
    }
}
