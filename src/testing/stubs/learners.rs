use crate::classifiers::Classifier;
use crate::core::instances::Instance;
use std::collections::HashMap;

/// Learner that always votes one class, regardless of training.
///
/// Training only accumulates weight. Handy for forcing exact correctness
/// patterns: the model is right precisely on instances carrying its class.
#[derive(Debug, Clone)]
pub struct ConstantLearner {
    class: usize,
    num_classes: usize,
    weight_seen: f64,
}

impl ConstantLearner {
    pub fn new(class: usize, num_classes: usize) -> Self {
        Self {
            class,
            num_classes,
            weight_seen: 0.0,
        }
    }
}

impl Classifier for ConstantLearner {
    fn get_votes_for_instance(&self, _instance: &dyn Instance) -> Vec<f64> {
        let mut vote = vec![0.0; self.num_classes];
        if self.class < self.num_classes {
            vote[self.class] = 1.0;
        }
        vote
    }

    fn train_on_instance(&mut self, instance: &dyn Instance) {
        self.weight_seen += instance.weight();
    }

    fn reset_learning(&mut self) {
        self.weight_seen = 0.0;
    }

    fn training_weight_seen(&self) -> f64 {
        self.weight_seen
    }

    fn clone_box(&self) -> Box<dyn Classifier> {
        Box::new(self.clone())
    }
}

/// Lookup-table learner keyed on the rounded first feature.
///
/// Memorizes per-key class counts, so it tracks whatever feature-to-label
/// mapping it is shown and goes stale the moment the mapping flips — a
/// deterministic stand-in for a real incremental learner in drift tests.
#[derive(Debug, Clone)]
pub struct TableLearner {
    counts: HashMap<i64, Vec<f64>>,
    num_classes: usize,
    weight_seen: f64,
}

impl TableLearner {
    pub fn new(num_classes: usize) -> Self {
        Self {
            counts: HashMap::new(),
            num_classes,
            weight_seen: 0.0,
        }
    }

    fn key(instance: &dyn Instance) -> Option<i64> {
        instance.value_at_index(0).map(|x| x.round() as i64)
    }
}

impl Classifier for TableLearner {
    fn get_votes_for_instance(&self, instance: &dyn Instance) -> Vec<f64> {
        match Self::key(instance).and_then(|key| self.counts.get(&key)) {
            Some(counts) => counts.clone(),
            None => vec![0.0; self.num_classes],
        }
    }

    fn train_on_instance(&mut self, instance: &dyn Instance) {
        let (Some(key), Some(label)) = (Self::key(instance), instance.class_value()) else {
            return;
        };
        let label = label as usize;
        if label >= self.num_classes {
            return;
        }
        let counts = self
            .counts
            .entry(key)
            .or_insert_with(|| vec![0.0; self.num_classes]);
        counts[label] += instance.weight();
        self.weight_seen += instance.weight();
    }

    fn reset_learning(&mut self) {
        self.counts.clear();
        self.weight_seen = 0.0;
    }

    fn training_weight_seen(&self) -> f64 {
        self.weight_seen
    }

    fn clone_box(&self) -> Box<dyn Classifier> {
        Box::new(self.clone())
    }
}
