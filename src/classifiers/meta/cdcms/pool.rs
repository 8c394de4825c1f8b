use crate::classifiers::meta::cdcms::ScoredModel;
use crate::classifiers::meta::cdcms::diversity;
use crate::core::instances::{Instance, InstanceRef};
use crate::evaluation::{Estimator, FadingFactorEstimator};
use crate::utils::votes;
use rayon::prelude::*;

/// Insertion-ordered ensemble of scored models with a pool-level accuracy
/// estimate and a vote-combination policy.
///
/// A weighted pool scales each member's normalized vote by the member's
/// share of the pool's total accuracy; an unweighted pool sums normalized
/// votes as they are. The pool-level estimator observes the correctness of
/// the *combined* vote, never an average of member correctness.
///
/// Per-member training and accuracy updates fan out across threads; members
/// own disjoint state, so the fan-out needs no coordination.
pub struct Pool {
    members: Vec<ScoredModel>,
    accuracy: FadingFactorEstimator,
    weighted: bool,
}

impl Pool {
    pub fn new(fading_factor: f64, weighted: bool) -> Self {
        Self {
            members: Vec::new(),
            accuracy: FadingFactorEstimator::new(fading_factor),
            weighted,
        }
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn weighted(&self) -> bool {
        self.weighted
    }

    pub fn members(&self) -> &[ScoredModel] {
        &self.members
    }

    /// Takes ownership of `member`. Callers enforce the pool-size bound.
    pub fn push(&mut self, member: ScoredModel) {
        self.members.push(member);
    }

    /// Removes and returns all members, dropping the accuracy history.
    pub fn drain(&mut self) -> Vec<ScoredModel> {
        self.accuracy.reset();
        std::mem::take(&mut self.members)
    }

    /// Removes the member with the lowest individual accuracy. The earliest
    /// inserted wins ties, so long-standing members are retired before
    /// newer ones that perform no better.
    pub fn remove_worst(&mut self) -> Option<ScoredModel> {
        if self.members.is_empty() {
            return None;
        }
        let mut worst = 0usize;
        for (i, member) in self.members.iter().enumerate().skip(1) {
            if member.accuracy() < self.members[worst].accuracy() {
                worst = i;
            }
        }
        Some(self.members.remove(worst))
    }

    /// Combined class-score vector of the pool. Members whose accuracy is
    /// zero, or whose raw vote carries no mass, contribute nothing; an empty
    /// pool yields an empty (all-zero) vote.
    pub fn get_votes_for_instance(&self, instance: &dyn Instance) -> Vec<f64> {
        let accuracy_sum: f64 = self.members.par_iter().map(ScoredModel::accuracy).sum();

        let mut combined = Vec::new();
        for member in &self.members {
            let member_accuracy = member.accuracy();
            if member_accuracy <= 0.0 {
                continue;
            }
            let mut vote = member.get_votes_for_instance(instance);
            if votes::sum(&vote) <= 0.0 {
                continue;
            }
            votes::normalize(&mut vote);
            if self.weighted && accuracy_sum > 0.0 {
                votes::scale(&mut vote, member_accuracy / accuracy_sum);
            }
            votes::add_assign(&mut combined, &vote);
        }
        combined
    }

    pub fn accuracy(&self) -> f64 {
        self.accuracy.estimation()
    }

    /// Observes one instance: the pool-level estimator sees the combined
    /// vote's correctness (computed before any member estimator moves), then
    /// every member estimator sees its own.
    pub fn update_accuracy(&mut self, instance: &dyn Instance) {
        let vote = self.get_votes_for_instance(instance);
        let correct = match (votes::max_index(&vote), instance.class_value()) {
            (Some(predicted), Some(label)) => predicted == label as usize,
            _ => false,
        };
        self.accuracy.add(if correct { 1.0 } else { 0.0 });

        self.members
            .par_iter_mut()
            .for_each(|member| member.update_accuracy(instance));
    }

    /// Zeroes the pool-level estimator and every member's estimator.
    pub fn reset_accuracy(&mut self) {
        self.accuracy.reset();
        for member in &mut self.members {
            member.reset_accuracy();
        }
    }

    /// Trains every member on the instance. No subsampling: each member sees
    /// each instance exactly once.
    pub fn train_on_instance(&mut self, instance: &dyn Instance) {
        self.members
            .par_iter_mut()
            .for_each(|member| member.train_on_instance(instance));
    }

    /// Fully independent copy of the pool: every member's classifier is
    /// cloned, so mutating the copy can never touch the original.
    pub fn deep_clone(&self) -> Pool {
        Pool {
            members: self.members.iter().map(ScoredModel::deep_clone).collect(),
            accuracy: self.accuracy,
            weighted: self.weighted,
        }
    }

    /// Mean pairwise Q-statistic of the members over `window`, when defined.
    pub fn mean_diversity(&self, window: &[InstanceRef]) -> Option<f64> {
        diversity::mean_pairwise_q(window, &self.members)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::dummies::labeled;
    use crate::testing::stubs::{ConstantLearner, TableLearner};

    fn scored_constant(class: usize, fading: f64) -> ScoredModel {
        ScoredModel::new(Box::new(ConstantLearner::new(class, 2)), fading)
    }

    /// Member voting `class` whose estimator has seen `correct` of `total`.
    fn member_with_accuracy(class: usize, correct: u32, total: u32) -> ScoredModel {
        let mut member = scored_constant(class, 0.9);
        for i in 0..total {
            let label = if i < correct { class } else { 1 - class };
            member.update_accuracy(&*labeled(0.0, label as f64));
        }
        member
    }

    #[test]
    fn empty_pool_votes_zero_vector() {
        let pool = Pool::new(0.9, true);
        assert!(pool.get_votes_for_instance(&*labeled(0.0, 0.0)).is_empty());
    }

    #[test]
    fn members_without_accuracy_contribute_nothing() {
        let mut pool = Pool::new(0.9, true);
        pool.push(scored_constant(1, 0.9));
        // Never observed, accuracy 0.
        assert!(pool.get_votes_for_instance(&*labeled(0.0, 0.0)).is_empty());
    }

    #[test]
    fn weighted_pool_scales_by_accuracy_share() {
        let mut pool = Pool::new(0.9, true);
        pool.push(member_with_accuracy(0, 4, 4));
        pool.push(member_with_accuracy(1, 4, 4));

        let vote = pool.get_votes_for_instance(&*labeled(0.0, 0.0));
        assert_eq!(vote.len(), 2);
        // Equal accuracies: each class ends up with half the mass.
        assert!((vote[0] - 0.5).abs() < 1e-9);
        assert!((vote[1] - 0.5).abs() < 1e-9);
    }

    #[test]
    fn unweighted_pool_sums_normalized_votes() {
        let mut pool = Pool::new(0.9, false);
        pool.push(member_with_accuracy(0, 4, 4));
        pool.push(member_with_accuracy(0, 4, 4));
        pool.push(member_with_accuracy(1, 4, 4));

        let vote = pool.get_votes_for_instance(&*labeled(0.0, 0.0));
        assert!((vote[0] - 2.0).abs() < 1e-9);
        assert!((vote[1] - 1.0).abs() < 1e-9);
    }

    #[test]
    fn remove_worst_prefers_lowest_accuracy_then_earliest() {
        let mut pool = Pool::new(0.9, true);
        pool.push(member_with_accuracy(0, 4, 4));
        pool.push(member_with_accuracy(1, 1, 4));
        pool.push(member_with_accuracy(0, 2, 4));

        let worst = pool.remove_worst().unwrap();
        assert!(worst.accuracy() < 0.5);
        assert_eq!(pool.len(), 2);

        // Tie on accuracy: the earliest-inserted member goes first.
        let mut tied = Pool::new(0.9, true);
        let mut first = scored_constant(0, 0.9);
        first.update_accuracy(&*labeled(0.0, 0.0));
        let mut second = scored_constant(1, 0.9);
        second.update_accuracy(&*labeled(0.0, 1.0));
        tied.push(first);
        tied.push(second);
        let removed = tied.remove_worst().unwrap();
        assert_eq!(removed.model().get_votes_for_instance(&*labeled(0.0, 0.0))[0], 1.0);
    }

    #[test]
    fn pool_accuracy_uses_combined_vote() {
        let mut pool = Pool::new(0.9, true);
        pool.push(member_with_accuracy(0, 4, 4));
        pool.push(member_with_accuracy(1, 1, 4));

        // The accurate class-0 member dominates the weighted vote.
        pool.update_accuracy(&*labeled(0.0, 0.0));
        assert!(pool.accuracy() > 0.0);

        pool.reset_accuracy();
        assert_eq!(pool.accuracy(), 0.0);
        assert!(pool.members().iter().all(|m| m.accuracy() == 0.0));
    }

    #[test]
    fn deep_clone_does_not_alias_members() {
        let mut pool = Pool::new(0.9, true);
        pool.push(ScoredModel::new(Box::new(TableLearner::new(2)), 0.9));

        let mut copy = pool.deep_clone();
        copy.train_on_instance(&*labeled(0.0, 0.0));

        assert_eq!(pool.members()[0].training_weight_seen(), 0.0);
        assert_eq!(copy.members()[0].training_weight_seen(), 1.0);
    }
}
