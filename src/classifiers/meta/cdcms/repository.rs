use crate::classifiers::meta::cdcms::ScoredModel;
use crate::classifiers::meta::cdcms::diversity::q_statistic;
use crate::core::instances::InstanceRef;

/// Bounded reservoir of retired models kept for possible recall.
///
/// While there is headroom every retired model is admitted. At capacity a
/// newcomer can only enter by evicting the member it diverges from the most
/// (most negative Q-statistic over the reference window), and only when that
/// divergence clears the configured threshold and the newcomer has seen
/// strictly more training weight than the member it displaces. Admission
/// resets the newcomer's accuracy estimator; its next life starts unscored.
pub struct Repository {
    members: Vec<ScoredModel>,
    capacity: usize,
    /// Sign-adjusted admission threshold: the configured τ negated once at
    /// construction, because more negative Q means more diverse.
    similarity_threshold: f64,
}

impl Repository {
    pub fn new(capacity: usize, similarity_threshold: f64) -> Self {
        Self {
            members: Vec::new(),
            capacity,
            similarity_threshold: -similarity_threshold,
        }
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn members(&self) -> &[ScoredModel] {
        &self.members
    }

    pub(crate) fn members_mut(&mut self) -> &mut [ScoredModel] {
        &mut self.members
    }

    /// Unconditional admission against headroom the caller has already
    /// accounted for.
    pub fn admit(&mut self, mut member: ScoredModel) {
        debug_assert!(self.members.len() < self.capacity);
        member.reset_accuracy();
        self.members.push(member);
    }

    /// Admission under the eviction rule. Returns whether `member` entered
    /// the repository; a rejected member is dropped by the caller.
    pub fn offer(&mut self, mut member: ScoredModel, window: &[InstanceRef]) -> bool {
        if self.members.len() < self.capacity {
            member.reset_accuracy();
            self.members.push(member);
            return true;
        }

        match self.most_diverse_index(&member, window) {
            Some(evictee)
                if member.training_weight_seen()
                    > self.members[evictee].training_weight_seen() =>
            {
                self.members.remove(evictee);
                member.reset_accuracy();
                self.members.push(member);
                true
            }
            _ => false,
        }
    }

    /// Member diverging the most from `target`: lowest raw Q-statistic, ties
    /// going to the member with the lower training weight. Pairs without a
    /// defined score never become the extremum. `None` unless the extreme
    /// score clears the sign-adjusted threshold.
    fn most_diverse_index(&self, target: &ScoredModel, window: &[InstanceRef]) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for (i, member) in self.members.iter().enumerate() {
            let Some(q) = q_statistic(window, target.model(), member.model()) else {
                continue;
            };
            best = match best {
                None => Some((i, q)),
                Some((best_index, best_q)) => {
                    if q < best_q
                        || (q == best_q
                            && member.training_weight_seen()
                                < self.members[best_index].training_weight_seen())
                    {
                        Some((i, q))
                    } else {
                        Some((best_index, best_q))
                    }
                }
            };
        }
        best.filter(|&(_, q)| q <= self.similarity_threshold)
            .map(|(i, _)| i)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::dummies::labeled;
    use crate::testing::stubs::ConstantLearner;

    fn scored(class: usize, trained: u32) -> ScoredModel {
        let mut model = ScoredModel::new(Box::new(ConstantLearner::new(class, 2)), 0.9);
        for _ in 0..trained {
            // ConstantLearner only counts weight; the label is irrelevant.
            model.train_on_instance(&*labeled(0.0, 0.0));
        }
        model
    }

    fn window_with_labels(labels: &[f64]) -> Vec<InstanceRef> {
        labels.iter().map(|&y| labeled(0.0, y)).collect()
    }

    #[test]
    fn admits_freely_until_capacity() {
        let mut repo = Repository::new(2, 0.8);
        let window = window_with_labels(&[0.0, 1.0]);

        let mut member = scored(0, 3);
        member.update_accuracy(&*labeled(0.0, 0.0));
        assert!(repo.offer(member, &window));
        // Admission wipes the accuracy history.
        assert_eq!(repo.members()[0].accuracy(), 0.0);

        assert!(repo.offer(scored(1, 1), &window));
        assert_eq!(repo.len(), 2);
    }

    #[test]
    fn size_never_exceeds_capacity_under_random_churn() {
        use rand::{Rng, SeedableRng, rngs::StdRng};

        let mut rng = StdRng::seed_from_u64(42);
        let mut repo = Repository::new(3, 0.5);
        let window = window_with_labels(&[0.0, 1.0, 0.0, 1.0]);
        for _ in 0..200 {
            let class = rng.random_range(0..2);
            let trained = rng.random_range(0..10);
            repo.offer(scored(class, trained), &window);
            assert!(repo.len() <= repo.capacity());
        }
    }

    #[test]
    fn diverse_and_better_trained_newcomer_evicts() {
        let mut repo = Repository::new(1, 0.8);
        let window = window_with_labels(&[0.0, 1.0, 0.0, 1.0]);
        assert!(repo.offer(scored(0, 1), &window));

        // Opposite constant vote: q = -1 against the incumbent, and more
        // training weight than it.
        assert!(repo.offer(scored(1, 5), &window));
        assert_eq!(repo.len(), 1);
        let vote = repo.members()[0].get_votes_for_instance(&*labeled(0.0, 0.0));
        assert_eq!(vote[1], 1.0);
    }

    #[test]
    fn untrained_newcomer_never_evicts_trained_member() {
        let mut repo = Repository::new(1, 0.8);
        let window = window_with_labels(&[0.0, 1.0, 0.0, 1.0]);
        assert!(repo.offer(scored(0, 5), &window));

        // Maximally diverse but weight 0: rejected.
        assert!(!repo.offer(scored(1, 0), &window));
        let vote = repo.members()[0].get_votes_for_instance(&*labeled(0.0, 0.0));
        assert_eq!(vote[0], 1.0);
    }

    #[test]
    fn insufficient_divergence_is_rejected() {
        let mut repo = Repository::new(1, 0.8);
        let window = window_with_labels(&[0.0, 0.0, 1.0]);
        assert!(repo.offer(scored(0, 1), &window));

        // Identical correctness pattern scores q = 1, far above -0.8.
        assert!(!repo.offer(scored(0, 9), &window));
    }

    #[test]
    fn undefined_scores_cannot_be_the_extremum() {
        let mut repo = Repository::new(1, 0.8);
        // Single-label window: a same-class pair yields no defined score.
        let window = window_with_labels(&[0.0, 0.0]);
        assert!(repo.offer(scored(0, 1), &window));
        assert!(!repo.offer(scored(0, 9), &window));
        assert_eq!(repo.members()[0].training_weight_seen(), 1.0);
    }
}
