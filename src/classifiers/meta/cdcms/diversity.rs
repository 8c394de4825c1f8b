use crate::classifiers::Classifier;
use crate::classifiers::meta::cdcms::ScoredModel;
use crate::core::instances::InstanceRef;

/// Yule's Q-statistic between two classifiers over a reference window.
///
/// Counts how often the two models are simultaneously right or wrong and
/// returns `(TT*FF - FT*TF) / (TT*FF + FT*TF)` in `[-1, 1]`. More negative
/// means more diverging predictions. Returns `None` when the denominator is
/// exactly zero — the pair produced no comparable signal and must not be
/// ranked against pairs that did.
pub fn q_statistic(
    window: &[InstanceRef],
    a: &dyn Classifier,
    b: &dyn Classifier,
) -> Option<f64> {
    let mut both_correct = 0.0;
    let mut only_a = 0.0;
    let mut only_b = 0.0;
    let mut both_wrong = 0.0;

    for instance in window {
        match (
            a.correctly_classifies(&**instance),
            b.correctly_classifies(&**instance),
        ) {
            (true, true) => both_correct += 1.0,
            (true, false) => only_a += 1.0,
            (false, true) => only_b += 1.0,
            (false, false) => both_wrong += 1.0,
        }
    }

    let agreement = both_correct * both_wrong;
    let disagreement = only_a * only_b;
    let denominator = agreement + disagreement;
    if denominator == 0.0 {
        None
    } else {
        Some((agreement - disagreement) / denominator)
    }
}

/// Mean pairwise Q-statistic of a pool, skipping pairs with no defined
/// score. `None` for pools with fewer than two members or when every pair is
/// undefined. Diagnostic only; admission decisions use [`q_statistic`]
/// directly.
pub fn mean_pairwise_q(window: &[InstanceRef], members: &[ScoredModel]) -> Option<f64> {
    let mut total = 0.0;
    let mut pairs = 0usize;
    for i in 0..members.len() {
        for j in (i + 1)..members.len() {
            if let Some(q) = q_statistic(window, members[i].model(), members[j].model()) {
                total += q;
                pairs += 1;
            }
        }
    }
    if pairs > 0 { Some(total / pairs as f64) } else { None }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::dummies::labeled;
    use crate::testing::stubs::ConstantLearner;

    fn window_with_labels(labels: &[f64]) -> Vec<InstanceRef> {
        labels.iter().map(|&y| labeled(0.0, y)).collect()
    }

    #[test]
    fn identical_models_score_one_when_defined() {
        // One shared miss keeps the denominator away from zero.
        let window = window_with_labels(&[0.0, 0.0, 1.0]);
        let model = ConstantLearner::new(0, 2);
        let q = q_statistic(&window, &model, &model).unwrap();
        assert_eq!(q, 1.0);
    }

    #[test]
    fn opposed_models_score_minus_one() {
        let window = window_with_labels(&[0.0, 1.0, 0.0, 1.0]);
        let a = ConstantLearner::new(0, 2);
        let b = ConstantLearner::new(1, 2);
        assert_eq!(q_statistic(&window, &a, &b), Some(-1.0));
    }

    #[test]
    fn score_is_symmetric() {
        let window = window_with_labels(&[0.0, 1.0, 1.0, 0.0, 1.0]);
        let a = ConstantLearner::new(0, 2);
        let b = ConstantLearner::new(1, 2);
        assert_eq!(
            q_statistic(&window, &a, &b),
            q_statistic(&window, &b, &a)
        );
    }

    #[test]
    fn undefined_when_models_never_disagree_or_share_a_miss() {
        // Both models always correct: TT = n, everything else 0.
        let window = window_with_labels(&[0.0, 0.0, 0.0]);
        let model = ConstantLearner::new(0, 2);
        assert_eq!(q_statistic(&window, &model, &model), None);

        // Empty window has no signal either.
        let empty: Vec<InstanceRef> = Vec::new();
        assert_eq!(q_statistic(&empty, &model, &model), None);
    }

    #[test]
    fn mean_pairwise_averages_defined_pairs_only() {
        let window = window_with_labels(&[0.0, 1.0, 0.0, 1.0]);
        let members = vec![
            ScoredModel::new(Box::new(ConstantLearner::new(0, 2)), 0.9),
            ScoredModel::new(Box::new(ConstantLearner::new(0, 2)), 0.9),
            ScoredModel::new(Box::new(ConstantLearner::new(1, 2)), 0.9),
        ];
        // Identical pair: right on the 0-labels, wrong on the 1-labels,
        // so TT=2, FF=2 and q=1. Each opposed pair scores -1.
        let mean = mean_pairwise_q(&window, &members).unwrap();
        assert!((mean - (1.0 - 1.0 - 1.0) / 3.0).abs() < 1e-12);

        assert_eq!(mean_pairwise_q(&window, &members[..1]), None);

        // Single-label window: every pair's denominator degenerates, and
        // degenerate pairs are skipped rather than counted as zero.
        let flat = window_with_labels(&[0.0, 0.0, 0.0]);
        assert_eq!(mean_pairwise_q(&flat, &members), None);
    }
}
