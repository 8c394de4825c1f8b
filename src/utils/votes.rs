//! Helpers for class-score ("vote") vectors.
//!
//! A vote vector holds one non-negative score per class index. Vectors from
//! different models may disagree on length; combination extends the shorter
//! one with zeros.

/// Index of the largest finite score, `None` for an empty or all-NaN vector.
///
/// Earlier indexes win ties, so votes over `k` classes resolve
/// deterministically.
pub fn max_index(votes: &[f64]) -> Option<usize> {
    let mut best = None;
    let mut best_value = f64::NEG_INFINITY;
    for (i, &x) in votes.iter().enumerate() {
        if !x.is_finite() {
            continue;
        }
        if best.is_none() || x > best_value {
            best = Some(i);
            best_value = x;
        }
    }
    best
}

pub fn sum(votes: &[f64]) -> f64 {
    votes.iter().sum()
}

/// Scales the vector so its entries sum to 1. Leaves a zero-sum vector
/// untouched.
pub fn normalize(votes: &mut [f64]) {
    let total = sum(votes);
    if total > 0.0 {
        for v in votes.iter_mut() {
            *v /= total;
        }
    }
}

pub fn scale(votes: &mut [f64], factor: f64) {
    for v in votes.iter_mut() {
        *v *= factor;
    }
}

/// Accumulates `other` into `acc` index-wise, growing `acc` as needed.
pub fn add_assign(acc: &mut Vec<f64>, other: &[f64]) {
    if other.len() > acc.len() {
        acc.resize(other.len(), 0.0);
    }
    for (a, &b) in acc.iter_mut().zip(other.iter()) {
        *a += b;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn max_index_skips_non_finite_and_breaks_ties_low() {
        assert_eq!(max_index(&[]), None);
        assert_eq!(max_index(&[f64::NAN, f64::NAN]), None);
        assert_eq!(max_index(&[f64::NAN, 0.25, 0.75]), Some(2));
        assert_eq!(max_index(&[0.5, 0.5]), Some(0));
    }

    #[test]
    fn normalize_sums_to_one() {
        let mut v = vec![1.0, 3.0];
        normalize(&mut v);
        assert!((sum(&v) - 1.0).abs() < 1e-12);
        assert!((v[1] - 0.75).abs() < 1e-12);

        let mut zero = vec![0.0, 0.0];
        normalize(&mut zero);
        assert_eq!(zero, vec![0.0, 0.0]);
    }

    #[test]
    fn add_assign_extends_shorter_accumulator() {
        let mut acc = vec![0.2];
        add_assign(&mut acc, &[0.1, 0.7]);
        assert_eq!(acc.len(), 2);
        assert!((acc[0] - 0.3).abs() < 1e-12);
        assert!((acc[1] - 0.7).abs() < 1e-12);
    }
}
