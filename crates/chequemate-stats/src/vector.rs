//! Operations on fixed-length numeric vectors.
//!
//! All functions take slices and require equal lengths where two vectors are combined.
//! Mismatched lengths are a programming error and panic.

use std::iter;

/// Dot product of two equal-length vectors.
///
/// # Panics
///
/// Panics if `a.len() != b.len()`.
///
/// # Examples
///
/// ```
/// # use chequemate_stats::vector::dot;
/// assert_eq!(dot(&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]), 32.0);
/// ```
#[must_use]
pub fn dot(a: &[f64], b: &[f64]) -> f64 {
    assert_eq!(a.len(), b.len(), "vectors must have the same length");
    iter::zip(a, b).map(|(x, y)| x * y).sum()
}

/// Euclidean (L2) norm of a vector.
#[must_use]
pub fn l2_norm(v: &[f64]) -> f64 {
    v.iter().map(|x| x * x).sum::<f64>().sqrt()
}

/// Cosine similarity between two equal-length vectors.
///
/// Returns `0.0` when either vector has zero magnitude instead of dividing by zero.
/// The result is clamped to \[-1.0, 1.0\] to absorb rounding error.
///
/// # Panics
///
/// Panics if `a.len() != b.len()`.
///
/// # Examples
///
/// ```
/// # use chequemate_stats::vector::cosine_similarity;
/// assert_eq!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]), 0.0);
/// assert_eq!(cosine_similarity(&[1.0, 0.0], &[0.0, 0.0]), 0.0);
/// ```
#[must_use]
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    let denom = l2_norm(a) * l2_norm(b);
    if denom == 0.0 {
        return 0.0;
    }
    (dot(a, b) / denom).clamp(-1.0, 1.0)
}

/// Normalizes a vector of counts so its entries sum to 1.0 (L1 normalization).
///
/// The divisor floors at 1, so an all-zero input produces an all-zero output rather
/// than failing.
///
/// # Examples
///
/// ```
/// # use chequemate_stats::vector::normalize_counts;
/// assert_eq!(normalize_counts(&[1, 3, 0]), vec![0.25, 0.75, 0.0]);
/// assert_eq!(normalize_counts(&[0, 0]), vec![0.0, 0.0]);
/// ```
#[must_use]
pub fn normalize_counts(counts: &[u32]) -> Vec<f64> {
    let total = counts.iter().map(|&c| u64::from(c)).sum::<u64>().max(1);
    #[expect(clippy::cast_precision_loss)]
    let total = total as f64;
    counts.iter().map(|&c| f64::from(c) / total).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cosine_of_vector_with_itself_is_one() {
        let vectors: [&[f64]; 3] = [&[1.0], &[0.2, 0.3, 0.5], &[0.0, 7.0, 0.0, 1e-3]];
        for v in vectors {
            let sim = cosine_similarity(v, v);
            assert!((sim - 1.0).abs() < 1e-12, "cos(v, v) = {sim} for {v:?}");
        }
    }

    #[test]
    fn test_cosine_with_zero_vector_is_zero() {
        let v = [0.5, 0.5, 0.0];
        let zero = [0.0; 3];
        assert_eq!(cosine_similarity(&v, &zero), 0.0);
        assert_eq!(cosine_similarity(&zero, &v), 0.0);
        assert_eq!(cosine_similarity(&zero, &zero), 0.0);
    }

    #[test]
    fn test_cosine_is_scale_invariant() {
        let a = [1.0, 2.0, 3.0];
        let b = [2.0, 4.0, 6.0];
        assert!((cosine_similarity(&a, &b) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_cosine_of_orthogonal_vectors() {
        assert_eq!(cosine_similarity(&[1.0, 0.0, 0.0], &[0.0, 0.0, 2.0]), 0.0);
    }

    #[test]
    #[should_panic(expected = "same length")]
    fn test_dot_rejects_mismatched_lengths() {
        let _ = dot(&[1.0, 2.0], &[1.0]);
    }

    #[test]
    fn test_l2_norm() {
        assert_eq!(l2_norm(&[3.0, 4.0]), 5.0);
        assert_eq!(l2_norm(&[]), 0.0);
    }

    #[test]
    fn test_normalize_counts_sums_to_one() {
        let normalized = normalize_counts(&[2, 0, 5, 1]);
        let sum: f64 = normalized.iter().sum();
        assert!((sum - 1.0).abs() < 1e-12);
        assert!(normalized.iter().all(|&x| x >= 0.0));
    }

    #[test]
    fn test_normalize_counts_all_zero() {
        let normalized = normalize_counts(&[0; 5]);
        assert!(normalized.iter().all(|&x| x == 0.0));
    }
}
