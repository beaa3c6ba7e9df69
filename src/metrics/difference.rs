//! Pairwise difference/similarity metrics between two y-sequences.
//!
//! These are small, pure functions so the strategy layer can stay a thin
//! dispatch. Every function checks its precondition and reports a typed
//! `MetricError`; the sentinel convention lives one level up.

use crate::error::MetricError;
use crate::math::{pearson as pearson_coefficient, rms_diff, sum_sq_diff};

/// Minimum length for NRMSE and Euclidean.
pub const MIN_POINTS_DISTANCE: usize = 1;

/// Minimum length for Pearson.
pub const MIN_POINTS_CORRELATION: usize = 2;

fn check_lengths(reference: &[f64], candidate: &[f64], required: usize) -> Result<(), MetricError> {
    if reference.len() != candidate.len() {
        return Err(MetricError::LengthMismatch {
            reference: reference.len(),
            candidate: candidate.len(),
        });
    }
    if reference.len() < required {
        return Err(MetricError::TooFewPoints {
            required,
            actual: reference.len(),
        });
    }
    Ok(())
}

/// RMSE normalized by the y-range of the **reference** only.
///
/// Using the reference range for every candidate keeps all rows of a ranking on
/// the same denominator. A range below `range_eps` yields `0.0`.
pub fn nrmse(reference: &[f64], candidate: &[f64], range_eps: f64) -> Result<f64, MetricError> {
    check_lengths(reference, candidate, MIN_POINTS_DISTANCE)?;

    let rmse = rms_diff(candidate, reference);
    let (lo, hi) = reference
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &y| (lo.min(y), hi.max(y)));
    let range = hi - lo;
    if range.abs() < range_eps {
        return Ok(0.0);
    }
    Ok(rmse / range)
}

/// Paired-sample Pearson correlation, `0.0` for a flat series.
pub fn pearson(reference: &[f64], candidate: &[f64], variance_eps: f64) -> Result<f64, MetricError> {
    check_lengths(reference, candidate, MIN_POINTS_CORRELATION)?;
    Ok(pearson_coefficient(reference, candidate, variance_eps))
}

/// Unnormalized Euclidean distance.
pub fn euclidean(reference: &[f64], candidate: &[f64]) -> Result<f64, MetricError> {
    check_lengths(reference, candidate, MIN_POINTS_DISTANCE)?;
    Ok(sum_sq_diff(candidate, reference).sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    const EPS: f64 = 1e-12;

    #[test]
    fn opposite_triangle_scores() {
        let r = [10.0, 20.0, 10.0];
        let c = [20.0, 10.0, 20.0];
        assert_abs_diff_eq!(pearson(&r, &c, EPS).unwrap(), -1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(euclidean(&r, &c).unwrap(), 300f64.sqrt(), epsilon = 1e-12);
        assert_abs_diff_eq!(nrmse(&r, &c, EPS).unwrap(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn nrmse_uses_reference_range_only() {
        let r = [0.0, 1.0, 2.0];
        let c = [0.0, 11.0, 2.0];
        // rmse = sqrt(100/3); reference range 2
        assert_abs_diff_eq!(nrmse(&r, &c, EPS).unwrap(), (100.0f64 / 3.0).sqrt() / 2.0, epsilon = 1e-12);
        // Swapping roles changes the denominator.
        assert_abs_diff_eq!(nrmse(&c, &r, EPS).unwrap(), (100.0f64 / 3.0).sqrt() / 11.0, epsilon = 1e-12);
    }

    #[test]
    fn nrmse_flat_reference_is_zero() {
        assert_eq!(nrmse(&[5.0, 5.0], &[1.0, 9.0], EPS).unwrap(), 0.0);
    }

    #[test]
    fn single_point_is_enough_for_distances_but_not_correlation() {
        assert_eq!(euclidean(&[1.0], &[4.0]).unwrap(), 3.0);
        assert_eq!(nrmse(&[1.0], &[4.0], EPS).unwrap(), 0.0);
        assert_eq!(
            pearson(&[1.0], &[4.0], EPS),
            Err(MetricError::TooFewPoints { required: 2, actual: 1 })
        );
    }

    #[test]
    fn empty_and_mismatched_inputs_are_errors() {
        assert!(matches!(euclidean(&[], &[]), Err(MetricError::TooFewPoints { .. })));
        assert_eq!(
            nrmse(&[1.0, 2.0], &[1.0], EPS),
            Err(MetricError::LengthMismatch { reference: 2, candidate: 1 })
        );
    }
}
