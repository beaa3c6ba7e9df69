//! Pick the more trustworthy of two replicate curves.
//!
//! Each replicate gets a quality score (lower is better):
//!
//! ```text
//! quality = 0.7 * residual_rms + 0.3 * stability
//! ```
//!
//! - `residual_rms`: RMS of raw minus LOESS-smoothed y (noise proxy)
//! - `stability`: how much the smoothed shape moves when the span is perturbed
//!   by ±20% (reproducibility proxy)
//!
//! A tie on quality is broken by how well the smoothed curve follows the raw one
//! around the principal feature (the global minimum).

use tracing::{debug, warn};

use crate::domain::{Curve, CurvePoint, Decision, PickBestResult};
use crate::math::{argmin, loess_smooth, loess_smooth_window, pearson, rms_diff, sum_sq_diff};
use crate::metrics::{ScoreParams, Strategy};

/// Weight of the residual RMS in the combined quality.
pub const RESIDUAL_WEIGHT: f64 = 0.7;
/// Weight of the stability term in the combined quality.
pub const STABILITY_WEIGHT: f64 = 0.3;
/// Span perturbation factors for the stability term.
pub const SPAN_LOW_FACTOR: f64 = 0.8;
pub const SPAN_HIGH_FACTOR: f64 = 1.2;
/// Minimum window (points) of the perturbed smoothings.
pub const MIN_PERTURBED_WINDOW: usize = 5;
/// Quality difference treated as a tie.
pub const TIE_EPS: f64 = 1e-12;
/// Local window around the principal feature: fraction of n, with a floor.
const FEATURE_WINDOW_FRACTION: f64 = 0.05;
const MIN_FEATURE_HALF_WINDOW: usize = 5;

const MIN_SPAN: f64 = 1e-6;
const CORRELATION_EPS: f64 = 1e-12;

/// Per-curve quality diagnostics.
#[derive(Debug, Clone)]
struct ReplicateQuality {
    residual_rms: f64,
    stability: f64,
    quality: f64,
    smoothed: Vec<f64>,
}

fn assess(points: &[CurvePoint], span: f64) -> ReplicateQuality {
    let n = points.len();
    let raw: Vec<f64> = points.iter().map(|p| p.y).collect();
    let smoothed: Vec<f64> = loess_smooth(points, span).iter().map(|p| p.y).collect();
    let residual_rms = rms_diff(&raw, &smoothed);

    let span_pts = (n as f64 * span).round();
    let low_window = ((SPAN_LOW_FACTOR * span_pts).round() as usize).max(MIN_PERTURBED_WINDOW);
    let high_window = ((SPAN_HIGH_FACTOR * span_pts).round() as usize).max(MIN_PERTURBED_WINDOW);
    let low: Vec<f64> = loess_smooth_window(points, low_window).iter().map(|p| p.y).collect();
    let high: Vec<f64> = loess_smooth_window(points, high_window).iter().map(|p| p.y).collect();
    let stability = if n == 0 { 0.0 } else { sum_sq_diff(&low, &high).sqrt() / n as f64 };

    ReplicateQuality {
        residual_rms,
        stability,
        quality: RESIDUAL_WEIGHT * residual_rms + STABILITY_WEIGHT * stability,
        smoothed,
    }
}

fn sanitize_span(span: f64) -> f64 {
    if span.is_finite() && span > 0.0 && span <= 1.0 {
        return span;
    }
    let clamped = if span.is_finite() { span.clamp(MIN_SPAN, 1.0) } else { 1.0 };
    warn!(span, clamped, "LOESS span outside (0, 1]; clamping");
    clamped
}

/// Raw-vs-smoothed agreement of both replicates inside the window around the
/// shared principal feature.
#[derive(Debug, Clone, Copy, PartialEq)]
struct FeatureWindow {
    lo: usize,
    hi: usize,
    correlation: [f64; 2],
}

impl FeatureWindow {
    /// Index of the replicate whose smoothing follows the raw data more closely;
    /// equal correlations keep the first.
    fn winner(&self) -> usize {
        if self.correlation[1] > self.correlation[0] { 1 } else { 0 }
    }
}

/// Window centred on the mean of both argmin indices, half-width
/// `max(5, round(0.05 n))`, clamped to the curve. `n` must be non-zero.
fn feature_bounds(a: &[f64], b: &[f64]) -> (usize, usize) {
    let n = a.len().min(b.len());
    let feature_a = argmin(&a[..n]).unwrap_or(0);
    let feature_b = argmin(&b[..n]).unwrap_or(0);
    let center = (feature_a + feature_b) / 2;
    let half = ((FEATURE_WINDOW_FRACTION * n as f64).round() as usize).max(MIN_FEATURE_HALF_WINDOW);
    (center.saturating_sub(half), (center + half).min(n - 1))
}

fn local_correlations(a: &[f64], b: &[f64], smooth_a: &[f64], smooth_b: &[f64]) -> FeatureWindow {
    let (lo, hi) = feature_bounds(a, b);
    FeatureWindow {
        lo,
        hi,
        correlation: [
            pearson(&a[lo..=hi], &smooth_a[lo..=hi], CORRELATION_EPS),
            pearson(&b[lo..=hi], &smooth_b[lo..=hi], CORRELATION_EPS),
        ],
    }
}

/// Decide which of two replicates is more trustworthy.
///
/// Both curves are truncated to the shorter length (index-aligned). An empty
/// input yields [`PickBestResult::undecided`].
pub fn pick_best_of_two(curve_a: &Curve, curve_b: &Curve, loess_span: f64) -> PickBestResult {
    if curve_a.is_empty() || curve_b.is_empty() {
        debug!(
            a = curve_a.sample_id,
            b = curve_b.sample_id,
            "empty replicate; no decision possible"
        );
        return PickBestResult::undecided();
    }

    let span = sanitize_span(loess_span);
    let n = curve_a.len().min(curve_b.len());
    let a = curve_a.truncated(n);
    let b = curve_b.truncated(n);

    let params = ScoreParams::default();
    let nrmse = Strategy::Nrmse.compute_score(&a, &b, &params);
    let pearson_ab = Strategy::Pearson.compute_score(&a, &b, &params);
    let euclidean = Strategy::Euclidean.compute_score(&a, &b, &params);

    let qa = assess(&a.points, span);
    let qb = assess(&b.points, span);

    let (best_index, decision) = if (qa.quality - qb.quality).abs() > TIE_EPS {
        (if qa.quality < qb.quality { 0 } else { 1 }, Decision::Quality)
    } else {
        let window = local_correlations(&a.ys(), &b.ys(), &qa.smoothed, &qb.smoothed);
        debug!(
            lo = window.lo,
            hi = window.hi,
            corr_a = window.correlation[0],
            corr_b = window.correlation[1],
            "quality tie; using local correlation"
        );
        (window.winner(), Decision::LocalCorrelation)
    };

    debug!(
        n,
        span,
        quality_a = qa.quality,
        quality_b = qb.quality,
        best_index,
        "picked best replicate"
    );

    PickBestResult {
        best_index,
        decision,
        n,
        residual_rms: [qa.residual_rms, qb.residual_rms],
        stability: [qa.stability, qb.stability],
        quality: [qa.quality, qb.quality],
        nrmse,
        pearson: pearson_ab,
        euclidean,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn curve(id: i64, ys: &[f64]) -> Curve {
        let xy: Vec<(f64, f64)> = ys.iter().enumerate().map(|(i, &y)| (i as f64, y)).collect();
        Curve::from_xy(id, format!("rep-{id}"), &xy)
    }

    #[test]
    fn empty_input_is_undecided() {
        let a = curve(1, &[]);
        let b = curve(2, &[1.0, 2.0, 3.0]);
        let r = pick_best_of_two(&a, &b, 0.3);
        assert!(!r.is_decisive());
        assert_eq!(r.best_index, 0);
        assert_eq!(r.quality, [f64::MAX, f64::MAX]);
        assert!(!pick_best_of_two(&b, &a, 0.3).is_decisive());
    }

    #[test]
    fn truncates_to_shorter_curve() {
        let a = curve(1, &(0..40).map(|i| i as f64).collect::<Vec<_>>());
        let b = curve(2, &(0..30).map(|i| i as f64 + 0.5).collect::<Vec<_>>());
        let r = pick_best_of_two(&a, &b, 0.3);
        assert_eq!(r.n, 30);
        assert_abs_diff_eq!(r.euclidean, (30.0f64 * 0.25).sqrt(), epsilon = 1e-9);
        assert_abs_diff_eq!(r.pearson, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn noisier_replicate_loses() {
        let base: Vec<f64> = (0..60).map(|i| (i as f64 / 10.0).sin()).collect();
        let quiet: Vec<f64> = base.iter().enumerate().map(|(i, y)| y + if i % 2 == 0 { 0.01 } else { -0.01 }).collect();
        let loud: Vec<f64> = base.iter().enumerate().map(|(i, y)| y + if i % 2 == 0 { 0.2 } else { -0.2 }).collect();
        let r = pick_best_of_two(&curve(1, &loud), &curve(2, &quiet), 0.2);
        assert_eq!(r.best_index, 1);
        assert_eq!(r.decision, Decision::Quality);
        assert!(r.residual_rms[0] > r.residual_rms[1]);
    }

    #[test]
    fn identical_replicates_tie_and_first_wins() {
        let ys: Vec<f64> = (0..40).map(|i| ((i as f64 - 20.0) / 5.0).powi(2)).collect();
        let r = pick_best_of_two(&curve(1, &ys), &curve(2, &ys), 0.25);
        assert_eq!(r.decision, Decision::LocalCorrelation);
        assert_eq!(r.best_index, 0);
        assert_eq!(r.quality[0], r.quality[1]);
    }

    fn parabola(n: usize, vertex: usize) -> Vec<f64> {
        (0..n).map(|i| (i as f64 - vertex as f64).powi(2)).collect()
    }

    #[test]
    fn feature_window_is_centred_between_both_minima() {
        // n = 40: half = max(5, round(2)) = 5 around (10 + 30) / 2.
        assert_eq!(feature_bounds(&parabola(40, 10), &parabola(40, 30)), (15, 25));
        // n = 200: half = round(0.05 * 200) = 10 around (50 + 71) / 2 = 60.
        assert_eq!(feature_bounds(&parabola(200, 50), &parabola(200, 71)), (50, 70));
        // Clamped at both ends of the curve.
        assert_eq!(feature_bounds(&parabola(40, 0), &parabola(40, 1)), (0, 5));
        assert_eq!(feature_bounds(&parabola(40, 39), &parabola(40, 38)), (33, 39));
        assert_eq!(feature_bounds(&parabola(6, 3), &parabola(6, 3)), (0, 5));
    }

    #[test]
    fn second_replicate_wins_tie_when_it_follows_its_smoothing_closer() {
        let a = parabola(40, 10);
        let b = parabola(40, 30);
        // A's smoothing runs against the raw data inside the window, B's matches it.
        let smooth_a: Vec<f64> = a.iter().map(|y| -y).collect();
        let smooth_b = b.clone();

        let window = local_correlations(&a, &b, &smooth_a, &smooth_b);
        assert_eq!((window.lo, window.hi), (15, 25));
        assert_abs_diff_eq!(window.correlation[0], -1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(window.correlation[1], 1.0, epsilon = 1e-12);
        assert_eq!(window.winner(), 1);

        let swapped = local_correlations(&b, &a, &smooth_b, &smooth_a);
        assert_eq!(swapped.winner(), 0);
    }

    #[test]
    fn equal_local_correlation_keeps_first() {
        let window = FeatureWindow {
            lo: 0,
            hi: 10,
            correlation: [0.5, 0.5],
        };
        assert_eq!(window.winner(), 0);
    }

    #[test]
    fn out_of_range_span_is_clamped() {
        assert_eq!(sanitize_span(0.4), 0.4);
        assert_eq!(sanitize_span(3.0), 1.0);
        assert_eq!(sanitize_span(-1.0), MIN_SPAN);
        assert_eq!(sanitize_span(f64::NAN), 1.0);
    }

    #[test]
    fn stability_is_zero_for_a_straight_line() {
        let line: Vec<CurvePoint> = (0..50).map(|i| CurvePoint::new(i as f64, 2.0 * i as f64 + 1.0)).collect();
        let q = assess(&line, 0.2);
        assert_abs_diff_eq!(q.stability, 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(q.residual_rms, 0.0, epsilon = 1e-9);
    }
}
