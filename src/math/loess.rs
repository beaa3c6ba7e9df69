//! LOESS: locally weighted linear regression.
//!
//! For every point `i` we take a contiguous window of `w` neighbours, weight them
//! with the tricube kernel on the x-distance to `x_i`, fit a weighted line and
//! evaluate it at `x_i`.
//!
//! Window rules:
//! - `w = max(3, round(n * span))`, never more than `n`
//! - the window is centered on `i` and shifted inward (not shrunk) at the edges
//! - the kernel bandwidth is the x-extent of the window
//!
//! Curves with fewer than 3 points are returned unchanged.

use crate::domain::CurvePoint;
use crate::math::ols::{WeightedSums, solve_weighted_line};

/// Smallest number of points a local fit uses.
pub const MIN_WINDOW: usize = 3;

/// Bandwidth substituted when a window has zero x-extent.
const BANDWIDTH_EPS: f64 = 1e-12;

/// Number of points per local window for a span fraction.
pub fn window_size(n: usize, span: f64) -> usize {
    let w = (n as f64 * span).round();
    // `as usize` saturates: NaN and negatives become 0.
    (w as usize).max(MIN_WINDOW).min(n)
}

/// Smooth `points` using a span fraction of the curve length.
pub fn loess_smooth(points: &[CurvePoint], span: f64) -> Vec<CurvePoint> {
    loess_smooth_window(points, window_size(points.len(), span))
}

/// Smooth `points` using an explicit window size (in points).
pub fn loess_smooth_window(points: &[CurvePoint], window: usize) -> Vec<CurvePoint> {
    let n = points.len();
    if n < MIN_WINDOW {
        return points.to_vec();
    }
    let w = window.max(MIN_WINDOW).min(n);

    let mut out = Vec::with_capacity(n);
    for i in 0..n {
        let start = window_start(i, w, n);
        let local = &points[start..start + w];
        let y = fit_at(local, points[i]);
        out.push(CurvePoint::new(points[i].x, y));
    }
    out
}

/// Left edge of the window of size `w` centered on `i`, clamped into `[0, n - w]`.
fn window_start(i: usize, w: usize, n: usize) -> usize {
    i.saturating_sub(w / 2).min(n - w)
}

fn tricube(u: f64) -> f64 {
    if u >= 1.0 {
        return 0.0;
    }
    let t = 1.0 - u * u * u;
    t * t * t
}

/// Fitted value at `target.x` of a tricube-weighted line through `window`.
fn fit_at(window: &[CurvePoint], target: CurvePoint) -> f64 {
    let (Some(left), Some(right)) = (window.first(), window.last()) else {
        return target.y;
    };
    let mut max_dist = (right.x - left.x).abs();
    if max_dist == 0.0 {
        max_dist = BANDWIDTH_EPS;
    }

    let mut sums = WeightedSums::default();
    for p in window {
        let u = (p.x - target.x).abs() / max_dist;
        sums.add(p.x, p.y, tricube(u));
    }

    match solve_weighted_line(&sums) {
        Some(line) => line.predict(target.x),
        None => target.y,
    }
}
