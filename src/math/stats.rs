//! Small descriptive statistics over paired slices.
//!
//! All helpers operate on the shorter of the two inputs when lengths differ;
//! callers that care about equal lengths check it first.

/// Arithmetic mean (`0.0` for an empty slice).
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sum of squared paired differences `Σ(a_i - b_i)²`.
pub fn sum_sq_diff(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum()
}

/// Root-mean-square of paired differences (`0.0` for empty input).
pub fn rms_diff(a: &[f64], b: &[f64]) -> f64 {
    let n = a.len().min(b.len());
    if n == 0 {
        return 0.0;
    }
    (sum_sq_diff(a, b) / n as f64).sqrt()
}

/// Paired-sample Pearson correlation coefficient.
///
/// Returns `0.0` when either series is flat or when fewer than two pairs are
/// available. A series counts as flat when its centered sum of squares is at
/// most `variance_eps` times its raw sum of squares, so the test does not
/// depend on the scale of the data. The result is clamped to `[-1, 1]`.
pub fn pearson(a: &[f64], b: &[f64], variance_eps: f64) -> f64 {
    let n = a.len().min(b.len());
    if n < 2 {
        return 0.0;
    }
    let (a, b) = (&a[..n], &b[..n]);
    let mean_a = mean(a);
    let mean_b = mean(b);

    let mut sxy = 0.0;
    let mut sxx = 0.0;
    let mut syy = 0.0;
    let mut raw_a = 0.0;
    let mut raw_b = 0.0;
    for (x, y) in a.iter().zip(b) {
        let dx = x - mean_a;
        let dy = y - mean_b;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
        raw_a += x * x;
        raw_b += y * y;
    }

    if !(sxx > variance_eps * raw_a && syy > variance_eps * raw_b) {
        return 0.0;
    }
    (sxy / (sxx * syy).sqrt()).clamp(-1.0, 1.0)
}

/// Index of the smallest value (first occurrence; NaN values are skipped).
pub fn argmin(values: &[f64]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &v) in values.iter().enumerate() {
        if v.is_nan() {
            continue;
        }
        match best {
            Some((_, b)) if v >= b => {}
            _ => best = Some((i, v)),
        }
    }
    best.map(|(i, _)| i)
}
