//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - borrowed by the engine for the duration of a single call
//! - rendered as tables or JSON by the report layer
//! - built in tests without any I/O

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A single `(x, y)` sample of a measured signal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurvePoint {
    pub x: f64,
    pub y: f64,
}

impl CurvePoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<(f64, f64)> for CurvePoint {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// One measured signal for one sample replicate.
///
/// Points are expected in increasing `x` order. The engine never reorders,
/// resamples or interpolates them; curves compared pairwise must already share
/// their x-coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Curve {
    pub sample_id: i64,
    pub name: String,
    pub points: Vec<CurvePoint>,
}

impl Curve {
    pub fn new(sample_id: i64, name: impl Into<String>, points: Vec<CurvePoint>) -> Self {
        Self {
            sample_id,
            name: name.into(),
            points,
        }
    }

    /// Build a curve from `(x, y)` tuples.
    pub fn from_xy(sample_id: i64, name: impl Into<String>, xy: &[(f64, f64)]) -> Self {
        Self::new(sample_id, name, xy.iter().copied().map(CurvePoint::from).collect())
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn ys(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.y).collect()
    }

    /// Index-aligned prefix of at most `n` points (no interpolation).
    pub fn truncated(&self, n: usize) -> Curve {
        Curve {
            sample_id: self.sample_id,
            name: self.name.clone(),
            points: self.points[..n.min(self.points.len())].to_vec(),
        }
    }

    /// Whether `other` denotes the same physical sample.
    pub fn same_sample(&self, other: &Curve) -> bool {
        self.sample_id == other.sample_id
    }
}

/// One row of a ranking table: every registered algorithm's score for one candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DifferenceResultRow {
    pub sample_id: i64,
    pub sample_name: String,
    /// Algorithm id -> score.
    pub scores: BTreeMap<String, f64>,
}

impl DifferenceResultRow {
    pub fn score(&self, algorithm_id: &str) -> Option<f64> {
        self.scores.get(algorithm_id).copied()
    }
}

/// How a pick-best decision was reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    /// Lower combined quality score won.
    Quality,
    /// Qualities tied; local raw-vs-smoothed correlation around the principal feature won.
    LocalCorrelation,
    /// No decision possible (an input curve was empty).
    Undecided,
}

/// Outcome of choosing the more trustworthy of two replicate curves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PickBestResult {
    /// Index of the winning curve (0 = first argument, 1 = second).
    pub best_index: usize,
    pub decision: Decision,
    /// Number of points compared after truncation to the shorter curve.
    pub n: usize,
    /// Noise proxy per curve.
    pub residual_rms: [f64; 2],
    /// Span-sensitivity proxy per curve.
    pub stability: [f64; 2],
    /// Combined quality per curve (lower is better).
    pub quality: [f64; 2],
    pub nrmse: f64,
    pub pearson: f64,
    pub euclidean: f64,
}

impl PickBestResult {
    /// The "no decision possible" result returned for empty inputs.
    pub fn undecided() -> Self {
        Self {
            best_index: 0,
            decision: Decision::Undecided,
            n: 0,
            residual_rms: [f64::MAX; 2],
            stability: [f64::MAX; 2],
            quality: [f64::MAX; 2],
            nrmse: f64::MAX,
            pearson: f64::MAX,
            euclidean: f64::MAX,
        }
    }

    /// Whether `best_index` can be trusted.
    pub fn is_decisive(&self) -> bool {
        self.decision != Decision::Undecided
    }
}

impl Default for PickBestResult {
    fn default() -> Self {
        Self::undecided()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncated_keeps_prefix_and_identity() {
        let c = Curve::from_xy(7, "s7", &[(0.0, 1.0), (1.0, 2.0), (2.0, 3.0)]);
        let t = c.truncated(2);
        assert_eq!(t.len(), 2);
        assert_eq!(t.sample_id, 7);
        assert_eq!(t.ys(), vec![1.0, 2.0]);
        assert_eq!(c.truncated(10).len(), 3);
    }

    #[test]
    fn default_result_is_not_decisive() {
        let r = PickBestResult::default();
        assert_eq!(r.best_index, 0);
        assert!(!r.is_decisive());
        assert_eq!(r.quality, [f64::MAX, f64::MAX]);
    }
}
