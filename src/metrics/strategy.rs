//! Difference strategies: the closed set of scoring algorithms.
//!
//! Each strategy exposes a stable algorithm id (used as a column key in
//! ranking rows), a display name, and a scoring function over two curves.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::Curve;
use crate::error::MetricError;
use crate::metrics::difference::{euclidean, nrmse, pearson};

/// Score returned when a metric's length precondition is violated.
///
/// For Pearson `-1.0` is also a legitimate score; callers that need to tell
/// the two apart use [`Strategy::try_score`].
pub const INVALID_SCORE: f64 = -1.0;

/// Parameter key: NRMSE reference-range epsilon.
pub const PARAM_NRMSE_RANGE_EPS: &str = "nrmse.range_epsilon";
/// Parameter key: Pearson flatness epsilon, relative to each series' sum of squares.
pub const PARAM_PEARSON_VARIANCE_EPS: &str = "pearson.variance_epsilon";

const DEFAULT_EPS: f64 = 1e-12;

/// Free-form key/value parameters passed to every strategy.
///
/// Unknown keys are ignored, so one bag can be shared by all strategies.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreParams(BTreeMap<String, f64>);

impl ScoreParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: f64) -> Self {
        self.0.insert(key.into(), value);
        self
    }

    pub fn get(&self, key: &str) -> Option<f64> {
        self.0.get(key).copied()
    }

    pub fn get_or(&self, key: &str, default: f64) -> f64 {
        self.get(key).unwrap_or(default)
    }
}

/// A scoring algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    Nrmse,
    Pearson,
    Euclidean,
}

impl Strategy {
    /// Every strategy, in registry order.
    pub const ALL: [Strategy; 3] = [Strategy::Nrmse, Strategy::Pearson, Strategy::Euclidean];

    /// Stable id used as the score key in ranking rows.
    pub fn algorithm_id(self) -> &'static str {
        match self {
            Strategy::Nrmse => "nrmse",
            Strategy::Pearson => "pearson",
            Strategy::Euclidean => "euclidean",
        }
    }

    /// Human-readable label for selection lists and tables.
    pub fn display_name(self) -> &'static str {
        match self {
            Strategy::Nrmse => "Normalized RMSE",
            Strategy::Pearson => "Pearson correlation",
            Strategy::Euclidean => "Euclidean distance",
        }
    }

    /// Whether larger scores mean "more similar".
    pub fn higher_is_better(self) -> bool {
        matches!(self, Strategy::Pearson)
    }

    pub fn from_id(id: &str) -> Option<Strategy> {
        Strategy::ALL.into_iter().find(|s| s.algorithm_id() == id)
    }

    /// Score `candidate` against `reference`, reporting precondition failures.
    pub fn try_score(self, reference: &Curve, candidate: &Curve, params: &ScoreParams) -> Result<f64, MetricError> {
        let r = reference.ys();
        let c = candidate.ys();
        match self {
            Strategy::Nrmse => nrmse(&r, &c, params.get_or(PARAM_NRMSE_RANGE_EPS, DEFAULT_EPS)),
            Strategy::Pearson => pearson(&r, &c, params.get_or(PARAM_PEARSON_VARIANCE_EPS, DEFAULT_EPS)),
            Strategy::Euclidean => euclidean(&r, &c),
        }
    }

    /// Score `candidate` against `reference`; precondition failures give [`INVALID_SCORE`].
    pub fn compute_score(self, reference: &Curve, candidate: &Curve, params: &ScoreParams) -> f64 {
        self.try_score(reference, candidate, params).unwrap_or(INVALID_SCORE)
    }
}
