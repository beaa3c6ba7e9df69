//! The comparison service: strategy registry, ranking, and replicate selection.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::compare::pick_best::pick_best_of_two;
use crate::domain::{Curve, DifferenceResultRow, PickBestResult};
use crate::metrics::{ScoreParams, Strategy};

/// Score written for every algorithm when a candidate is the reference sample itself.
///
/// This intentionally ignores each metric's own notion of "identical" (which is
/// `0.0` for NRMSE and Euclidean).
pub const SELF_COMPARISON_SCORE: f64 = 1.0;

/// Owns a fixed, read-only set of strategies.
#[derive(Debug, Clone)]
pub struct ComparisonService {
    strategies: Vec<Strategy>,
}

impl Default for ComparisonService {
    fn default() -> Self {
        Self::new()
    }
}

impl ComparisonService {
    /// Service with every built-in strategy (NRMSE, Pearson, Euclidean).
    pub fn new() -> Self {
        Self::with_strategies(Strategy::ALL.to_vec())
    }

    /// Service with an explicit registry. Duplicates are dropped (first wins).
    pub fn with_strategies(strategies: Vec<Strategy>) -> Self {
        let mut registry: Vec<Strategy> = Vec::with_capacity(strategies.len());
        for s in strategies {
            if registry.contains(&s) {
                warn!(algorithm = s.algorithm_id(), "dropping duplicate strategy registration");
                continue;
            }
            registry.push(s);
        }
        Self { strategies: registry }
    }

    pub fn strategies(&self) -> &[Strategy] {
        &self.strategies
    }

    pub fn strategy(&self, algorithm_id: &str) -> Option<Strategy> {
        self.strategies.iter().copied().find(|s| s.algorithm_id() == algorithm_id)
    }

    /// Algorithm id -> display name, for populating selection lists.
    pub fn available_algorithms(&self) -> BTreeMap<String, String> {
        self.strategies
            .iter()
            .map(|s| (s.algorithm_id().to_string(), s.display_name().to_string()))
            .collect()
    }

    /// Score every candidate against `reference` with every registered strategy.
    pub fn calculate_ranking(&self, reference: &Curve, candidates: &[Curve]) -> Vec<DifferenceResultRow> {
        self.calculate_ranking_with_params(reference, candidates, &ScoreParams::default())
    }

    /// Like [`calculate_ranking`](Self::calculate_ranking) with explicit strategy parameters.
    ///
    /// Rows come back in candidate order; ordering by score is left to the caller.
    pub fn calculate_ranking_with_params(
        &self,
        reference: &Curve,
        candidates: &[Curve],
        params: &ScoreParams,
    ) -> Vec<DifferenceResultRow> {
        debug!(
            reference = reference.sample_id,
            candidates = candidates.len(),
            algorithms = self.strategies.len(),
            "calculating ranking"
        );

        candidates
            .iter()
            .map(|candidate| {
                let is_self = candidate.same_sample(reference);
                let scores = self
                    .strategies
                    .iter()
                    .map(|s| {
                        let score = if is_self {
                            SELF_COMPARISON_SCORE
                        } else {
                            s.compute_score(reference, candidate, params)
                        };
                        (s.algorithm_id().to_string(), score)
                    })
                    .collect();
                DifferenceResultRow {
                    sample_id: candidate.sample_id,
                    sample_name: candidate.name.clone(),
                    scores,
                }
            })
            .collect()
    }

    /// Decide which of two replicates is more trustworthy.
    pub fn pick_best_of_two(&self, curve_a: &Curve, curve_b: &Curve, loess_span: f64) -> PickBestResult {
        pick_best_of_two(curve_a, curve_b, loess_span)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn curve(id: i64, xy: &[(f64, f64)]) -> Curve {
        Curve::from_xy(id, format!("sample-{id}"), xy)
    }

    #[test]
    fn available_algorithms_lists_registry() {
        let svc = ComparisonService::new();
        let algos = svc.available_algorithms();
        assert_eq!(algos.len(), 3);
        assert_eq!(algos["nrmse"], "Normalized RMSE");
        assert_eq!(algos["pearson"], "Pearson correlation");
        assert_eq!(algos["euclidean"], "Euclidean distance");
    }

    #[test]
    fn duplicate_registrations_are_dropped() {
        let svc = ComparisonService::with_strategies(vec![Strategy::Pearson, Strategy::Pearson, Strategy::Nrmse]);
        assert_eq!(svc.strategies(), &[Strategy::Pearson, Strategy::Nrmse]);
        assert!(svc.strategy("euclidean").is_none());
    }

    #[test]
    fn self_comparison_row_is_forced_to_one() {
        let svc = ComparisonService::new();
        let reference = curve(1, &[(0.0, 0.0), (1.0, 1.0), (2.0, 2.0)]);
        let copy = reference.clone();
        let rows = svc.calculate_ranking(&reference, &[copy]);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].scores.len(), 3);
        for score in rows[0].scores.values() {
            assert_eq!(*score, 1.0);
        }
    }

    #[test]
    fn ranking_keeps_candidate_order_and_scores_each_algorithm() {
        let svc = ComparisonService::new();
        let reference = curve(1, &[(0.0, 10.0), (1.0, 20.0), (2.0, 10.0)]);
        let opposite = curve(2, &[(0.0, 20.0), (1.0, 10.0), (2.0, 20.0)]);
        let short = curve(3, &[(0.0, 10.0), (1.0, 20.0)]);
        let rows = svc.calculate_ranking(&reference, &[opposite, short]);

        assert_eq!(rows[0].sample_id, 2);
        assert!((rows[0].score("pearson").unwrap() + 1.0).abs() < 1e-12);
        assert!((rows[0].score("euclidean").unwrap() - 300f64.sqrt()).abs() < 1e-12);
        assert!((rows[0].score("nrmse").unwrap() - 1.0).abs() < 1e-12);

        assert_eq!(rows[1].sample_id, 3);
        for score in rows[1].scores.values() {
            assert_eq!(*score, -1.0);
        }
    }

    #[test]
    fn service_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ComparisonService>();
    }
}
