//! Shared run logic used by the CLI front-end.
//!
//! Keeping this separate from printing keeps the workflow testable:
//! synthesize curves -> compare -> order rows / pick replicate.

use serde::Serialize;
use tracing::info;

use crate::compare::{ComparisonService, rank_rows};
use crate::data::{ReplicateSpec, generate_replicate};
use crate::domain::{Curve, DifferenceResultRow, PickBestResult};
use crate::error::AppError;
use crate::metrics::Strategy;

/// Temperature shift (°C) applied per candidate index so candidates differ in shape.
const CANDIDATE_SHIFT_STEP: f64 = 4.0;

/// Resolved options for a ranking run.
#[derive(Debug, Clone)]
pub struct RankConfig {
    pub candidates: usize,
    pub points: usize,
    pub seed: u64,
    pub noise: f64,
    pub sort_by: Strategy,
}

/// Resolved options for a pick-best run.
#[derive(Debug, Clone)]
pub struct PickConfig {
    pub points: usize,
    pub seed: u64,
    pub span: f64,
    pub noise_a: f64,
    pub noise_b: f64,
    pub kink: f64,
}

/// All computed outputs of a ranking run.
#[derive(Debug, Clone, Serialize)]
pub struct RankOutput {
    pub reference: Curve,
    pub sort_by: Strategy,
    pub rows: Vec<DifferenceResultRow>,
    /// Row indices, best first.
    #[serde(skip)]
    pub order: Vec<usize>,
}

impl RankOutput {
    /// Rows in best-first order.
    pub fn ordered_rows(&self) -> Vec<&DifferenceResultRow> {
        self.order.iter().filter_map(|&i| self.rows.get(i)).collect()
    }
}

/// All computed outputs of a pick-best run.
#[derive(Debug, Clone, Serialize)]
pub struct PickOutput {
    pub curve_a: Curve,
    pub curve_b: Curve,
    pub result: PickBestResult,
}

/// Synthesize a reference plus candidates and rank them.
///
/// The first candidate is an identical copy of the reference.
pub fn run_rank(service: &ComparisonService, config: &RankConfig) -> Result<RankOutput, AppError> {
    if config.candidates == 0 {
        return Err(AppError::new(2, "Candidate count must be > 0."));
    }
    if service.strategy(config.sort_by.algorithm_id()).is_none() {
        return Err(AppError::new(
            2,
            format!("Sort algorithm '{}' is not registered.", config.sort_by.algorithm_id()),
        ));
    }

    let reference = generate_replicate(1, "reference", &ReplicateSpec::new(config.points, config.noise), config.seed)?;

    let mut candidates = Vec::with_capacity(config.candidates);
    candidates.push(reference.clone());
    for k in 1..config.candidates {
        let spec = ReplicateSpec {
            shift: k as f64 * CANDIDATE_SHIFT_STEP,
            ..ReplicateSpec::new(config.points, config.noise)
        };
        let id = k as i64 + 1;
        candidates.push(generate_replicate(id, &format!("candidate-{k}"), &spec, config.seed)?);
    }

    let rows = service.calculate_ranking(&reference, &candidates);
    let order = rank_rows(&rows, config.sort_by.algorithm_id(), config.sort_by.higher_is_better());
    info!(rows = rows.len(), sort_by = config.sort_by.algorithm_id(), "ranking complete");

    Ok(RankOutput {
        reference,
        sort_by: config.sort_by,
        rows,
        order,
    })
}

/// Synthesize two replicates (B noisier and optionally kinked) and pick the better one.
pub fn run_pick(service: &ComparisonService, config: &PickConfig) -> Result<PickOutput, AppError> {
    let spec_a = ReplicateSpec::new(config.points, config.noise_a);
    let spec_b = ReplicateSpec {
        kink: config.kink,
        ..ReplicateSpec::new(config.points, config.noise_b)
    };
    let curve_a = generate_replicate(1, "replicate-a", &spec_a, config.seed)?;
    let curve_b = generate_replicate(2, "replicate-b", &spec_b, config.seed)?;

    let result = service.pick_best_of_two(&curve_a, &curve_b, config.span);
    info!(best_index = result.best_index, decision = ?result.decision, "pick-best complete");

    Ok(PickOutput { curve_a, curve_b, result })
}
