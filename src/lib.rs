//! `curve-rank` library crate.
//!
//! A curve-comparison and replicate quality-ranking engine: pairwise
//! difference metrics (NRMSE, Pearson, Euclidean), ranked comparison rows, and a
//! LOESS-based heuristic that picks the more trustworthy of two replicates.
//!
//! The binary (`curvecmp`) is a thin wrapper around this library so that:
//!
//! - core logic is testable without spawning processes
//! - the engine can be embedded by other front-ends

pub mod app;
pub mod cli;
pub mod compare;
pub mod config;
pub mod data;
pub mod domain;
pub mod error;
pub mod math;
pub mod metrics;
pub mod report;

pub use compare::ComparisonService;
pub use domain::{Curve, CurvePoint, Decision, DifferenceResultRow, PickBestResult};
pub use metrics::{ScoreParams, Strategy};
