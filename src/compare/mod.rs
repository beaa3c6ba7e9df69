//! Curve comparison engine.
//!
//! - `service`: strategy registry and ranking (`ComparisonService`)
//! - `pick_best`: replicate quality heuristic
//! - `ranking`: best-first ordering of ranking rows

pub mod pick_best;
pub mod ranking;
pub mod service;

pub use pick_best::pick_best_of_two;
pub use ranking::rank_rows;
pub use service::*;
