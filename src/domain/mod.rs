//! Domain types used throughout the engine.
//!
//! This module defines:
//!
//! - measured signals (`Curve`, `CurvePoint`)
//! - ranking output (`DifferenceResultRow`)
//! - replicate selection output (`PickBestResult`, `Decision`)

pub mod types;

pub use types::*;
