//! Curve difference metrics.
//!
//! - raw pairwise metrics over y-sequences (`difference`)
//! - the enum-dispatched strategy layer used by the comparison service (`strategy`)

pub mod difference;
pub mod strategy;

pub use strategy::*;
