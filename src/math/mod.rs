//! Mathematical utilities: descriptive statistics, weighted line fits and LOESS.

pub mod loess;
pub mod ols;
pub mod stats;

pub use loess::*;
pub use ols::*;
pub use stats::*;
