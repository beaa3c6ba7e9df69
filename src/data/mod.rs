//! Input data sources for the CLI front-end.

pub mod synthetic;

pub use synthetic::*;
