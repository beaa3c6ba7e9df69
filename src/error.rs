//! Error types.
//!
//! The comparison engine itself reports failures through sentinel scores (see
//! `metrics`), so `MetricError` only surfaces through the typed `try_score` entry
//! point. `AppError` is the binary's error and carries a process exit code.

use thiserror::Error;

/// Precondition failure of a pairwise metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MetricError {
    #[error("curve lengths differ (reference={reference}, candidate={candidate})")]
    LengthMismatch { reference: usize, candidate: usize },
    #[error("metric needs at least {required} points, got {actual}")]
    TooFewPoints { required: usize, actual: usize },
}

#[derive(Clone, Error)]
#[error("{message}")]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}
