//! Reporting utilities: terminal tables and JSON output.

pub mod format;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::AppError;

pub use format::*;

/// JSON envelope for machine-readable output.
#[derive(Debug, Clone, Serialize)]
pub struct JsonReport<'a, T: Serialize> {
    pub tool: &'static str,
    pub command: &'a str,
    pub generated_at: DateTime<Utc>,
    pub data: &'a T,
}

/// Render `data` as pretty JSON inside the standard envelope.
pub fn to_json<T: Serialize>(command: &str, data: &T) -> Result<String, AppError> {
    let report = JsonReport {
        tool: "curvecmp",
        command,
        generated_at: Utc::now(),
        data,
    };
    serde_json::to_string_pretty(&report).map_err(|e| AppError::new(4, format!("Failed to serialize JSON: {e}")))
}
