//! Environment-backed defaults for the CLI.
//!
//! Flags always win; when a flag is absent the value comes from the
//! environment (optionally via a `.env` file), then from the built-in default.
//!
//! | variable              | flag       | default |
//! |-----------------------|------------|---------|
//! | `CURVECMP_SEED`       | `--seed`   | 42      |
//! | `CURVECMP_POINTS`     | `--points` | 200     |
//! | `CURVECMP_LOESS_SPAN` | `--span`   | 0.1     |

use std::str::FromStr;

use crate::error::AppError;

pub const ENV_SEED: &str = "CURVECMP_SEED";
pub const ENV_POINTS: &str = "CURVECMP_POINTS";
pub const ENV_LOESS_SPAN: &str = "CURVECMP_LOESS_SPAN";

pub const DEFAULT_SEED: u64 = 42;
pub const DEFAULT_POINTS: usize = 200;
pub const DEFAULT_LOESS_SPAN: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Settings {
    pub seed: u64,
    pub points: usize,
    pub loess_span: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            points: DEFAULT_POINTS,
            loess_span: DEFAULT_LOESS_SPAN,
        }
    }
}

impl Settings {
    /// Load settings from the process environment (after reading `.env`, if any).
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load settings through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let settings = Self {
            seed: parse_var(&lookup, ENV_SEED)?.unwrap_or(defaults.seed),
            points: parse_var(&lookup, ENV_POINTS)?.unwrap_or(defaults.points),
            loess_span: parse_var(&lookup, ENV_LOESS_SPAN)?.unwrap_or(defaults.loess_span),
        };
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if self.points < 2 {
            return Err(AppError::new(2, "Point count must be >= 2."));
        }
        if !(self.loess_span.is_finite() && self.loess_span > 0.0 && self.loess_span <= 1.0) {
            return Err(AppError::new(2, "LOESS span must be in (0, 1]."));
        }
        Ok(())
    }
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Result<Option<T>, AppError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(key) else {
        return Ok(None);
    };
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse::<T>()
        .map(Some)
        .map_err(|e| AppError::new(2, format!("Invalid {key}='{raw}': {e}")))
}
