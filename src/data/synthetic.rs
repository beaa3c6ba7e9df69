//! Synthetic thermogravimetric replicate generation.
//!
//! The underlying profile is a single-step mass-loss sigmoid:
//!
//! ```text
//! mass(T) = 100 - loss / (1 + exp(-(T - onset) / width))
//! ```
//!
//! Replicates share the x-grid and differ by Gaussian jitter and an optional
//! narrow triangular kink, which is what the quality heuristic is sensitive to.

use std::hash::{DefaultHasher, Hash, Hasher};

use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Normal;

use crate::domain::{Curve, CurvePoint};
use crate::error::AppError;

/// Temperature grid start (°C).
pub const T_START: f64 = 30.0;
/// Temperature grid end (°C).
pub const T_END: f64 = 800.0;

const ONSET: f64 = 420.0;
const STEP_WIDTH: f64 = 30.0;
const MASS_LOSS: f64 = 60.0;

/// Kink centre as a fraction of the grid, and its half-width in points.
const KINK_POSITION: f64 = 0.7;
const KINK_HALF_POINTS: usize = 3;

/// Parameters of one synthetic replicate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReplicateSpec {
    pub points: usize,
    /// Standard deviation of the additive y jitter (mass %).
    pub noise: f64,
    /// Peak height of the triangular kink (0 disables it).
    pub kink: f64,
    /// Horizontal shift of the mass-loss step (°C), to make candidates differ in shape.
    pub shift: f64,
}

impl ReplicateSpec {
    pub fn new(points: usize, noise: f64) -> Self {
        Self {
            points,
            noise,
            kink: 0.0,
            shift: 0.0,
        }
    }
}

/// Noise-free mass-loss profile at temperature `t`.
pub fn tga_profile(t: f64, shift: f64) -> f64 {
    100.0 - MASS_LOSS / (1.0 + (-(t - ONSET - shift) / STEP_WIDTH).exp())
}

/// Generate one replicate curve. The same `(sample_id, spec, seed)` always
/// yields the same curve.
pub fn generate_replicate(sample_id: i64, name: &str, spec: &ReplicateSpec, seed: u64) -> Result<Curve, AppError> {
    if spec.points < 2 {
        return Err(AppError::new(2, "Replicate needs at least 2 points."));
    }
    if !(spec.noise.is_finite() && spec.noise >= 0.0) {
        return Err(AppError::new(2, "Noise level must be a finite, non-negative number."));
    }
    if !(spec.kink.is_finite() && spec.shift.is_finite()) {
        return Err(AppError::new(2, "Invalid kink/shift settings."));
    }

    let mut rng = StdRng::seed_from_u64(replicate_seed(sample_id, seed));
    let normal = Normal::new(0.0, spec.noise)
        .map_err(|e| AppError::new(4, format!("Noise distribution error: {e}")))?;

    let n = spec.points;
    let step = (T_END - T_START) / (n as f64 - 1.0);
    let kink_center = (KINK_POSITION * (n - 1) as f64).round() as usize;

    let points = (0..n)
        .map(|i| {
            let t = T_START + i as f64 * step;
            let jitter = if spec.noise > 0.0 { normal.sample(&mut rng) } else { 0.0 };
            CurvePoint::new(t, tga_profile(t, spec.shift) + jitter + kink_offset(i, kink_center, spec.kink))
        })
        .collect();

    Ok(Curve::new(sample_id, name, points))
}

fn kink_offset(i: usize, center: usize, height: f64) -> f64 {
    let d = i.abs_diff(center);
    if height == 0.0 || d > KINK_HALF_POINTS {
        return 0.0;
    }
    height * (1.0 - d as f64 / (KINK_HALF_POINTS as f64 + 1.0))
}

/// Mix the sample id into the user seed so replicates in one run differ.
fn replicate_seed(sample_id: i64, seed: u64) -> u64 {
    let mut hasher = DefaultHasher::new();
    seed.hash(&mut hasher);
    sample_id.hash(&mut hasher);
    hasher.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_is_monotone_mass_loss() {
        let lo = tga_profile(T_START, 0.0);
        let mid = tga_profile(ONSET, 0.0);
        let hi = tga_profile(T_END, 0.0);
        assert!(lo > 99.0, "start mass {lo}");
        assert!((mid - 70.0).abs() < 1e-9, "mid mass {mid}");
        assert!(hi < 41.0, "end mass {hi}");
    }

    #[test]
    fn same_seed_is_reproducible() {
        let spec = ReplicateSpec::new(100, 0.2);
        let a = generate_replicate(1, "a", &spec, 42).unwrap();
        let b = generate_replicate(1, "a", &spec, 42).unwrap();
        let c = generate_replicate(2, "c", &spec, 42).unwrap();
        assert_eq!(a, b);
        assert_ne!(a.ys(), c.ys());
        assert!(a.points.iter().zip(&c.points).all(|(p, q)| p.x == q.x));
    }

    #[test]
    fn kink_only_touches_a_few_points() {
        let flat = ReplicateSpec::new(101, 0.0);
        let kinked = ReplicateSpec { kink: 2.0, ..flat };
        let a = generate_replicate(1, "a", &flat, 7).unwrap();
        let b = generate_replicate(1, "a", &kinked, 7).unwrap();
        let touched = a.ys().iter().zip(b.ys()).filter(|(x, y)| (*x - y).abs() > 0.0).count();
        assert_eq!(touched, 2 * KINK_HALF_POINTS + 1);
    }

    #[test]
    fn rejects_bad_settings() {
        assert!(generate_replicate(1, "a", &ReplicateSpec::new(1, 0.1), 0).is_err());
        assert!(generate_replicate(1, "a", &ReplicateSpec::new(10, -0.1), 0).is_err());
    }
}
