//! Weighted simple linear regression.
//!
//! LOESS repeatedly solves tiny problems of the form:
//!
//! ```text
//! minimize Σ w_j (y_j - (a + b x_j))^2
//! ```
//!
//! The normal equations are accumulated as the five weighted sums
//! `Sw, Swx, Swy, Swxx, Swxy` and the resulting 2x2 system is solved with
//! nalgebra. When the system is (near) singular we fall back to the weighted
//! mean, i.e. a zero-slope line.

use nalgebra::{Matrix2, Vector2};

/// Determinant magnitude below which the normal equations are treated as singular.
pub const DET_EPS: f64 = 1e-12;

/// Weighted sums of a simple linear regression.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WeightedSums {
    pub sw: f64,
    pub swx: f64,
    pub swy: f64,
    pub swxx: f64,
    pub swxy: f64,
}

impl WeightedSums {
    pub fn add(&mut self, x: f64, y: f64, w: f64) {
        self.sw += w;
        self.swx += w * x;
        self.swy += w * y;
        self.swxx += w * x * x;
        self.swxy += w * x * y;
    }

    pub fn determinant(&self) -> f64 {
        self.sw * self.swxx - self.swx * self.swx
    }
}

/// A fitted line `y = intercept + slope * x`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineFit {
    pub intercept: f64,
    pub slope: f64,
}

impl LineFit {
    pub fn predict(&self, x: f64) -> f64 {
        self.intercept + self.slope * x
    }
}

/// Solve the weighted normal equations.
///
/// Returns `None` only when the total weight is not positive (nothing to fit).
pub fn solve_weighted_line(sums: &WeightedSums) -> Option<LineFit> {
    if !(sums.sw > 0.0) {
        return None;
    }

    if sums.determinant().abs() > DET_EPS {
        let a = Matrix2::new(sums.sw, sums.swx, sums.swx, sums.swxx);
        let rhs = Vector2::new(sums.swy, sums.swxy);
        if let Some(beta) = a.lu().solve(&rhs) {
            if beta.iter().all(|v| v.is_finite()) {
                return Some(LineFit {
                    intercept: beta[0],
                    slope: beta[1],
                });
            }
        }
    }

    Some(LineFit {
        intercept: sums.swy / sums.sw,
        slope: 0.0,
    })
}
