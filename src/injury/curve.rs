//! Logistic calibration curves
//!
//! A curve is pinned by two calibration points `(x, p)`. Interpolation happens
//! in logit space against `ln x`, so the curve is strictly increasing in `x`
//! whenever the second point has the higher probability. Callers feed the
//! result through [`logistic`].

use serde::{Deserialize, Serialize};

/// Standard logistic function
pub fn logistic(t: f64) -> f64 {
    1.0 / (1.0 + (-t).exp())
}

/// Inverse of [`logistic`]
pub fn logit(p: f64) -> f64 {
    (p / (1.0 - p)).ln()
}

/// Two-point calibration in logit space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Curve {
    slope: f64,
    intercept: f64,
}

impl Curve {
    /// Curve through `(x1, p1)` and `(x2, p2)`; needs `0 < x1 < x2` and `0 < p < 1`
    pub const fn calibrated(x1: f64, p1: f64, x2: f64, p2: f64) -> Calibration {
        Calibration { x1, p1, x2, p2 }
    }

    /// Logit value at stimulus `x`. Non-positive stimulus maps to -∞.
    pub fn at(&self, x: f64) -> f64 {
        if !(x > 0.0) {
            return f64::NEG_INFINITY;
        }
        self.slope * x.ln() + self.intercept
    }

    /// Probability at stimulus `x`
    pub fn probability(&self, x: f64) -> f64 {
        logistic(self.at(x))
    }
}

/// Calibration points, kept in constant tables and turned into a [`Curve`] on use
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Calibration {
    pub x1: f64,
    pub p1: f64,
    pub x2: f64,
    pub p2: f64,
}

impl Calibration {
    pub fn curve(&self) -> Curve {
        let (l1, l2) = (logit(self.p1), logit(self.p2));
        let (u1, u2) = (self.x1.ln(), self.x2.ln());
        let slope = (l2 - l1) / (u2 - u1);
        Curve {
            slope,
            intercept: l1 - slope * u1,
        }
    }

    /// Shortcut for `self.curve().at(x)`
    pub fn at(&self, x: f64) -> f64 {
        self.curve().at(x)
    }
}
