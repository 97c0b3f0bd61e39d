//! Blast fragments
//!
//! Each explosion throws a handful of light, fast fragments upward and
//! outward. Tracing is capped per tick; anything over the cap is dropped.

use std::f64::consts::{FRAC_PI_2, TAU};

use glam::DVec3;
use rand::Rng;

use crate::ballistics::{catalog, Round};

pub const FRAGMENT_MIN_MASS: f64 = 1e-3;
pub const FRAGMENT_MAX_MASS: f64 = 5e-3;
pub const FRAGMENT_MIN_SPEED: f64 = 210.0;
pub const FRAGMENT_MAX_SPEED: f64 = 220.0;

/// Maximum distance a fragment is traced (m)
pub const FRAGMENT_RANGE: f64 = 60.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Fragment {
    pub round: Round,
    /// Unit direction; never points into the ground (z ≤ 0)
    pub direction: DVec3,
}

/// Random direction on the upper hemisphere (z grows downward)
fn hemisphere<R: Rng + ?Sized>(rng: &mut R) -> DVec3 {
    let polar = rng.gen_range(0.0..=FRAC_PI_2);
    let azimuth = rng.gen_range(0.0..TAU);
    DVec3::new(
        polar.sin() * azimuth.cos(),
        polar.sin() * azimuth.sin(),
        -polar.cos(),
    )
}

/// Spawn `count` fragments with random mass, speed and direction
pub fn spawn<R: Rng + ?Sized>(count: u32, rng: &mut R) -> Vec<Fragment> {
    (0..count)
        .map(|_| {
            let mass = rng.gen_range(FRAGMENT_MIN_MASS..=FRAGMENT_MAX_MASS);
            let speed = rng.gen_range(FRAGMENT_MIN_SPEED..=FRAGMENT_MAX_SPEED);
            Fragment {
                round: catalog::fragment(mass, speed),
                direction: hemisphere(rng),
            }
        })
        .collect()
}

/// Per-tick cap on traced fragments
#[derive(Debug, Clone)]
pub struct FragmentBudget {
    limit: u32,
    used: u32,
}

impl FragmentBudget {
    pub fn new(limit: u32) -> Self {
        Self { limit, used: 0 }
    }

    /// Take up to `wanted` slots, returning how many were granted
    pub fn take(&mut self, wanted: u32) -> u32 {
        let granted = wanted.min(self.limit.saturating_sub(self.used));
        self.used += granted;
        granted
    }

    pub fn remaining(&self) -> u32 {
        self.limit.saturating_sub(self.used)
    }

    /// Start a new tick
    pub fn refill(&mut self) {
        self.used = 0;
    }
}
