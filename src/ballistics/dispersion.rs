//! Per-shot randomness: muzzle speed variation and pellet cone spread

use std::f64::consts::TAU;

use glam::DVec3;
use rand::Rng;
use serde::Serialize;

use crate::ballistics::round::Round;

/// Standard normal sample (Box–Muller)
pub fn standard_normal<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    // 1 - gen() lies in (0, 1], keeping ln finite
    let u1: f64 = 1.0 - rng.gen::<f64>();
    let u2: f64 = rng.gen();
    (-2.0 * u1.ln()).sqrt() * (TAU * u2).cos()
}

/// Normal sample with the given mean and standard deviation
pub fn gaussian<R: Rng + ?Sized>(rng: &mut R, mean: f64, sigma: f64) -> f64 {
    if sigma <= 0.0 {
        return mean;
    }
    mean + sigma * standard_normal(rng)
}

/// Sample a muzzle speed for one pellet. Never negative.
pub fn sample_muzzle<R: Rng + ?Sized>(round: &Round, rng: &mut R) -> f64 {
    gaussian(rng, round.muzzle, round.muzzle * round.deviation).max(0.0)
}

/// Tilt `direction` off-axis by `|N(0, sigma)|` with a uniform roll
pub fn cone_spread<R: Rng + ?Sized>(direction: DVec3, sigma: f64, rng: &mut R) -> DVec3 {
    let axis = direction.normalize_or_zero();
    if axis == DVec3::ZERO || sigma <= 0.0 {
        return axis;
    }

    let tilt = gaussian(rng, 0.0, sigma).abs();
    let roll = rng.gen_range(0.0..TAU);

    let (u, v) = axis.any_orthonormal_pair();
    let off_axis = u * roll.cos() + v * roll.sin();
    (axis * tilt.cos() + off_axis * tilt.sin()).normalize()
}

/// One pellet of a discharge
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Pellet {
    pub speed: f64,
    pub direction: DVec3,
}

/// Everything that left the barrel on one trigger pull
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Discharge {
    pub pellets: Vec<Pellet>,
}

impl Discharge {
    /// Sample `round.pellets` pellets aimed along `aim`
    pub fn sample<R: Rng + ?Sized>(round: &Round, aim: DVec3, rng: &mut R) -> Self {
        let pellets = (0..round.pellets)
            .map(|_| Pellet {
                speed: sample_muzzle(round, rng),
                direction: cone_spread(aim, round.spread, rng),
            })
            .collect();
        Self { pellets }
    }

    pub fn len(&self) -> usize {
        self.pellets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pellets.is_empty()
    }
}
