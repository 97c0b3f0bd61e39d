//! Projectile physical parameters
//!
//! A `Round` is immutable once built. The drag coefficient, cross-sectional
//! area and velocity decay constant are derived at construction.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::ballistics::constants::{AIR_DENSITY, DRAG_FACTOR};

/// A cartridge's projectile as it leaves the muzzle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Round {
    pub name: String,
    /// Rated muzzle speed (m/s)
    pub muzzle: f64,
    /// Projectile mass (kg)
    pub mass: f64,
    /// Pellets per discharge
    pub pellets: u32,
    /// Standard deviation of muzzle speed as a fraction of `muzzle`
    pub deviation: f64,
    /// Standard deviation of the off-axis tilt (radians)
    pub spread: f64,
    /// Explodes on impact
    pub grenade: bool,

    drag: f64,
    area: f64,
    k: f64,
}

impl Round {
    /// Build a round from its ballistic coefficient and caliber (m)
    pub fn new(name: &str, muzzle: f64, mass: f64, ballistic: f64, caliber: f64) -> Self {
        let drag = (DRAG_FACTOR * mass) / (ballistic * caliber * caliber);
        Self::with_drag_coefficient(name, muzzle, mass, drag, caliber)
    }

    /// Build a round whose drag coefficient is already known (spherical shot)
    pub fn with_drag_coefficient(
        name: &str,
        muzzle: f64,
        mass: f64,
        drag: f64,
        diameter: f64,
    ) -> Self {
        let area = PI / 4.0 * diameter * diameter;
        Self::with_area(name, muzzle, mass, drag, area)
    }

    /// Build a round from drag coefficient and frontal area (m²)
    pub fn with_area(name: &str, muzzle: f64, mass: f64, drag: f64, area: f64) -> Self {
        let k = (AIR_DENSITY * drag * area) / (2.0 * mass);
        Self {
            name: name.to_string(),
            muzzle,
            mass,
            pellets: 1,
            deviation: 0.0,
            spread: 0.0,
            grenade: false,
            drag,
            area,
            k,
        }
    }

    pub fn with_pellets(mut self, pellets: u32) -> Self {
        self.pellets = pellets.max(1);
        self
    }

    pub fn with_deviation(mut self, deviation: f64) -> Self {
        self.deviation = deviation.max(0.0);
        self
    }

    pub fn with_spread(mut self, spread: f64) -> Self {
        self.spread = spread.abs();
        self
    }

    pub fn explosive(mut self) -> Self {
        self.grenade = true;
        self
    }

    pub fn drag(&self) -> f64 {
        self.drag
    }

    /// Cross-sectional area (m²)
    pub fn area(&self) -> f64 {
        self.area
    }

    /// Velocity decay constant (1/m)
    pub fn k(&self) -> f64 {
        self.k
    }
}
