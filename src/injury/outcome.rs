//! Energy → wound resolution

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::injury::curve::logistic;
use crate::injury::limb::LimbKind;

/// What a single impact does to a limb
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct HitOutcome {
    /// Hit points removed from the limb, 0..100
    pub damage: f64,
    pub venous: bool,
    pub arterial: bool,
    pub fractured: bool,
}

impl HitOutcome {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn is_harmless(&self) -> bool {
        self.damage <= 0.0 && !self.venous && !self.arterial && !self.fractured
    }
}

/// Resolve `energy` joules delivered over `area` m² into a wound on `limb`
///
/// Non-positive or non-finite energy yields no wound. Bleeding is decided on
/// energy density; on success it is arterial with the limb's chance, venous
/// otherwise. Fracture is an independent roll on energy.
pub fn resolve_hit<R: Rng + ?Sized>(limb: LimbKind, energy: f64, area: f64, rng: &mut R) -> HitOutcome {
    if !(energy > 0.0) || !energy.is_finite() {
        return HitOutcome::none();
    }

    let profile = limb.profile();
    let damage = 100.0 * logistic(profile.damage.at(energy));

    let density = if area > 0.0 { energy / area } else { 0.0 };
    let bleeding = roll(rng, logistic(profile.bleeding.at(density)));
    let (venous, arterial) = if bleeding {
        let arterial = roll(rng, profile.arterial_chance);
        (!arterial, arterial)
    } else {
        (false, false)
    };

    let fractured = roll(rng, logistic(profile.fracture.at(energy)));

    HitOutcome {
        damage,
        venous,
        arterial,
        fractured,
    }
}

/// Bernoulli trial
pub fn roll<R: Rng + ?Sized>(rng: &mut R, p: f64) -> bool {
    if !(p > 0.0) {
        return false;
    }
    rng.gen::<f64>() < p
}
