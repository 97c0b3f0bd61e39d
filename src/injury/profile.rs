//! Per-limb calibration constants
//!
//! Damage and fracture curves take delivered energy in joules. Bleeding curves
//! take energy density in J/m². Rates are hit points per second.

use crate::injury::curve::{Calibration, Curve};
use crate::injury::limb::LimbKind;

/// Penalty applied while a broken limb is used without a splint
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UsePenalty {
    None,
    /// Arm: per second while the trigger or spade is held
    Action { rate: f64 },
    /// Leg: per second while moving, higher while sprinting
    Movement { walk: f64, sprint: f64 },
    /// Torso: per orientation update
    Rotation { damage: f64 },
}

/// Everything that distinguishes one limb from another
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LimbProfile {
    pub damage: Calibration,
    pub bleeding: Calibration,
    pub fracture: Calibration,
    /// Chance that a bleeding wound is arterial
    pub arterial_chance: f64,
    pub venous_rate: f64,
    pub arterial_rate: f64,
    pub penalty: UsePenalty,
}

const HEAD: LimbProfile = LimbProfile {
    damage: Curve::calibrated(40.0, 0.10, 400.0, 0.99),
    bleeding: Curve::calibrated(5e4, 0.10, 5e6, 0.95),
    fracture: Curve::calibrated(50.0, 0.05, 500.0, 0.95),
    arterial_chance: 0.30,
    venous_rate: 0.5,
    arterial_rate: 3.0,
    penalty: UsePenalty::None,
};

const TORSO: LimbProfile = LimbProfile {
    damage: Curve::calibrated(250.0, 0.10, 2500.0, 0.99),
    bleeding: Curve::calibrated(1e5, 0.10, 1e7, 0.95),
    fracture: Curve::calibrated(270.0, 0.05, 2700.0, 0.90),
    arterial_chance: 0.25,
    venous_rate: 0.4,
    arterial_rate: 2.5,
    penalty: UsePenalty::Rotation { damage: 0.5 },
};

const ARM: LimbProfile = LimbProfile {
    damage: Curve::calibrated(370.0, 0.10, 3700.0, 0.99),
    bleeding: Curve::calibrated(8e4, 0.10, 8e6, 0.95),
    fracture: Curve::calibrated(400.0, 0.05, 4000.0, 0.95),
    arterial_chance: 0.20,
    venous_rate: 0.3,
    arterial_rate: 2.0,
    penalty: UsePenalty::Action { rate: 2.0 },
};

const LEG: LimbProfile = LimbProfile {
    damage: Curve::calibrated(420.0, 0.10, 4200.0, 0.99),
    bleeding: Curve::calibrated(1.2e5, 0.10, 1.2e7, 0.95),
    fracture: Curve::calibrated(450.0, 0.05, 4500.0, 0.95),
    arterial_chance: 0.30,
    venous_rate: 0.35,
    arterial_rate: 2.5,
    penalty: UsePenalty::Movement {
        walk: 1.5,
        sprint: 5.0,
    },
};

/// Fracture chance of both legs against fall damage
pub const LEG_FALL: Calibration = Curve::calibrated(10.0, 0.05, 80.0, 0.95);

impl LimbKind {
    pub fn profile(self) -> &'static LimbProfile {
        match self {
            LimbKind::Head => &HEAD,
            LimbKind::Torso => &TORSO,
            LimbKind::ArmLeft | LimbKind::ArmRight => &ARM,
            LimbKind::LegLeft | LimbKind::LegRight => &LEG,
        }
    }
}
