//! Physiological injury model
//!
//! Delivered energy becomes damage, bleeding and fractures on one of six limbs.

pub mod body;
pub mod curve;
pub mod limb;
pub mod outcome;
pub mod profile;

pub use body::{Activity, Body, InjuryReport};
pub use curve::{logistic, Calibration, Curve};
pub use limb::{Limb, LimbKind};
pub use outcome::{resolve_hit, roll, HitOutcome};
pub use profile::{LimbProfile, UsePenalty};
