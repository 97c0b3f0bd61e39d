//! Six-limb body state
//!
//! Aggregate health is the product rule `floor(100 × Π hp_i / 100)`: a single
//! limb at 50 leaves the player at 50, two limbs at 50 leave 25.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::injury::curve::logistic;
use crate::injury::limb::{Limb, LimbKind};
use crate::injury::outcome::roll;
use crate::injury::profile::{UsePenalty, LEG_FALL};

/// What the player is doing this tick, as far as broken limbs care
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Activity {
    /// Trigger or spade held
    pub acting: bool,
    pub moving: bool,
    pub sprinting: bool,
}

/// State transitions caused by one application of damage
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InjuryReport {
    /// The hit limb was not bleeding before and is now
    pub started_bleeding: bool,
    /// The limb was whole before and is now broken
    pub new_fracture: Option<LimbKind>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    limbs: [Limb; 6],
}

impl Default for Body {
    fn default() -> Self {
        Self {
            limbs: LimbKind::ALL.map(Limb::new),
        }
    }
}

impl Body {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn limb(&self, kind: LimbKind) -> &Limb {
        &self.limbs[kind.index()]
    }

    pub fn limb_mut(&mut self, kind: LimbKind) -> &mut Limb {
        &mut self.limbs[kind.index()]
    }

    pub fn limbs(&self) -> impl Iterator<Item = &Limb> {
        self.limbs.iter()
    }

    pub fn limbs_mut(&mut self) -> impl Iterator<Item = &mut Limb> {
        self.limbs.iter_mut()
    }

    /// Aggregate health, 0..=100
    pub fn health(&self) -> u8 {
        let product: f64 = self.limbs.iter().map(|l| l.hp / 100.0).product();
        // 0.7 * 0.7 must floor to 49, not 48
        (100.0 * product + 1e-9).floor().clamp(0.0, 100.0) as u8
    }

    pub fn bleeding(&self) -> bool {
        self.limbs.iter().any(Limb::bleeding)
    }

    /// No broken, unsplinted arm
    pub fn can_work(&self) -> bool {
        !self.limbs.iter().any(|l| l.kind.is_arm() && l.impaired())
    }

    pub fn arm_fractured(&self) -> bool {
        self.limbs.iter().any(|l| l.kind.is_arm() && l.fractured)
    }

    /// Apply damage and OR the wound flags into the limb
    pub fn apply(
        &mut self,
        kind: LimbKind,
        damage: f64,
        venous: bool,
        arterial: bool,
        fractured: bool,
    ) -> InjuryReport {
        let limb = self.limb_mut(kind);
        let was_bleeding = limb.bleeding();
        let was_fractured = limb.fractured;

        limb.hit(damage);
        limb.venous |= venous;
        limb.arterial |= arterial;
        limb.fractured |= fractured;

        InjuryReport {
            started_bleeding: !was_bleeding && limb.bleeding(),
            new_fracture: (fractured && !was_fractured).then_some(kind),
        }
    }

    /// Continuous blood loss over `dt` seconds
    pub fn update(&mut self, dt: f64) {
        if !(dt > 0.0) {
            return;
        }

        for limb in &mut self.limbs {
            let profile = limb.kind.profile();
            if limb.arterial {
                limb.hit(profile.arterial_rate * dt);
            }
            if limb.venous {
                limb.hit(profile.venous_rate * dt);
            }
        }
    }

    /// Damage from using broken, unsplinted limbs over `dt` seconds
    pub fn apply_penalties(&mut self, activity: Activity, dt: f64) {
        if !(dt > 0.0) {
            return;
        }

        for limb in self.limbs.iter_mut().filter(|l| l.impaired()) {
            match limb.kind.profile().penalty {
                UsePenalty::Action { rate } if activity.acting => limb.hit(rate * dt),
                UsePenalty::Movement { walk, sprint } if activity.moving => {
                    let rate = if activity.sprinting { sprint } else { walk };
                    limb.hit(rate * dt);
                }
                _ => {}
            }
        }
    }

    /// Damage from turning with a broken spine. Returns whether anything changed.
    pub fn rotation_penalty(&mut self) -> bool {
        let torso = self.limb_mut(LimbKind::Torso);
        match torso.kind.profile().penalty {
            UsePenalty::Rotation { damage } if torso.impaired() => {
                torso.hit(damage);
                true
            }
            _ => false,
        }
    }

    /// Both legs take the fall; a single roll may break both. Returns whether they broke.
    pub fn fall<R: Rng + ?Sized>(&mut self, damage: f64, rng: &mut R) -> bool {
        if !(damage > 0.0) {
            return false;
        }

        for kind in [LimbKind::LegLeft, LimbKind::LegRight] {
            self.limb_mut(kind).hit(damage);
        }

        let broke = roll(rng, logistic(LEG_FALL.at(damage)));
        if broke {
            for kind in [LimbKind::LegLeft, LimbKind::LegRight] {
                self.limb_mut(kind).fractured = true;
            }
        }
        broke
    }

    /// Clear venous bleeding on the first limb that has it
    pub fn bandage(&mut self) -> Option<LimbKind> {
        let limb = self.limbs.iter_mut().find(|l| l.venous)?;
        limb.venous = false;
        Some(limb.kind)
    }

    /// Clear arterial bleeding on the first limb that has it
    pub fn tourniquet(&mut self) -> Option<LimbKind> {
        let limb = self.limbs.iter_mut().find(|l| l.arterial)?;
        limb.arterial = false;
        Some(limb.kind)
    }

    /// Splint the first broken, unsplinted limb
    pub fn splint(&mut self) -> Option<LimbKind> {
        let limb = self.limbs.iter_mut().find(|l| l.impaired())?;
        limb.splinted = true;
        Some(limb.kind)
    }

    /// Resupply: splint every fracture and stop all bleeding
    pub fn patch_up(&mut self) {
        for limb in &mut self.limbs {
            if limb.fractured {
                limb.splinted = true;
            }
            limb.venous = false;
            limb.arterial = false;
        }
    }

    pub fn reset(&mut self) {
        self.limbs.iter_mut().for_each(Limb::reset);
    }
}
