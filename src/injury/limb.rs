//! Body regions and their per-limb state

use serde::{Deserialize, Serialize};

/// One of the six independently tracked body regions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LimbKind {
    Head,
    Torso,
    ArmLeft,
    ArmRight,
    LegLeft,
    LegRight,
}

impl LimbKind {
    pub const ALL: [LimbKind; 6] = [
        LimbKind::Head,
        LimbKind::Torso,
        LimbKind::ArmLeft,
        LimbKind::ArmRight,
        LimbKind::LegLeft,
        LimbKind::LegRight,
    ];

    /// Wire index used by hit reports
    pub fn index(self) -> usize {
        match self {
            LimbKind::Head => 0,
            LimbKind::Torso => 1,
            LimbKind::ArmLeft => 2,
            LimbKind::ArmRight => 3,
            LimbKind::LegLeft => 4,
            LimbKind::LegRight => 5,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn is_arm(self) -> bool {
        matches!(self, LimbKind::ArmLeft | LimbKind::ArmRight)
    }

    pub fn is_leg(self) -> bool {
        matches!(self, LimbKind::LegLeft | LimbKind::LegRight)
    }

    pub fn name(self) -> &'static str {
        match self {
            LimbKind::Head => "head",
            LimbKind::Torso => "torso",
            LimbKind::ArmLeft => "left arm",
            LimbKind::ArmRight => "right arm",
            LimbKind::LegLeft => "left leg",
            LimbKind::LegRight => "right leg",
        }
    }

    /// Short label for status lines
    pub fn abbrev(self) -> &'static str {
        match self {
            LimbKind::Head => "h",
            LimbKind::Torso => "t",
            LimbKind::ArmLeft => "la",
            LimbKind::ArmRight => "ra",
            LimbKind::LegLeft => "ll",
            LimbKind::LegRight => "rl",
        }
    }

    /// Chat line sent when this limb breaks
    pub fn fracture_warning(self) -> &'static str {
        match self {
            LimbKind::Head => "You broke your neck.",
            LimbKind::Torso => "You broke your spine.",
            LimbKind::ArmLeft => "You broke your left arm.",
            LimbKind::ArmRight => "You broke your right arm.",
            LimbKind::LegLeft => "You broke your left leg.",
            LimbKind::LegRight => "You broke your right leg.",
        }
    }
}

/// Mutable state of a single limb
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Limb {
    pub kind: LimbKind,
    /// 0..=100, never increases until reset
    pub hp: f64,
    pub venous: bool,
    pub arterial: bool,
    pub fractured: bool,
    pub splinted: bool,
}

impl Limb {
    pub fn new(kind: LimbKind) -> Self {
        Self {
            kind,
            hp: 100.0,
            venous: false,
            arterial: false,
            fractured: false,
            splinted: false,
        }
    }

    /// Subtract damage, clamping at zero. Non-positive and non-finite values are ignored.
    pub fn hit(&mut self, damage: f64) {
        if damage > 0.0 && damage.is_finite() {
            self.hp = (self.hp - damage).max(0.0);
        }
    }

    pub fn bleeding(&self) -> bool {
        self.venous || self.arterial
    }

    /// Broken and not splinted
    pub fn impaired(&self) -> bool {
        self.fractured && !self.splinted
    }

    pub fn reset(&mut self) {
        *self = Self::new(self.kind);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_roundtrip() {
        for kind in LimbKind::ALL {
            assert_eq!(LimbKind::from_index(kind.index()), Some(kind));
        }
        assert_eq!(LimbKind::from_index(6), None);
    }

    #[test]
    fn test_hp_clamps_at_zero() {
        let mut limb = Limb::new(LimbKind::Torso);
        limb.hit(250.0);
        assert_eq!(limb.hp, 0.0);
    }

    #[test]
    fn test_negative_damage_ignored() {
        let mut limb = Limb::new(LimbKind::Head);
        limb.hit(-10.0);
        limb.hit(f64::NAN);
        assert_eq!(limb.hp, 100.0);
    }

    #[test]
    fn test_splint_clears_impairment() {
        let mut limb = Limb::new(LimbKind::LegLeft);
        limb.fractured = true;
        assert!(limb.impaired());
        limb.splinted = true;
        assert!(!limb.impaired());
        assert!(limb.fractured);
    }
}
