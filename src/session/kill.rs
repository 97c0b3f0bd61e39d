use serde::{Deserialize, Serialize};

/// How a player died (or would die) from a given hit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KillCategory {
    Weapon,
    Headshot,
    Melee,
    Grenade,
    Fall,
    TeamChange,
    ClassChange,
}

impl KillCategory {
    /// Melee ignores the friendly-fire setting
    pub fn bypasses_friendly_fire(self) -> bool {
        self == KillCategory::Melee
    }
}

/// The item a player is holding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Tool {
    Spade,
    Block,
    #[default]
    Weapon,
    Grenade,
}
