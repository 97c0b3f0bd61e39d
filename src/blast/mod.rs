//! Area-effect explosions

pub mod falloff;
pub mod fragments;

pub use falloff::{damage_at, falloff, victims, BlastVictim};
pub use fragments::{Fragment, FragmentBudget};

use serde::{Deserialize, Serialize};

use crate::core::config::{BlastRadii, CombatConfig};
use crate::core::types::{PlayerId, Position};

/// What blew up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlastSource {
    Grenade,
    HighExplosive,
    Kamikaze,
}

impl BlastSource {
    pub fn radii(self, config: &CombatConfig) -> BlastRadii {
        match self {
            BlastSource::Grenade => config.grenade,
            BlastSource::HighExplosive => config.high_explosive,
            BlastSource::Kamikaze => config.kamikaze.radii,
        }
    }

    /// Grenades and belts also dig; high-explosive rounds do not
    pub fn digs(self) -> bool {
        matches!(self, BlastSource::Grenade | BlastSource::Kamikaze)
    }
}

/// A single explosion, consumed by one resolution
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BlastEvent {
    pub origin: Position,
    pub radii: BlastRadii,
    pub owner: Option<PlayerId>,
    pub source: BlastSource,
}

impl BlastEvent {
    pub fn new(source: BlastSource, origin: Position, owner: Option<PlayerId>, config: &CombatConfig) -> Self {
        Self {
            origin,
            radii: source.radii(config),
            owner,
            source,
        }
    }
}
