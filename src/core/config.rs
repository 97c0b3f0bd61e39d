//! Combat configuration with documented constants
//!
//! Everything a server operator may want to tune lives here. The defaults match
//! the values the game was balanced around; `data/combat.toml` overrides them.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::{MilsimError, Result};
use crate::core::types::Bounds;

/// Configuration for the combat core
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatConfig {
    /// Seed for the world RNG (dispersion, injury rolls, blast limbs)
    pub seed: u64,

    /// Whether teammates can hurt each other
    pub friendly_fire: bool,

    /// Players leaving this volume are killed on the next tick
    pub arena: Bounds,

    // === PENALTY WINDOWS ===
    /// Seconds after the sprint key is released before a weapon can be used
    pub sprint_cooldown: f64,

    /// Seconds after a tool switch before the new tool can be used
    pub tool_switch_cooldown: f64,

    // === BLASTS ===
    pub grenade: BlastRadii,
    pub high_explosive: BlastRadii,
    pub kamikaze: KamikazeConfig,

    /// Fragments spawned per explosion
    pub fragments_per_blast: u32,

    /// Fragments traced per tick across all explosions; extras are dropped
    pub fragment_budget: u32,

    /// Minimum melee damage; actual damage is uniform in [this, 100)
    pub melee_min_damage: f64,
}

/// Inner (certain death) and outer (safe) radius of an explosion
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BlastRadii {
    pub inner: f64,
    pub outer: f64,
}

impl BlastRadii {
    pub const fn new(inner: f64, outer: f64) -> Self {
        Self { inner, outer }
    }
}

/// Explosive belt settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KamikazeConfig {
    pub radii: BlastRadii,

    /// Longest accepted fuse in seconds
    pub max_fuse: f64,

    /// Seconds between two detonations of the same player
    pub cooldown: f64,
}

impl Default for KamikazeConfig {
    fn default() -> Self {
        Self {
            radii: BlastRadii::new(17.0, 40.0),
            max_fuse: 60.0,
            cooldown: 15.0,
        }
    }
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self {
            seed: 0x6d69_6c73_696d,
            friendly_fire: false,
            arena: Bounds::default(),

            sprint_cooldown: 0.5,
            tool_switch_cooldown: 0.5,

            grenade: BlastRadii::new(4.0, 30.0),
            high_explosive: BlastRadii::new(4.0, 20.0),
            kamikaze: KamikazeConfig::default(),

            fragments_per_blast: 14,
            fragment_budget: 64,

            melee_min_damage: 50.0,
        }
    }
}

impl CombatConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a TOML document; missing keys keep their defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: CombatConfig = toml::from_str(content)?;
        config.validate().map_err(MilsimError::Config)?;
        Ok(config)
    }

    /// Load and validate a TOML config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        tracing::info!("Loaded combat config from {}", path.display());
        Ok(config)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> std::result::Result<(), String> {
        for (name, radii) in [
            ("grenade", self.grenade),
            ("high_explosive", self.high_explosive),
            ("kamikaze", self.kamikaze.radii),
        ] {
            if !(radii.inner >= 0.0 && radii.inner < radii.outer && radii.outer.is_finite()) {
                return Err(format!(
                    "{} radii must satisfy 0 <= inner < outer (got {} / {})",
                    name, radii.inner, radii.outer
                ));
            }
        }

        if !(self.kamikaze.max_fuse.is_finite() && self.kamikaze.max_fuse >= 0.0) {
            return Err("kamikaze.max_fuse must be a non-negative number".into());
        }

        if self.sprint_cooldown < 0.0 || self.tool_switch_cooldown < 0.0 {
            return Err("Penalty windows must be non-negative".into());
        }

        if !(0.0..=100.0).contains(&self.melee_min_damage) {
            return Err(format!(
                "melee_min_damage ({}) must be within 0..=100",
                self.melee_min_damage
            ));
        }

        if self.arena.min.cmpgt(self.arena.max).any() {
            return Err("arena.min must not exceed arena.max".into());
        }

        Ok(())
    }
}
