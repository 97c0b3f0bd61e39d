//! Underbarrel grenade launcher

use serde::{Deserialize, Serialize};

use crate::core::types::ItemId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GrenadeKind {
    Grenade,
    Flashbang,
}

impl GrenadeKind {
    pub fn name(self) -> &'static str {
        match self {
            GrenadeKind::Grenade => "Grenade",
            GrenadeKind::Flashbang => "Flashbang",
        }
    }

    /// Launch speed (m/s)
    pub fn muzzle(self) -> f64 {
        120.0
    }
}

/// A 40 mm cartridge that can sit in the launcher or in the inventory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrenadeCartridge {
    pub id: ItemId,
    pub kind: GrenadeKind,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrenadeLauncher {
    loaded: Option<GrenadeCartridge>,
}

impl GrenadeLauncher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a cartridge, handing back whatever was loaded before
    pub fn load(&mut self, cartridge: GrenadeCartridge) -> Option<GrenadeCartridge> {
        self.loaded.replace(cartridge)
    }

    /// Take the cartridge out for launch
    pub fn fire(&mut self) -> Option<GrenadeCartridge> {
        self.loaded.take()
    }

    pub fn loaded(&self) -> Option<&GrenadeCartridge> {
        self.loaded.as_ref()
    }

    pub fn name(&self) -> String {
        match &self.loaded {
            Some(c) => format!("Grenade Launcher + {}", c.kind.name()),
            None => "Grenade Launcher".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cartridge(id: u64, kind: GrenadeKind) -> GrenadeCartridge {
        GrenadeCartridge { id: ItemId(id), kind }
    }

    #[test]
    fn test_load_returns_previous() {
        let mut gl = GrenadeLauncher::new();
        assert_eq!(gl.load(cartridge(1, GrenadeKind::Grenade)), None);
        let previous = gl.load(cartridge(2, GrenadeKind::Flashbang));
        assert_eq!(previous, Some(cartridge(1, GrenadeKind::Grenade)));
        assert_eq!(gl.name(), "Grenade Launcher + Flashbang");
    }

    #[test]
    fn test_fire_empties() {
        let mut gl = GrenadeLauncher::new();
        gl.load(cartridge(1, GrenadeKind::Grenade));
        assert!(gl.fire().is_some());
        assert!(gl.fire().is_none());
    }
}
