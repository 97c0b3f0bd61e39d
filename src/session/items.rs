//! Inventory and consumable medical items

use serde::{Deserialize, Serialize};

use crate::core::types::{ItemId, ItemIdAllocator};
use crate::weapon::{GrenadeCartridge, GrenadeKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    Bandage,
    Tourniquet,
    Splint,
    GrenadeCartridge(GrenadeKind),
    Landmine,
    Charge,
    Detonator,
}

impl ItemKind {
    pub fn name(self) -> &'static str {
        match self {
            ItemKind::Bandage => "Bandage",
            ItemKind::Tourniquet => "Tourniquet",
            ItemKind::Splint => "Splint",
            ItemKind::GrenadeCartridge(kind) => kind.name(),
            ItemKind::Landmine => "Landmine",
            ItemKind::Charge => "Charge",
            ItemKind::Detonator => "Detonator",
        }
    }

    /// Mass in kg
    pub fn mass(self) -> f64 {
        match self {
            ItemKind::Bandage => 0.250,
            ItemKind::Tourniquet => 0.050,
            ItemKind::Splint => 0.160,
            ItemKind::GrenadeCartridge(GrenadeKind::Grenade) => 0.230,
            ItemKind::GrenadeCartridge(GrenadeKind::Flashbang) => 0.200,
            ItemKind::Landmine => 0.550,
            ItemKind::Charge => 0.700,
            ItemKind::Detonator => 0.150,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub kind: ItemKind,
}

impl From<GrenadeCartridge> for Item {
    fn from(cartridge: GrenadeCartridge) -> Self {
        Item {
            id: cartridge.id,
            kind: ItemKind::GrenadeCartridge(cartridge.kind),
        }
    }
}

/// Standard issue on spawn and refill
pub const MEDICAL_KIT: [(ItemKind, u32); 3] = [
    (ItemKind::Bandage, 3),
    (ItemKind::Tourniquet, 2),
    (ItemKind::Splint, 1),
];

/// Cartridges issued with an underbarrel launcher
pub const LAUNCHER_KIT: [(ItemKind, u32); 2] = [
    (ItemKind::GrenadeCartridge(GrenadeKind::Grenade), 2),
    (ItemKind::GrenadeCartridge(GrenadeKind::Flashbang), 1),
];

/// Mines every player carries when explosives are enabled
pub const SAPPER_KIT: [(ItemKind, u32); 1] = [(ItemKind::Landmine, 2)];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Inventory {
    items: Vec<Item>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, item: Item) {
        self.items.push(item);
    }

    /// Create and add fresh items
    pub fn issue(&mut self, kit: &[(ItemKind, u32)], ids: &mut ItemIdAllocator) {
        for &(kind, count) in kit {
            for _ in 0..count {
                self.items.push(Item {
                    id: ids.allocate(),
                    kind,
                });
            }
        }
    }

    /// Remove and return the first item of this kind
    pub fn take(&mut self, kind: ItemKind) -> Option<Item> {
        let index = self.items.iter().position(|i| i.kind == kind)?;
        Some(self.items.remove(index))
    }

    pub fn has(&self, kind: ItemKind) -> bool {
        self.items.iter().any(|i| i.kind == kind)
    }

    pub fn count(&self, kind: ItemKind) -> usize {
        self.items.iter().filter(|i| i.kind == kind).count()
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn mass(&self) -> f64 {
        self.items.iter().map(|i| i.kind.mass()).sum()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}
