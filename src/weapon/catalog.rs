//! Firearm catalog

use serde::{Deserialize, Serialize};

use crate::ballistics::Cartridge;
use crate::core::types::Seconds;
use crate::weapon::container::AmmoContainer;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeaponKind {
    Rifle,
    Smg,
    Shotgun,
}

impl WeaponKind {
    pub const ALL: [WeaponKind; 3] = [WeaponKind::Rifle, WeaponKind::Smg, WeaponKind::Shotgun];

    pub fn name(self) -> &'static str {
        match self {
            WeaponKind::Rifle => "Rifle",
            WeaponKind::Smg => "SMG",
            WeaponKind::Shotgun => "Shotgun",
        }
    }

    /// Minimum time between two shots
    pub fn delay(self) -> Seconds {
        match self {
            WeaponKind::Rifle => 0.50,
            WeaponKind::Smg => 0.11,
            WeaponKind::Shotgun => 1.00,
        }
    }

    /// Time for one reload step (a magazine swap or a single shell)
    pub fn reload_time(self) -> Seconds {
        match self {
            WeaponKind::Rifle | WeaponKind::Smg => 2.5,
            WeaponKind::Shotgun => 0.5,
        }
    }

    /// Cartridge issued at spawn and on refill
    pub fn cartridge(self) -> Cartridge {
        match self {
            WeaponKind::Rifle => Cartridge::R762x54,
            WeaponKind::Smg => Cartridge::Parabellum,
            WeaponKind::Shotgun => Cartridge::Buckshot0000,
        }
    }

    /// Can this weapon chamber `cartridge`?
    pub fn accepts(self, cartridge: Cartridge) -> bool {
        match self {
            WeaponKind::Rifle => matches!(cartridge, Cartridge::R762x54 | Cartridge::Hei762x54),
            WeaponKind::Smg => cartridge == Cartridge::Parabellum,
            WeaponKind::Shotgun => cartridge.is_shotshell(),
        }
    }

    /// Container as issued at spawn and on refill
    pub fn default_container(self) -> AmmoContainer {
        let cartridge = self.cartridge();
        match self {
            WeaponKind::Rifle => AmmoContainer::box_magazines(cartridge, 10, 5),
            WeaponKind::Smg => AmmoContainer::box_magazines(cartridge, 30, 4),
            WeaponKind::Shotgun => AmmoContainer::tubular(cartridge, 6, 70),
        }
    }
}
