//! Ammunition containers
//!
//! Box magazines swap whole on reload. Tubular magazines take one shell at a
//! time from loose boxes and can be fired between insertions. Every round
//! remembers its cartridge, so what leaves the muzzle is whatever was loaded.

use serde::{Deserialize, Serialize};

use crate::ballistics::Cartridge;

/// A detachable box magazine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Magazine {
    pub cartridge: Cartridge,
    pub rounds: u32,
    pub capacity: u32,
}

impl Magazine {
    pub fn full(cartridge: Cartridge, capacity: u32) -> Self {
        Self {
            cartridge,
            rounds: capacity,
            capacity,
        }
    }

    /// Five high-explosive incendiary rifle rounds
    pub fn hei() -> Self {
        Self::full(Cartridge::Hei762x54, 5)
    }

    pub fn is_empty(&self) -> bool {
        self.rounds == 0
    }
}

/// Loose shells of one type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShellBox {
    pub cartridge: Cartridge,
    pub count: u32,
}

/// Ammunition handed to a player outside the weapon
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AmmoPack {
    Magazine(Magazine),
    Shells(ShellBox),
}

impl AmmoPack {
    pub fn cartridge(&self) -> Cartridge {
        match self {
            AmmoPack::Magazine(m) => m.cartridge,
            AmmoPack::Shells(b) => b.cartridge,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AmmoContainer {
    BoxMagazine {
        loaded: Magazine,
        reserve: Vec<Magazine>,
    },
    Tubular {
        /// Last element is chambered next
        tube: Vec<Cartridge>,
        capacity: u32,
        reserve: Vec<ShellBox>,
    },
}

impl AmmoContainer {
    /// `magazines` full box magazines, one of them loaded
    pub fn box_magazines(cartridge: Cartridge, capacity: u32, magazines: u32) -> Self {
        let spare = magazines.saturating_sub(1) as usize;
        AmmoContainer::BoxMagazine {
            loaded: Magazine::full(cartridge, capacity),
            reserve: vec![Magazine::full(cartridge, capacity); spare],
        }
    }

    /// A full tube plus `reserve` loose shells of the same type
    pub fn tubular(cartridge: Cartridge, capacity: u32, reserve: u32) -> Self {
        let reserve = if reserve > 0 {
            vec![ShellBox {
                cartridge,
                count: reserve,
            }]
        } else {
            Vec::new()
        };
        AmmoContainer::Tubular {
            tube: vec![cartridge; capacity as usize],
            capacity,
            reserve,
        }
    }

    /// Rounds ready to fire
    pub fn current(&self) -> u32 {
        match self {
            AmmoContainer::BoxMagazine { loaded, .. } => loaded.rounds,
            AmmoContainer::Tubular { tube, .. } => tube.len() as u32,
        }
    }

    /// Rounds not in the weapon
    pub fn reserved(&self) -> u32 {
        match self {
            AmmoContainer::BoxMagazine { reserve, .. } => reserve.iter().map(|m| m.rounds).sum(),
            AmmoContainer::Tubular { reserve, .. } => reserve.iter().map(|b| b.count).sum(),
        }
    }

    pub fn capacity(&self) -> u32 {
        match self {
            AmmoContainer::BoxMagazine { loaded, .. } => loaded.capacity,
            AmmoContainer::Tubular { capacity, .. } => *capacity,
        }
    }

    /// The round the next shot fires
    pub fn chambered(&self) -> Option<Cartridge> {
        match self {
            AmmoContainer::BoxMagazine { loaded, .. } => (!loaded.is_empty()).then_some(loaded.cartridge),
            AmmoContainer::Tubular { tube, .. } => tube.last().copied(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.current() == 0
    }

    pub fn is_full(&self) -> bool {
        self.current() >= self.capacity()
    }

    /// Firing is allowed while reloading
    pub fn is_continuous(&self) -> bool {
        matches!(self, AmmoContainer::Tubular { .. })
    }

    /// Would a reload change anything?
    pub fn can_reload(&self) -> bool {
        match self {
            AmmoContainer::BoxMagazine { reserve, .. } => reserve.iter().any(|m| !m.is_empty()),
            AmmoContainer::Tubular { .. } => !self.is_full() && self.reserved() > 0,
        }
    }

    /// Remove one round from the chamber
    pub fn eject(&mut self) -> Option<Cartridge> {
        match self {
            AmmoContainer::BoxMagazine { loaded, .. } => {
                if loaded.is_empty() {
                    return None;
                }
                loaded.rounds -= 1;
                Some(loaded.cartridge)
            }
            AmmoContainer::Tubular { tube, .. } => tube.pop(),
        }
    }

    /// Insert one shell from the first non-empty box (tubular only). Returns whether a shell moved.
    pub fn push(&mut self) -> bool {
        if self.is_full() {
            return false;
        }
        let AmmoContainer::Tubular { tube, reserve, .. } = self else {
            return false;
        };
        let Some(shells) = reserve.iter_mut().find(|b| b.count > 0) else {
            return false;
        };
        shells.count -= 1;
        tube.push(shells.cartridge);
        reserve.retain(|b| b.count > 0);
        true
    }

    /// Complete one reload step. Returns whether anything changed.
    ///
    /// Box: the loaded magazine is swapped for the first non-empty reserve
    /// magazine; a partly used one goes back to the pouch, an empty one is
    /// discarded. Tubular: one shell is pushed.
    pub fn reload(&mut self) -> bool {
        match self {
            AmmoContainer::BoxMagazine { loaded, reserve } => {
                let Some(index) = reserve.iter().position(|m| !m.is_empty()) else {
                    return false;
                };
                let fresh = reserve.remove(index);
                let previous = std::mem::replace(loaded, fresh);
                if !previous.is_empty() {
                    reserve.push(previous);
                }
                true
            }
            AmmoContainer::Tubular { .. } => self.push(),
        }
    }

    /// Put ammunition at the front of the reserve so the next reload uses it.
    /// Returns false if the pack does not suit this kind of container.
    pub fn stow(&mut self, pack: AmmoPack) -> bool {
        match (self, pack) {
            (AmmoContainer::BoxMagazine { reserve, .. }, AmmoPack::Magazine(magazine)) => {
                reserve.insert(0, magazine);
                true
            }
            (AmmoContainer::Tubular { reserve, .. }, AmmoPack::Shells(shells)) => {
                if shells.count > 0 {
                    reserve.insert(0, shells);
                }
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_box_counts() {
        let c = AmmoContainer::box_magazines(Cartridge::R762x54, 10, 5);
        assert_eq!(c.current(), 10);
        assert_eq!(c.reserved(), 40);
        assert!(c.is_full());
        assert_eq!(c.chambered(), Some(Cartridge::R762x54));
    }

    #[test]
    fn test_box_swap_on_reload() {
        let mut c = AmmoContainer::box_magazines(Cartridge::Parabellum, 30, 2);
        for _ in 0..30 {
            assert_eq!(c.eject(), Some(Cartridge::Parabellum));
        }
        assert_eq!(c.eject(), None);
        assert!(c.is_empty());
        assert_eq!(c.chambered(), None);

        assert!(c.reload());
        assert_eq!(c.current(), 30);
        assert_eq!(c.reserved(), 0);
        // the empty magazine is gone
        assert!(!c.can_reload());
        assert!(!c.reload());
    }

    #[test]
    fn test_partial_magazine_returns_to_pouch() {
        let mut c = AmmoContainer::box_magazines(Cartridge::R762x54, 10, 2);
        c.eject();
        assert!(c.reload());
        assert_eq!(c.current(), 10);
        assert_eq!(c.reserved(), 9);
    }

    #[test]
    fn test_tubular_single_round() {
        let mut c = AmmoContainer::tubular(Cartridge::Buckshot0000, 6, 2);
        assert!(!c.can_reload());
        c.eject();
        c.eject();
        c.eject();
        assert!(c.reload());
        assert_eq!(c.current(), 4);
        assert_eq!(c.reserved(), 1);
        assert!(c.reload());
        assert!(!c.reload());
        assert_eq!(c.current(), 5);
    }

    #[test]
    fn test_push_on_box_is_noop() {
        let mut c = AmmoContainer::box_magazines(Cartridge::R762x54, 10, 2);
        c.eject();
        assert!(!c.push());
    }

    #[test]
    fn test_stowed_magazine_is_loaded_next() {
        let mut c = AmmoContainer::box_magazines(Cartridge::R762x54, 10, 3);
        assert!(c.stow(AmmoPack::Magazine(Magazine::hei())));
        assert_eq!(c.reserved(), 25);

        assert!(c.reload());
        assert_eq!(c.chambered(), Some(Cartridge::Hei762x54));
        assert_eq!(c.current(), 5);
        // the full magazine went back behind the others
        assert_eq!(c.reserved(), 30);
    }

    #[test]
    fn test_tube_fires_last_loaded_shell_first() {
        let mut c = AmmoContainer::tubular(Cartridge::Buckshot0000, 6, 10);
        c.eject();
        let slugs = ShellBox {
            cartridge: Cartridge::Slug,
            count: 2,
        };
        assert!(c.stow(AmmoPack::Shells(slugs)));
        assert!(c.push());
        assert_eq!(c.chambered(), Some(Cartridge::Slug));
        assert_eq!(c.eject(), Some(Cartridge::Slug));
        assert_eq!(c.eject(), Some(Cartridge::Buckshot0000));
        assert_eq!(c.reserved(), 11);
    }

    #[test]
    fn test_stow_rejects_wrong_shape() {
        let mut tube = AmmoContainer::tubular(Cartridge::Buckshot0000, 6, 10);
        assert!(!tube.stow(AmmoPack::Magazine(Magazine::hei())));

        let mut rifle = AmmoContainer::box_magazines(Cartridge::R762x54, 10, 2);
        let shells = ShellBox {
            cartridge: Cartridge::Slug,
            count: 5,
        };
        assert!(!rifle.stow(AmmoPack::Shells(shells)));
        assert_eq!(rifle.reserved(), 10);
    }
}
