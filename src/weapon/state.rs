//! Per-player firearm state machine
//!
//! Firing and reloading are independent: a box-magazine weapon cannot fire
//! while a magazine swap is pending, a tubular one can and firing cancels the
//! pending shell. Reload completion is a one-shot [`Deferred`] polled from
//! [`WeaponState::update`].

use serde::{Deserialize, Serialize};

use crate::ballistics::Cartridge;
use crate::core::error::{self, MilsimError};
use crate::core::timer::Deferred;
use crate::core::types::Seconds;
use crate::weapon::catalog::WeaponKind;
use crate::weapon::container::{AmmoContainer, AmmoPack};
use crate::weapon::underbarrel::GrenadeLauncher;

/// Why a trigger pull did not fire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FireBlocked {
    /// Dead, or the weapon is not in hand
    Unavailable,
    Empty,
    Reloading,
    Cooldown,
    Penalized,
}

/// Result of advancing the weapon clock
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WeaponUpdate {
    /// A reload step completed and changed the container
    pub reloaded: bool,
    /// A reload was started (automatically)
    pub reload_started: bool,
}

/// Clip and reserve as shown on the HUD
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmmoStatus {
    pub clip: u32,
    pub reserve: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeaponState {
    pub kind: WeaponKind,
    container: AmmoContainer,
    last_shot: Option<Seconds>,
    reload: Option<Deferred>,
    trigger: bool,
    pub underbarrel: Option<GrenadeLauncher>,
}

impl WeaponState {
    pub fn new(kind: WeaponKind) -> Self {
        Self {
            kind,
            container: kind.default_container(),
            last_shot: None,
            reload: None,
            trigger: false,
            underbarrel: None,
        }
    }

    /// Start from a non-standard loadout
    pub fn with_container(mut self, container: AmmoContainer) -> Self {
        self.container = container;
        self
    }

    pub fn container(&self) -> &AmmoContainer {
        &self.container
    }

    /// The cartridge the next shot fires
    pub fn chambered(&self) -> Option<Cartridge> {
        self.container.chambered()
    }

    pub fn is_empty(&self) -> bool {
        self.container.is_empty()
    }

    pub fn current(&self) -> u32 {
        self.container.current()
    }

    pub fn reserved(&self) -> u32 {
        self.container.reserved()
    }

    pub fn status(&self) -> AmmoStatus {
        AmmoStatus {
            clip: self.current(),
            reserve: self.reserved(),
        }
    }

    pub fn is_reloading(&self) -> bool {
        self.reload.as_ref().is_some_and(Deferred::is_pending)
    }

    pub fn trigger_held(&self) -> bool {
        self.trigger
    }

    /// Press or release the trigger. Pressing a tubular weapon's trigger cancels the top-up.
    pub fn set_trigger(&mut self, held: bool) -> bool {
        let cancelled = held && !self.trigger && self.container.is_continuous() && self.cancel_reload();
        self.trigger = held;
        cancelled
    }

    /// Check every gate and, on success, eject one round and stamp the shot time
    pub fn try_fire(&mut self, now: Seconds, penalized: bool) -> Result<Cartridge, FireBlocked> {
        if self.container.is_empty() {
            return Err(FireBlocked::Empty);
        }
        if self.is_reloading() && !self.container.is_continuous() {
            return Err(FireBlocked::Reloading);
        }
        if let Some(last) = self.last_shot {
            if now - last < self.kind.delay() {
                return Err(FireBlocked::Cooldown);
            }
        }
        if penalized {
            return Err(FireBlocked::Penalized);
        }

        self.cancel_reload();
        let cartridge = self.container.eject().ok_or(FireBlocked::Empty)?;
        self.last_shot = Some(now);
        Ok(cartridge)
    }

    /// Hand the player extra ammunition for this weapon
    pub fn stow(&mut self, pack: AmmoPack) -> error::Result<()> {
        let cartridge = pack.cartridge();
        if !self.kind.accepts(cartridge) {
            return Err(MilsimError::InvalidInput(format!(
                "{} does not fit the {}",
                cartridge.name(),
                self.kind.name()
            )));
        }
        if !self.container.stow(pack) {
            return Err(MilsimError::InvalidInput(format!(
                "The {} cannot be loaded like that",
                self.kind.name()
            )));
        }
        Ok(())
    }

    /// Begin a reload step. Returns false if one is pending or nothing could change.
    pub fn start_reload(&mut self, now: Seconds) -> bool {
        if self.is_reloading() || !self.container.can_reload() {
            return false;
        }
        self.reload = Some(Deferred::schedule(now, self.kind.reload_time()));
        tracing::debug!("{} reload started at {:.2}", self.kind.name(), now);
        true
    }

    /// Cancel a pending reload. Safe to call any number of times.
    pub fn cancel_reload(&mut self) -> bool {
        match self.reload.take() {
            Some(mut pending) => pending.cancel(),
            None => false,
        }
    }

    /// Advance timers: complete a due reload, schedule the next shell or an automatic reload
    pub fn update(&mut self, now: Seconds) -> WeaponUpdate {
        let mut result = WeaponUpdate::default();

        let due = self.reload.as_mut().is_some_and(|r| r.poll(now));
        if due {
            self.reload = None;
            result.reloaded = self.container.reload();

            if self.container.is_continuous() && !self.trigger && self.container.can_reload() {
                result.reload_started = self.start_reload(now);
            }
        }

        if self.container.is_empty() && !self.is_reloading() && !self.trigger_blocks_reload() {
            result.reload_started |= self.start_reload(now);
        }

        result
    }

    // a held trigger on a tubular weapon would cancel the shell straight away
    fn trigger_blocks_reload(&self) -> bool {
        self.trigger && self.container.is_continuous()
    }

    /// Reissue the catalog loadout and drop all timers
    pub fn reset(&mut self) {
        self.cancel_reload();
        self.container = self.kind.default_container();
        self.last_shot = None;
        self.trigger = false;
    }

    /// Refill ammunition without touching the trigger or shot clock
    pub fn restock(&mut self) {
        self.cancel_reload();
        self.container = self.kind.default_container();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fire_rate_gating() {
        let mut w = WeaponState::new(WeaponKind::Rifle);
        assert_eq!(w.try_fire(0.0, false), Ok(Cartridge::R762x54));
        assert_eq!(w.try_fire(0.3, false), Err(FireBlocked::Cooldown));
        assert_eq!(w.try_fire(0.5, false), Ok(Cartridge::R762x54));
        assert_eq!(w.current(), 8);
    }

    #[test]
    fn test_penalized_cannot_fire() {
        let mut w = WeaponState::new(WeaponKind::Smg);
        assert_eq!(w.try_fire(0.0, true), Err(FireBlocked::Penalized));
        assert_eq!(w.current(), 30);
    }

    #[test]
    fn test_box_reload_swaps_after_delay() {
        let mut w = WeaponState::new(WeaponKind::Smg);
        let mut t = 0.0;
        while w.try_fire(t, false).is_ok() {
            t += 0.2;
        }
        assert!(w.is_empty());

        let update = w.update(t);
        assert!(update.reload_started);
        assert_eq!(w.try_fire(t + 1.0, false), Err(FireBlocked::Empty));

        assert!(!w.update(t + 2.0).reloaded);
        assert!(w.update(t + 2.5).reloaded);
        assert_eq!(w.current(), 30);
        assert_eq!(w.reserved(), 60);
    }

    #[test]
    fn test_box_cannot_fire_while_reloading() {
        let mut w = WeaponState::new(WeaponKind::Rifle);
        w.try_fire(0.0, false).unwrap();
        assert!(w.start_reload(1.0));
        assert_eq!(w.try_fire(2.0, false), Err(FireBlocked::Reloading));
    }

    #[test]
    fn test_tubular_tops_up_one_shell_at_a_time() {
        let mut w = WeaponState::new(WeaponKind::Shotgun);
        w.try_fire(0.0, false).unwrap();
        w.try_fire(1.0, false).unwrap();
        assert_eq!(w.current(), 4);

        assert!(w.start_reload(1.0));
        let first = w.update(1.5);
        assert!(first.reloaded);
        assert!(first.reload_started);
        assert_eq!(w.current(), 5);

        let second = w.update(2.0);
        assert!(second.reloaded);
        assert!(!second.reload_started);
        assert_eq!(w.current(), 6);
        assert_eq!(w.reserved(), 68);
        assert!(!w.is_reloading());
    }

    #[test]
    fn test_tubular_fire_cancels_top_up() {
        let mut w = WeaponState::new(WeaponKind::Shotgun);
        w.try_fire(0.0, false).unwrap();
        assert!(w.start_reload(0.1));
        assert_eq!(w.try_fire(1.0, false), Ok(Cartridge::Buckshot0000));
        assert!(!w.is_reloading());
        assert!(!w.update(5.0).reloaded);
        assert_eq!(w.current(), 4);
    }

    #[test]
    fn test_tubular_trigger_press_cancels() {
        let mut w = WeaponState::new(WeaponKind::Shotgun);
        w.try_fire(0.0, false).unwrap();
        w.start_reload(0.0);
        assert!(w.set_trigger(true));
        assert!(!w.set_trigger(true));
        assert!(!w.is_reloading());
    }

    #[test]
    fn test_reload_without_reserve_is_noop() {
        let mut w = WeaponState::new(WeaponKind::Rifle);
        w.container = AmmoContainer::box_magazines(Cartridge::R762x54, 10, 1);
        w.try_fire(0.0, false).unwrap();
        assert!(!w.start_reload(1.0));
        assert!(!w.update(10.0).reloaded);
    }

    #[test]
    fn test_cancel_is_idempotent() {
        let mut w = WeaponState::new(WeaponKind::Rifle);
        w.try_fire(0.0, false).unwrap();
        w.start_reload(0.0);
        assert!(w.cancel_reload());
        assert!(!w.cancel_reload());
        assert!(!w.update(10.0).reloaded);
    }

    #[test]
    fn test_stowed_hei_fires_after_reload() {
        let mut w = WeaponState::new(WeaponKind::Rifle);
        w.stow(AmmoPack::Magazine(crate::weapon::Magazine::hei())).unwrap();
        assert_eq!(w.try_fire(0.0, false), Ok(Cartridge::R762x54));

        assert!(w.start_reload(0.0));
        assert!(w.update(2.5).reloaded);
        assert_eq!(w.chambered(), Some(Cartridge::Hei762x54));
        assert_eq!(w.try_fire(3.0, false), Ok(Cartridge::Hei762x54));
        assert_eq!(w.status(), AmmoStatus { clip: 4, reserve: 49 });
    }

    #[test]
    fn test_stow_checks_calibre() {
        let mut w = WeaponState::new(WeaponKind::Smg);
        let refused = w.stow(AmmoPack::Magazine(crate::weapon::Magazine::hei()));
        assert!(matches!(refused, Err(MilsimError::InvalidInput(_))));
        assert_eq!(w.reserved(), 90);
    }

    #[test]
    fn test_reset_restores_loadout() {
        let mut w = WeaponState::new(WeaponKind::Smg);
        w.try_fire(0.0, false).unwrap();
        w.start_reload(0.0);
        w.reset();
        assert!(!w.is_reloading());
        assert_eq!(w.status(), AmmoStatus { clip: 30, reserve: 90 });
    }
}
