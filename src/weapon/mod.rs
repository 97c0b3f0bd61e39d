//! Firearms: ammunition containers, catalog, fire/reload state machine

pub mod catalog;
pub mod container;
pub mod state;
pub mod underbarrel;

pub use catalog::WeaponKind;
pub use container::{AmmoContainer, AmmoPack, Magazine, ShellBox};
pub use state::{AmmoStatus, FireBlocked, WeaponState, WeaponUpdate};
pub use underbarrel::{GrenadeCartridge, GrenadeKind, GrenadeLauncher};
