//! Per-player combat sessions and what players can do with them

pub mod commands;
pub mod items;
pub mod kill;
pub mod state;

pub use commands::Command;
pub use items::{Inventory, Item, ItemKind, LAUNCHER_KIT, MEDICAL_KIT, SAPPER_KIT};
pub use kill::{KillCategory, Tool};
pub use state::{CombatSession, InputState, EYE_HEIGHT};
