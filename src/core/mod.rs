pub mod config;
pub mod error;
pub mod timer;
pub mod types;

pub use config::{BlastRadii, CombatConfig, KamikazeConfig};
pub use error::{MilsimError, Result};
pub use timer::{Deferred, DeferredState, TimerHandle, TimerQueue};
pub use types::{Bounds, ItemId, ItemIdAllocator, PlayerId, Position, Seconds, TeamId};
