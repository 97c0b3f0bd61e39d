//! Feature handlers
//!
//! Optional gameplay features hook into the world through this trait. Handlers
//! are registered once at startup and called in registration order. While one
//! callback round runs, the handler list is taken out of the world, so
//! handlers cannot observe each other's callbacks re-entrantly.

pub mod armory;
pub mod explosives;
pub mod kamikaze;
pub mod medical;
pub mod status;

pub use armory::ArmoryHandler;
pub use explosives::ExplosivesHandler;
pub use kamikaze::KamikazeHandler;
pub use medical::MedicalHandler;
pub use status::StatusHandler;

use glam::IVec3;

use crate::core::types::{PlayerId, Position, Seconds};
use crate::injury::LimbKind;
use crate::session::{Command, KillCategory};
use crate::simulation::world::CombatWorld;

/// A hit about to be applied
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitContext {
    pub target: PlayerId,
    pub limb: LimbKind,
    pub damage: f64,
    pub hit_by: Option<PlayerId>,
    pub category: KillCategory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitVerdict {
    Allow,
    Block,
}

/// How a handler answered a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandReply {
    /// Not this handler's command
    Ignored,
    Done,
    Status(String),
    Error(String),
}

pub trait FeatureHandler {
    fn name(&self) -> &'static str;

    fn on_tick(&mut self, _world: &mut CombatWorld, _now: Seconds) {}

    /// Veto a hit before it lands
    fn on_hit(&mut self, _world: &CombatWorld, _hit: &HitContext) -> HitVerdict {
        HitVerdict::Allow
    }

    fn on_command(
        &mut self,
        _world: &mut CombatWorld,
        _player: PlayerId,
        _command: Command,
        _now: Seconds,
    ) -> CommandReply {
        CommandReply::Ignored
    }

    fn on_spawn(&mut self, _world: &mut CombatWorld, _player: PlayerId, _now: Seconds) {}

    /// Death, including the one before a disconnect
    fn on_death(&mut self, _world: &mut CombatWorld, _player: PlayerId, _now: Seconds) {}

    /// The player is about to be removed from the world
    fn on_leave(&mut self, _world: &mut CombatWorld, _player: PlayerId, _now: Seconds) {}

    /// Supplies were restocked after the standard kit
    fn on_refill(&mut self, _world: &mut CombatWorld, _player: PlayerId, _now: Seconds) {}

    /// Something exploded, after its damage was applied
    fn on_explosion(&mut self, _world: &mut CombatWorld, _origin: Position, _now: Seconds) {}

    fn on_block_destroyed(&mut self, _world: &mut CombatWorld, _block: IVec3, _now: Seconds) {}
}

/// The handlers a regular server runs, in order
pub fn default_handlers() -> Vec<Box<dyn FeatureHandler>> {
    vec![
        Box::new(MedicalHandler),
        Box::new(StatusHandler),
        Box::new(ArmoryHandler),
        Box::new(KamikazeHandler::new()),
        Box::new(ExplosivesHandler::new()),
    ]
}
