//! The combat world and everything that drives it

pub mod blasts;
pub mod combat;
pub mod handlers;
pub mod tick;
pub mod world;

pub use combat::LEGS_BROKEN_WARNING;
pub use handlers::{default_handlers, CommandReply, FeatureHandler, HitContext, HitVerdict};
pub use world::{CombatWorld, WorldEvent, BLEEDING_WARNING};
