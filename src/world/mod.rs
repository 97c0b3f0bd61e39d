//! Collaborators the combat core talks to: map, physics, network

pub mod notify;
pub mod open_field;
pub mod terrain;
pub mod tracer;
pub mod visibility;

pub use notify::{MessageKind, Notification, NotificationSink, Outbox};
pub use open_field::OpenField;
pub use terrain::{grenade_zone, Terrain};
pub use tracer::{Impact, ProjectileTracer, TraceTarget};
pub use visibility::Visibility;

/// Everything the combat core asks of the map
pub trait Arena: Visibility + ProjectileTracer + Terrain {}

impl<T: Visibility + ProjectileTracer + Terrain> Arena for T {}
