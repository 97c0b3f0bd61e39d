//! Projectile tracing seam
//!
//! The physics engine that flies bullets lives outside this crate. It receives
//! an immutable snapshot of every living player and reports the first thing
//! the projectile struck.

use glam::IVec3;
use serde::{Deserialize, Serialize};

use crate::core::types::{PlayerId, Position};
use crate::injury::LimbKind;

/// Read-only view of a potential target
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TraceTarget {
    pub id: PlayerId,
    /// Eye position
    pub position: Position,
    /// Facing direction
    pub orientation: Position,
    pub crouching: bool,
}

/// First thing a projectile struck
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Impact {
    Player {
        target: PlayerId,
        limb: LimbKind,
        point: Position,
    },
    Block {
        block: IVec3,
        point: Position,
    },
}

impl Impact {
    pub fn point(&self) -> Position {
        match self {
            Impact::Player { point, .. } | Impact::Block { point, .. } => *point,
        }
    }
}

pub trait ProjectileTracer {
    /// Trace from `origin` along `direction` for at most `max` metres.
    /// `shooter` is never hit by its own projectile.
    fn trace(
        &self,
        shooter: Option<PlayerId>,
        origin: Position,
        direction: Position,
        max: f64,
        targets: &[TraceTarget],
    ) -> Option<Impact>;
}
