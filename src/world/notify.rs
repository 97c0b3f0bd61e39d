//! Outgoing semantic notifications
//!
//! The network layer turns these into packets; nothing here knows the wire format.

use glam::IVec3;
use serde::Serialize;

use crate::core::types::{PlayerId, Position};
use crate::session::kill::{KillCategory, Tool};
use crate::weapon::{AmmoStatus, GrenadeKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MessageKind {
    Status,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum Notification {
    HealthChanged {
        player: PlayerId,
        hp: u8,
        source: Option<PlayerId>,
        category: KillCategory,
    },
    Killed {
        victim: PlayerId,
        killer: Option<PlayerId>,
        category: KillCategory,
    },
    AmmoChanged {
        player: PlayerId,
        ammo: AmmoStatus,
    },
    Reloaded {
        player: PlayerId,
        ammo: AmmoStatus,
    },
    Message {
        player: PlayerId,
        kind: MessageKind,
        text: String,
    },
    /// The client must switch back to this tool
    ToolReset {
        player: PlayerId,
        tool: Tool,
    },
    ProjectileLaunched {
        owner: PlayerId,
        kind: GrenadeKind,
        origin: Position,
        velocity: Position,
    },
    Explosion {
        owner: Option<PlayerId>,
        origin: Position,
        inner: f64,
        outer: f64,
    },
    Flash {
        player: PlayerId,
        origin: Position,
    },
    BlockDestroyed {
        block: IVec3,
        by: Option<PlayerId>,
    },
}

impl Notification {
    pub fn status(player: PlayerId, text: impl Into<String>) -> Self {
        Notification::Message {
            player,
            kind: MessageKind::Status,
            text: text.into(),
        }
    }

    pub fn warning(player: PlayerId, text: impl Into<String>) -> Self {
        Notification::Message {
            player,
            kind: MessageKind::Warning,
            text: text.into(),
        }
    }

    pub fn error(player: PlayerId, text: impl Into<String>) -> Self {
        Notification::Message {
            player,
            kind: MessageKind::Error,
            text: text.into(),
        }
    }
}

pub trait NotificationSink {
    fn send(&mut self, notification: Notification);
}

/// Sink that collects everything for later inspection
#[derive(Debug, Clone, Default)]
pub struct Outbox {
    pending: Vec<Notification>,
}

impl Outbox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn drain(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.pending)
    }

    pub fn pending(&self) -> &[Notification] {
        &self.pending
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl NotificationSink for Outbox {
    fn send(&mut self, notification: Notification) {
        self.pending.push(notification);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outbox_drains() {
        let mut outbox = Outbox::new();
        outbox.send(Notification::status(PlayerId(1), "hello"));
        assert_eq!(outbox.len(), 1);
        assert_eq!(outbox.drain().len(), 1);
        assert!(outbox.is_empty());
    }

    #[test]
    fn test_notification_json_is_tagged() {
        let json = serde_json::to_string(&Notification::Killed {
            victim: PlayerId(3),
            killer: None,
            category: KillCategory::Fall,
        })
        .unwrap();
        assert!(json.contains("\"type\":\"Killed\""));
        assert!(json.contains("\"Fall\""));
    }
}
