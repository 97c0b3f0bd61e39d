//! A living player's combat state

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::core::config::CombatConfig;
use crate::core::types::{PlayerId, Position, Seconds, TeamId};
use crate::injury::{Activity, Body};
use crate::session::items::Inventory;
use crate::session::kill::Tool;
use crate::weapon::{WeaponKind, WeaponState};
use crate::world::TraceTarget;

/// Height of a standing player's eye above the soles
pub const EYE_HEIGHT: f64 = 2.3;

/// Movement and button state reported by the client
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputState {
    pub moving: bool,
    pub sprinting: bool,
    pub crouching: bool,
    pub primary_fire: bool,
    pub secondary_fire: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombatSession {
    pub id: PlayerId,
    pub name: String,
    pub team: TeamId,
    pub position: Position,
    pub orientation: Position,
    pub input: InputState,
    pub tool: Tool,
    pub body: Body,
    pub weapon: WeaponState,
    pub inventory: Inventory,
    /// Last health value sent to the client
    pub hp: u8,
    pub alive: bool,
    pub last_sprint: Option<Seconds>,
    pub last_tool_update: Option<Seconds>,
    pub last_hp_update: Seconds,
}

impl CombatSession {
    pub fn new(id: PlayerId, name: &str, team: TeamId, weapon: WeaponKind, now: Seconds) -> Self {
        Self {
            id,
            name: name.to_string(),
            team,
            position: DVec3::ZERO,
            orientation: DVec3::X,
            input: InputState::default(),
            tool: Tool::Weapon,
            body: Body::new(),
            weapon: WeaponState::new(weapon),
            inventory: Inventory::new(),
            hp: 100,
            alive: false,
            last_sprint: None,
            last_tool_update: None,
            last_hp_update: now,
        }
    }

    /// Fresh body, weapon and timers at `position`
    pub fn respawn(&mut self, position: Position, now: Seconds) {
        self.position = position;
        self.input = InputState::default();
        self.tool = Tool::Weapon;
        self.body.reset();
        self.weapon.reset();
        self.inventory.clear();
        self.hp = 100;
        self.alive = true;
        self.last_sprint = None;
        self.last_tool_update = None;
        self.last_hp_update = now;
    }

    /// Sprinting, or stopped sprinting or switched tools too recently to use them
    pub fn is_penalized(&self, now: Seconds, config: &CombatConfig) -> bool {
        let recent = |since: Option<Seconds>, window: Seconds| since.is_some_and(|t| now - t < window);

        self.input.sprinting
            || recent(self.last_sprint, config.sprint_cooldown)
            || recent(self.last_tool_update, config.tool_switch_cooldown)
    }

    /// Arms are fit for tools, grenades and the spade
    pub fn can_work(&self) -> bool {
        self.body.can_work()
    }

    pub fn set_sprint(&mut self, sprinting: bool, now: Seconds) {
        if self.input.sprinting && !sprinting {
            self.last_sprint = Some(now);
        }
        self.input.sprinting = sprinting;
    }

    /// Switch tools. Refused with a broken arm.
    pub fn set_tool(&mut self, tool: Tool, now: Seconds) -> bool {
        if self.body.arm_fractured() {
            return false;
        }
        if tool != self.tool {
            if self.tool == Tool::Weapon {
                self.weapon.cancel_reload();
                self.weapon.set_trigger(false);
            }
            self.tool = tool;
            self.last_tool_update = Some(now);
        }
        true
    }

    pub fn activity(&self) -> Activity {
        Activity {
            acting: self.input.primary_fire,
            moving: self.input.moving,
            sprinting: self.input.sprinting,
        }
    }

    pub fn trace_target(&self) -> TraceTarget {
        TraceTarget {
            id: self.id,
            position: self.position,
            orientation: self.orientation,
            crouching: self.input.crouching,
        }
    }

    pub fn is_teammate(&self, other: &CombatSession) -> bool {
        self.team == other.team
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::injury::LimbKind;

    fn session() -> CombatSession {
        let mut s = CombatSession::new(PlayerId(1), "alice", TeamId(0), WeaponKind::Rifle, 0.0);
        s.respawn(DVec3::new(10.0, 10.0, 50.0), 0.0);
        s
    }

    #[test]
    fn test_sprint_penalty_window() {
        let config = CombatConfig::default();
        let mut s = session();
        assert!(!s.is_penalized(0.0, &config));

        s.set_sprint(true, 1.0);
        assert!(s.is_penalized(1.0, &config));
        s.set_sprint(false, 2.0);
        assert!(s.is_penalized(2.4, &config));
        assert!(!s.is_penalized(2.5, &config));
    }

    #[test]
    fn test_tool_switch_penalty() {
        let config = CombatConfig::default();
        let mut s = session();
        assert!(s.set_tool(Tool::Spade, 3.0));
        assert!(s.is_penalized(3.2, &config));
        assert!(!s.is_penalized(3.6, &config));
    }

    #[test]
    fn test_broken_arm_blocks_tool_switch() {
        let mut s = session();
        s.body.apply(LimbKind::ArmRight, 10.0, false, false, true);
        assert!(!s.can_work());
        assert!(!s.set_tool(Tool::Spade, 1.0));
        assert_eq!(s.tool, Tool::Weapon);
    }

    #[test]
    fn test_respawn_resets() {
        let mut s = session();
        s.body.apply(LimbKind::Head, 60.0, true, false, false);
        s.weapon.try_fire(0.0, false).unwrap();
        s.alive = false;
        s.respawn(DVec3::ZERO, 5.0);
        assert!(s.alive);
        assert_eq!(s.body.health(), 100);
        assert_eq!(s.weapon.current(), 10);
        assert_eq!(s.last_hp_update, 5.0);
    }
}
