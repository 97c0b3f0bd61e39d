//! Tick scheduler - per-step continuous effects
//!
//! Order per living player is fixed: bleeding, use penalties, weapon timers,
//! then health propagation and the playable-volume check. Due world timers run
//! before any player, feature handlers after all of them.

use crate::core::types::{PlayerId, Seconds};
use crate::session::{KillCategory, Tool};
use crate::simulation::world::{CombatWorld, WorldEvent};
use crate::world::Notification;

impl CombatWorld {
    /// Advance the world to `now`
    pub fn run_tick(&mut self, now: Seconds) {
        self.fragments.refill();

        for (_, event) in self.timers_mut().drain_due(now) {
            match event {
                WorldEvent::BeltDetonation { player } => self.detonate_belt(player, now),
            }
        }

        for id in self.living() {
            self.tick_session(id, now);
        }

        self.dispatch_tick(now);
    }

    fn tick_session(&mut self, id: PlayerId, now: Seconds) {
        let Some(session) = self.session_mut(id).filter(|s| s.alive) else {
            return;
        };

        let dt = now - session.last_hp_update;
        session.last_hp_update = now;
        session.body.update(dt);
        let activity = session.activity();
        session.body.apply_penalties(activity, dt);

        let mut outgoing = Vec::new();
        let mut firing = false;
        if session.tool == Tool::Weapon {
            let update = session.weapon.update(now);
            if update.reloaded {
                let ammo = session.weapon.status();
                tracing::debug!("{} reloaded: {}/{}", session.name, ammo.clip, ammo.reserve);
                outgoing.push(Notification::Reloaded { player: id, ammo });
            }
            firing = session.weapon.trigger_held();
        }

        for notification in outgoing {
            self.send(notification);
        }
        if firing {
            // gating failures are routine while the trigger is held
            let _ = self.fire(id, now);
        }

        self.sync_health(id, None, KillCategory::Melee, now);

        let outside = self
            .session(id)
            .is_some_and(|s| s.alive && !self.config.arena.contains(s.position));
        if outside {
            tracing::debug!("Player {:?} left the playable volume", id);
            self.kill(id, None, KillCategory::Fall, now);
        }
    }

    /// Run ticks every `step` seconds from `start` through `end`
    pub fn run_until(&mut self, start: Seconds, end: Seconds, step: Seconds) -> Seconds {
        let mut now = start;
        if !(step > 0.0) {
            return now;
        }
        while now + step <= end + f64::EPSILON {
            now += step;
            self.run_tick(now);
        }
        now
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::CombatConfig;
    use crate::core::types::TeamId;
    use crate::injury::LimbKind;
    use crate::session::InputState;
    use crate::weapon::WeaponKind;
    use glam::DVec3;

    fn world() -> CombatWorld {
        let mut world = CombatWorld::open_field(CombatConfig::default());
        world.spawn(PlayerId(1), "red", TeamId(0), WeaponKind::Rifle, DVec3::new(10.0, 10.0, 50.0), 0.0);
        world.spawn(PlayerId(2), "blue", TeamId(1), WeaponKind::Shotgun, DVec3::new(40.0, 10.0, 50.0), 0.0);
        world.drain_notifications();
        world
    }

    #[test]
    fn test_bleeding_lowers_health() {
        let mut world = world();
        world.apply_hit(PlayerId(1), LimbKind::Torso, 0.0, true, false, false, None, KillCategory::Weapon, 0.0);
        world.run_tick(1.0);
        let hp = world.health(PlayerId(1)).unwrap();
        assert!(hp < 100);
        assert!(world
            .notifications()
            .iter()
            .any(|n| matches!(n, Notification::HealthChanged { player: PlayerId(1), .. })));
    }

    #[test]
    fn test_bleed_out_kills() {
        let mut world = world();
        world.apply_hit(PlayerId(1), LimbKind::Torso, 0.0, false, true, false, None, KillCategory::Weapon, 0.0);
        let mut now = 0.0;
        while world.is_alive(PlayerId(1)) && now < 600.0 {
            now += 1.0;
            world.run_tick(now);
        }
        assert!(!world.is_alive(PlayerId(1)));
    }

    #[test]
    fn test_healthy_player_sends_nothing() {
        let mut world = world();
        world.run_tick(1.0);
        assert!(world.notifications().is_empty());
    }

    #[test]
    fn test_leaving_arena_kills() {
        let mut world = world();
        world.set_position(PlayerId(2), DVec3::new(-50.0, 10.0, 50.0));
        world.run_tick(0.1);
        assert!(!world.is_alive(PlayerId(2)));
        assert!(world
            .notifications()
            .iter()
            .any(|n| matches!(n, Notification::Killed { victim: PlayerId(2), category: KillCategory::Fall, .. })));
    }

    #[test]
    fn test_reload_completes_on_tick() {
        let mut world = world();
        assert!(!world.reload(PlayerId(2), 0.0));
        world.fire(PlayerId(2), 1.0).unwrap();
        assert!(world.reload(PlayerId(2), 1.0));
        world.run_tick(1.2);
        assert_eq!(world.ammo(PlayerId(2)).unwrap().clip, 5);
        world.run_tick(1.6);
        assert_eq!(world.ammo(PlayerId(2)).unwrap().clip, 6);
        assert!(world
            .notifications()
            .iter()
            .any(|n| matches!(n, Notification::Reloaded { player: PlayerId(2), .. })));
    }

    #[test]
    fn test_held_trigger_fires_automatically() {
        let mut world = world();
        let input = InputState {
            primary_fire: true,
            ..InputState::default()
        };
        world.set_input(PlayerId(1), input, 0.0);
        world.run_until(0.0, 2.0, 0.25);
        // one shot per half second: 0.25, 0.75, 1.25, 1.75
        assert_eq!(world.ammo(PlayerId(1)).unwrap().clip, 6);
    }

    #[test]
    fn test_run_until_rejects_zero_step() {
        let mut world = world();
        assert_eq!(world.run_until(0.0, 5.0, 0.0), 0.0);
    }
}
