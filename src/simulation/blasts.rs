//! Explosion resolution
//!
//! Every living player with line of sight inside the outer radius takes
//! falloff damage on a random limb with venous bleeding. Fragments are then
//! traced within the per-tick budget.

use glam::DVec3;
use rand::seq::SliceRandom;

use crate::ballistics::energy_at_impact;
use crate::blast::{fragments, victims, BlastEvent, BlastSource};
use crate::core::types::{PlayerId, Position, Seconds};
use crate::injury::LimbKind;
use crate::session::KillCategory;
use crate::simulation::world::CombatWorld;
use crate::weapon::GrenadeKind;
use crate::world::{grenade_zone, Impact, Notification, ProjectileTracer, Terrain, Visibility};

/// Grenades only dig inside the map volume
const DIG_MAX_XY: f64 = 512.0;
const DIG_MAX_Z: f64 = 63.0;

fn inside_map(origin: Position) -> bool {
    (0.0..=DIG_MAX_XY).contains(&origin.x)
        && (0.0..=DIG_MAX_XY).contains(&origin.y)
        && (0.0..=DIG_MAX_Z).contains(&origin.z)
}

impl CombatWorld {
    /// Resolve one explosion against every living player
    pub fn detonate(&mut self, event: BlastEvent, now: Seconds) {
        tracing::debug!(
            "{:?} blast at {:?} ({} / {})",
            event.source,
            event.origin,
            event.radii.inner,
            event.radii.outer
        );
        self.send(Notification::Explosion {
            owner: event.owner,
            origin: event.origin,
            inner: event.radii.inner,
            outer: event.radii.outer,
        });

        if event.source.digs() {
            self.dig(event.origin, event.owner, now);
        }

        let targets: Vec<(PlayerId, Position)> = self
            .living()
            .into_iter()
            .filter_map(|id| self.session(id).map(|s| (id, s.position)))
            .collect();
        let hurt = victims(&targets, self.arena(), event.origin, event.radii);

        for victim in hurt {
            let limb = LimbKind::ALL
                .choose(self.rng_mut())
                .copied()
                .unwrap_or(LimbKind::Torso);
            self.apply_hit(
                victim.player,
                limb,
                victim.damage,
                true,
                false,
                false,
                event.owner,
                KillCategory::Grenade,
                now,
            );
        }

        self.throw_fragments(event, now);
        self.dispatch_explosion(event.origin, now);
    }

    /// Blow out the 3×3×3 block zone around the origin
    fn dig(&mut self, origin: Position, owner: Option<PlayerId>, now: Seconds) {
        if !inside_map(origin) {
            return;
        }
        let center = origin.floor().as_ivec3();
        for block in grenade_zone(center) {
            if self.arena().is_destructible(block) {
                self.destroy_block(block, owner, now);
            }
        }
    }

    fn throw_fragments(&mut self, event: BlastEvent, now: Seconds) {
        let count = self.fragments.take(self.config.fragments_per_blast);
        if count < self.config.fragments_per_blast {
            tracing::debug!(
                "Fragment budget exhausted, dropping {}",
                self.config.fragments_per_blast - count
            );
        }

        let spawned = fragments::spawn(count, self.rng_mut());
        let targets = self.trace_targets();

        for fragment in spawned {
            let impact = self.arena().trace(
                None,
                event.origin,
                fragment.direction,
                fragments::FRAGMENT_RANGE,
                &targets,
            );
            if let Some(Impact::Player { target, limb, point }) = impact {
                let energy = energy_at_impact(&fragment.round, event.origin, point);
                self.on_projectile_impact(
                    event.owner,
                    target,
                    limb.index(),
                    energy,
                    fragment.round.area(),
                    true,
                    now,
                );
            }
        }
    }

    /// The physics engine reports where a thrown or launched grenade went off
    pub fn on_grenade_detonation(
        &mut self,
        owner: Option<PlayerId>,
        kind: GrenadeKind,
        point: Position,
        now: Seconds,
    ) {
        match kind {
            GrenadeKind::Grenade => {
                let event = BlastEvent::new(BlastSource::Grenade, point, owner, &self.config);
                self.detonate(event, now);
            }
            GrenadeKind::Flashbang => self.flash(owner, point),
        }
    }

    /// Blind everyone who can see the flash; nobody is hurt
    pub fn flash(&mut self, owner: Option<PlayerId>, origin: Position) {
        let outer = self.config.grenade.outer;
        let blinded: Vec<PlayerId> = self
            .living()
            .into_iter()
            .filter(|id| {
                self.session(*id).is_some_and(|s| {
                    s.position.distance(origin) < outer && self.arena().can_see(s.position, origin)
                })
            })
            .collect();

        tracing::debug!("Flashbang from {:?} blinded {} players", owner, blinded.len());
        for player in blinded {
            self.send(Notification::Flash { player, origin });
        }
    }

    /// Explosive belt goes off at the wearer's position
    pub fn detonate_belt(&mut self, player: PlayerId, now: Seconds) {
        let Some(position) = self.session(player).filter(|s| s.alive).map(|s| s.position) else {
            tracing::debug!("Belt of {:?} fizzled", player);
            return;
        };
        let event = BlastEvent::new(BlastSource::Kamikaze, position, Some(player), &self.config);
        self.detonate(event, now);
    }

    /// Direction-free helper for tests and tools: a grenade resting at `origin`
    pub fn grenade_at(&mut self, owner: Option<PlayerId>, origin: DVec3, now: Seconds) {
        self.on_grenade_detonation(owner, GrenadeKind::Grenade, origin, now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::CombatConfig;
    use crate::core::types::TeamId;
    use crate::weapon::WeaponKind;

    fn world() -> CombatWorld {
        let config = CombatConfig {
            fragments_per_blast: 0,
            ..CombatConfig::default()
        };
        let mut world = CombatWorld::open_field(config);
        world.spawn(PlayerId(1), "thrower", TeamId(0), WeaponKind::Rifle, DVec3::new(100.0, 100.0, 50.0), 0.0);
        world.spawn(PlayerId(2), "near", TeamId(1), WeaponKind::Rifle, DVec3::new(102.0, 100.0, 50.0), 0.0);
        world.spawn(PlayerId(3), "far", TeamId(1), WeaponKind::Rifle, DVec3::new(200.0, 100.0, 50.0), 0.0);
        world.drain_notifications();
        world
    }

    #[test]
    fn test_inner_radius_kills() {
        let mut world = world();
        world.grenade_at(Some(PlayerId(1)), DVec3::new(100.0, 100.0, 50.0), 1.0);
        assert!(!world.is_alive(PlayerId(2)));
        assert!(world.is_alive(PlayerId(3)));
        assert!(world
            .notifications()
            .iter()
            .any(|n| matches!(n, Notification::Killed { victim: PlayerId(2), category: KillCategory::Grenade, .. })));
    }

    #[test]
    fn test_own_grenade_hurts_thrower() {
        let mut world = world();
        world.grenade_at(Some(PlayerId(1)), DVec3::new(100.0, 100.0, 50.0), 1.0);
        assert!(!world.is_alive(PlayerId(1)));
    }

    #[test]
    fn test_blast_forces_venous_bleeding() {
        let mut world = world();
        world.grenade_at(None, DVec3::new(120.0, 100.0, 50.0), 1.0);
        let near = world.session(PlayerId(2)).unwrap();
        assert!(near.alive);
        assert!(near.body.bleeding());
        assert!(near.hp < 100);
    }

    #[test]
    fn test_grenade_digs_inside_map() {
        let mut world = world();
        world.grenade_at(None, DVec3::new(300.0, 300.0, 60.5), 1.0);
        let dug = world
            .notifications()
            .iter()
            .filter(|n| matches!(n, Notification::BlockDestroyed { .. }))
            .count();
        // ground starts at z = 60: layers 60 and 61 of the zone
        assert_eq!(dug, 18);
    }

    #[test]
    fn test_no_digging_outside_map() {
        let mut world = world();
        world.grenade_at(None, DVec3::new(-5.0, 300.0, 60.5), 1.0);
        assert!(!world
            .notifications()
            .iter()
            .any(|n| matches!(n, Notification::BlockDestroyed { .. })));
    }

    #[test]
    fn test_flashbang_only_blinds() {
        let mut world = world();
        world.on_grenade_detonation(Some(PlayerId(1)), GrenadeKind::Flashbang, DVec3::new(101.0, 100.0, 50.0), 1.0);
        let flashed = world
            .notifications()
            .iter()
            .filter(|n| matches!(n, Notification::Flash { .. }))
            .count();
        assert_eq!(flashed, 2);
        assert_eq!(world.health(PlayerId(2)), Some(100));
    }

    #[test]
    fn test_fragments_respect_budget() {
        let config = CombatConfig {
            fragments_per_blast: 14,
            fragment_budget: 20,
            ..CombatConfig::default()
        };
        let mut world = CombatWorld::open_field(config);
        world.grenade_at(None, DVec3::new(10.0, 10.0, 50.0), 0.0);
        assert_eq!(world.fragments.remaining(), 6);
        world.grenade_at(None, DVec3::new(10.0, 10.0, 50.0), 0.0);
        assert_eq!(world.fragments.remaining(), 0);
    }
}
