//! Player actions: input, firing, impacts, melee, falls, resupply

use glam::DVec3;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::ballistics::constants::{BLOCK_DESTROY_ENERGY, MAX_TRACE_DISTANCE};
use crate::ballistics::{energy_at_speed, Discharge};
use crate::blast::{BlastEvent, BlastSource};
use crate::core::error::{self, MilsimError};
use crate::core::types::{PlayerId, Position, Seconds};
use crate::injury::{resolve_hit, LimbKind};
use crate::session::{InputState, Item, ItemKind, KillCategory, Tool, LAUNCHER_KIT, MEDICAL_KIT};
use crate::simulation::world::CombatWorld;
use crate::weapon::{AmmoPack, FireBlocked, GrenadeCartridge, GrenadeKind};
use crate::world::{Impact, Notification, ProjectileTracer};

pub const LEGS_BROKEN_WARNING: &str = "You broke your legs.";

impl CombatWorld {
    /// Apply the client's movement and button state
    pub fn set_input(&mut self, id: PlayerId, input: InputState, now: Seconds) {
        let Some(session) = self.session_mut(id).filter(|s| s.alive) else {
            return;
        };
        session.set_sprint(input.sprinting, now);
        session.input = input;

        let wielded = session.tool == Tool::Weapon;
        session.weapon.set_trigger(input.primary_fire && wielded);
    }

    pub fn set_position(&mut self, id: PlayerId, position: Position) {
        if let Some(session) = self.session_mut(id).filter(|s| s.alive) {
            session.position = position;
        }
    }

    /// Turning with a broken, unsplinted spine hurts
    pub fn set_orientation(&mut self, id: PlayerId, orientation: Position, now: Seconds) {
        let Some(session) = self.session_mut(id).filter(|s| s.alive) else {
            return;
        };
        session.orientation = orientation;
        if session.body.rotation_penalty() {
            self.sync_health(id, None, KillCategory::Melee, now);
        }
    }

    /// Start a manual reload
    pub fn reload(&mut self, id: PlayerId, now: Seconds) -> bool {
        match self.session_mut(id).filter(|s| s.alive && s.tool == Tool::Weapon) {
            Some(session) => session.weapon.start_reload(now),
            None => false,
        }
    }

    /// Pull the trigger once
    ///
    /// On success one round leaves the container and every pellet is traced
    /// from the shooter's eye along a dispersed direction.
    pub fn fire(&mut self, id: PlayerId, now: Seconds) -> Result<(), FireBlocked> {
        let penalized = match self.session(id) {
            Some(s) if s.alive && s.tool == Tool::Weapon => s.is_penalized(now, &self.config),
            _ => return Err(FireBlocked::Unavailable),
        };
        let Some(session) = self.session_mut(id) else {
            return Err(FireBlocked::Unavailable);
        };
        let cartridge = session.weapon.try_fire(now, penalized)?;

        let origin = session.position;
        let aim = session.orientation;
        let round = cartridge.round();
        let ammo = session.weapon.status();

        self.send(Notification::AmmoChanged { player: id, ammo });

        let discharge = Discharge::sample(&round, aim, self.rng_mut());
        let targets = self.trace_targets();

        for pellet in discharge.pellets {
            let impact = self
                .arena()
                .trace(Some(id), origin, pellet.direction, MAX_TRACE_DISTANCE, &targets);
            let Some(impact) = impact else {
                continue;
            };

            let energy = energy_at_speed(&round, pellet.speed, origin, impact.point());
            match impact {
                Impact::Player { target, limb, .. } => {
                    self.on_projectile_impact(Some(id), target, limb.index(), energy, round.area(), round.grenade, now);
                }
                Impact::Block { block, .. } => {
                    if energy > BLOCK_DESTROY_ENERGY {
                        self.destroy_block(block, Some(id), now);
                    }
                }
            }

            if round.grenade {
                let event = BlastEvent::new(BlastSource::HighExplosive, impact.point(), Some(id), &self.config);
                self.detonate(event, now);
            }
        }

        Ok(())
    }

    /// A projectile reported by the physics engine struck a player
    ///
    /// Explosive projectiles count as grenade kills, head hits as headshots.
    #[allow(clippy::too_many_arguments)]
    pub fn on_projectile_impact(
        &mut self,
        thrower: Option<PlayerId>,
        target: PlayerId,
        limb_index: usize,
        energy: f64,
        area: f64,
        is_grenade: bool,
        now: Seconds,
    ) -> bool {
        let Some(limb) = LimbKind::from_index(limb_index) else {
            tracing::debug!("Impact on unknown limb {} ignored", limb_index);
            return false;
        };

        let outcome = resolve_hit(limb, energy, area, self.rng_mut());
        if outcome.is_harmless() {
            return false;
        }

        let category = if is_grenade {
            KillCategory::Grenade
        } else if limb == LimbKind::Head {
            KillCategory::Headshot
        } else {
            KillCategory::Weapon
        };

        self.apply_hit(
            target,
            limb,
            outcome.damage,
            outcome.venous,
            outcome.arterial,
            outcome.fractured,
            thrower,
            category,
            now,
        )
    }

    /// Spade swing on another player
    pub fn melee(&mut self, attacker: PlayerId, target: PlayerId, now: Seconds) -> bool {
        let usable = self
            .session(attacker)
            .is_some_and(|s| s.alive && s.tool == Tool::Spade && s.can_work());
        if !usable {
            return false;
        }

        let min = self.config.melee_min_damage;
        let rng = self.rng_mut();
        let damage = if min < 100.0 {
            rng.gen_range(min..100.0).floor()
        } else {
            100.0
        };
        let limb = LimbKind::ALL.choose(rng).copied().unwrap_or(LimbKind::Torso);

        self.apply_hit(target, limb, damage, true, false, false, Some(attacker), KillCategory::Melee, now)
    }

    /// Fall damage reported by the movement code
    pub fn fall(&mut self, id: PlayerId, damage: f64, now: Seconds) {
        if !(damage > 0.0) || !self.is_alive(id) {
            return;
        }

        let broke = self
            .session_and_rng(id)
            .is_some_and(|(session, rng)| session.body.fall(damage, rng));

        let alive = self.session(id).is_some_and(|s| s.body.health() > 0);
        if broke && alive {
            self.send(Notification::warning(id, LEGS_BROKEN_WARNING));
        }
        self.sync_health(id, None, KillCategory::Fall, now);
    }

    /// Hand a player extra ammunition for the weapon they carry
    pub fn stow_ammo(&mut self, id: PlayerId, pack: AmmoPack) -> error::Result<()> {
        let session = self.session_mut(id).ok_or(MilsimError::UnknownPlayer(id))?;
        session.weapon.stow(pack)?;
        let ammo = session.weapon.status();
        self.send(Notification::AmmoChanged { player: id, ammo });
        Ok(())
    }

    /// Resupply: splint fractures, stop bleeding, restock ammunition and kit
    pub fn refill(&mut self, id: PlayerId, now: Seconds) {
        let Some((session, items)) = self.session_and_items(id) else {
            return;
        };
        if !session.alive {
            return;
        }
        session.body.patch_up();
        session.weapon.restock();
        session.inventory.clear();
        session.inventory.issue(&MEDICAL_KIT, items);
        if session.weapon.underbarrel.is_some() {
            session.inventory.issue(&LAUNCHER_KIT, items);
        }
        let ammo = session.weapon.status();

        self.send(Notification::AmmoChanged { player: id, ammo });
        self.dispatch_refill(id, now);
        self.sync_health(id, None, KillCategory::Melee, now);
    }

    /// Throw a hand grenade; the physics engine reports the detonation later
    pub fn throw_grenade(&mut self, id: PlayerId, velocity: DVec3) -> bool {
        let Some(session) = self.session(id).filter(|s| s.alive) else {
            return false;
        };
        if session.tool != Tool::Grenade || !session.can_work() {
            return false;
        }
        let origin = session.position;
        self.send(Notification::ProjectileLaunched {
            owner: id,
            kind: GrenadeKind::Grenade,
            origin,
            velocity,
        });
        true
    }

    /// Load a cartridge from the inventory into the underbarrel launcher
    pub fn load_underbarrel(&mut self, id: PlayerId, kind: GrenadeKind) -> error::Result<()> {
        let session = self.session_mut(id).ok_or(MilsimError::UnknownPlayer(id))?;
        if !session.alive {
            return Err(MilsimError::InvalidInput("You are dead".into()));
        }
        if session.weapon.underbarrel.is_none() {
            return Err(MilsimError::InvalidInput("Your weapon has no grenade launcher".into()));
        }
        let Some(item) = session.inventory.take(ItemKind::GrenadeCartridge(kind)) else {
            return Err(MilsimError::InvalidInput(format!(
                "You have no {} cartridges",
                kind.name().to_lowercase()
            )));
        };

        let cartridge = GrenadeCartridge { id: item.id, kind };
        let previous = session
            .weapon
            .underbarrel
            .as_mut()
            .and_then(|launcher| launcher.load(cartridge));
        if let Some(previous) = previous {
            session.inventory.push(Item::from(previous));
        }
        Ok(())
    }

    /// Launch whatever sits in the underbarrel launcher
    pub fn fire_underbarrel(&mut self, id: PlayerId) -> bool {
        let Some(session) = self.session_mut(id).filter(|s| s.alive && s.can_work()) else {
            return false;
        };
        let Some(cartridge) = session.weapon.underbarrel.as_mut().and_then(|l| l.fire()) else {
            return false;
        };

        let origin = session.position;
        let velocity = session.orientation.normalize_or_zero() * cartridge.kind.muzzle();
        self.send(Notification::ProjectileLaunched {
            owner: id,
            kind: cartridge.kind,
            origin,
            velocity,
        });
        true
    }
}
