//! Explosive belt
//!
//! `/boom [fuse]` arms a timed detonation at the wearer's position. One belt
//! may be pending per player; a cooldown separates detonations. Dying or
//! respawning disarms a pending belt.

use ahash::AHashMap;
use rand::seq::SliceRandom;

use crate::core::timer::TimerHandle;
use crate::core::types::{PlayerId, Seconds};
use crate::session::Command;
use crate::simulation::handlers::{CommandReply, FeatureHandler};
use crate::simulation::world::{CombatWorld, WorldEvent};

const PROTECTION: [&str; 3] = [
    "Don't try to die twice.",
    "Are you a zombie?",
    "Your death was not a fake.",
];

#[derive(Debug, Clone, Copy, Default)]
struct Belt {
    pending: Option<TimerHandle>,
    /// Last detonation or disarm
    last: Option<Seconds>,
}

#[derive(Debug, Default)]
pub struct KamikazeHandler {
    belts: AHashMap<PlayerId, Belt>,
}

impl KamikazeHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_armed(&self, player: PlayerId) -> bool {
        self.belts.get(&player).is_some_and(|b| b.pending.is_some())
    }

    fn arm(&mut self, world: &mut CombatWorld, player: PlayerId, fuse: f64, now: Seconds) -> CommandReply {
        if !fuse.is_finite() {
            return CommandReply::Error("Are you a hacker?".into());
        }
        if self.is_armed(player) {
            return CommandReply::Done;
        }
        if !world.is_alive(player) {
            let text = PROTECTION.choose(world.rng_mut()).copied().unwrap_or(PROTECTION[0]);
            return CommandReply::Error(text.into());
        }

        let max_fuse = world.config.kamikaze.max_fuse;
        if !(0.0..=max_fuse).contains(&fuse) {
            return CommandReply::Error(format!("Delay should be non-negative and less than {}.", max_fuse));
        }

        let cooldown = world.config.kamikaze.cooldown;
        let belt = self.belts.entry(player).or_default();
        if let Some(last) = belt.last {
            let elapsed = now - last;
            if elapsed < cooldown {
                return CommandReply::Error(format!("Wait {:.1} seconds.", cooldown - elapsed));
            }
        }

        let handle = world
            .timers_mut()
            .schedule(now, fuse, WorldEvent::BeltDetonation { player });
        belt.pending = Some(handle);
        tracing::info!("Player {:?} armed a belt, fuse {:.1} s", player, fuse);
        CommandReply::Done
    }

    fn disarm(&mut self, world: &mut CombatWorld, player: PlayerId, now: Seconds) {
        let Some(belt) = self.belts.get_mut(&player) else {
            return;
        };
        if let Some(handle) = belt.pending.take() {
            if world.timers_mut().cancel(handle) {
                tracing::debug!("Belt of {:?} disarmed", player);
            }
            belt.last = Some(now);
        }
    }
}

impl FeatureHandler for KamikazeHandler {
    fn name(&self) -> &'static str {
        "kamikaze"
    }

    /// Belts whose timer already fired have detonated this tick
    fn on_tick(&mut self, world: &mut CombatWorld, now: Seconds) {
        for belt in self.belts.values_mut() {
            if let Some(handle) = belt.pending {
                if !world.timers_mut().is_pending(handle) {
                    belt.pending = None;
                    belt.last = Some(now);
                }
            }
        }
    }

    fn on_command(
        &mut self,
        world: &mut CombatWorld,
        player: PlayerId,
        command: Command,
        now: Seconds,
    ) -> CommandReply {
        match command {
            Command::Boom { fuse } => self.arm(world, player, fuse, now),
            _ => CommandReply::Ignored,
        }
    }

    fn on_spawn(&mut self, world: &mut CombatWorld, player: PlayerId, now: Seconds) {
        self.disarm(world, player, now);
    }

    fn on_death(&mut self, world: &mut CombatWorld, player: PlayerId, now: Seconds) {
        self.disarm(world, player, now);
    }

    fn on_leave(&mut self, world: &mut CombatWorld, player: PlayerId, now: Seconds) {
        self.disarm(world, player, now);
        self.belts.remove(&player);
    }
}
