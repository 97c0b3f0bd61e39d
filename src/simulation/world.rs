//! The combat world: session table, collaborators, and hit application
//!
//! All entry points run to completion on the caller's thread. Sessions are
//! owned by the table; cross-player effects go through ids.

use ahash::AHashMap;
use glam::IVec3;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::blast::FragmentBudget;
use crate::core::config::CombatConfig;
use crate::core::timer::TimerQueue;
use crate::core::types::{ItemIdAllocator, PlayerId, Position, Seconds, TeamId};
use crate::injury::LimbKind;
use crate::session::{CombatSession, Command, ItemKind, KillCategory, Tool, LAUNCHER_KIT, MEDICAL_KIT};
use crate::simulation::handlers::{CommandReply, FeatureHandler, HitContext, HitVerdict};
use crate::weapon::{AmmoStatus, GrenadeLauncher, WeaponKind, WeaponState};
use crate::world::{Arena, Notification, NotificationSink, OpenField, Outbox, TraceTarget};

pub const BLEEDING_WARNING: &str = "You're bleeding.";

/// Deferred world events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorldEvent {
    BeltDetonation { player: PlayerId },
}

pub struct CombatWorld {
    pub config: CombatConfig,
    sessions: AHashMap<PlayerId, CombatSession>,
    arena: Box<dyn Arena>,
    outbox: Outbox,
    rng: ChaCha8Rng,
    timers: TimerQueue<WorldEvent>,
    handlers: Vec<Box<dyn FeatureHandler>>,
    items: ItemIdAllocator,
    pub(crate) fragments: FragmentBudget,
}

impl CombatWorld {
    pub fn new(config: CombatConfig, arena: impl Arena + 'static) -> Self {
        let rng = ChaCha8Rng::seed_from_u64(config.seed);
        let fragments = FragmentBudget::new(config.fragment_budget);
        Self {
            config,
            sessions: AHashMap::new(),
            arena: Box::new(arena),
            outbox: Outbox::new(),
            rng,
            timers: TimerQueue::new(),
            handlers: Vec::new(),
            items: ItemIdAllocator::new(),
            fragments,
        }
    }

    /// World on a flat open map
    pub fn open_field(config: CombatConfig) -> Self {
        Self::new(config, OpenField::default())
    }

    /// Add a feature handler; handlers run in registration order
    pub fn register(&mut self, handler: Box<dyn FeatureHandler>) {
        tracing::debug!("Registered feature handler {}", handler.name());
        self.handlers.push(handler);
    }

    pub fn with_handlers(mut self, handlers: Vec<Box<dyn FeatureHandler>>) -> Self {
        for handler in handlers {
            self.register(handler);
        }
        self
    }

    // ---- accessors ----

    pub fn session(&self, id: PlayerId) -> Option<&CombatSession> {
        self.sessions.get(&id)
    }

    pub fn session_mut(&mut self, id: PlayerId) -> Option<&mut CombatSession> {
        self.sessions.get_mut(&id)
    }

    pub fn sessions(&self) -> impl Iterator<Item = &CombatSession> {
        self.sessions.values()
    }

    /// Ids of living players in ascending order
    pub fn living(&self) -> Vec<PlayerId> {
        let mut ids: Vec<_> = self
            .sessions
            .values()
            .filter(|s| s.alive)
            .map(|s| s.id)
            .collect();
        ids.sort();
        ids
    }

    pub fn is_alive(&self, id: PlayerId) -> bool {
        self.sessions.get(&id).is_some_and(|s| s.alive)
    }

    /// Aggregate health as last sent to the client
    pub fn health(&self, id: PlayerId) -> Option<u8> {
        self.sessions.get(&id).map(|s| s.hp)
    }

    pub fn ammo(&self, id: PlayerId) -> Option<AmmoStatus> {
        self.sessions.get(&id).map(|s| s.weapon.status())
    }

    pub fn arena(&self) -> &dyn Arena {
        self.arena.as_ref()
    }

    pub fn arena_mut(&mut self) -> &mut dyn Arena {
        self.arena.as_mut()
    }

    pub fn rng_mut(&mut self) -> &mut ChaCha8Rng {
        &mut self.rng
    }

    pub fn timers_mut(&mut self) -> &mut TimerQueue<WorldEvent> {
        &mut self.timers
    }

    pub fn items_mut(&mut self) -> &mut ItemIdAllocator {
        &mut self.items
    }

    pub fn send(&mut self, notification: Notification) {
        self.outbox.send(notification);
    }

    pub fn notifications(&self) -> &[Notification] {
        self.outbox.pending()
    }

    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        self.outbox.drain()
    }

    /// Snapshot of every living player for the projectile tracer
    pub fn trace_targets(&self) -> Vec<TraceTarget> {
        self.living()
            .into_iter()
            .filter_map(|id| self.sessions.get(&id).map(CombatSession::trace_target))
            .collect()
    }

    // ---- lifecycle ----

    /// Create or respawn a player with a fresh body, weapon and medical kit
    pub fn spawn(
        &mut self,
        id: PlayerId,
        name: &str,
        team: TeamId,
        weapon: WeaponKind,
        position: Position,
        now: Seconds,
    ) {
        let session = self
            .sessions
            .entry(id)
            .or_insert_with(|| CombatSession::new(id, name, team, weapon, now));

        session.team = team;
        if session.weapon.kind != weapon {
            let underbarrel = session.weapon.underbarrel.take();
            session.weapon = WeaponState::new(weapon);
            session.weapon.underbarrel = underbarrel;
        }
        session.respawn(position, now);
        session.inventory.issue(&MEDICAL_KIT, &mut self.items);
        if session.weapon.underbarrel.is_some() {
            session.inventory.issue(&LAUNCHER_KIT, &mut self.items);
        }

        let ammo = session.weapon.status();
        tracing::info!("{} spawned with {} at {:?}", session.name, weapon.name(), position);

        self.send(Notification::AmmoChanged { player: id, ammo });
        self.dispatch_spawn(id, now);
    }

    /// Remove a disconnecting player
    pub fn despawn(&mut self, id: PlayerId, now: Seconds) {
        if self.sessions.contains_key(&id) {
            self.dispatch_death(id, now);
            self.dispatch(|h, w| h.on_leave(w, id, now));
            self.sessions.remove(&id);
            tracing::debug!("Player {:?} left", id);
        }
    }

    /// Class change. A living player dies in the process.
    pub fn set_weapon(&mut self, id: PlayerId, kind: WeaponKind, now: Seconds) {
        if self.is_alive(id) {
            self.kill(id, None, KillCategory::ClassChange, now);
        }
        if let Some(session) = self.sessions.get_mut(&id) {
            let underbarrel = session.weapon.underbarrel.take();
            session.weapon = WeaponState::new(kind);
            session.weapon.underbarrel = underbarrel;
        }
    }

    /// Team change. A living player dies in the process.
    pub fn set_team(&mut self, id: PlayerId, team: TeamId, now: Seconds) {
        if self.is_alive(id) {
            self.kill(id, None, KillCategory::TeamChange, now);
        }
        if let Some(session) = self.sessions.get_mut(&id) {
            session.team = team;
        }
    }

    /// Mount a grenade launcher and hand out its cartridges
    pub fn attach_launcher(&mut self, id: PlayerId) {
        if let Some(session) = self.sessions.get_mut(&id) {
            if session.weapon.underbarrel.is_none() {
                session.weapon.underbarrel = Some(GrenadeLauncher::new());
                session.inventory.issue(&LAUNCHER_KIT, &mut self.items);
            }
        }
    }

    /// Hand fresh items to a player
    pub fn issue(&mut self, id: PlayerId, kit: &[(ItemKind, u32)]) {
        if let Some(session) = self.sessions.get_mut(&id) {
            session.inventory.issue(kit, &mut self.items);
        }
    }

    /// Switch the held tool; refused (and reset client-side) with a broken arm
    pub fn set_tool(&mut self, id: PlayerId, tool: Tool, now: Seconds) -> bool {
        let Some(session) = self.sessions.get_mut(&id).filter(|s| s.alive) else {
            return false;
        };
        if session.set_tool(tool, now) {
            return true;
        }
        let current = session.tool;
        self.send(Notification::ToolReset {
            player: id,
            tool: current,
        });
        false
    }

    /// Remove a block and let handlers react. Returns whether it was there.
    pub fn destroy_block(&mut self, block: IVec3, by: Option<PlayerId>, now: Seconds) -> bool {
        if !self.arena.destroy_block(block) {
            return false;
        }
        self.send(Notification::BlockDestroyed { block, by });
        self.dispatch(|h, w| h.on_block_destroyed(w, block, now));
        true
    }

    // ---- damage ----

    /// Apply damage and wound flags to one limb
    ///
    /// Unknown or dead targets are ignored. Hits between teammates are dropped
    /// unless friendly fire is on or the category is melee. Returns whether
    /// the hit landed.
    #[allow(clippy::too_many_arguments)]
    pub fn apply_hit(
        &mut self,
        target: PlayerId,
        limb: LimbKind,
        damage: f64,
        venous: bool,
        arterial: bool,
        fractured: bool,
        hit_by: Option<PlayerId>,
        category: KillCategory,
        now: Seconds,
    ) -> bool {
        let Some(victim) = self.sessions.get(&target) else {
            tracing::debug!("Hit on unknown player {:?} ignored", target);
            return false;
        };
        if !victim.alive {
            return false;
        }

        if let Some(attacker) = hit_by.filter(|a| *a != target).and_then(|a| self.sessions.get(&a)) {
            let teammates = attacker.is_teammate(victim);
            if teammates && !self.config.friendly_fire && !category.bypasses_friendly_fire() {
                return false;
            }
        }

        let hit = HitContext {
            target,
            limb,
            damage,
            hit_by,
            category,
        };
        if self.vetoed(&hit) {
            tracing::debug!("Hit on {:?} vetoed by a handler", target);
            return false;
        }

        let Some(session) = self.sessions.get_mut(&target) else {
            return false;
        };
        let report = session.body.apply(limb, damage, venous, arterial, fractured);

        let mut outgoing = Vec::new();
        if session.body.health() > 0 {
            if let Some(broken) = report.new_fracture {
                outgoing.push(Notification::warning(target, broken.fracture_warning()));
            }
            if report.started_bleeding {
                outgoing.push(Notification::warning(target, BLEEDING_WARNING));
            }
        }
        if report.new_fracture.is_some_and(LimbKind::is_arm) {
            if session.tool != Tool::Weapon {
                session.tool = Tool::Weapon;
                session.last_tool_update = Some(now);
            }
            outgoing.push(Notification::ToolReset {
                player: target,
                tool: session.tool,
            });
        }

        for notification in outgoing {
            self.send(notification);
        }
        self.sync_health(target, hit_by, category, now);
        true
    }

    /// Push a changed aggregate health to the client, killing at zero
    pub fn sync_health(
        &mut self,
        id: PlayerId,
        source: Option<PlayerId>,
        category: KillCategory,
        now: Seconds,
    ) {
        let Some(session) = self.sessions.get_mut(&id).filter(|s| s.alive) else {
            return;
        };
        let hp = session.body.health();
        if hp == session.hp {
            return;
        }
        session.hp = hp;

        self.send(Notification::HealthChanged {
            player: id,
            hp,
            source,
            category,
        });
        if hp == 0 {
            self.kill(id, source, category, now);
        }
    }

    /// Kill a living player
    pub fn kill(&mut self, id: PlayerId, killer: Option<PlayerId>, category: KillCategory, now: Seconds) {
        let Some(session) = self.sessions.get_mut(&id).filter(|s| s.alive) else {
            return;
        };
        session.alive = false;
        session.hp = 0;
        session.weapon.cancel_reload();
        session.weapon.set_trigger(false);
        session.input = Default::default();

        tracing::info!("{} killed ({:?}) by {:?}", session.name, category, killer);
        self.send(Notification::Killed {
            victim: id,
            killer,
            category,
        });
        self.dispatch_death(id, now);
    }

    // ---- commands ----

    /// Parse and run a chat command, replying to the player
    pub fn handle_command(&mut self, player: PlayerId, line: &str, now: Seconds) {
        match Command::parse(line) {
            Ok(command) => self.execute(player, command, now),
            Err(err) => {
                tracing::debug!("Rejected command from {:?}: {}", player, err);
                self.send(Notification::error(player, err.into_reply()));
            }
        }
    }

    /// Offer a parsed command to each handler until one takes it
    pub fn execute(&mut self, player: PlayerId, command: Command, now: Seconds) {
        if !self.sessions.contains_key(&player) {
            tracing::debug!("Command from unknown player {:?} ignored", player);
            return;
        }

        let mut handlers = std::mem::take(&mut self.handlers);
        let mut reply = CommandReply::Ignored;
        for handler in handlers.iter_mut() {
            reply = handler.on_command(self, player, command, now);
            if reply != CommandReply::Ignored {
                break;
            }
        }
        self.restore_handlers(handlers);

        match reply {
            CommandReply::Ignored => self.send(Notification::error(player, "Unknown command")),
            CommandReply::Done => {}
            CommandReply::Status(text) => self.send(Notification::status(player, text)),
            CommandReply::Error(text) => self.send(Notification::error(player, text)),
        }
    }

    // ---- handler dispatch ----

    fn restore_handlers(&mut self, mut handlers: Vec<Box<dyn FeatureHandler>>) {
        handlers.append(&mut self.handlers);
        self.handlers = handlers;
    }

    fn vetoed(&mut self, hit: &HitContext) -> bool {
        let mut handlers = std::mem::take(&mut self.handlers);
        let blocked = handlers
            .iter_mut()
            .any(|h| h.on_hit(self, hit) == HitVerdict::Block);
        self.restore_handlers(handlers);
        blocked
    }

    /// Run one callback on every handler in order
    fn dispatch(&mut self, mut call: impl FnMut(&mut dyn FeatureHandler, &mut CombatWorld)) {
        let mut handlers = std::mem::take(&mut self.handlers);
        for handler in handlers.iter_mut() {
            call(handler.as_mut(), self);
        }
        self.restore_handlers(handlers);
    }

    fn dispatch_spawn(&mut self, id: PlayerId, now: Seconds) {
        self.dispatch(|h, w| h.on_spawn(w, id, now));
    }

    fn dispatch_death(&mut self, id: PlayerId, now: Seconds) {
        self.dispatch(|h, w| h.on_death(w, id, now));
    }

    pub(crate) fn dispatch_tick(&mut self, now: Seconds) {
        self.dispatch(|h, w| h.on_tick(w, now));
    }

    pub(crate) fn dispatch_refill(&mut self, id: PlayerId, now: Seconds) {
        self.dispatch(|h, w| h.on_refill(w, id, now));
    }

    pub(crate) fn dispatch_explosion(&mut self, origin: Position, now: Seconds) {
        self.dispatch(|h, w| h.on_explosion(w, origin, now));
    }

    pub(crate) fn session_and_rng(&mut self, id: PlayerId) -> Option<(&mut CombatSession, &mut ChaCha8Rng)> {
        let session = self.sessions.get_mut(&id)?;
        Some((session, &mut self.rng))
    }

    pub(crate) fn session_and_items(
        &mut self,
        id: PlayerId,
    ) -> Option<(&mut CombatSession, &mut ItemIdAllocator)> {
        let session = self.sessions.get_mut(&id)?;
        Some((session, &mut self.items))
    }
}
