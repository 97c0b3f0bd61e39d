//! Placed explosives
//!
//! `/mine` and `/charge` put a device on the block the player looks at.
//! Landmines go off when stepped on. Both kinds go off when caught in another
//! explosion or when their block is destroyed. Charges are wired to the
//! owner's detonator and fired together with `/detonate`.

use ahash::AHashMap;
use glam::{DVec3, IVec3};

use crate::blast::{BlastEvent, BlastSource};
use crate::core::types::{PlayerId, Position, Seconds};
use crate::session::{Command, ItemKind, EYE_HEIGHT, SAPPER_KIT};
use crate::simulation::handlers::medical::DEAD_REPLY;
use crate::simulation::handlers::{CommandReply, FeatureHandler};
use crate::simulation::world::CombatWorld;
use crate::world::{grenade_zone, Terrain, Visibility};

/// How far away a device can be placed, in metres
pub const PLACE_RANGE: f64 = 7.0;

/// Blocks at or below this level are water
const WATER_LEVEL: i32 = 63;

/// Charges one detonator can fire
pub const DETONATOR_LIMIT: usize = 4;

/// Charges a player can carry
pub const CHARGE_LIMIT: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Device {
    Landmine,
    Charge,
}

impl Device {
    fn item(self) -> ItemKind {
        match self {
            Device::Landmine => ItemKind::Landmine,
            Device::Charge => ItemKind::Charge,
        }
    }

    fn name(self) -> &'static str {
        self.item().name()
    }

    /// Blast point relative to the block corner
    fn offset(self) -> DVec3 {
        match self {
            Device::Landmine => DVec3::new(0.5, 0.5, -1.0),
            Device::Charge => DVec3::new(0.5, 0.5, -0.5),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Placed {
    device: Device,
    owner: PlayerId,
}

#[derive(Debug, Default)]
pub struct ExplosivesHandler {
    placed: AHashMap<IVec3, Placed>,
    /// Charges wired to each player's detonators, in placement order
    wired: AHashMap<PlayerId, Vec<IVec3>>,
}

impl ExplosivesHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn device_at(&self, block: IVec3) -> Option<Device> {
        self.placed.get(&block).map(|p| p.device)
    }

    fn place(&mut self, world: &mut CombatWorld, player: PlayerId, device: Device, now: Seconds) -> CommandReply {
        let Some(session) = world.session(player).filter(|s| s.alive) else {
            return CommandReply::Error(DEAD_REPLY.into());
        };
        if !session.inventory.has(device.item()) {
            return CommandReply::Error(match device {
                Device::Landmine => "You do not have mines".into(),
                Device::Charge => "You do not have charges".into(),
            });
        }
        let detonators = session.inventory.count(ItemKind::Detonator);

        let Some(point) = world
            .arena()
            .cast_ray(session.position, session.orientation, PLACE_RANGE)
        else {
            return CommandReply::Error(format!("{} cannot be placed that far away from you", device.name()));
        };
        let block = point.floor().as_ivec3();
        if block.z >= WATER_LEVEL {
            return CommandReply::Error(format!("{} cannot be placed on water", device.name()));
        }

        if let Some(existing) = self.placed.get(&block) {
            // a second mine on a mine sets it off
            if device == Device::Landmine && existing.device == Device::Landmine {
                Self::consume(world, player, device);
                self.explode(world, block, now);
                return CommandReply::Done;
            }
            return CommandReply::Error(format!("{} cannot be placed here", device.name()));
        }

        if device == Device::Charge {
            let wired = self.wired.entry(player).or_default();
            if wired.len() >= DETONATOR_LIMIT * detonators {
                return CommandReply::Error("You don't have an available detonator".into());
            }
            wired.push(block);
        }

        Self::consume(world, player, device);
        self.placed.insert(block, Placed { device, owner: player });
        tracing::debug!("{:?} placed a {:?} at {:?}", player, device, block);
        CommandReply::Status(format!(
            "{} placed at ({}, {}, {})",
            device.name(),
            block.x,
            block.y,
            block.z
        ))
    }

    fn consume(world: &mut CombatWorld, player: PlayerId, device: Device) {
        if let Some(session) = world.session_mut(player) {
            session.inventory.take(device.item());
        }
    }

    fn detonate(&mut self, world: &mut CombatWorld, player: PlayerId, now: Seconds) -> CommandReply {
        let Some(session) = world.session(player).filter(|s| s.alive) else {
            return CommandReply::Error(DEAD_REPLY.into());
        };
        if !session.inventory.has(ItemKind::Detonator) {
            return CommandReply::Error("You do not have a detonator".into());
        }

        let targets = self.wired.remove(&player).unwrap_or_default();
        for block in targets {
            if self.device_at(block) == Some(Device::Charge) {
                self.explode(world, block, now);
            }
        }
        CommandReply::Done
    }

    fn take_charges(&mut self, world: &mut CombatWorld, player: PlayerId, count: i64) -> CommandReply {
        if count <= 0 {
            return CommandReply::Error("Invalid number of charges".into());
        }
        let Some(session) = world.session(player).filter(|s| s.alive) else {
            return CommandReply::Error(DEAD_REPLY.into());
        };

        let detonator = !session.inventory.has(ItemKind::Detonator);
        let room = CHARGE_LIMIT.saturating_sub(session.inventory.count(ItemKind::Charge));
        let charges = room.min(count as usize) as u32;

        let mut taken = Vec::new();
        if detonator {
            world.issue(player, &[(ItemKind::Detonator, 1)]);
            taken.push("Detonator".to_string());
        }
        if charges > 0 {
            world.issue(player, &[(ItemKind::Charge, charges)]);
            taken.push(format!("Charge ({})", charges));
        }

        if taken.is_empty() {
            return CommandReply::Error("You cannot carry more charges".into());
        }
        CommandReply::Status(format!("You took: {}", taken.join(", ")))
    }

    /// Set off the device on `block` and every device its blast reaches
    fn explode(&mut self, world: &mut CombatWorld, block: IVec3, now: Seconds) {
        let mut pending = vec![block];
        while let Some(block) = pending.pop() {
            let Some(placed) = self.placed.remove(&block) else {
                continue;
            };
            // nobody to credit, the device is a dud
            if world.session(placed.owner).is_none() {
                tracing::debug!("{:?} at {:?} fizzled", placed.device, block);
                continue;
            }

            let origin = block.as_dvec3() + placed.device.offset();
            tracing::info!("{:?} of {:?} exploded at {:?}", placed.device, placed.owner, block);
            let event = BlastEvent::new(BlastSource::Grenade, origin, Some(placed.owner), &world.config);
            world.detonate(event, now);

            // handlers are not dispatched while this one runs, so chain reactions are found here
            pending.extend(self.caught(world, origin));
        }
    }

    /// Devices inside the blast zone around `origin` or left without a block
    fn caught(&self, world: &CombatWorld, origin: Position) -> Vec<IVec3> {
        let zone: Vec<IVec3> = grenade_zone(origin.floor().as_ivec3()).collect();
        let mut blocks: Vec<IVec3> = self
            .placed
            .keys()
            .copied()
            .filter(|b| zone.contains(b) || !world.arena().is_solid(*b))
            .collect();
        blocks.sort_by_key(|b| (b.x, b.y, b.z));
        blocks
    }

    /// Landmines under a living player's feet
    fn stepped_on(&self, world: &CombatWorld) -> Vec<IVec3> {
        let mut blocks: Vec<IVec3> = world
            .sessions()
            .filter(|s| s.alive)
            .map(|s| (s.position + DVec3::Z * (EYE_HEIGHT + 0.1)).floor().as_ivec3())
            .filter(|b| self.device_at(*b) == Some(Device::Landmine))
            .collect();
        blocks.sort_by_key(|b| (b.x, b.y, b.z));
        blocks.dedup();
        blocks
    }
}

impl FeatureHandler for ExplosivesHandler {
    fn name(&self) -> &'static str {
        "explosives"
    }

    fn on_tick(&mut self, world: &mut CombatWorld, now: Seconds) {
        for block in self.stepped_on(world) {
            self.explode(world, block, now);
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
            Command::Mine => self.place(world, player, Device::Landmine, now),
            Command::Charge => self.place(world, player, Device::Charge, now),
            Command::Detonate => self.detonate(world, player, now),
            Command::TakeCharge { count } => self.take_charges(world, player, count),
            _ => CommandReply::Ignored,
        }
    }

    fn on_spawn(&mut self, world: &mut CombatWorld, player: PlayerId, _now: Seconds) {
        world.issue(player, &SAPPER_KIT);
    }

    fn on_refill(&mut self, world: &mut CombatWorld, player: PlayerId, _now: Seconds) {
        world.issue(player, &SAPPER_KIT);
    }

    fn on_leave(&mut self, _world: &mut CombatWorld, player: PlayerId, _now: Seconds) {
        self.wired.remove(&player);
    }

    fn on_explosion(&mut self, world: &mut CombatWorld, origin: Position, now: Seconds) {
        for block in self.caught(world, origin) {
            self.explode(world, block, now);
        }
    }

    fn on_block_destroyed(&mut self, world: &mut CombatWorld, block: IVec3, now: Seconds) {
        if self.placed.contains_key(&block) {
            self.explode(world, block, now);
        }
    }
}
