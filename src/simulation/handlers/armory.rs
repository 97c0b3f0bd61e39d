//! Manual reload and underbarrel loading

use crate::core::types::{PlayerId, Seconds};
use crate::session::{Command, Tool};
use crate::simulation::handlers::medical::DEAD_REPLY;
use crate::simulation::handlers::{CommandReply, FeatureHandler};
use crate::simulation::world::CombatWorld;

pub struct ArmoryHandler;

impl FeatureHandler for ArmoryHandler {
    fn name(&self) -> &'static str {
        "armory"
    }

    fn on_command(
        &mut self,
        world: &mut CombatWorld,
        player: PlayerId,
        command: Command,
        now: Seconds,
    ) -> CommandReply {
        match command {
            Command::Reload => {
                let Some(session) = world.session(player).filter(|s| s.alive) else {
                    return CommandReply::Error(DEAD_REPLY.into());
                };
                if session.tool != Tool::Weapon {
                    return CommandReply::Error("Take your weapon first".into());
                }
                if session.weapon.is_reloading() {
                    return CommandReply::Done;
                }
                if world.reload(player, now) {
                    CommandReply::Done
                } else {
                    CommandReply::Error("Nothing to reload".into())
                }
            }
            Command::Load(kind) => match world.load_underbarrel(player, kind) {
                Ok(()) => CommandReply::Status(format!("{} loaded", kind.name())),
                Err(err) => CommandReply::Error(err.into_reply()),
            },
            _ => CommandReply::Ignored,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::CombatConfig;
    use crate::core::types::TeamId;
    use crate::session::ItemKind;
    use crate::weapon::{GrenadeKind, WeaponKind};
    use crate::world::{MessageKind, Notification};
    use glam::DVec3;

    fn world() -> CombatWorld {
        let mut world = CombatWorld::open_field(CombatConfig::default()).with_handlers(vec![Box::new(ArmoryHandler)]);
        world.spawn(PlayerId(1), "gunner", TeamId(0), WeaponKind::Shotgun, DVec3::new(10.0, 10.0, 50.0), 0.0);
        world.drain_notifications();
        world
    }

    fn last_message(world: &mut CombatWorld) -> Option<(MessageKind, String)> {
        world.drain_notifications().into_iter().rev().find_map(|n| match n {
            Notification::Message { kind, text, .. } => Some((kind, text)),
            _ => None,
        })
    }

    #[test]
    fn test_reload_full_tube_refused() {
        let mut world = world();
        world.handle_command(PlayerId(1), "/reload", 1.0);
        assert_eq!(last_message(&mut world), Some((MessageKind::Error, "Nothing to reload".into())));
    }

    #[test]
    fn test_reload_after_shot() {
        let mut world = world();
        world.fire(PlayerId(1), 1.0).unwrap();
        world.handle_command(PlayerId(1), "/r", 1.0);
        assert!(world.session(PlayerId(1)).unwrap().weapon.is_reloading());
        assert_eq!(last_message(&mut world), None);
    }

    #[test]
    fn test_load_without_launcher() {
        let mut world = world();
        world.handle_command(PlayerId(1), "/load grenade", 1.0);
        assert_eq!(
            last_message(&mut world),
            Some((MessageKind::Error, "Your weapon has no grenade launcher".into()))
        );
    }

    #[test]
    fn test_load_swaps_cartridges() {
        let mut world = world();
        world.attach_launcher(PlayerId(1));
        world.handle_command(PlayerId(1), "/load flashbang", 1.0);
        assert_eq!(last_message(&mut world), Some((MessageKind::Status, "Flashbang loaded".into())));
        world.handle_command(PlayerId(1), "/load", 1.0);

        let session = world.session(PlayerId(1)).unwrap();
        let loaded = session.weapon.underbarrel.as_ref().and_then(|l| l.loaded()).map(|c| c.kind);
        assert_eq!(loaded, Some(GrenadeKind::Grenade));
        assert_eq!(session.inventory.count(ItemKind::GrenadeCartridge(GrenadeKind::Flashbang)), 1);
        assert_eq!(session.inventory.count(ItemKind::GrenadeCartridge(GrenadeKind::Grenade)), 1);

        world.handle_command(PlayerId(1), "/load flashbang", 1.0);
        world.handle_command(PlayerId(1), "/load flashbang", 1.0);
        assert_eq!(
            last_message(&mut world),
            Some((MessageKind::Error, "You have no flashbang cartridges".into()))
        );
    }
}
