//! Field medicine: bandage, tourniquet, splint

use crate::core::types::{PlayerId, Seconds};
use crate::injury::LimbKind;
use crate::session::{CombatSession, Command, ItemKind};
use crate::simulation::handlers::{CommandReply, FeatureHandler};
use crate::simulation::world::CombatWorld;

pub const DEAD_REPLY: &str = "You are dead.";

/// Treatment that went through, or the reason it did not
enum Treatment {
    Applied(String),
    Refused(&'static str),
}

pub struct MedicalHandler;

impl MedicalHandler {
    fn treat(session: &mut CombatSession, item: ItemKind) -> Treatment {
        let body = &session.body;
        let refusal = match item {
            ItemKind::Bandage if !body.limbs().any(|l| l.venous) => Some(if body.bleeding() {
                "To stop arterial bleeding use /tourniquet /t"
            } else {
                "You are not bleeding"
            }),
            ItemKind::Tourniquet if !body.limbs().any(|l| l.arterial) => Some(if body.bleeding() {
                "To stop venous bleeding use /bandage /b"
            } else {
                "You are not bleeding"
            }),
            ItemKind::Splint if !body.limbs().any(|l| l.impaired()) => Some("You have no fractures"),
            _ => None,
        };
        if let Some(reason) = refusal {
            return Treatment::Refused(reason);
        }

        if session.inventory.take(item).is_none() {
            return Treatment::Refused(match item {
                ItemKind::Bandage => "You do not have a bandage",
                ItemKind::Tourniquet => "You do not have a tourniquet",
                _ => "You do not have a splint",
            });
        }

        let treated: Option<LimbKind> = match item {
            ItemKind::Bandage => session.body.bandage(),
            ItemKind::Tourniquet => session.body.tourniquet(),
            _ => session.body.splint(),
        };
        match (item, treated) {
            (ItemKind::Bandage, Some(limb)) => Treatment::Applied(format!("You have bandaged your {}", limb.name())),
            (ItemKind::Tourniquet, Some(limb)) => {
                Treatment::Applied(format!("You put a tourniquet on your {}", limb.name()))
            }
            (_, Some(limb)) => Treatment::Applied(format!("You put a splint on your {}", limb.name())),
            (_, None) => Treatment::Refused("Nothing to treat"),
        }
    }
}

impl FeatureHandler for MedicalHandler {
    fn name(&self) -> &'static str {
        "medical"
    }

    fn on_command(
        &mut self,
        world: &mut CombatWorld,
        player: PlayerId,
        command: Command,
        _now: Seconds,
    ) -> CommandReply {
        let item = match command {
            Command::Bandage => ItemKind::Bandage,
            Command::Tourniquet => ItemKind::Tourniquet,
            Command::Splint => ItemKind::Splint,
            _ => return CommandReply::Ignored,
        };

        let Some(session) = world.session_mut(player).filter(|s| s.alive) else {
            return CommandReply::Error(DEAD_REPLY.into());
        };

        match Self::treat(session, item) {
            Treatment::Applied(text) => {
                tracing::debug!("{}: {}", session.name, text);
                CommandReply::Status(text)
            }
            Treatment::Refused(reason) => CommandReply::Error(reason.into()),
        }
    }
}
