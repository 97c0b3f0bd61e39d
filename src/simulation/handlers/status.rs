//! `/health` and `/ammo` readouts

use crate::core::types::{PlayerId, Seconds};
use crate::injury::{Body, Limb};
use crate::session::Command;
use crate::simulation::handlers::medical::DEAD_REPLY;
use crate::simulation::handlers::{CommandReply, FeatureHandler};
use crate::simulation::world::CombatWorld;
use crate::weapon::WeaponState;

/// One limb: upper-case label when broken and unsplinted, `*` venous, `**` arterial
pub fn format_limb(limb: &Limb) -> String {
    let abbrev = limb.kind.abbrev();
    let label = if limb.impaired() {
        abbrev.to_uppercase()
    } else {
        abbrev.to_string()
    };
    let venous = if limb.venous { "*" } else { "" };
    let arterial = if limb.arterial { "**" } else { "" };
    format!("{}{}{}: {:.2}", label, venous, arterial, limb.hp)
}

pub fn format_health(body: &Body) -> String {
    let limbs: Vec<String> = body.limbs().map(format_limb).collect();
    format!("{}% | {}", body.health(), limbs.join(" "))
}

pub fn format_ammo(weapon: &WeaponState) -> String {
    let status = weapon.status();
    let mut line = format!("{}: {} / {}", weapon.kind.name(), status.clip, status.reserve);
    if weapon.is_reloading() {
        line.push_str(" (reloading)");
    }
    if let Some(launcher) = &weapon.underbarrel {
        line.push_str(" | ");
        line.push_str(&launcher.name());
    }
    line
}

pub struct StatusHandler;

impl FeatureHandler for StatusHandler {
    fn name(&self) -> &'static str {
        "status"
    }

    fn on_command(
        &mut self,
        world: &mut CombatWorld,
        player: PlayerId,
        command: Command,
        _now: Seconds,
    ) -> CommandReply {
        if !matches!(command, Command::Health | Command::Ammo) {
            return CommandReply::Ignored;
        }
        let Some(session) = world.session(player).filter(|s| s.alive) else {
            return CommandReply::Error(DEAD_REPLY.into());
        };

        match command {
            Command::Health => CommandReply::Status(format_health(&session.body)),
            _ => CommandReply::Status(format_ammo(&session.weapon)),
        }
    }
}
