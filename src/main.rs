//! Milsim - skirmish runner
//!
//! Spawns two squads on an open field, lets them shoot at each other and
//! prints every notification the combat core emits as one JSON object per line.

use std::path::PathBuf;

use clap::Parser;
use glam::DVec3;
use serde::Serialize;

use milsim::core::config::CombatConfig;
use milsim::core::error::Result;
use milsim::core::types::{PlayerId, TeamId};
use milsim::session::{InputState, EYE_HEIGHT};
use milsim::simulation::{default_handlers, CombatWorld};
use milsim::weapon::WeaponKind;
use milsim::world::{Notification, Terrain};

#[derive(Parser, Debug)]
#[command(name = "milsim")]
#[command(about = "Run a headless skirmish through the combat core")]
struct Args {
    /// Combat configuration (TOML); defaults are used when missing
    #[arg(long, default_value = "data/combat.toml")]
    config: PathBuf,

    /// Override the configured seed
    #[arg(long)]
    seed: Option<u64>,

    /// Players per team
    #[arg(long, default_value_t = 4)]
    players: u32,

    /// Number of ticks to simulate
    #[arg(long, default_value_t = 600)]
    ticks: u32,

    /// Seconds per tick
    #[arg(long, default_value_t = 0.125)]
    step: f64,

    /// Gap between the two squads in metres
    #[arg(long, default_value_t = 60.0)]
    distance: f64,

    /// Print only the final summary
    #[arg(long, short = 'q')]
    quiet: bool,
}

#[derive(Serialize)]
struct Summary {
    seed: u64,
    ticks: u32,
    elapsed: f64,
    survivors: [u32; 2],
    kills: usize,
    notifications: usize,
}

const TEAMS: [TeamId; 2] = [TeamId(0), TeamId(1)];

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("milsim=info")
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut config = if args.config.exists() {
        CombatConfig::load(&args.config)?
    } else {
        tracing::warn!("{} not found, using default config", args.config.display());
        CombatConfig::default()
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    let seed = config.seed;

    let mut world = CombatWorld::open_field(config).with_handlers(default_handlers());
    spawn_squads(&mut world, args.players, args.distance);

    let mut now = 0.0;
    let mut kills = 0;
    let mut total = 0;
    for _ in 0..args.ticks {
        now += args.step;
        steer(&mut world, now);
        world.run_tick(now);

        for notification in world.drain_notifications() {
            total += 1;
            if matches!(notification, Notification::Killed { .. }) {
                kills += 1;
            }
            if !args.quiet {
                println!("{}", serde_json::to_string(&notification)?);
            }
        }

        if TEAMS.iter().any(|team| survivors(&world, *team) == 0) {
            break;
        }
    }

    let summary = Summary {
        seed,
        ticks: args.ticks,
        elapsed: now,
        survivors: [survivors(&world, TEAMS[0]), survivors(&world, TEAMS[1])],
        kills,
        notifications: total,
    };
    tracing::info!("Skirmish over after {:.1} s", now);
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

fn spawn_squads(world: &mut CombatWorld, players: u32, distance: f64) {
    let weapons = WeaponKind::ALL;
    for (side, team) in TEAMS.iter().enumerate() {
        let x = 200.0 + distance * side as f64;
        for i in 0..players {
            let id = PlayerId(side as u32 * 1000 + i);
            let y = 200.0 + 3.0 * i as f64;
            let ground = world.arena().ground_level(x as i32, y as i32) as f64;
            let position = DVec3::new(x, y, ground - EYE_HEIGHT);
            let weapon = weapons[i as usize % weapons.len()];
            world.spawn(id, &format!("{}-{}", side, i), *team, weapon, position, 0.0);
            if i == 0 {
                world.attach_launcher(id);
            }
        }
    }
}

/// Aim at the nearest enemy, keep the trigger down and patch up wounds
fn steer(world: &mut CombatWorld, now: f64) {
    let living = world.living();
    for id in &living {
        let Some(me) = world.session(*id) else {
            continue;
        };
        let position = me.position;
        let arterial = me.body.limbs().any(|l| l.arterial);
        let venous = me.body.limbs().any(|l| l.venous);
        let fractured = me.body.limbs().any(|l| l.impaired());

        let target = living
            .iter()
            .filter_map(|other| world.session(*other))
            .filter(|other| !other.is_teammate(me))
            .min_by(|a, b| {
                a.position
                    .distance_squared(position)
                    .total_cmp(&b.position.distance_squared(position))
            })
            .map(|other| other.position);

        if arterial {
            world.handle_command(*id, "/tourniquet", now);
        } else if venous {
            world.handle_command(*id, "/bandage", now);
        } else if fractured {
            world.handle_command(*id, "/splint", now);
        }

        if let Some(target) = target {
            world.set_orientation(*id, (target - position).normalize_or_zero(), now);
        }
        let input = InputState {
            primary_fire: target.is_some(),
            ..InputState::default()
        };
        world.set_input(*id, input, now);
    }
}

fn survivors(world: &CombatWorld, team: TeamId) -> u32 {
    world.sessions().filter(|s| s.alive && s.team == team).count() as u32
}
