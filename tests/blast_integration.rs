//! Explosions against a populated world

use glam::{DVec3, IVec3};

use milsim::blast::{falloff, BlastEvent, BlastSource};
use milsim::core::config::{BlastRadii, CombatConfig};
use milsim::core::types::{PlayerId, TeamId};
use milsim::session::KillCategory;
use milsim::simulation::{default_handlers, CombatWorld};
use milsim::weapon::WeaponKind;
use milsim::world::{Notification, OpenField};

fn populated(field: OpenField, fragments: u32) -> CombatWorld {
    let config = CombatConfig {
        fragments_per_blast: fragments,
        ..CombatConfig::default()
    };
    let mut world = CombatWorld::new(config, field).with_handlers(default_handlers());
    for (i, x) in [0.0, 3.0, 10.0, 25.0, 35.0].into_iter().enumerate() {
        let position = DVec3::new(100.5 + x, 100.5, 50.5);
        let team = if i == 0 { TeamId(0) } else { TeamId(1) };
        world.spawn(PlayerId(i as u32), &format!("p{}", i), team, WeaponKind::Rifle, position, 0.0);
    }
    world.drain_notifications();
    world
}

fn grenade_at(world: &mut CombatWorld, origin: DVec3) {
    let event = BlastEvent::new(BlastSource::Grenade, origin, None, &world.config);
    world.detonate(event, 1.0);
}

#[test]
fn test_damage_follows_falloff() {
    let mut world = populated(OpenField::default(), 0);
    grenade_at(&mut world, DVec3::new(100.5, 100.5, 50.5));

    assert!(!world.is_alive(PlayerId(0)));
    assert!(!world.is_alive(PlayerId(1)));
    assert!(world.is_alive(PlayerId(2)));
    assert!(world.is_alive(PlayerId(3)));
    // beyond the outer radius
    assert_eq!(world.health(PlayerId(4)), Some(100));

    let radii = BlastRadii::new(4.0, 30.0);
    let expected = falloff(10.0, radii);
    let hurt = 100.0 - world.health(PlayerId(2)).unwrap() as f64;
    assert!((hurt - expected).abs() <= 1.0, "{} vs {}", hurt, expected);
    assert!(world.health(PlayerId(3)).unwrap() > world.health(PlayerId(2)).unwrap());
}

#[test]
fn test_wall_shields_from_blast() {
    let mut field = OpenField::default();
    for y in 95..=105 {
        for z in 45..=55 {
            field.place(IVec3::new(105, y, z));
        }
    }
    let mut world = populated(field, 0);
    grenade_at(&mut world, DVec3::new(100.5, 100.5, 50.5));

    assert_eq!(world.health(PlayerId(2)), Some(100));
    assert_eq!(world.health(PlayerId(3)), Some(100));
    assert!(!world.is_alive(PlayerId(1)));
}

#[test]
fn test_blast_kills_are_grenade_kills() {
    let mut world = populated(OpenField::default(), 14);
    let event = BlastEvent::new(BlastSource::HighExplosive, DVec3::new(100.5, 100.5, 50.5), Some(PlayerId(9)), &world.config);
    world.detonate(event, 1.0);

    let kills: Vec<_> = world
        .notifications()
        .iter()
        .filter_map(|n| match n {
            Notification::Killed { victim, killer, category } => Some((*victim, *killer, *category)),
            _ => None,
        })
        .collect();
    assert!(kills.contains(&(PlayerId(0), Some(PlayerId(9)), KillCategory::Grenade)));
    assert!(kills.iter().all(|(_, _, category)| *category == KillCategory::Grenade));
}

#[test]
fn test_belt_command_detonates_on_tick() {
    let mut world = populated(OpenField::default(), 0);
    world.handle_command(PlayerId(0), "/boom 1", 0.5);
    world.run_until(0.0, 1.25, 0.25);
    assert!(world.is_alive(PlayerId(0)));

    world.run_until(1.25, 2.0, 0.25);
    for dead in 0..3 {
        assert!(!world.is_alive(PlayerId(dead)));
    }
    assert!(world.is_alive(PlayerId(3)));
    assert!(world.health(PlayerId(4)).unwrap() < 100);
    assert!(world.notifications().iter().any(|n| matches!(
        n,
        Notification::Killed { victim: PlayerId(2), killer: Some(PlayerId(0)), category: KillCategory::Grenade }
    )));
}
