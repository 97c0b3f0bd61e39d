//! Weapon state machine driven through world ticks

use glam::DVec3;

use milsim::ballistics::Cartridge;
use milsim::core::config::CombatConfig;
use milsim::core::types::{PlayerId, TeamId};
use milsim::session::InputState;
use milsim::simulation::CombatWorld;
use milsim::weapon::{AmmoContainer, WeaponKind, WeaponState};
use milsim::world::Notification;

const GUNNER: PlayerId = PlayerId(7);
const STEP: f64 = 0.125;

fn range(weapon: WeaponKind) -> CombatWorld {
    let mut world = CombatWorld::open_field(CombatConfig::default());
    world.spawn(GUNNER, "gunner", TeamId(0), weapon, DVec3::new(100.0, 100.0, 50.0), 0.0);
    world.drain_notifications();
    world
}

fn trigger(world: &mut CombatWorld, held: bool, now: f64) {
    let input = InputState {
        primary_fire: held,
        ..InputState::default()
    };
    world.set_input(GUNNER, input, now);
}

#[test]
fn test_smg_empties_then_swaps_magazine() {
    let mut world = range(WeaponKind::Smg);
    trigger(&mut world, true, 0.0);

    let mut now = 0.0;
    while world.ammo(GUNNER).unwrap().clip > 0 && now < 10.0 {
        now += STEP;
        world.run_tick(now);
    }
    assert_eq!(world.ammo(GUNNER).unwrap().clip, 0);
    trigger(&mut world, false, now);

    let now = world.run_until(now, now + 3.0, STEP);
    let ammo = world.ammo(GUNNER).unwrap();
    assert_eq!((ammo.clip, ammo.reserve), (30, 60));
    assert!(world
        .notifications()
        .iter()
        .any(|n| matches!(n, Notification::Reloaded { player: GUNNER, .. })));
    assert!(now > 3.0);
}

#[test]
fn test_shotgun_tops_up_one_shell_at_a_time() {
    let mut world = range(WeaponKind::Shotgun);
    for shot in 0..3 {
        world.fire(GUNNER, shot as f64 * 1.0 + 1.0).unwrap();
    }
    assert_eq!(world.ammo(GUNNER).unwrap().clip, 3);

    assert!(world.reload(GUNNER, 3.0));
    world.run_until(3.0, 3.5, STEP);
    assert_eq!(world.ammo(GUNNER).unwrap().clip, 4);
    world.run_until(3.5, 5.0, STEP);
    let ammo = world.ammo(GUNNER).unwrap();
    assert_eq!((ammo.clip, ammo.reserve), (6, 67));
    assert!(!world.session(GUNNER).unwrap().weapon.is_reloading());
}

#[test]
fn test_shotgun_trigger_interrupts_top_up() {
    let mut world = range(WeaponKind::Shotgun);
    world.fire(GUNNER, 1.0).unwrap();
    world.fire(GUNNER, 2.0).unwrap();
    assert!(world.reload(GUNNER, 2.0));

    trigger(&mut world, true, 2.25);
    assert!(!world.session(GUNNER).unwrap().weapon.is_reloading());
    world.run_tick(3.25);
    assert_eq!(world.ammo(GUNNER).unwrap().clip, 3);
}

#[test]
fn test_rifle_cannot_fire_while_reloading() {
    let mut world = range(WeaponKind::Rifle);
    world.fire(GUNNER, 1.0).unwrap();
    assert!(world.reload(GUNNER, 1.0));
    assert!(world.fire(GUNNER, 2.0).is_err());

    world.run_until(1.0, 4.0, STEP);
    let ammo = world.ammo(GUNNER).unwrap();
    // the partly used magazine went back to the pouch
    assert_eq!((ammo.clip, ammo.reserve), (10, 39));
}

#[test]
fn test_death_cancels_reload() {
    let mut world = range(WeaponKind::Rifle);
    world.fire(GUNNER, 1.0).unwrap();
    world.reload(GUNNER, 1.0);
    world.kill(GUNNER, None, milsim::session::KillCategory::Fall, 1.5);
    assert!(!world.session(GUNNER).unwrap().weapon.is_reloading());
}

#[test]
fn test_empty_pouch_reload_is_noop() {
    let mut weapon = WeaponState::new(WeaponKind::Rifle).with_container(AmmoContainer::box_magazines(Cartridge::R762x54, 10, 1));
    weapon.try_fire(0.0, false).unwrap();
    assert!(!weapon.start_reload(1.0));
    assert_eq!(weapon.current(), 9);
    assert_eq!(weapon.reserved(), 0);
}
