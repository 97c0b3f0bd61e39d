//! Kinetic energy delivered at the impact point
//!
//! Velocity decays with the quadratic drag solution `v = v₀ / (1 + k·t·v₀)`,
//! where the flight time over distance `d` is `t = (e^{k·d} − 1) / (k·v₀)`.
//! Work done by gravity over the height difference is added on top.

use crate::ballistics::constants::GRAVITY;
use crate::ballistics::round::Round;
use crate::core::types::Position;

/// Energy at `target` for a round leaving `source` at its rated muzzle speed
pub fn energy_at_impact(round: &Round, source: Position, target: Position) -> f64 {
    energy_at_speed(round, round.muzzle, source, target)
}

/// Energy at `target` for a round leaving `source` at `muzzle` m/s
///
/// Non-positive results mean the projectile does no damage.
pub fn energy_at_speed(round: &Round, muzzle: f64, source: Position, target: Position) -> f64 {
    if !(muzzle > 0.0) || !muzzle.is_finite() {
        return 0.0;
    }

    let distance = source.distance(target);
    // z grows downward, so a shooter above the target has the smaller z
    let height = source.z - target.z;
    let gravity_work = -round.mass * GRAVITY * height;

    let v = speed_at_distance(round, muzzle, distance);
    let kinetic = 0.5 * round.mass * v * v;

    let energy = kinetic + gravity_work;
    if energy.is_finite() {
        energy
    } else {
        0.0
    }
}

/// Remaining speed after `distance` metres of flight
pub fn speed_at_distance(round: &Round, muzzle: f64, distance: f64) -> f64 {
    let k = round.k();
    if k <= 0.0 {
        return muzzle;
    }

    let t = flight_time(round, muzzle, distance);
    muzzle / (1.0 + k * t * muzzle)
}

/// Time of flight over `distance` metres
pub fn flight_time(round: &Round, muzzle: f64, distance: f64) -> f64 {
    let k = round.k();
    if k <= 0.0 {
        return distance / muzzle;
    }
    ((k * distance).exp() - 1.0) / (k * muzzle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec3;

    fn rifle() -> Round {
        Round::new("7.62", 850.0, 0.010, 0.187, 0.00762)
    }

    #[test]
    fn test_point_blank_is_muzzle_energy() {
        let r = rifle();
        let e = energy_at_impact(&r, DVec3::ZERO, DVec3::ZERO);
        assert!((e - 0.5 * 0.010 * 850.0 * 850.0).abs() < 1e-6);
    }

    #[test]
    fn test_energy_decreases_with_distance() {
        let r = rifle();
        let near = energy_at_impact(&r, DVec3::ZERO, DVec3::new(10.0, 0.0, 0.0));
        let far = energy_at_impact(&r, DVec3::ZERO, DVec3::new(200.0, 0.0, 0.0));
        assert!(near > far);
        assert!(far > 0.0);
    }

    #[test]
    fn test_shooting_downhill_gains_energy() {
        let r = rifle();
        let level = energy_at_impact(&r, DVec3::new(0.0, 0.0, 10.0), DVec3::new(30.0, 0.0, 10.0));
        // shooter at z = 0 is ten metres above a target at z = 10
        let down = energy_at_impact(&r, DVec3::new(0.0, 0.0, 0.0), DVec3::new(30.0, 0.0, 10.0));
        let flat_dist =
            energy_at_impact(&r, DVec3::ZERO, DVec3::new(30.0, 0.0, 10.0).length() * DVec3::X);
        assert!(down > flat_dist);
        assert!(level > 0.0);
    }

    #[test]
    fn test_zero_speed_is_no_damage() {
        let r = rifle();
        assert_eq!(energy_at_speed(&r, 0.0, DVec3::ZERO, DVec3::X), 0.0);
        assert_eq!(energy_at_speed(&r, f64::NAN, DVec3::ZERO, DVec3::X), 0.0);
    }

    #[test]
    fn test_slow_heavy_projectile_uphill_is_negative() {
        let r = Round::new("lob", 5.0, 1.0, 1.0, 0.05);
        let e = energy_at_impact(&r, DVec3::new(0.0, 0.0, 10.0), DVec3::new(1.0, 0.0, -10.0));
        assert!(e <= 0.0);
    }
}
