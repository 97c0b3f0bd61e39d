//! Explosion damage falloff
//!
//! Certain death inside `inner`, nothing beyond `outer`, and a square-root
//! ramp in between. Blocked line of sight means no damage at all.

use serde::{Deserialize, Serialize};

use crate::core::config::BlastRadii;
use crate::core::types::{PlayerId, Position};
use crate::world::Visibility;

/// Damage percentage for a target at `distance`, ignoring line of sight
pub fn falloff(distance: f64, radii: BlastRadii) -> f64 {
    if distance >= radii.outer {
        return 0.0;
    }
    if distance <= radii.inner {
        return 100.0;
    }
    let t = (radii.outer - distance) / (radii.outer - radii.inner);
    100.0 * t.sqrt()
}

/// Damage percentage for `target` from an explosion at `origin`
pub fn damage_at<V: Visibility + ?Sized>(
    target: Position,
    visibility: &V,
    origin: Position,
    radii: BlastRadii,
) -> f64 {
    if !visibility.can_see(target, origin) {
        return 0.0;
    }
    falloff(target.distance(origin), radii)
}

/// Who an explosion hurts, and how badly
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BlastVictim {
    pub player: PlayerId,
    pub damage: f64,
}

/// Every target with nonzero damage, in input order
pub fn victims<V: Visibility + ?Sized>(
    targets: &[(PlayerId, Position)],
    visibility: &V,
    origin: Position,
    radii: BlastRadii,
) -> Vec<BlastVictim> {
    targets
        .iter()
        .filter_map(|&(player, position)| {
            let damage = damage_at(position, visibility, origin, radii);
            (damage > 0.0).then_some(BlastVictim { player, damage })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::OpenField;
    use glam::{DVec3, IVec3};

    const GRENADE: BlastRadii = BlastRadii::new(4.0, 30.0);

    #[test]
    fn test_endpoints() {
        assert_eq!(falloff(0.0, GRENADE), 100.0);
        assert_eq!(falloff(4.0, GRENADE), 100.0);
        assert_eq!(falloff(30.0, GRENADE), 0.0);
        assert_eq!(falloff(100.0, GRENADE), 0.0);
    }

    #[test]
    fn test_strictly_decreasing_between_radii() {
        let mut last = 100.0;
        for d in [4.5, 8.0, 15.0, 22.0, 29.9] {
            let v = falloff(d, GRENADE);
            assert!(v < last && v > 0.0);
            last = v;
        }
    }

    #[test]
    fn test_sqrt_ramp() {
        // a quarter of the way in from the outer edge
        let d = 30.0 - 0.25 * 26.0;
        assert!((falloff(d, GRENADE) - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_wall_blocks_blast() {
        let mut field = OpenField::default();
        field.place(IVec3::new(5, 0, 50));
        let origin = DVec3::new(0.5, 0.5, 50.5);
        let behind = DVec3::new(8.5, 0.5, 50.5);
        let open = DVec3::new(0.5, 8.5, 50.5);
        assert_eq!(damage_at(behind, &field, origin, GRENADE), 0.0);
        assert!(damage_at(open, &field, origin, GRENADE) > 0.0);
    }

    #[test]
    fn test_victims_skips_out_of_range() {
        let field = OpenField::default();
        let origin = DVec3::new(0.0, 0.0, 50.0);
        let targets = [
            (PlayerId(1), DVec3::new(2.0, 0.0, 50.0)),
            (PlayerId(2), DVec3::new(40.0, 0.0, 50.0)),
        ];
        let hurt = victims(&targets, &field, origin, GRENADE);
        assert_eq!(hurt.len(), 1);
        assert_eq!(hurt[0].player, PlayerId(1));
        assert_eq!(hurt[0].damage, 100.0);
    }
}
