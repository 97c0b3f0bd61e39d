//! Flat map with optional blocks and sphere hit volumes
//!
//! Good enough to run skirmishes and tests without the voxel engine. The ground
//! fills every z at or below `ground` (z grows downward). Players are spheres
//! per limb placed relative to the eye position and facing.

use ahash::AHashSet;
use glam::{DVec3, IVec3};

use crate::core::types::{PlayerId, Position};
use crate::injury::LimbKind;
use crate::world::terrain::Terrain;
use crate::world::tracer::{Impact, ProjectileTracer, TraceTarget};
use crate::world::visibility::Visibility;

const MARCH_STEP: f64 = 0.05;

/// Bottom layers that can never be dug through
const BEDROCK: i32 = 62;

#[derive(Debug, Clone)]
pub struct OpenField {
    ground: i32,
    blocks: AHashSet<IVec3>,
    removed: AHashSet<IVec3>,
}

impl Default for OpenField {
    fn default() -> Self {
        Self::new(60)
    }
}

impl OpenField {
    pub fn new(ground: i32) -> Self {
        Self {
            ground,
            blocks: AHashSet::new(),
            removed: AHashSet::new(),
        }
    }

    /// Place a free-standing block
    pub fn place(&mut self, block: IVec3) {
        self.removed.remove(&block);
        self.blocks.insert(block);
    }

    fn block_of(point: Position) -> IVec3 {
        point.floor().as_ivec3()
    }

    /// First solid point along the segment
    fn march(&self, origin: Position, direction: Position, max: f64) -> Option<(IVec3, Position)> {
        let dir = direction.normalize_or_zero();
        if dir == DVec3::ZERO {
            return None;
        }

        let steps = (max / MARCH_STEP).ceil() as usize;
        (1..=steps)
            .map(|i| origin + dir * (i as f64 * MARCH_STEP).min(max))
            .find_map(|p| {
                let block = Self::block_of(p);
                self.is_solid(block).then_some((block, p))
            })
    }
}

impl Visibility for OpenField {
    fn can_see(&self, from: Position, point: Position) -> bool {
        let offset = point - from;
        let distance = offset.length();
        if distance < MARCH_STEP {
            return true;
        }
        // stop short of the target so a point resting on a block stays visible
        self.march(from, offset, distance - MARCH_STEP).is_none()
    }

    fn cast_ray(&self, origin: Position, direction: Position, max: f64) -> Option<Position> {
        self.march(origin, direction, max).map(|(_, p)| p)
    }
}

impl Terrain for OpenField {
    fn is_solid(&self, block: IVec3) -> bool {
        if self.removed.contains(&block) {
            return false;
        }
        block.z >= self.ground || self.blocks.contains(&block)
    }

    fn is_destructible(&self, block: IVec3) -> bool {
        block.z < BEDROCK
    }

    fn destroy_block(&mut self, block: IVec3) -> bool {
        if !self.is_destructible(block) || !self.is_solid(block) {
            return false;
        }
        self.blocks.remove(&block);
        if block.z >= self.ground {
            self.removed.insert(block);
        }
        true
    }

    fn ground_level(&self, x: i32, y: i32) -> i32 {
        let mut z = self.ground;
        while self.removed.contains(&IVec3::new(x, y, z)) && z < BEDROCK {
            z += 1;
        }
        self.blocks
            .iter()
            .filter(|b| b.x == x && b.y == y)
            .map(|b| b.z)
            .fold(z, i32::min)
    }
}

/// Hit sphere of one limb, relative to the eye
struct Volume {
    limb: LimbKind,
    /// Lateral offset (positive = right)
    side: f64,
    /// Depth below the eye
    depth: f64,
    radius: f64,
}

const STANDING: [Volume; 6] = [
    Volume { limb: LimbKind::Head, side: 0.0, depth: 0.0, radius: 0.3 },
    Volume { limb: LimbKind::Torso, side: 0.0, depth: 0.9, radius: 0.45 },
    Volume { limb: LimbKind::ArmLeft, side: -0.6, depth: 0.9, radius: 0.2 },
    Volume { limb: LimbKind::ArmRight, side: 0.6, depth: 0.9, radius: 0.2 },
    Volume { limb: LimbKind::LegLeft, side: -0.2, depth: 2.0, radius: 0.3 },
    Volume { limb: LimbKind::LegRight, side: 0.2, depth: 2.0, radius: 0.3 },
];

/// Crouching shortens the body by this much below the torso
const CROUCH_LIFT: f64 = 0.9;

fn ray_sphere(origin: Position, dir: Position, center: Position, radius: f64) -> Option<f64> {
    let oc = origin - center;
    let b = oc.dot(dir);
    let c = oc.length_squared() - radius * radius;
    let disc = b * b - c;
    if disc < 0.0 {
        return None;
    }
    let sqrt = disc.sqrt();
    [-b - sqrt, -b + sqrt].into_iter().find(|t| *t >= 0.0)
}

/// Nearest limb of `target` struck by the ray, with its distance
pub fn hit_volume(target: &TraceTarget, origin: Position, dir: Position) -> Option<(LimbKind, f64)> {
    let forward = DVec3::new(target.orientation.x, target.orientation.y, 0.0).normalize_or_zero();
    let forward = if forward == DVec3::ZERO { DVec3::X } else { forward };
    let right = DVec3::new(-forward.y, forward.x, 0.0);

    STANDING
        .iter()
        .filter_map(|v| {
            let depth = if target.crouching && v.depth > 1.0 {
                v.depth - CROUCH_LIFT
            } else {
                v.depth
            };
            let center = target.position + right * v.side + DVec3::Z * depth;
            ray_sphere(origin, dir, center, v.radius).map(|t| (v.limb, t))
        })
        .min_by(|a, b| a.1.total_cmp(&b.1))
}

impl ProjectileTracer for OpenField {
    fn trace(
        &self,
        shooter: Option<PlayerId>,
        origin: Position,
        direction: Position,
        max: f64,
        targets: &[TraceTarget],
    ) -> Option<Impact> {
        let dir = direction.normalize_or_zero();
        if dir == DVec3::ZERO {
            return None;
        }

        let player = targets
            .iter()
            .filter(|t| Some(t.id) != shooter)
            .filter_map(|t| hit_volume(t, origin, dir).map(|(limb, d)| (t.id, limb, d)))
            .filter(|(_, _, d)| *d <= max)
            .min_by(|a, b| a.2.total_cmp(&b.2));

        let block = self.march(origin, dir, max);

        match (player, block) {
            (Some((_, _, d)), Some((block, point))) if d > origin.distance(point) => {
                Some(Impact::Block { block, point })
            }
            (Some((target, limb, d)), _) => Some(Impact::Player {
                target,
                limb,
                point: origin + dir * d,
            }),
            (None, Some((block, point))) => Some(Impact::Block { block, point }),
            (None, None) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target(id: u32, position: DVec3) -> TraceTarget {
        TraceTarget {
            id: PlayerId(id),
            position,
            orientation: DVec3::X,
            crouching: false,
        }
    }

    #[test]
    fn test_open_sky_is_visible() {
        let field = OpenField::default();
        assert!(field.can_see(DVec3::new(0.0, 0.0, 50.0), DVec3::new(30.0, 0.0, 50.0)));
    }

    #[test]
    fn test_block_hides_point() {
        let mut field = OpenField::default();
        field.place(IVec3::new(5, 0, 50));
        assert!(!field.can_see(DVec3::new(0.5, 0.5, 50.5), DVec3::new(10.5, 0.5, 50.5)));
    }

    #[test]
    fn test_trace_hits_head() {
        let field = OpenField::default();
        let victim = target(2, DVec3::new(20.0, 0.0, 50.0));
        let hit = field.trace(Some(PlayerId(1)), DVec3::new(0.0, 0.0, 50.0), DVec3::X, 100.0, &[victim]);
        assert!(matches!(
            hit,
            Some(Impact::Player { target: PlayerId(2), limb: LimbKind::Head, .. })
        ));
    }

    #[test]
    fn test_trace_hits_leg_below() {
        let field = OpenField::default();
        let victim = target(2, DVec3::new(20.0, 0.0, 50.0));
        let hit = field.trace(None, DVec3::new(0.0, 0.2, 52.0), DVec3::X, 100.0, &[victim]);
        assert!(matches!(hit, Some(Impact::Player { limb: LimbKind::LegRight | LimbKind::LegLeft, .. })));
    }

    #[test]
    fn test_shooter_is_ignored() {
        let field = OpenField::default();
        let me = target(1, DVec3::new(0.0, 0.0, 50.0));
        let hit = field.trace(Some(PlayerId(1)), DVec3::new(0.0, 0.0, 50.0), DVec3::X, 100.0, &[me]);
        assert!(hit.is_none());
    }

    #[test]
    fn test_block_stops_bullet() {
        let mut field = OpenField::default();
        field.place(IVec3::new(10, 0, 50));
        let victim = target(2, DVec3::new(20.0, 0.5, 50.5));
        let hit = field.trace(None, DVec3::new(0.0, 0.5, 50.5), DVec3::X, 100.0, &[victim]);
        assert!(matches!(hit, Some(Impact::Block { block, .. }) if block == IVec3::new(10, 0, 50)));
    }

    #[test]
    fn test_dig_ground() {
        let mut field = OpenField::new(60);
        let block = IVec3::new(3, 3, 60);
        assert!(field.is_solid(block));
        assert!(field.destroy_block(block));
        assert!(!field.is_solid(block));
        assert!(!field.destroy_block(block));
        assert_eq!(field.ground_level(3, 3), 61);
        assert!(!field.destroy_block(IVec3::new(3, 3, 63)));
    }
}
