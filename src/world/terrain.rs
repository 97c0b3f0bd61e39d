use glam::IVec3;

/// Voxel map operations the combat core needs
pub trait Terrain {
    fn is_solid(&self, block: IVec3) -> bool;

    /// Can this block be destroyed at all (map edges and bedrock cannot)?
    fn is_destructible(&self, block: IVec3) -> bool;

    /// Remove a block. Returns whether anything was removed.
    fn destroy_block(&mut self, block: IVec3) -> bool;

    /// Z of the topmost solid block in the column (z grows downward)
    fn ground_level(&self, x: i32, y: i32) -> i32;
}

/// The 3×3×3 cube around a grenade's detonation block
pub fn grenade_zone(center: IVec3) -> impl Iterator<Item = IVec3> {
    (-1..=1).flat_map(move |dx| {
        (-1..=1).flat_map(move |dy| (-1..=1).map(move |dz| center + IVec3::new(dx, dy, dz)))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grenade_zone_is_27_blocks() {
        let zone: Vec<_> = grenade_zone(IVec3::new(10, 10, 10)).collect();
        assert_eq!(zone.len(), 27);
        assert!(zone.contains(&IVec3::new(9, 11, 10)));
        assert!(!zone.contains(&IVec3::new(12, 10, 10)));
    }
}
