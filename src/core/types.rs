//! Core type definitions used throughout the codebase

use glam::DVec3;
use serde::{Deserialize, Serialize};

/// Network-visible player slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u32);

/// Team membership (spectators have no combat session)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TeamId(pub u8);

/// Unique identifier for inventory items
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ItemId(pub u64);

/// Simulation time in seconds
pub type Seconds = f64;

/// World position in map units (1 unit = 1 m). The z axis grows downward.
pub type Position = DVec3;

/// Monotonic allocator for item identifiers
///
/// Owned by whoever creates items and passed down explicitly.
#[derive(Debug, Clone, Default)]
pub struct ItemIdAllocator {
    next: u64,
}

impl ItemIdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hand out the next unused id
    pub fn allocate(&mut self) -> ItemId {
        let id = ItemId(self.next);
        self.next += 1;
        id
    }

    /// Forget every id handed out so far (map change)
    pub fn reset(&mut self) {
        self.next = 0;
    }

    /// Number of ids handed out since the last reset
    pub fn issued(&self) -> u64 {
        self.next
    }
}

/// Axis-aligned playable volume
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: DVec3,
    pub max: DVec3,
}

impl Bounds {
    pub fn new(min: DVec3, max: DVec3) -> Self {
        Self { min, max }
    }

    /// Is the point inside (inclusive)?
    pub fn contains(&self, point: DVec3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self {
            min: DVec3::new(0.0, 0.0, -128.0),
            max: DVec3::new(512.0, 512.0, 64.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_ids_are_unique() {
        let mut ids = ItemIdAllocator::new();
        let a = ids.allocate();
        let b = ids.allocate();
        assert_ne!(a, b);
        assert_eq!(ids.issued(), 2);
    }

    #[test]
    fn test_allocator_reset() {
        let mut ids = ItemIdAllocator::new();
        ids.allocate();
        ids.reset();
        assert_eq!(ids.allocate(), ItemId(0));
    }

    #[test]
    fn test_bounds_contains() {
        let bounds = Bounds::new(DVec3::ZERO, DVec3::splat(10.0));
        assert!(bounds.contains(DVec3::new(5.0, 5.0, 5.0)));
        assert!(bounds.contains(DVec3::splat(10.0)));
        assert!(!bounds.contains(DVec3::new(11.0, 5.0, 5.0)));
        assert!(!bounds.contains(DVec3::new(5.0, -0.1, 5.0)));
    }
}
