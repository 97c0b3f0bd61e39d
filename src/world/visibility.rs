use crate::core::types::Position;

/// Line-of-sight queries against the map
pub trait Visibility {
    /// Is `point` visible from `from`?
    fn can_see(&self, from: Position, point: Position) -> bool;

    /// First solid point along `direction` within `max` metres
    fn cast_ray(&self, origin: Position, direction: Position, max: f64) -> Option<Position>;
}
