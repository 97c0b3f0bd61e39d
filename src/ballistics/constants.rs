//! Physical constants for exterior ballistics

/// Air density at sea level (kg/m³)
pub const AIR_DENSITY: f64 = 1.225;

/// Gravitational acceleration (m/s²)
pub const GRAVITY: f64 = 9.81;

/// Converts a ballistic coefficient into a drag coefficient
pub const DRAG_FACTOR: f64 = 0.5191;

/// Drag coefficient of a sphere at subsonic speed (shot pellets)
pub const SPHERE_DRAG: f64 = 0.47;

/// Energy a shot must still carry to break a block (J)
pub const BLOCK_DESTROY_ENERGY: f64 = 2500.0;

/// Longest distance a projectile is traced (m)
pub const MAX_TRACE_DISTANCE: f64 = 400.0;

// Unit conversions
pub const GRAIN: f64 = 6.479_891e-5;
pub const GRAM: f64 = 1e-3;
pub const MILLIMETER: f64 = 1e-3;

/// One minute of angle in radians
pub fn moa(minutes: f64) -> f64 {
    (minutes / 60.0).to_radians()
}

/// Half-angle of a pattern of width `base` at `distance`
pub fn isosceles(distance: f64, base: f64) -> f64 {
    (base / 2.0).atan2(distance)
}
