//! Exterior ballistics: projectile parameters, energy at impact, dispersion

pub mod catalog;
pub mod constants;
pub mod dispersion;
pub mod energy;
pub mod round;

pub use catalog::Cartridge;
pub use constants::BLOCK_DESTROY_ENERGY;
pub use dispersion::{cone_spread, gaussian, sample_muzzle, Discharge, Pellet};
pub use energy::{energy_at_impact, energy_at_speed};
pub use round::Round;
