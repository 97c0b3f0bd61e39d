//! Milsim - ballistic combat and injury core for a voxel combat server

pub mod ballistics;
pub mod blast;
pub mod core;
pub mod injury;
pub mod session;
pub mod simulation;
pub mod weapon;
pub mod world;
