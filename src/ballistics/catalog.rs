//! Known cartridges

use serde::{Deserialize, Serialize};

use crate::ballistics::constants::{isosceles, moa, GRAIN, GRAM, MILLIMETER, SPHERE_DRAG};
use crate::ballistics::round::Round;

/// A loadable cartridge type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cartridge {
    R762x54,
    Hei762x54,
    Parabellum,
    Buckshot0000,
    Buckshot00,
    Slug,
}

impl Cartridge {
    pub fn round(self) -> Round {
        match self {
            Cartridge::R762x54 => r762x54(),
            Cartridge::Hei762x54 => hei762x54(),
            Cartridge::Parabellum => parabellum(),
            Cartridge::Buckshot0000 => buckshot_0000(),
            Cartridge::Buckshot00 => buckshot_00(),
            Cartridge::Slug => slug(),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Cartridge::R762x54 => "7.62x54R",
            Cartridge::Hei762x54 => "HEI 7.62x54R",
            Cartridge::Parabellum => "9x19 Parabellum",
            Cartridge::Buckshot0000 => "0000 Buckshot",
            Cartridge::Buckshot00 => "00 Buckshot",
            Cartridge::Slug => "Slug",
        }
    }

    /// Loaded one at a time into a tube rather than sold in magazines
    pub fn is_shotshell(self) -> bool {
        matches!(self, Cartridge::Buckshot0000 | Cartridge::Buckshot00 | Cartridge::Slug)
    }
}

/// Frontal area of a blast fragment (m²)
pub const FRAGMENT_AREA: f64 = 1e-4;

/// Drag coefficient assumed for blast fragments
pub const FRAGMENT_DRAG: f64 = 1.0;

/// Buckshot pattern: 40 inches at 25 yards
fn buckshot_pattern() -> f64 {
    isosceles(25.0 * 0.9144, 40.0 * 0.0254)
}

pub fn r762x54() -> Round {
    Round::new("7.62x54R", 850.0, 10.0 * GRAM, 0.187, 7.62 * MILLIMETER)
        .with_deviation(0.03)
        .with_spread(moa(0.7))
}

pub fn parabellum() -> Round {
    Round::new("9x19 Parabellum", 600.0, 8.03 * GRAM, 0.212, 9.0 * MILLIMETER)
        .with_deviation(0.05)
        .with_spread(moa(2.5))
}

pub fn buckshot_0000() -> Round {
    Round::with_drag_coefficient("0000 Buckshot", 457.0, 82.0 * GRAIN, SPHERE_DRAG, 9.65 * MILLIMETER)
        .with_pellets(15)
        .with_deviation(0.10)
        .with_spread(buckshot_pattern())
}

pub fn buckshot_00() -> Round {
    Round::with_drag_coefficient("00 Buckshot", 396.24, 350.0 * GRAIN, SPHERE_DRAG, 8.38 * MILLIMETER)
        .with_pellets(5)
        .with_deviation(0.10)
        .with_spread(buckshot_pattern())
}

pub fn slug() -> Round {
    Round::with_drag_coefficient("Slug", 540.0, 109.375 * GRAIN, SPHERE_DRAG, 10.4 * MILLIMETER)
        .with_deviation(0.10)
}

pub fn hei762x54() -> Round {
    Round::new("HEI 7.62x54R", 820.0, 160.0 * GRAM, 0.190, 7.62 * MILLIMETER)
        .with_deviation(0.07)
        .with_spread(moa(2.0))
        .explosive()
}

/// A blast fragment of `mass` kg
pub fn fragment(mass: f64, speed: f64) -> Round {
    Round::with_area("Fragment", speed, mass, FRAGMENT_DRAG, FRAGMENT_AREA).explosive()
}
