//! Chat command parsing
//!
//! Parsing is the only place user text is validated; everything past it works
//! with typed values.

use serde::{Deserialize, Serialize};

use crate::core::error::{MilsimError, Result};
use crate::weapon::GrenadeKind;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Command {
    Bandage,
    Tourniquet,
    Splint,
    Health,
    Ammo,
    Reload,
    /// Load a cartridge into the underbarrel launcher
    Load(GrenadeKind),
    /// Arm the explosive belt with a fuse in seconds
    Boom { fuse: f64 },
    /// Put a landmine on the block in sight
    Mine,
    /// Put a charge on the block in sight and wire it to a detonator
    Charge,
    Detonate,
    /// Take a detonator if missing, plus up to `count` charges
    TakeCharge { count: i64 },
}

impl Command {
    /// Parse a chat line such as `/boom 5`
    pub fn parse(line: &str) -> Result<Self> {
        let mut words = line.trim().trim_start_matches('/').split_whitespace();
        let Some(name) = words.next() else {
            return Err(MilsimError::InvalidInput("Empty command".into()));
        };

        let command = match name.to_ascii_lowercase().as_str() {
            "bandage" | "b" => Command::Bandage,
            "tourniquet" | "t" => Command::Tourniquet,
            "splint" | "s" => Command::Splint,
            "health" | "h" => Command::Health,
            "ammo" | "a" => Command::Ammo,
            "reload" | "r" => Command::Reload,
            "load" | "l" => match words.next().map(str::to_ascii_lowercase).as_deref() {
                Some("grenade") | Some("g") | None => Command::Load(GrenadeKind::Grenade),
                Some("flashbang") | Some("f") => Command::Load(GrenadeKind::Flashbang),
                Some(other) => {
                    return Err(MilsimError::InvalidInput(format!("Unknown cartridge: {}", other)))
                }
            },
            "boom" => {
                let fuse = match words.next() {
                    Some(word) => word
                        .parse::<f64>()
                        .map_err(|_| MilsimError::InvalidInput(format!("Invalid fuse: {}", word)))?,
                    None => 0.0,
                };
                Command::Boom { fuse }
            }
            "mine" | "m" => Command::Mine,
            "charge" | "c" => Command::Charge,
            "detonate" | "de" => Command::Detonate,
            "takecharge" | "tc" => {
                let count = match words.next() {
                    Some(word) => word
                        .parse::<i64>()
                        .map_err(|_| MilsimError::InvalidInput(format!("Invalid number: {}", word)))?,
                    None => 1,
                };
                Command::TakeCharge { count }
            }
            other => return Err(MilsimError::InvalidInput(format!("Unknown command: /{}", other))),
        };

        Ok(command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aliases() {
        assert_eq!(Command::parse("/b").unwrap(), Command::Bandage);
        assert_eq!(Command::parse("/Tourniquet").unwrap(), Command::Tourniquet);
        assert_eq!(Command::parse("splint").unwrap(), Command::Splint);
    }

    #[test]
    fn test_boom_fuse() {
        assert_eq!(Command::parse("/boom 5").unwrap(), Command::Boom { fuse: 5.0 });
        assert_eq!(Command::parse("/boom").unwrap(), Command::Boom { fuse: 0.0 });
        assert!(Command::parse("/boom soon").is_err());
    }

    #[test]
    fn test_load_cartridge() {
        assert_eq!(
            Command::parse("/load flashbang").unwrap(),
            Command::Load(GrenadeKind::Flashbang)
        );
        assert!(Command::parse("/load rocket").is_err());
    }

    #[test]
    fn test_explosive_commands() {
        assert_eq!(Command::parse("/m").unwrap(), Command::Mine);
        assert_eq!(Command::parse("/de").unwrap(), Command::Detonate);
        assert_eq!(Command::parse("/tc").unwrap(), Command::TakeCharge { count: 1 });
        assert_eq!(Command::parse("/takecharge 3").unwrap(), Command::TakeCharge { count: 3 });
        assert!(Command::parse("/tc many").is_err());
    }

    #[test]
    fn test_unknown_and_empty() {
        assert!(matches!(Command::parse("/fly"), Err(MilsimError::InvalidInput(_))));
        assert!(Command::parse("   ").is_err());
    }
}
