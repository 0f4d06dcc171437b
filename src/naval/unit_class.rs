//! Ship classes and their fixed statistics

use serde::{Deserialize, Serialize};
use std::fmt;

/// Class of warship
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitClass {
    Battleship, // Slow, long-ranged, hits hard
    Cruiser,    // All-rounder
    Destroyer,  // Fast, short-ranged, hunts submarines
    Submarine,  // Starts submerged, follow-up torpedo
}

/// Fixed statistics of a ship class
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassProfile {
    pub max_health: u32,
    pub max_movement: u32,
    pub attack_range: u32,
    pub attack_damage: u32,
    pub stealth_capable: bool,
}

impl UnitClass {
    pub fn profile(&self) -> ClassProfile {
        match self {
            UnitClass::Battleship => ClassProfile {
                max_health: 150,
                max_movement: 2,
                attack_range: 3,
                attack_damage: 40,
                stealth_capable: false,
            },
            UnitClass::Cruiser => ClassProfile {
                max_health: 100,
                max_movement: 3,
                attack_range: 2,
                attack_damage: 25,
                stealth_capable: false,
            },
            UnitClass::Destroyer => ClassProfile {
                max_health: 75,
                max_movement: 4,
                attack_range: 1,
                attack_damage: 15,
                stealth_capable: false,
            },
            UnitClass::Submarine => ClassProfile {
                max_health: 85,
                max_movement: 3,
                attack_range: 1,
                attack_damage: 30,
                stealth_capable: true,
            },
        }
    }

    /// Heavy guns can batter down forts and bases
    pub fn can_capture(&self) -> bool {
        matches!(self, UnitClass::Battleship | UnitClass::Cruiser)
    }

    /// Damage multiplier this class gets against `target`
    pub fn matchup_multiplier(&self, target: UnitClass) -> f32 {
        use crate::naval::constants::*;
        match (self, target) {
            (UnitClass::Destroyer, UnitClass::Submarine) => DESTROYER_VS_SUBMARINE,
            (UnitClass::Battleship, UnitClass::Cruiser) => BATTLESHIP_VS_CRUISER,
            (UnitClass::Submarine, UnitClass::Battleship) => SUBMARINE_VS_BATTLESHIP,
            _ => 1.0,
        }
    }

    pub fn all() -> [UnitClass; 4] {
        [
            UnitClass::Battleship,
            UnitClass::Cruiser,
            UnitClass::Destroyer,
            UnitClass::Submarine,
        ]
    }
}

impl fmt::Display for UnitClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            UnitClass::Battleship => "battleship",
            UnitClass::Cruiser => "cruiser",
            UnitClass::Destroyer => "destroyer",
            UnitClass::Submarine => "submarine",
        };
        write!(f, "{}", name)
    }
}
