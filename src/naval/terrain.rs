//! Sea and land terrain and how each ship class handles it

use serde::{Deserialize, Serialize};

use crate::core::types::Faction;
use crate::naval::constants::{BASE_DEFENSE, FORT_DEFENSE};
use crate::naval::unit_class::UnitClass;

/// Terrain kind of a battlefield tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum TerrainKind {
    #[default]
    Water,      // Open sea
    Shallow,    // Slow for battleships
    Island,     // Land
    Reef,       // Submarines slip over, surface ships grind through
    Fort,       // Land, capturable
    PlayerBase, // Land, capturable
    EnemyBase,  // Land, capturable
}

impl TerrainKind {
    /// Land tiles can never be entered by a ship
    pub fn is_land(&self) -> bool {
        matches!(
            self,
            TerrainKind::Island | TerrainKind::Fort | TerrainKind::PlayerBase | TerrainKind::EnemyBase
        )
    }

    /// Capture sites carry an owner and a defense value
    pub fn is_capture_site(&self) -> bool {
        matches!(
            self,
            TerrainKind::Fort | TerrainKind::PlayerBase | TerrainKind::EnemyBase
        )
    }

    /// Movement points spent entering a tile of this kind, None if it cannot be entered
    pub fn movement_cost(&self, class: UnitClass) -> Option<u32> {
        match self {
            TerrainKind::Water => Some(1),
            TerrainKind::Shallow if class == UnitClass::Battleship => Some(2),
            TerrainKind::Shallow => Some(1),
            TerrainKind::Reef if class == UnitClass::Submarine => Some(1),
            TerrainKind::Reef => Some(2),
            _ => None,
        }
    }

    /// Whether a ship with `movement_points` left may enter (occupancy not considered)
    pub fn can_enter(&self, class: UnitClass, movement_points: u32) -> bool {
        match self {
            TerrainKind::Water => true,
            TerrainKind::Reef => class == UnitClass::Submarine || movement_points >= 2,
            TerrainKind::Shallow => class != UnitClass::Battleship || movement_points >= 2,
            _ => false,
        }
    }

    /// Owner a freshly laid tile of this kind starts with
    pub fn default_owner(&self) -> Option<Faction> {
        match self {
            TerrainKind::PlayerBase => Some(Faction::Player),
            TerrainKind::EnemyBase => Some(Faction::Opponent),
            _ => None,
        }
    }

    /// Defense a freshly laid tile of this kind starts with
    pub fn default_defense(&self) -> i32 {
        match self {
            TerrainKind::Fort => FORT_DEFENSE,
            TerrainKind::PlayerBase | TerrainKind::EnemyBase => BASE_DEFENSE,
            _ => 0,
        }
    }
}
