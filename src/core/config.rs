//! Session configuration loaded from TOML
//!
//! A session is fully described by its map parameters, the two fleet
//! layouts and the seed of the session RNG. Every field has a default so a
//! config file only needs to name what it changes; the defaults reproduce the
//! reference 12x8 skirmish.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::core::error::{GameError, Result};
use crate::naval::hex::HexCoord;
use crate::naval::unit_class::UnitClass;

/// Smallest grid the generator can lay both bases and their rings out on
pub const MIN_MAP_WIDTH: i32 = 6;
pub const MIN_MAP_HEIGHT: i32 = 6;

/// Terrain generation parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    /// Columns in the offset grid
    pub width: i32,
    /// Rows in the offset grid
    pub height: i32,
    /// Seed for terrain generation, independent of the combat RNG
    pub terrain_seed: u64,
    /// Number of 3x3 island blobs
    pub island_clusters: u32,
    /// Number of 3x3 reef blobs laid over open water
    pub reef_clusters: u32,
    /// Number of 5x5 shallow patches laid over open water
    pub shallow_patches: u32,
    /// Fort placement attempts (a fort is only placed on open water)
    pub forts: u32,
    /// Starting defense of a neutral fort
    pub fort_defense: i32,
    /// Starting defense of either base
    pub base_defense: i32,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            width: 12,
            height: 8,
            terrain_seed: 42,
            island_clusters: 3,
            reef_clusters: 4,
            shallow_patches: 2,
            forts: 2,
            fort_defense: 50,
            base_defense: 100,
        }
    }
}

impl MapConfig {
    /// Grid size and defenses the generator can work with
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.width < MIN_MAP_WIDTH || self.height < MIN_MAP_HEIGHT {
            return Err(format!(
                "map must be at least {}x{}, got {}x{}",
                MIN_MAP_WIDTH, MIN_MAP_HEIGHT, self.width, self.height
            ));
        }
        if self.fort_defense <= 0 || self.base_defense <= 0 {
            return Err("fort and base defense must be positive".to_string());
        }
        Ok(())
    }
}

/// Where a ship of a given class starts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShipPlacement {
    pub class: UnitClass,
    pub col: i32,
    pub row: i32,
}

impl ShipPlacement {
    pub fn new(class: UnitClass, col: i32, row: i32) -> Self {
        Self { class, col, row }
    }

    pub fn coord(&self) -> HexCoord {
        HexCoord::new(self.col, self.row)
    }
}

/// Everything needed to start a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub map: MapConfig,
    /// Seed for damage rolls, special effects, wind and movement bonuses
    pub rng_seed: u64,
    pub player_fleet: Vec<ShipPlacement>,
    pub opponent_fleet: Vec<ShipPlacement>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        let map = MapConfig::default();
        let (player_fleet, opponent_fleet) = reference_fleets(map.width, map.height);
        Self {
            map,
            rng_seed: 7,
            player_fleet,
            opponent_fleet,
        }
    }
}

impl SessionConfig {
    /// Reference skirmish on a grid of the given size
    pub fn reference(width: i32, height: i32) -> Self {
        let (player_fleet, opponent_fleet) = reference_fleets(width, height);
        Self {
            map: MapConfig {
                width,
                height,
                ..MapConfig::default()
            },
            player_fleet,
            opponent_fleet,
            ..Self::default()
        }
    }

    /// Validate that the configuration is internally consistent
    pub fn validate(&self) -> std::result::Result<(), String> {
        let map = &self.map;
        map.validate()?;
        if self.player_fleet.is_empty() || self.opponent_fleet.is_empty() {
            return Err("both fleets need at least one ship".to_string());
        }
        for placement in self.player_fleet.iter().chain(self.opponent_fleet.iter()) {
            if placement.col < 0
                || placement.row < 0
                || placement.col >= map.width
                || placement.row >= map.height
            {
                return Err(format!(
                    "{:?} placed off the map at ({}, {})",
                    placement.class, placement.col, placement.row
                ));
            }
        }
        Ok(())
    }
}

/// Battleship, cruiser, destroyer and submarine per side; player south, opponent north
fn reference_fleets(width: i32, height: i32) -> (Vec<ShipPlacement>, Vec<ShipPlacement>) {
    let mid = width / 2;
    let player = vec![
        ShipPlacement::new(UnitClass::Battleship, mid, height - 3),
        ShipPlacement::new(UnitClass::Cruiser, mid - 2, height - 2),
        ShipPlacement::new(UnitClass::Destroyer, mid + 2, height - 2),
        ShipPlacement::new(UnitClass::Submarine, mid, height - 1),
    ];
    let opponent = vec![
        ShipPlacement::new(UnitClass::Battleship, mid, 2),
        ShipPlacement::new(UnitClass::Cruiser, mid - 2, 1),
        ShipPlacement::new(UnitClass::Destroyer, mid + 2, 1),
        ShipPlacement::new(UnitClass::Submarine, mid, 3),
    ];
    (player, opponent)
}

/// Load a session description from a TOML file
pub fn load_session_config(path: impl AsRef<Path>) -> Result<SessionConfig> {
    let contents = fs::read_to_string(path.as_ref())?;
    let config: SessionConfig = toml::from_str(&contents)?;
    config.validate().map_err(GameError::Config)?;
    Ok(config)
}
