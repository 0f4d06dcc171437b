//! The battlefield: a rectangular offset grid of sea and land tiles
//!
//! The battlefield is the only writer of tile occupancy. Ships are referenced
//! by id; the session owns the ships themselves.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::core::error::{AttackRejection, GameError, MoveRejection, Result};
use crate::core::types::{Faction, UnitId};
use crate::naval::hex::{HexCoord, HexDirection};
use crate::naval::pathfinding;
use crate::naval::terrain::TerrainKind;
use crate::naval::units::Unit;

/// A single tile on the battlefield
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tile {
    pub coord: HexCoord,
    pub terrain: TerrainKind,
    /// Capture sites only; None is neutral
    pub owner: Option<Faction>,
    /// Capture sites only; may go negative on the capturing shot
    pub defense: i32,
    occupant: Option<UnitId>,
}

impl Tile {
    pub fn new(coord: HexCoord, terrain: TerrainKind) -> Self {
        Self {
            coord,
            terrain,
            owner: terrain.default_owner(),
            defense: terrain.default_defense(),
            occupant: None,
        }
    }

    pub fn occupant(&self) -> Option<UnitId> {
        self.occupant
    }

    pub fn is_occupied(&self) -> bool {
        self.occupant.is_some()
    }

    /// Owner id of a capture site: -1 neutral, 0 player, 1 opponent
    pub fn owner_id(&self) -> i32 {
        self.owner.map_or(-1, |f| f.owner_id())
    }
}

/// Where a successful move took a ship
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub unit: UnitId,
    pub from: HexCoord,
    pub to: HexCoord,
    pub facing: HexDirection,
    pub cost: u32,
}

/// Result of a bombardment against a capture site
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptureOutcome {
    pub coord: HexCoord,
    /// Terrain before the bombardment
    pub terrain: TerrainKind,
    pub defense_left: i32,
    pub captured: bool,
}

/// The full battlefield
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Battlefield {
    width: i32,
    height: i32,
    // Column-major: index = col * height + row
    tiles: Vec<Tile>,
}

impl Battlefield {
    /// Open-water battlefield
    pub fn new(width: i32, height: i32) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        let mut tiles = Vec::with_capacity((width * height) as usize);
        for col in 0..width {
            for row in 0..height {
                tiles.push(Tile::new(HexCoord::new(col, row), TerrainKind::Water));
            }
        }
        Self {
            width,
            height,
            tiles,
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn contains(&self, coord: HexCoord) -> bool {
        coord.col >= 0 && coord.row >= 0 && coord.col < self.width && coord.row < self.height
    }

    fn index(&self, coord: HexCoord) -> Option<usize> {
        self.contains(coord)
            .then(|| (coord.col * self.height + coord.row) as usize)
    }

    pub fn tile_at(&self, coord: HexCoord) -> Option<&Tile> {
        self.index(coord).map(|i| &self.tiles[i])
    }

    pub(crate) fn tile_mut(&mut self, coord: HexCoord) -> Option<&mut Tile> {
        self.index(coord).map(move |i| &mut self.tiles[i])
    }

    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter()
    }

    /// Lay terrain, resetting owner and defense to the kind's defaults
    ///
    /// Refused off the map, or when laying land under a ship.
    pub fn set_terrain(&mut self, coord: HexCoord, terrain: TerrainKind) -> bool {
        let Some(tile) = self.tile_mut(coord) else {
            return false;
        };
        if terrain.is_land() && tile.is_occupied() {
            return false;
        }
        let occupant = tile.occupant;
        *tile = Tile::new(coord, terrain);
        tile.occupant = occupant;
        true
    }

    /// Movement points `unit` spends entering `coord`; None if it never can
    pub fn movement_cost(&self, coord: HexCoord, unit: &Unit) -> Option<u32> {
        self.tile_at(coord)?.terrain.movement_cost(unit.class())
    }

    /// Whether the terrain at `coord` admits `unit` now (occupancy not checked)
    pub fn can_enter(&self, coord: HexCoord, unit: &Unit) -> bool {
        self.tile_at(coord)
            .is_some_and(|tile| tile.terrain.can_enter(unit.class(), unit.movement_points()))
    }

    /// Off-map coordinates count as occupied
    pub fn is_occupied(&self, coord: HexCoord) -> bool {
        self.tile_at(coord).map_or(true, |tile| tile.is_occupied())
    }

    pub fn occupant(&self, coord: HexCoord) -> Option<UnitId> {
        self.tile_at(coord).and_then(|tile| tile.occupant)
    }

    /// On-map hexes within `radius` of `center`
    pub fn hexes_in_range(&self, center: HexCoord, radius: u32) -> Vec<HexCoord> {
        center
            .hexes_in_range(radius)
            .into_iter()
            .filter(|coord| self.contains(*coord))
            .collect()
    }

    pub fn reachable_set(&self, unit: &Unit) -> BTreeSet<HexCoord> {
        pathfinding::reachable_set(self, unit)
    }

    pub fn find_route(&self, unit: &Unit, goal: HexCoord) -> Option<Vec<HexCoord>> {
        pathfinding::find_route(self, unit, goal)
    }

    /// Tiles `unit` could target this turn (its own tile excluded)
    pub fn attack_range(&self, unit: &Unit) -> BTreeSet<HexCoord> {
        let origin = unit.position();
        self.hexes_in_range(origin, unit.attack_range())
            .into_iter()
            .filter(|coord| *coord != origin)
            .collect()
    }

    /// First ship along the line of fire from `from` to `to`, origin skipped
    pub fn line_of_fire(&self, from: HexCoord, to: HexCoord) -> Option<(HexCoord, UnitId)> {
        from.line_to(&to)
            .into_iter()
            .skip(1)
            .find_map(|coord| self.occupant(coord).map(|id| (coord, id)))
    }

    /// Nearest unoccupied open-sea tile to `coord` (itself included)
    pub fn nearest_open_water(&self, coord: HexCoord) -> Option<HexCoord> {
        let max_radius = (self.width + self.height) as u32;
        (0..=max_radius).find_map(|radius| {
            coord
                .hexes_in_range(radius)
                .into_iter()
                .filter(|c| c.distance(&coord) == radius)
                .find(|c| {
                    self.tile_at(*c)
                        .is_some_and(|t| !t.terrain.is_land() && !t.is_occupied())
                })
        })
    }

    /// Mark `unit`'s tile as occupied by it
    pub(crate) fn place_unit(&mut self, unit: &Unit) -> bool {
        match self.tile_mut(unit.position()) {
            Some(tile) if !tile.is_occupied() && !tile.terrain.is_land() => {
                tile.occupant = Some(unit.id());
                true
            }
            _ => false,
        }
    }

    /// Clear `coord` if `unit` is the ship standing there
    pub(crate) fn clear_occupant(&mut self, coord: HexCoord, unit: UnitId) {
        if let Some(tile) = self.tile_mut(coord) {
            if tile.occupant == Some(unit) {
                tile.occupant = None;
            }
        }
    }

    /// Move `unit` onto `target`, turning to `facing`
    ///
    /// Deducts the target tile's movement cost. Nothing changes on rejection.
    pub fn move_unit(
        &mut self,
        unit: &mut Unit,
        target: HexCoord,
        facing: HexDirection,
    ) -> Result<MoveRecord> {
        if unit.is_destroyed() {
            return Err(GameError::IllegalState(format!(
                "unit {} is destroyed",
                unit.id()
            )));
        }
        if !self.can_enter(target, unit) {
            return Err(MoveRejection::Impassable.into());
        }
        if self.is_occupied(target) {
            return Err(MoveRejection::Occupied.into());
        }
        let turn = unit.facing().turn_distance(&facing);
        if turn > unit.max_turn_angle() {
            return Err(MoveRejection::TurnTooSharp {
                requested: turn,
                limit: unit.max_turn_angle(),
            }
            .into());
        }
        let cost = self
            .movement_cost(target, unit)
            .ok_or(MoveRejection::Impassable)?;

        let from = unit.position();
        self.clear_occupant(from, unit.id());
        if let Some(tile) = self.tile_mut(target) {
            tile.occupant = Some(unit.id());
        }
        unit.relocate(target, facing, cost);

        Ok(MoveRecord {
            unit: unit.id(),
            from,
            to: target,
            facing,
            cost,
        })
    }

    /// Bombard a capture site with `unit`'s guns
    ///
    /// Only battleships and cruisers can capture, and only forts the player
    /// does not hold yet or the enemy base. At zero defense the player takes
    /// ownership and an enemy base becomes a player base.
    pub fn resolve_tile_capture(&mut self, unit: &Unit, coord: HexCoord) -> Result<CaptureOutcome> {
        if !unit.class().can_capture() {
            return Err(AttackRejection::CannotCapture.into());
        }
        let damage = unit.attack_damage() as i32;
        let tile = self
            .tile_mut(coord)
            .ok_or(AttackRejection::NotCapturable)?;

        let capturable = match tile.terrain {
            TerrainKind::Fort => tile.owner != Some(Faction::Player),
            TerrainKind::EnemyBase => true,
            _ => false,
        };
        if !capturable {
            return Err(AttackRejection::NotCapturable.into());
        }

        let terrain = tile.terrain;
        tile.defense -= damage;
        let captured = tile.defense <= 0;
        if captured {
            tile.owner = Some(Faction::Player);
            if tile.terrain == TerrainKind::EnemyBase {
                tile.terrain = TerrainKind::PlayerBase;
            }
        }

        Ok(CaptureOutcome {
            coord,
            terrain,
            defense_left: tile.defense,
            captured,
        })
    }

    pub fn count_terrain(&self, terrain: TerrainKind) -> usize {
        self.tiles.iter().filter(|t| t.terrain == terrain).count()
    }

    /// Whether any player base still stands
    pub fn has_player_base(&self) -> bool {
        self.count_terrain(TerrainKind::PlayerBase) > 0
    }

    /// At least one fort exists and `faction` holds all of them
    pub fn controls_every_fort(&self, faction: Faction) -> bool {
        let mut forts = self
            .tiles
            .iter()
            .filter(|t| t.terrain == TerrainKind::Fort)
            .peekable();
        forts.peek().is_some() && forts.all(|t| t.owner == Some(faction))
    }
}
