//! Core type definitions shared by the naval rules engine

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a ship within one session
///
/// Ids are handed out sequentially by the session so that a seeded run
/// always produces the same ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UnitId(pub u32);

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Turn counter (one turn = one player phase plus one opponent phase)
pub type TurnNumber = u32;

/// The two sides of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Faction {
    Player,
    Opponent,
}

impl Faction {
    /// Numeric owner id as used by capture sites (neutral is -1)
    pub fn owner_id(&self) -> i32 {
        match self {
            Faction::Player => 0,
            Faction::Opponent => 1,
        }
    }

    pub fn other(&self) -> Self {
        match self {
            Faction::Player => Faction::Opponent,
            Faction::Opponent => Faction::Player,
        }
    }
}

impl fmt::Display for Faction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Faction::Player => write!(f, "player"),
            Faction::Opponent => write!(f, "opponent"),
        }
    }
}
