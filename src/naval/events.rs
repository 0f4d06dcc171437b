//! Ordered record of everything the engine did, for the host to drain
//!
//! The presentation layer animates from these events; the engine never calls
//! back into it.

use serde::{Deserialize, Serialize};

use crate::core::types::{Faction, TurnNumber, UnitId};
use crate::naval::effects::StatusEffect;
use crate::naval::hex::{HexCoord, HexDirection};
use crate::naval::session::TurnPhase;
use crate::naval::terrain::TerrainKind;
use crate::naval::wind::Wind;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameEvent {
    pub turn: TurnNumber,
    pub event_type: GameEventType,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEventType {
    UnitSelected { unit: UnitId },
    UnitDeselected { unit: UnitId },
    UnitMoved { unit: UnitId, from: HexCoord, to: HexCoord },
    UnitRotated { unit: UnitId, facing: HexDirection },
    UnitAttacked { attacker: UnitId, target: UnitId },
    UnitDamaged { unit: UnitId, amount: u32, remaining: u32 },
    EffectApplied { unit: UnitId, effect: StatusEffect, turns: u32 },
    EffectExpired { unit: UnitId, effect: StatusEffect },
    StealthRevealed { unit: UnitId },
    ShotFired { attacker: UnitId, target: HexCoord, hit: Option<UnitId> },
    TileBombarded { coord: HexCoord, defense_left: i32 },
    TileCaptured { coord: HexCoord, terrain: TerrainKind },
    UnitDestroyed { unit: UnitId, faction: Faction, at: HexCoord },
    WindShifted { wind: Wind },
    TurnChanged { phase: TurnPhase },
    GameOver { winner: Faction },
}

/// Events accumulated since the host last drained them
#[derive(Debug, Clone, Default)]
pub struct GameEventLog {
    pub events: Vec<GameEvent>,
}

impl GameEventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event_type: GameEventType, description: String, turn: TurnNumber) {
        self.events.push(GameEvent {
            turn,
            event_type,
            description,
        });
    }

    /// Hand every pending event over, oldest first
    pub fn drain(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
