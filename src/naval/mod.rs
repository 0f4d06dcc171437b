//! Hex-grid naval skirmish rules
//!
//! Layers, bottom up: hex geometry, terrain and ship classes, ships with
//! status effects, the battlefield with movement search and capture, combat
//! resolution, and the session that sequences turns and decides victory.

pub mod ai;
pub mod battlefield;
pub mod combat;
pub mod constants;
pub mod effects;
pub mod events;
pub mod generation;
pub mod hex;
pub mod pathfinding;
pub mod session;
pub mod terrain;
pub mod unit_class;
pub mod units;
pub mod wind;

pub use ai::{Commander, HoldPosition, NearestTargetCommander};
pub use battlefield::{Battlefield, CaptureOutcome, MoveRecord, Tile};
pub use combat::{AttackReport, ShotReport, SpecialEffect};
pub use effects::{DamageOutcome, EffectTick, StatusEffect};
pub use events::{GameEvent, GameEventLog, GameEventType};
pub use generation::generate_battlefield;
pub use hex::{CubeCoord, HexCoord, HexDirection};
pub use session::{check_victory, GameSession, TurnPhase};
pub use terrain::TerrainKind;
pub use unit_class::{ClassProfile, UnitClass};
pub use units::Unit;
pub use wind::Wind;
