pub mod config;
pub mod error;
pub mod types;

pub use config::{load_session_config, MapConfig, SessionConfig, ShipPlacement};
pub use error::{AttackRejection, GameError, MoveRejection, Result};
pub use types::{Faction, TurnNumber, UnitId};
