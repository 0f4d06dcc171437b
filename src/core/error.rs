use thiserror::Error;

use crate::core::types::UnitId;

/// Why a movement or rotation command was refused
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MoveRejection {
    #[error("target tile cannot be entered")]
    Impassable,

    #[error("target tile is occupied")]
    Occupied,

    #[error("target tile is not reachable with the remaining movement points")]
    Unreachable,

    #[error("turn of {requested} steps exceeds the limit of {limit}")]
    TurnTooSharp { requested: u8, limit: u8 },
}

/// Why an attack, shot or bombardment was refused
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AttackRejection {
    #[error("unit has already attacked this turn")]
    AlreadyAttacked,

    #[error("target {0} is missing or destroyed")]
    MissingTarget(UnitId),

    #[error("target at distance {distance} is beyond range {range}")]
    OutOfRange { distance: u32, range: u32 },

    #[error("target {0} belongs to the attacker's own fleet")]
    FriendlyTarget(UnitId),

    #[error("tile cannot be captured")]
    NotCapturable,

    #[error("this class cannot capture tiles")]
    CannotCapture,

    #[error("this class cannot submerge")]
    CannotSubmerge,
}

#[derive(Error, Debug)]
pub enum GameError {
    #[error("Invalid move: {0}")]
    InvalidMove(#[from] MoveRejection),

    #[error("Invalid attack: {0}")]
    InvalidAttack(#[from] AttackRejection),

    #[error("Illegal state: {0}")]
    IllegalState(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, GameError>;
