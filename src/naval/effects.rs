//! Timed status effects carried by ships

use serde::{Deserialize, Serialize};

/// A timed condition on a ship
///
/// Ordering is the order effects tick in at the start of a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StatusEffect {
    Fire,    // Burns for FIRE_DAMAGE on ignition and each turn
    Slow,    // One less movement point while active
    Stealth, // Submerged; hidden from everything but destroyers
}

/// Result of applying damage to a ship
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DamageOutcome {
    /// Health actually removed
    pub dealt: u32,
    pub remaining: u32,
    pub destroyed: bool,
}

/// What happened to one effect when the ledger ticked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EffectTick {
    Burned {
        effect: StatusEffect,
        damage: DamageOutcome,
    },
    Persisted {
        effect: StatusEffect,
        turns_left: u32,
    },
    Expired {
        effect: StatusEffect,
    },
}

impl EffectTick {
    pub fn effect(&self) -> StatusEffect {
        match self {
            EffectTick::Burned { effect, .. }
            | EffectTick::Persisted { effect, .. }
            | EffectTick::Expired { effect } => *effect,
        }
    }
}
