//! Combat resolution between ships
//!
//! Pure functions: they validate and roll, the session applies the results.
//! Player and commander attacks share this single path.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::error::{AttackRejection, Result};
use crate::naval::constants::{FIRE_CHANCE, FIRE_DURATION, SLOW_CHANCE, SLOW_DURATION};
use crate::naval::effects::DamageOutcome;
use crate::naval::hex::HexCoord;
use crate::naval::unit_class::UnitClass;
use crate::naval::units::Unit;

/// Class-specific follow-up to a direct hit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpecialEffect {
    Ignite { turns: u32 },   // Battleship shell sets the target burning
    Slow { turns: u32 },     // Cruiser shot fouls the target's rudder
    Reveal,                  // Destroyer depth charge forces a submarine up
    Torpedo { damage: u32 }, // Submarine follow-up hit
}

/// What a direct attack did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackReport {
    pub damage: DamageOutcome,
    pub special: Option<SpecialEffect>,
    pub target_destroyed: bool,
}

/// What a shot down a line of fire did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShotReport {
    /// First ship on the line, if any, and the damage it took
    pub hit: Option<(HexCoord, DamageOutcome)>,
}

/// Direct attack preconditions
pub fn check_attack(attacker: &Unit, target: &Unit) -> Result<()> {
    if !attacker.can_attack() {
        return Err(AttackRejection::AlreadyAttacked.into());
    }
    if target.is_destroyed() {
        return Err(AttackRejection::MissingTarget(target.id()).into());
    }
    if target.faction() == attacker.faction() {
        return Err(AttackRejection::FriendlyTarget(target.id()).into());
    }
    let distance = attacker.position().distance(&target.position());
    if distance > attacker.attack_range() {
        return Err(AttackRejection::OutOfRange {
            distance,
            range: attacker.attack_range(),
        }
        .into());
    }
    Ok(())
}

/// Preconditions for firing at (or bombarding) a tile
///
/// The shooter's own tile is a legal aim point; the line skips it, so the shot misses.
pub fn check_fire(attacker: &Unit, coord: HexCoord) -> Result<()> {
    if !attacker.can_attack() {
        return Err(AttackRejection::AlreadyAttacked.into());
    }
    let distance = attacker.position().distance(&coord);
    if distance > attacker.attack_range() {
        return Err(AttackRejection::OutOfRange {
            distance,
            range: attacker.attack_range(),
        }
        .into());
    }
    Ok(())
}

/// Roll the attacker's class follow-up against a target that survived the hit
pub fn roll_special_effect<R: Rng>(
    attacker: &Unit,
    target: &Unit,
    rng: &mut R,
) -> Option<SpecialEffect> {
    match attacker.class() {
        UnitClass::Battleship => (rng.gen::<f32>() < FIRE_CHANCE).then_some(SpecialEffect::Ignite {
            turns: FIRE_DURATION,
        }),
        UnitClass::Cruiser => (rng.gen::<f32>() < SLOW_CHANCE).then_some(SpecialEffect::Slow {
            turns: SLOW_DURATION,
        }),
        UnitClass::Destroyer => (target.class() == UnitClass::Submarine && target.is_stealthed())
            .then_some(SpecialEffect::Reveal),
        UnitClass::Submarine => Some(SpecialEffect::Torpedo {
            damage: attacker.attack_damage() / 2,
        }),
    }
}
