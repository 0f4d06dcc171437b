//! Warships: health, handling, attack readiness and status effects
//!
//! Fields are private. Position and facing change only through the
//! battlefield's move operation, health only through damage, and movement
//! points only through moves, turn resets and the wind bonus.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::core::types::{Faction, UnitId};
use crate::naval::constants::{DAMAGE_ROLL_MIN, DAMAGE_ROLL_SPREAD, FIRE_DAMAGE, MAX_TURN_ANGLE};
use crate::naval::effects::{DamageOutcome, EffectTick, StatusEffect};
use crate::naval::hex::{HexCoord, HexDirection};
use crate::naval::unit_class::UnitClass;

/// A single warship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Unit {
    id: UnitId,
    class: UnitClass,
    faction: Faction,

    // Condition
    health: u32,
    max_health: u32,
    effects: BTreeMap<StatusEffect, u32>,

    // Handling
    position: HexCoord,
    facing: HexDirection,
    max_turn_angle: u8,
    movement_points: u32,
    max_movement: u32,

    // Combat
    can_attack_this_turn: bool,
    stealthed: bool,
}

impl Unit {
    /// A fresh ship at full strength; player ships face east, opponent ships west
    pub fn new(id: UnitId, class: UnitClass, faction: Faction, position: HexCoord) -> Self {
        let profile = class.profile();
        let facing = match faction {
            Faction::Player => HexDirection::East,
            Faction::Opponent => HexDirection::West,
        };
        Self {
            id,
            class,
            faction,
            health: profile.max_health,
            max_health: profile.max_health,
            effects: BTreeMap::new(),
            position,
            facing,
            max_turn_angle: MAX_TURN_ANGLE,
            movement_points: profile.max_movement,
            max_movement: profile.max_movement,
            can_attack_this_turn: true,
            stealthed: profile.stealth_capable,
        }
    }

    pub fn id(&self) -> UnitId {
        self.id
    }

    pub fn class(&self) -> UnitClass {
        self.class
    }

    pub fn faction(&self) -> Faction {
        self.faction
    }

    pub fn health(&self) -> u32 {
        self.health
    }

    pub fn max_health(&self) -> u32 {
        self.max_health
    }

    pub fn position(&self) -> HexCoord {
        self.position
    }

    pub fn facing(&self) -> HexDirection {
        self.facing
    }

    pub fn max_turn_angle(&self) -> u8 {
        self.max_turn_angle
    }

    pub fn movement_points(&self) -> u32 {
        self.movement_points
    }

    pub fn max_movement(&self) -> u32 {
        self.max_movement
    }

    pub fn can_attack(&self) -> bool {
        self.can_attack_this_turn
    }

    pub fn is_stealthed(&self) -> bool {
        self.stealthed
    }

    pub fn attack_range(&self) -> u32 {
        self.class.profile().attack_range
    }

    pub fn attack_damage(&self) -> u32 {
        self.class.profile().attack_damage
    }

    pub fn effects(&self) -> &BTreeMap<StatusEffect, u32> {
        &self.effects
    }

    /// Turns left on an active effect
    pub fn effect_turns(&self, effect: StatusEffect) -> Option<u32> {
        self.effects.get(&effect).copied()
    }

    pub fn is_destroyed(&self) -> bool {
        self.health == 0
    }

    pub fn is_alive(&self) -> bool {
        !self.is_destroyed()
    }

    /// Whether a turn to `facing` stays within the turn limit
    pub fn can_turn_to(&self, facing: HexDirection) -> bool {
        self.facing.turn_distance(&facing) <= self.max_turn_angle
    }

    /// Facings this ship may take from where it points now
    pub fn available_facings(&self) -> Vec<HexDirection> {
        self.facing.within_turn(self.max_turn_angle)
    }

    /// Rotate in place; refused if the turn is too sharp
    pub fn try_rotate(&mut self, facing: HexDirection) -> bool {
        if self.is_destroyed() || !self.can_turn_to(facing) {
            return false;
        }
        self.facing = facing;
        true
    }

    /// Refill movement, re-arm, then tick status effects
    pub fn reset_for_new_turn(&mut self) -> Vec<EffectTick> {
        if self.is_destroyed() {
            return Vec::new();
        }
        self.movement_points = self.max_movement;
        self.can_attack_this_turn = true;
        self.tick_effects()
    }

    /// Start (or restart) an effect; returns the immediate damage if it burns
    pub fn apply_effect(&mut self, effect: StatusEffect, duration: u32) -> Option<DamageOutcome> {
        if self.is_destroyed() {
            return None;
        }
        self.effects.insert(effect, duration);
        match effect {
            StatusEffect::Fire => Some(self.take_damage(FIRE_DAMAGE)),
            StatusEffect::Slow => {
                self.movement_points = self.movement_points.saturating_sub(1);
                self.max_movement = self.max_movement.saturating_sub(1).max(1);
                None
            }
            StatusEffect::Stealth => {
                if self.class.profile().stealth_capable {
                    self.stealthed = true;
                }
                None
            }
        }
    }

    /// Count every effect down by one turn
    ///
    /// Stops as soon as the ship is destroyed; later effects are left as they were.
    pub fn tick_effects(&mut self) -> Vec<EffectTick> {
        let mut ticks = Vec::new();
        let active: Vec<StatusEffect> = self.effects.keys().copied().collect();

        for effect in active {
            if self.is_destroyed() {
                break;
            }
            let Some(turns) = self.effects.get(&effect).copied() else {
                continue;
            };
            let turns_left = turns.saturating_sub(1);

            if turns_left == 0 {
                self.effects.remove(&effect);
                self.expire(effect);
                ticks.push(EffectTick::Expired { effect });
                continue;
            }

            self.effects.insert(effect, turns_left);
            if effect == StatusEffect::Fire {
                let damage = self.take_damage(FIRE_DAMAGE);
                ticks.push(EffectTick::Burned { effect, damage });
            } else {
                ticks.push(EffectTick::Persisted { effect, turns_left });
            }
        }
        ticks
    }

    fn expire(&mut self, effect: StatusEffect) {
        match effect {
            StatusEffect::Fire => {}
            StatusEffect::Slow => self.max_movement += 1,
            StatusEffect::Stealth => {
                if self.class == UnitClass::Submarine {
                    self.stealthed = false;
                }
            }
        }
    }

    /// Remove health, never below zero; zero health is destruction
    pub fn take_damage(&mut self, amount: u32) -> DamageOutcome {
        let before = self.health;
        self.health = self.health.saturating_sub(amount);
        DamageOutcome {
            dealt: before - self.health,
            remaining: self.health,
            destroyed: self.is_destroyed(),
        }
    }

    /// Roll the damage this ship would deal to `target`
    pub fn compute_damage<R: Rng>(&self, target: &Unit, rng: &mut R) -> u32 {
        let base = self.attack_damage() as f32 * self.class.matchup_multiplier(target.class);
        let roll = DAMAGE_ROLL_MIN + rng.gen::<f32>() * DAMAGE_ROLL_SPREAD;
        (base * roll).round() as u32
    }

    /// Surface a submerged ship; returns whether it was hidden
    pub fn reveal(&mut self) -> bool {
        if self.is_destroyed() || !self.stealthed {
            return false;
        }
        self.stealthed = false;
        self.effects.remove(&StatusEffect::Stealth);
        true
    }

    // Writers used by the battlefield and session

    pub(crate) fn relocate(&mut self, position: HexCoord, facing: HexDirection, cost: u32) {
        self.position = position;
        self.facing = facing;
        self.movement_points = self.movement_points.saturating_sub(cost);
    }

    pub(crate) fn grant_movement(&mut self, bonus: u32) {
        if self.is_alive() {
            self.movement_points += bonus;
        }
    }

    pub(crate) fn spend_attack(&mut self) {
        self.can_attack_this_turn = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn ship(class: UnitClass, faction: Faction) -> Unit {
        Unit::new(UnitId(1), class, faction, HexCoord::new(3, 3))
    }

    #[test]
    fn test_new_unit_from_class_table() {
        let unit = ship(UnitClass::Cruiser, Faction::Player);
        assert_eq!(unit.health(), 100);
        assert_eq!(unit.movement_points(), 3);
        assert_eq!(unit.attack_range(), 2);
        assert!(unit.can_attack());
        assert!(!unit.is_stealthed());
        assert_eq!(unit.facing(), HexDirection::East);
    }

    #[test]
    fn test_submarine_starts_submerged() {
        let sub = ship(UnitClass::Submarine, Faction::Opponent);
        assert!(sub.is_stealthed());
        assert_eq!(sub.facing(), HexDirection::West);
    }

    #[test]
    fn test_rotation_limit() {
        let mut unit = ship(UnitClass::Destroyer, Faction::Player);
        // East -> NorthEast is one step
        assert!(unit.try_rotate(HexDirection::NorthEast));
        // NorthEast -> West is two steps
        assert!(!unit.try_rotate(HexDirection::West));
        assert_eq!(unit.facing(), HexDirection::NorthEast);
        // Wraps: East and SouthEast are one step apart
        assert!(unit.try_rotate(HexDirection::East));
        assert!(unit.try_rotate(HexDirection::SouthEast));
    }

    #[test]
    fn test_available_facings() {
        let unit = ship(UnitClass::Battleship, Faction::Player);
        let facings = unit.available_facings();
        assert_eq!(facings.len(), 3);
        assert!(facings.contains(&HexDirection::SouthEast));
        assert!(!facings.contains(&HexDirection::West));
    }

    #[test]
    fn test_fire_burns_twenty_over_its_life() {
        let mut unit = ship(UnitClass::Battleship, Faction::Player);
        let ignition = unit.apply_effect(StatusEffect::Fire, 2).unwrap();
        assert_eq!(ignition.dealt, 10);
        assert_eq!(unit.health(), 140);

        let ticks = unit.reset_for_new_turn();
        assert!(matches!(ticks[0], EffectTick::Burned { .. }));
        assert_eq!(unit.health(), 130);

        let ticks = unit.reset_for_new_turn();
        assert_eq!(ticks, vec![EffectTick::Expired { effect: StatusEffect::Fire }]);
        assert_eq!(unit.health(), 130);
        assert!(unit.effects().is_empty());
    }

    #[test]
    fn test_slow_costs_a_turn_of_movement() {
        let mut unit = ship(UnitClass::Cruiser, Faction::Player);
        unit.apply_effect(StatusEffect::Slow, 1);
        assert_eq!(unit.movement_points(), 2);
        assert_eq!(unit.max_movement(), 2);

        // Refilled to the reduced maximum before the slow wears off
        unit.reset_for_new_turn();
        assert_eq!(unit.movement_points(), 2);
        assert_eq!(unit.max_movement(), 3);

        unit.reset_for_new_turn();
        assert_eq!(unit.movement_points(), 3);
    }

    #[test]
    fn test_slow_never_drops_max_below_one() {
        let mut unit = ship(UnitClass::Battleship, Faction::Player);
        unit.apply_effect(StatusEffect::Slow, 3);
        unit.apply_effect(StatusEffect::Slow, 3);
        assert_eq!(unit.max_movement(), 1);
        assert_eq!(unit.movement_points(), 0);
    }

    #[test]
    fn test_stealth_expires_on_submarine() {
        let mut sub = ship(UnitClass::Submarine, Faction::Player);
        sub.reveal();
        sub.apply_effect(StatusEffect::Stealth, 1);
        assert!(sub.is_stealthed());
        sub.reset_for_new_turn();
        assert!(!sub.is_stealthed());
    }

    #[test]
    fn test_stealth_ignored_by_surface_ships() {
        let mut unit = ship(UnitClass::Cruiser, Faction::Player);
        unit.apply_effect(StatusEffect::Stealth, 2);
        assert!(!unit.is_stealthed());
    }

    #[test]
    fn test_damage_floors_at_zero() {
        let mut unit = ship(UnitClass::Destroyer, Faction::Player);
        let outcome = unit.take_damage(500);
        assert_eq!(outcome.dealt, 75);
        assert_eq!(outcome.remaining, 0);
        assert!(outcome.destroyed);
        assert!(unit.is_destroyed());
    }

    #[test]
    fn test_destroyed_unit_accepts_no_mutation() {
        let mut unit = ship(UnitClass::Destroyer, Faction::Player);
        unit.take_damage(75);
        assert!(!unit.try_rotate(HexDirection::NorthEast));
        assert!(unit.apply_effect(StatusEffect::Fire, 2).is_none());
        assert!(unit.reset_for_new_turn().is_empty());
        assert!(unit.effects().is_empty());
    }

    #[test]
    fn test_fire_tick_stops_at_destruction() {
        let mut unit = ship(UnitClass::Destroyer, Faction::Player);
        unit.take_damage(70);
        unit.apply_effect(StatusEffect::Slow, 3);
        // Fire ignition destroys it outright
        let ignition = unit.apply_effect(StatusEffect::Fire, 2).unwrap();
        assert!(ignition.destroyed);
        assert!(unit.tick_effects().is_empty());
    }

    #[test]
    fn test_destroyer_vs_submarine_damage_range() {
        let destroyer = ship(UnitClass::Destroyer, Faction::Opponent);
        let sub = ship(UnitClass::Submarine, Faction::Player);
        for seed in 0..200 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let damage = destroyer.compute_damage(&sub, &mut rng);
            assert!((20..=25).contains(&damage), "damage {} out of range", damage);
        }
    }

    #[test]
    fn test_neutral_matchup_damage_range() {
        let cruiser = ship(UnitClass::Cruiser, Faction::Player);
        let destroyer = ship(UnitClass::Destroyer, Faction::Opponent);
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        for _ in 0..100 {
            let damage = cruiser.compute_damage(&destroyer, &mut rng);
            assert!((22..=28).contains(&damage));
        }
    }

    #[test]
    fn test_reveal_only_once() {
        let mut sub = ship(UnitClass::Submarine, Faction::Player);
        assert!(sub.reveal());
        assert!(!sub.reveal());
    }
}
