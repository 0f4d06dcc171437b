//! Game session: turn sequencing, command validation and victory
//!
//! The session owns both fleets, the battlefield and the session RNG. Every
//! command validates completely before it writes anything; a rejected command
//! leaves the session untouched. Destruction is handled the moment damage
//! lands: the ship leaves its roster and tile, and victory is re-evaluated.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use crate::core::config::SessionConfig;
use crate::core::error::{AttackRejection, GameError, MoveRejection, Result};
use crate::core::types::{Faction, TurnNumber, UnitId};
use crate::naval::ai::{Commander, NearestTargetCommander};
use crate::naval::battlefield::{Battlefield, CaptureOutcome, MoveRecord, Tile};
use crate::naval::combat::{self, AttackReport, ShotReport, SpecialEffect};
use crate::naval::constants::{STEALTH_DURATION, WIND_BONUS_CHANCE, WIND_BONUS_MOVEMENT};
use crate::naval::effects::{DamageOutcome, EffectTick, StatusEffect};
use crate::naval::events::{GameEvent, GameEventLog, GameEventType};
use crate::naval::generation::generate_battlefield;
use crate::naval::hex::{HexCoord, HexDirection};
use crate::naval::unit_class::UnitClass;
use crate::naval::units::Unit;
use crate::naval::wind::Wind;

/// Whose move it is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnPhase {
    PlayerTurn,
    OpponentTurn,
    GameOver { winner: Faction },
}

impl TurnPhase {
    /// The faction allowed to act, None once the game is over
    pub fn active_faction(&self) -> Option<Faction> {
        match self {
            TurnPhase::PlayerTurn => Some(Faction::Player),
            TurnPhase::OpponentTurn => Some(Faction::Opponent),
            TurnPhase::GameOver { .. } => None,
        }
    }
}

/// A running skirmish
pub struct GameSession {
    battlefield: Battlefield,
    player_fleet: Vec<Unit>,
    opponent_fleet: Vec<Unit>,

    // Turn state
    phase: TurnPhase,
    turn: TurnNumber,
    wind: Wind,
    selected: Option<UnitId>,

    events: GameEventLog,
    rng: ChaCha8Rng,
    commander: Option<Box<dyn Commander>>,
    next_unit_id: u32,
    // Victory is only judged once both fleets were on the board at the start
    victory_armed: bool,
}

impl fmt::Debug for GameSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameSession")
            .field("phase", &self.phase)
            .field("turn", &self.turn)
            .field("wind", &self.wind)
            .field("player_fleet", &self.player_fleet.len())
            .field("opponent_fleet", &self.opponent_fleet.len())
            .field("selected", &self.selected)
            .field("pending_events", &self.events.len())
            .finish()
    }
}

impl GameSession {
    /// Generate a battlefield, deploy both fleets and open the first player turn
    pub fn start(config: &SessionConfig) -> Result<Self> {
        config.validate().map_err(GameError::Config)?;
        let battlefield = generate_battlefield(&config.map)?;
        let player: Vec<_> = config
            .player_fleet
            .iter()
            .map(|p| (p.class, p.coord()))
            .collect();
        let opponent: Vec<_> = config
            .opponent_fleet
            .iter()
            .map(|p| (p.class, p.coord()))
            .collect();
        Self::with_battlefield(battlefield, &player, &opponent, config.rng_seed)
    }

    /// Start on a prepared battlefield
    ///
    /// A placement on land or on another ship moves to the nearest open water.
    pub fn with_battlefield(
        battlefield: Battlefield,
        player: &[(UnitClass, HexCoord)],
        opponent: &[(UnitClass, HexCoord)],
        rng_seed: u64,
    ) -> Result<Self> {
        let mut rng = ChaCha8Rng::seed_from_u64(rng_seed);
        let wind = Wind::random(&mut rng);
        let mut session = Self {
            battlefield,
            player_fleet: Vec::new(),
            opponent_fleet: Vec::new(),
            phase: TurnPhase::PlayerTurn,
            turn: 0,
            wind,
            selected: None,
            events: GameEventLog::new(),
            rng,
            commander: None,
            next_unit_id: 1,
            victory_armed: false,
        };

        for &(class, coord) in player {
            session.deploy(Faction::Player, class, coord)?;
        }
        for &(class, coord) in opponent {
            session.deploy(Faction::Opponent, class, coord)?;
        }
        session.victory_armed =
            !session.player_fleet.is_empty() && !session.opponent_fleet.is_empty();

        tracing::info!(
            player_ships = session.player_fleet.len(),
            opponent_ships = session.opponent_fleet.len(),
            seed = rng_seed,
            "Session started"
        );
        session.begin_player_turn();
        Ok(session)
    }

    fn deploy(&mut self, faction: Faction, class: UnitClass, requested: HexCoord) -> Result<UnitId> {
        let coord = self.battlefield.nearest_open_water(requested).ok_or_else(|| {
            GameError::Config(format!("no open water left to deploy a {}", class))
        })?;
        if coord != requested {
            tracing::debug!(?requested, ?coord, %class, "Placement moved to open water");
        }

        let id = UnitId(self.next_unit_id);
        self.next_unit_id += 1;
        let unit = Unit::new(id, class, faction, coord);
        self.battlefield.place_unit(&unit);
        self.fleet_mut(faction).push(unit);
        Ok(id)
    }

    /// Replace the policy that plays the opponent fleet
    pub fn set_commander(&mut self, commander: Box<dyn Commander>) {
        self.commander = Some(commander);
    }

    // ===== QUERIES =====

    pub fn battlefield(&self) -> &Battlefield {
        &self.battlefield
    }

    pub fn tile_at(&self, coord: HexCoord) -> Option<&Tile> {
        self.battlefield.tile_at(coord)
    }

    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    pub fn turn(&self) -> TurnNumber {
        self.turn
    }

    pub fn wind(&self) -> Wind {
        self.wind
    }

    pub fn is_game_over(&self) -> bool {
        matches!(self.phase, TurnPhase::GameOver { .. })
    }

    pub fn winner(&self) -> Option<Faction> {
        match self.phase {
            TurnPhase::GameOver { winner } => Some(winner),
            _ => None,
        }
    }

    /// Live ships of a faction in roster order
    pub fn fleet(&self, faction: Faction) -> &[Unit] {
        match faction {
            Faction::Player => &self.player_fleet,
            Faction::Opponent => &self.opponent_fleet,
        }
    }

    fn fleet_mut(&mut self, faction: Faction) -> &mut Vec<Unit> {
        match faction {
            Faction::Player => &mut self.player_fleet,
            Faction::Opponent => &mut self.opponent_fleet,
        }
    }

    fn fleet_ids(&self, faction: Faction) -> Vec<UnitId> {
        self.fleet(faction).iter().map(|u| u.id()).collect()
    }

    pub fn unit(&self, id: UnitId) -> Option<&Unit> {
        self.player_fleet
            .iter()
            .chain(self.opponent_fleet.iter())
            .find(|u| u.id() == id)
    }

    fn unit_mut(&mut self, id: UnitId) -> Option<&mut Unit> {
        self.player_fleet
            .iter_mut()
            .chain(self.opponent_fleet.iter_mut())
            .find(|u| u.id() == id)
    }

    fn unit_and_battlefield(&mut self, id: UnitId) -> Option<(&mut Battlefield, &mut Unit)> {
        let unit = self
            .player_fleet
            .iter_mut()
            .chain(self.opponent_fleet.iter_mut())
            .find(|u| u.id() == id)?;
        Some((&mut self.battlefield, unit))
    }

    fn require_unit(&self, id: UnitId) -> Result<&Unit> {
        self.unit(id)
            .ok_or_else(|| GameError::IllegalState(format!("unit {} is destroyed or unknown", id)))
    }

    pub fn selected_unit(&self) -> Option<&Unit> {
        self.selected.and_then(|id| self.unit(id))
    }

    pub fn reachable_set(&self, id: UnitId) -> Result<BTreeSet<HexCoord>> {
        Ok(self.battlefield.reachable_set(self.require_unit(id)?))
    }

    pub fn attack_range(&self, id: UnitId) -> Result<BTreeSet<HexCoord>> {
        Ok(self.battlefield.attack_range(self.require_unit(id)?))
    }

    /// Cheapest route for a move the host wants to animate
    pub fn find_route(&self, id: UnitId, goal: HexCoord) -> Result<Option<Vec<HexCoord>>> {
        Ok(self.battlefield.find_route(self.require_unit(id)?, goal))
    }

    pub fn movement_cost(&self, coord: HexCoord, id: UnitId) -> Result<Option<u32>> {
        Ok(self.battlefield.movement_cost(coord, self.require_unit(id)?))
    }

    pub fn can_enter(&self, coord: HexCoord, id: UnitId) -> Result<bool> {
        Ok(self.battlefield.can_enter(coord, self.require_unit(id)?))
    }

    pub fn is_occupied(&self, coord: HexCoord) -> bool {
        self.battlefield.is_occupied(coord)
    }

    /// Events not yet drained by the host
    pub fn pending_events(&self) -> &[GameEvent] {
        &self.events.events
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.events.drain()
    }

    fn log(&mut self, event_type: GameEventType, description: String) {
        self.events.push(event_type, description, self.turn);
    }

    // ===== COMMANDS =====

    /// Faction whose turn it is, or IllegalState once the game is over
    fn active_faction(&self) -> Result<Faction> {
        self.phase
            .active_faction()
            .ok_or_else(|| GameError::IllegalState("the game is over".to_string()))
    }

    /// A live ship belonging to the faction whose turn it is
    fn acting_unit(&self, id: UnitId) -> Result<&Unit> {
        let active = self.active_faction()?;
        let unit = self.require_unit(id)?;
        if unit.faction() != active {
            return Err(GameError::IllegalState(format!(
                "unit {} cannot act during the {} turn",
                id, active
            )));
        }
        Ok(unit)
    }

    pub fn select_unit(&mut self, id: UnitId) -> Result<()> {
        let unit = self.acting_unit(id)?;
        if unit.faction() != Faction::Player {
            return Err(GameError::IllegalState(format!(
                "unit {} is not a player ship",
                id
            )));
        }
        if self.selected == Some(id) {
            return Ok(());
        }
        self.deselect_unit();
        self.selected = Some(id);
        self.log(GameEventType::UnitSelected { unit: id }, format!("Selected {}", id));
        Ok(())
    }

    /// Clear the selection, returning what was selected
    pub fn deselect_unit(&mut self) -> Option<UnitId> {
        let previous = self.selected.take()?;
        self.log(
            GameEventType::UnitDeselected { unit: previous },
            format!("Deselected {}", previous),
        );
        Some(previous)
    }

    /// Move a ship to a tile in its reachable set, turning to `facing`
    pub fn move_unit(
        &mut self,
        id: UnitId,
        target: HexCoord,
        facing: HexDirection,
    ) -> Result<MoveRecord> {
        let unit = self.acting_unit(id)?;
        if !self.battlefield.reachable_set(unit).contains(&target) {
            let reason = if !self.battlefield.can_enter(target, unit) {
                MoveRejection::Impassable
            } else if self.battlefield.is_occupied(target) {
                MoveRejection::Occupied
            } else {
                MoveRejection::Unreachable
            };
            return Err(reason.into());
        }

        let (battlefield, unit) = self
            .unit_and_battlefield(id)
            .ok_or_else(|| GameError::IllegalState(format!("unit {} vanished", id)))?;
        let record = battlefield.move_unit(unit, target, facing)?;

        tracing::debug!(unit = %id, from = ?record.from, to = ?record.to, cost = record.cost, "Unit moved");
        self.log(
            GameEventType::UnitMoved {
                unit: id,
                from: record.from,
                to: record.to,
            },
            format!(
                "{} moved from ({}, {}) to ({}, {})",
                id, record.from.col, record.from.row, record.to.col, record.to.row
            ),
        );
        Ok(record)
    }

    /// Turn a ship in place
    pub fn rotate_unit(&mut self, id: UnitId, facing: HexDirection) -> Result<()> {
        let unit = self.acting_unit(id)?;
        let requested = unit.facing().turn_distance(&facing);
        let limit = unit.max_turn_angle();
        let rotated = self
            .unit_mut(id)
            .is_some_and(|unit| unit.try_rotate(facing));
        if !rotated {
            return Err(MoveRejection::TurnTooSharp { requested, limit }.into());
        }
        self.log(
            GameEventType::UnitRotated { unit: id, facing },
            format!("{} now faces {:?}", id, facing),
        );
        Ok(())
    }

    /// Direct attack on a ship within range
    pub fn attack(&mut self, attacker_id: UnitId, target_id: UnitId) -> Result<AttackReport> {
        let attacker = self.acting_unit(attacker_id)?.clone();
        let target = self
            .unit(target_id)
            .cloned()
            .ok_or(AttackRejection::MissingTarget(target_id))?;
        combat::check_attack(&attacker, &target)?;

        let damage = attacker.compute_damage(&target, &mut self.rng);
        self.log(
            GameEventType::UnitAttacked {
                attacker: attacker_id,
                target: target_id,
            },
            format!("{} {} attacks {} {}", attacker.class(), attacker_id, target.class(), target_id),
        );
        tracing::debug!(attacker = %attacker_id, target = %target_id, damage, "Attack resolved");

        let outcome = self.damage_unit(target_id, damage);
        let mut special = None;
        if !outcome.destroyed {
            // Roll against the target as it stands after the hit
            if let Some(target) = self.unit(target_id).cloned() {
                special = combat::roll_special_effect(&attacker, &target, &mut self.rng);
            }
            if let Some(effect) = special {
                self.apply_special_effect(target_id, effect);
            }
        }

        if let Some(unit) = self.unit_mut(attacker_id) {
            unit.spend_attack();
        }

        let target_destroyed = self.unit(target_id).is_none();
        Ok(AttackReport {
            damage: outcome,
            special,
            target_destroyed,
        })
    }

    /// Fire down the line towards `coord`; the first ship on it takes the shot
    ///
    /// Friendly ships block and take the hit too.
    pub fn fire_at(&mut self, attacker_id: UnitId, coord: HexCoord) -> Result<ShotReport> {
        let attacker = self.acting_unit(attacker_id)?.clone();
        combat::check_fire(&attacker, coord)?;

        let hit = self.battlefield.line_of_fire(attacker.position(), coord);
        self.log(
            GameEventType::ShotFired {
                attacker: attacker_id,
                target: coord,
                hit: hit.map(|(_, id)| id),
            },
            match hit {
                Some((_, id)) => format!("{} fires at ({}, {}) and hits {}", attacker_id, coord.col, coord.row, id),
                None => format!("{} fires at ({}, {}) and misses", attacker_id, coord.col, coord.row),
            },
        );

        let hit = hit.map(|(at, id)| (at, self.damage_unit(id, attacker.attack_damage())));
        if let Some(unit) = self.unit_mut(attacker_id) {
            unit.spend_attack();
        }
        Ok(ShotReport { hit })
    }

    /// Shell a fort or the enemy base; enough damage captures it for the player
    pub fn bombard(&mut self, attacker_id: UnitId, coord: HexCoord) -> Result<CaptureOutcome> {
        let attacker = self.acting_unit(attacker_id)?.clone();
        if attacker.faction() != Faction::Player {
            return Err(GameError::IllegalState(
                "only the player captures tiles".to_string(),
            ));
        }
        combat::check_fire(&attacker, coord)?;

        let outcome = self.battlefield.resolve_tile_capture(&attacker, coord)?;
        if let Some(unit) = self.unit_mut(attacker_id) {
            unit.spend_attack();
        }

        self.log(
            GameEventType::TileBombarded {
                coord,
                defense_left: outcome.defense_left,
            },
            format!(
                "{} bombards {:?} at ({}, {}), defense {}",
                attacker_id, outcome.terrain, coord.col, coord.row, outcome.defense_left
            ),
        );
        if outcome.captured {
            tracing::info!(?coord, terrain = ?outcome.terrain, "Tile captured");
            self.log(
                GameEventType::TileCaptured {
                    coord,
                    terrain: outcome.terrain,
                },
                format!("{:?} at ({}, {}) captured", outcome.terrain, coord.col, coord.row),
            );
            self.evaluate_victory();
        }
        Ok(outcome)
    }

    /// Dive a surfaced submarine; uses the turn's attack
    pub fn submerge(&mut self, id: UnitId) -> Result<()> {
        let unit = self.acting_unit(id)?;
        if !unit.class().profile().stealth_capable {
            return Err(AttackRejection::CannotSubmerge.into());
        }
        if !unit.can_attack() {
            return Err(AttackRejection::AlreadyAttacked.into());
        }
        if unit.is_stealthed() {
            return Err(GameError::IllegalState(format!("unit {} is already submerged", id)));
        }

        if let Some(unit) = self.unit_mut(id) {
            unit.apply_effect(StatusEffect::Stealth, STEALTH_DURATION);
            unit.spend_attack();
        }
        self.log(
            GameEventType::EffectApplied {
                unit: id,
                effect: StatusEffect::Stealth,
                turns: STEALTH_DURATION,
            },
            format!("{} submerges", id),
        );
        Ok(())
    }

    /// Hand the turn to the opponent, let its commander play, then start the next player turn
    pub fn end_player_turn(&mut self) -> Result<()> {
        match self.phase {
            TurnPhase::PlayerTurn => {}
            TurnPhase::OpponentTurn => {
                return Err(GameError::IllegalState(
                    "it is not the player's turn".to_string(),
                ))
            }
            TurnPhase::GameOver { .. } => {
                return Err(GameError::IllegalState("the game is over".to_string()))
            }
        }

        self.deselect_unit();
        self.phase = TurnPhase::OpponentTurn;
        self.log(
            GameEventType::TurnChanged {
                phase: TurnPhase::OpponentTurn,
            },
            format!("Turn {}: opponent to move", self.turn),
        );
        tracing::debug!(turn = self.turn, "Opponent turn");

        self.reset_fleet(Faction::Opponent);
        self.evaluate_victory();

        if !self.is_game_over() {
            let mut commander = self
                .commander
                .take()
                .unwrap_or_else(|| Box::new(NearestTargetCommander::new()) as Box<dyn Commander>);
            let pass = self.run_commander_pass(Faction::Opponent, commander.as_mut());
            self.commander = Some(commander);
            pass?;
        }

        if !self.is_game_over() {
            self.begin_player_turn();
        }
        Ok(())
    }

    /// Let `commander` act for every live ship of `faction`, in roster order
    ///
    /// Individual ship orders that fail are skipped.
    pub fn run_commander_pass(
        &mut self,
        faction: Faction,
        commander: &mut dyn Commander,
    ) -> Result<()> {
        if self.active_faction()? != faction {
            return Err(GameError::IllegalState(format!(
                "it is not the {} turn",
                faction
            )));
        }

        for id in self.fleet_ids(faction) {
            if self.is_game_over() {
                break;
            }
            if self.unit(id).is_none() {
                continue;
            }
            if let Err(err) = commander.command_unit(self, id) {
                tracing::debug!(unit = %id, commander = commander.name(), %err, "Order skipped");
            }
        }
        Ok(())
    }

    // ===== TURN FLOW =====

    fn begin_player_turn(&mut self) {
        self.turn += 1;
        self.phase = TurnPhase::PlayerTurn;
        self.wind.shift(&mut self.rng);
        let wind = self.wind;
        self.log(
            GameEventType::WindShifted { wind },
            format!("Wind {} at strength {}", wind.direction, wind.strength),
        );
        self.log(
            GameEventType::TurnChanged {
                phase: TurnPhase::PlayerTurn,
            },
            format!("Turn {}: player to move", self.turn),
        );
        tracing::debug!(turn = self.turn, "Player turn");

        self.reset_fleet(Faction::Player);
        self.evaluate_victory();
    }

    /// Turn reset for every ship of a faction, plus the wind's movement bonus
    fn reset_fleet(&mut self, faction: Faction) {
        for id in self.fleet_ids(faction) {
            let Some(unit) = self.unit_mut(id) else {
                continue;
            };
            let class = unit.class();
            let ticks = unit.reset_for_new_turn();
            self.record_effect_ticks(id, &ticks);
            if self.handle_destruction(id) {
                continue;
            }

            if class != UnitClass::Submarine && self.rng.gen::<f32>() < WIND_BONUS_CHANCE {
                if let Some(unit) = self.unit_mut(id) {
                    unit.grant_movement(WIND_BONUS_MOVEMENT);
                }
                tracing::trace!(unit = %id, "Favourable wind");
            }
        }
    }

    fn record_effect_ticks(&mut self, id: UnitId, ticks: &[EffectTick]) {
        for tick in ticks {
            match *tick {
                EffectTick::Burned { damage, .. } => self.log(
                    GameEventType::UnitDamaged {
                        unit: id,
                        amount: damage.dealt,
                        remaining: damage.remaining,
                    },
                    format!("{} burns for {}", id, damage.dealt),
                ),
                EffectTick::Expired { effect } => self.log(
                    GameEventType::EffectExpired { unit: id, effect },
                    format!("{:?} on {} wears off", effect, id),
                ),
                EffectTick::Persisted { .. } => {}
            }
        }
    }

    // ===== DAMAGE & DESTRUCTION =====

    /// Apply damage and resolve destruction on the spot
    fn damage_unit(&mut self, id: UnitId, amount: u32) -> DamageOutcome {
        let Some(unit) = self.unit_mut(id) else {
            return DamageOutcome {
                dealt: 0,
                remaining: 0,
                destroyed: true,
            };
        };
        let outcome = unit.take_damage(amount);
        self.log(
            GameEventType::UnitDamaged {
                unit: id,
                amount: outcome.dealt,
                remaining: outcome.remaining,
            },
            format!("{} takes {} damage ({} left)", id, outcome.dealt, outcome.remaining),
        );
        self.handle_destruction(id);
        outcome
    }

    fn apply_special_effect(&mut self, target: UnitId, effect: SpecialEffect) {
        match effect {
            SpecialEffect::Ignite { turns } => self.apply_status(target, StatusEffect::Fire, turns),
            SpecialEffect::Slow { turns } => self.apply_status(target, StatusEffect::Slow, turns),
            SpecialEffect::Reveal => {
                if self.unit_mut(target).is_some_and(|unit| unit.reveal()) {
                    self.log(
                        GameEventType::StealthRevealed { unit: target },
                        format!("{} forced to the surface", target),
                    );
                }
            }
            SpecialEffect::Torpedo { damage } => {
                self.damage_unit(target, damage);
            }
        }
    }

    fn apply_status(&mut self, id: UnitId, effect: StatusEffect, turns: u32) {
        let Some(unit) = self.unit_mut(id) else {
            return;
        };
        let immediate = unit.apply_effect(effect, turns);
        self.log(
            GameEventType::EffectApplied {
                unit: id,
                effect,
                turns,
            },
            format!("{} suffers {:?} for {} turns", id, effect, turns),
        );
        if let Some(damage) = immediate {
            self.log(
                GameEventType::UnitDamaged {
                    unit: id,
                    amount: damage.dealt,
                    remaining: damage.remaining,
                },
                format!("{} burns for {}", id, damage.dealt),
            );
            self.handle_destruction(id);
        }
    }

    /// Remove a ship at zero health from its roster and tile; true if it was removed
    fn handle_destruction(&mut self, id: UnitId) -> bool {
        let Some(unit) = self.unit(id) else {
            return false;
        };
        if unit.is_alive() {
            return false;
        }
        let faction = unit.faction();
        let at = unit.position();

        self.fleet_mut(faction).retain(|u| u.id() != id);
        self.battlefield.clear_occupant(at, id);
        if self.selected == Some(id) {
            self.deselect_unit();
        }

        tracing::info!(unit = %id, %faction, ?at, "Unit destroyed");
        self.log(
            GameEventType::UnitDestroyed { unit: id, faction, at },
            format!("{} ship {} destroyed at ({}, {})", faction, id, at.col, at.row),
        );
        self.evaluate_victory();
        true
    }

    // ===== VICTORY =====

    /// Decide the game if a victory condition holds
    ///
    /// Checked in order: player fleet gone, opponent fleet gone, player base
    /// lost, every fort held by the player.
    fn evaluate_victory(&mut self) {
        if !self.victory_armed || self.is_game_over() {
            return;
        }
        if let Some(winner) = check_victory(self) {
            self.end_game(winner);
        }
    }

    fn end_game(&mut self, winner: Faction) {
        self.deselect_unit();
        self.phase = TurnPhase::GameOver { winner };
        tracing::info!(%winner, turn = self.turn, "Game over");
        self.log(
            GameEventType::GameOver { winner },
            format!("Game over: {} wins", winner),
        );
    }
}

/// Which faction has won, if any
pub fn check_victory(session: &GameSession) -> Option<Faction> {
    let alive = |faction| session.fleet(faction).iter().any(|u| u.is_alive());
    if !alive(Faction::Player) {
        return Some(Faction::Opponent);
    }
    if !alive(Faction::Opponent) {
        return Some(Faction::Player);
    }
    if !session.battlefield.has_player_base() {
        return Some(Faction::Opponent);
    }
    if session.battlefield.controls_every_fort(Faction::Player) {
        return Some(Faction::Player);
    }
    None
}
