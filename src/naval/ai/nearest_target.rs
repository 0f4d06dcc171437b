//! Close on the nearest visible enemy and shoot it

use crate::core::error::{GameError, Result};
use crate::core::types::UnitId;
use crate::naval::ai::Commander;
use crate::naval::hex::{CubeCoord, HexCoord, HexDirection};
use crate::naval::session::GameSession;
use crate::naval::unit_class::UnitClass;
use crate::naval::units::Unit;

/// Greedy pursuit policy: one step at a time along the dominant cube axis
#[derive(Debug, Clone, Default)]
pub struct NearestTargetCommander {
    orders_issued: u32,
}

impl NearestTargetCommander {
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves and attacks issued since creation
    pub fn orders_issued(&self) -> u32 {
        self.orders_issued
    }
}

impl Commander for NearestTargetCommander {
    fn name(&self) -> &str {
        "nearest-target"
    }

    fn command_unit(&mut self, session: &mut GameSession, id: UnitId) -> Result<()> {
        let actor = session
            .unit(id)
            .ok_or_else(|| GameError::IllegalState(format!("unit {} is not on the board", id)))?;
        let Some(target) = pick_target(session, actor) else {
            return Ok(());
        };
        let (target_id, goal) = (target.id(), target.position());

        // Always try to close in; stop once a move ends within range
        loop {
            let Some(actor) = session.unit(id) else {
                return Ok(());
            };
            if actor.movement_points() == 0 {
                break;
            }
            let Some(step) = greedy_step(actor.position(), goal) else {
                break;
            };
            let Some(heading) = actor.position().direction_towards(&step) else {
                break;
            };
            let facing = facing_towards(actor.facing(), heading, actor.max_turn_angle());
            if !session.can_enter(step, id)? || session.is_occupied(step) {
                break;
            }
            if session.move_unit(id, step, facing).is_err() {
                break;
            }
            self.orders_issued += 1;

            let in_range = session
                .unit(id)
                .is_some_and(|actor| actor.position().distance(&goal) <= actor.attack_range());
            if in_range {
                break;
            }
        }

        let Some(actor) = session.unit(id) else {
            return Ok(());
        };
        if actor.can_attack() && actor.position().distance(&goal) <= actor.attack_range() {
            session.attack(id, target_id)?;
            self.orders_issued += 1;
        }
        Ok(())
    }
}

/// Nearest live enemy the actor can see; earlier roster entries win ties
///
/// Submerged submarines are only visible to destroyers.
fn pick_target<'a>(session: &'a GameSession, actor: &Unit) -> Option<&'a Unit> {
    let from = actor.position();
    session
        .fleet(actor.faction().other())
        .iter()
        .filter(|enemy| enemy.is_alive())
        .filter(|enemy| {
            !(enemy.class() == UnitClass::Submarine && enemy.is_stealthed())
                || actor.class() == UnitClass::Destroyer
        })
        .fold(None, |best: Option<&Unit>, enemy| match best {
            Some(current) if current.position().distance(&from) <= enemy.position().distance(&from) => {
                Some(current)
            }
            _ => Some(enemy),
        })
}

/// One neighbour closer to `goal`, moving along the axis with the largest gap
///
/// The step adds one on that axis and takes one from whichever remaining axis
/// points the other way with the larger gap. Ties go q, then s, then r.
pub fn greedy_step(from: HexCoord, goal: HexCoord) -> Option<HexCoord> {
    let start = from.to_cube();
    let delta = goal.to_cube().sub(start);
    let axes = [delta.q, delta.s, delta.r];

    let main = (0..3).fold(0, |best, i| if axes[i].abs() > axes[best].abs() { i } else { best });
    if axes[main] == 0 {
        return None;
    }
    let sign = axes[main].signum();

    let compensate = (0..3)
        .filter(|&i| i != main && axes[i].signum() != sign)
        .fold(None, |best: Option<usize>, i| match best {
            Some(b) if axes[b].abs() >= axes[i].abs() => Some(b),
            _ => Some(i),
        })?;

    let mut step = [0; 3];
    step[main] = sign;
    step[compensate] = -sign;
    Some(start.add(CubeCoord::new(step[0], step[1], step[2])).to_offset())
}

/// Face the heading if the turn allows, otherwise turn one notch towards it
fn facing_towards(current: HexDirection, heading: HexDirection, max_turn: u8) -> HexDirection {
    if current.turn_distance(&heading) <= max_turn {
        return heading;
    }
    let ahead = (heading.index() as i32 - current.index() as i32).rem_euclid(6);
    if ahead <= 3 {
        current.rotated(1)
    } else {
        current.rotated(-1)
    }
}
