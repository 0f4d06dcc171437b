//! Computer-controlled fleet commanders
//!
//! A commander receives the session and one ship at a time and issues orders
//! through the same command API the host uses, so every order it gives is
//! validated like a player's.

mod nearest_target;

pub use nearest_target::NearestTargetCommander;

use crate::core::error::Result;
use crate::core::types::UnitId;
use crate::naval::session::GameSession;

/// Trait for swappable fleet policies
pub trait Commander {
    /// Short name for logs
    fn name(&self) -> &str;

    /// Issue this turn's orders for one live ship of the active faction
    fn command_unit(&mut self, session: &mut GameSession, unit: UnitId) -> Result<()>;
}

/// Commander that never issues an order
#[derive(Debug, Clone, Copy, Default)]
pub struct HoldPosition;

impl Commander for HoldPosition {
    fn name(&self) -> &str {
        "hold-position"
    }

    fn command_unit(&mut self, _session: &mut GameSession, _unit: UnitId) -> Result<()> {
        Ok(())
    }
}
