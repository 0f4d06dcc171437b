//! Hex Fleet - Turn-Based Naval Skirmish Engine

pub mod core;
pub mod naval;
