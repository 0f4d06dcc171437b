//! Naval rules constants - all tunable values in one place

// Capture sites
pub const FORT_DEFENSE: i32 = 50;
pub const BASE_DEFENSE: i32 = 100;

// Handling
pub const MAX_TURN_ANGLE: u8 = 1; // Sixth-turns per move or rotation

// Status effects (durations in turns)
pub const FIRE_DAMAGE: u32 = 10; // On ignition and every turn it keeps burning
pub const FIRE_DURATION: u32 = 2;
pub const SLOW_DURATION: u32 = 1;
pub const STEALTH_DURATION: u32 = 2;

// Special effect chances
pub const FIRE_CHANCE: f32 = 0.3;
pub const SLOW_CHANCE: f32 = 0.4;

// Damage roll: base * matchup * uniform[0.9, 1.1)
pub const DAMAGE_ROLL_MIN: f32 = 0.9;
pub const DAMAGE_ROLL_SPREAD: f32 = 0.2;

// Class matchups
pub const DESTROYER_VS_SUBMARINE: f32 = 1.5;
pub const BATTLESHIP_VS_CRUISER: f32 = 1.3;
pub const SUBMARINE_VS_BATTLESHIP: f32 = 1.4;

// Wind
pub const WIND_DIRECTIONS: u8 = 8;
pub const WIND_MIN_STRENGTH: u8 = 1;
pub const WIND_MAX_STRENGTH: u8 = 3;
pub const WIND_BONUS_CHANCE: f32 = 0.3;
pub const WIND_BONUS_MOVEMENT: u32 = 1;
