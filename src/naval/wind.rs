//! Prevailing wind
//!
//! The compass heading and strength are presentation state; the host shows
//! them. The per-ship movement bonus is rolled separately each turn.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::naval::constants::{WIND_DIRECTIONS, WIND_MAX_STRENGTH, WIND_MIN_STRENGTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wind {
    /// Eight-point compass heading, 0..8
    pub direction: u8,
    /// 1..=3
    pub strength: u8,
}

impl Default for Wind {
    fn default() -> Self {
        Self {
            direction: 0,
            strength: WIND_MIN_STRENGTH,
        }
    }
}

impl Wind {
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        Self {
            direction: rng.gen_range(0..WIND_DIRECTIONS),
            strength: rng.gen_range(WIND_MIN_STRENGTH..=WIND_MAX_STRENGTH),
        }
    }

    /// Veer by at most one compass point and pick a fresh strength
    pub fn shift<R: Rng>(&mut self, rng: &mut R) {
        let veer: i32 = rng.gen_range(-1..=1);
        self.direction = (self.direction as i32 + veer).rem_euclid(WIND_DIRECTIONS as i32) as u8;
        self.strength = rng.gen_range(WIND_MIN_STRENGTH..=WIND_MAX_STRENGTH);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_wind_stays_in_bounds() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut wind = Wind::random(&mut rng);
        for _ in 0..500 {
            let before = wind.direction as i32;
            wind.shift(&mut rng);
            assert!(wind.direction < 8);
            assert!((1..=3).contains(&wind.strength));
            let veer = (wind.direction as i32 - before).rem_euclid(8);
            assert!(veer == 0 || veer == 1 || veer == 7);
        }
    }
}
