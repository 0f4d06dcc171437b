//! Hex coordinate system for the naval battlefield
//!
//! Tiles are addressed in the offset "odd-q" layout (odd columns shifted down
//! half a hex). All geometry (distance, neighbours, lines) is computed in cube
//! space where q + s + r = 0.

use serde::{Deserialize, Serialize};

/// Offset tile address (column, row)
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
pub struct HexCoord {
    pub col: i32,
    pub row: i32,
}

/// Cube coordinate; always satisfies q + s + r = 0
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct CubeCoord {
    pub q: i32,
    pub s: i32,
    pub r: i32,
}

// Nudge applied to both line endpoints so no sample lands exactly on a rounding tie.
// Sums to zero to stay on the q + s + r = 0 plane.
const LINE_EPSILON: (f64, f64, f64) = (1e-6, 2e-6, -3e-6);

impl HexCoord {
    pub fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }

    pub fn to_cube(&self) -> CubeCoord {
        let q = self.col;
        let r = self.row - (self.col - (self.col & 1)) / 2;
        CubeCoord::new(q, -q - r, r)
    }

    /// Hex distance (largest cube axis delta)
    pub fn distance(&self, other: &Self) -> u32 {
        self.to_cube().distance(&other.to_cube())
    }

    /// The six neighbours, in `HexDirection::all()` order
    pub fn neighbors(&self) -> [HexCoord; 6] {
        HexDirection::all().map(|dir| self.neighbor(dir))
    }

    pub fn neighbor(&self, dir: HexDirection) -> HexCoord {
        self.to_cube().add(dir.offset()).to_offset()
    }

    /// Hexes on the straight line from self to other (inclusive)
    ///
    /// Consecutive entries are adjacent and the line has `distance + 1` entries.
    pub fn line_to(&self, other: &Self) -> Vec<HexCoord> {
        let n = self.distance(other);
        if n == 0 {
            return vec![*self];
        }

        let a = self.to_cube();
        let b = other.to_cube();
        let (eq, es, er) = LINE_EPSILON;
        let mut results = Vec::with_capacity(n as usize + 1);
        for i in 0..=n {
            let t = i as f64 / n as f64;
            let q = lerp(a.q as f64 + eq, b.q as f64 + eq, t);
            let s = lerp(a.s as f64 + es, b.s as f64 + es, t);
            let r = lerp(a.r as f64 + er, b.r as f64 + er, t);
            results.push(CubeCoord::round(q, s, r).to_offset());
        }
        results
    }

    /// All hexes within `radius` of self (inclusive), not filtered to any map
    pub fn hexes_in_range(&self, radius: u32) -> Vec<HexCoord> {
        let center = self.to_cube();
        let n = radius as i32;
        let mut results = Vec::new();
        for dq in -n..=n {
            for dr in (-n).max(-dq - n)..=n.min(-dq + n) {
                let q = center.q + dq;
                let r = center.r + dr;
                results.push(CubeCoord::new(q, -q - r, r).to_offset());
            }
        }
        results
    }

    /// Direction of the first step on the line towards `other`
    pub fn direction_towards(&self, other: &Self) -> Option<HexDirection> {
        let line = self.line_to(other);
        let next = line.get(1)?;
        let delta = next.to_cube().sub(self.to_cube());
        HexDirection::all()
            .into_iter()
            .find(|dir| dir.offset() == delta)
    }
}

impl CubeCoord {
    pub fn new(q: i32, s: i32, r: i32) -> Self {
        debug_assert_eq!(q + s + r, 0, "cube coordinate off the q+s+r=0 plane");
        Self { q, s, r }
    }

    pub fn to_offset(&self) -> HexCoord {
        let col = self.q;
        let row = self.r + (self.q - (self.q & 1)) / 2;
        HexCoord::new(col, row)
    }

    pub fn distance(&self, other: &Self) -> u32 {
        let dq = (self.q - other.q).unsigned_abs();
        let ds = (self.s - other.s).unsigned_abs();
        let dr = (self.r - other.r).unsigned_abs();
        dq.max(ds).max(dr)
    }

    pub fn add(&self, other: Self) -> Self {
        Self::new(self.q + other.q, self.s + other.s, self.r + other.r)
    }

    pub fn sub(&self, other: Self) -> Self {
        Self::new(self.q - other.q, self.s - other.s, self.r - other.r)
    }

    /// Round a fractional cube position to the nearest hex
    ///
    /// The component with the largest rounding error is recomputed from the
    /// other two; ties favour q, then s, then r.
    pub fn round(fq: f64, fs: f64, fr: f64) -> Self {
        let mut q = fq.round();
        let mut s = fs.round();
        let mut r = fr.round();

        let q_diff = (q - fq).abs();
        let s_diff = (s - fs).abs();
        let r_diff = (r - fr).abs();

        if q_diff > s_diff && q_diff > r_diff {
            q = -s - r;
        } else if s_diff > r_diff {
            s = -q - r;
        } else {
            r = -q - s;
        }

        Self::new(q as i32, s as i32, r as i32)
    }
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Facing of a ship, indexed 0..6 in neighbour order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum HexDirection {
    #[default]
    East,
    NorthEast,
    NorthWest,
    West,
    SouthWest,
    SouthEast,
}

impl HexDirection {
    /// Cube delta of one step in this direction
    pub fn offset(&self) -> CubeCoord {
        match self {
            HexDirection::East => CubeCoord::new(1, -1, 0),
            HexDirection::NorthEast => CubeCoord::new(1, 0, -1),
            HexDirection::NorthWest => CubeCoord::new(0, 1, -1),
            HexDirection::West => CubeCoord::new(-1, 1, 0),
            HexDirection::SouthWest => CubeCoord::new(-1, 0, 1),
            HexDirection::SouthEast => CubeCoord::new(0, -1, 1),
        }
    }

    pub fn opposite(&self) -> Self {
        self.rotated(3)
    }

    pub fn index(&self) -> u8 {
        match self {
            HexDirection::East => 0,
            HexDirection::NorthEast => 1,
            HexDirection::NorthWest => 2,
            HexDirection::West => 3,
            HexDirection::SouthWest => 4,
            HexDirection::SouthEast => 5,
        }
    }

    pub fn from_index(index: u8) -> Option<Self> {
        Self::all().get(index as usize).copied()
    }

    /// Rotate by `steps` sixths of a turn (positive is counter-clockwise)
    pub fn rotated(&self, steps: i32) -> Self {
        let index = (self.index() as i32 + steps).rem_euclid(6);
        Self::all()[index as usize]
    }

    /// Number of sixth-turns between two facings (0..=3)
    pub fn turn_distance(&self, other: &Self) -> u8 {
        let diff = (other.index() as i32 - self.index() as i32).rem_euclid(6) as u8;
        diff.min(6 - diff)
    }

    /// Facings reachable from this one within `max_turn` sixth-turns
    pub fn within_turn(&self, max_turn: u8) -> Vec<HexDirection> {
        Self::all()
            .into_iter()
            .filter(|dir| self.turn_distance(dir) <= max_turn)
            .collect()
    }

    pub fn all() -> [HexDirection; 6] {
        [
            HexDirection::East,
            HexDirection::NorthEast,
            HexDirection::NorthWest,
            HexDirection::West,
            HexDirection::SouthWest,
            HexDirection::SouthEast,
        ]
    }
}
