//! Movement-budget search over the battlefield
//!
//! Expands from the ship's tile in order of most movement points left. A tile
//! is expanded again only if it is reached with strictly more points than any
//! earlier visit.

use ahash::AHashMap;
use std::cmp::Ordering;
use std::collections::{BTreeSet, BinaryHeap};

use crate::naval::battlefield::Battlefield;
use crate::naval::hex::HexCoord;
use crate::naval::units::Unit;

/// Node in the open set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct BudgetNode {
    coord: HexCoord,
    remaining: u32,
}

impl Ord for BudgetNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // Max-heap on remaining budget; coordinate breaks ties deterministically
        self.remaining
            .cmp(&other.remaining)
            .then_with(|| other.coord.cmp(&self.coord))
    }
}

impl PartialOrd for BudgetNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Best remaining budget per tile plus the tile it was reached from
struct BudgetSearch {
    best: AHashMap<HexCoord, u32>,
    came_from: AHashMap<HexCoord, HexCoord>,
}

fn search(map: &Battlefield, unit: &Unit) -> BudgetSearch {
    let start = unit.position();
    let class = unit.class();
    let mut open_set = BinaryHeap::new();
    let mut best: AHashMap<HexCoord, u32> = AHashMap::new();
    let mut came_from: AHashMap<HexCoord, HexCoord> = AHashMap::new();

    best.insert(start, unit.movement_points());
    open_set.push(BudgetNode {
        coord: start,
        remaining: unit.movement_points(),
    });

    while let Some(current) = open_set.pop() {
        // Stale entry superseded by a richer visit
        if best.get(&current.coord).is_some_and(|&b| b > current.remaining) {
            continue;
        }
        if current.remaining == 0 {
            continue;
        }

        for neighbor in current.coord.neighbors() {
            let Some(tile) = map.tile_at(neighbor) else {
                continue;
            };
            if tile.is_occupied() || !tile.terrain.can_enter(class, current.remaining) {
                continue;
            }
            let Some(cost) = tile.terrain.movement_cost(class) else {
                continue;
            };
            if cost > current.remaining {
                continue;
            }

            let remaining = current.remaining - cost;
            if best.get(&neighbor).is_some_and(|&b| b >= remaining) {
                continue;
            }
            best.insert(neighbor, remaining);
            came_from.insert(neighbor, current.coord);
            open_set.push(BudgetNode {
                coord: neighbor,
                remaining,
            });
        }
    }

    BudgetSearch { best, came_from }
}

/// Every tile the ship could end its move on this turn (its own tile excluded)
pub fn reachable_set(map: &Battlefield, unit: &Unit) -> BTreeSet<HexCoord> {
    let start = unit.position();
    search(map, unit)
        .best
        .into_iter()
        .map(|(coord, _)| coord)
        .filter(|coord| *coord != start)
        .collect()
}

/// Cheapest route to `goal` within this turn's budget, start and goal inclusive
pub fn find_route(map: &Battlefield, unit: &Unit, goal: HexCoord) -> Option<Vec<HexCoord>> {
    let start = unit.position();
    if start == goal {
        return Some(vec![start]);
    }

    let result = search(map, unit);
    if !result.best.contains_key(&goal) {
        return None;
    }

    let mut path = vec![goal];
    let mut current = goal;
    while let Some(&prev) = result.came_from.get(&current) {
        path.push(prev);
        current = prev;
    }
    path.reverse();
    Some(path)
}
