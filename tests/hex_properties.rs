//! Property tests for hex geometry and movement search

use hex_fleet::core::{Faction, MapConfig, SessionConfig, UnitId};
use hex_fleet::naval::*;
use proptest::prelude::*;

fn coord() -> impl Strategy<Value = HexCoord> {
    (0i32..40, 0i32..40).prop_map(|(col, row)| HexCoord::new(col, row))
}

proptest! {
    #[test]
    fn offset_cube_round_trip(c in coord()) {
        prop_assert_eq!(c.to_cube().to_offset(), c);
        let cube = c.to_cube();
        prop_assert_eq!(cube.q + cube.s + cube.r, 0);
    }

    #[test]
    fn distance_is_metric(a in coord(), b in coord(), c in coord()) {
        prop_assert_eq!(a.distance(&a), 0);
        prop_assert_eq!(a.distance(&b), b.distance(&a));
        prop_assert!(a.distance(&c) <= a.distance(&b) + b.distance(&c));
    }

    #[test]
    fn line_is_connected_and_minimal(a in coord(), b in coord()) {
        let line = a.line_to(&b);
        prop_assert_eq!(line.len() as u32, a.distance(&b) + 1);
        prop_assert_eq!(line.first(), Some(&a));
        prop_assert_eq!(line.last(), Some(&b));
        for pair in line.windows(2) {
            prop_assert_eq!(pair[0].distance(&pair[1]), 1);
        }
    }

    #[test]
    fn neighbours_are_adjacent(c in coord()) {
        for dir in HexDirection::all() {
            let n = c.neighbor(dir);
            prop_assert_eq!(c.distance(&n), 1);
            prop_assert_eq!(n.neighbor(dir.opposite()), c);
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn reachable_sets_respect_budget_and_occupancy(terrain_seed in 0u64..10_000, rng_seed in 0u64..10_000) {
        let config = SessionConfig {
            map: MapConfig { terrain_seed, ..MapConfig::default() },
            rng_seed,
            ..SessionConfig::default()
        };
        let session = GameSession::start(&config).unwrap();
        let map = session.battlefield();

        for faction in [Faction::Player, Faction::Opponent] {
            for unit in session.fleet(faction) {
                let reach = session.reachable_set(unit.id()).unwrap();
                prop_assert!(!reach.contains(&unit.position()));
                for &coord in &reach {
                    prop_assert!(!map.is_occupied(coord));
                    let route = map.find_route(unit, coord).unwrap();
                    prop_assert_eq!(route.first(), Some(&unit.position()));
                    let cost: u32 = route[1..]
                        .iter()
                        .map(|c| map.movement_cost(*c, unit).unwrap())
                        .sum();
                    prop_assert!(cost <= unit.movement_points());
                }
            }
        }
    }

    #[test]
    fn generated_maps_keep_both_bases(terrain_seed in 0u64..100_000) {
        let map = generate_battlefield(&MapConfig { terrain_seed, ..MapConfig::default() }).unwrap();
        prop_assert!(map.has_player_base());
        prop_assert_eq!(map.count_terrain(TerrainKind::EnemyBase), 1);
        for tile in map.tiles().filter(|t| t.terrain == TerrainKind::Fort) {
            prop_assert_eq!(tile.owner, None);
            prop_assert_eq!(tile.defense, 50);
        }
    }
}

#[test]
fn submarine_enters_reef_with_any_budget() {
    for mp in 0..5 {
        assert!(TerrainKind::Reef.can_enter(UnitClass::Submarine, mp));
    }
    assert!(!TerrainKind::Shallow.can_enter(UnitClass::Battleship, 1));
    assert!(TerrainKind::Shallow.can_enter(UnitClass::Battleship, 2));
}

#[test]
fn rotation_from_east() {
    let session = GameSession::with_battlefield(
        Battlefield::new(8, 8),
        &[(UnitClass::Cruiser, HexCoord::new(3, 3))],
        &[(UnitClass::Cruiser, HexCoord::new(6, 6))],
        1,
    )
    .unwrap();
    let cruiser = session.unit(UnitId(1)).unwrap();
    for (index, allowed) in [(1, true), (5, true), (2, false), (3, false), (4, false)] {
        let dir = HexDirection::from_index(index).unwrap();
        assert_eq!(cruiser.can_turn_to(dir), allowed, "direction {}", index);
    }
}
