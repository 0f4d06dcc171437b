//! Session integration tests: turn flow, commander pass, capture and victory

use hex_fleet::core::{AttackRejection, Faction, GameError, MoveRejection, SessionConfig, UnitId};
use hex_fleet::naval::*;

/// Open sea with a player base tucked into the south-west corner
fn open_sea() -> Battlefield {
    let mut map = Battlefield::new(12, 8);
    map.set_terrain(HexCoord::new(0, 7), TerrainKind::PlayerBase);
    map
}

fn kinds(events: Vec<GameEvent>) -> Vec<GameEventType> {
    events.into_iter().map(|e| e.event_type).collect()
}

#[test]
fn test_reference_session_plays_out() {
    let mut session = GameSession::start(&SessionConfig::default()).unwrap();
    let mut player = NearestTargetCommander::new();

    for _ in 0..40 {
        if session.is_game_over() {
            break;
        }
        session.run_commander_pass(Faction::Player, &mut player).unwrap();
        if !session.is_game_over() {
            session.end_player_turn().unwrap();
        }
    }

    // Occupancy always mirrors the rosters
    for faction in [Faction::Player, Faction::Opponent] {
        for unit in session.fleet(faction) {
            assert!(unit.is_alive());
            assert_eq!(session.tile_at(unit.position()).unwrap().occupant(), Some(unit.id()));
        }
    }
    let occupied = session.battlefield().tiles().filter(|t| t.is_occupied()).count();
    assert_eq!(
        occupied,
        session.fleet(Faction::Player).len() + session.fleet(Faction::Opponent).len()
    );
}

#[test]
fn test_same_seed_same_game() {
    let run = || {
        let mut session = GameSession::start(&SessionConfig::default()).unwrap();
        let mut player = NearestTargetCommander::new();
        let mut log = Vec::new();
        for _ in 0..6 {
            if session.is_game_over() {
                break;
            }
            session.run_commander_pass(Faction::Player, &mut player).unwrap();
            if !session.is_game_over() {
                session.end_player_turn().unwrap();
            }
            log.extend(session.drain_events());
        }
        log
    };
    assert_eq!(run(), run());
}

#[test]
fn test_move_then_attack_event_order() {
    let mut session = GameSession::with_battlefield(
        open_sea(),
        &[(UnitClass::Destroyer, HexCoord::new(2, 4))],
        &[(UnitClass::Cruiser, HexCoord::new(4, 4))],
        11,
    )
    .unwrap();
    session.drain_events();

    let destroyer = UnitId(1);
    let cruiser = UnitId(2);
    session.select_unit(destroyer).unwrap();
    let record = session
        .move_unit(destroyer, HexCoord::new(3, 4), HexDirection::East)
        .unwrap();
    assert_eq!(record.from, HexCoord::new(2, 4));
    assert_eq!(record.cost, 1);
    assert_eq!(
        kinds(session.drain_events()),
        vec![
            GameEventType::UnitSelected { unit: destroyer },
            GameEventType::UnitMoved {
                unit: destroyer,
                from: HexCoord::new(2, 4),
                to: HexCoord::new(3, 4),
            },
        ]
    );

    let report = session.attack(destroyer, cruiser).unwrap();
    assert!(report.special.is_none());
    let events = kinds(session.drain_events());
    assert_eq!(events.len(), 2);
    assert_eq!(
        events[0],
        GameEventType::UnitAttacked {
            attacker: destroyer,
            target: cruiser
        }
    );
    assert!(matches!(
        events[1],
        GameEventType::UnitDamaged { unit, amount, .. } if unit == cruiser && amount == report.damage.dealt
    ));
}

#[test]
fn test_second_attack_rejected_without_damage() {
    let mut session = GameSession::with_battlefield(
        open_sea(),
        &[(UnitClass::Destroyer, HexCoord::new(3, 4))],
        &[(UnitClass::Cruiser, HexCoord::new(4, 4))],
        11,
    )
    .unwrap();
    session.attack(UnitId(1), UnitId(2)).unwrap();
    let health = session.unit(UnitId(2)).unwrap().health();

    let again = session.attack(UnitId(1), UnitId(2));
    assert!(matches!(
        again,
        Err(GameError::InvalidAttack(AttackRejection::AlreadyAttacked))
    ));
    assert_eq!(session.unit(UnitId(2)).unwrap().health(), health);
}

#[test]
fn test_sharp_turn_rejected_on_move() {
    let mut session = GameSession::with_battlefield(
        open_sea(),
        &[(UnitClass::Cruiser, HexCoord::new(2, 4))],
        &[(UnitClass::Cruiser, HexCoord::new(10, 1))],
        3,
    )
    .unwrap();
    let result = session.move_unit(UnitId(1), HexCoord::new(3, 4), HexDirection::West);
    assert!(matches!(
        result,
        Err(GameError::InvalidMove(MoveRejection::TurnTooSharp { requested: 3, limit: 1 }))
    ));
    let cruiser = session.unit(UnitId(1)).unwrap();
    assert_eq!(cruiser.position(), HexCoord::new(2, 4));
    assert_eq!(cruiser.facing(), HexDirection::East);
}

#[test]
fn test_move_onto_ship_rejected() {
    let mut session = GameSession::with_battlefield(
        open_sea(),
        &[(UnitClass::Cruiser, HexCoord::new(2, 4)), (UnitClass::Destroyer, HexCoord::new(3, 4))],
        &[(UnitClass::Cruiser, HexCoord::new(10, 1))],
        3,
    )
    .unwrap();
    let result = session.move_unit(UnitId(1), HexCoord::new(3, 4), HexDirection::East);
    assert!(matches!(
        result,
        Err(GameError::InvalidMove(MoveRejection::Occupied))
    ));
}

#[test]
fn test_stealthed_submarine_only_targeted_by_destroyer() {
    // Opponent cruiser acts first and is within range of the submarine
    let mut session = GameSession::with_battlefield(
        open_sea(),
        &[(UnitClass::Submarine, HexCoord::new(5, 4)), (UnitClass::Cruiser, HexCoord::new(10, 7))],
        &[(UnitClass::Cruiser, HexCoord::new(5, 2)), (UnitClass::Destroyer, HexCoord::new(5, 5))],
        21,
    )
    .unwrap();
    let sub = UnitId(1);
    assert!(session.unit(sub).unwrap().is_stealthed());
    assert_eq!(
        session.unit(sub).unwrap().position().distance(&HexCoord::new(5, 5)),
        1
    );
    session.drain_events();

    session.end_player_turn().unwrap();

    let submarine = session.unit(sub).unwrap();
    assert!(!submarine.is_stealthed());
    // One destroyer hit of 20..=25 and nothing else
    assert!((60..=65).contains(&submarine.health()), "health {}", submarine.health());

    let events = kinds(session.drain_events());
    let attackers: Vec<UnitId> = events
        .iter()
        .filter_map(|e| match e {
            GameEventType::UnitAttacked { attacker, target } if *target == sub => Some(*attacker),
            _ => None,
        })
        .collect();
    assert_eq!(attackers, vec![UnitId(4)]);
    assert!(events.contains(&GameEventType::StealthRevealed { unit: sub }));
}

#[test]
fn test_battleship_captures_fort_in_two_turns() {
    let mut map = open_sea();
    let fort = HexCoord::new(4, 2);
    map.set_terrain(fort, TerrainKind::Fort);
    map.set_terrain(HexCoord::new(10, 4), TerrainKind::Fort);
    let mut session = GameSession::with_battlefield(
        map,
        &[(UnitClass::Battleship, HexCoord::new(4, 4))],
        &[(UnitClass::Cruiser, HexCoord::new(11, 0))],
        5,
    )
    .unwrap();
    session.set_commander(Box::new(HoldPosition));
    let battleship = UnitId(1);

    assert_eq!(session.tile_at(fort).unwrap().defense, 50);
    assert_eq!(session.tile_at(fort).unwrap().owner_id(), -1);

    let first = session.bombard(battleship, fort).unwrap();
    assert_eq!(first.defense_left, 10);
    assert!(!first.captured);
    assert_eq!(session.tile_at(fort).unwrap().owner_id(), -1);

    session.end_player_turn().unwrap();
    session.drain_events();

    let second = session.bombard(battleship, fort).unwrap();
    assert_eq!(second.defense_left, -30);
    assert!(second.captured);
    assert_eq!(session.tile_at(fort).unwrap().owner_id(), 0);
    assert_eq!(
        kinds(session.drain_events()),
        vec![
            GameEventType::TileBombarded {
                coord: fort,
                defense_left: -30
            },
            GameEventType::TileCaptured {
                coord: fort,
                terrain: TerrainKind::Fort
            },
        ]
    );
    // The second fort still stands
    assert!(!session.is_game_over());

    // A held fort is no longer a target
    session.end_player_turn().unwrap();
    assert!(matches!(
        session.bombard(battleship, fort),
        Err(GameError::InvalidAttack(AttackRejection::NotCapturable))
    ));
}

#[test]
fn test_only_heavy_ships_capture() {
    let mut map = open_sea();
    let fort = HexCoord::new(4, 3);
    map.set_terrain(fort, TerrainKind::Fort);
    let mut session = GameSession::with_battlefield(
        map,
        &[(UnitClass::Destroyer, HexCoord::new(4, 4))],
        &[(UnitClass::Cruiser, HexCoord::new(11, 0))],
        5,
    )
    .unwrap();
    assert!(matches!(
        session.bombard(UnitId(1), fort),
        Err(GameError::InvalidAttack(AttackRejection::CannotCapture))
    ));
    assert_eq!(session.tile_at(fort).unwrap().defense, 50);
    // The failed order did not use up the attack
    assert!(session.unit(UnitId(1)).unwrap().can_attack());
}

#[test]
fn test_missing_player_base_decides_before_forts() {
    let mut map = Battlefield::new(12, 8);
    map.set_terrain(HexCoord::new(5, 3), TerrainKind::Fort);
    let session = GameSession::with_battlefield(
        map,
        &[(UnitClass::Cruiser, HexCoord::new(2, 5))],
        &[(UnitClass::Cruiser, HexCoord::new(9, 1))],
        5,
    )
    .unwrap();
    assert_eq!(session.winner(), Some(Faction::Opponent));
}

#[test]
fn test_no_forts_means_no_fort_victory() {
    let session = GameSession::with_battlefield(
        open_sea(),
        &[(UnitClass::Cruiser, HexCoord::new(2, 5))],
        &[(UnitClass::Cruiser, HexCoord::new(9, 1))],
        5,
    )
    .unwrap();
    assert!(!session.is_game_over());
    assert_eq!(session.phase(), TurnPhase::PlayerTurn);
}

#[test]
fn test_game_over_rejects_every_command() {
    let mut session = GameSession::with_battlefield(
        Battlefield::new(12, 8),
        &[(UnitClass::Submarine, HexCoord::new(2, 5))],
        &[(UnitClass::Cruiser, HexCoord::new(9, 1))],
        5,
    )
    .unwrap();
    assert!(session.is_game_over());

    let sub = UnitId(1);
    assert!(matches!(session.select_unit(sub), Err(GameError::IllegalState(_))));
    assert!(matches!(
        session.move_unit(sub, HexCoord::new(3, 5), HexDirection::East),
        Err(GameError::IllegalState(_))
    ));
    assert!(matches!(session.submerge(sub), Err(GameError::IllegalState(_))));
    assert!(matches!(
        session.fire_at(sub, HexCoord::new(3, 5)),
        Err(GameError::IllegalState(_))
    ));
    assert!(matches!(session.end_player_turn(), Err(GameError::IllegalState(_))));
    assert!(matches!(
        session.run_commander_pass(Faction::Player, &mut HoldPosition),
        Err(GameError::IllegalState(_))
    ));
}

#[test]
fn test_turn_counter_and_wind_events() {
    let mut session = GameSession::with_battlefield(
        open_sea(),
        &[(UnitClass::Cruiser, HexCoord::new(2, 5))],
        &[(UnitClass::Cruiser, HexCoord::new(11, 0))],
        8,
    )
    .unwrap();
    session.set_commander(Box::new(HoldPosition));
    assert_eq!(session.turn(), 1);
    session.drain_events();

    session.end_player_turn().unwrap();
    assert_eq!(session.turn(), 2);
    let events = kinds(session.drain_events());
    assert_eq!(
        events[0],
        GameEventType::TurnChanged {
            phase: TurnPhase::OpponentTurn
        }
    );
    assert!(matches!(events[1], GameEventType::WindShifted { .. }));
    assert_eq!(
        events[2],
        GameEventType::TurnChanged {
            phase: TurnPhase::PlayerTurn
        }
    );
}

#[test]
fn test_movement_refills_each_turn() {
    let mut session = GameSession::with_battlefield(
        open_sea(),
        &[(UnitClass::Battleship, HexCoord::new(2, 4))],
        &[(UnitClass::Cruiser, HexCoord::new(11, 0))],
        8,
    )
    .unwrap();
    session.set_commander(Box::new(HoldPosition));
    let battleship = UnitId(1);
    session
        .move_unit(battleship, HexCoord::new(3, 4), HexDirection::East)
        .unwrap();
    let left = session.unit(battleship).unwrap().movement_points();
    assert!(left == 1 || left == 2);

    session.end_player_turn().unwrap();
    // Full budget, possibly plus the wind bonus
    let refreshed = session.unit(battleship).unwrap().movement_points();
    assert!(refreshed == 2 || refreshed == 3);
    assert!(session.unit(battleship).unwrap().can_attack());
}
