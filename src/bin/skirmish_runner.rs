//! Headless Skirmish Runner
//!
//! Plays a full session with the nearest-target commander on both sides and
//! prints the result.

use clap::Parser;
use serde::Serialize;
use std::process;

use hex_fleet::core::{load_session_config, Faction, SessionConfig};
use hex_fleet::naval::{GameSession, NearestTargetCommander, TurnPhase};

/// Headless Skirmish Runner - commander vs commander
#[derive(Parser, Debug)]
#[command(name = "skirmish_runner")]
#[command(about = "Run a naval skirmish between two computer commanders")]
struct Args {
    /// Session description (TOML); the reference skirmish when omitted
    #[arg(long)]
    config: Option<String>,

    /// Override the session RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// Turns to play before calling it a draw
    #[arg(long, default_value_t = 50)]
    max_turns: u32,

    /// Output format: json or text
    #[arg(long, default_value = "json")]
    format: String,

    /// Print every event to stderr as it happens
    #[arg(long, short = 'v')]
    verbose: bool,
}

/// JSON output structure
#[derive(Serialize)]
struct SkirmishResult {
    outcome: String,
    winner: Option<Faction>,
    turns: u32,
    player_ships_left: usize,
    opponent_ships_left: usize,
    player_health_left: u32,
    opponent_health_left: u32,
    events: usize,
    seed: u64,
}

fn main() {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let mut config = match &args.config {
        Some(path) => load_session_config(path).unwrap_or_else(|e| {
            eprintln!("Failed to load session config '{}': {}", path, e);
            process::exit(1);
        }),
        None => SessionConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.rng_seed = seed;
    }

    let mut session = GameSession::start(&config).unwrap_or_else(|e| {
        eprintln!("Failed to start session: {}", e);
        process::exit(1);
    });

    let mut player_commander = NearestTargetCommander::new();
    let mut event_count = 0;

    while !session.is_game_over() && session.turn() <= args.max_turns {
        if let Err(e) = session.run_commander_pass(Faction::Player, &mut player_commander) {
            eprintln!("Player pass failed: {}", e);
            break;
        }
        if !session.is_game_over() {
            if let Err(e) = session.end_player_turn() {
                eprintln!("Could not end turn {}: {}", session.turn(), e);
                break;
            }
        }

        for event in session.drain_events() {
            event_count += 1;
            if args.verbose {
                eprintln!("  [{}] {:?}: {}", event.turn, event.event_type, event.description);
            }
        }
    }

    let health = |faction| -> u32 { session.fleet(faction).iter().map(|u| u.health()).sum() };
    let result = SkirmishResult {
        outcome: match session.phase() {
            TurnPhase::GameOver { winner } => format!("{} victory", winner),
            _ => "Draw".to_string(),
        },
        winner: session.winner(),
        turns: session.turn(),
        player_ships_left: session.fleet(Faction::Player).len(),
        opponent_ships_left: session.fleet(Faction::Opponent).len(),
        player_health_left: health(Faction::Player),
        opponent_health_left: health(Faction::Opponent),
        events: event_count,
        seed: config.rng_seed,
    };

    let json = || serde_json::to_string_pretty(&result).unwrap_or_else(|e| format!("{{\"error\": \"{}\"}}", e));
    match args.format.as_str() {
        "json" => println!("{}", json()),
        "text" => {
            println!("Skirmish Result");
            println!("===============");
            println!("Outcome: {}", result.outcome);
            println!("Turns: {}", result.turns);
            println!(
                "Player: {} ships, {} health",
                result.player_ships_left, result.player_health_left
            );
            println!(
                "Opponent: {} ships, {} health",
                result.opponent_ships_left, result.opponent_health_left
            );
            println!("Events: {}", result.events);
            println!("Seed: {}", result.seed);
        }
        _ => {
            eprintln!("Unknown format '{}', defaulting to json", args.format);
            println!("{}", json());
        }
    }
}
