#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that drives a headless twenty48 session.
//!
//! The binary wires the pure systems to the world, feeds them randomly chosen
//! directional inputs, and prints the board after every committed turn. It
//! doubles as an end-to-end exercise of the command and event pipeline.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use twenty48_core::{CellCoord, Direction, Event, BOARD_SIDE};
use twenty48_persistence::FileBestScoreStore;
use twenty48_system_control::{Control, ControlState, PlayerInput};
use twenty48_system_scoring::{BestScoreStore, Scoring};
use twenty48_system_spawning::{Config, Spawning};
use twenty48_world::{self as world, query, World};

#[derive(Debug, Parser)]
#[command(name = "twenty48", about = "Headless twenty48 session driver")]
struct Args {
    /// Seed shared by the spawn generator and the demo input driver.
    #[arg(long, default_value_t = 0x2048)]
    seed: u64,

    /// Maximum number of directional inputs to attempt.
    #[arg(long, default_value_t = 50)]
    moves: usize,

    /// File the best score is persisted to between sessions.
    #[arg(long, default_value = ".twenty48-best-score")]
    best_score_file: PathBuf,
}

/// Entry point for the twenty48 command-line interface.
fn main() -> Result<()> {
    let args = Args::parse();

    let store = FileBestScoreStore::new(&args.best_score_file);
    let best = store.load().unwrap_or(0);
    let mut scoring = Scoring::new(store);

    let mut world = World::with_best_score(best);
    let mut control = Control::new();
    let mut spawning = Spawning::new(Config::new(args.seed));
    let mut input_rng = ChaCha8Rng::seed_from_u64(args.seed ^ 0x5eed);

    println!("{}", query::welcome_banner(&world));

    pump(
        &mut world,
        &mut control,
        &mut spawning,
        &mut scoring,
        PlayerInput::Retry,
    )?;
    print_board(&world)?;

    for turn in 1..=args.moves {
        let direction = Direction::ALL[input_rng.gen_range(0..Direction::ALL.len())];
        pump(
            &mut world,
            &mut control,
            &mut spawning,
            &mut scoring,
            PlayerInput::Move(direction),
        )?;

        if let Some(result) = query::last_turn(&world) {
            if result.any_tile_moved() {
                println!(
                    "turn {turn}: {direction:?}, score {} (best {})",
                    query::score(&world),
                    query::best_score(&world)
                );
                print_board(&world)?;
            }
        }

        if control.state() == ControlState::GameOver {
            println!("no moves remain after turn {turn}");
            break;
        }
    }

    println!(
        "final score {} (best {})",
        query::score(&world),
        query::best_score(&world)
    );
    Ok(())
}

/// Runs one input through the full pipeline: commands, world events, spawn
/// reactions, and motion settlement.
fn pump(
    world: &mut World,
    control: &mut Control,
    spawning: &mut Spawning,
    scoring: &mut Scoring<FileBestScoreStore>,
    input: PlayerInput,
) -> Result<()> {
    let mut commands = Vec::new();
    control.handle_input(input, &mut commands);

    let mut events = Vec::new();
    for command in commands {
        world::apply(world, command, &mut events);
    }
    dispatch(world, control, spawning, scoring, &events)?;

    // Headless runs settle every motion immediately.
    while control.in_flight() > 0 {
        control.motion_complete();
    }
    Ok(())
}

/// Distributes a batch of world events to the systems, applying any spawn
/// commands they emit and dispatching the resulting events in turn.
fn dispatch(
    world: &mut World,
    control: &mut Control,
    spawning: &mut Spawning,
    scoring: &mut Scoring<FileBestScoreStore>,
    events: &[Event],
) -> Result<()> {
    if events.is_empty() {
        return Ok(());
    }

    control.observe(events);
    scoring.handle(events);

    let mut spawn_commands = Vec::new();
    spawning.handle(events, &query::empty_cells(world), &mut spawn_commands);

    let mut spawn_events = Vec::new();
    for command in spawn_commands {
        world::apply(world, command, &mut spawn_events);
    }
    dispatch(world, control, spawning, scoring, &spawn_events)
}

fn print_board(world: &World) -> Result<()> {
    for row in 0..BOARD_SIDE {
        let mut line = String::new();
        for column in 0..BOARD_SIDE {
            match query::tile_at(world, CellCoord::new(column, row))? {
                Some(snapshot) => line.push_str(&format!("[{:^4}]", snapshot.value.get())),
                None => line.push_str("[    ]"),
            }
        }
        println!("{line}");
    }
    Ok(())
}
