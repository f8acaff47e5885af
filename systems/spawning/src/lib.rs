#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic spawning system responsible for emitting tile spawn commands.
//!
//! The system reacts to world events rather than polling: a completed move
//! yields exactly one spawn, and a session reset seeds the board with the
//! opening pair. Spawn cells are drawn uniformly from every empty cell and
//! spawn values from a fixed 2/4 distribution, so a given seed replays the
//! same session move for move.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use twenty48_core::{CellCoord, Command, Event, TileValue};

/// Probability that a spawned tile carries the value 4 instead of 2.
const FOUR_PROBABILITY: f64 = 0.25;

/// Number of tiles placed on an empty board when a session begins.
const INITIAL_TILES: usize = 2;

/// Configuration parameters required to construct the spawning system.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    rng_seed: u64,
}

impl Config {
    /// Creates a new configuration using the provided seed.
    #[must_use]
    pub const fn new(rng_seed: u64) -> Self {
        Self { rng_seed }
    }
}

/// Pure system that deterministically emits tile spawn commands.
#[derive(Debug)]
pub struct Spawning {
    rng: ChaCha8Rng,
}

impl Spawning {
    /// Creates a new spawning system using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(config.rng_seed),
        }
    }

    /// Consumes events and the current empty cells to emit spawn commands.
    ///
    /// `empty_cells` must describe the board after the events in `events`
    /// were applied. A reset emits the opening pair on distinct cells; a
    /// completed move emits a single spawn. Events that do not change the
    /// tile population are ignored.
    pub fn handle(&mut self, events: &[Event], empty_cells: &[CellCoord], out: &mut Vec<Command>) {
        for event in events {
            match event {
                Event::SessionReset => self.spawn_batch(empty_cells, INITIAL_TILES, out),
                Event::MoveApplied { .. } => self.spawn_batch(empty_cells, 1, out),
                _ => {}
            }
        }
    }

    fn spawn_batch(&mut self, empty_cells: &[CellCoord], count: usize, out: &mut Vec<Command>) {
        let mut available = empty_cells.to_vec();
        for _ in 0..count {
            if available.is_empty() {
                return;
            }
            let index = self.rng.gen_range(0..available.len());
            let cell = available.swap_remove(index);
            out.push(Command::SpawnTile {
                cell,
                value: self.next_value(),
            });
        }
    }

    fn next_value(&mut self) -> TileValue {
        if self.rng.gen::<f64>() < FOUR_PROBABILITY {
            TileValue::new(4)
        } else {
            TileValue::new(2)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use twenty48_core::Direction;

    fn all_cells() -> Vec<CellCoord> {
        let mut cells = Vec::new();
        for row in 0..4 {
            for column in 0..4 {
                cells.push(CellCoord::new(column, row));
            }
        }
        cells
    }

    #[test]
    fn move_applied_emits_exactly_one_spawn() {
        let mut spawning = Spawning::new(Config::new(7));
        let mut commands = Vec::new();
        spawning.handle(
            &[Event::MoveApplied {
                direction: Direction::Left,
                moved_tiles: 3,
            }],
            &all_cells(),
            &mut commands,
        );
        assert_eq!(commands.len(), 1);
    }

    #[test]
    fn no_spawn_without_empty_cells() {
        let mut spawning = Spawning::new(Config::new(7));
        let mut commands = Vec::new();
        spawning.handle(
            &[Event::MoveApplied {
                direction: Direction::Up,
                moved_tiles: 1,
            }],
            &[],
            &mut commands,
        );
        assert!(commands.is_empty());
    }

    #[test]
    fn unrelated_events_are_ignored() {
        let mut spawning = Spawning::new(Config::new(7));
        let mut commands = Vec::new();
        spawning.handle(
            &[Event::ScoreChanged { score: 8, delta: 8 }, Event::GameEnded],
            &all_cells(),
            &mut commands,
        );
        assert!(commands.is_empty());
    }
}
