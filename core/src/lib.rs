#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the twenty48 engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values for systems to
//! react to deterministically. Systems consume event streams, query immutable
//! snapshots, and respond exclusively with new command batches.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to twenty48.";

/// Number of columns (and rows) on the square board.
pub const BOARD_SIDE: u8 = 4;

/// Total number of cells on the board.
pub const BOARD_CELLS: usize = (BOARD_SIDE as usize) * (BOARD_SIDE as usize);

/// Directional inputs available to the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Movement toward decreasing row indices.
    Up,
    /// Movement toward increasing row indices.
    Down,
    /// Movement toward decreasing column indices.
    Left,
    /// Movement toward increasing column indices.
    Right,
}

impl Direction {
    /// Every direction in a fixed, deterministic order.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Requests that every tile slide as far as possible in a direction,
    /// merging equal neighbours along the travel path.
    Move {
        /// Direction of travel for the attempted move.
        direction: Direction,
    },
    /// Requests that a new tile appear on the provided empty cell.
    SpawnTile {
        /// Cell the tile should occupy after spawning.
        cell: CellCoord,
        /// Face value to assign to the spawned tile.
        value: TileValue,
    },
    /// Requests that the session restart with an empty board and zero score.
    Reset,
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Confirms that a tile slid between two cells without merging.
    TileMoved {
        /// Identifier of the tile that moved.
        tile: TileId,
        /// Cell the tile occupied before the move.
        from: CellCoord,
        /// Cell the tile occupies after the move.
        to: CellCoord,
    },
    /// Confirms that two equal tiles combined into a new result tile.
    TilesMerged {
        /// Identifiers of the two tiles consumed by the merge.
        sources: [TileId; 2],
        /// Identifier allocated to the tile produced by the merge.
        result: TileId,
        /// Cell the result tile occupies.
        cell: CellCoord,
        /// Doubled face value carried by the result tile.
        value: TileValue,
    },
    /// Announces that a directional move changed the board.
    MoveApplied {
        /// Direction the player moved in.
        direction: Direction,
        /// Number of tiles that changed cells, merge participants included.
        moved_tiles: usize,
    },
    /// Confirms that a tile was created on a previously empty cell.
    TileSpawned {
        /// Identifier assigned to the spawned tile.
        tile: TileId,
        /// Cell the tile occupies after spawning.
        cell: CellCoord,
        /// Face value assigned to the tile.
        value: TileValue,
    },
    /// Reports the session score after a committed turn.
    ScoreChanged {
        /// Cumulative session score.
        score: u32,
        /// Merge value gained during the turn that produced this event.
        delta: u32,
    },
    /// Reports that the best score exceeded its previous record.
    BestScoreChanged {
        /// New best score to persist.
        best: u32,
    },
    /// Announces that no legal move remains in any direction.
    GameEnded,
    /// Announces that the session restarted with an empty board.
    SessionReset,
}

/// Unique identifier assigned to a tile.
///
/// Identifiers are allocated monotonically and never reused within a session,
/// so presentation layers can key visual objects by identity across moves.
/// A merge consumes both source identifiers and allocates a fresh one for the
/// result tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TileId(u32);

impl TileId {
    /// Creates a new tile identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Face value carried by a tile.
///
/// Valid values are powers of two greater than or equal to two. The wrapper
/// does not enforce the invariant on construction; the world rejects spawn
/// commands carrying invalid values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TileValue(u32);

impl TileValue {
    /// Creates a new tile value wrapper.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the underlying numeric value.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Value produced when two tiles of this value merge.
    #[must_use]
    pub const fn doubled(&self) -> Self {
        Self(self.0 * 2)
    }

    /// Reports whether the value satisfies the board invariant.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.0 >= 2 && self.0.is_power_of_two()
    }
}

/// Location of a single board cell expressed as column and row coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    column: u8,
    row: u8,
}

impl CellCoord {
    /// Creates a new board cell coordinate.
    #[must_use]
    pub const fn new(column: u8, row: u8) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u8 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u8 {
        self.row
    }

    /// Reports whether the cell lies within the board.
    #[must_use]
    pub const fn in_bounds(&self) -> bool {
        self.column < BOARD_SIDE && self.row < BOARD_SIDE
    }
}

/// Current lifecycle state of a game session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStatus {
    /// The session accepts directional moves.
    Playing,
    /// No legal move remains; only a reset is meaningful.
    Over,
}

/// Error raised when a cell coordinate falls outside the board.
///
/// Out-of-bounds access is a programmer error rather than a player-reachable
/// condition: directional input and resolver output only ever produce valid
/// cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error, Serialize, Deserialize)]
#[error("cell ({column}, {row}) lies outside the 4x4 board")]
pub struct OutOfBounds {
    /// Column index of the rejected cell.
    pub column: u8,
    /// Row index of the rejected cell.
    pub row: u8,
}

/// Relocation of a single tile during a committed turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileMove {
    /// Identifier of the tile that moved.
    pub tile: TileId,
    /// Cell the tile occupied before the turn.
    pub from: CellCoord,
    /// Cell the tile travelled to.
    pub to: CellCoord,
    /// Indicates whether the tile was consumed by a merge at its destination.
    pub merged: bool,
}

/// Audit record of a single merge within a committed turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeRecord {
    /// Identifiers of the two tiles consumed by the merge.
    pub sources: [TileId; 2],
    /// Identifier allocated to the result tile.
    pub result: TileId,
    /// Cell the result tile occupies.
    pub cell: CellCoord,
    /// Doubled face value carried by the result tile.
    pub value: TileValue,
}

/// Tile created by the spawn generator after a committed move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpawnedTile {
    /// Identifier assigned to the spawned tile.
    pub tile: TileId,
    /// Cell the tile occupies.
    pub cell: CellCoord,
    /// Face value assigned to the tile.
    pub value: TileValue,
}

/// Descriptive outcome of one committed turn.
///
/// The record carries everything a presentation layer needs to drive
/// animation without re-deriving game logic: which tiles travelled where,
/// which merges occurred, what spawned, and whether the session ended.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnResult {
    /// Every tile relocation performed by the turn, merge participants
    /// included.
    pub moves: Vec<TileMove>,
    /// Merge audit records for the turn.
    pub merges: Vec<MergeRecord>,
    /// Tile spawned after the move, when an empty cell existed.
    pub spawned: Option<SpawnedTile>,
    /// Merge value gained by the turn.
    pub score_delta: u32,
    /// Indicates that no legal move remained once the turn committed.
    pub game_over: bool,
}

impl TurnResult {
    /// Reports whether the turn changed any tile's cell.
    #[must_use]
    pub fn any_tile_moved(&self) -> bool {
        !self.moves.is_empty()
    }
}
