#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative game session state management for twenty48.
//!
//! The world owns the 4x4 board, the tile arena, the score pair, and the
//! session status. Adapters and systems mutate it exclusively through
//! [`apply`] and read it through [`query`]; every accepted move records a
//! [`TurnResult`] describing the motions a presentation layer must animate.

use twenty48_core::{
    CellCoord, Command, Direction, Event, GameStatus, MergeRecord, OutOfBounds, SpawnedTile,
    TileId, TileMove, TileValue, TurnResult, BOARD_CELLS, WELCOME_BANNER,
};

mod resolve;

/// Mapping from board cells to the tiles occupying them.
///
/// The grid stores identities only; face values live on the arena tiles so
/// that a merge can retire both sources and mint a fresh result tile without
/// aliasing.
#[derive(Clone, Debug)]
pub struct Board {
    cells: [Option<TileId>; BOARD_CELLS],
}

impl Board {
    fn new() -> Self {
        Self {
            cells: [None; BOARD_CELLS],
        }
    }

    /// Returns the tile occupying the provided cell, if any.
    pub fn get(&self, cell: CellCoord) -> Result<Option<TileId>, OutOfBounds> {
        Ok(self.cells[Self::index(cell)?])
    }

    /// Replaces the occupant of the provided cell.
    pub fn set(&mut self, cell: CellCoord, occupant: Option<TileId>) -> Result<(), OutOfBounds> {
        self.cells[Self::index(cell)?] = occupant;
        Ok(())
    }

    /// Reports whether every cell holds a tile.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    /// Enumerates the currently empty cells in row-major order.
    #[must_use]
    pub fn empty_cells(&self) -> Vec<CellCoord> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, occupant)| occupant.is_none())
            .map(|(index, _)| resolve::index_cell(index))
            .collect()
    }

    fn clear(&mut self) {
        self.cells.fill(None);
    }

    fn fill_with(&mut self, tiles: &[Tile]) {
        self.cells.fill(None);
        for tile in tiles {
            self.cells[resolve::cell_index(tile.cell)] = Some(tile.id);
        }
    }

    fn index(cell: CellCoord) -> Result<usize, OutOfBounds> {
        if cell.in_bounds() {
            Ok(resolve::cell_index(cell))
        } else {
            Err(OutOfBounds {
                column: cell.column(),
                row: cell.row(),
            })
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct Tile {
    id: TileId,
    cell: CellCoord,
    value: TileValue,
}

/// Represents the authoritative twenty48 session state.
#[derive(Debug)]
pub struct World {
    banner: &'static str,
    board: Board,
    tiles: Vec<Tile>,
    next_tile_id: u32,
    score: u32,
    best_score: u32,
    status: GameStatus,
    last_turn: Option<TurnResult>,
}

impl World {
    /// Creates a new session with an empty board and a zero best score.
    #[must_use]
    pub fn new() -> Self {
        Self::with_best_score(0)
    }

    /// Creates a new session seeded with a previously persisted best score.
    #[must_use]
    pub fn with_best_score(best_score: u32) -> Self {
        Self {
            banner: WELCOME_BANNER,
            board: Board::new(),
            tiles: Vec::new(),
            next_tile_id: 0,
            score: 0,
            best_score,
            status: GameStatus::Playing,
            last_turn: None,
        }
    }

    fn value_grid(&self) -> [Option<TileValue>; BOARD_CELLS] {
        let mut grid = [None; BOARD_CELLS];
        for tile in &self.tiles {
            grid[resolve::cell_index(tile.cell)] = Some(tile.value);
        }
        grid
    }

    fn id_grid(&self) -> [Option<TileId>; BOARD_CELLS] {
        self.board.cells
    }

    fn allocate_tile(&mut self, cell: CellCoord, value: TileValue) -> TileId {
        let id = TileId::new(self.next_tile_id);
        self.next_tile_id = self.next_tile_id.saturating_add(1);
        self.tiles.push(Tile { id, cell, value });
        id
    }

    fn relocate_tile(&mut self, id: TileId, destination: CellCoord) {
        if let Some(tile) = self.tiles.iter_mut().find(|tile| tile.id == id) {
            tile.cell = destination;
        }
    }

    fn remove_tile(&mut self, id: TileId) {
        if let Some(position) = self.tiles.iter().position(|tile| tile.id == id) {
            let _ = self.tiles.remove(position);
        }
    }

    fn apply_move(&mut self, direction: Direction, out_events: &mut Vec<Event>) {
        if self.status != GameStatus::Playing {
            return;
        }

        let resolution = resolve::resolve(&self.value_grid(), direction);
        if !resolution.any_tile_moved() {
            return;
        }

        let ids = self.id_grid();
        let mut moves = Vec::new();
        let mut merges = Vec::new();

        for slide in &resolution.slides {
            let Some(tile) = ids[slide.from] else {
                continue;
            };
            let from = resolve::index_cell(slide.from);
            let to = resolve::index_cell(slide.to);
            self.relocate_tile(tile, to);
            moves.push(TileMove {
                tile,
                from,
                to,
                merged: false,
            });
            out_events.push(Event::TileMoved { tile, from, to });
        }

        for merge in &resolution.merges {
            let (Some(first), Some(second)) = (ids[merge.first], ids[merge.second]) else {
                continue;
            };
            let cell = resolve::index_cell(merge.into);
            self.remove_tile(first);
            self.remove_tile(second);
            let result = self.allocate_tile(cell, merge.value);

            if merge.first != merge.into {
                moves.push(TileMove {
                    tile: first,
                    from: resolve::index_cell(merge.first),
                    to: cell,
                    merged: true,
                });
            }
            moves.push(TileMove {
                tile: second,
                from: resolve::index_cell(merge.second),
                to: cell,
                merged: true,
            });
            merges.push(MergeRecord {
                sources: [first, second],
                result,
                cell,
                value: merge.value,
            });
            out_events.push(Event::TilesMerged {
                sources: [first, second],
                result,
                cell,
                value: merge.value,
            });
        }

        self.board.fill_with(&self.tiles);
        out_events.push(Event::MoveApplied {
            direction,
            moved_tiles: moves.len(),
        });

        if resolution.score_delta > 0 {
            self.score = self.score.saturating_add(resolution.score_delta);
            out_events.push(Event::ScoreChanged {
                score: self.score,
                delta: resolution.score_delta,
            });
            if self.score > self.best_score {
                self.best_score = self.score;
                out_events.push(Event::BestScoreChanged {
                    best: self.best_score,
                });
            }
        }

        self.last_turn = Some(TurnResult {
            moves,
            merges,
            spawned: None,
            score_delta: resolution.score_delta,
            game_over: false,
        });
    }

    fn apply_spawn(&mut self, cell: CellCoord, value: TileValue, out_events: &mut Vec<Event>) {
        if self.status != GameStatus::Playing || !value.is_valid() {
            return;
        }
        match self.board.get(cell) {
            Ok(None) => {}
            // Occupied or out-of-range spawn requests are dropped outright.
            Ok(Some(_)) | Err(_) => return,
        }

        let tile = self.allocate_tile(cell, value);
        self.board.fill_with(&self.tiles);
        out_events.push(Event::TileSpawned { tile, cell, value });
        if let Some(turn) = self.last_turn.as_mut() {
            turn.spawned = Some(SpawnedTile { tile, cell, value });
        }

        if !resolve::any_move_available(&self.value_grid()) {
            self.status = GameStatus::Over;
            if let Some(turn) = self.last_turn.as_mut() {
                turn.game_over = true;
            }
            out_events.push(Event::GameEnded);
        }
    }

    fn apply_reset(&mut self, out_events: &mut Vec<Event>) {
        self.tiles.clear();
        self.board.clear();
        self.score = 0;
        self.status = GameStatus::Playing;
        self.last_turn = None;
        out_events.push(Event::SessionReset);
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::Move { direction } => world.apply_move(direction, out_events),
        Command::SpawnTile { cell, value } => world.apply_spawn(cell, value, out_events),
        Command::Reset => world.apply_reset(out_events),
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use super::{resolve, World};
    use twenty48_core::{CellCoord, GameStatus, OutOfBounds, TileId, TileValue, TurnResult};

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Cumulative score of the current session.
    #[must_use]
    pub fn score(world: &World) -> u32 {
        world.score
    }

    /// Highest score reached across sessions.
    #[must_use]
    pub fn best_score(world: &World) -> u32 {
        world.best_score
    }

    /// Lifecycle state of the current session.
    #[must_use]
    pub fn status(world: &World) -> GameStatus {
        world.status
    }

    /// Provides read-only access to the board occupancy contract.
    #[must_use]
    pub fn board(world: &World) -> &super::Board {
        &world.board
    }

    /// Enumerates the currently empty cells in row-major order.
    #[must_use]
    pub fn empty_cells(world: &World) -> Vec<CellCoord> {
        world.board.empty_cells()
    }

    /// Reports whether any direction still admits a legal move.
    #[must_use]
    pub fn has_any_move(world: &World) -> bool {
        resolve::any_move_available(&world.value_grid())
    }

    /// Descriptive outcome of the most recent committed turn, if any.
    #[must_use]
    pub fn last_turn(world: &World) -> Option<&TurnResult> {
        world.last_turn.as_ref()
    }

    /// Returns the tile occupying the provided cell, if any.
    pub fn tile_at(world: &World, cell: CellCoord) -> Result<Option<TileSnapshot>, OutOfBounds> {
        let occupant = world.board.get(cell)?;
        Ok(occupant.and_then(|id| {
            world
                .tiles
                .iter()
                .find(|tile| tile.id == id)
                .map(|tile| TileSnapshot {
                    id: tile.id,
                    cell: tile.cell,
                    value: tile.value,
                })
        }))
    }

    /// Captures a read-only view of the tiles on the board.
    #[must_use]
    pub fn tile_view(world: &World) -> TileView {
        let mut snapshots: Vec<TileSnapshot> = world
            .tiles
            .iter()
            .map(|tile| TileSnapshot {
                id: tile.id,
                cell: tile.cell,
                value: tile.value,
            })
            .collect();
        snapshots.sort_by_key(|snapshot| snapshot.id);
        TileView { snapshots }
    }

    /// Read-only snapshot describing all tiles on the board.
    #[derive(Clone, Debug, Default)]
    pub struct TileView {
        snapshots: Vec<TileSnapshot>,
    }

    impl TileView {
        /// Iterator over the captured tile snapshots in deterministic order.
        pub fn iter(&self) -> impl Iterator<Item = &TileSnapshot> {
            self.snapshots.iter()
        }

        /// Number of tiles on the board.
        #[must_use]
        pub fn len(&self) -> usize {
            self.snapshots.len()
        }

        /// Reports whether the board holds no tiles.
        #[must_use]
        pub fn is_empty(&self) -> bool {
            self.snapshots.is_empty()
        }

        /// Consumes the view, yielding the underlying snapshots.
        #[must_use]
        pub fn into_vec(self) -> Vec<TileSnapshot> {
            self.snapshots
        }
    }

    /// Immutable representation of a single tile's state used for queries.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct TileSnapshot {
        /// Unique identifier assigned to the tile.
        pub id: TileId,
        /// Board cell currently occupied by the tile.
        pub cell: CellCoord,
        /// Face value carried by the tile.
        pub value: TileValue,
    }
}
