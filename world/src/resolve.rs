//! Pure slide-and-merge resolution for directional moves.
//!
//! The resolver operates on a snapshot of face values indexed in row-major
//! order and never touches tile identity; the world maps the resulting cell
//! motions back onto its arena. Each of the four lines perpendicular to the
//! travel axis resolves independently.

use twenty48_core::{CellCoord, Direction, TileValue, BOARD_CELLS, BOARD_SIDE};

const LINE_LEN: usize = BOARD_SIDE as usize;

/// Cell motions produced by resolving one directional move.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct Resolution {
    /// Tiles that slid to a new cell without merging.
    pub(crate) slides: Vec<Slide>,
    /// Pairs of equal tiles that combined into a result tile.
    pub(crate) merges: Vec<Merge>,
    /// Sum of the doubled values produced by the merges.
    pub(crate) score_delta: u32,
}

impl Resolution {
    /// A move is legal iff at least one tile changes cell.
    pub(crate) fn any_tile_moved(&self) -> bool {
        !self.slides.is_empty() || !self.merges.is_empty()
    }
}

/// Relocation of one tile expressed as row-major cell indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Slide {
    pub(crate) from: usize,
    pub(crate) to: usize,
}

/// Merge of the tiles at `first` and `second` into the cell at `into`.
///
/// `first` sits closer to the leading edge in travel order; `second` always
/// changes cell, `first` only when compaction shifted its slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Merge {
    pub(crate) first: usize,
    pub(crate) second: usize,
    pub(crate) into: usize,
    pub(crate) value: TileValue,
}

/// Row-major index of a cell.
pub(crate) fn cell_index(cell: CellCoord) -> usize {
    usize::from(cell.row()) * LINE_LEN + usize::from(cell.column())
}

/// Cell coordinate of a row-major index.
pub(crate) fn index_cell(index: usize) -> CellCoord {
    CellCoord::new((index % LINE_LEN) as u8, (index / LINE_LEN) as u8)
}

/// Computes the terminal positions of every tile as if all tiles slid
/// simultaneously as far as possible toward the leading edge, merging
/// equal-valued tiles at most once per tile per turn.
pub(crate) fn resolve(grid: &[Option<TileValue>; BOARD_CELLS], direction: Direction) -> Resolution {
    let mut resolution = Resolution::default();
    for line in 0..LINE_LEN {
        resolve_line(grid, &line_indices(direction, line), &mut resolution);
    }
    resolution
}

/// Reports whether any direction still admits a legal move: an empty cell,
/// or two equal values adjacent along a row or column.
pub(crate) fn any_move_available(grid: &[Option<TileValue>; BOARD_CELLS]) -> bool {
    if grid.iter().any(Option::is_none) {
        return true;
    }

    for row in 0..LINE_LEN {
        for column in 0..LINE_LEN {
            let index = row * LINE_LEN + column;
            if column + 1 < LINE_LEN && grid[index] == grid[index + 1] {
                return true;
            }
            if row + 1 < LINE_LEN && grid[index] == grid[index + LINE_LEN] {
                return true;
            }
        }
    }

    false
}

/// Cell indices of one line ordered from the leading edge backward.
fn line_indices(direction: Direction, line: usize) -> [usize; LINE_LEN] {
    let mut indices = [0usize; LINE_LEN];
    for (step, slot) in indices.iter_mut().enumerate() {
        *slot = match direction {
            Direction::Left => line * LINE_LEN + step,
            Direction::Right => line * LINE_LEN + (LINE_LEN - 1 - step),
            Direction::Up => step * LINE_LEN + line,
            Direction::Down => (LINE_LEN - 1 - step) * LINE_LEN + line,
        };
    }
    indices
}

#[derive(Clone, Copy, Debug)]
struct PlacedTile {
    origin: usize,
    value: TileValue,
    merged: bool,
}

fn resolve_line(
    grid: &[Option<TileValue>; BOARD_CELLS],
    cells: &[usize; LINE_LEN],
    resolution: &mut Resolution,
) {
    let mut placed: Vec<PlacedTile> = Vec::with_capacity(LINE_LEN);

    for &index in cells {
        let Some(value) = grid[index] else {
            continue;
        };

        let placed_len = placed.len();
        match placed.last_mut() {
            Some(last) if last.value == value && !last.merged => {
                let result = value.doubled();
                resolution.merges.push(Merge {
                    first: last.origin,
                    second: index,
                    into: cells[placed_len - 1],
                    value: result,
                });
                resolution.score_delta = resolution.score_delta.saturating_add(result.get());
                last.value = result;
                last.merged = true;
            }
            _ => placed.push(PlacedTile {
                origin: index,
                value,
                merged: false,
            }),
        }
    }

    for (slot, entry) in placed.iter().enumerate() {
        if entry.merged {
            continue;
        }
        let destination = cells[slot];
        if destination != entry.origin {
            resolution.slides.push(Slide {
                from: entry.origin,
                to: destination,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_from_rows(rows: [[u32; 4]; 4]) -> [Option<TileValue>; BOARD_CELLS] {
        let mut grid = [None; BOARD_CELLS];
        for (row, values) in rows.iter().enumerate() {
            for (column, value) in values.iter().enumerate() {
                if *value != 0 {
                    grid[row * LINE_LEN + column] = Some(TileValue::new(*value));
                }
            }
        }
        grid
    }

    /// Applies a resolution back onto a value grid for assertion purposes.
    fn materialize(
        grid: &[Option<TileValue>; BOARD_CELLS],
        resolution: &Resolution,
    ) -> [Option<TileValue>; BOARD_CELLS] {
        let mut out = *grid;
        for slide in &resolution.slides {
            out[slide.from] = None;
        }
        for merge in &resolution.merges {
            out[merge.first] = None;
            out[merge.second] = None;
        }
        for slide in &resolution.slides {
            out[slide.to] = grid[slide.from];
        }
        for merge in &resolution.merges {
            out[merge.into] = Some(merge.value);
        }
        out
    }

    #[test]
    fn full_line_of_equal_tiles_merges_each_tile_once() {
        let grid = grid_from_rows([[2, 2, 2, 2], [0; 4], [0; 4], [0; 4]]);
        let resolution = resolve(&grid, Direction::Left);

        let expected = grid_from_rows([[4, 4, 0, 0], [0; 4], [0; 4], [0; 4]]);
        assert_eq!(materialize(&grid, &resolution), expected);
        assert_eq!(resolution.merges.len(), 2);
        assert_eq!(resolution.score_delta, 8);
    }

    #[test]
    fn merge_result_does_not_merge_again_within_the_same_move() {
        let grid = grid_from_rows([[2, 2, 4, 0], [0; 4], [0; 4], [0; 4]]);
        let resolution = resolve(&grid, Direction::Left);

        let expected = grid_from_rows([[4, 4, 0, 0], [0; 4], [0; 4], [0; 4]]);
        assert_eq!(materialize(&grid, &resolution), expected);
        assert_eq!(resolution.score_delta, 4);
    }

    #[test]
    fn repeated_resolution_reaches_a_fixed_point() {
        let grid = grid_from_rows([[2, 2, 4, 0], [0; 4], [0; 4], [0; 4]]);
        let first = resolve(&grid, Direction::Left);
        let after_first = materialize(&grid, &first);

        let second = resolve(&after_first, Direction::Left);
        let after_second = materialize(&after_first, &second);
        let expected = grid_from_rows([[8, 0, 0, 0], [0; 4], [0; 4], [0; 4]]);
        assert_eq!(after_second, expected);
        assert_eq!(second.score_delta, 8);

        let third = resolve(&after_second, Direction::Left);
        assert!(!third.any_tile_moved());
    }

    #[test]
    fn inner_pair_merges_between_unequal_neighbours() {
        let grid = grid_from_rows([[4, 2, 2, 4], [0; 4], [0; 4], [0; 4]]);
        let resolution = resolve(&grid, Direction::Left);

        let expected = grid_from_rows([[4, 4, 4, 0], [0; 4], [0; 4], [0; 4]]);
        assert_eq!(materialize(&grid, &resolution), expected);
        assert_eq!(resolution.merges.len(), 1);
        assert_eq!(resolution.score_delta, 4);
    }

    #[test]
    fn compacted_line_with_distinct_values_is_a_no_op() {
        let grid = grid_from_rows([[2, 4, 8, 16], [0; 4], [0; 4], [0; 4]]);
        assert!(!resolve(&grid, Direction::Left).any_tile_moved());
    }

    #[test]
    fn empty_grid_is_a_no_op_in_every_direction() {
        let grid = [None; BOARD_CELLS];
        for direction in Direction::ALL {
            assert!(!resolve(&grid, direction).any_tile_moved());
        }
    }

    #[test]
    fn rightward_travel_mirrors_leftward_travel() {
        let grid = grid_from_rows([[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]]);
        let resolution = resolve(&grid, Direction::Right);

        let expected = grid_from_rows([[0, 0, 0, 4], [0; 4], [0; 4], [0; 4]]);
        assert_eq!(materialize(&grid, &resolution), expected);
    }

    #[test]
    fn columns_resolve_independently_for_vertical_moves() {
        let grid = grid_from_rows([[2, 4, 0, 0], [2, 0, 0, 0], [0, 4, 0, 0], [8, 0, 0, 0]]);
        let resolution = resolve(&grid, Direction::Up);

        let expected = grid_from_rows([[4, 8, 0, 0], [8, 0, 0, 0], [0; 4], [0; 4]]);
        assert_eq!(materialize(&grid, &resolution), expected);
        assert_eq!(resolution.score_delta, 12);
    }

    #[test]
    fn downward_travel_compacts_toward_the_bottom_edge() {
        let grid = grid_from_rows([[2, 0, 0, 0], [0; 4], [0; 4], [2, 0, 0, 0]]);
        let resolution = resolve(&grid, Direction::Down);

        let expected = grid_from_rows([[0; 4], [0; 4], [0; 4], [4, 0, 0, 0]]);
        assert_eq!(materialize(&grid, &resolution), expected);
    }

    #[test]
    fn merges_conserve_the_total_tile_value() {
        let grid = grid_from_rows([[2, 2, 4, 4], [8, 8, 0, 2], [0; 4], [2, 0, 2, 0]]);
        let resolution = resolve(&grid, Direction::Left);
        let after = materialize(&grid, &resolution);

        let sum = |cells: &[Option<TileValue>; BOARD_CELLS]| {
            cells.iter().flatten().map(|value| value.get()).sum::<u32>()
        };
        assert_eq!(sum(&grid), sum(&after));
    }

    #[test]
    fn alternating_full_grid_offers_no_move() {
        let grid = grid_from_rows([[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 4, 2]]);
        for direction in Direction::ALL {
            assert!(!resolve(&grid, direction).any_tile_moved());
        }
        assert!(!any_move_available(&grid));
    }

    #[test]
    fn full_grid_with_an_adjacent_pair_still_offers_a_move() {
        let mut rows = [[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 4, 2]];
        rows[3][3] = 4;
        assert!(any_move_available(&grid_from_rows(rows)));
    }

    #[test]
    fn any_empty_cell_counts_as_an_available_move() {
        let grid = grid_from_rows([[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 4, 0]]);
        assert!(any_move_available(&grid));
    }

    #[test]
    fn index_conversions_are_inverse() {
        for index in 0..BOARD_CELLS {
            assert_eq!(cell_index(index_cell(index)), index);
        }
    }
}
