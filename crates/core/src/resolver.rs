//! Move resolution - slide and merge every tile in one direction
//!
//! A move walks the grid starting with the tiles closest to the target edge,
//! so a tile always slides against already-settled neighbours:
//!
//! 1. Build traversal orders: x descending when moving right, y descending
//!    when moving down, ascending otherwise. x is the outer loop.
//! 2. Prepare tiles: forget last move's merge lineage, remember positions.
//! 3. For each tile, find the farthest empty cell and the first blocker. If
//!    the blocker has the same value and hasn't merged this move, merge into
//!    it; otherwise slide to the farthest cell.
//!
//! Spawning and game-over detection happen in the game manager, after the
//! resolver reports whether anything moved.

use log::trace;

use crate::config::TransitionPolicy;
use crate::grid::Grid;
use crate::tile::Tile;
use crate::types::{Direction, Position, PositionTransition};

/// What a single resolved move did to the grid
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MoveOutcome {
    /// Any tile changed cell (slide or merge)
    pub moved: bool,
    /// Sum of the values of all tiles created by merges
    pub score_delta: u64,
    /// A merge produced a tile at or above the win value
    pub reached_win: bool,
    pub transitions: Vec<PositionTransition>,
    /// Tiles consumed by merges, positioned on the cell they merged into
    pub retired: Vec<Tile>,
}

impl MoveOutcome {
    pub fn merges(&self) -> usize {
        self.retired.len() / 2
    }
}

/// Traversal order for a move: (columns, rows)
///
/// # Examples
///
/// ```
/// use twenty48_core::resolver::build_traversals;
/// use twenty48_core::types::Direction;
///
/// let (xs, ys) = build_traversals(4, Direction::Right);
/// assert_eq!(xs, vec![3, 2, 1, 0]);
/// assert_eq!(ys, vec![0, 1, 2, 3]);
/// ```
pub fn build_traversals(size: usize, dir: Direction) -> (Vec<i32>, Vec<i32>) {
    let (dx, dy) = dir.vector();
    let mut xs: Vec<i32> = (0..size as i32).collect();
    let mut ys = xs.clone();

    // Always traverse from the farthest cell in the chosen direction
    if dx == 1 {
        xs.reverse();
    }
    if dy == 1 {
        ys.reverse();
    }
    (xs, ys)
}

/// Slide from `cell` in `dir` across empty cells
///
/// Returns `(farthest, next)`: the last empty cell reached (or `cell` itself)
/// and the first cell that is occupied or out of bounds.
pub fn find_farthest_position(grid: &Grid, cell: Position, dir: Direction) -> (Position, Position) {
    let mut previous = cell;
    let mut current = cell.step(dir);
    while grid.within_bounds(current) && grid.cell_available(current) {
        previous = current;
        current = current.step(dir);
    }
    (previous, current)
}

/// Clear merge lineage and snapshot the position of every tile
pub fn prepare_tiles(grid: &mut Grid) {
    for pos in grid.coords() {
        if let Some(tile) = grid.tile_mut(pos) {
            tile.prepare_for_move();
        }
    }
}

/// Resolve one move in place
///
/// Never spawns. `win_value` is the tile value that counts as a win.
pub fn resolve_move(
    grid: &mut Grid,
    dir: Direction,
    win_value: u32,
    policy: TransitionPolicy,
) -> MoveOutcome {
    let (xs, ys) = build_traversals(grid.size(), dir);
    let mut outcome = MoveOutcome::default();

    prepare_tiles(grid);

    for &x in &xs {
        for &y in &ys {
            let cell = Position::new(x, y);
            let Some(tile) = grid.cell_content(cell).copied() else {
                continue;
            };

            let (farthest, next) = find_farthest_position(grid, cell, dir);

            // Only one merger per destination per move
            let target = grid
                .cell_content(next)
                .copied()
                .filter(|other| tile.mergeable_with(other) && !other.is_merge_result());

            let (end, merged) = match target {
                Some(occupant) => {
                    merge_into(grid, &tile, &occupant, win_value, &mut outcome);
                    (next, true)
                }
                None => {
                    grid.move_tile(cell, farthest);
                    (farthest, false)
                }
            };

            if end != cell {
                outcome.moved = true;
            }

            match policy {
                TransitionPolicy::PerTile => {
                    if !merged && end != cell {
                        outcome.transitions.push(PositionTransition::moved(cell, end));
                    }
                }
                TransitionPolicy::Legacy => {
                    if outcome.moved {
                        outcome.transitions.push(PositionTransition::moved(cell, end));
                    }
                }
            }
        }
    }

    outcome
}

fn merge_into(
    grid: &mut Grid,
    moving: &Tile,
    occupant: &Tile,
    win_value: u32,
    outcome: &mut MoveOutcome,
) {
    let target = occupant.position();
    let merged = Tile::merged(grid.allocate_id(), moving, occupant);

    grid.insert_tile(merged);
    grid.remove_tile(moving);
    outcome.transitions.push(PositionTransition::removed(target));

    // Converge the consumed tile onto the merge cell
    let mut consumed = *moving;
    consumed.set_position(target);
    outcome.retired.push(consumed);
    outcome.retired.push(*occupant);

    outcome.score_delta += u64::from(merged.value());
    if merged.value() >= win_value {
        outcome.reached_win = true;
    }

    trace!(
        "merged {} + {} into {} (value {}) at ({})",
        moving.id(),
        occupant.id(),
        merged.id(),
        merged.value(),
        target
    );
}
