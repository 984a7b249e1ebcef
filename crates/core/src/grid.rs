//! Grid module - the square playfield
//!
//! The grid is a size x size map from [`Position`] to an optional [`Tile`].
//! Storage is a flat vector in row-major order (`y * size + x`), while every
//! enumeration (coordinates, available cells, tiles) is column-major:
//! x outer, y inner. Move resolution, spawning and tests all rely on that one
//! order, so keep them in sync.
//!
//! Out-of-bounds lookups are never errors; they behave like an empty cell
//! that can't be moved into.

use std::fmt;

use arrayvec::ArrayVec;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::GameError;
use crate::tile::Tile;
use crate::types::{Direction, Position, TileId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    size: usize,
    cells: Vec<Option<Tile>>,
    next_id: u32,
}

impl Grid {
    /// Create an empty grid
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![None; size * size],
            next_id: 0,
        }
    }

    /// Build a grid from rows of values, `0` meaning empty
    ///
    /// `rows[y][x]` is the value at column x, row y. Tiles get ids in
    /// column-major order.
    ///
    /// # Examples
    ///
    /// ```
    /// use twenty48_core::Grid;
    /// use twenty48_core::types::Position;
    ///
    /// let grid = Grid::from_rows(&[vec![2, 0], vec![0, 4]]).unwrap();
    /// assert_eq!(grid.cell_content(Position::new(1, 1)).map(|t| t.value()), Some(4));
    /// assert!(grid.cell_available(Position::new(1, 0)));
    /// ```
    pub fn from_rows(rows: &[Vec<u32>]) -> Result<Self, GameError> {
        let size = rows.len();
        if let Some(row) = rows.iter().find(|row| row.len() != size) {
            return Err(GameError::InvalidRecord(format!(
                "grid is not square: {} rows but a row of length {}",
                size,
                row.len()
            )));
        }

        let mut grid = Self::new(size);
        for pos in grid.coords() {
            let value = rows[pos.y as usize][pos.x as usize];
            if value == 0 {
                continue;
            }
            if !value.is_power_of_two() || value < 2 {
                return Err(GameError::InvalidRecord(format!(
                    "tile value {} at ({}) is not a power of two",
                    value, pos
                )));
            }
            let tile = grid.new_tile(pos, value);
            grid.insert_tile(tile);
        }
        Ok(grid)
    }

    /// Rows of values, `0` meaning empty (inverse of [`Grid::from_rows`])
    pub fn to_rows(&self) -> Vec<Vec<u32>> {
        (0..self.size)
            .map(|y| {
                (0..self.size)
                    .map(|x| {
                        self.cells[y * self.size + x]
                            .map(|t| t.value())
                            .unwrap_or(0)
                    })
                    .collect()
            })
            .collect()
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Calculate flat index from a position
    #[inline(always)]
    fn index(&self, pos: Position) -> Option<usize> {
        if !self.within_bounds(pos) {
            return None;
        }
        Some(pos.y as usize * self.size + pos.x as usize)
    }

    pub fn within_bounds(&self, pos: Position) -> bool {
        let size = self.size as i64;
        let (x, y) = (pos.x as i64, pos.y as i64);
        x >= 0 && x < size && y >= 0 && y < size
    }

    /// Tile at `pos`, or None if the cell is empty or out of bounds
    pub fn cell_content(&self, pos: Position) -> Option<&Tile> {
        self.index(pos).and_then(|idx| self.cells[idx].as_ref())
    }

    pub(crate) fn tile_mut(&mut self, pos: Position) -> Option<&mut Tile> {
        let idx = self.index(pos)?;
        self.cells[idx].as_mut()
    }

    pub fn cell_available(&self, pos: Position) -> bool {
        !self.cell_occupied(pos)
    }

    pub fn cell_occupied(&self, pos: Position) -> bool {
        self.cell_content(pos).is_some()
    }

    /// Every empty cell, column-major
    pub fn available_cells(&self) -> Vec<Position> {
        self.coords()
            .filter(|&pos| self.cell_available(pos))
            .collect()
    }

    /// Every occupied cell, column-major
    pub fn occupied_cells(&self) -> Vec<Position> {
        self.coords()
            .filter(|&pos| self.cell_occupied(pos))
            .collect()
    }

    pub fn cells_available(&self) -> bool {
        self.cells.iter().any(Option::is_none)
    }

    /// Pick an empty cell uniformly at random
    ///
    /// Returns None when the grid is full.
    pub fn random_available_cell<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Position> {
        self.available_cells().choose(rng).copied()
    }

    /// Create a tile with a fresh id. The tile is not inserted.
    pub fn new_tile(&mut self, position: Position, value: u32) -> Tile {
        Tile::new(self.allocate_id(), position, value)
    }

    pub(crate) fn allocate_id(&mut self) -> TileId {
        let id = TileId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        id
    }

    /// Place a tile at its own position, replacing whatever was there
    ///
    /// Returns false if the position is out of bounds.
    pub fn insert_tile(&mut self, tile: Tile) -> bool {
        match self.index(tile.position()) {
            Some(idx) => {
                self.next_id = self.next_id.max(tile.id().0.wrapping_add(1));
                self.cells[idx] = Some(tile);
                true
            }
            None => false,
        }
    }

    /// Clear the cell at the tile's position if it still holds this tile
    ///
    /// A stale handle (the cell now holds a different tile) is a no-op.
    pub fn remove_tile(&mut self, tile: &Tile) -> bool {
        let Some(idx) = self.index(tile.position()) else {
            return false;
        };
        match self.cells[idx] {
            Some(current) if current.id() == tile.id() => {
                self.cells[idx] = None;
                true
            }
            _ => false,
        }
    }

    /// Relocate the tile at `from` to the empty cell `to`
    ///
    /// Updates the cell and the tile's own position together. Returns false
    /// (and changes nothing) if `from` is empty, `to` is occupied, or either
    /// is out of bounds.
    pub fn move_tile(&mut self, from: Position, to: Position) -> bool {
        if from == to {
            return self.cell_occupied(from);
        }
        let (Some(src), Some(dst)) = (self.index(from), self.index(to)) else {
            return false;
        };
        if self.cells[dst].is_some() {
            return false;
        }
        let Some(mut tile) = self.cells[src].take() else {
            return false;
        };
        tile.set_position(to);
        self.cells[dst] = Some(tile);
        true
    }

    /// Every tile, column-major
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> + '_ {
        self.coords().filter_map(move |pos| self.cell_content(pos))
    }

    pub fn tile_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Highest tile value on the grid (0 if empty)
    pub fn max_value(&self) -> u32 {
        self.tiles().map(Tile::value).max().unwrap_or(0)
    }

    /// Lazily enumerate every coordinate once, column-major
    pub fn coords(&self) -> Coords {
        Coords::new(self.size)
    }

    /// In-bounds 4-neighbourhood of `pos`
    pub fn neighbors(&self, pos: Position) -> ArrayVec<Position, 4> {
        Direction::ALL
            .iter()
            .map(|&dir| pos.step(dir))
            .filter(|&p| self.within_bounds(p))
            .collect()
    }

    /// Check if any two adjacent tiles share a value (a merge is possible)
    pub fn tile_matches_available(&self) -> bool {
        self.tiles().any(|tile| {
            self.neighbors(tile.position()).iter().any(|&p| {
                self.cell_content(p)
                    .is_some_and(|other| tile.mergeable_with(other))
            })
        })
    }

    /// Check if any move can still change the grid
    pub fn moves_available(&self) -> bool {
        self.cells_available() || self.tile_matches_available()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.to_rows() {
            let line: Vec<String> = row.iter().map(u32::to_string).collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}

/// Column-major coordinate iterator over a grid
///
/// A clone replays the remaining sequence; call [`Grid::coords`] again to start over.
#[derive(Debug, Clone)]
pub struct Coords {
    size: usize,
    next: usize,
}

impl Coords {
    fn new(size: usize) -> Self {
        Self { size, next: 0 }
    }
}

impl Iterator for Coords {
    type Item = Position;

    fn next(&mut self) -> Option<Position> {
        if self.next >= self.size * self.size {
            return None;
        }
        let x = self.next / self.size;
        let y = self.next % self.size;
        self.next += 1;
        Some(Position::new(x as i32, y as i32))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.size * self.size - self.next.min(self.size * self.size);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Coords {}
