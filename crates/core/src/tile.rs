//! Tile module - a numbered piece on the grid
//!
//! Tiles carry a stable [`TileId`] so that merge lineage can be recorded as
//! plain data. A merged tile points at the ids of the two tiles it consumed
//! for exactly one move; the consumed tiles themselves are handed back to the
//! caller in the move outcome and dropped at the start of the next move.

use crate::types::{Position, TileId, MAX_TILE_VALUE};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tile {
    id: TileId,
    position: Position,
    value: u32,
    previous_position: Option<Position>,
    merged_from: Option<(TileId, TileId)>,
}

impl Tile {
    pub fn new(id: TileId, position: Position, value: u32) -> Self {
        Self {
            id,
            position,
            value,
            previous_position: None,
            merged_from: None,
        }
    }

    /// Create the result of merging `moving` into `occupant`
    ///
    /// The new tile sits on the occupant's cell with double the value.
    /// Callers check [`Tile::mergeable_with`] first.
    pub(crate) fn merged(id: TileId, moving: &Tile, occupant: &Tile) -> Self {
        Self {
            id,
            position: occupant.position,
            value: moving.value * 2,
            previous_position: None,
            merged_from: Some((moving.id, occupant.id)),
        }
    }

    pub fn id(&self) -> TileId {
        self.id
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn value(&self) -> u32 {
        self.value
    }

    /// Where the tile was before the current move started
    pub fn previous_position(&self) -> Option<Position> {
        self.previous_position
    }

    /// Ids of the (moving, occupant) tiles this tile was created from in the last move
    pub fn merged_from(&self) -> Option<(TileId, TileId)> {
        self.merged_from
    }

    pub fn is_merge_result(&self) -> bool {
        self.merged_from.is_some()
    }

    /// Equal values whose double still fits a tile
    pub fn mergeable_with(&self, other: &Tile) -> bool {
        self.value == other.value && self.value < MAX_TILE_VALUE
    }

    /// Snapshot the current position and forget merge lineage
    pub(crate) fn prepare_for_move(&mut self) {
        self.merged_from = None;
        self.previous_position = Some(self.position);
    }

    /// Only the grid may call this, so the cell and the field stay in sync.
    pub(crate) fn set_position(&mut self, position: Position) {
        self.position = position;
    }
}
