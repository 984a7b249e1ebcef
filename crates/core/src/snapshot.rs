//! View snapshots and the observer seam to a presentation layer.

use crate::grid::Grid;
use crate::types::PositionTransition;

/// Immutable view state handed to observers after every operation
#[derive(Debug, Clone, PartialEq)]
pub struct GameViewInfo {
    pub grid: Grid,
    pub score: u64,
    pub won: bool,
    pub terminated: bool,
    /// Transitions of the move just performed (empty after a no-op)
    pub transitions: Vec<PositionTransition>,
}

/// Receives view state from a [`GameManager`](crate::GameManager)
///
/// The observer gets a read-only snapshot and has no way back into the
/// manager.
pub trait ViewObserver {
    fn update_view_state(&mut self, info: &GameViewInfo);
}

impl<F> ViewObserver for F
where
    F: FnMut(&GameViewInfo),
{
    fn update_view_state(&mut self, info: &GameViewInfo) {
        self(info)
    }
}

/// Plain-data description of a game, for persistence layers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameRecord {
    pub size: usize,
    pub score: u64,
    pub over: bool,
    pub won: bool,
    pub keep_playing: bool,
    /// Occupied cells as (x, y, value), column-major
    pub tiles: Vec<(i32, i32, u32)>,
}
