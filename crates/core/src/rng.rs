//! RNG module - where new tiles come from
//!
//! The game never touches a global RNG. A [`TileSpawner`] decides where the
//! next tile goes and what value it has:
//!
//! - [`RandomSpawner`]: seeded `SmallRng`, uniform over empty cells, 2 or 4
//!   with a configurable chance of 4. Same seed, same game.
//! - [`ScriptedSpawner`]: replays a fixed list of placements, for tests and
//!   debugging sessions that need an exact board.

use std::collections::VecDeque;

use log::debug;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::grid::Grid;
use crate::types::{Position, BASE_TILE_VALUE, BONUS_TILE_VALUE, FOUR_TILE_PROBABILITY};

/// Source of new tiles
pub trait TileSpawner {
    /// Pick a cell and a value for the next tile, or None to skip spawning
    ///
    /// Implementations must only return empty, in-bounds cells of `grid`.
    fn next_spawn(&mut self, grid: &Grid) -> Option<(Position, u32)>;
}

impl<S: TileSpawner + ?Sized> TileSpawner for Box<S> {
    fn next_spawn(&mut self, grid: &Grid) -> Option<(Position, u32)> {
        (**self).next_spawn(grid)
    }
}

/// Seeded random spawner
#[derive(Debug, Clone)]
pub struct RandomSpawner {
    rng: SmallRng,
    seed: u64,
    four_probability: f64,
}

impl RandomSpawner {
    /// Create a spawner with the given seed and the classic 10% chance of a 4
    pub fn new(seed: u64) -> Self {
        Self::with_probability(seed, FOUR_TILE_PROBABILITY)
    }

    /// `four_probability` is clamped to [0, 1]; NaN counts as 0.
    pub fn with_probability(seed: u64, four_probability: f64) -> Self {
        let four_probability = if four_probability.is_nan() {
            0.0
        } else {
            four_probability.clamp(0.0, 1.0)
        };
        Self {
            rng: SmallRng::seed_from_u64(seed),
            seed,
            four_probability,
        }
    }

    /// The seed this spawner was created with
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Draw a tile value: 4 with `four_probability`, else 2
    pub fn next_value(&mut self) -> u32 {
        if self.rng.gen_bool(self.four_probability) {
            BONUS_TILE_VALUE
        } else {
            BASE_TILE_VALUE
        }
    }
}

impl Default for RandomSpawner {
    fn default() -> Self {
        Self::new(1)
    }
}

impl TileSpawner for RandomSpawner {
    fn next_spawn(&mut self, grid: &Grid) -> Option<(Position, u32)> {
        let pos = grid.random_available_cell(&mut self.rng)?;
        let value = self.next_value();
        Some((pos, value))
    }
}

/// Replays a fixed list of placements, then stops spawning
///
/// An entry whose cell is occupied (or out of bounds) when its turn comes is
/// dropped and nothing spawns for that turn.
#[derive(Debug, Clone, Default)]
pub struct ScriptedSpawner {
    script: VecDeque<(Position, u32)>,
}

impl ScriptedSpawner {
    pub fn new<I>(script: I) -> Self
    where
        I: IntoIterator<Item = (Position, u32)>,
    {
        Self {
            script: script.into_iter().collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl TileSpawner for ScriptedSpawner {
    fn next_spawn(&mut self, grid: &Grid) -> Option<(Position, u32)> {
        let (pos, value) = self.script.pop_front()?;
        if grid.within_bounds(pos) && grid.cell_available(pos) {
            Some((pos, value))
        } else {
            debug!("scripted spawn at ({}) skipped: cell not available", pos);
            None
        }
    }
}
