//! Game manager module - owns a game from setup to game over
//!
//! This module ties together the grid, the move resolver and the tile
//! spawner. It keeps score and the win/over flags, and pushes an immutable
//! [`GameViewInfo`] to an optional observer after every operation.
//!
//! Life cycle:
//!
//! - **Active**: moves are resolved.
//! - **Won**: a merge reached the win value. Terminal until
//!   [`GameManager::continue_playing`] is called.
//! - **Over**: the grid is full and no two neighbours match. Terminal until
//!   [`GameManager::restart`].

use std::fmt;

use log::{debug, info};

use crate::config::GameConfig;
use crate::error::GameError;
use crate::grid::Grid;
use crate::resolver::resolve_move;
use crate::rng::{RandomSpawner, TileSpawner};
use crate::snapshot::{GameRecord, GameViewInfo, ViewObserver};
use crate::tile::Tile;
use crate::types::{Direction, Position, PositionTransition};

pub struct GameManager<S: TileSpawner = RandomSpawner> {
    config: GameConfig,
    grid: Grid,
    /// Grid as it was before the last resolved move
    previous_grid: Grid,
    score: u64,
    over: bool,
    won: bool,
    keep_playing: bool,
    /// Monotonic count of moves that changed the grid (reset on setup).
    moves: u64,
    transitions: Vec<PositionTransition>,
    /// Tiles consumed by merges in the last move; dropped on the next one.
    retired: Vec<Tile>,
    spawner: S,
    observer: Option<Box<dyn ViewObserver>>,
}

impl GameManager<RandomSpawner> {
    /// Create a game with a seeded random spawner
    ///
    /// The grid starts empty; call [`GameManager::setup`] to deal the start tiles.
    pub fn new(config: GameConfig, seed: u64) -> Result<Self, GameError> {
        let spawner = RandomSpawner::with_probability(seed, config.four_probability);
        Self::with_spawner(config, spawner)
    }
}

impl<S: TileSpawner> GameManager<S> {
    pub fn with_spawner(config: GameConfig, spawner: S) -> Result<Self, GameError> {
        config.validate()?;
        let grid = Grid::new(config.size);
        Ok(Self {
            previous_grid: grid.clone(),
            grid,
            config,
            score: 0,
            over: false,
            won: false,
            keep_playing: false,
            moves: 0,
            transitions: Vec::new(),
            retired: Vec::new(),
            spawner,
            observer: None,
        })
    }

    /// Rebuild a game from a saved record
    ///
    /// The record's size wins over `config.size`. Tiles must be in bounds,
    /// on distinct cells, with power-of-two values of at least 2.
    pub fn restore(
        mut config: GameConfig,
        spawner: S,
        record: &GameRecord,
    ) -> Result<Self, GameError> {
        config.size = record.size;
        let mut game = Self::with_spawner(config, spawner)?;

        for &(x, y, value) in &record.tiles {
            let pos = Position::new(x, y);
            if !game.grid.within_bounds(pos) {
                return Err(GameError::InvalidRecord(format!(
                    "tile at ({}) is outside a {}x{} grid",
                    pos, record.size, record.size
                )));
            }
            if game.grid.cell_occupied(pos) {
                return Err(GameError::InvalidRecord(format!(
                    "two tiles share cell ({})",
                    pos
                )));
            }
            if value < 2 || !value.is_power_of_two() {
                return Err(GameError::InvalidRecord(format!(
                    "tile value {} at ({}) is not a power of two",
                    value, pos
                )));
            }
            let tile = game.grid.new_tile(pos, value);
            game.grid.insert_tile(tile);
        }

        game.previous_grid = game.grid.clone();
        game.score = record.score;
        game.over = record.over;
        game.won = record.won;
        game.keep_playing = record.keep_playing;
        Ok(game)
    }

    /// Export the state needed to restore this game later
    pub fn record(&self) -> GameRecord {
        GameRecord {
            size: self.config.size,
            score: self.score,
            over: self.over,
            won: self.won,
            keep_playing: self.keep_playing,
            tiles: self
                .grid
                .tiles()
                .map(|t| (t.position().x, t.position().y, t.value()))
                .collect(),
        }
    }

    pub fn set_observer(&mut self, observer: Box<dyn ViewObserver>) {
        self.observer = Some(observer);
    }

    pub fn clear_observer(&mut self) {
        self.observer = None;
    }

    /// Start a fresh game: empty grid, zero score, flags cleared, start tiles dealt
    pub fn setup(&mut self) {
        self.grid = Grid::new(self.config.size);
        self.previous_grid = self.grid.clone();
        self.score = 0;
        self.over = false;
        self.won = false;
        self.keep_playing = false;
        self.moves = 0;
        self.transitions.clear();
        self.retired.clear();

        for _ in 0..self.config.start_tiles {
            self.add_random_tile();
        }

        info!(
            "new {}x{} game with {} start tiles",
            self.config.size,
            self.config.size,
            self.grid.tile_count()
        );
        self.notify();
    }

    pub fn restart(&mut self) {
        self.setup();
    }

    /// Re-announce the current state, e.g. after [`GameManager::restore`]
    pub fn refresh_view(&mut self) -> GameViewInfo {
        self.notify()
    }

    /// Lost, or won without choosing to keep playing
    pub fn is_game_terminated(&self) -> bool {
        self.over || (self.won && !self.keep_playing)
    }

    /// Move every tile in `dir`
    ///
    /// A terminated game is left untouched apart from clearing the transition
    /// log. Otherwise the move is resolved, one tile spawns if anything moved,
    /// and game over is re-evaluated. The observer is notified exactly once
    /// either way, and the same snapshot is returned.
    pub fn make_move(&mut self, dir: Direction) -> GameViewInfo {
        self.transitions.clear();
        self.retired.clear();

        if self.is_game_terminated() {
            debug!("move {} ignored: game is terminated", dir.as_str());
            return self.notify();
        }

        self.previous_grid = self.grid.clone();

        let outcome = resolve_move(
            &mut self.grid,
            dir,
            self.config.win_value,
            self.config.transitions,
        );

        self.score += outcome.score_delta;
        if outcome.reached_win && !self.won {
            self.won = true;
            info!("reached {} with score {}", self.config.win_value, self.score);
        }
        self.transitions = outcome.transitions;
        self.retired = outcome.retired;

        if outcome.moved {
            self.moves += 1;
            self.add_random_tile();
        }

        if !self.grid.moves_available() {
            self.over = true;
            info!("game over after {} moves with score {}", self.moves, self.score);
        }

        debug!(
            "move {}: moved={} +{} score={} transitions={}",
            dir.as_str(),
            outcome.moved,
            outcome.score_delta,
            self.score,
            self.transitions.len()
        );

        self.notify()
    }

    /// Move by direction code: 0 = up, 1 = right, 2 = down, 3 = left
    ///
    /// Any other code is a caller bug and fails without touching the game.
    pub fn move_code(&mut self, code: u8) -> Result<GameViewInfo, GameError> {
        let dir = Direction::from_code(code).ok_or(GameError::InvalidDirection(code))?;
        Ok(self.make_move(dir))
    }

    /// Keep playing after a win
    pub fn continue_playing(&mut self) -> GameViewInfo {
        if self.won && !self.keep_playing {
            self.keep_playing = true;
            info!("continuing past {}", self.config.win_value);
        }
        self.notify()
    }

    /// Spawn one tile from the spawner and log an Added transition
    ///
    /// Returns false if the grid is full or the spawner declined.
    pub fn add_random_tile(&mut self) -> bool {
        if !self.grid.cells_available() {
            return false;
        }
        let Some((pos, value)) = self.spawner.next_spawn(&self.grid) else {
            return false;
        };
        if !self.grid.cell_available(pos) || !self.grid.within_bounds(pos) {
            debug!("spawner picked unavailable cell ({}), skipping", pos);
            return false;
        }

        let tile = self.grid.new_tile(pos, value);
        self.grid.insert_tile(tile);
        self.transitions.push(PositionTransition::added(pos));
        true
    }

    /// Build the current view state
    pub fn snapshot(&self) -> GameViewInfo {
        GameViewInfo {
            grid: self.grid.clone(),
            score: self.score,
            won: self.won,
            terminated: self.is_game_terminated(),
            transitions: self.transitions.clone(),
        }
    }

    fn notify(&mut self) -> GameViewInfo {
        let info = self.snapshot();
        if let Some(observer) = self.observer.as_mut() {
            observer.update_view_state(&info);
        }
        info
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn size(&self) -> usize {
        self.config.size
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn over(&self) -> bool {
        self.over
    }

    pub fn won(&self) -> bool {
        self.won
    }

    pub fn keep_playing(&self) -> bool {
        self.keep_playing
    }

    pub fn moves(&self) -> u64 {
        self.moves
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn previous_grid(&self) -> &Grid {
        &self.previous_grid
    }

    pub fn transitions(&self) -> &[PositionTransition] {
        &self.transitions
    }

    /// Tiles consumed by merges during the last move
    pub fn retired_tiles(&self) -> &[Tile] {
        &self.retired
    }

    pub fn spawner(&self) -> &S {
        &self.spawner
    }

    /// Replace the grid wholesale (debugging and tests). Score and flags are kept.
    pub fn set_grid(&mut self, grid: Grid) -> Result<(), GameError> {
        if grid.size() != self.config.size {
            return Err(GameError::InvalidRecord(format!(
                "grid size {} does not match game size {}",
                grid.size(),
                self.config.size
            )));
        }
        self.grid = grid;
        Ok(())
    }
}

impl<S: TileSpawner> fmt::Debug for GameManager<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameManager")
            .field("config", &self.config)
            .field("grid", &self.grid)
            .field("score", &self.score)
            .field("over", &self.over)
            .field("won", &self.won)
            .field("keep_playing", &self.keep_playing)
            .field("moves", &self.moves)
            .field("transitions", &self.transitions)
            .finish_non_exhaustive()
    }
}

impl<S: TileSpawner> fmt::Display for GameManager<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.grid)
    }
}
