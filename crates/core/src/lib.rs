//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains the rules of the sliding-tile merge puzzle: the grid,
//! tiles, move resolution, spawning, scoring, and win/game-over detection.
//! It has **no dependencies** on rendering, input devices, or storage, making it:
//!
//! - **Deterministic**: Same seed produces identical games (for replays and tests)
//! - **Testable**: Scripted spawns give exact boards
//! - **Portable**: Runs headless, behind any frontend
//!
//! # Module Structure
//!
//! - [`grid`]: size x size playfield with availability queries and iteration
//! - [`tile`]: numbered tiles with stable ids and one-move merge lineage
//! - [`resolver`]: traversal order, farthest-position search, merging
//! - [`game_manager`]: setup, moves, scoring, terminal state, observers
//! - [`rng`]: seeded and scripted tile spawners
//! - [`snapshot`]: view state handed to observers, records for persistence
//! - [`config`]: rule knobs and their validation
//!
//! # Game Rules
//!
//! - **Moves**: every tile slides as far as it can in the chosen direction
//! - **Merges**: two equal tiles meeting merge into one of double value, once
//!   per destination per move; the merged value is added to the score
//! - **Spawns**: after any move that changed the grid, one tile (2 at 90%,
//!   4 at 10%) appears on a random empty cell
//! - **Win**: reaching 2048 wins; play may continue afterwards
//! - **Game over**: full grid and no two neighbouring tiles match
//!
//! # Example
//!
//! ```
//! use twenty48_core::{GameConfig, GameManager};
//! use twenty48_core::types::Direction;
//!
//! // Create and set up a game
//! let mut game = GameManager::new(GameConfig::default(), 12345).unwrap();
//! game.setup();
//! assert_eq!(game.grid().tile_count(), 2);
//!
//! // Make moves
//! let view = game.make_move(Direction::Left);
//! let view = game.make_move(Direction::Up);
//!
//! assert_eq!(view.score, game.score());
//! assert!(!game.is_game_terminated());
//! ```

pub mod config;
pub mod error;
pub mod game_manager;
pub mod grid;
pub mod resolver;
pub mod rng;
pub mod snapshot;
pub mod tile;

pub use twenty48_types as types;

// Re-export commonly used types for convenience
pub use config::{GameConfig, TransitionPolicy};
pub use error::GameError;
pub use game_manager::GameManager;
pub use grid::Grid;
pub use resolver::{resolve_move, MoveOutcome};
pub use rng::{RandomSpawner, ScriptedSpawner, TileSpawner};
pub use snapshot::{GameRecord, GameViewInfo, ViewObserver};
pub use tile::Tile;
