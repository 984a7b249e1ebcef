//! Store module - saved games and high scores as a JSON document
//!
//! This module keeps play state across sessions without the game logic
//! knowing anything about files. The core exports a plain
//! [`GameRecord`](core::GameRecord); this crate maps it to a serde document
//! and hands it to a [`GameStore`] backend.
//!
//! # Save Document
//!
//! A single JSON object:
//!
//! - **version**: save format version, currently 1 (other versions are rejected)
//! - **high_score**: best score ever reached
//! - **game**: optional game in progress (size, score, flags, tiles)
//!
//! # Recovery
//!
//! A missing document is an empty store. A corrupt or inconsistent document
//! never stops play: [`resume_or_new`] logs a warning and starts a fresh
//! game, and the next save overwrites the bad file.
//!
//! # Environment Variables
//!
//! - `TWENTY48_SIZE`: Grid side length (default: 4)
//! - `TWENTY48_WIN_VALUE`: Winning tile (default: 2048)
//! - `TWENTY48_SEED`: Spawner seed (default: random)
//! - `TWENTY48_SAVE_PATH`: Save document (default: "twenty48-save.json")
//! - `TWENTY48_PERSIST_DISABLED`: Set to "1" or "true" to disable saving
//!
//! # Example
//!
//! ```
//! use twenty48_store::{resume_or_new, save_progress, HighScoreTracker, MemoryStore};
//! use twenty48_store::core::{GameConfig, RandomSpawner};
//! use twenty48_store::types::Direction;
//!
//! let mut store = MemoryStore::new();
//! let mut tracker = HighScoreTracker::load(&store);
//! let mut game = resume_or_new(&mut store, GameConfig::default(), RandomSpawner::new(7)).unwrap();
//!
//! game.make_move(Direction::Left);
//! save_progress(&mut store, &mut tracker, &game).unwrap();
//! assert!(store.document().game.is_some());
//! ```

pub mod config;
pub mod record;
pub mod session;
pub mod store;

pub use twenty48_core as core;
pub use twenty48_types as types;

pub use config::RunnerConfig;
pub use record::{parse_save, to_json, SaveFile, SavedGame, SavedTile, SAVE_FORMAT_VERSION};
pub use session::{resume_or_new, save_progress, HighScoreTracker};
pub use store::{GameStore, JsonFileStore, MemoryStore};
