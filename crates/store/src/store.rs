//! Storage backends for saved games and the high score
//!
//! [`GameStore`] is the seam the runner talks to. Two backends:
//!
//! - [`MemoryStore`]: keeps the document in memory (tests, headless sessions).
//! - [`JsonFileStore`]: one JSON document on disk. A missing file is an empty
//!   store; writes go to a temp file first and are renamed into place.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{debug, warn};

use crate::record::{parse_save, to_json, SaveFile, SavedGame};

/// Load/save interface for persisted state
pub trait GameStore {
    /// The saved game in progress, if any
    fn load_game(&self) -> Result<Option<SavedGame>>;

    fn save_game(&mut self, game: &SavedGame) -> Result<()>;

    /// Forget the saved game (the high score is kept)
    fn clear_game(&mut self) -> Result<()>;

    fn high_score(&self) -> Result<u64>;

    fn save_high_score(&mut self, score: u64) -> Result<()>;
}

/// In-memory store
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStore {
    file: SaveFile,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_game(game: SavedGame) -> Self {
        Self {
            file: SaveFile {
                game: Some(game),
                ..SaveFile::default()
            },
        }
    }

    pub fn document(&self) -> &SaveFile {
        &self.file
    }
}

impl GameStore for MemoryStore {
    fn load_game(&self) -> Result<Option<SavedGame>> {
        Ok(self.file.game.clone())
    }

    fn save_game(&mut self, game: &SavedGame) -> Result<()> {
        self.file.game = Some(game.clone());
        Ok(())
    }

    fn clear_game(&mut self) -> Result<()> {
        self.file.game = None;
        Ok(())
    }

    fn high_score(&self) -> Result<u64> {
        Ok(self.file.high_score)
    }

    fn save_high_score(&mut self, score: u64) -> Result<()> {
        self.file.high_score = score;
        Ok(())
    }
}

/// Single JSON document on disk
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the whole document; a missing file reads as an empty store
    pub fn read(&self) -> Result<SaveFile> {
        if !self.path.exists() {
            debug!("no save file at {}", self.path.display());
            return Ok(SaveFile::default());
        }
        let json = fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read {}", self.path.display()))?;
        parse_save(&json).with_context(|| format!("corrupt save file {}", self.path.display()))
    }

    pub fn write(&self, file: &SaveFile) -> Result<()> {
        let json = to_json(file)?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, json).with_context(|| format!("failed to write {}", tmp.display()))?;
        fs::rename(&tmp, &self.path)
            .with_context(|| format!("failed to replace {}", self.path.display()))?;
        Ok(())
    }

    /// Read-modify-write. A corrupt document is replaced rather than kept.
    fn update<F>(&self, change: F) -> Result<()>
    where
        F: FnOnce(&mut SaveFile),
    {
        let mut file = match self.read() {
            Ok(file) => file,
            Err(err) => {
                warn!("overwriting unreadable save: {:#}", err);
                SaveFile::default()
            }
        };
        change(&mut file);
        self.write(&file)
    }
}

impl GameStore for JsonFileStore {
    fn load_game(&self) -> Result<Option<SavedGame>> {
        Ok(self.read()?.game)
    }

    fn save_game(&mut self, game: &SavedGame) -> Result<()> {
        self.update(|file| file.game = Some(game.clone()))
    }

    fn clear_game(&mut self) -> Result<()> {
        self.update(|file| file.game = None)
    }

    fn high_score(&self) -> Result<u64> {
        Ok(self.read()?.high_score)
    }

    fn save_high_score(&mut self, score: u64) -> Result<()> {
        self.update(|file| file.high_score = score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::SavedTile;
    use tempfile::TempDir;

    fn sample_game() -> SavedGame {
        SavedGame {
            size: 4,
            score: 20,
            over: false,
            won: false,
            keep_playing: false,
            tiles: vec![SavedTile { x: 0, y: 0, value: 16 }, SavedTile { x: 2, y: 1, value: 4 }],
        }
    }

    #[test]
    fn test_memory_store_roundtrip() {
        let mut store = MemoryStore::new();
        assert_eq!(store.load_game().unwrap(), None);

        store.save_game(&sample_game()).unwrap();
        store.save_high_score(64).unwrap();
        assert_eq!(store.load_game().unwrap(), Some(sample_game()));
        assert_eq!(store.high_score().unwrap(), 64);

        store.clear_game().unwrap();
        assert_eq!(store.load_game().unwrap(), None);
        assert_eq!(store.high_score().unwrap(), 64);
    }

    #[test]
    fn test_json_store_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path().join("save.json"));
        assert_eq!(store.load_game().unwrap(), None);
        assert_eq!(store.high_score().unwrap(), 0);
    }

    #[test]
    fn test_json_store_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("save.json");

        let mut store = JsonFileStore::new(&path);
        store.save_game(&sample_game()).unwrap();
        store.save_high_score(128).unwrap();

        let reopened = JsonFileStore::new(&path);
        assert_eq!(reopened.load_game().unwrap(), Some(sample_game()));
        assert_eq!(reopened.high_score().unwrap(), 128);
        assert!(!path.with_extension("tmp").exists());
    }

    #[test]
    fn test_json_store_corrupt_file_errors_then_recovers_on_write() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("save.json");
        fs::write(&path, "{ definitely not json").unwrap();

        let mut store = JsonFileStore::new(&path);
        assert!(store.load_game().is_err());
        assert!(store.high_score().is_err());

        store.save_high_score(8).unwrap();
        assert_eq!(store.high_score().unwrap(), 8);
    }
}
