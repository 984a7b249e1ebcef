//! Save format - JSON document types
//!
//! One document holds the high score and, optionally, the game in progress:
//!
//! ```text
//! {"version":1,"high_score":2932,"game":{"size":4,"score":1200,"over":false,"won":false,
//!  "keep_playing":false,"tiles":[{"x":0,"y":0,"value":128},...]}}
//! ```

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::GameRecord;

/// Current save format version
pub const SAVE_FORMAT_VERSION: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedTile {
    pub x: i32,
    pub y: i32,
    pub value: u32,
}

/// A game in progress
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedGame {
    pub size: usize,
    pub score: u64,
    #[serde(default)]
    pub over: bool,
    #[serde(default)]
    pub won: bool,
    #[serde(default)]
    pub keep_playing: bool,
    #[serde(default)]
    pub tiles: Vec<SavedTile>,
}

impl From<&GameRecord> for SavedGame {
    fn from(record: &GameRecord) -> Self {
        Self {
            size: record.size,
            score: record.score,
            over: record.over,
            won: record.won,
            keep_playing: record.keep_playing,
            tiles: record
                .tiles
                .iter()
                .map(|&(x, y, value)| SavedTile { x, y, value })
                .collect(),
        }
    }
}

impl From<&SavedGame> for GameRecord {
    fn from(saved: &SavedGame) -> Self {
        Self {
            size: saved.size,
            score: saved.score,
            over: saved.over,
            won: saved.won,
            keep_playing: saved.keep_playing,
            tiles: saved.tiles.iter().map(|t| (t.x, t.y, t.value)).collect(),
        }
    }
}

/// The whole save document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveFile {
    pub version: u32,
    #[serde(default)]
    pub high_score: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub game: Option<SavedGame>,
}

impl Default for SaveFile {
    fn default() -> Self {
        Self {
            version: SAVE_FORMAT_VERSION,
            high_score: 0,
            game: None,
        }
    }
}

/// Parse a save document, rejecting unknown format versions
pub fn parse_save(json: &str) -> Result<SaveFile> {
    let file: SaveFile = serde_json::from_str(json).context("malformed save document")?;
    if file.version != SAVE_FORMAT_VERSION {
        bail!(
            "unsupported save format version {} (expected {})",
            file.version,
            SAVE_FORMAT_VERSION
        );
    }
    Ok(file)
}

pub fn to_json(file: &SaveFile) -> Result<String> {
    serde_json::to_string_pretty(file).context("failed to encode save document")
}
