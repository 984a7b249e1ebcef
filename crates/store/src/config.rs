//! Runner configuration from environment variables
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | `TWENTY48_SIZE` | 4 | Grid side length |
//! | `TWENTY48_WIN_VALUE` | 2048 | Winning tile value |
//! | `TWENTY48_SEED` | random | Spawner seed |
//! | `TWENTY48_SAVE_PATH` | `twenty48-save.json` | JSON save document |
//! | `TWENTY48_PERSIST_DISABLED` | unset | `1`/`true` disables saving |
//!
//! Unparsable or out-of-range values fall back to the default with a warning.

use std::path::PathBuf;

use log::warn;

use crate::core::GameConfig;

pub const DEFAULT_SAVE_PATH: &str = "twenty48-save.json";

#[derive(Debug, Clone, PartialEq)]
pub struct RunnerConfig {
    pub game: GameConfig,
    /// None means seed from entropy
    pub seed: Option<u64>,
    /// None means persistence is disabled
    pub save_path: Option<PathBuf>,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            game: GameConfig::default(),
            seed: None,
            save_path: Some(PathBuf::from(DEFAULT_SAVE_PATH)),
        }
    }
}

impl RunnerConfig {
    /// Create from process environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create from any key lookup (the environment, a map in tests)
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let size = lookup("TWENTY48_SIZE")
            .and_then(|s| s.trim().parse().ok())
            .filter(|&size| {
                let valid = GameConfig::with_size(size).validate();
                if let Err(err) = &valid {
                    warn!("ignoring TWENTY48_SIZE: {}", err);
                }
                valid.is_ok()
            })
            .unwrap_or(defaults.game.size);

        let win_value = lookup("TWENTY48_WIN_VALUE")
            .and_then(|s| s.trim().parse().ok())
            .filter(|&win_value| {
                let candidate = GameConfig {
                    win_value,
                    ..GameConfig::default()
                };
                let valid = candidate.validate();
                if let Err(err) = &valid {
                    warn!("ignoring TWENTY48_WIN_VALUE: {}", err);
                }
                valid.is_ok()
            })
            .unwrap_or(defaults.game.win_value);

        let seed = lookup("TWENTY48_SEED").and_then(|s| s.trim().parse().ok());

        let disabled = lookup("TWENTY48_PERSIST_DISABLED")
            .map(|v| v == "1" || v.to_lowercase() == "true")
            .unwrap_or(false);

        let save_path = if disabled {
            None
        } else {
            lookup("TWENTY48_SAVE_PATH")
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .map(PathBuf::from)
                .or(defaults.save_path)
        };

        Self {
            game: GameConfig {
                size,
                win_value,
                ..defaults.game
            },
            seed,
            save_path,
        }
    }
}
