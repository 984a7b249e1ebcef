//! Game configuration.
//!
//! [`GameConfig`] holds the rule knobs of a game. The defaults are the
//! classic 4x4 rules:
//!
//! | Field | Default | Effect |
//! |-------|---------|--------|
//! | `size` | 4 | Side length of the grid |
//! | `start_tiles` | 2 | Tiles spawned by `setup()` |
//! | `win_value` | 2048 | Merging into this value (or above) wins |
//! | `four_probability` | 0.1 | Chance a spawned tile is a 4 |
//! | `transitions` | `PerTile` | How Moved transitions are logged |
//!
//! ```
//! use twenty48_core::GameConfig;
//!
//! let config = GameConfig { size: 5, ..Default::default() };
//! assert!(config.validate().is_ok());
//! ```

use crate::error::GameError;
use crate::types::{
    DEFAULT_GRID_SIZE, DEFAULT_START_TILES, FOUR_TILE_PROBABILITY, WIN_TILE_VALUE,
};

/// Largest supported side length
pub const MAX_GRID_SIZE: usize = 16;

/// How the resolver records Moved transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransitionPolicy {
    /// A tile gets a Moved transition iff its start cell differs from its end
    /// cell. Merged tiles only produce the Removed transition at the target.
    #[default]
    PerTile,
    /// Historical rule: once any tile has moved during the traversal, every
    /// tile visited afterwards logs Moved (start to current position), even
    /// when it didn't move or was merged away.
    Legacy,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    pub size: usize,
    pub start_tiles: usize,
    pub win_value: u32,
    pub four_probability: f64,
    pub transitions: TransitionPolicy,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_GRID_SIZE,
            start_tiles: DEFAULT_START_TILES,
            win_value: WIN_TILE_VALUE,
            four_probability: FOUR_TILE_PROBABILITY,
            transitions: TransitionPolicy::PerTile,
        }
    }
}

impl GameConfig {
    /// Classic rules on a grid of the given size
    pub fn with_size(size: usize) -> Self {
        Self {
            size,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), GameError> {
        if self.size == 0 || self.size > MAX_GRID_SIZE {
            return Err(GameError::InvalidConfig(format!(
                "size must be in 1..={}, got {}",
                MAX_GRID_SIZE, self.size
            )));
        }
        if self.win_value < 4 || !self.win_value.is_power_of_two() {
            return Err(GameError::InvalidConfig(format!(
                "win_value must be a power of two >= 4, got {}",
                self.win_value
            )));
        }
        if !(0.0..=1.0).contains(&self.four_probability) {
            return Err(GameError::InvalidConfig(format!(
                "four_probability must be within [0, 1], got {}",
                self.four_probability
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_classic() {
        let config = GameConfig::default();
        assert_eq!(config.size, 4);
        assert_eq!(config.start_tiles, 2);
        assert_eq!(config.win_value, 2048);
        assert_eq!(config.transitions, TransitionPolicy::PerTile);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        assert!(GameConfig::with_size(0).validate().is_err());
        assert!(GameConfig::with_size(MAX_GRID_SIZE + 1).validate().is_err());

        let odd_win = GameConfig {
            win_value: 1000,
            ..Default::default()
        };
        assert!(matches!(odd_win.validate(), Err(GameError::InvalidConfig(_))));

        let bad_p = GameConfig {
            four_probability: 1.5,
            ..Default::default()
        };
        assert!(bad_p.validate().is_err());

        let nan_p = GameConfig {
            four_probability: f64::NAN,
            ..Default::default()
        };
        assert!(nan_p.validate().is_err());
    }
}
