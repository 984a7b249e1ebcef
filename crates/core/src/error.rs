//! Error types for the rules engine.
//!
//! Normal play never fails: out-of-bounds lookups are empty cells and blocked
//! moves are no-ops. [`GameError`] only covers caller mistakes such as an
//! unknown direction code, an inconsistent configuration, or a saved record
//! that doesn't describe a valid board.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    /// Direction codes are 0 (up), 1 (right), 2 (down) and 3 (left).
    #[error("invalid direction code {0} (expected 0..=3)")]
    InvalidDirection(u8),

    #[error("invalid game configuration: {0}")]
    InvalidConfig(String),

    /// A restored record or hand-built grid is inconsistent.
    #[error("invalid game record: {0}")]
    InvalidRecord(String),
}
