//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (rules engine, persistence, a frontend).
//!
//! # Coordinates
//!
//! The grid is square. A [`Position`] is `(x, y)` where `x` is the column
//! (left to right) and `y` is the row (top to bottom), both in `0..size`.
//!
//! # Directions
//!
//! | Code | Direction | Vector |
//! |------|-----------|--------|
//! | 0 | Up | (0, -1) |
//! | 1 | Right | (1, 0) |
//! | 2 | Down | (0, 1) |
//! | 3 | Left | (-1, 0) |
//!
//! # Game Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `DEFAULT_GRID_SIZE` | 4 | Side length of the classic board |
//! | `DEFAULT_START_TILES` | 2 | Tiles spawned by a fresh game |
//! | `WIN_TILE_VALUE` | 2048 | Tile value that wins the game |
//! | `FOUR_TILE_PROBABILITY` | 0.1 | Chance that a spawned tile is a 4 |
//! | `MAX_TILE_VALUE` | 2^31 | Largest tile; cannot merge further |
//!
//! # Examples
//!
//! ```
//! use twenty48_types::{Direction, Position, TransitionKind, PositionTransition};
//!
//! let dir = Direction::from_str("left").unwrap();
//! assert_eq!(dir, Direction::Left);
//! assert_eq!(dir.vector(), (-1, 0));
//!
//! let from = Position::new(3, 0);
//! assert_eq!(from.step(dir), Position::new(2, 0));
//!
//! let t = PositionTransition::moved(from, Position::new(0, 0));
//! assert_eq!(t.kind, TransitionKind::Moved);
//! ```

use std::fmt;

/// Side length of the classic board (4x4)
pub const DEFAULT_GRID_SIZE: usize = 4;

/// Number of tiles spawned when a game is set up
pub const DEFAULT_START_TILES: usize = 2;

/// Value of the winning tile
pub const WIN_TILE_VALUE: u32 = 2048;

/// Probability that a spawned tile is a 4 rather than a 2
pub const FOUR_TILE_PROBABILITY: f64 = 0.1;

/// Value of a regular spawned tile
pub const BASE_TILE_VALUE: u32 = 2;

/// Value of the rarer spawned tile
pub const BONUS_TILE_VALUE: u32 = 4;

/// Largest tile value that fits a `u32`; two of these never merge
pub const MAX_TILE_VALUE: u32 = 1 << 31;


/// A cell coordinate on the grid
///
/// Signed so that stepping past an edge yields an out-of-bounds position
/// instead of wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The neighbouring position one step in `dir`
    ///
    /// # Examples
    ///
    /// ```
    /// use twenty48_types::{Direction, Position};
    ///
    /// assert_eq!(Position::new(0, 0).step(Direction::Up), Position::new(0, -1));
    /// assert_eq!(Position::new(0, 0).step(Direction::Right), Position::new(1, 0));
    /// ```
    pub fn step(self, dir: Direction) -> Self {
        let (dx, dy) = dir.vector();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "x: {} y: {}", self.x, self.y)
    }
}

/// The four move directions
///
/// The discriminants are the wire codes used by input surfaces:
/// 0 = up, 1 = right, 2 = down, 3 = left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Direction {
    Up = 0,
    Right = 1,
    Down = 2,
    Left = 3,
}

impl Direction {
    /// All directions in code order
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    /// Map a direction code (0-3) to a direction
    ///
    /// Returns None for any other code.
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Direction::Up),
            1 => Some(Direction::Right),
            2 => Some(Direction::Down),
            3 => Some(Direction::Left),
            _ => None,
        }
    }

    pub fn code(self) -> u8 {
        self as u8
    }

    /// Unit vector `(dx, dy)` for this direction
    pub fn vector(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Right => (1, 0),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
        }
    }

    /// Parse direction from string (case-insensitive)
    ///
    /// Accepts full names or the WASD keys:
    /// "up" | "w", "right" | "d", "down" | "s", "left" | "a"
    ///
    /// # Examples
    ///
    /// ```
    /// use twenty48_types::Direction;
    ///
    /// assert_eq!(Direction::from_str("Right"), Some(Direction::Right));
    /// assert_eq!(Direction::from_str("a"), Some(Direction::Left));
    /// assert_eq!(Direction::from_str("diagonal"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "up" | "w" => Some(Direction::Up),
            "right" | "d" => Some(Direction::Right),
            "down" | "s" => Some(Direction::Down),
            "left" | "a" => Some(Direction::Left),
            _ => None,
        }
    }

    /// Convert to lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Right => "right",
            Direction::Down => "down",
            Direction::Left => "left",
        }
    }
}

/// Stable identity of a tile
///
/// Ids are handed out by the grid and never reused within one grid's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileId(pub u32);

impl fmt::Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What happened to a cell during the last move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransitionKind {
    Added,
    Moved,
    Removed,
}

/// One visual event of the last move, consumed by a presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PositionTransition {
    pub start: Position,
    pub end: Position,
    pub kind: TransitionKind,
}

impl PositionTransition {
    pub fn added(at: Position) -> Self {
        Self {
            start: at,
            end: at,
            kind: TransitionKind::Added,
        }
    }

    pub fn moved(start: Position, end: Position) -> Self {
        Self {
            start,
            end,
            kind: TransitionKind::Moved,
        }
    }

    pub fn removed(at: Position) -> Self {
        Self {
            start: at,
            end: at,
            kind: TransitionKind::Removed,
        }
    }

    pub fn is_stationary(&self) -> bool {
        self.start == self.end
    }
}
