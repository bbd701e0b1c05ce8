//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the engine.
//! All types are plain data with no game logic, making them usable in any
//! context (core engine, descent driver, external renderers or AI controllers).
//!
//! # Board Dimensions
//!
//! Default playfield dimensions (configurable per engine instance):
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19, row 0 is the top)
//! - **Spawn column**: `width / 2 - 1`, pieces start straddling rows -1 and 0
//!
//! # Scoring Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `LINE_CLEAR_REWARD` | 100 | Reward per cleared line |
//! | `GAP_PENALTY` | 10 | Penalty per buried empty cell |
//!
//! # Timing
//!
//! - `DESCENT_INTERVAL_MS`: 1000ms - autonomous gravity tick
//!
//! # Examples
//!
//! ```
//! use tetris_engine_types::{Action, Color, DEFAULT_BOARD_HEIGHT, DEFAULT_BOARD_WIDTH};
//!
//! // Actions parse from the numeric codes used by controllers
//! assert_eq!(Action::from_code(2), Some(Action::Down));
//!
//! // ...or from names (case-insensitive)
//! assert_eq!(Action::from_str("Rotate"), Some(Action::Up));
//!
//! // Cells store 1-based palette indices
//! assert_eq!(Color::Yellow.cell(), 3);
//! assert_eq!(Color::from_cell(3), Some(Color::Yellow));
//!
//! assert_eq!(DEFAULT_BOARD_WIDTH, 10);
//! assert_eq!(DEFAULT_BOARD_HEIGHT, 20);
//! ```

use serde::{Deserialize, Serialize};

/// Default board width in cells (10 columns)
pub const DEFAULT_BOARD_WIDTH: usize = 10;

/// Default board height in cells (20 rows)
pub const DEFAULT_BOARD_HEIGHT: usize = 20;

/// Autonomous descent interval in milliseconds (one row per second)
pub const DESCENT_INTERVAL_MS: u64 = 1000;

/// Reward per cleared line
pub const LINE_CLEAR_REWARD: i64 = 100;

/// Penalty per empty cell buried under the stack
pub const GAP_PENALTY: i64 = 10;

/// Maximum number of cells in a piece template
pub const MAX_PIECE_CELLS: usize = 4;

/// Largest accepted board width or height
pub const MAX_BOARD_SIDE: usize = 1024;

/// Number of colors in the palette (valid non-empty cells are `1..=N_COLORS`)
pub const N_COLORS: u8 = 7;

/// Empty cell value
pub const EMPTY: Cell = 0;

/// A cell on the game board
///
/// - `0`: Empty cell
/// - `1..=N_COLORS`: Cell filled with the palette color of that index
pub type Cell = u8;

/// A `(row, column)` position or offset.
///
/// Rows may be negative while a piece is still above the visible board.
pub type Offset = (i32, i32);


/// Piece colors
///
/// The palette is 1-based so that `0` can mean "empty" on the board.
/// Each color carries the hex value renderers use for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Red,
    Orange,
    Yellow,
    Green,
    Purple,
    Blue,
    Cyan,
}

impl Color {
    /// All palette colors in index order
    pub const ALL: [Color; N_COLORS as usize] = [
        Color::Red,
        Color::Orange,
        Color::Yellow,
        Color::Green,
        Color::Purple,
        Color::Blue,
        Color::Cyan,
    ];

    /// Board cell value for this color (1-based palette index)
    pub fn cell(&self) -> Cell {
        match self {
            Color::Red => 1,
            Color::Orange => 2,
            Color::Yellow => 3,
            Color::Green => 4,
            Color::Purple => 5,
            Color::Blue => 6,
            Color::Cyan => 7,
        }
    }

    /// Look up the color stored in a board cell
    ///
    /// Returns `None` for empty cells and values outside the palette.
    pub fn from_cell(cell: Cell) -> Option<Self> {
        match cell {
            1..=N_COLORS => Some(Self::ALL[(cell - 1) as usize]),
            _ => None,
        }
    }

    /// Hex color string for renderers
    pub fn hex(&self) -> &'static str {
        match self {
            Color::Red => "#ff4d4d",
            Color::Orange => "#ffc966",
            Color::Yellow => "#ffff4d",
            Color::Green => "#4dff4d",
            Color::Purple => "#be90d4",
            Color::Blue => "#4a80ff",
            Color::Cyan => "#0cf0f0",
        }
    }

    /// Parse color from its lowercase name
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "red" => Some(Color::Red),
            "orange" => Some(Color::Orange),
            "yellow" => Some(Color::Yellow),
            "green" => Some(Color::Green),
            "purple" => Some(Color::Purple),
            "blue" => Some(Color::Blue),
            "cyan" => Some(Color::Cyan),
            _ => None,
        }
    }
}

/// Actions a controller can issue through `step`
///
/// The numeric codes are the ones GUI and AI controllers send:
/// `Left = 0`, `Up = 1`, `Down = 2`, `Right = 3`, `Exit = 4`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    /// Move piece one cell left
    Left,
    /// Rotate piece 90° about its pivot
    Up,
    /// Move piece one cell down (may land it)
    Down,
    /// Move piece one cell right
    Right,
    /// Ask the caller to terminate; not an engine transition
    Exit,
}

impl Action {
    /// All actions in code order
    pub const ALL: [Action; 5] = [
        Action::Left,
        Action::Up,
        Action::Down,
        Action::Right,
        Action::Exit,
    ];

    /// Actions that change engine state
    pub const MOVES: [Action; 4] = [Action::Left, Action::Up, Action::Down, Action::Right];

    /// Numeric action code
    pub fn code(&self) -> u8 {
        match self {
            Action::Left => 0,
            Action::Up => 1,
            Action::Down => 2,
            Action::Right => 3,
            Action::Exit => 4,
        }
    }

    /// Parse action from its numeric code
    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.get(code as usize).copied()
    }

    /// Parse action from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use tetris_engine_types::Action;
    ///
    /// assert_eq!(Action::from_str("left"), Some(Action::Left));
    /// assert_eq!(Action::from_str("UP"), Some(Action::Up));
    /// assert_eq!(Action::from_str("rotate"), Some(Action::Up));
    /// assert_eq!(Action::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "left" => Some(Action::Left),
            "up" | "rotate" => Some(Action::Up),
            "down" => Some(Action::Down),
            "right" => Some(Action::Right),
            "exit" => Some(Action::Exit),
            _ => None,
        }
    }

    /// Convert to lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Left => "left",
            Action::Up => "up",
            Action::Down => "down",
            Action::Right => "right",
            Action::Exit => "exit",
        }
    }
}
