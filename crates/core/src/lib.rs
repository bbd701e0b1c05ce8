//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains all the game rules and state management of the
//! falling-block engine. It has **no dependencies** on rendering, input or
//! timers, making it:
//!
//! - **Deterministic**: Same seed produces identical piece sequences (for AI training)
//! - **Testable**: Unit tests for every movement, rotation and scoring rule
//! - **Portable**: Usable from a GUI, an AI controller or a headless runner
//!
//! # Module Structure
//!
//! - [`board`]: fixed-size grid with bounds-checked access and line clearing
//! - [`pieces`]: piece templates, pivot rotation and the piece catalog
//! - [`rng`]: seeded random piece source
//! - [`engine`]: the game manager (movement, rotation, landing, scoring, `step`)
//! - [`scoring`]: line-clear reward and hole penalty
//! - [`snapshot`]: serializable copies of the game for renderers and feature extraction
//! - [`config`]: engine configuration from defaults, environment or JSON
//! - [`error`]: engine error type
//!
//! # Game Rules
//!
//! - **Spawn**: pieces start at column `width / 2 - 1`, straddling rows -1 and 0
//! - **Movement**: only the leading edge of the piece is collision-checked
//! - **Rotation**: 90° about the pivot cell, all-or-nothing
//! - **Landing**: the piece stays as landed blocks and the preview piece takes over
//! - **Game over**: any block in row 0 after a landing
//! - **Scoring**: 100 per cleared line, -10 per buried empty cell
//!
//! # Example
//!
//! ```
//! use tetris_engine_core::{Engine, PieceCatalog};
//! use tetris_engine_types::Action;
//!
//! let mut engine = Engine::new(10, 20, PieceCatalog::square_only(), 12345).unwrap();
//!
//! engine.step(Action::Left);
//! let outcome = engine.step(Action::Down);
//! assert!(!outcome.landed);
//!
//! // Drop the square to the floor
//! while !engine.step(Action::Down).landed {}
//! assert_eq!(engine.board().occupied_count(), 4);
//! ```

pub mod board;
pub mod config;
pub mod engine;
pub mod error;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use tetris_engine_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use config::{DriveMode, EngineConfig};
pub use engine::{Engine, StepOutcome};
pub use error::{EngineError, Result};
pub use pieces::{CatalogPreset, Piece, PieceCatalog, PieceShape};
pub use rng::{PieceRng, PieceSource};
pub use scoring::{heuristic_score, line_clear_bonus};
pub use snapshot::{BoardSnapshot, GameSnapshot, PieceSnapshot};
