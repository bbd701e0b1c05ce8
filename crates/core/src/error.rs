//! Engine errors.
//!
//! Rejected moves and rotations are normal gameplay and never show up here;
//! they are reported as `false` by the engine.

use thiserror::Error;

use crate::types::Cell;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// Board access outside its dimensions. Reaching this from engine code
    /// means an engine invariant was broken.
    #[error("cell ({row}, {col}) is outside the board")]
    OutOfBounds { row: i32, col: i32 },

    /// Value is neither empty nor a palette index.
    #[error("cell value {value} is not a palette index")]
    InvalidCell { value: Cell },

    /// Unusable engine setup (empty catalog, board too small, ...).
    #[error("configuration error: {0}")]
    Configuration(String),
}

pub type Result<T> = std::result::Result<T, EngineError>;
