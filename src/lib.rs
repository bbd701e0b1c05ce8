//! Falling-block puzzle engine (workspace facade crate).
//!
//! This package exposes `tetris_engine::{types,core,driver}` while the
//! implementation lives in dedicated crates under `crates/`.

pub use tetris_engine_core as core;
pub use tetris_engine_driver as driver;
pub use tetris_engine_types as types;
