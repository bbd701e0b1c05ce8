//! Driver module - shared sessions and autonomous gravity
//!
//! The core engine is synchronous and single-owner. This crate adds the two
//! pieces needed when more than one control flow touches it:
//!
//! - [`session`]: an engine behind a mutex, with `reset`/`step` for
//!   controllers (GUI, AI, headless runner)
//! - [`descent`]: a background task that steps the engine down once per
//!   interval and ends when the episode is restarted or lost
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use tetris_engine_core::{DriveMode, EngineConfig};
//! use tetris_engine_driver::Session;
//! use tetris_engine_types::Action;
//!
//! let config = EngineConfig {
//!     seed: Some(7),
//!     mode: DriveMode::External,
//!     ..EngineConfig::default()
//! };
//! let mut session = Session::new(&config).unwrap();
//!
//! let outcome = session.step(Action::Right);
//! assert!(outcome.moved);
//!
//! session.reset();
//! assert_eq!(session.snapshot().episode_id, 2);
//! ```

pub mod descent;
pub mod error;
pub mod session;

pub use tetris_engine_core as core;
pub use tetris_engine_types as types;

pub use descent::{DescentDriver, DriverExit};
pub use error::DriverError;
pub use session::{Session, SharedEngine};
