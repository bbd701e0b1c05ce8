//! Shared engine session.
//!
//! Wraps one engine behind a mutex so an external controller and the
//! autonomous descent driver can both mutate it without racing. Every
//! operation here takes the lock for its whole duration, so callers always
//! see a board with no half-applied move.

use std::sync::Arc;
use std::time::Duration;

use log::info;
use parking_lot::Mutex;
use tokio::runtime::{Builder, Runtime};

use crate::core::{DriveMode, Engine, EngineConfig, GameSnapshot, StepOutcome};
use crate::descent::{DescentDriver, DriverExit};
use crate::error::DriverError;
use crate::types::Action;

/// Engine shared between the controller and the descent driver
pub type SharedEngine = Arc<Mutex<Engine>>;

/// An engine plus, in autonomous mode, the driver that supplies gravity
///
/// Meant for synchronous callers: methods that wait on the driver block the
/// calling thread and must not be called from inside an async context.
pub struct Session {
    runtime: Runtime,
    engine: SharedEngine,
    mode: DriveMode,
    interval: Duration,
    driver: Option<DescentDriver>,
}

impl Session {
    /// Build the engine from `config` and start the driver if autonomous
    pub fn new(config: &EngineConfig) -> Result<Self, DriverError> {
        let engine = Engine::from_config(config)?;
        Self::from_engine(
            engine,
            config.mode,
            Duration::from_millis(config.descent_interval_ms),
        )
    }

    /// Wrap an existing engine
    pub fn from_engine(
        engine: Engine,
        mode: DriveMode,
        interval: Duration,
    ) -> Result<Self, DriverError> {
        let runtime = Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("tetris-descent")
            .enable_time()
            .build()?;

        let mut session = Self {
            runtime,
            engine: Arc::new(Mutex::new(engine)),
            mode,
            interval,
            driver: None,
        };
        session.start_driver();
        Ok(session)
    }

    fn start_driver(&mut self) {
        if self.mode != DriveMode::Autonomous {
            return;
        }
        self.driver = Some(DescentDriver::spawn(
            &self.runtime,
            Arc::clone(&self.engine),
            self.interval,
        ));
    }

    /// Start a new episode
    ///
    /// In autonomous mode the previous driver is stopped and a new one bound
    /// to the new episode takes over.
    pub fn reset(&mut self) {
        let previous = self.driver.take();
        self.engine.lock().reset();

        if let Some(driver) = previous {
            let exit = driver.join(&self.runtime);
            info!("previous descent driver ended: {:?}", exit);
        }
        self.start_driver();
    }

    /// Apply one controller action under the engine lock
    pub fn step(&self, action: Action) -> StepOutcome {
        self.engine.lock().step(action)
    }

    /// Clear filled lines and return the heuristic score
    pub fn clear_and_score(&self) -> i64 {
        self.engine.lock().clear_and_score()
    }

    pub fn is_game_over(&self) -> bool {
        self.engine.lock().is_game_over()
    }

    pub fn snapshot(&self) -> GameSnapshot {
        self.engine.lock().snapshot()
    }

    /// Run `f` with exclusive access to the engine
    pub fn with_engine<T>(&self, f: impl FnOnce(&mut Engine) -> T) -> T {
        f(&mut self.engine.lock())
    }

    /// Shared handle to the engine
    pub fn engine(&self) -> SharedEngine {
        Arc::clone(&self.engine)
    }

    pub fn mode(&self) -> DriveMode {
        self.mode
    }

    pub fn driver(&self) -> Option<&DescentDriver> {
        self.driver.as_ref()
    }

    /// Stop the descent driver, if any, and wait for it
    pub fn stop_driver(&mut self) -> Option<DriverExit> {
        let driver = self.driver.take()?;
        driver.join(&self.runtime)
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        if let Some(driver) = self.driver.take() {
            driver.stop();
        }
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("mode", &self.mode)
            .field("interval", &self.interval)
            .field("driver", &self.driver)
            .finish_non_exhaustive()
    }
}
