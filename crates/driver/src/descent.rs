//! Autonomous descent driver.
//!
//! A tokio task that moves the active piece down once per interval when no
//! external controller supplies gravity. Each tick takes the engine lock, so a
//! tick never interleaves with a move or rotation issued by another caller.
//!
//! The task ends between ticks when:
//! - the driver is stopped (or dropped),
//! - the engine was reset since the driver started (new episode),
//! - a landing ends the game.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use log::{info, warn};
use tokio::runtime::Runtime;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::session::SharedEngine;
use crate::types::Action;

/// Why a descent task ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverExit {
    /// Stopped by its owner
    Stopped,
    /// The engine started a new episode
    Restarted,
    /// A landing ended the game
    GameOver,
}

/// Handle to a running descent task
#[derive(Debug)]
pub struct DescentDriver {
    shutdown: watch::Sender<bool>,
    handle: Option<JoinHandle<DriverExit>>,
    ticks: Arc<AtomicU64>,
    episode_id: u64,
    interval: Duration,
}

impl DescentDriver {
    /// Start ticking `engine` down on `runtime`
    ///
    /// The driver is bound to the engine's current episode.
    pub fn spawn(runtime: &Runtime, engine: SharedEngine, interval: Duration) -> Self {
        let episode_id = engine.lock().episode_id();
        let (shutdown, shutdown_rx) = watch::channel(false);
        let ticks = Arc::new(AtomicU64::new(0));

        let handle = runtime.spawn(run_descent(
            engine,
            interval,
            shutdown_rx,
            Arc::clone(&ticks),
            episode_id,
        ));

        info!(
            "descent driver started for episode {} ({:?} per row)",
            episode_id, interval
        );

        Self {
            shutdown,
            handle: Some(handle),
            ticks,
            episode_id,
            interval,
        }
    }

    /// Number of down steps applied so far
    pub fn ticks(&self) -> u64 {
        self.ticks.load(Ordering::Relaxed)
    }

    /// Episode this driver is bound to
    pub fn episode_id(&self) -> u64 {
        self.episode_id
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Whether the task has ended
    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().map_or(true, |h| h.is_finished())
    }

    /// Signal the task to stop after its current tick
    pub fn stop(&self) {
        let _ = self.shutdown.send(true);
    }

    /// Stop the task and wait for it to end
    ///
    /// Must be called from outside the runtime's async context.
    pub fn join(mut self, runtime: &Runtime) -> Option<DriverExit> {
        self.stop();
        let handle = self.handle.take()?;
        runtime.block_on(handle).ok()
    }
}

impl Drop for DescentDriver {
    fn drop(&mut self) {
        self.stop();
    }
}

async fn run_descent(
    engine: SharedEngine,
    interval: Duration,
    mut shutdown: watch::Receiver<bool>,
    ticks: Arc<AtomicU64>,
    episode_id: u64,
) -> DriverExit {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // The first tick completes immediately; gravity starts one interval in.
    ticker.tick().await;

    loop {
        tokio::select! {
            _ = ticker.tick() => {}
            _ = shutdown.changed() => {
                info!("descent driver for episode {} stopped", episode_id);
                return DriverExit::Stopped;
            }
        }

        let outcome = {
            let mut engine = engine.lock();
            if engine.episode_id() != episode_id {
                info!(
                    "descent driver for episode {} ends: engine restarted",
                    episode_id
                );
                return DriverExit::Restarted;
            }
            engine.step(Action::Down)
        };
        ticks.fetch_add(1, Ordering::Relaxed);

        if outcome.game_over {
            warn!("episode {} is over; descent driver ends", episode_id);
            return DriverExit::GameOver;
        }
    }
}
