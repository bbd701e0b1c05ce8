//! Headless runner (default binary).
//!
//! Plays one episode with no rendering and no keyboard input: a fixed action
//! cycle stands in for the GUI/AI controller, and in autonomous mode the
//! descent driver supplies gravity. Prints the final snapshot as JSON.
//!
//! Configuration comes from the `TETRIS_*` environment variables (see
//! `EngineConfig::from_env`), plus `TETRIS_MAX_STEPS` for the step budget.

use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use log::{debug, info};

use tetris_engine::core::{DriveMode, EngineConfig};
use tetris_engine::driver::Session;
use tetris_engine::types::Action;

const DEFAULT_MAX_STEPS: usize = 5000;

/// Controller action cycle
const PATTERN: [Action; 10] = [
    Action::Left,
    Action::Down,
    Action::Up,
    Action::Left,
    Action::Down,
    Action::Right,
    Action::Down,
    Action::Right,
    Action::Right,
    Action::Down,
];

fn main() -> Result<()> {
    env_logger::init();

    let config = EngineConfig::from_env();
    config.validate().context("invalid engine configuration")?;
    let max_steps = std::env::var("TETRIS_MAX_STEPS")
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(DEFAULT_MAX_STEPS);

    info!(
        "starting {}x{} board, {:?} catalog, {:?} mode",
        config.board_width, config.board_height, config.catalog, config.mode
    );

    let mut session = Session::new(&config).context("failed to start engine session")?;
    let steps = run(&session, &config, max_steps);

    session.stop_driver();
    let snapshot = session.snapshot();
    info!(
        "finished after {} steps: {} pieces, {} lines, bonus {}, score {}",
        steps,
        snapshot.pieces_spawned,
        snapshot.lines_cleared_total,
        snapshot.bonus_total,
        session.clear_and_score()
    );

    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    Ok(())
}

/// Issue controller actions until the game ends or the budget runs out.
/// Returns the number of actions issued.
fn run(session: &Session, config: &EngineConfig, max_steps: usize) -> usize {
    let autonomous = config.mode == DriveMode::Autonomous;
    // Lateral moves between gravity ticks.
    let pace = Duration::from_millis(config.descent_interval_ms / 4);

    let mut issued = 0;
    for action in PATTERN.iter().cycle().take(max_steps) {
        if autonomous {
            if session.driver().map_or(true, |d| d.is_finished()) {
                break;
            }
            thread::sleep(pace);
            if *action == Action::Down {
                // The driver owns gravity.
                continue;
            }
        }

        let outcome = session.step(*action);
        issued += 1;

        if outcome.landed {
            debug!(
                "landed: {} line(s), bonus {}",
                outcome.lines_cleared, outcome.lines_cleared_bonus
            );
        }
        if outcome.game_over {
            info!("game over");
            break;
        }
    }
    issued
}
