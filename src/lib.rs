//! Game of Life with rewind
//!
//! This library simulates Conway's Game of Life on a fixed-size, non-wrapping
//! grid and keeps the superseded generations so a front end can step, skip
//! ahead or rewind.

pub mod config;
pub mod error;
pub mod game_of_life;
pub mod simulation;
pub mod utils;

pub use config::Settings;
pub use error::{LifeError, LifeResult};
pub use game_of_life::{GenerationHistory, Grid, RuleEngine};
pub use simulation::{Action, CommandTable, RunState, SimulationController, StepPacer};

use anyhow::Result;

/// Build a controller from settings, optionally starting from a pattern file
pub fn build_controller(
    settings: &Settings,
    pattern: Option<&std::path::Path>,
) -> Result<SimulationController> {
    settings.validate()?;

    let controller = match pattern {
        Some(path) => {
            let pattern = game_of_life::load_pattern_from_file(path)?;
            let grid = game_of_life::io::centered_on(
                &pattern,
                settings.grid.rows.max(pattern.rows()),
                settings.grid.cols.max(pattern.cols()),
            )?;
            SimulationController::with_grid(grid, simulation::ControllerOptions::from(settings))
        }
        None => SimulationController::from_settings(settings)?,
    };
    Ok(controller)
}
