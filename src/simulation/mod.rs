//! Simulation control: state machine, action table and step pacing

pub mod commands;
pub mod controller;
pub mod pacing;

pub use commands::{Action, ActionInput, CommandTable, Dispatch, Handler, UnknownAction};
pub use controller::{ControllerOptions, RunState, SimulationController, Status, MIN_RATE};
pub use pacing::StepPacer;
