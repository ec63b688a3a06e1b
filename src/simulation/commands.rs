//! Named UI actions mapped onto controller operations

use super::SimulationController;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Actions a front end can bind to buttons or keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    StartStop,
    Clear,
    Randomize,
    Previous,
    Next,
    Rate,
}

impl Action {
    pub const ALL: [Action; 6] = [
        Action::StartStop,
        Action::Clear,
        Action::Randomize,
        Action::Previous,
        Action::Next,
        Action::Rate,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Action::StartStop => "toggle",
            Action::Clear => "clear",
            Action::Randomize => "random",
            Action::Previous => "prev",
            Action::Next => "next",
            Action::Rate => "rate",
        }
    }

    /// Only start/stop stays available while the simulation runs
    pub fn enabled_while_running(self) -> bool {
        matches!(self, Action::StartStop)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown action '{0}'")]
pub struct UnknownAction(pub String);

impl FromStr for Action {
    type Err = UnknownAction;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "toggle" | "start" | "stop" | "start_stop" => Ok(Action::StartStop),
            "clear" => Ok(Action::Clear),
            "random" | "randomize" => Ok(Action::Randomize),
            "prev" | "previous" => Ok(Action::Previous),
            "next" | "skip" => Ok(Action::Next),
            "rate" => Ok(Action::Rate),
            other => Err(UnknownAction(other.to_string())),
        }
    }
}

/// Already-validated values from the front end's numeric inputs
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActionInput {
    /// Generations to jump for previous/next
    pub generations: usize,
    pub generations_per_second: f64,
}

impl Default for ActionInput {
    fn default() -> Self {
        Self {
            generations: 1,
            generations_per_second: 2.0,
        }
    }
}

pub type Handler = fn(&mut SimulationController, &ActionInput);

/// Outcome of [`CommandTable::dispatch`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    Applied,
    /// The action is disabled while the simulation runs
    Disabled,
    Unbound,
}

/// Lookup from action to controller operation
#[derive(Clone)]
pub struct CommandTable {
    handlers: HashMap<Action, Handler>,
}

impl CommandTable {
    pub fn empty() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Bind `action` to `handler`, returning any previous binding
    pub fn bind(&mut self, action: Action, handler: Handler) -> Option<Handler> {
        self.handlers.insert(action, handler)
    }

    pub fn handler(&self, action: Action) -> Option<Handler> {
        self.handlers.get(&action).copied()
    }

    pub fn dispatch(
        &self,
        action: Action,
        controller: &mut SimulationController,
        input: &ActionInput,
    ) -> Dispatch {
        let Some(handler) = self.handler(action) else {
            return Dispatch::Unbound;
        };

        if controller.is_running() && !action.enabled_while_running() {
            log::debug!("Ignoring '{}' while running", action);
            return Dispatch::Disabled;
        }

        handler(controller, input);
        Dispatch::Applied
    }
}

impl Default for CommandTable {
    fn default() -> Self {
        let mut table = Self::empty();
        table.bind(Action::StartStop, start_stop);
        table.bind(Action::Clear, clear);
        table.bind(Action::Randomize, randomize);
        table.bind(Action::Previous, previous);
        table.bind(Action::Next, next);
        table.bind(Action::Rate, rate);
        table
    }
}

fn start_stop(controller: &mut SimulationController, _: &ActionInput) {
    controller.toggle();
}

fn clear(controller: &mut SimulationController, _: &ActionInput) {
    controller.clear_all();
}

fn randomize(controller: &mut SimulationController, _: &ActionInput) {
    let probability = controller.seed_probability();
    controller.reset_random(probability);
}

fn previous(controller: &mut SimulationController, input: &ActionInput) {
    controller.jump_backward(input.generations);
}

fn next(controller: &mut SimulationController, input: &ActionInput) {
    controller.jump_forward(input.generations);
}

fn rate(controller: &mut SimulationController, input: &ActionInput) {
    controller.set_rate(input.generations_per_second);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_of_life::Grid;
    use crate::simulation::ControllerOptions;

    fn controller() -> SimulationController {
        let mut grid = Grid::new(5, 5).unwrap();
        for col in 1..=3 {
            grid.set_alive(2, col, true).unwrap();
        }
        SimulationController::with_grid(
            grid,
            ControllerOptions {
                seed: Some(5),
                ..ControllerOptions::default()
            },
        )
    }

    #[test]
    fn test_parse_actions() {
        assert_eq!("toggle".parse::<Action>(), Ok(Action::StartStop));
        assert_eq!("Skip".parse::<Action>(), Ok(Action::Next));
        assert_eq!(" previous ".parse::<Action>(), Ok(Action::Previous));
        assert_eq!(
            "jump".parse::<Action>(),
            Err(UnknownAction("jump".to_string()))
        );

        for action in Action::ALL {
            assert_eq!(action.name().parse::<Action>(), Ok(action));
        }
    }

    #[test]
    fn test_default_table_binds_every_action() {
        let table = CommandTable::default();
        for action in Action::ALL {
            assert!(table.handler(action).is_some(), "{} is unbound", action);
        }
    }

    #[test]
    fn test_dispatch_next_and_previous() {
        let table = CommandTable::default();
        let mut controller = controller();
        let input = ActionInput {
            generations: 4,
            ..ActionInput::default()
        };

        assert_eq!(table.dispatch(Action::Next, &mut controller, &input), Dispatch::Applied);
        assert_eq!(controller.generation(), 4);

        let back = ActionInput {
            generations: 3,
            ..input
        };
        assert_eq!(table.dispatch(Action::Previous, &mut controller, &back), Dispatch::Applied);
        assert_eq!(controller.generation(), 1);
    }

    #[test]
    fn test_dispatch_rate_and_clear() {
        let table = CommandTable::default();
        let mut controller = controller();
        let input = ActionInput {
            generations: 1,
            generations_per_second: 12.0,
        };

        table.dispatch(Action::Rate, &mut controller, &input);
        assert_eq!(controller.rate(), 12.0);

        table.dispatch(Action::Clear, &mut controller, &input);
        assert!(controller.current().is_empty());
    }

    #[test]
    fn test_actions_disabled_while_running() {
        let table = CommandTable::default();
        let mut controller = controller();
        let input = ActionInput::default();

        table.dispatch(Action::StartStop, &mut controller, &input);
        assert!(controller.is_running());

        assert_eq!(table.dispatch(Action::Clear, &mut controller, &input), Dispatch::Disabled);
        assert_eq!(controller.current().living_count(), 3);

        assert_eq!(table.dispatch(Action::StartStop, &mut controller, &input), Dispatch::Applied);
        assert!(!controller.is_running());
    }

    #[test]
    fn test_unbound_and_rebound() {
        let mut table = CommandTable::empty();
        let mut controller = controller();
        let input = ActionInput::default();
        assert_eq!(table.dispatch(Action::Next, &mut controller, &input), Dispatch::Unbound);

        fn double_step(controller: &mut SimulationController, _: &ActionInput) {
            controller.jump_forward(2);
        }
        assert!(table.bind(Action::Next, double_step).is_none());
        table.dispatch(Action::Next, &mut controller, &input);
        assert_eq!(controller.generation(), 2);
    }
}
