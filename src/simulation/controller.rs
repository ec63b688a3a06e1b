//! Simulation controller tying the grid, rule engine and history together

use crate::config::Settings;
use crate::error::LifeResult;
use crate::game_of_life::{GenerationHistory, Grid, RuleEngine};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use std::time::Duration;

/// Slowest rate accepted by [`SimulationController::set_rate`]
pub const MIN_RATE: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunState {
    Stopped,
    Running,
}

/// Construction parameters for a [`SimulationController`]
#[derive(Debug, Clone, PartialEq)]
pub struct ControllerOptions {
    pub seed_probability: i32,
    pub generations_per_second: f64,
    pub max_history: Option<usize>,
    pub seed: Option<u64>,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self {
            seed_probability: 60,
            generations_per_second: 2.0,
            max_history: None,
            seed: None,
        }
    }
}

impl From<&Settings> for ControllerOptions {
    fn from(settings: &Settings) -> Self {
        Self {
            seed_probability: i32::from(settings.simulation.seed_probability),
            generations_per_second: settings.simulation.generations_per_second,
            max_history: settings.history.max_depth,
            seed: settings.simulation.seed,
        }
    }
}

/// Snapshot of the values shown in the status display
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Status {
    pub generation: usize,
    pub living: usize,
    pub cells: usize,
    pub state: RunState,
    pub generations_per_second: f64,
}

/// Owns the live grid and its history and exposes every simulation operation.
///
/// Forward steps archive the superseded grid; rewinds restore from the
/// archive. Pacing is left to the caller, see [`super::StepPacer`].
pub struct SimulationController {
    current: Grid,
    history: GenerationHistory,
    generation: usize,
    state: RunState,
    rate: f64,
    seed_probability: i32,
    rng: StdRng,
}

impl SimulationController {
    /// Create a controller with a randomly seeded grid of the given size
    pub fn new(rows: usize, cols: usize, options: ControllerOptions) -> LifeResult<Self> {
        let grid = Grid::new(rows, cols)?;
        let mut controller = Self::with_grid(grid, options);
        controller.reset_random(controller.seed_probability);
        Ok(controller)
    }

    /// Create a controller whose first generation is `grid`
    pub fn with_grid(grid: Grid, options: ControllerOptions) -> Self {
        let rng = match options.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut controller = Self {
            current: grid,
            history: GenerationHistory::with_max_depth(options.max_history),
            generation: 0,
            state: RunState::Stopped,
            rate: MIN_RATE,
            seed_probability: options.seed_probability,
            rng,
        };
        controller.set_rate(options.generations_per_second);
        controller
    }

    /// Create a controller from loaded settings
    pub fn from_settings(settings: &Settings) -> LifeResult<Self> {
        Self::new(
            settings.grid.rows,
            settings.grid.cols,
            ControllerOptions::from(settings),
        )
    }

    pub fn current(&self) -> &Grid {
        &self.current
    }

    pub fn history(&self) -> &GenerationHistory {
        &self.history
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == RunState::Running
    }

    /// Whether direct cell edits should be accepted
    pub fn is_editable(&self) -> bool {
        self.state == RunState::Stopped
    }

    pub fn start(&mut self) {
        if self.state == RunState::Stopped {
            log::info!("Simulation started at {} generations/s", self.rate);
            self.state = RunState::Running;
        }
    }

    pub fn stop(&mut self) {
        if self.state == RunState::Running {
            log::info!("Simulation stopped at generation {}", self.generation());
            self.state = RunState::Stopped;
        }
    }

    pub fn toggle(&mut self) {
        match self.state {
            RunState::Stopped => self.start(),
            RunState::Running => self.stop(),
        }
    }

    /// Advance one generation, archiving the superseded grid
    pub fn step_once(&mut self) {
        let next = RuleEngine::step(&self.current);
        let previous = std::mem::replace(&mut self.current, next);
        self.history.push(previous);
        self.generation += 1;
        log::debug!(
            "Generation {}: {} living cells",
            self.generation(),
            self.current.living_count()
        );
    }

    /// Advance `n` generations, one history entry per generation
    pub fn jump_forward(&mut self, n: usize) {
        for _ in 0..n {
            self.step_once();
        }
    }

    /// Restore the generation that was live `n` steps ago
    pub fn jump_backward(&mut self, n: usize) {
        if n == 0 || self.history.is_empty() {
            return;
        }
        let restored = n.min(self.history.size());
        let placeholder = self.current.cleared();
        let current = std::mem::replace(&mut self.current, placeholder);
        self.current = self.history.rewind(current, n);
        self.generation -= restored;
        log::info!("Rewound to generation {}", self.generation());
    }

    /// Replace the grid with a freshly randomised one and forget the history
    pub fn reset_random(&mut self, probability_percent: i32) {
        let mut grid = self.current.cleared();
        grid.seed_random(probability_percent, &mut self.rng);
        self.current = grid;
        self.history.clear();
        self.generation = 0;
        log::info!(
            "Randomised {}x{} grid at {}%: {} living cells",
            self.current.rows(),
            self.current.cols(),
            probability_percent.clamp(0, 100),
            self.current.living_count()
        );
    }

    /// Kill every cell and restart generation numbering
    pub fn clear_all(&mut self) {
        self.current = self.current.cleared();
        self.history.clear();
        self.generation = 0;
        log::info!("Cleared grid");
    }

    /// Set the target rate used by the external scheduler.
    /// Rates below [`MIN_RATE`], and non-finite rates, fall back to [`MIN_RATE`].
    pub fn set_rate(&mut self, generations_per_second: f64) {
        if generations_per_second.is_finite() && generations_per_second >= MIN_RATE {
            self.rate = generations_per_second;
        } else {
            log::warn!(
                "Rate {} generations/s rejected, using {}",
                generations_per_second,
                MIN_RATE
            );
            self.rate = MIN_RATE;
        }
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Time between two scheduled generations at the current rate
    pub fn step_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.rate)
    }

    /// Probability used by the randomise action
    pub fn seed_probability(&self) -> i32 {
        self.seed_probability
    }

    /// Edit one cell of the live grid
    pub fn set_alive(&mut self, row: usize, col: usize, alive: bool) -> LifeResult<()> {
        self.current.set_alive(row, col, alive)
    }

    /// Generation number since the last reset or clear.
    /// Equals the history size unless a bounded history has evicted entries.
    pub fn generation(&self) -> usize {
        self.generation
    }

    pub fn status(&self) -> Status {
        Status {
            generation: self.generation(),
            living: self.current.living_count(),
            cells: self.current.cell_count(),
            state: self.state,
            generations_per_second: self.rate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LifeError;

    fn seeded() -> ControllerOptions {
        ControllerOptions {
            seed: Some(1234),
            ..ControllerOptions::default()
        }
    }

    fn blinker() -> Grid {
        let mut grid = Grid::new(5, 5).unwrap();
        for col in 1..=3 {
            grid.set_alive(2, col, true).unwrap();
        }
        grid
    }

    #[test]
    fn test_initial_state() {
        let controller = SimulationController::new(10, 12, seeded()).unwrap();
        assert_eq!(controller.state(), RunState::Stopped);
        assert!(controller.is_editable());
        assert_eq!(controller.generation(), 0);
        assert_eq!(controller.current().rows(), 10);
        assert_eq!(controller.current().cols(), 12);
        assert!(controller.current().living_count() > 0);
    }

    #[test]
    fn test_invalid_dimensions() {
        assert!(matches!(
            SimulationController::new(0, 3, seeded()),
            Err(LifeError::InvalidDimension { .. })
        ));
    }

    #[test]
    fn test_state_transitions() {
        let mut controller = SimulationController::with_grid(blinker(), seeded());

        controller.stop();
        assert_eq!(controller.state(), RunState::Stopped);

        controller.start();
        assert!(controller.is_running());
        assert!(!controller.is_editable());
        controller.start();
        assert!(controller.is_running());

        controller.toggle();
        assert_eq!(controller.state(), RunState::Stopped);
        controller.toggle();
        assert_eq!(controller.state(), RunState::Running);
    }

    #[test]
    fn test_step_once_archives_previous() {
        let mut controller = SimulationController::with_grid(blinker(), seeded());
        controller.step_once();

        assert_eq!(controller.generation(), 1);
        assert_eq!(controller.history().peek_oldest(), Some(&blinker()));
        assert_eq!(controller.current().living_cells(), vec![(1, 2), (2, 2), (3, 2)]);
    }

    #[test]
    fn test_jump_forward_and_back() {
        let mut controller = SimulationController::with_grid(blinker(), seeded());
        controller.jump_forward(0);
        assert_eq!(controller.generation(), 0);

        controller.jump_forward(5);
        assert_eq!(controller.generation(), 5);

        controller.jump_backward(2);
        assert_eq!(controller.generation(), 3);
        assert_eq!(controller.current(), &RuleEngine::step(&blinker()));

        controller.jump_backward(100);
        assert_eq!(controller.generation(), 0);
        assert_eq!(controller.current(), &blinker());

        controller.jump_backward(1);
        assert_eq!(controller.current(), &blinker());
    }

    #[test]
    fn test_generation_survives_history_eviction() {
        let options = ControllerOptions {
            max_history: Some(2),
            ..seeded()
        };
        let mut controller = SimulationController::with_grid(blinker(), options);
        controller.jump_forward(5);
        assert_eq!(controller.generation(), 5);
        assert_eq!(controller.history().size(), 2);

        controller.jump_backward(10);
        assert_eq!(controller.generation(), 3);
        assert!(controller.history().is_empty());
        assert_eq!(controller.current(), &RuleEngine::step(&blinker()));
    }

    #[test]
    fn test_reset_and_clear_drop_history() {
        let mut controller = SimulationController::with_grid(blinker(), seeded());
        controller.jump_forward(3);

        controller.reset_random(100);
        assert_eq!(controller.generation(), 0);
        assert_eq!(controller.current().living_count(), 25);

        controller.jump_forward(2);
        controller.clear_all();
        assert_eq!(controller.generation(), 0);
        assert!(controller.current().is_empty());
        assert_eq!(controller.current().rows(), 5);
    }

    #[test]
    fn test_seeded_reset_is_reproducible() {
        let a = SimulationController::new(20, 20, seeded()).unwrap();
        let b = SimulationController::new(20, 20, seeded()).unwrap();
        assert_eq!(a.current(), b.current());
    }

    #[test]
    fn test_set_rate_clamps() {
        let mut controller = SimulationController::with_grid(blinker(), seeded());
        assert_eq!(controller.rate(), 2.0);
        assert_eq!(controller.step_interval(), Duration::from_millis(500));

        controller.set_rate(10.0);
        assert_eq!(controller.rate(), 10.0);

        controller.set_rate(0.0);
        assert_eq!(controller.rate(), MIN_RATE);

        controller.set_rate(-3.0);
        assert_eq!(controller.rate(), MIN_RATE);

        controller.set_rate(f64::NAN);
        assert_eq!(controller.rate(), MIN_RATE);

        controller.set_rate(f64::INFINITY);
        assert_eq!(controller.rate(), MIN_RATE);
    }

    #[test]
    fn test_tiny_rate_has_bounded_interval() {
        let mut controller = SimulationController::with_grid(blinker(), seeded());
        controller.set_rate(1e-30);
        assert_eq!(controller.rate(), MIN_RATE);
        assert_eq!(controller.step_interval(), Duration::from_secs(1));

        controller.set_rate(0.5);
        assert_eq!(controller.rate(), MIN_RATE);
    }

    #[test]
    fn test_cell_editing() {
        let mut controller = SimulationController::with_grid(Grid::new(3, 3).unwrap(), seeded());
        controller.set_alive(1, 1, true).unwrap();
        assert!(controller.current().is_alive(1, 1));
        assert!(controller.set_alive(3, 3, true).is_err());
    }

    #[test]
    fn test_status() {
        let mut controller = SimulationController::with_grid(blinker(), seeded());
        controller.step_once();
        controller.start();

        let status = controller.status();
        assert_eq!(
            status,
            Status {
                generation: 1,
                living: 3,
                cells: 25,
                state: RunState::Running,
                generations_per_second: 2.0,
            }
        );
    }
}
