//! Tick-driven pacing of scheduled generations

use super::SimulationController;
use std::time::{Duration, Instant};

/// Decides on each host tick whether a generation is due.
///
/// Never sleeps; the host supplies the clock reading.
#[derive(Debug, Clone, Copy)]
pub struct StepPacer {
    last_step: Instant,
}

impl StepPacer {
    pub fn new(now: Instant) -> Self {
        Self { last_step: now }
    }

    /// Start counting the interval afresh, e.g. after a reset
    pub fn restart(&mut self, now: Instant) {
        self.last_step = now;
    }

    /// True once more than `interval` has passed since the last generation.
    /// A `true` result records `now` as the new reference point.
    pub fn poll(&mut self, now: Instant, interval: Duration) -> bool {
        if now.saturating_duration_since(self.last_step) > interval {
            self.last_step = now;
            true
        } else {
            false
        }
    }

    /// Remaining wait before the next generation is due
    pub fn time_until_due(&self, now: Instant, interval: Duration) -> Duration {
        interval.saturating_sub(now.saturating_duration_since(self.last_step))
    }

    /// Step `controller` once if it is running and a generation is due
    pub fn tick(&mut self, controller: &mut SimulationController, now: Instant) -> bool {
        if controller.is_running() && self.poll(now, controller.step_interval()) {
            controller.step_once();
            true
        } else {
            false
        }
    }
}
