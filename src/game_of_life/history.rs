//! Storage of superseded generations for rewinding

use super::Grid;
use std::collections::VecDeque;

/// Past generations, oldest first.
///
/// Never holds the live grid. With a `max_depth` the history behaves as a
/// ring buffer and drops its oldest generation once full.
#[derive(Debug, Clone, Default)]
pub struct GenerationHistory {
    generations: VecDeque<Grid>,
    max_depth: Option<usize>,
}

impl GenerationHistory {
    /// Create a history that grows without limit
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// Create a history retaining at most `max_depth` generations.
    /// `None` (or a depth of 0) means unbounded.
    pub fn with_max_depth(max_depth: Option<usize>) -> Self {
        Self {
            generations: VecDeque::new(),
            max_depth: max_depth.filter(|&depth| depth > 0),
        }
    }

    pub fn max_depth(&self) -> Option<usize> {
        self.max_depth
    }

    pub fn clear(&mut self) {
        self.generations.clear();
    }

    /// Append a superseded generation to the tail
    pub fn push(&mut self, grid: Grid) {
        if let Some(depth) = self.max_depth {
            while self.generations.len() >= depth {
                self.generations.pop_front();
            }
        }
        self.generations.push_back(grid);
    }

    pub fn size(&self) -> usize {
        self.generations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.generations.is_empty()
    }

    pub fn peek_oldest(&self) -> Option<&Grid> {
        self.generations.front()
    }

    /// Return the generation that was live `n` steps before `current`.
    ///
    /// That generation and everything newer are removed from the history.
    /// A request deeper than the history restores the oldest stored
    /// generation; `n == 0` or an empty history hands `current` back.
    pub fn rewind(&mut self, current: Grid, n: usize) -> Grid {
        if n == 0 || self.generations.is_empty() {
            return current;
        }

        let size = self.generations.len();
        if n > size {
            log::warn!(
                "Rewind of {} generations clamped to the {} stored",
                n,
                size
            );
        }

        let target = size.saturating_sub(n);
        self.generations.truncate(target + 1);
        self.generations.pop_back().unwrap_or(current)
    }
}
