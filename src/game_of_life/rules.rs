//! Game of Life rules implementation

use super::Grid;
use rayon::prelude::*;

/// Conway's B3/S23 transition rule
pub struct RuleEngine;

impl RuleEngine {
    /// Evolve the grid one generation forward.
    ///
    /// Every cell is computed from `current` alone and written into a fresh
    /// grid, so the outcome never depends on update order.
    pub fn step(current: &Grid) -> Grid {
        let cols = current.cols();

        let next_cells: Vec<bool> = (0..current.rows())
            .into_par_iter()
            .flat_map_iter(|row| {
                (0..cols).map(move |col| {
                    let (r, c) = (row as isize, col as isize);
                    Self::next_state(current.is_alive(r, c), current.neighbor_count(r, c))
                })
            })
            .collect();

        Grid::with_cells(current.rows(), cols, next_cells)
    }

    /// State of a cell in the next generation given its state and neighbor count
    pub fn next_state(alive: bool, neighbor_count: u8) -> bool {
        matches!((alive, neighbor_count), (true, 2) | (true, 3) | (false, 3))
    }
}
