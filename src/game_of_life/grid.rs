//! Grid representation and utilities for Game of Life

use crate::error::{LifeError, LifeResult};
use itertools::iproduct;
use rand::Rng;
use std::fmt;

/// Moore neighborhood offsets, origin excluded
#[rustfmt::skip]
const NEIGHBOR_OFFSETS: [(isize, isize); 8] = [
    (-1, -1), (-1, 0), (-1, 1),
    (0, -1),           (0, 1),
    (1, -1),  (1, 0),  (1, 1),
];

/// One generation of a fixed-size, non-wrapping Game of Life board
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<bool>,
}

impl Grid {
    /// Create a new grid with every cell dead
    pub fn new(rows: usize, cols: usize) -> LifeResult<Self> {
        if rows == 0 || cols == 0 {
            return Err(LifeError::InvalidDimension { rows, cols });
        }

        Ok(Self {
            rows,
            cols,
            cells: vec![false; rows * cols],
        })
    }

    /// Create a grid from a 2D boolean array
    pub fn from_rows(rows: Vec<Vec<bool>>) -> LifeResult<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);

        if height == 0 || width == 0 || rows.iter().any(|row| row.len() != width) {
            return Err(LifeError::InvalidDimension { rows: height, cols: width });
        }

        Ok(Self {
            rows: height,
            cols: width,
            cells: rows.into_iter().flatten().collect(),
        })
    }

    /// Wrap an already-computed row-major cell buffer
    pub(crate) fn with_cells(rows: usize, cols: usize, cells: Vec<bool>) -> Self {
        debug_assert_eq!(cells.len(), rows * cols);
        Self { rows, cols, cells }
    }

    /// An empty grid with the same dimensions as this one
    pub fn cleared(&self) -> Self {
        Self {
            rows: self.rows,
            cols: self.cols,
            cells: vec![false; self.cells.len()],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Total number of cells, alive or dead
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    fn index(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    #[inline]
    fn contains(&self, row: isize, col: isize) -> bool {
        row >= 0 && col >= 0 && (row as usize) < self.rows && (col as usize) < self.cols
    }

    /// Revive each cell independently with probability `probability_percent / 100`.
    ///
    /// Cells that are not revived keep their current state. Percentages
    /// outside `0..=100` are clamped to the nearest bound.
    pub fn seed_random<R: Rng>(&mut self, probability_percent: i32, rng: &mut R) {
        let percent = probability_percent.clamp(0, 100);
        if percent != probability_percent {
            log::warn!(
                "Seed probability {}% clamped to {}%",
                probability_percent,
                percent
            );
        }

        for cell in &mut self.cells {
            if rng.gen_range(0..100) < percent {
                *cell = true;
            }
        }
    }

    /// Set a single cell, failing for coordinates outside the grid
    pub fn set_alive(&mut self, row: usize, col: usize, alive: bool) -> LifeResult<()> {
        if row >= self.rows || col >= self.cols {
            return Err(LifeError::OutOfRange {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            });
        }
        let idx = self.index(row, col);
        self.cells[idx] = alive;
        Ok(())
    }

    /// Cell state at the given coordinates; anything off the board is dead
    pub fn is_alive(&self, row: isize, col: isize) -> bool {
        if self.contains(row, col) {
            self.cells[self.index(row as usize, col as usize)]
        } else {
            false
        }
    }

    /// Count living cells in the Moore neighborhood of `(row, col)`
    pub fn neighbor_count(&self, row: isize, col: isize) -> u8 {
        NEIGHBOR_OFFSETS
            .iter()
            .filter(|(dr, dc)| self.is_alive(row + dr, col + dc))
            .count() as u8
    }

    /// All `(row, col, alive)` triples in row-major order
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, bool)> + '_ {
        iproduct!(0..self.rows, 0..self.cols).map(move |(row, col)| {
            (row, col, self.cells[self.index(row, col)])
        })
    }

    /// Get all living cell coordinates
    pub fn living_cells(&self) -> Vec<(usize, usize)> {
        self.cells()
            .filter(|&(_, _, alive)| alive)
            .map(|(row, col, _)| (row, col))
            .collect()
    }

    /// Count total living cells
    pub fn living_count(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell).count()
    }

    /// Check if the grid is empty (no living cells)
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|&cell| !cell)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (_, col, alive) in self.cells() {
            write!(f, "{}", if alive { '1' } else { '0' })?;
            if col + 1 == self.cols {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_grid_creation() {
        let grid = Grid::new(3, 4).unwrap();
        assert_eq!(grid.rows(), 3);
        assert_eq!(grid.cols(), 4);
        assert_eq!(grid.cell_count(), 12);
        assert!(grid.is_empty());
    }

    #[test]
    fn test_invalid_dimensions() {
        assert_eq!(
            Grid::new(0, 5),
            Err(LifeError::InvalidDimension { rows: 0, cols: 5 })
        );
        assert!(Grid::new(5, 0).is_err());
        assert!(Grid::from_rows(vec![]).is_err());
        assert!(Grid::from_rows(vec![vec![true, false], vec![true]]).is_err());
    }

    #[test]
    fn test_grid_from_rows() {
        let grid = Grid::from_rows(vec![
            vec![true, false, true],
            vec![false, true, false],
        ])
        .unwrap();
        assert_eq!(grid.rows(), 2);
        assert_eq!(grid.cols(), 3);
        assert_eq!(grid.living_count(), 3);
        assert!(grid.is_alive(1, 1));
        assert!(!grid.is_alive(1, 2));
    }

    #[test]
    fn test_set_alive_out_of_range() {
        let mut grid = Grid::new(3, 3).unwrap();
        assert!(grid.set_alive(2, 2, true).is_ok());
        assert!(grid.is_alive(2, 2));

        let err = grid.set_alive(3, 0, true).unwrap_err();
        assert_eq!(err, LifeError::OutOfRange { row: 3, col: 0, rows: 3, cols: 3 });
        assert_eq!(grid.living_count(), 1);
    }

    #[test]
    fn test_out_of_range_queries_are_dead() {
        let mut grid = Grid::new(2, 2).unwrap();
        grid.set_alive(0, 0, true).unwrap();
        assert!(!grid.is_alive(-1, 0));
        assert!(!grid.is_alive(0, -1));
        assert!(!grid.is_alive(2, 0));
        assert!(!grid.is_alive(0, 2));
        assert_eq!(grid.neighbor_count(-1, -1), 1);
        assert_eq!(grid.neighbor_count(-5, 40), 0);
    }

    #[test]
    fn test_neighbor_counting() {
        let grid = Grid::from_rows(vec![
            vec![true, true, true],
            vec![true, false, true],
            vec![true, true, true],
        ])
        .unwrap();

        assert_eq!(grid.neighbor_count(1, 1), 8);
        assert_eq!(grid.neighbor_count(0, 0), 2);
        assert_eq!(grid.neighbor_count(0, 1), 4);
    }

    #[test]
    fn test_corner_cell_has_no_phantom_neighbors() {
        let mut grid = Grid::new(4, 4).unwrap();
        grid.set_alive(0, 0, true).unwrap();
        assert_eq!(grid.neighbor_count(0, 0), 0);
    }

    #[test]
    fn test_copy_is_independent() {
        let mut original = Grid::new(3, 3).unwrap();
        original.set_alive(1, 1, true).unwrap();

        let mut copy = original.clone();
        copy.set_alive(0, 0, true).unwrap();
        copy.set_alive(1, 1, false).unwrap();

        assert!(original.is_alive(1, 1));
        assert!(!original.is_alive(0, 0));
        assert_eq!(original.living_count(), 1);
    }

    #[test]
    fn test_seed_random_bounds() {
        let mut rng = StdRng::seed_from_u64(7);

        let mut grid = Grid::new(10, 10).unwrap();
        grid.seed_random(0, &mut rng);
        assert!(grid.is_empty());

        grid.seed_random(100, &mut rng);
        assert_eq!(grid.living_count(), 100);

        let mut clamped_high = Grid::new(10, 10).unwrap();
        clamped_high.seed_random(250, &mut rng);
        assert_eq!(clamped_high.living_count(), 100);

        let mut clamped_low = Grid::new(10, 10).unwrap();
        clamped_low.seed_random(-20, &mut rng);
        assert!(clamped_low.is_empty());
    }

    #[test]
    fn test_seed_random_density() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut grid = Grid::new(100, 100).unwrap();
        grid.seed_random(50, &mut rng);
        let living = grid.living_count();
        assert!(living > 4000 && living < 6000);
    }

    #[test]
    fn test_cells_row_major() {
        let grid = Grid::from_rows(vec![vec![true, false], vec![false, true]]).unwrap();
        let cells: Vec<_> = grid.cells().collect();
        assert_eq!(
            cells,
            vec![(0, 0, true), (0, 1, false), (1, 0, false), (1, 1, true)]
        );
        assert_eq!(grid.living_cells(), vec![(0, 0), (1, 1)]);
    }

    #[test]
    fn test_cleared_keeps_dimensions() {
        let mut grid = Grid::new(2, 5).unwrap();
        grid.set_alive(1, 4, true).unwrap();
        let cleared = grid.cleared();
        assert_eq!(cleared.rows(), 2);
        assert_eq!(cleared.cols(), 5);
        assert!(cleared.is_empty());
    }

    #[test]
    fn test_display() {
        let grid = Grid::from_rows(vec![vec![false, true], vec![true, false]]).unwrap();
        assert_eq!(grid.to_string(), "01\n10\n");
    }
}
