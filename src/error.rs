//! Error types for the Game of Life engine

use thiserror::Error;

/// Errors raised by grid construction and direct cell mutation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LifeError {
    /// A grid was requested with zero rows or columns
    #[error("invalid grid dimensions {rows}x{cols}: rows and columns must be positive")]
    InvalidDimension { rows: usize, cols: usize },

    /// A mutation addressed a cell outside the grid
    #[error("cell ({row}, {col}) is outside the {rows}x{cols} grid")]
    OutOfRange {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },
}

pub type LifeResult<T> = std::result::Result<T, LifeError>;
