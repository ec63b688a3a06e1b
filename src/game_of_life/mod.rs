//! Game of Life core functionality

pub mod grid;
pub mod history;
pub mod io;
pub mod rules;

pub use grid::Grid;
pub use history::GenerationHistory;
pub use io::{create_example_patterns, load_pattern_from_file, parse_pattern};
pub use rules::RuleEngine;
