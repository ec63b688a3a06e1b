//! Display and output formatting utilities

use crate::config::OutputFormat;
use crate::game_of_life::Grid;
use crate::simulation::{RunState, Status};
use anyhow::Result;

/// Terminal rendering of grids and status lines
pub struct GridFormatter;

impl GridFormatter {
    /// Format a grid in compact form
    pub fn format_grid_compact(grid: &Grid) -> String {
        let mut output = String::with_capacity(grid.cell_count() * 3 + grid.rows());
        for (_, col, alive) in grid.cells() {
            output.push(if alive { '█' } else { '·' });
            if col + 1 == grid.cols() {
                output.push('\n');
            }
        }
        output
    }

    /// Format a grid with row and column numbers, for picking cells to edit
    pub fn format_grid_with_coords(grid: &Grid) -> String {
        let mut output = String::new();

        output.push_str("   ");
        for col in 0..grid.cols() {
            output.push_str(&format!("{:2}", col % 10));
        }
        output.push('\n');

        for row in 0..grid.rows() {
            output.push_str(&format!("{:2} ", row % 100));
            for col in 0..grid.cols() {
                let alive = grid.is_alive(row as isize, col as isize);
                output.push_str(if alive { "██" } else { "··" });
            }
            output.push('\n');
        }

        output
    }

    /// One-line status text
    pub fn format_status(status: &Status) -> String {
        let state = match status.state {
            RunState::Running => "running",
            RunState::Stopped => "stopped",
        };
        format!(
            "Gen: {} | Cells: {} | Living: {} | {} @ {} gen/s",
            status.generation, status.cells, status.living, state, status.generations_per_second
        )
    }

    /// Render a status report in the configured output format
    pub fn render_status(status: &Status, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Text => Ok(Self::format_status(status)),
            OutputFormat::Json => Ok(serde_json::to_string_pretty(status)?),
        }
    }
}

/// Message category for host output, shown in its own ANSI color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Success,
    Error,
    Warning,
    Info,
}

impl Tone {
    fn sgr(self) -> u8 {
        match self {
            Tone::Error => 31,
            Tone::Success => 32,
            Tone::Warning => 33,
            Tone::Info => 34,
        }
    }

    /// Wrap `text` in this tone's color, or return it unchanged when
    /// `NO_COLOR` is set or `TERM` is `dumb`
    pub fn paint(self, text: &str) -> String {
        if color_enabled() {
            format!("\x1b[{}m{}\x1b[0m", self.sgr(), text)
        } else {
            text.to_string()
        }
    }
}

fn color_enabled() -> bool {
    std::env::var_os("NO_COLOR").is_none()
        && std::env::var("TERM").map_or(true, |term| term != "dumb")
}

/// ANSI sequence that clears the screen and homes the cursor
pub const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";
