//! Plain-text pattern files for seeding a simulation

use super::Grid;
use anyhow::{Context, Result};
use std::path::Path;

/// Load a starting pattern from a text file.
/// Format: each line is a row, with '1' for alive cells and '0' for dead cells
pub fn load_pattern_from_file<P: AsRef<Path>>(path: P) -> Result<Grid> {
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read pattern file: {}", path.as_ref().display()))?;

    parse_pattern(&content)
        .with_context(|| format!("Failed to parse pattern file: {}", path.as_ref().display()))
}

/// Parse a pattern from its string representation
pub fn parse_pattern(content: &str) -> Result<Grid> {
    let lines: Vec<&str> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .collect();

    if lines.is_empty() {
        anyhow::bail!("Pattern is empty or contains no valid rows");
    }

    let width = lines[0].len();
    let mut rows = Vec::with_capacity(lines.len());

    for (row_idx, line) in lines.iter().enumerate() {
        if line.len() != width {
            anyhow::bail!(
                "Row {} has length {}, expected {} (all rows must have the same length)",
                row_idx,
                line.len(),
                width
            );
        }

        let row = line
            .chars()
            .enumerate()
            .map(|(col_idx, ch)| match ch {
                '0' => Ok(false),
                '1' => Ok(true),
                _ => anyhow::bail!(
                    "Invalid character '{}' at position ({}, {}). Only '0' and '1' are allowed",
                    ch,
                    row_idx,
                    col_idx
                ),
            })
            .collect::<Result<Vec<bool>>>()?;
        rows.push(row);
    }

    Ok(Grid::from_rows(rows)?)
}

/// Copy `pattern` onto a dead grid of the given size, anchored at its centre
pub fn centered_on(pattern: &Grid, rows: usize, cols: usize) -> Result<Grid> {
    if pattern.rows() > rows || pattern.cols() > cols {
        anyhow::bail!(
            "Pattern of {}x{} does not fit a {}x{} grid",
            pattern.rows(),
            pattern.cols(),
            rows,
            cols
        );
    }

    let mut grid = Grid::new(rows, cols)?;
    let row_offset = (rows - pattern.rows()) / 2;
    let col_offset = (cols - pattern.cols()) / 2;
    for (row, col) in pattern.living_cells() {
        grid.set_alive(row + row_offset, col + col_offset, true)?;
    }
    Ok(grid)
}

/// Write example pattern files into `output_dir`
pub fn create_example_patterns<P: AsRef<Path>>(output_dir: P) -> Result<()> {
    let dir = output_dir.as_ref();
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory: {}", dir.display()))?;

    let patterns = [
        ("glider.txt", "00100\n10100\n01100\n00000\n00000\n"),
        ("blinker.txt", "00000\n00000\n01110\n00000\n00000\n"),
        ("block.txt", "0000\n0110\n0110\n0000\n"),
        ("beacon.txt", "110000\n110000\n001100\n001100\n"),
    ];

    for (name, content) in patterns {
        std::fs::write(dir.join(name), content)
            .with_context(|| format!("Failed to write {}", name))?;
    }

    Ok(())
}
