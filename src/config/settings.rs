//! Configuration settings for the Game of Life simulator

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub grid: GridConfig,
    pub simulation: SimulationConfig,
    pub history: HistoryConfig,
    pub output: OutputConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridConfig {
    pub rows: usize,
    pub cols: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Percentage of cells alive after randomisation
    pub seed_probability: u8,
    pub generations_per_second: f64,
    /// Default step count for the previous/skip actions
    pub jump_generations: usize,
    /// Fixed RNG seed for reproducible runs
    #[serde(default)]
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryConfig {
    /// Generations retained for rewinding; `None` keeps all of them
    pub max_depth: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    /// Print the board after every generation
    pub render: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default `env_logger` filter, overridden by `RUST_LOG`
    pub level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            grid: GridConfig {
                rows: 100,
                cols: 180,
            },
            simulation: SimulationConfig {
                seed_probability: 60,
                generations_per_second: 2.0,
                jump_generations: 1,
                seed: None,
            },
            history: HistoryConfig {
                max_depth: Some(10_000),
            },
            output: OutputConfig {
                format: OutputFormat::Text,
                render: true,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
            },
        }
    }
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let settings: Settings = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from `path` if it exists, otherwise fall back to defaults.
    /// Reporting the fallback is left to the caller.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Save settings to a YAML file
    pub fn to_file(&self, path: &Path) -> Result<()> {
        let content = serde_yaml::to_string(self).context("Failed to serialize settings")?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Validate the settings
    pub fn validate(&self) -> Result<()> {
        if self.grid.rows == 0 || self.grid.cols == 0 {
            anyhow::bail!(
                "Grid dimensions must be positive, got {}x{}",
                self.grid.rows,
                self.grid.cols
            );
        }

        if self.simulation.seed_probability > 100 {
            anyhow::bail!(
                "Seed probability must be within 0..=100, got {}",
                self.simulation.seed_probability
            );
        }

        let rate = self.simulation.generations_per_second;
        if !rate.is_finite() || rate < 1.0 {
            anyhow::bail!("Generations per second must be at least 1, got {}", rate);
        }

        if self.history.max_depth == Some(0) {
            anyhow::bail!("History depth must be positive; use null for unbounded history");
        }

        Ok(())
    }

    /// Merge settings with command line overrides
    pub fn merge_with_cli(&mut self, cli_overrides: &CliOverrides) {
        if let Some(rows) = cli_overrides.rows {
            self.grid.rows = rows;
        }
        if let Some(cols) = cli_overrides.cols {
            self.grid.cols = cols;
        }
        if let Some(probability) = cli_overrides.seed_probability {
            self.simulation.seed_probability = probability;
        }
        if let Some(rate) = cli_overrides.generations_per_second {
            self.simulation.generations_per_second = rate;
        }
        if let Some(seed) = cli_overrides.seed {
            self.simulation.seed = Some(seed);
        }
        if let Some(format) = cli_overrides.format {
            self.output.format = format;
        }
        if cli_overrides.no_render {
            self.output.render = false;
        }
    }
}

/// Command line overrides for settings
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub rows: Option<usize>,
    pub cols: Option<usize>,
    pub seed_probability: Option<u8>,
    pub generations_per_second: Option<f64>,
    pub seed: Option<u64>,
    pub format: Option<OutputFormat>,
    pub no_render: bool,
}

/// Default location of the configuration file
pub fn default_config_path() -> PathBuf {
    PathBuf::from("config/default.yaml")
}
