//! Configuration management for the Game of Life simulator

pub mod settings;

pub use settings::{
    default_config_path, CliOverrides, GridConfig, HistoryConfig, LoggingConfig, OutputConfig,
    OutputFormat, Settings, SimulationConfig,
};
