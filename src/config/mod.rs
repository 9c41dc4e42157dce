//! Configuration management for the Game of Life driver

pub mod settings;

pub use settings::{
    BoardConfig, CliOverrides, LoggingConfig, OutputConfig, OutputFormat, Settings,
    SimulationConfig,
};
