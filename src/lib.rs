//! Conway's Game of Life simulation engine
//!
//! A bounded, non-wrapping board advanced one generation at a time, with a
//! textual snapshot format for persistence and a text renderer for display.

pub mod config;
pub mod error;
pub mod game_of_life;
pub mod utils;

pub use config::Settings;
pub use error::{LifeError, LifeResult};
pub use game_of_life::{
    Board, CellState, GenerationResult, SimulationEngine, Snapshot, Statistics,
};
