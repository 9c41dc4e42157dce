//! Game of Life core functionality

pub mod board;
pub mod engine;
pub mod io;
pub mod patterns;
pub mod rules;

pub use board::{Board, CellState};
pub use engine::{SimulationEngine, Statistics};
pub use io::{
    load_snapshot_from_file, save_snapshot_to_file, write_pattern_library, FileStore,
    PersistenceAdapter, Snapshot,
};
pub use patterns::{find_pattern, Pattern, PATTERNS};
pub use rules::{GameOfLifeRules, GenerationResult};
