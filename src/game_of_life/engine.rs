//! Simulation engine: owns one board and advances it a generation at a time

use super::io::Snapshot;
use super::rules::{GameOfLifeRules, GenerationResult};
use super::{Board, CellState};
use crate::error::LifeResult;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

/// Running counters since the board was last created, loaded, cleared or randomized
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statistics {
    pub generation: u64,
    pub population: usize,
    pub last: Option<GenerationResult>,
    pub total_born: u64,
    pub total_died: u64,
}

/// Game of Life simulation engine
///
/// Single-threaded and synchronous. Callers sharing an engine across threads
/// must serialize access themselves.
#[derive(Debug, Clone)]
pub struct SimulationEngine {
    board: Board,
    /// Buffer the next generation is written into before being swapped in
    next: Vec<CellState>,
    stats: Statistics,
}

impl SimulationEngine {
    /// Create an engine with an all-dead board
    pub fn create(width: usize, height: usize) -> LifeResult<Self> {
        let board = Board::new(width, height)?;
        info!(width, height, "board created");
        Ok(Self::from_board(board))
    }

    /// Wrap an existing board
    pub fn from_board(board: Board) -> Self {
        let stats = Statistics {
            population: board.population(),
            ..Statistics::default()
        };
        Self {
            next: Vec::with_capacity(board.cells().len()),
            board,
            stats,
        }
    }

    /// Build an engine from a snapshot, validating it first
    pub fn from_snapshot(snapshot: &Snapshot) -> LifeResult<Self> {
        let engine = Self::from_board(snapshot.to_board()?);
        info!(
            width = engine.width(),
            height = engine.height(),
            population = engine.population(),
            "board loaded"
        );
        Ok(engine)
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.board.width()
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.board.height()
    }

    /// Read-only view of the current board
    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn statistics(&self) -> Statistics {
        self.stats
    }

    pub fn generation(&self) -> u64 {
        self.stats.generation
    }

    pub fn population(&self) -> usize {
        self.stats.population
    }

    /// Panics when the coordinates are outside the board
    pub fn get_cell(&self, row: usize, col: usize) -> CellState {
        self.board.get(row, col)
    }

    /// Panics when the coordinates are outside the board
    pub fn set_cell(&mut self, row: usize, col: usize, state: CellState) {
        let before = self.board.get(row, col);
        self.board.set(row, col, state);
        self.adjust_population(before, state);
    }

    pub fn try_get_cell(&self, row: usize, col: usize) -> LifeResult<CellState> {
        self.board.try_get(row, col)
    }

    pub fn try_set_cell(&mut self, row: usize, col: usize, state: CellState) -> LifeResult<()> {
        let before = self.board.try_get(row, col)?;
        self.board.try_set(row, col, state)?;
        self.adjust_population(before, state);
        Ok(())
    }

    /// Flip one cell and return its new state
    pub fn toggle_cell(&mut self, row: usize, col: usize) -> LifeResult<CellState> {
        let state = self.board.try_get(row, col)?.toggled();
        self.try_set_cell(row, col, state)?;
        trace!(row, col, ?state, "cell toggled");
        Ok(state)
    }

    fn adjust_population(&mut self, before: CellState, after: CellState) {
        match (before, after) {
            (CellState::Dead, CellState::Alive) => self.stats.population += 1,
            (CellState::Alive, CellState::Dead) => self.stats.population -= 1,
            _ => {}
        }
    }

    /// Kill every cell
    pub fn clear(&mut self) {
        self.board.fill(CellState::Dead);
        self.reset_statistics();
        debug!("board cleared");
    }

    /// Set every cell alive or dead with equal probability
    pub fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.board.fill_with(|| CellState::from(rng.gen_bool(0.5)));
        self.reset_statistics();
        debug!(population = self.stats.population, "board randomized");
    }

    /// Replace the board wholesale with the snapshot's contents and dimensions.
    ///
    /// The snapshot is fully validated first; on error the current board is untouched.
    pub fn load(&mut self, snapshot: &Snapshot) -> LifeResult<()> {
        let board = snapshot.to_board()?;
        self.next = Vec::with_capacity(board.cells().len());
        self.board = board;
        self.reset_statistics();
        info!(
            width = self.width(),
            height = self.height(),
            population = self.stats.population,
            "board loaded"
        );
        Ok(())
    }

    /// Current board in snapshot form
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::from_board(&self.board)
    }

    /// Advance exactly one generation
    pub fn step(&mut self) -> GenerationResult {
        let result = GameOfLifeRules::evolve_into(&self.board, &mut self.next);
        self.board.swap_cells(&mut self.next);

        self.stats.generation += 1;
        self.stats.population = self.stats.population + result.born - result.died;
        self.stats.total_born += result.born as u64;
        self.stats.total_died += result.died as u64;
        self.stats.last = Some(result);

        debug!(
            generation = self.stats.generation,
            born = result.born,
            died = result.died,
            population = self.stats.population,
            "generation advanced"
        );
        result
    }

    /// Advance several generations, returning the result of each
    pub fn run(&mut self, generations: usize) -> Vec<GenerationResult> {
        (0..generations).map(|_| self.step()).collect()
    }

    fn reset_statistics(&mut self) {
        self.stats = Statistics {
            population: self.board.population(),
            ..Statistics::default()
        };
    }
}
