//! Board representation for the Game of Life engine

use crate::error::{LifeError, LifeResult};
use itertools::iproduct;
use serde::{Deserialize, Serialize};
use std::fmt;

/// State of a single cell
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellState {
    #[default]
    Dead,
    Alive,
}

impl CellState {
    #[inline]
    pub fn is_alive(self) -> bool {
        self == CellState::Alive
    }

    /// The opposite state, used for click-to-toggle gestures
    pub fn toggled(self) -> Self {
        match self {
            CellState::Dead => CellState::Alive,
            CellState::Alive => CellState::Dead,
        }
    }

    pub fn as_digit(self) -> u8 {
        match self {
            CellState::Dead => 0,
            CellState::Alive => 1,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            CellState::Dead => '0',
            CellState::Alive => '1',
        }
    }

    /// Parse the numeric form; anything but 0 or 1 is rejected
    pub fn from_digit(value: u8) -> Option<Self> {
        match value {
            0 => Some(CellState::Dead),
            1 => Some(CellState::Alive),
            _ => None,
        }
    }

    pub fn from_char(ch: char) -> Option<Self> {
        match ch {
            '0' => Some(CellState::Dead),
            '1' => Some(CellState::Alive),
            _ => None,
        }
    }
}

impl From<bool> for CellState {
    fn from(alive: bool) -> Self {
        if alive {
            CellState::Alive
        } else {
            CellState::Dead
        }
    }
}

/// A fixed-size, bounded grid of cells stored row-major
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: usize,
    height: usize,
    cells: Vec<CellState>,
}

impl Board {
    /// Create a board with every cell dead
    pub fn new(width: usize, height: usize) -> LifeResult<Self> {
        let len = width
            .checked_mul(height)
            .filter(|&len| len > 0)
            .ok_or_else(|| LifeError::invalid_dimension(width, height))?;

        Ok(Self {
            width,
            height,
            cells: vec![CellState::Dead; len],
        })
    }

    /// Create a board from rows of cells; every row must have the same length
    pub fn from_rows(rows: Vec<Vec<CellState>>) -> LifeResult<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);

        if width == 0 || height == 0 {
            return Err(LifeError::invalid_dimension(width, height));
        }

        for (i, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(LifeError::malformed(format!(
                    "row {} has length {}, expected {}",
                    i,
                    row.len(),
                    width
                )));
            }
        }

        Ok(Self {
            width,
            height,
            cells: rows.into_iter().flatten().collect(),
        })
    }

    /// Build a board of the given size with the listed cells alive
    pub fn with_alive(width: usize, height: usize, alive: &[(usize, usize)]) -> LifeResult<Self> {
        let mut board = Self::new(width, height)?;
        for &(row, col) in alive {
            board.try_set(row, col, CellState::Alive)?;
        }
        Ok(board)
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn contains(&self, row: usize, col: usize) -> bool {
        row < self.height && col < self.width
    }

    #[inline]
    fn index(&self, row: usize, col: usize) -> usize {
        row * self.width + col
    }

    fn checked_index(&self, row: usize, col: usize) -> LifeResult<usize> {
        if self.contains(row, col) {
            Ok(self.index(row, col))
        } else {
            Err(LifeError::OutOfBounds {
                row,
                col,
                width: self.width,
                height: self.height,
            })
        }
    }

    /// Read a cell. Panics when the coordinates are outside the board.
    pub fn get(&self, row: usize, col: usize) -> CellState {
        match self.checked_index(row, col) {
            Ok(idx) => self.cells[idx],
            Err(e) => panic!("{}", e),
        }
    }

    /// Write a cell. Panics when the coordinates are outside the board.
    pub fn set(&mut self, row: usize, col: usize, state: CellState) {
        match self.checked_index(row, col) {
            Ok(idx) => self.cells[idx] = state,
            Err(e) => panic!("{}", e),
        }
    }

    pub fn try_get(&self, row: usize, col: usize) -> LifeResult<CellState> {
        self.checked_index(row, col).map(|idx| self.cells[idx])
    }

    pub fn try_set(&mut self, row: usize, col: usize, state: CellState) -> LifeResult<()> {
        let idx = self.checked_index(row, col)?;
        self.cells[idx] = state;
        Ok(())
    }

    /// Immutable view of the row-major cell storage
    pub fn cells(&self) -> &[CellState] {
        &self.cells
    }

    pub fn rows(&self) -> impl Iterator<Item = &[CellState]> + '_ {
        self.cells.chunks_exact(self.width)
    }

    /// All coordinates in row-major order
    pub fn coordinates(&self) -> impl Iterator<Item = (usize, usize)> {
        iproduct!(0..self.height, 0..self.width)
    }

    pub fn fill(&mut self, state: CellState) {
        self.cells.fill(state);
    }

    pub fn fill_with<F>(&mut self, mut f: F)
    where
        F: FnMut() -> CellState,
    {
        for cell in self.cells.iter_mut() {
            *cell = f();
        }
    }

    /// Swap in a freshly computed generation of the same size
    pub(crate) fn swap_cells(&mut self, next: &mut Vec<CellState>) {
        debug_assert_eq!(next.len(), self.cells.len());
        std::mem::swap(&mut self.cells, next);
    }

    /// Count living cells
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|c| c.is_alive()).count()
    }

    /// True when no cell is alive
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|c| !c.is_alive())
    }

    pub fn living_cells(&self) -> Vec<(usize, usize)> {
        self.coordinates()
            .filter(|&(row, col)| self.cells[self.index(row, col)].is_alive())
            .collect()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            for cell in row {
                let symbol = if cell.is_alive() { "⬛" } else { "⬜" };
                write!(f, "{}", symbol)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
