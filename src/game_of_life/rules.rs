//! Game of Life transition rule on a bounded, non-wrapping board

use super::{Board, CellState};
use serde::{Deserialize, Serialize};

/// Offsets of the Moore neighborhood, the cell itself excluded
const NEIGHBOR_OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Counts of cells that changed state during one generation
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationResult {
    /// Dead -> Alive transitions
    pub born: usize,
    /// Alive -> Dead transitions
    pub died: usize,
}

/// Game of Life rules engine
pub struct GameOfLifeRules;

impl GameOfLifeRules {
    /// Count living neighbors of a cell; coordinates off the board count as nothing
    pub fn count_live_neighbors(board: &Board, row: usize, col: usize) -> u8 {
        NEIGHBOR_OFFSETS
            .iter()
            .filter_map(|&(dr, dc)| {
                let r = row.checked_add_signed(dr)?;
                let c = col.checked_add_signed(dc)?;
                board.try_get(r, c).ok()
            })
            .filter(|cell| cell.is_alive())
            .count() as u8
    }

    /// Next state of a cell given its current state and neighbor count
    pub fn next_state(current: CellState, neighbor_count: u8) -> CellState {
        match (current, neighbor_count) {
            (CellState::Alive, 2) | (CellState::Alive, 3) | (CellState::Dead, 3) => {
                CellState::Alive
            }
            _ => CellState::Dead,
        }
    }

    /// Compute the next generation of `current` into `next`.
    ///
    /// `next` is resized to the board's cell count and fully overwritten; the
    /// current board is only read, so every cell sees the pre-transition state.
    pub fn evolve_into(current: &Board, next: &mut Vec<CellState>) -> GenerationResult {
        next.clear();
        next.reserve(current.cells().len());

        let mut result = GenerationResult::default();
        for (row, col) in current.coordinates() {
            let before = current.get(row, col);
            let after = Self::next_state(before, Self::count_live_neighbors(current, row, col));
            match (before, after) {
                (CellState::Dead, CellState::Alive) => result.born += 1,
                (CellState::Alive, CellState::Dead) => result.died += 1,
                _ => {}
            }
            next.push(after);
        }

        result
    }
}
