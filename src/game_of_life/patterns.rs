//! Classic starting patterns, each placed on a board with enough margin to evolve

use super::Board;
use crate::error::LifeResult;

pub struct Pattern {
    pub name: &'static str,
    pub width: usize,
    pub height: usize,
    pub cells: &'static [(usize, usize)],
}

pub const PATTERNS: &[Pattern] = &[
    Pattern {
        name: "block",
        width: 4,
        height: 4,
        cells: &[(1, 1), (1, 2), (2, 1), (2, 2)],
    },
    Pattern {
        name: "blinker",
        width: 5,
        height: 5,
        cells: &[(2, 1), (2, 2), (2, 3)],
    },
    Pattern {
        name: "toad",
        width: 6,
        height: 6,
        cells: &[(2, 2), (2, 3), (2, 4), (3, 1), (3, 2), (3, 3)],
    },
    Pattern {
        name: "beacon",
        width: 6,
        height: 6,
        cells: &[(1, 1), (1, 2), (2, 1), (3, 4), (4, 3), (4, 4)],
    },
    Pattern {
        name: "glider",
        width: 8,
        height: 8,
        cells: &[(0, 1), (1, 2), (2, 0), (2, 1), (2, 2)],
    },
];

impl Pattern {
    pub fn to_board(&self) -> LifeResult<Board> {
        Board::with_alive(self.width, self.height, self.cells)
    }
}

/// Look up a pattern by name, ignoring case
pub fn find_pattern(name: &str) -> Option<&'static Pattern> {
    PATTERNS.iter().find(|p| p.name.eq_ignore_ascii_case(name))
}
