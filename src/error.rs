//! Error types for the simulation core

use thiserror::Error;

/// Errors raised by the board, the engine and the snapshot codec
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LifeError {
    /// Width or height is zero (or negative in a snapshot header), or the cell count overflows
    #[error("invalid board dimensions {width}x{height}: must be positive and not overflow")]
    InvalidDimension { width: i64, height: i64 },

    /// Coordinate outside the current board
    #[error("coordinates ({row}, {col}) out of bounds for {width}x{height} board")]
    OutOfBounds {
        row: usize,
        col: usize,
        width: usize,
        height: usize,
    },

    /// Snapshot text or data that does not follow the width/height/rows contract
    #[error("malformed snapshot: {0}")]
    MalformedSnapshot(String),
}

impl LifeError {
    pub(crate) fn malformed(msg: impl Into<String>) -> Self {
        LifeError::MalformedSnapshot(msg.into())
    }

    pub(crate) fn invalid_dimension(width: usize, height: usize) -> Self {
        LifeError::InvalidDimension {
            width: i64::try_from(width).unwrap_or(i64::MAX),
            height: i64::try_from(height).unwrap_or(i64::MAX),
        }
    }
}

pub type LifeResult<T> = std::result::Result<T, LifeError>;
