//! Error type shared by every fallible engine operation.

use crate::Coordinate;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PuzzleError {
    #[error("a grid needs at least one row and one column, got {rows}x{columns}")]
    InvalidDimensions { rows: usize, columns: usize },
    #[error("{coordinate} is outside the {rows}x{columns} grid")]
    OutOfBounds {
        coordinate: Coordinate,
        rows: usize,
        columns: usize,
    },
    #[error("invalid grid snapshot: {0}")]
    InvalidSnapshot(String),
    #[error("unsupported snapshot version {0}")]
    UnsupportedVersion(u32),
    #[error("expected a {}x{} board, found {}x{}", .expected.0, .expected.1, .found.0, .found.1)]
    DimensionMismatch {
        expected: (usize, usize),
        found: (usize, usize),
    },
    #[error("a {expected}-cell board was given {found} cells")]
    CellCount { expected: usize, found: usize },
    #[error("no swap partner brings {0} closer to the target arrangement")]
    Unreconcilable(Coordinate),
    #[error("cannot {action} while the game is {phase}")]
    InvalidPhase {
        action: &'static str,
        phase: crate::Phase,
    },
    #[error("the grid size is fixed in arcade mode")]
    SizeLocked,
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PuzzleError>;
