use serde::{Deserialize, Serialize};
use std::fmt;

/// A cell of the puzzle grid, addressed by row and column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coordinate {
    pub row: usize,
    pub col: usize,
}

impl Coordinate {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Every coordinate of a `rows` × `columns` grid in row-major order
    pub fn all(rows: usize, columns: usize) -> impl Iterator<Item = Coordinate> {
        (0..rows).flat_map(move |row| (0..columns).map(move |col| Coordinate::new(row, col)))
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl From<(usize, usize)> for Coordinate {
    fn from((row, col): (usize, usize)) -> Self {
        Self::new(row, col)
    }
}
