//! The seam between the engine and whatever draws the puzzle.
//!
//! Every swap the engine performs is emitted as a [`Swap`] to a [`SwapSink`],
//! in the order it happens, so a visual board can follow the logical grid
//! step by step.

use crate::{Coordinate, PuzzleError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A pair of cells whose contents were exchanged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Swap {
    pub first: Coordinate,
    pub second: Coordinate,
}

impl Swap {
    pub fn new(first: Coordinate, second: Coordinate) -> Self {
        Self { first, second }
    }
}

impl fmt::Display for Swap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <-> {}", self.first, self.second)
    }
}

/// Receiver of swap events.
pub trait SwapSink {
    fn apply_swap(&mut self, swap: Swap) -> Result<()>;

    /// Board shape as `(rows, columns)`, if the sink has one.
    ///
    /// Sinks that report a shape are checked against the grid before the
    /// engine mirrors anything onto them.
    fn dimensions(&self) -> Option<(usize, usize)> {
        None
    }
}

/// Discards every event
impl SwapSink for () {
    fn apply_swap(&mut self, _swap: Swap) -> Result<()> {
        Ok(())
    }
}

/// Records every event in order
impl SwapSink for Vec<Swap> {
    fn apply_swap(&mut self, swap: Swap) -> Result<()> {
        self.push(swap);
        Ok(())
    }
}

impl<S: SwapSink + ?Sized> SwapSink for &mut S {
    fn apply_swap(&mut self, swap: Swap) -> Result<()> {
        (**self).apply_swap(swap)
    }

    fn dimensions(&self) -> Option<(usize, usize)> {
        (**self).dimensions()
    }
}

pub(crate) fn check_dimensions<S: SwapSink + ?Sized>(
    sink: &S,
    rows: usize,
    columns: usize,
) -> Result<()> {
    match sink.dimensions() {
        Some(found) if found != (rows, columns) => Err(PuzzleError::DimensionMismatch {
            expected: (rows, columns),
            found,
        }),
        _ => Ok(()),
    }
}

/// A rows × columns board of fragments that follows the engine's swaps.
///
/// The engine never looks inside a fragment; `T` can be an image piece, a
/// label, or anything else the presentation layer draws.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mosaic<T> {
    rows: usize,
    columns: usize,
    cells: Vec<T>,
}

impl<T> Mosaic<T> {
    /// Build a board whose cell at `c` holds `fragment(c)`
    pub fn from_fn(rows: usize, columns: usize, mut fragment: impl FnMut(Coordinate) -> T) -> Result<Self> {
        if rows == 0 || columns == 0 {
            return Err(PuzzleError::InvalidDimensions { rows, columns });
        }
        let cells = Coordinate::all(rows, columns).map(&mut fragment).collect();
        Ok(Self {
            rows,
            columns,
            cells,
        })
    }

    /// Build a board from row-major fragments
    pub fn new(rows: usize, columns: usize, cells: Vec<T>) -> Result<Self> {
        if rows == 0 || columns == 0 {
            return Err(PuzzleError::InvalidDimensions { rows, columns });
        }
        if cells.len() != rows * columns {
            return Err(PuzzleError::CellCount {
                expected: rows * columns,
                found: cells.len(),
            });
        }
        Ok(Self {
            rows,
            columns,
            cells,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn get(&self, at: Coordinate) -> Option<&T> {
        self.index(at).map(|i| &self.cells[i])
    }

    pub fn swap(&mut self, a: Coordinate, b: Coordinate) -> Result<()> {
        let i = self.index(a).ok_or(self.out_of_bounds(a))?;
        let j = self.index(b).ok_or(self.out_of_bounds(b))?;
        self.cells.swap(i, j);
        Ok(())
    }

    /// Rows of fragments, top to bottom
    pub fn iter_rows(&self) -> impl Iterator<Item = &[T]> {
        self.cells.chunks(self.columns)
    }

    fn index(&self, at: Coordinate) -> Option<usize> {
        (at.row < self.rows && at.col < self.columns).then(|| at.row * self.columns + at.col)
    }

    fn out_of_bounds(&self, coordinate: Coordinate) -> PuzzleError {
        PuzzleError::OutOfBounds {
            coordinate,
            rows: self.rows,
            columns: self.columns,
        }
    }
}

impl<T> SwapSink for Mosaic<T> {
    fn apply_swap(&mut self, swap: Swap) -> Result<()> {
        self.swap(swap.first, swap.second)
    }

    fn dimensions(&self) -> Option<(usize, usize)> {
        Some((self.rows, self.columns))
    }
}

impl<T: fmt::Display> fmt::Display for Mosaic<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.iter_rows() {
            let line: Vec<String> = row.iter().map(|cell| cell.to_string()).collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(rows: usize, columns: usize) -> Mosaic<char> {
        Mosaic::from_fn(rows, columns, |c| (b'A' + (c.row * columns + c.col) as u8) as char).unwrap()
    }

    #[test]
    fn test_mosaic_swap() {
        let mut mosaic = labels(2, 2);
        mosaic.swap(Coordinate::new(0, 0), Coordinate::new(1, 1)).unwrap();
        assert_eq!(mosaic.get(Coordinate::new(0, 0)), Some(&'D'));
        assert_eq!(mosaic.get(Coordinate::new(1, 1)), Some(&'A'));
        assert_eq!(mosaic.to_string(), "D B\nC A\n");
    }

    #[test]
    fn test_mosaic_rejects_out_of_bounds() {
        let mut mosaic = labels(2, 3);
        let err = mosaic.swap(Coordinate::new(0, 0), Coordinate::new(2, 0)).unwrap_err();
        assert!(matches!(err, PuzzleError::OutOfBounds { rows: 2, columns: 3, .. }));
        assert_eq!(mosaic, labels(2, 3));
    }

    #[test]
    fn test_mosaic_new_checks_length() {
        assert!(matches!(
            Mosaic::new(2, 2, vec![1, 2, 3]),
            Err(PuzzleError::CellCount { expected: 4, found: 3 })
        ));
        assert!(Mosaic::new(0, 2, Vec::<u8>::new()).is_err());
        assert!(Mosaic::new(1, 3, vec![1, 2, 3]).is_ok());
    }

    #[test]
    fn test_recorder_keeps_order() {
        let mut recorder: Vec<Swap> = Vec::new();
        let a = Swap::new(Coordinate::new(0, 0), Coordinate::new(0, 1));
        let b = Swap::new(Coordinate::new(1, 0), Coordinate::new(0, 1));
        recorder.apply_swap(a).unwrap();
        recorder.apply_swap(b).unwrap();
        assert_eq!(recorder, vec![a, b]);
        assert_eq!(recorder.dimensions(), None);
    }

    #[test]
    fn test_dimension_check() {
        let mosaic = labels(2, 3);
        assert!(check_dimensions(&mosaic, 2, 3).is_ok());
        assert!(matches!(
            check_dimensions(&mosaic, 3, 2),
            Err(PuzzleError::DimensionMismatch { expected: (3, 2), found: (2, 3) })
        ));
        assert!(check_dimensions(&(), 9, 9).is_ok());
    }
}
