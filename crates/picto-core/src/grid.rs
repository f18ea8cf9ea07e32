use crate::mirror::{Swap, SwapSink};
use crate::snapshot::GridSnapshot;
use crate::{Coordinate, PuzzleError, RandomSource, Result, Tile};
use log::trace;
use serde::{Deserialize, Serialize};
use std::fmt;

/// What a tap on a cell did to the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapOutcome {
    /// Nothing was selected; the tapped cell is now selected
    Marked(Coordinate),
    /// The selected cell was tapped again and is deselected
    Unmarked(Coordinate),
    /// The selected cell and the tapped cell were swapped
    Swapped { swap: Swap, solved: bool },
}

/// The puzzle board.
///
/// Tiles are stored row-major; the tile at index `row * columns + col` always
/// has home `(row, col)`. Only [`Grid::swap`] changes which fragment a cell
/// shows, so the current coordinates always form a permutation of the cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "GridSnapshot", into = "GridSnapshot")]
pub struct Grid {
    tile_width: usize,
    tile_height: usize,
    rows: usize,
    columns: usize,
    tiles: Vec<Tile>,
    marked: Option<Coordinate>,
}

impl Grid {
    /// Create a solved grid. `tile_width`/`tile_height` are the pixel extents
    /// of one cell and only matter for [`Grid::coordinate_from_pixel`].
    pub fn new(tile_width: usize, tile_height: usize, rows: usize, columns: usize) -> Result<Self> {
        if rows == 0 || columns == 0 {
            return Err(PuzzleError::InvalidDimensions { rows, columns });
        }
        Ok(Self {
            tile_width,
            tile_height,
            rows,
            columns,
            tiles: Coordinate::all(rows, columns).map(Tile::new).collect(),
            marked: None,
        })
    }

    /// Assemble a grid from row-major tiles that were already validated
    pub(crate) fn from_parts(
        tile_width: usize,
        tile_height: usize,
        rows: usize,
        columns: usize,
        tiles: Vec<Tile>,
        marked: Option<Coordinate>,
    ) -> Self {
        debug_assert_eq!(tiles.len(), rows * columns);
        Self {
            tile_width,
            tile_height,
            rows,
            columns,
            tiles,
            marked,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn tile_width(&self) -> usize {
        self.tile_width
    }

    pub fn tile_height(&self) -> usize {
        self.tile_height
    }

    /// Number of cells
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Always false: a grid has at least one cell
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn contains(&self, at: Coordinate) -> bool {
        at.row < self.rows && at.col < self.columns
    }

    pub fn tile(&self, at: Coordinate) -> Result<&Tile> {
        let index = self.index(at)?;
        Ok(&self.tiles[index])
    }

    /// All tiles in row-major order
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter()
    }

    /// Exchange the fragments shown at `p1` and `p2`.
    ///
    /// Swapping a cell with itself is allowed and changes nothing.
    pub fn swap(&mut self, p1: Coordinate, p2: Coordinate) -> Result<()> {
        let i = self.index(p1)?;
        let j = self.index(p2)?;
        let first = self.tiles[i].current();
        let second = self.tiles[j].current();
        self.tiles[i].set_current(second);
        self.tiles[j].set_current(first);
        trace!("swapped {} and {}", p1, p2);
        Ok(())
    }

    pub fn is_solved(&self) -> bool {
        self.tiles.iter().all(Tile::is_correct)
    }

    /// Cells showing the wrong fragment, row-major
    pub fn mismatched(&self) -> Vec<Coordinate> {
        self.tiles
            .iter()
            .filter(|tile| !tile.is_correct())
            .map(Tile::home)
            .collect()
    }

    /// Map a pixel offset inside the board to the cell under it.
    ///
    /// The result is not bounds-checked; callers pass on-board pixels.
    ///
    /// # Panics
    ///
    /// Panics if either tile extent is zero.
    pub fn coordinate_from_pixel(&self, y: usize, x: usize) -> Coordinate {
        Coordinate::new(y / self.tile_height, x / self.tile_width)
    }

    /// Uniformly sample a cell; row and column are drawn independently
    pub fn random_coordinate<R: RandomSource + ?Sized>(&self, rng: &mut R) -> Coordinate {
        let row = rng.next_below(self.rows);
        let col = rng.next_below(self.columns);
        Coordinate::new(row, col)
    }

    /// Set or clear the selected cell
    pub fn mark(&mut self, at: Option<Coordinate>) -> Result<()> {
        if let Some(at) = at {
            self.index(at)?;
        }
        self.marked = at;
        Ok(())
    }

    pub fn marked(&self) -> Option<Coordinate> {
        self.marked
    }

    /// Two-tap interaction: select a cell, then tap another one to swap the
    /// pair, or tap the selected cell again to deselect it.
    pub fn tap(&mut self, at: Coordinate) -> Result<TapOutcome> {
        self.index(at)?;
        match self.marked {
            None => {
                self.marked = Some(at);
                Ok(TapOutcome::Marked(at))
            }
            Some(marked) if marked == at => {
                self.marked = None;
                Ok(TapOutcome::Unmarked(at))
            }
            Some(marked) => {
                self.swap(marked, at)?;
                self.marked = None;
                Ok(TapOutcome::Swapped {
                    swap: Swap::new(marked, at),
                    solved: self.is_solved(),
                })
            }
        }
    }

    fn index(&self, at: Coordinate) -> Result<usize> {
        if self.contains(at) {
            Ok(at.row * self.columns + at.col)
        } else {
            Err(PuzzleError::OutOfBounds {
                coordinate: at,
                rows: self.rows,
                columns: self.columns,
            })
        }
    }
}

impl SwapSink for Grid {
    fn apply_swap(&mut self, swap: Swap) -> Result<()> {
        self.swap(swap.first, swap.second)
    }

    fn dimensions(&self) -> Option<(usize, usize)> {
        Some((self.rows, self.columns))
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.tiles.chunks(self.columns) {
            let line: Vec<String> = row.iter().map(|tile| tile.current().to_string()).collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn c(row: usize, col: usize) -> Coordinate {
        Coordinate::new(row, col)
    }

    fn currents(grid: &Grid) -> Vec<Coordinate> {
        grid.tiles().map(Tile::current).collect()
    }

    #[test]
    fn test_new_grid_is_solved() {
        let grid = Grid::new(50, 50, 5, 5).unwrap();
        assert!(grid.is_solved());
        assert_eq!(grid.len(), 25);
        assert!(grid.mismatched().is_empty());
        for tile in grid.tiles() {
            assert_eq!(tile.home(), tile.current());
        }
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        assert!(matches!(
            Grid::new(10, 10, 0, 3),
            Err(PuzzleError::InvalidDimensions { rows: 0, columns: 3 })
        ));
        assert!(Grid::new(10, 10, 3, 0).is_err());
    }

    #[test]
    fn test_swap_moves_fragments() {
        let mut grid = Grid::new(50, 50, 5, 5).unwrap();
        grid.swap(c(0, 0), c(4, 0)).unwrap();
        assert_eq!(grid.tile(c(0, 0)).unwrap().current(), c(4, 0));
        assert_eq!(grid.tile(c(4, 0)).unwrap().current(), c(0, 0));
        assert_eq!(grid.tile(c(0, 0)).unwrap().home(), c(0, 0));
    }

    #[test]
    fn test_chained_swaps() {
        let mut grid = Grid::new(50, 50, 5, 5).unwrap();
        grid.swap(c(0, 0), c(0, 4)).unwrap();
        grid.swap(c(0, 0), c(4, 0)).unwrap();
        assert_eq!(grid.tile(c(4, 0)).unwrap().current(), c(0, 4));
        assert_eq!(grid.mismatched(), vec![c(0, 0), c(0, 4), c(4, 0)]);
    }

    #[test]
    fn test_swap_then_swap_back_is_solved() {
        let mut grid = Grid::new(50, 50, 5, 5).unwrap();
        grid.swap(c(0, 0), c(0, 4)).unwrap();
        assert!(!grid.is_solved());
        grid.swap(c(0, 4), c(0, 0)).unwrap();
        assert!(grid.is_solved());
    }

    #[test]
    fn test_three_by_three_scenario() {
        let mut grid = Grid::new(10, 10, 3, 3).unwrap();
        grid.swap(c(0, 0), c(0, 2)).unwrap();
        assert_eq!(grid.tile(c(0, 0)).unwrap().current(), c(0, 2));
        assert!(!grid.is_solved());

        let after_first = grid.clone();
        grid.swap(c(0, 0), c(0, 1)).unwrap();
        grid.swap(c(0, 0), c(0, 1)).unwrap();
        assert_eq!(grid, after_first);
    }

    #[test]
    fn test_self_swap_is_noop() {
        let mut grid = Grid::new(10, 10, 2, 3).unwrap();
        grid.swap(c(1, 0), c(0, 2)).unwrap();
        let before = grid.clone();
        grid.swap(c(1, 2), c(1, 2)).unwrap();
        grid.swap(c(1, 0), c(1, 0)).unwrap();
        assert_eq!(grid, before);
    }

    #[test]
    fn test_swap_out_of_bounds() {
        let mut grid = Grid::new(10, 10, 2, 3).unwrap();
        let err = grid.swap(c(0, 0), c(0, 3)).unwrap_err();
        assert!(matches!(
            err,
            PuzzleError::OutOfBounds { coordinate, rows: 2, columns: 3 } if coordinate == c(0, 3)
        ));
        assert!(grid.swap(c(2, 0), c(0, 0)).is_err());
        assert!(grid.is_solved());
    }

    #[test]
    fn test_swaps_keep_a_permutation() {
        let mut grid = Grid::new(10, 10, 4, 3).unwrap();
        let pairs = [(c(0, 0), c(3, 2)), (c(1, 1), c(0, 0)), (c(2, 0), c(2, 2)), (c(3, 2), c(1, 1))];
        for (a, b) in pairs {
            grid.swap(a, b).unwrap();
            let seen: HashSet<Coordinate> = currents(&grid).into_iter().collect();
            let expected: HashSet<Coordinate> = Coordinate::all(4, 3).collect();
            assert_eq!(seen, expected);
        }
    }

    #[test]
    fn test_coordinate_from_pixel() {
        let grid = Grid::new(50, 50, 5, 5).unwrap();
        assert_eq!(grid.coordinate_from_pixel(0, 100), c(0, 2));
        assert_eq!(grid.coordinate_from_pixel(149, 49), c(2, 0));

        let wide = Grid::new(120, 80, 3, 2).unwrap();
        assert_eq!(wide.coordinate_from_pixel(170, 130), c(2, 1));
    }

    #[test]
    fn test_random_coordinate_in_bounds() {
        let grid = Grid::new(10, 10, 3, 4).unwrap();
        let mut rng = crate::PuzzleRng::with_seed(7);
        for _ in 0..200 {
            assert!(grid.contains(grid.random_coordinate(&mut rng)));
        }
    }

    #[test]
    fn test_mark_validates_bounds() {
        let mut grid = Grid::new(10, 10, 2, 2).unwrap();
        grid.mark(Some(c(1, 1))).unwrap();
        assert_eq!(grid.marked(), Some(c(1, 1)));
        assert!(grid.mark(Some(c(2, 0))).is_err());
        assert_eq!(grid.marked(), Some(c(1, 1)));
        grid.mark(None).unwrap();
        assert_eq!(grid.marked(), None);
    }

    #[test]
    fn test_tap_select_and_deselect() {
        let mut grid = Grid::new(10, 10, 2, 2).unwrap();
        assert_eq!(grid.tap(c(0, 1)).unwrap(), TapOutcome::Marked(c(0, 1)));
        assert_eq!(grid.marked(), Some(c(0, 1)));
        assert_eq!(grid.tap(c(0, 1)).unwrap(), TapOutcome::Unmarked(c(0, 1)));
        assert_eq!(grid.marked(), None);
        assert!(grid.is_solved());
    }

    #[test]
    fn test_tap_swaps_and_reports_solved() {
        let mut grid = Grid::new(10, 10, 2, 2).unwrap();
        grid.tap(c(0, 0)).unwrap();
        let outcome = grid.tap(c(1, 1)).unwrap();
        assert_eq!(
            outcome,
            TapOutcome::Swapped {
                swap: Swap::new(c(0, 0), c(1, 1)),
                solved: false
            }
        );
        assert_eq!(grid.marked(), None);

        grid.tap(c(1, 1)).unwrap();
        let outcome = grid.tap(c(0, 0)).unwrap();
        assert!(matches!(outcome, TapOutcome::Swapped { solved: true, .. }));
        assert!(grid.is_solved());
    }

    #[test]
    fn test_tap_out_of_bounds_keeps_mark() {
        let mut grid = Grid::new(10, 10, 2, 2).unwrap();
        grid.tap(c(0, 0)).unwrap();
        assert!(grid.tap(c(5, 5)).is_err());
        assert_eq!(grid.marked(), Some(c(0, 0)));
    }

    #[test]
    fn test_grid_as_swap_sink() {
        let mut grid = Grid::new(10, 10, 2, 2).unwrap();
        grid.apply_swap(Swap::new(c(0, 1), c(1, 0))).unwrap();
        assert_eq!(grid.mismatched(), vec![c(0, 1), c(1, 0)]);
        assert_eq!(grid.dimensions(), Some((2, 2)));
    }

    #[test]
    fn test_display() {
        let mut grid = Grid::new(10, 10, 1, 2).unwrap();
        grid.swap(c(0, 0), c(0, 1)).unwrap();
        assert_eq!(grid.to_string(), "(0, 1) (0, 0)\n");
    }
}
