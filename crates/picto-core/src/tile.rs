use crate::Coordinate;

/// One cell of the puzzle.
///
/// `home` is the cell the tile lives in and never changes. `current` is the
/// coordinate of the image fragment the cell is showing right now; only
/// [`Grid::swap`](crate::Grid::swap) moves it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tile {
    home: Coordinate,
    current: Coordinate,
}

impl Tile {
    /// A tile showing its own fragment
    pub fn new(home: Coordinate) -> Self {
        Self {
            home,
            current: home,
        }
    }

    pub(crate) fn with_current(home: Coordinate, current: Coordinate) -> Self {
        Self { home, current }
    }

    pub fn home(&self) -> Coordinate {
        self.home
    }

    pub fn current(&self) -> Coordinate {
        self.current
    }

    /// Whether the tile shows the fragment that belongs in its cell
    pub fn is_correct(&self) -> bool {
        self.home == self.current
    }

    pub(crate) fn set_current(&mut self, current: Coordinate) {
        self.current = current;
    }
}
