//! Flat, versioned persisted form of a [`Grid`].

use crate::{Coordinate, Grid, PuzzleError, Result, Tile};
use serde::{Deserialize, Serialize};

pub const SNAPSHOT_VERSION: u32 = 1;

/// Saved grid state.
///
/// `tiles[row][col]` is the current coordinate shown in cell `(row, col)`;
/// the home coordinate is the cell index itself and is not stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSnapshot {
    pub version: u32,
    pub tile_width: usize,
    pub tile_height: usize,
    pub rows: usize,
    pub columns: usize,
    pub tiles: Vec<Vec<Coordinate>>,
    pub marked: Option<Coordinate>,
}

impl From<&Grid> for GridSnapshot {
    fn from(grid: &Grid) -> Self {
        let currents: Vec<Coordinate> = grid.tiles().map(Tile::current).collect();
        Self {
            version: SNAPSHOT_VERSION,
            tile_width: grid.tile_width(),
            tile_height: grid.tile_height(),
            rows: grid.rows(),
            columns: grid.columns(),
            tiles: currents.chunks(grid.columns()).map(<[Coordinate]>::to_vec).collect(),
            marked: grid.marked(),
        }
    }
}

impl From<Grid> for GridSnapshot {
    fn from(grid: Grid) -> Self {
        Self::from(&grid)
    }
}

impl TryFrom<GridSnapshot> for Grid {
    type Error = PuzzleError;

    fn try_from(snapshot: GridSnapshot) -> Result<Self> {
        if snapshot.version != SNAPSHOT_VERSION {
            return Err(PuzzleError::UnsupportedVersion(snapshot.version));
        }
        let GridSnapshot {
            tile_width,
            tile_height,
            rows,
            columns,
            tiles,
            marked,
            ..
        } = snapshot;
        if rows == 0 || columns == 0 {
            return Err(PuzzleError::InvalidDimensions { rows, columns });
        }
        if tiles.len() != rows {
            return Err(PuzzleError::InvalidSnapshot(format!(
                "expected {} rows of tiles, found {}",
                rows,
                tiles.len()
            )));
        }

        let mut seen = vec![false; rows * columns];
        let mut cells = Vec::with_capacity(rows * columns);
        for (row, line) in tiles.into_iter().enumerate() {
            if line.len() != columns {
                return Err(PuzzleError::InvalidSnapshot(format!(
                    "row {} has {} tiles, expected {}",
                    row,
                    line.len(),
                    columns
                )));
            }
            for (col, current) in line.into_iter().enumerate() {
                if current.row >= rows || current.col >= columns {
                    return Err(PuzzleError::InvalidSnapshot(format!(
                        "cell ({}, {}) shows {} which is off the grid",
                        row, col, current
                    )));
                }
                let slot = &mut seen[current.row * columns + current.col];
                if *slot {
                    return Err(PuzzleError::InvalidSnapshot(format!("{} appears more than once", current)));
                }
                *slot = true;
                cells.push(Tile::with_current(Coordinate::new(row, col), current));
            }
        }

        if let Some(at) = marked {
            if at.row >= rows || at.col >= columns {
                return Err(PuzzleError::InvalidSnapshot(format!("marked cell {} is off the grid", at)));
            }
        }

        Ok(Grid::from_parts(tile_width, tile_height, rows, columns, cells, marked))
    }
}

impl Grid {
    pub fn snapshot(&self) -> GridSnapshot {
        GridSnapshot::from(self)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse and validate a JSON snapshot
    pub fn from_json(json: &str) -> Result<Self> {
        let snapshot: GridSnapshot = serde_json::from_str(json)?;
        Grid::try_from(snapshot)
    }
}
