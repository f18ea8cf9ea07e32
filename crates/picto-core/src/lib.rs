//! Core engine for swap-style picture puzzles.
//!
//! A puzzle is a rows × columns [`Grid`] of [`Tile`]s. Every tile has a fixed
//! home cell and shows the image fragment of some (possibly different) cell.
//! Swapping two cells exchanges the fragments they show; the puzzle is solved
//! when every cell shows its own fragment again.
//!
//! The engine also knows how to shuffle a grid ([`Scrambler`]) and how to
//! replay a recorded arrangement onto a solved grid ([`reconcile`]), mirroring
//! every swap to a caller-supplied visual board through [`SwapSink`].

mod coordinate;
pub mod error;
mod game;
mod grid;
mod mirror;
mod reconcile;
mod rng;
mod scramble;
mod snapshot;
mod tile;

pub use coordinate::Coordinate;
pub use error::{PuzzleError, Result};
pub use game::{Game, GameMode, GameSnapshot, GridSize, Phase, ARCADE_ROUNDS};
pub use grid::{Grid, TapOutcome};
pub use mirror::{Mosaic, Swap, SwapSink};
pub use reconcile::{reconcile, Reconciliation};
pub use rng::{PuzzleRng, RandomSource};
pub use scramble::Scrambler;
pub use snapshot::{GridSnapshot, SNAPSHOT_VERSION};
pub use tile::Tile;
