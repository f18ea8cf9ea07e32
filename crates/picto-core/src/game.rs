//! Round flow around a single puzzle grid.
//!
//! Free play lets the player pick any [`GridSize`] and play as many rounds
//! as they like. Arcade mode walks through the first [`ARCADE_ROUNDS`] sizes
//! in order and then ends.

use crate::mirror::{Swap, SwapSink};
use crate::{reconcile, Coordinate, Grid, PuzzleError, PuzzleRng, RandomSource, Reconciliation, Result, Scrambler, TapOutcome};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of rounds in arcade mode
pub const ARCADE_ROUNDS: usize = 3;

/// Grid layouts offered to the player, smallest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum GridSize {
    ThreeByTwo,
    ThreeByThree,
    FourByThree,
    FourByFour,
    FiveByFour,
    FiveByFive,
}

impl Default for GridSize {
    fn default() -> Self {
        Self::ThreeByTwo
    }
}

impl GridSize {
    pub fn all() -> &'static [GridSize] {
        &[
            GridSize::ThreeByTwo,
            GridSize::ThreeByThree,
            GridSize::FourByThree,
            GridSize::FourByFour,
            GridSize::FiveByFour,
            GridSize::FiveByFive,
        ]
    }

    pub fn rows(&self) -> usize {
        match self {
            GridSize::ThreeByTwo | GridSize::ThreeByThree => 3,
            GridSize::FourByThree | GridSize::FourByFour => 4,
            GridSize::FiveByFour | GridSize::FiveByFive => 5,
        }
    }

    pub fn columns(&self) -> usize {
        match self {
            GridSize::ThreeByTwo => 2,
            GridSize::ThreeByThree | GridSize::FourByThree => 3,
            GridSize::FourByFour | GridSize::FiveByFour => 4,
            GridSize::FiveByFive => 5,
        }
    }

    /// Position in [`GridSize::all`]
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// The next larger layout, if any
    pub fn next(&self) -> Option<GridSize> {
        Self::all().get(self.index() + 1).copied()
    }
}

impl fmt::Display for GridSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.rows(), self.columns())
    }
}

impl FromStr for GridSize {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let trimmed = s.trim().to_ascii_lowercase();
        Self::all()
            .iter()
            .copied()
            .find(|size| size.to_string() == trimmed)
            .ok_or_else(|| {
                let known: Vec<String> = Self::all().iter().map(GridSize::to_string).collect();
                format!("unknown grid size '{}', expected one of {}", s, known.join(", "))
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameMode {
    FreePlay,
    Arcade,
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameMode::FreePlay => write!(f, "Free Play"),
            GameMode::Arcade => write!(f, "Arcade"),
        }
    }
}

/// Where the game is in its round cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Waiting for the image of the next round
    AwaitingImage,
    /// A scrambled puzzle is on the board
    Playing,
    /// The current puzzle was just solved
    Solved,
    /// All arcade rounds are done
    ArcadeComplete,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::AwaitingImage => write!(f, "waiting for an image"),
            Phase::Playing => write!(f, "playing"),
            Phase::Solved => write!(f, "solved"),
            Phase::ArcadeComplete => write!(f, "finished"),
        }
    }
}

/// Saved game state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub mode: GameMode,
    pub size: GridSize,
    pub phase: Phase,
    pub grid: Option<Grid>,
}

impl GameSnapshot {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// A play session: the current round's grid plus the round bookkeeping
pub struct Game<R: RandomSource = PuzzleRng> {
    mode: GameMode,
    size: GridSize,
    phase: Phase,
    grid: Option<Grid>,
    scrambler: Scrambler<R>,
}

impl Game {
    pub fn new(mode: GameMode) -> Self {
        Self::with_scrambler(mode, Scrambler::new())
    }

    /// Rebuild a saved game.
    ///
    /// A game saved mid-round is replayed through [`reconcile`] onto
    /// `visual`, which must show the solved image when passed in. The
    /// returned reconciliation is `None` for every other phase.
    pub fn restore<S: SwapSink + ?Sized>(
        snapshot: GameSnapshot,
        visual: &mut S,
    ) -> Result<(Self, Option<Reconciliation>)> {
        Self::restore_with(snapshot, Scrambler::new(), visual)
    }
}

impl<R: RandomSource> Game<R> {
    pub fn with_scrambler(mode: GameMode, scrambler: Scrambler<R>) -> Self {
        Self {
            mode,
            size: GridSize::default(),
            phase: Phase::AwaitingImage,
            grid: None,
            scrambler,
        }
    }

    pub fn restore_with<S: SwapSink + ?Sized>(
        snapshot: GameSnapshot,
        scrambler: Scrambler<R>,
        visual: &mut S,
    ) -> Result<(Self, Option<Reconciliation>)> {
        let GameSnapshot {
            mode,
            size,
            phase,
            grid,
        } = snapshot;

        if let Some(grid) = &grid {
            if (grid.rows(), grid.columns()) != (size.rows(), size.columns()) {
                return Err(PuzzleError::DimensionMismatch {
                    expected: (size.rows(), size.columns()),
                    found: (grid.rows(), grid.columns()),
                });
            }
        }
        check_consistent(mode, size, phase, grid.as_ref())?;

        let mut game = Self {
            mode,
            size,
            phase,
            grid: None,
            scrambler,
        };

        let replay = match (phase, grid) {
            (Phase::Playing, Some(mut saved)) => {
                saved.mark(None)?;
                let result = reconcile(&saved, visual)?;
                game.grid = Some(result.grid.clone());
                Some(result)
            }
            (_, grid) => {
                game.grid = grid;
                None
            }
        };

        debug!("restored {} game at size {} ({})", game.mode, game.size, game.phase);
        Ok((game, replay))
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn size(&self) -> GridSize {
        self.size
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn grid(&self) -> Option<&Grid> {
        self.grid.as_ref()
    }

    /// 1-based round number within arcade mode
    pub fn round(&self) -> usize {
        self.size.index() + 1
    }

    /// Pick a new layout and drop the current round (free play only)
    pub fn select_size(&mut self, size: GridSize) -> Result<()> {
        if self.mode == GameMode::Arcade {
            return Err(PuzzleError::SizeLocked);
        }
        self.size = size;
        self.grid = None;
        self.set_phase(Phase::AwaitingImage);
        Ok(())
    }

    /// Start a round at the current size: build a grid with the given pixel
    /// extents and scramble it, mirroring the scramble onto `visual`.
    pub fn start_round<S: SwapSink + ?Sized>(
        &mut self,
        tile_width: usize,
        tile_height: usize,
        visual: &mut S,
    ) -> Result<Vec<Swap>> {
        self.require(Phase::AwaitingImage, "start a round")?;
        let mut grid = Grid::new(tile_width, tile_height, self.size.rows(), self.size.columns())?;
        let swaps = self.scrambler.scramble(&mut grid, visual)?;
        self.grid = Some(grid);
        self.set_phase(Phase::Playing);
        Ok(swaps)
    }

    /// Tap a cell of the puzzle in play
    pub fn tap(&mut self, at: Coordinate) -> Result<TapOutcome> {
        self.require(Phase::Playing, "tap a tile")?;
        let grid = self.grid.as_mut().ok_or(PuzzleError::InvalidPhase {
            action: "tap a tile",
            phase: self.phase,
        })?;
        let outcome = grid.tap(at)?;
        if let TapOutcome::Swapped { solved: true, .. } = outcome {
            self.set_phase(Phase::Solved);
        }
        Ok(outcome)
    }

    /// Leave the solved screen for the next round
    pub fn continue_game(&mut self) -> Result<()> {
        self.require(Phase::Solved, "continue")?;
        self.grid = None;
        match self.mode {
            GameMode::FreePlay => self.set_phase(Phase::AwaitingImage),
            GameMode::Arcade => match self.size.next() {
                Some(next) if self.round() < ARCADE_ROUNDS => {
                    self.size = next;
                    self.set_phase(Phase::AwaitingImage);
                }
                _ => self.set_phase(Phase::ArcadeComplete),
            },
        }
        Ok(())
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            mode: self.mode,
            size: self.size,
            phase: self.phase,
            grid: self.grid.clone(),
        }
    }

    fn require(&self, phase: Phase, action: &'static str) -> Result<()> {
        if self.phase == phase {
            Ok(())
        } else {
            Err(PuzzleError::InvalidPhase {
                action,
                phase: self.phase,
            })
        }
    }

    fn set_phase(&mut self, phase: Phase) {
        if self.phase != phase {
            debug!("{} game: {} -> {}", self.mode, self.phase, phase);
        }
        self.phase = phase;
    }
}

/// Reject saved states no sequence of moves can reach
fn check_consistent(mode: GameMode, size: GridSize, phase: Phase, grid: Option<&Grid>) -> Result<()> {
    let problem = match (phase, grid) {
        (Phase::Playing, None) => Some("a game in progress needs a grid"),
        (Phase::Solved, None) => Some("a solved game needs a grid"),
        (Phase::Solved, Some(grid)) if !grid.is_solved() => Some("a solved game has an unsolved grid"),
        (Phase::AwaitingImage | Phase::ArcadeComplete, Some(_)) => {
            Some("no grid is kept between rounds")
        }
        _ if mode == GameMode::FreePlay && phase == Phase::ArcadeComplete => {
            Some("free play has no arcade ending")
        }
        _ if mode == GameMode::Arcade && size.index() >= ARCADE_ROUNDS => {
            Some("size is past the last arcade round")
        }
        _ => None,
    };
    match problem {
        Some(reason) => Err(PuzzleError::InvalidSnapshot(reason.to_string())),
        None => Ok(()),
    }
}
