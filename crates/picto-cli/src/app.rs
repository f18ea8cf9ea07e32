use crate::render::letters;
use crate::rng::RandSource;
use log::{info, warn};
use picto_core::{Coordinate, Game, GameMode, GameSnapshot, GridSize, Mosaic, Phase, Scrambler, TapOutcome};
use std::fs;
use std::path::{Path, PathBuf};

/// Pixel extent of one tile; the terminal board never maps pixels, but the
/// saved grid carries the value like any other front end would
const TILE_PX: usize = 64;

/// Result of handling an input line
pub enum AppAction {
    Continue,
    Quit,
}

/// The terminal game: engine state plus the board the player sees
pub struct App {
    game: Game<RandSource>,
    picture: Mosaic<char>,
    save_path: PathBuf,
    message: Option<String>,
}

impl App {
    pub fn new(mode: GameMode, size: GridSize, seed: Option<u64>, save_path: PathBuf) -> picto_core::Result<Self> {
        let mut game = Game::with_scrambler(mode, Scrambler::with_rng(RandSource::new(seed)));
        if mode == GameMode::FreePlay {
            game.select_size(size)?;
        }
        let picture = letters(game.size().rows(), game.size().columns())?;
        Ok(Self {
            game,
            picture,
            save_path,
            message: None,
        })
    }

    /// Resume the game stored at `save_path`
    pub fn resume(seed: Option<u64>, save_path: PathBuf) -> Result<Self, Box<dyn std::error::Error>> {
        let json = fs::read_to_string(&save_path)?;
        let snapshot = GameSnapshot::from_json(&json)?;
        let mut picture = letters(snapshot.size.rows(), snapshot.size.columns())?;
        let (game, replay) = Game::restore_with(snapshot, Scrambler::with_rng(RandSource::new(seed)), &mut picture)?;

        let message = replay.map(|replay| {
            format!(
                "Restored puzzle: replayed {} swaps ({} trials)",
                replay.swaps.len(),
                replay.comparisons
            )
        });
        info!("resumed game from {}", save_path.display());
        Ok(Self {
            game,
            picture,
            save_path,
            message: message.or_else(|| Some("Game loaded".to_string())),
        })
    }

    /// Default save file location
    pub fn default_save_path() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("picto_save.json")
    }

    pub fn game(&self) -> &Game<RandSource> {
        &self.game
    }

    pub fn picture(&self) -> &Mosaic<char> {
        &self.picture
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn show_message(&mut self, msg: &str) {
        self.message = Some(msg.to_string());
    }

    /// Handle one line of player input
    pub fn handle_line(&mut self, line: &str) -> AppAction {
        self.message = None;
        let words: Vec<&str> = line.split_whitespace().collect();
        match words.as_slice() {
            ["quit"] | ["q"] => return AppAction::Quit,
            ["save"] => self.save_game(),
            ["size", size] => self.select_size(size),
            ["next"] => {
                if let Err(e) = self.game.continue_game() {
                    self.show_message(&e.to_string());
                }
            }
            [] if self.game.phase() == Phase::AwaitingImage => self.start_round(),
            [row, col] => match (row.parse::<usize>(), col.parse::<usize>()) {
                (Ok(row), Ok(col)) => self.tap(Coordinate::new(row, col)),
                _ => self.show_message("Expected '<row> <col>'"),
            },
            _ => self.show_message("Commands: <row> <col>, next, size RxC, save, quit"),
        }
        AppAction::Continue
    }

    fn start_round(&mut self) {
        let size = self.game.size();
        let result = letters(size.rows(), size.columns()).and_then(|mut picture| {
            self.game.start_round(TILE_PX, TILE_PX, &mut picture)?;
            Ok(picture)
        });
        match result {
            Ok(picture) => self.picture = picture,
            Err(e) => self.show_message(&e.to_string()),
        }
    }

    fn select_size(&mut self, size: &str) {
        match size.parse::<GridSize>() {
            Ok(size) => {
                if let Err(e) = self.game.select_size(size) {
                    self.show_message(&e.to_string());
                }
            }
            Err(e) => self.show_message(&e),
        }
    }

    fn tap(&mut self, at: Coordinate) {
        match self.game.tap(at) {
            Ok(TapOutcome::Swapped { swap, solved }) => {
                if let Err(e) = self.picture.swap(swap.first, swap.second) {
                    warn!("board out of sync: {}", e);
                }
                if solved {
                    self.show_message("Puzzle Solved!");
                }
            }
            Ok(TapOutcome::Marked(_)) | Ok(TapOutcome::Unmarked(_)) => {}
            Err(e) => self.show_message(&e.to_string()),
        }
    }

    /// Save the current game
    fn save_game(&mut self) {
        match write_snapshot(&self.save_path, &self.game.snapshot()) {
            Ok(()) => self.show_message("Game saved"),
            Err(e) => {
                warn!("failed to save to {}: {}", self.save_path.display(), e);
                self.show_message("Failed to save");
            }
        }
    }
}

fn write_snapshot(path: &Path, snapshot: &GameSnapshot) -> Result<(), Box<dyn std::error::Error>> {
    fs::write(path, snapshot.to_json()?)?;
    Ok(())
}
