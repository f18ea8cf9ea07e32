mod app;
mod render;
mod rng;

use app::{App, AppAction};
use clap::{Parser, Subcommand};
use picto_core::{reconcile, GameMode, Grid, GridSize, Scrambler};
use rng::RandSource;
use std::error::Error;
use std::fs;
use std::io::{self, BufRead};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "picto", version, about = "Swap-style picture puzzle in the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Play in the terminal; each tile is shown as a letter
    Play {
        /// Grid size as ROWSxCOLUMNS (free play only)
        #[arg(long, default_value = "3x2")]
        size: GridSize,
        /// Play the three arcade rounds instead of free play
        #[arg(long)]
        arcade: bool,
        /// Seed for reproducible scrambles
        #[arg(long)]
        seed: Option<u64>,
        /// Continue the saved game
        #[arg(long)]
        resume: bool,
        /// Where to save and load the game
        #[arg(long)]
        save_file: Option<PathBuf>,
    },
    /// Scramble a fresh grid and print the result
    Scramble {
        #[arg(long, default_value = "3x3")]
        size: GridSize,
        #[arg(long)]
        seed: Option<u64>,
        /// Print the grid snapshot as JSON instead of the board
        #[arg(long)]
        json: bool,
    },
    /// Replay a saved grid snapshot onto a solved board
    Unsolve {
        /// JSON grid snapshot, as printed by `picto scramble --json`
        file: PathBuf,
    },
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Play {
            size,
            arcade,
            seed,
            resume,
            save_file,
        } => play(size, arcade, seed, resume, save_file),
        Command::Scramble { size, seed, json } => scramble(size, seed, json),
        Command::Unsolve { file } => unsolve(file),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn play(
    size: GridSize,
    arcade: bool,
    seed: Option<u64>,
    resume: bool,
    save_file: Option<PathBuf>,
) -> Result<(), Box<dyn Error>> {
    let save_path = save_file.unwrap_or_else(App::default_save_path);
    let mut app = if resume {
        App::resume(seed, save_path)?
    } else {
        let mode = if arcade { GameMode::Arcade } else { GameMode::FreePlay };
        App::new(mode, size, seed, save_path)?
    };

    let mut stdout = io::stdout();
    render::render(&mut stdout, &app)?;
    for line in io::stdin().lock().lines() {
        match app.handle_line(&line?) {
            AppAction::Continue => render::render(&mut stdout, &app)?,
            AppAction::Quit => break,
        }
    }
    println!();
    Ok(())
}

fn scramble(size: GridSize, seed: Option<u64>, json: bool) -> Result<(), Box<dyn Error>> {
    let mut grid = Grid::new(64, 64, size.rows(), size.columns())?;
    let mut picture = render::letters(size.rows(), size.columns())?;
    let swaps = Scrambler::with_rng(RandSource::new(seed)).scramble(&mut grid, &mut picture)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&grid)?);
        return Ok(());
    }

    for (i, swap) in swaps.iter().enumerate() {
        println!("{:>3}. {}", i + 1, swap);
    }
    println!();
    render::board(&mut io::stdout(), &picture, None)?;
    if grid.is_solved() {
        println!("(the swaps cancelled out; the grid is solved)");
    }
    Ok(())
}

fn unsolve(file: PathBuf) -> Result<(), Box<dyn Error>> {
    let target = Grid::from_json(&fs::read_to_string(&file)?)?;
    let mut picture = render::letters(target.rows(), target.columns())?;
    let result = reconcile(&target, &mut picture)?;

    for (i, swap) in result.swaps.iter().enumerate() {
        println!("{:>3}. {}", i + 1, swap);
    }
    println!(
        "\n{} swaps kept, {} pivots, {} trial swaps\n",
        result.swaps.len(),
        result.outer_iterations,
        result.comparisons
    );
    render::board(&mut io::stdout(), &picture, None)?;
    Ok(())
}
