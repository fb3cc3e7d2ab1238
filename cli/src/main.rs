use std::io;
use std::path::PathBuf;

use anyhow::Context;
use arcade_core::{Difficulty, SeededRandom};
use clap::{Parser, Subcommand};

use crate::config::Settings;
use crate::play::{BlackjackPlay, MinesPlay, Play, SliderPlay, SudokuPlay, TilesPlay};
use crate::records::JsonLinesRecorder;

mod config;
mod logging;
mod play;
mod records;

#[derive(Parser, Debug)]
#[command(version, about = "Terminal arcade: 2048, minesweeper, sudoku, sliding puzzle and blackjack", long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Force a seed instead of random
    #[arg(short, long, global = true)]
    seed: Option<u64>,

    /// TOML settings file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Where finished games are appended
    #[arg(long, global = true)]
    records: Option<PathBuf>,

    #[command(subcommand)]
    game: Game,
}

#[derive(Subcommand, Debug, Clone, Copy)]
enum Game {
    /// Slide and merge tiles up to 2048
    Tiles,
    /// Clear a minefield
    Mines {
        #[arg(short, long)]
        difficulty: Option<Difficulty>,
    },
    /// Fill a 9x9 sudoku
    Sudoku {
        #[arg(short, long)]
        difficulty: Option<Difficulty>,
    },
    /// Sliding tile puzzle, easy is 3x3 and harder levels 4x4
    Slider {
        #[arg(short, long)]
        difficulty: Option<Difficulty>,
    },
    /// One round of blackjack against the dealer
    Blackjack,
}

impl Game {
    fn difficulty(self) -> Option<Difficulty> {
        match self {
            Self::Mines { difficulty } | Self::Sudoku { difficulty } | Self::Slider { difficulty } => {
                difficulty
            }
            Self::Tiles | Self::Blackjack => None,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logging::init(args.verbose.log_level_filter());

    let file_settings = match &args.config {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    let settings = file_settings.merge(Settings {
        difficulty: args.game.difficulty(),
        records: args.records.clone(),
        seed: args.seed,
    });

    let seed = settings.seed.unwrap_or_else(rand::random);
    log::info!("seed: {}", seed);
    let mut rng = SeededRandom::new(seed);
    let difficulty = settings.difficulty.unwrap_or_default();

    let mut recorder = JsonLinesRecorder::open(settings.records_path())?;
    log::debug!("recording to {}", recorder.path().display());

    let mut game: Box<dyn Play> = match args.game {
        Game::Tiles => Box::new(TilesPlay::new(&mut rng)),
        Game::Mines { .. } => Box::new(MinesPlay::new(difficulty)),
        Game::Sudoku { .. } => Box::new(SudokuPlay::new(difficulty, &mut rng)),
        Game::Slider { .. } => Box::new(SliderPlay::new(difficulty, &mut rng)?),
        Game::Blackjack => Box::new(BlackjackPlay::new(&mut rng)),
    };

    let stdin = io::stdin();
    let stdout = io::stdout();
    play::run(
        game.as_mut(),
        stdin.lock(),
        stdout.lock(),
        &mut rng,
        &mut recorder,
    )
    .context("playing")?;

    Ok(())
}
