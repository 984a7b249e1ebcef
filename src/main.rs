//! Headless 2048 runner (default binary).
//!
//! Reads one command per line from stdin and prints the board after each:
//! `up`/`down`/`left`/`right` (or `w`/`s`/`a`/`d`), `continue`, `restart`, `quit`.
//! Progress and the high score are saved to a JSON file between commands.

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use env_logger::Env;
use log::{info, warn};

use twenty48::core::{GameManager, RandomSpawner, TileSpawner};
use twenty48::store::{
    resume_or_new, save_progress, GameStore, HighScoreTracker, JsonFileStore, MemoryStore,
    RunnerConfig,
};
use twenty48::types::Direction;

enum Command {
    Move(Direction),
    Continue,
    Restart,
    Quit,
}

fn parse_command(line: &str) -> Option<Command> {
    if let Some(dir) = Direction::from_str(line) {
        return Some(Command::Move(dir));
    }
    match line.trim().to_lowercase().as_str() {
        "continue" | "c" => Some(Command::Continue),
        "restart" | "r" => Some(Command::Restart),
        "quit" | "q" | "exit" => Some(Command::Quit),
        _ => None,
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let config = RunnerConfig::from_env();
    let seed = config.seed.unwrap_or_else(rand::random);

    let mut store: Box<dyn GameStore> = match &config.save_path {
        Some(path) => {
            info!("saving to {}", path.display());
            Box::new(JsonFileStore::new(path))
        }
        None => {
            info!("persistence disabled");
            Box::new(MemoryStore::new())
        }
    };

    let spawner = RandomSpawner::with_probability(seed, config.game.four_probability);
    info!("spawner seed {} (set TWENTY48_SEED to replay)", spawner.seed());
    let mut tracker = HighScoreTracker::load(store.as_ref());
    let mut game = resume_or_new(store.as_mut(), config.game, spawner)
        .context("failed to start game")?;

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    print_board(&mut stdout, &game, &tracker)?;

    for line in stdin.lock().lines() {
        let line = line.context("failed to read stdin")?;
        if line.trim().is_empty() {
            continue;
        }

        match parse_command(&line) {
            Some(Command::Move(dir)) => {
                game.make_move(dir);
            }
            Some(Command::Continue) => {
                game.continue_playing();
            }
            Some(Command::Restart) => game.restart(),
            Some(Command::Quit) => break,
            None => {
                writeln!(stdout, "unknown command: {}", line.trim())?;
                continue;
            }
        }

        if let Err(err) = save_progress(store.as_mut(), &mut tracker, &game) {
            warn!("failed to save progress: {:#}", err);
        }
        print_board(&mut stdout, &game, &tracker)?;
    }

    Ok(())
}

fn print_board<S: TileSpawner>(
    out: &mut impl Write,
    game: &GameManager<S>,
    tracker: &HighScoreTracker,
) -> Result<()> {
    write!(out, "{}", game)?;
    writeln!(out, "score: {}  best: {}", game.score(), tracker.best().max(game.score()))?;
    if game.over() {
        writeln!(out, "game over (restart to play again)")?;
    } else if game.won() && !game.keep_playing() {
        writeln!(out, "you win! (continue or restart)")?;
    }
    out.flush()?;
    Ok(())
}
