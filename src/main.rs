mod config;
mod food;
mod game;
mod geometry;
mod input;
mod leaderboard;
mod render;
mod snake;
mod store;
mod term;

use std::{fs::File, sync::Mutex};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::game::{Outcome, SnakeGame};
use crate::leaderboard::Leaderboard;
use crate::store::FileStore;
use crate::term::TermManager;

fn main() -> Result<()> {
    let config = Config::parse();
    init_tracing(&config)?;

    let term_size = term::terminal_size().context("cannot read terminal size")?;
    let settings = config.resolve(term_size)?;
    info!(
        width = settings.grid.width(),
        height = settings.grid.height(),
        cell = settings.grid.cell(),
        tick_ms = config.tick_ms,
        "board ready"
    );

    let store = FileStore::new(&config.scores_file);
    let leaderboard = Leaderboard::load(store, config.default_name.as_str())
        .with_context(|| format!("cannot load high scores from {}", config.scores_file.display()))?;

    let mut term = TermManager::new(settings.grid)?;
    term.setup()?;

    let mut game = SnakeGame::new(settings, leaderboard);
    let result = run(&mut game, &mut term);

    // Always try to restore terminal state.
    let outcome = finish(result, term.restore())?;
    if let Outcome::Finished { score } = outcome {
        println!("Final score: {}", score);
    }
    Ok(())
}

fn run(game: &mut SnakeGame<FileStore>, term: &mut TermManager) -> Result<Outcome> {
    if !game.show_intro(term)? {
        return Ok(Outcome::Quit);
    }
    game.play(term)
}

/// The game's own error wins; a failed restore is reported when the game
/// itself went fine.
fn finish(result: Result<Outcome>, restored: crossterm::Result<()>) -> Result<Outcome> {
    if let Err(e) = &restored {
        warn!(error = %e, "failed to restore terminal");
    }

    let outcome = result?;
    restored.context("failed to restore terminal")?;
    Ok(outcome)
}

/// Logs only go to `--log-file`: stdout and stderr share the tty with the
/// game screen, so without a file nothing is logged.
fn init_tracing(config: &Config) -> Result<()> {
    let path = match &config.log_file {
        Some(path) => path,
        None => return Ok(()),
    };

    let file = File::create(path)
        .with_context(|| format!("cannot create log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init();

    Ok(())
}
