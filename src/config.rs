use std::{path::PathBuf, time::Duration};

use clap::Parser;
use thiserror::Error;

use crate::geometry::Grid;
use crate::term::{board_fits, max_board_cells};

#[derive(Parser, Debug, Clone)]
#[command(name = "snake", version, about = "Snake in the terminal, with a local top-5 leaderboard")]
pub struct Config {
    /// Board width in pixels; fills the terminal when omitted.
    #[arg(long)]
    pub width: Option<i32>,

    /// Board height in pixels; fills the terminal when omitted.
    #[arg(long)]
    pub height: Option<i32>,

    /// Side of one board cell, in pixels.
    #[arg(long, default_value_t = 10)]
    pub cell_size: i32,

    /// Milliseconds between two game ticks.
    #[arg(long, default_value_t = 100)]
    pub tick_ms: u64,

    #[arg(long, default_value_t = 5)]
    pub initial_length: usize,

    /// Where the high scores are kept.
    #[arg(long, env = "SNAKE_SCORES_FILE", default_value = "snake_scores.json")]
    pub scores_file: PathBuf,

    /// Name recorded when the player leaves the prompt blank.
    #[arg(long, default_value = "Anonymous")]
    pub default_name: String,

    /// Write logs to this file. Nothing is logged without it.
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("cell size must be positive, got {0}")]
    CellSize(i32),
    #[error("board must be at least one cell in each direction, got {width}x{height}")]
    BoardTooSmall { width: i32, height: i32 },
    #[error("initial length must be between 1 and {max} on this board, got {length}")]
    InitialLength { length: usize, max: usize },
    #[error("tick interval must be positive")]
    TickInterval,
    #[error("a {columns}x{rows} cell board does not fit a {term_width}x{term_height} terminal")]
    DoesNotFit { columns: i32, rows: i32, term_width: u16, term_height: u16 },
}

/// Validated game parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    pub grid: Grid,
    pub tick: Duration,
    pub initial_length: usize,
}

impl Config {
    /// Checks the options and sizes the board against a terminal of
    /// `term_size` (columns, rows).
    pub fn resolve(&self, term_size: (u16, u16)) -> Result<Settings, ConfigError> {
        let cell = self.cell_size;
        if cell <= 0 {
            return Err(ConfigError::CellSize(cell));
        }
        if self.tick_ms == 0 {
            return Err(ConfigError::TickInterval);
        }

        let (max_cols, max_rows) = max_board_cells(term_size);
        let width = self.width.unwrap_or(max_cols * cell);
        let height = self.height.unwrap_or(max_rows * cell);
        if width < cell || height < cell {
            return Err(ConfigError::BoardTooSmall { width, height });
        }

        let grid = Grid::new(cell, width, height);
        if !board_fits(&grid, term_size) {
            return Err(ConfigError::DoesNotFit {
                columns: grid.columns(),
                rows: grid.rows(),
                term_width: term_size.0,
                term_height: term_size.1,
            });
        }

        // The body has to fit on the board, which also keeps its length in
        // coordinate range.
        let max = grid.columns() as usize * grid.rows() as usize;
        if self.initial_length == 0 || self.initial_length > max {
            return Err(ConfigError::InitialLength { length: self.initial_length, max });
        }

        Ok(Settings {
            grid,
            tick: Duration::from_millis(self.tick_ms),
            initial_length: self.initial_length,
        })
    }
}
