use std::{fmt, thread::sleep};

use anyhow::{Context, Result};
use rand::Rng;
use tracing::{debug, info};

use crate::config::Settings;
use crate::food::create_food;
use crate::geometry::{Grid, Point};
use crate::input::{self, is_ctrl_c};
use crate::leaderboard::Leaderboard;
use crate::render::{draw_dead, draw_frame};
use crate::snake::{Direction, MoveResult, Snake};
use crate::store::KeyValueStore;
use crate::term::{Console, Prompt};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collision {
    SelfBite,
    Wall,
}

impl fmt::Display for Collision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Collision::SelfBite => f.write_str("You bit yourself!"),
            Collision::Wall => f.write_str("You hit the wall!"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Running,
    /// Terminal: a new run needs a new process.
    GameOver(Collision),
}

/// Everything that changes while a run is in progress.
#[derive(Debug, Clone)]
pub struct GameState {
    grid: Grid,
    snake: Snake,
    food: Point,
    status: Status,
}

impl GameState {
    pub fn new<R: Rng + ?Sized>(grid: Grid, initial_length: usize, rng: &mut R) -> Self {
        let snake = Snake::new(grid.initial_head(), initial_length, Direction::Right, grid.cell());
        let food = create_food(&grid, rng);
        GameState { grid, snake, food, status: Status::Running }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn snake_mut(&mut self) -> &mut Snake {
        &mut self.snake
    }

    pub fn food(&self) -> Point {
        self.food
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn score(&self) -> u32 {
        self.snake.len() as u32
    }

    /// Looks for a collision and, if there is one, ends the run.
    pub fn check_game_over(&mut self) -> Option<Collision> {
        if let Status::GameOver(c) = self.status {
            return Some(c);
        }

        let collision = if self.snake.bites_itself() {
            Collision::SelfBite
        } else if self.snake.hits_wall(&self.grid) {
            Collision::Wall
        } else {
            return None;
        };

        self.status = Status::GameOver(collision);
        Some(collision)
    }

    /// Moves the snake one step. Returns whether it ate, in which case new
    /// food has already been placed.
    pub fn advance<R: Rng + ?Sized>(&mut self, rng: &mut R) -> bool {
        if self.status != Status::Running {
            return false;
        }

        match self.snake.advance(self.food) {
            MoveResult::Grew => {
                self.food = create_food(&self.grid, rng);
                debug!(length = self.snake.len(), food = ?self.food, "ate food");
                true
            }
            MoveResult::Moved => false,
        }
    }
}

#[cfg(test)]
impl GameState {
    pub(crate) fn with_snake(grid: Grid, snake: Snake, food: Point) -> Self {
        GameState { grid, snake, food, status: Status::Running }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Finished { score: u32 },
    Quit,
}

pub struct SnakeGame<S> {
    settings: Settings,
    leaderboard: Leaderboard<S>,
}

impl<S: KeyValueStore> SnakeGame<S> {
    pub fn new(settings: Settings, leaderboard: Leaderboard<S>) -> Self {
        SnakeGame { settings, leaderboard }
    }

    /// Returns false if the player asked to quit instead of starting.
    pub fn show_intro<T: Console>(&mut self, term: &mut T) -> Result<bool> {
        term.show_leaderboard(&self.leaderboard.display_lines())?;
        term.show_message(&[
            "Arrow keys or WASD to move",
            "CTRL+C to quit",
            "",
            "Press any key to begin"
        ])?;

        if is_ctrl_c(&term.read_key_blocking()?) {
            return Ok(false);
        }

        term.hide_message()?;
        Ok(true)
    }

    pub fn play<T: Console>(&mut self, term: &mut T) -> Result<Outcome> {
        self.play_with(term, &mut rand::thread_rng())
    }

    fn play_with<T: Console, R: Rng + ?Sized>(&mut self, term: &mut T, rng: &mut R) -> Result<Outcome> {
        let mut state = GameState::new(self.settings.grid, self.settings.initial_length, rng);

        draw_frame(&state, term);
        term.flush()?;

        let collision = loop {
            if let Some(collision) = state.check_game_over() {
                break collision;
            }

            // One tick at a time: the next one is only scheduled once this
            // frame is out, so a slow frame just delays it.
            sleep(self.settings.tick);

            for key_ev in term.read_key_events_queue()? {
                if is_ctrl_c(&key_ev) {
                    info!(score = state.score(), "quit before game over");
                    return Ok(Outcome::Quit);
                }
                if input::steer(state.snake_mut(), key_ev.code) {
                    debug!(direction = ?state.snake().get_direction(), "turned");
                }
            }

            state.advance(rng);
            draw_frame(&state, term);
            term.flush()?;
        };

        self.game_over(term, &state, collision)
    }

    ///////////////////////////////////////////////////////////////////////////

    fn game_over<T: Console>(&mut self, term: &mut T, state: &GameState, collision: Collision) -> Result<Outcome> {
        debug_assert_eq!(state.status(), Status::GameOver(collision));
        let score = state.score();
        info!(score, cause = ?collision, "game over");

        draw_dead(state, term);
        term.flush()?;

        let name = match term.prompt("Game Over! Enter your name:")? {
            Prompt::Entered(name) => name,
            Prompt::Skipped => String::new(),
            Prompt::Quit => {
                info!(score, "quit at the name prompt");
                return Ok(Outcome::Quit);
            }
        };
        self.leaderboard
            .record(score, &name)
            .context("failed to save high score")?;
        term.show_leaderboard(&self.leaderboard.display_lines())?;

        term.show_message(&[
            "Game over!",
            &*collision.to_string(),
            &*format!("Score: {}", score),
            "",
            "Press any key to exit"
        ])?;
        term.read_key_blocking()?;

        Ok(Outcome::Finished { score })
    }
}
