//! Keyboard handling: arrow keys (and WASD) steer the snake.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::snake::{Direction, Snake};

pub fn direction_for_key(code: KeyCode) -> Option<Direction> {
    match code {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Some(Direction::Up),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Some(Direction::Down),
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Direction::Left),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(Direction::Right),
        _ => None,
    }
}

/// Applies a key press to the snake's heading. Only the direction is ever
/// touched; unknown keys and reversals are no-ops.
pub fn steer(snake: &mut Snake, code: KeyCode) -> bool {
    match direction_for_key(code) {
        Some(dir) => snake.set_direction(dir),
        None => false,
    }
}

pub fn is_ctrl_c(ev: &KeyEvent) -> bool {
    matches!(ev, KeyEvent { code: KeyCode::Char('c'), modifiers } if modifiers.contains(KeyModifiers::CONTROL))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;
    use crate::snake::Direction::*;

    fn snake_going(dir: Direction) -> Snake {
        Snake::new(Point::new(100, 100), 5, dir, 10)
    }

    #[test]
    fn arrow_keys_map_to_directions() {
        assert_eq!(direction_for_key(KeyCode::Up), Some(Up));
        assert_eq!(direction_for_key(KeyCode::Down), Some(Down));
        assert_eq!(direction_for_key(KeyCode::Left), Some(Left));
        assert_eq!(direction_for_key(KeyCode::Right), Some(Right));
        assert_eq!(direction_for_key(KeyCode::Char('a')), Some(Left));
        assert_eq!(direction_for_key(KeyCode::Enter), None);
        assert_eq!(direction_for_key(KeyCode::Char('x')), None);
    }

    #[test]
    fn opposite_key_never_reverses() {
        let cases = [(Right, KeyCode::Left), (Left, KeyCode::Right), (Up, KeyCode::Down), (Down, KeyCode::Up)];

        for &(dir, key) in &cases {
            let mut snake = snake_going(dir);
            assert!(!steer(&mut snake, key));
            assert_eq!(snake.get_direction(), dir);
        }
    }

    #[test]
    fn same_direction_is_accepted() {
        let mut snake = snake_going(Right);
        assert!(steer(&mut snake, KeyCode::Right));
        assert_eq!(snake.get_direction(), Right);
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let mut snake = snake_going(Up);
        assert!(!steer(&mut snake, KeyCode::Tab));
        assert_eq!(snake.get_direction(), Up);
    }

    #[test]
    fn key_sequence_applies_against_current_heading() {
        // Two quick turns within one tick can end up opposite the body; the
        // neck is exempt from self-bite so this is not fatal.
        let mut snake = snake_going(Right);
        assert!(steer(&mut snake, KeyCode::Up));
        assert!(steer(&mut snake, KeyCode::Left));
        assert_eq!(snake.get_direction(), Left);

        let before = snake.len();
        snake.advance(Point::new(-1, -1));
        assert_eq!(snake.len(), before);
        assert!(!snake.bites_itself());
    }

    #[test]
    fn ctrl_c_is_detected() {
        let ev = KeyEvent { code: KeyCode::Char('c'), modifiers: KeyModifiers::CONTROL };
        assert!(is_ctrl_c(&ev));
        let plain = KeyEvent { code: KeyCode::Char('c'), modifiers: KeyModifiers::NONE };
        assert!(!is_ctrl_c(&plain));
    }
}
