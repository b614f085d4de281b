use std::collections::VecDeque;

use crate::geometry::{Grid, Point};
use Direction::*;

/// Segments closer to the head than this can't meet it, whatever the turn.
const SELF_BITE_START: usize = 4;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right
}

impl Direction {
    pub fn opposite(self) -> Direction {
        match self {
            Up => Down,
            Down => Up,
            Left => Right,
            Right => Left,
        }
    }

    /// Movement per step for a grid with the given cell size.
    pub fn vector(self, cell: i32) -> (i32, i32) {
        match self {
            Up => (0, -cell),
            Down => (0, cell),
            Left => (-cell, 0),
            Right => (cell, 0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveResult {
    Moved,
    Grew,
}

#[derive(Debug, Clone)]
pub struct Snake {
    // Front is the head.
    body: VecDeque<Point>,
    direction: Direction,
    cell: i32,
}

impl Snake {
    pub fn new(head: Point, length: usize, direction: Direction, cell: i32) -> Self {
        let (dx, dy) = direction.vector(cell);

        let body = (0..length.max(1) as i32)
            .map(|i| head.offset(-dx * i, -dy * i))
            .collect();
        Snake { body, direction, cell }
    }

    pub fn body(&self) -> impl Iterator<Item = &Point> + '_ {
        self.body.iter()
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn head(&self) -> Point {
        self.body[0]
    }

    /// Pushes a new head one step along the current direction. The tail is
    /// only dropped when the new head missed `food`, so eating grows the
    /// snake by one.
    pub fn advance(&mut self, food: Point) -> MoveResult {
        let (dx, dy) = self.direction.vector(self.cell);
        let new_head = self.head().offset(dx, dy);
        self.body.push_front(new_head);

        if new_head == food {
            MoveResult::Grew
        } else {
            self.body.pop_back();
            MoveResult::Moved
        }
    }

    /// Turns the snake unless the request would reverse it. Returns whether
    /// the direction was applied.
    pub fn set_direction(&mut self, new_direction: Direction) -> bool {
        if new_direction == self.direction.opposite() {
            return false;
        }
        self.direction = new_direction;
        true
    }

    pub fn get_direction(&self) -> Direction {
        self.direction
    }

    pub fn bites_itself(&self) -> bool {
        let head = self.head();
        self.body.iter().skip(SELF_BITE_START).any(|seg| *seg == head)
    }

    pub fn hits_wall(&self, grid: &Grid) -> bool {
        !grid.contains(self.head())
    }
}

#[cfg(test)]
impl Snake {
    pub(crate) fn from_segments(segments: &[Point], direction: Direction, cell: i32) -> Self {
        assert!(!segments.is_empty());
        Snake { body: segments.iter().copied().collect(), direction, cell }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pts(raw: &[(i32, i32)]) -> Vec<Point> {
        raw.iter().map(|&(x, y)| Point::new(x, y)).collect()
    }

    #[test]
    fn new_snake_trails_behind_head() {
        let snake = Snake::new(Point::new(200, 200), 5, Right, 10);
        let body: Vec<Point> = snake.body().copied().collect();
        assert_eq!(
            body,
            pts(&[(200, 200), (190, 200), (180, 200), (170, 200), (160, 200)])
        );
        assert_eq!(snake.get_direction().vector(10), (10, 0));
    }

    #[test]
    fn advance_without_food_keeps_length() {
        let mut snake = Snake::new(Point::new(50, 50), 5, Right, 10);
        let res = snake.advance(Point::new(0, 0));

        assert_eq!(res, MoveResult::Moved);
        assert_eq!(snake.len(), 5);
        assert_eq!(snake.body().last(), Some(&Point::new(20, 50)));
        assert_eq!(snake.head(), Point::new(60, 50));
    }

    #[test]
    fn advance_onto_food_grows_by_one() {
        let mut snake = Snake::new(Point::new(50, 50), 5, Right, 10);
        let res = snake.advance(Point::new(60, 50));

        assert_eq!(res, MoveResult::Grew);
        assert_eq!(snake.len(), 6);
        assert_eq!(snake.body().last(), Some(&Point::new(10, 50)));
    }

    #[test]
    fn reversal_is_rejected() {
        let mut snake = Snake::new(Point::new(50, 50), 3, Right, 10);
        assert!(!snake.set_direction(Left));
        assert_eq!(snake.get_direction(), Right);

        assert!(snake.set_direction(Right));
        assert!(snake.set_direction(Up));
        assert!(!snake.set_direction(Down));
        assert_eq!(snake.get_direction(), Up);
    }

    #[test]
    fn self_bite_ignores_first_four_segments() {
        // Head coincides with index 2: too close to count.
        let near = Snake::from_segments(&pts(&[(0, 0), (10, 0), (0, 0), (0, 10), (10, 10)]), Up, 10);
        assert!(!near.bites_itself());

        let far = Snake::from_segments(
            &pts(&[(10, 10), (20, 10), (20, 20), (10, 20), (10, 10), (0, 10)]),
            Up,
            10,
        );
        assert!(far.bites_itself());
    }

    #[test]
    fn wall_hits_match_half_open_bounds() {
        let grid = Grid::new(10, 100, 80);
        let inside = Snake::from_segments(&pts(&[(90, 70)]), Right, 10);
        assert!(!inside.hits_wall(&grid));

        for &(x, y) in &[(100, 0), (0, 80), (-10, 0), (0, -10)] {
            let out = Snake::from_segments(&pts(&[(x, y)]), Right, 10);
            assert!(out.hits_wall(&grid), "({}, {}) should be out", x, y);
        }
    }

    #[test]
    fn running_straight_into_wall() {
        let grid = Grid::new(10, 100, 100);
        let mut snake = Snake::new(grid.initial_head(), 5, Right, 10);
        let mut steps = 0;
        while !snake.hits_wall(&grid) {
            snake.advance(Point::new(-1, -1));
            steps += 1;
        }
        assert_eq!(steps, 5);
        assert_eq!(snake.head(), Point::new(100, 50));
    }
}
