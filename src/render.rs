//! The drawing primitives the game needs, and how a frame is put together
//! from them. Coordinates are board pixels.

use crate::game::GameState;
use crate::geometry::Rect;

/// What a rectangle depicts; the surface picks the actual colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Paint {
    Board,
    BoardEdge,
    SnakeBody,
    SnakeEdge,
    Food,
    DeadSnake,
}

pub trait Surface {
    fn clear(&mut self, rect: Rect);
    fn fill_rect(&mut self, rect: Rect, paint: Paint);
    fn stroke_rect(&mut self, rect: Rect, paint: Paint);
}

pub fn draw_frame<S: Surface + ?Sized>(state: &GameState, surface: &mut S) {
    let grid = state.grid();
    let bounds = grid.bounds();

    surface.clear(bounds);
    surface.fill_rect(bounds, Paint::Board);
    surface.stroke_rect(bounds, Paint::BoardEdge);

    surface.fill_rect(grid.cell_rect(state.food()), Paint::Food);

    for seg in state.snake().body() {
        let rect = grid.cell_rect(*seg);
        surface.fill_rect(rect, Paint::SnakeBody);
        surface.stroke_rect(rect, Paint::SnakeEdge);
    }
}

pub fn draw_dead<S: Surface + ?Sized>(state: &GameState, surface: &mut S) {
    for seg in state.snake().body() {
        surface.fill_rect(state.grid().cell_rect(*seg), Paint::DeadSnake);
    }
}


#[cfg(test)]
mod tests {
    use super::recording::{Call, RecordingSurface};
    use super::*;
    use crate::geometry::{Grid, Point};
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn frame_draws_board_then_food_then_snake() {
        let grid = Grid::new(10, 100, 60);
        let mut rng = StdRng::seed_from_u64(1);
        let state = GameState::new(grid, 3, &mut rng);
        let food = state.food();

        let mut surface = RecordingSurface::default();
        draw_frame(&state, &mut surface);

        let board = Rect::new(0, 0, 100, 60);
        let mut expected = vec![
            Call::Clear(board),
            Call::Fill(board, Paint::Board),
            Call::Stroke(board, Paint::BoardEdge),
            Call::Fill(Rect::new(food.x, food.y, 10, 10), Paint::Food),
        ];
        for &(x, y) in &[(50, 30), (40, 30), (30, 30)] {
            let cell = grid.cell_rect(Point::new(x, y));
            expected.push(Call::Fill(cell, Paint::SnakeBody));
            expected.push(Call::Stroke(cell, Paint::SnakeEdge));
        }

        assert_eq!(surface.calls, expected);
    }

    #[test]
    fn dead_snake_repaints_every_segment() {
        let grid = Grid::new(10, 100, 100);
        let mut rng = StdRng::seed_from_u64(2);
        let state = GameState::new(grid, 5, &mut rng);

        let mut surface = RecordingSurface::default();
        draw_dead(&state, &mut surface);

        assert_eq!(surface.calls.len(), 5);
        assert!(surface.calls.iter().all(|c| matches!(c, Call::Fill(_, Paint::DeadSnake))));
    }
}
