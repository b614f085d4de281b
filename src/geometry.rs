/// A position on the board, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Point { x, y }
    }

    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Point { x: self.x + dx, y: self.y + dy }
    }
}

/// Axis-aligned rectangle, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Rect { x, y, w, h }
    }
}

/// The playing field: a pixel-sized board divided into square cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    cell: i32,
    width: i32,
    height: i32,
}

impl Grid {
    pub fn new(cell: i32, width: i32, height: i32) -> Self {
        debug_assert!(cell > 0 && width > 0 && height > 0);
        Grid { cell, width, height }
    }

    pub fn cell(&self) -> i32 {
        self.cell
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Number of cell columns needed to cover the board.
    pub fn columns(&self) -> i32 {
        (self.width + self.cell - 1) / self.cell
    }

    /// Number of cell rows needed to cover the board.
    pub fn rows(&self) -> i32 {
        (self.height + self.cell - 1) / self.cell
    }

    /// The cell nearest the board center. Always grid-aligned, whatever the
    /// parity of the board dimensions.
    pub fn initial_head(&self) -> Point {
        Point::new(
            self.width / 2 / self.cell * self.cell,
            self.height / 2 / self.cell * self.cell,
        )
    }

    /// Half-open bounds check: `[0, width) x [0, height)`.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= 0 && p.x < self.width && p.y >= 0 && p.y < self.height
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(0, 0, self.width, self.height)
    }

    pub fn cell_rect(&self, p: Point) -> Rect {
        Rect::new(p.x, p.y, self.cell, self.cell)
    }

    pub fn is_aligned(&self, p: Point) -> bool {
        p.x % self.cell == 0 && p.y % self.cell == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_head_is_centered_on_square_board() {
        let grid = Grid::new(10, 400, 400);
        assert_eq!(grid.initial_head(), Point::new(200, 200));
    }

    #[test]
    fn initial_head_stays_aligned_on_odd_board() {
        let grid = Grid::new(10, 415, 237);
        let head = grid.initial_head();
        assert_eq!(head, Point::new(200, 110));
        assert!(grid.is_aligned(head));
    }

    #[test]
    fn contains_is_half_open() {
        let grid = Grid::new(10, 400, 300);
        assert!(grid.contains(Point::new(0, 0)));
        assert!(grid.contains(Point::new(390, 290)));
        assert!(!grid.contains(Point::new(400, 0)));
        assert!(!grid.contains(Point::new(0, 300)));
        assert!(!grid.contains(Point::new(-10, 0)));
        assert!(!grid.contains(Point::new(0, -10)));
    }

    #[test]
    fn columns_round_up_partial_cells() {
        let grid = Grid::new(10, 405, 400);
        assert_eq!(grid.columns(), 41);
        assert_eq!(grid.rows(), 40);
    }
}
