use rand::Rng;

use crate::geometry::{Grid, Point};

/// Picks a grid-aligned spot for the next piece of food. Cells under the
/// snake are not excluded, so food can land on the body.
pub fn create_food<R: Rng + ?Sized>(grid: &Grid, rng: &mut R) -> Point {
    let food = Point::new(
        random_coord(rng, grid.width() - grid.cell(), grid.cell()),
        random_coord(rng, grid.height() - grid.cell(), grid.cell()),
    );
    debug_assert!(grid.contains(food) && grid.is_aligned(food));
    food
}

// Uniform over [0, max), snapped to the nearest multiple of `cell`.
fn random_coord<R: Rng + ?Sized>(rng: &mut R, max: i32, cell: i32) -> i32 {
    let raw = rng.gen::<f64>() * max.max(0) as f64;
    (raw / cell as f64).round() as i32 * cell
}
