//! Stateless position queries over a generated maze.

use orb_maze_core::{CellCoord, MazeError};
use rand::{seq::SliceRandom, Rng};

use crate::maze::MazeGrid;

/// Number of random interior probes made before scanning for open cells.
pub const RANDOM_CELL_ATTEMPTS: u32 = 1_024;

/// Picks a uniformly random open cell.
///
/// Interior coordinates are resampled until one lands on an open cell. After
/// [`RANDOM_CELL_ATTEMPTS`] misses the choice is made among the open cells
/// directly, so the query only fails when the maze has no open cell at all.
pub fn random_open_cell<R>(grid: &MazeGrid, rng: &mut R) -> Result<CellCoord, MazeError>
where
    R: Rng + ?Sized,
{
    let carvable = MazeGrid::ensure_carvable(grid.width(), grid.height()).is_ok();
    let attempts = if carvable { RANDOM_CELL_ATTEMPTS } else { 0 };

    for _ in 0..attempts {
        let cell = CellCoord::new(
            rng.gen_range(1..grid.width() - 1),
            rng.gen_range(1..grid.height() - 1),
        );
        if grid.is_open(cell) {
            return Ok(cell);
        }
    }

    let open: Vec<CellCoord> = grid.open_cells().collect();
    open.choose(rng)
        .copied()
        .ok_or(MazeError::NoOpenCell { attempts })
}

/// First open cell in the bottom half, scanning rows upward and columns left to right.
///
/// Falls back to the horizontal midpoint of row 1.
#[must_use]
pub fn open_cell_near_bottom(grid: &MazeGrid) -> CellCoord {
    let (width, height) = (grid.width(), grid.height());
    for row in 1..height / 2 {
        for column in 1..width.saturating_sub(1) {
            let cell = CellCoord::new(column, row);
            if grid.is_open(cell) {
                return cell;
            }
        }
    }
    CellCoord::new(width / 2, 1)
}

/// First open cell in the top-right quadrant, scanning columns from the right
/// and rows from the top.
///
/// Falls back to the innermost top-right corner.
#[must_use]
pub fn open_cell_near_top_right(grid: &MazeGrid) -> CellCoord {
    let (width, height) = (grid.width(), grid.height());
    for column in (width / 2 + 1..=width.saturating_sub(2)).rev() {
        for row in (height / 2 + 1..=height.saturating_sub(2)).rev() {
            let cell = CellCoord::new(column, row);
            if grid.is_open(cell) {
                return cell;
            }
        }
    }
    CellCoord::new(width.saturating_sub(2), height.saturating_sub(2))
}
