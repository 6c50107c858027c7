//! Occupancy grid and the randomized carver that fills it.

use log::{debug, warn};
use orb_maze_core::{CellCoord, CellState, Direction, MazeError};
use rand::{seq::SliceRandom, Rng};

/// Dense wall/open grid produced once per session.
///
/// Cells on the outer ring are always walls. The open cells form a tree: there
/// is exactly one open path between any two of them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MazeGrid {
    width: u32,
    height: u32,
    cells: Vec<CellState>,
    origin: Option<CellCoord>,
    carve_steps: u32,
}

impl MazeGrid {
    /// Checks that a grid of the given size has at least one interior cell.
    pub fn ensure_carvable(width: u32, height: u32) -> Result<(), MazeError> {
        if width < 3 || height < 3 {
            return Err(MazeError::DegenerateGrid { width, height });
        }
        Ok(())
    }

    /// Generates a perfect maze by randomized depth-first carving.
    ///
    /// The carver starts from a random interior cell and moves two cells at a
    /// time, opening the cell in between, so parallel corridors always keep a
    /// wall between them. Grids without an interior complete as all walls.
    #[must_use]
    pub fn generate<R>(width: u32, height: u32, rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        let mut grid = Self::walled(width, height);

        if let Err(error) = Self::ensure_carvable(width, height) {
            warn!("{error}, leaving every cell walled");
            return grid;
        }

        let start = CellCoord::new(rng.gen_range(1..width - 1), rng.gen_range(1..height - 1));
        grid.carve_from(start, rng);
        debug!(
            "carved {}x{} maze from {:?} in {} steps",
            width, height, start, grid.carve_steps
        );
        grid
    }

    /// Creates a grid where every cell is a wall.
    #[must_use]
    pub fn walled(width: u32, height: u32) -> Self {
        let capacity = usize::try_from(u64::from(width) * u64::from(height)).unwrap_or(0);
        Self {
            width,
            height,
            cells: vec![CellState::Wall; capacity],
            origin: None,
            carve_steps: 0,
        }
    }

    /// Number of columns in the grid.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Number of rows in the grid.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Cell the carver started from, if anything was carved.
    #[must_use]
    pub const fn origin(&self) -> Option<CellCoord> {
        self.origin
    }

    /// Number of two-step moves the carver made.
    #[must_use]
    pub const fn carve_steps(&self) -> u32 {
        self.carve_steps
    }

    /// State of the cell, or `None` when it lies outside the grid.
    #[must_use]
    pub fn cell_state(&self, cell: CellCoord) -> Option<CellState> {
        self.index(cell).map(|index| self.cells[index])
    }

    /// Reports whether the cell is inside the grid and open.
    #[must_use]
    pub fn is_open(&self, cell: CellCoord) -> bool {
        self.cell_state(cell) == Some(CellState::Open)
    }

    /// Reports whether the cell lies strictly inside the outer ring.
    #[must_use]
    pub fn is_interior(&self, cell: CellCoord) -> bool {
        cell.column() >= 1
            && cell.row() >= 1
            && cell.column() < self.width.saturating_sub(1)
            && cell.row() < self.height.saturating_sub(1)
    }

    /// Iterates over all open cells, row by row from the bottom.
    pub fn open_cells(&self) -> impl Iterator<Item = CellCoord> + '_ {
        let width = self.width.max(1);
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, state)| **state == CellState::Open)
            .filter_map(move |(index, _)| {
                let index = u32::try_from(index).ok()?;
                Some(CellCoord::new(index % width, index / width))
            })
    }

    /// Number of open cells.
    #[must_use]
    pub fn open_count(&self) -> usize {
        self.cells
            .iter()
            .filter(|state| **state == CellState::Open)
            .count()
    }

    fn carve_from<R>(&mut self, start: CellCoord, rng: &mut R)
    where
        R: Rng + ?Sized,
    {
        self.open(start);
        self.origin = Some(start);

        let mut stack = vec![CarveFrame::enter(start, rng)];
        while let Some(frame) = stack.last_mut() {
            let Some(&direction) = frame.directions.get(frame.next) else {
                let _ = stack.pop();
                continue;
            };
            frame.next += 1;
            let cell = frame.cell;

            let Some(target) = direction
                .offset(cell, 2)
                .filter(|target| self.is_interior(*target))
            else {
                continue;
            };

            if self.is_open(target) {
                continue;
            }

            if let Some(connector) = direction.offset(cell, 1) {
                self.open(connector);
            }
            self.open(target);
            self.carve_steps += 1;
            stack.push(CarveFrame::enter(target, rng));
        }
    }

    fn open(&mut self, cell: CellCoord) {
        if let Some(index) = self.index(cell) {
            self.cells[index] = CellState::Open;
        }
    }

    fn index(&self, cell: CellCoord) -> Option<usize> {
        if cell.column() < self.width && cell.row() < self.height {
            let row = usize::try_from(cell.row()).ok()?;
            let column = usize::try_from(cell.column()).ok()?;
            let width = usize::try_from(self.width).ok()?;
            Some(row * width + column)
        } else {
            None
        }
    }
}

/// One level of the carver's work stack: a cell and the directions left to try.
#[derive(Clone, Copy, Debug)]
struct CarveFrame {
    cell: CellCoord,
    directions: [Direction; 4],
    next: usize,
}

impl CarveFrame {
    fn enter<R>(cell: CellCoord, rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        let mut directions = Direction::ALL;
        directions.shuffle(rng);
        Self {
            cell,
            directions,
            next: 0,
        }
    }
}
