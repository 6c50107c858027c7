use orb_maze_core::{CellCoord, CellState};
use orb_maze_world::{maze::MazeGrid, navigation::DistanceField, positions};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

const SIZES: [(u32, u32); 7] = [(3, 3), (4, 7), (8, 9), (10, 10), (21, 15), (30, 12), (31, 31)];

fn generate(width: u32, height: u32, seed: u64) -> MazeGrid {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    MazeGrid::generate(width, height, &mut rng)
}

fn for_each_maze(mut check: impl FnMut(&MazeGrid, u32, u32, u64)) {
    for (width, height) in SIZES {
        for seed in 0..24 {
            let grid = generate(width, height, seed);
            check(&grid, width, height, seed);
        }
    }
}

fn open_edges(grid: &MazeGrid) -> usize {
    grid.open_cells()
        .map(|cell| {
            let east = CellCoord::new(cell.column() + 1, cell.row());
            let north = CellCoord::new(cell.column(), cell.row() + 1);
            usize::from(grid.is_open(east)) + usize::from(grid.is_open(north))
        })
        .sum()
}

#[test]
fn scenario_ten_by_ten_terminates_and_is_connected() {
    let grid = generate(10, 10, 0x00c0_ffee);
    let origin = grid.origin().expect("10x10 grid has an interior");

    assert!(grid.open_count() > 0);
    let field = DistanceField::from_source(&grid, origin);
    assert_eq!(field.reachable_count(), grid.open_count());
}

#[test]
fn every_open_cell_is_reachable_from_origin() {
    for_each_maze(|grid, width, height, seed| {
        let origin = grid.origin().expect("carvable grid has an origin");
        let field = DistanceField::from_source(grid, origin);
        assert_eq!(
            field.reachable_count(),
            grid.open_count(),
            "{width}x{height} seed {seed} has unreachable open cells",
        );
    });
}

#[test]
fn open_cells_form_a_tree() {
    for_each_maze(|grid, width, height, seed| {
        let open = grid.open_count();
        assert_eq!(
            open,
            2 * grid.carve_steps() as usize + 1,
            "{width}x{height} seed {seed}: each carve step opens exactly two cells",
        );
        assert_eq!(
            open_edges(grid),
            open - 1,
            "{width}x{height} seed {seed}: open adjacency graph has a cycle",
        );
    });
}

#[test]
fn outer_ring_is_always_wall() {
    for_each_maze(|grid, width, height, seed| {
        for column in 0..width {
            for row in 0..height {
                let on_ring = column == 0 || row == 0 || column == width - 1 || row == height - 1;
                if on_ring {
                    assert_eq!(
                        grid.cell_state(CellCoord::new(column, row)),
                        Some(CellState::Wall),
                        "{width}x{height} seed {seed}: ring cell ({column}, {row}) is open",
                    );
                }
            }
        }
    });
}

#[test]
fn no_two_by_two_open_blocks() {
    for_each_maze(|grid, width, height, seed| {
        for cell in grid.open_cells() {
            let block = [
                CellCoord::new(cell.column() + 1, cell.row()),
                CellCoord::new(cell.column(), cell.row() + 1),
                CellCoord::new(cell.column() + 1, cell.row() + 1),
            ];
            assert!(
                !block.iter().all(|other| grid.is_open(*other)),
                "{width}x{height} seed {seed}: open block at {cell:?}",
            );
        }
    });
}

#[test]
fn large_grid_generates_without_exhausting_the_stack() {
    let grid = generate(801, 801, 12);
    let origin = grid.origin().expect("origin");
    let field = DistanceField::from_source(&grid, origin);
    assert_eq!(field.reachable_count(), grid.open_count());
    assert!(grid.open_count() > 200_000);
}

#[test]
fn spawn_regions_land_on_open_cells_for_typical_mazes() {
    for seed in 0..24 {
        let grid = generate(10, 10, seed);
        let bottom = positions::open_cell_near_bottom(&grid);
        let top_right = positions::open_cell_near_top_right(&grid);

        assert!(bottom.row() < 5, "seed {seed}: spawn {bottom:?} not in bottom half");
        assert!(grid.is_open(bottom), "seed {seed}: spawn {bottom:?} is a wall");
        assert!(top_right.column() > 5 && top_right.row() > 5);
        assert!(grid.is_open(top_right), "seed {seed}: finish {top_right:?} is a wall");
    }
}
