//! Randomized perfect-maze generation by recursive backtracking.
//!
//! The generator carves passages between the odd-coordinate cells of an all-wall grid. From a
//! random odd start cell it repeatedly picks an uncarved cell two steps away (in a shuffled order),
//! carves the wall between the two and continues from there, backtracking once every direction of
//! a cell has been tried. Every interior odd cell ends up connected to every other one through
//! exactly one passage.
//!
//! All randomness comes from the caller-supplied [`Rng`], so a seeded generator reproduces the same
//! grid bit for bit.

use rand::{seq::SliceRandom as _, Rng};
use tracing::debug;

use crate::{
    errors::MazeError,
    grid::{checked_sides, Coord, Direction, Grid},
};

/// Inputs of one maze generation run.
///
/// The values are copied into the race coordinator when a race starts and never change while it
/// runs; every round of a race regenerates its maze from the same inputs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MazeSpec {
    /// Requested number of columns. Even values are bumped to the next odd value.
    pub width: usize,
    /// Requested number of rows. Even values are bumped to the next odd value.
    pub height: usize,
    /// Side of one cell in world units, used when placing nodes and walls.
    pub cell_size: f64,
    /// Whether wall placements are emitted for the presentation layer.
    pub include_walls: bool,
    /// Seed of the random stream the mazes are drawn from.
    pub seed: u64,
}

impl Default for MazeSpec {
    fn default() -> Self {
        Self {
            width: 20,
            height: 20,
            cell_size: 1.,
            include_walls: true,
            seed: 0,
        }
    }
}

impl MazeSpec {
    /// Generates a maze with these dimensions.
    ///
    /// # Errors
    ///
    /// - [`MazeError::InvalidDimensions`] if a side is out of range after normalization.
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Grid, MazeError> {
        generate(self.width, self.height, rng)
    }
}

/// One pending cell of the backtracking walk: the cell, its shuffled directions and the index of
/// the next direction to try.
struct Frame {
    /// Cell this frame carves from.
    cell: Coord,
    /// Directions in the order they will be tried.
    directions: [Direction; 4],
    /// Index into [`directions`](Frame::directions) of the next direction to try.
    next: usize,
}

/// Bumps an even length to the next odd one.
const fn to_odd(len: usize) -> usize {
    if len % 2 == 0 {
        len + 1
    } else {
        len
    }
}

/// Generates a perfect maze of `width` columns and `height` rows.
///
/// Both sides are normalized to odd values first. The entrance `(1, 1)` and the exit
/// `(rows - 2, cols - 2)` are always paths in the result.
///
/// # Errors
///
/// - [`MazeError::InvalidDimensions`] if a normalized side is smaller than 3 or larger than
///   [`MAX_SIDE`](crate::grid::MAX_SIDE). Nothing is allocated in that case.
pub fn generate<R: Rng + ?Sized>(
    width: usize,
    height: usize,
    rng: &mut R,
) -> Result<Grid, MazeError> {
    let (rows, cols) = checked_sides(to_odd(height), to_odd(width))?;

    let mut grid = Grid::walled(rows, cols);
    let mut carved = Grid::walled(rows, cols);

    let start = Coord::new(odd_in_interior(rows, rng), odd_in_interior(cols, rng));
    let mut stack = vec![enter(start, &mut grid, &mut carved, rng)];

    while let Some(frame) = stack.last_mut() {
        let Some(direction) = frame.directions.get(frame.next).copied() else {
            let _ = stack.pop();
            continue;
        };
        frame.next += 1;
        let cell = frame.cell;

        let Some(target) = direction
            .step(cell, 2)
            .filter(|target| grid.is_interior(*target) && !carved.is_path(*target))
        else {
            continue;
        };

        if let Some(connector) = direction.step(cell, 1) {
            grid.carve(connector);
        }
        stack.push(enter(target, &mut grid, &mut carved, rng));
    }

    grid.carve(grid.entrance());
    grid.carve(grid.exit());

    debug!(
        rows,
        cols,
        start_row = start.row,
        start_col = start.col,
        paths = grid.path_count(),
        "generated maze"
    );

    Ok(grid)
}

/// Draws a coordinate in `[1, side - 2]` and bumps it to the next odd value if it is even.
fn odd_in_interior<R: Rng + ?Sized>(side: u16, rng: &mut R) -> u16 {
    let value = rng.gen_range(1..=side - 2);
    if value % 2 == 0 {
        value + 1
    } else {
        value
    }
}

/// Marks a cell as carved and as a path, and shuffles the directions it will be left through.
fn enter<R: Rng + ?Sized>(cell: Coord, grid: &mut Grid, carved: &mut Grid, rng: &mut R) -> Frame {
    carved.carve(cell);
    grid.carve(cell);

    let mut directions = Direction::ALL;
    directions.shuffle(rng);

    Frame {
        cell,
        directions,
        next: 0,
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use rand::SeedableRng as _;
    use rand_chacha::ChaCha8Rng;

    use super::*;

    /// Generates a maze from a fresh seeded stream.
    fn seeded(width: usize, height: usize, seed: u64) -> Result<Grid, MazeError> {
        generate(width, height, &mut ChaCha8Rng::seed_from_u64(seed))
    }

    #[test]
    fn test_even_sides_are_bumped_to_odd() {
        let grid = seeded(4, 4, 7).expect("4x4 should normalize to 5x5");

        assert_eq!(grid.rows(), 5, "height 4 becomes 5 rows");
        assert_eq!(grid.cols(), 5, "width 4 becomes 5 columns");
    }

    #[test]
    fn test_width_maps_to_columns() {
        let grid = seeded(9, 5, 1).expect("9x5 is a valid maze");

        assert_eq!(grid.rows(), 5, "height is the row count");
        assert_eq!(grid.cols(), 9, "width is the column count");
    }

    #[test]
    fn test_too_small_is_rejected() {
        assert_eq!(
            seeded(1, 5, 0),
            Err(MazeError::InvalidDimensions { rows: 5, cols: 1 }),
            "a single column has no interior"
        );
        assert!(seeded(0, 0, 0).is_err(), "zero sides normalize to 1");
    }

    #[test]
    fn test_two_normalizes_to_smallest_maze() {
        let grid = seeded(2, 2, 3).expect("2x2 normalizes to 3x3");

        assert_eq!(grid.to_string(), "###\n#.#\n###", "3x3 has a single path cell");
    }

    #[test]
    fn test_same_seed_same_grid() {
        let first = seeded(31, 17, 42).expect("valid maze");
        let second = seeded(31, 17, 42).expect("valid maze");

        assert_eq!(first, second, "a seed must reproduce the grid bit for bit");
    }

    #[test]
    fn test_different_seeds_differ() {
        let first = seeded(41, 41, 1).expect("valid maze");
        let second = seeded(41, 41, 2).expect("valid maze");

        assert_ne!(first, second, "different seeds should carve different mazes");
    }

    #[test]
    fn test_five_by_five_layout() {
        let grid = seeded(5, 5, 42).expect("5x5 is a valid maze");

        for coord in grid.coords() {
            let on_border = coord.row == 0 || coord.col == 0 || coord.row == 4 || coord.col == 4;
            if on_border || (coord.row == 2 && coord.col == 2) {
                assert!(!grid.is_path(coord), "{coord:?} should be a wall");
            }
            if coord.row % 2 == 1 && coord.col % 2 == 1 {
                assert!(grid.is_path(coord), "{coord:?} lattice cell should be carved");
            }
        }
        // four lattice cells joined by a spanning tree: three connectors
        assert_eq!(grid.path_count(), 7, "a 2x2 lattice tree has 7 path cells");
    }

    #[test]
    fn test_maze_spec_generate_uses_dimensions() {
        let spec = MazeSpec {
            width: 7,
            height: 11,
            ..MazeSpec::default()
        };
        let grid = spec
            .generate(&mut ChaCha8Rng::seed_from_u64(spec.seed))
            .expect("valid maze");

        assert_eq!((grid.rows(), grid.cols()), (11, 7), "the requested sides should be used");
    }

    proptest! {
        #[test]
        fn every_lattice_cell_is_carved(width in 2usize..40, height in 2usize..40, seed in any::<u64>()) {
            let grid = seeded(width, height, seed).expect("sizes are in range");

            for coord in grid.coords() {
                let lattice = coord.row % 2 == 1 && coord.col % 2 == 1;
                let pillar = coord.row % 2 == 0 && coord.col % 2 == 0;
                if lattice {
                    prop_assert!(grid.is_path(coord));
                }
                if pillar || !grid.is_interior(coord) {
                    prop_assert!(!grid.is_path(coord));
                }
            }
        }

        #[test]
        fn carving_forms_a_tree(width in 3usize..40, height in 3usize..40, seed in any::<u64>()) {
            let grid = seeded(width, height, seed).expect("sizes are in range");
            let lattice = usize::from(grid.rows() / 2) * usize::from(grid.cols() / 2);

            // each lattice cell beyond the first is reached through exactly one connector
            prop_assert_eq!(grid.path_count(), 2 * lattice - 1);
        }
    }
}
