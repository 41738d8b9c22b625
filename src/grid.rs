//! Boolean path/wall grid and its coordinate types.
//!
//! A grid is the raw output of the maze generator: every cell is either a path (`true`) or a wall
//! (`false`). Grids always have odd sides so that the cells on odd coordinates form the lattice the
//! generator carves between, and they have a textual form (`#` for walls, `.` for paths) used by
//! tests and log output.

use std::{fmt, str::FromStr};

use crate::errors::MazeError;

/// Largest accepted side of a grid, in cells.
///
/// Coordinates are stored as [`u16`]; this bound keeps the whole arena of a square maze within a
/// few dozen megabytes as well.
pub const MAX_SIDE: u16 = 4095;

/// Position of a cell in a grid, as a row and a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Coord {
    /// Zero-based row, growing downwards.
    pub row: u16,
    /// Zero-based column, growing rightwards.
    pub col: u16,
}

impl Coord {
    /// Builds a coordinate from a row and a column.
    #[must_use]
    pub const fn new(row: u16, col: u16) -> Self {
        Self { row, col }
    }
}

/// The four cardinal directions a cell can be left through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Towards row zero.
    North,
    /// Towards the last row.
    South,
    /// Towards column zero.
    West,
    /// Towards the last column.
    East,
}

impl Direction {
    /// All directions, in the order neighbors are scanned.
    pub const ALL: [Self; 4] = [Self::North, Self::South, Self::West, Self::East];

    /// Returns the coordinate `distance` cells away in this direction, or [`None`] if it would
    /// fall below zero or overflow.
    #[must_use]
    pub fn step(self, from: Coord, distance: i16) -> Option<Coord> {
        let (d_row, d_col) = match self {
            Self::North => (-distance, 0),
            Self::South => (distance, 0),
            Self::West => (0, -distance),
            Self::East => (0, distance),
        };

        Some(Coord::new(
            from.row.checked_add_signed(d_row)?,
            from.col.checked_add_signed(d_col)?,
        ))
    }
}

/// Checks that both sides are odd and within `3..=MAX_SIDE`, converting them to the compact
/// coordinate type.
pub(crate) fn checked_sides(rows: usize, cols: usize) -> Result<(u16, u16), MazeError> {
    let invalid = MazeError::InvalidDimensions { rows, cols };
    let side = |len: usize| {
        u16::try_from(len)
            .ok()
            .filter(|value| (3..=MAX_SIDE).contains(value) && value % 2 == 1)
    };

    match (side(rows), side(cols)) {
        (Some(rows), Some(cols)) => Ok((rows, cols)),
        _ => Err(invalid),
    }
}

/// Rectangular mask of path and wall cells.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    /// Number of rows.
    rows: u16,
    /// Number of columns.
    cols: u16,
    /// Row-major cells, `true` for path.
    cells: Vec<bool>,
}

impl Grid {
    /// Builds a grid made only of walls. Sides are assumed to be validated already.
    pub(crate) fn walled(rows: u16, cols: u16) -> Self {
        Self {
            rows,
            cols,
            cells: vec![false; usize::from(rows) * usize::from(cols)],
        }
    }

    /// Number of rows.
    #[must_use]
    pub const fn rows(&self) -> u16 {
        self.rows
    }

    /// Number of columns.
    #[must_use]
    pub const fn cols(&self) -> u16 {
        self.cols
    }

    /// The interior cell the start terminal attaches to.
    #[must_use]
    pub const fn entrance(&self) -> Coord {
        Coord::new(1, 1)
    }

    /// The interior cell the goal terminal attaches to.
    #[must_use]
    pub const fn exit(&self) -> Coord {
        Coord::new(self.rows - 2, self.cols - 2)
    }

    /// Whether the coordinate lies inside the grid.
    #[must_use]
    pub const fn contains(&self, coord: Coord) -> bool {
        coord.row < self.rows && coord.col < self.cols
    }

    /// Whether the coordinate lies strictly inside the border, which is where carving happens.
    #[must_use]
    pub const fn is_interior(&self, coord: Coord) -> bool {
        coord.row >= 1 && coord.col >= 1 && coord.row < self.rows - 1 && coord.col < self.cols - 1
    }

    /// Whether the cell is a path. Coordinates outside the grid are walls.
    #[must_use]
    pub fn is_path(&self, coord: Coord) -> bool {
        self.index(coord)
            .and_then(|idx| self.cells.get(idx))
            .copied()
            .unwrap_or(false)
    }

    /// Turns the cell into a path. Coordinates outside the grid are ignored.
    pub(crate) fn carve(&mut self, coord: Coord) {
        if let Some(cell) = self.index(coord).and_then(|idx| self.cells.get_mut(idx)) {
            *cell = true;
        }
    }

    /// Iterates over every cell coordinate in row-major order.
    pub fn coords(&self) -> impl Iterator<Item = Coord> + '_ {
        (0..self.rows).flat_map(move |row| (0..self.cols).map(move |col| Coord::new(row, col)))
    }

    /// Iterates over path cells in row-major order.
    pub fn paths(&self) -> impl Iterator<Item = Coord> + '_ {
        self.coords().filter(|coord| self.is_path(*coord))
    }

    /// Iterates over wall cells in row-major order.
    pub fn walls(&self) -> impl Iterator<Item = Coord> + '_ {
        self.coords().filter(|coord| !self.is_path(*coord))
    }

    /// Number of path cells.
    #[must_use]
    pub fn path_count(&self) -> usize {
        self.cells.iter().filter(|cell| **cell).count()
    }

    /// Row-major index of a coordinate, if it is inside the grid.
    pub(crate) fn index(&self, coord: Coord) -> Option<usize> {
        self.contains(coord)
            .then(|| usize::from(coord.row) * usize::from(self.cols) + usize::from(coord.col))
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.rows {
            if row > 0 {
                writeln!(formatter)?;
            }
            for col in 0..self.cols {
                let symbol = if self.is_path(Coord::new(row, col)) {
                    '.'
                } else {
                    '#'
                };
                write!(formatter, "{symbol}")?;
            }
        }

        Ok(())
    }
}

impl FromStr for Grid {
    type Err = MazeError;

    /// Parses a grid drawn with `#` for walls and `.` for paths, one row per line.
    ///
    /// Leading and trailing blank lines and surrounding whitespace on each line are ignored. The
    /// outer ring must be all walls: the terminals are placed there.
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let lines: Vec<&str> = input.trim().lines().map(str::trim).collect();
        let expected = lines.first().map_or(0, |line| line.chars().count());
        let on_border = |row: usize, col: usize| {
            row == 0 || col == 0 || row + 1 == lines.len() || col + 1 == expected
        };

        let mut cells = Vec::with_capacity(lines.len() * expected);
        for (row, line) in lines.iter().enumerate() {
            let found = line.chars().count();
            if found != expected {
                return Err(MazeError::RaggedRows {
                    row,
                    expected,
                    found,
                });
            }

            for (col, symbol) in line.chars().enumerate() {
                match symbol {
                    '.' if on_border(row, col) => return Err(MazeError::OpenBorder { row, col }),
                    '.' => cells.push(true),
                    '#' => cells.push(false),
                    _ => return Err(MazeError::UnknownCell { row, col, symbol }),
                }
            }
        }

        let (rows, cols) = checked_sides(lines.len(), expected)?;

        Ok(Self { rows, cols, cells })
    }
}
