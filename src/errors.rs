//! Error type shared by maze generation, graph building and the race coordinator.
//!
//! Traversal exhaustion is not an error: a search that runs out of frontier reports it through
//! [`Status`](crate::traversal::Status).

use crate::{graph::Terminal, grid::MAX_SIDE};

/// Errors raised while producing a maze or driving the race between rounds.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MazeError {
    /// The requested maze is too small or too large once normalized to odd sides.
    ///
    /// Both sides must be at least 3 cells so that an interior exists, and at most [`MAX_SIDE`]
    /// cells so that coordinates fit the compact representation used by the grid.
    #[error(
        "invalid maze dimensions {rows}x{cols}: sides must be odd and within 3..={max}",
        max = MAX_SIDE
    )]
    InvalidDimensions {
        /// Row count after normalization.
        rows: usize,
        /// Column count after normalization.
        cols: usize,
    },
    /// The entrance or exit cell of a grid is a wall, so a terminal node would be left without
    /// an edge.
    ///
    /// Grids produced by the generator always carve both cells; hitting this error points at a
    /// broken hand-written grid or a generator bug.
    #[error("{terminal} terminal has no path cell to attach to at ({row}, {col})")]
    DisconnectedTerminal {
        /// Which terminal could not be attached.
        terminal: Terminal,
        /// Row of the interior cell the terminal should attach to.
        row: u16,
        /// Column of the interior cell the terminal should attach to.
        col: u16,
    },
    /// A reset was requested while at least one search was still running.
    #[error("cannot reset the race before both searches are done")]
    PrematureReset,
    /// A textual grid contains a symbol other than `#` or `.`.
    #[error("unknown cell symbol {symbol:?} at ({row}, {col})")]
    UnknownCell {
        /// Zero-based line of the offending symbol.
        row: usize,
        /// Zero-based column of the offending symbol.
        col: usize,
        /// The symbol found.
        symbol: char,
    },
    /// A textual grid has a path cell on its outer ring, where only walls and terminals belong.
    #[error("path cell on the grid border at ({row}, {col})")]
    OpenBorder {
        /// Zero-based line of the offending cell.
        row: usize,
        /// Zero-based column of the offending cell.
        col: usize,
    },
    /// A textual grid has rows of different lengths.
    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRows {
        /// Zero-based line of the offending row.
        row: usize,
        /// Length of the first row.
        expected: usize,
        /// Length of the offending row.
        found: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_dimensions_message() {
        let err = MazeError::InvalidDimensions { rows: 1, cols: 5 };

        assert_eq!(
            err.to_string(),
            "invalid maze dimensions 1x5: sides must be odd and within 3..=4095",
            "message should name both sides and the accepted range"
        );
    }

    #[test]
    fn test_disconnected_terminal_message() {
        let err = MazeError::DisconnectedTerminal {
            terminal: Terminal::Goal,
            row: 3,
            col: 3,
        };

        assert_eq!(
            err.to_string(),
            "goal terminal has no path cell to attach to at (3, 3)",
            "message should name the terminal and the missing cell"
        );
    }

    #[test]
    fn test_parse_errors_are_distinct() {
        let unknown = MazeError::UnknownCell {
            row: 0,
            col: 0,
            symbol: 'x',
        };
        let ragged = MazeError::RaggedRows {
            row: 1,
            expected: 3,
            found: 2,
        };

        assert_ne!(unknown, ragged, "parse errors should compare unequal");
        assert_eq!(
            MazeError::OpenBorder { row: 0, col: 1 }.to_string(),
            "path cell on the grid border at (0, 1)",
            "open border message should locate the cell"
        );
        assert_eq!(
            ragged.to_string(),
            "row 1 has 2 cells, expected 3",
            "ragged row message should report both lengths"
        );
    }
}
