//! Type definitions for the presentation state.

use crate::traversal::Strategy;

/// Which searches are drawn over the maze.
///
/// This enumeration holds the current view of the race. It is cycled by the user and only affects
/// rendering; both searches keep running whatever is shown.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) enum View {
    /// Both searches overlaid.
    #[default]
    Both,
    /// Only the depth-first search.
    DepthFirst,
    /// Only the breadth-first search.
    BreadthFirst,
}

impl View {
    /// Returns the view that follows this one in the cycle.
    pub(crate) const fn next(self) -> Self {
        match self {
            Self::Both => Self::DepthFirst,
            Self::DepthFirst => Self::BreadthFirst,
            Self::BreadthFirst => Self::Both,
        }
    }

    /// Returns whether the given search is drawn in this view.
    pub(crate) const fn shows(self, strategy: Strategy) -> bool {
        matches!(
            (self, strategy),
            (Self::Both, _)
                | (Self::DepthFirst, Strategy::DepthFirst)
                | (Self::BreadthFirst, Strategy::BreadthFirst)
        )
    }

    /// Returns the string representation of the view, as shown in the status bar.
    pub(crate) const fn repr(self) -> &'static str {
        match self {
            Self::Both => "both",
            Self::DepthFirst => "DFS only",
            Self::BreadthFirst => "BFS only",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_cycle() {
        let view = View::default();

        assert_eq!(view, View::Both, "both searches are shown at first");
        assert_eq!(view.next(), View::DepthFirst, "then depth-first alone");
        assert_eq!(view.next().next(), View::BreadthFirst, "then breadth-first alone");
        assert_eq!(view.next().next().next(), View::Both, "and back");
    }

    #[test]
    fn test_view_filters_strategies() {
        assert!(View::Both.shows(Strategy::DepthFirst), "both shows depth-first");
        assert!(View::Both.shows(Strategy::BreadthFirst), "both shows breadth-first");
        assert!(View::DepthFirst.shows(Strategy::DepthFirst), "own strategy is shown");
        assert!(!View::DepthFirst.shows(Strategy::BreadthFirst), "other strategy is hidden");
        assert!(!View::BreadthFirst.shows(Strategy::DepthFirst), "other strategy is hidden");
    }

    #[test]
    fn test_view_repr() {
        assert_eq!(View::Both.repr(), "both", "overlay label");
        assert_eq!(View::DepthFirst.repr(), "DFS only", "depth-first label");
        assert_eq!(View::BreadthFirst.repr(), "BFS only", "breadth-first label");
    }
}
