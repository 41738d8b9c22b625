//! World-space placement of nodes, walls and search cursors.
//!
//! The presentation layer never looks at grid indices directly: it receives one [`Placement`] per
//! node and, when walls are requested, one position per wall cell. Positions lie on the `y = 0`
//! plane, centred on the origin, one `cell_size` apart; cursors float [`CURSOR_LIFT`] units above
//! the node they occupy.

use crate::{
    generator::MazeSpec,
    graph::{Graph, Node, NodeId},
    grid::{Coord, Grid},
};

/// Height at which search cursors are drawn above the node they occupy.
pub const CURSOR_LIFT: f64 = 1.;

/// A point in world space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    /// Horizontal axis, growing with the column.
    pub x: f64,
    /// Vertical axis.
    pub y: f64,
    /// Depth axis, growing with the row.
    pub z: f64,
}

impl Position {
    /// World position of a grid cell of a `rows × cols` grid.
    #[must_use]
    pub fn of_cell(coord: Coord, rows: u16, cols: u16, cell_size: f64) -> Self {
        Self {
            x: (f64::from(coord.col) - f64::from(cols) / 2.) * cell_size,
            y: 0.,
            z: (f64::from(coord.row) - f64::from(rows) / 2.) * cell_size,
        }
    }
}

/// Role a node plays, as far as drawing it is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// The start terminal.
    Start,
    /// The goal terminal.
    Goal,
    /// A cell with more than two neighbors.
    Junction,
    /// Any other cell.
    Corridor,
}

/// Where and what to draw for one node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// Node being placed.
    pub id: NodeId,
    /// World position of the node.
    pub position: Position,
    /// Role of the node.
    pub kind: NodeKind,
}

/// All positions a presentation layer needs for one maze.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Layout {
    /// Side of a cell in world units.
    cell_size: f64,
    /// One placement per node, in arena order.
    nodes: Vec<Placement>,
    /// Wall positions; empty when walls were not requested.
    walls: Vec<Position>,
}

impl Layout {
    /// Places every node of `graph` and, if `spec` asks for it, every wall of `grid`.
    ///
    /// Wall cells under the start and goal terminals are skipped so that the terminals stay
    /// visible.
    #[must_use]
    pub fn new(grid: &Grid, graph: &Graph, spec: &MazeSpec) -> Self {
        let (rows, cols) = (grid.rows(), grid.cols());
        let place = |coord: Coord| Position::of_cell(coord, rows, cols, spec.cell_size);

        let nodes = graph
            .nodes()
            .map(|(id, node)| Placement {
                id,
                position: place(node.coord()),
                kind: if id == graph.start() {
                    NodeKind::Start
                } else if id == graph.goal() {
                    NodeKind::Goal
                } else if node.is_junction() {
                    NodeKind::Junction
                } else {
                    NodeKind::Corridor
                },
            })
            .collect();

        let terminals: Vec<Coord> = [graph.start(), graph.goal()]
            .into_iter()
            .filter_map(|id| graph.node(id).map(Node::coord))
            .collect();
        let walls = if spec.include_walls {
            grid.walls()
                .filter(|coord| !terminals.contains(coord))
                .map(place)
                .collect()
        } else {
            Vec::new()
        };

        Self {
            cell_size: spec.cell_size,
            nodes,
            walls,
        }
    }

    /// Side of a cell in world units.
    #[must_use]
    pub const fn cell_size(&self) -> f64 {
        self.cell_size
    }

    /// Node placements, in arena order.
    #[must_use]
    pub fn nodes(&self) -> &[Placement] {
        &self.nodes
    }

    /// Wall positions.
    #[must_use]
    pub fn walls(&self) -> &[Position] {
        &self.walls
    }

    /// Placement of one node.
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&Placement> {
        self.nodes.get(id.index())
    }

    /// Position of a search cursor sitting on `id`.
    #[must_use]
    pub fn cursor(&self, id: NodeId) -> Option<Position> {
        self.node(id).map(|placement| Position {
            y: CURSOR_LIFT,
            ..placement.position
        })
    }
}
