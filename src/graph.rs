//! Decision-point graph built from a maze grid.
//!
//! Every path cell becomes a node in an arena; edges join nodes whose cells touch orthogonally.
//! Two synthetic terminal nodes sit on the border rows: the start above the entrance and the goal
//! below the exit. Nodes only carry topology: searches keep their own bookkeeping keyed by
//! [`NodeId`], so any number of them can walk one graph at the same time.

use std::fmt;

use tracing::debug;

use crate::{
    errors::MazeError,
    grid::{Coord, Direction, Grid},
};

/// Handle of a node: its index in the graph's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl NodeId {
    /// Position of the node in the arena.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// The two synthetic nodes a race runs between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Terminal {
    /// Node the searches start from, attached above the entrance.
    Start,
    /// Node the searches look for, attached below the exit.
    Goal,
}

impl fmt::Display for Terminal {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start => write!(formatter, "start"),
            Self::Goal => write!(formatter, "goal"),
        }
    }
}

/// A traversable cell and the cells reachable from it in one move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    /// Grid cell of the node. Terminals use the border cell they sit on.
    coord: Coord,
    /// Adjacent nodes, in scan order.
    neighbors: Vec<NodeId>,
}

impl Node {
    /// Grid cell of the node.
    #[must_use]
    pub const fn coord(&self) -> Coord {
        self.coord
    }

    /// Adjacent nodes.
    #[must_use]
    pub fn neighbors(&self) -> &[NodeId] {
        &self.neighbors
    }

    /// Number of adjacent nodes.
    #[must_use]
    pub fn degree(&self) -> usize {
        self.neighbors.len()
    }

    /// Whether the node offers more than one way forward, i.e. has more than two neighbors.
    #[must_use]
    pub fn is_junction(&self) -> bool {
        self.degree() > 2
    }
}

/// Arena of nodes with designated start and goal handles.
///
/// A graph is immutable once built. It is connected whenever the grid it comes from is, which is
/// always the case for generated mazes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Graph {
    /// All nodes; path cells in row-major order followed by the start and the goal.
    nodes: Vec<Node>,
    /// Handle of the start terminal.
    start: NodeId,
    /// Handle of the goal terminal.
    goal: NodeId,
    /// Row count of the source grid.
    rows: u16,
    /// Column count of the source grid.
    cols: u16,
}

/// Builds the decision-point graph of a grid.
///
/// # Errors
///
/// - [`MazeError::DisconnectedTerminal`] if the entrance or exit cell of the grid is a wall.
pub fn build(grid: &Grid) -> Result<Graph, MazeError> {
    let entrance = grid.entrance();
    let exit = grid.exit();
    if !grid.is_path(entrance) {
        return Err(MazeError::DisconnectedTerminal {
            terminal: Terminal::Start,
            row: entrance.row,
            col: entrance.col,
        });
    }
    if !grid.is_path(exit) {
        return Err(MazeError::DisconnectedTerminal {
            terminal: Terminal::Goal,
            row: exit.row,
            col: exit.col,
        });
    }

    let mut lookup: Vec<Option<NodeId>> =
        vec![None; usize::from(grid.rows()) * usize::from(grid.cols())];
    let mut nodes = Vec::with_capacity(grid.path_count() + 2);
    for coord in grid.paths() {
        if let Some(slot) = grid.index(coord).and_then(|idx| lookup.get_mut(idx)) {
            *slot = Some(NodeId(nodes.len()));
        }
        nodes.push(Node {
            coord,
            neighbors: Vec::new(),
        });
    }

    let find = |coord: Coord| {
        grid.index(coord)
            .and_then(|idx| lookup.get(idx).copied())
            .flatten()
    };

    for node in &mut nodes {
        for direction in Direction::ALL {
            if let Some(neighbor) = direction.step(node.coord, 1).and_then(find) {
                node.neighbors.push(neighbor);
            }
        }
    }

    let mut graph = Graph {
        nodes,
        start: NodeId(0),
        goal: NodeId(0),
        rows: grid.rows(),
        cols: grid.cols(),
    };
    // both cells were checked to be paths above
    if let (Some(entrance_id), Some(exit_id)) = (find(entrance), find(exit)) {
        graph.start = graph.attach(Coord::new(0, entrance.col), entrance_id);
        graph.goal = graph.attach(Coord::new(grid.rows() - 1, exit.col), exit_id);
    }

    debug!(
        nodes = graph.len(),
        junctions = graph.nodes.iter().filter(|node| node.is_junction()).count(),
        "built decision-point graph"
    );

    Ok(graph)
}

impl Graph {
    /// Appends a terminal node at `coord` linked both ways to `anchor`, returning its handle.
    fn attach(&mut self, coord: Coord, anchor: NodeId) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            coord,
            neighbors: vec![anchor],
        });
        if let Some(node) = self.nodes.get_mut(anchor.0) {
            node.neighbors.push(id);
        }

        id
    }

    /// Handle of the start terminal.
    #[must_use]
    pub const fn start(&self) -> NodeId {
        self.start
    }

    /// Handle of the goal terminal.
    #[must_use]
    pub const fn goal(&self) -> NodeId {
        self.goal
    }

    /// Handle of the given terminal.
    #[must_use]
    pub const fn terminal(&self, terminal: Terminal) -> NodeId {
        match terminal {
            Terminal::Start => self.start,
            Terminal::Goal => self.goal,
        }
    }

    /// Row count of the grid the graph was built from.
    #[must_use]
    pub const fn rows(&self) -> u16 {
        self.rows
    }

    /// Column count of the grid the graph was built from.
    #[must_use]
    pub const fn cols(&self) -> u16 {
        self.cols
    }

    /// Number of nodes, terminals included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the graph has no nodes. Built graphs always hold at least the two terminals.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Node behind a handle, if the handle belongs to this graph.
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Neighbors of a node; empty for handles that do not belong to this graph.
    #[must_use]
    pub fn neighbors(&self, id: NodeId) -> &[NodeId] {
        self.node(id).map(Node::neighbors).unwrap_or_default()
    }

    /// Iterates over every node with its handle, in arena order.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &Node)> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .map(|(idx, node)| (NodeId(idx), node))
    }

    /// Unweighted distances from `from` to every node, indexed by arena position.
    ///
    /// Computed level by level as a flood fill; unreachable nodes (and every node when `from` is
    /// foreign to the graph) are [`None`].
    #[must_use]
    pub fn distances_from(&self, from: NodeId) -> Vec<Option<usize>> {
        let mut distances = vec![None; self.nodes.len()];
        let Some(slot) = distances.get_mut(from.0) else {
            return distances;
        };
        *slot = Some(0);

        let mut level = 0;
        let mut frontier = vec![from];
        while !frontier.is_empty() {
            level += 1;
            let mut next = Vec::new();
            for id in frontier {
                for neighbor in self.neighbors(id) {
                    if let Some(slot) = distances.get_mut(neighbor.0) {
                        if slot.is_none() {
                            *slot = Some(level);
                            next.push(*neighbor);
                        }
                    }
                }
            }
            frontier = next;
        }

        distances
    }

    /// Length in moves of the shortest route from start to goal, if there is one.
    #[must_use]
    pub fn shortest_route_len(&self) -> Option<usize> {
        self.distances_from(self.start)
            .get(self.goal.0)
            .copied()
            .flatten()
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use rand::SeedableRng as _;
    use rand_chacha::ChaCha8Rng;

    use super::*;
    use crate::generator::generate;

    /// Parses a hand-drawn grid and builds its graph.
    fn graph_of(drawing: &str) -> Graph {
        let grid: Grid = drawing.parse().expect("test grid should parse");
        build(&grid).expect("test grid should build")
    }

    /// Finds the node sitting on a cell.
    fn at(graph: &Graph, row: u16, col: u16) -> NodeId {
        graph
            .nodes()
            .find(|(_, node)| node.coord() == Coord::new(row, col))
            .map(|(id, _)| id)
            .expect("cell should hold a node")
    }

    #[test]
    fn test_corridor_topology() {
        let graph = graph_of("#####\n#...#\n#####");

        assert_eq!(graph.len(), 5, "three path cells plus two terminals");
        let left = at(&graph, 1, 1);
        let middle = at(&graph, 1, 2);
        let right = at(&graph, 1, 3);

        assert_eq!(graph.neighbors(left), &[middle, graph.start()], "west end");
        assert_eq!(graph.neighbors(middle), &[left, right], "scan order is west then east");
        assert_eq!(graph.neighbors(right), &[middle, graph.goal()], "east end");
    }

    #[test]
    fn test_terminal_placement() {
        let graph = graph_of("#####\n#...#\n###.#\n#...#\n#####");
        let start = graph.node(graph.start()).expect("start exists");
        let goal = graph.node(graph.goal()).expect("goal exists");

        assert_eq!(start.coord(), Coord::new(0, 1), "start sits on the top border");
        assert_eq!(goal.coord(), Coord::new(4, 3), "goal sits on the bottom border");
        assert_eq!(graph.start().index(), graph.len() - 2, "start follows the path cells");
        assert_eq!(graph.goal().index(), graph.len() - 1, "goal is the last node");
        assert_eq!(graph.terminal(Terminal::Goal), graph.goal(), "terminal lookup");
    }

    #[test]
    fn test_single_cell_links_both_terminals() {
        let graph = graph_of("###\n#.#\n###");
        let cell = at(&graph, 1, 1);

        assert_eq!(
            graph.neighbors(cell),
            &[graph.start(), graph.goal()],
            "entrance and exit coincide in a 3x3 maze"
        );
        assert_eq!(graph.shortest_route_len(), Some(2), "start, cell, goal");
    }

    #[test]
    fn test_walled_entrance_is_disconnected() {
        let grid: Grid = "#####\n###.#\n#####".parse().expect("grid should parse");

        assert_eq!(
            build(&grid),
            Err(MazeError::DisconnectedTerminal {
                terminal: Terminal::Start,
                row: 1,
                col: 1
            }),
            "a walled entrance leaves the start without an edge"
        );
    }

    #[test]
    fn test_walled_exit_is_disconnected() {
        let grid: Grid = "#####\n#.###\n#####".parse().expect("grid should parse");

        assert!(
            matches!(
                build(&grid),
                Err(MazeError::DisconnectedTerminal {
                    terminal: Terminal::Goal,
                    ..
                })
            ),
            "a walled exit leaves the goal without an edge"
        );
    }

    #[test]
    fn test_open_room_has_cycles_and_junctions() {
        let graph = graph_of("#####\n#...#\n#...#\n#...#\n#####");
        let centre = graph
            .node(at(&graph, 2, 2))
            .expect("centre cell holds a node");

        assert_eq!(centre.degree(), 4, "an open room links every side");
        assert!(centre.is_junction(), "degree four is a junction");
        assert_eq!(graph.shortest_route_len(), Some(6), "start, 5 cells, goal");
    }

    #[test]
    fn test_distances_from_foreign_handle() {
        let graph = graph_of("###\n#.#\n###");
        let distances = graph.distances_from(NodeId(99));

        assert!(distances.iter().all(Option::is_none), "nothing is reachable");
        assert!(graph.neighbors(NodeId(99)).is_empty(), "foreign handles have no edges");
    }

    #[test]
    fn test_same_seed_same_graph() {
        let build_seeded = || {
            let grid = generate(21, 21, &mut ChaCha8Rng::seed_from_u64(9)).expect("valid maze");
            build(&grid).expect("generated grids always build")
        };

        assert_eq!(build_seeded(), build_seeded(), "graphs follow their grids");
    }

    proptest! {
        #[test]
        fn generated_graphs_are_connected(width in 3usize..30, height in 3usize..30, seed in any::<u64>()) {
            let grid = generate(width, height, &mut ChaCha8Rng::seed_from_u64(seed)).expect("valid maze");
            let graph = build(&grid).expect("generated grids always build");

            prop_assert_eq!(graph.len(), grid.path_count() + 2);
            prop_assert!(graph.distances_from(graph.start()).iter().all(Option::is_some));
        }

        #[test]
        fn edges_are_symmetric(width in 3usize..30, height in 3usize..30, seed in any::<u64>()) {
            let grid = generate(width, height, &mut ChaCha8Rng::seed_from_u64(seed)).expect("valid maze");
            let graph = build(&grid).expect("generated grids always build");

            for (id, node) in graph.nodes() {
                for neighbor in node.neighbors() {
                    prop_assert_ne!(*neighbor, id);
                    prop_assert_eq!(
                        graph.neighbors(*neighbor).iter().filter(|back| **back == id).count(),
                        1
                    );
                }
            }
        }
    }
}
