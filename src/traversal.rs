//! Incremental graph search, one frontier pop per step.
//!
//! [`Traversal`] holds everything a search needs between two ticks: its visited set, its frontier,
//! the parent each node was discovered through and its cursor (the node it currently occupies).
//! The graph itself is shared read-only, so several searches can walk the same maze side by side
//! without seeing each other's progress.
//!
//! The search order is chosen by a [`Discipline`], which decides only which end of the frontier the
//! next node is taken from. Taking from the back gives a depth-first search, taking from the front
//! a breadth-first one; everything else is shared.

use std::{collections::VecDeque, fmt, marker::PhantomData, rc::Rc};

use fnv::{FnvBuildHasher, FnvHashMap, FnvHashSet};
use tracing::trace;

use crate::graph::{Graph, NodeId};

/// The two search strategies a race is run between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Last in, first out frontier.
    DepthFirst,
    /// First in, first out frontier.
    BreadthFirst,
}

impl Strategy {
    /// Three-letter abbreviation used in compact status lines.
    #[must_use]
    pub const fn abbreviation(self) -> &'static str {
        match self {
            Self::DepthFirst => "DFS",
            Self::BreadthFirst => "BFS",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DepthFirst => write!(formatter, "depth-first"),
            Self::BreadthFirst => write!(formatter, "breadth-first"),
        }
    }
}

/// Lifecycle of a search.
///
/// `Uninitialized` becomes `Active` through [`Traversal::init`]; an active search ends in either
/// `Succeeded` or `Exhausted` and stays there until it is initialized again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Status {
    /// No graph has been handed to the search yet.
    #[default]
    Uninitialized,
    /// The search still has nodes to explore.
    Active,
    /// The goal was taken from the frontier.
    Succeeded,
    /// The frontier ran dry without reaching the goal.
    Exhausted,
}

impl Status {
    /// Whether the status is terminal.
    #[must_use]
    pub const fn is_done(self) -> bool {
        matches!(self, Self::Succeeded | Self::Exhausted)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Uninitialized => write!(formatter, "idle"),
            Self::Active => write!(formatter, "searching"),
            Self::Succeeded => write!(formatter, "found goal"),
            Self::Exhausted => write!(formatter, "exhausted"),
        }
    }
}

/// Order in which a search takes nodes from its frontier.
///
/// Nodes are always pushed at the back of the frontier; a discipline only picks the end the next
/// node comes from.
pub trait Discipline {
    /// Strategy this discipline implements.
    const STRATEGY: Strategy;

    /// Removes the next node to explore, if any.
    fn take(frontier: &mut VecDeque<NodeId>) -> Option<NodeId>;
}

/// Stack discipline: the most recently discovered node is explored first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DepthFirst;

impl Discipline for DepthFirst {
    const STRATEGY: Strategy = Strategy::DepthFirst;

    fn take(frontier: &mut VecDeque<NodeId>) -> Option<NodeId> {
        frontier.pop_back()
    }
}

/// Queue discipline: the earliest discovered node is explored first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BreadthFirst;

impl Discipline for BreadthFirst {
    const STRATEGY: Strategy = Strategy::BreadthFirst;

    fn take(frontier: &mut VecDeque<NodeId>) -> Option<NodeId> {
        frontier.pop_front()
    }
}

/// Depth-first search over a shared graph.
pub type DepthFirstSearch = Traversal<DepthFirst>;

/// Breadth-first search over a shared graph.
pub type BreadthFirstSearch = Traversal<BreadthFirst>;

/// The graph a search runs over and the two nodes it runs between.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Round {
    /// Shared topology.
    graph: Rc<Graph>,
    /// Node the search started from.
    start: NodeId,
    /// Node the search is looking for.
    goal: NodeId,
}

/// A stepwise search whose frontier order is set by `D`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Traversal<D: Discipline> {
    /// Current graph and terminals; [`None`] until the first [`init`](Traversal::init).
    round: Option<Round>,
    /// Current lifecycle state.
    status: Status,
    /// Nodes discovered so far, the start included.
    visited: FnvHashSet<NodeId>,
    /// Node each discovered node was first reached from.
    parents: FnvHashMap<NodeId, NodeId>,
    /// Discovered nodes waiting to be explored.
    frontier: VecDeque<NodeId>,
    /// Nodes taken from the frontier, in order.
    explored: Vec<NodeId>,
    /// Node the search currently occupies.
    head: Option<NodeId>,
    /// Frontier discipline marker.
    discipline: PhantomData<D>,
}

impl<D: Discipline> Default for Traversal<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: Discipline> Traversal<D> {
    /// Creates an uninitialized search; it does nothing until [`init`](Traversal::init) is
    /// called.
    #[must_use]
    pub fn new() -> Self {
        Self {
            round: None,
            status: Status::Uninitialized,
            visited: FnvHashSet::with_hasher(FnvBuildHasher::default()),
            parents: FnvHashMap::with_hasher(FnvBuildHasher::default()),
            frontier: VecDeque::new(),
            explored: Vec::new(),
            head: None,
            discipline: PhantomData,
        }
    }

    /// Starts a fresh search from `start` towards `goal` over `graph`.
    ///
    /// Whatever the search did before is discarded: afterwards the visited set and the frontier
    /// both hold exactly `start`, the cursor sits on `start` and the status is
    /// [`Status::Active`].
    pub fn init(&mut self, graph: Rc<Graph>, start: NodeId, goal: NodeId) {
        self.visited.clear();
        self.parents.clear();
        self.frontier.clear();
        self.explored.clear();
        self.visited.reserve(graph.len());

        let _ = self.visited.insert(start);
        self.frontier.push_back(start);
        self.head = Some(start);
        self.round = Some(Round { graph, start, goal });
        self.status = Status::Active;
    }

    /// Explores exactly one node and returns the resulting status.
    ///
    /// Searches that are not [`Status::Active`] are left untouched. Otherwise the next node is
    /// taken from the frontier and becomes the cursor; if it is the goal the search succeeds,
    /// else its undiscovered neighbors are marked visited and queued. A search left with an
    /// empty frontier is exhausted.
    pub fn step(&mut self) -> Status {
        if self.status != Status::Active {
            return self.status;
        }
        let Some(round) = self.round.as_ref() else {
            return self.status;
        };
        let Some(node) = D::take(&mut self.frontier) else {
            self.status = Status::Exhausted;
            return self.status;
        };

        self.head = Some(node);
        self.explored.push(node);

        if node == round.goal {
            self.status = Status::Succeeded;
        } else {
            for neighbor in round.graph.neighbors(node) {
                if self.visited.insert(*neighbor) {
                    let _ = self.parents.insert(*neighbor, node);
                    self.frontier.push_back(*neighbor);
                }
            }
            if self.frontier.is_empty() {
                self.status = Status::Exhausted;
            }
        }

        trace!(
            strategy = %D::STRATEGY,
            node = node.index(),
            frontier = self.frontier.len(),
            status = %self.status,
            "search step"
        );

        self.status
    }

    /// Strategy of this search.
    #[must_use]
    pub const fn strategy(&self) -> Strategy {
        D::STRATEGY
    }

    /// Current lifecycle state.
    #[must_use]
    pub const fn status(&self) -> Status {
        self.status
    }

    /// Whether the search has reached a terminal state.
    #[must_use]
    pub const fn done(&self) -> bool {
        self.status.is_done()
    }

    /// Whether the search found the goal.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status == Status::Succeeded
    }

    /// Node the search currently occupies.
    #[must_use]
    pub const fn head(&self) -> Option<NodeId> {
        self.head
    }

    /// Number of nodes explored, i.e. of steps that took a node from the frontier.
    #[must_use]
    pub fn steps(&self) -> usize {
        self.explored.len()
    }

    /// Nodes explored so far, in exploration order.
    #[must_use]
    pub fn explored(&self) -> &[NodeId] {
        &self.explored
    }

    /// Whether a node has been discovered.
    #[must_use]
    pub fn is_visited(&self, id: NodeId) -> bool {
        self.visited.contains(&id)
    }

    /// Number of discovered nodes.
    #[must_use]
    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    /// Nodes waiting to be explored, from front to back.
    pub fn frontier(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.frontier.iter().copied()
    }

    /// Path from the start to the cursor through the nodes each one was discovered from.
    ///
    /// Once the search has succeeded this is the route it found to the goal; for a breadth-first
    /// search it is a shortest one. Empty before the first [`init`](Traversal::init).
    #[must_use]
    pub fn route(&self) -> Vec<NodeId> {
        let mut route = Vec::new();
        let mut cursor = self.head;
        while let Some(node) = cursor {
            route.push(node);
            cursor = self.parents.get(&node).copied();
        }
        route.reverse();

        route
    }
}
