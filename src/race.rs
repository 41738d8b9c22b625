//! Lockstep race between a depth-first and a breadth-first search.
//!
//! A [`Race`] owns the maze of the current round and both searches walking it. Every
//! [`tick`](Race::tick) advances each search by exactly one node, depth-first first, and the first
//! search to reach the goal is recorded as the winner. Once both searches are done the host may
//! start a new round with [`reset`](Race::reset), which draws a fresh maze from the same random
//! stream the previous rounds came from.

use std::rc::Rc;

use rand::{Rng, SeedableRng as _};
use rand_chacha::ChaCha8Rng;
use tracing::{info, warn};

use crate::{
    errors::MazeError,
    generator::MazeSpec,
    graph::{build, Graph, NodeId},
    grid::Grid,
    layout::Layout,
    traversal::{BreadthFirstSearch, DepthFirstSearch, Status, Strategy},
};

/// What happened during one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickReport {
    /// Ticks elapsed in the current round, this one included.
    pub tick: u64,
    /// Status of the depth-first search after the tick.
    pub depth_first: Status,
    /// Status of the breadth-first search after the tick.
    pub breadth_first: Status,
    /// Winner of the round, if one has been decided.
    pub winner: Option<Strategy>,
}

/// One maze, its two searches and the bookkeeping of the round being run.
#[derive(Debug)]
pub struct Race<R = ChaCha8Rng> {
    /// Generation inputs, reused by every round.
    spec: MazeSpec,
    /// Source of every maze of the session.
    rng: R,
    /// Grid of the current round.
    grid: Grid,
    /// Graph of the current round, shared with both searches.
    graph: Rc<Graph>,
    /// World positions of the current round's nodes and walls.
    layout: Layout,
    /// The depth-first contender.
    depth_first: DepthFirstSearch,
    /// The breadth-first contender.
    breadth_first: BreadthFirstSearch,
    /// Ticks elapsed in the current round.
    tick: u64,
    /// Rounds started since construction, the current one included.
    round: u64,
    /// First strategy to reach the goal in the current round.
    winner: Option<Strategy>,
    /// Whether the host gave up on the current round.
    abandoned: bool,
}

impl Race<ChaCha8Rng> {
    /// Starts a race whose mazes are drawn from a [`ChaCha8Rng`] seeded with `spec.seed`.
    ///
    /// # Errors
    ///
    /// - [`MazeError::InvalidDimensions`] if the sides of `spec` are out of range.
    pub fn new(spec: MazeSpec) -> Result<Self, MazeError> {
        Self::with_rng(spec, ChaCha8Rng::seed_from_u64(spec.seed))
    }
}

impl<R: Rng> Race<R> {
    /// Starts a race whose mazes are drawn from `rng`.
    ///
    /// # Errors
    ///
    /// - [`MazeError::InvalidDimensions`] if the sides of `spec` are out of range.
    pub fn with_rng(spec: MazeSpec, mut rng: R) -> Result<Self, MazeError> {
        let grid = spec.generate(&mut rng)?;
        Self::with_grid(spec, grid, rng)
    }

    /// Starts a race whose first round runs on `grid`; later rounds are drawn from `rng`.
    ///
    /// # Errors
    ///
    /// - [`MazeError::DisconnectedTerminal`] if the entrance or exit of `grid` is a wall.
    pub fn with_grid(spec: MazeSpec, grid: Grid, rng: R) -> Result<Self, MazeError> {
        let graph = Rc::new(build(&grid)?);
        let mut race = Self {
            spec,
            rng,
            layout: Layout::new(&grid, &graph, &spec),
            grid,
            graph,
            depth_first: DepthFirstSearch::new(),
            breadth_first: BreadthFirstSearch::new(),
            tick: 0,
            round: 0,
            winner: None,
            abandoned: false,
        };
        race.start_round();

        Ok(race)
    }

    /// Advances both searches by one step and reports the outcome.
    ///
    /// The depth-first search steps first, so when both reach the goal on the same tick the
    /// depth-first one wins. Once [`both_done`](Race::both_done) holds, ticking does nothing and
    /// keeps returning the final report.
    pub fn tick(&mut self) -> TickReport {
        if !self.both_done() {
            self.tick += 1;
            let _ = self.depth_first.step();
            let _ = self.breadth_first.step();

            if self.winner.is_none() {
                self.winner = if self.depth_first.is_success() {
                    Some(Strategy::DepthFirst)
                } else if self.breadth_first.is_success() {
                    Some(Strategy::BreadthFirst)
                } else {
                    None
                };
                if let Some(winner) = self.winner {
                    info!(round = self.round, tick = self.tick, %winner, "goal reached first");
                }
            }

            if self.both_done() {
                info!(
                    round = self.round,
                    tick = self.tick,
                    depth_first_steps = self.depth_first.steps(),
                    breadth_first_steps = self.breadth_first.steps(),
                    "race over"
                );
            }
        }

        self.report()
    }

    /// Current outcome, without stepping.
    #[must_use]
    pub fn report(&self) -> TickReport {
        TickReport {
            tick: self.tick,
            depth_first: self.depth_first.status(),
            breadth_first: self.breadth_first.status(),
            winner: self.winner,
        }
    }

    /// Whether both searches have finished, or the round was abandoned.
    #[must_use]
    pub const fn both_done(&self) -> bool {
        self.abandoned || (self.depth_first.done() && self.breadth_first.done())
    }

    /// First strategy to reach the goal in the current round.
    #[must_use]
    pub const fn winner(&self) -> Option<Strategy> {
        self.winner
    }

    /// Ends the current round early so that it can be reset.
    pub fn abandon(&mut self) {
        if !self.both_done() {
            info!(round = self.round, tick = self.tick, "round abandoned");
            self.abandoned = true;
        }
    }

    /// Starts a new round on a freshly generated maze if `trigger` is raised.
    ///
    /// Returns whether a new round was started. Nothing changes when `trigger` is `false`, or
    /// when generating the new maze fails.
    ///
    /// # Errors
    ///
    /// - [`MazeError::PrematureReset`] if `trigger` is raised while a search is still running.
    /// - [`MazeError::InvalidDimensions`] or [`MazeError::DisconnectedTerminal`] if the new maze
    ///   cannot be produced.
    pub fn reset(&mut self, trigger: bool) -> Result<bool, MazeError> {
        if !trigger {
            return Ok(false);
        }
        if !self.both_done() {
            warn!(round = self.round, tick = self.tick, "restart requested before the race ended");
            return Err(MazeError::PrematureReset);
        }

        let grid = self.spec.generate(&mut self.rng)?;
        let graph = Rc::new(build(&grid)?);
        self.layout = Layout::new(&grid, &graph, &self.spec);
        self.grid = grid;
        self.graph = graph;
        self.start_round();

        Ok(true)
    }

    /// Points both searches at the current graph and clears the round's bookkeeping.
    fn start_round(&mut self) {
        let (start, goal) = (self.graph.start(), self.graph.goal());
        self.depth_first.init(Rc::clone(&self.graph), start, goal);
        self.breadth_first.init(Rc::clone(&self.graph), start, goal);
        self.tick = 0;
        self.winner = None;
        self.abandoned = false;
        self.round += 1;

        info!(
            round = self.round,
            rows = self.grid.rows(),
            cols = self.grid.cols(),
            nodes = self.graph.len(),
            "round started"
        );
    }

    /// Generation inputs of the race.
    #[must_use]
    pub const fn spec(&self) -> &MazeSpec {
        &self.spec
    }

    /// Grid of the current round.
    #[must_use]
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Graph of the current round.
    #[must_use]
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// World positions of the current round.
    #[must_use]
    pub const fn layout(&self) -> &Layout {
        &self.layout
    }

    /// The depth-first contender.
    #[must_use]
    pub const fn depth_first(&self) -> &DepthFirstSearch {
        &self.depth_first
    }

    /// The breadth-first contender.
    #[must_use]
    pub const fn breadth_first(&self) -> &BreadthFirstSearch {
        &self.breadth_first
    }

    /// Status of one contender.
    #[must_use]
    pub const fn status(&self, strategy: Strategy) -> Status {
        match strategy {
            Strategy::DepthFirst => self.depth_first.status(),
            Strategy::BreadthFirst => self.breadth_first.status(),
        }
    }

    /// Node one contender currently occupies.
    #[must_use]
    pub const fn head(&self, strategy: Strategy) -> Option<NodeId> {
        match strategy {
            Strategy::DepthFirst => self.depth_first.head(),
            Strategy::BreadthFirst => self.breadth_first.head(),
        }
    }

    /// Nodes one contender has explored, in order.
    #[must_use]
    pub fn explored(&self, strategy: Strategy) -> &[NodeId] {
        match strategy {
            Strategy::DepthFirst => self.depth_first.explored(),
            Strategy::BreadthFirst => self.breadth_first.explored(),
        }
    }

    /// Start-to-cursor route of one contender.
    #[must_use]
    pub fn route(&self, strategy: Strategy) -> Vec<NodeId> {
        match strategy {
            Strategy::DepthFirst => self.depth_first.route(),
            Strategy::BreadthFirst => self.breadth_first.route(),
        }
    }

    /// Ticks elapsed in the current round.
    #[must_use]
    pub const fn ticks(&self) -> u64 {
        self.tick
    }

    /// Rounds started since construction, the current one included.
    #[must_use]
    pub const fn round(&self) -> u64 {
        self.round
    }

    /// Whether the current round was abandoned.
    #[must_use]
    pub const fn is_abandoned(&self) -> bool {
        self.abandoned
    }
}
