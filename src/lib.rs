//! Terminal race between a depth-first and a breadth-first search.
//!
//! Each round carves a perfect maze by randomized recursive backtracking, turns it into a graph of
//! traversable cells with a start terminal above the entrance and a goal terminal below the exit,
//! and steps both searches over that graph one node per tick. The first search to take the goal
//! from its frontier wins the round; ties go to depth-first.
//!
//! The core ([`generator`], [`graph`], [`traversal`], [`race`] and [`layout`]) is independent of
//! the terminal and of the clock. The binary drives it through [`App`], a Ratatui front end.

#![expect(
    clippy::cargo_common_metadata,
    reason = "Temporary allow during development."
)]

mod app;
pub mod config;
pub mod errors;
mod events;
pub mod generator;
pub mod graph;
pub mod grid;
pub mod layout;
mod pacing;
pub mod race;
pub mod telemetry;
pub mod traversal;
mod types;
mod ui;

pub use app::App;
pub use config::Config;
pub use errors::MazeError;
pub use generator::MazeSpec;
pub use race::Race;
