//! Command-line configuration of the race.

use std::{path::PathBuf, time::Duration};

use clap::Parser;

use crate::generator::MazeSpec;

/// Race a depth-first and a breadth-first search through procedurally generated mazes.
#[derive(Debug, Clone, PartialEq, Parser)]
#[command(version, about)]
pub struct Config {
    /// Side of the maze in cells, used for both dimensions unless overridden. Even sides are
    /// rounded up to the next odd value.
    #[arg(short, long, default_value_t = 20)]
    pub size: usize,

    /// Number of columns, overriding `--size`.
    #[arg(long)]
    pub width: Option<usize>,

    /// Number of rows, overriding `--size`.
    #[arg(long)]
    pub height: Option<usize>,

    /// Side of one cell in world units; must be a finite value above zero.
    #[arg(long, default_value_t = 1., value_parser = positive_finite)]
    pub cell_size: f64,

    /// Do not draw the maze walls.
    #[arg(long)]
    pub no_walls: bool,

    /// Search steps per second.
    #[arg(
        short,
        long,
        default_value_t = 8,
        value_parser = clap::value_parser!(u32).range(1..=1000)
    )]
    pub ticks_per_second: u32,

    /// Seed of the maze stream; a random one is drawn when absent.
    #[arg(long)]
    pub seed: Option<u64>,

    /// File to write logs to. Nothing is logged without it.
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

/// Parses a strictly positive, finite number.
fn positive_finite(input: &str) -> Result<f64, String> {
    let value: f64 = input.parse().map_err(|err| format!("`{input}` is not a number: {err}"))?;
    if value.is_finite() && value > 0. {
        Ok(value)
    } else {
        Err(format!("`{input}` must be finite and greater than zero"))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            size: 20,
            width: None,
            height: None,
            cell_size: 1.,
            no_walls: false,
            ticks_per_second: 8,
            seed: None,
            log_file: None,
        }
    }
}

impl Config {
    /// Generation inputs described by the options.
    ///
    /// When no seed was given, `fallback_seed` is used so that the caller decides where the
    /// randomness comes from.
    #[must_use]
    pub fn maze_spec(&self, fallback_seed: u64) -> MazeSpec {
        MazeSpec {
            width: self.width.unwrap_or(self.size),
            height: self.height.unwrap_or(self.size),
            cell_size: self.cell_size,
            include_walls: !self.no_walls,
            seed: self.seed.unwrap_or(fallback_seed),
        }
    }

    /// Time between two race ticks.
    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs(1) / self.ticks_per_second.max(1)
    }
}
