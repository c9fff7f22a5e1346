//! Command-line interface for running solves over the tetromino catalog

use std::time::{Duration, Instant};

use clap::Parser;
use indicatif::ProgressBar;

use crate::io::configuration::{DEFAULT_BOARD_SIZE, DEFAULT_WORKER_COUNT, SPINNER_TICK_MS};
use crate::io::error::{Result, invalid_parameter};
use crate::io::render::render_snapshot;
use crate::search::coordinator::{Coordinator, Outcome};
use crate::spatial::catalog::Tetromino;
use crate::spatial::piece::{PieceId, PieceSpec};

#[derive(Parser)]
#[command(name = "quadtile")]
#[command(
    author,
    version,
    about = "Solve square tiling puzzles with racing backtracking workers"
)]
/// Command-line arguments for the puzzle solver
pub struct Cli {
    /// Piece counts by tetromino name, e.g. -p O=2 -p T=1 (repeatable)
    #[arg(short, long = "piece", value_name = "NAME=COUNT", required = true)]
    pub pieces: Vec<String>,

    /// Board side length
    #[arg(short, long, default_value_t = DEFAULT_BOARD_SIZE)]
    pub size: usize,

    /// Number of worker threads racing over the search space
    #[arg(short, long, default_value_t = DEFAULT_WORKER_COUNT)]
    pub workers: usize,

    /// Abort the solve after this many seconds
    #[arg(short, long, value_name = "SECONDS")]
    pub timeout: Option<u64>,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,
}

/// Parse one `NAME=COUNT` piece argument
fn parse_piece_entry(entry: &str) -> Result<(Tetromino, usize)> {
    let (name, count) = entry.split_once('=').ok_or_else(|| {
        invalid_parameter("piece", &entry, &"expected NAME=COUNT, e.g. O=2")
    })?;

    let tetromino = Tetromino::from_name(name.trim()).ok_or_else(|| {
        invalid_parameter(
            "piece",
            &name,
            &"unknown piece name; expected one of I, J, L, O, S, T, Z",
        )
    })?;

    let count: usize = count.trim().parse().map_err(|_| {
        invalid_parameter("piece", &entry, &"count must be a non-negative integer")
    })?;

    Ok((tetromino, count))
}

/// Expand piece arguments into specifications with sequential ids
///
/// Returns the specifications and a label table indexed by piece id, used to
/// render the solved board with piece letters.
///
/// # Errors
///
/// Returns an error if any entry is malformed or names an unknown piece.
pub fn build_piece_specs(entries: &[String]) -> Result<(Vec<PieceSpec>, Vec<char>)> {
    let mut specs = Vec::new();
    let mut labels = Vec::new();

    for entry in entries {
        let (tetromino, count) = parse_piece_entry(entry)?;
        for _ in 0..count {
            let id = PieceId(specs.len() as u32);
            specs.push(PieceSpec::new(id, tetromino.pattern())?);
            labels.push(tetromino.letter());
        }
    }

    Ok((specs, labels))
}

/// Runs one solve according to CLI arguments and reports the outcome
pub struct SolveRunner {
    cli: Cli,
}

impl SolveRunner {
    /// Create a runner with the given CLI arguments
    pub const fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the solve to completion and print the outcome
    ///
    /// # Errors
    ///
    /// Returns an error if the piece arguments or solver configuration are
    /// invalid, or if the search reports an internal fault.
    pub fn run(&self) -> Result<()> {
        let (specs, labels) = build_piece_specs(&self.cli.pieces)?;

        let coordinator = Coordinator::new();
        let handle = coordinator.start_solving(&specs, self.cli.size, self.cli.workers)?;

        let spinner = (!self.cli.quiet).then(|| {
            let bar = ProgressBar::new_spinner();
            bar.set_message(format!(
                "Solving {size}x{size} with {count} pieces...",
                size = self.cli.size,
                count = specs.len()
            ));
            bar.enable_steady_tick(Duration::from_millis(SPINNER_TICK_MS));
            bar
        });

        let started = Instant::now();
        let outcome = match self.cli.timeout {
            Some(seconds) => handle.wait_with_deadline(Duration::from_secs(seconds))?,
            None => handle.wait()?,
        };
        let elapsed = started.elapsed();

        if let Some(bar) = spinner {
            bar.finish_and_clear();
        }

        Self::report(&outcome, &labels, elapsed);
        Ok(())
    }

    // Allow print for user-facing result output
    #[allow(clippy::print_stdout)]
    fn report(outcome: &Outcome, labels: &[char], elapsed: std::time::Duration) {
        match outcome {
            Outcome::Solved(snapshot) => {
                let grid = render_snapshot(snapshot, |id| {
                    labels.get(id.0 as usize).copied().unwrap_or('?')
                });
                println!("Solved in {elapsed:.2?}:\n{grid}");
            }
            Outcome::Exhausted => {
                println!("No tiling exists for these pieces ({elapsed:.2?})");
            }
            Outcome::Cancelled => {
                println!("Solve cancelled after {elapsed:.2?}");
            }
        }
    }
}
