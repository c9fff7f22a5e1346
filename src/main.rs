//! CLI entry point for the concurrent square-tiling puzzle solver

use clap::Parser;
use quadtile::io::cli::{Cli, SolveRunner};

fn main() -> quadtile::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let runner = SolveRunner::new(cli);
    runner.run()
}
