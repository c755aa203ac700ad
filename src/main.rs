//! CLI entry point for the two-color percolation simulator

use clap::Parser;
use percolate::io::cli::{Cli, SessionRunner};

fn main() -> percolate::Result<()> {
    let cli = Cli::parse();
    let runner = SessionRunner::new(cli);
    runner.run()
}
