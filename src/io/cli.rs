//! Command-line interface for running percolation sessions

use crate::algorithm::diagonal::DiagonalBonds;
use crate::algorithm::simulation::{Simulation, SimulationConfig};
use crate::io::configuration::{
    DEFAULT_COLS, DEFAULT_D_BLACK, DEFAULT_D_WHITE, DEFAULT_ITERATIONS, DEFAULT_P_BLACK,
    DEFAULT_ROWS,
};
use crate::io::error::{PercolationError, Result};
use crate::io::image::export_grid_as_png;
use crate::io::pattern::load_pattern;
use crate::io::progress::IterationProgress;
use crate::io::report::{write_report, write_spanning_summary};
use crate::spatial::lattice::Color;
use clap::Parser;
use ndarray::Array2;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(name = "percolate")]
#[command(
    author,
    version,
    about = "Simulate two-color site percolation with diagonal bonds"
)]
/// Command-line arguments for the percolation simulator
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Number of grid rows
    #[arg(short, long, conflicts_with = "size")]
    pub rows: Option<usize>,

    /// Number of grid columns
    #[arg(short, long, conflicts_with = "size")]
    pub cols: Option<usize>,

    /// Side length of a square grid
    #[arg(short = 'L', long)]
    pub size: Option<usize>,

    /// Probability of a cell being black
    #[arg(short = 'p', long, conflicts_with = "white")]
    pub black: Option<f64>,

    /// Probability of a cell being white
    #[arg(long)]
    pub white: Option<f64>,

    /// Probability of white cells connecting diagonally
    #[arg(long, default_value_t = DEFAULT_D_WHITE)]
    pub dwhite: f64,

    /// Probability of black cells connecting diagonally
    #[arg(long, default_value_t = DEFAULT_D_BLACK)]
    pub dblack: f64,

    /// Probability of a crossed block connecting diagonally at all
    #[arg(long, conflicts_with_all = ["dwhite", "dblack"])]
    pub diag: Option<f64>,

    /// Share of diagonal connections that join black cells
    #[arg(long, requires = "diag", default_value_t = 0.5)]
    pub diag_black: f64,

    /// Number of grids to accumulate
    #[arg(short = 'n', long, default_value_t = DEFAULT_ITERATIONS)]
    pub iterations: u64,

    /// Random seed; 0 seeds from the clock
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Suppress progress and status output
    #[arg(short, long)]
    pub quiet: bool,

    /// Write the report to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Save the last grid as a PNG
    #[arg(short, long, value_name = "FILE")]
    pub image: Option<PathBuf>,

    /// Cluster the colors of a PNG instead of random colors
    #[arg(long, value_name = "FILE")]
    pub pattern: Option<PathBuf>,

    /// Print only the black spanning percentage
    #[arg(long)]
    pub spanning_only: bool,
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Probability of a cell being black after resolving `--white`
    pub const fn black_probability(&self) -> f64 {
        match (self.black, self.white) {
            (Some(black), _) => black,
            (None, Some(white)) => 1.0 - white,
            (None, None) => DEFAULT_P_BLACK,
        }
    }

    /// Diagonal bond model selected by the flags
    pub fn diagonal_bonds(&self) -> DiagonalBonds {
        self.diag.map_or(
            DiagonalBonds::PerColor {
                white: self.dwhite,
                black: self.dblack,
            },
            |probability| DiagonalBonds::Shared {
                probability,
                black_share: self.diag_black,
            },
        )
    }

    /// Session configuration for a grid of the requested size
    pub fn config(&self) -> SimulationConfig {
        let (rows, cols) = self.size.map_or_else(
            || {
                (
                    self.rows.unwrap_or(DEFAULT_ROWS),
                    self.cols.unwrap_or(DEFAULT_COLS),
                )
            },
            |side| (side, side),
        );

        SimulationConfig {
            rows,
            cols,
            black: self.black_probability(),
            diagonal: self.diagonal_bonds(),
            seed: self.seed.filter(|&seed| seed != 0),
        }
    }
}

/// Runs one session from parsed arguments and writes its outputs
pub struct SessionRunner {
    cli: Cli,
}

impl SessionRunner {
    /// Create a runner for the given CLI arguments
    pub const fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run every iteration, then write the report and optional image
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The configuration is invalid
    /// - The pattern image cannot be loaded
    /// - The report or image cannot be written
    pub fn run(&self) -> Result<()> {
        let start_time = Instant::now();
        let pattern = self.cli.pattern.as_deref().map(load_pattern).transpose()?;

        let mut config = self.cli.config();
        if let Some(pattern) = &pattern {
            (config.rows, config.cols) = pattern.dim();
        }

        let mut simulation = Simulation::new(config)?;
        self.status(&format!("seed: {}", simulation.seed()));

        match &pattern {
            Some(pattern) => self.run_pattern(&mut simulation, pattern)?,
            None => self.run_random(&mut simulation),
        }

        self.write_output(&simulation)?;

        if let Some(path) = &self.cli.image {
            export_grid_as_png(&mut simulation, path)?;
            self.status(&format!("image: {}", path.display()));
        }

        self.status(&format!(
            "{} iterations in {:.2?}",
            simulation.iterations(),
            start_time.elapsed()
        ));
        Ok(())
    }

    fn run_random(&self, simulation: &mut Simulation) {
        let mut progress = if self.cli.should_show_progress() {
            IterationProgress::new(self.cli.iterations)
        } else {
            IterationProgress::hidden()
        };

        simulation.run(self.cli.iterations, |iteration, summary| {
            progress.update(iteration, summary);
        });
        progress.finish();
    }

    fn run_pattern(&self, simulation: &mut Simulation, pattern: &Array2<Color>) -> Result<()> {
        for _ in 0..self.cli.iterations {
            simulation.step_with_pattern(pattern)?;
        }
        Ok(())
    }

    fn write_output(&self, simulation: &Simulation) -> Result<()> {
        let Some(path) = &self.cli.output else {
            let mut out = std::io::stdout().lock();
            return self
                .write_results(&mut out, simulation)
                .and_then(|()| out.flush())
                .map_err(|e| PercolationError::FileSystem {
                    path: PathBuf::from("<stdout>"),
                    operation: "write",
                    source: e,
                });
        };

        let file = File::create(path).map_err(|e| PercolationError::FileSystem {
            path: path.clone(),
            operation: "create file",
            source: e,
        })?;
        let mut out = BufWriter::new(file);
        self.write_results(&mut out, simulation)
            .and_then(|()| out.flush())
            .map_err(|e| PercolationError::FileSystem {
                path: path.clone(),
                operation: "write",
                source: e,
            })
    }

    fn write_results(&self, out: &mut impl Write, simulation: &Simulation) -> std::io::Result<()> {
        if self.cli.spanning_only {
            write_spanning_summary(out, simulation)
        } else {
            write_report(out, simulation)
        }
    }

    fn status(&self, message: &str) {
        // Allow print for user feedback on stderr, keeping stdout for the report
        #[allow(clippy::print_stderr)]
        if !self.cli.quiet {
            eprintln!("{message}");
        }
    }
}
