//! Plain-text report of accumulated cluster statistics
//!
//! The report starts with `#` comment lines describing the run, followed by
//! one data line per cluster size:
//!
//! ```text
//! SIZE  WHITE_CLUSTERS  BLACK_CLUSTERS  TOTAL_CLUSTERS
//! ```
//!
//! Sizes are listed when their own bin or an adjacent bin is nonzero, so the
//! output traces the outline of the distribution without printing long runs
//! of zero lines.

use crate::algorithm::diagonal::DiagonalBonds;
use crate::algorithm::simulation::Simulation;
use crate::math::probability::{ProbabilityLimit, binomial_standard_error};
use crate::spatial::lattice::Color;
use std::io::Write;

const LIMIT_SCALE: &str = "18446744073709551615";

/// Write the full histogram report for a session
///
/// # Errors
///
/// Returns an error if writing to `out` fails
pub fn write_report(out: &mut impl Write, simulation: &Simulation) -> std::io::Result<()> {
    write_header(out, simulation)?;
    write_spanning(out, simulation)?;
    writeln!(out, "#")?;
    writeln!(
        out,
        "# size  white_clusters(size) black_clusters(size) clusters(size)"
    )?;

    let white = simulation.histogram(Color::White);
    let black = simulation.histogram(Color::Black);
    let nonzero = |size: usize| white.get(size) > 0 || black.get(size) > 0;

    for size in 1..=white.max_size() {
        if nonzero(size - 1) || nonzero(size) || nonzero(size + 1) {
            let (w, b) = (white.get(size), black.get(size));
            writeln!(out, "{size} {w} {b} {}", w + b)?;
        }
    }

    Ok(())
}

/// Write the one-line `P(black) : spanning%` summary
///
/// # Errors
///
/// Returns an error if writing to `out` fails
pub fn write_spanning_summary(out: &mut impl Write, simulation: &Simulation) -> std::io::Result<()> {
    writeln!(
        out,
        "{:.6} : {:.6}%",
        simulation.config().black,
        percent(simulation.spans(Color::Black), simulation.iterations())
    )
}

fn write_header(out: &mut impl Write, simulation: &Simulation) -> std::io::Result<()> {
    let config = simulation.config();

    writeln!(out, "# seed: {} (Xorshift 64*)", simulation.seed())?;
    writeln!(out, "# size: {} rows, {} columns", config.rows, config.cols)?;
    writeln!(
        out,
        "# P(black): {:.6} ({}/{LIMIT_SCALE})",
        config.black,
        simulation.engine().black_limit().raw()
    )?;

    match config.diagonal {
        DiagonalBonds::PerColor { white, black } => {
            write_probability(out, "white connected diagonally", white)?;
            write_probability(out, "black connected diagonally", black)?;
        }
        DiagonalBonds::Shared {
            probability,
            black_share,
        } => {
            write_probability(out, "connecting diagonally", probability)?;
            write_probability(out, "black connecting diagonally", black_share)?;
        }
    }

    writeln!(out, "# Iterations: {}", simulation.iterations())
}

fn write_probability(out: &mut impl Write, event: &str, p: f64) -> std::io::Result<()> {
    writeln!(
        out,
        "# P({event}): {p:.6} ({}/{LIMIT_SCALE})",
        ProbabilityLimit::new(p).raw()
    )
}

fn write_spanning(out: &mut impl Write, simulation: &Simulation) -> std::io::Result<()> {
    let iterations = simulation.iterations();
    writeln!(out, "#")?;
    for color in Color::ALL {
        let spans = simulation.spans(color);
        writeln!(
            out,
            "# {spans} times at least one {} cluster spanned the matrix ({:.6}% ± {:.6}%)",
            color.name(),
            percent(spans, iterations),
            100.0 * binomial_standard_error(spans, iterations)
        )?;
    }
    Ok(())
}

const fn percent(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        100.0 * part as f64 / whole as f64
    }
}
