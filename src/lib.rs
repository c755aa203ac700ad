//! Two-color site percolation on rectangular grids
//!
//! Every cell is colored black or white at random, same-colored orthogonal
//! neighbours are joined into clusters in a single raster pass, and diagonal
//! bonds are added probabilistically without ever letting a white and a
//! black diagonal cross. Cluster sizes are accumulated into histograms and
//! clusters connecting opposite edges are reported as spanning.

#![forbid(unsafe_code)]

/// Cluster engine, diagonal bond policy, and simulation sessions
pub mod algorithm;
/// Cluster-size statistics and spanning detection
pub mod analysis;
/// Command line, reports, images, and error handling
pub mod io;
/// Random number generation and probability thresholds
pub mod math;
/// Color lattice and union-find partition
pub mod spatial;

pub use io::error::{PercolationError, Result};
