//! Reductions over a finished partition

/// Spanning cluster detection
pub mod spanning;
/// Cluster-size histograms and fill counts
pub mod statistics;
