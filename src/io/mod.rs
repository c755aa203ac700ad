//! Command line, files, and terminal output

/// Command-line arguments and the session runner
pub mod cli;
/// Compile-time defaults and tuning constants
pub mod configuration;
/// Error types and fallible allocation helpers
pub mod error;
/// PNG rendering of clustered grids
pub mod image;
/// Color patterns loaded from images
pub mod pattern;
/// Iteration progress display
pub mod progress;
/// Textual histogram report
pub mod report;
