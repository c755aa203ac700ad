//! Random source and probability utilities

/// Probability thresholds and derived statistics
pub mod probability;
/// Seedable xorshift64* generator
pub mod random;
