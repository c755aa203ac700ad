//! Grid generation and the simulation session

/// Diagonal bond configuration and crossed-block resolution
pub mod diagonal;
/// Single-pass grid generation with incremental union-find
pub mod engine;
/// Session orchestration and long-run accumulation
pub mod simulation;
