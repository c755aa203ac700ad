//! Spatial data structures
//!
//! This module contains the grid-side state of a session:
//! - The padded two-color lattice and color types
//! - The disjoint-set partition over cell labels

/// Padded color grid, colors, and dimensions
pub mod lattice;
/// Union-find over cell labels
pub mod partition;

pub use lattice::{Color, Label, Lattice, PerColor};
pub use partition::DisjointSet;
