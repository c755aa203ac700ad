//! Single-pass grid generation fused with incremental union-find
//!
//! Cells are drawn in strict raster order. When a cell is drawn, its left,
//! up, and up-left neighbours are final, so every adjacency decision that
//! involves the new cell can be made immediately:
//!
//! ```text
//!   UL  U
//!   L   X
//! ```
//!
//! - `X` joins `L` and `U` unconditionally when they share its color.
//! - Drawing `X` completes the 2×2 block above, so both of its diagonals are
//!   decided here and nowhere else. `X`–`UL` is the up-left bond of `X`;
//!   `L`–`U` is the up-right bond of `L`, which could not be decided until
//!   `X` was known.
//! - A diagonal matters only in a crossed block (`UL == X`, `L == U != X`).
//!   Any other same-color diagonal is already connected through an
//!   orthogonal path. Crossed blocks are handed to the [`DiagonalPolicy`],
//!   which bonds at most one of the two diagonals. If `L` and `U` are
//!   already connected there is nothing to compete with, and `X`–`UL` is
//!   tried on its own bond probability.
//!
//! Random draws stay linear in the number of cells and no second pass is
//! needed to place diagonal bonds. After the scan every label is flattened so
//! the reducers read canonical roots directly from the parent array.

use crate::algorithm::diagonal::{DiagonalBond, DiagonalBonds, DiagonalJoins, DiagonalPolicy};
use crate::io::error::{Result, invalid_parameter, try_filled};
use crate::math::probability::{ProbabilityLimit, validate_probability};
use crate::math::random::Xorshift64Star;
use crate::spatial::lattice::{Color, Label, Lattice};
use crate::spatial::partition::DisjointSet;
use ndarray::Array2;

/// Grid generator and cluster builder, sized once and reused per iteration
#[derive(Clone, Debug)]
pub struct ClusterEngine {
    lattice: Lattice,
    partition: DisjointSet,
    black: ProbabilityLimit,
    diagonal: DiagonalPolicy,
    diagonal_joins: DiagonalJoins,
    bonds: Vec<DiagonalBond>,
}

impl ClusterEngine {
    /// Allocate the lattice and partition for a grid
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Either dimension is zero
    /// - The grid is too large for 32-bit labels
    /// - A probability is outside `[0, 1]`
    /// - A buffer cannot be allocated
    pub fn new(rows: usize, cols: usize, p_black: f64, diagonal: DiagonalBonds) -> Result<Self> {
        let p_black = validate_probability("black", p_black)?;
        diagonal.validate()?;

        let lattice = Lattice::new(rows, cols)?;
        let cells = lattice.dimensions().cells();
        let partition = DisjointSet::with_len(cells)?;
        let unset = DiagonalBond {
            block: 0,
            color: Color::White,
        };
        let mut bonds = try_filled("diagonal bonds", cells, unset)?;
        bonds.clear();

        Ok(Self {
            lattice,
            partition,
            black: ProbabilityLimit::new(p_black),
            diagonal: DiagonalPolicy::new(diagonal),
            diagonal_joins: DiagonalJoins::default(),
            bonds,
        })
    }

    /// Color grid of the most recent iteration
    pub const fn lattice(&self) -> &Lattice {
        &self.lattice
    }

    /// Flattened partition of the most recent iteration
    pub const fn partition(&self) -> &DisjointSet {
        &self.partition
    }

    /// Limit used for the black trial of every cell
    pub const fn black_limit(&self) -> ProbabilityLimit {
        self.black
    }

    /// Compiled diagonal bond policy
    pub const fn diagonal_policy(&self) -> &DiagonalPolicy {
        &self.diagonal
    }

    /// Diagonal bond counters of the most recent iteration
    pub const fn diagonal_joins(&self) -> DiagonalJoins {
        self.diagonal_joins
    }

    /// Diagonal bonds placed in the most recent iteration, in raster order
    pub const fn diagonal_bonds(&self) -> &[DiagonalBond] {
        self.bonds.as_slice()
    }

    /// Canonical cluster of a logical cell
    pub fn cluster_of(&self, row: usize, col: usize) -> Option<Label> {
        let dimensions = self.lattice.dimensions();
        (row < dimensions.rows && col < dimensions.cols)
            .then(|| self.partition.parent(dimensions.label(row, col)))
    }

    /// Generate a fresh random grid and its clusters
    pub fn generate(&mut self, rng: &mut Xorshift64Star) {
        let black = self.black;
        self.scan(rng, |_, _, rng| Color::from(rng.bernoulli(black)));
    }

    /// Build clusters over prescribed colors
    ///
    /// Diagonal bonds are still drawn from `rng`, so the same pattern can
    /// cluster differently under different seeds.
    ///
    /// # Errors
    ///
    /// Returns an invalid parameter error if the pattern shape differs from the grid
    pub fn generate_from(&mut self, pattern: &Array2<Color>, rng: &mut Xorshift64Star) -> Result<()> {
        let dimensions = self.lattice.dimensions();
        if pattern.dim() != (dimensions.rows, dimensions.cols) {
            return Err(invalid_parameter(
                "pattern",
                &format!("{}x{}", pattern.nrows(), pattern.ncols()),
                &format!("expected {}x{}", dimensions.rows, dimensions.cols),
            ));
        }

        self.scan(rng, |row, col, _| {
            pattern.get([row, col]).copied().unwrap_or(Color::White)
        });
        Ok(())
    }

    fn scan<F>(&mut self, rng: &mut Xorshift64Star, mut color_of: F)
    where
        F: FnMut(usize, usize, &mut Xorshift64Star) -> Color,
    {
        let dimensions = self.lattice.dimensions();
        let cols = dimensions.cols as Label;
        self.diagonal_joins = DiagonalJoins::default();
        self.bonds.clear();

        for row in 0..dimensions.rows {
            for col in 0..dimensions.cols {
                let color = color_of(row, col, rng);
                let label = dimensions.label(row, col);
                let near = self.lattice.neighborhood(row, col);

                self.partition.reset(label);
                self.lattice.paint(row, col, color);

                let left = near.left == Some(color);
                let up = near.up == Some(color);

                if !left && !up && near.up_left == Some(color) && near.left == near.up {
                    self.resolve_crossing(label, cols, color, rng);
                    continue;
                }

                match (left, up) {
                    (true, true) => {
                        self.partition.union(label, &[label - 1, label - cols]);
                    }
                    (true, false) => {
                        self.partition.union(label, &[label - 1]);
                    }
                    (false, true) => {
                        self.partition.union(label, &[label - cols]);
                    }
                    (false, false) => {}
                }
            }
        }

        for label in 0..dimensions.cells() as Label {
            self.partition.flatten(label);
        }
    }

    // `label` is the bottom-right cell of a crossed block whose main diagonal
    // has `color`; the anti-diagonal has the opposite color
    fn resolve_crossing(
        &mut self,
        label: Label,
        cols: Label,
        color: Color,
        rng: &mut Xorshift64Star,
    ) {
        if !self.diagonal.is_enabled() {
            return;
        }

        let (up_left, left, up) = (label - cols - 1, label - 1, label - cols);
        let joined = if self.partition.find(left) == self.partition.find(up) {
            self.diagonal.resolve_alone(color, rng).then_some(color)
        } else {
            self.diagonal.resolve(rng)
        };

        match joined {
            Some(diagonal) if diagonal == color => {
                self.partition.union(label, &[up_left]);
            }
            Some(_) => {
                self.partition.union(left, &[up]);
            }
            None => {}
        }

        if let Some(bonded) = joined {
            self.bonds.push(DiagonalBond {
                block: label,
                color: bonded,
            });
        }
        self.diagonal_joins.record(joined);
    }
}
