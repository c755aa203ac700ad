//! Diagonal bond configuration and crossed-block resolution
//!
//! With only two colors, a diagonal bond changes connectivity only inside a
//! crossed 2×2 block: one diagonal pair shares a color and the other pair
//! shares the opposite color. Both diagonals can never join, or two clusters
//! of different colors would pass through each other.

use crate::io::error::Result;
use crate::math::probability::{ProbabilityLimit, validate_probability};
use crate::math::random::Xorshift64Star;
use crate::spatial::lattice::{Color, Label, PerColor};

/// How diagonal bonds are configured
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DiagonalBonds {
    /// Independent bond probability per color
    PerColor {
        /// Probability of a white diagonal bond
        white: f64,
        /// Probability of a black diagonal bond
        black: f64,
    },
    /// One shared bond probability, split between the colors
    Shared {
        /// Probability that a crossed block is joined diagonally at all
        probability: f64,
        /// Probability that a joined crossed block joins its black diagonal
        black_share: f64,
    },
}

impl Default for DiagonalBonds {
    fn default() -> Self {
        Self::PerColor {
            white: 0.0,
            black: 0.0,
        }
    }
}

impl DiagonalBonds {
    /// Check every probability lies in `[0, 1]`
    ///
    /// # Errors
    ///
    /// Returns an invalid parameter error naming the offending probability
    pub fn validate(&self) -> Result<()> {
        match *self {
            Self::PerColor { white, black } => {
                validate_probability("dwhite", white)?;
                validate_probability("dblack", black)?;
            }
            Self::Shared {
                probability,
                black_share,
            } => {
                validate_probability("diag", probability)?;
                validate_probability("diag-black", black_share)?;
            }
        }
        Ok(())
    }
}

/// Per-iteration diagonal bond counters
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DiagonalJoins {
    /// Crossed blocks joined along their white diagonal
    pub white: u64,
    /// Crossed blocks joined along their black diagonal
    pub black: u64,
    /// Crossed blocks left without a diagonal bond
    pub skipped: u64,
}

impl DiagonalJoins {
    /// Crossed blocks seen in total
    pub const fn opportunities(&self) -> u64 {
        self.white + self.black + self.skipped
    }

    /// Count one resolved crossed block
    pub const fn record(&mut self, joined: Option<Color>) {
        match joined {
            Some(Color::White) => self.white += 1,
            Some(Color::Black) => self.black += 1,
            None => self.skipped += 1,
        }
    }
}

/// A diagonal bond placed inside a crossed block
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DiagonalBond {
    /// Label of the bottom-right cell of the block
    pub block: Label,
    /// Color of the bonded diagonal
    pub color: Color,
}

/// Diagonal bonds compiled into integer limits
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DiagonalPolicy {
    /// Independent trials per color, with a weighted tie-break
    PerColor {
        /// Bond limit per color
        bond: PerColor<ProbabilityLimit>,
        /// Chance of keeping the black diagonal when both trials succeed
        black_tie: ProbabilityLimit,
    },
    /// One trial for the block, then one trial for the color
    Shared {
        /// Limit for joining the block at all
        bond: ProbabilityLimit,
        /// Limit for picking the black diagonal
        black_share: ProbabilityLimit,
    },
}

impl DiagonalPolicy {
    /// Compile configured probabilities into limits
    pub const fn new(bonds: DiagonalBonds) -> Self {
        match bonds {
            DiagonalBonds::PerColor { white, black } => {
                let total = white + black;
                let black_tie = if total > 0.0 { black / total } else { 0.0 };
                Self::PerColor {
                    bond: PerColor::new(ProbabilityLimit::new(white), ProbabilityLimit::new(black)),
                    black_tie: ProbabilityLimit::new(black_tie),
                }
            }
            DiagonalBonds::Shared {
                probability,
                black_share,
            } => Self::Shared {
                bond: ProbabilityLimit::new(probability),
                black_share: ProbabilityLimit::new(black_share),
            },
        }
    }

    /// Whether any diagonal bond can ever form
    ///
    /// A disabled policy draws nothing, so the random stream is identical to
    /// a purely orthogonal run.
    pub const fn is_enabled(&self) -> bool {
        match self {
            Self::PerColor { bond, .. } => !(bond.white.is_never() && bond.black.is_never()),
            Self::Shared { bond, .. } => !bond.is_never(),
        }
    }

    /// Decide whether a lone diagonal of `color` joins
    ///
    /// Used when the opposite diagonal of a crossed block is already
    /// connected by another path, so the two bonds do not compete.
    pub const fn resolve_alone(&self, color: Color, rng: &mut Xorshift64Star) -> bool {
        let limit = match self {
            Self::PerColor { bond, .. } => match color {
                Color::White => bond.white,
                Color::Black => bond.black,
            },
            Self::Shared { bond, .. } => *bond,
        };
        rng.bernoulli(limit)
    }

    /// Decide which diagonal of a crossed block joins, if any
    ///
    /// Returns the color of the joined diagonal. At most one color is ever
    /// returned, so at most one diagonal of the block is bonded.
    pub fn resolve(&self, rng: &mut Xorshift64Star) -> Option<Color> {
        match *self {
            Self::PerColor { bond, black_tie } => {
                let white = rng.bernoulli(bond.white);
                let black = rng.bernoulli(bond.black);
                match (white, black) {
                    (false, false) => None,
                    (true, false) => Some(Color::White),
                    (false, true) => Some(Color::Black),
                    (true, true) => Some(Color::from(rng.bernoulli(black_tie))),
                }
            }
            Self::Shared { bond, black_share } => rng
                .bernoulli(bond)
                .then(|| Color::from(rng.bernoulli(black_share))),
        }
    }
}
