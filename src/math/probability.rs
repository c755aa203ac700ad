//! Probability thresholds for integer Bernoulli trials

use crate::io::error::{Result, invalid_parameter};

/// Precomputed threshold for a Bernoulli trial against a raw 64-bit draw
///
/// A trial succeeds when a drawn nonzero value is at most the limit, so the
/// hot loop compares integers instead of converting every draw to a float.
/// A limit of zero never succeeds and `u64::MAX` always does.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ProbabilityLimit(u64);

impl ProbabilityLimit {
    /// Limit that never succeeds
    pub const NEVER: Self = Self(0);
    /// Limit that always succeeds
    pub const ALWAYS: Self = Self(u64::MAX);

    /// Derive the limit for probability `p`
    ///
    /// Values at or below zero map to [`Self::NEVER`] and values at or above
    /// one map to [`Self::ALWAYS`]. Above one half the limit is computed from
    /// the complement so that probabilities close to one keep their precision.
    pub const fn new(p: f64) -> Self {
        const SCALE: f64 = u64::MAX as f64;

        if p.is_nan() || p <= 0.0 {
            Self::NEVER
        } else if p <= 0.5 {
            Self((p * SCALE) as u64)
        } else if p >= 1.0 {
            Self::ALWAYS
        } else {
            Self(u64::MAX - ((1.0 - p) * SCALE) as u64)
        }
    }

    /// Raw threshold value
    pub const fn raw(self) -> u64 {
        self.0
    }

    /// Whether no draw can ever succeed against this limit
    pub const fn is_never(self) -> bool {
        self.0 == 0
    }

    /// Test a raw draw against the limit
    pub const fn admits(self, value: u64) -> bool {
        value <= self.0
    }
}

/// Check that a configured probability is a finite value in `[0, 1]`
///
/// # Errors
///
/// Returns an invalid parameter error for NaN or out-of-range values
pub fn validate_probability(parameter: &'static str, p: f64) -> Result<f64> {
    if (0.0..=1.0).contains(&p) {
        Ok(p)
    } else {
        Err(invalid_parameter(
            parameter,
            &p,
            &"probability must lie in [0, 1]",
        ))
    }
}

/// Standard error of an observed success fraction
///
/// Used to qualify spanning fractions in reports. Returns zero when no trials
/// have been run.
pub fn binomial_standard_error(successes: u64, trials: u64) -> f64 {
    if trials == 0 {
        return 0.0;
    }

    let n = trials as f64;
    let p = successes as f64 / n;
    (p * (1.0 - p) / n).sqrt()
}
