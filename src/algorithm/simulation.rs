//! Simulation session: repeated generation with long-run accumulation
//!
//! A session owns every mutable piece of state it touches, including its
//! random generator. Independent sessions can run on separate threads and be
//! combined afterwards with [`Totals::merge`].

use crate::algorithm::diagonal::{DiagonalBonds, DiagonalJoins};
use crate::algorithm::engine::ClusterEngine;
use crate::analysis::spanning::{Axis, SpanningDetector};
use crate::analysis::statistics::{ClusterStatistics, ColorCounts, Histogram};
use crate::io::configuration::{DEFAULT_COLS, DEFAULT_P_BLACK, DEFAULT_ROWS};
use crate::io::error::Result;
use crate::math::probability::validate_probability;
use crate::math::random::Xorshift64Star;
use crate::spatial::lattice::{Color, Dimensions, Label, Lattice, PerColor};
use crate::spatial::partition::DisjointSet;
use ndarray::Array2;

/// Session parameters, consumed once at setup
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimulationConfig {
    /// Grid rows
    pub rows: usize,
    /// Grid columns
    pub cols: usize,
    /// Probability of each cell being black
    pub black: f64,
    /// Diagonal bond probabilities
    pub diagonal: DiagonalBonds,
    /// Explicit seed, or `None` to seed from the wall clock
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            black: DEFAULT_P_BLACK,
            diagonal: DiagonalBonds::default(),
            seed: None,
        }
    }
}

impl SimulationConfig {
    /// Check the grid size and every probability without allocating
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Either dimension is zero
    /// - The grid is too large for 32-bit labels
    /// - A probability is outside `[0, 1]`
    pub fn validate(&self) -> Result<()> {
        Dimensions::new(self.rows, self.cols)?;
        validate_probability("black", self.black)?;
        self.diagonal.validate()
    }
}

/// Results of a single iteration
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct IterationSummary {
    /// Fill and unique-cluster counts per color
    pub counts: PerColor<ColorCounts>,
    /// Diagonal bond counters
    pub diagonal_joins: DiagonalJoins,
    /// First axis a cluster of each color spanned, if any
    pub spanning: PerColor<Option<Axis>>,
}

/// Cumulative results, mergeable across independent sessions
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Totals {
    /// Cluster-size histograms per color
    pub histograms: PerColor<Histogram>,
    /// Iterations in which a cluster of each color spanned the grid
    pub spans: PerColor<u64>,
    /// Iterations accumulated
    pub iterations: u64,
}

impl Totals {
    /// Add another session's totals; both must cover the same grid size
    pub fn merge(&mut self, other: &Self) {
        for color in Color::ALL {
            self.histograms[color].merge(&other.histograms[color]);
            self.spans[color] += other.spans[color];
        }
        self.iterations += other.iterations;
    }
}

/// A single simulation session
#[derive(Clone, Debug)]
pub struct Simulation {
    config: SimulationConfig,
    seed: u64,
    rng: Xorshift64Star,
    engine: ClusterEngine,
    statistics: ClusterStatistics,
    spanning: SpanningDetector,
    spans: PerColor<u64>,
    iterations: u64,
    last: IterationSummary,
}

impl Simulation {
    /// Validate the configuration and allocate every buffer of the session
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Either dimension is zero
    /// - The grid is too large for 32-bit labels
    /// - A probability is outside `[0, 1]`
    /// - A buffer cannot be allocated
    pub fn new(config: SimulationConfig) -> Result<Self> {
        config.validate()?;
        let engine = ClusterEngine::new(config.rows, config.cols, config.black, config.diagonal)?;
        let statistics = ClusterStatistics::new(engine.lattice().dimensions().cells())?;
        let spanning = SpanningDetector::new(config.rows, config.cols)?;

        let rng = config
            .seed
            .map_or_else(Xorshift64Star::from_time, Xorshift64Star::new);

        Ok(Self {
            config,
            seed: rng.seed(),
            rng,
            engine,
            statistics,
            spanning,
            spans: PerColor::default(),
            iterations: 0,
            last: IterationSummary::default(),
        })
    }

    /// Configuration the session was built from
    pub const fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Seed the random stream started from; reusing it reproduces the run
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Clustering engine, for its limits and policy
    pub const fn engine(&self) -> &ClusterEngine {
        &self.engine
    }

    /// Color grid of the most recent iteration
    pub const fn lattice(&self) -> &Lattice {
        self.engine.lattice()
    }

    /// Flattened partition of the most recent iteration
    pub const fn partition(&self) -> &DisjointSet {
        self.engine.partition()
    }

    /// Summary of the most recent iteration
    pub const fn last(&self) -> &IterationSummary {
        &self.last
    }

    /// Accumulated histogram for one color
    pub fn histogram(&self, color: Color) -> &Histogram {
        self.statistics.histogram(color)
    }

    /// Iterations in which a cluster of `color` spanned the grid
    pub fn spans(&self, color: Color) -> u64 {
        self.spans[color]
    }

    /// Iterations run so far
    pub const fn iterations(&self) -> u64 {
        self.iterations
    }

    /// Snapshot of the cumulative results
    pub fn totals(&self) -> Totals {
        Totals {
            histograms: PerColor::from_fn(|color| self.histogram(color).clone()),
            spans: self.spans,
            iterations: self.iterations,
        }
    }

    /// Roots of every spanning cluster of `color` in the most recent grid
    pub fn spanning_roots(&mut self, color: Color) -> Vec<Label> {
        self.spanning
            .spanning_roots(self.engine.lattice(), self.engine.partition(), color)
    }

    /// Generate one random grid and fold it into the totals
    pub fn step(&mut self) -> &IterationSummary {
        self.engine.generate(&mut self.rng);
        self.accumulate()
    }

    /// Cluster a prescribed color pattern and fold it into the totals
    ///
    /// # Errors
    ///
    /// Returns an invalid parameter error if the pattern shape differs from the grid
    pub fn step_with_pattern(&mut self, pattern: &Array2<Color>) -> Result<&IterationSummary> {
        self.engine.generate_from(pattern, &mut self.rng)?;
        Ok(self.accumulate())
    }

    /// Run `iterations` random iterations, reporting each one to `on_iteration`
    pub fn run(&mut self, iterations: u64, mut on_iteration: impl FnMut(u64, &IterationSummary)) {
        for iteration in 1..=iterations {
            let summary = *self.step();
            on_iteration(iteration, &summary);
        }
    }

    fn accumulate(&mut self) -> &IterationSummary {
        let counts = self.statistics.reduce(&self.engine);
        let spanning = PerColor::from_fn(|color| {
            self.spanning
                .detect(self.engine.lattice(), self.engine.partition(), color)
        });

        for color in Color::ALL {
            if spanning[color].is_some() {
                self.spans[color] += 1;
            }
        }
        self.iterations += 1;

        self.last = IterationSummary {
            counts,
            diagonal_joins: self.engine.diagonal_joins(),
            spanning,
        };
        &self.last
    }
}
