//! Cluster-size histograms accumulated across iterations
//!
//! Cluster sizes are only final once the whole grid has been generated, so the
//! reduction runs after each scan in two passes: count cells per canonical
//! root, then bump the histogram bin for each nonzero count.

use crate::algorithm::engine::ClusterEngine;
use crate::io::error::{Result, try_filled};
use crate::spatial::lattice::{Color, PerColor};

/// Count of clusters per cluster size
///
/// Bins run from size 0 to size `cells + 1`. The two end bins can never be
/// reached and always read zero, so scans that look at a bin and its
/// neighbours need no special cases at the ends.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Histogram {
    bins: Vec<u64>,
}

impl Histogram {
    /// Allocate an empty histogram for grids of `cells` cells
    ///
    /// # Errors
    ///
    /// Returns an out-of-memory error if the bins cannot be allocated
    pub fn new(cells: usize) -> Result<Self> {
        Ok(Self {
            bins: try_filled("histogram", cells.saturating_add(2), 0)?,
        })
    }

    /// Number of clusters of `size` cells; zero for out-of-range sizes
    pub fn get(&self, size: usize) -> u64 {
        self.bins.get(size).copied().unwrap_or(0)
    }

    /// Largest size a cluster can have
    pub const fn max_size(&self) -> usize {
        self.bins.len().saturating_sub(2)
    }

    /// Iterate nonzero bins as (size, count)
    pub fn iter(&self) -> impl Iterator<Item = (usize, u64)> + '_ {
        self.bins
            .iter()
            .enumerate()
            .filter(|&(_, &count)| count > 0)
            .map(|(size, &count)| (size, count))
    }

    /// Total number of clusters recorded
    pub fn clusters(&self) -> u64 {
        self.bins.iter().sum()
    }

    /// Total number of cells covered by recorded clusters
    pub fn cells(&self) -> u64 {
        self.iter().map(|(size, count)| size as u64 * count).sum()
    }

    /// Add the bins of another histogram over the same grid size
    ///
    /// Independent sessions can be run separately and merged afterwards.
    pub fn merge(&mut self, other: &Self) {
        for (bin, &count) in self.bins.iter_mut().zip(&other.bins) {
            *bin += count;
        }
    }

    fn record(&mut self, size: usize) {
        if let Some(bin) = self.bins.get_mut(size) {
            *bin += 1;
        }
    }
}

/// Per-iteration cell and cluster counts for one color
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ColorCounts {
    /// Cells of this color
    pub fill: u64,
    /// Distinct clusters of this color
    pub unique: u64,
}

/// Statistics reducer with its own scratch counters
#[derive(Clone, Debug)]
pub struct ClusterStatistics {
    root_counts: PerColor<Vec<u32>>,
    histograms: PerColor<Histogram>,
}

impl ClusterStatistics {
    /// Allocate counters and empty histograms for grids of `cells` cells
    ///
    /// # Errors
    ///
    /// Returns an out-of-memory error if any buffer cannot be allocated
    pub fn new(cells: usize) -> Result<Self> {
        let labels = cells.saturating_add(2);
        Ok(Self {
            root_counts: PerColor::new(
                try_filled("white root counts", labels, 0)?,
                try_filled("black root counts", labels, 0)?,
            ),
            histograms: PerColor::new(Histogram::new(cells)?, Histogram::new(cells)?),
        })
    }

    /// Accumulated histogram for one color
    pub fn histogram(&self, color: Color) -> &Histogram {
        &self.histograms[color]
    }

    /// Fold the most recent iteration of `engine` into the histograms
    ///
    /// Returns the fill and unique-cluster counts of that iteration.
    pub fn reduce(&mut self, engine: &ClusterEngine) -> PerColor<ColorCounts> {
        let lattice = engine.lattice();
        let partition = engine.partition();
        let mut counts = PerColor::<ColorCounts>::default();

        for color in Color::ALL {
            self.root_counts[color].fill(0);
        }

        for (row, line) in lattice.view().outer_iter().enumerate() {
            for (col, cell) in line.iter().enumerate() {
                let Some(color) = *cell else {
                    continue;
                };
                let root = partition.parent(lattice.label(row, col)) as usize;
                if let Some(count) = self.root_counts[color].get_mut(root) {
                    *count += 1;
                }
                counts[color].fill += 1;
            }
        }

        for color in Color::ALL {
            let histogram = &mut self.histograms[color];
            for &size in self.root_counts[color].iter().filter(|&&size| size > 0) {
                histogram.record(size as usize);
                counts[color].unique += 1;
            }
        }

        counts
    }
}
