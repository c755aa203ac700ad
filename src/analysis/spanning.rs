//! Detection of clusters touching two opposite edges of the grid

use crate::io::error::{Result, try_filled};
use crate::spatial::lattice::{Color, Label, Lattice};
use crate::spatial::partition::DisjointSet;

/// Direction along which a cluster spans the grid
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    /// Touches the leftmost and the rightmost column
    Rows,
    /// Touches the topmost and the bottommost row
    Columns,
}

impl Axis {
    /// Axes in the order they are tested
    pub const ALL: [Self; 2] = [Self::Rows, Self::Columns];
}

/// Spanning tester owning two boundary label lists
#[derive(Clone, Debug)]
pub struct SpanningDetector {
    first: Vec<Label>,
    second: Vec<Label>,
}

impl SpanningDetector {
    /// Allocate boundary scratch space for a grid
    ///
    /// # Errors
    ///
    /// Returns an out-of-memory error if the scratch lists cannot be allocated
    pub fn new(rows: usize, cols: usize) -> Result<Self> {
        let capacity = rows.max(cols);
        let mut first = try_filled("spanning scratch", capacity, 0)?;
        let mut second = try_filled("spanning scratch", capacity, 0)?;
        first.clear();
        second.clear();
        Ok(Self { first, second })
    }

    /// Find the first axis along which a cluster of `color` spans the grid
    pub fn detect(
        &mut self,
        lattice: &Lattice,
        partition: &DisjointSet,
        color: Color,
    ) -> Option<Axis> {
        Axis::ALL.into_iter().find(|&axis| {
            self.collect(lattice, partition, color, axis);
            shares_label(&mut self.first, &mut self.second)
        })
    }

    /// Every root of `color` that spans the grid along either axis
    pub fn spanning_roots(
        &mut self,
        lattice: &Lattice,
        partition: &DisjointSet,
        color: Color,
    ) -> Vec<Label> {
        let mut roots = Vec::new();
        for axis in Axis::ALL {
            self.collect(lattice, partition, color, axis);
            self.first.sort_unstable();
            self.second.sort_unstable();
            roots.extend(common_labels(&self.first, &self.second));
        }
        roots.sort_unstable();
        roots.dedup();
        roots
    }

    // Fill the scratch lists with roots of `color` on the two edges of `axis`
    fn collect(&mut self, lattice: &Lattice, partition: &DisjointSet, color: Color, axis: Axis) {
        self.first.clear();
        self.second.clear();

        let last_row = lattice.rows() - 1;
        let last_col = lattice.cols() - 1;
        let root = |row: usize, col: usize| {
            (lattice.color(row, col) == Some(color))
                .then(|| partition.parent(lattice.label(row, col)))
        };

        match axis {
            Axis::Rows => {
                for row in 0..=last_row {
                    self.first.extend(root(row, 0));
                    self.second.extend(root(row, last_col));
                }
            }
            Axis::Columns => {
                for col in 0..=last_col {
                    self.first.extend(root(0, col));
                    self.second.extend(root(last_row, col));
                }
            }
        }
    }
}

/// Whether two label lists share any element
///
/// Both lists are sorted in place and scanned in a single merge pass. Labels
/// are small dense integers, so this needs no hashing and no allocation.
pub fn shares_label(first: &mut [Label], second: &mut [Label]) -> bool {
    if first.is_empty() || second.is_empty() {
        return false;
    }

    first.sort_unstable();
    second.sort_unstable();
    common_labels(first, second).next().is_some()
}

// Merge scan over two sorted lists, yielding each common label once
fn common_labels<'a>(first: &'a [Label], second: &'a [Label]) -> impl Iterator<Item = Label> + 'a {
    let mut a = first.iter().copied().peekable();
    let mut b = second.iter().copied().peekable();
    let mut last = None;

    std::iter::from_fn(move || {
        loop {
            let (&x, &y) = (a.peek()?, b.peek()?);
            if x < y {
                a.next();
            } else if y < x {
                b.next();
            } else {
                a.next();
                b.next();
                if last != Some(x) {
                    last = Some(x);
                    return Some(x);
                }
            }
        }
    })
}
