//! Disjoint-set forest over cell labels with minimum-label roots
//!
//! Merges always keep the numerically smallest root. Root identity therefore
//! depends only on the labels in a cluster and not on the order in which
//! unions happened, which lets the reducers treat "same root" as "same
//! cluster". Union by rank is not used; path compression on every union keeps
//! raster-local access patterns shallow.

use crate::io::error::{Result, try_filled};
use crate::spatial::lattice::Label;

/// Parent-pointer array, one entry per label
#[derive(Clone, Debug)]
pub struct DisjointSet {
    parent: Vec<Label>,
}

// Labels handed to the partition always come from the lattice that sized it
#[allow(clippy::indexing_slicing)]
impl DisjointSet {
    /// Allocate a partition of `len` singleton sets
    ///
    /// # Errors
    ///
    /// Returns an out-of-memory error if the parent array cannot be allocated
    pub fn with_len(len: usize) -> Result<Self> {
        let mut parent = try_filled("disjoint set", len, 0)?;
        for (label, entry) in parent.iter_mut().enumerate() {
            *entry = label as Label;
        }
        Ok(Self { parent })
    }

    /// Number of labels
    pub const fn len(&self) -> usize {
        self.parent.len()
    }

    /// Whether the partition holds no labels
    pub const fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    /// Make `label` a singleton root again
    pub fn reset(&mut self, label: Label) {
        self.parent[label as usize] = label;
    }

    /// Immediate parent of a label
    pub fn parent(&self, label: Label) -> Label {
        self.parent[label as usize]
    }

    /// Follow parent pointers to the root without modifying anything
    pub fn find(&self, mut label: Label) -> Label {
        loop {
            let parent = self.parent[label as usize];
            if parent == label {
                return label;
            }
            label = parent;
        }
    }

    // Point every node on the path from `label` directly at `root`
    fn compress(&mut self, mut label: Label, root: Label) {
        while label != root {
            let next = self.parent[label as usize];
            self.parent[label as usize] = root;
            label = next;
        }
    }

    /// Find the root of `label` and compress the path to it
    pub fn flatten(&mut self, label: Label) -> Label {
        let root = self.find(label);
        self.compress(label, root);
        root
    }

    /// Merge the sets containing `first` and every label in `rest`
    ///
    /// The surviving root is the smallest of all the roots involved, and every
    /// given label ends up pointing directly at it. A cell merges with at most
    /// four visited neighbours, so `rest` usually holds one to four labels;
    /// the outcome equals any sequence of pairwise unions over the same labels.
    pub fn union(&mut self, first: Label, rest: &[Label]) -> Label {
        let root = rest
            .iter()
            .map(|&label| self.find(label))
            .fold(self.find(first), Label::min);

        self.compress(first, root);
        for &label in rest {
            self.compress(label, root);
        }

        root
    }
}
