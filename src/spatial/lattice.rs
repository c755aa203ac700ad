//! Padded two-color grid with a sentinel border
//!
//! The backing array carries one extra row above and one extra column to the
//! left of the logical grid. Border cells hold no color, so neighbour reads
//! for the first row and column never leave the array and never match a
//! real color.

use crate::io::error::{PercolationError, Result, try_filled};
use ndarray::{Array2, ArrayView2, Axis, Slice};
use std::ops::{Index, IndexMut};

/// Union-find element id and canonical cluster identifier
pub type Label = u32;

/// Cell color
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Color {
    /// Unoccupied site; drawn when the black trial fails
    White = 0,
    /// Occupied site
    Black = 1,
}

impl Color {
    /// Both colors in index order
    pub const ALL: [Self; 2] = [Self::White, Self::Black];

    /// Dense index for per-color tables
    pub const fn index(self) -> usize {
        self as usize
    }

    /// The other color
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::White => Self::Black,
            Self::Black => Self::White,
        }
    }

    /// Lowercase name used in reports
    pub const fn name(self) -> &'static str {
        match self {
            Self::White => "white",
            Self::Black => "black",
        }
    }
}

impl From<bool> for Color {
    fn from(black: bool) -> Self {
        if black { Self::Black } else { Self::White }
    }
}

/// A pair of values, one per color
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PerColor<T> {
    /// Value for white
    pub white: T,
    /// Value for black
    pub black: T,
}

impl<T> PerColor<T> {
    /// Build a pair from explicit values
    pub const fn new(white: T, black: T) -> Self {
        Self { white, black }
    }

    /// Build a pair by evaluating `f` for each color
    pub fn from_fn(mut f: impl FnMut(Color) -> T) -> Self {
        Self {
            white: f(Color::White),
            black: f(Color::Black),
        }
    }
}

impl<T> Index<Color> for PerColor<T> {
    type Output = T;

    fn index(&self, color: Color) -> &T {
        match color {
            Color::White => &self.white,
            Color::Black => &self.black,
        }
    }
}

impl<T> IndexMut<Color> for PerColor<T> {
    fn index_mut(&mut self, color: Color) -> &mut T {
        match color {
            Color::White => &mut self.white,
            Color::Black => &mut self.black,
        }
    }
}

/// Colors of the already-visited neighbours of a cell
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Neighborhood {
    /// Cell at (row, col - 1)
    pub left: Option<Color>,
    /// Cell at (row - 1, col)
    pub up: Option<Color>,
    /// Cell at (row - 1, col - 1)
    pub up_left: Option<Color>,
}

/// Grid dimensions checked against the label width
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Dimensions {
    /// Logical rows
    pub rows: usize,
    /// Logical columns
    pub cols: usize,
}

impl Dimensions {
    /// Validate a grid size
    ///
    /// # Errors
    ///
    /// Returns [`PercolationError::InvalidDimensions`] if either side is zero, and
    /// [`PercolationError::TooLarge`] if the cell count, the label count (cells
    /// plus two sentinel slots), or the padded buffer size overflows [`Label`]
    pub fn new(rows: usize, cols: usize) -> Result<Self> {
        if rows < 1 || cols < 1 {
            return Err(PercolationError::InvalidDimensions { rows, cols });
        }

        let too_large = || PercolationError::TooLarge { rows, cols };
        let cells = rows.checked_mul(cols).ok_or_else(too_large)?;
        let labels = cells.checked_add(2).ok_or_else(too_large)?;
        let padded = rows
            .checked_add(1)
            .and_then(|r| cols.checked_add(1).and_then(|c| r.checked_mul(c)))
            .ok_or_else(too_large)?;

        if Label::try_from(labels).is_err() || Label::try_from(padded).is_err() {
            return Err(too_large());
        }

        Ok(Self { rows, cols })
    }

    /// Number of logical cells
    pub const fn cells(self) -> usize {
        self.rows * self.cols
    }

    /// Number of label slots, including the two sentinel slots past the cells
    pub const fn labels(self) -> usize {
        self.cells() + 2
    }

    /// Raster-order label of a logical cell
    pub const fn label(self, row: usize, col: usize) -> Label {
        (row * self.cols + col) as Label
    }
}

/// Two-color grid backing store, reused across iterations
#[derive(Clone, Debug)]
pub struct Lattice {
    dimensions: Dimensions,
    cells: Array2<Option<Color>>,
}

impl Lattice {
    /// Allocate a lattice with every cell, border included, uncolored
    ///
    /// # Errors
    ///
    /// Returns a dimension or capacity error from [`Dimensions::new`], or
    /// [`PercolationError::OutOfMemory`] if the buffer cannot be allocated
    pub fn new(rows: usize, cols: usize) -> Result<Self> {
        let dimensions = Dimensions::new(rows, cols)?;
        let shape = (rows + 1, cols + 1);
        let data = try_filled("color map", shape.0 * shape.1, None)?;
        let cells = Array2::from_shape_vec(shape, data)
            .map_err(|_shape_error| PercolationError::TooLarge { rows, cols })?;

        Ok(Self { dimensions, cells })
    }

    /// Checked grid size
    pub const fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    /// Number of logical rows
    pub const fn rows(&self) -> usize {
        self.dimensions.rows
    }

    /// Number of logical columns
    pub const fn cols(&self) -> usize {
        self.dimensions.cols
    }

    /// Raster-order label of a logical cell
    pub const fn label(&self, row: usize, col: usize) -> Label {
        self.dimensions.label(row, col)
    }

    /// Color of a logical cell, `None` outside the grid or before generation
    pub fn color(&self, row: usize, col: usize) -> Option<Color> {
        self.cells.get([row + 1, col + 1]).copied().flatten()
    }

    /// Set the color of a logical cell
    pub fn paint(&mut self, row: usize, col: usize, color: Color) {
        if let Some(cell) = self.cells.get_mut([row + 1, col + 1]) {
            *cell = Some(color);
        }
    }

    /// Colors of the left, up, and up-left neighbours of a logical cell
    pub fn neighborhood(&self, row: usize, col: usize) -> Neighborhood {
        let at = |r: usize, c: usize| self.cells.get([r, c]).copied().flatten();
        Neighborhood {
            left: at(row + 1, col),
            up: at(row, col + 1),
            up_left: at(row, col),
        }
    }

    /// Read-only view of the logical grid, for rendering
    pub fn view(&self) -> ArrayView2<'_, Option<Color>> {
        let mut view = self.cells.view();
        view.slice_axis_inplace(Axis(0), Slice::from(1..));
        view.slice_axis_inplace(Axis(1), Slice::from(1..));
        view
    }
}
