//! Planar shape normalization and symmetry utilities.
//!
//! A square has 8 symmetries (the dihedral group of order 8): 4 quarter-turn
//! rotations, and the same 4 rotations applied after a mirror reflection.
//! Polyominoes are compared up to these symmetries.

use std::fmt;

/// A board cell or a shape offset, as `(row, col)`.
///
/// Signed so that positions pushed past the board edge can still be
/// represented and rejected by bounds checks.
pub type Cell = (i32, i32);

/// All 8 symmetry functions of the square.
///
/// - Symmetries 0-3: quarter turns clockwise (0, 90, 180, 270 degrees)
/// - Symmetries 4-7: horizontal mirror, then the same quarter turns
pub const SYMMETRIES: [fn(Cell) -> Cell; 8] = [
    |(r, c)| (r, c),
    |(r, c)| (c, -r),
    |(r, c)| (-r, -c),
    |(r, c)| (-c, r),
    |(r, c)| (r, -c),
    |(r, c)| (-c, -r),
    |(r, c)| (-r, c),
    |(r, c)| (c, r),
];

/// A polyomino shape: a set of unique cell offsets in normalized form.
///
/// Offsets are kept sorted with minimum row and minimum column both 0, so
/// two shapes compare equal exactly when they cover the same offset set.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Shape {
    cells: Vec<Cell>,
}

impl Shape {
    /// Builds a shape from arbitrary offsets, normalizing them.
    ///
    /// Returns `None` for an empty offset list.
    pub fn new(cells: impl IntoIterator<Item = Cell>) -> Option<Self> {
        let cells: Vec<Cell> = cells.into_iter().collect();
        if cells.is_empty() {
            return None;
        }
        Some(normalize_to_origin(cells))
    }

    /// The normalized offsets, sorted.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Number of unit cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always false; shapes hold at least one cell.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Number of rows spanned by the shape.
    pub fn height(&self) -> i32 {
        self.cells.iter().map(|&(r, _)| r).max().unwrap_or(0) + 1
    }

    /// Number of columns spanned by the shape.
    pub fn width(&self) -> i32 {
        self.cells.iter().map(|&(_, c)| c).max().unwrap_or(0) + 1
    }

    /// Applies a cell mapping to every offset and renormalizes.
    pub fn map(&self, transform: fn(Cell) -> Cell) -> Self {
        normalize_to_origin(self.cells.iter().map(|&cell| transform(cell)).collect())
    }

    /// Translates the shape back to the origin.
    ///
    /// Shapes are stored normalized, so the result always equals `self`.
    pub fn normalize(&self) -> Self {
        normalize_to_origin(self.cells.clone())
    }

    pub fn rotate_cw(&self) -> Self {
        self.map(|(r, c)| (c, -r))
    }

    pub fn rotate_ccw(&self) -> Self {
        self.map(|(r, c)| (-c, r))
    }

    pub fn flip_horizontal(&self) -> Self {
        self.map(|(r, c)| (r, -c))
    }

    pub fn flip_vertical(&self) -> Self {
        self.map(|(r, c)| (-r, c))
    }

    /// Returns true if `other` is some rotation or reflection of `self`.
    ///
    /// Tries the 4 rotations, then mirrors once and tries the 4 rotations of
    /// the mirror image.
    pub fn symmetry_equivalent(&self, other: &Shape) -> bool {
        if self.len() != other.len() {
            return false;
        }

        let mut candidate = self.clone();
        for _ in 0..4 {
            if &candidate == other {
                return true;
            }
            candidate = candidate.rotate_cw();
        }

        candidate = self.flip_horizontal();
        for _ in 0..4 {
            if &candidate == other {
                return true;
            }
            candidate = candidate.rotate_cw();
        }

        false
    }

    /// Lexicographically smallest orientation of this shape.
    ///
    /// Two shapes are symmetry-equivalent exactly when their canonical forms
    /// are equal.
    pub fn canonical(&self) -> Self {
        SYMMETRIES
            .iter()
            .map(|&symmetry| self.map(symmetry))
            .min()
            .unwrap_or_else(|| self.clone())
    }

    /// Renders the shape as rows of `#` (cell) and `.` (gap).
    pub fn format(&self) -> String {
        let mut output = String::new();
        for row in 0..self.height() {
            for col in 0..self.width() {
                let glyph = if self.cells.binary_search(&(row, col)).is_ok() {
                    '#'
                } else {
                    '.'
                };
                output.push(glyph);
            }
            output.push('\n');
        }
        output
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format())
    }
}

/// Generates all distinct fixed orientations of a shape.
///
/// Applies all 8 symmetries, normalizes each result, then removes duplicates.
/// Symmetric shapes have fewer than 8 distinct orientations.
pub fn all_orientations(shape: &Shape) -> Vec<Shape> {
    let mut orientations: Vec<Shape> = SYMMETRIES
        .iter()
        .map(|&symmetry| shape.map(symmetry))
        .collect();

    // remove duplicate orientations (symmetric shapes produce duplicates)
    orientations.sort();
    orientations.dedup();
    orientations
}

/// Translates offsets so the minimum row and column are zero, then sorts
/// and removes repeated offsets.
fn normalize_to_origin(mut cells: Vec<Cell>) -> Shape {
    let min_row = cells.iter().map(|&(r, _)| r).min().unwrap_or(0);
    let min_col = cells.iter().map(|&(_, c)| c).min().unwrap_or(0);

    for (r, c) in &mut cells {
        *r -= min_row;
        *c -= min_col;
    }

    cells.sort_unstable();
    cells.dedup();
    Shape { cells }
}
