//! Enumeration of the piece library.
//!
//! The library holds one representative of every free polyomino up to a given
//! size, discovered by breadth-first growth of connected cell sets. It is
//! built once, validated against the known polyomino counts, and then shared
//! read-only by every game.

use std::collections::VecDeque;

use rustc_hash::FxHashSet;
use tracing::{debug, info, instrument};

use crate::error::LibraryError;
use crate::geometry::{all_orientations, Cell, Shape};

/// Largest piece in the standard library.
pub const MAX_CELLS: usize = 5;

/// Number of free polyominoes of each size, indexed by cell count.
///
/// Index 0 is unused. Sizes past the end of the table are not supported.
pub const FREE_POLYOMINO_COUNTS: [usize; 7] = [0, 1, 1, 2, 5, 12, 35];

/// Growth directions: north, south, east, west.
const DIRECTIONS: [Cell; 4] = [(-1, 0), (1, 0), (0, 1), (0, -1)];

/// A library shape with its stable id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PieceTemplate {
    /// Dense 0-based id, in discovery order.
    pub id: usize,
    /// The shape in the orientation it was discovered in.
    pub shape: Shape,
}

/// The immutable, ordered set of piece templates.
#[derive(Clone, Debug)]
pub struct PieceLibrary {
    templates: Vec<PieceTemplate>,
    max_cells: usize,
}

impl PieceLibrary {
    /// Builds the standard library of pieces with 1 to 5 cells (21 pieces).
    pub fn standard() -> Result<Self, LibraryError> {
        Self::build(MAX_CELLS)
    }

    /// Builds and validates the library of free polyominoes of `1..=max_cells` cells.
    #[instrument]
    pub fn build(max_cells: usize) -> Result<Self, LibraryError> {
        if max_cells == 0 || max_cells >= FREE_POLYOMINO_COUNTS.len() {
            return Err(LibraryError::UnsupportedSize(max_cells));
        }

        let templates = grow_shapes(max_cells);
        let library = Self {
            templates,
            max_cells,
        };
        library.validate()?;

        info!(
            max_cells,
            pieces = library.len(),
            "Built piece library"
        );
        Ok(library)
    }

    /// Checks the per-size counts and that no two templates are equivalent.
    fn validate(&self) -> Result<(), LibraryError> {
        let found = self.count_by_size();
        for size in 1..=self.max_cells {
            let expected = FREE_POLYOMINO_COUNTS[size];
            if found[size] != expected {
                return Err(LibraryError::UnexpectedCount {
                    size,
                    expected,
                    found: found[size],
                });
            }
        }

        for (i, first) in self.templates.iter().enumerate() {
            for second in &self.templates[i + 1..] {
                if first.shape.symmetry_equivalent(&second.shape) {
                    return Err(LibraryError::DuplicateShape {
                        first: first.id,
                        second: second.id,
                    });
                }
            }
        }

        Ok(())
    }

    /// Largest piece size in this library.
    pub fn max_cells(&self) -> usize {
        self.max_cells
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    pub fn get(&self, id: usize) -> Option<&PieceTemplate> {
        self.templates.get(id)
    }

    pub fn templates(&self) -> &[PieceTemplate] {
        &self.templates
    }

    pub fn iter(&self) -> impl Iterator<Item = &PieceTemplate> {
        self.templates.iter()
    }

    /// Number of templates of each cell count, indexed by cell count.
    pub fn count_by_size(&self) -> Vec<usize> {
        let mut counts = vec![0; self.max_cells + 1];
        for template in &self.templates {
            counts[template.shape.len()] += 1;
        }
        counts
    }

    /// Formats every template with its id, size, and orientation count.
    pub fn format(&self) -> String {
        let mut output = format!("{} pieces:\n\n", self.len());
        for template in &self.templates {
            output.push_str(&format!(
                "Piece {} ({} cells, {} orientations):\n",
                template.id,
                template.shape.len(),
                all_orientations(&template.shape).len()
            ));
            output.push_str(&template.shape.format());
            output.push('\n');
        }
        output
    }
}

/// Grows connected cell sets one cell at a time, breadth first, keeping the
/// first representative of each free polyomino.
///
/// Every fixed orientation of an accepted shape goes into `seen`, so a new
/// shape is a duplicate exactly when it is symmetry-equivalent to one
/// already accepted.
fn grow_shapes(max_cells: usize) -> Vec<PieceTemplate> {
    let mut templates = Vec::new();
    let mut seen: FxHashSet<Shape> = FxHashSet::default();

    // each entry is a snapshot of a partial set plus the cell to add next
    let mut queue: VecDeque<(Vec<Cell>, Cell)> = VecDeque::new();
    queue.push_back((Vec::new(), (0, 0)));
    let mut expanded = 0usize;

    while let Some((mut cells, next)) = queue.pop_front() {
        cells.push(next);
        expanded += 1;

        if let Some(shape) = Shape::new(cells.iter().copied()) {
            if shape.len() <= max_cells && !seen.contains(&shape) {
                seen.extend(all_orientations(&shape));
                templates.push(PieceTemplate {
                    id: templates.len(),
                    shape,
                });
            }
        }

        // only extend if doing so would not make pieces that are too large
        if cells.len() < max_cells {
            for &(row, col) in &cells {
                for (d_row, d_col) in DIRECTIONS {
                    let neighbor = (row + d_row, col + d_col);
                    if !cells.contains(&neighbor) {
                        queue.push_back((cells.clone(), neighbor));
                    }
                }
            }
        }
    }

    debug!(expanded, accepted = templates.len(), "Enumeration finished");
    templates
}
