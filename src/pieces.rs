//! Piece instances: a library shape owned by a player and positioned on the board.
//!
//! A piece's absolute cells are its position plus each offset of its current
//! orientation. Orientation changes renormalize the shape, so the position
//! always refers to the top-left corner of the shape's bounding box.

use crate::geometry::{Cell, Shape};
use crate::grid::{in_board, BOARD_SIZE};
use crate::library::PieceTemplate;
use crate::player::PlayerId;

/// A mutable instance of a library shape bound to an owner.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Piece {
    template_id: usize,
    shape: Shape,
    position: Cell,
    owner: PlayerId,
}

impl Piece {
    /// Creates a piece for `owner` from a template, positioned at the origin.
    pub fn from_template(template: &PieceTemplate, owner: PlayerId) -> Self {
        Self {
            template_id: template.id,
            shape: template.shape.clone(),
            position: (0, 0),
            owner,
        }
    }

    pub fn template_id(&self) -> usize {
        self.template_id
    }

    pub fn owner(&self) -> PlayerId {
        self.owner
    }

    /// The current orientation.
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Board coordinate of the shape's local origin.
    pub fn position(&self) -> Cell {
        self.position
    }

    /// Number of unit cells in this piece.
    pub fn size(&self) -> usize {
        self.shape.len()
    }

    pub fn rotate_cw(&mut self) {
        self.shape = self.shape.rotate_cw();
    }

    pub fn rotate_ccw(&mut self) {
        self.shape = self.shape.rotate_ccw();
    }

    pub fn flip_horizontal(&mut self) {
        self.shape = self.shape.flip_horizontal();
    }

    pub fn flip_vertical(&mut self) {
        self.shape = self.shape.flip_vertical();
    }

    /// Sets the position directly.
    pub fn move_to(&mut self, position: Cell) {
        self.position = position;
    }

    /// Moves the piece by `(d_row, d_col)`, saturating at the `i32` limits.
    pub fn translate(&mut self, (d_row, d_col): Cell) {
        self.position = (
            self.position.0.saturating_add(d_row),
            self.position.1.saturating_add(d_col),
        );
    }

    /// Places the bounding box flush against the board corner `corner`.
    ///
    /// Corners on the far edge pull the piece back by its height or width so
    /// that it stays on the board.
    pub fn anchor_to_corner(&mut self, (corner_row, corner_col): Cell) {
        let row = corner_row.min(BOARD_SIZE - self.shape.height()).max(0);
        let col = corner_col.min(BOARD_SIZE - self.shape.width()).max(0);
        self.position = (row, col);
    }

    /// Absolute board cells covered by the piece.
    ///
    /// Cells past the `i32` limits saturate; such cells are never on the board.
    pub fn occupied_cells(&self) -> Vec<Cell> {
        let (row, col) = self.position;
        self.shape
            .cells()
            .iter()
            .map(|&(d_row, d_col)| (row.saturating_add(d_row), col.saturating_add(d_col)))
            .collect()
    }

    /// Returns true if every occupied cell lies on the board.
    pub fn in_bounds(&self) -> bool {
        let (row, col) = self.position;
        self.shape.cells().iter().all(|&(d_row, d_col)| {
            match (row.checked_add(d_row), col.checked_add(d_col)) {
                (Some(row), Some(col)) => in_board((row, col)),
                _ => false,
            }
        })
    }
}
