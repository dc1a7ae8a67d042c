//! Error types for the rules engine.

use crate::geometry::Cell;
use crate::player::PlayerId;

/// Why the active piece cannot be placed.
///
/// Rejections never mutate game state; the caller may keep positioning the
/// piece and try again.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum MoveError {
    /// A cell is occupied, or shares an edge with one of the player's own pieces.
    #[display("Cell {cell:?} is not open for player {player}")]
    Blocked { player: PlayerId, cell: Cell },

    /// No cell touches the player's territory corner-to-corner.
    #[display("Piece does not touch a corner of player {player}'s territory")]
    NoCornerContact { player: PlayerId },

    /// The active player has no pieces left to position.
    #[display("Player {player} has no pieces left")]
    NoPieceSelected { player: PlayerId },
}

impl std::error::Error for MoveError {}

/// The piece library failed to build correctly.
///
/// This is a programming error; callers should fail fast rather than play
/// with a malformed library.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum LibraryError {
    /// No known polyomino count exists for this size.
    #[display("Unsupported piece size {_0}")]
    UnsupportedSize(usize),

    /// The enumeration found the wrong number of pieces of some size.
    #[display("Expected {expected} pieces of {size} cells, found {found}")]
    UnexpectedCount {
        size: usize,
        expected: usize,
        found: usize,
    },

    /// Two templates are rotations or reflections of each other.
    #[display("Pieces {first} and {second} are the same shape")]
    DuplicateShape { first: usize, second: usize },
}

impl std::error::Error for LibraryError {}
