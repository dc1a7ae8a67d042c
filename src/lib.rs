//! Blokus Rules Engine
//!
//! Provides the rules core of a four-player polyomino placement game: the
//! enumeration of the piece library, per-player board state, and the turn
//! validation and commit protocol.
//!
//! The library is built once and shared between games:
//!
//! ```
//! use std::sync::Arc;
//! use blokus::{Game, PieceLibrary};
//!
//! let library = Arc::new(PieceLibrary::standard().expect("piece library"));
//! let mut game = Game::new(library);
//!
//! // player 0 drops the monomino into their starting corner
//! assert!(game.turn().is_valid());
//! let placement = game.take_turn().unwrap();
//! assert_eq!(placement.cells, vec![(0, 0)]);
//! assert!(game.corners(0).unwrap().contains(&(1, 1)));
//! ```

pub mod error;
pub mod game;
pub mod geometry;
pub mod grid;
pub mod library;
pub mod pieces;
pub mod player;

pub use error::{LibraryError, MoveError};
pub use game::{check_placement, ActiveTurn, Game, Placement, Turn};
pub use geometry::{all_orientations, Cell, Shape};
pub use grid::{BoardState, BOARD_SIZE, STARTING_CORNERS};
pub use library::{PieceLibrary, PieceTemplate, MAX_CELLS};
pub use pieces::Piece;
pub use player::{Player, PlayerId, PLAYER_COUNT};
