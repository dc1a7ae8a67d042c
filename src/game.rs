//! Turn handling and the move commit protocol.
//!
//! A [`Game`] owns the four players and the board. The active player positions
//! one piece at a time through [`ActiveTurn`]; [`Game::take_turn`] validates the
//! placement and, when legal, commits it to the board, moves the piece to the
//! player's played list, and hands the turn to the next player.

use std::sync::Arc;

use rustc_hash::FxHashSet;
use tracing::{debug, instrument, trace};

use crate::error::MoveError;
use crate::geometry::Cell;
use crate::grid::{BoardState, STARTING_CORNERS};
use crate::library::PieceLibrary;
use crate::pieces::Piece;
use crate::player::{Player, PlayerId, PLAYER_COUNT};

/// Default player names, in turn order.
pub const DEFAULT_NAMES: [&str; PLAYER_COUNT] = ["Blue", "Yellow", "Red", "Green"];

/// The decision window of one player between two committed moves.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Turn {
    number: usize,
    player: PlayerId,
    piece_index: usize,
}

impl Turn {
    fn first() -> Self {
        Self {
            number: 0,
            player: 0,
            piece_index: 0,
        }
    }

    fn next(self) -> Self {
        let number = self.number + 1;
        Self {
            number,
            player: number % PLAYER_COUNT,
            piece_index: 0,
        }
    }

    /// Zero-based count of turns taken or passed before this one.
    pub fn number(&self) -> usize {
        self.number
    }

    pub fn player(&self) -> PlayerId {
        self.player
    }

    /// Index into the active player's hand of the piece being positioned.
    pub fn piece_index(&self) -> usize {
        self.piece_index
    }
}

/// A committed move.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Placement {
    pub turn: usize,
    pub player: PlayerId,
    pub template_id: usize,
    pub cells: Vec<Cell>,
}

/// Checks the placement rules for `piece` against its owner's grids.
///
/// Every cell must still be open to the owner, which rules out overlap and
/// edge contact with the owner's pieces; at least one cell must be a corner
/// cell of the owner's territory.
pub fn check_placement(board: &BoardState, piece: &Piece) -> Result<(), MoveError> {
    let player = piece.owner();
    let occupied = piece.occupied_cells();

    if let Some(&cell) = occupied.iter().find(|&&cell| !board.is_open(player, cell)) {
        return Err(MoveError::Blocked { player, cell });
    }

    if occupied.iter().any(|&cell| board.is_corner(player, cell)) {
        Ok(())
    } else {
        Err(MoveError::NoCornerContact { player })
    }
}

/// Checks the piece at `piece_index` in `player`'s hand.
fn check_selection(
    board: &BoardState,
    player: &Player,
    piece_index: usize,
) -> Result<(), MoveError> {
    match player.pieces().get(piece_index) {
        Some(piece) => check_placement(board, piece),
        None => Err(MoveError::NoPieceSelected {
            player: player.id(),
        }),
    }
}

/// Mutable access to the active turn: piece selection and positioning.
///
/// Every positioning operation that would push the piece off the board is
/// reverted and reports `false`.
pub struct ActiveTurn<'a> {
    turn: &'a mut Turn,
    player: &'a mut Player,
    board: &'a BoardState,
}

impl ActiveTurn<'_> {
    pub fn turn(&self) -> Turn {
        *self.turn
    }

    /// The piece being positioned, or `None` once the hand is empty.
    pub fn current_piece(&self) -> Option<&Piece> {
        self.player.pieces().get(self.turn.piece_index)
    }

    /// Selects the next piece in hand, wrapping around.
    pub fn next_piece(&mut self) {
        let count = self.player.pieces().len();
        if count > 0 {
            self.turn.piece_index = (self.turn.piece_index + 1) % count;
        }
    }

    /// Selects the previous piece in hand, wrapping around.
    pub fn prev_piece(&mut self) {
        let count = self.player.pieces().len();
        if count > 0 {
            self.turn.piece_index = (self.turn.piece_index + count - 1) % count;
        }
    }

    /// Selects the piece in hand made from template `template_id`.
    ///
    /// Returns `false` if that piece has already been played.
    pub fn select_template(&mut self, template_id: usize) -> bool {
        match self
            .player
            .pieces()
            .iter()
            .position(|piece| piece.template_id() == template_id)
        {
            Some(index) => {
                self.turn.piece_index = index;
                true
            }
            None => false,
        }
    }

    /// Moves the current piece by `delta`.
    pub fn nudge(&mut self, delta: Cell) -> bool {
        self.attempt("nudge", |piece| piece.translate(delta))
    }

    /// Moves the current piece to an absolute position.
    pub fn move_to(&mut self, position: Cell) -> bool {
        self.attempt("move_to", |piece| piece.move_to(position))
    }

    pub fn rotate_cw(&mut self) -> bool {
        self.attempt("rotate_cw", Piece::rotate_cw)
    }

    pub fn rotate_ccw(&mut self) -> bool {
        self.attempt("rotate_ccw", Piece::rotate_ccw)
    }

    pub fn flip_horizontal(&mut self) -> bool {
        self.attempt("flip_horizontal", Piece::flip_horizontal)
    }

    pub fn flip_vertical(&mut self) -> bool {
        self.attempt("flip_vertical", Piece::flip_vertical)
    }

    /// Explains why the current piece cannot be placed where it is.
    pub fn validate(&self) -> Result<(), MoveError> {
        check_selection(self.board, self.player, self.turn.piece_index)
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// Applies `operation` to the current piece, restoring the previous state
    /// if the piece leaves the board.
    fn attempt(&mut self, name: &str, operation: impl FnOnce(&mut Piece)) -> bool {
        let Some(piece) = self.player.piece_mut(self.turn.piece_index) else {
            return false;
        };

        let before = piece.clone();
        operation(piece);
        if piece.in_bounds() {
            true
        } else {
            trace!(operation = name, position = ?before.position(), "Reverted off-board move");
            *piece = before;
            false
        }
    }
}

/// A four-player game.
#[derive(Clone, Debug)]
pub struct Game {
    library: Arc<PieceLibrary>,
    players: Vec<Player>,
    board: BoardState,
    turn: Turn,
    history: Vec<Placement>,
}

impl Game {
    /// Starts a game with the default player names.
    pub fn new(library: Arc<PieceLibrary>) -> Self {
        Self::with_names(library, DEFAULT_NAMES)
    }

    /// Starts a game; every player gets one piece per library template,
    /// pre-positioned against their starting corner.
    pub fn with_names<S: Into<String>>(
        library: Arc<PieceLibrary>,
        names: [S; PLAYER_COUNT],
    ) -> Self {
        let players = names
            .into_iter()
            .enumerate()
            .map(|(id, name)| {
                let mut player = Player::new(id, name, &library);
                for piece in player.pieces_mut() {
                    piece.anchor_to_corner(STARTING_CORNERS[id]);
                }
                player
            })
            .collect();

        Self {
            library,
            players,
            board: BoardState::new(),
            turn: Turn::first(),
            history: Vec::new(),
        }
    }

    pub fn library(&self) -> &PieceLibrary {
        &self.library
    }

    /// The shared library handle, for starting further games.
    pub fn shared_library(&self) -> Arc<PieceLibrary> {
        Arc::clone(&self.library)
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(id)
    }

    pub fn board(&self) -> &BoardState {
        &self.board
    }

    /// Cells still open to `player`, or `None` for an unknown player.
    pub fn open_squares(&self, player: PlayerId) -> Option<&FxHashSet<Cell>> {
        self.board.open_squares(player)
    }

    /// Corner cells of `player`'s territory, or `None` for an unknown player.
    pub fn corners(&self, player: PlayerId) -> Option<&FxHashSet<Cell>> {
        self.board.corners(player)
    }

    pub fn active_turn(&self) -> Turn {
        self.turn
    }

    pub fn active_player(&self) -> &Player {
        &self.players[self.turn.player]
    }

    /// The piece the active player is positioning.
    pub fn current_piece(&self) -> Option<&Piece> {
        self.active_player().pieces().get(self.turn.piece_index)
    }

    /// Committed moves, oldest first.
    pub fn history(&self) -> &[Placement] {
        &self.history
    }

    /// Borrows the active turn for positioning the current piece.
    pub fn turn(&mut self) -> ActiveTurn<'_> {
        let player = self.turn.player;
        ActiveTurn {
            turn: &mut self.turn,
            player: &mut self.players[player],
            board: &self.board,
        }
    }

    pub fn validate(&self) -> Result<(), MoveError> {
        check_selection(&self.board, self.active_player(), self.turn.piece_index)
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// Places the current piece if the move is legal, then starts the next
    /// player's turn.
    ///
    /// On rejection nothing changes and the same turn stays active.
    #[instrument(skip(self), fields(turn = self.turn.number, player = self.turn.player))]
    pub fn take_turn(&mut self) -> Result<Placement, MoveError> {
        if let Err(error) = self.validate() {
            debug!(%error, "Rejected move");
            return Err(error);
        }

        let Turn {
            number,
            player,
            piece_index,
        } = self.turn;
        let Some(piece) = self.players[player].mark_played(piece_index) else {
            return Err(MoveError::NoPieceSelected { player });
        };

        let placement = Placement {
            turn: number,
            player,
            template_id: piece.template_id(),
            cells: piece.occupied_cells(),
        };
        self.board.commit(player, &placement.cells);
        debug!(template_id = placement.template_id, cells = ?placement.cells, "Committed move");

        self.history.push(placement.clone());
        self.turn = self.turn.next();
        Ok(placement)
    }

    /// Ends the active turn without placing a piece.
    pub fn pass_turn(&mut self) -> Turn {
        debug!(turn = self.turn.number, player = self.turn.player, "Passed");
        self.turn = self.turn.next();
        self.turn
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::BOARD_SIZE;

    fn new_game() -> Game {
        Game::new(Arc::new(PieceLibrary::standard().unwrap()))
    }

    #[test]
    fn test_initial_turn() {
        let game = new_game();
        let turn = game.active_turn();
        assert_eq!(turn.number(), 0);
        assert_eq!(turn.player(), 0);
        assert_eq!(turn.piece_index(), 0);
        assert_eq!(game.players().len(), PLAYER_COUNT);
        assert_eq!(game.active_player().name(), "Blue");
    }

    #[test]
    fn test_pieces_start_against_their_corner() {
        let game = new_game();
        for player in game.players() {
            for piece in player.pieces() {
                assert!(piece.in_bounds());
            }
            let monomino = &player.pieces()[0];
            assert_eq!(monomino.position(), STARTING_CORNERS[player.id()]);
        }
    }

    #[test]
    fn test_monomino_in_corner_is_valid() {
        let mut game = new_game();
        assert!(game.turn().is_valid());
        let placement = game.take_turn().unwrap();
        assert_eq!(placement.player, 0);
        assert_eq!(placement.template_id, 0);
        assert_eq!(placement.cells, vec![(0, 0)]);
        assert_eq!(game.active_turn().player(), 1);
        assert_eq!(game.active_turn().number(), 1);
    }

    #[test]
    fn test_piece_away_from_corner_is_rejected() {
        let mut game = new_game();
        assert!(game.turn().move_to((5, 5)));
        assert_eq!(
            game.take_turn(),
            Err(MoveError::NoCornerContact { player: 0 })
        );
        assert_eq!(game.active_turn().number(), 0);
        assert!(game.history().is_empty());
        assert_eq!(game.board().covered_count(), 0);
    }

    #[test]
    fn test_next_and_prev_piece_wrap() {
        let mut game = new_game();
        let mut turn = game.turn();
        turn.prev_piece();
        assert_eq!(turn.turn().piece_index(), 20);
        turn.next_piece();
        turn.next_piece();
        assert_eq!(turn.turn().piece_index(), 1);
    }

    #[test]
    fn test_nudge_off_board_is_reverted() {
        let mut game = new_game();
        let mut turn = game.turn();
        assert!(!turn.nudge((-1, 0)));
        assert!(!turn.nudge((0, -1)));
        assert_eq!(turn.current_piece().unwrap().position(), (0, 0));
        assert!(turn.nudge((0, 1)));
        assert_eq!(turn.current_piece().unwrap().position(), (0, 1));
    }

    #[test]
    fn test_extreme_offsets_are_reverted() {
        let mut game = new_game();
        let mut turn = game.turn();
        assert!(turn.move_to((5, 5)));
        assert!(!turn.nudge((i32::MAX, 0)));
        assert!(!turn.nudge((0, i32::MIN)));
        assert_eq!(turn.current_piece().unwrap().position(), (5, 5));

        assert!(turn.select_template(1));
        let before = turn.current_piece().unwrap().clone();
        assert!(!turn.move_to((i32::MAX, 0)));
        assert!(!turn.move_to((i32::MIN, i32::MAX)));
        assert_eq!(turn.current_piece().unwrap(), &before);
    }

    #[test]
    fn test_unknown_player_has_no_grids() {
        let game = new_game();
        assert!(game.open_squares(PLAYER_COUNT).is_none());
        assert!(game.corners(PLAYER_COUNT).is_none());
        assert!(game.corners(0).is_some());
    }

    #[test]
    fn test_rotation_off_board_is_reverted() {
        let mut game = new_game();
        let mut turn = game.turn();
        // the vertical I-tromino
        assert!(turn.select_template(2));
        assert!(turn.move_to((0, BOARD_SIZE - 1)));
        let before = turn.current_piece().unwrap().clone();
        assert!(!turn.rotate_cw());
        assert_eq!(turn.current_piece().unwrap(), &before);
        assert!(turn.move_to((0, 0)));
        assert!(turn.rotate_cw());
        assert_eq!(turn.current_piece().unwrap().shape().width(), 3);
    }

    #[test]
    fn test_played_piece_leaves_hand() {
        let mut game = new_game();
        game.take_turn().unwrap();
        let player = game.player(0).unwrap();
        assert_eq!(player.pieces().len(), 20);
        assert_eq!(player.played().len(), 1);
        assert_eq!(player.played()[0].template_id(), 0);
        assert!(player.pieces().iter().all(|piece| piece.template_id() != 0));
    }

    #[test]
    fn test_pass_turn_advances_without_placing() {
        let mut game = new_game();
        let turn = game.pass_turn();
        assert_eq!(turn.player(), 1);
        assert_eq!(turn.number(), 1);
        assert!(game.history().is_empty());
        assert_eq!(game.player(0).unwrap().pieces().len(), 21);
    }

    #[test]
    fn test_turns_rotate_round_robin() {
        let mut game = new_game();
        for expected in [0, 1, 2, 3] {
            assert_eq!(game.active_turn().player(), expected);
            game.take_turn().unwrap();
        }
        assert_eq!(game.active_turn().player(), 0);
        assert_eq!(game.history().len(), 4);
    }

    #[test]
    fn test_error_messages() {
        let error = MoveError::Blocked {
            player: 1,
            cell: (2, 3),
        };
        assert_eq!(error.to_string(), "Cell (2, 3) is not open for player 1");
    }
}
