//! Players and their hands of pieces.

use crate::library::PieceLibrary;
use crate::pieces::Piece;

/// Player index, `0..PLAYER_COUNT`.
pub type PlayerId = usize;

/// Number of players in a game.
pub const PLAYER_COUNT: usize = 4;

/// A player with the pieces still in hand and the pieces already placed.
#[derive(Clone, Debug)]
pub struct Player {
    id: PlayerId,
    name: String,
    pieces: Vec<Piece>,
    played: Vec<Piece>,
}

impl Player {
    /// Creates a player holding one piece per library template.
    pub fn new(id: PlayerId, name: impl Into<String>, library: &PieceLibrary) -> Self {
        Self {
            id,
            name: name.into(),
            pieces: library
                .iter()
                .map(|template| Piece::from_template(template, id))
                .collect(),
            played: Vec::new(),
        }
    }

    pub fn id(&self) -> PlayerId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Pieces not yet placed, in library order.
    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    /// Pieces placed on the board, in the order they were played.
    pub fn played(&self) -> &[Piece] {
        &self.played
    }

    /// Total cells across the pieces still in hand.
    pub fn remaining_cells(&self) -> usize {
        self.pieces.iter().map(Piece::size).sum()
    }

    pub(crate) fn piece_mut(&mut self, index: usize) -> Option<&mut Piece> {
        self.pieces.get_mut(index)
    }

    pub(crate) fn pieces_mut(&mut self) -> &mut [Piece] {
        &mut self.pieces
    }

    /// Moves the piece at `index` from the hand to the played list.
    pub(crate) fn mark_played(&mut self, index: usize) -> Option<&Piece> {
        if index >= self.pieces.len() {
            return None;
        }
        let piece = self.pieces.remove(index);
        self.played.push(piece);
        self.played.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_player_holds_full_library() {
        let library = PieceLibrary::standard().unwrap();
        let player = Player::new(3, "Yellow", &library);
        assert_eq!(player.id(), 3);
        assert_eq!(player.name(), "Yellow");
        assert_eq!(player.pieces().len(), 21);
        assert!(player.played().is_empty());
        assert_eq!(player.remaining_cells(), 89);
        assert!(player.pieces().iter().all(|piece| piece.owner() == 3));
    }

    #[test]
    fn test_pieces_follow_library_order() {
        let library = PieceLibrary::standard().unwrap();
        let player = Player::new(0, "Blue", &library);
        for (piece, template) in player.pieces().iter().zip(library.iter()) {
            assert_eq!(piece.template_id(), template.id);
            assert_eq!(piece.shape(), &template.shape);
        }
    }

    #[test]
    fn test_mark_played_moves_piece() {
        let library = PieceLibrary::standard().unwrap();
        let mut player = Player::new(1, "Red", &library);
        let template_id = player.mark_played(4).map(Piece::template_id);
        assert_eq!(template_id, Some(4));
        assert_eq!(player.pieces().len(), 20);
        assert_eq!(player.played().len(), 1);
        assert!(player.pieces().iter().all(|piece| piece.template_id() != 4));
        assert!(player.mark_played(20).is_none());
    }
}
