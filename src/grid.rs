//! Board state: the per-player grids that drive move validation.
//!
//! For each player the board tracks two cell sets:
//! - `open_squares`: cells the player may still occupy. A cell leaves this set
//!   when any player covers it, or when it shares an edge with one of the
//!   player's own pieces. The set only ever shrinks.
//! - `corners`: cells that touch the player's territory corner-to-corner,
//!   seeded with the player's starting corner. The set only ever grows.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::geometry::Cell;
use crate::player::{PlayerId, PLAYER_COUNT};

/// Board side length; the board is `BOARD_SIZE x BOARD_SIZE`.
pub const BOARD_SIZE: i32 = 20;

/// Starting corner of each player, indexed by player id.
pub const STARTING_CORNERS: [Cell; PLAYER_COUNT] = [
    (0, 0),
    (0, BOARD_SIZE - 1),
    (BOARD_SIZE - 1, BOARD_SIZE - 1),
    (BOARD_SIZE - 1, 0),
];

const ORTHOGONAL: [Cell; 4] = [(-1, 0), (1, 0), (0, 1), (0, -1)];
const DIAGONAL: [Cell; 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

/// Returns true if the cell lies on the board.
#[inline]
pub fn in_board((row, col): Cell) -> bool {
    (0..BOARD_SIZE).contains(&row) && (0..BOARD_SIZE).contains(&col)
}

/// Edge-adjacent neighbours of a cell, omitting those off the board.
pub fn orthogonal_neighbors(cell: Cell) -> impl Iterator<Item = Cell> {
    neighbors(cell, ORTHOGONAL)
}

/// Corner-adjacent neighbours of a cell, omitting those off the board.
pub fn diagonal_neighbors(cell: Cell) -> impl Iterator<Item = Cell> {
    neighbors(cell, DIAGONAL)
}

fn neighbors((row, col): Cell, deltas: [Cell; 4]) -> impl Iterator<Item = Cell> {
    deltas
        .into_iter()
        .map(move |(d_row, d_col)| (row + d_row, col + d_col))
        .filter(|&cell| in_board(cell))
}

/// Per-player open and corner cell sets plus the ownership of covered cells.
#[derive(Clone, Debug)]
pub struct BoardState {
    open_squares: [FxHashSet<Cell>; PLAYER_COUNT],
    corners: [FxHashSet<Cell>; PLAYER_COUNT],
    owners: FxHashMap<Cell, PlayerId>,
}

impl Default for BoardState {
    fn default() -> Self {
        Self::new()
    }
}

impl BoardState {
    /// A fresh board: everything open, each player's corner set holding only
    /// their starting corner.
    pub fn new() -> Self {
        let full_board: FxHashSet<Cell> = (0..BOARD_SIZE)
            .flat_map(|row| (0..BOARD_SIZE).map(move |col| (row, col)))
            .collect();

        Self {
            open_squares: std::array::from_fn(|_| full_board.clone()),
            corners: std::array::from_fn(|player| {
                FxHashSet::from_iter([STARTING_CORNERS[player]])
            }),
            owners: FxHashMap::default(),
        }
    }

    /// Cells still open to `player`, or `None` for an unknown player.
    pub fn open_squares(&self, player: PlayerId) -> Option<&FxHashSet<Cell>> {
        self.open_squares.get(player)
    }

    /// Cells where `player` satisfies the corner-touch rule, or `None` for an
    /// unknown player.
    pub fn corners(&self, player: PlayerId) -> Option<&FxHashSet<Cell>> {
        self.corners.get(player)
    }

    /// False for an unknown player.
    pub fn is_open(&self, player: PlayerId, cell: Cell) -> bool {
        self.open_squares
            .get(player)
            .is_some_and(|open| open.contains(&cell))
    }

    /// False for an unknown player.
    pub fn is_corner(&self, player: PlayerId, cell: Cell) -> bool {
        self.corners
            .get(player)
            .is_some_and(|corners| corners.contains(&cell))
    }

    /// The player whose piece covers `cell`, if any.
    pub fn owner_at(&self, cell: Cell) -> Option<PlayerId> {
        self.owners.get(&cell).copied()
    }

    /// Number of covered cells.
    pub fn covered_count(&self) -> usize {
        self.owners.len()
    }

    /// Records `occupied` as covered by `player` and updates every grid.
    ///
    /// The caller is responsible for having validated the placement.
    ///
    /// # Panics
    ///
    /// Panics if `player >= PLAYER_COUNT`.
    pub fn commit(&mut self, player: PlayerId, occupied: &[Cell]) {
        // a covered cell is closed to everyone
        for open in &mut self.open_squares {
            for cell in occupied {
                open.remove(cell);
            }
        }

        for &cell in occupied {
            self.owners.insert(cell, player);
            self.corners[player].extend(diagonal_neighbors(cell));
            for neighbor in orthogonal_neighbors(cell) {
                self.open_squares[player].remove(&neighbor);
            }
        }
    }

    /// Formats the board as rows of owner digits, `.` for empty cells.
    pub fn format_board(&self) -> String {
        let mut output = String::with_capacity(((BOARD_SIZE + 1) * BOARD_SIZE) as usize);
        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                let glyph = match self.owner_at((row, col)) {
                    Some(player) => char::from(b'0' + player as u8),
                    None => '.',
                };
                output.push(glyph);
            }
            output.push('\n');
        }
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_board_is_fully_open() {
        let board = BoardState::new();
        for player in 0..PLAYER_COUNT {
            assert_eq!(
                board.open_squares(player).map(|open| open.len()),
                Some((BOARD_SIZE * BOARD_SIZE) as usize)
            );
            assert_eq!(board.corners(player).map(|corners| corners.len()), Some(1));
            assert!(board.is_corner(player, STARTING_CORNERS[player]));
        }
        assert_eq!(board.covered_count(), 0);
    }

    #[test]
    fn test_unknown_player_queries() {
        let board = BoardState::new();
        assert!(board.open_squares(PLAYER_COUNT).is_none());
        assert!(board.corners(PLAYER_COUNT).is_none());
        assert!(!board.is_open(PLAYER_COUNT, (5, 5)));
        assert!(!board.is_corner(PLAYER_COUNT, (0, 0)));
    }

    #[test]
    fn test_starting_corners_are_board_corners() {
        for (row, col) in STARTING_CORNERS {
            assert!(row == 0 || row == BOARD_SIZE - 1);
            assert!(col == 0 || col == BOARD_SIZE - 1);
        }
        let distinct: FxHashSet<Cell> = STARTING_CORNERS.into_iter().collect();
        assert_eq!(distinct.len(), PLAYER_COUNT);
    }

    #[test]
    fn test_neighbors_clip_at_corner() {
        let orthogonal: Vec<Cell> = orthogonal_neighbors((0, 0)).collect();
        assert_eq!(orthogonal, vec![(1, 0), (0, 1)]);
        let diagonal: Vec<Cell> = diagonal_neighbors((0, 0)).collect();
        assert_eq!(diagonal, vec![(1, 1)]);
    }

    #[test]
    fn test_neighbors_in_middle() {
        assert_eq!(orthogonal_neighbors((5, 5)).count(), 4);
        assert_eq!(diagonal_neighbors((5, 5)).count(), 4);
        let edge = BOARD_SIZE - 1;
        assert_eq!(orthogonal_neighbors((edge, 5)).count(), 3);
        assert_eq!(diagonal_neighbors((edge, 5)).count(), 2);
    }

    #[test]
    fn test_commit_closes_cells_for_everyone() {
        let mut board = BoardState::new();
        board.commit(0, &[(0, 0), (0, 1)]);
        for player in 0..PLAYER_COUNT {
            assert!(!board.is_open(player, (0, 0)));
            assert!(!board.is_open(player, (0, 1)));
        }
        assert_eq!(board.owner_at((0, 1)), Some(0));
        assert_eq!(board.owner_at((1, 1)), None);
    }

    #[test]
    fn test_commit_closes_edges_only_for_owner() {
        let mut board = BoardState::new();
        board.commit(0, &[(5, 5)]);
        for edge in [(4, 5), (6, 5), (5, 4), (5, 6)] {
            assert!(!board.is_open(0, edge), "{edge:?} should be closed for player 0");
            assert!(board.is_open(1, edge), "{edge:?} should stay open for player 1");
        }
    }

    #[test]
    fn test_commit_adds_diagonal_corners_for_owner() {
        let mut board = BoardState::new();
        board.commit(2, &[(5, 5)]);
        for corner in [(4, 4), (4, 6), (6, 4), (6, 6)] {
            assert!(board.is_corner(2, corner));
            assert!(!board.is_corner(0, corner));
        }
    }

    #[test]
    fn test_format_board() {
        let mut board = BoardState::new();
        board.commit(0, &[(0, 0), (1, 0), (1, 1)]);
        board.commit(1, &[(0, BOARD_SIZE - 1)]);
        board.commit(2, &[(BOARD_SIZE - 1, BOARD_SIZE - 1), (BOARD_SIZE - 2, BOARD_SIZE - 1)]);
        board.commit(3, &[(BOARD_SIZE - 1, 0)]);
        insta::assert_snapshot!(board.format_board(), @r"
        0..................1
        00..................
        ....................
        ....................
        ....................
        ....................
        ....................
        ....................
        ....................
        ....................
        ....................
        ....................
        ....................
        ....................
        ....................
        ....................
        ....................
        ....................
        ...................2
        3..................2
        ");
    }
}
