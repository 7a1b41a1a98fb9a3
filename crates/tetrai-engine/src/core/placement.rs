use serde::Serialize;

use super::{
    board::Board,
    piece::{Piece, PieceKind, Position},
    shape::Shape,
};

/// A final placement choice: one rotation state dropped from a column.
///
/// The placement is anchored on the spawn row (`y = 0`); the landing row is
/// derived from the board it is applied to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Placement {
    rotation: u8,
    x: i32,
    shape: Shape,
}

impl Placement {
    #[must_use]
    pub fn new(rotation: u8, x: i32, shape: Shape) -> Self {
        Self { rotation, x, shape }
    }

    /// Placement matching the current state and column of `piece`.
    #[must_use]
    pub fn from_piece(piece: &Piece) -> Self {
        Self::new(piece.rotation(), piece.position().x(), *piece.shape())
    }

    /// Number of clockwise quarter turns from the spawn orientation.
    #[must_use]
    pub fn rotation(&self) -> u8 {
        self.rotation
    }

    /// Column of the shape matrix's left edge.
    #[must_use]
    pub fn x(&self) -> i32 {
        self.x
    }

    #[must_use]
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    #[must_use]
    pub fn spawn_position(&self) -> Position {
        Position::new(self.x, 0)
    }

    #[must_use]
    pub fn is_valid_on(&self, board: &Board) -> bool {
        board.is_valid_placement(&self.shape, self.spawn_position())
    }

    /// Where the shape comes to rest when dropped onto `board`.
    #[must_use]
    pub fn resting_position(&self, board: &Board) -> Position {
        Position::new(
            self.x,
            board.resting_row(&self.shape, self.spawn_position()),
        )
    }

    /// Drops the shape onto `board` and writes it as `kind`.
    ///
    /// Full rows are left in place; call [`Board::clear_full_lines`] on the
    /// result to remove them.
    #[must_use]
    pub fn apply(&self, board: &Board, kind: PieceKind) -> Board {
        board.commit(&self.shape, self.spawn_position(), kind)
    }
}
