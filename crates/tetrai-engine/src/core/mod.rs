//! Board model: cells, shapes, pieces and placements.
//!
//! Every type here is a value. Board transformations ([`Board::commit`],
//! [`Board::clear_full_lines`]) return a fresh board and leave the input
//! untouched, so search branches can each hold their own snapshot.

pub use self::{board::*, piece::*, placement::*, shape::*};

mod board;
mod piece;
mod placement;
mod shape;

/// Number of columns on the board.
pub const BOARD_WIDTH: usize = 10;
/// Number of rows on the board.
pub const BOARD_HEIGHT: usize = 20;
