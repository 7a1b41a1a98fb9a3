//! Enumeration of legal final placements.

use arrayvec::ArrayVec;
use tetrai_engine::{BOARD_WIDTH, Board, PieceKind, Placement, Position};

/// Leftmost anchor column tried.
///
/// Anchors left of column 0 are tried so a rotation state whose first
/// matrix columns are empty can still reach board column 0.
pub const MIN_X: i32 = -2;

/// Upper bound on placements per piece: 4 rotations x 12 columns.
pub const MAX_PLACEMENTS: usize = 4 * 12;

#[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
const MAX_X: i32 = BOARD_WIDTH as i32;

/// Lists every `(rotation, column)` of `kind` that fits at the spawn row.
///
/// Rotation states are visited 0 to 3, then columns in ascending order.
/// Identical rotation states (e.g. all four of the O piece) are kept
/// separately, so ties keep resolving to the earliest state.
#[must_use]
pub fn available_placements(board: &Board, kind: PieceKind) -> ArrayVec<Placement, MAX_PLACEMENTS> {
    let mut placements = ArrayVec::new();
    let mut shape = kind.base_shape();
    for rotation in 0..4 {
        for x in MIN_X..MAX_X {
            if board.is_valid_placement(&shape, Position::new(x, 0)) {
                placements.push(Placement::new(rotation, x, shape));
            }
        }
        shape = shape.rotated();
    }
    placements
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_board_counts() {
        let board = Board::EMPTY;
        // I: horizontal 7 columns, vertical 10 columns, twice each
        assert_eq!(available_placements(&board, PieceKind::I).len(), 2 * (7 + 10));
        // O: 9 columns in each of 4 identical states
        assert_eq!(available_placements(&board, PieceKind::O).len(), 4 * 9);
        for kind in [PieceKind::T, PieceKind::L, PieceKind::J, PieceKind::S, PieceKind::Z] {
            assert_eq!(available_placements(&board, kind).len(), 2 * (8 + 9), "{kind:?}");
        }
    }

    #[test]
    fn test_enumeration_order() {
        let placements = available_placements(&Board::EMPTY, PieceKind::T);
        let order: Vec<_> = placements.iter().map(|p| (p.rotation(), p.x())).collect();
        let mut sorted = order.clone();
        sorted.sort_unstable();
        assert_eq!(order, sorted);
        assert_eq!(order.first(), Some(&(0, 0)));
        assert_eq!(order.last(), Some(&(3, 8)));
    }

    #[test]
    fn test_every_placement_is_legal() {
        let board: Board = "
            ....1.....
            ...111....
            11111111.1
        "
        .parse()
        .unwrap();
        for kind in PieceKind::ALL {
            for placement in available_placements(&board, kind) {
                assert!(placement.is_valid_on(&board));
            }
        }
    }

    #[test]
    fn test_blocked_spawn_row_removes_columns() {
        // Only column 5 is open on the top row.
        let mut art = String::from("11111.1111\n");
        art.push_str(&"..........\n".repeat(19));
        let board: Board = art.parse().unwrap();
        let placements = available_placements(&board, PieceKind::I);
        let found: Vec<_> = placements.iter().map(|p| (p.rotation(), p.x())).collect();
        assert_eq!(found, vec![(1, 5), (3, 5)]);
    }

    #[test]
    fn test_full_board_has_no_placement() {
        let board: Board = "1111111111\n".repeat(20).parse().unwrap();
        for kind in PieceKind::ALL {
            assert!(available_placements(&board, kind).is_empty());
        }
    }
}
