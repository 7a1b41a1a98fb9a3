//! Driving a [`GameSession`] with a [`MoveSelector`].
//!
//! One call to [`step`] is one tick: the selector sees the board, the current
//! piece and the upcoming queue, and its move is applied to the session. A
//! selector that finds no move ends the game.

use arrayvec::ArrayVec;
use tetrai_engine::{GameSession, PieceKind, QUEUE_LEN};

use crate::selector::{Move, MoveSelector};

/// Plays one tick.
///
/// Returns the applied move, or `None` when the game is already over or the
/// selector found no legal placement (which ends the game).
pub fn step(session: &mut GameSession, selector: &mut dyn MoveSelector) -> Option<Move> {
    if session.session_state().is_game_over() {
        return None;
    }
    let field = session.field();
    let upcoming: ArrayVec<PieceKind, QUEUE_LEN> =
        field.next_pieces().map(|piece| piece.kind()).collect();
    let current = field.current_piece().kind();

    let Some(mv) = selector.select_move(field.board(), current, &upcoming) else {
        tracing::debug!(piece = ?current, ticks = session.ticks(), "no legal placement");
        session.end();
        return None;
    };
    session.apply_placement(mv.placement());
    Some(mv)
}

/// Plays until the game is over or `turn_limit` moves have been made.
///
/// Returns the number of moves made by this call.
pub fn play(
    session: &mut GameSession,
    selector: &mut dyn MoveSelector,
    turn_limit: Option<usize>,
) -> usize {
    let mut turns = 0;
    while turn_limit.is_none_or(|limit| turns < limit) {
        if step(session, selector).is_none() {
            break;
        }
        turns += 1;
        if turns % 1000 == 0 {
            tracing::info!(
                turns,
                score = session.stats().score(),
                lines = session.stats().total_cleared_lines(),
                "still playing"
            );
        }
    }

    let stats = session.stats();
    tracing::info!(
        seed = %session.seed(),
        turns,
        game_over = session.session_state().is_game_over(),
        score = stats.score(),
        lines = stats.total_cleared_lines(),
        "session finished"
    );
    turns
}
