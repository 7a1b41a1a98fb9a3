use std::time::Duration;

use crate::core::{Piece, Placement};

use super::{GameStats, game_field::GameField, piece_generator::PieceSeed};

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum SessionState {
    Playing,
    GameOver,
}

/// Multi-turn game session: a [`GameField`] plus statistics and a tick clock.
///
/// One tick is one placement. The session has no notion of wall-clock time;
/// [`GameSession::elapsed`] reports the game time the placements would have
/// taken at the configured tick interval.
///
/// # Example
///
/// ```
/// use std::time::Duration;
///
/// use tetrai_engine::{GameSession, Placement};
///
/// let mut session = GameSession::new(Duration::from_millis(500));
/// assert_eq!(session.stats().piece_counts().iter().sum::<usize>(), 6);
///
/// let placement = Placement::from_piece(session.field().current_piece());
/// session.apply_placement(&placement);
///
/// assert_eq!(session.stats().completed_pieces(), 1);
/// assert_eq!(session.elapsed(), Duration::from_millis(500));
/// ```
#[derive(Debug, Clone)]
pub struct GameSession {
    field: GameField,
    stats: GameStats,
    session_state: SessionState,
    tick_interval: Duration,
    ticks: u32,
}

impl GameSession {
    #[must_use]
    pub fn new(tick_interval: Duration) -> Self {
        Self::with_field(GameField::new(), tick_interval)
    }

    #[must_use]
    pub fn with_seed(seed: PieceSeed, tick_interval: Duration) -> Self {
        Self::with_field(GameField::with_seed(seed), tick_interval)
    }

    fn with_field(field: GameField, tick_interval: Duration) -> Self {
        let mut stats = GameStats::new();
        for kind in field.pieces_in_play() {
            stats.record_spawn(kind);
        }
        Self {
            field,
            stats,
            session_state: SessionState::Playing,
            tick_interval,
            ticks: 0,
        }
    }

    #[must_use]
    pub fn field(&self) -> &GameField {
        &self.field
    }

    #[must_use]
    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    #[must_use]
    pub fn session_state(&self) -> SessionState {
        self.session_state
    }

    #[must_use]
    pub fn current_piece(&self) -> &Piece {
        self.field.current_piece()
    }

    #[must_use]
    pub fn seed(&self) -> PieceSeed {
        self.field.seed()
    }

    #[must_use]
    pub fn ticks(&self) -> u32 {
        self.ticks
    }

    /// Game time covered so far: one tick interval per placement.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.tick_interval * self.ticks
    }

    /// Places the current piece, updates the statistics and advances one tick.
    ///
    /// Returns the number of cleared lines. Does nothing once the game is
    /// over.
    pub fn apply_placement(&mut self, placement: &Placement) -> usize {
        if self.session_state.is_game_over() {
            return 0;
        }
        let (outcome, result) = self.field.apply_placement(placement);
        self.ticks += 1;
        self.stats.complete_piece_drop(outcome.cleared_lines);
        self.stats.record_spawn(outcome.drawn);
        if let Err(err) = result {
            tracing::debug!(ticks = self.ticks, "game over: {err}");
            self.session_state = SessionState::GameOver;
        }
        outcome.cleared_lines
    }

    /// Ends the game early, e.g. when no legal placement exists.
    pub fn end(&mut self) {
        self.session_state = SessionState::GameOver;
    }
}
