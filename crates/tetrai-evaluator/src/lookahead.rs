//! Exhaustive lookahead search over the current piece and up to two upcoming
//! pieces.
//!
//! # How It Works
//!
//! The pieces form a sequence `[current, upcoming[0], upcoming[1]]`. Every
//! placement of the head is applied to the board and the tail is searched
//! recursively on the result; once the sequence is exhausted the board is
//! evaluated. Each placement of the current piece is scored with the best
//! leaf reachable below it, and the best of those is returned.
//!
//! Boards handed to the evaluator and to deeper plies are *not* line-cleared,
//! so the completed-lines feature sees what a placement completes. Clearing
//! happens when the chosen move is applied to the game.
//!
//! There is no pruning or caching. With at most 48 placements per piece a
//! three-piece sequence visits at most 48³ leaves.
//!
//! # Tie-breaking
//!
//! Only a strictly greater score replaces the current best, so among equal
//! scores the first enumerated placement (rotation 0 to 3, then ascending
//! column) wins.

use tetrai_engine::{Board, PieceKind};

use crate::{
    board_analysis::BoardAnalysis,
    config::{LookaheadDepth, SearchConfig},
    heuristic::{BoardEvaluator, EvaluationConfig, HeuristicEvaluator},
    placement::available_placements,
    selector::{Move, MoveSelector},
};

/// Longest upcoming-piece slice the search consumes.
pub const MAX_LOOKAHEAD: usize = LookaheadDepth::MAX as usize;

/// Lookahead search driven by a [`BoardEvaluator`].
///
/// # Example
///
/// ```
/// use tetrai_engine::{Board, PieceKind};
/// use tetrai_evaluator::{heuristic::EvaluationConfig, lookahead::LookaheadSearch};
///
/// let search = LookaheadSearch::new(EvaluationConfig::default());
/// let mv = search.choose_move(&Board::EMPTY, PieceKind::I, &[]).unwrap();
///
/// // Flat on the left edge
/// assert_eq!((mv.rotation(), mv.x()), (0, 0));
/// ```
#[derive(Debug)]
pub struct LookaheadSearch {
    evaluator: Box<dyn BoardEvaluator>,
    config: EvaluationConfig,
    depth: LookaheadDepth,
}

impl LookaheadSearch {
    /// Search with the default heuristic, considering every upcoming piece it
    /// is given (up to [`MAX_LOOKAHEAD`]).
    #[must_use]
    pub fn new(config: EvaluationConfig) -> Self {
        Self::with_evaluator(Box::new(HeuristicEvaluator::default()), config)
    }

    #[must_use]
    pub fn with_evaluator(evaluator: Box<dyn BoardEvaluator>, config: EvaluationConfig) -> Self {
        Self {
            evaluator,
            config,
            depth: LookaheadDepth::HYPER,
        }
    }

    /// Search configured from `search`: its evaluation switches and its
    /// lookahead depth.
    #[must_use]
    pub fn from_config(search: &SearchConfig) -> Self {
        Self {
            depth: search.lookahead,
            ..Self::new(search.evaluation())
        }
    }

    #[must_use]
    pub fn config(&self) -> &EvaluationConfig {
        &self.config
    }

    #[must_use]
    pub fn depth(&self) -> LookaheadDepth {
        self.depth
    }

    /// Chooses the placement of `current` with the best backed-up score.
    ///
    /// `upcoming` is truncated to [`MAX_LOOKAHEAD`] pieces. Returns `None`
    /// when `current` has no legal placement. When placements exist but all
    /// of them lead to a dead end (a later piece cannot be placed anywhere),
    /// the first placement is returned with a score of negative infinity.
    #[must_use]
    pub fn choose_move(
        &self,
        board: &Board,
        current: PieceKind,
        upcoming: &[PieceKind],
    ) -> Option<Move> {
        let upcoming = &upcoming[..upcoming.len().min(MAX_LOOKAHEAD)];

        let mut best: Option<Move> = None;
        for placement in available_placements(board, current) {
            let next = placement.apply(board, current);
            let score = self.best_score(&next, upcoming);
            tracing::trace!(
                rotation = placement.rotation(),
                x = placement.x(),
                score,
                "candidate"
            );
            if best.is_none_or(|best| score > best.score()) {
                best = Some(Move::new(placement, score));
            }
        }

        if let Some(best) = &best {
            tracing::debug!(
                piece = ?current,
                lookahead = upcoming.len(),
                rotation = best.rotation(),
                x = best.x(),
                score = best.score(),
                "move chosen"
            );
        }
        best
    }

    /// Best leaf evaluation reachable by placing `pieces` in order on `board`.
    fn best_score(&self, board: &Board, pieces: &[PieceKind]) -> f64 {
        let Some((&head, tail)) = pieces.split_first() else {
            return self
                .evaluator
                .evaluate_board(&BoardAnalysis::from_board(board), &self.config);
        };
        let mut best = f64::NEG_INFINITY;
        for placement in available_placements(board, head) {
            let score = self.best_score(&placement.apply(board, head), tail);
            if score > best {
                best = score;
            }
        }
        best
    }
}

impl MoveSelector for LookaheadSearch {
    fn select_move(
        &mut self,
        board: &Board,
        current: PieceKind,
        upcoming: &[PieceKind],
    ) -> Option<Move> {
        let depth = upcoming.len().min(self.depth.get());
        self.choose_move(board, current, &upcoming[..depth])
    }
}
