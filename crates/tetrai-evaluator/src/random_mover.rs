use rand::{Rng, seq::IndexedRandom as _};
use rand_pcg::Pcg32;
use tetrai_engine::{Board, PieceKind};

use crate::{
    heuristic::EvaluationConfig,
    lookahead::LookaheadSearch,
    placement::available_placements,
    selector::{Move, MoveSelector},
};

/// Picks a legal placement uniformly at random.
///
/// Used while the agent is disabled. Returned moves carry a score of `0.0`.
#[derive(Debug)]
pub struct RandomMover<R = Pcg32> {
    rng: R,
}

impl<R> RandomMover<R>
where
    R: Rng,
{
    #[must_use]
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Chooses one legal placement of `current` with equal probability.
    ///
    /// If none exists, falls back to a single-piece search with no height
    /// cap and returns its move only when it has a finite score.
    pub fn random_move(&mut self, board: &Board, current: PieceKind) -> Option<Move> {
        let placements = available_placements(board, current);
        if let Some(placement) = placements.choose(&mut self.rng) {
            return Some(Move::new(*placement, 0.0));
        }
        tracing::debug!(piece = ?current, "no random placement, trying search");
        LookaheadSearch::new(EvaluationConfig::default())
            .choose_move(board, current, &[])
            .filter(|mv| mv.score().is_finite())
    }
}

impl<R> MoveSelector for RandomMover<R>
where
    R: Rng + Send + std::fmt::Debug,
{
    fn select_move(
        &mut self,
        board: &Board,
        current: PieceKind,
        _upcoming: &[PieceKind],
    ) -> Option<Move> {
        self.random_move(board, current)
    }
}
