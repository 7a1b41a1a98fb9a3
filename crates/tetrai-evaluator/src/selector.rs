use std::fmt;

use serde::Serialize;
use tetrai_engine::{Board, PieceKind, Placement, Shape};

/// A chosen placement and the score that justified it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Move {
    #[serde(flatten)]
    placement: Placement,
    score: f64,
}

impl Move {
    #[must_use]
    pub fn new(placement: Placement, score: f64) -> Self {
        Self { placement, score }
    }

    #[must_use]
    pub fn placement(&self) -> &Placement {
        &self.placement
    }

    #[must_use]
    pub fn rotation(&self) -> u8 {
        self.placement.rotation()
    }

    #[must_use]
    pub fn x(&self) -> i32 {
        self.placement.x()
    }

    #[must_use]
    pub fn shape(&self) -> &Shape {
        self.placement.shape()
    }

    /// Backed-up evaluation; `0.0` for random moves.
    #[must_use]
    pub fn score(&self) -> f64 {
        self.score
    }
}

/// Picks the placement of the current piece for one tick.
///
/// Implementations return `None` only when the current piece has no legal
/// placement at all.
pub trait MoveSelector: fmt::Debug + Send {
    fn select_move(
        &mut self,
        board: &Board,
        current: PieceKind,
        upcoming: &[PieceKind],
    ) -> Option<Move>;
}
