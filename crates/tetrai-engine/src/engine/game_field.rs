use std::collections::VecDeque;

use crate::{
    GameOverError,
    core::{Board, Piece, PieceKind, Placement},
};

use super::piece_generator::{PieceGenerator, PieceSeed};

/// Number of upcoming pieces kept visible behind the current piece.
pub const QUEUE_LEN: usize = 5;

/// Result of placing one piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DropOutcome {
    /// Rows removed after the placement.
    pub cleared_lines: usize,
    /// Kind drawn from the generator to refill the queue.
    pub drawn: PieceKind,
}

/// Single-turn game state: board, current piece and the upcoming queue.
#[derive(Debug, Clone)]
pub struct GameField {
    board: Board,
    current: Piece,
    queue: VecDeque<Piece>,
    generator: PieceGenerator,
}

impl Default for GameField {
    fn default() -> Self {
        Self::new()
    }
}

impl GameField {
    #[must_use]
    pub fn new() -> Self {
        Self::with_generator(PieceGenerator::new())
    }

    #[must_use]
    pub fn with_seed(seed: PieceSeed) -> Self {
        Self::with_generator(PieceGenerator::with_seed(seed))
    }

    /// Starts a game on an empty board, drawing the current piece and
    /// [`QUEUE_LEN`] upcoming pieces.
    #[must_use]
    pub fn with_generator(mut generator: PieceGenerator) -> Self {
        let current = generator.next_piece();
        let queue = (0..QUEUE_LEN).map(|_| generator.next_piece()).collect();
        Self {
            board: Board::EMPTY,
            current,
            queue,
            generator,
        }
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn current_piece(&self) -> &Piece {
        &self.current
    }

    pub fn next_pieces(&self) -> impl Iterator<Item = &Piece> + '_ {
        self.queue.iter()
    }

    /// Kinds of the current piece and every queued piece, in draw order.
    pub fn pieces_in_play(&self) -> impl Iterator<Item = PieceKind> + '_ {
        std::iter::once(&self.current)
            .chain(&self.queue)
            .map(Piece::kind)
    }

    #[must_use]
    pub fn seed(&self) -> PieceSeed {
        self.generator.seed()
    }

    /// Copies up to `n` upcoming pieces into a new vector.
    #[must_use]
    pub fn lookahead(&self, n: usize) -> Vec<Piece> {
        self.queue.iter().take(n).copied().collect()
    }

    /// Drops the current piece with `placement`, clears full rows and
    /// advances the queue.
    ///
    /// The queue is refilled before the next piece is checked, so the drawn
    /// kind is reported even when the game ends. On game over the board keeps
    /// the post-clear state and the current piece is left unchanged.
    pub fn apply_placement(
        &mut self,
        placement: &Placement,
    ) -> (DropOutcome, Result<(), GameOverError>) {
        let committed = placement.apply(&self.board, self.current.kind());
        let (board, cleared_lines) = committed.clear_full_lines();
        self.board = board;

        let drawn = self.generator.next_piece();
        self.queue.push_back(drawn);
        let outcome = DropOutcome {
            cleared_lines,
            drawn: drawn.kind(),
        };

        let next = self
            .queue
            .pop_front()
            .expect("queue is refilled before popping");
        if !next.is_valid_on(&self.board) {
            self.queue.push_front(next);
            return (outcome, Err(GameOverError { kind: next.kind() }));
        }
        self.current = next;
        (outcome, Ok(()))
    }
}
