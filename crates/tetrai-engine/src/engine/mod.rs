//! Headless game driver built on the board model.
//!
//! - [`GameField`] - board, current piece and the upcoming queue
//! - [`GameSession`] - a field plus [`GameStats`] and a tick clock
//! - [`PieceGenerator`] - uniform piece draws, reproducible from a [`PieceSeed`]
//!
//! # Game Flow
//!
//! 1. Start a [`GameSession`] (6 pieces are drawn: current + 5 queued)
//! 2. Choose a [`Placement`](crate::Placement) for the current piece
//! 3. [`GameSession::apply_placement`] drops it, clears rows and draws a new piece
//! 4. Repeat until the next piece collides at its spawn position
//!
//! Choosing placements is left to the caller.

pub use self::{game_field::*, game_session::*, game_stats::*, piece_generator::*};

mod game_field;
mod game_session;
mod game_stats;
mod piece_generator;
