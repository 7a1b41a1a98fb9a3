//! Move selection for the falling-block agent.
//!
//! The agent scores boards with a fixed linear heuristic and picks the
//! placement of the current piece whose best continuation scores highest.
//!
//! # Architecture
//!
//! ```text
//! Session driver (one move per tick)
//!     ↓ asks
//! MoveSelector (LookaheadSearch or RandomMover)
//!     ↓ enumerates
//! Placement enumeration (rotation x column)
//!     ↓ scores leaves with
//! Heuristic evaluator (features from BoardAnalysis)
//! ```
//!
//! - [`board_analysis`] - Lazily computed board features (column heights,
//!   aggregate height, bumpiness, holes, completed lines)
//! - [`heuristic`] - Weighted sum of the features plus the tetris, hole and
//!   height adjustments
//! - [`placement`] - Every legal `(rotation, column)` of a piece
//! - [`lookahead`] - Exhaustive search over the current and up to two
//!   upcoming pieces
//! - [`random_mover`] - Uniform random placement, used when the agent is
//!   disabled
//! - [`config`] - Difficulty, lookahead depth and agent switches
//! - [`session`] - Plays a [`tetrai_engine::GameSession`] with a selector
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//!
//! use tetrai_engine::{GameSession, PieceSeed};
//! use tetrai_evaluator::{config::AgentConfig, session};
//!
//! let config = AgentConfig::default();
//! let mut game = GameSession::with_seed(PieceSeed::from_bytes([1; 16]), config.tick_interval());
//! let mut selector = config.build_selector();
//!
//! let turns = session::play(&mut game, selector.as_mut(), Some(20));
//! assert_eq!(turns, 20);
//! assert_eq!(game.elapsed(), Duration::from_millis(500 * 20));
//! ```

pub use self::selector::{Move, MoveSelector};

pub mod board_analysis;
pub mod config;
pub mod heuristic;
pub mod lookahead;
pub mod placement;
pub mod random_mover;
pub mod selector;
pub mod session;
