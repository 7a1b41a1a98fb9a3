pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

/// The piece drawn after a drop does not fit at its spawn position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("new piece {kind:?} collides at its spawn position")]
pub struct GameOverError {
    #[error(not(source))]
    pub kind: PieceKind,
}
