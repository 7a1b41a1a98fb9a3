use std::str::FromStr;

use rand::{Rng, distr::StandardUniform, prelude::Distribution};
use serde::{Deserialize, Serialize};

use super::{BOARD_WIDTH, board::Board, board::Cell, shape::Shape};

/// A falling piece: kind, current rotation state and anchor position.
///
/// Pieces are immutable; rotation and movement return new values.
///
/// # Example
///
/// ```
/// use tetrai_engine::{Board, Piece, PieceKind, Position};
///
/// let piece = Piece::new(PieceKind::T);
/// assert_eq!(piece.position(), Position::new(4, 0));
/// assert!(piece.is_valid_on(&Board::EMPTY));
///
/// let rotated = piece.rotated_right();
/// assert_eq!(rotated.rotation(), 1);
/// assert_eq!(rotated.shape(), &PieceKind::T.base_shape().rotated());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    kind: PieceKind,
    shape: Shape,
    position: Position,
    rotation: u8,
}

impl Piece {
    /// Creates a piece in its spawn state: rotation 0, horizontally centered
    /// on the top row.
    #[must_use]
    pub fn new(kind: PieceKind) -> Self {
        let shape = kind.base_shape();
        Self {
            kind,
            shape,
            position: Position::spawn(&shape),
            rotation: 0,
        }
    }

    #[must_use]
    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    #[must_use]
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    #[must_use]
    pub fn position(&self) -> Position {
        self.position
    }

    /// Rotation index in `0..4`, counted in clockwise quarter turns from spawn.
    #[must_use]
    pub fn rotation(&self) -> u8 {
        self.rotation
    }

    #[must_use]
    pub fn rotated_right(&self) -> Self {
        Self {
            shape: self.shape.rotated(),
            rotation: (self.rotation + 1) % 4,
            ..*self
        }
    }

    #[must_use]
    pub fn moved_to(&self, position: Position) -> Self {
        Self { position, ..*self }
    }

    #[must_use]
    pub fn is_valid_on(&self, board: &Board) -> bool {
        board.is_valid_placement(&self.shape, self.position)
    }

    /// Position this piece would land on after a hard drop.
    #[must_use]
    pub fn simulate_drop_position(&self, board: &Board) -> Position {
        Position::new(
            self.position.x(),
            board.resting_row(&self.shape, self.position),
        )
    }
}

/// Anchor of a shape on the board: the board coordinate of the shape
/// matrix's top-left cell.
///
/// Coordinates are signed; `y` is negative while a shape sticks out above the
/// board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    x: i32,
    y: i32,
}

impl Position {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Spawn anchor of a shape: centered horizontally on row 0.
    #[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    #[must_use]
    pub const fn spawn(shape: &Shape) -> Self {
        Self::new((BOARD_WIDTH / 2 - shape.width() / 2) as i32, 0)
    }

    #[must_use]
    pub const fn x(self) -> i32 {
        self.x
    }

    #[must_use]
    pub const fn y(self) -> i32 {
        self.y
    }
}

/// The seven piece kinds.
///
/// The discriminant is the color identifier written into board cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[repr(u8)]
pub enum PieceKind {
    /// I-piece.
    I = 1,
    /// O-piece.
    O = 2,
    /// T-piece.
    T = 3,
    /// L-piece.
    L = 4,
    /// J-piece.
    J = 5,
    /// S-piece.
    S = 6,
    /// Z-piece.
    Z = 7,
}

impl Distribution<PieceKind> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceKind {
        PieceKind::ALL[rng.random_range(0..PieceKind::LEN)]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("invalid piece kind: {input:?} (expected one of I, O, T, L, J, S, Z)")]
pub struct PieceKindParseError {
    #[error(not(source))]
    input: String,
}

impl PieceKind {
    /// Number of piece types (7).
    pub const LEN: usize = 7;

    /// All kinds in color-id order.
    pub const ALL: [PieceKind; PieceKind::LEN] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::L,
        PieceKind::J,
        PieceKind::S,
        PieceKind::Z,
    ];

    /// Color identifier in `1..=7`.
    #[must_use]
    pub const fn color_id(self) -> u8 {
        self as u8
    }

    #[must_use]
    pub const fn from_color_id(id: u8) -> Option<Self> {
        match id {
            1..=7 => Some(PieceKind::ALL[id as usize - 1]),
            _ => None,
        }
    }

    /// Position in [`PieceKind::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize - 1
    }

    /// Spawn orientation of this kind.
    #[must_use]
    pub const fn base_shape(self) -> Shape {
        BASE_SHAPES[self.index()]
    }

    /// Returns the single character representation of this piece kind.
    ///
    /// # Examples
    ///
    /// ```
    /// use tetrai_engine::PieceKind;
    ///
    /// assert_eq!(PieceKind::I.as_char(), 'I');
    /// assert_eq!(PieceKind::T.as_char(), 'T');
    /// ```
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            PieceKind::I => 'I',
            PieceKind::O => 'O',
            PieceKind::T => 'T',
            PieceKind::L => 'L',
            PieceKind::J => 'J',
            PieceKind::S => 'S',
            PieceKind::Z => 'Z',
        }
    }

    /// Parses a piece kind from a single character (case-insensitive).
    ///
    /// # Examples
    ///
    /// ```
    /// use tetrai_engine::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_char('I'), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_char('t'), Some(PieceKind::T));
    /// assert_eq!(PieceKind::from_char('X'), None);
    /// ```
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'I' => Some(PieceKind::I),
            'O' => Some(PieceKind::O),
            'T' => Some(PieceKind::T),
            'L' => Some(PieceKind::L),
            'J' => Some(PieceKind::J),
            'S' => Some(PieceKind::S),
            'Z' => Some(PieceKind::Z),
            _ => None,
        }
    }
}

impl FromStr for PieceKind {
    type Err = PieceKindParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.trim().chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => PieceKind::from_char(c),
            _ => None,
        }
        .ok_or_else(|| PieceKindParseError {
            input: s.to_owned(),
        })
    }
}

const BASE_SHAPES: [Shape; PieceKind::LEN] = {
    use Cell::Empty as E;
    const I: Cell = Cell::Piece(PieceKind::I);
    const O: Cell = Cell::Piece(PieceKind::O);
    const T: Cell = Cell::Piece(PieceKind::T);
    const L: Cell = Cell::Piece(PieceKind::L);
    const J: Cell = Cell::Piece(PieceKind::J);
    const S: Cell = Cell::Piece(PieceKind::S);
    const Z: Cell = Cell::Piece(PieceKind::Z);
    const EEEE: [Cell; 4] = [E; 4];
    [
        Shape::from_const(1, 4, [[I, I, I, I], EEEE, EEEE, EEEE]),
        Shape::from_const(2, 2, [[O, O, E, E], [O, O, E, E], EEEE, EEEE]),
        Shape::from_const(2, 3, [[E, T, E, E], [T, T, T, E], EEEE, EEEE]),
        Shape::from_const(2, 3, [[E, E, L, E], [L, L, L, E], EEEE, EEEE]),
        Shape::from_const(2, 3, [[J, E, E, E], [J, J, J, E], EEEE, EEEE]),
        Shape::from_const(2, 3, [[E, S, S, E], [S, S, E, E], EEEE, EEEE]),
        Shape::from_const(2, 3, [[Z, Z, E, E], [E, Z, Z, E], EEEE, EEEE]),
    ]
};
