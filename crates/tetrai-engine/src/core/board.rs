use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::{
    BOARD_HEIGHT, BOARD_WIDTH,
    piece::{PieceKind, Position},
    shape::Shape,
};

/// A single board or shape cell.
///
/// Occupied cells remember which piece kind filled them; the kind doubles as
/// the color identifier (`1..=7`) exposed by [`Cell::color_id`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    Piece(PieceKind),
}

impl Cell {
    #[must_use]
    pub const fn is_empty(self) -> bool {
        matches!(self, Cell::Empty)
    }

    #[must_use]
    pub const fn is_occupied(self) -> bool {
        !self.is_empty()
    }

    /// Returns `0` for an empty cell and the piece color (`1..=7`) otherwise.
    #[must_use]
    pub const fn color_id(self) -> u8 {
        match self {
            Cell::Empty => 0,
            Cell::Piece(kind) => kind.color_id(),
        }
    }

    #[must_use]
    pub const fn from_color_id(id: u8) -> Option<Self> {
        if id == 0 {
            return Some(Cell::Empty);
        }
        match PieceKind::from_color_id(id) {
            Some(kind) => Some(Cell::Piece(kind)),
            None => None,
        }
    }

    /// `.` for empty, the color digit otherwise.
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Piece(kind) => (b'0' + kind.color_id()) as char,
        }
    }

    /// Inverse of [`Cell::as_char`]; `#` is accepted as a color-1 cell.
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            '.' => Some(Cell::Empty),
            '#' => Some(Cell::Piece(PieceKind::I)),
            '1'..='7' => Cell::from_color_id(c as u8 - b'0'),
            _ => None,
        }
    }
}

/// One board row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoardRow {
    cells: [Cell; BOARD_WIDTH],
}

impl BoardRow {
    pub const EMPTY: Self = Self {
        cells: [Cell::Empty; BOARD_WIDTH],
    };

    #[must_use]
    pub fn cells(&self) -> &[Cell; BOARD_WIDTH] {
        &self.cells
    }

    #[must_use]
    pub fn cell(&self, x: usize) -> Option<Cell> {
        self.cells.get(x).copied()
    }

    /// A row is full when every cell is occupied.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|cell| cell.is_occupied())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|cell| cell.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum BoardParseError {
    #[display("board has {rows} rows, at most 20 allowed")]
    TooManyRows { rows: usize },
    #[display("board row {row} has {width} cells, expected 10")]
    RowWidth { row: usize, width: usize },
    #[display("invalid cell {ch:?} at row {row}, column {col}")]
    InvalidCell { row: usize, col: usize, ch: char },
}

/// The 10×20 playing field.
///
/// Row `0` is the top of the board and `y` grows downward; `x` grows to the
/// right. `Board` is a value type: [`Board::commit`] and
/// [`Board::clear_full_lines`] return new boards.
///
/// Shape anchors use signed coordinates so that a shape may be tested while
/// partly above the board (`y < 0`) or with empty leading columns left of
/// column `0`. Every cell lookup is bounds-checked.
///
/// # Example
///
/// ```
/// use tetrai_engine::{Board, PieceKind, Position};
///
/// let board = Board::EMPTY;
/// let shape = PieceKind::O.base_shape();
/// let spawn = Position::new(4, 0);
///
/// assert!(board.is_valid_placement(&shape, spawn));
/// assert_eq!(board.resting_row(&shape, spawn), 18);
///
/// let board = board.commit(&shape, spawn, PieceKind::O);
/// assert!(board.cell(4, 19).is_some_and(|c| c.is_occupied()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    rows: [BoardRow; BOARD_HEIGHT],
}

impl Default for Board {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Board {
    pub const WIDTH: usize = BOARD_WIDTH;
    pub const HEIGHT: usize = BOARD_HEIGHT;

    pub const EMPTY: Self = Self {
        rows: [BoardRow::EMPTY; BOARD_HEIGHT],
    };

    /// Creates an empty board.
    #[must_use]
    pub const fn new() -> Self {
        Self::EMPTY
    }

    /// Iterates over the rows, top row first.
    pub fn rows(&self) -> impl Iterator<Item = &BoardRow> + '_ {
        self.rows.iter()
    }

    #[must_use]
    pub fn row(&self, y: usize) -> Option<&BoardRow> {
        self.rows.get(y)
    }

    /// Returns the cell at `(x, y)`, or `None` outside the board.
    #[must_use]
    pub fn cell(&self, x: i32, y: i32) -> Option<Cell> {
        let x = usize::try_from(x).ok()?;
        let y = usize::try_from(y).ok()?;
        self.rows.get(y)?.cell(x)
    }

    /// Number of rows whose cells are all occupied.
    #[must_use]
    pub fn full_row_count(&self) -> usize {
        self.rows.iter().filter(|row| row.is_full()).count()
    }

    /// Checks whether `shape` anchored at `pos` fits on the board.
    ///
    /// For each occupied shape cell the board coordinate
    /// `(pos.x + col, pos.y + row)` must have `x` in `0..WIDTH` and
    /// `y < HEIGHT`. Coordinates above the board (`y < 0`) are allowed; cells
    /// on the board must be empty.
    #[must_use]
    pub fn is_valid_placement(&self, shape: &Shape, pos: Position) -> bool {
        shape.occupied_cells().all(|(row, col)| {
            let Some((x, y)) = offset(pos, row, col) else {
                return false;
            };
            if !(0..WIDTH).contains(&x) || y >= HEIGHT {
                return false;
            }
            y < 0 || self.cell(x, y).is_some_and(Cell::is_empty)
        })
    }

    /// Simulates a hard drop: the largest `y >= pos.y` reachable by moving
    /// straight down one row at a time while the placement stays valid.
    #[must_use]
    pub fn resting_row(&self, shape: &Shape, pos: Position) -> i32 {
        let mut y = pos.y();
        while let Some(next) = y.checked_add(1) {
            if !self.is_valid_placement(shape, Position::new(pos.x(), next)) {
                break;
            }
            y = next;
        }
        y
    }

    /// Drops `shape` from `pos` to its resting row and writes its occupied
    /// cells as `kind`, returning the new board.
    ///
    /// Cells that would land above the board are skipped.
    #[must_use]
    pub fn commit(&self, shape: &Shape, pos: Position, kind: PieceKind) -> Self {
        let resting = Position::new(pos.x(), self.resting_row(shape, pos));
        let mut board = self.clone();
        board.fill_shape(shape, resting, Cell::Piece(kind));
        board
    }

    /// Removes every full row and returns the compacted board together with
    /// the number of rows removed.
    ///
    /// Remaining rows keep their order and empty rows are inserted at the top.
    #[must_use]
    pub fn clear_full_lines(&self) -> (Self, usize) {
        let mut board = self.clone();
        let count = board.clear_lines_in_place();
        (board, count)
    }

    fn fill_shape(&mut self, shape: &Shape, pos: Position, cell: Cell) {
        for (row, col) in shape.occupied_cells() {
            let Some((x, y)) = offset(pos, row, col) else {
                continue;
            };
            let (Ok(x), Ok(y)) = (usize::try_from(x), usize::try_from(y)) else {
                continue;
            };
            if let Some(target) = self.rows.get_mut(y).and_then(|r| r.cells.get_mut(x)) {
                *target = cell;
            }
        }
    }

    fn clear_lines_in_place(&mut self) -> usize {
        let mut count = 0;
        for y in (0..BOARD_HEIGHT).rev() {
            if self.rows[y].is_full() {
                count += 1;
                continue;
            }
            if count > 0 {
                self.rows[y + count] = self.rows[y];
            }
        }
        self.rows[..count].fill(BoardRow::EMPTY);
        count
    }
}

#[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
const WIDTH: i32 = BOARD_WIDTH as i32;
#[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
const HEIGHT: i32 = BOARD_HEIGHT as i32;

fn offset(pos: Position, row: usize, col: usize) -> Option<(i32, i32)> {
    let x = pos.x().checked_add(i32::try_from(col).ok()?)?;
    let y = pos.y().checked_add(i32::try_from(row).ok()?)?;
    Some((x, y))
}

/// One line per row, top row first.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (y, row) in self.rows.iter().enumerate() {
            if y > 0 {
                writeln!(f)?;
            }
            for cell in &row.cells {
                write!(f, "{}", cell.as_char())?;
            }
        }
        Ok(())
    }
}

/// Parses the text form produced by `Display`.
///
/// Blank lines and surrounding whitespace are ignored. Fewer than
/// [`BOARD_HEIGHT`] rows may be given; they are placed at the bottom of the
/// board and the rows above stay empty.
impl FromStr for Board {
    type Err = BoardParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lines: Vec<&str> = s
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        if lines.len() > BOARD_HEIGHT {
            return Err(BoardParseError::TooManyRows { rows: lines.len() });
        }

        let mut board = Self::EMPTY;
        let top = BOARD_HEIGHT - lines.len();
        for (i, line) in lines.iter().enumerate() {
            let width = line.chars().count();
            if width != BOARD_WIDTH {
                return Err(BoardParseError::RowWidth { row: i, width });
            }
            for (x, ch) in line.chars().enumerate() {
                let cell = Cell::from_char(ch).ok_or(BoardParseError::InvalidCell {
                    row: i,
                    col: x,
                    ch,
                })?;
                board.rows[top + i].cells[x] = cell;
            }
        }
        Ok(board)
    }
}

impl Serialize for Board {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        // Format: "........../..../1111111.11" (rows joined by '/')
        serializer.collect_str(&self.to_string().replace('\n', "/"))
    }
}

impl<'de> Deserialize<'de> for Board {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.replace('/', "\n")
            .parse()
            .map_err(|e| serde::de::Error::custom(format!("invalid board: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(art: &str) -> Board {
        art.parse().unwrap()
    }

    fn rows_of(board: &Board) -> Vec<String> {
        board.to_string().lines().map(str::to_owned).collect()
    }

    #[test]
    fn test_empty_board() {
        let board = Board::new();
        assert!(board.rows().all(BoardRow::is_empty));
        assert_eq!(board.rows().count(), BOARD_HEIGHT);
        assert_eq!(board.full_row_count(), 0);
    }

    #[test]
    fn test_cell_out_of_bounds_is_none() {
        let board = Board::EMPTY;
        assert_eq!(board.cell(0, 0), Some(Cell::Empty));
        assert_eq!(board.cell(-1, 0), None);
        assert_eq!(board.cell(0, -1), None);
        assert_eq!(board.cell(10, 0), None);
        assert_eq!(board.cell(0, 20), None);
    }

    #[test]
    fn test_valid_placement_bounds() {
        let board = Board::EMPTY;
        let i = PieceKind::I.base_shape();
        assert!(board.is_valid_placement(&i, Position::new(0, 0)));
        assert!(board.is_valid_placement(&i, Position::new(6, 0)));
        assert!(!board.is_valid_placement(&i, Position::new(7, 0)));
        assert!(!board.is_valid_placement(&i, Position::new(-1, 0)));
        assert!(board.is_valid_placement(&i, Position::new(0, 19)));
        assert!(!board.is_valid_placement(&i, Position::new(0, 20)));
        // Above the board is not checked against any floor
        assert!(board.is_valid_placement(&i, Position::new(0, -5)));
    }

    #[test]
    fn test_negative_anchor_rejected_for_tight_shapes() {
        // Every built-in rotation state has an occupied cell in its first
        // column, so anchors left of column 0 never fit.
        let board = Board::EMPTY;
        for kind in PieceKind::ALL {
            let mut shape = kind.base_shape();
            for _ in 0..4 {
                assert!(!board.is_valid_placement(&shape, Position::new(-1, 0)));
                assert!(!board.is_valid_placement(&shape, Position::new(-2, 0)));
                assert!(board.is_valid_placement(&shape, Position::new(0, 0)));
                shape = shape.rotated();
            }
        }
        let vertical = PieceKind::I.base_shape().rotated();
        assert!(board.is_valid_placement(&vertical, Position::new(9, 0)));
    }

    #[test]
    fn test_valid_placement_overlap() {
        let board = board(
            "
            ....1.....
            ",
        );
        let o = PieceKind::O.base_shape();
        assert!(!board.is_valid_placement(&o, Position::new(3, 18)));
        assert!(!board.is_valid_placement(&o, Position::new(4, 18)));
        assert!(board.is_valid_placement(&o, Position::new(5, 18)));
        assert!(board.is_valid_placement(&o, Position::new(3, 17)));
    }

    #[test]
    fn test_overflowing_anchor_is_invalid() {
        let board = Board::EMPTY;
        let o = PieceKind::O.base_shape();
        assert!(!board.is_valid_placement(&o, Position::new(i32::MAX, 0)));
        assert!(!board.is_valid_placement(&o, Position::new(0, i32::MAX)));
        assert!(board.is_valid_placement(&o, Position::new(0, i32::MIN)));
    }

    #[test]
    fn test_resting_row_is_final() {
        let board = board(
            "
            ..........
            ...22.....
            ...22....1
            1111111.11
            ",
        );
        for kind in PieceKind::ALL {
            let mut shape = kind.base_shape();
            for _ in 0..4 {
                for x in -2..WIDTH {
                    let pos = Position::new(x, 0);
                    if !board.is_valid_placement(&shape, pos) {
                        continue;
                    }
                    let y = board.resting_row(&shape, pos);
                    assert!(board.is_valid_placement(&shape, Position::new(x, y)));
                    assert!(!board.is_valid_placement(&shape, Position::new(x, y + 1)));
                }
                shape = shape.rotated();
            }
        }
    }

    #[test]
    fn test_resting_row_on_stack() {
        let board = board(
            "
            ...22.....
            ...22.....
            ",
        );
        let i = PieceKind::I.base_shape();
        assert_eq!(board.resting_row(&i, Position::new(0, 0)), 17);
        assert_eq!(board.resting_row(&i, Position::new(5, 0)), 19);
        // A vertical I slides into the single gap
        let board = board_with_gap();
        let vertical = i.rotated();
        assert_eq!(board.resting_row(&vertical, Position::new(7, 0)), 16);
    }

    fn board_with_gap() -> Board {
        board(
            "
            1111111.11
            ",
        )
    }

    #[test]
    fn test_commit_writes_color_at_resting_row() {
        let board = Board::EMPTY;
        let t = PieceKind::T.base_shape();
        let after = board.commit(&t, Position::new(0, 0), PieceKind::T);
        assert_eq!(
            rows_of(&after)[18..],
            [".3........".to_owned(), "333.......".to_owned()]
        );
        // Input board untouched
        assert_eq!(board, Board::EMPTY);
    }

    #[test]
    fn test_commit_skips_cells_above_board() {
        // Column 0 filled up to the top; a vertical I dropped there from
        // y = -3 cannot move and only its bottom cell lands on row 0.
        let mut art = String::new();
        for _ in 1..BOARD_HEIGHT {
            art.push_str("1.........\n");
        }
        let board = board(&art);
        let vertical = PieceKind::I.base_shape().rotated();
        let pos = Position::new(0, -3);
        assert_eq!(board.resting_row(&vertical, pos), -3);
        let after = board.commit(&vertical, pos, PieceKind::Z);
        assert_eq!(after.cell(0, 0), Some(Cell::Piece(PieceKind::Z)));
        assert_eq!(
            after.rows().filter(|row| row.cell(0) == Some(Cell::Piece(PieceKind::Z))).count(),
            1
        );
    }

    #[test]
    fn test_clear_full_lines_preserves_order() {
        let board = board(
            "
            .5........
            1111111111
            ..6.......
            2222222222
            3333333333
            ...7......
            ",
        );
        let (cleared, count) = board.clear_full_lines();
        assert_eq!(count, 3);
        let rows = rows_of(&cleared);
        assert_eq!(rows.len(), BOARD_HEIGHT);
        assert!(rows[..17].iter().all(|row| row == ".........."));
        assert_eq!(rows[17], ".5........");
        assert_eq!(rows[18], "..6.......");
        assert_eq!(rows[19], "...7......");
        // Source board untouched
        assert_eq!(board.full_row_count(), 3);
    }

    #[test]
    fn test_clear_full_lines_no_full_rows() {
        let board = board_with_gap();
        let (cleared, count) = board.clear_full_lines();
        assert_eq!(count, 0);
        assert_eq!(cleared, board);
    }

    #[test]
    fn test_clear_full_lines_all_full() {
        let art = "7777777777\n".repeat(BOARD_HEIGHT);
        let (cleared, count) = board(&art).clear_full_lines();
        assert_eq!(count, BOARD_HEIGHT);
        assert_eq!(cleared, Board::EMPTY);
    }

    #[test]
    fn test_parse_errors() {
        let too_many = "..........\n".repeat(BOARD_HEIGHT + 1);
        assert_eq!(
            too_many.parse::<Board>(),
            Err(BoardParseError::TooManyRows { rows: 21 })
        );
        assert_eq!(
            "........".parse::<Board>(),
            Err(BoardParseError::RowWidth { row: 0, width: 8 })
        );
        assert_eq!(
            "....x.....".parse::<Board>(),
            Err(BoardParseError::InvalidCell {
                row: 0,
                col: 4,
                ch: 'x'
            })
        );
        assert_eq!(
            "....8.....".parse::<Board>(),
            Err(BoardParseError::InvalidCell {
                row: 0,
                col: 4,
                ch: '8'
            })
        );
    }

    #[test]
    fn test_board_serialization() {
        let board = board(
            "
            .5........
            1111111.11
            ",
        );
        let serialized = serde_json::to_string(&board).unwrap();
        assert!(serialized.starts_with("\"........../"));
        assert!(serialized.ends_with("/.5......../1111111.11\""));

        let deserialized: Board = serde_json::from_str(&serialized).unwrap();
        assert_eq!(deserialized, board);
        assert!(serde_json::from_str::<Board>("\"bogus\"").is_err());
    }

    #[test]
    fn test_cell_char_conversion() {
        for kind in PieceKind::ALL {
            let cell = Cell::Piece(kind);
            assert_eq!(Cell::from_char(cell.as_char()), Some(cell));
            assert_eq!(Cell::from_color_id(cell.color_id()), Some(cell));
        }
        assert_eq!(Cell::from_char('#'), Some(Cell::Piece(PieceKind::I)));
        assert_eq!(Cell::from_color_id(8), None);
    }
}
