use std::fmt;

use serde::{Serialize, Serializer};

use super::board::Cell;

/// Largest extent of a shape matrix in either direction.
pub const MAX_SHAPE_SIZE: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ShapeError {
    #[display("shape has no rows or no columns")]
    Empty,
    #[display("shape is {rows}x{cols}, larger than 4x4")]
    TooLarge { rows: usize, cols: usize },
    #[display("shape row {row} has {actual} cells, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        actual: usize,
    },
    #[display("shape has no occupied cell")]
    Blank,
}

/// One rotation state of a piece: a rectangular matrix of cells.
///
/// The matrix is stored in a fixed 4×4 buffer; cells outside
/// `height × width` are always [`Cell::Empty`], so two shapes compare equal
/// exactly when their dimensions and visible cells match.
///
/// # Example
///
/// ```
/// use tetrai_engine::PieceKind;
///
/// let shape = PieceKind::I.base_shape();
/// assert_eq!((shape.height(), shape.width()), (1, 4));
///
/// let rotated = shape.rotated();
/// assert_eq!((rotated.height(), rotated.width()), (4, 1));
/// assert_eq!(rotated.rotated().rotated().rotated(), shape);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    height: u8,
    width: u8,
    cells: [[Cell; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE],
}

impl Shape {
    pub(crate) const fn from_const(
        height: u8,
        width: u8,
        cells: [[Cell; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE],
    ) -> Self {
        assert!(height as usize <= MAX_SHAPE_SIZE && width as usize <= MAX_SHAPE_SIZE);
        Self {
            height,
            width,
            cells,
        }
    }

    /// Builds a shape from rows of cells (top row first).
    ///
    /// Rejects empty, ragged or oversized input and shapes without any
    /// occupied cell.
    #[expect(clippy::cast_possible_truncation)]
    pub fn from_rows<R>(rows: &[R]) -> Result<Self, ShapeError>
    where
        R: AsRef<[Cell]>,
    {
        let height = rows.len();
        let width = rows.first().map_or(0, |row| row.as_ref().len());
        if height == 0 || width == 0 {
            return Err(ShapeError::Empty);
        }
        if height > MAX_SHAPE_SIZE || width > MAX_SHAPE_SIZE {
            return Err(ShapeError::TooLarge {
                rows: height,
                cols: width,
            });
        }

        let mut cells = [[Cell::Empty; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        for (y, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != width {
                return Err(ShapeError::Ragged {
                    row: y,
                    expected: width,
                    actual: row.len(),
                });
            }
            cells[y][..width].copy_from_slice(row);
        }

        let shape = Self {
            height: height as u8,
            width: width as u8,
            cells,
        };
        if shape.occupied_cells().next().is_none() {
            return Err(ShapeError::Blank);
        }
        Ok(shape)
    }

    /// Number of rows in the matrix.
    #[must_use]
    pub const fn height(&self) -> usize {
        self.height as usize
    }

    /// Number of columns in the matrix.
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width as usize
    }

    #[must_use]
    pub fn cell(&self, row: usize, col: usize) -> Option<Cell> {
        (row < self.height() && col < self.width()).then(|| self.cells[row][col])
    }

    /// Iterates over the rows of the matrix, top row first.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.cells[..self.height()]
            .iter()
            .map(|row| &row[..self.width()])
    }

    /// Iterates over `(row, col)` offsets of every occupied cell, row-major.
    pub fn occupied_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.rows().enumerate().flat_map(|(row, cells)| {
            cells
                .iter()
                .enumerate()
                .filter(|(_col, cell)| cell.is_occupied())
                .map(move |(col, _cell)| (row, col))
        })
    }

    /// Returns this shape rotated 90° clockwise.
    ///
    /// Cell `(row, col)` moves to `(col, height - 1 - row)`. No normalization
    /// is applied, so symmetric shapes rotate onto themselves.
    #[must_use]
    pub fn rotated(&self) -> Self {
        let height = self.height();
        let mut cells = [[Cell::Empty; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        for (row, src) in self.rows().enumerate() {
            for (col, &cell) in src.iter().enumerate() {
                cells[col][height - 1 - row] = cell;
            }
        }
        Self {
            height: self.width,
            width: self.height,
            cells,
        }
    }
}

/// Rows joined by `/`, e.g. `.3./333` for the spawn T.
impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.rows().enumerate() {
            if i > 0 {
                f.write_str("/")?;
            }
            for cell in row {
                write!(f, "{}", cell.as_char())?;
            }
        }
        Ok(())
    }
}

impl Serialize for Shape {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::piece::PieceKind;

    #[test]
    fn test_rotation_is_four_cycle() {
        for kind in PieceKind::ALL {
            let shape = kind.base_shape();
            let mut rotated = shape;
            for _ in 0..4 {
                rotated = rotated.rotated();
            }
            assert_eq!(rotated, shape, "{kind:?} should return to itself");
        }
    }

    #[test]
    fn test_square_rotates_onto_itself() {
        let shape = PieceKind::O.base_shape();
        assert_eq!(shape.rotated(), shape);
    }

    #[test]
    fn test_rotation_transposes_dimensions() {
        for kind in PieceKind::ALL {
            let shape = kind.base_shape();
            let rotated = shape.rotated();
            assert_eq!(rotated.height(), shape.width());
            assert_eq!(rotated.width(), shape.height());
        }
    }

    #[test]
    fn test_rotate_t_clockwise() {
        let shape = PieceKind::T.base_shape();
        assert_eq!(shape.to_string(), ".3./333");
        assert_eq!(shape.rotated().to_string(), "3./33/3.");
        assert_eq!(shape.rotated().rotated().to_string(), "333/.3.");
        assert_eq!(shape.rotated().rotated().rotated().to_string(), ".3/33/.3");
    }

    #[test]
    fn test_occupied_cells_are_row_major() {
        let shape = PieceKind::S.base_shape();
        let cells: Vec<_> = shape.occupied_cells().collect();
        assert_eq!(cells, vec![(0, 1), (0, 2), (1, 0), (1, 1)]);
    }

    #[test]
    fn test_from_rows_matches_builtin() {
        let z = Cell::Piece(PieceKind::Z);
        let e = Cell::Empty;
        let shape = Shape::from_rows(&[[z, z, e], [e, z, z]]).unwrap();
        assert_eq!(shape, PieceKind::Z.base_shape());
    }

    #[test]
    fn test_from_rows_rejects_malformed_input() {
        let c = Cell::Piece(PieceKind::I);
        let e = Cell::Empty;

        let no_rows: [[Cell; 1]; 0] = [];
        assert_eq!(Shape::from_rows(&no_rows), Err(ShapeError::Empty));
        assert_eq!(
            Shape::from_rows(&[[c; 5]]),
            Err(ShapeError::TooLarge { rows: 1, cols: 5 })
        );
        assert_eq!(
            Shape::from_rows(&[vec![c, c], vec![c]]),
            Err(ShapeError::Ragged {
                row: 1,
                expected: 2,
                actual: 1
            })
        );
        assert_eq!(Shape::from_rows(&[[e, e]]), Err(ShapeError::Blank));
    }

    #[test]
    fn test_cell_out_of_range_is_none() {
        let shape = PieceKind::I.base_shape();
        assert_eq!(shape.cell(0, 3), Some(Cell::Piece(PieceKind::I)));
        assert_eq!(shape.cell(1, 0), None);
        assert_eq!(shape.cell(0, 4), None);
    }
}
