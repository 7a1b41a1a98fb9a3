use std::{cell::OnceCell, iter};

use tetrai_engine::{BOARD_HEIGHT, BOARD_WIDTH, Board};

/// Lazily computed structural features of one board.
///
/// Each feature is computed on first access and cached, so evaluators pay
/// only for what they read.
#[derive(Debug)]
pub struct BoardAnalysis<'a> {
    board: &'a Board,
    column_heights: OnceCell<[u8; BOARD_WIDTH]>,
    column_occupied_cells: OnceCell<[u8; BOARD_WIDTH]>,
    aggregate_height: OnceCell<u32>,
    bumpiness: OnceCell<u32>,
    completed_lines: OnceCell<u32>,
    holes: OnceCell<u32>,
    max_height: OnceCell<u8>,
}

impl<'a> BoardAnalysis<'a> {
    #[must_use]
    pub fn from_board(board: &'a Board) -> Self {
        Self {
            board,
            column_heights: OnceCell::new(),
            column_occupied_cells: OnceCell::new(),
            aggregate_height: OnceCell::new(),
            bumpiness: OnceCell::new(),
            completed_lines: OnceCell::new(),
            holes: OnceCell::new(),
            max_height: OnceCell::new(),
        }
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        self.board
    }

    /// `H - y` of the topmost occupied cell in each column, `0` when empty.
    #[must_use]
    pub fn column_heights(&self) -> &[u8; BOARD_WIDTH] {
        self.column_heights.get_or_init(|| {
            let mut column_heights = [0; BOARD_WIDTH];
            for (x, h) in column_heights.iter_mut().enumerate() {
                let top = self
                    .board
                    .rows()
                    .position(|row| row.cell(x).is_some_and(|c| c.is_occupied()));
                if let Some(y) = top {
                    *h = to_u8(BOARD_HEIGHT - y);
                }
            }
            column_heights
        })
    }

    fn column_occupied_cells(&self) -> &[u8; BOARD_WIDTH] {
        self.column_occupied_cells.get_or_init(|| {
            let mut column_occupied_cells = [0; BOARD_WIDTH];
            for row in self.board.rows() {
                for (o, cell) in iter::zip(&mut column_occupied_cells, row.cells()) {
                    if cell.is_occupied() {
                        *o += 1;
                    }
                }
            }
            column_occupied_cells
        })
    }

    /// Sum of all column heights.
    #[must_use]
    pub fn aggregate_height(&self) -> u32 {
        *self.aggregate_height.get_or_init(|| {
            self.column_heights()
                .iter()
                .map(|&h| u32::from(h))
                .sum()
        })
    }

    /// Sum of absolute height differences between adjacent columns.
    #[must_use]
    pub fn bumpiness(&self) -> u32 {
        *self.bumpiness.get_or_init(|| {
            self.column_heights()
                .windows(2)
                .map(|w| u32::from(w[0].abs_diff(w[1])))
                .sum()
        })
    }

    /// Rows whose cells are all occupied. Nonzero only for boards that have
    /// not been cleared yet.
    #[must_use]
    pub fn completed_lines(&self) -> u32 {
        *self.completed_lines.get_or_init(|| {
            u32::try_from(self.board.full_row_count()).unwrap_or(u32::MAX)
        })
    }

    /// Empty cells lying below the topmost occupied cell of their column.
    #[must_use]
    pub fn holes(&self) -> u32 {
        *self.holes.get_or_init(|| {
            iter::zip(self.column_heights(), self.column_occupied_cells())
                .map(|(&h, &occ)| u32::from(h - occ))
                .sum()
        })
    }

    #[must_use]
    pub fn max_height(&self) -> u8 {
        *self
            .max_height
            .get_or_init(|| self.column_heights().iter().copied().max().unwrap_or(0))
    }
}

fn to_u8(n: usize) -> u8 {
    u8::try_from(n).unwrap_or(u8::MAX)
}
