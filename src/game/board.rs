use super::PlayerColor;
use crate::error::MoveError;

pub const COLUMNS: usize = 7;
pub const ROWS: usize = 6;

/// Tokens in a winning run
pub const RUN: usize = 4;

/// The 7x6 grid, addressed as `(column, row)`.
/// Row 0 is the top, row 5 is the bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [[PlayerColor; ROWS]; COLUMNS],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Board {
            cells: [[PlayerColor::None; ROWS]; COLUMNS],
        }
    }

    /// Build a board from column-major cells without checking gravity.
    pub(crate) fn from_cells(cells: [[PlayerColor; ROWS]; COLUMNS]) -> Self {
        Board { cells }
    }

    pub(crate) fn cells(&self) -> &[[PlayerColor; ROWS]; COLUMNS] {
        &self.cells
    }

    /// Get the cell at a specific position, `None` when off the board
    pub fn get(&self, column: usize, row: usize) -> Option<PlayerColor> {
        self.cells.get(column)?.get(row).copied()
    }

    /// Number of cells holding `color`
    pub fn count(&self, color: PlayerColor) -> usize {
        self.cells.iter().flatten().filter(|&&cell| cell == color).count()
    }

    /// Check if a column is full. Out-of-range columns count as full.
    pub fn is_column_full(&self, column: usize) -> bool {
        match self.cells.get(column) {
            Some(col) => col[0].is_some(),
            None => true,
        }
    }

    /// Check if the board is completely full
    pub fn is_full(&self) -> bool {
        (0..COLUMNS).all(|column| self.is_column_full(column))
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().flatten().all(|cell| !cell.is_some())
    }

    /// Drop a token in a column, returns the row where it landed
    pub fn drop_piece(&mut self, column: usize, color: PlayerColor) -> Result<usize, MoveError> {
        let cells = self
            .cells
            .get_mut(column)
            .ok_or(MoveError::OutOfRange { column })?;

        // Lowest empty row wins
        let row = (0..ROWS)
            .rev()
            .find(|&row| !cells[row].is_some())
            .ok_or(MoveError::ColumnFull { column })?;
        cells[row] = color;
        Ok(row)
    }

    /// Whether every column is stacked from the bottom without gaps.
    pub fn respects_gravity(&self) -> bool {
        self.cells.iter().all(|col| {
            // Once an empty cell is seen going upward, nothing above may be filled
            let mut gap = false;
            for cell in col.iter().rev() {
                if cell.is_some() {
                    if gap {
                        return false;
                    }
                } else {
                    gap = true;
                }
            }
            true
        })
    }

    /// Scan the whole grid for four equal, non-empty cells in a line.
    pub fn has_four_in_a_row(&self) -> bool {
        self.check_rows()
            || self.check_columns()
            || self.check_diagonal_rising()
            || self.check_diagonal_falling()
    }

    fn is_run(&self, cells: [(usize, usize); RUN]) -> bool {
        let (c, r) = cells[0];
        let first = self.cells[c][r];
        first.is_some() && cells[1..].iter().all(|&(c, r)| self.cells[c][r] == first)
    }

    /// Left to right along each row
    fn check_rows(&self) -> bool {
        (0..COLUMNS - (RUN - 1)).any(|i| {
            (0..ROWS).any(|j| self.is_run([(i, j), (i + 1, j), (i + 2, j), (i + 3, j)]))
        })
    }

    /// Top to bottom along each column
    fn check_columns(&self) -> bool {
        (0..COLUMNS).any(|i| {
            (0..ROWS - (RUN - 1)).any(|j| self.is_run([(i, j), (i, j + 1), (i, j + 2), (i, j + 3)]))
        })
    }

    /// Column and row both increasing
    fn check_diagonal_rising(&self) -> bool {
        (0..COLUMNS - (RUN - 1)).any(|i| {
            (0..ROWS - (RUN - 1)).any(|j| {
                self.is_run([(i, j), (i + 1, j + 1), (i + 2, j + 2), (i + 3, j + 3)])
            })
        })
    }

    /// Column increasing while row decreases; `j - 3` must stay on the board.
    fn check_diagonal_falling(&self) -> bool {
        (0..COLUMNS - (RUN - 1)).any(|i| {
            (RUN - 1..ROWS).rev().any(|j| {
                self.is_run([(i, j), (i + 1, j - 1), (i + 2, j - 2), (i + 3, j - 3)])
            })
        })
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
