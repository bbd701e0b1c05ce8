//! Board module - manages the game grid
//!
//! The board is a `height x width` grid where each cell is empty (`0`) or holds
//! a 1-based palette index. Uses a flat row-major buffer for cache locality;
//! dimensions are fixed when the board is built.
//! Coordinates: `(row, col)` where row 0 is the top and col 0 is the left edge.

use crate::error::{EngineError, Result};
use crate::types::{Cell, EMPTY, N_COLORS};

/// The game board - `height` rows x `width` columns using flat storage
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    width: usize,
    height: usize,
    /// Flat array of cells, row-major order (row * width + col)
    cells: Vec<Cell>,
}

impl Board {
    /// Create a new empty board
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![EMPTY; width * height],
        }
    }

    /// Calculate flat index from (row, col) coordinates
    #[inline(always)]
    fn index(&self, row: i32, col: i32) -> Option<usize> {
        if !self.contains(row, col) {
            return None;
        }
        Some(row as usize * self.width + col as usize)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Check whether (row, col) lies on the board
    #[inline(always)]
    pub fn contains(&self, row: i32, col: i32) -> bool {
        row >= 0 && col >= 0 && (row as usize) < self.height && (col as usize) < self.width
    }

    /// Get cell at (row, col)
    pub fn cell(&self, row: i32, col: i32) -> Result<Cell> {
        self.get(row, col)
            .ok_or(EngineError::OutOfBounds { row, col })
    }

    /// Set cell at (row, col)
    ///
    /// Fails for positions off the board and for values outside the palette.
    pub fn set_cell(&mut self, row: i32, col: i32, value: Cell) -> Result<()> {
        if value > N_COLORS {
            return Err(EngineError::InvalidCell { value });
        }
        let idx = self
            .index(row, col)
            .ok_or(EngineError::OutOfBounds { row, col })?;
        self.cells[idx] = value;
        Ok(())
    }

    /// True iff no cell in the row is empty
    pub fn is_full_row(&self, row: i32) -> Result<bool> {
        Ok(self.row_slice(row)?.iter().all(|&c| c != EMPTY))
    }

    /// True iff every cell in the row is empty
    pub fn is_empty_row(&self, row: i32) -> Result<bool> {
        Ok(self.row_slice(row)?.iter().all(|&c| c == EMPTY))
    }

    /// Cells of one row, left to right
    pub fn row_slice(&self, row: i32) -> Result<&[Cell]> {
        if row < 0 || row as usize >= self.height {
            return Err(EngineError::OutOfBounds { row, col: 0 });
        }
        let start = row as usize * self.width;
        Ok(&self.cells[start..start + self.width])
    }

    /// Get cell at (row, col)
    /// Returns None if out of bounds
    #[inline(always)]
    pub fn get(&self, row: i32, col: i32) -> Option<Cell> {
        self.index(row, col).map(|idx| self.cells[idx])
    }

    /// Write a cell without palette validation
    /// Returns false if out of bounds
    pub(crate) fn put(&mut self, row: i32, col: i32, value: Cell) -> bool {
        match self.index(row, col) {
            Some(idx) => {
                self.cells[idx] = value;
                true
            }
            None => false,
        }
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, row: i32, col: i32) -> bool {
        matches!(self.get(row, col), Some(c) if c != EMPTY)
    }

    /// Iterate over rows, top to bottom
    pub fn rows(&self) -> impl DoubleEndedIterator<Item = &[Cell]> + ExactSizeIterator + '_ {
        self.cells.chunks_exact(self.width.max(1))
    }

    /// Number of non-empty cells
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c != EMPTY).count()
    }

    /// Get a reference to the internal cells buffer
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells.fill(EMPTY);
    }

    /// Row-major 2D copy for renderers and feature extraction
    pub fn to_rows(&self) -> Vec<Vec<Cell>> {
        self.rows().map(|row| row.to_vec()).collect()
    }

    /// Build a board from row-major 2D data
    pub fn from_rows(rows: &[Vec<Cell>]) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, |r| r.len());
        if width == 0 || rows.iter().any(|r| r.len() != width) {
            return Err(EngineError::Configuration(
                "board rows must be non-empty and of equal length".to_string(),
            ));
        }

        let mut board = Self::new(width, height);
        for (row, cells) in rows.iter().enumerate() {
            for (col, &value) in cells.iter().enumerate() {
                board.set_cell(row as i32, col as i32, value)?;
            }
        }
        Ok(board)
    }

    /// Remove every filled row, shifting the rows above down.
    ///
    /// Rows are copied bottom to top into a zeroed board of the same size, so
    /// empty rows appear at the top. Returns the number of rows removed.
    pub fn clear_full_rows(&mut self) -> usize {
        let width = self.width;
        let mut next = vec![EMPTY; self.cells.len()];
        let mut write_row = self.height;
        let mut cleared = 0;

        for read_row in (0..self.height).rev() {
            let start = read_row * width;
            let row = &self.cells[start..start + width];
            if row.iter().all(|&c| c != EMPTY) {
                cleared += 1;
            } else {
                write_row -= 1;
                let dst = write_row * width;
                next[dst..dst + width].copy_from_slice(row);
            }
        }

        self.cells = next;
        cleared
    }

    /// Count empty cells in the stacked region.
    ///
    /// Scans bottom to top and stops at the first fully empty row; every empty
    /// cell in the rows before it counts.
    pub fn count_gaps(&self) -> usize {
        let mut gaps = 0;
        for row in self.rows().rev() {
            let empty = row.iter().filter(|&&c| c == EMPTY).count();
            if empty == self.width {
                break;
            }
            gaps += empty;
        }
        gaps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_index_calculation() {
        let board = Board::new(10, 20);
        assert_eq!(board.index(0, 0), Some(0));
        assert_eq!(board.index(0, 9), Some(9));
        assert_eq!(board.index(1, 0), Some(10));
        assert_eq!(board.index(19, 9), Some(199));
        assert_eq!(board.index(0, -1), None);
        assert_eq!(board.index(0, 10), None);
        assert_eq!(board.index(20, 0), None);
        assert_eq!(board.index(-1, 0), None);
    }

    #[test]
    fn test_board_flat_array() {
        let mut board = Board::new(10, 20);

        board.set_cell(0, 0, 1).unwrap();
        board.set_cell(10, 5, 4).unwrap();

        assert_eq!(board.cell(0, 0), Ok(1));
        assert_eq!(board.cell(10, 5), Ok(4));

        let cells = board.cells();
        assert_eq!(cells.len(), 200);
        assert_eq!(cells[0], 1);
        assert_eq!(cells[10 * 10 + 5], 4);
        assert_eq!(cells.iter().filter(|&&c| c != EMPTY).count(), 2);
    }

    #[test]
    fn test_set_cell_rejects_non_palette_value() {
        let mut board = Board::new(4, 4);
        assert_eq!(
            board.set_cell(0, 0, N_COLORS + 1),
            Err(EngineError::InvalidCell { value: N_COLORS + 1 })
        );
        assert_eq!(board.cell(0, 0), Ok(EMPTY));
    }

    #[test]
    fn test_board_from_rows_roundtrip() {
        let mut rows = vec![vec![0u8; 10]; 20];
        rows[5][3] = 3;
        rows[10][7] = 6;

        let board = Board::from_rows(&rows).unwrap();
        assert_eq!(board.to_rows(), rows);
    }

    #[test]
    fn test_from_rows_rejects_ragged_input() {
        let rows = vec![vec![0u8; 3], vec![0u8; 2]];
        assert!(matches!(
            Board::from_rows(&rows),
            Err(EngineError::Configuration(_))
        ));
    }

    #[test]
    fn test_count_gaps_stops_at_first_empty_row() {
        let mut board = Board::new(4, 5);
        // Row 4: one hole, row 3: three holes, row 2 empty, row 1 has a stray cell.
        for col in 0..3 {
            board.set_cell(4, col, 1).unwrap();
        }
        board.set_cell(3, 0, 1).unwrap();
        board.set_cell(1, 0, 1).unwrap();

        assert_eq!(board.count_gaps(), 1 + 3);
    }
}
