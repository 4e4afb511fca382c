//! Grid module - the playfield
//!
//! A fixed 10x20 matrix of cells, each empty or holding the color of a locked
//! piece. Uses a flat array for cache locality and zero allocation.
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..19
//! (top to bottom).

use crate::pieces::{Piece, Shape};
use crate::types::{Cell, COLS, ROWS};

/// Total number of cells on the grid
const GRID_SIZE: usize = (COLS as usize) * (ROWS as usize);

/// The playfield - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    /// Flat array of cells, row-major order (y * COLS + x)
    cells: [Cell; GRID_SIZE],
}

impl Grid {
    /// Create a new empty grid
    pub fn new() -> Self {
        Self {
            cells: [None; GRID_SIZE],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i16, y: i16) -> Option<usize> {
        if x < 0 || x >= COLS as i16 || y < 0 || y >= ROWS as i16 {
            return None;
        }
        Some((y as usize) * (COLS as usize) + (x as usize))
    }

    pub fn width(&self) -> u8 {
        COLS
    }

    pub fn height(&self) -> u8 {
        ROWS
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x as i16, y as i16).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        self.set_wide(x as i16, y as i16, cell)
    }

    fn set_wide(&mut self, x: i16, y: i16, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Whether `shape` placed with its origin at (x, y) is illegal.
    ///
    /// A placement collides when any occupied sub-cell is left of column 0,
    /// right of the last column, at or below the bottom row, or on top of a
    /// filled cell. Sub-cells above the top row only face the side walls, so a
    /// piece may hang partly above the field.
    pub fn collides(&self, shape: &Shape, x: i8, y: i8) -> bool {
        shape.cells().any(|(dx, dy)| {
            let px = x as i16 + dx as i16;
            let py = y as i16 + dy as i16;
            if px < 0 || px >= COLS as i16 || py >= ROWS as i16 {
                return true;
            }
            py >= 0 && Self::index(px, py).is_some_and(|idx| self.cells[idx].is_some())
        })
    }

    /// Write `piece`'s color into every occupied sub-cell at (x, y).
    ///
    /// Performs no collision check; callers validate first. Sub-cells that fall
    /// outside the grid are dropped.
    pub fn lock(&mut self, piece: &Piece, x: i8, y: i8) {
        let color = Some(piece.color());
        for (dx, dy) in piece.cells() {
            self.set_wide(x as i16 + dx as i16, y as i16 + dy as i16, color);
        }
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= ROWS as usize {
            return false;
        }
        self.row(y).iter().all(|cell| cell.is_some())
    }

    /// Cells of row `y`. Panics if `y` is out of range.
    pub fn row(&self, y: usize) -> &[Cell] {
        let start = y * COLS as usize;
        &self.cells[start..start + COLS as usize]
    }

    /// Iterate rows top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks_exact(COLS as usize)
    }

    /// Remove every full row, shifting the rows above down, and return how
    /// many were removed. Empty rows are inserted at the top.
    ///
    /// Two-pointer compaction from the bottom up; no allocation.
    pub fn clear_completed_rows(&mut self) -> usize {
        let width = COLS as usize;
        let mut cleared = 0;
        let mut write_y = ROWS as usize;

        for read_y in (0..ROWS as usize).rev() {
            if self.is_row_full(read_y) {
                cleared += 1;
                continue;
            }
            write_y -= 1;
            if write_y != read_y {
                let src = read_y * width;
                self.cells.copy_within(src..src + width, write_y * width);
            }
        }

        self.cells[..write_y * width].fill(None);
        cleared
    }

    /// Number of filled cells
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Copy into a 2D array (row-major, row 0 at the top)
    pub fn write_rows(&self, out: &mut [[Cell; COLS as usize]; ROWS as usize]) {
        for (dst, src) in out.iter_mut().zip(self.rows()) {
            dst.copy_from_slice(src);
        }
    }

    /// Clear the entire grid
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}
