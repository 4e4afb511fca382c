//! Pieces module - the seven-shape catalog and matrix rotation
//!
//! Shapes are small row-major boolean matrices. Rotations are derived on
//! demand by remapping matrix indices; nothing but the spawn orientation is
//! stored. There are no wall kicks: a rotation either fits where the piece
//! already is or it is rejected by the caller.

use crate::types::{Color, PieceKind};

/// Largest side of any catalog shape (the I piece).
pub const MAX_SHAPE_DIM: usize = 4;

/// Rectangular occupancy matrix of a piece.
///
/// `rows` x `cols` is the logical size; bits outside it are always `false`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    rows: u8,
    cols: u8,
    bits: [[bool; MAX_SHAPE_DIM]; MAX_SHAPE_DIM],
}

impl Shape {
    /// Build a shape from rows of 0/1 values.
    ///
    /// Rows longer than [`MAX_SHAPE_DIM`] or more than [`MAX_SHAPE_DIM`] rows
    /// are truncated. The column count is the length of the first row.
    pub fn from_rows(rows: &[&[u8]]) -> Self {
        let height = rows.len().min(MAX_SHAPE_DIM);
        let width = rows.first().map_or(0, |r| r.len()).min(MAX_SHAPE_DIM);

        let mut bits = [[false; MAX_SHAPE_DIM]; MAX_SHAPE_DIM];
        for (r, row) in rows.iter().take(height).enumerate() {
            for (c, &v) in row.iter().take(width).enumerate() {
                bits[r][c] = v != 0;
            }
        }

        Self {
            rows: height as u8,
            cols: width as u8,
            bits,
        }
    }

    pub fn rows(&self) -> u8 {
        self.rows
    }

    pub fn cols(&self) -> u8 {
        self.cols
    }

    /// Whether the sub-cell at (row, col) is occupied. Out of range is empty.
    pub fn is_filled(&self, row: usize, col: usize) -> bool {
        row < self.rows as usize && col < self.cols as usize && self.bits[row][col]
    }

    /// Occupied sub-cells as `(dx, dy)` offsets from the shape origin.
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> {
        let shape = *self;
        (0..shape.rows as usize).flat_map(move |r| {
            (0..shape.cols as usize)
                .filter(move |&c| shape.bits[r][c])
                .map(move |c| (c as i8, r as i8))
        })
    }

    /// Rotate 90° counter-clockwise: `new[i][j] = old[j][cols - 1 - i]`.
    pub fn rotate_left(&self) -> Self {
        let (rows, cols) = (self.rows as usize, self.cols as usize);
        let mut bits = [[false; MAX_SHAPE_DIM]; MAX_SHAPE_DIM];
        for (i, out_row) in bits.iter_mut().enumerate().take(cols) {
            for (j, out) in out_row.iter_mut().enumerate().take(rows) {
                *out = self.bits[j][cols - 1 - i];
            }
        }
        Self {
            rows: self.cols,
            cols: self.rows,
            bits,
        }
    }

    /// Rotate 90° clockwise: `new[i][j] = old[rows - 1 - j][i]`.
    pub fn rotate_right(&self) -> Self {
        let (rows, cols) = (self.rows as usize, self.cols as usize);
        let mut bits = [[false; MAX_SHAPE_DIM]; MAX_SHAPE_DIM];
        for (i, out_row) in bits.iter_mut().enumerate().take(cols) {
            for (j, out) in out_row.iter_mut().enumerate().take(rows) {
                *out = self.bits[rows - 1 - j][i];
            }
        }
        Self {
            rows: self.cols,
            cols: self.rows,
            bits,
        }
    }
}

/// Get the spawn-orientation shape of a piece kind
pub fn catalog_shape(kind: PieceKind) -> Shape {
    match kind {
        PieceKind::I => Shape::from_rows(&[&[1, 1, 1, 1]]),
        PieceKind::O => Shape::from_rows(&[&[1, 1], &[1, 1]]),
        PieceKind::T => Shape::from_rows(&[&[0, 1, 0], &[1, 1, 1]]),
        PieceKind::S => Shape::from_rows(&[&[0, 1, 1], &[1, 1, 0]]),
        PieceKind::Z => Shape::from_rows(&[&[1, 1, 0], &[0, 1, 1]]),
        PieceKind::J => Shape::from_rows(&[&[1, 0, 0], &[1, 1, 1]]),
        PieceKind::L => Shape::from_rows(&[&[0, 0, 1], &[1, 1, 1]]),
    }
}

/// An immutable piece: a shape plus the color of its kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub shape: Shape,
}

impl Piece {
    /// Catalog piece in spawn orientation.
    pub fn new(kind: PieceKind) -> Self {
        Self {
            kind,
            shape: catalog_shape(kind),
        }
    }

    pub fn color(&self) -> Color {
        self.kind.color()
    }

    /// Same piece, rotated counter-clockwise.
    pub fn rotated_left(&self) -> Self {
        Self {
            shape: self.shape.rotate_left(),
            ..*self
        }
    }

    /// Same piece, rotated clockwise.
    pub fn rotated_right(&self) -> Self {
        Self {
            shape: self.shape.rotate_right(),
            ..*self
        }
    }

    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> {
        self.shape.cells()
    }
}

/// All seven catalog pieces in spawn orientation.
pub fn catalog() -> [Piece; 7] {
    PieceKind::ALL.map(Piece::new)
}
