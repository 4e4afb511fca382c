//! Piece catalog and rotation tests

use tui_blockfall::core::pieces::{catalog, catalog_shape, Shape};
use tui_blockfall::core::Piece;
use tui_blockfall::types::{Color, PieceKind};

fn rows_of(shape: &Shape) -> Vec<Vec<u8>> {
    (0..shape.rows() as usize)
        .map(|r| {
            (0..shape.cols() as usize)
                .map(|c| shape.is_filled(r, c) as u8)
                .collect()
        })
        .collect()
}

#[test]
fn test_catalog_spawn_shapes() {
    assert_eq!(rows_of(&catalog_shape(PieceKind::I)), vec![vec![1, 1, 1, 1]]);
    assert_eq!(rows_of(&catalog_shape(PieceKind::O)), vec![vec![1, 1], vec![1, 1]]);
    assert_eq!(rows_of(&catalog_shape(PieceKind::S)), vec![vec![0, 1, 1], vec![1, 1, 0]]);
    assert_eq!(rows_of(&catalog_shape(PieceKind::Z)), vec![vec![1, 1, 0], vec![0, 1, 1]]);
    assert_eq!(rows_of(&catalog_shape(PieceKind::L)), vec![vec![0, 0, 1], vec![1, 1, 1]]);
}

#[test]
fn test_catalog_colors() {
    let colors: Vec<Color> = catalog().iter().map(|p| p.color()).collect();
    assert_eq!(
        colors,
        vec![
            Color::Cyan,
            Color::Yellow,
            Color::Purple,
            Color::Green,
            Color::Red,
            Color::Blue,
            Color::Orange
        ]
    );
}

#[test]
fn test_i_rotation_swaps_dimensions() {
    let i = Piece::new(PieceKind::I);
    let cw = i.rotated_right();
    assert_eq!((cw.shape.rows(), cw.shape.cols()), (4, 1));
    assert_eq!(cw.cells().count(), 4);
}

#[test]
fn test_t_rotates_clockwise() {
    let t = Piece::new(PieceKind::T).rotated_right();
    assert_eq!(rows_of(&t.shape), vec![vec![1, 0], vec![1, 1], vec![1, 0]]);
}

#[test]
fn test_t_rotates_counter_clockwise() {
    let t = Piece::new(PieceKind::T).rotated_left();
    assert_eq!(rows_of(&t.shape), vec![vec![0, 1], vec![1, 1], vec![0, 1]]);
}

#[test]
fn test_rotation_is_reversible() {
    for piece in catalog() {
        assert_eq!(piece.rotated_left().rotated_right(), piece, "{:?}", piece.kind);
        assert_eq!(piece.rotated_right().rotated_left(), piece, "{:?}", piece.kind);
    }
}

#[test]
fn test_four_rotations_restore_shape() {
    for piece in catalog() {
        let mut cw = piece;
        let mut ccw = piece;
        for _ in 0..4 {
            cw = cw.rotated_right();
            ccw = ccw.rotated_left();
        }
        assert_eq!(cw, piece);
        assert_eq!(ccw, piece);
    }
}

#[test]
fn test_rotation_keeps_kind_and_color() {
    let s = Piece::new(PieceKind::S).rotated_right();
    assert_eq!(s.kind, PieceKind::S);
    assert_eq!(s.color(), Color::Green);
}
