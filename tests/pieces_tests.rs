//! Piece model tests through the facade crate

use stackfall::core::{get_shape, Piece};
use stackfall::types::{PieceKind, Rotation, SPAWN_POSITION};

#[test]
fn test_spawn_anchor_and_rotation() {
    for kind in PieceKind::ALL {
        let piece = Piece::new(kind);
        assert_eq!((piece.x, piece.y), SPAWN_POSITION);
        assert_eq!(piece.rotation, Rotation::North);
    }
}

#[test]
fn test_spawn_rows_straddle_buffer_and_row_zero() {
    for kind in PieceKind::ALL {
        let rows: Vec<i8> = Piece::new(kind).cells().iter().map(|&(_, y)| y).collect();
        assert!(rows.iter().all(|&y| (-1..=0).contains(&y)), "{kind:?}: {rows:?}");
        assert!(rows.contains(&0), "{kind:?} must reach visible row 0");
    }
}

#[test]
fn test_rotation_cycles_back() {
    for kind in PieceKind::ALL {
        let mut piece = Piece::at(kind, 4, 4);
        let start = piece.cells();
        for _ in 0..4 {
            piece.rotate();
        }
        assert_eq!(piece.rotation, Rotation::North);
        assert_eq!(piece.cells(), start);
    }
}

#[test]
fn test_o_is_rotation_invariant() {
    let north = get_shape(PieceKind::O, Rotation::North);
    for rotation in [Rotation::East, Rotation::South, Rotation::West] {
        assert_eq!(get_shape(PieceKind::O, rotation), north);
    }
}

#[test]
fn test_moves_translate_all_cells() {
    let mut piece = Piece::at(PieceKind::L, 4, 4);
    let before = piece.cells();
    piece.move_left();
    piece.move_down();
    let after = piece.cells();
    for (a, b) in before.iter().zip(after.iter()) {
        assert_eq!((a.0 - 1, a.1 + 1), *b);
    }
}

#[test]
fn test_piece_colors_are_distinct() {
    let mut colors: Vec<_> = PieceKind::ALL.iter().map(|k| Piece::new(*k).color()).collect();
    colors.sort();
    colors.dedup();
    assert_eq!(colors.len(), 7);
}
