//! Validates piece-argument parsing and board rendering

use quadtile::SolverError;
use quadtile::io::cli::build_piece_specs;
use quadtile::io::render::render_snapshot;
use quadtile::spatial::board::Board;
use quadtile::spatial::catalog::Tetromino;
use quadtile::spatial::piece::{PieceId, PieceShape, PieceSpec};

fn entries(raw: &[&str]) -> Vec<String> {
    raw.iter().map(|entry| (*entry).to_owned()).collect()
}

#[test]
fn test_piece_entries_expand_to_sequential_ids() {
    let Ok((specs, labels)) = build_piece_specs(&entries(&["O=2", "T=1"])) else {
        unreachable!("entries are well-formed");
    };

    assert_eq!(specs.len(), 3);
    assert_eq!(labels, vec!['O', 'O', 'T']);
    for (index, spec) in specs.iter().enumerate() {
        assert_eq!(spec.id(), PieceId(index as u32));
    }
    assert_eq!(specs.first().map(PieceSpec::cell_count), Some(4));
}

#[test]
fn test_piece_names_are_case_insensitive() {
    let Ok((specs, labels)) = build_piece_specs(&entries(&["o=1", "z=1"])) else {
        unreachable!("entries are well-formed");
    };
    assert_eq!(specs.len(), 2);
    assert_eq!(labels, vec!['O', 'Z']);
}

#[test]
fn test_zero_count_entries_contribute_nothing() {
    let Ok((specs, labels)) = build_piece_specs(&entries(&["O=0", "I=1"])) else {
        unreachable!("entries are well-formed");
    };
    assert_eq!(specs.len(), 1);
    assert_eq!(labels, vec!['I']);
}

#[test]
fn test_malformed_entries_are_rejected() {
    for bad in ["O2", "Q=1", "O=", "O=-3", "=2", "O=two"] {
        assert!(
            matches!(
                build_piece_specs(&entries(&[bad])),
                Err(SolverError::InvalidParameter { .. })
            ),
            "entry {bad:?} should be rejected"
        );
    }
}

#[test]
fn test_render_marks_empty_cells() {
    let Ok(mut board) = Board::new(4) else {
        unreachable!("valid board size");
    };
    let Ok(spec) = PieceSpec::new(PieceId(0), Tetromino::O.pattern()) else {
        unreachable!("catalog patterns are valid");
    };
    let block = PieceShape::from_spec(&spec);
    assert!(board.place(&block, 0, 0));

    let grid = render_snapshot(&board.snapshot(), |_| 'O');
    assert_eq!(grid, "OO..\nOO..\n....\n....\n");
}

#[test]
fn test_render_uses_per_piece_labels() {
    let Ok(mut board) = Board::new(2) else {
        unreachable!("valid board size");
    };
    let Ok(spec) = PieceSpec::new(PieceId(3), Tetromino::O.pattern()) else {
        unreachable!("catalog patterns are valid");
    };
    let block = PieceShape::from_spec(&spec);
    assert!(board.place(&block, 0, 0));

    let labels = ['I', 'J', 'L', 'O'];
    let grid = render_snapshot(&board.snapshot(), |id| {
        labels.get(id.0 as usize).copied().unwrap_or('?')
    });
    assert_eq!(grid, "OO\nOO\n");
}
