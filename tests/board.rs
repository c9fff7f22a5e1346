//! Validates piece rotation, board placement, and backtracking invariants

use ndarray::array;
use quadtile::SolverError;
use quadtile::spatial::board::{Board, Cursor};
use quadtile::spatial::catalog::{ALL_TETROMINOES, Tetromino};
use quadtile::spatial::piece::{PieceId, PieceShape, PieceSpec};

fn shape_of(id: u32, tetromino: Tetromino) -> PieceShape {
    let Ok(spec) = PieceSpec::new(PieceId(id), tetromino.pattern()) else {
        unreachable!("catalog patterns are valid");
    };
    PieceShape::from_spec(&spec)
}

fn board_of(size: usize) -> Board {
    let Ok(board) = Board::new(size) else {
        unreachable!("valid board size");
    };
    board
}

#[test]
fn test_rotation_closure_for_all_catalog_pieces() {
    for tetromino in ALL_TETROMINOES {
        let mut shape = shape_of(0, tetromino);
        let original = shape.matrix().clone();
        let original_cells = shape.occupied_cells().to_vec();

        for _ in 0..4 {
            shape.rotate_clockwise();
        }

        assert_eq!(
            *shape.matrix(),
            original,
            "four rotations must restore {} exactly",
            tetromino.letter()
        );
        assert_eq!(shape.occupied_cells(), original_cells.as_slice());
        assert_eq!(shape.rotation(), 0);
    }
}

#[test]
fn test_rotation_periods_reflect_symmetry() {
    assert_eq!(shape_of(0, Tetromino::O).rotation_period(), 1);
    assert_eq!(shape_of(0, Tetromino::I).rotation_period(), 2);
    assert_eq!(shape_of(0, Tetromino::S).rotation_period(), 2);
    assert_eq!(shape_of(0, Tetromino::Z).rotation_period(), 2);
    assert_eq!(shape_of(0, Tetromino::T).rotation_period(), 4);
    assert_eq!(shape_of(0, Tetromino::J).rotation_period(), 4);
    assert_eq!(shape_of(0, Tetromino::L).rotation_period(), 4);
}

#[test]
fn test_occupied_cells_are_row_major_offsets() {
    let shape = shape_of(0, Tetromino::T);
    assert_eq!(shape.occupied_cells(), &[(0, 0), (0, 1), (0, 2), (1, 1)]);
    assert_eq!(shape.leading_offset(), (0, 0));

    let skew = shape_of(1, Tetromino::S);
    assert_eq!(skew.occupied_cells(), &[(0, 1), (0, 2), (1, 0), (1, 1)]);
    assert_eq!(skew.leading_offset(), (0, 1));
}

#[test]
fn test_set_rotation_selects_orientation() {
    let mut shape = shape_of(0, Tetromino::I);
    shape.set_rotation(1);
    assert_eq!(shape.rotation(), 1);
    // Vertical bar; rotation pushes the cells to the far matrix column but
    // the offsets stay reduced to the bounding box
    assert_eq!(shape.occupied_cells(), &[(0, 0), (1, 0), (2, 0), (3, 0)]);

    shape.set_rotation(0);
    assert_eq!(shape.occupied_cells(), &[(0, 0), (0, 1), (0, 2), (0, 3)]);
}

#[test]
fn test_rotated_offsets_are_normalized() {
    let mut hook = shape_of(0, Tetromino::J);
    hook.set_rotation(1);
    // The rotated pattern sits away from its matrix origin; reducing to the
    // bounding box keeps the board's left column reachable
    assert_eq!(hook.occupied_cells(), &[(0, 1), (1, 1), (2, 0), (2, 1)]);
    assert_eq!(hook.leading_offset(), (0, 1));

    let mut board = board_of(4);
    assert!(board.can_place(&hook, 0, 0));
    assert!(board.place(&hook, 0, 0));
    assert_eq!(board.cell(2, 0), Some(PieceId(0)));
}

#[test]
fn test_pattern_padding_is_ignored() {
    // A block drawn in the middle of a larger matrix behaves exactly like
    // one drawn at the origin
    let pattern = ndarray::Array2::from_shape_fn((4, 4), |(row, col)| {
        (1..3).contains(&row) && (1..3).contains(&col)
    });
    let Ok(spec) = PieceSpec::new(PieceId(0), pattern) else {
        unreachable!("pattern is square and non-empty");
    };
    let shape = PieceShape::from_spec(&spec);

    assert_eq!(shape.occupied_cells(), &[(0, 0), (0, 1), (1, 0), (1, 1)]);
    assert_eq!(shape.leading_offset(), (0, 0));
    assert_eq!(shape.rotation_period(), 1);
}

#[test]
fn test_piece_spec_rejects_invalid_patterns() {
    let not_square = ndarray::Array2::from_elem((2, 3), true);
    assert!(matches!(
        PieceSpec::new(PieceId(0), not_square),
        Err(SolverError::InvalidParameter { .. })
    ));

    let empty = array![[false, false], [false, false]];
    assert!(matches!(
        PieceSpec::new(PieceId(0), empty),
        Err(SolverError::InvalidParameter { .. })
    ));
}

#[test]
fn test_board_size_validation() {
    assert!(matches!(
        Board::new(0),
        Err(SolverError::InvalidParameter { .. })
    ));
    assert!(matches!(
        Board::new(1000),
        Err(SolverError::InvalidParameter { .. })
    ));
    assert!(Board::new(4).is_ok());
}

#[test]
fn test_place_rejects_out_of_bounds_and_overlap() {
    let mut board = board_of(4);
    let first = shape_of(0, Tetromino::O);
    let second = shape_of(1, Tetromino::O);

    assert!(board.can_place(&first, 0, 0));
    assert!(board.place(&first, 0, 0));

    // Overlapping the placed block
    assert!(!board.can_place(&second, 1, 1));
    assert!(!board.place(&second, 1, 1));

    // Sticking out past the bottom-right corner
    assert!(!board.can_place(&second, 3, 3));

    // A failed place leaves the board unchanged
    assert_eq!(board.occupied_count(), 4);
    assert_eq!(board.cell(0, 0), Some(PieceId(0)));
    assert_eq!(board.cell(2, 2), None);
}

#[test]
fn test_place_uses_current_orientation_only() {
    let mut board = board_of(4);
    let mut bar = shape_of(0, Tetromino::I);

    // Horizontal bar cannot anchor at column 1 of a 4-wide board
    assert!(!board.can_place(&bar, 0, 1));

    // The board never rotates on the caller's behalf; selecting the vertical
    // orientation is the caller's move
    bar.set_rotation(1);
    assert!(board.can_place(&bar, 0, 0));
    assert!(board.place(&bar, 0, 0));
    assert_eq!(board.cell(0, 0), Some(PieceId(0)));
    assert_eq!(board.cell(3, 0), Some(PieceId(0)));
}

#[test]
fn test_remove_is_inverse_of_place() {
    let mut board = board_of(4);
    let shape = shape_of(0, Tetromino::T);

    let before = board.snapshot();
    assert!(board.place(&shape, 1, 0));
    assert!(board.remove(&shape, 1, 0).is_ok());

    assert_eq!(board.snapshot(), before);
    assert_eq!(board.occupied_count(), 0);
}

#[test]
fn test_remove_mismatch_is_invariant_violation() {
    let mut board = board_of(4);
    let shape = shape_of(0, Tetromino::O);

    // Nothing placed: removal targets empty cells
    let result = board.remove(&shape, 0, 0);
    assert!(matches!(
        result,
        Err(SolverError::InvariantViolation { .. })
    ));

    // The failed removal changed nothing
    assert_eq!(board.occupied_count(), 0);
}

#[test]
fn test_remove_wrong_piece_leaves_board_intact() {
    let mut board = board_of(4);
    let placed = shape_of(0, Tetromino::O);
    let other = shape_of(1, Tetromino::O);

    assert!(board.place(&placed, 0, 0));
    assert!(board.remove(&other, 0, 0).is_err());
    assert_eq!(board.cell(0, 0), Some(PieceId(0)));
    assert_eq!(board.occupied_count(), 4);
}

#[test]
fn test_is_full_matches_complete_occupancy() {
    let mut board = board_of(2);
    let block = shape_of(7, Tetromino::O);

    assert!(!board.is_full());
    assert!(board.place(&block, 0, 0));
    assert!(board.is_full());

    let snapshot = board.snapshot();
    assert!(snapshot.is_complete());
    assert_eq!(snapshot.cell(1, 1), Some(PieceId(7)));
}

#[test]
fn test_cursor_advances_in_row_major_order() {
    let cursor = Cursor::origin();
    let next = cursor.next(2);
    assert_eq!(next, Some(Cursor { row: 0, col: 1 }));

    let wrapped = Cursor { row: 0, col: 1 }.next(2);
    assert_eq!(wrapped, Some(Cursor { row: 1, col: 0 }));

    let done = Cursor { row: 1, col: 1 }.next(2);
    assert_eq!(done, None);
}

#[test]
fn test_first_empty_skips_occupied_cells() {
    let mut board = board_of(4);
    let block = shape_of(0, Tetromino::O);
    assert!(board.place(&block, 0, 0));

    // (0, 0) and (0, 1) are covered; the scan lands on (0, 2)
    let empty = board.first_empty(Cursor::origin());
    assert_eq!(empty, Some(Cursor { row: 0, col: 2 }));

    // A full board has no empty cell
    let mut tiny = board_of(2);
    assert!(tiny.place(&shape_of(1, Tetromino::O), 0, 0));
    assert_eq!(tiny.first_empty(Cursor::origin()), None);
}
