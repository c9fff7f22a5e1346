//! Board state with fit-testing, placement, and removal
//!
//! The board is a pure grid-state machine: it places and removes a shape in
//! its current orientation only. Rotation selection is search policy and
//! belongs to the worker, never to the board. Each board is owned by exactly
//! one worker and is never mutated by more than one thread over its lifetime.

use ndarray::Array2;

use crate::io::configuration::MAX_BOARD_SIZE;
use crate::io::error::{Result, invalid_parameter, invariant_violation};
use crate::spatial::piece::{PieceId, PieceShape};

/// Row-major scan position on a board
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cursor {
    /// Row index
    pub row: usize,
    /// Column index
    pub col: usize,
}

impl Cursor {
    /// The first cell in row-major order
    pub const fn origin() -> Self {
        Self { row: 0, col: 0 }
    }

    /// The next cell in row-major order, or `None` past the last cell
    pub const fn next(self, size: usize) -> Option<Self> {
        if self.col + 1 < size {
            Some(Self {
                row: self.row,
                col: self.col + 1,
            })
        } else if self.row + 1 < size {
            Some(Self {
                row: self.row + 1,
                col: 0,
            })
        } else {
            None
        }
    }
}

/// Mutable grid of cell occupancy
///
/// Each cell holds either `None` (empty) or the id of the occupying piece. A
/// placed piece covers exactly the cells of its current orientation anchored
/// at the placement coordinate, all within bounds.
#[derive(Clone, Debug)]
pub struct Board {
    size: usize,
    cells: Array2<Option<PieceId>>,
    occupied: usize,
}

impl Board {
    /// Create an empty board with the given side length
    ///
    /// # Errors
    ///
    /// Returns an error if the size is zero or exceeds [`MAX_BOARD_SIZE`].
    pub fn new(size: usize) -> Result<Self> {
        if size == 0 {
            return Err(invalid_parameter(
                "board_size",
                &size,
                &"board side length must be positive",
            ));
        }
        if size > MAX_BOARD_SIZE {
            return Err(invalid_parameter(
                "board_size",
                &size,
                &format!("board side length must not exceed {MAX_BOARD_SIZE}"),
            ));
        }

        Ok(Self {
            size,
            cells: Array2::from_elem((size, size), None),
            occupied: 0,
        })
    }

    /// Board side length
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Number of occupied cells
    pub const fn occupied_count(&self) -> usize {
        self.occupied
    }

    /// Occupant of a cell, or `None` if the cell is empty or out of bounds
    pub fn cell(&self, row: usize, col: usize) -> Option<PieceId> {
        self.cells.get([row, col]).copied().flatten()
    }

    /// Test whether the shape's current orientation fits at the given anchor
    ///
    /// True iff every occupied offset maps to an in-bounds cell that is
    /// currently empty. No side effects.
    pub fn can_place(&self, shape: &PieceShape, row: usize, col: usize) -> bool {
        shape.occupied_cells().iter().all(|&(dr, dc)| {
            let r = row + dr;
            let c = col + dc;
            r < self.size && c < self.size && self.cells.get([r, c]) == Some(&None)
        })
    }

    /// Place the shape's current orientation at the given anchor
    ///
    /// Marks every occupied cell with the piece's id and returns true iff the
    /// placement fits; otherwise returns false and the board is unchanged.
    pub fn place(&mut self, shape: &PieceShape, row: usize, col: usize) -> bool {
        if !self.can_place(shape, row, col) {
            return false;
        }

        let id = shape.id();
        for &(dr, dc) in shape.occupied_cells() {
            if let Some(cell) = self.cells.get_mut([row + dr, col + dc]) {
                *cell = Some(id);
            }
        }
        self.occupied += shape.cell_count();
        true
    }

    /// Clear exactly the cells a matching `place` call set
    ///
    /// Used for backtracking. Every targeted cell is verified to hold the
    /// expected piece id before any cell is cleared.
    ///
    /// # Errors
    ///
    /// Returns an invariant-violation error if a targeted cell does not hold
    /// the expected piece id; this signals a corrupted backtracking sequence
    /// and the board is left unchanged.
    pub fn remove(&mut self, shape: &PieceShape, row: usize, col: usize) -> Result<()> {
        let id = shape.id();
        for &(dr, dc) in shape.occupied_cells() {
            let r = row + dr;
            let c = col + dc;
            if self.cells.get([r, c]).copied().flatten() != Some(id) {
                return Err(invariant_violation(
                    "remove",
                    &format!("cell ({r}, {c}) does not hold piece {id}"),
                ));
            }
        }

        for &(dr, dc) in shape.occupied_cells() {
            if let Some(cell) = self.cells.get_mut([row + dr, col + dc]) {
                *cell = None;
            }
        }
        self.occupied -= shape.cell_count();
        Ok(())
    }

    /// True iff every cell is occupied
    ///
    /// This is the solved condition: a full board has no overlaps by
    /// construction of `place`.
    pub const fn is_full(&self) -> bool {
        self.occupied == self.size * self.size
    }

    /// First empty cell at or after the given cursor in row-major order
    pub fn first_empty(&self, from: Cursor) -> Option<Cursor> {
        let mut cursor = Some(from);
        while let Some(current) = cursor {
            if self.cell(current.row, current.col).is_none() {
                return Some(current);
            }
            cursor = current.next(self.size);
        }
        None
    }

    /// Immutable copy of the grid for reporting
    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot {
            size: self.size,
            cells: self.cells.clone(),
        }
    }
}

/// Immutable copy of a board's grid, mapping each cell to its occupant
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoardSnapshot {
    size: usize,
    cells: Array2<Option<PieceId>>,
}

impl BoardSnapshot {
    /// Board side length
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Occupant of a cell, or `None` if the cell is empty or out of bounds
    pub fn cell(&self, row: usize, col: usize) -> Option<PieceId> {
        self.cells.get([row, col]).copied().flatten()
    }

    /// True iff every cell has an occupant
    pub fn is_complete(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }
}
