//! Piece shapes with rotation support
//!
//! A piece is an occupancy pattern over a small square matrix together with a
//! stable identity. Rotation cycles through the four 90° orientations; shapes
//! that are symmetric under rotation report a shorter effective period so the
//! search can skip orientations that reproduce an earlier one.

use std::fmt;

use ndarray::Array2;

use crate::io::error::{Result, invalid_parameter};

/// Number of 90° rotation states
pub const ROTATION_COUNT: usize = 4;

/// Stable identity of a piece within one solve
///
/// Two shapes with the same id are the same piece for multiset accounting,
/// regardless of their current rotation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PieceId(pub u32);

impl fmt::Display for PieceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Caller-facing piece specification: an identity plus its base occupancy pattern
#[derive(Clone, Debug)]
pub struct PieceSpec {
    id: PieceId,
    pattern: Array2<bool>,
}

impl PieceSpec {
    /// Create a piece specification from a square occupancy pattern
    ///
    /// # Errors
    ///
    /// Returns an error if the pattern is not square or contains no occupied
    /// cells.
    pub fn new(id: PieceId, pattern: Array2<bool>) -> Result<Self> {
        let (rows, cols) = pattern.dim();
        if rows == 0 || rows != cols {
            return Err(invalid_parameter(
                "pattern",
                &format!("{rows}x{cols}"),
                &"piece pattern must be a non-empty square matrix",
            ));
        }
        if !pattern.iter().any(|&cell| cell) {
            return Err(invalid_parameter(
                "pattern",
                &format!("piece {id}"),
                &"piece pattern must contain at least one occupied cell",
            ));
        }

        Ok(Self { id, pattern })
    }

    /// Piece identity
    pub const fn id(&self) -> PieceId {
        self.id
    }

    /// Base occupancy pattern
    pub const fn pattern(&self) -> &Array2<bool> {
        &self.pattern
    }

    /// Number of occupied cells in the pattern
    pub fn cell_count(&self) -> usize {
        self.pattern.iter().filter(|&&cell| cell).count()
    }
}

/// Rotate a square boolean matrix 90° clockwise
pub fn rotate_matrix_clockwise(matrix: &Array2<bool>) -> Array2<bool> {
    let (rows, _) = matrix.dim();
    Array2::from_shape_fn((rows, rows), |(i, j)| {
        matrix.get([rows - 1 - j, i]).copied().unwrap_or(false)
    })
}

/// Occupied (row, col) offsets of a matrix in row-major order
fn occupied_offsets(matrix: &Array2<bool>) -> Vec<(usize, usize)> {
    matrix
        .indexed_iter()
        .filter(|&(_, &cell)| cell)
        .map(|(index, _)| index)
        .collect()
}

/// Occupied offsets translated so the pattern hugs the top-left corner
///
/// Rotating a pattern inside a fixed-size matrix shifts it away from the
/// origin. Translation is irrelevant to placement, so offsets are always
/// reduced to the pattern's bounding box; row-major order is preserved.
fn normalized_offsets(matrix: &Array2<bool>) -> Vec<(usize, usize)> {
    let offsets = occupied_offsets(matrix);
    let min_row = offsets.iter().map(|&(row, _)| row).min().unwrap_or(0);
    let min_col = offsets.iter().map(|&(_, col)| col).min().unwrap_or(0);
    offsets
        .into_iter()
        .map(|(row, col)| (row - min_row, col - min_col))
        .collect()
}

/// Effective rotation period of a pattern: 1, 2, or 4
///
/// Orientations are compared by translation-normalized occupied offsets, not
/// raw matrices: rotating a bar moves its cells inside the matrix, but the
/// shape itself repeats after a half turn. A fully rotation-symmetric shape
/// (like a square block) has period 1.
fn rotation_period_of(matrix: &Array2<bool>) -> usize {
    let base = normalized_offsets(matrix);
    let quarter = rotate_matrix_clockwise(matrix);
    if normalized_offsets(&quarter) == base {
        return 1;
    }
    let half = rotate_matrix_clockwise(&quarter);
    if normalized_offsets(&half) == base {
        return 2;
    }
    ROTATION_COUNT
}

/// A piece in a worker's pool: identity, current orientation, and rotation state
///
/// Exactly one of the four rotation states is active at any time; rotating four
/// times restores the base matrix bit-for-bit. A shape is owned by the worker
/// performing placement attempts and is never shared across threads after
/// construction.
#[derive(Clone, Debug)]
pub struct PieceShape {
    id: PieceId,
    base: Array2<bool>,
    matrix: Array2<bool>,
    offsets: Vec<(usize, usize)>,
    leading: (usize, usize),
    rotation: usize,
    period: usize,
}

impl PieceShape {
    /// Build a shape from a validated specification, starting at rotation 0
    pub fn from_spec(spec: &PieceSpec) -> Self {
        let base = spec.pattern().clone();
        let offsets = normalized_offsets(&base);
        let leading = offsets.first().copied().unwrap_or((0, 0));
        let period = rotation_period_of(&base);

        Self {
            id: spec.id(),
            matrix: base.clone(),
            base,
            offsets,
            leading,
            rotation: 0,
            period,
        }
    }

    /// Piece identity
    pub const fn id(&self) -> PieceId {
        self.id
    }

    /// Current rotation index in {0, 1, 2, 3}
    pub const fn rotation(&self) -> usize {
        self.rotation
    }

    /// Effective rotation period (1, 2, or 4)
    pub const fn rotation_period(&self) -> usize {
        self.period
    }

    /// Side length of the occupancy matrix
    pub fn size(&self) -> usize {
        self.matrix.dim().0
    }

    /// Number of cells this piece covers when placed
    pub fn cell_count(&self) -> usize {
        self.offsets.len()
    }

    /// Occupancy matrix of the current orientation
    pub const fn matrix(&self) -> &Array2<bool> {
        &self.matrix
    }

    /// Base (rotation 0) occupancy matrix
    pub const fn base_matrix(&self) -> &Array2<bool> {
        &self.base
    }

    /// Occupied (row, col) offsets of the current orientation, in row-major
    /// order, reduced to the pattern's bounding box
    ///
    /// Padding rows or columns in the occupancy matrix never show up here:
    /// the first offset always lies in row zero, and some offset has column
    /// zero, regardless of where rotation left the pattern in its matrix.
    pub fn occupied_cells(&self) -> &[(usize, usize)] {
        &self.offsets
    }

    /// First occupied offset of the current orientation in row-major order
    ///
    /// The worker anchors a piece so this cell lands on the search cursor:
    /// every cell before the cursor is already filled, so any valid placement
    /// must cover the cursor with its row-major-first occupied cell.
    pub const fn leading_offset(&self) -> (usize, usize) {
        self.leading
    }

    /// Advance to the next 90° clockwise orientation
    ///
    /// Applying this four times yields the original matrix exactly.
    pub fn rotate_clockwise(&mut self) {
        self.matrix = rotate_matrix_clockwise(&self.matrix);
        self.rotation = (self.rotation + 1) % ROTATION_COUNT;
        self.offsets = normalized_offsets(&self.matrix);
        self.leading = self.offsets.first().copied().unwrap_or((0, 0));
    }

    /// Set the rotation state to the given index (modulo four)
    pub fn set_rotation(&mut self, rotation: usize) {
        let target = rotation % ROTATION_COUNT;
        while self.rotation != target {
            self.rotate_clockwise();
        }
    }

    /// Test whether another shape has an identical base pattern
    ///
    /// Used to skip duplicate pieces of the multiset at a search node: trying a
    /// second copy of a shape that an earlier copy already failed with explores
    /// an identical subtree.
    pub fn same_base_pattern(&self, other: &Self) -> bool {
        self.base == other.base
    }
}
