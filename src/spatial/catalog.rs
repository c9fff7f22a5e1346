//! Built-in tetromino piece patterns
//!
//! The seven classic tetrominoes, each on the smallest square matrix that
//! contains it. Rotated variants are not listed: the search tries all
//! orientations of the base pattern itself.

use ndarray::Array2;

/// The seven tetromino kinds
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tetromino {
    /// Straight bar of four cells
    I,
    /// Three across with a cell below the right end
    J,
    /// Three across with a cell below the left end
    L,
    /// Square block of four cells
    O,
    /// Offset pair, upper row shifted right
    S,
    /// Three across with a cell below the middle
    T,
    /// Offset pair, upper row shifted left
    Z,
}

/// All tetromino kinds in display order
pub const ALL_TETROMINOES: [Tetromino; 7] = [
    Tetromino::I,
    Tetromino::J,
    Tetromino::L,
    Tetromino::O,
    Tetromino::S,
    Tetromino::T,
    Tetromino::Z,
];

/// Build a square occupancy matrix from row strings, `#` marking occupied cells
fn pattern_from_rows(rows: &[&str]) -> Array2<bool> {
    let size = rows.len();
    Array2::from_shape_fn((size, size), |(r, c)| {
        rows.get(r).and_then(|row| row.as_bytes().get(c)).copied() == Some(b'#')
    })
}

impl Tetromino {
    /// Parse a tetromino from its one-letter name (case-insensitive)
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_uppercase().as_str() {
            "I" => Some(Self::I),
            "J" => Some(Self::J),
            "L" => Some(Self::L),
            "O" => Some(Self::O),
            "S" => Some(Self::S),
            "T" => Some(Self::T),
            "Z" => Some(Self::Z),
            _ => None,
        }
    }

    /// One-letter display name
    pub const fn letter(self) -> char {
        match self {
            Self::I => 'I',
            Self::J => 'J',
            Self::L => 'L',
            Self::O => 'O',
            Self::S => 'S',
            Self::T => 'T',
            Self::Z => 'Z',
        }
    }

    /// Base occupancy pattern at rotation 0
    pub fn pattern(self) -> Array2<bool> {
        match self {
            Self::I => pattern_from_rows(&["####", "....", "....", "...."]),
            Self::J => pattern_from_rows(&["###", "..#", "..."]),
            Self::L => pattern_from_rows(&["###", "#..", "..."]),
            Self::O => pattern_from_rows(&["##", "##"]),
            Self::S => pattern_from_rows(&[".##", "##.", "..."]),
            Self::T => pattern_from_rows(&["###", ".#.", "..."]),
            Self::Z => pattern_from_rows(&["##.", ".##", "..."]),
        }
    }
}
