//! Spatial data structures for pieces and boards
//!
//! This module contains the geometric half of the solver:
//! - Piece occupancy patterns and rotation
//! - Board state with placement and removal
//! - The built-in tetromino catalog

/// Board state, placement logic, and snapshots
pub mod board;
/// Built-in tetromino piece patterns
pub mod catalog;
/// Piece shapes and rotation handling
pub mod piece;

pub use board::{Board, BoardSnapshot, Cursor};
pub use piece::{PieceId, PieceShape, PieceSpec};
