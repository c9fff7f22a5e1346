//! Concurrent backtracking solver for square tiling puzzles
//!
//! Given a fixed-size board and a multiset of rotatable polyomino pieces, the
//! solver searches for an assignment of pieces to cells covering every cell
//! exactly once. Multiple worker threads race over disjoint partitions of the
//! search space; the first complete tiling wins and the remaining workers are
//! cancelled cooperatively.

#![forbid(unsafe_code)]

/// Input/output operations, CLI surface, and error handling
pub mod io;
/// Backtracking search engine: piece pool, workers, and coordination
pub mod search;
/// Piece shapes, board state, and the built-in tetromino catalog
pub mod spatial;

pub use io::error::{Result, SolverError};
pub use search::coordinator::{Coordinator, Outcome, SolveHandle};
