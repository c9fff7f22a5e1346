//! Concurrent backtracking search engine
//!
//! This module contains the solving half of the crate:
//! - The finite piece multiset available along a search path
//! - Single-threaded backtracking workers
//! - Multi-worker coordination with first-solution-wins

/// Worker spawning, partitioning, and outcome aggregation
pub mod coordinator;
/// Finite multiset of pieces available for placement
pub mod pool;
/// Single-threaded recursive backtracking search
pub mod worker;

pub use coordinator::{Coordinator, Outcome, SolveHandle};
pub use pool::PiecePool;
