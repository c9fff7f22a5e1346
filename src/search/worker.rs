//! Single-threaded recursive backtracking search
//!
//! A worker owns one private board and one private piece pool and performs
//! exhaustive depth-first search over empty cells in row-major order. At each
//! node it tries every remaining piece in ascending id order and every
//! distinct rotation in order 0°, 90°, 180°, 270°, giving fully deterministic
//! trial order within the worker. Cancellation is cooperative: the shared
//! flag is polled at every placement-attempt boundary, bounding cancellation
//! latency to one placement/removal cycle.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use log::debug;

use crate::io::error::{Result, invariant_violation};
use crate::search::coordinator::Outcome;
use crate::search::pool::PiecePool;
use crate::spatial::board::{Board, Cursor};

/// Shared cooperative cancellation flag, monotonic false-to-true per solve
pub type CancelFlag = Arc<AtomicBool>;

/// A (pool slot, rotation) choice for the first empty cell
///
/// Fixes the root of one disjoint subtree of the search space; the
/// coordinator distributes these across workers so no work is duplicated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FirstMove {
    /// Pool slot of the piece to place first
    pub slot: usize,
    /// Rotation index to place it with
    pub rotation: usize,
}

/// Result of exploring one branch
enum Step {
    Solved,
    Exhausted,
    Cancelled,
}

/// Backtracking searcher over one privately owned board
pub struct SearchWorker {
    id: usize,
    board: Board,
    pool: PiecePool,
    assigned: Vec<FirstMove>,
    cancel: CancelFlag,
    nodes: u64,
}

impl SearchWorker {
    /// Create a worker restricted to the given first-move subtrees
    pub const fn new(
        id: usize,
        board: Board,
        pool: PiecePool,
        assigned: Vec<FirstMove>,
        cancel: CancelFlag,
    ) -> Self {
        Self {
            id,
            board,
            pool,
            assigned,
            cancel,
            nodes: 0,
        }
    }

    /// Run the search to completion, exhaustion, or cancellation
    ///
    /// # Errors
    ///
    /// Returns an invariant-violation error if the backtracking sequence
    /// corrupts board state; this is a fatal defect, distinct from exhaustion.
    pub fn run(mut self) -> Result<Outcome> {
        let assigned = std::mem::take(&mut self.assigned);
        debug!(
            "worker {}: starting with {} first moves",
            self.id,
            assigned.len()
        );

        for first_move in assigned {
            if self.cancelled() {
                return Ok(Outcome::Cancelled);
            }

            let cursor = self.board.first_empty(Cursor::origin());
            match self.attempt(first_move.slot, first_move.rotation, cursor)? {
                Step::Solved => {
                    debug!("worker {}: solved after {} nodes", self.id, self.nodes);
                    return Ok(Outcome::Solved(self.board.snapshot()));
                }
                Step::Cancelled => return Ok(Outcome::Cancelled),
                Step::Exhausted => {}
            }
        }

        debug!("worker {}: exhausted after {} nodes", self.id, self.nodes);
        Ok(Outcome::Exhausted)
    }

    fn cancelled(&self) -> bool {
        self.cancel.load(Ordering::Relaxed)
    }

    /// Search the subtree below the given cursor position
    ///
    /// The cursor always points at the first empty cell in row-major order,
    /// or `None` when the board is full (the solved condition).
    fn search(&mut self, cursor: Option<Cursor>) -> Result<Step> {
        self.nodes += 1;
        let Some(cursor) = cursor else {
            return Ok(Step::Solved);
        };

        for slot in 0..self.pool.len() {
            if !self.pool.is_available(slot) || self.pool.redundant_at_node(slot) {
                continue;
            }

            let Some(piece) = self.pool.piece(slot) else {
                continue;
            };
            let (period, saved_rotation) = (piece.rotation_period(), piece.rotation());

            for rotation in 0..period {
                if self.cancelled() {
                    return Ok(Step::Cancelled);
                }

                match self.attempt(slot, rotation, Some(cursor))? {
                    Step::Solved => return Ok(Step::Solved),
                    Step::Cancelled => return Ok(Step::Cancelled),
                    Step::Exhausted => {}
                }
            }

            if let Some(piece) = self.pool.piece_mut(slot) {
                piece.set_rotation(saved_rotation);
            }
        }

        Ok(Step::Exhausted)
    }

    /// Place one piece covering the cursor, recurse, and undo on exhaustion
    ///
    /// The piece is anchored so that its leading occupied offset lands exactly
    /// on the cursor: every cell before the cursor is already filled, so a
    /// placement covering the cursor with any later offset would overlap.
    fn attempt(&mut self, slot: usize, rotation: usize, cursor: Option<Cursor>) -> Result<Step> {
        let Some(cursor) = cursor else {
            return Ok(Step::Solved);
        };

        let anchor = {
            let Some(piece) = self.pool.piece_mut(slot) else {
                return Err(invariant_violation(
                    "attempt",
                    &format!("pool slot {slot} does not exist"),
                ));
            };
            piece.set_rotation(rotation);
            let (lead_row, lead_col) = piece.leading_offset();
            // Offsets are bounding-box reduced, so a leading offset past the
            // cursor would push the pattern's row- or column-zero cell off
            // the board
            if lead_row > cursor.row || lead_col > cursor.col {
                return Ok(Step::Exhausted);
            }
            (cursor.row - lead_row, cursor.col - lead_col)
        };

        let placed = {
            let Some(piece) = self.pool.piece(slot) else {
                return Err(invariant_violation(
                    "attempt",
                    &format!("pool slot {slot} does not exist"),
                ));
            };
            self.board.place(piece, anchor.0, anchor.1)
        };
        if !placed {
            return Ok(Step::Exhausted);
        }
        self.pool.take(slot);

        let next = self.board.first_empty(cursor);
        let status = self.search(next)?;
        match status {
            Step::Solved => Ok(Step::Solved),
            Step::Cancelled => Ok(Step::Cancelled),
            Step::Exhausted => {
                {
                    let Some(piece) = self.pool.piece(slot) else {
                        return Err(invariant_violation(
                            "attempt",
                            &format!("pool slot {slot} disappeared during backtracking"),
                        ));
                    };
                    self.board.remove(piece, anchor.0, anchor.1)?;
                }
                self.pool.release(slot);
                Ok(Step::Exhausted)
            }
        }
    }
}
