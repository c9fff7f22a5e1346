//! Worker spawning, search partitioning, and outcome aggregation
//!
//! The coordinator owns the worker pool and the cancellation flag. The search
//! space is partitioned by assigning each distinct (piece, rotation) choice
//! for the first cell to exactly one worker, so workers explore disjoint
//! subtrees and no computation is duplicated. The first worker to report a
//! complete tiling wins; its result is returned and the remaining workers are
//! cancelled cooperatively.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender, unbounded};
use log::{debug, warn};

use crate::io::configuration::MAX_WORKER_COUNT;
use crate::io::error::{Result, SolverError, invalid_parameter, invariant_violation};
use crate::search::pool::PiecePool;
use crate::search::worker::{CancelFlag, FirstMove, SearchWorker};
use crate::spatial::board::{Board, BoardSnapshot};
use crate::spatial::piece::PieceSpec;

/// Terminal outcome of a solve
#[derive(Clone, Debug)]
pub enum Outcome {
    /// A complete tiling was found; carries the solved board
    Solved(BoardSnapshot),
    /// No tiling exists for the given inputs
    Exhausted,
    /// The search was stopped before completion
    Cancelled,
}

impl Outcome {
    /// True iff this outcome carries a complete tiling
    pub const fn is_solved(&self) -> bool {
        matches!(self, Self::Solved(_))
    }
}

/// One worker's terminal report
enum Report {
    Terminal(Outcome),
    Fault(SolverError),
}

/// Owner of the solve state machine and cancellation flag
///
/// State machine: `Idle -> Solving -> {Solved, Exhausted, Cancelled} -> Idle`.
/// A new solve is accepted only from the idle state; the transition back to
/// idle happens when the returned [`SolveHandle`] resolves.
pub struct Coordinator {
    solving: Arc<AtomicBool>,
    cancel: CancelFlag,
}

impl Default for Coordinator {
    fn default() -> Self {
        Self::new()
    }
}

impl Coordinator {
    /// Create an idle coordinator
    pub fn new() -> Self {
        Self {
            solving: Arc::new(AtomicBool::new(false)),
            cancel: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Start a solve, spawning up to `worker_count` worker threads
    ///
    /// The piece multiset is partitioned by first move and the workers race;
    /// await the result through the returned handle.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the board size is zero or too large,
    /// the worker count is zero or too large, the piece multiset is empty or
    /// contains duplicate ids, or a solve is already in progress. Fails with a
    /// thread error if a worker cannot be spawned; no solve is left active in
    /// any error case.
    pub fn start_solving(
        &self,
        pieces: &[PieceSpec],
        board_size: usize,
        worker_count: usize,
    ) -> Result<SolveHandle> {
        if worker_count == 0 || worker_count > MAX_WORKER_COUNT {
            return Err(invalid_parameter(
                "worker_count",
                &worker_count,
                &format!("worker count must be between 1 and {MAX_WORKER_COUNT}"),
            ));
        }

        if self
            .solving
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(SolverError::SolveInProgress);
        }

        self.cancel.store(false, Ordering::Release);
        let spawned = self.spawn_workers(pieces, board_size, worker_count);
        if spawned.is_err() {
            self.solving.store(false, Ordering::Release);
        }
        spawned
    }

    fn spawn_workers(
        &self,
        pieces: &[PieceSpec],
        board_size: usize,
        worker_count: usize,
    ) -> Result<SolveHandle> {
        // Validates the piece multiset and the board size up front
        let prototype = PiecePool::from_specs(pieces)?;
        let probe = Board::new(board_size)?;

        let board_cells = probe.size() * probe.size();
        if prototype.total_cells() != board_cells {
            warn!(
                "piece multiset covers {} cells but the board has {board_cells}; no tiling can exist",
                prototype.total_cells()
            );
        }

        let partitions = partition_first_moves(&prototype, worker_count);
        debug!(
            "partitioned first moves across {} workers for a {board_size}x{board_size} board",
            partitions.len()
        );

        let (tx, rx): (Sender<Report>, Receiver<Report>) = unbounded();
        let mut workers = Vec::with_capacity(partitions.len());

        for (worker_id, assigned) in partitions.into_iter().enumerate() {
            let board = Board::new(board_size)?;
            let pool = PiecePool::from_specs(pieces)?;
            let cancel = Arc::clone(&self.cancel);
            let reports = tx.clone();

            let spawned = std::thread::Builder::new()
                .name(format!("quadtile-worker-{worker_id}"))
                .spawn(move || {
                    let worker = SearchWorker::new(worker_id, board, pool, assigned, cancel);
                    let report = match worker.run() {
                        Ok(outcome) => Report::Terminal(outcome),
                        Err(error) => Report::Fault(error),
                    };
                    // The receiver may already be gone after a stop; nothing to do
                    let _ = reports.send(report);
                });

            match spawned {
                Ok(handle) => workers.push(handle),
                Err(source) => {
                    self.cancel.store(true, Ordering::Release);
                    for handle in workers {
                        let _ = handle.join();
                    }
                    return Err(SolverError::Thread {
                        operation: "spawn",
                        source,
                    });
                }
            }
        }

        Ok(SolveHandle {
            solving: Arc::clone(&self.solving),
            cancel: Arc::clone(&self.cancel),
            reports: rx,
            workers,
        })
    }

    /// Request cancellation of an in-progress solve
    ///
    /// Idempotent: returns false ("nothing to stop") when no solve is active.
    /// The solve resolves through its handle once all workers have stopped.
    pub fn request_stop(&self) -> bool {
        if !self.is_solving() {
            return false;
        }
        self.cancel.store(true, Ordering::Release);
        true
    }

    /// True while a solve is active on this coordinator
    pub fn is_solving(&self) -> bool {
        self.solving.load(Ordering::Acquire)
    }

    /// True once cancellation has been requested for the active solve
    pub fn is_cancelled(&self) -> bool {
        self.cancel.load(Ordering::Acquire)
    }
}

/// Enumerate distinct first moves and distribute them round-robin
///
/// Each (slot, rotation) pair roots a disjoint subtree. Slots holding a
/// duplicate of an earlier shape are skipped: their subtrees are identical to
/// the earlier slot's.
fn partition_first_moves(pool: &PiecePool, worker_count: usize) -> Vec<Vec<FirstMove>> {
    let moves: Vec<FirstMove> = pool
        .pieces()
        .iter()
        .enumerate()
        .filter(|&(slot, _)| !pool.redundant_at_node(slot))
        .flat_map(|(slot, piece)| {
            (0..piece.rotation_period()).map(move |rotation| FirstMove { slot, rotation })
        })
        .collect();

    // A non-empty pool always yields at least one first move
    let bucket_count = worker_count.min(moves.len());
    let mut buckets: Vec<Vec<FirstMove>> = vec![Vec::new(); bucket_count];
    for (index, first_move) in moves.into_iter().enumerate() {
        if let Some(bucket) = buckets.get_mut(index % bucket_count) {
            bucket.push(first_move);
        }
    }
    buckets
}

/// Handle to an in-progress solve
///
/// Resolving the handle (through [`wait`](Self::wait), a deadline, or
/// [`stop`](Self::stop)) joins every worker and returns the coordinator to
/// idle. Dropping an unresolved handle cancels the solve and joins the
/// workers.
pub struct SolveHandle {
    solving: Arc<AtomicBool>,
    cancel: CancelFlag,
    reports: Receiver<Report>,
    workers: Vec<JoinHandle<()>>,
}

impl SolveHandle {
    /// Block until the solve resolves
    ///
    /// Returns the first `Solved` outcome (cancelling the remaining workers),
    /// `Exhausted` once every worker has exhausted its partition, or
    /// `Cancelled` after a stop request.
    ///
    /// # Errors
    ///
    /// Returns an invariant-violation error if a worker detected corrupted
    /// backtracking state or terminated without reporting.
    pub fn wait(self) -> Result<Outcome> {
        self.collect(None)
    }

    /// Block until the solve resolves or the timeout elapses
    ///
    /// On timeout the coordinator trips the shared cancellation flag itself
    /// and then waits for every worker to acknowledge, so the call returns
    /// only after all workers have observably stopped.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`wait`](Self::wait).
    pub fn wait_with_deadline(self, timeout: Duration) -> Result<Outcome> {
        self.collect(Instant::now().checked_add(timeout))
    }

    /// Cancel the solve and block until every worker has stopped
    ///
    /// Resolves to `Cancelled` unless a worker had already reported a
    /// solution, in which case first-solution-wins takes precedence.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`wait`](Self::wait).
    pub fn stop(self) -> Result<Outcome> {
        self.cancel.store(true, Ordering::Release);
        self.collect(None)
    }

    fn collect(mut self, mut deadline: Option<Instant>) -> Result<Outcome> {
        let workers = std::mem::take(&mut self.workers);
        let total = workers.len();
        let mut remaining = total;
        let mut exhausted = 0;
        let mut solved: Option<BoardSnapshot> = None;
        let mut fault: Option<SolverError> = None;

        while remaining > 0 {
            let received = match deadline {
                Some(instant) => match self.reports.recv_deadline(instant) {
                    Ok(report) => Some(report),
                    Err(RecvTimeoutError::Timeout) => {
                        debug!("solve deadline elapsed, cancelling {remaining} workers");
                        self.cancel.store(true, Ordering::Release);
                        deadline = None;
                        continue;
                    }
                    Err(RecvTimeoutError::Disconnected) => None,
                },
                None => self.reports.recv().ok(),
            };

            match received {
                Some(Report::Terminal(Outcome::Solved(snapshot))) => {
                    remaining -= 1;
                    if solved.is_none() {
                        debug!("first solution reported, cancelling {remaining} workers");
                        solved = Some(snapshot);
                        self.cancel.store(true, Ordering::Release);
                    }
                }
                Some(Report::Terminal(Outcome::Exhausted)) => {
                    remaining -= 1;
                    exhausted += 1;
                }
                Some(Report::Terminal(Outcome::Cancelled)) => remaining -= 1,
                Some(Report::Fault(error)) => {
                    remaining -= 1;
                    self.cancel.store(true, Ordering::Release);
                    if fault.is_none() {
                        fault = Some(error);
                    }
                }
                None => {
                    fault.get_or_insert_with(|| {
                        invariant_violation(
                            "collect",
                            &format!("{remaining} workers exited without reporting"),
                        )
                    });
                    break;
                }
            }
        }

        for handle in workers {
            if handle.join().is_err() {
                fault.get_or_insert_with(|| {
                    invariant_violation("join", &"a worker thread panicked")
                });
            }
        }
        self.solving.store(false, Ordering::Release);

        if let Some(snapshot) = solved {
            return Ok(Outcome::Solved(snapshot));
        }
        if let Some(error) = fault {
            return Err(error);
        }
        // Every worker exhausting its partition outranks a late stop request
        if exhausted == total {
            Ok(Outcome::Exhausted)
        } else {
            Ok(Outcome::Cancelled)
        }
    }
}

impl Drop for SolveHandle {
    fn drop(&mut self) {
        if self.workers.is_empty() {
            return;
        }
        self.cancel.store(true, Ordering::Release);
        for handle in self.workers.drain(..) {
            let _ = handle.join();
        }
        self.solving.store(false, Ordering::Release);
    }
}
