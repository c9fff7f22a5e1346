//! Finite multiset of pieces available for placement
//!
//! The pool tracks which pieces remain available along the current search
//! path. Consumed plus remaining pieces always equal the starting multiset.
//!
//! Each entry is one finite piece consumed without replacement, never an
//! unlimited supply per shape. Duplicates of a shape are distinct pool
//! entries with distinct ids.

use bitvec::prelude::*;

use crate::io::error::{Result, invalid_parameter};
use crate::spatial::piece::{PieceShape, PieceSpec};

/// The remaining pool of pieces on one search path
///
/// Pieces are stored in ascending id order, fixing the deterministic trial
/// order of the search. Availability is a bitmask over pool slots.
#[derive(Clone, Debug)]
pub struct PiecePool {
    pieces: Vec<PieceShape>,
    available: BitVec,
    canonical: Vec<usize>,
    total_cells: usize,
}

impl PiecePool {
    /// Build a pool from piece specifications, sorted by ascending id
    ///
    /// # Errors
    ///
    /// Returns an error if the specification list is empty or contains
    /// duplicate piece ids.
    pub fn from_specs(specs: &[PieceSpec]) -> Result<Self> {
        if specs.is_empty() {
            return Err(invalid_parameter(
                "pieces",
                &"[]",
                &"piece multiset must not be empty",
            ));
        }

        let mut sorted: Vec<&PieceSpec> = specs.iter().collect();
        sorted.sort_by_key(|spec| spec.id());
        for pair in sorted.windows(2) {
            if let [a, b] = pair {
                if a.id() == b.id() {
                    return Err(invalid_parameter(
                        "pieces",
                        &a.id(),
                        &"piece ids must be unique; duplicates of a shape need distinct ids",
                    ));
                }
            }
        }

        let pieces: Vec<PieceShape> = sorted.iter().map(|&spec| PieceShape::from_spec(spec)).collect();
        let total_cells = pieces.iter().map(PieceShape::cell_count).sum();

        // Smallest slot with an identical base pattern, for duplicate skipping
        let canonical: Vec<usize> = pieces
            .iter()
            .enumerate()
            .map(|(slot, piece)| {
                pieces
                    .iter()
                    .position(|earlier| earlier.same_base_pattern(piece))
                    .unwrap_or(slot)
            })
            .collect();

        let available = bitvec![1; pieces.len()];

        Ok(Self {
            pieces,
            available,
            canonical,
            total_cells,
        })
    }

    /// Number of pool slots
    pub const fn len(&self) -> usize {
        self.pieces.len()
    }

    /// True iff the pool has no slots at all
    pub const fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    /// Total number of cells covered by the full multiset
    pub const fn total_cells(&self) -> usize {
        self.total_cells
    }

    /// All pieces in slot order
    pub fn pieces(&self) -> &[PieceShape] {
        &self.pieces
    }

    /// Test whether a slot is still available for placement
    pub fn is_available(&self, slot: usize) -> bool {
        self.available.get(slot).as_deref() == Some(&true)
    }

    /// Consume a slot for the current path
    ///
    /// Returns false if the slot was already consumed or does not exist.
    pub fn take(&mut self, slot: usize) -> bool {
        if !self.is_available(slot) {
            return false;
        }
        self.available.set(slot, false);
        true
    }

    /// Return a slot to the pool when backtracking
    pub fn release(&mut self, slot: usize) {
        if slot < self.available.len() {
            self.available.set(slot, true);
        }
    }

    /// Shape in a slot
    pub fn piece(&self, slot: usize) -> Option<&PieceShape> {
        self.pieces.get(slot)
    }

    /// Mutable shape in a slot, for rotation by the holder
    pub fn piece_mut(&mut self, slot: usize) -> Option<&mut PieceShape> {
        self.pieces.get_mut(slot)
    }

    /// Test whether an earlier available slot holds an identical shape
    ///
    /// When true, the search already tried an interchangeable copy at the
    /// current node and this slot would explore an identical subtree. Pure
    /// pruning: skipping it never loses solutions.
    pub fn redundant_at_node(&self, slot: usize) -> bool {
        let Some(&group) = self.canonical.get(slot) else {
            return false;
        };
        (group..slot).any(|earlier| {
            self.canonical.get(earlier) == Some(&group) && self.is_available(earlier)
        })
    }
}
