//! Text rendering of board snapshots

use crate::io::configuration::EMPTY_CELL_CHAR;
use crate::spatial::board::BoardSnapshot;
use crate::spatial::piece::PieceId;

/// Render a snapshot as a character grid, one row per line
///
/// The label function maps each occupying piece id to a display character;
/// empty cells render as [`EMPTY_CELL_CHAR`].
pub fn render_snapshot(snapshot: &BoardSnapshot, label: impl Fn(PieceId) -> char) -> String {
    let size = snapshot.size();
    let mut out = String::with_capacity(size * (size + 1));

    for row in 0..size {
        for col in 0..size {
            match snapshot.cell(row, col) {
                Some(id) => out.push(label(id)),
                None => out.push(EMPTY_CELL_CHAR),
            }
        }
        out.push('\n');
    }
    out
}
