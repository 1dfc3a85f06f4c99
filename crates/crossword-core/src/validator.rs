//! Placement check: does a word fit at a position without bound or letter conflicts.

use crate::grid::{Grid, Orientation};

/// Whether `word` can be written starting at (`start_row`, `start_col`).
///
/// Fails when any letter would land outside the grid, or on a cell holding a
/// different letter. Cells already holding the same letter are crossings and
/// are accepted.
pub fn can_place(
    word: &str,
    start_row: isize,
    start_col: isize,
    orientation: Orientation,
    grid: &Grid,
) -> bool {
    let len = word.len() as isize;
    let (end_row, end_col) = match orientation {
        Orientation::Horizontal => (start_row, start_col + len - 1),
        Orientation::Vertical => (start_row + len - 1, start_col),
    };
    if len == 0 || !grid.in_bounds(start_row, start_col) || !grid.in_bounds(end_row, end_col) {
        return false;
    }

    let (dr, dc) = orientation.step();
    word.chars().enumerate().all(|(i, letter)| {
        let i = i as isize;
        grid.get_or_empty(start_row + dr * i, start_col + dc * i)
            .accepts(letter)
    })
}
