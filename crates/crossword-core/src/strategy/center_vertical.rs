//! Layout B: vertical anchor in the middle column.

use super::{
    place_centered_anchor, place_crossing, run_steps, AttemptFailure, Intersection,
    PlacementStrategy, PuzzleKind, Step,
};
use crate::board::{Board, StepOutcome};
use crate::finder::WordFinder;
use crate::grid::Orientation;
use rand::seq::SliceRandom;
use rand::{Rng, RngCore};
use std::ops::{Range, RangeInclusive};

const CROSSBAR_LENGTHS: RangeInclusive<usize> = 12..=14;
const CROSSBAR_POSITIONS: [usize; 2] = [6, 7];
const DROP_LENGTHS: RangeInclusive<usize> = 5..=8;
const MAX_WORD_LENGTH: usize = 15;

const STEPS: [(&str, Step); 5] = [
    ("anchor", place_anchor),
    ("crossbar", place_crossbar),
    ("left drop", place_left_drop),
    ("right drop", place_right_drop),
    ("base", place_base),
];

/// Layout B
#[derive(Debug, Clone, Copy, Default)]
pub struct CenterVertical;

impl PlacementStrategy for CenterVertical {
    fn kind(&self) -> PuzzleKind {
        PuzzleKind::CenterVertical
    }

    /// The crossbar needs a 12-letter row
    fn min_grid_size(&self) -> usize {
        *CROSSBAR_LENGTHS.start()
    }

    fn place_words(
        &self,
        board: &mut Board,
        finder: &WordFinder<'_>,
        rng: &mut dyn RngCore,
    ) -> Result<(), AttemptFailure> {
        run_steps(&STEPS, board, finder, rng)
    }
}

fn place_anchor(board: &mut Board, finder: &WordFinder<'_>, rng: &mut dyn RngCore) -> StepOutcome {
    place_centered_anchor(board, finder, rng, Orientation::Vertical)
}

/// Long horizontal word crossing the anchor's upper half
fn place_crossbar(
    board: &mut Board,
    finder: &WordFinder<'_>,
    rng: &mut dyn RngCore,
) -> StepOutcome {
    let half = board.word(0).len() / 2;
    place_crossing(
        board,
        finder,
        rng,
        0,
        0..=half - 1,
        CROSSBAR_LENGTHS,
        &CROSSBAR_POSITIONS,
    )
}

/// Vertical word hanging from a crossbar letter in `crossbar_indices`, with
/// the shared letter at one of its own `own_positions` (picked at random when
/// the candidate has several).
fn place_drop(
    board: &mut Board,
    finder: &WordFinder<'_>,
    rng: &mut dyn RngCore,
    crossbar_indices: RangeInclusive<usize>,
    own_positions: Range<usize>,
) -> StepOutcome {
    let crossbar = board.word(1);
    let index = rng.gen_range(crossbar_indices);
    let letter = crossbar.letter_at(index);
    let crossing = crossbar.cell(index);

    let Some(candidate) =
        finder.find_word_with_letter_in_range(rng, DROP_LENGTHS, letter, own_positions.clone())
    else {
        tracing::debug!(%letter, "no drop candidate");
        return StepOutcome::NotFound;
    };
    let positions: Vec<usize> = candidate
        .positions_of(letter)
        .filter(|p| own_positions.contains(p))
        .collect();
    let Some(&position) = positions.choose(rng) else {
        return StepOutcome::NotFound;
    };

    let row = crossing.row as isize - position as isize;
    let col = crossing.col as isize;
    if !board.fits(candidate.len(), row, col, Orientation::Vertical) {
        tracing::debug!(
            word = candidate.solution(),
            row,
            col,
            "drop leaves the grid"
        );
        return StepOutcome::OutOfBounds;
    }
    board.place(candidate, row, col, Orientation::Vertical)
}

fn place_left_drop(
    board: &mut Board,
    finder: &WordFinder<'_>,
    rng: &mut dyn RngCore,
) -> StepOutcome {
    place_drop(board, finder, rng, 0..=2, 0..5)
}

fn place_right_drop(
    board: &mut Board,
    finder: &WordFinder<'_>,
    rng: &mut dyn RngCore,
) -> StepOutcome {
    let len = board.word(1).len();
    place_drop(board, finder, rng, len - 3..=len - 1, 0..3)
}

/// Horizontal word below the crossbar joining the anchor and the right drop.
/// Rows within one of the crossbar are off limits.
fn place_base(board: &mut Board, finder: &WordFinder<'_>, rng: &mut dyn RngCore) -> StepOutcome {
    let anchor = board.word(0).clone();
    let crossbar_row = board.word(1).row;
    let drop = board.word(3).clone();

    for row in anchor.row + 2..board.size() {
        if row.abs_diff(crossbar_row) <= 1 {
            continue;
        }
        let (Some(i), Some(j)) = (anchor.index_on_row(row), drop.index_on_row(row)) else {
            continue;
        };
        let inter = Intersection::new(
            row,
            anchor.letter_at(i),
            anchor.col,
            drop.letter_at(j),
            drop.col,
        );
        if inter.distance == 0 {
            continue;
        }

        // upper bound exclusive
        let max_length = MAX_WORD_LENGTH.min(inter.distance + 5);
        let found = (inter.distance + 1..max_length).find_map(|length| {
            finder.find_word_with_specific_pattern(rng, length, length, &inter.pattern(length))
        });
        if let Some(candidate) = found {
            let start_col = inter.start_col() as isize;
            let outcome = board.place(candidate, row as isize, start_col, Orientation::Horizontal);
            if outcome.is_placed() {
                return outcome;
            }
        }
    }
    StepOutcome::NotFound
}
