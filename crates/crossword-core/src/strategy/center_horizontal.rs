//! Layout A: horizontal anchor in the middle row.
//!
//! Two vertical spokes cross the anchor's left and right halves, a
//! horizontal bridge joins the spokes away from the anchor, and a final
//! horizontal word hangs off the right spoke where it has room on both sides.

use super::{
    place_centered_anchor, place_crossing, run_steps, AttemptFailure, Intersection,
    PlacementStrategy, PuzzleKind, Step,
};
use crate::board::{Board, StepOutcome};
use crate::corpus::WordCandidate;
use crate::finder::WordFinder;
use crate::grid::Orientation;
use rand::seq::SliceRandom;
use rand::RngCore;
use std::ops::RangeInclusive;

const SPOKE_LENGTHS: RangeInclusive<usize> = 6..=8;
const SPOKE_POSITIONS: [usize; 2] = [3, 4];
const MAX_WORD_LENGTH: usize = 15;
const MIN_BRIDGE_LENGTH: usize = 3;
const MIN_TAIL_LENGTH: usize = 3;

const STEPS: [(&str, Step); 5] = [
    ("anchor", place_anchor),
    ("left spoke", place_left_spoke),
    ("right spoke", place_right_spoke),
    ("bridge", place_bridge),
    ("tail", place_tail),
];

/// Layout A
#[derive(Debug, Clone, Copy, Default)]
pub struct CenterHorizontal;

impl PlacementStrategy for CenterHorizontal {
    fn kind(&self) -> PuzzleKind {
        PuzzleKind::CenterHorizontal
    }

    fn min_grid_size(&self) -> usize {
        *super::ANCHOR_LENGTHS.start()
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
    place_centered_anchor(board, finder, rng, Orientation::Horizontal)
}

fn place_left_spoke(
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
        SPOKE_LENGTHS,
        &SPOKE_POSITIONS,
    )
}

fn place_right_spoke(
    board: &mut Board,
    finder: &WordFinder<'_>,
    rng: &mut dyn RngCore,
) -> StepOutcome {
    let len = board.word(0).len();
    place_crossing(
        board,
        finder,
        rng,
        0,
        len / 2 + 1..=len - 1,
        SPOKE_LENGTHS,
        &SPOKE_POSITIONS,
    )
}

/// Rows where both spokes have a letter, skipping the anchor row and its neighbours
fn bridge_intersections(board: &Board) -> Vec<Intersection> {
    let anchor_row = board.word(0).row;
    let left = board.word(1);
    let right = board.word(2);
    (0..left.len())
        .filter_map(|i| {
            let row = left.row + i;
            if row.abs_diff(anchor_row) <= 1 {
                return None;
            }
            let j = right.index_on_row(row)?;
            Some(Intersection::new(
                row,
                left.letter_at(i),
                left.col,
                right.letter_at(j),
                right.col,
            ))
        })
        .collect()
}

/// Shortest-length word joining both letters of `inter`, with its start column
fn find_bridge_word<'c>(
    finder: &WordFinder<'c>,
    rng: &mut dyn RngCore,
    inter: &Intersection,
) -> Option<(&'c WordCandidate, usize)> {
    let min_length = MIN_BRIDGE_LENGTH.max(inter.distance + 1);
    let max_length = MAX_WORD_LENGTH.min(inter.distance + 5);
    (min_length..=max_length).find_map(|length| {
        let pattern = inter.pattern(length);
        finder
            .find_word_with_specific_pattern(rng, length, length, &pattern)
            .map(|c| (c, inter.start_col()))
    })
}

fn place_bridge(
    board: &mut Board,
    finder: &WordFinder<'_>,
    rng: &mut dyn RngCore,
) -> StepOutcome {
    let mut intersections = bridge_intersections(board);
    if intersections.is_empty() {
        tracing::debug!("spokes share no usable row");
        return StepOutcome::NotFound;
    }
    intersections.shuffle(rng);

    let mut outcome = StepOutcome::NotFound;
    for inter in &intersections {
        if let Some((candidate, start_col)) = find_bridge_word(finder, rng, inter) {
            outcome = board.place(
                candidate,
                inter.row as isize,
                start_col as isize,
                Orientation::Horizontal,
            );
            if outcome.is_placed() {
                break;
            }
        }
    }
    outcome
}

/// A letter of a vertical word with open cells on both sides of its row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FreeSpot {
    letter: char,
    row: usize,
    col: usize,
    left: usize,
    right: usize,
}

/// Count open cells walking away from the word along `cols`. A cell is open
/// when it and the cells directly above and below are empty; the walk stops
/// at the first closed cell or at any column holding a vertical word.
fn open_run(
    board: &Board,
    vertical_cols: &[usize],
    row: usize,
    cols: impl Iterator<Item = usize>,
) -> usize {
    let grid = board.grid();
    let row = row as isize;
    let mut run = 0;
    for col in cols {
        if vertical_cols.contains(&col) {
            break;
        }
        let c = col as isize;
        let open = grid.get_or_empty(row, c).is_empty()
            && grid.get_or_empty(row - 1, c).is_empty()
            && grid.get_or_empty(row + 1, c).is_empty();
        if !open {
            break;
        }
        run += 1;
    }
    run
}

fn free_spots(board: &Board, word_index: usize) -> Vec<FreeSpot> {
    let word = board.word(word_index);
    let anchor_len = board.word(0).len();
    let size = board.size();
    let vertical_cols: Vec<usize> = board
        .words()
        .iter()
        .filter(|w| !w.is_horizontal())
        .map(|w| w.col)
        .collect();

    word.cells()
        .filter_map(|(pos, letter)| {
            let left = open_run(board, &vertical_cols, pos.row, (0..pos.col).rev());
            let right = open_run(board, &vertical_cols, pos.row, pos.col + 1..size);
            let usable =
                left > 0 && right > 0 && (left + right).min(anchor_len) >= MIN_TAIL_LENGTH;
            usable.then_some(FreeSpot {
                letter,
                row: pos.row,
                col: pos.col,
                left,
                right,
            })
        })
        .collect()
}

fn place_tail(
    board: &mut Board,
    finder: &WordFinder<'_>,
    _rng: &mut dyn RngCore,
) -> StepOutcome {
    let spots = free_spots(board, 2);
    if spots.is_empty() {
        tracing::debug!("right spoke has no open letter");
        return StepOutcome::NotFound;
    }
    let size = board.size();
    for spot in spots {
        let max_length = (spot.left + spot.right + 1).min(size);
        for length in MIN_TAIL_LENGTH..=max_length {
            for candidate in finder.candidates(length..=length) {
                let Some(index) = candidate.positions_of(spot.letter).next() else {
                    continue;
                };
                let start_col = spot.col as isize - index as isize;
                let outcome = board.place(
                    candidate,
                    spot.row as isize,
                    start_col,
                    Orientation::Horizontal,
                );
                if outcome.is_placed() {
                    return outcome;
                }
            }
        }
    }
    StepOutcome::NotFound
}
