//! Layout C: horizontal anchor with a lead-in word dropping onto its first
//! letter and two words hanging from its middle and last letters.

use super::{place_centered_anchor, run_steps, AttemptFailure, PlacementStrategy, PuzzleKind, Step};
use crate::board::{Board, StepOutcome};
use crate::corpus::WordCandidate;
use crate::finder::WordFinder;
use crate::grid::Orientation;
use rand::seq::SliceRandom;
use rand::RngCore;
use std::ops::RangeInclusive;

const MIN_LEAD_IN_LENGTH: usize = 4;
const MAX_LEAD_IN_LENGTH: usize = 10;
const HANGING_LENGTHS: RangeInclusive<usize> = 6..=10;
/// The shared letter must sit in a hanging word's first three cells
const HANGING_OFFSETS: usize = 3;

const STEPS: [(&str, Step); 5] = [
    ("anchor", place_anchor),
    ("lead-in", place_lead_in),
    ("middle hanger", place_middle_hanger),
    ("end hanger", place_end_hanger),
    ("crossbar", place_crossbar),
];

/// Layout C
#[derive(Debug, Clone, Copy, Default)]
pub struct Mixed;

impl PlacementStrategy for Mixed {
    fn kind(&self) -> PuzzleKind {
        PuzzleKind::Mixed
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

/// Vertical word whose last letter is the anchor's first
fn place_lead_in(board: &mut Board, finder: &WordFinder<'_>, rng: &mut dyn RngCore) -> StepOutcome {
    let anchor = board.word(0);
    let (anchor_row, anchor_col) = (anchor.row, anchor.col);
    let first = anchor.letter_at(0);
    let max_length = MAX_LEAD_IN_LENGTH.min(anchor_row);
    if max_length < MIN_LEAD_IN_LENGTH {
        return StepOutcome::NotFound;
    }

    let matching: Vec<&WordCandidate> = finder
        .candidates(MIN_LEAD_IN_LENGTH..=max_length)
        .filter(|c| c.last_letter() == first)
        .collect();
    let Some(&candidate) = matching.choose(rng) else {
        tracing::debug!(letter = %first, "no lead-in candidate");
        return StepOutcome::NotFound;
    };
    let row = anchor_row as isize - (candidate.len() as isize - 1);
    board.place(candidate, row, anchor_col as isize, Orientation::Vertical)
}

/// Vertical word crossing anchor letter `index` within its own first three
/// cells. Every (word, offset) pair is tried in random order.
fn place_hanging(
    board: &mut Board,
    finder: &WordFinder<'_>,
    rng: &mut dyn RngCore,
    index: usize,
) -> StepOutcome {
    let anchor = board.word(0);
    let letter = anchor.letter_at(index);
    let crossing = anchor.cell(index);

    let mut pairs: Vec<(&WordCandidate, usize)> = finder
        .candidates(HANGING_LENGTHS)
        .flat_map(|c| {
            c.positions_of(letter)
                .take_while(|&p| p < HANGING_OFFSETS)
                .map(move |p| (c, p))
        })
        .collect();
    if pairs.is_empty() {
        tracing::debug!(%letter, index, "no hanging candidate");
        return StepOutcome::NotFound;
    }
    pairs.shuffle(rng);

    let col = crossing.col as isize;
    for (candidate, position) in pairs {
        let row = crossing.row as isize - position as isize;
        if !board.fits(candidate.len(), row, col, Orientation::Vertical) {
            continue;
        }
        if board.place(candidate, row, col, Orientation::Vertical).is_placed() {
            return StepOutcome::Placed;
        }
    }
    StepOutcome::Conflict
}

fn place_middle_hanger(
    board: &mut Board,
    finder: &WordFinder<'_>,
    rng: &mut dyn RngCore,
) -> StepOutcome {
    let index = board.word(0).len() / 2;
    place_hanging(board, finder, rng, index)
}

fn place_end_hanger(
    board: &mut Board,
    finder: &WordFinder<'_>,
    rng: &mut dyn RngCore,
) -> StepOutcome {
    let index = board.word(0).len() - 1;
    place_hanging(board, finder, rng, index)
}

/// A row both hangers cross, with the letter each contributes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Crossing {
    row: usize,
    left: (usize, char),
    right: (usize, char),
}

fn crossbar_rows(board: &Board) -> Vec<Crossing> {
    let first_row = board.word(0).row + 2;
    let middle = board.word(2);
    let end = board.word(3);
    (first_row..board.size())
        .filter_map(|row| {
            let i = middle.index_on_row(row)?;
            let j = end.index_on_row(row)?;
            Some(Crossing {
                row,
                left: (middle.col, middle.letter_at(i)),
                right: (end.col, end.letter_at(j)),
            })
        })
        .collect()
}

/// Every (word, start column) that lines up with both letters of `crossing`
fn crossbar_candidates<'c>(
    finder: &WordFinder<'c>,
    size: usize,
    crossing: &Crossing,
) -> Vec<(&'c WordCandidate, usize)> {
    let (left_col, left_letter) = crossing.left;
    let (right_col, right_letter) = crossing.right;
    let distance = left_col.abs_diff(right_col);

    let mut found = Vec::new();
    for candidate in finder.candidates(distance + 1..=size) {
        let len = candidate.len();
        let first = (left_col + 1).saturating_sub(len);
        let last = (size - len).min(left_col);
        for start_col in first..=last {
            let (Some(a), Some(b)) = (
                candidate.letter_at(left_col - start_col),
                right_col
                    .checked_sub(start_col)
                    .and_then(|p| candidate.letter_at(p)),
            ) else {
                continue;
            };
            if a == left_letter && b == right_letter {
                found.push((candidate, start_col));
            }
        }
    }
    found
}

/// Horizontal word below the anchor crossing both hangers.
///
/// Rows are tried top to bottom; within a row every aligned (word, column)
/// pair is tried in random order.
fn place_crossbar(
    board: &mut Board,
    finder: &WordFinder<'_>,
    rng: &mut dyn RngCore,
) -> StepOutcome {
    let rows = crossbar_rows(board);
    if rows.is_empty() {
        tracing::debug!("hangers share no row below the anchor");
        return StepOutcome::NotFound;
    }

    let size = board.size();
    let mut outcome = StepOutcome::NotFound;
    for crossing in &rows {
        let mut candidates = crossbar_candidates(finder, size, crossing);
        candidates.shuffle(rng);
        for (candidate, start_col) in candidates {
            outcome = board.place(
                candidate,
                crossing.row as isize,
                start_col as isize,
                Orientation::Horizontal,
            );
            if outcome.is_placed() {
                return outcome;
            }
        }
    }
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::PuzzleRng;
    use crate::strategy::test_support::{assert_consistent, corpus, summary};
    use rand::rngs::mock::StepRng;

    const WORDS: [&str; 5] = ["astronomy", "drama", "orange", "yellow", "novel"];

    #[test]
    fn test_full_layout_with_first_choices() {
        let corpus = corpus(&WORDS);
        let finder = WordFinder::new(&corpus);
        let mut board = Board::new(15);
        let mut rng = StepRng::new(0, 0);
        Mixed.place_words(&mut board, &finder, &mut rng).unwrap();

        assert_eq!(
            summary(&board),
            vec![
                ("astronomy".to_string(), 7, 3, Orientation::Horizontal),
                ("drama".to_string(), 3, 3, Orientation::Vertical),
                ("orange".to_string(), 7, 7, Orientation::Vertical),
                ("yellow".to_string(), 7, 11, Orientation::Vertical),
                ("novel".to_string(), 10, 7, Orientation::Horizontal),
            ]
        );
        assert_consistent(&board);
    }

    #[test]
    fn test_lead_in_ends_on_anchor() {
        let corpus = corpus(&WORDS);
        let finder = WordFinder::new(&corpus);
        let mut board = Board::new(15);
        let mut rng = StepRng::new(0, 0);
        for step in &STEPS[..2] {
            assert!((step.1)(&mut board, &finder, &mut rng).is_placed());
        }
        let lead_in = board.word(1);
        let last = lead_in.cell(lead_in.len() - 1);
        let anchor = board.word(0);
        assert_eq!((last.row, last.col), (anchor.row, anchor.col));
    }

    #[test]
    fn test_lead_in_limited_by_rows_above() {
        // anchor on row 4 of a 9 grid leaves room for at most four letters
        let corpus = corpus(&["astronomy", "drama", "sofa"]);
        let finder = WordFinder::new(&corpus);
        let mut board = Board::new(9);
        let mut rng = StepRng::new(0, 0);
        assert!(place_anchor(&mut board, &finder, &mut rng).is_placed());
        assert_eq!(board.word(0).row, 4);
        assert!(place_lead_in(&mut board, &finder, &mut rng).is_placed());
        assert_eq!(board.word(1).text, "sofa");
        assert_eq!(board.word(1).row, 1);
    }

    #[test]
    fn test_crossbar_candidates_align_both_columns() {
        let corpus = corpus(&WORDS);
        let finder = WordFinder::new(&corpus);
        let crossing = Crossing {
            row: 10,
            left: (7, 'n'),
            right: (11, 'l'),
        };
        let found: Vec<(&str, usize)> = crossbar_candidates(&finder, 15, &crossing)
            .into_iter()
            .map(|(c, col)| (c.solution(), col))
            .collect();
        assert_eq!(found, vec![("novel", 7)]);
    }

    /// astronomy with drama leading in and orange/yellow hanging
    fn hung_board() -> Board {
        let mut board = Board::new(15);
        let layout = [
            ("astronomy", 7, 3, Orientation::Horizontal),
            ("drama", 3, 3, Orientation::Vertical),
            ("orange", 7, 7, Orientation::Vertical),
            ("yellow", 7, 11, Orientation::Vertical),
        ];
        for (text, row, col, orientation) in layout {
            let candidate = WordCandidate::bare(text).unwrap();
            assert!(board.place(&candidate, row, col, orientation).is_placed());
        }
        board
    }

    #[test]
    fn test_crossbar_takes_topmost_row() {
        // angel fits row 9 (a..l), novel fits row 10 (n..l)
        let corpus = corpus(&["angel", "novel"]);
        let finder = WordFinder::new(&corpus);
        for seed in 0..50 {
            let mut board = hung_board();
            let mut rng = PuzzleRng::with_seed(seed);
            assert!(place_crossbar(&mut board, &finder, &mut rng).is_placed());
            let crossbar = board.word(4);
            assert_eq!(
                (crossbar.text.as_str(), crossbar.row),
                ("angel", 9),
                "seed {seed}"
            );
            assert_eq!(crossbar.col, 7);
        }
    }

    #[test]
    fn test_missing_hanger_fails_attempt() {
        let corpus = corpus(&["astronomy", "drama", "orange"]);
        let finder = WordFinder::new(&corpus);
        let mut board = Board::new(15);
        let mut rng = StepRng::new(0, 0);
        let err = Mixed.place_words(&mut board, &finder, &mut rng).unwrap_err();
        assert_eq!(
            err,
            AttemptFailure::Step {
                step: 4,
                name: "end hanger",
                outcome: StepOutcome::NotFound,
            }
        );
    }
}
