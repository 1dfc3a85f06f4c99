//! Placement layouts.
//!
//! Each layout is a fixed sequence of steps run against a fresh [`Board`].
//! The three five-word layouts stop at the first step that does not place its
//! word; the hidden-word layout tolerates per-row misses and only checks the
//! total at the end.

mod center_horizontal;
mod center_vertical;
mod hidden_word;
mod mixed;

pub use center_horizontal::CenterHorizontal;
pub use center_vertical::CenterVertical;
pub use hidden_word::HiddenWordLayout;
pub use mixed::Mixed;

use crate::board::{Board, StepOutcome};
use crate::finder::WordFinder;
use crate::generator::HiddenWordConfig;
use crate::grid::Orientation;
use crate::pattern::Pattern;
use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;
use thiserror::Error;

/// Anchor lengths shared by every five-word layout
pub(crate) const ANCHOR_LENGTHS: RangeInclusive<usize> = 8..=12;

/// Puzzle layouts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PuzzleKind {
    /// Horizontal anchor in the middle row, two vertical spokes, two horizontals
    #[default]
    CenterHorizontal,
    /// Vertical anchor in the middle column
    CenterVertical,
    /// Horizontal anchor with a lead-in word ending on its first letter
    Mixed,
    /// Vertical hidden word down the key column, crossed row by row
    HiddenWord,
}

impl PuzzleKind {
    pub fn all() -> &'static [PuzzleKind] {
        &[
            PuzzleKind::CenterHorizontal,
            PuzzleKind::CenterVertical,
            PuzzleKind::Mixed,
            PuzzleKind::HiddenWord,
        ]
    }
}

impl fmt::Display for PuzzleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PuzzleKind::CenterHorizontal => write!(f, "center-horizontal"),
            PuzzleKind::CenterVertical => write!(f, "center-vertical"),
            PuzzleKind::Mixed => write!(f, "mixed"),
            PuzzleKind::HiddenWord => write!(f, "hidden-word"),
        }
    }
}

/// Why an attempt did not produce a puzzle
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AttemptFailure {
    #[error("step {step} ({name}): {outcome}")]
    Step {
        step: usize,
        name: &'static str,
        outcome: StepOutcome,
    },
    #[error("placed {placed} intersecting words, {required} required")]
    TooFewWords { placed: usize, required: usize },
}

/// A puzzle layout: a fixed sequence of placement steps
pub trait PlacementStrategy {
    fn kind(&self) -> PuzzleKind;

    /// Smallest grid side this layout can ever succeed in
    fn min_grid_size(&self) -> usize;

    /// Run every step against an empty board
    fn place_words(
        &self,
        board: &mut Board,
        finder: &WordFinder<'_>,
        rng: &mut dyn RngCore,
    ) -> Result<(), AttemptFailure>;
}

/// Build the layout for `kind`
pub fn strategy_for(kind: PuzzleKind, hidden: &HiddenWordConfig) -> Box<dyn PlacementStrategy> {
    match kind {
        PuzzleKind::CenterHorizontal => Box::new(CenterHorizontal),
        PuzzleKind::CenterVertical => Box::new(CenterVertical),
        PuzzleKind::Mixed => Box::new(Mixed),
        PuzzleKind::HiddenWord => Box::new(HiddenWordLayout::new(hidden.clone())),
    }
}

pub(crate) type Step = fn(&mut Board, &WordFinder<'_>, &mut dyn RngCore) -> StepOutcome;

/// Run named steps in order, failing on the first one that does not place
pub(crate) fn run_steps(
    steps: &[(&'static str, Step)],
    board: &mut Board,
    finder: &WordFinder<'_>,
    rng: &mut dyn RngCore,
) -> Result<(), AttemptFailure> {
    for (index, &(name, step)) in steps.iter().enumerate() {
        let outcome = step(board, finder, rng);
        if !outcome.is_placed() {
            return Err(AttemptFailure::Step {
                step: index + 1,
                name,
                outcome,
            });
        }
    }
    Ok(())
}

/// Place a random 8–12 letter anchor centered along `orientation`, in the
/// middle row (horizontal) or middle column (vertical).
pub(crate) fn place_centered_anchor(
    board: &mut Board,
    finder: &WordFinder<'_>,
    rng: &mut dyn RngCore,
    orientation: Orientation,
) -> StepOutcome {
    let Some(anchor) = finder.find_word(rng, ANCHOR_LENGTHS, None) else {
        tracing::debug!("no anchor candidate");
        return StepOutcome::NotFound;
    };
    let size = board.size();
    let middle = (size / 2) as isize;
    let offset = (size as isize - anchor.len() as isize) / 2;
    let (row, col) = match orientation {
        Orientation::Horizontal => (middle, offset),
        Orientation::Vertical => (offset, middle),
    };
    board.place(anchor, row, col, orientation)
}

/// Cross an already placed word with a new perpendicular one.
///
/// Picks a random letter of word `base` with index in `letter_range`, asks
/// the finder for a word holding that letter at one of `positions`
/// (first-match), and anchors the new word so both letters share a cell.
pub(crate) fn place_crossing(
    board: &mut Board,
    finder: &WordFinder<'_>,
    rng: &mut dyn RngCore,
    base: usize,
    letter_range: RangeInclusive<usize>,
    lengths: RangeInclusive<usize>,
    positions: &[usize],
) -> StepOutcome {
    let base = board.word(base);
    if letter_range.is_empty() || *letter_range.end() >= base.len() {
        return StepOutcome::NotFound;
    }
    let index = rng.gen_range(letter_range);
    let letter = base.letter_at(index);
    let crossing = base.cell(index);
    let orientation = base.orientation.perpendicular();

    let Some(found) = finder.find_word_with_letter(rng, lengths, letter, positions) else {
        tracing::debug!(%letter, "no crossing candidate");
        return StepOutcome::NotFound;
    };
    let (dr, dc) = orientation.step();
    let row = crossing.row as isize - dr * found.position as isize;
    let col = crossing.col as isize - dc * found.position as isize;
    board.place(found.candidate, row, col, orientation)
}

/// Two vertical words meeting the same row: the letters a horizontal word
/// must carry to join them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Intersection {
    pub row: usize,
    pub letter_a: char,
    pub letter_b: char,
    pub col_a: usize,
    pub col_b: usize,
    pub distance: usize,
}

impl Intersection {
    pub fn new(row: usize, letter_a: char, col_a: usize, letter_b: char, col_b: usize) -> Self {
        Self {
            row,
            letter_a,
            letter_b,
            col_a,
            col_b,
            distance: col_a.abs_diff(col_b),
        }
    }

    /// Column of the leftmost crossing, where a joining word starts
    pub fn start_col(&self) -> usize {
        self.col_a.min(self.col_b)
    }

    /// `length`-slot pattern with the left letter at 0 and the right one at `distance`
    pub fn pattern(&self, length: usize) -> Pattern {
        let (left, right) = if self.col_a <= self.col_b {
            (self.letter_a, self.letter_b)
        } else {
            (self.letter_b, self.letter_a)
        };
        Pattern::blank(length)
            .with_letter(0, left)
            .with_letter(self.distance, right)
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::board::Board;
    use crate::corpus::{Corpus, WordList};
    use crate::grid::Orientation;

    pub fn corpus(words: &[&str]) -> Corpus {
        Corpus::from_source(&WordList::from_solutions(words.iter().copied()), 30)
    }

    /// Every pair of words sharing a cell agrees on its letter
    pub fn assert_consistent(board: &Board) {
        for word in board.words() {
            for (pos, letter) in word.cells() {
                assert_eq!(
                    board.grid().get(pos.row, pos.col).and_then(|c| c.letter()),
                    Some(letter),
                    "{} disagrees with grid at {:?}",
                    word.text,
                    pos
                );
            }
        }
    }

    pub fn summary(board: &Board) -> Vec<(String, usize, usize, Orientation)> {
        board
            .words()
            .iter()
            .map(|w| (w.text.clone(), w.row, w.col, w.orientation))
            .collect()
    }
}
