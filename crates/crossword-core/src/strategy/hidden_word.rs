//! Hidden-word layout: a vertical word down the key column, each of its
//! letters crossed by a horizontal word on its own row.

use super::{AttemptFailure, PlacementStrategy, PuzzleKind};
use crate::board::{Board, StepOutcome};
use crate::corpus::WordCandidate;
use crate::finder::WordFinder;
use crate::generator::HiddenWordConfig;
use crate::grid::Orientation;
use rand::seq::SliceRandom;
use rand::{Rng, RngCore};

const MIN_ROW_WORD_LENGTH: usize = 3;
const MAX_ROW_WORD_LENGTH: usize = 15;

#[derive(Debug, Clone, Default)]
pub struct HiddenWordLayout {
    config: HiddenWordConfig,
}

impl HiddenWordLayout {
    pub fn new(config: HiddenWordConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &HiddenWordConfig {
        &self.config
    }

    /// Key column of a `size` grid
    pub fn key_column(size: usize) -> usize {
        size / 2
    }
}

impl PlacementStrategy for HiddenWordLayout {
    fn kind(&self) -> PuzzleKind {
        PuzzleKind::HiddenWord
    }

    /// The longest hidden word must fit down the key column
    fn min_grid_size(&self) -> usize {
        self.config.max_length
    }

    fn place_words(
        &self,
        board: &mut Board,
        finder: &WordFinder<'_>,
        rng: &mut dyn RngCore,
    ) -> Result<(), AttemptFailure> {
        let lengths = self.config.min_length..=self.config.max_length;
        let length = rng.gen_range(lengths);
        let key_col = Self::key_column(board.size());

        let outcome = match finder.find_word(rng, length..=length, None) {
            Some(hidden) => board.place_hidden(hidden, 0, key_col as isize),
            None => {
                tracing::debug!(length, "no hidden word of this length");
                StepOutcome::NotFound
            }
        };
        if !outcome.is_placed() {
            return Err(AttemptFailure::Step {
                step: 1,
                name: "hidden word",
                outcome,
            });
        }

        let letters: Vec<char> = board
            .hidden_word()
            .map(|h| h.text.chars().collect())
            .unwrap_or_default();

        let mut placed = 0;
        for (row, &letter) in letters.iter().enumerate().take(self.config.max_words) {
            let candidates = row_candidates(finder, board.size(), key_col, letter);
            let Some(&(candidate, start_col)) = candidates.choose(rng) else {
                tracing::debug!(row, %letter, "no word crosses this row");
                continue;
            };
            let (at_row, at_col) = (row as isize, start_col as isize);
            let outcome = board.place(candidate, at_row, at_col, Orientation::Horizontal);
            if outcome.is_placed() {
                placed += 1;
            } else {
                tracing::debug!(row, %outcome, "row word rejected");
            }
        }

        if placed < self.config.min_words {
            return Err(AttemptFailure::TooFewWords {
                placed,
                required: self.config.min_words,
            });
        }
        Ok(())
    }
}

/// Every (word, start column) that puts `letter` on the key column and stays
/// inside the row
fn row_candidates<'c>(
    finder: &WordFinder<'c>,
    size: usize,
    key_col: usize,
    letter: char,
) -> Vec<(&'c WordCandidate, usize)> {
    let max_length = MAX_ROW_WORD_LENGTH.min(size);
    let mut found = Vec::new();
    for candidate in finder.candidates(MIN_ROW_WORD_LENGTH..=max_length) {
        let len = candidate.len();
        let first = (key_col + 1).saturating_sub(len);
        let last = (size - len).min(key_col);
        for start_col in first..=last {
            if candidate.letter_at(key_col - start_col) == Some(letter) {
                found.push((candidate, start_col));
            }
        }
    }
    found
}
