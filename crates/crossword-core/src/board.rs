//! Working state of one attempt: the grid plus the ordered list of placed words.

use crate::corpus::WordCandidate;
use crate::grid::{Grid, Orientation, Position};
use crate::validator::can_place;
use serde::Serialize;
use std::fmt;

/// A word written into the grid, with its clue data
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlacedWord {
    pub text: String,
    pub col: usize,
    pub row: usize,
    pub orientation: Orientation,
    pub clue: String,
    pub pattern_hint: String,
    pub word_count: String,
}

impl PlacedWord {
    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn is_horizontal(&self) -> bool {
        self.orientation == Orientation::Horizontal
    }

    pub fn letter_at(&self, index: usize) -> char {
        self.text.as_bytes()[index] as char
    }

    /// Grid cell holding letter `index`
    pub fn cell(&self, index: usize) -> Position {
        match self.orientation {
            Orientation::Horizontal => Position::new(self.row, self.col + index),
            Orientation::Vertical => Position::new(self.row + index, self.col),
        }
    }

    pub fn cells(&self) -> impl Iterator<Item = (Position, char)> + '_ {
        self.text
            .chars()
            .enumerate()
            .map(move |(i, c)| (self.cell(i), c))
    }

    /// Index of the letter lying on `row`, if the word touches it
    pub fn index_on_row(&self, row: usize) -> Option<usize> {
        match self.orientation {
            Orientation::Horizontal => (row == self.row).then_some(0),
            Orientation::Vertical => {
                let offset = row.checked_sub(self.row)?;
                (offset < self.len()).then_some(offset)
            }
        }
    }
}

impl fmt::Display for PlacedWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}) at row {}, col {}",
            self.text, self.orientation, self.row, self.col
        )?;
        if !self.clue.is_empty() {
            write!(f, ": {}", self.clue)?;
        }
        Ok(())
    }
}

/// The vertical word spelled down the key column of a hidden-word puzzle
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HiddenWord {
    pub text: String,
    pub row: usize,
    pub col: usize,
}

/// Result of a single placement step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StepOutcome {
    Placed,
    /// The corpus had no usable candidate
    NotFound,
    /// The computed anchor puts part of the word outside the grid
    OutOfBounds,
    /// A letter would overwrite a different letter
    Conflict,
}

impl StepOutcome {
    pub fn is_placed(self) -> bool {
        self == StepOutcome::Placed
    }
}

impl fmt::Display for StepOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepOutcome::Placed => write!(f, "placed"),
            StepOutcome::NotFound => write!(f, "no candidate found"),
            StepOutcome::OutOfBounds => write!(f, "out of bounds"),
            StepOutcome::Conflict => write!(f, "letter conflict"),
        }
    }
}

/// Grid and placed words for one attempt.
///
/// Every write goes through [`can_place`]; words are only ever appended and
/// the whole board is reset between attempts.
#[derive(Debug, Clone)]
pub struct Board {
    grid: Grid,
    words: Vec<PlacedWord>,
    hidden: Option<HiddenWord>,
}

impl Board {
    pub fn new(size: usize) -> Self {
        Self {
            grid: Grid::new(size),
            words: Vec::new(),
            hidden: None,
        }
    }

    /// Side length of the working grid
    pub fn size(&self) -> usize {
        self.grid.rows()
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn words(&self) -> &[PlacedWord] {
        &self.words
    }

    /// The `index`-th placed word. Layouts only ask for words an earlier
    /// step of the same attempt has placed.
    pub fn word(&self, index: usize) -> &PlacedWord {
        &self.words[index]
    }

    pub fn hidden_word(&self) -> Option<&HiddenWord> {
        self.hidden.as_ref()
    }

    /// Drop every letter and word
    pub fn reset(&mut self) {
        self.grid.reset();
        self.words.clear();
        self.hidden = None;
    }

    /// Whether the whole word lies inside the grid
    pub fn fits(&self, len: usize, row: isize, col: isize, orientation: Orientation) -> bool {
        let (dr, dc) = orientation.step();
        let last = len as isize - 1;
        len > 0
            && self.grid.in_bounds(row, col)
            && self.grid.in_bounds(row + dr * last, col + dc * last)
    }

    pub fn can_place(&self, text: &str, row: isize, col: isize, orientation: Orientation) -> bool {
        can_place(text, row, col, orientation, &self.grid)
    }

    /// Validate and write a candidate, appending it to the word list
    pub fn place(
        &mut self,
        candidate: &WordCandidate,
        row: isize,
        col: isize,
        orientation: Orientation,
    ) -> StepOutcome {
        let outcome = self.write(candidate.solution(), row, col, orientation);
        if outcome.is_placed() {
            self.words.push(PlacedWord {
                text: candidate.solution().to_string(),
                col: col as usize,
                row: row as usize,
                orientation,
                clue: candidate.clue().to_string(),
                pattern_hint: candidate.pattern_hint().to_string(),
                word_count: candidate.word_count().to_string(),
            });
            tracing::debug!(
                word = candidate.solution(),
                row,
                col,
                ?orientation,
                "placed word"
            );
        }
        outcome
    }

    /// Validate and write the hidden word down column `col`.
    ///
    /// It is kept apart from the clue list since solving the puzzle reveals it.
    pub fn place_hidden(
        &mut self,
        candidate: &WordCandidate,
        row: isize,
        col: isize,
    ) -> StepOutcome {
        let outcome = self.write(candidate.solution(), row, col, Orientation::Vertical);
        if outcome.is_placed() {
            self.hidden = Some(HiddenWord {
                text: candidate.solution().to_string(),
                row: row as usize,
                col: col as usize,
            });
            tracing::debug!(word = candidate.solution(), col, "placed hidden word");
        }
        outcome
    }

    fn write(
        &mut self,
        text: &str,
        row: isize,
        col: isize,
        orientation: Orientation,
    ) -> StepOutcome {
        if !self.fits(text.len(), row, col, orientation) {
            tracing::trace!(word = text, row, col, ?orientation, "position leaves the grid");
            return StepOutcome::OutOfBounds;
        }
        if !self.can_place(text, row, col, orientation) {
            tracing::trace!(
                word = text,
                row,
                col,
                ?orientation,
                "position conflicts with a letter"
            );
            return StepOutcome::Conflict;
        }
        let (dr, dc) = orientation.step();
        for (i, letter) in text.chars().enumerate() {
            let i = i as isize;
            self.grid
                .set((row + dr * i) as usize, (col + dc * i) as usize, letter);
        }
        StepOutcome::Placed
    }

    pub fn into_parts(self) -> (Grid, Vec<PlacedWord>, Option<HiddenWord>) {
        (self.grid, self.words, self.hidden)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Cell;

    fn word(s: &str) -> WordCandidate {
        WordCandidate::new(s, format!("clue for {s}"), "", "1").unwrap()
    }

    #[test]
    fn test_place_writes_letters_and_records_word() {
        let mut board = Board::new(15);
        let outcome = board.place(&word("astronomy"), 7, 3, Orientation::Horizontal);
        assert_eq!(outcome, StepOutcome::Placed);
        assert_eq!(board.grid().get(7, 3), Some(Cell::Letter('a')));
        assert_eq!(board.grid().get(7, 11), Some(Cell::Letter('y')));
        assert_eq!(board.words().len(), 1);
        let placed = board.word(0);
        assert_eq!((placed.row, placed.col), (7, 3));
        assert_eq!(placed.clue, "clue for astronomy");
    }

    #[test]
    fn test_place_reports_bounds_and_conflicts() {
        let mut board = Board::new(10);
        assert_eq!(
            board.place(&word("astronomy"), 0, 2, Orientation::Horizontal),
            StepOutcome::OutOfBounds
        );
        assert_eq!(
            board.place(&word("tea"), -1, 0, Orientation::Vertical),
            StepOutcome::OutOfBounds
        );
        assert_eq!(
            board.place(&word("tea"), 0, 0, Orientation::Horizontal),
            StepOutcome::Placed
        );
        assert_eq!(
            board.place(&word("sun"), 0, 1, Orientation::Vertical),
            StepOutcome::Conflict
        );
        assert_eq!(
            board.place(&word("end"), 0, 1, Orientation::Vertical),
            StepOutcome::Placed
        );
        assert_eq!(board.words().len(), 2);
    }

    #[test]
    fn test_failed_place_leaves_grid_untouched() {
        let mut board = Board::new(6);
        board.place(&word("tea"), 0, 0, Orientation::Horizontal);
        let before = board.grid().clone();
        board.place(&word("sun"), 0, 1, Orientation::Vertical);
        assert_eq!(board.grid(), &before);
    }

    #[test]
    fn test_hidden_word_not_in_clue_list() {
        let mut board = Board::new(9);
        assert!(board.place_hidden(&word("stone"), 0, 4).is_placed());
        assert!(board.words().is_empty());
        let hidden = board.hidden_word().unwrap();
        assert_eq!(
            (hidden.text.as_str(), hidden.row, hidden.col),
            ("stone", 0, 4)
        );
        assert_eq!(board.grid().get(4, 4), Some(Cell::Letter('e')));
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut board = Board::new(9);
        board.place_hidden(&word("stone"), 0, 4);
        board.place(&word("tea"), 1, 4, Orientation::Horizontal);
        board.reset();
        assert!(board.words().is_empty());
        assert!(board.hidden_word().is_none());
        assert_eq!(board.grid().letter_count(), 0);
        assert_eq!(board.size(), 9);
    }

    #[test]
    fn test_placed_word_geometry() {
        let w = PlacedWord {
            text: "planet".into(),
            col: 8,
            row: 4,
            orientation: Orientation::Vertical,
            clue: String::new(),
            pattern_hint: String::new(),
            word_count: String::new(),
        };
        assert_eq!(w.cell(3), Position::new(7, 8));
        assert_eq!(w.index_on_row(9), Some(5));
        assert_eq!(w.index_on_row(10), None);
        assert_eq!(w.index_on_row(3), None);
        let cells: Vec<_> = w.cells().collect();
        assert_eq!(cells[0], (Position::new(4, 8), 'p'));
    }
}
