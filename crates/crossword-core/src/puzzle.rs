use crate::board::{Board, HiddenWord, PlacedWord};
use crate::compactor::compact;
use crate::grid::Grid;
use crate::strategy::PuzzleKind;
use serde::Serialize;
use std::fmt;

/// A finished, compacted puzzle.
///
/// Built once from a successful attempt; nothing hands out mutable access.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Puzzle {
    kind: PuzzleKind,
    grid: Grid,
    words: Vec<PlacedWord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    hidden_word: Option<HiddenWord>,
    attempts: usize,
}

impl Puzzle {
    /// Compact the board of the attempt that succeeded
    pub(crate) fn from_board(kind: PuzzleKind, board: Board, attempts: usize) -> Self {
        let (grid, words, hidden) = board.into_parts();
        let compacted = compact(&grid, &words, hidden.as_ref());
        Self {
            kind,
            grid: compacted.grid,
            words: compacted.words,
            hidden_word: compacted.hidden,
            attempts,
        }
    }

    pub fn kind(&self) -> PuzzleKind {
        self.kind
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn rows(&self) -> usize {
        self.grid.rows()
    }

    pub fn cols(&self) -> usize {
        self.grid.cols()
    }

    /// Placed words in placement order
    pub fn words(&self) -> &[PlacedWord] {
        &self.words
    }

    pub fn hidden_word(&self) -> Option<&HiddenWord> {
        self.hidden_word.as_ref()
    }

    /// Attempt number that produced this puzzle, starting at 1
    pub fn attempts(&self) -> usize {
        self.attempts
    }

    pub fn across(&self) -> impl Iterator<Item = &PlacedWord> {
        self.words.iter().filter(|w| w.is_horizontal())
    }

    pub fn down(&self) -> impl Iterator<Item = &PlacedWord> {
        self.words.iter().filter(|w| !w.is_horizontal())
    }
}

impl fmt::Display for Puzzle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self.cols() * 2 + 4;
        write!(f, "    ")?;
        for col in 0..self.cols() {
            write!(f, "{}", col % 10)?;
            if col + 1 < self.cols() {
                write!(f, " ")?;
            }
        }
        writeln!(f)?;
        writeln!(f, "{}", "-".repeat(width))?;
        for row in 0..self.rows() {
            writeln!(f, "{:>2} |{}", row, self.grid.row_text(row))?;
        }
        write!(f, "{}", "-".repeat(width))
    }
}
