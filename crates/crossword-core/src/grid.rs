use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Character used for empty cells in text and JSON output
pub const EMPTY_MARKER: char = '_';

/// A single grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    Letter(char),
}

impl Cell {
    pub fn is_empty(self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn letter(self) -> Option<char> {
        match self {
            Cell::Empty => None,
            Cell::Letter(c) => Some(c),
        }
    }

    /// Whether `letter` can be written here without overwriting a different one
    pub fn accepts(self, letter: char) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Letter(c) => c == letter,
        }
    }

    pub fn as_char(self) -> char {
        self.letter().unwrap_or(EMPTY_MARKER)
    }
}

impl Serialize for Cell {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_char(self.as_char())
    }
}

/// Placement axis of a word
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Orientation {
    pub fn perpendicular(self) -> Self {
        match self {
            Orientation::Horizontal => Orientation::Vertical,
            Orientation::Vertical => Orientation::Horizontal,
        }
    }

    /// (row, col) delta between consecutive letters
    pub fn step(self) -> (isize, isize) {
        match self {
            Orientation::Horizontal => (0, 1),
            Orientation::Vertical => (1, 0),
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Orientation::Horizontal => write!(f, "Horizontal"),
            Orientation::Vertical => write!(f, "Vertical"),
        }
    }
}

/// A cell coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Row-major letter grid.
///
/// Working grids are square; the compactor produces rectangular ones.
/// Writing is crate-private so every letter goes through the placement
/// validator in [`crate::board::Board`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Create an empty square grid
    pub fn new(size: usize) -> Self {
        Self::with_dimensions(size, size)
    }

    /// Create an empty rows×cols grid
    pub fn with_dimensions(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![Cell::Empty; rows * cols],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Length of the axis a word of the given orientation runs along
    pub fn extent(&self, orientation: Orientation) -> usize {
        match orientation {
            Orientation::Horizontal => self.cols,
            Orientation::Vertical => self.rows,
        }
    }

    pub fn in_bounds(&self, row: isize, col: isize) -> bool {
        row >= 0 && col >= 0 && (row as usize) < self.rows && (col as usize) < self.cols
    }

    pub fn get(&self, row: usize, col: usize) -> Option<Cell> {
        if row < self.rows && col < self.cols {
            Some(self.cells[row * self.cols + col])
        } else {
            None
        }
    }

    /// Cell lookup treating everything outside the grid as empty
    pub fn get_or_empty(&self, row: isize, col: isize) -> Cell {
        if self.in_bounds(row, col) {
            self.cells[row as usize * self.cols + col as usize]
        } else {
            Cell::Empty
        }
    }

    pub(crate) fn set(&mut self, row: usize, col: usize, letter: char) {
        debug_assert!(row < self.rows && col < self.cols);
        self.cells[row * self.cols + col] = Cell::Letter(letter);
    }

    /// Clear every cell, keeping the dimensions
    pub fn reset(&mut self) {
        self.cells.fill(Cell::Empty);
    }

    pub fn row(&self, row: usize) -> &[Cell] {
        &self.cells[row * self.cols..(row + 1) * self.cols]
    }

    /// Cells of `row` as characters separated by spaces
    pub fn row_text(&self, row: usize) -> String {
        self.row(row)
            .iter()
            .map(|c| c.as_char().to_string())
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn is_row_empty(&self, row: usize) -> bool {
        self.row(row).iter().all(|c| c.is_empty())
    }

    pub fn is_col_empty(&self, col: usize) -> bool {
        (0..self.rows).all(|row| self.row(row)[col].is_empty())
    }

    /// Number of cells holding a letter
    pub fn letter_count(&self) -> usize {
        self.cells.iter().filter(|c| !c.is_empty()).count()
    }
}

impl Serialize for Grid {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let rows: Vec<&[Cell]> = (0..self.rows).map(|r| self.row(r)).collect();
        rows.serialize(serializer)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.rows {
            writeln!(f, "{}", self.row_text(row))?;
        }
        Ok(())
    }
}
