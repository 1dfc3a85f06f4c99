//! Trims fully empty rows and columns from a finished grid.

use crate::board::{HiddenWord, PlacedWord};
use crate::grid::Grid;

/// Old index to new index along one axis; `None` for dropped lines
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AxisMap {
    map: Vec<Option<usize>>,
    kept: usize,
}

impl AxisMap {
    fn build(len: usize, keep: impl Fn(usize) -> bool) -> Self {
        let mut kept = 0;
        let map = (0..len)
            .map(|i| {
                keep(i).then(|| {
                    kept += 1;
                    kept - 1
                })
            })
            .collect();
        Self { map, kept }
    }

    pub fn get(&self, old: usize) -> Option<usize> {
        self.map.get(old).copied().flatten()
    }

    /// Number of lines that survive
    pub fn kept(&self) -> usize {
        self.kept
    }
}

/// A compacted grid with words and hidden word remapped onto it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Compacted {
    pub grid: Grid,
    pub words: Vec<PlacedWord>,
    pub hidden: Option<HiddenWord>,
}

/// Keep only rows and columns holding a letter, in their original order, and
/// move every anchor through the row and column maps. Letters are copied
/// unchanged. An empty grid is returned as is.
pub fn compact(grid: &Grid, words: &[PlacedWord], hidden: Option<&HiddenWord>) -> Compacted {
    if grid.letter_count() == 0 {
        tracing::warn!("nothing to compact, grid is empty");
        return Compacted {
            grid: grid.clone(),
            words: words.to_vec(),
            hidden: hidden.cloned(),
        };
    }

    let rows = AxisMap::build(grid.rows(), |r| !grid.is_row_empty(r));
    let cols = AxisMap::build(grid.cols(), |c| !grid.is_col_empty(c));

    let mut compacted = Grid::with_dimensions(rows.kept(), cols.kept());
    for row in 0..grid.rows() {
        for col in 0..grid.cols() {
            let (Some(new_row), Some(new_col)) = (rows.get(row), cols.get(col)) else {
                continue;
            };
            if let Some(letter) = grid.get(row, col).and_then(|c| c.letter()) {
                compacted.set(new_row, new_col, letter);
            }
        }
    }

    let remap = |row: usize, col: usize| match (rows.get(row), cols.get(col)) {
        (Some(r), Some(c)) => (r, c),
        _ => (row, col),
    };
    let words = words
        .iter()
        .map(|w| {
            let (row, col) = remap(w.row, w.col);
            PlacedWord {
                row,
                col,
                ..w.clone()
            }
        })
        .collect();
    let hidden = hidden.map(|h| {
        let (row, col) = remap(h.row, h.col);
        HiddenWord {
            row,
            col,
            ..h.clone()
        }
    });

    tracing::debug!(
        from_rows = grid.rows(),
        from_cols = grid.cols(),
        rows = compacted.rows(),
        cols = compacted.cols(),
        "compacted grid"
    );
    Compacted {
        grid: compacted,
        words,
        hidden,
    }
}
