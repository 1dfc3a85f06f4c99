//! Text and JSON writers for a finished puzzle.

use anyhow::{Context, Result};
use crossword_core::{Grid, HiddenWord, PlacedWord, Puzzle, PuzzleKind};
use serde::Serialize;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

pub const TEXT_FILE: &str = "crossword.txt";
pub const JSON_FILE: &str = "crossword.json";

/// Run details stored next to the grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Metadata {
    /// Seconds since the Unix epoch
    pub timestamp: u64,
    pub seed: u64,
    pub kind: PuzzleKind,
    pub rows: usize,
    pub cols: usize,
}

impl Metadata {
    pub fn new(puzzle: &Puzzle, seed: u64) -> Self {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        Self {
            timestamp,
            seed,
            kind: puzzle.kind(),
            rows: puzzle.rows(),
            cols: puzzle.cols(),
        }
    }

    /// `<timestamp>-<seed>`, unique per run
    pub fn run_name(&self) -> String {
        format!("{}-{}", self.timestamp, self.seed)
    }
}

#[derive(Serialize)]
struct PuzzleDocument<'a> {
    metadata: &'a Metadata,
    grid: &'a Grid,
    words: &'a [PlacedWord],
    #[serde(skip_serializing_if = "Option::is_none")]
    hidden_word: Option<&'a HiddenWord>,
}

fn direction(word: &PlacedWord) -> &'static str {
    if word.is_horizontal() {
        "across"
    } else {
        "down"
    }
}

/// Grid followed by numbered clues, then the hidden word if there is one
struct TextReport<'a>(&'a Puzzle);

impl fmt::Display for TextReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let puzzle = self.0;
        write!(f, "Crossword grid:\n\n{}", puzzle.grid())?;

        writeln!(f, "\nClues:\n")?;
        for (i, word) in puzzle.words().iter().enumerate() {
            writeln!(f, "{}. {} ({})", i + 1, word.text, direction(word))?;
            writeln!(f, "   Clue: {}", word.clue)?;
            if !word.pattern_hint.is_empty() {
                writeln!(f, "   Pattern: {}", word.pattern_hint)?;
            }
            writeln!(f, "   Position: row {}, col {}\n", word.row, word.col)?;
        }

        if let Some(hidden) = puzzle.hidden_word() {
            writeln!(f, "Hidden word in the highlighted column:")?;
            writeln!(f, "Column: {}", hidden.col + 1)?;
            writeln!(f, "Word: {}", hidden.text)?;
        }
        Ok(())
    }
}

pub fn render_text(puzzle: &Puzzle) -> String {
    TextReport(puzzle).to_string()
}

pub fn render_json(puzzle: &Puzzle, metadata: &Metadata) -> Result<String> {
    let document = PuzzleDocument {
        metadata,
        grid: puzzle.grid(),
        words: puzzle.words(),
        hidden_word: puzzle.hidden_word(),
    };
    serde_json::to_string_pretty(&document).context("failed to serialize puzzle")
}

/// Write both files into `<root>/<timestamp>-<seed>/` and return that directory
pub fn write_outputs(root: &Path, puzzle: &Puzzle, metadata: &Metadata) -> Result<PathBuf> {
    let dir = root.join(metadata.run_name());
    fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create {}", dir.display()))?;

    let text_path = dir.join(TEXT_FILE);
    fs::write(&text_path, render_text(puzzle))
        .with_context(|| format!("failed to write {}", text_path.display()))?;

    let json_path = dir.join(JSON_FILE);
    fs::write(&json_path, render_json(puzzle, metadata)?)
        .with_context(|| format!("failed to write {}", json_path.display()))?;

    tracing::info!(dir = %dir.display(), "saved puzzle");
    Ok(dir)
}
