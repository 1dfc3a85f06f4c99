//! Crossword generation engine.
//!
//! Places a small set of intersecting words from a corpus onto a square grid
//! using one of four layouts, retries failed attempts on a fresh grid, and
//! compacts the result down to its occupied rows and columns.
//!
//! ```no_run
//! use crossword_core::{GenerationOutcome, Generator, GeneratorConfig, WordList};
//!
//! let words = WordList::parse_lines("astronomy;star science\nsteady;firm\n");
//! let mut generator = Generator::new(GeneratorConfig::default()).unwrap();
//! if let GenerationOutcome::Generated(puzzle) = generator.generate(&words) {
//!     println!("{puzzle}");
//! }
//! ```

pub mod board;
pub mod compactor;
pub mod corpus;
pub mod finder;
pub mod generator;
pub mod grid;
pub mod pattern;
pub mod puzzle;
pub mod rng;
pub mod strategy;
pub mod validator;

pub use board::{Board, HiddenWord, PlacedWord, StepOutcome};
pub use compactor::{compact, Compacted};
pub use corpus::{CandidateSource, Corpus, CorpusError, WordCandidate, WordList};
pub use finder::{LetterMatch, WordFinder};
pub use generator::{ConfigError, GenerationOutcome, Generator, GeneratorConfig, HiddenWordConfig};
pub use grid::{Cell, Grid, Orientation, Position, EMPTY_MARKER};
pub use pattern::Pattern;
pub use puzzle::Puzzle;
pub use rng::PuzzleRng;
pub use strategy::{strategy_for, AttemptFailure, PlacementStrategy, PuzzleKind};
pub use validator::can_place;
