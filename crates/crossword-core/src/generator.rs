use crate::board::Board;
use crate::corpus::{CandidateSource, Corpus};
use crate::finder::WordFinder;
use crate::puzzle::Puzzle;
use crate::rng::PuzzleRng;
use crate::strategy::{strategy_for, PlacementStrategy, PuzzleKind};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use thiserror::Error;

pub const GRID_SIZE_RANGE: RangeInclusive<usize> = 5..=30;
pub const MAX_ATTEMPTS_RANGE: RangeInclusive<usize> = 1..=10;
pub const HIDDEN_LENGTH_RANGE: RangeInclusive<usize> = 5..=15;
pub const WORD_COUNT_RANGE: RangeInclusive<usize> = 3..=20;

/// Rejected configuration. Reported before any attempt runs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("grid size {0} is outside 5..=30")]
    GridSizeOutOfRange(usize),
    #[error("max attempts {0} is outside 1..=10")]
    MaxAttemptsOutOfRange(usize),
    #[error("hidden word length bounds {min}..={max} must be ordered and within 5..=15")]
    HiddenLengthOutOfRange { min: usize, max: usize },
    #[error("intersecting word bounds {min}..={max} must be ordered and within 3..=20")]
    WordCountOutOfRange { min: usize, max: usize },
    #[error("{min_words} intersecting words required, hidden words have at most {longest} letters")]
    TooManyWordsRequired { min_words: usize, longest: usize },
    #[error("{kind} needs a grid of at least {required}, got {size}")]
    GridTooSmall {
        kind: PuzzleKind,
        size: usize,
        required: usize,
    },
}

/// Settings for the hidden-word layout
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HiddenWordConfig {
    /// Shortest hidden word
    pub min_length: usize,
    /// Longest hidden word
    pub max_length: usize,
    /// Intersecting words an attempt must place
    pub min_words: usize,
    /// Rows an attempt tries to cross
    pub max_words: usize,
}

impl Default for HiddenWordConfig {
    fn default() -> Self {
        Self {
            min_length: 5,
            max_length: 8,
            min_words: 3,
            max_words: 15,
        }
    }
}

impl HiddenWordConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_length > self.max_length
            || !HIDDEN_LENGTH_RANGE.contains(&self.min_length)
            || !HIDDEN_LENGTH_RANGE.contains(&self.max_length)
        {
            return Err(ConfigError::HiddenLengthOutOfRange {
                min: self.min_length,
                max: self.max_length,
            });
        }
        if self.min_words > self.max_words
            || !WORD_COUNT_RANGE.contains(&self.min_words)
            || !WORD_COUNT_RANGE.contains(&self.max_words)
        {
            return Err(ConfigError::WordCountOutOfRange {
                min: self.min_words,
                max: self.max_words,
            });
        }
        // one intersecting word per hidden letter at most
        if self.min_words > self.max_length {
            return Err(ConfigError::TooManyWordsRequired {
                min_words: self.min_words,
                longest: self.max_length,
            });
        }
        Ok(())
    }
}

/// Configuration for puzzle generation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    pub kind: PuzzleKind,
    /// Side of the square working grid
    pub grid_size: usize,
    /// Attempts before giving up
    pub max_attempts: usize,
    /// Only read by the hidden-word layout
    pub hidden: HiddenWordConfig,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            kind: PuzzleKind::CenterHorizontal,
            grid_size: 15,
            max_attempts: 3,
            hidden: HiddenWordConfig::default(),
        }
    }
}

impl GeneratorConfig {
    pub fn new(kind: PuzzleKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    /// Check every bound, including whether the layout can fit the grid at all
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !GRID_SIZE_RANGE.contains(&self.grid_size) {
            return Err(ConfigError::GridSizeOutOfRange(self.grid_size));
        }
        if !MAX_ATTEMPTS_RANGE.contains(&self.max_attempts) {
            return Err(ConfigError::MaxAttemptsOutOfRange(self.max_attempts));
        }
        if self.kind == PuzzleKind::HiddenWord {
            self.hidden.validate()?;
        }
        let strategy = strategy_for(self.kind, &self.hidden);
        check_fits(strategy.as_ref(), self.grid_size)
    }
}

fn check_fits(strategy: &dyn PlacementStrategy, size: usize) -> Result<(), ConfigError> {
    let required = strategy.min_grid_size();
    if size < required {
        return Err(ConfigError::GridTooSmall {
            kind: strategy.kind(),
            size,
            required,
        });
    }
    Ok(())
}

/// Result of a generation run. Exhaustion is an ordinary value the caller
/// has to look at, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub enum GenerationOutcome {
    Generated(Puzzle),
    Exhausted { attempts: usize },
}

impl GenerationOutcome {
    pub fn puzzle(&self) -> Option<&Puzzle> {
        match self {
            GenerationOutcome::Generated(puzzle) => Some(puzzle),
            GenerationOutcome::Exhausted { .. } => None,
        }
    }

    pub fn into_puzzle(self) -> Option<Puzzle> {
        match self {
            GenerationOutcome::Generated(puzzle) => Some(puzzle),
            GenerationOutcome::Exhausted { .. } => None,
        }
    }

    pub fn is_generated(&self) -> bool {
        matches!(self, GenerationOutcome::Generated(_))
    }
}

/// Crossword generator: runs a layout against a fresh board until an
/// attempt places every word or the attempts run out.
pub struct Generator<R: RngCore = PuzzleRng> {
    config: GeneratorConfig,
    rng: R,
}

impl Generator<PuzzleRng> {
    /// Create a generator seeded from OS entropy
    pub fn new(config: GeneratorConfig) -> Result<Self, ConfigError> {
        Self::with_rng(config, PuzzleRng::from_entropy_seed())
    }

    /// Create a generator with a specific seed for reproducibility
    pub fn with_seed(config: GeneratorConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::with_rng(config, PuzzleRng::with_seed(seed))
    }

    /// Seed of the random source, for replaying a run
    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }
}

impl<R: RngCore> Generator<R> {
    /// Create a generator drawing from `rng`
    pub fn with_rng(config: GeneratorConfig, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config, rng })
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generate a puzzle of the configured kind
    pub fn generate(&mut self, source: &dyn CandidateSource) -> GenerationOutcome {
        let strategy = strategy_for(self.config.kind, &self.config.hidden);
        self.run(strategy.as_ref(), source)
    }

    /// Generate with a caller-supplied layout
    pub fn generate_with(
        &mut self,
        strategy: &dyn PlacementStrategy,
        source: &dyn CandidateSource,
    ) -> Result<GenerationOutcome, ConfigError> {
        check_fits(strategy, self.config.grid_size)?;
        Ok(self.run(strategy, source))
    }

    fn run(
        &mut self,
        strategy: &dyn PlacementStrategy,
        source: &dyn CandidateSource,
    ) -> GenerationOutcome {
        let size = self.config.grid_size;
        let max_attempts = self.config.max_attempts;
        let kind = strategy.kind();

        let corpus = Corpus::from_source(source, size);
        let finder = WordFinder::new(&corpus);
        let mut board = Board::new(size);

        for attempt in 1..=max_attempts {
            board.reset();
            tracing::info!(attempt, max_attempts, %kind, "starting attempt");
            match strategy.place_words(&mut board, &finder, &mut self.rng) {
                Ok(()) => {
                    tracing::info!(attempt, words = board.words().len(), "puzzle generated");
                    return GenerationOutcome::Generated(Puzzle::from_board(kind, board, attempt));
                }
                Err(failure) => {
                    tracing::warn!(attempt, %failure, "attempt failed");
                }
            }
        }

        tracing::warn!(attempts = max_attempts, %kind, "no attempt succeeded");
        GenerationOutcome::Exhausted {
            attempts: max_attempts,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::WordList;
    use crate::grid::Orientation;
    use rand::rngs::mock::StepRng;

    const LAYOUT_A: [&str; 5] = ["astronomy", "steady", "planet", "scrimp", "tea"];

    fn words(list: &[&str]) -> WordList {
        WordList::from_solutions(list.iter().copied())
    }

    /// Rich enough for every layout to succeed now and then
    const MIXED_WORDS: &str = "\
        astronomy conversation telescope orchestra understand character reasonable generation \
        steady planet scrimp dreamy orange yellow garden silver rocket castle number carpet \
        cable tiger novel drama stone angel sofa area \
        tea the ten oat net sea ant rat era ore art eat tan one toe ear sat ton";

    fn mixed_corpus() -> WordList {
        WordList::from_solutions(MIXED_WORDS.split_whitespace())
    }

    fn assert_no_overwrite(puzzle: &Puzzle) {
        for word in puzzle.words() {
            for (pos, letter) in word.cells() {
                assert_eq!(
                    puzzle.grid().get(pos.row, pos.col).and_then(|c| c.letter()),
                    Some(letter),
                    "{} disagrees with grid at {:?}",
                    word.text,
                    pos
                );
            }
        }
    }

    #[test]
    fn test_default_config() {
        let config = GeneratorConfig::default();
        assert_eq!(config.kind, PuzzleKind::CenterHorizontal);
        assert_eq!((config.grid_size, config.max_attempts), (15, 3));
        assert_eq!(config.hidden, HiddenWordConfig::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_small_grid_fails_fast() {
        let config = GeneratorConfig {
            grid_size: 5,
            ..GeneratorConfig::default()
        };
        let err = Generator::with_seed(config, 1).err();
        assert_eq!(
            err,
            Some(ConfigError::GridTooSmall {
                kind: PuzzleKind::CenterHorizontal,
                size: 5,
                required: 8,
            })
        );
    }

    #[test]
    fn test_layout_b_needs_room_for_crossbar() {
        let config = GeneratorConfig {
            grid_size: 10,
            ..GeneratorConfig::new(PuzzleKind::CenterVertical)
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::GridTooSmall { required: 12, .. })
        ));
    }

    #[test]
    fn test_bounds_are_checked() {
        let mut config = GeneratorConfig::default();
        config.grid_size = 31;
        assert_eq!(config.validate(), Err(ConfigError::GridSizeOutOfRange(31)));
        config.grid_size = 15;
        config.max_attempts = 0;
        assert_eq!(
            config.validate(),
            Err(ConfigError::MaxAttemptsOutOfRange(0))
        );
        config.max_attempts = 11;
        assert_eq!(
            config.validate(),
            Err(ConfigError::MaxAttemptsOutOfRange(11))
        );
    }

    #[test]
    fn test_hidden_bounds_are_checked() {
        let mut config = GeneratorConfig::new(PuzzleKind::HiddenWord);
        config.hidden.min_length = 9;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::HiddenLengthOutOfRange { min: 9, max: 8 })
        ));
        config.hidden = HiddenWordConfig {
            min_words: 2,
            ..HiddenWordConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::WordCountOutOfRange { .. })
        ));
        config.hidden = HiddenWordConfig {
            min_words: 10,
            ..HiddenWordConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::TooManyWordsRequired { .. })
        ));
        config.hidden = HiddenWordConfig {
            max_length: 12,
            ..HiddenWordConfig::default()
        };
        config.grid_size = 11;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::GridTooSmall { required: 12, .. })
        ));
    }

    #[test]
    fn test_hidden_bounds_ignored_for_other_layouts() {
        let mut config = GeneratorConfig::default();
        config.hidden.min_words = 0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_generates_layout_a_and_compacts() {
        let config = GeneratorConfig::default();
        let mut generator = Generator::with_rng(config, StepRng::new(0, 0)).unwrap();
        let puzzle = generator.generate(&words(&LAYOUT_A)).into_puzzle().unwrap();

        assert_eq!(puzzle.kind(), PuzzleKind::CenterHorizontal);
        assert_eq!(puzzle.attempts(), 1);
        assert_eq!((puzzle.rows(), puzzle.cols()), (6, 9));
        let anchors: Vec<(&str, usize, usize, Orientation)> = puzzle
            .words()
            .iter()
            .map(|w| (w.text.as_str(), w.row, w.col, w.orientation))
            .collect();
        assert_eq!(
            anchors,
            vec![
                ("astronomy", 3, 0, Orientation::Horizontal),
                ("steady", 0, 0, Orientation::Vertical),
                ("planet", 0, 5, Orientation::Vertical),
                ("scrimp", 0, 0, Orientation::Horizontal),
                ("tea", 5, 5, Orientation::Horizontal),
            ]
        );
        assert_no_overwrite(&puzzle);
    }

    #[test]
    fn test_exhausts_when_no_anchor() {
        let config = GeneratorConfig {
            max_attempts: 4,
            ..GeneratorConfig::default()
        };
        let mut generator = Generator::with_seed(config, 7).unwrap();
        let outcome = generator.generate(&words(&["tea", "planet", "steady"]));
        assert_eq!(outcome, GenerationOutcome::Exhausted { attempts: 4 });
        assert!(outcome.puzzle().is_none());
    }

    #[test]
    fn test_hidden_exhausts_without_hidden_word() {
        let config = GeneratorConfig {
            max_attempts: 2,
            ..GeneratorConfig::new(PuzzleKind::HiddenWord)
        };
        let mut generator = Generator::with_seed(config, 3).unwrap();
        let outcome = generator.generate(&words(&["tea", "conversation"]));
        assert_eq!(outcome, GenerationOutcome::Exhausted { attempts: 2 });
    }

    #[test]
    fn test_same_seed_same_puzzle() {
        for &kind in PuzzleKind::all() {
            let config = GeneratorConfig {
                max_attempts: 10,
                ..GeneratorConfig::new(kind)
            };
            let corpus = mixed_corpus();
            let first = Generator::with_seed(config.clone(), 2024)
                .unwrap()
                .generate(&corpus);
            let second = Generator::with_seed(config, 2024)
                .unwrap()
                .generate(&corpus);
            assert_eq!(first, second, "{kind} differs between runs");
        }
    }

    #[test]
    fn test_word_counts_and_consistency() {
        for &kind in PuzzleKind::all() {
            for seed in 0..20 {
                let config = GeneratorConfig {
                    max_attempts: 10,
                    ..GeneratorConfig::new(kind)
                };
                let mut generator = Generator::with_seed(config.clone(), seed).unwrap();
                let outcome = generator.generate(&mixed_corpus());
                let GenerationOutcome::Generated(puzzle) = outcome else {
                    continue;
                };
                assert_no_overwrite(&puzzle);
                if kind == PuzzleKind::HiddenWord {
                    assert!(puzzle.words().len() >= config.hidden.min_words);
                    assert!(puzzle.hidden_word().is_some());
                } else {
                    assert_eq!(puzzle.words().len(), 5, "{kind} with seed {seed}");
                }
                for row in 0..puzzle.rows() {
                    assert!(!puzzle.grid().is_row_empty(row));
                }
            }
        }
    }

    #[test]
    fn test_hidden_layout_generates() {
        let config = GeneratorConfig {
            hidden: HiddenWordConfig {
                min_length: 5,
                max_length: 5,
                ..HiddenWordConfig::default()
            },
            ..GeneratorConfig::new(PuzzleKind::HiddenWord)
        };
        let mut generator = Generator::with_seed(config, 11).unwrap();
        let puzzle = generator
            .generate(&words(&["stone", "tea", "oat", "net", "sea", "ten"]))
            .into_puzzle()
            .unwrap();
        let hidden = puzzle.hidden_word().unwrap();
        assert_eq!(hidden.text, "stone");
        assert_eq!(hidden.row, 0);
        assert!(puzzle.words().len() >= 3);
        assert_no_overwrite(&puzzle);
    }

    #[test]
    fn test_generate_with_custom_layout_checks_size() {
        let config = GeneratorConfig {
            grid_size: 10,
            ..GeneratorConfig::default()
        };
        let mut generator = Generator::with_seed(config, 1).unwrap();
        let err = generator
            .generate_with(&crate::strategy::CenterVertical, &words(&LAYOUT_A))
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::GridTooSmall { required: 12, .. }
        ));
    }
}
