//! Word corpus: validated candidates and the read-only snapshot the finder searches.
//!
//! Candidates come from an outer collaborator through [`CandidateSource`]. The
//! engine asks once per generation run for every candidate short enough to fit
//! the grid, freezes the answer into a [`Corpus`], and never queries again.
//!
//! The text format understood by [`WordList::parse_lines`] is one candidate
//! per line:
//!
//! ```text
//! solution;clue;pattern_hint;word_count
//! ```
//!
//! Only `solution` is required. Blank lines and lines starting with `#` are
//! ignored; lines whose solution is not purely alphabetic are skipped.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Problems found while loading corpus entries
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CorpusError {
    #[error("empty solution")]
    EmptySolution,
    #[error("solution {solution:?} contains non-alphabetic character {invalid_char:?}")]
    NonAlphabetic { solution: String, invalid_char: char },
    #[error("line {line}: {source}")]
    Line {
        line: usize,
        #[source]
        source: Box<CorpusError>,
    },
}

/// One corpus entry. The solution is always non-empty lowercase ASCII.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawCandidate")]
pub struct WordCandidate {
    solution: String,
    clue: String,
    pattern_hint: String,
    word_count: String,
}

impl WordCandidate {
    /// Build a candidate, normalizing the solution to lowercase.
    pub fn new(
        solution: &str,
        clue: impl Into<String>,
        pattern_hint: impl Into<String>,
        word_count: impl Into<String>,
    ) -> Result<Self, CorpusError> {
        let solution = solution.trim().to_lowercase();
        if solution.is_empty() {
            return Err(CorpusError::EmptySolution);
        }
        if let Some(invalid_char) = solution.chars().find(|c| !c.is_ascii_lowercase()) {
            return Err(CorpusError::NonAlphabetic {
                solution,
                invalid_char,
            });
        }
        Ok(Self {
            solution,
            clue: clue.into(),
            pattern_hint: pattern_hint.into(),
            word_count: word_count.into(),
        })
    }

    /// Candidate with only a solution, mostly useful in tests and demos
    pub fn bare(solution: &str) -> Result<Self, CorpusError> {
        Self::new(solution, "", "", "")
    }

    pub fn solution(&self) -> &str {
        &self.solution
    }

    pub fn clue(&self) -> &str {
        &self.clue
    }

    pub fn pattern_hint(&self) -> &str {
        &self.pattern_hint
    }

    pub fn word_count(&self) -> &str {
        &self.word_count
    }

    pub fn len(&self) -> usize {
        self.solution.len()
    }

    pub fn is_empty(&self) -> bool {
        self.solution.is_empty()
    }

    /// Letter at `index`; the solution is ASCII so byte and char indices agree
    pub fn letter_at(&self, index: usize) -> Option<char> {
        self.solution.as_bytes().get(index).map(|&b| b as char)
    }

    pub fn first_letter(&self) -> char {
        self.solution.as_bytes()[0] as char
    }

    pub fn last_letter(&self) -> char {
        self.solution.as_bytes()[self.solution.len() - 1] as char
    }

    /// Indices at which `letter` occurs
    pub fn positions_of(&self, letter: char) -> impl Iterator<Item = usize> + '_ {
        self.solution
            .char_indices()
            .filter(move |&(_, c)| c == letter)
            .map(|(i, _)| i)
    }
}

/// Serde shape of a candidate: accepts the original column names and a
/// numeric or textual word count.
#[derive(Deserialize)]
struct RawCandidate {
    solution: String,
    #[serde(default)]
    clue: String,
    #[serde(default, alias = "word_pattern")]
    pattern_hint: String,
    #[serde(default, alias = "num_words")]
    word_count: RawWordCount,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawWordCount {
    Number(u64),
    Text(String),
}

impl Default for RawWordCount {
    fn default() -> Self {
        RawWordCount::Text(String::new())
    }
}

impl TryFrom<RawCandidate> for WordCandidate {
    type Error = CorpusError;

    fn try_from(raw: RawCandidate) -> Result<Self, Self::Error> {
        let word_count = match raw.word_count {
            RawWordCount::Number(n) => n.to_string(),
            RawWordCount::Text(s) => s,
        };
        WordCandidate::new(&raw.solution, raw.clue, raw.pattern_hint, word_count)
    }
}

/// The corpus collaborator: hands out every candidate up to a length.
pub trait CandidateSource {
    /// Candidates whose solution is at most `max_solution_length` letters, in
    /// the source's own order.
    fn get_candidates(&self, max_solution_length: usize) -> Vec<WordCandidate>;
}

/// A loaded list of validated candidates
#[derive(Debug, Clone, Default)]
pub struct WordList {
    candidates: Vec<WordCandidate>,
    skipped: usize,
}

impl WordList {
    pub fn from_candidates(candidates: Vec<WordCandidate>) -> Self {
        Self {
            candidates,
            skipped: 0,
        }
    }

    /// Add entries rejected before they reached the list
    pub fn with_skipped(mut self, skipped: usize) -> Self {
        self.skipped += skipped;
        self
    }

    /// Build a list from bare solutions, skipping invalid ones
    pub fn from_solutions<'a>(solutions: impl IntoIterator<Item = &'a str>) -> Self {
        let mut list = Self::default();
        for solution in solutions {
            match WordCandidate::bare(solution) {
                Ok(candidate) => list.candidates.push(candidate),
                Err(e) => {
                    tracing::warn!("skipping corpus entry: {e}");
                    list.skipped += 1;
                }
            }
        }
        list
    }

    /// Parse `solution;clue;pattern_hint;word_count` lines.
    ///
    /// Invalid lines are logged and counted in [`WordList::skipped`] rather
    /// than aborting the load.
    pub fn parse_lines(contents: &str) -> Self {
        let mut list = Self::default();
        for (idx, raw_line) in contents.lines().enumerate() {
            let line = raw_line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            match parse_line(line) {
                Ok(candidate) => list.candidates.push(candidate),
                Err(e) => {
                    let err = CorpusError::Line {
                        line: idx + 1,
                        source: Box::new(e),
                    };
                    tracing::warn!("skipping corpus entry: {err}");
                    list.skipped += 1;
                }
            }
        }
        tracing::debug!(
            loaded = list.candidates.len(),
            skipped = list.skipped,
            "parsed word list"
        );
        list
    }

    pub fn candidates(&self) -> &[WordCandidate] {
        &self.candidates
    }

    /// Number of lines rejected while loading
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}

fn parse_line(line: &str) -> Result<WordCandidate, CorpusError> {
    let mut fields = line.splitn(4, ';').map(str::trim);
    let solution = fields.next().unwrap_or_default();
    let clue = fields.next().unwrap_or_default();
    let pattern_hint = fields.next().unwrap_or_default();
    let word_count = fields.next().unwrap_or_default();
    WordCandidate::new(solution, clue, pattern_hint, word_count)
}

impl CandidateSource for WordList {
    fn get_candidates(&self, max_solution_length: usize) -> Vec<WordCandidate> {
        self.candidates
            .iter()
            .filter(|c| c.len() <= max_solution_length)
            .cloned()
            .collect()
    }
}

/// Read-only candidate snapshot for one generation run
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    candidates: Vec<WordCandidate>,
}

impl Corpus {
    pub fn new(candidates: Vec<WordCandidate>) -> Self {
        Self { candidates }
    }

    /// Take the snapshot: one query for everything that fits a grid side
    pub fn from_source(source: &dyn CandidateSource, max_solution_length: usize) -> Self {
        let candidates = source.get_candidates(max_solution_length);
        tracing::info!(
            candidates = candidates.len(),
            max_solution_length,
            "corpus snapshot loaded"
        );
        Self { candidates }
    }

    pub fn candidates(&self) -> &[WordCandidate] {
        &self.candidates
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}
