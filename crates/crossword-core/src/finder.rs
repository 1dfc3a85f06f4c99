//! Candidate search over the corpus snapshot.
//!
//! The four `find_*` operations look alike but select differently, and the
//! layouts depend on each policy's distribution:
//!
//! - [`WordFinder::find_word`]: uniform choice among length/prefix-pattern matches.
//! - [`WordFinder::find_word_with_letter`]: first hit while walking a caller-supplied
//!   list of positions (outer) and lengths (inner). Order-sensitive.
//! - [`WordFinder::find_word_with_letter_in_range`]: uniform choice among every
//!   candidate holding the letter anywhere inside a position range.
//! - [`WordFinder::find_word_with_specific_pattern`]: uniform choice among
//!   candidates whose length equals the pattern's and match it exactly.

use crate::corpus::{Corpus, WordCandidate};
use crate::pattern::Pattern;
use rand::seq::SliceRandom;
use rand::RngCore;
use std::ops::{Range, RangeInclusive};

/// A candidate together with the offset its required letter sits at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LetterMatch<'c> {
    pub candidate: &'c WordCandidate,
    pub position: usize,
}

/// Search primitives over a borrowed [`Corpus`]
#[derive(Debug, Clone, Copy)]
pub struct WordFinder<'c> {
    corpus: &'c Corpus,
}

impl<'c> WordFinder<'c> {
    pub fn new(corpus: &'c Corpus) -> Self {
        Self { corpus }
    }

    /// Candidates whose length lies in `lengths`, in corpus order
    pub fn candidates(
        &self,
        lengths: RangeInclusive<usize>,
    ) -> impl Iterator<Item = &'c WordCandidate> + 'c {
        self.corpus
            .candidates()
            .iter()
            .filter(move |c| lengths.contains(&c.len()))
    }

    /// Uniformly random candidate with length in `lengths`, optionally
    /// matching `pattern` over the shorter of the two lengths.
    pub fn find_word(
        &self,
        rng: &mut dyn RngCore,
        lengths: RangeInclusive<usize>,
        pattern: Option<&Pattern>,
    ) -> Option<&'c WordCandidate> {
        let matching: Vec<&'c WordCandidate> = self
            .candidates(lengths)
            .filter(|c| pattern.map_or(true, |p| p.matches_prefix(c.solution())))
            .collect();
        matching.choose(rng).copied()
    }

    /// First candidate carrying `letter` at one of `positions`.
    ///
    /// Positions are tried in the given order, and for each position every
    /// length in `lengths` from shortest to longest; each combination is a
    /// single-letter pattern handed to [`WordFinder::find_word`]. The first
    /// combination with any match wins.
    pub fn find_word_with_letter(
        &self,
        rng: &mut dyn RngCore,
        lengths: RangeInclusive<usize>,
        letter: char,
        positions: &[usize],
    ) -> Option<LetterMatch<'c>> {
        for &position in positions {
            for length in lengths.clone() {
                if position >= length {
                    continue;
                }
                let pattern = Pattern::blank(length).with_letter(position, letter);
                if let Some(candidate) = self.find_word(rng, length..=length, Some(&pattern)) {
                    return Some(LetterMatch {
                        candidate,
                        position,
                    });
                }
            }
        }
        None
    }

    /// Uniformly random candidate holding `letter` at some offset in
    /// `positions`, drawn from the full set of such candidates.
    pub fn find_word_with_letter_in_range(
        &self,
        rng: &mut dyn RngCore,
        lengths: RangeInclusive<usize>,
        letter: char,
        positions: Range<usize>,
    ) -> Option<&'c WordCandidate> {
        let matching: Vec<&'c WordCandidate> = self
            .candidates(lengths)
            .filter(|c| c.positions_of(letter).any(|p| positions.contains(&p)))
            .collect();
        matching.choose(rng).copied()
    }

    /// Uniformly random candidate of length in `min_length..=max_length`
    /// whose length equals the pattern's and which matches it slot for slot.
    pub fn find_word_with_specific_pattern(
        &self,
        rng: &mut dyn RngCore,
        min_length: usize,
        max_length: usize,
        pattern: &Pattern,
    ) -> Option<&'c WordCandidate> {
        let matching: Vec<&'c WordCandidate> = self
            .candidates(min_length..=max_length)
            .filter(|c| pattern.matches_exactly(c.solution()))
            .collect();
        matching.choose(rng).copied()
    }
}
