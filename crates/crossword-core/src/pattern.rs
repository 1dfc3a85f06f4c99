use std::fmt;

/// Wildcard character in textual patterns
pub const WILDCARD: char = '_';

/// Positional letter constraint: each slot is a fixed letter or a wildcard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    slots: Vec<Option<char>>,
}

impl Pattern {
    /// All-wildcard pattern of `len` slots
    pub fn blank(len: usize) -> Self {
        Self {
            slots: vec![None; len],
        }
    }

    /// Parse a textual pattern such as `"__a_t"`
    pub fn parse(text: &str) -> Self {
        Self {
            slots: text
                .chars()
                .map(|c| if c == WILDCARD { None } else { Some(c) })
                .collect(),
        }
    }

    /// Fix `letter` at `pos`; positions past the end are ignored
    pub fn with_letter(mut self, pos: usize, letter: char) -> Self {
        if let Some(slot) = self.slots.get_mut(pos) {
            *slot = Some(letter);
        }
        self
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Position-for-position match over the shorter of pattern and word
    pub fn matches_prefix(&self, word: &str) -> bool {
        self.slots
            .iter()
            .zip(word.chars())
            .all(|(slot, c)| slot.map_or(true, |fixed| fixed == c))
    }

    /// Same length and every fixed slot agrees
    pub fn matches_exactly(&self, word: &str) -> bool {
        word.len() == self.slots.len() && self.matches_prefix(word)
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for slot in &self.slots {
            write!(f, "{}", slot.unwrap_or(WILDCARD))?;
        }
        Ok(())
    }
}
