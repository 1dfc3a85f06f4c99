//! Corpus file loading.

use anyhow::{Context, Result};
use crossword_core::{WordCandidate, WordList};
use std::fs;
use std::path::Path;

/// Load a corpus file.
///
/// `.json` files hold an array of candidate objects (`solution`, `clue`,
/// `pattern_hint`/`word_pattern`, `word_count`/`num_words`); anything else is
/// read as `solution;clue;pattern_hint;word_count` lines. Invalid entries are
/// skipped with a warning.
pub fn load_word_list(path: &Path) -> Result<WordList> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read corpus file {}", path.display()))?;

    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let list = if is_json {
        parse_json(&contents).with_context(|| format!("failed to parse {}", path.display()))?
    } else {
        WordList::parse_lines(&contents)
    };

    tracing::info!(
        path = %path.display(),
        loaded = list.len(),
        skipped = list.skipped(),
        "loaded corpus"
    );
    Ok(list)
}

fn parse_json(contents: &str) -> Result<WordList> {
    let entries: Vec<serde_json::Value> =
        serde_json::from_str(contents).context("corpus must be a JSON array of entries")?;

    let mut candidates = Vec::with_capacity(entries.len());
    let mut skipped = 0;
    for (idx, entry) in entries.into_iter().enumerate() {
        match serde_json::from_value::<WordCandidate>(entry) {
            Ok(candidate) => candidates.push(candidate),
            Err(e) => {
                tracing::warn!("skipping corpus entry {}: {e}", idx + 1);
                skipped += 1;
            }
        }
    }
    Ok(WordList::from_candidates(candidates).with_skipped(skipped))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_temp(suffix: &str, contents: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_line_format() {
        let file = write_temp(
            ".txt",
            "# astronomy words\nastronomy;star science;(9);1\nplanet;world\n\nnot valid;oops\n",
        );
        let list = load_word_list(file.path()).unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list.skipped(), 1);
        assert_eq!(list.candidates()[0].clue(), "star science");
        assert_eq!(list.candidates()[0].word_count(), "1");
    }

    #[test]
    fn test_load_json_with_original_columns() {
        let file = write_temp(
            ".json",
            r#"[
                {
                    "solution": "Astronomy",
                    "clue": "star science",
                    "word_pattern": "(9)",
                    "num_words": 1
                },
                {"solution": "tea", "clue": "hot drink"},
                {"solution": "ice-cream", "clue": "dessert"}
            ]"#,
        );
        let list = load_word_list(file.path()).unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list.skipped(), 1);
        let first = &list.candidates()[0];
        assert_eq!(first.solution(), "astronomy");
        assert_eq!(first.pattern_hint(), "(9)");
        assert_eq!(first.word_count(), "1");
    }

    #[test]
    fn test_json_must_be_an_array() {
        let file = write_temp(".json", r#"{"solution": "tea"}"#);
        assert!(load_word_list(file.path()).is_err());
    }

    #[test]
    fn test_missing_file_names_path() {
        let err = load_word_list(Path::new("/definitely/not/here.txt")).unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.txt"));
    }
}
