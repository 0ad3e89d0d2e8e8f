//! Stopword set for code-mixed English/Hinglish text

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::error::{HatecheckError, Result};

/// Bundled English stopword list
pub const ENGLISH_LIST: &str = include_str!("../../data/stopwords/english.txt");

/// Bundled Hinglish (romanized Hindi) stopword list
pub const HINGLISH_LIST: &str = include_str!("../../data/stopwords/hinglish.txt");

/// Parse a newline-separated stopword list. Blank lines and `#` comments are skipped.
pub fn parse_list(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(|line| line.to_string())
        .collect()
}

/// Read a stopword list from disk
pub fn load_list(path: &Path) -> Result<Vec<String>> {
    let content = fs::read_to_string(path).map_err(|e| HatecheckError::FailedOperation {
        operation: format!("read stopword list {}", path.display()),
        reason: e.to_string(),
    })?;
    Ok(parse_list(&content))
}

/// Immutable set of lowercase stopwords
///
/// Built once at startup and shared read-only (behind an `Arc`) by every
/// preprocessing call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StopwordSet {
    words: HashSet<String>,
}

impl StopwordSet {
    /// Union of two lists, lowercased, duplicates removed
    pub fn from_lists<A, B, S, T>(first: A, second: B) -> Self
    where
        A: IntoIterator<Item = S>,
        B: IntoIterator<Item = T>,
        S: AsRef<str>,
        T: AsRef<str>,
    {
        let words = first
            .into_iter()
            .map(|w| w.as_ref().trim().to_lowercase())
            .chain(
                second
                    .into_iter()
                    .map(|w| w.as_ref().trim().to_lowercase()),
            )
            .filter(|w| !w.is_empty())
            .collect();

        StopwordSet { words }
    }

    /// The bundled Hinglish and English lists
    pub fn builtin() -> Self {
        Self::from_lists(parse_list(HINGLISH_LIST), parse_list(ENGLISH_LIST))
    }

    /// A new set with `extra` merged in
    pub fn with_extra<I, S>(self, extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::from_lists(self.words, extra)
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Drop every token found in `stopwords`, keeping the order of the rest
pub fn remove_stopwords(tokens: Vec<String>, stopwords: &StopwordSet) -> Vec<String> {
    tokens
        .into_iter()
        .filter(|token| !stopwords.contains(token))
        .collect()
}
