//! Stop-word set: embedded English list or a user-supplied file.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};

const BUILTIN: &str = include_str!("../assets/stopwords.txt");

/// Immutable set of lowercase stop words.
#[derive(Debug, Clone, Default)]
pub struct StopWordSet {
    words: HashSet<String>,
}

impl StopWordSet {
    /// The embedded English list. Never fails.
    pub fn builtin() -> Self {
        Self::parse(BUILTIN)
    }

    /// Build from any list of words; entries are trimmed and lowercased.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::default();
        set.extend(words);
        set
    }

    /// Read one word per line. Blank lines and `#` comments are skipped.
    pub fn from_file(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path).map_err(|source| Error::StopWords {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::parse(&data))
    }

    /// File when a path is given, embedded list otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let set = match path {
            Some(p) => Self::from_file(p)?,
            None => Self::builtin(),
        };
        tracing::debug!(count = set.len(), from_file = path.is_some(), "loaded stop words");
        Ok(set)
    }

    fn parse(data: &str) -> Self {
        Self::from_words(
            data.lines()
                .map(str::trim)
                .filter(|line| !line.is_empty() && !line.starts_with('#')),
        )
    }

    /// Merge extra words into the set.
    pub fn extend<I, S>(&mut self, words: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for word in words {
            let word = word.as_ref().trim();
            if !word.is_empty() {
                self.words.insert(word.to_lowercase());
            }
        }
    }

    /// Lookup is exact; callers lowercase first.
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
