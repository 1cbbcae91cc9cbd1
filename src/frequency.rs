//! Word frequency counting and ranking.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::error::Result;

/// word -> number of occurrences
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FrequencyMap {
    counts: HashMap<String, u32>,
}

/// One entry of a ranked frequency list, as handed to the renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordFrequency {
    pub word: String,
    pub count: u32,
}

impl WordFrequency {
    pub fn new(word: impl Into<String>, count: u32) -> Self {
        Self {
            word: word.into(),
            count,
        }
    }
}

impl FrequencyMap {
    /// Count every token. Total over any finite input; empty in, empty out.
    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut counts: HashMap<String, u32> = HashMap::new();
        for token in tokens {
            *counts.entry(token.into()).or_insert(0) += 1;
        }
        Self { counts }
    }

    pub fn get(&self, word: &str) -> Option<u32> {
        self.counts.get(word).copied()
    }

    /// Number of distinct words.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts; equals the length of the counted sequence.
    pub fn total(&self) -> u64 {
        self.counts.values().map(|&c| u64::from(c)).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.counts.iter().map(|(w, &c)| (w.as_str(), c))
    }

    /// All entries, count descending, ties broken alphabetically.
    pub fn ranked(&self) -> Vec<WordFrequency> {
        let mut v: Vec<WordFrequency> = self
            .counts
            .iter()
            .map(|(w, &c)| WordFrequency::new(w.clone(), c))
            .collect();
        v.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.word.cmp(&b.word)));
        v
    }

    /// First `n` entries of [`ranked`](Self::ranked).
    pub fn top(&self, n: usize) -> Vec<WordFrequency> {
        let mut v = self.ranked();
        v.truncate(n);
        v
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.ranked())?)
    }

    /// Save the ranked list as a JSON array of `{ word, count }`.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }
}
