//! Stopword filtering
//!
//! Membership is exact and case-sensitive; lowercase the input (`-l`) to
//! match a lowercase list against mixed-case text.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};

/// A set of stopwords, immutable once loading is done
#[derive(Debug, Clone, Default)]
pub struct StopwordSet {
    words: HashSet<String>,
}

impl StopwordSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a stopword set from a custom list
    pub fn from_list(words: &[&str]) -> Self {
        Self {
            words: words.iter().map(|w| w.to_string()).collect(),
        }
    }

    /// Merge one-stopword-per-line content into the set
    pub fn extend_from_str(&mut self, content: &str) {
        self.words.extend(
            content
                .lines()
                .map(str::trim_end)
                .filter(|line| !line.is_empty())
                .map(str::to_string),
        );
    }

    /// Merge a stopword file into the set
    pub fn extend_from_file(&mut self, path: &Path) -> Result<()> {
        let content = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        self.extend_from_str(&content);
        Ok(())
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
