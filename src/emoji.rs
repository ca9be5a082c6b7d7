//! Emoji table and grapheme-level emoji replacement.
//!
//! Table keys are the codepoints of one grapheme cluster written as
//! `U+XXXX` and joined by single spaces, e.g. `U+1F44D U+1F3FD`.

use std::collections::{HashMap, HashSet};

use unicode_segmentation::UnicodeSegmentation;

use crate::error::{Error, Result};

pub const EMOJI_TAG_PREFIX: &str = "*Emoji";

#[derive(Debug, Clone, Default)]
pub struct EmojiTable {
    tags: HashMap<String, String>,
}

impl EmojiTable {
    /// Parse `key,<unused>,description[,...]` lines.
    pub fn from_csv_str(content: &str) -> Result<Self> {
        let mut tags = HashMap::new();
        for (idx, line) in content.lines().enumerate() {
            let line = line.trim_end();
            if line.is_empty() {
                continue;
            }
            let fields: Vec<&str> = line.split(',').collect();
            if fields.len() < 3 {
                return Err(Error::EmojiTable {
                    line: idx + 1,
                    content: line.to_string(),
                });
            }
            tags.insert(fields[0].to_string(), tag_from_description(fields[2]));
        }
        Ok(Self { tags })
    }

    pub fn insert(&mut self, key: impl Into<String>, tag: impl Into<String>) {
        self.tags.insert(key.into(), tag.into());
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn lookup(&self, grapheme: &str) -> Option<&str> {
        self.tags.get(&codepoint_key(grapheme)).map(String::as_str)
    }

    /// Replace every emoji grapheme of `line` by its tag followed by a space.
    ///
    /// Replacement is substring based: if a matched cluster also occurs
    /// inside a longer cluster elsewhere in the line, that occurrence is
    /// rewritten too.
    pub fn normalize(&self, line: &str) -> String {
        if self.is_empty() {
            return line.to_string();
        }
        let mut text = line.to_string();
        let mut seen = HashSet::new();
        for grapheme in line.graphemes(true) {
            if !seen.insert(grapheme) {
                continue;
            }
            if let Some(tag) = self.lookup(grapheme) {
                text = text.replace(grapheme, &format!("{tag} "));
            }
        }
        text
    }
}

/// `U+XXXX` key of a grapheme cluster.
pub fn codepoint_key(grapheme: &str) -> String {
    grapheme
        .chars()
        .map(|c| format!("U+{:X}", c as u32))
        .collect::<Vec<_>>()
        .join(" ")
}

/// `"grinning face: smiling eyes"` becomes `*EmojiGrinningFaceSmilingEyes`.
pub fn tag_from_description(description: &str) -> String {
    let cleaned: String = description
        .chars()
        .filter(|c| !c.is_ascii_punctuation())
        .collect();
    let mut tag = String::from(EMOJI_TAG_PREFIX);
    for word in cleaned.split(' ') {
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            tag.extend(first.to_uppercase());
            tag.push_str(&chars.as_str().to_lowercase());
        }
    }
    tag
}
