//! Dictionary and spelling-suggestion oracles for word validation.
//!
//! The base dictionary is a Hunspell `.aff`/`.dic` pair loaded through
//! zspell. Additional `.dic` files are merged into it, so their entries get
//! the same affix rules as the base list.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use strsim::normalized_levenshtein;
use tracing::info;
use zspell::Dictionary;

use crate::error::{Error, Result};

/// Answers dictionary-membership queries.
pub trait DictionaryOracle {
    fn spell(&self, word: &str) -> bool;
}

/// Best replacement for a misspelled word and how confident the oracle is
/// in it, in `[0, 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Suggestion {
    pub candidate: String,
    pub confidence: f64,
}

/// Answers spelling-suggestion queries.
pub trait SuggestionOracle {
    fn suggest(&self, word: &str) -> Option<Suggestion>;
}

impl DictionaryOracle for HashSet<String> {
    fn spell(&self, word: &str) -> bool {
        self.contains(word)
    }
}

/// Hunspell dictionary; extra word lists share the base affix rules
pub struct HunspellDictionary {
    name: String,
    aff: String,
    entries: Vec<String>,
    base: Dictionary,
    known: HashSet<String>,
    vocabulary: Vec<String>,
    extra_entries: usize,
}

impl HunspellDictionary {
    /// Load `<name>.aff`/`<name>.dic` from `dict_dir`
    pub fn load(dict_dir: &Path, name: &str) -> Result<Self> {
        let aff_path = dict_dir.join(format!("{}.aff", name));
        let dic_path = dict_dir.join(format!("{}.dic", name));

        let aff_content = fs::read_to_string(&aff_path).map_err(|e| Error::io(&aff_path, e))?;
        let dic_content = fs::read_to_string(&dic_path).map_err(|e| Error::io(&dic_path, e))?;

        let dict = Self::from_strs(name, &aff_content, &dic_content)?;
        info!(dictionary = name, stems = dict.vocabulary.len(), "Loaded dictionary");
        Ok(dict)
    }

    /// Build from in-memory affix and dictionary contents
    pub fn from_strs(name: &str, aff_content: &str, dic_content: &str) -> Result<Self> {
        let entries: Vec<String> = dic_entries(dic_content).map(str::to_string).collect();
        let base = build(name, aff_content, &entries)?;

        let mut dict = Self {
            name: name.to_string(),
            aff: aff_content.to_string(),
            entries,
            base,
            known: HashSet::new(),
            vocabulary: Vec::new(),
            extra_entries: 0,
        };
        dict.learn_words(dic_content);
        Ok(dict)
    }

    /// Merge extra `.dic` files, flags included, and rebuild once
    pub fn add_word_lists<P: AsRef<Path>>(&mut self, paths: &[P]) -> Result<()> {
        for path in paths {
            let path = path.as_ref();
            let content = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
            let before = self.entries.len();
            self.entries.extend(dic_entries(&content).map(str::to_string));
            self.extra_entries += self.entries.len() - before;
            self.learn_words(&content);
            info!(
                path = %path.display(),
                entries = self.entries.len() - before,
                "Loaded additional word list"
            );
        }
        self.base = build(&self.name, &self.aff, &self.entries)?;
        Ok(())
    }

    fn learn_words(&mut self, dic_content: &str) {
        for word in parse_word_list(dic_content) {
            if self.known.insert(word.clone()) {
                self.vocabulary.push(word);
            }
        }
    }

    /// Words known to the dictionary (stems of every loaded list), used as
    /// the candidate pool for suggestions
    pub fn vocabulary(&self) -> &[String] {
        &self.vocabulary
    }

    /// Get stats about the loaded dictionary
    pub fn stats(&self) -> String {
        format!(
            "Dictionary loaded: entries={}, from extra lists={}, stems={}",
            self.entries.len(),
            self.extra_entries,
            self.vocabulary.len()
        )
    }
}

fn build(name: &str, aff: &str, entries: &[String]) -> Result<Dictionary> {
    let dic = format!("{}\n{}\n", entries.len(), entries.join("\n"));
    zspell::builder()
        .config_str(aff)
        .dict_str(&dic)
        .build()
        .map_err(|e| Error::Dictionary {
            name: name.to_string(),
            message: e.to_string(),
        })
}

/// `LONDON` becomes `London`
fn title_case(lower: &str) -> String {
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

impl DictionaryOracle for HunspellDictionary {
    fn spell(&self, word: &str) -> bool {
        // Try exact match first
        if self.base.check_word(word) {
            return true;
        }
        // Try lowercase
        let lower = word.to_lowercase();
        if lower != word && self.base.check_word(&lower) {
            return true;
        }
        // Capitalised entries such as proper names
        let title = title_case(&lower);
        title != word && title != lower && self.base.check_word(&title)
    }
}

/// Entry lines of a `.dic` file: no count header, comments or blanks
fn dic_entries(content: &str) -> impl Iterator<Item = &str> {
    content.lines().enumerate().filter_map(|(idx, line)| {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return None;
        }
        if idx == 0 && line.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
        Some(line)
    })
}

/// Bare words of a `.dic` file, `/FLAGS` and morphology stripped
fn parse_word_list(content: &str) -> impl Iterator<Item = String> + '_ {
    dic_entries(content).filter_map(|entry| {
        let entry = entry.split_whitespace().next()?;
        let word = entry.split_once('/').map_or(entry, |(w, _)| w);
        (!word.is_empty()).then(|| word.to_string())
    })
}

/// Maximum length difference between a word and a suggestion candidate
const MAX_LEN_DELTA: usize = 2;

/// Suggests the most similar word of a vocabulary by normalized
/// Levenshtein similarity
pub struct WordListSuggester {
    words: Vec<(String, usize)>,
}

impl WordListSuggester {
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let words = words
            .into_iter()
            .map(|w| w.as_ref().to_lowercase())
            .filter(|w| !w.is_empty() && seen.insert(w.clone()))
            .map(|w| {
                let len = w.chars().count();
                (w, len)
            })
            .collect();
        Self { words }
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl SuggestionOracle for WordListSuggester {
    fn suggest(&self, word: &str) -> Option<Suggestion> {
        let needle = word.to_lowercase();
        let needle_len = needle.chars().count();

        let mut best: Option<(&str, f64)> = None;
        for (candidate, len) in &self.words {
            if len.abs_diff(needle_len) > MAX_LEN_DELTA {
                continue;
            }
            if *candidate == needle {
                return Some(Suggestion {
                    candidate: candidate.clone(),
                    confidence: 1.0,
                });
            }
            let score = normalized_levenshtein(&needle, candidate);
            if best.is_none_or(|(_, s)| score > s) {
                best = Some((candidate, score));
            }
        }

        best.filter(|(_, score)| *score > 0.0)
            .map(|(candidate, confidence)| Suggestion {
                candidate: candidate.to_string(),
                confidence,
            })
    }
}
