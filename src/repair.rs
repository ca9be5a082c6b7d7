//! Dictionary validation with split-word repair and optional autocorrect.
//!
//! Tokenization can break one word in two (`un believable`). A word that
//! fails the dictionary is held as a half word; the next failing word is
//! first tried glued to it. The half word survives line boundaries, so the
//! whole run must go through one `RepairState`, in order.

use tracing::debug;

use crate::config::PipelineConfig;
use crate::dictionary::{DictionaryOracle, SuggestionOracle};

/// Pending half word carried from one validation to the next.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CarryState {
    half_word: String,
    line: usize,
}

impl CarryState {
    pub fn value(&self) -> &str {
        &self.half_word
    }

    /// Line on which the pending half word was seen.
    pub fn line(&self) -> usize {
        self.line
    }

    pub fn is_empty(&self) -> bool {
        self.half_word.is_empty()
    }

    fn set(&mut self, word: &str, line: usize) {
        self.half_word.clear();
        self.half_word.push_str(word);
        self.line = line;
    }

    fn clear(&mut self) {
        self.half_word.clear();
    }
}

/// Words that failed validation, in order. Append-only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RejectLedger {
    entries: Vec<String>,
}

impl RejectLedger {
    fn push(&mut self, word: String) {
        self.entries.push(word);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Entries appended after the ledger had `mark` entries.
    pub fn since(&self, mark: usize) -> &[String] {
        self.entries.get(mark..).unwrap_or(&[])
    }
}

/// Mutable state of dictionary validation for one run.
#[derive(Debug, Clone, Default)]
pub struct RepairState {
    pub carry: CarryState,
    pub ledger: RejectLedger,
    line: usize,
}

impl RepairState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the current line number for carry diagnostics.
    pub fn set_line(&mut self, line: usize) {
        self.line = line;
    }
}

/// Oracles consulted by `repair`.
#[derive(Clone, Copy)]
pub struct Oracles<'a> {
    pub dictionary: &'a dyn DictionaryOracle,
    pub suggester: Option<&'a dyn SuggestionOracle>,
}

fn spelled(oracle: &dyn DictionaryOracle, word: &str) -> bool {
    oracle.spell(&word.to_uppercase())
}

/// Validate `word`, returning the word to emit or `None` to drop it.
///
/// Accepted words leave the carry untouched. A rejected word becomes the
/// new half word; the glued form `half word + word` is what the ledger
/// records.
pub fn repair(
    word: &str,
    config: &PipelineConfig,
    oracles: Oracles<'_>,
    state: &mut RepairState,
) -> Option<String> {
    let len = word.chars().count();

    if config.drop_short && len < 3 {
        return None;
    }

    if len > 2 && spelled(oracles.dictionary, word) {
        return Some(word.to_string());
    }

    let candidate = format!("{}{}", state.carry.value(), word);
    if config.allow_merge && spelled(oracles.dictionary, &candidate) {
        debug!(
            half_word = state.carry.value(),
            since_line = state.carry.line(),
            merged = %candidate,
            "Repaired split word"
        );
        state.carry.clear();
        return Some(candidate);
    }

    state.carry.set(word, state.line);

    if let (Some(autocorrect), Some(suggester)) = (config.autocorrect, oracles.suggester) {
        if len >= autocorrect.min_len {
            if let Some(suggestion) = suggester.suggest(word) {
                if suggestion.confidence > autocorrect.threshold() {
                    debug!(
                        word,
                        corrected = %suggestion.candidate,
                        confidence = suggestion.confidence,
                        "Autocorrected word"
                    );
                    state.carry.clear();
                    return Some(suggestion.candidate);
                }
            }
        }
    }

    debug!(rejected = %candidate, "Word failed dictionary validation");
    state.ledger.push(candidate);
    None
}
