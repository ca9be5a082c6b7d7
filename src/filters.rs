//! Per-token filter chain.
//!
//! Plain words go through punctuation, digit, roman numeral, stopword and
//! dictionary filters in that order. Special tokens are left alone except
//! apostrophe and hyphen words, which get a reduced chain. Every path ends
//! with the minimum size check; empty results are dropped there.

use crate::classifier::{Category, Token, TokenKind, encoded_len};
use crate::config::PipelineConfig;
use crate::output::MinSize;
use crate::patterns::{PROTECTED, is_roman_numeral};
use crate::repair::{Oracles, RepairState, repair};
use crate::stopwords::StopwordSet;

pub const ROMAN_NUMERAL_TAG: &str = "roman-numeral";

pub fn is_punctuation(c: char) -> bool {
    c.is_ascii_punctuation()
}

/// Punctuation removed from apostrophe and hyphen words: their joining
/// character survives.
pub fn is_inner_punctuation(c: char) -> bool {
    c.is_ascii_punctuation() && c != '\'' && c != '-'
}

pub fn is_digit(c: char) -> bool {
    c.is_ascii_digit()
}

pub fn strip_chars(word: &str, pred: impl Fn(char) -> bool) -> String {
    word.chars().filter(|c| !pred(*c)).collect()
}

pub struct FilterChain<'a> {
    config: &'a PipelineConfig,
    stopwords: &'a StopwordSet,
    oracles: Option<Oracles<'a>>,
    min_size: MinSize,
}

impl<'a> FilterChain<'a> {
    /// `oracles` is only consulted when non-dictionary stripping is on.
    pub fn new(
        config: &'a PipelineConfig,
        stopwords: &'a StopwordSet,
        oracles: Option<Oracles<'a>>,
    ) -> Self {
        Self {
            config,
            stopwords,
            oracles,
            min_size: MinSize(config.min_size),
        }
    }

    /// Filter one token; `None` means it is not emitted.
    pub fn apply(&self, token: &Token, state: &mut RepairState) -> Option<String> {
        match token.kind {
            TokenKind::PlainWord => self.plain_word(&token.text, state),
            TokenKind::Special(category) => self.special(category, &token.text, state),
        }
    }

    fn plain_word(&self, text: &str, state: &mut RepairState) -> Option<String> {
        let mut word = text.to_string();
        if self.config.strip_punct {
            word = strip_chars(&word, is_punctuation);
        }
        if self.config.strip_digits {
            word = strip_chars(&word, is_digit);
        }
        word = self.roman_numeral(word);
        word = self.stopword(word);
        let word = self.validate(word, state)?;

        self.min_size
            .admits(TokenKind::PlainWord, &word)
            .then_some(word)
    }

    fn special(&self, category: Category, text: &str, state: &mut RepairState) -> Option<String> {
        let kind = TokenKind::Special(category);
        // marker plus one character: a lone punctuation mark
        if self.config.strip_punct && encoded_len(kind, text) == 2 {
            return None;
        }

        let mut word = text.to_string();
        if matches!(category, Category::Apostrophe | Category::Hyphen) && !PROTECTED.is_match(text)
        {
            if self.config.strip_punct {
                word = strip_chars(&word, is_inner_punctuation);
            }
            if self.config.strip_digits {
                word = strip_chars(&word, is_digit);
            }
            word = self.stopword(word);
            word = self.validate(word, state)?;
        }

        self.min_size.admits(kind, &word).then_some(word)
    }

    fn roman_numeral(&self, word: String) -> String {
        if !is_roman_numeral(&word) {
            word
        } else if self.config.strip_roman {
            String::new()
        } else if self.config.tag_mode {
            ROMAN_NUMERAL_TAG.to_string()
        } else {
            word
        }
    }

    fn stopword(&self, word: String) -> String {
        if self.config.strip_stopwords && self.stopwords.contains(&word) {
            String::new()
        } else {
            word
        }
    }

    fn validate(&self, word: String, state: &mut RepairState) -> Option<String> {
        if !self.config.strip_nondict || word.is_empty() {
            return Some(word);
        }
        match self.oracles {
            Some(oracles) => repair(&word, self.config, oracles, state),
            None => Some(word),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn run(config: &PipelineConfig, tokens: &[Token]) -> Vec<String> {
        let stopwords = StopwordSet::from_list(&["the", "don't"]);
        let chain = FilterChain::new(config, &stopwords, None);
        let mut state = RepairState::new();
        tokens
            .iter()
            .filter_map(|t| chain.apply(t, &mut state))
            .collect()
    }

    #[test]
    fn test_strip_chars() {
        assert_eq!(strip_chars("a1b2,c!", is_digit), "ab,c!");
        assert_eq!(strip_chars("a1b2,c!", is_punctuation), "a1b2c");
        assert_eq!(strip_chars("o'neil-x.", is_inner_punctuation), "o'neil-x");
    }

    #[test]
    fn test_plain_word_order() {
        let config = PipelineConfig {
            strip_punct: true,
            strip_digits: true,
            strip_stopwords: true,
            ..PipelineConfig::default()
        };
        let tokens = [
            Token::plain("th.e"),
            Token::plain("r2d2"),
            Token::plain("4"),
            Token::plain("word"),
        ];
        assert_eq!(run(&config, &tokens), vec!["rd", "word"]);
    }

    #[test]
    fn test_roman_numeral_strip_and_tag() {
        let strip = PipelineConfig {
            strip_roman: true,
            tag_mode: true,
            ..PipelineConfig::default()
        };
        assert!(run(&strip, &[Token::plain("XII")]).is_empty());

        let tag = PipelineConfig {
            tag_mode: true,
            ..PipelineConfig::default()
        };
        assert_eq!(run(&tag, &[Token::plain("XII")]), vec!["roman-numeral"]);

        let neither = PipelineConfig::default();
        assert_eq!(run(&neither, &[Token::plain("XII")]), vec!["XII"]);
    }

    #[test]
    fn test_min_size_plain_versus_special() {
        let config = PipelineConfig {
            min_size: 2,
            ..PipelineConfig::default()
        };
        assert_eq!(run(&config, &[Token::plain("ab")]), vec!["ab"]);
        assert!(run(&config, &[Token::special(Category::Hashtag, "#")]).is_empty());
        assert_eq!(
            run(&config, &[Token::special(Category::Hashtag, "#a")]),
            vec!["#a"]
        );
    }

    #[test]
    fn test_single_char_special_dropped_with_punct_stripping() {
        let config = PipelineConfig {
            strip_punct: true,
            min_size: 0,
            ..PipelineConfig::default()
        };
        assert!(run(&config, &[Token::special(Category::Punctuation, "!")]).is_empty());

        let keep = PipelineConfig {
            min_size: 0,
            ..PipelineConfig::default()
        };
        assert_eq!(
            run(&keep, &[Token::special(Category::Punctuation, "!")]),
            vec!["!"]
        );
    }

    #[test]
    fn test_apostrophe_and_hyphen_words_filtered() {
        let config = PipelineConfig {
            strip_stopwords: true,
            strip_punct: true,
            ..PipelineConfig::default()
        };
        let tokens = [
            Token::special(Category::Apostrophe, "don't"),
            Token::special(Category::Apostrophe, "Smith's"),
            Token::special(Category::Hyphen, "co-op"),
        ];
        assert_eq!(run(&config, &tokens), vec!["Smith's", "co-op"]);
    }

    #[test]
    fn test_tagged_tokens_bypass_filters() {
        let config = PipelineConfig {
            strip_punct: true,
            strip_digits: true,
            strip_stopwords: true,
            ..PipelineConfig::default()
        };
        let tokens = [
            Token::special(Category::Url, "http://a-b.com/1"),
            Token::special(Category::Date, "*date"),
            Token::special(Category::Hashtag, "#the1"),
        ];
        assert_eq!(
            run(&config, &tokens),
            vec!["http://a-b.com/1", "*date", "#the1"]
        );
    }

    #[test]
    fn test_dictionary_validation_shares_carry_across_kinds() {
        let dict: HashSet<String> = ["CO-OPERATIVE".to_string()].into_iter().collect();
        let config = PipelineConfig {
            strip_nondict: true,
            allow_merge: true,
            ..PipelineConfig::default()
        };
        let stopwords = StopwordSet::new();
        let chain = FilterChain::new(
            &config,
            &stopwords,
            Some(Oracles {
                dictionary: &dict,
                suggester: None,
            }),
        );
        let mut state = RepairState::new();

        assert_eq!(
            chain.apply(&Token::special(Category::Hyphen, "co-op"), &mut state),
            None
        );
        assert_eq!(
            chain.apply(&Token::plain("erative"), &mut state).as_deref(),
            Some("co-operative")
        );
        assert!(state.carry.is_empty());
    }

    #[test]
    fn test_clean_tokens_are_a_fixed_point() {
        let dict: HashSet<String> = ["ALPHA", "BETA", "GAMMA"]
            .iter()
            .map(|w| w.to_string())
            .collect();
        let config = PipelineConfig {
            strip_punct: true,
            strip_digits: true,
            strip_roman: true,
            strip_stopwords: true,
            strip_nondict: true,
            allow_merge: true,
            ..PipelineConfig::default()
        };
        let stopwords = StopwordSet::from_list(&["the"]);
        let chain = FilterChain::new(
            &config,
            &stopwords,
            Some(Oracles {
                dictionary: &dict,
                suggester: None,
            }),
        );
        let mut state = RepairState::new();

        let words = ["alpha", "beta", "gamma"];
        let once: Vec<String> = words
            .iter()
            .filter_map(|w| chain.apply(&Token::plain(*w), &mut state))
            .collect();
        let twice: Vec<String> = once
            .iter()
            .filter_map(|w| chain.apply(&Token::plain(w.as_str()), &mut state))
            .collect();
        assert_eq!(once, words);
        assert_eq!(once, twice);
    }
}
