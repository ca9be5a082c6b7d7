//! Pre-compiled token category patterns.
//!
//! Each category has one raw pattern. The classifier never runs them one by
//! one over a line (except in tag mode, where the taggable categories are
//! substituted in sequence); it combines them into a single alternation so
//! that the leftmost match wins and, at equal start, the earlier category
//! wins. All inner groups are non-capturing so the only capture groups in a
//! combined pattern are the per-category named groups.

use lazy_static::lazy_static;
use regex::Regex;

use crate::classifier::Category;

// Tags inserted by the emoji normalizer ahead of classification.
pub const EMOJI_TAG: &str = r"\*Emoji\w+";

// Hosts after `http(s)://` either start with `www.` or do not start with
// `www` at all. The regex crate has no lookahead, so "not starting with www"
// is spelled out as: first char not `w`, or `w` then not `w`, or `ww` then
// not `w`.
pub const URL: &str = concat!(
    r"https?://(?:www\.[a-zA-Z0-9][a-zA-Z0-9-]+[a-zA-Z0-9]",
    r"|[a-vx-zA-Z0-9][a-zA-Z0-9-]+[a-zA-Z0-9]",
    r"|w[a-vx-zA-Z0-9-][a-zA-Z0-9-]*[a-zA-Z0-9]",
    r"|ww(?:[a-vx-zA-Z0-9-][a-zA-Z0-9-]*[a-zA-Z0-9]|[a-vx-zA-Z0-9]))\.[^\s]{2,}",
    r"|www\.[a-zA-Z0-9][a-zA-Z0-9-]+[a-zA-Z0-9]\.[^\s]{2,}",
    r"|https?://(?:www\.[a-zA-Z0-9]+",
    r"|[a-vx-zA-Z0-9][a-zA-Z0-9]*",
    r"|ww?(?:[a-vx-zA-Z0-9][a-zA-Z0-9]*)?)\.[^\s]{2,}",
    r"|www\.[a-zA-Z0-9]+\.[^\s]{2,}",
);
pub const EMAIL: &str = r"\b[a-z0-9._%+-]+@[a-z0-9.-]+\.[a-z]{2,4}\b";
pub const PHONE: &str = r"(?:[0-9](?: |-)?)?(?:\(?[0-9]{3}\)?|[0-9]{3})(?: |-)?(?:[0-9]{3}(?: |-)?[0-9]{4}|[a-zA-Z0-9]{7})";
pub const PRICE: &str = r"\$[0-9]+\.[0-9][0-9]";
pub const DATE: &str = r"\b(?:0[1-9]|[12][0-9]|3[01])[- /.](?:0[1-9]|1[012])[- /.](?:19|20)\d\d\b";
pub const TIME: &str = r"\b(?:[0-1]?[0-9]|2[0-3]):[0-5][0-9](?::[0-5][0-9])?\b";
pub const HASHTAG: &str = r"#+[\w_]+[\w'_\-]*[\w_]+";
pub const USERNAME: &str = r"@+[\w_]+[\w'_\-]*[\w_]+";
pub const APOSTROPHE: &str = r"\b[A-Za-z]+'[A-Za-z]+\b";
pub const HYPHEN: &str = r"\b[A-Za-z]+-[A-Za-z]+\b";
pub const PUNCT: &str = r#"[#!"$%&'()+,\-./:;<|=>?@\[\\\]^_`{}~]"#;

// Anchored; the empty string also matches and is rejected by `is_roman_numeral`.
const ROMAN: &str = r"(?i)^M*(?:C[MD]|D?C{0,3})(?:X[CL]|L?X{0,3})(?:I[XV]|V?I{0,3})$";

/// A ranked list of categories compiled into one leftmost-first alternation.
pub struct Alternation {
    regex: Regex,
    categories: &'static [Category],
}

impl Alternation {
    fn new(categories: &'static [Category]) -> Self {
        let pattern = categories
            .iter()
            .map(|c| format!("(?P<{}>{})", c.group_name(), c.pattern()))
            .collect::<Vec<_>>()
            .join("|");
        Self {
            regex: Regex::new(&pattern).unwrap(),
            categories,
        }
    }

    pub fn regex(&self) -> &Regex {
        &self.regex
    }

    /// Category of the alternative that produced `caps`.
    pub fn category_of(&self, caps: &regex::Captures) -> Option<Category> {
        self.categories
            .iter()
            .copied()
            .find(|c| caps.name(c.group_name()).is_some())
    }
}

lazy_static! {
    /// Every category, used in inline mode.
    pub static ref INLINE: Alternation = Alternation::new(&Category::ALL);

    /// Categories that stay marked in tag and no-tag mode.
    pub static ref MARKED: Alternation = Alternation::new(&Category::MARKED);

    /// Categories deleted in no-tag mode.
    pub static ref TAGGABLE: Alternation = Alternation::new(&Category::TAGGABLE);

    /// Text that must not be touched by the apostrophe/hyphen filters.
    pub static ref PROTECTED: Regex = Regex::new(&format!("{}|{}|{}", URL, USERNAME, EMAIL)).unwrap();

    pub static ref USERNAME_PATTERN: Regex = Regex::new(USERNAME).unwrap();

    static ref ROMAN_PATTERN: Regex = Regex::new(ROMAN).unwrap();

    static ref SINGLE: Vec<(Category, Regex)> = Category::TAGGABLE
        .iter()
        .map(|c| (*c, Regex::new(c.pattern()).unwrap()))
        .collect();
}

/// Stand-alone pattern for one taggable category (tag mode substitutes them
/// in sequence).
pub fn single(category: Category) -> Option<&'static Regex> {
    SINGLE
        .iter()
        .find(|(c, _)| *c == category)
        .map(|(_, regex)| regex)
}

/// Whole-token roman numeral test, case-insensitive.
pub fn is_roman_numeral(word: &str) -> bool {
    !word.is_empty() && ROMAN_PATTERN.is_match(word)
}
