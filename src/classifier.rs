//! Pattern classifier: segments a prepared line into plain words and
//! special tokens using a ranked alternation of category patterns.

use std::fmt;

use crate::config::TokenMode;
use crate::patterns::{self, Alternation};

/// Sentinel shown in front of special tokens in their encoded form.
pub const SPECIAL_MARKER: char = '*';

/// Syntactic category of a special token, in precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Emoji,
    Url,
    Email,
    Phone,
    Price,
    Date,
    Time,
    Hashtag,
    Username,
    Apostrophe,
    Hyphen,
    Punctuation,
}

impl Category {
    pub const ALL: [Category; 12] = [
        Category::Emoji,
        Category::Url,
        Category::Email,
        Category::Phone,
        Category::Price,
        Category::Date,
        Category::Time,
        Category::Hashtag,
        Category::Username,
        Category::Apostrophe,
        Category::Hyphen,
        Category::Punctuation,
    ];

    pub const TAGGABLE: [Category; 6] = [
        Category::Url,
        Category::Email,
        Category::Phone,
        Category::Price,
        Category::Date,
        Category::Time,
    ];

    pub const MARKED: [Category; 6] = [
        Category::Emoji,
        Category::Hashtag,
        Category::Username,
        Category::Apostrophe,
        Category::Hyphen,
        Category::Punctuation,
    ];

    pub fn pattern(self) -> &'static str {
        match self {
            Category::Emoji => patterns::EMOJI_TAG,
            Category::Url => patterns::URL,
            Category::Email => patterns::EMAIL,
            Category::Phone => patterns::PHONE,
            Category::Price => patterns::PRICE,
            Category::Date => patterns::DATE,
            Category::Time => patterns::TIME,
            Category::Hashtag => patterns::HASHTAG,
            Category::Username => patterns::USERNAME,
            Category::Apostrophe => patterns::APOSTROPHE,
            Category::Hyphen => patterns::HYPHEN,
            Category::Punctuation => patterns::PUNCT,
        }
    }

    pub(crate) fn group_name(self) -> &'static str {
        match self {
            Category::Emoji => "emoji",
            Category::Url => "url",
            Category::Email => "email",
            Category::Phone => "phone",
            Category::Price => "price",
            Category::Date => "date",
            Category::Time => "time",
            Category::Hashtag => "hashtag",
            Category::Username => "username",
            Category::Apostrophe => "apostrophe",
            Category::Hyphen => "hyphen",
            Category::Punctuation => "punct",
        }
    }

    /// Replacement text used in tag mode.
    pub fn tag(self) -> Option<&'static str> {
        match self {
            Category::Url => Some("*url"),
            Category::Email => Some("*emailaddress"),
            Category::Phone => Some("*phonenumber"),
            Category::Price => Some("*price"),
            Category::Date => Some("*date"),
            Category::Time => Some("*time"),
            _ => None,
        }
    }

    /// Tagged and emoji tokens are emitted verbatim.
    pub fn bypasses_filters(self) -> bool {
        matches!(
            self,
            Category::Emoji
                | Category::Url
                | Category::Email
                | Category::Phone
                | Category::Price
                | Category::Date
                | Category::Time
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    PlainWord,
    Special(Category),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
}

impl Token {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            kind: TokenKind::PlainWord,
            text: text.into(),
        }
    }

    pub fn special(category: Category, text: impl Into<String>) -> Self {
        Self {
            kind: TokenKind::Special(category),
            text: text.into(),
        }
    }

    pub fn category(&self) -> Option<Category> {
        match self.kind {
            TokenKind::Special(c) => Some(c),
            TokenKind::PlainWord => None,
        }
    }

    pub fn is_special(&self) -> bool {
        self.category().is_some()
    }
}

/// Length of a token's text as seen by the size checks: special tokens count
/// their marker.
pub fn encoded_len(kind: TokenKind, text: &str) -> usize {
    let len = text.chars().count();
    match kind {
        TokenKind::Special(_) => len + SPECIAL_MARKER.len_utf8(),
        TokenKind::PlainWord => len,
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_special() {
            write!(f, "{}{}", SPECIAL_MARKER, self.text)
        } else {
            f.write_str(&self.text)
        }
    }
}

#[derive(Debug)]
enum Segment {
    Text(String),
    Matched(Category, String),
}

/// Split `text` into unmatched runs and category matches.
fn segment(alternation: &Alternation, text: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut last = 0;
    for caps in alternation.regex().captures_iter(text) {
        let Some(whole) = caps.get(0) else { continue };
        let Some(category) = alternation.category_of(&caps) else {
            continue;
        };
        if whole.start() > last {
            segments.push(Segment::Text(text[last..whole.start()].to_string()));
        }
        segments.push(Segment::Matched(category, whole.as_str().to_string()));
        last = whole.end();
    }
    if last < text.len() {
        segments.push(Segment::Text(text[last..].to_string()));
    }
    segments
}

/// Re-segment every unmatched run, leaving earlier matches untouched.
fn refine(segments: Vec<Segment>, mut split: impl FnMut(&str) -> Vec<Segment>) -> Vec<Segment> {
    segments
        .into_iter()
        .flat_map(|seg| match seg {
            Segment::Text(text) => split(&text),
            matched => vec![matched],
        })
        .collect()
}

/// Replace every match of one taggable category by its tag.
fn substitute_tag(category: Category, text: &str) -> Vec<Segment> {
    let (Some(regex), Some(tag)) = (patterns::single(category), category.tag()) else {
        return vec![Segment::Text(text.to_string())];
    };
    let mut segments = Vec::new();
    let mut last = 0;
    for m in regex.find_iter(text) {
        if m.start() > last {
            segments.push(Segment::Text(text[last..m.start()].to_string()));
        }
        segments.push(Segment::Matched(category, tag.to_string()));
        last = m.end();
    }
    if last < text.len() {
        segments.push(Segment::Text(text[last..].to_string()));
    }
    segments
}

/// Turn segments into whitespace-split tokens. A match that spans
/// whitespace keeps its category on the first piece only.
fn into_tokens(segments: Vec<Segment>) -> Vec<Token> {
    let mut tokens = Vec::new();
    for seg in segments {
        match seg {
            Segment::Text(text) => {
                tokens.extend(text.split_whitespace().map(Token::plain));
            }
            Segment::Matched(category, text) => {
                let mut pieces = text.split_whitespace();
                if let Some(first) = pieces.next() {
                    tokens.push(Token::special(category, first));
                }
                tokens.extend(pieces.map(Token::plain));
            }
        }
    }
    tokens
}

/// Classify a prepared line into an ordered token sequence.
pub fn classify(line: &str, mode: TokenMode) -> Vec<Token> {
    let segments = match mode {
        TokenMode::Inline => segment(&patterns::INLINE, line),
        TokenMode::Tag => {
            let mut segments = vec![Segment::Text(line.to_string())];
            for category in Category::TAGGABLE {
                segments = refine(segments, |text| substitute_tag(category, text));
            }
            refine(segments, |text| segment(&patterns::MARKED, text))
        }
        TokenMode::NoTag => {
            let stripped = patterns::TAGGABLE.regex().replace_all(line, "");
            segment(&patterns::MARKED, &stripped)
        }
    };
    into_tokens(segments)
}
