//! Run configuration.

/// Autocorrect settings: suggestions are accepted only when their confidence
/// is strictly above `threshold_pct / 100`, and only for words of at least
/// `min_len` characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Autocorrect {
    pub threshold_pct: u32,
    pub min_len: usize,
}

impl Autocorrect {
    pub fn threshold(&self) -> f64 {
        f64::from(self.threshold_pct) / 100.0
    }
}

/// How the six taggable categories (url, email, phone, price, date, time)
/// are rendered by the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenMode {
    /// Every category is kept inline as a special token.
    Inline,
    /// Taggable categories become fixed tags such as `*url`.
    Tag,
    /// Taggable categories are deleted.
    NoTag,
}

/// Immutable options for one cleaning run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    pub lowercase: bool,
    pub strip_digits: bool,
    pub strip_punct: bool,
    pub strip_roman: bool,
    pub strip_stopwords: bool,
    pub strip_nondict: bool,
    pub tweet_mode: bool,
    pub tag_mode: bool,
    pub no_tag_mode: bool,
    pub no_usernames: bool,
    pub maintain_newlines: bool,
    pub min_size: usize,
    pub emit_rejects_only: bool,
    pub autocorrect: Option<Autocorrect>,
    pub allow_merge: bool,
    pub drop_short: bool,
}

pub const DEFAULT_MIN_SIZE: usize = 2;

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            lowercase: false,
            strip_digits: false,
            strip_punct: false,
            strip_roman: false,
            strip_stopwords: false,
            strip_nondict: false,
            tweet_mode: false,
            tag_mode: false,
            no_tag_mode: false,
            no_usernames: false,
            maintain_newlines: false,
            min_size: DEFAULT_MIN_SIZE,
            emit_rejects_only: false,
            autocorrect: None,
            allow_merge: false,
            drop_short: false,
        }
    }
}

impl PipelineConfig {
    /// Tag mode wins when both tag flags are set.
    pub fn token_mode(&self) -> TokenMode {
        if self.tag_mode {
            TokenMode::Tag
        } else if self.no_tag_mode {
            TokenMode::NoTag
        } else {
            TokenMode::Inline
        }
    }
}
