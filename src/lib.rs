//! Line-oriented text cleaning for corpus preparation.
//!
//! Each line is prepared (case folding, emoji tags or ASCII filtering),
//! classified into plain words and special tokens (urls, emails, dates,
//! contractions, ...), passed through a per-token filter chain and written
//! out. Dictionary validation keeps a half word across tokens and lines so
//! words broken by tokenization can be glued back together.

pub mod classifier;
pub mod cli;
pub mod config;
pub mod corpus;
pub mod dictionary;
pub mod emoji;
pub mod error;
pub mod filters;
pub mod output;
pub mod patterns;
pub mod pipeline;
pub mod preprocess;
pub mod repair;
pub mod resources;
pub mod stopwords;

#[cfg(feature = "python")]
mod python;

pub use classifier::{Category, Token, TokenKind, classify};
pub use config::{Autocorrect, PipelineConfig, TokenMode};
pub use dictionary::{DictionaryOracle, HunspellDictionary, Suggestion, SuggestionOracle, WordListSuggester};
pub use emoji::EmojiTable;
pub use error::{Error, Result};
pub use filters::FilterChain;
pub use output::{MinSize, OutputAssembler};
pub use pipeline::{Cleaner, RunStats};
pub use repair::{CarryState, Oracles, RejectLedger, RepairState, repair};
pub use resources::{ResourceOptions, Resources};
pub use stopwords::StopwordSet;
