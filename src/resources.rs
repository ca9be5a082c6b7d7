//! Loading of stopwords, dictionaries and the emoji table.
//!
//! Only what the configuration needs is loaded, and any failure is fatal:
//! the run must not start with a resource missing.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::config::PipelineConfig;
use crate::dictionary::{DictionaryOracle, HunspellDictionary, SuggestionOracle, WordListSuggester};
use crate::emoji::EmojiTable;
use crate::error::{Error, Result};
use crate::repair::Oracles;
use crate::stopwords::StopwordSet;

pub const STOPWORDS_FILE: &str = "stopwords.txt";
pub const DICTIONARY_NAME: &str = "en_US";
pub const EMOJI_FILE: &str = "emoji.csv";
pub const ADDITIONAL_DIR: &str = "additional";
pub const ADDITIONAL_DICTIONARIES: [&str; 2] = ["en_US-large.dic", "en_GB-large.dic"];

/// Where resources live and whether the additional lists are wanted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceOptions {
    pub dir: PathBuf,
    pub additional: bool,
}

/// Immutable collaborators of a cleaning run.
#[derive(Default)]
pub struct Resources {
    pub stopwords: StopwordSet,
    pub dictionary: Option<Box<dyn DictionaryOracle>>,
    pub suggester: Option<Box<dyn SuggestionOracle>>,
    pub emojis: EmojiTable,
}

impl Resources {
    pub fn load(config: &PipelineConfig, options: &ResourceOptions) -> Result<Self> {
        let mut resources = Resources::default();

        if config.strip_stopwords {
            resources.stopwords = load_stopwords(options)?;
        }

        if config.strip_nondict {
            let dictionary = load_dictionary(options)?;
            if config.autocorrect.is_some() {
                let suggester = WordListSuggester::new(dictionary.vocabulary());
                info!(candidates = suggester.len(), "Loaded suggestion vocabulary");
                resources.suggester = Some(Box::new(suggester));
            }
            resources.dictionary = Some(Box::new(dictionary));
        } else if config.autocorrect.is_some() {
            warn!("Autocorrect has no effect without dictionary validation (-d)");
        }

        if config.tweet_mode {
            resources.emojis = load_emojis(&options.dir)?;
        }

        Ok(resources)
    }

    /// Oracles for dictionary validation, if a dictionary is loaded.
    pub fn oracles(&self) -> Option<Oracles<'_>> {
        self.dictionary.as_deref().map(|dictionary| Oracles {
            dictionary,
            suggester: self.suggester.as_deref(),
        })
    }
}

fn load_stopwords(options: &ResourceOptions) -> Result<StopwordSet> {
    let mut stopwords = StopwordSet::new();
    stopwords.extend_from_file(&options.dir.join(STOPWORDS_FILE))?;

    if options.additional {
        for path in additional_stopword_files(&options.dir.join(ADDITIONAL_DIR))? {
            stopwords.extend_from_file(&path)?;
        }
    }

    info!(count = stopwords.len(), "Loaded stopwords");
    Ok(stopwords)
}

/// `*.txt` files of the additional directory, sorted by name.
fn additional_stopword_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir).map_err(|e| Error::io(dir, e))?;
    let mut files = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| Error::io(dir, e))?.path();
        let is_txt = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.contains(".txt"));
        if is_txt && path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn load_dictionary(options: &ResourceOptions) -> Result<HunspellDictionary> {
    let mut dictionary = HunspellDictionary::load(&options.dir, DICTIONARY_NAME)?;
    if options.additional {
        let additional = options.dir.join(ADDITIONAL_DIR);
        let paths = ADDITIONAL_DICTIONARIES.map(|name| additional.join(name));
        dictionary.add_word_lists(&paths)?;
    }
    info!("{}", dictionary.stats());
    Ok(dictionary)
}

fn load_emojis(dir: &Path) -> Result<EmojiTable> {
    let path = dir.join(EMOJI_FILE);
    let content = fs::read_to_string(&path).map_err(|e| Error::io(&path, e))?;
    let table = EmojiTable::from_csv_str(&content)?;
    info!(entries = table.len(), "Loaded emoji table");
    Ok(table)
}
