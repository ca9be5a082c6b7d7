use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to build dictionary {name}: {message}")]
    Dictionary { name: String, message: String },

    #[error("malformed emoji table entry on line {line}: {content:?}")]
    EmojiTable { line: usize, content: String },

    #[error("{0} is required by the configuration but was not loaded")]
    MissingResource(&'static str),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}
