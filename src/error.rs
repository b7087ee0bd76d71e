//! error type shared by the codec, config and editor

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// a component `type` outside the known device classes
    #[error("unknown component type: {0}")]
    UnknownVariant(String),
    /// a required field is missing or has the wrong shape
    #[error("malformed document: {0}")]
    MalformedDocument(String),
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid configuration: {0}")]
    Config(String),
    /// a bad line in a replay script
    #[error("script line {line}: {message}")]
    Script { line: usize, message: String },
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::MalformedDocument(e.to_string())
    }
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
