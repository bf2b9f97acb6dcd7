use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PratacError {
    #[error("could not read configuration {}: {source}", .path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed configuration {}: {source}", .path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("could not write configuration {}: {source}", .path.display())]
    ConfigWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid start date '{value}' (expected YYYY-MM-DD): {source}")]
    InvalidDate {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("name or alias '{key}' is used by both {first} and {second}")]
    DuplicateKey {
        key: String,
        first: String,
        second: String,
    },

    #[error("week offset out of range: {0}")]
    WeekOutOfRange(String),

    #[error("unknown person '{0}'")]
    UnknownPerson(String),

    #[error("no cleaning areas configured")]
    NoAreas,

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("export to {} failed: {message}", .path.display())]
    Export { path: PathBuf, message: String },

    #[error("terminal i/o error: {0}")]
    Prompt(#[from] io::Error),
}

impl PratacError {
    /// True for the failures that come from reading the config file itself.
    pub fn is_config_parse(&self) -> bool {
        matches!(
            self,
            PratacError::ConfigParse { .. } | PratacError::ConfigRead { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, PratacError>;
