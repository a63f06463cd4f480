use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid number: '{0}'")]
    InvalidNumber(String),

    #[error("Need at least 2 numbers to guess from, got {0}")]
    SequenceTooShort(usize),

    #[error("No sample sequence with letter '{0}'")]
    UnknownSample(char),

    #[error("{0}")]
    UnknownOperator(String),

    #[error("Invalid profile: {0}")]
    InvalidProfile(String),

    #[error("Failed to read profile file {path}: {source}")]
    ProfileFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse profile file: {0}")]
    ProfileParse(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
