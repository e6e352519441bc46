use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Error, Debug)]
pub enum OracleError {
    #[error("cannot read word vectors: {0}")]
    Io(#[from] io::Error),

    #[error("line {line}: {reason}")]
    Malformed { line: usize, reason: String },

    #[error("line {line}: expected {expected} dimensions, found {found}")]
    DimensionMismatch {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("no word vectors found")]
    Empty,
}

#[derive(Error, Debug)]
pub enum HighScoreError {
    #[error("high score file error: {0}")]
    Io(#[from] io::Error),

    #[error("high score file is corrupt: {0:?}")]
    Parse(String),
}

/// Reasons a typed word does not steer the ship.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SteerError {
    #[error("nothing typed")]
    EmptyInput,

    #[error("unknown word: {0}")]
    UnknownWord(String),

    #[error("no similarity between {from} and {to}")]
    UnknownPair { from: String, to: String },
}
