//! Report error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading result files or writing reports.
#[derive(Debug, Error)]
pub enum Error {
    /// Reading or writing a file failed.
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        /// File involved.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// A `.json` file did not parse.
    #[error("Invalid JSON in {}: {source}", .path.display())]
    Json {
        /// File involved.
        path: PathBuf,
        /// Parser error.
        #[source]
        source: serde_json::Error,
    },

    /// One line of a `.jsonl` file did not parse.
    #[error("Invalid JSON in {} at line {line}: {source}", .path.display())]
    JsonLine {
        /// File involved.
        path: PathBuf,
        /// 1-based line number.
        line: usize,
        /// Parser error.
        #[source]
        source: serde_json::Error,
    },

    /// Serializing report output failed.
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Writing CSV failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Building a source from loaded data failed.
    #[error(transparent)]
    Source(#[from] llm_leaderboard_core::Error),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for report operations.
pub type Result<T> = std::result::Result<T, Error>;
