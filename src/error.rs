//! Error types for corpus-index.

use std::io;
use thiserror::Error;

/// Structured error types for indexing operations.
#[derive(Error, Debug)]
pub enum IndexError {
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("input does not exist: {path}")]
    InputMissing { path: String },

    #[error("expected a directory: {path}")]
    NotADirectory { path: String },

    #[error("I/O at {path}: {message}")]
    Io {
        path: String,
        message: String,
        #[source]
        source: io::Error,
    },

    #[error("corrupt partition record at {path}:{line}: {message}")]
    CorruptPartition {
        path: String,
        line: u64,
        message: String,
    },

    #[error("indexing worker panicked")]
    WorkerPanic,
}

impl IndexError {
    /// Wraps an `io::Error` with the path it occurred at.
    pub fn io(path: impl Into<String>, message: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            message: message.into(),
            source,
        }
    }
}
