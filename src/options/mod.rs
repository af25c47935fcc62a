//! Configuration options for the indexing pipeline.
//!
//! The [`Options`] struct provides a builder API over three concerns:
//!
//! - [`Chunking`] - chunk size and work-queue capacity
//! - [`Spill`] - memory ceiling, merge fan-in, temp directory
//! - [`Threads`] - tokenizer worker count
//!
//! # Environment Variables
//!
//! - `CORPUS_INDEX_CHUNK_BYTES` (default: 104857600)
//! - `CORPUS_INDEX_QUEUE_CAPACITY` (default: 50)
//! - `CORPUS_INDEX_FAN_IN` (default: 10)

pub mod chunking;
pub mod spill;
pub mod threads;

use core::fmt::{self, Display, Formatter};
use std::str::FromStr;

pub use self::chunking::Chunking;
pub use self::spill::Spill;
pub use self::threads::Threads;

/// Unified configuration for indexing operations.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Options {
    /// Chunk size and queue capacity.
    chunking: Chunking,

    /// Spill policy (memory ceiling, fan-in, temp directory).
    spill: Spill,

    /// Tokenizer worker count.
    threads: Threads,

    /// Suppress the progress reporter.
    quiet: bool,
}

impl Options {
    /// Creates options from its component configurations.
    #[must_use]
    pub const fn new(chunking: Chunking, spill: Spill, threads: Threads) -> Self {
        Self {
            chunking,
            spill,
            threads,
            quiet: false,
        }
    }

    /// Set the chunking configuration.
    #[must_use]
    pub const fn with_chunking(mut self, chunking: Chunking) -> Self {
        self.chunking = chunking;
        self
    }

    /// Set the spill configuration.
    #[must_use]
    pub fn with_spill(mut self, spill: Spill) -> Self {
        self.spill = spill;
        self
    }

    /// Set the worker thread configuration.
    #[must_use]
    pub const fn with_threads(mut self, threads: Threads) -> Self {
        self.threads = threads;
        self
    }

    /// Suppress or enable the progress reporter.
    #[must_use]
    pub const fn with_quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    /// Get the chunking configuration.
    #[must_use]
    pub const fn chunking(&self) -> &Chunking {
        &self.chunking
    }

    /// Get the spill configuration.
    #[must_use]
    pub const fn spill(&self) -> &Spill {
        &self.spill
    }

    /// Get the worker thread configuration.
    #[must_use]
    pub const fn threads(&self) -> Threads {
        self.threads
    }

    /// Whether the progress reporter is suppressed.
    #[must_use]
    pub const fn quiet(&self) -> bool {
        self.quiet
    }
}

impl Display for Options {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Options {{ chunking: {}, spill: {}, threads: {} }}",
            self.chunking, self.spill, self.threads
        )
    }
}

/// Parse an environment variable, falling back to `default` when the
/// variable is unset or unparsable.
pub(crate) fn parse_env<T: FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}
