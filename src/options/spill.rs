//! Spill policy: memory ceiling, merge fan-in, and temp directory.

use core::fmt::{self, Display, Formatter};
use std::path::{Path, PathBuf};

use super::parse_env;

/// Default memory ceiling for word-frequency runs (distinct resident terms).
pub const DEFAULT_TALLY_MEMORY_TERMS: usize = 1_000_000;

/// Default memory ceiling for inverted-index runs.
pub const DEFAULT_INVERT_MEMORY_TERMS: usize = 5_000_000;

/// Default number of partition files merged in a single pass.
pub const DEFAULT_FAN_IN: usize = 10;

const ENV_FAN_IN: &str = "CORPUS_INDEX_FAN_IN";

/// When and where the global index spills to disk.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Spill {
    max_memory_terms: usize,
    fan_in: usize,
    temp_dir: Option<PathBuf>,
}

impl Default for Spill {
    fn default() -> Self {
        Self {
            max_memory_terms: DEFAULT_TALLY_MEMORY_TERMS,
            fan_in: parse_env(ENV_FAN_IN, DEFAULT_FAN_IN).max(2),
            temp_dir: None,
        }
    }
}

impl Spill {
    /// Set the maximum number of distinct terms resident in the global index
    /// (clamped to at least one).
    #[must_use]
    pub fn with_max_memory_terms(mut self, max_memory_terms: usize) -> Self {
        self.max_memory_terms = max_memory_terms.max(1);
        self
    }

    /// Set the merge fan-in (clamped to at least two).
    #[must_use]
    pub fn with_fan_in(mut self, fan_in: usize) -> Self {
        self.fan_in = fan_in.max(2);
        self
    }

    /// Set the directory partition files are written under. Defaults to a
    /// fresh directory beneath the OS temp directory.
    #[must_use]
    pub fn with_temp_dir(mut self, temp_dir: impl Into<PathBuf>) -> Self {
        self.temp_dir = Some(temp_dir.into());
        self
    }

    /// Ceiling on distinct terms resident in memory.
    #[must_use]
    pub const fn max_memory_terms(&self) -> usize {
        self.max_memory_terms
    }

    /// Maximum partition files merged in one pass.
    #[must_use]
    pub const fn fan_in(&self) -> usize {
        self.fan_in
    }

    /// Configured parent for the partition directory, if any.
    #[must_use]
    pub fn temp_dir(&self) -> Option<&Path> {
        self.temp_dir.as_deref()
    }
}

impl Display for Spill {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{ max_memory_terms: {}, fan_in: {} }}",
            self.max_memory_terms, self.fan_in
        )
    }
}
