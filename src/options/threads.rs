//! Tokenizer worker count configuration.

use core::fmt::{self, Display, Formatter};
use std::thread;

/// Worker count used when hardware parallelism cannot be determined.
const FALLBACK_THREADS: usize = 4;

/// Tokenizer worker count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Threads {
    /// One worker per available core.
    All,

    /// A specific number of workers.
    Count(u16),
}

impl Threads {
    /// The actual number of workers that will be spawned.
    pub fn count(self) -> usize {
        match self {
            Self::All => thread::available_parallelism()
                .map(std::num::NonZero::get)
                .unwrap_or(FALLBACK_THREADS),
            Self::Count(n) => usize::from(n).max(1),
        }
    }
}

impl Default for Threads {
    fn default() -> Self {
        Self::All
    }
}

impl Display for Threads {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.count())
    }
}

impl From<u16> for Threads {
    fn from(count: u16) -> Self {
        Self::Count(count)
    }
}
