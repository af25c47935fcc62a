//! Chunk size and work-queue capacity.

use core::fmt::{self, Display, Formatter};

use super::parse_env;

/// Default chunk size in bytes (100 MiB, matching the CLI default).
pub const DEFAULT_CHUNK_SIZE: usize = 100 * 1024 * 1024;

/// Default bound on in-flight work items.
pub const DEFAULT_QUEUE_CAPACITY: usize = 50;

const ENV_CHUNK_BYTES: &str = "CORPUS_INDEX_CHUNK_BYTES";
const ENV_QUEUE_CAPACITY: &str = "CORPUS_INDEX_QUEUE_CAPACITY";

/// How input bytes are cut into work items.
///
/// `chunk_size` is the nominal payload size; the reader extends a chunk past
/// it only to avoid splitting a token. `queue_capacity` bounds the number of
/// chunks in flight: together they cap payload memory at roughly
/// `chunk_size * (queue_capacity + workers)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Chunking {
    chunk_size: usize,
    queue_capacity: usize,
}

impl Default for Chunking {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
        }
    }
}

impl Chunking {
    /// Creates a chunking configuration from environment variables, with
    /// defaults for anything unset.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            chunk_size: parse_env(ENV_CHUNK_BYTES, DEFAULT_CHUNK_SIZE).max(1),
            queue_capacity: parse_env(ENV_QUEUE_CAPACITY, DEFAULT_QUEUE_CAPACITY).max(1),
        }
    }

    /// Set the chunk size in bytes (clamped to at least one byte).
    #[must_use]
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    /// Set the queue capacity (clamped to at least one item).
    #[must_use]
    pub fn with_queue_capacity(mut self, queue_capacity: usize) -> Self {
        self.queue_capacity = queue_capacity.max(1);
        self
    }

    /// Nominal chunk payload size in bytes.
    #[must_use]
    pub const fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Maximum number of work items buffered between reader and workers.
    #[must_use]
    pub const fn queue_capacity(&self) -> usize {
        self.queue_capacity
    }
}

impl Display for Chunking {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{ chunk_size: {}, queue_capacity: {} }}",
            self.chunk_size, self.queue_capacity
        )
    }
}
