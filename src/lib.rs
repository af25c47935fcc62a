//! Build large text indexes from bulk input with bounded memory.
//!
//! Two products share one streaming pipeline: a word-frequency tally
//! (token → occurrence count across a single file) and an inverted index
//! (token → set of document ids across a directory tree). Input of any size
//! is read in fixed-size chunks, repaired at token boundaries, tokenized by
//! a pool of workers, and merged into a global index that spills to numbered
//! partition files whenever it outgrows its memory ceiling. A final
//! hierarchical merge folds the partitions back into a single output file.
//!
//! ```no_run
//! use corpus_index::{Options, pipeline};
//! use std::path::Path;
//!
//! let options = Options::default();
//! let summary = pipeline::tally(Path::new("corpus.txt"), Path::new("tally.txt"), &options)?;
//! eprintln!("{} tokens, {} unique", summary.token_count, summary.unique_terms);
//! # Ok::<(), corpus_index::IndexError>(())
//! ```

use std::sync::Arc;

pub mod corpus;
pub mod error;
pub mod exit_code;
pub mod index;
pub mod options;
pub mod pipeline;

pub use error::IndexError;
pub use index::{DocSet, IndexMap, Posting, TermCount};
pub use options::{Chunking, Options, Spill, Threads};
pub use pipeline::{IndexSummary, WorkItem, WorkQueue};

/// A normalized token: raw bytes, lowercased, punctuation-trimmed.
///
/// Tokens are byte sequences rather than strings so that non-ASCII bytes
/// pass through the pipeline untouched.
pub type Term = Box<[u8]>;

/// Occurrence count for a term.
pub type Count = u64;

/// Document identifier attributed to a chunk (`<basename>_chunk_<id>`).
pub type SourceId = Arc<str>;
