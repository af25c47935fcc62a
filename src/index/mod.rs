//! Index structures shared by both products.
//!
//! [`IndexMap`] is the one map shape used everywhere: per-worker local
//! indexes, the mutex-guarded global index, and the scratch maps the merger
//! folds partition files into. The [`Posting`] trait is the seam between the
//! two products: [`TermCount`] postings make the map a word-frequency tally,
//! [`DocSet`] postings make it an inverted index.

pub mod map;
pub mod posting;
pub mod token;

pub use map::IndexMap;
pub use posting::{DocSet, Posting, TermCount};
pub use token::{for_each_token, is_chunk_whitespace, tokens};
