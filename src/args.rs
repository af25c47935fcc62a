//! Command-line argument parsing and access.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use corpus_index::options::spill::{DEFAULT_INVERT_MEMORY_TERMS, DEFAULT_TALLY_MEMORY_TERMS};
use corpus_index::{Chunking, Options, Spill, Threads};

/// A utility for building word-frequency tallies and inverted indexes from
/// bulk text.
#[derive(Clone, Debug, Parser)]
#[command(
    name = "corpus-index",
    author,
    version,
    about,
    long_about = "Build word-frequency tallies and inverted indexes from arbitrarily large text \
                  with a bounded-memory streaming pipeline"
)]
pub(crate) struct Args {
    #[command(subcommand)]
    pub(crate) command: Command,
}

#[derive(Clone, Debug, Subcommand)]
pub(crate) enum Command {
    /// Tally word frequencies across a single input file.
    Tally(IndexArgs),

    /// Build an inverted index across a directory tree.
    Invert(IndexArgs),

    /// Generate a synthetic corpus from a dictionary.
    Generate(GenerateArgs),
}

/// Arguments shared by the two indexing modes.
#[derive(Clone, Debug, clap::Args)]
pub(crate) struct IndexArgs {
    /// Input file (tally) or directory walked recursively (invert).
    #[arg(value_name = "INPUT")]
    pub(crate) input: PathBuf,

    /// Output file.
    #[arg(value_name = "OUTPUT")]
    pub(crate) output: PathBuf,

    /// Chunk size in MiB.
    #[arg(value_name = "CHUNK_SIZE_MB")]
    pub(crate) chunk_size_mb: Option<usize>,

    /// Tokenizer worker count (default: one per core).
    #[arg(value_name = "NUM_THREADS")]
    pub(crate) num_threads: Option<u16>,

    /// Maximum distinct terms resident in memory before spilling.
    #[arg(value_name = "MEMORY_LIMIT")]
    pub(crate) memory_limit: Option<usize>,

    /// Directory for partition files (default: a fresh directory under the
    /// OS temp directory).
    #[arg(long, value_name = "PATH")]
    pub(crate) temp_dir: Option<PathBuf>,

    /// Suppress the progress line.
    #[arg(short, long)]
    pub(crate) quiet: bool,
}

impl IndexArgs {
    /// Converts the parsed arguments into pipeline options, filling holes
    /// from the environment and per-mode defaults.
    pub(crate) fn to_options(&self, default_memory_terms: usize) -> Options {
        let mut chunking = Chunking::from_env();
        if let Some(mb) = self.chunk_size_mb {
            chunking = chunking.with_chunk_size(mb.saturating_mul(1024 * 1024));
        }

        let mut spill = Spill::default()
            .with_max_memory_terms(self.memory_limit.unwrap_or(default_memory_terms));
        if let Some(dir) = &self.temp_dir {
            spill = spill.with_temp_dir(dir);
        }

        let threads = self.num_threads.map_or(Threads::All, Threads::from);

        Options::new(chunking, spill, threads).with_quiet(self.quiet)
    }

    /// The memory-ceiling default for word-frequency runs.
    pub(crate) const fn tally_memory_default() -> usize {
        DEFAULT_TALLY_MEMORY_TERMS
    }

    /// The memory-ceiling default for inverted-index runs.
    pub(crate) const fn invert_memory_default() -> usize {
        DEFAULT_INVERT_MEMORY_TERMS
    }
}

/// Arguments for the synthetic corpus generator.
#[derive(Clone, Debug, clap::Args)]
pub(crate) struct GenerateArgs {
    /// Dictionary file, one word per line.
    #[arg(value_name = "DICTIONARY")]
    pub(crate) dictionary: PathBuf,

    /// Directory part files are written into.
    #[arg(value_name = "OUTPUT_DIR")]
    pub(crate) output_dir: PathBuf,

    /// Total corpus size in MiB.
    #[arg(value_name = "SIZE_MB", default_value_t = 100)]
    pub(crate) size_mb: u64,

    /// Writer thread count (default: one per core).
    #[arg(value_name = "NUM_THREADS")]
    pub(crate) num_threads: Option<u16>,
}
