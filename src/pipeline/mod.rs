//! The streaming indexing pipeline.
//!
//! One reader thread cuts input into boundary-safe chunks and feeds a
//! bounded queue; a pool of tokenizer workers drains it into per-chunk
//! local indexes merged under the aggregator's mutex; the global index
//! spills to partition files whenever it outgrows its ceiling; and after
//! every thread joins, the merger folds partitions and residual state into
//! the final output on the calling thread.

pub(crate) mod aggregator;
pub(crate) mod merger;
pub(crate) mod progress;
pub mod queue;
pub(crate) mod reader;
pub(crate) mod worker;

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use tempfile::TempDir;
use tracing::warn;

use crate::error::IndexError;
use crate::index::{DocSet, Posting, TermCount};
use crate::options::{Options, Spill};

pub use progress::{format_bytes, format_count};
pub use queue::{WorkItem, WorkQueue};

use self::aggregator::Aggregator;
use self::progress::{Counters, Reporter};
use self::reader::{ChunkReader, SourceFile};

/// What a finished run looked like.
#[derive(Clone, Copy, Debug, Default)]
pub struct IndexSummary {
    /// Total input bytes consumed.
    pub bytes_read: u64,
    /// Total tokens recorded (post-trim, post-discard).
    pub token_count: u64,
    /// Distinct terms in the final output.
    pub unique_terms: usize,
    /// Partition files spilled while indexing.
    pub partitions_spilled: usize,
    /// Wall-clock duration of the run.
    pub elapsed: Duration,
}

/// Builds a word-frequency tally of `input` into `output`.
///
/// # Errors
///
/// Returns an error if the input is missing or unreadable, on any I/O
/// failure while reading, spilling, or writing, and on merge failure.
pub fn tally(input: &Path, output: &Path, options: &Options) -> Result<IndexSummary, IndexError> {
    let sources = reader::single_file(input)?;
    run::<TermCount>(&sources, output, options, false)
}

/// Builds an inverted index of every file under `input` into `output`.
///
/// Each chunk is its own document, identified as `<basename>_chunk_<id>`.
/// Unreadable files are skipped with a warning; everything else that fails
/// is fatal.
///
/// # Errors
///
/// Returns an error if the input directory is missing, on any I/O failure
/// while reading, spilling, or writing, and on merge failure.
pub fn invert(input: &Path, output: &Path, options: &Options) -> Result<IndexSummary, IndexError> {
    let sources = reader::walk_dir(input)?;
    run::<DocSet>(&sources, output, options, true)
}

fn run<P: Posting>(
    sources: &[SourceFile],
    output: &Path,
    options: &Options,
    skip_unreadable: bool,
) -> Result<IndexSummary, IndexError> {
    let started = Instant::now();
    let temp = partition_dir(options.spill())?;

    let queue = WorkQueue::with_capacity(options.chunking().queue_capacity());
    let shutdown = AtomicBool::new(false);
    let progress_done = AtomicBool::new(false);
    let counters = Counters::default();
    let aggregator = Aggregator::<P>::new(
        options.spill().max_memory_terms(),
        temp.path().to_path_buf(),
    );

    let total_bytes = total_size(sources);
    let workers = options.threads().count();

    let mut first_error: Option<IndexError> = None;
    thread::scope(|scope| {
        let chunk_reader = ChunkReader::new(
            &queue,
            &shutdown,
            &counters,
            options.chunking().chunk_size(),
            skip_unreadable,
        );
        let reader_handle = scope.spawn(move || chunk_reader.run(sources));

        let worker_handles: Vec<_> = (0..workers)
            .map(|_| scope.spawn(|| worker::run::<P>(&queue, &aggregator, &shutdown, &counters)))
            .collect();

        if !options.quiet() {
            let reporter = Reporter::new(&counters, &progress_done, total_bytes, started);
            scope.spawn(move || reporter.run());
        }

        for handle in worker_handles {
            match handle.join() {
                Ok(Ok(())) => {}
                Ok(Err(err)) => {
                    first_error.get_or_insert(err);
                }
                Err(_) => {
                    shutdown.store(true, Ordering::Relaxed);
                    first_error.get_or_insert(IndexError::WorkerPanic);
                }
            }
        }

        // With the workers gone, keep the queue draining until the reader
        // has observed the shutdown flag and closed up.
        while !reader_handle.is_finished() {
            let _item = queue.pop_timeout(Duration::from_millis(10));
        }
        match reader_handle.join() {
            Ok(Ok(())) => {}
            Ok(Err(err)) => {
                first_error.get_or_insert(err);
            }
            Err(_) => {
                first_error.get_or_insert(IndexError::WorkerPanic);
            }
        }

        progress_done.store(true, Ordering::Relaxed);
    });

    if let Some(err) = first_error {
        // Dropping the temp dir discards any spilled partitions.
        return Err(err);
    }

    let (resident, partitions) = aggregator.into_parts();
    let partitions_spilled = partitions.len();

    let merged = match merger::merge_partitions(
        partitions,
        resident,
        options.spill().fan_in(),
        temp.path(),
    ) {
        Ok(merged) => merged,
        Err(err) => {
            keep_for_diagnosis(temp);
            return Err(err);
        }
    };

    let unique_terms = merged.len();
    if let Err(err) = merger::write_output(merged, output) {
        keep_for_diagnosis(temp);
        return Err(err);
    }

    Ok(IndexSummary {
        bytes_read: counters.bytes(),
        token_count: counters.tokens(),
        unique_terms,
        partitions_spilled,
        elapsed: started.elapsed(),
    })
}

/// Creates the directory partition files live in for the duration of a run.
fn partition_dir(spill: &Spill) -> Result<TempDir, IndexError> {
    let mut builder = tempfile::Builder::new();
    builder.prefix("corpus-index-");

    let created = match spill.temp_dir() {
        Some(dir) => {
            fs::create_dir_all(dir).map_err(|err| {
                IndexError::io(
                    dir.display().to_string(),
                    "failed to create temp directory",
                    err,
                )
            })?;
            builder.tempdir_in(dir)
        }
        None => builder.tempdir(),
    };

    created.map_err(|err| {
        IndexError::io(
            spill
                .temp_dir()
                .map_or_else(|| std::env::temp_dir(), Path::to_path_buf)
                .display()
                .to_string(),
            "failed to create partition directory",
            err,
        )
    })
}

/// On merge failure, unconsumed partitions are left behind for diagnosis.
fn keep_for_diagnosis(temp: TempDir) {
    let dir: PathBuf = temp.into_path();
    warn!(dir = %dir.display(), "merge failed; partition files kept for diagnosis");
}

fn total_size(sources: &[SourceFile]) -> u64 {
    sources
        .iter()
        .filter_map(|source| fs::metadata(&source.path).ok())
        .map(|metadata| metadata.len())
        .sum()
}
