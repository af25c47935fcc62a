//! Chunk reader: turns input files into boundary-safe work items.

use std::fs::{self, File};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::warn;

use crate::SourceId;
use crate::error::IndexError;
use crate::index::is_chunk_whitespace;

use super::progress::Counters;
use super::queue::{WorkItem, WorkQueue};

/// One input file and the document stem its chunks are attributed to.
#[derive(Clone, Debug)]
pub(crate) struct SourceFile {
    pub(crate) path: PathBuf,
    pub(crate) stem: SourceId,
}

impl SourceFile {
    /// Derives the document stem from the file's basename, replacing any
    /// whitespace so source ids never collide with field separators.
    fn new(path: PathBuf) -> Self {
        let basename = path
            .file_name()
            .map_or_else(|| path.to_string_lossy(), |name| name.to_string_lossy());
        let stem: String = basename
            .chars()
            .map(|c| if c.is_whitespace() { '_' } else { c })
            .collect();

        Self {
            path,
            stem: SourceId::from(stem),
        }
    }
}

/// Resolves a word-frequency input: a single readable file.
pub(crate) fn single_file(path: &Path) -> Result<Vec<SourceFile>, IndexError> {
    if !path.exists() {
        return Err(IndexError::InputMissing {
            path: path.display().to_string(),
        });
    }
    if !path.is_file() {
        return Err(IndexError::Config(format!(
            "expected a file: {}",
            path.display()
        )));
    }

    Ok(vec![SourceFile::new(path.to_path_buf())])
}

/// Resolves an inverted-index input: every regular file under `dir`,
/// recursively, in path order so runs are reproducible.
pub(crate) fn walk_dir(dir: &Path) -> Result<Vec<SourceFile>, IndexError> {
    if !dir.exists() {
        return Err(IndexError::InputMissing {
            path: dir.display().to_string(),
        });
    }
    if !dir.is_dir() {
        return Err(IndexError::NotADirectory {
            path: dir.display().to_string(),
        });
    }

    let mut paths = Vec::new();
    collect_files(dir, &mut paths)
        .map_err(|err| IndexError::io(dir.display().to_string(), "failed to scan directory", err))?;
    paths.sort_unstable();

    Ok(paths.into_iter().map(SourceFile::new).collect())
}

fn collect_files(dir: &Path, out: &mut Vec<PathBuf>) -> io::Result<()> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let file_type = entry.file_type()?;
        if file_type.is_dir() {
            collect_files(&entry.path(), out)?;
        } else if file_type.is_file() {
            out.push(entry.path());
        }
    }

    Ok(())
}

/// The producer side of the pipeline.
///
/// Reads `chunk_size + 1` bytes per round and repairs token boundaries at
/// the joins: a round that ends mid-token is cut at its last whitespace
/// byte and the remainder carried into the next round. A round with no
/// whitespace at all keeps accumulating, so a token larger than the chunk
/// size passes through intact.
#[derive(Debug)]
pub(crate) struct ChunkReader<'scope> {
    queue: &'scope WorkQueue,
    shutdown: &'scope AtomicBool,
    counters: &'scope Counters,
    chunk_size: usize,
    skip_unreadable: bool,
}

impl<'scope> ChunkReader<'scope> {
    pub(crate) fn new(
        queue: &'scope WorkQueue,
        shutdown: &'scope AtomicBool,
        counters: &'scope Counters,
        chunk_size: usize,
        skip_unreadable: bool,
    ) -> Self {
        Self {
            queue,
            shutdown,
            counters,
            chunk_size: chunk_size.max(1),
            skip_unreadable,
        }
    }

    /// Streams every source into the queue, then closes it. The queue is
    /// finished on every exit path, error or not.
    pub(crate) fn run(&self, sources: &[SourceFile]) -> Result<(), IndexError> {
        let result = self.read_all(sources);
        if result.is_err() {
            self.shutdown.store(true, Ordering::Relaxed);
        }
        self.queue.finish();

        result
    }

    fn read_all(&self, sources: &[SourceFile]) -> Result<(), IndexError> {
        for source in sources {
            if self.shutdown.load(Ordering::Relaxed) {
                break;
            }

            let file = match File::open(&source.path) {
                Ok(file) => file,
                Err(err) if self.skip_unreadable => {
                    warn!(path = %source.path.display(), %err, "skipping unreadable file");
                    continue;
                }
                Err(err) => {
                    return Err(IndexError::io(
                        source.path.display().to_string(),
                        "failed to open input",
                        err,
                    ));
                }
            };

            self.read_source(file, source)?;
        }

        Ok(())
    }

    fn read_source(&self, mut file: File, source: &SourceFile) -> Result<(), IndexError> {
        let window = self.chunk_size + 1;
        let mut carry: Vec<u8> = Vec::with_capacity(window);
        let mut chunk_id = 0_u64;

        loop {
            if self.shutdown.load(Ordering::Relaxed) {
                return Ok(());
            }

            let read = fill(&mut file, &mut carry, window).map_err(|err| {
                IndexError::io(source.path.display().to_string(), "read failed", err)
            })?;
            self.counters.add_bytes(read as u64);

            if read < window {
                // Source exhausted: whatever is carried is the final chunk.
                break;
            }

            if carry.last().copied().is_some_and(is_chunk_whitespace) {
                let payload = std::mem::take(&mut carry);
                self.push_chunk(source, &mut chunk_id, payload);
            } else if let Some(cut) = last_whitespace(&carry) {
                let tail = carry.split_off(cut + 1);
                let payload = std::mem::replace(&mut carry, tail);
                self.push_chunk(source, &mut chunk_id, payload);
            }
            // No whitespace anywhere in the window: keep reading so the
            // token stays intact.
        }

        if !carry.is_empty() {
            self.push_chunk(source, &mut chunk_id, carry);
        }

        Ok(())
    }

    fn push_chunk(&self, source: &SourceFile, chunk_id: &mut u64, payload: Vec<u8>) {
        let item = WorkItem {
            source: SourceId::clone(&source.stem),
            chunk_id: *chunk_id,
            payload,
        };
        *chunk_id += 1;

        // Blocks while the queue is at capacity.
        self.queue.push(item);
    }
}

/// Appends up to `want` bytes from `file` onto `buf`, returning how many
/// arrived. A short count means end of file.
fn fill(file: &mut File, buf: &mut Vec<u8>, want: usize) -> io::Result<usize> {
    let start = buf.len();
    buf.resize(start + want, 0);

    let mut read = 0;
    while read < want {
        match file.read(&mut buf[start + read..]) {
            Ok(0) => break,
            Ok(n) => read += n,
            Err(err) if err.kind() == io::ErrorKind::Interrupted => {}
            Err(err) => {
                buf.truncate(start + read);
                return Err(err);
            }
        }
    }
    buf.truncate(start + read);

    Ok(read)
}

/// Index of the last chunk-whitespace byte in `buf`, if any.
fn last_whitespace(buf: &[u8]) -> Option<usize> {
    let spaces = memchr::memrchr3(b' ', b'\t', b'\n', buf);
    let carriage = memchr::memrchr(b'\r', buf);

    spaces.max(carriage)
}
