//! The aggregator: global index, memory ceiling, and spill to disk.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use tracing::debug;

use crate::error::IndexError;
use crate::index::{IndexMap, Posting};

/// Holds the authoritative index behind a mutex and enforces the memory
/// ceiling.
///
/// A merge that leaves the index at the ceiling swaps it for an empty map
/// inside the critical section, so no merge ever begins against an
/// oversized index. The swapped-out snapshot is serialized outside that
/// lock, under a second mutex that also owns the partition list, keeping
/// flushes serialized with each other while merges continue.
#[derive(Debug)]
pub(crate) struct Aggregator<P> {
    index: Mutex<IndexMap<P>>,
    max_memory_terms: usize,
    spill: Mutex<SpillState>,
}

#[derive(Debug)]
struct SpillState {
    dir: PathBuf,
    counter: usize,
    partitions: Vec<PathBuf>,
}

impl<P: Posting> Aggregator<P> {
    pub(crate) fn new(max_memory_terms: usize, dir: PathBuf) -> Self {
        Self {
            index: Mutex::new(IndexMap::new()),
            max_memory_terms: max_memory_terms.max(1),
            spill: Mutex::new(SpillState {
                dir,
                counter: 0,
                partitions: Vec::new(),
            }),
        }
    }

    /// Folds a worker's local index into the global one in a single
    /// critical section, spilling if the result exceeds the ceiling.
    pub(crate) fn merge(&self, local: IndexMap<P>) -> Result<(), IndexError> {
        let snapshot = {
            let mut index = self.index.lock();
            index.absorb(local);
            (index.len() >= self.max_memory_terms).then(|| std::mem::take(&mut *index))
        };

        match snapshot {
            Some(snapshot) => self.spill(snapshot),
            None => Ok(()),
        }
    }

    fn spill(&self, snapshot: IndexMap<P>) -> Result<(), IndexError> {
        let mut state = self.spill.lock();
        let path = state.dir.join(format!("index_temp_{}.tmp", state.counter));
        state.counter += 1;

        write_partition(&path, &snapshot)?;
        debug!(path = %path.display(), terms = snapshot.len(), "spilled global index");
        state.partitions.push(path);

        Ok(())
    }

    /// Tears the aggregator down into the residual in-memory index and the
    /// partition list, ready for the merger.
    pub(crate) fn into_parts(self) -> (IndexMap<P>, Vec<PathBuf>) {
        (
            self.index.into_inner(),
            self.spill.into_inner().partitions,
        )
    }
}

/// Writes an index snapshot in the line-oriented partition format.
pub(crate) fn write_partition<P: Posting>(
    path: &Path,
    index: &IndexMap<P>,
) -> Result<(), IndexError> {
    let file = File::create(path).map_err(|err| {
        IndexError::io(
            path.display().to_string(),
            "failed to create partition file",
            err,
        )
    })?;
    let mut writer = BufWriter::new(file);

    let mut line = Vec::new();
    for (term, posting) in index.iter() {
        line.clear();
        line.extend_from_slice(term);
        posting.write_fields(&mut line);
        line.push(b'\n');
        writer.write_all(&line).map_err(|err| {
            IndexError::io(path.display().to_string(), "partition write failed", err)
        })?;
    }

    writer
        .flush()
        .map_err(|err| IndexError::io(path.display().to_string(), "partition flush failed", err))
}
