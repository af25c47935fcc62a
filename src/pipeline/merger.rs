//! The merger: partitions plus residual index become the final output.

use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use memchr::memchr_iter;
use rayon::prelude::*;
use tracing::debug;

use crate::Term;
use crate::error::IndexError;
use crate::index::{IndexMap, Posting};

use super::aggregator::write_partition;

/// Combines the spilled partitions with the residual in-memory index.
///
/// While more than `fan_in` partitions remain, groups of `fan_in` files are
/// hash-merged into intermediate files (groups are independent, so each
/// round runs in parallel), deleting inputs as each group completes. The
/// survivors are then streamed record-by-record into the residual index.
pub(crate) fn merge_partitions<P: Posting>(
    mut partitions: Vec<PathBuf>,
    mut resident: IndexMap<P>,
    fan_in: usize,
    temp_dir: &Path,
) -> Result<IndexMap<P>, IndexError> {
    let fan_in = fan_in.max(2);

    let mut round = 0_usize;
    while partitions.len() > fan_in {
        debug!(files = partitions.len(), round, "hierarchical merge round");
        partitions = partitions
            .par_chunks(fan_in)
            .enumerate()
            .map(|(slot, group)| merge_group::<P>(group, temp_dir, round, slot))
            .collect::<Result<Vec<_>, _>>()?;
        round += 1;
    }

    for path in partitions {
        stream_partition_into::<P>(&path, &mut resident)?;
        fs::remove_file(&path).map_err(|err| {
            IndexError::io(
                path.display().to_string(),
                "failed to remove consumed partition",
                err,
            )
        })?;
    }

    Ok(resident)
}

/// Hash-merges one group of partition files into a fresh intermediate file,
/// deleting the inputs once the output is on disk.
fn merge_group<P: Posting>(
    group: &[PathBuf],
    temp_dir: &Path,
    round: usize,
    slot: usize,
) -> Result<PathBuf, IndexError> {
    let mut merged = IndexMap::new();
    for path in group {
        load_partition_into::<P>(path, &mut merged)?;
    }

    let out = temp_dir.join(format!("index_merged_{round}_{slot}.tmp"));
    write_partition(&out, &merged)?;

    for path in group {
        fs::remove_file(path).map_err(|err| {
            IndexError::io(
                path.display().to_string(),
                "failed to remove merged partition",
                err,
            )
        })?;
    }

    Ok(out)
}

/// Reads a whole partition into memory and folds its records into `target`.
fn load_partition_into<P: Posting>(
    path: &Path,
    target: &mut IndexMap<P>,
) -> Result<(), IndexError> {
    let bytes = fs::read(path).map_err(|err| {
        IndexError::io(path.display().to_string(), "failed to read partition", err)
    })?;

    let mut line_no = 0_u64;
    let mut start = 0_usize;
    for newline in memchr_iter(b'\n', &bytes) {
        line_no += 1;
        merge_record::<P>(&bytes[start..newline], path, line_no, target)?;
        start = newline + 1;
    }
    if start < bytes.len() {
        merge_record::<P>(&bytes[start..], path, line_no + 1, target)?;
    }

    Ok(())
}

/// Streams a partition record-by-record into `target` without loading the
/// file whole.
fn stream_partition_into<P: Posting>(
    path: &Path,
    target: &mut IndexMap<P>,
) -> Result<(), IndexError> {
    let file = File::open(path).map_err(|err| {
        IndexError::io(path.display().to_string(), "failed to open partition", err)
    })?;
    let mut reader = BufReader::new(file);

    let mut line = Vec::new();
    let mut line_no = 0_u64;
    loop {
        line.clear();
        let read = reader.read_until(b'\n', &mut line).map_err(|err| {
            IndexError::io(path.display().to_string(), "partition read failed", err)
        })?;
        if read == 0 {
            break;
        }
        line_no += 1;

        if line.last() == Some(&b'\n') {
            line.pop();
        }
        merge_record::<P>(&line, path, line_no, target)?;
    }

    Ok(())
}

fn merge_record<P: Posting>(
    line: &[u8],
    path: &Path,
    line_no: u64,
    target: &mut IndexMap<P>,
) -> Result<(), IndexError> {
    if line.is_empty() {
        return Ok(());
    }

    let (term, posting) =
        parse_record::<P>(line).map_err(|message| IndexError::CorruptPartition {
            path: path.display().to_string(),
            line: line_no,
            message,
        })?;
    target.insert_merge(term, posting);

    Ok(())
}

/// Splits a record line into its token and parsed posting.
fn parse_record<P: Posting>(line: &[u8]) -> Result<(Term, P), String> {
    let mut fields = line.split(|&byte| byte == b' ');
    let token = fields
        .next()
        .filter(|token| !token.is_empty())
        .ok_or_else(|| "record is missing its token".to_string())?;
    let posting = P::parse_fields(fields)?;

    Ok((Term::from(token), posting))
}

/// Orders the final index and writes the output file.
///
/// A partially written output is removed on failure so a crash never leaves
/// a truncated result behind.
pub(crate) fn write_output<P: Posting>(index: IndexMap<P>, path: &Path) -> Result<(), IndexError> {
    let mut entries = index.into_entries();
    P::order_output(&mut entries);

    let result = write_entries(&entries, path);
    if result.is_err() {
        fs::remove_file(path).ok();
    }

    result
}

fn write_entries<P: Posting>(entries: &[(Term, P)], path: &Path) -> Result<(), IndexError> {
    let file = File::create(path).map_err(|err| {
        IndexError::io(
            path.display().to_string(),
            "failed to create output file",
            err,
        )
    })?;
    let mut writer = BufWriter::new(file);

    let mut line = Vec::new();
    for (term, posting) in entries {
        line.clear();
        line.extend_from_slice(term);
        posting.write_fields(&mut line);
        line.push(b'\n');
        writer
            .write_all(&line)
            .map_err(|err| IndexError::io(path.display().to_string(), "output write failed", err))?;
    }

    writer
        .flush()
        .map_err(|err| IndexError::io(path.display().to_string(), "output flush failed", err))
}
