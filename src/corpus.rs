//! Synthetic corpus generation.
//!
//! Writes pseudo-random token streams drawn from a dictionary into numbered
//! part files, one writer thread per part. Each part seeds its own RNG with
//! the part number, so a given dictionary and size always produce the same
//! corpus.

use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use std::thread;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::error::IndexError;

/// Tokens are written in blocks of this size.
const BLOCK_SIZE: usize = 1024 * 1024;

/// Generates `total_size` bytes of corpus under `output_dir`, split across
/// `num_parts` files written in parallel.
///
/// # Errors
///
/// Returns an error if the dictionary is missing or empty, or on any I/O
/// failure while writing parts.
pub fn generate(
    dictionary: &Path,
    output_dir: &Path,
    total_size: u64,
    num_parts: usize,
) -> Result<(), IndexError> {
    let words = load_dictionary(dictionary)?;
    let num_parts = num_parts.max(1);

    fs::create_dir_all(output_dir).map_err(|err| {
        IndexError::io(
            output_dir.display().to_string(),
            "failed to create output directory",
            err,
        )
    })?;

    let share = total_size / num_parts as u64;
    let words = words.as_slice();

    let mut first_error: Option<IndexError> = None;
    thread::scope(|scope| {
        let handles: Vec<_> = (0..num_parts)
            .map(|part| scope.spawn(move || write_part(output_dir, part, share, words)))
            .collect();

        for handle in handles {
            match handle.join() {
                Ok(Ok(())) => {}
                Ok(Err(err)) => {
                    first_error.get_or_insert(err);
                }
                Err(_) => {
                    first_error.get_or_insert(IndexError::WorkerPanic);
                }
            }
        }
    });

    first_error.map_or(Ok(()), Err)
}

/// Loads the dictionary: one word per line, blank lines skipped.
fn load_dictionary(path: &Path) -> Result<Vec<String>, IndexError> {
    if !path.exists() {
        return Err(IndexError::InputMissing {
            path: path.display().to_string(),
        });
    }

    let file = File::open(path).map_err(|err| {
        IndexError::io(path.display().to_string(), "failed to open dictionary", err)
    })?;

    let mut words = Vec::new();
    for line in BufReader::new(file).lines() {
        let line = line.map_err(|err| {
            IndexError::io(path.display().to_string(), "dictionary read failed", err)
        })?;
        let word = line.trim();
        if !word.is_empty() {
            words.push(word.to_string());
        }
    }

    if words.is_empty() {
        return Err(IndexError::Config(format!(
            "dictionary has no words: {}",
            path.display()
        )));
    }

    Ok(words)
}

fn write_part(dir: &Path, part: usize, size: u64, words: &[String]) -> Result<(), IndexError> {
    let path = dir.join(format!("part_{part}.txt"));
    let file = File::create(&path).map_err(|err| {
        IndexError::io(path.display().to_string(), "failed to create part file", err)
    })?;
    let mut writer = BufWriter::new(file);

    let mut rng = StdRng::seed_from_u64(part as u64);
    let mut block = Vec::with_capacity(BLOCK_SIZE + 64);
    let mut written = 0_u64;

    while written < size {
        block.clear();
        while block.len() < BLOCK_SIZE.min(size as usize) {
            let word = &words[rng.random_range(0..words.len())];
            block.extend_from_slice(word.as_bytes());
            block.push(b' ');
        }

        writer
            .write_all(&block)
            .map_err(|err| IndexError::io(path.display().to_string(), "part write failed", err))?;
        written += block.len() as u64;
    }

    writer
        .flush()
        .map_err(|err| IndexError::io(path.display().to_string(), "part flush failed", err))?;
    debug!(path = %path.display(), bytes = written, "part complete");

    Ok(())
}
