//! Progress reporting for long-running index builds.
//!
//! A dedicated thread repaints a single stderr line while the pipeline
//! runs. Not part of the core contract; everything it reads is a relaxed
//! atomic the hot paths bump in passing.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Shared pipeline counters.
#[derive(Debug, Default)]
pub(crate) struct Counters {
    bytes: AtomicU64,
    tokens: AtomicU64,
}

impl Counters {
    pub(crate) fn add_bytes(&self, bytes: u64) {
        self.bytes.fetch_add(bytes, Ordering::Relaxed);
    }

    pub(crate) fn add_tokens(&self, tokens: u64) {
        self.tokens.fetch_add(tokens, Ordering::Relaxed);
    }

    pub(crate) fn bytes(&self) -> u64 {
        self.bytes.load(Ordering::Relaxed)
    }

    pub(crate) fn tokens(&self) -> u64 {
        self.tokens.load(Ordering::Relaxed)
    }
}

const TICK: Duration = Duration::from_millis(500);

/// The stderr status-line painter.
pub(crate) struct Reporter<'scope> {
    counters: &'scope Counters,
    done: &'scope AtomicBool,
    total_bytes: u64,
    started: Instant,
}

impl<'scope> Reporter<'scope> {
    pub(crate) fn new(
        counters: &'scope Counters,
        done: &'scope AtomicBool,
        total_bytes: u64,
        started: Instant,
    ) -> Self {
        Self {
            counters,
            done,
            total_bytes,
            started,
        }
    }

    /// Repaints the status line until the pipeline signals completion, then
    /// clears it so the final status starts on a clean line.
    pub(crate) fn run(&self) {
        while !self.done.load(Ordering::Relaxed) {
            std::thread::sleep(TICK);
            self.draw();
        }

        eprint!("\r\x1b[K");
    }

    fn draw(&self) {
        let bytes = self.counters.bytes();
        let elapsed = self.started.elapsed().as_secs_f64();
        if elapsed <= 0.0 {
            return;
        }

        let percentage = if self.total_bytes > 0 {
            bytes as f64 / self.total_bytes as f64 * 100.0
        } else {
            0.0
        };
        let speed = bytes as f64 / (1024.0 * 1024.0) / elapsed;

        eprint!(
            "\r\x1b[KProgress: {percentage:.2}% ({} / {}) - {speed:.2} MB/s - Tokens: {} - {}s",
            format_bytes(bytes),
            format_bytes(self.total_bytes),
            format_count(self.counters.tokens()),
            elapsed as u64,
        );
    }
}

impl std::fmt::Debug for Reporter<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reporter")
            .field("total_bytes", &self.total_bytes)
            .finish_non_exhaustive()
    }
}

/// Formats a byte count with a binary-ladder suffix (`1.50 MB`).
#[must_use]
pub fn format_bytes(bytes: u64) -> String {
    const SUFFIXES: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

    let mut size = bytes as f64;
    let mut suffix = 0;
    while size >= 1024.0 && suffix < SUFFIXES.len() - 1 {
        size /= 1024.0;
        suffix += 1;
    }

    format!("{size:.2} {}", SUFFIXES[suffix])
}

/// Formats a count with a thousands-ladder suffix (`1.20M`).
#[must_use]
pub fn format_count(count: u64) -> String {
    match count {
        0..1_000 => count.to_string(),
        1_000..1_000_000 => format!("{:.2}K", count as f64 / 1_000.0),
        1_000_000..1_000_000_000 => format!("{:.2}M", count as f64 / 1_000_000.0),
        _ => format!("{:.2}B", count as f64 / 1_000_000_000.0),
    }
}
