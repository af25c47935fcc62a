//! Bounded hand-off between the reader and the tokenizer workers.

use crossbeam_channel::{Receiver, Sender, bounded};
use parking_lot::Mutex;
use std::time::Duration;

use crate::SourceId;

/// One chunk of input awaiting tokenization.
///
/// The payload's first and last bytes sit on token boundaries: the reader
/// never cuts a chunk mid-token.
#[derive(Clone, Debug)]
pub struct WorkItem {
    /// Document stem the chunk belongs to.
    pub source: SourceId,
    /// Position of the chunk within its source, counted from zero.
    pub chunk_id: u64,
    /// Raw chunk bytes.
    pub payload: Vec<u8>,
}

/// Bounded FIFO with a terminal signal.
///
/// `push` blocks while the queue is at capacity, which is the only
/// backpressure mechanism the pipeline needs: a reader that outruns the
/// tokenizers parks on the channel instead of ballooning memory.
#[derive(Debug)]
pub struct WorkQueue {
    sender: Mutex<Option<Sender<WorkItem>>>,
    receiver: Receiver<WorkItem>,
}

impl WorkQueue {
    /// Creates a queue bounded at `capacity` in-flight items.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, receiver) = bounded(capacity.max(1));

        Self {
            sender: Mutex::new(Some(sender)),
            receiver,
        }
    }

    /// Appends an item, blocking while the queue is at capacity.
    ///
    /// A push after [`finish`](Self::finish) is silently dropped.
    pub fn push(&self, item: WorkItem) {
        let sender = self.sender.lock().clone();
        if let Some(sender) = sender {
            sender.send(item).ok();
        }
    }

    /// Removes the next item, blocking while the queue is empty and not yet
    /// finished. Returns `None` only once the queue is empty *and* finished.
    #[must_use]
    pub fn pop(&self) -> Option<WorkItem> {
        self.receiver.recv().ok()
    }

    /// Like [`pop`](Self::pop), but gives up after `timeout`. Used on
    /// failure paths to keep the queue draining without blocking forever.
    #[must_use]
    pub fn pop_timeout(&self, timeout: Duration) -> Option<WorkItem> {
        self.receiver.recv_timeout(timeout).ok()
    }

    /// Marks the end of the stream and wakes every waiter. Idempotent.
    pub fn finish(&self) {
        self.sender.lock().take();
    }

    /// Best-effort count of items currently queued.
    #[must_use]
    pub fn len(&self) -> usize {
        self.receiver.len()
    }

    /// Whether the queue currently holds no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.receiver.is_empty()
    }
}
