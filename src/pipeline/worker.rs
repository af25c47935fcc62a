//! Tokenizer workers: work items in, merged local indexes out.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::SourceId;
use crate::error::IndexError;
use crate::index::{IndexMap, Posting, for_each_token};

use super::aggregator::Aggregator;
use super::progress::Counters;
use super::queue::{WorkItem, WorkQueue};

/// One worker's loop: pop, tokenize into a local index, merge globally in a
/// single critical section. Exits when the queue finishes or the shutdown
/// flag is observed.
///
/// A worker never terminates the process. On a merge failure it raises the
/// shutdown flag, keeps the queue draining so a reader parked on a full
/// queue can observe the flag, and hands its error back to the driver.
pub(crate) fn run<P: Posting>(
    queue: &WorkQueue,
    aggregator: &Aggregator<P>,
    shutdown: &AtomicBool,
    counters: &Counters,
) -> Result<(), IndexError> {
    while !shutdown.load(Ordering::Relaxed) {
        let Some(item) = queue.pop() else {
            return Ok(());
        };

        let local = index_chunk::<P>(&item, counters);
        if let Err(err) = aggregator.merge(local) {
            shutdown.store(true, Ordering::Relaxed);
            while queue.pop().is_some() {}
            return Err(err);
        }
    }

    Ok(())
}

/// Tokenizes one chunk into a local index owned by this worker alone.
fn index_chunk<P: Posting>(item: &WorkItem, counters: &Counters) -> IndexMap<P> {
    let doc = SourceId::from(format!("{}_chunk_{}", item.source, item.chunk_id));

    let mut local = IndexMap::new();
    let mut local_total = 0_u64;
    for_each_token(&item.payload, |token| {
        local.record(token, &doc);
        local_total += 1;
    });
    counters.add_tokens(local_total);

    local
}
