//! Handoff queue between the batcher thread and the consumer context
//!
//! An unbounded FIFO built on a crossbeam channel. Pushing never blocks.
//! [`QueueReader::drain_all`] takes everything queued at the moment of the
//! call; items pushed concurrently land in the next drain. Each item is
//! delivered exactly once, in push order.

use crate::error::{Result, TraceVisError};
use crossbeam_channel::{unbounded, Receiver, Sender};
use std::sync::atomic::{fence, Ordering};
use std::sync::{Arc, Weak};

/// Create a connected writer/reader pair
pub fn handoff_queue<T>() -> (QueueWriter<T>, QueueReader<T>) {
    let (tx, rx) = unbounded();
    let alive = Arc::new(());
    let writer_alive = Arc::downgrade(&alive);
    (
        QueueWriter { tx, _alive: alive },
        QueueReader { rx, writer_alive },
    )
}

/// Producer end of the handoff queue
#[derive(Debug)]
pub struct QueueWriter<T> {
    tx: Sender<T>,
    // Dropped after `tx`: once the token is gone no push can follow.
    _alive: Arc<()>,
}

impl<T> QueueWriter<T> {
    /// Enqueue an item. Fails only when the reader is gone.
    pub fn push(&self, item: T) -> Result<()> {
        self.tx
            .send(item)
            .map_err(|_| TraceVisError::Channel("handoff queue reader dropped".to_string()))
    }
}

/// Consumer end of the handoff queue
#[derive(Debug)]
pub struct QueueReader<T> {
    rx: Receiver<T>,
    writer_alive: Weak<()>,
}

impl<T> QueueReader<T> {
    /// Remove and return every queued item in push order
    pub fn drain_all(&self) -> Vec<T> {
        self.rx.try_iter().collect()
    }

    pub fn len(&self) -> usize {
        self.rx.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rx.is_empty()
    }

    /// True once the writer is dropped and nothing is left to drain
    pub fn is_finished(&self) -> bool {
        // Writer liveness first: once it is gone no push can race the emptiness check.
        if self.writer_alive.strong_count() != 0 {
            return false;
        }
        // Pairs with the release decrement of the writer's token.
        fence(Ordering::Acquire);
        self.rx.is_empty()
    }
}
