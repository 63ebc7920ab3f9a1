//! Thread boundary between the batcher (producer) and the consumer context.
//!
//! Every submitted item goes through the handoff queue; the consumer is
//! woken through a one-slot notification channel. Submissions that happen
//! while a wake-up is still pending coalesce into it, so the consumer sees
//! at most one outstanding notification, and each notification drains
//! everything queued so far.
//!
//! The pending flag is cleared *before* the queue is drained, so an item
//! pushed during a drain always raises a fresh notification.

use super::queue::{handoff_queue, QueueReader, QueueWriter};
use crate::error::{Result, TraceVisError};
use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, Sender, TryRecvError, TrySendError};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Default)]
struct Shared {
    pending: AtomicBool,
    notifications: AtomicU64,
}

/// Producer-side handle: submit items and wake the consumer
#[derive(Debug)]
pub struct BridgeSender<T> {
    writer: QueueWriter<T>,
    wake_tx: Sender<()>,
    shared: Arc<Shared>,
}

impl<T> BridgeSender<T> {
    /// Queue an item and schedule a drain unless one is already pending
    pub fn submit(&self, item: T) -> Result<()> {
        self.writer.push(item)?;

        if !self.shared.pending.swap(true, Ordering::AcqRel) {
            self.shared.notifications.fetch_add(1, Ordering::Relaxed);
            match self.wake_tx.try_send(()) {
                Ok(()) | Err(TrySendError::Full(())) => {}
                Err(TrySendError::Disconnected(())) => {
                    return Err(TraceVisError::Channel(
                        "consumer context is gone".to_string(),
                    ));
                }
            }
        }
        Ok(())
    }
}

/// Consumer-side handle, owned by the single consumer context
#[derive(Debug)]
pub struct DrainScheduler<T> {
    reader: QueueReader<T>,
    wake_rx: Receiver<()>,
    shared: Arc<Shared>,
}

impl<T> DrainScheduler<T> {
    /// Create a bridge pair: `(scheduler_for_consumer, sender_for_producer)`
    pub fn new() -> (Self, BridgeSender<T>) {
        let (writer, reader) = handoff_queue();
        let (wake_tx, wake_rx) = bounded(1);
        let shared = Arc::new(Shared::default());

        (
            Self {
                reader,
                wake_rx,
                shared: shared.clone(),
            },
            BridgeSender {
                writer,
                wake_tx,
                shared,
            },
        )
    }

    /// Handle a pending notification without blocking
    ///
    /// Returns every queued item when a drain was scheduled, `None` otherwise.
    pub fn try_dispatch(&self) -> Option<Vec<T>> {
        match self.wake_rx.try_recv() {
            Ok(()) => Some(self.drain()),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => self.drain_remaining(),
        }
    }

    /// Wait up to `timeout` for a notification, then drain
    pub fn wait(&self, timeout: Duration) -> Option<Vec<T>> {
        match self.wake_rx.recv_timeout(timeout) {
            Ok(()) => Some(self.drain()),
            Err(RecvTimeoutError::Timeout) => None,
            Err(RecvTimeoutError::Disconnected) => self.drain_remaining(),
        }
    }

    fn drain(&self) -> Vec<T> {
        self.shared.pending.swap(false, Ordering::AcqRel);
        self.reader.drain_all()
    }

    fn drain_remaining(&self) -> Option<Vec<T>> {
        let items = self.drain();
        (!items.is_empty()).then_some(items)
    }

    /// The producer is gone and every item has been handed out
    pub fn is_closed(&self) -> bool {
        self.reader.is_finished()
    }

    /// Number of wake-ups raised by the producer so far
    pub fn notifications_sent(&self) -> u64 {
        self.shared.notifications.load(Ordering::Relaxed)
    }
}
