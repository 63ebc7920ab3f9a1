//! Producer/consumer ingestion pipeline.
//!
//! Samples flow from a source through a batcher thread into the consumer
//! context, which owns the trace and the scene:
//!
//! ```text
//! [SampleSource] ──► [Batcher thread] ──► [Handoff queue] ──► [DrainScheduler] ──► [Plotter]
//!                                              ▲                     │
//!                                              └── coalesced wake ───┘
//! ```
//!
//! # Design
//!
//! - **One producer, one consumer**: the batcher is the only writer; the
//!   consumer context is the only reader.
//! - **Unbounded FIFO**: pushes never block the batcher; drains never lose,
//!   duplicate or reorder batches.
//! - **Coalesced wake-ups**: at most one pending notification, and a drain
//!   always empties the whole queue.
//! - **Errors in-band**: fatal source errors travel through the same queue,
//!   after the batches that preceded them.

pub mod batcher;
pub mod bridge;
pub mod queue;

pub use batcher::{Batcher, BatcherExit, StopHandle};
pub use bridge::{BridgeSender, DrainScheduler};
pub use queue::{handoff_queue, QueueReader, QueueWriter};

use crate::error::TraceVisError;
use crate::types::StyledPoint;

/// A bounded group of samples moved across the thread boundary at once
#[derive(Debug, Clone, PartialEq)]
pub struct Batch {
    /// Position of this batch in the stream, starting at 0
    pub sequence: u64,
    pub samples: Vec<StyledPoint>,
}

/// Totals reported by the batcher at end of stream
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestSummary {
    pub batches: u64,
    pub samples: u64,
}

/// Messages sent from the batcher to the consumer context
#[derive(Debug)]
pub enum IngestMessage {
    /// A batch of styled samples, in arrival order
    Batch(Batch),

    /// Ingestion stopped on a fatal error
    Failed(TraceVisError),

    /// The source reached end of stream; no more messages follow
    Finished(IngestSummary),
}
