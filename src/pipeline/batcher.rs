//! Batcher worker thread
//!
//! Runs on its own thread, independent of the consumer's cadence. Every
//! tick it reads up to `batch_size` samples from the source, attaches the
//! ingest style to unstyled samples and submits the batch through the
//! scheduler bridge.
//!
//! # Termination
//!
//! - **End of stream**: the partial batch is flushed, then
//!   [`IngestMessage::Finished`] is sent and the thread exits.
//! - **Fatal source error**: the valid samples read so far are flushed, then
//!   [`IngestMessage::Failed`] carries the error to the consumer.
//! - **Cancellation**: dropping the [`StopHandle`] wakes the batcher from
//!   its tick sleep and it exits without further messages.

use super::bridge::BridgeSender;
use super::{Batch, IngestMessage, IngestSummary};
use crate::config::IngestConfig;
use crate::error::Result;
use crate::source::SampleSource;
use crate::types::{Sample, Style, StyledPoint};
use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::thread::JoinHandle;
use std::time::Duration;

/// Owned by the consumer; dropping it cancels the batcher
#[derive(Debug)]
pub struct StopHandle {
    _tx: Sender<()>,
}

/// How a batcher run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatcherExit {
    EndOfStream,
    Failed,
    Cancelled,
    /// The consumer side went away
    Disconnected,
}

enum ReadEnd {
    EndOfStream,
    Failed(crate::error::TraceVisError),
    Cancelled,
}

/// Groups source samples into batches and hands them to the consumer
pub struct Batcher<S> {
    source: S,
    sender: BridgeSender<IngestMessage>,
    stop_rx: Receiver<()>,
    tick: Duration,
    batch_size: usize,
    default_style: Style,
    summary: IngestSummary,
}

impl<S: SampleSource> Batcher<S> {
    /// Create a batcher and the handle that cancels it
    pub fn new(
        source: S,
        config: &IngestConfig,
        sender: BridgeSender<IngestMessage>,
    ) -> (Self, StopHandle) {
        let (stop_tx, stop_rx) = bounded(1);
        let batcher = Self {
            source,
            sender,
            stop_rx,
            tick: config.tick_interval(),
            batch_size: config.effective_batch_size(),
            default_style: config.default_style(),
            summary: IngestSummary::default(),
        };
        (batcher, StopHandle { _tx: stop_tx })
    }

    /// Run the batching loop until the stream ends, fails or is cancelled
    pub fn run(mut self) -> BatcherExit {
        tracing::info!(
            "Batcher started: {} (batch size {}, tick {:?})",
            self.source.describe(),
            self.batch_size,
            self.tick
        );

        let exit = loop {
            if self.sleep_tick() {
                break BatcherExit::Cancelled;
            }

            let (samples, end) = self.read_batch();

            if !samples.is_empty() {
                let batch = Batch {
                    sequence: self.summary.batches,
                    samples,
                };
                self.summary.batches += 1;
                self.summary.samples += batch.samples.len() as u64;
                tracing::debug!("Batch {} with {} samples", batch.sequence, batch.samples.len());

                if self.submit(IngestMessage::Batch(batch)).is_err() {
                    break BatcherExit::Disconnected;
                }
            }

            match end {
                None => continue,
                Some(ReadEnd::Cancelled) => break BatcherExit::Cancelled,
                Some(ReadEnd::EndOfStream) => {
                    let done = IngestMessage::Finished(self.summary);
                    break match self.submit(done) {
                        Ok(()) => BatcherExit::EndOfStream,
                        Err(_) => BatcherExit::Disconnected,
                    };
                }
                Some(ReadEnd::Failed(e)) => {
                    tracing::error!("Sample ingestion failed: {}", e);
                    let _ = self.submit(IngestMessage::Failed(e));
                    break BatcherExit::Failed;
                }
            }
        };

        tracing::info!(
            "Batcher stopped ({:?}) after {} batches / {} samples",
            exit,
            self.summary.batches,
            self.summary.samples
        );
        exit
    }

    /// Sleep for one tick. Returns true when cancelled.
    fn sleep_tick(&self) -> bool {
        match self.stop_rx.recv_timeout(self.tick) {
            Err(RecvTimeoutError::Timeout) => false,
            Ok(()) | Err(RecvTimeoutError::Disconnected) => true,
        }
    }

    fn is_cancelled(&self) -> bool {
        !matches!(self.stop_rx.try_recv(), Err(TryRecvError::Empty))
    }

    fn read_batch(&mut self) -> (Vec<StyledPoint>, Option<ReadEnd>) {
        let mut samples = Vec::with_capacity(self.batch_size);

        while samples.len() < self.batch_size {
            if self.is_cancelled() {
                return (samples, Some(ReadEnd::Cancelled));
            }
            match self.source.next_sample() {
                Ok(Some(sample)) => samples.push(self.attach_style(sample)),
                Ok(None) => return (samples, Some(ReadEnd::EndOfStream)),
                Err(e) => return (samples, Some(ReadEnd::Failed(e))),
            }
        }
        (samples, None)
    }

    fn attach_style(&self, sample: Sample) -> StyledPoint {
        let style = sample.style.unwrap_or(self.default_style);
        StyledPoint::new(sample.point, style.color, style.thickness)
    }

    fn submit(&self, message: IngestMessage) -> Result<()> {
        self.sender.submit(message).map_err(|e| {
            tracing::warn!("Consumer went away, stopping batcher: {}", e);
            e
        })
    }
}

impl<S: SampleSource + 'static> Batcher<S> {
    /// Run on a dedicated, named thread
    pub fn spawn(self) -> Result<JoinHandle<BatcherExit>> {
        let handle = std::thread::Builder::new()
            .name("tracevis-batcher".to_string())
            .spawn(move || self.run())?;
        Ok(handle)
    }
}
