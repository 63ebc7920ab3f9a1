//! Trace session: the consumer context
//!
//! A [`TraceSession`] wires a sample source to a scene sink. It spawns the
//! batcher thread and keeps everything else (the trace builder, the sink,
//! the drain step) on the thread that owns the session. Embed it in any
//! single-threaded loop by calling [`TraceSession::pump`] once per turn, or
//! call [`TraceSession::run`] to block until the stream ends.

use crate::config::AppConfig;
use crate::error::{Result, ResultExt};
use crate::pipeline::{Batcher, BatcherExit, DrainScheduler, IngestMessage, StopHandle};
use crate::scene::{Plotter, SceneSink};
use crate::source::SampleSource;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

/// How long [`TraceSession::run`] waits for a notification per turn
const IDLE_WAIT: Duration = Duration::from_millis(50);

/// How long shutdown waits for the batcher before detaching it
const JOIN_GRACE: Duration = Duration::from_millis(200);

/// Where the session is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    /// The batcher is still delivering samples
    Running,
    /// End of stream reached and every batch plotted
    Finished,
    /// Ingestion stopped on a fatal error (already reported)
    Failed,
    /// Cancelled through [`TraceSession::stop`]
    Stopped,
}

/// Counters seen from the consumer side
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    /// Drain steps that delivered at least one message
    pub drains: u64,
    pub batches: u64,
    pub samples: u64,
    pub accepted: u64,
    pub discarded: u64,
}

/// Consumer-side owner of a running plot
pub struct TraceSession<S: SceneSink> {
    plotter: Plotter<S>,
    scheduler: DrainScheduler<IngestMessage>,
    stop: Option<StopHandle>,
    worker: Option<JoinHandle<BatcherExit>>,
    status: SessionStatus,
    stats: SessionStats,
}

impl<S: SceneSink> TraceSession<S> {
    /// Build the plot, draw decorations and start the batcher thread
    pub fn spawn<Src>(config: &AppConfig, source: Src, sink: S) -> Result<Self>
    where
        Src: SampleSource + 'static,
    {
        let plotter = Plotter::new(&config.plot, sink);
        let (scheduler, sender) = DrainScheduler::new();
        let (batcher, stop) = Batcher::new(source, &config.ingest, sender);
        let worker = batcher.spawn().context("Failed to start batcher thread")?;

        tracing::info!("Trace session started");
        Ok(Self {
            plotter,
            scheduler,
            stop: Some(stop),
            worker: Some(worker),
            status: SessionStatus::Running,
            stats: SessionStats::default(),
        })
    }

    /// One non-blocking consumer turn
    ///
    /// Runs the drain step if a notification is pending. A fatal ingestion
    /// error is returned once; later calls report [`SessionStatus::Failed`].
    pub fn pump(&mut self) -> Result<SessionStatus> {
        if self.status != SessionStatus::Running {
            return Ok(self.status);
        }
        match self.scheduler.try_dispatch() {
            Some(messages) => self.handle_messages(messages),
            None => Ok(self.check_worker()),
        }
    }

    /// Like [`TraceSession::pump`] but waits up to `timeout` for data
    pub fn pump_timeout(&mut self, timeout: Duration) -> Result<SessionStatus> {
        if self.status != SessionStatus::Running {
            return Ok(self.status);
        }
        match self.scheduler.wait(timeout) {
            Some(messages) => self.handle_messages(messages),
            None => Ok(self.check_worker()),
        }
    }

    /// Block until the stream ends or fails
    pub fn run(&mut self) -> Result<SessionStats> {
        while self.pump_timeout(IDLE_WAIT)? == SessionStatus::Running {}
        Ok(self.stats)
    }

    fn handle_messages(&mut self, messages: Vec<IngestMessage>) -> Result<SessionStatus> {
        if !messages.is_empty() {
            self.stats.drains += 1;
        }

        for message in messages {
            match message {
                IngestMessage::Batch(batch) => {
                    self.stats.batches += 1;
                    self.stats.samples += batch.samples.len() as u64;
                    let kept = self.plotter.accept_batch(&batch.samples);
                    self.stats.accepted += kept as u64;
                    self.stats.discarded += (batch.samples.len() - kept) as u64;
                    tracing::trace!(
                        "Plotted batch {}: {}/{} kept",
                        batch.sequence,
                        kept,
                        batch.samples.len()
                    );
                }
                IngestMessage::Finished(summary) => {
                    tracing::info!(
                        "Sample stream ended: {} batches, {} samples",
                        summary.batches,
                        summary.samples
                    );
                    self.finish(SessionStatus::Finished);
                }
                IngestMessage::Failed(e) => {
                    self.finish(SessionStatus::Failed);
                    return Err(e.with_context("Sample ingestion stopped"));
                }
            }
        }
        Ok(self.status)
    }

    /// Detect a batcher that exited without a final message
    fn check_worker(&mut self) -> SessionStatus {
        if self.scheduler.is_closed() {
            tracing::warn!("Batcher exited without end-of-stream");
            self.finish(SessionStatus::Stopped);
        }
        self.status
    }

    fn finish(&mut self, status: SessionStatus) {
        self.status = status;
        self.stop = None;
        let Some(worker) = self.worker.take() else {
            return;
        };

        let deadline = Instant::now() + JOIN_GRACE;
        while !worker.is_finished() && Instant::now() < deadline {
            std::thread::sleep(Duration::from_millis(1));
        }
        if !worker.is_finished() {
            // Exits on its own once the blocked read returns.
            tracing::warn!("Batcher blocked in its source, detaching thread");
            return;
        }
        match worker.join() {
            Ok(exit) => tracing::debug!("Batcher joined: {:?}", exit),
            Err(_) => tracing::error!("Batcher thread panicked"),
        }
    }

    /// Cancel ingestion and wait briefly for the batcher thread
    ///
    /// The thread exits at its next tick or read. A source blocked inside a
    /// read is detached instead of joined; it stops as soon as that read
    /// returns, without delivering anything further to this session.
    pub fn stop(&mut self) {
        if self.status == SessionStatus::Running {
            tracing::info!("Stopping trace session");
            self.finish(SessionStatus::Stopped);
        }
    }

    /// Discard all traces and redraw the decorations; ingestion continues
    pub fn clear(&mut self) {
        self.plotter.clear();
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    pub fn plotter(&self) -> &Plotter<S> {
        &self.plotter
    }

    pub fn plotter_mut(&mut self) -> &mut Plotter<S> {
        &mut self.plotter
    }
}

impl<S: SceneSink> Drop for TraceSession<S> {
    fn drop(&mut self) {
        self.stop();
    }
}
