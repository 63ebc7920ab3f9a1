//! Channel-backed sample source
//!
//! Lets another thread (a device reader, a network client) push samples.
//! Dropping or closing every [`PointSender`] is end of stream; the source
//! observes it on its next read.

use super::SampleSource;
use crate::error::{Result, TraceVisError};
use crate::types::{Point3, Sample, Style};
use crossbeam_channel::{unbounded, Receiver, Sender};

/// Producer handle for a [`ChannelSource`]
#[derive(Clone)]
pub struct PointSender {
    tx: Sender<Sample>,
}

impl PointSender {
    /// Push an unstyled point
    pub fn send_point(&self, point: Point3) -> Result<()> {
        self.send(Sample::plain(point))
    }

    /// Push a point with its own style
    pub fn send_styled(&self, point: Point3, style: Style) -> Result<()> {
        self.send(Sample::styled(point, style))
    }

    pub fn send(&self, sample: Sample) -> Result<()> {
        self.tx
            .send(sample)
            .map_err(|_| TraceVisError::Channel("sample source was dropped".to_string()))
    }

    /// Close this handle. The stream ends once every clone is closed.
    pub fn close(self) {}
}

/// Receives samples pushed through [`PointSender`] handles
pub struct ChannelSource {
    rx: Receiver<Sample>,
}

impl ChannelSource {
    pub fn new() -> (PointSender, Self) {
        let (tx, rx) = unbounded();
        (PointSender { tx }, Self { rx })
    }
}

impl SampleSource for ChannelSource {
    fn next_sample(&mut self) -> Result<Option<Sample>> {
        // A disconnected channel still yields everything already sent.
        Ok(self.rx.recv().ok())
    }

    fn describe(&self) -> String {
        "channel".to_string()
    }
}
