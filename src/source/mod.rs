//! Sample sources feeding the batcher
//!
//! A source yields raw samples in arrival order and reports end of stream
//! as `Ok(None)`. Sources run on the batcher thread, so they must be `Send`;
//! they may block while waiting for data.
//!
//! # Implementations
//!
//! - [`LineSource`] - Whitespace-separated `x y [z]` records from any reader
//! - [`ChannelSource`] - Points pushed from another thread; closing the
//!   sending side ends the stream
//! - [`SpiralSource`] - Synthetic upward spiral with square corners, for demos

pub mod channel;
pub mod reader;
pub mod spiral;

pub use channel::{ChannelSource, PointSender};
pub use reader::{parse_sample_line, LineSource};
pub use spiral::SpiralSource;

use crate::error::Result;
use crate::types::Sample;

/// A producer of raw samples
#[cfg_attr(test, mockall::automock)]
pub trait SampleSource: Send {
    /// Read the next sample, `Ok(None)` at end of stream
    fn next_sample(&mut self) -> Result<Option<Sample>>;

    /// Short human-readable description for logs
    fn describe(&self) -> String {
        "sample source".to_string()
    }
}

impl<S: SampleSource + ?Sized> SampleSource for Box<S> {
    fn next_sample(&mut self) -> Result<Option<Sample>> {
        (**self).next_sample()
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}
