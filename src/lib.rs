//! # TraceVis-RS: streaming 3D trace plotter
//!
//! Plots a stream of 3D points as a polyline trace. Points arrive from a
//! sample source on a background thread, are grouped into batches and handed
//! to a single consumer context, which simplifies them online and forwards
//! the surviving geometry to a scene sink.
//!
//! ## Architecture
//!
//! - **Sources**: text files, in-process channels or the demo spiral
//! - **Pipeline**: a batcher thread, an unbounded handoff queue and a
//!   coalescing drain scheduler built on crossbeam channels
//! - **Trace**: the online simplifier (distance filter, style segmentation,
//!   collinear merging) and the position marker
//! - **Scene**: decorations, the sink trait and a recording sink
//!
//! ## Configuration
//!
//! Settings are read from `config.toml` in the platform config directory
//! under `dev.tracevis-rs`:
//!
//! - **Linux**: `~/.config/dev.tracevis-rs/`
//! - **macOS**: `~/Library/Application Support/dev.tracevis-rs/`
//! - **Windows**: `%APPDATA%\dev.tracevis-rs\`
//!
//! ## Example
//!
//! ```no_run
//! use tracevis_rs::{
//!     config::AppConfig, scene::RecordingScene, source::LineSource, TraceSession,
//! };
//!
//! fn main() -> tracevis_rs::Result<()> {
//!     let config = AppConfig::default();
//!     let source = LineSource::open("points.txt")?;
//!
//!     let mut session = TraceSession::spawn(&config, source, RecordingScene::new())?;
//!     let stats = session.run()?;
//!
//!     println!("{} samples plotted", stats.accepted);
//!     Ok(())
//! }
//! ```

pub mod app;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod scene;
pub mod source;
pub mod trace;
pub mod types;

// Re-export commonly used types
pub use app::{SessionStats, SessionStatus, TraceSession};
pub use config::{AppConfig, IngestConfig, PlotConfig};
pub use error::{Result, TraceVisError};
pub use scene::{Plotter, RecordingScene, SceneSink};
pub use source::SampleSource;
pub use trace::{AcceptOutcome, TraceBuilder};
pub use types::{Color, Point3, Sample, Style, StyledPoint, Vector3};
