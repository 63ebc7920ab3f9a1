//! TraceVis-RS - Main Entry Point
//!
//! Streams a point file (or the demo spiral) through a trace session and
//! reports what the simplifier kept.
//!
//! ```text
//! tracevis <points-file> [config-file]
//! tracevis --demo [config-file]
//! ```

use anyhow::{bail, Context};
use tracevis_rs::{
    config::{default_config_path, AppConfig},
    scene::RecordingScene,
    source::{LineSource, SampleSource, SpiralSource},
    TraceSession,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Simulated seconds between demo samples
const DEMO_TIME_STEP: f64 = 0.1;

/// Samples generated by the demo before it ends
const DEMO_SAMPLES: usize = 2_000;

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tracevis_rs=debug")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(input) = args.first() else {
        bail!("usage: tracevis <points-file|--demo> [config-file]");
    };

    let config = match args.get(1) {
        Some(path) => AppConfig::load(path).with_context(|| format!("loading {path}"))?,
        None => match default_config_path() {
            Some(path) if path.exists() => AppConfig::load_or_default(&path),
            _ => AppConfig::default(),
        },
    };

    tracing::info!("Starting TraceVis-RS");

    let source: Box<dyn SampleSource> = if input == "--demo" {
        Box::new(SpiralSource::new(DEMO_TIME_STEP).with_limit(DEMO_SAMPLES))
    } else {
        Box::new(LineSource::open(input)?)
    };

    let mut session = TraceSession::spawn(&config, source, RecordingScene::new())?;
    let stats = session.run().context("trace session failed")?;

    let plotter = session.plotter();
    let plot = plotter.stats();
    let scene = plotter.sink();
    tracing::info!(
        "Done: {} samples in {} batches, {} kept, {} discarded",
        stats.samples,
        stats.batches,
        plot.accepted,
        plot.discarded
    );
    for line in scene.lines() {
        tracing::info!(
            "{}: {} strokes, {} @ {}",
            line.segment,
            line.stroke_count(),
            line.style.color,
            line.style.thickness
        );
    }
    if let Some(marker) = scene.marker() {
        tracing::info!("Marker at {}", marker.label_text);
    }

    Ok(())
}
