//! Applies trace builder decisions to a scene sink
//!
//! The plotter lives in the consumer context. It owns the
//! [`TraceBuilder`] and the sink, so every trace mutation and every scene
//! call happens on one thread.

use super::{Decorations, SceneSink};
use crate::config::PlotConfig;
use crate::trace::{AcceptOutcome, TraceBuilder};
use crate::types::{Color, Point3, Style, StyledPoint};

/// Counters over the plotter's lifetime
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlotStats {
    pub accepted: u64,
    pub discarded: u64,
    pub segments_created: u64,
    pub resets: u64,
}

/// Trace builder bound to a scene sink
pub struct Plotter<S> {
    builder: TraceBuilder,
    decorations: Decorations,
    sink: S,
    stats: PlotStats,
}

impl<S: SceneSink> Plotter<S> {
    /// Create a plotter and draw the static decorations
    pub fn new(config: &PlotConfig, mut sink: S) -> Self {
        let decorations = Decorations::build(config);
        sink.reset_scene(&decorations);

        Self {
            builder: TraceBuilder::new(config),
            decorations,
            sink,
            stats: PlotStats::default(),
        }
    }

    pub fn accept(&mut self, point: Point3, color: Color, thickness: f64) -> AcceptOutcome {
        let outcome = self.builder.accept(point, color, thickness);
        self.apply(outcome);
        outcome
    }

    pub fn accept_styled(&mut self, sample: &StyledPoint) -> AcceptOutcome {
        self.accept(sample.point, sample.color, sample.thickness)
    }

    /// Add a point in the active segment's style
    pub fn accept_point(&mut self, point: Point3) -> AcceptOutcome {
        let outcome = self.builder.accept_point(point);
        self.apply(outcome);
        outcome
    }

    /// Feed a whole batch in order; returns how many points were kept
    pub fn accept_batch(&mut self, samples: &[StyledPoint]) -> usize {
        let mut kept = 0;
        for sample in samples {
            if self.accept_styled(sample).is_accepted() {
                kept += 1;
            }
        }
        kept
    }

    /// Start a new trace, keeping the earlier ones on screen
    pub fn new_trace(&mut self, point: Point3, color: Color, thickness: f64) -> AcceptOutcome {
        let outcome = self.builder.new_trace(point, color, thickness);
        self.apply(outcome);
        outcome
    }

    /// Remove all traces and rebuild the decorations
    pub fn clear(&mut self) {
        self.builder.clear();
        self.sink.reset_scene(&self.decorations);
        self.stats.resets += 1;
    }

    fn apply(&mut self, outcome: AcceptOutcome) {
        match outcome {
            AcceptOutcome::Discarded => {
                self.stats.discarded += 1;
                return;
            }
            AcceptOutcome::TraceStarted { segment, style } => {
                self.sink.create_line_list(segment, style);
                self.stats.segments_created += 1;
            }
            AcceptOutcome::PairAppended {
                segment,
                from,
                to,
                opened,
            } => {
                if let Some(style) = opened {
                    self.sink.create_line_list(segment, style);
                    self.stats.segments_created += 1;
                }
                self.sink.push_vertex(segment, from);
                self.sink.push_vertex(segment, to);
            }
            AcceptOutcome::Extended { segment, to } => {
                self.sink.replace_last_vertex(segment, to);
            }
        }

        self.stats.accepted += 1;
        if let Some(marker) = self.builder.marker() {
            self.sink.update_marker(marker);
        }
    }

    pub fn builder(&self) -> &TraceBuilder {
        &self.builder
    }

    pub fn decorations(&self) -> &Decorations {
        &self.decorations
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    pub fn stats(&self) -> PlotStats {
        self.stats
    }

    pub fn current_style(&self) -> Style {
        self.builder.current_style()
    }
}
