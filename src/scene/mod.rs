//! Scene side of the plot
//!
//! The renderer is an external collaborator reached through [`SceneSink`].
//! A sink receives line-list objects (one per trace segment), vertex
//! appends and last-vertex replacements on them, marker updates, and a
//! full reset with the static [`Decorations`] whenever the plot is cleared.
//!
//! - [`Plotter`] - Drives a [`TraceBuilder`](crate::trace::TraceBuilder) and
//!   mirrors every change into a sink
//! - [`RecordingScene`] - In-memory sink, used headless and in tests

pub mod decorations;
pub mod plotter;
pub mod recording;

pub use decorations::{AxisDecoration, Decorations, GridDecoration, MarkerCone};
pub use plotter::{PlotStats, Plotter};
pub use recording::{LineList, RecordingScene};

use crate::trace::{MarkerState, SegmentId};
use crate::types::{Point3, Style};

/// Receiver of scene geometry
#[cfg_attr(test, mockall::automock)]
pub trait SceneSink {
    /// Drop every trace object and rebuild the static decorations
    fn reset_scene(&mut self, decorations: &Decorations);

    /// Create an empty styled line-list object for a new segment
    fn create_line_list(&mut self, segment: SegmentId, style: Style);

    /// Append one vertex to a line list
    fn push_vertex(&mut self, segment: SegmentId, vertex: Point3);

    /// Replace the last vertex of a line list
    fn replace_last_vertex(&mut self, segment: SegmentId, vertex: Point3);

    /// Move the marker and its coordinate label
    fn update_marker(&mut self, marker: &MarkerState);
}

impl<S: SceneSink + ?Sized> SceneSink for &mut S {
    fn reset_scene(&mut self, decorations: &Decorations) {
        (**self).reset_scene(decorations)
    }

    fn create_line_list(&mut self, segment: SegmentId, style: Style) {
        (**self).create_line_list(segment, style)
    }

    fn push_vertex(&mut self, segment: SegmentId, vertex: Point3) {
        (**self).push_vertex(segment, vertex)
    }

    fn replace_last_vertex(&mut self, segment: SegmentId, vertex: Point3) {
        (**self).replace_last_vertex(segment, vertex)
    }

    fn update_marker(&mut self, marker: &MarkerState) {
        (**self).update_marker(marker)
    }
}
