//! Trace data model and the online simplifier
//!
//! A [`Trace`] is one continuous plotted path, stored as an ordered list of
//! [`Segment`]s. Each segment has a single style and holds its geometry as
//! disjoint vertex pairs (line-list layout), not as a connected polyline:
//! vertices `[a, b, b, c]` draw the strokes `a-b` and `b-c`. Extending a
//! straight run overwrites the last vertex instead of adding a pair, which
//! keeps the vertex count proportional to the number of direction changes.
//!
//! The [`TraceBuilder`] owns the active trace and decides for every incoming
//! point whether to drop it, extend the current stroke, start a new stroke,
//! or open a new segment.

pub mod builder;
pub mod marker;

pub use builder::{AcceptOutcome, Anchor, TraceBuilder, COLLINEARITY_THRESHOLD};
pub use marker::{format_coordinates, MarkerState};

use crate::types::{Point3, Style};
use std::fmt;

/// Identifier of a segment, unique for the lifetime of a builder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SegmentId(pub u64);

impl fmt::Display for SegmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "seg#{}", self.0)
    }
}

/// A run of strokes sharing one style
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    id: SegmentId,
    style: Style,
    vertices: Vec<Point3>,
}

impl Segment {
    pub(crate) fn new(id: SegmentId, style: Style) -> Self {
        Self {
            id,
            style,
            vertices: Vec::new(),
        }
    }

    pub fn id(&self) -> SegmentId {
        self.id
    }

    pub fn style(&self) -> Style {
        self.style
    }

    /// Raw line-list vertices, always an even count
    pub fn vertices(&self) -> &[Point3] {
        &self.vertices
    }

    /// Stored strokes as `(start, end)` pairs
    pub fn pairs(&self) -> impl Iterator<Item = (Point3, Point3)> + '_ {
        self.vertices.chunks_exact(2).map(|p| (p[0], p[1]))
    }

    pub fn pair_count(&self) -> usize {
        self.vertices.len() / 2
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn last_vertex(&self) -> Option<Point3> {
        self.vertices.last().copied()
    }

    pub(crate) fn push_pair(&mut self, from: Point3, to: Point3) {
        self.vertices.push(from);
        self.vertices.push(to);
    }

    /// Move the end of the last stroke. Returns false when there is none.
    pub(crate) fn replace_last(&mut self, to: Point3) -> bool {
        match self.vertices.last_mut() {
            Some(last) => {
                *last = to;
                true
            }
            None => false,
        }
    }
}

/// One continuous plotted path
#[derive(Debug, Clone, PartialEq)]
pub struct Trace {
    segments: Vec<Segment>,
}

impl Trace {
    pub(crate) fn new(first: Segment) -> Self {
        Self {
            segments: vec![first],
        }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    /// The segment currently being extended
    pub fn active_segment(&self) -> &Segment {
        // A trace is never constructed without a segment.
        &self.segments[self.segments.len() - 1]
    }

    pub(crate) fn active_segment_mut(&mut self) -> &mut Segment {
        let last = self.segments.len() - 1;
        &mut self.segments[last]
    }

    pub(crate) fn push_segment(&mut self, segment: Segment) {
        self.segments.push(segment);
    }

    /// Total stored strokes across all segments
    pub fn pair_count(&self) -> usize {
        self.segments.iter().map(Segment::pair_count).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Color;

    #[test]
    fn test_segment_pairs_and_replace() {
        let mut seg = Segment::new(SegmentId(0), Style::default());
        assert!(seg.is_empty());
        assert!(!seg.replace_last(Point3::ORIGIN));

        let a = Point3::new(0.0, 0.0, 0.0);
        let b = Point3::new(1.0, 0.0, 0.0);
        let c = Point3::new(2.0, 0.0, 0.0);
        seg.push_pair(a, b);
        assert!(seg.replace_last(c));

        let pairs: Vec<_> = seg.pairs().collect();
        assert_eq!(pairs, vec![(a, c)]);
        assert_eq!(seg.last_vertex(), Some(c));
    }

    #[test]
    fn test_trace_active_segment_is_last() {
        let mut trace = Trace::new(Segment::new(SegmentId(0), Style::default()));
        trace.push_segment(Segment::new(SegmentId(1), Style::new(Color::RED, 2.0)));
        assert_eq!(trace.segment_count(), 2);
        assert_eq!(trace.active_segment().id(), SegmentId(1));
        assert_eq!(trace.active_segment().style().color, Color::RED);
    }
}
