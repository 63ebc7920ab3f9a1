//! Online trace simplification
//!
//! [`TraceBuilder::accept`] consumes one point at a time, in arrival order:
//!
//! 1. The first point after construction or [`TraceBuilder::clear`] starts a
//!    trace with an empty segment and a zero direction.
//! 2. Points closer than `min_distance` to the anchor are dropped (jitter).
//! 3. A color change, or a positive thickness that differs from the active
//!    segment's, opens a new segment. Non-positive thickness means "keep".
//! 4. The first stroke of a segment is always appended as a new pair.
//! 5. Otherwise the unit step is compared against the anchor direction: if
//!    the squared cross product is below [`COLLINEARITY_THRESHOLD`] the last
//!    vertex moves forward and the step is added to the direction (a running
//!    sum, never renormalized). Any larger turn appends a new pair and resets
//!    the direction to the step.
//!
//! The builder never blocks and never fails; it is driven from the single
//! consumer context and is not shared across threads.

use super::marker::{MarkerFormat, MarkerState};
use super::{Segment, SegmentId, Trace};
use crate::config::PlotConfig;
use crate::types::{Color, Point3, Style, StyledPoint, Vector3, DEFAULT_THICKNESS};

/// Squared cross product below which two unit steps count as one line
pub const COLLINEARITY_THRESHOLD: f64 = 0.0005;

/// Last accepted point and the running direction of the current stroke
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Anchor {
    pub last_point: Point3,
    pub direction: Vector3,
}

impl Anchor {
    fn at(point: Point3) -> Self {
        Self {
            last_point: point,
            direction: Vector3::ZERO,
        }
    }
}

/// What a call to [`TraceBuilder::accept`] did to the trace
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AcceptOutcome {
    /// Too close to the anchor; nothing changed
    Discarded,
    /// A new trace was started with one empty segment
    TraceStarted { segment: SegmentId, style: Style },
    /// A new stroke was appended, possibly to a freshly opened segment
    PairAppended {
        segment: SegmentId,
        from: Point3,
        to: Point3,
        opened: Option<Style>,
    },
    /// The end of the last stroke moved to `to`
    Extended { segment: SegmentId, to: Point3 },
}

impl AcceptOutcome {
    pub fn is_accepted(&self) -> bool {
        !matches!(self, AcceptOutcome::Discarded)
    }
}

#[derive(Debug, Clone)]
struct ActiveTrace {
    trace: Trace,
    anchor: Anchor,
}

/// Incremental simplifier that owns the current trace
#[derive(Debug, Clone)]
pub struct TraceBuilder {
    min_distance_squared: f64,
    marker_format: Option<MarkerFormat>,
    active: Option<ActiveTrace>,
    /// Earlier traces kept on screen after [`TraceBuilder::new_trace`]
    archived: Vec<Trace>,
    marker: Option<MarkerState>,
    next_segment: u64,
}

impl TraceBuilder {
    /// Create a builder from the plot configuration
    ///
    /// The marker is only tracked when the marker element is enabled.
    pub fn new(config: &PlotConfig) -> Self {
        let marker_format = config
            .elements
            .marker
            .then(|| MarkerFormat::from_config(config));

        Self {
            min_distance_squared: config.min_distance_squared(),
            marker_format,
            active: None,
            archived: Vec::new(),
            marker: None,
            next_segment: 0,
        }
    }

    /// Add a point with the given style
    pub fn accept(&mut self, point: Point3, color: Color, thickness: f64) -> AcceptOutcome {
        let Some(active) = self.active.as_mut() else {
            return self.start_trace(point, color, thickness);
        };

        let anchor = active.anchor;
        if point.distance_squared(&anchor.last_point) < self.min_distance_squared {
            return AcceptOutcome::Discarded;
        }

        let current = active.trace.active_segment().style();
        let mut opened = None;
        if color != current.color || (thickness > 0.0 && thickness != current.thickness) {
            let thickness = if thickness > 0.0 {
                thickness
            } else {
                current.thickness
            };
            let style = Style::new(color, thickness);
            let id = SegmentId(self.next_segment);
            self.next_segment += 1;

            active.trace.push_segment(Segment::new(id, style));
            active.anchor.direction = Vector3::ZERO;
            opened = Some(style);
            tracing::debug!("Opened {} ({} @ {})", id, style.color, style.thickness);
        }

        let segment = active.trace.active_segment_mut();
        let id = segment.id();
        let step = (point - anchor.last_point).normalized();

        let outcome = match step {
            // Coincident with the anchor (only possible with a zero min distance)
            None => {
                if segment.replace_last(point) {
                    AcceptOutcome::Extended { segment: id, to: point }
                } else {
                    segment.push_pair(anchor.last_point, point);
                    AcceptOutcome::PairAppended {
                        segment: id,
                        from: anchor.last_point,
                        to: point,
                        opened,
                    }
                }
            }
            Some(unit) => {
                let same_direction = !segment.is_empty()
                    && unit.cross(&active.anchor.direction).length_squared()
                        < COLLINEARITY_THRESHOLD;

                if same_direction {
                    segment.replace_last(point);
                    active.anchor.direction += unit;
                    AcceptOutcome::Extended { segment: id, to: point }
                } else {
                    segment.push_pair(anchor.last_point, point);
                    active.anchor.direction = unit;
                    AcceptOutcome::PairAppended {
                        segment: id,
                        from: anchor.last_point,
                        to: point,
                        opened,
                    }
                }
            }
        };

        active.anchor.last_point = point;
        self.update_marker(point);
        tracing::trace!("Accepted {} -> {:?}", point, outcome);
        outcome
    }

    /// Add a styled point produced by the batcher
    pub fn accept_styled(&mut self, sample: &StyledPoint) -> AcceptOutcome {
        self.accept(sample.point, sample.color, sample.thickness)
    }

    /// Add a point using the active segment's style
    pub fn accept_point(&mut self, point: Point3) -> AcceptOutcome {
        let style = self.current_style();
        self.accept(point, style.color, style.thickness)
    }

    /// Start a new trace at `point`; the previous trace stays displayed
    /// until [`TraceBuilder::clear`]
    pub fn new_trace(&mut self, point: Point3, color: Color, thickness: f64) -> AcceptOutcome {
        if let Some(previous) = self.active.take() {
            self.archived.push(previous.trace);
        }
        self.start_trace(point, color, thickness)
    }

    /// Discard every trace and the anchor
    pub fn clear(&mut self) {
        self.active = None;
        self.archived.clear();
        self.marker = None;
        tracing::debug!("Trace cleared");
    }

    fn start_trace(&mut self, point: Point3, color: Color, thickness: f64) -> AcceptOutcome {
        let thickness = if thickness > 0.0 {
            thickness
        } else {
            DEFAULT_THICKNESS
        };
        let style = Style::new(color, thickness);
        let id = SegmentId(self.next_segment);
        self.next_segment += 1;

        self.active = Some(ActiveTrace {
            trace: Trace::new(Segment::new(id, style)),
            anchor: Anchor::at(point),
        });
        self.update_marker(point);
        tracing::debug!("Started trace at {} with {}", point, id);

        AcceptOutcome::TraceStarted { segment: id, style }
    }

    fn update_marker(&mut self, point: Point3) {
        if let Some(format) = self.marker_format {
            self.marker = Some(format.marker_at(point));
        }
    }

    /// The trace being extended, if any
    pub fn trace(&self) -> Option<&Trace> {
        self.active.as_ref().map(|a| &a.trace)
    }

    /// Traces finished by [`TraceBuilder::new_trace`], oldest first
    pub fn archived_traces(&self) -> &[Trace] {
        &self.archived
    }

    pub fn anchor(&self) -> Option<&Anchor> {
        self.active.as_ref().map(|a| &a.anchor)
    }

    pub fn marker(&self) -> Option<&MarkerState> {
        self.marker.as_ref()
    }

    /// Style of the active segment; black at thickness 1 without a trace
    pub fn current_style(&self) -> Style {
        self.trace()
            .map(|t| t.active_segment().style())
            .unwrap_or_default()
    }

    pub fn color(&self) -> Color {
        self.current_style().color
    }

    pub fn thickness(&self) -> f64 {
        self.current_style().thickness
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    fn builder(min_distance: f64) -> TraceBuilder {
        let config = PlotConfig {
            min_distance,
            ..Default::default()
        };
        TraceBuilder::new(&config)
    }

    fn pairs(segment: &Segment) -> Vec<(Point3, Point3)> {
        segment.pairs().collect()
    }

    #[test]
    fn test_first_point_starts_trace() {
        let mut b = builder(0.1);
        let outcome = b.accept(p(1.0, 2.0, 3.0), Color::BLUE, 2.0);

        assert!(matches!(outcome, AcceptOutcome::TraceStarted { .. }));
        let trace = b.trace().unwrap();
        assert_eq!(trace.segment_count(), 1);
        assert!(trace.active_segment().is_empty());
        assert_eq!(trace.active_segment().style(), Style::new(Color::BLUE, 2.0));
        assert_eq!(
            b.anchor(),
            Some(&Anchor {
                last_point: p(1.0, 2.0, 3.0),
                direction: Vector3::ZERO
            })
        );
        assert_eq!(b.marker().unwrap().label_text, "1.0, 2.0, 3.0");
    }

    #[test]
    fn test_first_point_without_thickness_uses_default() {
        let mut b = builder(0.1);
        b.accept(p(0.0, 0.0, 0.0), Color::BLACK, -1.0);
        assert_eq!(b.thickness(), DEFAULT_THICKNESS);
    }

    #[test]
    fn test_huge_turn_starts_new_pair() {
        let mut b = builder(0.1);
        b.accept(p(0.0, 0.0, 0.0), Color::BLACK, 1.0);
        b.accept(p(1.0, 0.0, 0.0), Color::BLACK, 1.0);

        let outcome = b.accept(p(1.0, 1e200, 0.0), Color::BLACK, 1.0);
        assert!(matches!(outcome, AcceptOutcome::PairAppended { .. }));
        assert_eq!(b.trace().unwrap().pair_count(), 2);
        assert_eq!(b.anchor().unwrap().direction, Vector3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn test_straight_then_turn() {
        let mut b = builder(0.0);
        for point in [p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0), p(2.0, 0.0, 0.0), p(2.0, 1.0, 0.0)] {
            b.accept(point, Color::BLACK, 1.0);
        }

        let trace = b.trace().unwrap();
        assert_eq!(trace.segment_count(), 1);
        assert_eq!(
            pairs(trace.active_segment()),
            vec![
                (p(0.0, 0.0, 0.0), p(2.0, 0.0, 0.0)),
                (p(2.0, 0.0, 0.0), p(2.0, 1.0, 0.0)),
            ]
        );
    }

    #[test]
    fn test_color_change_splits_segments() {
        let mut b = builder(0.0);
        b.accept(p(0.0, 0.0, 0.0), Color::BLACK, 1.0);
        b.accept(p(1.0, 0.0, 0.0), Color::BLACK, 1.0);
        b.accept(p(2.0, 0.0, 0.0), Color::RED, 1.0);
        b.accept(p(2.0, 1.0, 0.0), Color::RED, 1.0);

        let segments = b.trace().unwrap().segments();
        assert_eq!(segments.len(), 2);
        assert_eq!(
            pairs(&segments[0]),
            vec![(p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0))]
        );
        assert_eq!(
            pairs(&segments[1]),
            vec![
                (p(1.0, 0.0, 0.0), p(2.0, 0.0, 0.0)),
                (p(2.0, 0.0, 0.0), p(2.0, 1.0, 0.0)),
            ]
        );
        assert_eq!(segments[1].style().color, Color::RED);
    }

    #[test]
    fn test_style_change_on_straight_line_still_splits() {
        let mut b = builder(0.0);
        b.accept(p(0.0, 0.0, 0.0), Color::BLACK, 1.0);
        b.accept(p(1.0, 0.0, 0.0), Color::BLACK, 1.0);
        let outcome = b.accept(p(2.0, 0.0, 0.0), Color::BLACK, 3.0);

        assert!(matches!(
            outcome,
            AcceptOutcome::PairAppended { opened: Some(style), .. } if style.thickness == 3.0
        ));
        assert_eq!(b.trace().unwrap().segment_count(), 2);
    }

    #[test]
    fn test_non_positive_thickness_keeps_segment_thickness() {
        let mut b = builder(0.0);
        b.accept(p(0.0, 0.0, 0.0), Color::BLACK, 2.5);
        b.accept(p(1.0, 0.0, 0.0), Color::BLACK, 0.0);
        b.accept(p(2.0, 0.0, 0.0), Color::BLACK, -4.0);
        assert_eq!(b.trace().unwrap().segment_count(), 1);

        // A color change without thickness inherits the current one
        b.accept(p(3.0, 0.0, 0.0), Color::RED, 0.0);
        assert_eq!(b.current_style(), Style::new(Color::RED, 2.5));
    }

    #[test]
    fn test_jitter_is_discarded() {
        let mut b = builder(0.5);
        b.accept(p(0.0, 0.0, 0.0), Color::BLACK, 1.0);
        b.accept(p(1.0, 0.0, 0.0), Color::BLACK, 1.0);
        let before = b.clone();

        let outcome = b.accept(p(1.3, 0.2, 0.0), Color::RED, 5.0);
        assert_eq!(outcome, AcceptOutcome::Discarded);
        assert_eq!(b.trace(), before.trace());
        assert_eq!(b.anchor(), before.anchor());
        assert_eq!(b.marker(), before.marker());
    }

    #[test]
    fn test_point_at_exactly_min_distance_is_kept() {
        let mut b = builder(1.0);
        b.accept(p(0.0, 0.0, 0.0), Color::BLACK, 1.0);
        assert!(b.accept(p(1.0, 0.0, 0.0), Color::BLACK, 1.0).is_accepted());
    }

    #[test]
    fn test_coincident_point_extends_without_turning() {
        let mut b = builder(0.0);
        b.accept(p(0.0, 0.0, 0.0), Color::BLACK, 1.0);
        b.accept(p(1.0, 0.0, 0.0), Color::BLACK, 1.0);
        let direction = b.anchor().unwrap().direction;

        let outcome = b.accept(p(1.0, 0.0, 0.0), Color::BLACK, 1.0);
        assert!(matches!(outcome, AcceptOutcome::Extended { .. }));
        assert_eq!(b.anchor().unwrap().direction, direction);
        assert_eq!(b.trace().unwrap().pair_count(), 1);
    }

    #[test]
    fn test_coincident_point_on_empty_segment_opens_degenerate_pair() {
        let mut b = builder(0.0);
        b.accept(p(1.0, 1.0, 1.0), Color::BLACK, 1.0);
        let outcome = b.accept(p(1.0, 1.0, 1.0), Color::BLACK, 1.0);

        assert!(matches!(outcome, AcceptOutcome::PairAppended { .. }));
        // The next real step stretches the degenerate stroke
        let outcome = b.accept(p(2.0, 1.0, 1.0), Color::BLACK, 1.0);
        assert!(matches!(outcome, AcceptOutcome::Extended { .. }));
        assert_eq!(
            pairs(b.trace().unwrap().active_segment()),
            vec![(p(1.0, 1.0, 1.0), p(2.0, 1.0, 1.0))]
        );
    }

    #[test]
    fn test_accumulated_direction_tightens_long_runs() {
        // Open question: whether renormalizing the direction each step would
        // visibly change output. Accumulation is kept, so after a long run a
        // shallow bend that a unit direction would absorb starts a new stroke.
        let mut b = builder(0.1);
        for i in 0..=10 {
            b.accept(p(i as f64, 0.0, 0.0), Color::BLACK, 1.0);
        }
        let direction = b.anchor().unwrap().direction;
        assert!((direction.x - 10.0).abs() < 1e-9);
        assert_eq!(b.trace().unwrap().pair_count(), 1);

        let sin = 0.01_f64;
        let cos = (1.0 - sin * sin).sqrt();
        let unit_cross_sq = sin * sin;
        assert!(unit_cross_sq < COLLINEARITY_THRESHOLD);

        let outcome = b.accept(p(10.0 + cos, sin, 0.0), Color::BLACK, 1.0);
        assert!(matches!(outcome, AcceptOutcome::PairAppended { .. }));
        assert_eq!(b.trace().unwrap().pair_count(), 2);
    }

    #[test]
    fn test_clear_then_accept_starts_over() {
        let mut b = builder(0.0);
        b.accept(p(0.0, 0.0, 0.0), Color::BLACK, 1.0);
        b.accept(p(1.0, 1.0, 0.0), Color::RED, 1.0);
        b.clear();
        assert!(b.trace().is_none());
        assert!(b.anchor().is_none());
        assert!(b.marker().is_none());

        let outcome = b.accept(p(5.0, 5.0, 5.0), Color::BLUE, 1.0);
        assert!(matches!(outcome, AcceptOutcome::TraceStarted { .. }));
        let trace = b.trace().unwrap();
        assert_eq!(trace.segment_count(), 1);
        assert_eq!(trace.pair_count(), 0);
        assert_eq!(b.anchor().unwrap().last_point, p(5.0, 5.0, 5.0));
        assert_eq!(b.anchor().unwrap().direction, Vector3::ZERO);
    }

    #[test]
    fn test_accept_point_reuses_current_style() {
        let mut b = builder(0.0);
        assert_eq!(b.current_style(), Style::default());

        b.accept_point(p(0.0, 0.0, 0.0));
        assert_eq!(b.color(), Color::BLACK);
        assert_eq!(b.thickness(), 1.0);

        b.accept(p(1.0, 0.0, 0.0), Color::RED, 2.0);
        b.accept_point(p(1.0, 1.0, 0.0));
        assert_eq!(b.trace().unwrap().segment_count(), 2);
        assert_eq!(b.current_style(), Style::new(Color::RED, 2.0));
    }

    #[test]
    fn test_new_trace_archives_previous() {
        let mut b = builder(0.0);
        b.accept(p(0.0, 0.0, 0.0), Color::BLACK, 1.0);
        b.accept(p(1.0, 0.0, 0.0), Color::BLACK, 1.0);

        let outcome = b.new_trace(p(10.0, 10.0, 0.0), Color::BLUE, 0.0);
        assert!(matches!(outcome, AcceptOutcome::TraceStarted { .. }));
        assert_eq!(b.archived_traces().len(), 1);
        assert_eq!(b.archived_traces()[0].pair_count(), 1);
        assert_eq!(b.current_style(), Style::new(Color::BLUE, DEFAULT_THICKNESS));

        b.clear();
        assert!(b.archived_traces().is_empty());
    }

    #[test]
    fn test_segment_ids_are_never_reused() {
        let mut b = builder(0.0);
        let first = b.accept(p(0.0, 0.0, 0.0), Color::BLACK, 1.0);
        b.clear();
        let second = b.accept(p(0.0, 0.0, 0.0), Color::BLACK, 1.0);
        match (first, second) {
            (
                AcceptOutcome::TraceStarted { segment: first_id, .. },
                AcceptOutcome::TraceStarted { segment: second_id, .. },
            ) => assert!(second_id > first_id),
            other => panic!("unexpected outcomes: {other:?}"),
        }
    }

    #[test]
    fn test_marker_disabled() {
        let mut config = PlotConfig::default();
        config.elements.marker = false;
        let mut b = TraceBuilder::new(&config);
        b.accept(p(0.0, 0.0, 0.0), Color::BLACK, 1.0);
        b.accept(p(1.0, 0.0, 0.0), Color::BLACK, 1.0);
        assert!(b.marker().is_none());
    }

    #[test]
    fn test_segment_vertex_count_stays_even() {
        let mut b = builder(0.0);
        let path = [
            p(0.0, 0.0, 0.0),
            p(1.0, 0.0, 0.0),
            p(1.0, 1.0, 0.0),
            p(1.0, 1.0, 1.0),
            p(2.0, 2.0, 2.0),
        ];
        for point in path {
            b.accept(point, Color::BLACK, 1.0);
        }
        for segment in b.trace().unwrap().segments() {
            assert_eq!(segment.vertices().len() % 2, 0);
        }
    }

    fn unit_direction() -> impl Strategy<Value = Vector3> {
        (-1.0f64..1.0, -1.0f64..1.0, -1.0f64..1.0)
            .prop_filter_map("non-zero direction", |(x, y, z)| {
                let v = Vector3::new(x, y, z);
                (v.length() > 0.1).then(|| v.normalized()).flatten()
            })
    }

    proptest! {
        #[test]
        fn prop_jitter_is_a_no_op(
            start in (-100.0f64..100.0, -100.0f64..100.0, -100.0f64..100.0),
            dir in unit_direction(),
            fraction in 0.0f64..0.99,
        ) {
            let mut b = builder(0.5);
            let start = p(start.0, start.1, start.2);
            b.accept(start, Color::BLACK, 1.0);
            let second = start.offset(Vector3::new(1.0, 0.0, 0.0));
            b.accept(second, Color::BLACK, 1.0);
            let before = b.clone();

            let d = 0.5 * fraction;
            let jitter = second.offset(Vector3::new(dir.x * d, dir.y * d, dir.z * d));
            prop_assert_eq!(b.accept(jitter, Color::RED, 3.0), AcceptOutcome::Discarded);
            prop_assert_eq!(b.trace(), before.trace());
            prop_assert_eq!(b.anchor(), before.anchor());
            prop_assert_eq!(b.marker(), before.marker());
        }

        #[test]
        fn prop_collinear_run_adds_one_pair(
            dir in unit_direction(),
            steps in prop::collection::vec(0.2f64..5.0, 2..40),
        ) {
            let mut b = builder(0.1);
            let mut point = p(1.0, 2.0, 3.0);
            b.accept(point, Color::BLACK, 1.0);

            for step in &steps {
                point = point.offset(Vector3::new(dir.x * step, dir.y * step, dir.z * step));
                prop_assert!(b.accept(point, Color::BLACK, 1.0).is_accepted());
            }

            let segment = b.trace().unwrap().active_segment();
            prop_assert_eq!(segment.pair_count(), 1);
            prop_assert_eq!(segment.last_vertex(), Some(point));
        }

        #[test]
        fn prop_each_style_change_opens_a_segment(changes in 1usize..20) {
            let mut b = builder(0.0);
            b.accept(p(0.0, 0.0, 0.0), Color::BLACK, 1.0);
            b.accept(p(1.0, 0.0, 0.0), Color::BLACK, 1.0);

            for i in 0..changes {
                let color = if i % 2 == 0 { Color::RED } else { Color::BLACK };
                b.accept(p(2.0 + i as f64, 0.0, 0.0), color, 1.0);
            }
            prop_assert_eq!(b.trace().unwrap().segment_count(), changes + 1);
        }

        #[test]
        fn prop_segments_are_style_homogeneous(
            input in prop::collection::vec(
                ((-10.0f64..10.0, -10.0f64..10.0, -10.0f64..10.0), 0usize..3, -1.0f64..3.0),
                1..80,
            ),
        ) {
            let palette = [Color::BLACK, Color::RED, Color::BLUE];
            let mut b = builder(0.1);

            for ((x, y, z), color_ix, thickness) in input {
                let color = palette[color_ix];
                let outcome = b.accept(p(x, y, z), color, thickness);
                if outcome.is_accepted() {
                    let style = b.current_style();
                    prop_assert_eq!(style.color, color);
                    if thickness > 0.0 {
                        prop_assert_eq!(style.thickness, thickness);
                    }
                }
            }

            let trace = b.trace().unwrap();
            let mut previous: Option<SegmentId> = None;
            for segment in trace.segments() {
                prop_assert!(segment.style().thickness > 0.0);
                prop_assert_eq!(segment.vertices().len() % 2, 0);
                if let Some(prev) = previous {
                    prop_assert!(segment.id() > prev);
                }
                previous = Some(segment.id());
            }
        }
    }
}
