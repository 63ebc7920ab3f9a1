//! In-memory scene sink
//!
//! Keeps the line lists, the marker and the last decorations exactly as a
//! renderer would receive them. The headless binary reports from it, and
//! tests use it to check that the scene mirrors the trace.

use super::{Decorations, SceneSink};
use crate::trace::{MarkerState, SegmentId};
use crate::types::{Point3, Style};
use std::collections::HashMap;

/// A styled line-list object: consecutive vertex pairs are strokes
#[derive(Debug, Clone, PartialEq)]
pub struct LineList {
    pub segment: SegmentId,
    pub style: Style,
    pub vertices: Vec<Point3>,
}

impl LineList {
    pub fn stroke_count(&self) -> usize {
        self.vertices.len() / 2
    }
}

/// Sink that records the scene in memory
#[derive(Debug, Default)]
pub struct RecordingScene {
    lines: Vec<LineList>,
    index: HashMap<SegmentId, usize>,
    marker: Option<MarkerState>,
    decorations: Option<Decorations>,
    resets: usize,
    vertex_updates: usize,
}

impl RecordingScene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Line lists in creation order
    pub fn lines(&self) -> &[LineList] {
        &self.lines
    }

    pub fn line(&self, segment: SegmentId) -> Option<&LineList> {
        self.index.get(&segment).map(|&i| &self.lines[i])
    }

    pub fn marker(&self) -> Option<&MarkerState> {
        self.marker.as_ref()
    }

    pub fn decorations(&self) -> Option<&Decorations> {
        self.decorations.as_ref()
    }

    pub fn reset_count(&self) -> usize {
        self.resets
    }

    /// Number of push/replace calls received
    pub fn vertex_updates(&self) -> usize {
        self.vertex_updates
    }

    pub fn total_strokes(&self) -> usize {
        self.lines.iter().map(LineList::stroke_count).sum()
    }

    fn line_mut(&mut self, segment: SegmentId) -> Option<&mut LineList> {
        match self.index.get(&segment) {
            Some(&i) => Some(&mut self.lines[i]),
            None => {
                tracing::warn!("Vertex update for unknown line list {}", segment);
                None
            }
        }
    }
}

impl SceneSink for RecordingScene {
    fn reset_scene(&mut self, decorations: &Decorations) {
        self.lines.clear();
        self.index.clear();
        self.marker = decorations.initial_marker.clone();
        self.decorations = Some(decorations.clone());
        self.resets += 1;
    }

    fn create_line_list(&mut self, segment: SegmentId, style: Style) {
        self.index.insert(segment, self.lines.len());
        self.lines.push(LineList {
            segment,
            style,
            vertices: Vec::new(),
        });
    }

    fn push_vertex(&mut self, segment: SegmentId, vertex: Point3) {
        self.vertex_updates += 1;
        if let Some(line) = self.line_mut(segment) {
            line.vertices.push(vertex);
        }
    }

    fn replace_last_vertex(&mut self, segment: SegmentId, vertex: Point3) {
        self.vertex_updates += 1;
        if let Some(last) = self.line_mut(segment).and_then(|l| l.vertices.last_mut()) {
            *last = vertex;
        }
    }

    fn update_marker(&mut self, marker: &MarkerState) {
        self.marker = Some(marker.clone());
    }
}
