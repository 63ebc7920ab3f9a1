//! Plot and ingestion settings
//!
//! These structs are passed explicitly at construction time; nothing in the
//! crate reads ambient global configuration.
//!
//! # Main Types
//!
//! - [`PlotConfig`] - Bounding box, minimum point distance, marker format
//! - [`PlotElements`] - Which static decorations and the marker are shown
//! - [`IngestConfig`] - Batcher cadence, batch size and default sample style

use crate::types::{Color, Point3, Style};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default distance below which a new point is treated as jitter
pub const DEFAULT_MIN_DISTANCE: f64 = 0.1;

/// Default number of samples per batch
pub const DEFAULT_BATCH_SIZE: usize = 50;

/// Default batcher tick in milliseconds
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 100;

/// Default line thickness attached to unstyled samples
pub const DEFAULT_SAMPLE_THICKNESS: f64 = 1.5;

/// Axis-aligned plot bounds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub origin: Point3,
    pub size_x: f64,
    pub size_y: f64,
    pub size_z: f64,
}

impl BoundingBox {
    pub fn new(origin: Point3, size_x: f64, size_y: f64, size_z: f64) -> Self {
        Self {
            origin,
            size_x,
            size_y,
            size_z,
        }
    }

    /// Largest extent along any axis
    pub fn max_size(&self) -> f64 {
        self.size_x.max(self.size_y).max(self.size_z)
    }

    /// Whether the box has depth (2D plots have none)
    pub fn has_depth(&self) -> bool {
        self.size_z > 0.0
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::new(Point3::ORIGIN, 100.0, 100.0, 50.0)
    }
}

/// Which plot elements are included
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlotElements {
    #[serde(default = "default_true")]
    pub axes: bool,
    #[serde(default = "default_true")]
    pub grid: bool,
    #[serde(default = "default_true")]
    pub bounding_box: bool,
    #[serde(default = "default_true")]
    pub marker: bool,
}

impl PlotElements {
    /// Axes, grid, bounding box and marker
    pub const fn all() -> Self {
        Self {
            axes: true,
            grid: true,
            bounding_box: true,
            marker: true,
        }
    }

    /// Traces only
    pub const fn none() -> Self {
        Self {
            axes: false,
            grid: false,
            bounding_box: false,
            marker: false,
        }
    }
}

impl Default for PlotElements {
    fn default() -> Self {
        Self::all()
    }
}

fn default_true() -> bool {
    true
}

/// Configuration of the plot surface and the trace simplifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotConfig {
    /// Axis labels separated by commas
    #[serde(default = "default_axis_labels")]
    pub axis_labels: String,

    #[serde(default)]
    pub bounding_box: BoundingBox,

    /// Distance between ticks on the XY grid
    #[serde(default = "default_tick_size")]
    pub tick_size: f64,

    /// A point closer than this to the previous accepted point is dropped
    #[serde(default = "default_min_distance")]
    pub min_distance: f64,

    /// Decimal places of the marker coordinate readout
    #[serde(default = "default_decimal_places")]
    pub decimal_places: usize,

    #[serde(default = "default_axis_color")]
    pub axis_color: Color,

    #[serde(default = "default_marker_color")]
    pub marker_color: Color,

    #[serde(default = "default_background")]
    pub background: Color,

    #[serde(default)]
    pub elements: PlotElements,
}

fn default_axis_labels() -> String {
    "X,Y,Z".to_string()
}

fn default_tick_size() -> f64 {
    10.0
}

fn default_min_distance() -> f64 {
    DEFAULT_MIN_DISTANCE
}

fn default_decimal_places() -> usize {
    1
}

fn default_axis_color() -> Color {
    Color::GRAY
}

fn default_marker_color() -> Color {
    Color::RED
}

fn default_background() -> Color {
    Color::WHITE
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            axis_labels: default_axis_labels(),
            bounding_box: BoundingBox::default(),
            tick_size: default_tick_size(),
            min_distance: DEFAULT_MIN_DISTANCE,
            decimal_places: default_decimal_places(),
            axis_color: Color::GRAY,
            marker_color: Color::RED,
            background: Color::WHITE,
            elements: PlotElements::all(),
        }
    }
}

impl PlotConfig {
    /// Axis labels, falling back to X/Y/Z when fewer than three are given
    pub fn labels(&self) -> [String; 3] {
        let parts: Vec<&str> = self.axis_labels.split(',').collect();
        if parts.len() < 3 {
            return ["X".to_string(), "Y".to_string(), "Z".to_string()];
        }
        [
            parts[0].to_string(),
            parts[1].to_string(),
            parts[2].to_string(),
        ]
    }

    /// Squared jitter threshold used by the simplifier
    pub fn min_distance_squared(&self) -> f64 {
        self.min_distance * self.min_distance
    }

    /// Line thickness of the static decorations
    pub fn line_thickness(&self) -> f64 {
        self.bounding_box.max_size() / 1000.0
    }

    pub fn arrow_offset(&self) -> f64 {
        self.line_thickness() * 30.0
    }

    /// Distance between a point and its floating label
    pub fn label_offset(&self) -> f64 {
        self.line_thickness() * 50.0
    }
}

/// Configuration of the producer side
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngestConfig {
    /// Sleep between batcher reads
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,

    /// Maximum samples per batch (K)
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// Color attached to samples that carry no style
    #[serde(default)]
    pub color: Color,

    /// Thickness attached to samples that carry no style
    #[serde(default = "default_sample_thickness")]
    pub thickness: f64,
}

fn default_tick_interval_ms() -> u64 {
    DEFAULT_TICK_INTERVAL_MS
}

fn default_batch_size() -> usize {
    DEFAULT_BATCH_SIZE
}

fn default_sample_thickness() -> f64 {
    DEFAULT_SAMPLE_THICKNESS
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            batch_size: DEFAULT_BATCH_SIZE,
            color: Color::BLACK,
            thickness: DEFAULT_SAMPLE_THICKNESS,
        }
    }
}

impl IngestConfig {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Batch size, never below one
    pub fn effective_batch_size(&self) -> usize {
        self.batch_size.max(1)
    }

    pub fn default_style(&self) -> Style {
        Style::new(self.color, self.thickness)
    }
}
