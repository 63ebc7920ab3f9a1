//! Marker readout of the most recently accepted point

use crate::config::PlotConfig;
use crate::types::{Point3, Vector3};

/// Format a point as `"x, y, z"` with a fixed number of decimals
pub fn format_coordinates(point: &Point3, decimal_places: usize) -> String {
    format!(
        "{:.*}, {:.*}, {:.*}",
        decimal_places, point.x, decimal_places, point.y, decimal_places, point.z
    )
}

/// Position and label of the marker
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerState {
    /// Tip of the marker cone, on the accepted point
    pub position: Point3,
    /// Where the coordinate label floats, offset up and away from the point
    pub label_position: Point3,
    pub label_text: String,
}

/// How marker labels are placed and formatted
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerFormat {
    pub decimal_places: usize,
    pub label_offset: f64,
}

impl MarkerFormat {
    pub fn from_config(config: &PlotConfig) -> Self {
        Self {
            decimal_places: config.decimal_places,
            label_offset: config.label_offset(),
        }
    }

    /// Marker state for a point
    pub fn marker_at(&self, point: Point3) -> MarkerState {
        let off = self.label_offset;
        MarkerState {
            position: point,
            label_position: point.offset(Vector3::new(-off, -off, off)),
            label_text: format_coordinates(&point, self.decimal_places),
        }
    }
}
