//! Static plot decorations
//!
//! Axes, grid, bounding box and the marker cone are fixed geometry derived
//! from [`PlotConfig`]. They are described here as plain data and handed to
//! the scene sink, which decides how to draw them.

use crate::config::{BoundingBox, PlotConfig};
use crate::trace::marker::{MarkerFormat, MarkerState};
use crate::types::{Color, Point3, Vector3};

/// An axis arrow from the origin with its floating label
#[derive(Debug, Clone, PartialEq)]
pub struct AxisDecoration {
    pub label: String,
    pub arrow_end: Point3,
    pub diameter: f64,
    pub label_position: Point3,
}

/// XY grid on the floor of the bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridDecoration {
    pub center: Point3,
    pub length: f64,
    pub width: f64,
    pub minor_distance: f64,
    pub major_distance: f64,
    pub thickness: f64,
}

/// Cone pointing at the most recent point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerCone {
    pub height: f64,
    pub base_radius: f64,
    pub top_radius: f64,
    pub normal: Vector3,
}

/// Everything drawn besides the traces
#[derive(Debug, Clone, PartialEq)]
pub struct Decorations {
    pub background: Color,
    pub axis_color: Color,
    pub marker_color: Color,
    pub axes: Vec<AxisDecoration>,
    pub grid: Option<GridDecoration>,
    pub bounding_box: Option<BoundingBox>,
    pub marker_cone: Option<MarkerCone>,
    /// Marker placement before any point has been accepted
    pub initial_marker: Option<MarkerState>,
}

impl Decorations {
    pub fn build(config: &PlotConfig) -> Self {
        let bb = config.bounding_box;
        let line_thickness = config.line_thickness();
        let arrow_offset = config.arrow_offset();
        let label_offset = config.label_offset();
        let elements = config.elements;

        let grid = elements.grid.then(|| GridDecoration {
            center: Point3::new(
                bb.origin.x + 0.5 * bb.size_x,
                bb.origin.y + 0.5 * bb.size_y,
                bb.origin.z,
            ),
            length: bb.size_x,
            width: bb.size_y,
            minor_distance: config.tick_size,
            major_distance: bb.max_size(),
            thickness: line_thickness,
        });

        let mut axes = Vec::new();
        if elements.axes {
            let [x_label, y_label, z_label] = config.labels();
            let x_end = bb.origin.x + bb.size_x;
            let y_end = bb.origin.y + bb.size_y;
            let z_end = bb.origin.z + bb.size_z;
            let diameter = line_thickness * 5.0;

            axes.push(AxisDecoration {
                label: x_label,
                arrow_end: Point3::new(x_end + arrow_offset, 0.0, 0.0),
                diameter,
                label_position: Point3::new(x_end + label_offset, 0.0, 0.0),
            });
            axes.push(AxisDecoration {
                label: y_label,
                arrow_end: Point3::new(0.0, y_end + arrow_offset, 0.0),
                diameter,
                label_position: Point3::new(0.0, y_end + label_offset, 0.0),
            });
            if bb.has_depth() {
                axes.push(AxisDecoration {
                    label: z_label,
                    arrow_end: Point3::new(0.0, 0.0, z_end + arrow_offset),
                    diameter,
                    label_position: Point3::new(0.0, 0.0, z_end + label_offset),
                });
            }
        }

        let bounding_box = (elements.bounding_box && bb.has_depth()).then_some(bb);

        let (marker_cone, initial_marker) = if elements.marker {
            let cone = MarkerCone {
                height: label_offset,
                base_radius: 0.0,
                top_radius: label_offset / 5.0,
                normal: Vector3::new(-1.0, -1.0, 1.0),
            };
            let marker = MarkerFormat::from_config(config).marker_at(Point3::ORIGIN);
            (Some(cone), Some(marker))
        } else {
            (None, None)
        };

        Self {
            background: config.background,
            axis_color: config.axis_color,
            marker_color: config.marker_color,
            axes,
            grid,
            bounding_box,
            marker_cone,
            initial_marker,
        }
    }
}
