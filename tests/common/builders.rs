//! Test data builders for creating test objects

use tracevis_rs::config::{PlotConfig, PlotElements};
use tracevis_rs::{Color, Point3, StyledPoint};

/// Builder for creating test plot configurations
pub struct PlotConfigBuilder {
    config: PlotConfig,
}

impl PlotConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: PlotConfig::default(),
        }
    }

    pub fn min_distance(mut self, min_distance: f64) -> Self {
        self.config.min_distance = min_distance;
        self
    }

    pub fn decimal_places(mut self, decimal_places: usize) -> Self {
        self.config.decimal_places = decimal_places;
        self
    }

    pub fn elements(mut self, elements: PlotElements) -> Self {
        self.config.elements = elements;
        self
    }

    pub fn build(self) -> PlotConfig {
        self.config
    }
}

/// Builder for a sequence of styled points
pub struct PathBuilder {
    color: Color,
    thickness: f64,
    points: Vec<StyledPoint>,
}

impl PathBuilder {
    pub fn new() -> Self {
        Self {
            color: Color::BLACK,
            thickness: 1.0,
            points: Vec::new(),
        }
    }

    /// Style applied to points added from now on
    pub fn style(mut self, color: Color, thickness: f64) -> Self {
        self.color = color;
        self.thickness = thickness;
        self
    }

    pub fn point(mut self, x: f64, y: f64, z: f64) -> Self {
        self.points
            .push(StyledPoint::new(Point3::new(x, y, z), self.color, self.thickness));
        self
    }

    pub fn build(self) -> Vec<StyledPoint> {
        self.points
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_builder() {
        let path = PathBuilder::new()
            .point(0.0, 0.0, 0.0)
            .style(Color::RED, 2.0)
            .point(1.0, 0.0, 0.0)
            .build();

        assert_eq!(path.len(), 2);
        assert_eq!(path[0].color, Color::BLACK);
        assert_eq!(path[1].color, Color::RED);
        assert_eq!(path[1].thickness, 2.0);
    }
}
