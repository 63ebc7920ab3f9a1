//! Synthetic test trace: an upward spiral with square corners
//!
//! The path circles the centre of a 100x100 plot while climbing. In the two
//! quadrants where sine and cosine share a sign the circle is pushed out to
//! the square's edges and drawn red; the rounded quadrants are blue.

use super::SampleSource;
use crate::config::DEFAULT_SAMPLE_THICKNESS;
use crate::error::Result;
use crate::types::{Color, Point3, Sample, Style};

/// Angular speed of the spiral in radians per second of simulated time
const ANGULAR_RATE: f64 = 0.25;

/// Generates the spiral at a fixed simulated time step
pub struct SpiralSource {
    time_step: f64,
    elapsed: f64,
    remaining: Option<usize>,
}

impl SpiralSource {
    /// `time_step` is the simulated seconds between consecutive samples
    pub fn new(time_step: f64) -> Self {
        Self {
            time_step,
            elapsed: 0.0,
            remaining: None,
        }
    }

    /// Stop after `count` samples
    pub fn with_limit(mut self, count: usize) -> Self {
        self.remaining = Some(count);
        self
    }

    /// Spiral sample at simulated time `seconds`
    pub fn sample_at(seconds: f64) -> Sample {
        let t = seconds * ANGULAR_RATE;
        let (sint, cost) = t.sin_cos();
        let z = t * 0.5;

        let (x, y, color) = if sint > 0.0 && cost > 0.0 {
            if sint > cost {
                (100.0, 70.71 * cost + 50.0, Color::RED)
            } else {
                (70.71 * sint + 50.0, 100.0, Color::RED)
            }
        } else if sint < 0.0 && cost < 0.0 {
            if sint < cost {
                (0.0, 70.71 * cost + 50.0, Color::RED)
            } else {
                (70.71 * sint + 50.0, 0.0, Color::RED)
            }
        } else {
            (50.0 * sint + 50.0, 50.0 * cost + 50.0, Color::BLUE)
        };

        Sample::styled(
            Point3::new(x, y, z),
            Style::new(color, DEFAULT_SAMPLE_THICKNESS),
        )
    }
}

impl SampleSource for SpiralSource {
    fn next_sample(&mut self) -> Result<Option<Sample>> {
        if let Some(remaining) = self.remaining.as_mut() {
            if *remaining == 0 {
                return Ok(None);
            }
            *remaining -= 1;
        }

        let sample = Self::sample_at(self.elapsed);
        self.elapsed += self.time_step;
        Ok(Some(sample))
    }

    fn describe(&self) -> String {
        "demo spiral".to_string()
    }
}
