//! Core data types for TraceVis-RS
//!
//! This module contains the fundamental geometric and styling types used
//! throughout the application.
//!
//! # Main Types
//!
//! - [`Point3`] - An immutable position in 3D space
//! - [`Vector3`] - A displacement between two points
//! - [`Color`] / [`Style`] - Line color and thickness of a trace segment
//! - [`Sample`] - A raw reading from a sample source, optionally styled
//! - [`StyledPoint`] - A point with the style attached at ingestion time

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Sub};

/// Thickness used when no positive thickness is given for a new trace
pub const DEFAULT_THICKNESS: f64 = 1.0;

/// A position in 3D space
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3 {
    pub const ORIGIN: Point3 = Point3::new(0.0, 0.0, 0.0);

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Squared euclidean distance to another point
    pub fn distance_squared(&self, other: &Point3) -> f64 {
        (*self - *other).length_squared()
    }

    /// Offset this point by a vector
    pub fn offset(&self, by: Vector3) -> Point3 {
        *self + by
    }
}

impl From<[f64; 3]> for Point3 {
    fn from(v: [f64; 3]) -> Self {
        Point3::new(v[0], v[1], v[2])
    }
}

impl fmt::Display for Point3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// A displacement or direction in 3D space
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vector3 {
    pub const ZERO: Vector3 = Vector3::new(0.0, 0.0, 0.0);

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn length_squared(&self) -> f64 {
        self.x * self.x + self.y * self.y + self.z * self.z
    }

    pub fn length(&self) -> f64 {
        self.length_squared().sqrt()
    }

    pub fn is_zero(&self) -> bool {
        self.x == 0.0 && self.y == 0.0 && self.z == 0.0
    }

    /// Unit vector in the same direction, or `None` for the zero vector
    ///
    /// Components are scaled by the largest magnitude first, so long finite
    /// vectors do not overflow while squaring.
    pub fn normalized(&self) -> Option<Vector3> {
        let scale = self.x.abs().max(self.y.abs()).max(self.z.abs());
        if scale == 0.0 || !scale.is_finite() {
            return None;
        }
        let scaled = Vector3::new(self.x / scale, self.y / scale, self.z / scale);
        let len = scaled.length();
        Some(Vector3::new(scaled.x / len, scaled.y / len, scaled.z / len))
    }

    pub fn cross(&self, other: &Vector3) -> Vector3 {
        Vector3::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }
}

impl Sub for Point3 {
    type Output = Vector3;

    fn sub(self, rhs: Point3) -> Vector3 {
        Vector3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Add<Vector3> for Point3 {
    type Output = Point3;

    fn add(self, rhs: Vector3) -> Point3 {
        Point3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Add for Vector3 {
    type Output = Vector3;

    fn add(self, rhs: Vector3) -> Vector3 {
        Vector3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl AddAssign for Vector3 {
    fn add_assign(&mut self, rhs: Vector3) {
        self.x += rhs.x;
        self.y += rhs.y;
        self.z += rhs.z;
    }
}

/// An RGBA line color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    #[serde(default = "opaque")]
    pub a: u8,
}

fn opaque() -> u8 {
    255
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const GRAY: Color = Color::rgb(128, 128, 128);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::BLACK
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}{:02x}", self.a, self.r, self.g, self.b)
    }
}

/// Visual style shared by every vertex of a segment
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Style {
    pub color: Color,
    pub thickness: f64,
}

impl Style {
    pub const fn new(color: Color, thickness: f64) -> Self {
        Self { color, thickness }
    }
}

impl Default for Style {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            thickness: DEFAULT_THICKNESS,
        }
    }
}

/// A raw reading produced by a sample source
///
/// Sources that know nothing about styling leave `style` empty and the
/// batcher attaches the configured ingest style.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub point: Point3,
    pub style: Option<Style>,
}

impl Sample {
    pub fn plain(point: Point3) -> Self {
        Self { point, style: None }
    }

    pub fn styled(point: Point3, style: Style) -> Self {
        Self {
            point,
            style: Some(style),
        }
    }
}

/// A point with its style attached, as it crosses the thread boundary
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StyledPoint {
    pub point: Point3,
    pub color: Color,
    /// Non-positive means "keep the active segment's thickness"
    pub thickness: f64,
}

impl StyledPoint {
    pub fn new(point: Point3, color: Color, thickness: f64) -> Self {
        Self {
            point,
            color,
            thickness,
        }
    }
}
