//! Common test utilities and helpers

#![allow(dead_code)] // Test utilities may not all be used in every test file

pub mod builders;
pub mod sources;

use std::time::Duration;
use tracevis_rs::config::{AppConfig, IngestConfig};
use tracevis_rs::Point3;

/// Create a test timeout duration
pub fn test_timeout() -> Duration {
    Duration::from_millis(100)
}

/// Assert two floats are approximately equal
pub fn assert_float_eq(a: f64, b: f64, epsilon: f64) {
    assert!(
        (a - b).abs() < epsilon,
        "Expected {} to be approximately equal to {} (epsilon: {})",
        a,
        b,
        epsilon
    );
}

/// Assert two points are approximately equal component-wise
pub fn assert_point_eq(a: Point3, b: Point3, epsilon: f64) {
    assert_float_eq(a.x, b.x, epsilon);
    assert_float_eq(a.y, b.y, epsilon);
    assert_float_eq(a.z, b.z, epsilon);
}

/// Config with no tick delay so tests do not sleep
pub fn fast_config(batch_size: usize) -> AppConfig {
    AppConfig {
        ingest: IngestConfig {
            tick_interval_ms: 0,
            batch_size,
            ..Default::default()
        },
        ..Default::default()
    }
}
