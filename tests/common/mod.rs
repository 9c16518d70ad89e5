//! Common test utilities for integration tests.

#![allow(dead_code)]

pub mod harness;

use layer_canvas::Point;

/// Tolerance for coordinate comparisons after scaling.
pub const EPS: f32 = 1e-3;

/// Install a test logger once per process. Set `RUST_LOG=debug` to see
/// the controller's transitions.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < EPS
}

#[track_caller]
pub fn assert_point_near(actual: Point, expected: Point) {
    assert!(
        approx_eq(actual.x, expected.x) && approx_eq(actual.y, expected.y),
        "expected {:?}, got {:?}",
        expected,
        actual
    );
}
