//! Assertion utilities for testing.
//!
//! This module provides helper functions for making assertions in tests,
//! particularly for floating-point comparisons.

#![allow(dead_code)]

use geo::Point;

/// Default epsilon for floating-point comparisons
pub const DEFAULT_EPSILON: f64 = 1e-9;

/// Assert that two floating-point values are approximately equal.
///
/// # Panics
///
/// Panics if the absolute difference between `actual` and `expected` is greater than `epsilon`.
pub fn assert_approx_eq(actual: f64, expected: f64, epsilon: Option<f64>) {
    let epsilon = epsilon.unwrap_or(DEFAULT_EPSILON);
    let diff = (actual - expected).abs();

    assert!(
        diff <= epsilon,
        "Values not approximately equal: actual = {}, expected = {}, diff = {}, epsilon = {}",
        actual,
        expected,
        diff,
        epsilon
    );
}

/// Assert that a point lies within `epsilon` of `(x, y)` on both axes.
pub fn assert_point_approx_eq(actual: Point<f64>, x: f64, y: f64) {
    assert!(
        (actual.x() - x).abs() <= DEFAULT_EPSILON && (actual.y() - y).abs() <= DEFAULT_EPSILON,
        "Points not approximately equal: actual = ({}, {}), expected = ({}, {})",
        actual.x(),
        actual.y(),
        x,
        y
    );
}

/// Assert that two 8-bit colors differ by at most `max_diff` per channel.
pub fn assert_color_approx_eq(actual: [u8; 4], expected: [u8; 4], max_diff: u8) {
    for (i, (a, e)) in actual.iter().zip(expected.iter()).enumerate() {
        assert!(
            a.abs_diff(*e) <= max_diff,
            "Colors differ at channel {}: actual = {:?}, expected = {:?}",
            i,
            actual,
            expected
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assert_approx_eq() {
        assert_approx_eq(1.0, 1.0, None);
        assert_approx_eq(1.0, 1.0 + 1e-12, None);
        assert_approx_eq(1.0, 1.001, Some(0.01));
    }

    #[test]
    fn test_assert_color_approx_eq() {
        assert_color_approx_eq([10, 20, 30, 255], [11, 20, 29, 255], 1);
    }
}
