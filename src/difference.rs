//! Absolute and relative differences between pairs of values
//!
//! The relative difference follows the numdiff convention: zero when the values
//! are equal, infinite when a non-zero value differs from zero, and otherwise the
//! absolute difference divided by the smaller magnitude of the two.

use crate::error::{CompareError, Result};
use serde::Serialize;

/// Absolute and relative difference of one value pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Difference {
    pub absolute: f64,
    pub relative: f64,
}

impl Difference {
    pub const ZERO: Difference = Difference {
        absolute: 0.0,
        relative: 0.0,
    };

    /// Whether this pair exceeds `tolerance` on both the absolute and relative scale
    pub fn exceeds(&self, tolerance: f64) -> bool {
        self.relative > tolerance && self.absolute > tolerance
    }
}

/// Compute the difference between `a` and `b`.
///
/// Rules are applied in order, the first match wins:
/// 1. equal values (including two zeros) differ by 0
/// 2. exactly one value is zero: infinite
/// 3. both values NaN: 0
/// 4. exactly one value NaN: infinite
/// 5. otherwise `|a - b|`
pub fn difference(a: f64, b: f64) -> Difference {
    let absolute = absolute_difference(a, b);

    // f64::min drops a NaN operand, so NaN is checked before taking the minimum
    let divisor = if a.is_nan() || b.is_nan() {
        1.0
    } else {
        match a.abs().min(b.abs()) {
            m if m == 0.0 => 1.0,
            m => m,
        }
    };

    let relative = if absolute.is_infinite() {
        f64::INFINITY
    } else {
        absolute / divisor
    };

    Difference { absolute, relative }
}

fn absolute_difference(a: f64, b: f64) -> f64 {
    // NaN never compares equal to 0.0, so the zero test cannot catch a NaN
    let a_zero = a == 0.0;
    let b_zero = b == 0.0;

    if a == b {
        0.0
    } else if a_zero != b_zero {
        f64::INFINITY
    } else if a.is_nan() && b.is_nan() {
        0.0
    } else if a.is_nan() != b.is_nan() {
        f64::INFINITY
    } else {
        (a - b).abs()
    }
}

/// Element-wise [`difference`] over two equal-length slices
pub fn differences(a: &[f64], b: &[f64]) -> Result<Vec<Difference>> {
    if a.len() != b.len() {
        return Err(CompareError::invalid_input(format!(
            "Cannot difference sequences of unequal length ({} vs {})",
            a.len(),
            b.len()
        )));
    }

    Ok(a.iter().zip(b).map(|(&x, &y)| difference(x, y)).collect())
}
