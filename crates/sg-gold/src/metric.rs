//! Scalar comparison primitives shared by the diff engine and the report.

use std::f32::consts::PI;

use serde::{Deserialize, Serialize};

/// Absolute tolerance below which a discrepancy is treated as zero, both in
/// the relative metric and in report rendering.
pub const NEAR_ZERO: f32 = 0.001;

/// True when `v` is within the shared near-zero tolerance.
pub fn near_zero(v: f32) -> bool {
    v.abs() < NEAR_ZERO
}

/// Per-field comparison strategy producing a signed discrepancy.
///
/// The default pipeline subtracts plainly on every field; the alternatives
/// are selectable per comparison run (currently for the rotation field, see
/// `diff::DiffConfig`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScalarMetric {
    /// Plain signed difference `a - b`.
    #[default]
    Difference,
    /// Signed difference wrapped into `(-PI, PI]`, for radian fields where
    /// full-turn offsets are not a disagreement.
    AngleDifference,
    /// Signed ratio of magnitudes; `1` when the inputs are within tolerance.
    RelativeDifference,
}

impl ScalarMetric {
    pub fn eval(self, a: f32, b: f32) -> f32 {
        match self {
            ScalarMetric::Difference => a - b,
            ScalarMetric::AngleDifference => wrap_angle(a - b),
            ScalarMetric::RelativeDifference => relative_difference(a, b),
        }
    }
}

/// Wrap a radian difference into `(-PI, PI]` by repeated full-turn
/// correction.
fn wrap_angle(mut v: f32) -> f32 {
    while v >= PI {
        v -= 2.0 * PI;
    }
    while v <= -PI {
        v += 2.0 * PI;
    }
    v
}

/// Signed ratio of the larger magnitude over the smaller. Returns `1` for
/// near-equal inputs, the nonzero magnitude when one side is exactly zero,
/// and a negative ratio when the signs disagree.
fn relative_difference(a: f32, b: f32) -> f32 {
    if (b - a).abs() < NEAR_ZERO {
        return 1.0;
    }
    if a == 0.0 {
        return b.abs();
    }
    if b == 0.0 {
        return a.abs();
    }

    let mut sign = 1.0;
    let (mut a, mut b) = (a, b);
    if a < 0.0 {
        sign = -sign;
        a = -a;
    }
    if b < 0.0 {
        sign = -sign;
        b = -b;
    }
    if a > b { sign * a / b } else { sign * b / a }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_near_zero_boundary() {
        assert!(near_zero(0.0));
        assert!(near_zero(0.000_9));
        assert!(near_zero(-0.000_9));
        // The tolerance itself is outside.
        assert!(!near_zero(0.001));
        assert!(!near_zero(-0.001));
        assert!(!near_zero(0.001_1));
    }

    #[test]
    fn test_difference_is_signed() {
        assert_eq!(ScalarMetric::Difference.eval(2.0, 0.5), 1.5);
        assert_eq!(ScalarMetric::Difference.eval(0.5, 2.0), -1.5);
    }

    #[test]
    fn test_angle_difference_wraps_full_turns() {
        let m = ScalarMetric::AngleDifference;
        assert!((m.eval(2.0 * PI, 0.0)).abs() < 1e-5);
        assert!((m.eval(0.0, 2.0 * PI)).abs() < 1e-5);
        assert!((m.eval(PI + 0.1, 0.0) - (-PI + 0.1)).abs() < 1e-5);
    }

    #[test]
    fn test_angle_difference_keeps_pi() {
        // PI maps to PI, not -PI: the wrap interval is half-open at -PI.
        assert_eq!(ScalarMetric::AngleDifference.eval(PI, 0.0), PI);
    }

    #[test]
    fn test_relative_difference() {
        let m = ScalarMetric::RelativeDifference;
        assert_eq!(m.eval(3.0, 3.000_1), 1.0);
        assert_eq!(m.eval(4.0, 2.0), 2.0);
        assert_eq!(m.eval(2.0, 4.0), 2.0);
        assert_eq!(m.eval(-4.0, 2.0), -2.0);
        assert_eq!(m.eval(-4.0, -2.0), 2.0);
        assert_eq!(m.eval(0.0, 5.0), 5.0);
        assert_eq!(m.eval(5.0, 0.0), 5.0);
    }
}
