pub mod distance_2d;
pub mod intersect_2d;
pub mod orientation;
pub mod polygon_2d;

pub use orientation::{orientation, orientation_xy, Orientation, Plane};

/// 3D point type.
pub type Point3 = nalgebra::Point3<f64>;

/// 3D vector type.
pub type Vector3 = nalgebra::Vector3<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-5;

/// Number of decimal places vertex coordinates are rounded to.
pub const PRECISION: i32 = 6;

/// Rounds a coordinate to [`PRECISION`] decimal places.
///
/// Negative zero is normalized to `0.0` so rounded values hash consistently.
#[must_use]
pub fn round_coordinate(value: f64) -> f64 {
    let factor = 10f64.powi(PRECISION);
    (value * factor).round() / factor + 0.0
}

/// Integer key of an already rounded coordinate, used for equality and hashing.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn coordinate_key(value: f64) -> i64 {
    (value * 10f64.powi(PRECISION)).round() as i64
}

/// Returns `true` if `a` and `b` differ by at most [`TOLERANCE`].
#[must_use]
pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() <= TOLERANCE
}

/// Returns `true` if `value` is within [`TOLERANCE`] of zero.
#[must_use]
pub fn is_zero(value: f64) -> bool {
    value.abs() <= TOLERANCE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounding_drops_noise_below_precision() {
        assert_eq!(round_coordinate(1.000_000_4), 1.0);
        assert_eq!(round_coordinate(-2.500_000_2), -2.5);
    }

    #[test]
    fn rounding_normalizes_negative_zero() {
        let r = round_coordinate(-0.000_000_1);
        assert!(r.is_sign_positive());
        assert_eq!(coordinate_key(r), 0);
    }

    #[test]
    fn approx_eq_uses_tolerance() {
        assert!(approx_eq(1.0, 1.0 + TOLERANCE / 2.0));
        assert!(!approx_eq(1.0, 1.0 + TOLERANCE * 2.0));
        assert!(is_zero(-TOLERANCE));
    }
}
