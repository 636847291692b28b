use std::ops::Neg;

use super::{is_zero, Point3, Vector3};

/// Coordinate plane a 3D turn is projected onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Plane {
    #[default]
    Xy,
    Xz,
    Yz,
}

impl Plane {
    /// Projects a vector onto the plane's two in-plane axes.
    #[must_use]
    pub fn project(self, v: &Vector3) -> (f64, f64) {
        match self {
            Plane::Xy => (v.x, v.y),
            Plane::Xz => (v.x, v.z),
            Plane::Yz => (v.y, v.z),
        }
    }
}

/// Rotational sense of three ordered points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    Clockwise,
    Collinear,
    CounterClockwise,
}

impl Orientation {
    /// Classifies a signed cross-product value, snapping near-zero values to
    /// [`Orientation::Collinear`].
    #[must_use]
    pub fn from_value(value: f64) -> Self {
        if is_zero(value) {
            Orientation::Collinear
        } else if value > 0.0 {
            Orientation::CounterClockwise
        } else {
            Orientation::Clockwise
        }
    }

    /// Returns `-1`, `0` or `1`.
    #[must_use]
    pub fn as_i8(self) -> i8 {
        match self {
            Orientation::Clockwise => -1,
            Orientation::Collinear => 0,
            Orientation::CounterClockwise => 1,
        }
    }
}

impl Neg for Orientation {
    type Output = Orientation;

    fn neg(self) -> Self::Output {
        match self {
            Orientation::Clockwise => Orientation::CounterClockwise,
            Orientation::Collinear => Orientation::Collinear,
            Orientation::CounterClockwise => Orientation::Clockwise,
        }
    }
}

/// Orientation of the turn `a → b → c`: the sign of `(b − a) × (c − b)`
/// projected onto `plane`.
#[must_use]
pub fn orientation(a: &Point3, b: &Point3, c: &Point3, plane: Plane) -> Orientation {
    let (abu, abv) = plane.project(&(b - a));
    let (bcu, bcv) = plane.project(&(c - b));
    Orientation::from_value(abu * bcv - abv * bcu)
}

/// [`orientation`] in the XY plane.
#[must_use]
pub fn orientation_xy(a: &Point3, b: &Point3, c: &Point3) -> Orientation {
    orientation(a, b, c, Plane::Xy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn p(x: f64, y: f64) -> Point3 {
        Point3::new(x, y, 0.0)
    }

    #[test]
    fn left_turn_is_counter_clockwise() {
        let o = orientation_xy(&p(0.0, 0.0), &p(1.0, 0.0), &p(1.0, 1.0));
        assert_eq!(o, Orientation::CounterClockwise);
        assert_eq!(o.as_i8(), 1);
    }

    #[test]
    fn right_turn_is_clockwise() {
        let o = orientation_xy(&p(0.0, 0.0), &p(1.0, 0.0), &p(1.0, -1.0));
        assert_eq!(o, Orientation::Clockwise);
    }

    #[test]
    fn near_zero_snaps_to_collinear() {
        let o = orientation_xy(&p(0.0, 0.0), &p(1.0, 0.0), &p(2.0, 1e-7));
        assert_eq!(o, Orientation::Collinear);
    }

    #[test]
    fn vertical_plane_projection() {
        let a = Point3::new(0.0, 5.0, 0.0);
        let b = Point3::new(1.0, 5.0, 0.0);
        let c = Point3::new(1.0, 5.0, 1.0);
        assert_eq!(orientation(&a, &b, &c, Plane::Xz), Orientation::CounterClockwise);
        assert_eq!(orientation(&a, &b, &c, Plane::Xy), Orientation::Collinear);
    }

    proptest! {
        #[test]
        fn swapping_last_two_points_negates(
            ax in -100.0..100.0f64, ay in -100.0..100.0f64,
            bx in -100.0..100.0f64, by in -100.0..100.0f64,
            cx in -100.0..100.0f64, cy in -100.0..100.0f64,
        ) {
            let (a, b, c) = (p(ax, ay), p(bx, by), p(cx, cy));
            let abc = orientation_xy(&a, &b, &c);
            prop_assume!(abc != Orientation::Collinear);
            prop_assert_eq!(abc, -orientation_xy(&a, &c, &b));
        }
    }
}
