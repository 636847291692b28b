use std::f64::consts::{PI, TAU};

use super::{is_zero, orientation_xy, Orientation, Point3, Vector3, TOLERANCE};

/// Parametric 2D line-line intersection.
///
/// Given lines `p1 + t * d1` and `p2 + u * d2`, returns `(t, u)` if not parallel.
#[must_use]
pub fn line_line_intersect_2d(
    p1: &Point3,
    d1: &Vector3,
    p2: &Point3,
    d2: &Vector3,
) -> Option<(f64, f64)> {
    let cross = d1.x * d2.y - d1.y * d2.x;
    if cross.abs() < TOLERANCE * TOLERANCE {
        return None;
    }
    let dx = p2.x - p1.x;
    let dy = p2.y - p1.y;
    let t = (dx * d2.y - dy * d2.x) / cross;
    let u = (dx * d1.y - dy * d1.x) / cross;
    Some((t, u))
}

/// Returns `true` if `q` lies on segment `a`–`b` in the XY plane.
///
/// `q` must be collinear with the segment and inside its bounding rectangle.
#[must_use]
pub fn on_segment_2d(a: &Point3, q: &Point3, b: &Point3) -> bool {
    orientation_xy(a, q, b) == Orientation::Collinear && within_box_2d(a, q, b)
}

fn within_box_2d(a: &Point3, q: &Point3, b: &Point3) -> bool {
    q.x <= a.x.max(b.x) + TOLERANCE
        && q.x >= a.x.min(b.x) - TOLERANCE
        && q.y <= a.y.max(b.y) + TOLERANCE
        && q.y >= a.y.min(b.y) - TOLERANCE
}

/// Returns `true` if segments `p1`–`q1` and `p2`–`q2` intersect in the XY
/// plane, counting touching endpoints and collinear overlap.
#[must_use]
pub fn segments_intersect_2d(p1: &Point3, q1: &Point3, p2: &Point3, q2: &Point3) -> bool {
    let o1 = orientation_xy(p1, q1, p2);
    let o2 = orientation_xy(p1, q1, q2);
    let o3 = orientation_xy(p2, q2, p1);
    let o4 = orientation_xy(p2, q2, q1);

    if o1 != o2 && o3 != o4 {
        return true;
    }
    (o1 == Orientation::Collinear && within_box_2d(p1, p2, q1))
        || (o2 == Orientation::Collinear && within_box_2d(p1, q2, q1))
        || (o3 == Orientation::Collinear && within_box_2d(p2, p1, q2))
        || (o4 == Orientation::Collinear && within_box_2d(p2, q1, q2))
}

/// Polar angle of the XY direction from `from` to `to`, in `[0, 2π)`.
#[must_use]
pub fn polar_angle(from: &Point3, to: &Point3) -> f64 {
    let dx = to.x - from.x;
    let dy = to.y - from.y;
    if is_zero(dy) && dx > 0.0 {
        return 0.0;
    }
    let angle = dy.atan2(dx);
    if angle < 0.0 {
        angle + TAU
    } else {
        angle
    }
}

/// Angle in `[0, π]` at `vertex` between the XY directions to `a` and `c`.
#[must_use]
pub fn angle_at(a: &Point3, vertex: &Point3, c: &Point3) -> f64 {
    let u = Vector3::new(a.x - vertex.x, a.y - vertex.y, 0.0);
    let v = Vector3::new(c.x - vertex.x, c.y - vertex.y, 0.0);
    let denom = u.norm() * v.norm();
    if denom < TOLERANCE * TOLERANCE {
        return 0.0;
    }
    (u.dot(&v) / denom).clamp(-1.0, 1.0).acos().min(PI)
}

/// Linear interpolation: `origin + dir * t`, with `z` interpolated as well.
#[must_use]
pub fn point_at(origin: &Point3, dir: &Vector3, t: f64) -> Point3 {
    origin + dir * t
}
