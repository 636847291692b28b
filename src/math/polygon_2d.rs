use super::{is_zero, orientation_xy, Orientation, Point3};

/// Computes the signed area of a polygon in the XY plane (shoelace formula).
///
/// Positive for counter-clockwise, negative for clockwise.
#[must_use]
pub fn signed_area_2d(points: &[Point3]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        sum += points[i].x * points[j].y - points[j].x * points[i].y;
    }
    sum * 0.5
}

/// Arithmetic mean of a point set. Returns `None` for an empty slice.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn mean_point(points: &[Point3]) -> Option<Point3> {
    if points.is_empty() {
        return None;
    }
    let sum = points
        .iter()
        .fold(nalgebra::Vector3::zeros(), |acc, p| acc + p.coords);
    Some(Point3::from(sum / points.len() as f64))
}

/// Area-weighted centroid of a closed ring in the XY plane.
///
/// Rings with (near) zero area, such as collinear point sets, fall back to
/// the mean of their points. `z` is always the mean height.
#[must_use]
pub fn centroid_2d(points: &[Point3]) -> Option<Point3> {
    let mean = mean_point(points)?;
    let area = signed_area_2d(points);
    if is_zero(area) {
        return Some(mean);
    }

    let n = points.len();
    let (mut cx, mut cy) = (0.0, 0.0);
    for i in 0..n {
        let a = &points[i];
        let b = &points[(i + 1) % n];
        let cross = a.x * b.y - b.x * a.y;
        cx += (a.x + b.x) * cross;
        cy += (a.y + b.y) * cross;
    }
    let factor = 1.0 / (6.0 * area);
    Some(Point3::new(cx * factor, cy * factor, mean.z))
}

/// Returns `true` if every turn of the ring has the same rotational sense.
///
/// Collinear turns are ignored; fewer than three points is never convex.
#[must_use]
pub fn is_convex_2d(points: &[Point3]) -> bool {
    let n = points.len();
    if n < 3 {
        return false;
    }
    let mut sense = Orientation::Collinear;
    for i in 0..n {
        let turn = orientation_xy(&points[i], &points[(i + 1) % n], &points[(i + 2) % n]);
        if turn == Orientation::Collinear {
            continue;
        }
        if sense == Orientation::Collinear {
            sense = turn;
        } else if turn != sense {
            return false;
        }
    }
    sense != Orientation::Collinear
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn square() -> Vec<Point3> {
        vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ]
    }

    #[test]
    fn signed_area_ccw_square() {
        assert_relative_eq!(signed_area_2d(&square()), 1.0);
    }

    #[test]
    fn signed_area_cw_square() {
        let mut pts = square();
        pts.reverse();
        assert_relative_eq!(signed_area_2d(&pts), -1.0);
    }

    #[test]
    fn signed_area_degenerate() {
        assert_relative_eq!(signed_area_2d(&[Point3::new(0.0, 0.0, 0.0)]), 0.0);
        assert_relative_eq!(signed_area_2d(&[]), 0.0);
    }

    #[test]
    fn centroid_of_l_shape_is_area_weighted() {
        let pts = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
            Point3::new(2.0, 1.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(1.0, 2.0, 0.0),
            Point3::new(0.0, 2.0, 0.0),
        ];
        let c = centroid_2d(&pts).unwrap();
        assert_relative_eq!(c.x, 5.0 / 6.0, epsilon = 1e-12);
        assert_relative_eq!(c.y, 5.0 / 6.0, epsilon = 1e-12);
    }

    #[test]
    fn centroid_of_collinear_points_falls_back_to_mean() {
        let pts = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(5.0, 5.0, 0.0),
        ];
        let c = centroid_2d(&pts).unwrap();
        assert_relative_eq!(c.x, 2.0);
        assert_relative_eq!(c.y, 2.0);
    }

    #[test]
    fn centroid_of_nothing_is_none() {
        assert!(centroid_2d(&[]).is_none());
    }

    #[test]
    fn convexity() {
        assert!(is_convex_2d(&square()));
        let dart = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(4.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.0, 4.0, 0.0),
        ];
        assert!(!is_convex_2d(&dart));
    }
}
