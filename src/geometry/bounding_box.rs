use crate::math::{Point3, TOLERANCE};

/// An axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    /// Minimum corner of the bounding box.
    pub min: Point3,
    /// Maximum corner of the bounding box.
    pub max: Point3,
}

impl BoundingBox {
    /// Builds the box enclosing all `points`, or `None` if there are none.
    #[must_use]
    pub fn from_points<'a, I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Point3>,
    {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut min = *first;
        let mut max = *first;
        for p in iter {
            min = min.inf(p);
            max = max.sup(p);
        }
        Some(Self { min, max })
    }

    /// Returns `true` if the boxes overlap in the XY plane, within tolerance.
    #[must_use]
    pub fn intersects_2d(&self, other: &BoundingBox) -> bool {
        self.min.x <= other.max.x + TOLERANCE
            && other.min.x <= self.max.x + TOLERANCE
            && self.min.y <= other.max.y + TOLERANCE
            && other.min.y <= self.max.y + TOLERANCE
    }

    /// Returns `true` if the boxes overlap in 3D, within tolerance.
    #[must_use]
    pub fn intersects(&self, other: &BoundingBox) -> bool {
        self.intersects_2d(other)
            && self.min.z <= other.max.z + TOLERANCE
            && other.min.z <= self.max.z + TOLERANCE
    }

    /// Returns `true` if `point` lies inside the box in the XY plane.
    #[must_use]
    pub fn contains_2d(&self, point: &Point3) -> bool {
        point.x >= self.min.x - TOLERANCE
            && point.x <= self.max.x + TOLERANCE
            && point.y >= self.min.y - TOLERANCE
            && point.y <= self.max.y + TOLERANCE
    }

    /// Length of the box diagonal.
    #[must_use]
    pub fn diagonal(&self) -> f64 {
        (self.max - self.min).norm()
    }
}
