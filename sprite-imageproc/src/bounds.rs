use crate::{Coord, Point};

/// Axis-aligned bounding box which accumulates points.
///
/// Unlike a rectangle, `Bounds` has an explicit empty state. It becomes valid
/// when the first point is added and afterwards only grows. Both corners are
/// inclusive, so the bounds of a single point have zero width and height.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Bounds<T: Coord = i32> {
    /// Min and max corners, or `None` if no point has been added yet.
    corners: Option<(Point<T>, Point<T>)>,
}

pub type BoundsF = Bounds<f32>;

impl<T: Coord> Bounds<T> {
    /// Create bounds which contain nothing.
    pub fn empty() -> Bounds<T> {
        Bounds { corners: None }
    }

    /// Create bounds containing a single point.
    pub fn from_point(p: Point<T>) -> Bounds<T> {
        Bounds {
            corners: Some((p, p)),
        }
    }

    /// Create bounds from explicit min and max corners.
    ///
    /// Panics if `min` is greater than `max` on either axis.
    pub fn from_corners(min: Point<T>, max: Point<T>) -> Bounds<T> {
        assert!(min.x <= max.x && min.y <= max.y, "min corner exceeds max");
        Bounds {
            corners: Some((min, max)),
        }
    }

    /// Create the smallest bounds containing every point in `points`.
    pub fn from_points<I: IntoIterator<Item = Point<T>>>(points: I) -> Bounds<T> {
        points.into_iter().fold(Bounds::empty(), |mut bounds, p| {
            bounds.expand(p);
            bounds
        })
    }

    /// Return true if at least one point has been added.
    pub fn is_valid(&self) -> bool {
        self.corners.is_some()
    }

    /// Return the inclusive top-left corner, if valid.
    pub fn min(&self) -> Option<Point<T>> {
        self.corners.map(|(min, _)| min)
    }

    /// Return the inclusive bottom-right corner, if valid.
    pub fn max(&self) -> Option<Point<T>> {
        self.corners.map(|(_, max)| max)
    }

    /// Grow the bounds so they contain `p`.
    pub fn expand(&mut self, p: Point<T>) {
        let Some((min, max)) = self.corners.as_mut() else {
            self.corners = Some((p, p));
            return;
        };

        if p.x < min.x {
            min.x = p.x;
        } else if p.x > max.x {
            max.x = p.x;
        }

        if p.y < min.y {
            min.y = p.y;
        } else if p.y > max.y {
            max.y = p.y;
        }
    }

    /// Return the smallest bounds that contain both `self` and `other`.
    ///
    /// Empty bounds are the identity for this operation.
    pub fn union(&self, other: Bounds<T>) -> Bounds<T> {
        let mut result = *self;
        if let Some((min, max)) = other.corners {
            result.expand(min);
            result.expand(max);
        }
        result
    }

    /// Return true if `p` lies on the boundary or interior of these bounds.
    pub fn contains(&self, p: Point<T>) -> bool {
        match self.corners {
            Some((min, max)) => p.x >= min.x && p.x <= max.x && p.y >= min.y && p.y <= max.y,
            None => false,
        }
    }

    /// Return `max.x - min.x`, or zero if the bounds are empty.
    pub fn width(&self) -> T {
        self.corners
            .map(|(min, max)| max.x - min.x)
            .unwrap_or_default()
    }

    /// Return `max.y - min.y`, or zero if the bounds are empty.
    pub fn height(&self) -> T {
        self.corners
            .map(|(min, max)| max.y - min.y)
            .unwrap_or_default()
    }
}

impl<T: Coord> Default for Bounds<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T: Coord> FromIterator<Point<T>> for Bounds<T> {
    fn from_iter<I: IntoIterator<Item = Point<T>>>(iter: I) -> Self {
        Bounds::from_points(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::{Bounds, BoundsF};
    use crate::{Point, PointF};

    #[test]
    fn test_empty_bounds() {
        let bounds = Bounds::<i32>::empty();
        assert!(!bounds.is_valid());
        assert_eq!(bounds.min(), None);
        assert_eq!(bounds.width(), 0);
        assert_eq!(bounds.height(), 0);
        assert!(!bounds.contains(Point::default()));
    }

    #[test]
    fn test_expand() {
        let mut bounds = Bounds::from_point(Point::from_yx(5, 5));
        assert_eq!(bounds.width(), 0);
        assert!(bounds.contains(Point::from_yx(5, 5)));

        bounds.expand(Point::from_yx(7, 2));
        bounds.expand(Point::from_yx(3, 4));
        assert_eq!(bounds.min(), Some(Point::from_yx(3, 2)));
        assert_eq!(bounds.max(), Some(Point::from_yx(7, 5)));
        assert_eq!(bounds.width(), 3);
        assert_eq!(bounds.height(), 4);

        // Expanding by an interior point changes nothing.
        let before = bounds;
        bounds.expand(Point::from_yx(4, 4));
        assert_eq!(bounds, before);
    }

    #[test]
    fn test_union() {
        let a = Bounds::from_corners(Point::from_yx(0, 0), Point::from_yx(2, 2));
        let b = Bounds::from_corners(Point::from_yx(5, -1), Point::from_yx(6, 1));

        let ab = a.union(b);
        assert_eq!(ab.min(), Some(Point::from_yx(0, -1)));
        assert_eq!(ab.max(), Some(Point::from_yx(6, 2)));
        assert_eq!(ab, b.union(a));

        assert_eq!(a.union(Bounds::empty()), a);
        assert_eq!(Bounds::empty().union(a), a);
    }

    #[test]
    fn test_contains_is_inclusive() {
        let bounds: BoundsF = [PointF::from_yx(0., 0.), PointF::from_yx(10., 20.)]
            .into_iter()
            .collect();

        assert!(bounds.contains(PointF::from_yx(0., 0.)));
        assert!(bounds.contains(PointF::from_yx(10., 20.)));
        assert!(bounds.contains(PointF::from_yx(5., 5.)));
        assert!(!bounds.contains(PointF::from_yx(10.01, 5.)));
        assert!(!bounds.contains(PointF::from_yx(5., -0.01)));
    }

    #[test]
    #[should_panic(expected = "min corner exceeds max")]
    fn test_from_corners_inverted() {
        Bounds::from_corners(Point::from_yx(5, 5), Point::from_yx(0, 0));
    }
}
