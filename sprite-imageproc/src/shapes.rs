use std::fmt;
use std::marker::PhantomData;

use crate::{Bounds, Vec2};

/// Tolerance below which the cross product of two line directions is treated
/// as zero, ie. the lines are parallel.
pub const PARALLEL_EPSILON: f32 = 1e-8;

/// Smallest parameter along the first line of [`Line::extended_intersection`]
/// that is accepted. Intersections behind this point are rejected.
pub const MIN_FORWARD_PARAM: f32 = 0.5;

/// Trait for types which can be used as coordinates of shapes.
///
/// This trait captures the most common requirements of integral and float
/// coordinate types for various shape methods.
pub trait Coord:
    Copy
    + Default
    + PartialEq
    + PartialOrd
    + std::fmt::Display
    + std::ops::Add<Output = Self>
    + std::ops::Sub<Output = Self>
{
}

impl Coord for f32 {}

impl Coord for i32 {}

/// A point defined by X and Y coordinates.
#[derive(Copy, Clone, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde_traits", derive(serde::Serialize, serde::Deserialize))]
pub struct Point<T: Coord = i32> {
    pub x: T,
    pub y: T,
}

pub type PointF = Point<f32>;

impl<T: Coord> Point<T> {
    /// Construct a point from X and Y coordinates.
    pub fn from_yx(y: T, x: T) -> Self {
        Point { y, x }
    }

    pub fn translate(self, y: T, x: T) -> Self {
        Point {
            y: self.y + y,
            x: self.x + x,
        }
    }
}

impl Point<f32> {
    /// Return the vector from this point to another point.
    pub fn vec_to(self, other: Self) -> Vec2 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        Vec2::from_xy(dx, dy)
    }

    /// Return the point reached by moving from this point along `v`.
    pub fn offset_by(self, v: Vec2) -> Self {
        self.translate(v.y, v.x)
    }

    /// Return the integer pixel coordinate that contains this point, rounding
    /// each coordinate towards zero.
    pub fn to_i32(self) -> Point {
        Point::from_yx(self.y as i32, self.x as i32)
    }
}

impl Point<i32> {
    /// Return the neighbors of the current point in clockwise order, starting
    /// from the point directly above `self`.
    pub fn neighbors(self) -> [Point; 8] {
        [
            self.translate(-1, 0),  // N
            self.translate(-1, 1),  // NE
            self.translate(0, 1),   // E
            self.translate(1, 1),   // SE
            self.translate(1, 0),   // S
            self.translate(1, -1),  // SW
            self.translate(0, -1),  // W
            self.translate(-1, -1), // NW
        ]
    }

    pub fn to_f32(self) -> Point<f32> {
        Point {
            x: self.x as f32,
            y: self.y as f32,
        }
    }
}

impl<T: Coord> fmt::Debug for Point<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.y, self.x)
    }
}

/// A line defined by a start and end point.
///
/// Besides being a bounded segment (eg. a polygon edge), a line can be
/// treated as infinite, with `start` as its position and `end - start` as its
/// direction. See [`Line::extended_intersection`].
#[derive(Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde_traits", derive(serde::Serialize, serde::Deserialize))]
pub struct Line<T: Coord = i32> {
    pub start: Point<T>,
    pub end: Point<T>,
}

pub type LineF = Line<f32>;

impl<T: Coord> fmt::Debug for Line<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?} -> {:?}", self.start, self.end)
    }
}

impl<T: Coord> Line<T> {
    pub fn from_endpoints(start: Point<T>, end: Point<T>) -> Line<T> {
        Line { start, end }
    }
}

impl Line<f32> {
    /// Return the vector from the start to the end of the line.
    pub fn direction(&self) -> Vec2 {
        self.start.vec_to(self.end)
    }

    /// Return the point where the infinite extensions of this line and `other`
    /// cross.
    ///
    /// The intersection is parametrized as `start + t * direction` along this
    /// line. Returns `None` if the lines are parallel (within
    /// [`PARALLEL_EPSILON`]) or if `t` is less than [`MIN_FORWARD_PARAM`], which
    /// rejects intersections that lie behind, or close to the start of, this
    /// line.
    pub fn extended_intersection(&self, other: LineF) -> Option<PointF> {
        let dir = self.direction();
        let other_dir = other.direction();

        let denom = dir.cross_product_norm(other_dir);
        if denom.abs() < PARALLEL_EPSILON {
            return None;
        }

        let t = other_dir.cross_product_norm(other.start.vec_to(self.start)) / denom;
        if t < MIN_FORWARD_PARAM {
            return None;
        }

        Some(self.start.offset_by(dir * t))
    }
}

/// Polygon shape defined by a list of vertices.
///
/// Depending on the storage type `S`, a Polygon can own its vertices
/// (eg. `Vec<Point>`) or they can borrowed (eg. `&[Point]`).
#[derive(Copy, Clone, Debug)]
#[cfg_attr(feature = "serde_traits", derive(serde::Serialize, serde::Deserialize))]
pub struct Polygon<T: Coord = i32, S: AsRef<[Point<T>]> = Vec<Point<T>>> {
    points: S,

    /// Avoids compiler complaining `T` is unused.
    element_type: PhantomData<T>,
}

impl<T: Coord, S: AsRef<[Point<T>]>> Polygon<T, S> {
    /// Create a view of a set of points as a polygon.
    pub fn new(points: S) -> Polygon<T, S> {
        Polygon {
            points,
            element_type: PhantomData,
        }
    }

    /// Return an iterator over the edges of this polygon.
    pub fn edges(&self) -> impl Iterator<Item = Line<T>> + '_ {
        self.points
            .as_ref()
            .iter()
            .zip(self.points.as_ref().iter().cycle().skip(1))
            .map(|(p0, p1)| Line::from_endpoints(*p0, *p1))
    }

    /// Return a slice of the endpoints of the polygon's edges.
    pub fn vertices(&self) -> &[Point<T>] {
        self.points.as_ref()
    }

    /// Return the axis-aligned bounds of the polygon's vertices.
    pub fn bounds(&self) -> Bounds<T> {
        Bounds::from_points(self.vertices().iter().copied())
    }
}

impl<S: AsRef<[PointF]>> Polygon<f32, S> {
    /// Return true if `p` lies inside the polygon.
    ///
    /// This casts a ray from `p` towards +X and counts the edges it crosses
    /// (the crossing-number or even-odd rule). Each edge is treated as
    /// half-open in Y, including its lower Y endpoint and excluding its upper
    /// one, so that points on a vertex shared by two edges are counted once.
    /// Points exactly on an edge are inside if the edge lies to their right.
    pub fn contains_point(&self, p: PointF) -> bool {
        let mut inside = false;

        for edge in self.edges() {
            let (a, b) = (edge.end, edge.start);
            let straddles = (a.y <= p.y && b.y > p.y) || (b.y <= p.y && a.y > p.y);
            if !straddles {
                continue;
            }

            let cross_x = (b.x - a.x) * (p.y - a.y) / (b.y - a.y) + a.x;
            if cross_x > p.x {
                inside = !inside;
            }
        }

        inside
    }

    /// Return the area of the polygon using the shoelace formula.
    ///
    /// The result is always non-negative, regardless of the winding order of
    /// the vertices. It is only meaningful for simple polygons.
    pub fn area(&self) -> f32 {
        let twice_signed_area = self.edges().fold(0., |area, edge| {
            area + edge.start.x * edge.end.y - edge.end.x * edge.start.y
        });
        0.5 * twice_signed_area.abs()
    }

    /// Return the mean of the polygon's vertices, or `None` if it has none.
    pub fn centroid(&self) -> Option<PointF> {
        let vertices = self.vertices();
        if vertices.is_empty() {
            return None;
        }
        let sum = vertices
            .iter()
            .fold(Vec2::from_xy(0., 0.), |sum, p| sum + Vec2::from_xy(p.x, p.y));
        let mean = sum / vertices.len() as f32;
        Some(PointF::from_yx(mean.y, mean.x))
    }
}

#[cfg(test)]
mod tests {
    use sprite_testing::TestCases;

    use super::{Line, LineF, Point, PointF, Polygon};
    use crate::tests::points_from_coords;

    #[test]
    fn test_line_extended_intersection() {
        #[derive(Debug)]
        struct Case {
            a: LineF,
            b: LineF,
            expected: Option<PointF>,
        }

        let line = |[y0, x0, y1, x1]: [f32; 4]| {
            Line::from_endpoints(PointF::from_yx(y0, x0), PointF::from_yx(y1, x1))
        };

        let cases = [
            // Perpendicular lines meeting beyond the end of `a`.
            Case {
                a: line([0., 0., 0., 2.]),
                b: line([-5., 4., -4., 4.]),
                expected: Some(PointF::from_yx(0., 4.)),
            },
            // Parallel lines.
            Case {
                a: line([0., 0., 0., 2.]),
                b: line([1., 0., 1., 5.]),
                expected: None,
            },
            // Intersection behind the start of `a`.
            Case {
                a: line([0., 0., 0., 2.]),
                b: line([-5., -3., -4., -3.]),
                expected: None,
            },
            // Intersection at `t = 0.25`, before the forward cutoff.
            Case {
                a: line([0., 0., 0., 4.]),
                b: line([-5., 1., -4., 1.]),
                expected: None,
            },
            // Intersection exactly at the forward cutoff.
            Case {
                a: line([0., 0., 0., 4.]),
                b: line([-5., 2., -4., 2.]),
                expected: Some(PointF::from_yx(0., 2.)),
            },
        ];

        cases.test_each(|case| {
            assert_eq!(case.a.extended_intersection(case.b), case.expected);
        });
    }

    #[test]
    fn test_point_neighbors() {
        let neighbors = Point::from_yx(5, 5).neighbors();
        assert_eq!(neighbors.len(), 8);
        assert_eq!(neighbors[0], Point::from_yx(4, 5));
        assert_eq!(neighbors[4], Point::from_yx(6, 5));
        assert!(!neighbors.contains(&Point::from_yx(5, 5)));
    }

    #[test]
    fn test_point_to_i32_truncates() {
        assert_eq!(PointF::from_yx(2.9, 3.5).to_i32(), Point::from_yx(2, 3));
        assert_eq!(PointF::from_yx(-0.5, 0.5).to_i32(), Point::from_yx(0, 0));
    }

    #[test]
    fn test_polygon_area() {
        let poly = Polygon::<f32, _>::new(
            [[-3., -2.], [-1., 4.], [6., 1.], [3., 10.], [-4., 9.]]
                .map(|[x, y]| PointF::from_yx(y, x)),
        );
        assert_eq!(poly.area(), 60.);

        // Winding order does not change the result.
        let mut reversed = poly.vertices().to_vec();
        reversed.reverse();
        assert_eq!(Polygon::<f32, _>::new(reversed).area(), 60.);

        // Degenerate polygons.
        assert_eq!(Polygon::<f32>::new(Vec::new()).area(), 0.);
        assert_eq!(
            Polygon::<f32, _>::new(points_from_coords(&[[0., 0.], [5., 5.]])).area(),
            0.
        );
    }

    #[test]
    fn test_polygon_contains_point() {
        #[derive(Debug)]
        struct Case {
            point: [f32; 2],
            inside: bool,
        }

        // Convex pentagon, specified as [y, x] coordinates.
        let poly = Polygon::<f32, _>::new(points_from_coords(&[
            [0., 4.],
            [3., 8.],
            [8., 6.],
            [8., 2.],
            [3., 0.],
        ]));

        let cases = [
            Case {
                point: [4., 4.],
                inside: true,
            },
            Case {
                point: [1., 4.],
                inside: true,
            },
            Case {
                point: [7.5, 5.],
                inside: true,
            },
            Case {
                point: [-1., 4.],
                inside: false,
            },
            Case {
                point: [4., 9.],
                inside: false,
            },
            Case {
                point: [9., 4.],
                inside: false,
            },
            Case {
                point: [0.5, 0.5],
                inside: false,
            },
        ];

        cases.test_each(|case| {
            let [y, x] = case.point;
            assert_eq!(poly.contains_point(PointF::from_yx(y, x)), case.inside);
        });
    }

    #[test]
    fn test_polygon_contains_point_is_consistent_on_shared_edges() {
        // Two squares sharing the edge at x = 2. A point on that edge must
        // belong to exactly one of them.
        let left = Polygon::<f32, _>::new(points_from_coords(&[
            [0., 0.],
            [0., 2.],
            [4., 2.],
            [4., 0.],
        ]));
        let right = Polygon::<f32, _>::new(points_from_coords(&[
            [0., 2.],
            [0., 4.],
            [4., 4.],
            [4., 2.],
        ]));

        for y in [0.5, 1., 2., 3.5] {
            let p = PointF::from_yx(y, 2.);
            assert!(left.contains_point(p) != right.contains_point(p));
        }
    }

    #[test]
    fn test_polygon_centroid() {
        let poly = Polygon::<f32, _>::new(points_from_coords(&[
            [0., 0.],
            [0., 4.],
            [2., 4.],
            [2., 0.],
        ]));
        assert_eq!(poly.centroid(), Some(PointF::from_yx(1., 2.)));
        assert_eq!(Polygon::<f32>::new(Vec::new()).centroid(), None);
    }

    #[test]
    fn test_polygon_bounds() {
        let poly = Polygon::<f32, _>::new(points_from_coords(&[[1., 5.], [-2., 3.], [4., -1.]]));
        let bounds = poly.bounds();
        assert_eq!(bounds.min(), Some(PointF::from_yx(-2., -1.)));
        assert_eq!(bounds.max(), Some(PointF::from_yx(4., 5.)));
        assert!(!Polygon::<f32>::new(Vec::new()).bounds().is_valid());
    }

    #[test]
    fn test_polygon_edges() {
        let points = points_from_coords(&[[0, 0], [0, 3], [3, 3]]);
        let poly = Polygon::new(&points);
        let edges: Vec<_> = poly.edges().collect();
        assert_eq!(edges.len(), 3);
        assert_eq!(edges[2], Line::from_endpoints(points[2], points[0]));
    }
}
