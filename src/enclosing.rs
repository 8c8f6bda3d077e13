use sprite_imageproc::{convex_hull, Line, LineF, Point, PointF};

use crate::detect::ImageShape;
use crate::image::{ImageData, LabelMap};
use crate::AnalyzeError;

/// Seed of the random number generator used by [`optimize_polygon`].
pub const SEARCH_SEED: u64 = 12345;

/// Maximum number of vertices in an enclosing polygon.
pub const MAX_POLYGON_VERTICES: usize = 8;

/// Highest optimization quality level.
pub const MAX_QUALITY: u32 = 9;

/// Number of search iterations at quality 0.
pub const MIN_ITERATIONS: u32 = 100_000;

/// Number of search iterations at [`MAX_QUALITY`].
pub const MAX_ITERATIONS: u32 = 10_000_000;

/// Pixels with this many or more same-shape neighbors are interior pixels and
/// can't be hull vertices.
const INTERIOR_NEIGHBOR_COUNT: usize = 5;

/// Outcome of [`find_enclosing_polygon`].
#[derive(Clone, Debug, PartialEq)]
pub enum EnclosingPolygon {
    /// A polygon with at most [`MAX_POLYGON_VERTICES`] vertices that encloses
    /// the shape.
    Found(Vec<PointF>),

    /// The search did not find any valid polygon within its budget.
    NotFound,

    /// The convex hull of the shape had fewer than 3 vertices.
    InsufficientHull,

    /// The shape had no boundary pixels.
    EmptyShape,
}

impl EnclosingPolygon {
    /// Return the polygon's vertices if one was found.
    pub fn vertices(&self) -> Option<&[PointF]> {
        match self {
            Self::Found(vertices) => Some(vertices),
            _ => None,
        }
    }
}

/// Return the pixels of `shape` which may lie on its convex hull.
///
/// These are the shape's pixels with fewer than [`INTERIOR_NEIGHBOR_COUNT`]
/// 8-connected neighbors belonging to the same shape. Pixels are returned in
/// row-major order.
pub fn boundary_candidates(image: &ImageData, labels: &LabelMap, shape: &ImageShape) -> Vec<Point> {
    let (Some(min), Some(max)) = (shape.bounds.min(), shape.bounds.max()) else {
        return Vec::new();
    };

    let in_shape = |p: Point| {
        shape.bounds.contains(p) && image.is_opaque(p) && labels.get(p) == Some(shape.id)
    };

    let mut candidates = Vec::new();
    for y in min.y..=max.y {
        for x in min.x..=max.x {
            let p = Point::from_yx(y, x);
            if !in_shape(p) {
                continue;
            }
            let neighbors = p.neighbors().into_iter().filter(|n| in_shape(*n)).count();
            if neighbors < INTERIOR_NEIGHBOR_COUNT {
                candidates.push(p);
            }
        }
    }
    candidates
}

/// Return the number of search iterations for an optimization quality level.
///
/// The count grows quadratically from [`MIN_ITERATIONS`] at quality 0 to
/// [`MAX_ITERATIONS`] at [`MAX_QUALITY`].
pub fn iterations_for_quality(quality: u32) -> u32 {
    let t = quality as f32 / MAX_QUALITY as f32;
    let t = t * t;
    (MIN_ITERATIONS as f32 * (1. - t) + MAX_ITERATIONS as f32 * t) as u32
}

/// Search for a small octagon enclosing the convex polygon `hull`.
///
/// A hull with at most [`MAX_POLYGON_VERTICES`] vertices already qualifies
/// and is returned unchanged, without searching.
///
/// For larger hulls, each edge defines an infinite line. Every iteration picks
/// eight of these lines in hull order and intersects consecutive pairs,
/// wrapping around, to form the vertices of a candidate. Candidates are rejected if two
/// consecutive lines don't intersect ahead of the first one (see
/// [`LineF::extended_intersection`]), or if a vertex falls outside the
/// `width x height` image. The remaining candidate with the lowest
/// [ranking value](fan_area) is returned.
///
/// The search is seeded with [`SEARCH_SEED`], so the result only depends on
/// the inputs. Returns `None` if no candidate was valid.
pub fn optimize_polygon(
    hull: &[PointF],
    width: u32,
    height: u32,
    iterations: u32,
) -> Option<Vec<PointF>> {
    if hull.is_empty() {
        return None;
    }
    if hull.len() <= MAX_POLYGON_VERTICES {
        return Some(hull.to_vec());
    }

    let n = hull.len();
    let lines: Vec<LineF> = (0..n)
        .map(|i| Line::from_endpoints(hull[i], hull[(i + 1) % n]))
        .collect();
    let last = (n - 1) as u32;

    let (width, height) = (width as f32, height as f32);
    let in_image = |p: &PointF| p.x >= 0. && p.x <= width && p.y >= 0. && p.y <= height;
    let vertex = |a: usize, b: usize| {
        lines[a]
            .extended_intersection(lines[b])
            .filter(|p| in_image(p))
    };

    let mut rng = fastrand::Rng::with_seed(SEARCH_SEED);
    let mut pick = |start: u32| rng.u32(start.min(last)..=last) as usize;

    let mut best: Option<[PointF; MAX_POLYGON_VERTICES]> = None;
    let mut best_area = f32::MAX;

    'search: for _ in 0..iterations {
        let first = pick(0);
        let mut prev = first;
        let mut vertices = [PointF::default(); MAX_POLYGON_VERTICES];

        for v in vertices.iter_mut().take(MAX_POLYGON_VERTICES - 1) {
            let next = pick(prev as u32 + 1);
            let Some(p) = vertex(prev, next) else {
                continue 'search;
            };
            *v = p;
            prev = next;
        }
        let Some(closing) = vertex(prev, first) else {
            continue;
        };
        vertices[MAX_POLYGON_VERTICES - 1] = closing;

        let area = fan_area(&vertices);
        if area < best_area {
            best_area = area;
            best = Some(vertices);
        }
    }

    best.map(|vertices| vertices.to_vec())
}

/// Return the value used to rank candidate polygons. Lower is better.
///
/// This sums `a.y * b.x - a.x * b.y` over consecutive spokes of the triangle
/// fan rooted at the first vertex. Its magnitude is twice the area for simple
/// polygons, but its sign depends on the winding order of the vertices.
fn fan_area(vertices: &[PointF]) -> f32 {
    let Some((&origin, rest)) = vertices.split_first() else {
        return 0.;
    };
    let spokes: Vec<_> = rest.iter().map(|&v| origin.vec_to(v)).collect();
    spokes
        .windows(2)
        .fold(0., |area, pair| area + pair[0].y * pair[1].x - pair[0].x * pair[1].y)
}

/// Find a polygon with at most [`MAX_POLYGON_VERTICES`] vertices that encloses
/// `shape`.
///
/// This computes the convex hull of the shape's [boundary
/// candidates](boundary_candidates) and passes it to [`optimize_polygon`],
/// which returns hulls with few enough vertices as-is and otherwise searches
/// for an enclosing octagon with a budget determined by `quality` (0-9, see
/// [`iterations_for_quality`]).
pub fn find_enclosing_polygon(
    image: &ImageData,
    labels: &LabelMap,
    shape: &ImageShape,
    quality: u32,
) -> Result<EnclosingPolygon, AnalyzeError> {
    if quality > MAX_QUALITY {
        return Err(AnalyzeError::InvalidQuality(quality));
    }

    let candidates = boundary_candidates(image, labels, shape);
    if candidates.is_empty() {
        return Ok(EnclosingPolygon::EmptyShape);
    }

    let hull: Vec<PointF> = convex_hull(&candidates)
        .into_iter()
        .map(|i| candidates[i].to_f32())
        .collect();
    log::trace!(
        "shape {}: {} boundary candidates, {} hull vertices",
        shape.id,
        candidates.len(),
        hull.len()
    );

    if hull.len() < 3 {
        return Ok(EnclosingPolygon::InsufficientHull);
    }

    let iterations = iterations_for_quality(quality);
    let polygon = optimize_polygon(&hull, image.width(), image.height(), iterations);
    if polygon.is_none() {
        log::debug!(
            "no enclosing polygon found for shape {} after {} iterations",
            shape.id,
            iterations
        );
    }

    Ok(polygon.map_or(EnclosingPolygon::NotFound, EnclosingPolygon::Found))
}
