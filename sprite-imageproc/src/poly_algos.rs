use crate::Point;

/// Return twice the signed area of the triangle `(a, b, c)`, ie. the cross
/// product of `b - a` and `c - a`.
fn orientation(a: Point, b: Point, c: Point) -> i64 {
    let (abx, aby) = ((b.x - a.x) as i64, (b.y - a.y) as i64);
    let (acx, acy) = ((c.x - a.x) as i64, (c.y - a.y) as i64);
    abx * acy - aby * acx
}

/// Return the indices of the points in `points` that form a convex hull
/// enclosing them, in traversal order.
///
/// This uses gift wrapping (Jarvis march), which is O(n * h) for `n` points
/// and `h` hull vertices. The walk starts at the point with the smallest X
/// coordinate (ties broken by the smallest Y coordinate) and at each step
/// picks the point such that no other point lies on the wrong side of the edge
/// leading to it.
///
/// Inputs with four or fewer points are returned as-is, ie. the result is
/// `0..points.len()`. For larger inputs the walk is limited to
/// `points.len()` vertices, so degenerate (eg. collinear) input always
/// terminates.
pub fn convex_hull(points: &[Point]) -> Vec<usize> {
    if points.len() <= 4 {
        return (0..points.len()).collect();
    }

    let start = points
        .iter()
        .enumerate()
        .min_by_key(|(_, p)| (p.x, p.y))
        .map(|(i, _)| i)
        .unwrap_or(0);

    let mut hull = Vec::new();
    let mut current = start;
    loop {
        hull.push(current);
        if hull.len() >= points.len() {
            break;
        }

        let hull_point = points[current];
        let mut end = 0;
        for i in 1..points.len() {
            if points[end] == hull_point || orientation(points[end], hull_point, points[i]) < 0 {
                end = i;
            }
        }

        current = end;
        if current == start {
            break;
        }
    }

    hull
}
