use std::collections::VecDeque;

use crate::Point;

/// Region being filled by [`flood_fill`].
///
/// Implementations decide which pixels belong to the region and what happens
/// when a pixel is filled, for example assigning a label to it or painting it.
/// The fill algorithm itself is unaware of either.
pub trait FloodFill {
    /// Return true if `p` is part of the region and has not been filled yet.
    ///
    /// This must return false for every point once [`FloodFill::set`] has been
    /// called on it, otherwise the fill will not terminate. It must also
    /// return false for points outside the underlying image.
    fn inside(&self, p: Point) -> bool;

    /// Fill the point `p`.
    fn set(&mut self, p: Point);
}

/// Fill the 4-connected region of `target` that contains `seed`.
///
/// This is a scanline fill: each seed is extended left and right along its row
/// to a maximal span, then the rows above and below the span are scanned and
/// one new seed is queued for each run of points that are inside the region.
/// Seeds are processed from a queue rather than by recursion, so the cost is
/// proportional to the number of points visited.
///
/// Nothing happens if `seed` is not inside the region.
pub fn flood_fill<F: FloodFill + ?Sized>(seed: Point, target: &mut F) {
    let mut queue = VecDeque::new();
    queue.push_back(seed);

    while let Some(p) = queue.pop_front() {
        // Seeds may have been filled since they were queued.
        if !target.inside(p) {
            continue;
        }

        let Point { x, y } = p;
        let mut left = x;
        while target.inside(Point::from_yx(y, left - 1)) {
            target.set(Point::from_yx(y, left - 1));
            left -= 1;
        }

        let mut right = x;
        while target.inside(Point::from_yx(y, right)) {
            target.set(Point::from_yx(y, right));
            right += 1;
        }

        // `left..right` is now the filled span.
        queue_runs(target, left, right, y + 1, &mut queue);
        queue_runs(target, left, right, y - 1, &mut queue);
    }
}

/// Queue one seed for each maximal run of inside points in row `y` between
/// `left` (inclusive) and `right` (exclusive).
fn queue_runs<F: FloodFill + ?Sized>(
    target: &F,
    left: i32,
    right: i32,
    y: i32,
    queue: &mut VecDeque<Point>,
) {
    let mut in_run = false;
    for x in left..right {
        let p = Point::from_yx(y, x);
        if !target.inside(p) {
            in_run = false;
        } else if !in_run {
            queue.push_back(p);
            in_run = true;
        }
    }
}
