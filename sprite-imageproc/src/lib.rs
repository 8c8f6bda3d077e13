//! 2D geometry and region-fill primitives used for sprite analysis.
//!
//! This includes:
//!
//! - 2D vectors and points: [Vec2], [Point]
//! - Shapes and their measures: [Line], [Polygon], [Bounds]
//! - A reusable scanline region fill: [flood_fill], driven by a [FloodFill]
//!   implementation
//! - Convex hulls of point sets: [convex_hull]
//! - Packed RGBA color helpers: [pack_rgba], [unpack_rgba], [mix]

mod bounds;
mod color;
mod fill;
mod math;
mod poly_algos;
mod shapes;

pub use bounds::{Bounds, BoundsF};
pub use color::{mix, pack_rgba, unpack_rgba, Rgba};
pub use fill::{flood_fill, FloodFill};
pub use math::Vec2;
pub use poly_algos::convex_hull;
pub use shapes::{Coord, Line, LineF, Point, PointF, Polygon, MIN_FORWARD_PARAM, PARALLEL_EPSILON};
