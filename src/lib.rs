//! sprite_analyzer finds the opaque shapes in an image and computes a small
//! polygon enclosing each of them.
//!
//! This is useful for generating collision hulls or other metadata for
//! sprites.
//!
//! # Workflow
//!
//! 1. Load an RGBA8 image and wrap it with [`ImageData::from_rgba`].
//! 2. Call [`analyze_image`], which:
//!    - labels 4-connected regions of pixels with non-zero alpha
//!      ([`find_shapes`]),
//!    - computes the convex hull of the pixels on each shape's boundary, and
//!    - if the hull has more than 8 vertices, searches for an octagon with a
//!      small area that encloses it ([`find_enclosing_polygon`]).
//! 3. Optionally, draw the polygons over the image with
//!    [`debug::draw_polygon`] to inspect the result.
//!
//! The polygon search is randomized but uses a fixed seed, so results are
//! reproducible. Its budget is set by a quality level from 0 to 9.
//!
//! ## Threading
//!
//! Shapes in an image are analyzed in parallel using a Rayon thread pool. By
//! default this is the pool returned by [`threading::thread_pool`], which is
//! sized to the number of logical cores. Use the `SPRITE_NUM_THREADS`
//! environment variable or [`AnalyzeOptions::thread_pool`] to change this.
//!
//! ## Diagnostics
//!
//! Progress is reported through the [log](https://docs.rs/log) crate. Set
//! `SPRITE_TIMING=1` to log the time spent in each stage.

mod analysis;
mod detect;
mod enclosing;
mod env;
mod error;
mod image;
mod timer;

pub mod debug;
pub mod threading;

pub use analysis::{analyze_image, AnalyzeOptions, ImageAnalysis, ShapeAnalysis};
pub use detect::{find_shapes, ImageShape, ShapeDetection};
pub use enclosing::{
    boundary_candidates, find_enclosing_polygon, iterations_for_quality, optimize_polygon,
    EnclosingPolygon, MAX_ITERATIONS, MAX_POLYGON_VERTICES, MAX_QUALITY, MIN_ITERATIONS,
    SEARCH_SEED,
};
pub use error::AnalyzeError;
pub use image::{ImageData, LabelMap};
pub use timer::{timing_enabled, Timer, TIMING_ENV_VAR};
