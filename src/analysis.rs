use std::sync::Arc;

use rayon::prelude::*;
use sprite_imageproc::{Bounds, BoundsF, PointF, Polygon};

use crate::detect::{find_shapes, ImageShape};
use crate::enclosing::{find_enclosing_polygon, EnclosingPolygon, MAX_QUALITY};
use crate::image::{ImageData, LabelMap};
use crate::threading::{thread_pool, ThreadPool};
use crate::timer::Timer;
use crate::AnalyzeError;

/// Options that control an image analysis.
#[derive(Clone, Debug)]
pub struct AnalyzeOptions {
    /// Effort spent searching for enclosing polygons, from 0 to 9.
    pub quality: u32,

    /// Maximum number of shapes to report. If an image has more, they are
    /// merged into one.
    pub max_shapes: u8,

    /// Compute polygon areas in addition to the shapes.
    pub extended: bool,

    /// Pool used to analyze shapes in parallel. If not set, the pool returned
    /// by [`thread_pool`] is used.
    pub thread_pool: Option<Arc<ThreadPool>>,
}

impl Default for AnalyzeOptions {
    fn default() -> Self {
        AnalyzeOptions {
            quality: 0,
            max_shapes: u8::MAX,
            extended: false,
            thread_pool: None,
        }
    }
}

impl AnalyzeOptions {
    /// Check that the options are in range.
    pub fn validate(&self) -> Result<(), AnalyzeError> {
        if self.quality > MAX_QUALITY {
            return Err(AnalyzeError::InvalidQuality(self.quality));
        }
        if self.max_shapes == 0 {
            return Err(AnalyzeError::InvalidMaxShapes);
        }
        Ok(())
    }
}

/// Analysis of a single shape.
#[derive(Clone, Debug, PartialEq)]
pub struct ShapeAnalysis {
    pub shape: ImageShape,
    pub polygon: EnclosingPolygon,

    /// Area of the enclosing polygon. Only computed for extended analyses.
    pub area: Option<f32>,
}

/// Analysis of all shapes in an image.
#[derive(Clone, Debug, PartialEq)]
pub struct ImageAnalysis {
    /// Shapes in discovery order.
    pub shapes: Vec<ShapeAnalysis>,

    /// Union of the bounds of all shapes.
    pub rect_bounds: Bounds,

    /// Bounds of the vertices of all enclosing polygons. Empty if no polygon
    /// was found.
    pub hull_bounds: BoundsF,
}

impl ImageAnalysis {
    /// Return the enclosing polygons that were found, in shape order.
    pub fn polygons(&self) -> impl Iterator<Item = &[PointF]> {
        self.shapes.iter().filter_map(|s| s.polygon.vertices())
    }
}

fn analyze_shape(
    image: &ImageData,
    labels: &LabelMap,
    shape: &ImageShape,
    options: &AnalyzeOptions,
) -> Result<ShapeAnalysis, AnalyzeError> {
    let polygon = find_enclosing_polygon(image, labels, shape, options.quality)?;
    let area = if options.extended {
        polygon
            .vertices()
            .map(|vertices| Polygon::<f32, _>::new(vertices).area())
    } else {
        None
    };
    Ok(ShapeAnalysis {
        shape: shape.clone(),
        polygon,
        area,
    })
}

/// Detect the shapes in `image` and find an enclosing polygon for each.
///
/// Shapes are analyzed in parallel on the pool from `options`. The per-image
/// bounds are combined once all shapes are done.
pub fn analyze_image(
    image: &ImageData,
    options: &AnalyzeOptions,
) -> Result<ImageAnalysis, AnalyzeError> {
    options.validate()?;

    let detection = find_shapes(image, options.max_shapes)?;

    let pool = options.thread_pool.as_deref().unwrap_or_else(|| thread_pool());
    let mut timer = Timer::start_new("find enclosing polygons");
    let shapes = pool.run(|| {
        detection
            .shapes
            .par_iter()
            .map(|shape| analyze_shape(image, &detection.labels, shape, options))
            .collect::<Result<Vec<_>, _>>()
    })?;
    timer.end();
    timer.report();

    let rect_bounds = shapes
        .iter()
        .fold(Bounds::empty(), |bounds, s| bounds.union(s.shape.bounds));
    let hull_bounds = shapes
        .iter()
        .filter_map(|s| s.polygon.vertices())
        .fold(BoundsF::empty(), |bounds, vertices| {
            bounds.union(Polygon::<f32, _>::new(vertices).bounds())
        });

    Ok(ImageAnalysis {
        shapes,
        rect_bounds,
        hull_bounds,
    })
}
