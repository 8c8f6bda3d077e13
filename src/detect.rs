use sprite_imageproc::{flood_fill, Bounds, FloodFill, Point};

use crate::image::{ImageData, LabelMap};
use crate::timer::Timer;
use crate::AnalyzeError;

/// A connected region of opaque pixels.
#[derive(Clone, Debug, PartialEq)]
pub struct ImageShape {
    /// Label of the shape's pixels in the [`LabelMap`]. Ids start at 1.
    pub id: u8,

    /// Tight bounds of the pixels labeled with `id`.
    pub bounds: Bounds,
}

/// Result of [`find_shapes`].
#[derive(Clone, Debug)]
pub struct ShapeDetection {
    /// Shapes in the order they were discovered, scanning the image row by
    /// row.
    pub shapes: Vec<ImageShape>,

    /// Shape id of every pixel.
    pub labels: LabelMap,
}

/// Fill target which assigns a shape's id to unlabeled opaque pixels.
struct ShapeLabeler<'a> {
    image: &'a ImageData,
    labels: &'a mut LabelMap,
    shape: &'a mut ImageShape,
}

impl FloodFill for ShapeLabeler<'_> {
    fn inside(&self, p: Point) -> bool {
        self.image.is_opaque(p) && self.labels.get(p) == Some(0)
    }

    fn set(&mut self, p: Point) {
        self.labels.set(p, self.shape.id);
        self.shape.bounds.expand(p);
    }
}

/// Find the 4-connected regions of opaque (non-zero alpha) pixels in `image`.
///
/// Pixels are scanned in row-major order and each unlabeled opaque pixel
/// starts a new shape, which is flood-filled. At most `max_shapes` shapes are
/// returned. If the image contains more regions than that, all of them are
/// merged into a single shape with id 1, whose bounds are the union of all
/// regions.
///
/// A fully transparent image yields no shapes. `max_shapes` must be at
/// least 1.
pub fn find_shapes(image: &ImageData, max_shapes: u8) -> Result<ShapeDetection, AnalyzeError> {
    if max_shapes == 0 {
        return Err(AnalyzeError::InvalidMaxShapes);
    }

    let mut timer = Timer::start_new("find shapes");
    let mut labels = LabelMap::new(image.width(), image.height());
    let mut shapes: Vec<ImageShape> = Vec::new();
    let mut overflow = false;

    for y in 0..image.height() as i32 {
        for x in 0..image.width() as i32 {
            let p = Point::from_yx(y, x);
            if !image.is_opaque(p) || labels.get(p) != Some(0) {
                continue;
            }

            let current = if shapes.len() < max_shapes as usize {
                shapes.push(ImageShape {
                    id: shapes.len() as u8 + 1,
                    bounds: Bounds::empty(),
                });
                shapes.len() - 1
            } else {
                // Regions beyond the limit are merged into the first shape.
                overflow = true;
                0
            };

            let mut labeler = ShapeLabeler {
                image,
                labels: &mut labels,
                shape: &mut shapes[current],
            };
            flood_fill(p, &mut labeler);
        }
    }

    if overflow {
        log::debug!(
            "more than {} shapes found, merging into one shape",
            max_shapes
        );
        labels.merge_all(1);
        let bounds = shapes
            .iter()
            .fold(Bounds::empty(), |bounds, shape| bounds.union(shape.bounds));
        shapes.truncate(1);
        shapes[0].bounds = bounds;
    }

    timer.end();
    timer.report();
    log::debug!(
        "found {} shapes in {}x{} image",
        shapes.len(),
        image.width(),
        image.height()
    );

    Ok(ShapeDetection { shapes, labels })
}
