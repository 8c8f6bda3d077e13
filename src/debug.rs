//! Debug overlays which visualize enclosing polygons on an image.

use sprite_imageproc::{
    flood_fill, mix, pack_rgba, unpack_rgba, FloodFill, Point, PointF, Polygon, Rgba,
};

use crate::image::ImageData;

/// Color blended into the interior of polygons by [`draw_polygon`].
pub const DEFAULT_OVERLAY_COLOR: Rgba = [0.5, 0., 0., 1.];

/// Color of the markers drawn on polygon vertices, as `0xRRGGBBAA`.
pub const VERTEX_MARKER_COLOR: u32 = 0xFFFF00FF;

/// Color of the marker drawn on the polygon's centroid, as `0xRRGGBBAA`.
pub const CENTROID_MARKER_COLOR: u32 = 0x00FF00FF;

/// Weight of the overlay color when blending it with the image.
const OVERLAY_OPACITY: f32 = 0.5;

/// Offsets `[dy, dx]` of the pixels in a marker.
const MARKER_OFFSETS: [[f32; 2]; 5] = [[0., 0.], [0., -1.], [0., 1.], [-1., 0.], [1., 0.]];

/// Fill target which tints the pixels inside a polygon.
struct PolygonTint<'a> {
    image: &'a mut ImageData,
    polygon: Polygon<f32, &'a [PointF]>,
    color: Rgba,

    /// Pixels which have already been tinted.
    filled: Vec<bool>,
}

impl FloodFill for PolygonTint<'_> {
    fn inside(&self, p: Point) -> bool {
        self.image
            .index(p)
            .is_some_and(|i| !self.filled[i] && self.polygon.contains_point(p.to_f32()))
    }

    fn set(&mut self, p: Point) {
        let Some(i) = self.image.index(p) else {
            return;
        };
        self.filled[i] = true;
        if let Some(pixel) = self.image.pixel(p) {
            let tinted = mix(unpack_rgba(pixel), self.color, OVERLAY_OPACITY);
            self.image.set_pixel(p, pack_rgba(tinted));
        }
    }
}

/// Draw a small cross centered on `center`. Pixels outside the image are
/// skipped.
fn draw_marker(image: &mut ImageData, center: PointF, color: u32) {
    for [dy, dx] in MARKER_OFFSETS {
        image.set_pixel(center.translate(dy, dx).to_i32(), color);
    }
}

/// Draw `vertices` as a translucent polygon over `image`.
///
/// Pixels inside the polygon are blended 50/50 with `color`. The fill is
/// seeded from the centroid of the vertices, so it is only complete for
/// polygons where the centroid lies inside, such as convex polygons. Each
/// vertex is then marked with a yellow cross and the centroid with a green
/// one.
///
/// Polygons with fewer than 3 vertices are not drawn.
pub fn draw_polygon(image: &mut ImageData, vertices: &[PointF], color: Rgba) {
    if vertices.len() < 3 {
        return;
    }

    let polygon: Polygon<f32, &[PointF]> = Polygon::new(vertices);
    let Some(centroid) = polygon.centroid() else {
        return;
    };

    let pixel_count = image.width() as usize * image.height() as usize;
    let mut tint = PolygonTint {
        image: &mut *image,
        polygon,
        color,
        filled: vec![false; pixel_count],
    };
    flood_fill(centroid.to_i32(), &mut tint);

    for &vertex in vertices {
        draw_marker(image, vertex, VERTEX_MARKER_COLOR);
    }
    draw_marker(image, centroid, CENTROID_MARKER_COLOR);
}
