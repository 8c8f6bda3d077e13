//! JSON reports printed by the CLI.

use serde::Serialize;
use sprite_analyzer::{ImageAnalysis, ShapeAnalysis};
use sprite_imageproc::{Bounds, Coord, PointF};

/// Axis-aligned rectangle as reported in JSON output.
#[derive(Debug, PartialEq, Serialize)]
pub struct RectReport<T> {
    pub x: T,
    pub y: T,
    pub width: T,
    pub height: T,
}

impl<T: Coord> RectReport<T> {
    /// Convert `bounds` to a rectangle. Returns `None` if the bounds are
    /// empty.
    pub fn from_bounds(bounds: &Bounds<T>) -> Option<RectReport<T>> {
        let min = bounds.min()?;
        Some(RectReport {
            x: min.x,
            y: min.y,
            width: bounds.width(),
            height: bounds.height(),
        })
    }
}

#[derive(Debug, Serialize)]
pub struct ShapeReport {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,

    /// Enclosing polygon, or `null` if none was found.
    pub hull: Option<Vec<PointF>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub area: Option<f32>,
}

impl From<&ShapeAnalysis> for ShapeReport {
    fn from(analysis: &ShapeAnalysis) -> ShapeReport {
        let bounds = &analysis.shape.bounds;
        let min = bounds.min().unwrap_or_default();
        ShapeReport {
            x: min.x,
            y: min.y,
            width: bounds.width(),
            height: bounds.height(),
            hull: analysis.polygon.vertices().map(|v| v.to_vec()),
            area: analysis.area,
        }
    }
}

/// Per-image bounds, included in extended reports.
///
/// The outer `Option` controls whether the field is present. The inner one
/// is serialized as `null` when the bounds are empty.
type ExtendedBounds<T> = Option<Option<RectReport<T>>>;

fn extended_bounds(analysis: &ImageAnalysis) -> (ExtendedBounds<i32>, ExtendedBounds<f32>) {
    (
        Some(RectReport::from_bounds(&analysis.rect_bounds)),
        Some(RectReport::from_bounds(&analysis.hull_bounds)),
    )
}

/// Report for a single input image.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageReport {
    pub shapes: Vec<ShapeReport>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub rect_bounds: ExtendedBounds<i32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub hull_bounds: ExtendedBounds<f32>,
}

impl ImageReport {
    pub fn new(analysis: &ImageAnalysis, extended: bool) -> ImageReport {
        let (rect_bounds, hull_bounds) = if extended {
            extended_bounds(analysis)
        } else {
            (None, None)
        };
        ImageReport {
            shapes: analysis.shapes.iter().map(ShapeReport::from).collect(),
            rect_bounds,
            hull_bounds,
        }
    }
}

/// Entry for one file in a batch report.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileReport {
    pub path: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub shapes: Option<Vec<ShapeReport>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub rect_bounds: ExtendedBounds<i32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub hull_bounds: ExtendedBounds<f32>,
}

/// Error reported for files without shapes in extended mode.
pub const NO_SHAPES_ERROR: &str = "No shapes found";

impl FileReport {
    pub fn from_error(path: String, error: String) -> FileReport {
        FileReport {
            path,
            error: Some(error),
            shapes: None,
            rect_bounds: None,
            hull_bounds: None,
        }
    }

    pub fn from_analysis(path: String, analysis: &ImageAnalysis, extended: bool) -> FileReport {
        let (rect_bounds, hull_bounds) = if extended {
            extended_bounds(analysis)
        } else {
            (None, None)
        };

        if analysis.shapes.is_empty() {
            return FileReport {
                path,
                error: extended.then(|| NO_SHAPES_ERROR.to_string()),
                shapes: None,
                rect_bounds,
                hull_bounds,
            };
        }

        FileReport {
            path,
            error: None,
            shapes: Some(analysis.shapes.iter().map(ShapeReport::from).collect()),
            rect_bounds,
            hull_bounds,
        }
    }
}

/// Report for a batch of files matched by a glob pattern.
#[derive(Debug, Serialize)]
pub struct BatchReport {
    pub files: Vec<FileReport>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use sprite_analyzer::{EnclosingPolygon, ImageAnalysis, ImageShape, ShapeAnalysis};
    use sprite_imageproc::{Bounds, BoundsF, Point, PointF};

    use super::{FileReport, ImageReport, RectReport};

    fn example_analysis(extended: bool) -> ImageAnalysis {
        let triangle: Vec<PointF> = [[0., 0.], [0., 4.], [2., 2.]]
            .map(|[y, x]| PointF::from_yx(y, x))
            .to_vec();
        let shapes = vec![
            ShapeAnalysis {
                shape: ImageShape {
                    id: 1,
                    bounds: Bounds::from_corners(Point::from_yx(0, 0), Point::from_yx(2, 4)),
                },
                polygon: EnclosingPolygon::Found(triangle.clone()),
                area: extended.then_some(4.),
            },
            ShapeAnalysis {
                shape: ImageShape {
                    id: 2,
                    bounds: Bounds::from_point(Point::from_yx(5, 6)),
                },
                polygon: EnclosingPolygon::InsufficientHull,
                area: None,
            },
        ];
        ImageAnalysis {
            rect_bounds: Bounds::from_corners(Point::from_yx(0, 0), Point::from_yx(5, 6)),
            hull_bounds: triangle.into_iter().collect(),
            shapes,
        }
    }

    fn empty_analysis() -> ImageAnalysis {
        ImageAnalysis {
            shapes: Vec::new(),
            rect_bounds: Bounds::empty(),
            hull_bounds: BoundsF::empty(),
        }
    }

    #[test]
    fn test_rect_from_bounds() {
        let bounds = Bounds::from_corners(Point::from_yx(2, 3), Point::from_yx(7, 4));
        assert_eq!(
            RectReport::from_bounds(&bounds),
            Some(RectReport {
                x: 3,
                y: 2,
                width: 1,
                height: 5
            })
        );
        assert_eq!(RectReport::from_bounds(&Bounds::<i32>::empty()), None);
    }

    #[test]
    fn test_image_report() {
        let report = ImageReport::new(&example_analysis(false), false);
        assert_eq!(
            serde_json::to_value(&report).unwrap(),
            json!({
                "shapes": [
                    {
                        "x": 0, "y": 0, "width": 4, "height": 2,
                        "hull": [{"x": 0., "y": 0.}, {"x": 4., "y": 0.}, {"x": 2., "y": 2.}],
                    },
                    {"x": 6, "y": 5, "width": 0, "height": 0, "hull": null},
                ]
            })
        );
    }

    #[test]
    fn test_extended_image_report() {
        let report = ImageReport::new(&example_analysis(true), true);
        assert_eq!(
            serde_json::to_value(&report).unwrap(),
            json!({
                "shapes": [
                    {
                        "x": 0, "y": 0, "width": 4, "height": 2,
                        "hull": [{"x": 0., "y": 0.}, {"x": 4., "y": 0.}, {"x": 2., "y": 2.}],
                        "area": 4.,
                    },
                    {"x": 6, "y": 5, "width": 0, "height": 0, "hull": null},
                ],
                "rectBounds": {"x": 0, "y": 0, "width": 6, "height": 5},
                "hullBounds": {"x": 0., "y": 0., "width": 4., "height": 2.},
            })
        );

        let report = ImageReport::new(&empty_analysis(), true);
        assert_eq!(
            serde_json::to_value(&report).unwrap(),
            json!({"shapes": [], "rectBounds": null, "hullBounds": null})
        );
    }

    #[test]
    fn test_file_report() {
        let report = FileReport::from_analysis("a.png".into(), &example_analysis(true), true);
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["path"], "a.png");
        assert_eq!(value["shapes"].as_array().map(|s| s.len()), Some(2));
        assert_eq!(value["rectBounds"]["width"], 6);
        assert!(value.get("error").is_none());

        let report = FileReport::from_analysis("b.png".into(), &empty_analysis(), true);
        assert_eq!(
            serde_json::to_value(&report).unwrap(),
            json!({
                "path": "b.png",
                "error": "No shapes found",
                "rectBounds": null,
                "hullBounds": null,
            })
        );

        let report = FileReport::from_analysis("c.png".into(), &empty_analysis(), false);
        assert_eq!(
            serde_json::to_value(&report).unwrap(),
            json!({"path": "c.png"})
        );

        let report = FileReport::from_error("d.png".into(), "unreadable".into());
        assert_eq!(
            serde_json::to_value(&report).unwrap(),
            json!({"path": "d.png", "error": "unreadable"})
        );
    }
}
