use sprite_imageproc::Point;

use crate::AnalyzeError;

/// Number of bytes per RGBA8 pixel.
pub const BYTES_PER_PIXEL: usize = 4;

/// Return the row-major index of `p` in a `width x height` grid, or `None` if
/// `p` lies outside it.
fn grid_index(width: u32, height: u32, p: Point) -> Option<usize> {
    if p.x < 0 || p.y < 0 || p.x as u32 >= width || p.y as u32 >= height {
        return None;
    }
    Some(p.y as usize * width as usize + p.x as usize)
}

/// An RGBA8 image in row-major, top-to-bottom order.
///
/// Pixels are addressed by [`Point`]. Every accessor checks coordinates, so
/// reading outside the image yields `None` (or a transparent pixel) rather
/// than panicking.
#[derive(Clone, Debug, PartialEq)]
pub struct ImageData {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl ImageData {
    /// Wrap an interleaved RGBA8 buffer.
    ///
    /// Fails if `data` is not exactly `width * height * 4` bytes long.
    pub fn from_rgba(width: u32, height: u32, data: Vec<u8>) -> Result<ImageData, AnalyzeError> {
        let expected = width as usize * height as usize * BYTES_PER_PIXEL;
        if data.len() != expected {
            return Err(AnalyzeError::InvalidBufferSize {
                expected,
                actual: data.len(),
            });
        }
        Ok(ImageData {
            width,
            height,
            data,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Return the interleaved RGBA8 pixel data.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Consume the image and return its pixel data.
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// Return the index of the pixel at `p`, or `None` if `p` is outside the
    /// image.
    pub fn index(&self, p: Point) -> Option<usize> {
        grid_index(self.width, self.height, p)
    }

    /// Return the alpha value of the pixel at `p`.
    pub fn alpha(&self, p: Point) -> Option<u8> {
        self.index(p)
            .map(|i| self.data[i * BYTES_PER_PIXEL + BYTES_PER_PIXEL - 1])
    }

    /// Return true if `p` is inside the image and its alpha is non-zero.
    pub fn is_opaque(&self, p: Point) -> bool {
        self.alpha(p).is_some_and(|a| a > 0)
    }

    /// Return the pixel at `p` packed as `0xRRGGBBAA`.
    pub fn pixel(&self, p: Point) -> Option<u32> {
        let offset = self.index(p)? * BYTES_PER_PIXEL;
        let bytes = &self.data[offset..offset + BYTES_PER_PIXEL];
        Some(u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    /// Set the pixel at `p` from a `0xRRGGBBAA` value.
    ///
    /// Points outside the image are ignored.
    pub fn set_pixel(&mut self, p: Point, rgba: u32) {
        if let Some(i) = self.index(p) {
            let offset = i * BYTES_PER_PIXEL;
            self.data[offset..offset + BYTES_PER_PIXEL].copy_from_slice(&rgba.to_be_bytes());
        }
    }
}

/// Shape id of each pixel in an image.
///
/// Zero marks pixels which do not belong to any shape.
#[derive(Clone, Debug, PartialEq)]
pub struct LabelMap {
    width: u32,
    height: u32,
    labels: Vec<u8>,
}

impl LabelMap {
    /// Create a label map with every pixel unlabeled.
    pub fn new(width: u32, height: u32) -> LabelMap {
        LabelMap {
            width,
            height,
            labels: vec![0; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Return the label of `p`, or `None` if `p` is outside the map.
    pub fn get(&self, p: Point) -> Option<u8> {
        grid_index(self.width, self.height, p).map(|i| self.labels[i])
    }

    /// Set the label of `p`. Points outside the map are ignored.
    pub fn set(&mut self, p: Point, id: u8) {
        if let Some(i) = grid_index(self.width, self.height, p) {
            self.labels[i] = id;
        }
    }

    /// Return the labels in row-major order.
    pub fn as_slice(&self) -> &[u8] {
        &self.labels
    }

    /// Replace every non-zero label with `id`.
    pub(crate) fn merge_all(&mut self, id: u8) {
        for label in self.labels.iter_mut().filter(|l| **l > 0) {
            *label = id;
        }
    }
}

#[cfg(test)]
mod tests {
    use sprite_imageproc::Point;
    use sprite_testing::{sprite_from_ascii, TestCases};

    use super::{ImageData, LabelMap};
    use crate::AnalyzeError;

    #[test]
    fn test_from_rgba_checks_size() {
        assert!(ImageData::from_rgba(2, 3, vec![0; 24]).is_ok());
        assert_eq!(
            ImageData::from_rgba(2, 3, vec![0; 23]),
            Err(AnalyzeError::InvalidBufferSize {
                expected: 24,
                actual: 23
            })
        );
        assert!(ImageData::from_rgba(0, 0, Vec::new()).is_ok());
    }

    #[test]
    fn test_index() {
        #[derive(Debug)]
        struct Case {
            point: [i32; 2],
            expected: Option<usize>,
        }

        let image = ImageData::from_rgba(4, 3, vec![0; 48]).unwrap();

        let cases = [
            Case {
                point: [0, 0],
                expected: Some(0),
            },
            Case {
                point: [1, 2],
                expected: Some(6),
            },
            Case {
                point: [2, 3],
                expected: Some(11),
            },
            Case {
                point: [3, 0],
                expected: None,
            },
            Case {
                point: [0, 4],
                expected: None,
            },
            Case {
                point: [-1, 0],
                expected: None,
            },
            Case {
                point: [0, -1],
                expected: None,
            },
        ];

        cases.test_each(|case| {
            let [y, x] = case.point;
            assert_eq!(image.index(Point::from_yx(y, x)), case.expected);
        })
    }

    #[test]
    fn test_pixel_accessors() {
        let sprite = sprite_from_ascii(&["#.", ".+"]);
        let mut image = ImageData::from_rgba(sprite.width, sprite.height, sprite.data).unwrap();

        assert_eq!(image.alpha(Point::from_yx(0, 0)), Some(255));
        assert_eq!(image.alpha(Point::from_yx(1, 1)), Some(1));
        assert_eq!(image.alpha(Point::from_yx(2, 2)), None);
        assert!(image.is_opaque(Point::from_yx(1, 1)));
        assert!(!image.is_opaque(Point::from_yx(0, 1)));
        assert!(!image.is_opaque(Point::from_yx(-1, 0)));

        assert_eq!(image.pixel(Point::from_yx(0, 0)), Some(0xCC4422FF));

        image.set_pixel(Point::from_yx(0, 1), 0x11223344);
        assert_eq!(image.pixel(Point::from_yx(0, 1)), Some(0x11223344));
        assert_eq!(&image.data()[4..8], &[0x11, 0x22, 0x33, 0x44]);

        // Out of bounds writes are ignored.
        let before = image.clone();
        image.set_pixel(Point::from_yx(5, 5), 0xFFFFFFFF);
        assert_eq!(image, before);
    }

    #[test]
    fn test_label_map() {
        let mut labels = LabelMap::new(3, 2);
        assert_eq!(labels.get(Point::from_yx(1, 2)), Some(0));
        assert_eq!(labels.get(Point::from_yx(2, 0)), None);

        labels.set(Point::from_yx(1, 2), 3);
        labels.set(Point::from_yx(0, 0), 2);
        labels.set(Point::from_yx(9, 9), 1);
        assert_eq!(labels.as_slice(), &[2, 0, 0, 0, 0, 3]);

        labels.merge_all(1);
        assert_eq!(labels.as_slice(), &[1, 0, 0, 0, 0, 1]);
    }
}
