//! Provides utilities for loading and saving images as raw RGBA8 buffers.
//!
//! Whatever format the file is stored in, images are always handed over as
//! interleaved 8-bit RGBA pixels in row-major, top-to-bottom order.

use std::error::Error;
use std::path::Path;

/// An RGBA8 image.
#[derive(Clone, Debug, PartialEq)]
pub struct RgbaImage {
    pub width: u32,
    pub height: u32,

    /// Interleaved RGBA pixels, `width * height * 4` bytes long.
    pub data: Vec<u8>,
}

/// Errors reported when reading an image.
#[derive(Debug)]
pub enum ReadImageError {
    /// The image could not be opened or decoded.
    ImageError(image::ImageError),
}

impl std::fmt::Display for ReadImageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReadImageError::ImageError(e) => write!(f, "failed to read image: {}", e),
        }
    }
}

impl Error for ReadImageError {}

/// Convert a decoded image into an RGBA8 buffer.
pub fn image_to_rgba(image: image::DynamicImage) -> RgbaImage {
    let image = image.into_rgba8();
    let (width, height) = image.dimensions();
    RgbaImage {
        width,
        height,
        data: image.into_raw(),
    }
}

/// Read an image file into an RGBA8 buffer.
///
/// The format is detected from the file contents and extension. To load an
/// image from memory, use [`image::load_from_memory`] and pass the result to
/// [`image_to_rgba`].
pub fn read_image<P: AsRef<Path>>(path: P) -> Result<RgbaImage, ReadImageError> {
    image::open(path)
        .map(image_to_rgba)
        .map_err(ReadImageError::ImageError)
}

/// Errors returned when writing an image.
#[derive(Debug)]
pub enum WriteImageError {
    /// The buffer length does not match the image dimensions.
    InvalidBufferSize { expected: usize, actual: usize },
    /// The image could not be encoded or written.
    ImageError(image::ImageError),
}

impl std::fmt::Display for WriteImageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidBufferSize { expected, actual } => write!(
                f,
                "image buffer has {} bytes but dimensions require {}",
                actual, expected
            ),
            Self::ImageError(e) => write!(f, "failed to write image: {}", e),
        }
    }
}

impl Error for WriteImageError {}

/// Write an RGBA8 image to a file.
///
/// The output format is chosen from the extension of `path`.
pub fn write_image<P: AsRef<Path>>(path: P, image: &RgbaImage) -> Result<(), WriteImageError> {
    let expected = image.width as usize * image.height as usize * 4;
    if image.data.len() != expected {
        return Err(WriteImageError::InvalidBufferSize {
            expected,
            actual: image.data.len(),
        });
    }

    image::save_buffer(
        path,
        &image.data,
        image.width,
        image.height,
        image::ColorType::Rgba8,
    )
    .map_err(WriteImageError::ImageError)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use sprite_testing::sprite_from_ascii;

    use super::{read_image, write_image, ReadImageError, RgbaImage, WriteImageError};

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("sprite-imageio-{}-{}", std::process::id(), name))
    }

    #[test]
    fn test_write_then_read_png() {
        let sprite = sprite_from_ascii(&["#..", ".#+", "..#"]);
        let image = RgbaImage {
            width: sprite.width,
            height: sprite.height,
            data: sprite.data,
        };

        let path = temp_path("roundtrip.png");
        write_image(&path, &image).unwrap();
        let loaded = read_image(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(loaded, image);
    }

    #[test]
    fn test_read_missing_file() {
        let result = read_image(temp_path("does-not-exist.png"));
        assert!(matches!(result, Err(ReadImageError::ImageError(_))));
    }

    #[test]
    fn test_write_wrong_buffer_size() {
        let image = RgbaImage {
            width: 2,
            height: 2,
            data: vec![0; 15],
        };
        let result = write_image(temp_path("invalid.png"), &image);
        assert!(matches!(
            result,
            Err(WriteImageError::InvalidBufferSize {
                expected: 16,
                actual: 15
            })
        ));
    }
}
