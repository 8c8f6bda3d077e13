use std::error::Error;
use std::fmt;
use std::fmt::Display;

/// Errors reported when the inputs to an analysis are invalid.
#[derive(Clone, Debug, PartialEq)]
pub enum AnalyzeError {
    /// The shape limit was zero.
    InvalidMaxShapes,
    /// The optimization quality was outside the range `0..=9`.
    InvalidQuality(u32),
    /// The pixel buffer length does not match the image dimensions.
    InvalidBufferSize { expected: usize, actual: usize },
}

impl Display for AnalyzeError {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::InvalidMaxShapes => write!(fmt, "maximum shape count must be at least 1"),
            Self::InvalidQuality(quality) => {
                write!(fmt, "quality {} is outside the range 0-9", quality)
            }
            Self::InvalidBufferSize { expected, actual } => write!(
                fmt,
                "pixel buffer has {} bytes but image dimensions require {}",
                actual, expected
            ),
        }
    }
}

impl Error for AnalyzeError {}
