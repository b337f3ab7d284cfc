use std::path::PathBuf;

use thiserror::Error;

/// Error type for when invoking the diff kernel on a pair of buffers fails.
///
/// These are caller contract violations: the kernel requires two non-empty
/// buffers of equal length. They are detected up front, before any pixel is
/// touched, so a failed call never leaves a partially written buffer.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum DiffError {
    /// The two buffers do not contain the same number of pixels.
    #[error("Buffers must be the same size to diff. Left has {left} pixels, right has {right}.")]
    LengthMismatch { left: usize, right: usize },
    /// Both buffers are empty; there is nothing to diff.
    #[error("Input buffers have a size of 0, cannot diff images.")]
    EmptyInput,
    /// Both buffers carry dimensions and they disagree.
    #[error(
        "Image dimensions must be the same. Left is {}x{}, right is {}x{}.",
        left.0, left.1, right.0, right.1
    )]
    DimensionMismatch {
        left: (usize, usize),
        right: (usize, usize),
    },
}

/// Error type for when creating a [`PixelBuffer`] fails.
///
/// # Example
/// ```
/// use pixdiff::{CreationError, PixelBuffer};
///
/// // 10 pixels is not enough for the resolution 1920x1080
/// let data = vec![[0u8; 4]; 10];
/// let result = PixelBuffer::new(data, 1920, 1080);
///
/// assert!(result.is_err());
/// assert_eq!(result.unwrap_err(), CreationError::ResolutionMismatch);
/// ```
///
/// [`PixelBuffer`]: crate::pixel_buffer::PixelBuffer
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CreationError {
    /// There is a mismatch between the supplied data and the supplied resolution.
    ///
    /// Generally, data.len() should be equal to width * height.
    #[error("Data length does not match the specified dimensions.")]
    ResolutionMismatch,
    /// The supplied byte length is not a positive multiple of 4, so the data
    /// cannot be a sequence of packed RGBA pixels.
    #[error("Byte length is not a positive multiple of 4, cannot be packed RGBA data.")]
    UnalignedLength,
}

/// Error type for when reading an image file fails.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The file could not be decoded as a compressed image.
    #[error("Could not decode '{}': {source}", path.display())]
    Decode {
        path: PathBuf,
        source: image::ImageError,
    },
    #[error("Could not read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Input file '{}' has a size of zero.", path.display())]
    Empty { path: PathBuf },
    /// The raw file's byte length is not a multiple of the pixel size.
    #[error(
        "'{}' has a size of {len} bytes, which is not a multiple of 4. Cannot be RGBA data.",
        path.display()
    )]
    NotRgba { path: PathBuf, len: usize },
}

/// Error type for when writing an image file fails.
#[derive(Debug, Error)]
pub enum SaveError {
    /// The output file name does not end in `.png` or `rgba`.
    #[error(
        "Unsupported output file type for '{}'. Output filename must end with '.png' or 'rgba'.",
        path.display()
    )]
    UnsupportedFormat { path: PathBuf },
    /// A PNG was requested but the buffer does not know its dimensions.
    #[error(
        "Cannot write PNG '{}' without valid dimensions. Use an 'rgba' output name for headerless data.",
        path.display()
    )]
    MissingDimensions { path: PathBuf },
    #[error("Failed to encode '{}': {source}", path.display())]
    Encode {
        path: PathBuf,
        source: image::ImageError,
    },
    #[error("Failed to write '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Error type for when parsing a [`DiffMode`] from a string fails.
///
/// [`DiffMode`]: crate::diff::DiffMode
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Invalid mode '{0}'. Use: absolute (abs), saturated (sat), or modular (mod).")]
pub struct ModeParseError(pub String);
