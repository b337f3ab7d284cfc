//! Reading and writing the image files surrounding the diff kernel.
//!
//! Compressed inputs (PNG, JPEG) are decoded with authoritative dimensions.
//! Inputs the decoder rejects are retried as headerless packed RGBA dumps,
//! unless their name claims a compressed format. Output names ending in
//! `.png` select PNG; names ending in `rgba` select a headerless dump.

use std::ffi::OsStr;
use std::fs;
use std::path::Path;

use crate::errors::{LoadError, SaveError};
use crate::pixel_buffer::PixelBuffer;

/// Reads `path` as a compressed image, falling back to a raw RGBA read when
/// decoding fails and the file name does not claim a compressed format.
///
/// # Errors
/// - If the file cannot be read
/// - If the file names a compressed format but cannot be decoded
/// - If the file is empty, or its length is not a multiple of the pixel size
pub fn load_image(path: &Path) -> Result<PixelBuffer, LoadError> {
    match image::open(path) {
        Ok(img) => {
            let width = img.width() as usize;
            let height = img.height() as usize;
            let data = img
                .into_rgba8()
                .into_raw()
                .chunks_exact(4)
                .map(|px| [px[0], px[1], px[2], px[3]])
                .collect();

            // The decoder produced exactly width * height pixels.
            Ok(PixelBuffer {
                data,
                dimensions: Some((width, height)),
            })
        }
        Err(image::ImageError::IoError(source)) => Err(LoadError::Io {
            path: path.into(),
            source,
        }),
        Err(source) => {
            // A corrupt file that names a compressed format is a decode
            // failure, not raw pixel data.
            if has_compressed_extension(path) {
                return Err(LoadError::Decode {
                    path: path.into(),
                    source,
                });
            }

            log::warn!(
                "Could not decode '{}' as PNG or JPEG ({source}). Attempting raw RGBA read.",
                path.display()
            );
            load_rgba(path)
        }
    }
}

fn has_compressed_extension(path: &Path) -> bool {
    path.extension().and_then(OsStr::to_str).map_or(false, |ext| {
        ext.eq_ignore_ascii_case("png")
            || ext.eq_ignore_ascii_case("jpg")
            || ext.eq_ignore_ascii_case("jpeg")
    })
}

/// Reads `path` as headerless packed RGBA bytes.
fn load_rgba(path: &Path) -> Result<PixelBuffer, LoadError> {
    let bytes = fs::read(path).map_err(|source| LoadError::Io {
        path: path.into(),
        source,
    })?;

    if bytes.is_empty() {
        return Err(LoadError::Empty { path: path.into() });
    }
    if bytes.len() % 4 != 0 {
        return Err(LoadError::NotRgba {
            path: path.into(),
            len: bytes.len(),
        });
    }

    let data = bytes
        .chunks_exact(4)
        .map(|px| [px[0], px[1], px[2], px[3]])
        .collect();

    Ok(PixelBuffer {
        data,
        dimensions: None,
    })
}

/// Writes `buf` to `path`, choosing the container by file-name convention:
/// a name ending in `.png` gets a PNG with explicit dimensions, a name
/// ending in `rgba` gets a headerless packed byte dump.
///
/// # Errors
/// - If the file name matches neither convention
/// - If a PNG is requested but the buffer has no dimensions
/// - If encoding or writing fails
pub fn save_image(path: &Path, buf: &PixelBuffer) -> Result<(), SaveError> {
    let name = path.to_string_lossy();

    if name.ends_with(".png") {
        let Some((width, height)) = buf.dimensions() else {
            return Err(SaveError::MissingDimensions { path: path.into() });
        };
        if width == 0 || height == 0 {
            return Err(SaveError::MissingDimensions { path: path.into() });
        }

        image::save_buffer(
            path,
            &buf.to_packed_bytes(),
            width as u32,
            height as u32,
            image::ExtendedColorType::Rgba8,
        )
        .map_err(|source| SaveError::Encode {
            path: path.into(),
            source,
        })
    } else if name.ends_with("rgba") {
        fs::write(path, buf.to_packed_bytes()).map_err(|source| SaveError::Io {
            path: path.into(),
            source,
        })
    } else {
        Err(SaveError::UnsupportedFormat { path: path.into() })
    }
}
