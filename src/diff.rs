//! Per-channel RGBA differencing kernels.
//!
//! The scalar kernel is the reference implementation; the SIMD kernel in
//! [`simd`] must produce byte-identical output for every input pair and mode.

mod simd;

use std::str::FromStr;

use crate::errors::{DiffError, ModeParseError};
use crate::pixel_buffer::PixelBuffer;

pub use simd::diff_simd;

/// The arithmetic policy used to combine two channel values into one.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum DiffMode {
    /// `|a - b|`. Symmetric; the default for visual diffs.
    #[default]
    Absolute,
    /// `max(a - b, 0)`. Negative differences clamp to zero, never wrap.
    Saturating,
    /// `(a - b) mod 256`. Two's-complement wraparound, e.g. 10 - 20 = 246.
    Modular,
}

impl FromStr for DiffMode {
    type Err = ModeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "absolute" | "abs" => Ok(DiffMode::Absolute),
            "saturated" | "sat" => Ok(DiffMode::Saturating),
            "modular" | "mod" => Ok(DiffMode::Modular),
            _ => Err(ModeParseError(s.to_owned())),
        }
    }
}

/// Combines two 8-bit channel values under `mode`.
///
/// Total over all inputs; all three modes agree with plain subtraction
/// when `a >= b`.
#[must_use]
#[inline(always)]
pub fn channel_diff(a: u8, b: u8, mode: DiffMode) -> u8 {
    match mode {
        DiffMode::Absolute => a.abs_diff(b),
        DiffMode::Saturating => a.saturating_sub(b),
        DiffMode::Modular => a.wrapping_sub(b),
    }
}

/// Diffs `buf2` from `buf1` in place, one pixel at a time.
///
/// The color channels of each pixel in `buf1` are replaced with the
/// per-channel difference; the alpha channel is forced to fully opaque.
/// Otherwise the result would assume `buf1`'s opacity levels, which makes
/// visual diffs ambiguous.
///
/// Callers must ensure `buf1.len() == buf2.len()`; [`diff`] checks this.
pub fn diff_scalar(buf1: &mut [[u8; 4]], buf2: &[[u8; 4]], mode: DiffMode) {
    for (px1, px2) in buf1.iter_mut().zip(buf2.iter()) {
        for (c1, c2) in px1.iter_mut().zip(px2.iter()).take(3) {
            *c1 = channel_diff(*c1, *c2, mode);
        }
        px1[3] = 0xFF;
    }
}

/// Whether the SIMD kernel lowers to vector instructions on this target.
///
/// The `wide` types compile everywhere, so this only reports whether the
/// batch path is worth taking; the scalar kernel is always available.
#[must_use]
pub const fn simd_available() -> bool {
    cfg!(any(target_arch = "x86_64", target_arch = "aarch64"))
}

/// Diffs `buf2` from `buf1` in place, selecting the SIMD kernel when it is
/// requested and available on this target, and the scalar kernel otherwise.
///
/// Both kernels produce byte-identical results; the choice only affects
/// throughput. Passing `use_simd = false` forces the scalar path, which is
/// useful for parity verification and benchmarking.
///
/// # Errors
/// - If the buffers do not contain the same number of pixels
/// - If the buffers are empty
pub fn diff(
    buf1: &mut [[u8; 4]],
    buf2: &[[u8; 4]],
    mode: DiffMode,
    use_simd: bool,
) -> Result<(), DiffError> {
    if buf1.len() != buf2.len() {
        return Err(DiffError::LengthMismatch {
            left: buf1.len(),
            right: buf2.len(),
        });
    }
    if buf1.is_empty() {
        return Err(DiffError::EmptyInput);
    }

    if use_simd && simd_available() {
        diff_simd(buf1, buf2, mode);
    } else {
        diff_scalar(buf1, buf2, mode);
    }

    Ok(())
}

/// Diffs `image2` from `image1`, mutating `image1` into the result.
///
/// In addition to the checks made by [`diff`], this rejects a pair of
/// decoded images whose dimensions disagree. Buffers read from headerless
/// files carry no dimensions and are compared by length alone; when only
/// `image2` knows the dimensions, the result adopts them so it can still be
/// written out as a PNG.
///
/// # Errors
/// - If both images carry dimensions and they differ
/// - If the buffers do not contain the same number of pixels
/// - If the buffers are empty
pub fn diff_images(
    image1: &mut PixelBuffer,
    image2: &PixelBuffer,
    mode: DiffMode,
    use_simd: bool,
) -> Result<(), DiffError> {
    if let (Some(left), Some(right)) = (image1.dimensions(), image2.dimensions()) {
        if left != right {
            return Err(DiffError::DimensionMismatch { left, right });
        }
    }

    diff(image1.data_mut(), image2.data(), mode, use_simd)?;

    if image1.dimensions.is_none() {
        image1.dimensions = image2.dimensions;
    }

    Ok(())
}
