//! SIMD-optimized RGBA differencing.
//!
//! This module provides a vectorized version of the diff kernel that
//! processes batches of pixels at once for improved performance.

use wide::u8x16;

use super::{diff_scalar, DiffMode};

/// Pixels per 128-bit batch: 4 packed RGBA pixels = 16 byte lanes.
const BATCH: usize = 4;

/// Diffs `buf2` from `buf1` in place using SIMD, in batches of 4 pixels,
/// falling back to scalar processing for the remainder.
///
/// The per-mode operation runs across all 16 byte lanes at once, including
/// the alpha lanes; those are then overwritten by ORing in an alpha-only
/// mask, so every output pixel is fully opaque. The result is byte-identical
/// to [`diff_scalar`] for every input pair and mode.
///
/// Callers must ensure `buf1.len() == buf2.len()`; [`diff`] checks this.
///
/// [`diff`]: super::diff
#[inline]
pub fn diff_simd(buf1: &mut [[u8; 4]], buf2: &[[u8; 4]], mode: DiffMode) {
    // 0xFF in the alpha byte position of each of the 4 pixels.
    let alpha_mask = u8x16::new([
        0x00, 0x00, 0x00, 0xFF, 0x00, 0x00, 0x00, 0xFF, 0x00, 0x00, 0x00, 0xFF, 0x00, 0x00, 0x00,
        0xFF,
    ]);

    let batches = buf1.len() / BATCH;

    for batch_idx in 0..batches {
        let base = batch_idx * BATCH;

        // Load 4 pixels from each buffer as 16 raw byte lanes
        let mut bytes1 = [0u8; 16];
        let mut bytes2 = [0u8; 16];
        for i in 0..BATCH {
            bytes1[i * 4..(i + 1) * 4].copy_from_slice(&buf1[base + i]);
            bytes2[i * 4..(i + 1) * 4].copy_from_slice(&buf2[base + i]);
        }

        let px1 = u8x16::new(bytes1);
        let px2 = u8x16::new(bytes2);

        let diffed = match mode {
            // |a - b| per lane, without leaving u8
            DiffMode::Absolute => px1.max(px2) - px1.min(px2),
            // max(a - b, 0) per lane
            DiffMode::Saturating => px1.saturating_sub(px2),
            // (a - b) mod 256 per lane
            DiffMode::Modular => px1 - px2,
        };

        let out: [u8; 16] = (diffed | alpha_mask).into();
        for i in 0..BATCH {
            buf1[base + i].copy_from_slice(&out[i * 4..(i + 1) * 4]);
        }
    }

    // Process the last up to 3 pixels with the scalar kernel
    let tail = batches * BATCH;
    diff_scalar(&mut buf1[tail..], &buf2[tail..], mode);
}

#[cfg(test)]
mod tests {
    use interpolate_name::interpolate_test;
    use rand::Rng;

    use super::*;

    /// Generate buffer contents covering extremes and pseudo-random bytes.
    fn make_test_data(count: usize, seed: u8) -> Vec<[u8; 4]> {
        let mut data = Vec::with_capacity(count);
        for i in 0..count {
            let pixel = match i % 5 {
                0 => [0x00, 0x00, 0x00, 0x00],
                1 => [0xFF, 0xFF, 0xFF, 0xFF],
                2 => [i as u8, (i >> 8) as u8, seed, 0x80],
                3 => [seed.wrapping_mul(i as u8), 0x01, 0xFE, i as u8],
                _ => [
                    (i as u8).wrapping_mul(31).wrapping_add(seed),
                    (i as u8).wrapping_mul(87),
                    (i as u8).wrapping_mul(193),
                    (i as u8).wrapping_mul(11),
                ],
            };
            data.push(pixel);
        }
        data
    }

    fn assert_matches_scalar(buf1: &[[u8; 4]], buf2: &[[u8; 4]], mode: DiffMode) {
        let mut scalar = buf1.to_vec();
        diff_scalar(&mut scalar, buf2, mode);

        let mut simd = buf1.to_vec();
        diff_simd(&mut simd, buf2, mode);

        assert_eq!(
            scalar,
            simd,
            "SIMD output diverged from scalar for {} pixels in {:?} mode",
            buf1.len(),
            mode
        );
    }

    // Lengths around the batch width exercise the full-batch path, the
    // scalar tail, and both combined.
    #[interpolate_test(absolute, DiffMode::Absolute)]
    #[interpolate_test(saturating, DiffMode::Saturating)]
    #[interpolate_test(modular, DiffMode::Modular)]
    fn simd_matches_scalar_at_boundary_lengths(mode: DiffMode) {
        for len in [0usize, 1, 3, 4, 5, 7, 8, 31, 100] {
            let buf1 = make_test_data(len, 3);
            let buf2 = make_test_data(len, 101);
            assert_matches_scalar(&buf1, &buf2, mode);
        }
    }

    #[interpolate_test(absolute, DiffMode::Absolute)]
    #[interpolate_test(saturating, DiffMode::Saturating)]
    #[interpolate_test(modular, DiffMode::Modular)]
    fn simd_matches_scalar_on_random_buffers(mode: DiffMode) {
        let mut rng = rand::thread_rng();
        for _ in 0..16 {
            let len = rng.gen_range(1..=2048);
            let buf1: Vec<[u8; 4]> = (0..len).map(|_| rng.gen()).collect();
            let buf2: Vec<[u8; 4]> = (0..len).map(|_| rng.gen()).collect();
            assert_matches_scalar(&buf1, &buf2, mode);
        }
    }

    #[test]
    fn sub_batch_buffers_take_the_tail_path() {
        // 1 and 3 pixels never fill a batch; the result must still be the
        // scalar result exactly.
        for len in [1usize, 3] {
            let buf1 = vec![[10u8, 20, 30, 0]; len];
            let buf2 = vec![[20u8, 5, 30, 77]; len];

            let mut out = buf1.clone();
            diff_simd(&mut out, &buf2, DiffMode::Absolute);
            assert_eq!(out, vec![[10, 15, 0, 255]; len]);
        }
    }

    #[test]
    fn simd_forces_opacity() {
        let buf1 = vec![[0u8, 0, 0, 0]; 8];
        let buf2 = vec![[0u8, 0, 0, 0]; 8];
        let mut out = buf1;
        diff_simd(&mut out, &buf2, DiffMode::Modular);
        assert!(out.iter().all(|px| px[3] == 0xFF));
    }
}
