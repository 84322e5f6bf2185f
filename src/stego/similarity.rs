// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Visual distortion metric between a carrier and its encoded copy.

use crate::stego::pixels::{PixelBuffer, CHANNELS};

/// Mean per-pixel RGB difference, normalized to `[0, 1]`.
///
/// Each pixel contributes `(|dR| + |dG| + |dB|) / 3 / 255`; alpha is ignored.
/// 0.0 means identical colour data. Images of different dimensions return 1.0.
/// Diagnostic only, never used to accept or reject an encode.
pub fn image_difference(a: &PixelBuffer, b: &PixelBuffer) -> f64 {
    if a.width() != b.width() || a.height() != b.height() {
        return 1.0;
    }
    let pixels = a.pixel_count();
    if pixels == 0 {
        return 0.0;
    }

    let total: f64 = a
        .as_raw()
        .chunks_exact(CHANNELS)
        .zip(b.as_raw().chunks_exact(CHANNELS))
        .map(|(p, q)| {
            let diff: u32 = (0..3).map(|c| u32::from(p[c].abs_diff(q[c]))).sum();
            f64::from(diff) / 3.0 / 255.0
        })
        .sum();

    total / pixels as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_is_zero() {
        let img = PixelBuffer::color_grid(8, 4);
        assert_eq!(image_difference(&img, &img.clone()), 0.0);
    }

    #[test]
    fn black_vs_white_is_one() {
        let mut black = PixelBuffer::new(2, 2);
        let mut white = PixelBuffer::new(2, 2);
        for y in 0..2 {
            for x in 0..2 {
                black.set(x, y, [0, 0, 0, 255]);
                white.set(x, y, [255, 255, 255, 0]);
            }
        }
        assert!((image_difference(&black, &white) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn alpha_ignored() {
        let a = PixelBuffer::new(1, 1);
        let mut b = PixelBuffer::new(1, 1);
        b.set(0, 0, [0, 0, 0, 200]);
        assert_eq!(image_difference(&a, &b), 0.0);
    }

    #[test]
    fn single_channel_change_is_averaged() {
        let a = PixelBuffer::new(2, 1);
        let mut b = PixelBuffer::new(2, 1);
        b.set(0, 0, [255, 0, 0, 0]);
        // One pixel at 1/3, one at 0 -> mean 1/6.
        assert!((image_difference(&a, &b) - 1.0 / 6.0).abs() < 1e-12);
    }

    #[test]
    fn dimension_mismatch_is_max() {
        let a = PixelBuffer::new(2, 3);
        let b = PixelBuffer::new(3, 2);
        assert_eq!(image_difference(&a, &b), 1.0);
    }
}
