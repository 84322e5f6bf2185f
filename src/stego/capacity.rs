// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Payload capacity accounting.
//!
//! ```text
//! total_bits     = pixels * bits_per_pixel(mode)
//! available_bits = total_bits - 64          (header, not clamped)
//! required_bits  = payload_len * 8
//! fits           = available_bits >= required_bits
//! ```
//!
//! Byte counts are whole-byte floors. `available` may be negative for
//! carriers that cannot even hold the header.

use crate::stego::header::HEADER_LEN;
use crate::stego::mode::Mode;
use crate::stego::pixels::PixelBuffer;

const HEADER_BITS: i64 = (HEADER_LEN * 8) as i64;

/// Result of a capacity check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capacity {
    /// Whether the payload fits after reserving the header.
    pub fits: bool,
    /// Whole payload bytes the carrier can hold. Signed, not clamped.
    pub available_bytes: i64,
    /// Bytes the payload needs.
    pub required_bytes: u64,
}

/// Check whether `payload_len` bytes fit in `pixel_count` pixels under `mode`.
pub fn capacity(pixel_count: usize, payload_len: usize, mode: Mode) -> Capacity {
    let total_bits = pixel_count as i64 * mode.bits_per_pixel() as i64;
    let available_bits = total_bits - HEADER_BITS;
    let required_bits = payload_len as u64 * 8;

    // A negative budget never fits; otherwise compare as unsigned.
    let fits = available_bits >= 0 && available_bits as u64 >= required_bits;

    Capacity {
        fits,
        available_bytes: available_bits / 8,
        required_bytes: required_bits / 8,
    }
}

/// [`capacity`] for a concrete carrier.
pub fn capacity_for(img: &PixelBuffer, payload_len: usize, mode: Mode) -> Capacity {
    capacity(img.pixel_count(), payload_len, mode)
}

/// Maximum payload size in bytes (may be negative for tiny carriers).
pub fn max_payload_size(pixel_count: usize, mode: Mode) -> i64 {
    capacity(pixel_count, 0, mode).available_bytes
}
