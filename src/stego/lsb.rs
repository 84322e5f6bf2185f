// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! LSB bit-packing over a pixel buffer.
//!
//! Both directions walk the same deterministic slot sequence: pixels in
//! row-major order starting at the origin, and within each pixel the mode's
//! slot table (see [`Mode::slots`]). Data bits are consumed MSB first.
//!
//! Embedding stops after the last data bit; the rest of the carrier is left
//! untouched. Extraction reads exactly the requested number of bytes. Slots
//! past the end of the carrier read as zero, so callers must bound `length`
//! with a validated header.

use crate::stego::mode::Mode;
use crate::stego::pixels::{PixelBuffer, CHANNELS};

/// Byte offsets and bit positions for every slot in the carrier, in order.
fn slot_sequence(mode: Mode, pixel_count: usize) -> impl Iterator<Item = (usize, u8)> {
    let slots = mode.slots();
    (0..pixel_count).flat_map(move |px| {
        slots.iter().map(move |s| (px * CHANNELS + s.channel, s.bit))
    })
}

/// Data bits, MSB first within each byte.
fn data_bits(data: &[u8]) -> impl Iterator<Item = u8> + '_ {
    data.iter().flat_map(|&byte| (0..8).rev().map(move |pos| (byte >> pos) & 1))
}

/// Embed `data` into `img` starting at pixel 0.
///
/// Returns the number of bits written, which is less than `data.len() * 8`
/// only when the carrier runs out of slots.
pub fn embed(mode: Mode, img: &mut PixelBuffer, data: &[u8]) -> usize {
    let pixel_count = img.pixel_count();
    let raw = img.as_raw_mut();
    let mut written = 0usize;
    for ((offset, pos), bit) in slot_sequence(mode, pixel_count).zip(data_bits(data)) {
        let b = &mut raw[offset];
        *b = (*b & !(1u8 << pos)) | (bit << pos);
        written += 1;
    }
    written
}

/// Extract `length` bytes after skipping the first `skip_bytes` bytes of the
/// embedded bitstream.
pub fn extract(mode: Mode, img: &PixelBuffer, length: usize, skip_bytes: usize) -> Vec<u8> {
    let raw = img.as_raw();
    let mut out = vec![0u8; length];
    let bits = slot_sequence(mode, img.pixel_count())
        .skip(skip_bytes * 8)
        .take(length * 8);
    for (i, (offset, pos)) in bits.enumerate() {
        let bit = (raw[offset] >> pos) & 1;
        out[i / 8] |= bit << (7 - i % 8);
    }
    out
}
