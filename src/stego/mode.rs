// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Embedding modes.
//!
//! Each mode is a fixed pattern of bit slots visited once per pixel. A slot
//! names a channel (0=R, 1=G, 2=B, 3=A) and a bit position within that
//! channel's byte. Slots are visited in table order, so for two-bit channels
//! the first data bit lands in channel bit 0 and the second in channel bit 1.
//!
//! | Mode | Bits/pixel | Slots                              |
//! |------|-----------:|------------------------------------|
//! | LSB1 | 1          | R0                                 |
//! | LSB3 | 3          | R0 G0 B0                           |
//! | LSB4 | 4          | R0 R1 G0 G1                        |
//! | LSB8 | 8          | R0 R1 G0 G1 B0 B1 A0 A1            |

use core::fmt;

use crate::stego::error::StegoError;

/// A single embedding position inside a pixel: `(channel, bit)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitSlot {
    /// Channel offset within the RGBA pixel.
    pub channel: usize,
    /// Bit position within the channel byte (0 = least significant).
    pub bit: u8,
}

const fn slot(channel: usize, bit: u8) -> BitSlot {
    BitSlot { channel, bit }
}

const LSB1_SLOTS: [BitSlot; 1] = [slot(0, 0)];
const LSB3_SLOTS: [BitSlot; 3] = [slot(0, 0), slot(1, 0), slot(2, 0)];
const LSB4_SLOTS: [BitSlot; 4] = [slot(0, 0), slot(0, 1), slot(1, 0), slot(1, 1)];
const LSB8_SLOTS: [BitSlot; 8] = [
    slot(0, 0),
    slot(0, 1),
    slot(1, 0),
    slot(1, 1),
    slot(2, 0),
    slot(2, 1),
    slot(3, 0),
    slot(3, 1),
];

/// LSB embedding strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Least significant bit of the red channel.
    Lsb1,
    /// Least significant bit of red, green and blue.
    Lsb3,
    /// Two least significant bits of red and green.
    Lsb4,
    /// Two least significant bits of every channel including alpha.
    Lsb8,
}

impl Mode {
    /// All modes, in header detection order.
    ///
    /// Detection stops at the first mode that yields a valid header, so an
    /// earlier mode wins if a later mode's image also happens to decode a
    /// magic byte under it.
    pub const ALL: [Mode; 4] = [Mode::Lsb1, Mode::Lsb3, Mode::Lsb4, Mode::Lsb8];

    /// Wire tag stored in the header's mode byte.
    pub const fn tag(self) -> u8 {
        match self {
            Mode::Lsb1 => 0,
            Mode::Lsb3 => 1,
            Mode::Lsb4 => 2,
            Mode::Lsb8 => 3,
        }
    }

    /// Parse a header mode byte.
    ///
    /// # Errors
    /// [`StegoError::UnsupportedMode`] for any tag outside `0..=3`.
    pub fn from_tag(tag: u8) -> Result<Self, StegoError> {
        match tag {
            0 => Ok(Mode::Lsb1),
            1 => Ok(Mode::Lsb3),
            2 => Ok(Mode::Lsb4),
            3 => Ok(Mode::Lsb8),
            other => Err(StegoError::UnsupportedMode(other)),
        }
    }

    /// Bit slots visited in each pixel, in order.
    pub const fn slots(self) -> &'static [BitSlot] {
        match self {
            Mode::Lsb1 => &LSB1_SLOTS,
            Mode::Lsb3 => &LSB3_SLOTS,
            Mode::Lsb4 => &LSB4_SLOTS,
            Mode::Lsb8 => &LSB8_SLOTS,
        }
    }

    /// Payload bits carried by one pixel.
    pub const fn bits_per_pixel(self) -> usize {
        self.slots().len()
    }

    /// Mode suggested for a carrier of `pixel_count` pixels.
    ///
    /// Below 1000 pixels only LSB-8 leaves useful room, below 10000 LSB-3
    /// balances room and distortion, larger images can afford LSB-1.
    pub const fn recommended(pixel_count: usize) -> Mode {
        if pixel_count < 1_000 {
            Mode::Lsb8
        } else if pixel_count < 10_000 {
            Mode::Lsb3
        } else {
            Mode::Lsb1
        }
    }

    /// Human-readable description.
    pub const fn name(self) -> &'static str {
        match self {
            Mode::Lsb1 => "LSB-1 (R channel only)",
            Mode::Lsb3 => "LSB-3 (RGB channels)",
            Mode::Lsb4 => "LSB-4 (2-bits in R & G)",
            Mode::Lsb8 => "LSB-8 (all channels, 2-bits each)",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bits_per_pixel_matches_table() {
        assert_eq!(Mode::Lsb1.bits_per_pixel(), 1);
        assert_eq!(Mode::Lsb3.bits_per_pixel(), 3);
        assert_eq!(Mode::Lsb4.bits_per_pixel(), 4);
        assert_eq!(Mode::Lsb8.bits_per_pixel(), 8);
    }

    #[test]
    fn tags_roundtrip() {
        for mode in Mode::ALL {
            assert_eq!(Mode::from_tag(mode.tag()).unwrap(), mode);
        }
    }

    #[test]
    fn unknown_tag_rejected() {
        assert!(matches!(Mode::from_tag(4), Err(StegoError::UnsupportedMode(4))));
        assert!(matches!(Mode::from_tag(0xFF), Err(StegoError::UnsupportedMode(0xFF))));
    }

    #[test]
    fn detection_order_is_fixed() {
        assert_eq!(Mode::ALL, [Mode::Lsb1, Mode::Lsb3, Mode::Lsb4, Mode::Lsb8]);
    }

    #[test]
    fn two_bit_channels_fill_bit_zero_first() {
        let slots = Mode::Lsb4.slots();
        assert_eq!(slots[0], BitSlot { channel: 0, bit: 0 });
        assert_eq!(slots[1], BitSlot { channel: 0, bit: 1 });
        assert_eq!(slots[2], BitSlot { channel: 1, bit: 0 });
    }

    #[test]
    fn recommendation_follows_image_size() {
        assert_eq!(Mode::recommended(0), Mode::Lsb8);
        assert_eq!(Mode::recommended(999), Mode::Lsb8);
        assert_eq!(Mode::recommended(1_000), Mode::Lsb3);
        assert_eq!(Mode::recommended(9_999), Mode::Lsb3);
        assert_eq!(Mode::recommended(10_000), Mode::Lsb1);
        assert_eq!(Mode::recommended(1920 * 1080), Mode::Lsb1);
    }

    #[test]
    fn lsb8_touches_alpha_last() {
        let last = Mode::Lsb8.slots().last().copied().unwrap();
        assert_eq!(last, BitSlot { channel: 3, bit: 1 });
    }
}
