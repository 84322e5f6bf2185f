// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Steganographic encoding and decoding.
//!
//! The embedded bitstream is an 8-byte [`header`] followed by the payload,
//! bit-packed into pixel LSBs by one of four [`Mode`]s:
//!
//! - **LSB1**: 1 bit per pixel (red LSB).
//! - **LSB3**: 3 bits per pixel (red, green, blue LSBs).
//! - **LSB4**: 4 bits per pixel (two LSBs of red and green).
//! - **LSB8**: 8 bits per pixel (two LSBs of every channel).
//!
//! The header carries the mode, so [`decode`] needs no hint: it probes each
//! mode in [`Mode::ALL`] order until one yields the magic byte. Payloads may
//! be encrypted with AES-256-GCM under a password-derived key.

pub mod capacity;
pub mod crypto;
pub mod error;
pub mod header;
pub mod lsb;
pub mod mode;
pub mod pixels;
mod pipeline;
pub mod similarity;

pub use capacity::{capacity, capacity_for, max_payload_size, Capacity};
pub use error::StegoError;
pub use header::Header;
pub use mode::Mode;
pub use pipeline::{decode, detect_header, encode, header_info, probe, Decoded, EncodeOptions};
pub use pixels::PixelBuffer;
pub use similarity::image_difference;
