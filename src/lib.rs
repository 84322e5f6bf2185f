// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! # mosquito-core
//!
//! LSB steganography engine for hiding arbitrary byte payloads in the pixel
//! data of RGBA images, optionally encrypted under a password.
//!
//! The `stego` module is pure and synchronous: every call operates on a
//! caller-owned [`PixelBuffer`] and either returns a complete result or an
//! error. The `io` module bridges to image files via the `image` crate.
//!
//! # Quick start
//!
//! ```rust,ignore
//! use mosquito_core::{decode, encode, io, EncodeOptions, Mode};
//!
//! let cover = io::load_image("photo.png").unwrap();
//! let opts = EncodeOptions::new(Mode::Lsb3).with_password("passphrase");
//! let stego = encode(&cover, b"secret message", &opts).unwrap();
//! io::save_image(&stego, "stego.png").unwrap();
//!
//! let decoded = decode(&stego, "passphrase").unwrap();
//! assert_eq!(decoded.payload, b"secret message");
//! ```

pub mod io;
pub mod stego;

pub use stego::{capacity, capacity_for, max_payload_size, Capacity};
pub use stego::{decode, encode, header_info, probe, Decoded, EncodeOptions};
pub use stego::{image_difference, Header, Mode, PixelBuffer, StegoError};
