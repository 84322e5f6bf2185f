// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Error types for the steganography engine.
//!
//! [`StegoError`] covers every failure mode from header parsing through
//! bit extraction, encryption and image file I/O.

use core::fmt;

/// Errors that can occur during steganographic encoding or decoding.
#[derive(Debug)]
pub enum StegoError {
    /// No valid header could be located, or fewer than 8 header bytes were given.
    InvalidHeader,
    /// The first header byte is not the format's magic constant.
    InvalidMagic,
    /// The mode tag is not one of the four known embedding modes.
    UnsupportedMode(u8),
    /// The payload does not fit the carrier under the requested mode.
    ///
    /// `available` is signed: carriers smaller than the header itself report
    /// a negative byte count.
    ImageTooSmall {
        /// Whole bytes left for the payload after the header.
        available: i64,
        /// Bytes the payload needs.
        required: u64,
    },
    /// The header's declared payload length is inconsistent with the carrier.
    MessageCorrupted,
    /// Authenticated encryption of the payload failed.
    EncryptionFailed,
    /// Wrong password, missing password, or corrupted ciphertext.
    DecryptionFailed,
    /// The carrier could not be decoded, encoded or built from raw pixels.
    InvalidImage(image::ImageError),
    /// Malformed key material.
    InvalidKey,
}

impl fmt::Display for StegoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidHeader => write!(f, "invalid steganography header"),
            Self::InvalidMagic => write!(f, "invalid magic byte, not a Mosquito steganographic image"),
            Self::UnsupportedMode(tag) => write!(f, "unsupported steganography mode: {tag}"),
            Self::ImageTooSmall { available, required } => write!(
                f,
                "image too small to encode payload (required {required} bytes, available {available} bytes)"
            ),
            Self::MessageCorrupted => write!(f, "message data corrupted or truncated"),
            Self::EncryptionFailed => write!(f, "encryption failed"),
            Self::DecryptionFailed => write!(f, "decryption failed, invalid key or corrupted data"),
            Self::InvalidImage(e) => write!(f, "invalid or unsupported image: {e}"),
            Self::InvalidKey => write!(f, "invalid encryption key"),
        }
    }
}

impl std::error::Error for StegoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidImage(e) => Some(e),
            _ => None,
        }
    }
}

impl From<image::ImageError> for StegoError {
    fn from(e: image::ImageError) -> Self {
        Self::InvalidImage(e)
    }
}
