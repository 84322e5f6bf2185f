// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Encode/decode pipeline.
//!
//! Encode: capacity check, optional encryption, header prepend, bit-pack into
//! a copy of the carrier. Decode: probe every mode for a header, extract the
//! declared payload using the header's own mode, optionally decrypt.

use log::{debug, trace, warn};

use crate::stego::capacity;
use crate::stego::crypto;
use crate::stego::error::StegoError;
use crate::stego::header::{self, Header, FLAG_ENCRYPTED, FLAG_IMAGE, HEADER_LEN, MAGIC_BYTE};
use crate::stego::lsb;
use crate::stego::mode::Mode;
use crate::stego::pixels::PixelBuffer;

/// Per-call encode settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodeOptions {
    /// Embedding mode.
    pub mode: Mode,
    /// Encrypt the payload when non-empty.
    pub password: String,
    /// Mark the payload as an image file.
    pub is_image: bool,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self { mode: Mode::Lsb1, password: String::new(), is_image: false }
    }
}

impl EncodeOptions {
    pub fn new(mode: Mode) -> Self {
        Self { mode, ..Self::default() }
    }

    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = password.into();
        self
    }

    pub fn with_image_flag(mut self, is_image: bool) -> Self {
        self.is_image = is_image;
        self
    }
}

/// A recovered payload together with the header that described it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    pub header: Header,
    /// Plaintext payload (decrypted when the header says so).
    pub payload: Vec<u8>,
}

impl Decoded {
    /// Whether the payload should be treated as an image file.
    pub fn is_image(&self) -> bool {
        self.header.is_image()
    }
}

/// Hide `payload` in a copy of `img`.
///
/// The capacity check uses the plaintext length; encryption then adds
/// [`crypto::ENCRYPTION_OVERHEAD`] bytes, which are checked again before any
/// pixel is written. The input buffer is never modified.
///
/// # Errors
/// - [`StegoError::ImageTooSmall`] if the (possibly encrypted) payload does not fit.
/// - [`StegoError::EncryptionFailed`] if encryption fails.
/// - [`StegoError::MessageCorrupted`] if the payload length exceeds `u32::MAX`.
pub fn encode(
    img: &PixelBuffer,
    payload: &[u8],
    opts: &EncodeOptions,
) -> Result<PixelBuffer, StegoError> {
    let mode = opts.mode;

    let cap = capacity::capacity_for(img, payload.len(), mode);
    if !cap.fits {
        warn!(
            "payload of {} bytes does not fit ({} available, {mode})",
            cap.required_bytes, cap.available_bytes
        );
        return Err(StegoError::ImageTooSmall {
            available: cap.available_bytes,
            required: cap.required_bytes,
        });
    }

    let mut flags = 0u8;
    if opts.is_image {
        flags |= FLAG_IMAGE;
    }

    let body = if opts.password.is_empty() {
        payload.to_vec()
    } else {
        flags |= FLAG_ENCRYPTED;
        crypto::encrypt(payload, &opts.password)?
    };

    // Encryption overhead can push a borderline payload over the limit.
    let cap = capacity::capacity_for(img, body.len(), mode);
    if !cap.fits {
        warn!("encrypted payload of {} bytes does not fit ({} available)", body.len(), cap.available_bytes);
        return Err(StegoError::ImageTooSmall {
            available: cap.available_bytes,
            required: cap.required_bytes,
        });
    }

    let payload_len = u32::try_from(body.len()).map_err(|_| StegoError::MessageCorrupted)?;
    let hdr = Header::new(mode, flags, payload_len);

    let mut stream = Vec::with_capacity(HEADER_LEN + body.len());
    stream.extend_from_slice(&header::marshal(&hdr));
    stream.extend_from_slice(&body);

    let mut out = img.clone();
    let written = lsb::embed(mode, &mut out, &stream);
    debug!(
        "embedded {} bytes ({} payload, flags {:#04x}) using {mode}",
        stream.len(),
        body.len(),
        flags
    );
    debug_assert_eq!(written, stream.len() * 8);

    Ok(out)
}

/// Locate the header by trying each mode in [`Mode::ALL`] order.
///
/// Returns the header together with the mode it was found under.
pub fn detect_header(img: &PixelBuffer) -> Option<(Header, Mode)> {
    Mode::ALL.into_iter().find_map(|mode| {
        let bytes = lsb::extract(mode, img, HEADER_LEN, 0);
        if bytes[0] != MAGIC_BYTE {
            trace!("no magic byte under {mode}");
            return None;
        }
        match header::unmarshal(&bytes) {
            Ok(h) => {
                trace!("header found under {mode}: {h:?}");
                Some((h, mode))
            }
            Err(_) => None,
        }
    })
}

/// True if any mode yields a header with a valid magic byte.
pub fn probe(img: &PixelBuffer) -> bool {
    detect_header(img).is_some()
}

/// Read the header without extracting or decrypting the payload.
///
/// # Errors
/// [`StegoError::InvalidHeader`] if no mode yields a valid header.
pub fn header_info(img: &PixelBuffer) -> Result<Header, StegoError> {
    detect_header(img).map(|(h, _)| h).ok_or(StegoError::InvalidHeader)
}

/// Recover the payload hidden in `img`.
///
/// Pass an empty `password` for unencrypted payloads.
///
/// # Errors
/// - [`StegoError::InvalidHeader`] if no header is found.
/// - [`StegoError::UnsupportedMode`] if the header names an unknown mode.
/// - [`StegoError::MessageCorrupted`] if the declared length exceeds what the
///   carrier can hold under that mode.
/// - [`StegoError::DecryptionFailed`] if the payload is encrypted and the
///   password is empty, wrong, or the data is corrupted.
pub fn decode(img: &PixelBuffer, password: &str) -> Result<Decoded, StegoError> {
    let (hdr, detected) = detect_header(img).ok_or(StegoError::InvalidHeader)?;

    // The header's own mode drives extraction, not the probing mode.
    let mode = hdr.mode()?;
    if mode != detected {
        debug!("header detected under {detected} but declares {mode}");
    }

    let max = capacity::max_payload_size(img.pixel_count(), mode);
    if i64::from(hdr.payload_len) > max {
        warn!("header declares {} payload bytes, carrier holds {max}", hdr.payload_len);
        return Err(StegoError::MessageCorrupted);
    }

    let data = lsb::extract(mode, img, hdr.payload_len as usize, HEADER_LEN);
    debug!("extracted {} payload bytes using {mode}", data.len());

    let payload = if hdr.is_encrypted() {
        if password.is_empty() {
            warn!("payload is encrypted but no password was given");
            return Err(StegoError::DecryptionFailed);
        }
        crypto::decrypt(&data, password).inspect_err(|_| warn!("payload decryption failed"))?
    } else {
        data
    };

    Ok(Decoded { header: hdr, payload })
}
