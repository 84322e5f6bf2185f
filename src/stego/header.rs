// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Self-describing header prefixed to every embedded payload.
//!
//! ```text
//! [1 byte ] magic (0x53)
//! [1 byte ] version
//! [1 byte ] mode tag (0=LSB1, 1=LSB3, 2=LSB4, 3=LSB8)
//! [1 byte ] flags (bit0 encrypted, bit1 compressed, bit2 image)
//! [4 bytes] payload length (big-endian u32)
//! ```
//!
//! The payload (plain or `nonce || ciphertext+tag`) follows immediately in
//! the same bitstream.

use crate::stego::error::StegoError;
use crate::stego::mode::Mode;

/// First byte of every header.
pub const MAGIC_BYTE: u8 = 0x53;

/// Header format version written by this crate.
pub const HEADER_VERSION: u8 = 0x02;

/// Marshalled header size in bytes.
pub const HEADER_LEN: usize = 8;

/// Payload is `nonce || ciphertext+tag`.
pub const FLAG_ENCRYPTED: u8 = 1 << 0;
/// Reserved, never set by the encoder.
pub const FLAG_COMPRESSED: u8 = 1 << 1;
/// Payload is an image file rather than text.
pub const FLAG_IMAGE: u8 = 1 << 2;

/// Decoded header fields.
///
/// `mode` is kept as the raw wire tag: [`unmarshal`] does not validate it,
/// callers resolve it with [`Header::mode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub magic: u8,
    pub version: u8,
    pub mode: u8,
    pub flags: u8,
    /// Bytes following the header (post-encryption when encrypted).
    pub payload_len: u32,
}

impl Header {
    /// A fresh header for the current format version.
    pub fn new(mode: Mode, flags: u8, payload_len: u32) -> Self {
        Self {
            magic: MAGIC_BYTE,
            version: HEADER_VERSION,
            mode: mode.tag(),
            flags,
            payload_len,
        }
    }

    /// Resolve the mode tag.
    ///
    /// # Errors
    /// [`StegoError::UnsupportedMode`] when the tag is not a known mode.
    pub fn mode(&self) -> Result<Mode, StegoError> {
        Mode::from_tag(self.mode)
    }

    pub fn is_encrypted(&self) -> bool {
        self.flags & FLAG_ENCRYPTED != 0
    }

    pub fn is_compressed(&self) -> bool {
        self.flags & FLAG_COMPRESSED != 0
    }

    pub fn is_image(&self) -> bool {
        self.flags & FLAG_IMAGE != 0
    }
}

/// Serialize a header to its 8-byte wire form.
pub fn marshal(header: &Header) -> [u8; HEADER_LEN] {
    let mut out = [0u8; HEADER_LEN];
    out[0] = header.magic;
    out[1] = header.version;
    out[2] = header.mode;
    out[3] = header.flags;
    out[4..].copy_from_slice(&header.payload_len.to_be_bytes());
    out
}

/// Parse a header from the first 8 bytes of `data`.
///
/// Trailing bytes are ignored. Mode and flags are taken verbatim.
///
/// # Errors
/// - [`StegoError::InvalidHeader`] if `data` is shorter than [`HEADER_LEN`].
/// - [`StegoError::InvalidMagic`] if the first byte is not [`MAGIC_BYTE`].
pub fn unmarshal(data: &[u8]) -> Result<Header, StegoError> {
    if data.len() < HEADER_LEN {
        return Err(StegoError::InvalidHeader);
    }
    if data[0] != MAGIC_BYTE {
        return Err(StegoError::InvalidMagic);
    }
    Ok(Header {
        magic: data[0],
        version: data[1],
        mode: data[2],
        flags: data[3],
        payload_len: u32::from_be_bytes([data[4], data[5], data[6], data[7]]),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marshal_layout() {
        let h = Header::new(Mode::Lsb4, FLAG_ENCRYPTED | FLAG_IMAGE, 0x0102_0304);
        assert_eq!(marshal(&h), [0x53, 0x02, 0x02, 0x05, 0x01, 0x02, 0x03, 0x04]);
    }

    #[test]
    fn marshal_unmarshal_roundtrip() {
        let h = Header::new(Mode::Lsb8, FLAG_IMAGE, 1242);
        let parsed = unmarshal(&marshal(&h)).unwrap();
        assert_eq!(parsed, h);
        assert_eq!(parsed.mode().unwrap(), Mode::Lsb8);
    }

    #[test]
    fn short_input_is_invalid_header() {
        assert!(matches!(unmarshal(&[]), Err(StegoError::InvalidHeader)));
        assert!(matches!(unmarshal(&[MAGIC_BYTE; 7]), Err(StegoError::InvalidHeader)));
    }

    #[test]
    fn wrong_magic_rejected() {
        let mut bytes = marshal(&Header::new(Mode::Lsb1, 0, 3));
        bytes[0] = 0x54;
        assert!(matches!(unmarshal(&bytes), Err(StegoError::InvalidMagic)));
    }

    #[test]
    fn unknown_mode_passes_through_unmarshal() {
        let bytes = [MAGIC_BYTE, HEADER_VERSION, 9, 0, 0, 0, 0, 1];
        let h = unmarshal(&bytes).unwrap();
        assert_eq!(h.mode, 9);
        assert!(matches!(h.mode(), Err(StegoError::UnsupportedMode(9))));
    }

    #[test]
    fn flag_predicates() {
        let h = Header::new(Mode::Lsb1, FLAG_COMPRESSED, 0);
        assert!(h.is_compressed());
        assert!(!h.is_encrypted());
        assert!(!h.is_image());

        let h = Header::new(Mode::Lsb1, FLAG_ENCRYPTED | FLAG_IMAGE, 0);
        assert!(h.is_encrypted());
        assert!(h.is_image());
        assert!(!h.is_compressed());
    }

    #[test]
    fn trailing_bytes_ignored() {
        let mut bytes = marshal(&Header::new(Mode::Lsb3, 0, 77)).to_vec();
        bytes.extend_from_slice(&[0xAA, 0xBB]);
        assert_eq!(unmarshal(&bytes).unwrap().payload_len, 77);
    }
}
