// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Password-based payload encryption.
//!
//! The AES-256-GCM key is the SHA-256 digest of the UTF-8 password, so the
//! same password always yields the same key and no salt needs to be embedded.
//! Every encryption draws a fresh random 96-bit nonce. Blobs are
//! interchangeable with the Go `mosquito` tool.
//!
//! Encrypted blob layout:
//!
//! ```text
//! [12 bytes] nonce
//! [N bytes ] ciphertext (plaintext_len + 16 bytes for auth tag)
//! ```

use aes_gcm::aead::Aead;
use aes_gcm::{Aes256Gcm, KeyInit, Nonce};
use rand::RngCore;
use sha2::{Digest, Sha256};
use zeroize::Zeroizing;

use crate::stego::error::StegoError;

/// AES-GCM nonce length in bytes.
pub const NONCE_LEN: usize = 12;
/// AES-256 key length in bytes.
pub const KEY_LEN: usize = 32;
/// Authentication tag length in bytes.
pub const TAG_LEN: usize = 16;

/// Blob size added on top of the plaintext by [`encrypt`].
pub const ENCRYPTION_OVERHEAD: usize = NONCE_LEN + TAG_LEN;

/// Derive the 256-bit encryption key from a password.
pub fn derive_key(password: &str) -> Zeroizing<[u8; KEY_LEN]> {
    let mut key = Zeroizing::new([0u8; KEY_LEN]);
    key.copy_from_slice(&Sha256::digest(password.as_bytes()));
    key
}

fn cipher_for(password: &str) -> Result<Aes256Gcm, StegoError> {
    let key = derive_key(password);
    Aes256Gcm::new_from_slice(&*key).map_err(|_| StegoError::InvalidKey)
}

/// Encrypt `plaintext` under `password`, returning `nonce || ciphertext+tag`.
///
/// # Errors
/// [`StegoError::EncryptionFailed`] if the cipher rejects the input.
pub fn encrypt(plaintext: &[u8], password: &str) -> Result<Vec<u8>, StegoError> {
    let cipher = cipher_for(password)?;

    let mut nonce_bytes = [0u8; NONCE_LEN];
    rand::thread_rng().fill_bytes(&mut nonce_bytes);
    let nonce = Nonce::from_slice(&nonce_bytes);

    let sealed = cipher
        .encrypt(nonce, plaintext)
        .map_err(|_| StegoError::EncryptionFailed)?;

    let mut blob = Vec::with_capacity(NONCE_LEN + sealed.len());
    blob.extend_from_slice(&nonce_bytes);
    blob.extend_from_slice(&sealed);
    Ok(blob)
}

/// Decrypt a blob produced by [`encrypt`].
///
/// Returns [`StegoError::DecryptionFailed`] if the blob is shorter than a
/// nonce or fails authentication. Wrong passwords and corrupted data are
/// indistinguishable.
pub fn decrypt(blob: &[u8], password: &str) -> Result<Vec<u8>, StegoError> {
    if blob.len() < NONCE_LEN {
        return Err(StegoError::DecryptionFailed);
    }
    let (nonce_bytes, ciphertext) = blob.split_at(NONCE_LEN);
    let cipher = cipher_for(password)?;

    cipher
        .decrypt(Nonce::from_slice(nonce_bytes), ciphertext)
        .map_err(|_| StegoError::DecryptionFailed)
}
