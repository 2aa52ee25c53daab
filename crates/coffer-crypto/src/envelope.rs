//! Per-object AES-256-GCM sealing/opening
//!
//! Frame format (binary):
//! ```text
//! [12 bytes: random nonce][16 bytes: GCM tag][N bytes: ciphertext]
//! ```
//!
//! `open` either returns the complete authenticated plaintext or fails
//! with `AuthenticationFailed`; no partial output is ever produced.

use aes_gcm::{
    aead::{Aead, KeyInit},
    Aes256Gcm, Nonce,
};
use rand::RngCore;

use coffer_core::{CofferError, CofferResult};

use crate::kdf::MasterKey;
use crate::{FRAME_OVERHEAD, NONCE_SIZE, TAG_SIZE};

/// Encrypt a plaintext buffer into a self-describing frame.
///
/// Generates a fresh random 96-bit nonce per call, so two seals of the
/// same plaintext produce different frames.
///
/// Returns: `[12-byte nonce][16-byte tag][ciphertext]`
/// (output length = input length + 28)
pub fn seal(key: &MasterKey, plaintext: &[u8]) -> CofferResult<Vec<u8>> {
    let cipher = Aes256Gcm::new(key.as_bytes().into());

    let mut nonce_bytes = [0u8; NONCE_SIZE];
    rand::thread_rng().fill_bytes(&mut nonce_bytes);
    let nonce = Nonce::from_slice(&nonce_bytes);

    // aes-gcm appends the tag to the ciphertext; the frame wants it up
    // front, after the nonce
    let sealed = cipher
        .encrypt(nonce, plaintext)
        .map_err(|_| CofferError::Other(anyhow::anyhow!("AES-GCM encryption failed")))?;
    let (ciphertext, tag) = sealed.split_at(sealed.len() - TAG_SIZE);

    let mut frame = Vec::with_capacity(FRAME_OVERHEAD + ciphertext.len());
    frame.extend_from_slice(&nonce_bytes);
    frame.extend_from_slice(tag);
    frame.extend_from_slice(ciphertext);
    Ok(frame)
}

/// Decrypt and authenticate a frame produced by [`seal`].
///
/// Fails with `AuthenticationFailed` when the frame is shorter than the
/// 28-byte prefix, when any byte of nonce/tag/ciphertext was altered,
/// or when `key` differs from the sealing key.
pub fn open(key: &MasterKey, frame: &[u8]) -> CofferResult<Vec<u8>> {
    if frame.len() < FRAME_OVERHEAD {
        return Err(CofferError::AuthenticationFailed);
    }

    let (nonce_bytes, rest) = frame.split_at(NONCE_SIZE);
    let (tag, ciphertext) = rest.split_at(TAG_SIZE);
    let nonce = Nonce::from_slice(nonce_bytes);
    let cipher = Aes256Gcm::new(key.as_bytes().into());

    let mut sealed = Vec::with_capacity(ciphertext.len() + TAG_SIZE);
    sealed.extend_from_slice(ciphertext);
    sealed.extend_from_slice(tag);

    cipher
        .decrypt(nonce, sealed.as_slice())
        .map_err(|_| CofferError::AuthenticationFailed)
}
