//! coffer-crypto: key derivation and per-object authenticated encryption
//!
//! On-disk frame format (binary):
//! ```text
//! [12 bytes: random nonce][16 bytes: GCM tag][N bytes: ciphertext]
//! ```
//!
//! One frame per stored object, AES-256-GCM under a single process-wide
//! key derived once from the operator secret. Nonces are random per
//! seal, so sealing the same plaintext twice yields different frames.

pub mod envelope;
pub mod kdf;

pub use envelope::{open, seal};
pub use kdf::{derive_master_key, MasterKey};

/// Size of the storage key in bytes (256-bit)
pub const KEY_SIZE: usize = 32;

/// Size of an AES-GCM nonce (96-bit)
pub const NONCE_SIZE: usize = 12;

/// Size of a GCM authentication tag
pub const TAG_SIZE: usize = 16;

/// Fixed frame overhead: nonce + tag
pub const FRAME_OVERHEAD: usize = NONCE_SIZE + TAG_SIZE;
