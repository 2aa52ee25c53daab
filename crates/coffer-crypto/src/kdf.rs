//! Key derivation: operator secret → 256-bit storage key
//!
//! Unlike a password KDF there is no salt and no cost parameter: the
//! same secret must yield the same key across restarts so previously
//! stored frames stay decryptable, and the secret is an operator
//! credential, not an end-user password. A single SHA-256 digest gives
//! the required deterministic, one-way, collision-resistant transform.

use secrecy::{ExposeSecret, SecretString};
use sha2::{Digest, Sha256};
use zeroize::Zeroize;

use crate::KEY_SIZE;

/// The 256-bit storage key, derived once at startup.
///
/// Zeroized on drop to prevent secrets lingering in memory.
#[derive(Clone)]
pub struct MasterKey {
    bytes: [u8; KEY_SIZE],
}

impl MasterKey {
    pub fn from_bytes(bytes: [u8; KEY_SIZE]) -> Self {
        Self { bytes }
    }

    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.bytes
    }
}

impl Drop for MasterKey {
    fn drop(&mut self) {
        self.bytes.zeroize();
    }
}

impl std::fmt::Debug for MasterKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MasterKey")
            .field("bytes", &"[REDACTED]")
            .finish()
    }
}

/// Derive the storage key from the operator secret.
///
/// Pure and infallible: any non-empty secret string is acceptable.
pub fn derive_master_key(secret: &SecretString) -> MasterKey {
    let digest = Sha256::digest(secret.expose_secret().as_bytes());
    let mut bytes = [0u8; KEY_SIZE];
    bytes.copy_from_slice(&digest);
    MasterKey::from_bytes(bytes)
}
