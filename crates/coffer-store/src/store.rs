//! The storage engine: put/get/delete over sealed frames on disk
//!
//! Every get re-reads and re-opens the on-disk frame; there is no
//! cache and no per-object lock. Concurrent writers to the same
//! (store, object_id) race at the filesystem level (last writer wins).

use std::path::PathBuf;

use tracing::{debug, warn};

use coffer_core::{CofferError, CofferResult};
use coffer_crypto::{envelope, MasterKey};

use crate::path;

/// Result of a successful put.
#[derive(Debug, Clone)]
pub struct PutOutcome {
    pub object_id: String,
    /// Plaintext size in bytes, not the on-disk frame size
    pub size: u64,
}

/// Encrypted object store rooted at a data directory.
///
/// Holds the storage key for the process lifetime; the key never
/// touches persistent storage.
pub struct ObjectStore {
    root: PathBuf,
    key: MasterKey,
}

impl ObjectStore {
    /// Open a store at `root`, creating the data directory if missing.
    pub async fn open(root: impl Into<PathBuf>, key: MasterKey) -> CofferResult<Self> {
        let root = root.into();
        tokio::fs::create_dir_all(&root).await?;
        Ok(Self { root, key })
    }

    /// Seal `plaintext` and write it to `{root}/{store}/{object_id}`,
    /// replacing any existing object (last writer wins, no versioning).
    ///
    /// The returned size is the plaintext size; callers reason about
    /// logical object size, never the encrypted size.
    pub async fn put(
        &self,
        store: &str,
        object_id: &str,
        plaintext: &[u8],
    ) -> CofferResult<PutOutcome> {
        let file_path = path::resolve(&self.root, store, object_id)?;
        path::ensure_store_dir(&self.root, store).await?;

        let frame = envelope::seal(&self.key, plaintext)?;
        tokio::fs::write(&file_path, &frame).await?;

        debug!(store, object_id, size = plaintext.len(), "object stored");
        Ok(PutOutcome {
            object_id: object_id.to_string(),
            size: plaintext.len() as u64,
        })
    }

    /// Read and open the object's frame.
    ///
    /// `ObjectNotFound` when no file exists at the resolved path;
    /// `AuthenticationFailed` when the frame exists but fails to open
    /// (wrong key, corruption, truncation). The two stay distinct so
    /// callers can log tampering separately from a plain miss.
    pub async fn get(&self, store: &str, object_id: &str) -> CofferResult<Vec<u8>> {
        let file_path = path::resolve(&self.root, store, object_id)?;

        let frame = match tokio::fs::read(&file_path).await {
            Ok(frame) => frame,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(CofferError::ObjectNotFound);
            }
            Err(e) => return Err(e.into()),
        };

        match envelope::open(&self.key, &frame) {
            Ok(plaintext) => Ok(plaintext),
            Err(e) => {
                warn!(store, object_id, "stored frame failed authentication");
                Err(e)
            }
        }
    }

    /// Remove the object if present. Deleting a missing object is not
    /// an error (idempotent).
    pub async fn delete(&self, store: &str, object_id: &str) -> CofferResult<()> {
        let file_path = path::resolve(&self.root, store, object_id)?;

        match tokio::fs::remove_file(&file_path).await {
            Ok(()) => {
                debug!(store, object_id, "object deleted");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
