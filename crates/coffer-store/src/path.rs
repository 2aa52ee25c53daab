//! Object addressing: (store, object_id) → filesystem path
//!
//! Object ids are generated server-side, but both components are still
//! validated here so a crafted store name or id can never resolve
//! outside the data root.

use std::path::{Path, PathBuf};

use coffer_core::{CofferError, CofferResult};

/// Resolve `(store, object_id)` to a path under `root`.
///
/// Pure, no I/O. Fails with `InvalidIdentifier` when either component
/// is empty, contains a path separator, or contains a `..` sequence.
pub fn resolve(root: &Path, store: &str, object_id: &str) -> CofferResult<PathBuf> {
    validate_component(store)?;
    validate_component(object_id)?;
    Ok(root.join(store).join(object_id))
}

/// Create the store directory (and parents) if missing. Idempotent.
pub async fn ensure_store_dir(root: &Path, store: &str) -> CofferResult<()> {
    validate_component(store)?;
    tokio::fs::create_dir_all(root.join(store)).await?;
    Ok(())
}

fn validate_component(component: &str) -> CofferResult<()> {
    if component.is_empty()
        || component.contains('/')
        || component.contains('\\')
        || component.contains("..")
    {
        return Err(CofferError::InvalidIdentifier(component.to_string()));
    }
    Ok(())
}
