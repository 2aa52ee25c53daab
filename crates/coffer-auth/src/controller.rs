//! Request authorization: (credential, action, store, size) → allow/deny

use tracing::debug;

use coffer_core::config::Permissions;
use coffer_core::types::Action;
use coffer_core::{CofferError, CofferResult};

use crate::policy::AccessPolicy;

const BYTES_PER_MIB: u64 = 1024 * 1024;

/// Evaluates requests against the immutable [`AccessPolicy`].
pub struct AccessController {
    policy: AccessPolicy,
}

impl AccessController {
    pub fn new(policy: AccessPolicy) -> Self {
        Self { policy }
    }

    /// Decide whether `credential` may perform `action` on `store`.
    ///
    /// `payload_size` only participates for puts; pass `None` for get
    /// and delete.
    ///
    /// Checks run in fixed order, each with its own denial reason:
    /// 1. missing credential      → `MissingCredential`
    /// 2. unknown credential      → `InvalidCredential`
    /// 3. action not permitted    → `Forbidden`
    /// 4. store outside allowlist → `StoreNotAllowed`
    /// 5. put over size quota     → `PayloadTooLarge`
    pub fn authorize(
        &self,
        credential: Option<&str>,
        action: Action,
        store: &str,
        payload_size: Option<u64>,
    ) -> CofferResult<()> {
        let credential = credential.ok_or(CofferError::MissingCredential)?;

        let entry = self
            .policy
            .lookup(credential)
            .ok_or(CofferError::InvalidCredential)?;

        if !permits(&entry.permissions, action) {
            return Err(CofferError::Forbidden);
        }

        if let Some(allowed) = &entry.stores {
            if !allowed.iter().any(|s| s == store) {
                return Err(CofferError::StoreNotAllowed(store.to_string()));
            }
        }

        if action == Action::Put {
            if let (Some(quota_mib), Some(size)) = (entry.max_size_mib, payload_size) {
                let limit = quota_mib * BYTES_PER_MIB;
                if size > limit {
                    return Err(CofferError::PayloadTooLarge { size, limit });
                }
            }
        }

        debug!(%action, store, "request authorized");
        Ok(())
    }
}

fn permits(permissions: &Permissions, action: Action) -> bool {
    match action {
        Action::Put => permissions.put,
        Action::Get => permissions.get,
        Action::Delete => permissions.delete,
    }
}
