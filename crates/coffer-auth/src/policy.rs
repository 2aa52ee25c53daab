//! The access-key policy table: credential string → AccessKeyConfig

use std::collections::HashMap;

use tracing::warn;

use coffer_core::config::AccessKeyConfig;

/// Immutable credential table, built once at startup from the
/// `[[access_keys]]` config entries.
///
/// Lookup is exact string equality via the map; constant-time
/// comparison is an open hardening question, not implemented here.
pub struct AccessPolicy {
    keys: HashMap<String, AccessKeyConfig>,
}

impl AccessPolicy {
    pub fn from_keys(entries: Vec<AccessKeyConfig>) -> Self {
        let mut keys = HashMap::with_capacity(entries.len());
        for entry in entries {
            if keys.insert(entry.key.clone(), entry).is_some() {
                // Last entry wins, matching TOML reading order
                warn!("duplicate access key in policy table");
            }
        }
        Self { keys }
    }

    pub fn lookup(&self, credential: &str) -> Option<&AccessKeyConfig> {
        self.keys.get(credential)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use coffer_core::config::Permissions;

    fn entry(key: &str, put: bool) -> AccessKeyConfig {
        AccessKeyConfig {
            key: key.to_string(),
            permissions: Permissions {
                put,
                get: false,
                delete: false,
            },
            stores: None,
            max_size_mib: None,
        }
    }

    #[test]
    fn test_lookup() {
        let policy = AccessPolicy::from_keys(vec![entry("k1", true), entry("k2", false)]);

        assert_eq!(policy.len(), 2);
        assert!(policy.lookup("k1").unwrap().permissions.put);
        assert!(!policy.lookup("k2").unwrap().permissions.put);
        assert!(policy.lookup("k3").is_none());
    }

    #[test]
    fn test_duplicate_key_last_wins() {
        let policy = AccessPolicy::from_keys(vec![entry("k1", false), entry("k1", true)]);

        assert_eq!(policy.len(), 1);
        assert!(policy.lookup("k1").unwrap().permissions.put);
    }

    #[test]
    fn test_empty_table() {
        let policy = AccessPolicy::from_keys(Vec::new());
        assert!(policy.is_empty());
        assert!(policy.lookup("anything").is_none());
    }
}
