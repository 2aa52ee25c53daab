use secrecy::SecretString;
use serde::Deserialize;
use std::path::PathBuf;

/// Top-level daemon configuration (loaded from coffer.toml)
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CofferConfig {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub crypto: CryptoConfig,
    /// Access-key policy table, one `[[access_keys]]` block per credential
    pub access_keys: Vec<AccessKeyConfig>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// TCP listen address (default: 127.0.0.1:4000)
    pub listen: String,
    /// Log level (default: info)
    pub log_level: String,
    /// Log format: "json" or "text"
    pub log_format: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Data root directory; one subdirectory per store
    pub data_dir: PathBuf,
}

/// Encryption configuration. The secret is required at startup; it is
/// optional here only so a config file can omit it in favor of the
/// COFFER_SECRET environment variable.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CryptoConfig {
    /// Operator secret the 256-bit storage key is derived from
    pub secret: Option<SecretString>,
}

/// One credential entry in the policy table.
#[derive(Debug, Clone, Deserialize)]
pub struct AccessKeyConfig {
    /// The credential string presented in the x-access-key header
    pub key: String,
    /// Actions this credential may perform (all default to false)
    #[serde(default)]
    pub permissions: Permissions,
    /// Store allowlist; absent means every store is allowed
    #[serde(default)]
    pub stores: Option<Vec<String>>,
    /// Upper bound on put payload size, in MiB; absent means unlimited
    #[serde(default)]
    pub max_size_mib: Option<u64>,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(default)]
pub struct Permissions {
    pub put: bool,
    pub get: bool,
    pub delete: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: "127.0.0.1:4000".into(),
            log_level: "info".into(),
            log_format: "text".into(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./coffer-data"),
        }
    }
}
