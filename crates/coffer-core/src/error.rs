use thiserror::Error;

pub type CofferResult<T> = Result<T, CofferError>;

/// Error taxonomy shared across the workspace.
///
/// The first eight variants are deterministic, caller-recoverable
/// conditions that the HTTP boundary maps to specific status codes.
/// `Io` and `Other` cover unexpected failures and map to 500.
#[derive(Debug, Error)]
pub enum CofferError {
    #[error("invalid identifier: {0:?}")]
    InvalidIdentifier(String),

    #[error("object not found")]
    ObjectNotFound,

    #[error("authentication failed: frame rejected")]
    AuthenticationFailed,

    #[error("missing credential")]
    MissingCredential,

    #[error("invalid credential")]
    InvalidCredential,

    #[error("action not permitted for this credential")]
    Forbidden,

    #[error("store {0:?} not in credential allowlist")]
    StoreNotAllowed(String),

    #[error("payload of {size} bytes exceeds quota of {limit} bytes")]
    PayloadTooLarge { size: u64, limit: u64 },

    #[error("config error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CofferError {
    /// Whether this is an authorization denial (the 401/403 family).
    pub fn is_denial(&self) -> bool {
        matches!(
            self,
            CofferError::MissingCredential
                | CofferError::InvalidCredential
                | CofferError::Forbidden
                | CofferError::StoreNotAllowed(_)
                | CofferError::PayloadTooLarge { .. }
        )
    }
}
