use serde::{Deserialize, Serialize};

/// Actions a credential can be granted on a store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Put,
    Get,
    Delete,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Put => "put",
            Action::Get => "get",
            Action::Delete => "delete",
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Wire response for a successful put, shared by server and client.
///
/// `size` is the plaintext size, not the on-disk encrypted size.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PutResponse {
    pub store: String,
    #[serde(rename = "objectId")]
    pub object_id: String,
    pub size: u64,
}

/// Wire response for a successful delete.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub success: bool,
}

/// Wire shape of an error body: `{"error": "CODE"}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
