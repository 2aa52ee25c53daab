//! coffer-client: remote HTTP driver for a coffer daemon
//!
//! Thin typed wrapper over the three object routes. The credential is
//! sent in the `x-access-key` header on every request; non-2xx
//! responses surface as [`ClientError::Status`] so callers can branch
//! on the denial family.

use reqwest::StatusCode;
use thiserror::Error;

use coffer_core::types::PutResponse;

/// Request header carrying the caller's credential string.
pub const ACCESS_KEY_HEADER: &str = "x-access-key";

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server returned {0}")]
    Status(StatusCode),
}

pub struct CofferClient {
    base_url: String,
    access_key: String,
    http: reqwest::Client,
}

impl CofferClient {
    pub fn new(url: impl Into<String>, access_key: impl Into<String>) -> Self {
        Self {
            base_url: url.into().trim_end_matches('/').to_string(),
            access_key: access_key.into(),
            http: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Upload `bytes` into `store` as a multipart `file` field.
    ///
    /// The server generates the object id; it comes back in the
    /// response along with the plaintext size.
    pub async fn put(
        &self,
        store: &str,
        bytes: Vec<u8>,
        filename: &str,
    ) -> Result<PutResponse, ClientError> {
        let part = reqwest::multipart::Part::bytes(bytes).file_name(filename.to_string());
        let form = reqwest::multipart::Form::new().part("file", part);

        let response = self
            .http
            .post(format!("{}/put/{store}", self.base_url))
            .header(ACCESS_KEY_HEADER, &self.access_key)
            .multipart(form)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ClientError::Status(response.status()));
        }
        Ok(response.json().await?)
    }

    /// Fetch the decrypted bytes of one object.
    pub async fn get(&self, store: &str, object_id: &str) -> Result<Vec<u8>, ClientError> {
        let response = self
            .http
            .get(format!("{}/get/{store}/{object_id}", self.base_url))
            .header(ACCESS_KEY_HEADER, &self.access_key)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ClientError::Status(response.status()));
        }
        Ok(response.bytes().await?.to_vec())
    }

    /// Delete one object. Succeeds even if the object never existed.
    pub async fn delete(&self, store: &str, object_id: &str) -> Result<(), ClientError> {
        let response = self
            .http
            .delete(format!("{}/delete/{store}/{object_id}", self.base_url))
            .header(ACCESS_KEY_HEADER, &self.access_key)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ClientError::Status(response.status()));
        }
        Ok(())
    }
}
