//! End-to-end tests for the HTTP surface: a real server on an
//! ephemeral port, exercised through coffer-client and raw reqwest.

use std::sync::Arc;

use secrecy::SecretString;
use tempfile::TempDir;

use coffer_auth::{AccessController, AccessPolicy};
use coffer_client::{ClientError, CofferClient};
use coffer_core::config::{AccessKeyConfig, Permissions};
use coffer_core::types::{DeleteResponse, ErrorResponse, PutResponse};
use coffer_crypto::derive_master_key;
use coffer_store::ObjectStore;
use cofferd::server::{router, AppState, ACCESS_KEY_HEADER};

const ALL: Permissions = Permissions {
    put: true,
    get: true,
    delete: true,
};

fn key(
    key: &str,
    permissions: Permissions,
    stores: Option<Vec<&str>>,
    max_size_mib: Option<u64>,
) -> AccessKeyConfig {
    AccessKeyConfig {
        key: key.to_string(),
        permissions,
        stores: stores.map(|s| s.into_iter().map(String::from).collect()),
        max_size_mib,
    }
}

/// Spin up a daemon with the given policy table; returns its base URL.
/// The TempDir must stay alive for the duration of the test.
async fn spawn_server(keys: Vec<AccessKeyConfig>) -> (String, TempDir) {
    let tmp = TempDir::new().unwrap();

    let master_key = derive_master_key(&SecretString::from("test-secret"));
    let store = ObjectStore::open(tmp.path(), master_key).await.unwrap();
    let auth = AccessController::new(AccessPolicy::from_keys(keys));

    let app = router(AppState {
        store: Arc::new(store),
        auth: Arc::new(auth),
    });

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{addr}"), tmp)
}

#[tokio::test]
async fn end_to_end_put_get_delete() {
    let (url, _tmp) = spawn_server(vec![key(
        "k1",
        Permissions {
            put: true,
            get: true,
            delete: false,
        },
        Some(vec!["photos"]),
        None,
    )])
    .await;
    let client = CofferClient::new(&url, "k1");

    let put: PutResponse = client
        .put("photos", b"hello".to_vec(), "greeting.txt")
        .await
        .unwrap();
    assert_eq!(put.store, "photos");
    assert_eq!(put.size, 5, "size must be the plaintext size");
    assert!(!put.object_id.is_empty());

    let bytes = client.get("photos", &put.object_id).await.unwrap();
    assert_eq!(bytes, b"hello");

    // Unknown credential on the same object: 401
    let stranger = CofferClient::new(&url, "not-a-key");
    let err = stranger.get("photos", &put.object_id).await.unwrap_err();
    assert!(matches!(err, ClientError::Status(s) if s.as_u16() == 401));
}

#[tokio::test]
async fn missing_credential_is_401() {
    let (url, _tmp) = spawn_server(vec![key("k1", ALL, None, None)]).await;

    let response = reqwest::get(format!("{url}/get/photos/some-id"))
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 401);

    let body: ErrorResponse = response.json().await.unwrap();
    assert_eq!(body.error, "MISSING_ACCESS_KEY");
}

#[tokio::test]
async fn forbidden_fires_before_store_allowlist() {
    let get_only = Permissions {
        put: false,
        get: true,
        delete: false,
    };
    let (url, _tmp) = spawn_server(vec![key("k1", get_only, Some(vec!["photos"]), None)]).await;
    let client = CofferClient::new(&url, "k1");

    // "videos" is outside the allowlist too, but the missing put
    // permission must decide first
    let err = client
        .put("videos", b"x".to_vec(), "x.bin")
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Status(s) if s.as_u16() == 403));
}

#[tokio::test]
async fn store_allowlist_denial_is_403() {
    let (url, _tmp) = spawn_server(vec![key("k1", ALL, Some(vec!["photos"]), None)]).await;
    let client = CofferClient::new(&url, "k1");

    let err = client.get("videos", "any-id").await.unwrap_err();
    assert!(matches!(err, ClientError::Status(s) if s.as_u16() == 403));
}

#[tokio::test]
async fn quota_boundary_is_exact() {
    let (url, _tmp) = spawn_server(vec![key("k1", ALL, None, Some(1))]).await;
    let client = CofferClient::new(&url, "k1");

    // Exactly 1 MiB: accepted
    let exactly = vec![0u8; 1_048_576];
    let put = client.put("bulk", exactly, "exact.bin").await.unwrap();
    assert_eq!(put.size, 1_048_576);

    // One byte over: 413
    let over = vec![0u8; 1_048_577];
    let err = client.put("bulk", over, "over.bin").await.unwrap_err();
    assert!(matches!(err, ClientError::Status(s) if s.as_u16() == 413));
}

#[tokio::test]
async fn missing_file_field_is_400_no_file() {
    let (url, _tmp) = spawn_server(vec![key("k1", ALL, None, None)]).await;

    // Multipart body without a "file" field
    let form = reqwest::multipart::Form::new().text("note", "not a file");
    let response = reqwest::Client::new()
        .post(format!("{url}/put/photos"))
        .header(ACCESS_KEY_HEADER, "k1")
        .multipart(form)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 400);
    let body: ErrorResponse = response.json().await.unwrap();
    assert_eq!(body.error, "NO_FILE");
}

#[tokio::test]
async fn delete_is_idempotent_over_http() {
    let (url, _tmp) = spawn_server(vec![key("k1", ALL, None, None)]).await;
    let client = CofferClient::new(&url, "k1");

    let put = client.put("docs", b"bytes".to_vec(), "f.bin").await.unwrap();

    client.delete("docs", &put.object_id).await.unwrap();

    let err = client.get("docs", &put.object_id).await.unwrap_err();
    assert!(matches!(err, ClientError::Status(s) if s.as_u16() == 404));

    // Deleting again is still a success
    let response = reqwest::Client::new()
        .delete(format!("{url}/delete/docs/{}", put.object_id))
        .header(ACCESS_KEY_HEADER, "k1")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);
    let body: DeleteResponse = response.json().await.unwrap();
    assert!(body.success);
}

#[tokio::test]
async fn delete_without_permission_is_403() {
    let no_delete = Permissions {
        put: true,
        get: true,
        delete: false,
    };
    let (url, _tmp) = spawn_server(vec![key("k1", no_delete, None, None)]).await;
    let client = CofferClient::new(&url, "k1");

    let put = client.put("docs", b"bytes".to_vec(), "f.bin").await.unwrap();
    let err = client.delete("docs", &put.object_id).await.unwrap_err();
    assert!(matches!(err, ClientError::Status(s) if s.as_u16() == 403));
}

#[tokio::test]
async fn get_missing_object_is_404() {
    let (url, _tmp) = spawn_server(vec![key("k1", ALL, None, None)]).await;
    let client = CofferClient::new(&url, "k1");

    let err = client.get("photos", "never-stored").await.unwrap_err();
    assert!(matches!(err, ClientError::Status(s) if s.as_u16() == 404));
}

#[tokio::test]
async fn corrupted_object_reads_as_404() {
    let (url, tmp) = spawn_server(vec![key("k1", ALL, None, None)]).await;
    let client = CofferClient::new(&url, "k1");

    let put = client.put("docs", b"payload".to_vec(), "f.bin").await.unwrap();

    // Flip a ciphertext byte on disk; the boundary must not reveal
    // tampering, just NOT_FOUND
    let file = tmp.path().join("docs").join(&put.object_id);
    let mut raw = std::fs::read(&file).unwrap();
    raw[30] ^= 0xFF;
    std::fs::write(&file, &raw).unwrap();

    let err = client.get("docs", &put.object_id).await.unwrap_err();
    assert!(matches!(err, ClientError::Status(s) if s.as_u16() == 404));
}

#[tokio::test]
async fn traversal_store_name_is_400() {
    let (url, _tmp) = spawn_server(vec![key("k1", ALL, None, None)]).await;

    let response = reqwest::Client::new()
        .get(format!("{url}/get/a..b/some-id"))
        .header(ACCESS_KEY_HEADER, "k1")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 400);
    let body: ErrorResponse = response.json().await.unwrap();
    assert_eq!(body.error, "INVALID_IDENTIFIER");
}

#[tokio::test]
async fn healthz_is_200() {
    let (url, _tmp) = spawn_server(Vec::new()).await;

    let response = reqwest::get(format!("{url}/healthz")).await.unwrap();
    assert_eq!(response.status().as_u16(), 200);
}

#[tokio::test]
async fn overwrite_keeps_last_write() {
    let (url, tmp) = spawn_server(vec![key("k1", ALL, None, None)]).await;
    let client = CofferClient::new(&url, "k1");

    let put = client.put("docs", b"v1".to_vec(), "f.bin").await.unwrap();

    // Re-seal the same object id through the store layer; the HTTP put
    // always generates fresh ids, overwrite semantics live below it
    let master_key = derive_master_key(&SecretString::from("test-secret"));
    let store = ObjectStore::open(tmp.path(), master_key).await.unwrap();
    store.put("docs", &put.object_id, b"v2").await.unwrap();

    let bytes = client.get("docs", &put.object_id).await.unwrap();
    assert_eq!(bytes, b"v2");
}
