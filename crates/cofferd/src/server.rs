//! HTTP surface for the object store
//!
//! Routes:
//!   POST   /put/{store}                — multipart upload, object id generated here
//!   GET    /get/{store}/{object_id}    — raw decrypted bytes
//!   DELETE /delete/{store}/{object_id} — idempotent removal
//!   GET    /healthz                    — liveness probe
//!
//! Every object route runs authorization before touching the store.
//! Error bodies are `{"error": CODE}`; a failed frame authentication is
//! reported to the caller as plain NOT_FOUND so tampering detail stays
//! internal (it is logged where it is raised).

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{DefaultBodyLimit, Multipart, Path, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use tracing::{error, info, warn};
use uuid::Uuid;

use coffer_auth::AccessController;
use coffer_core::types::{Action, DeleteResponse, ErrorResponse, PutResponse};
use coffer_core::CofferError;
use coffer_store::ObjectStore;

/// Request header carrying the caller's credential string.
pub const ACCESS_KEY_HEADER: &str = "x-access-key";

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<ObjectStore>,
    pub auth: Arc<AccessController>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/put/{store}", post(put_object))
        .route("/get/{store}/{object_id}", get(get_object))
        .route("/delete/{store}/{object_id}", delete(delete_object))
        .route("/healthz", get(healthz))
        // Per-credential quotas bound upload size; the framework-level
        // cap would otherwise reject authorized large puts
        .layer(DefaultBodyLimit::disable())
        .with_state(state)
}

/// Bind `addr` and serve the router until the process exits.
pub async fn serve(addr: &str, store: ObjectStore, auth: AccessController) -> anyhow::Result<()> {
    let app = router(AppState {
        store: Arc::new(store),
        auth: Arc::new(auth),
    });

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| anyhow::anyhow!("bind {addr}: {e}"))?;

    info!(addr = %addr, "cofferd: listening");

    axum::serve(listener, app)
        .await
        .map_err(|e| anyhow::anyhow!("server: {e}"))
}

// ── Error mapping ─────────────────────────────────────────────────────────────

struct ApiError {
    status: StatusCode,
    code: &'static str,
}

impl ApiError {
    fn no_file() -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            code: "NO_FILE",
        }
    }
}

impl From<CofferError> for ApiError {
    fn from(err: CofferError) -> Self {
        if err.is_denial() {
            warn!(reason = %err, "request denied");
        }
        let (status, code) = match &err {
            CofferError::InvalidIdentifier(_) => (StatusCode::BAD_REQUEST, "INVALID_IDENTIFIER"),
            CofferError::ObjectNotFound => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            // Collapsed with the miss case on purpose; see module docs
            CofferError::AuthenticationFailed => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            CofferError::MissingCredential => (StatusCode::UNAUTHORIZED, "MISSING_ACCESS_KEY"),
            CofferError::InvalidCredential => (StatusCode::UNAUTHORIZED, "INVALID_ACCESS_KEY"),
            CofferError::Forbidden => (StatusCode::FORBIDDEN, "FORBIDDEN"),
            CofferError::StoreNotAllowed(_) => (StatusCode::FORBIDDEN, "STORE_NOT_ALLOWED"),
            CofferError::PayloadTooLarge { .. } => {
                (StatusCode::PAYLOAD_TOO_LARGE, "FILE_TOO_LARGE")
            }
            CofferError::Config(_) | CofferError::Io(_) | CofferError::Other(_) => {
                error!(error = %err, "internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, "UNKNOWN_ERROR")
            }
        };
        Self { status, code }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorResponse {
                error: self.code.to_string(),
            }),
        )
            .into_response()
    }
}

// ── Handlers ──────────────────────────────────────────────────────────────────

fn access_key(headers: &HeaderMap) -> Option<&str> {
    headers.get(ACCESS_KEY_HEADER).and_then(|v| v.to_str().ok())
}

async fn put_object(
    State(state): State<AppState>,
    Path(store): Path<String>,
    headers: HeaderMap,
    multipart: Multipart,
) -> Result<Json<PutResponse>, ApiError> {
    let Some(payload) = read_file_field(multipart).await? else {
        return Err(ApiError::no_file());
    };

    state.auth.authorize(
        access_key(&headers),
        Action::Put,
        &store,
        Some(payload.len() as u64),
    )?;

    let object_id = Uuid::new_v4().to_string();
    let outcome = state.store.put(&store, &object_id, &payload).await?;

    Ok(Json(PutResponse {
        store,
        object_id: outcome.object_id,
        size: outcome.size,
    }))
}

async fn get_object(
    State(state): State<AppState>,
    Path((store, object_id)): Path<(String, String)>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    state
        .auth
        .authorize(access_key(&headers), Action::Get, &store, None)?;

    let plaintext = state.store.get(&store, &object_id).await?;

    Ok((
        [(header::CONTENT_TYPE, "application/octet-stream")],
        Bytes::from(plaintext),
    )
        .into_response())
}

async fn delete_object(
    State(state): State<AppState>,
    Path((store, object_id)): Path<(String, String)>,
    headers: HeaderMap,
) -> Result<Json<DeleteResponse>, ApiError> {
    state
        .auth
        .authorize(access_key(&headers), Action::Delete, &store, None)?;

    state.store.delete(&store, &object_id).await?;

    Ok(Json(DeleteResponse { success: true }))
}

async fn healthz() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

/// Pull the `file` field out of the multipart body. A malformed body is
/// treated the same as a missing file.
async fn read_file_field(mut multipart: Multipart) -> Result<Option<Bytes>, ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| ApiError::no_file())?
    {
        if field.name() == Some("file") {
            let bytes = field.bytes().await.map_err(|_| ApiError::no_file())?;
            return Ok(Some(bytes));
        }
    }
    Ok(None)
}
