//! # mnemon-server
//!
//! HTTP API for the Mnemon memory service:
//!
//! - identity/status reads, command execution, note appends, memory listing
//! - secret-gated clear and manual backup
//!
//! Handlers own no state of their own; everything lives in an explicitly
//! constructed [`AppState`] passed through axum's `State` extractor.

pub mod auth;

use axum::{
    Router,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{delete, get, post},
};
use chrono::Utc;
use mnemon_backup::{BackupClient, BackupScheduler};
use mnemon_core::{BackupReport, MnemonError, Persona};
use mnemon_memory::MemoryStore;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

pub use auth::{AccessGate, SECRET_HEADER};

/// Shared server state.
pub struct AppState {
    pub persona: Persona,
    pub store: Arc<MemoryStore>,
    pub gate: AccessGate,
    /// Present only when remote credentials are configured.
    pub backup: Option<Arc<BackupClient>>,
    /// Worker queue for post-append pushes; present alongside `backup`.
    pub scheduler: Option<BackupScheduler>,
    /// Fire a background backup after each successful append.
    pub auto_backup: bool,
}

impl AppState {
    fn schedule_auto_backup(&self) {
        if self.auto_backup {
            if let Some(ref scheduler) = self.scheduler {
                scheduler.schedule();
            }
        }
    }
}

/// JSON error body, mapped from the error taxonomy: validation ⇒ 400,
/// forbidden ⇒ 403, everything unexpected ⇒ 500.
struct ApiError(StatusCode, String);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.0, Json(serde_json::json!({ "error": self.1 }))).into_response()
    }
}

impl From<MnemonError> for ApiError {
    fn from(e: MnemonError) -> Self {
        let status = match e {
            MnemonError::InvalidEntry(_) => StatusCode::BAD_REQUEST,
            MnemonError::Forbidden(_) => StatusCode::FORBIDDEN,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        ApiError(status, e.to_string())
    }
}

fn bad_request(msg: &str) -> ApiError {
    ApiError(StatusCode::BAD_REQUEST, msg.into())
}

// ── Request / response bodies ──────────────────────────────────

#[derive(Deserialize)]
struct CommandRequest {
    command: Option<String>,
}

#[derive(Serialize)]
struct CommandResponse {
    result: String,
}

#[derive(Deserialize)]
struct NoteRequest {
    note: Option<String>,
}

#[derive(Serialize)]
struct MemoryResponse {
    count: usize,
    entries: Vec<String>,
}

#[derive(Serialize)]
struct BackupResponse {
    results: Vec<BackupReport>,
}

/// Build the axum router.
pub fn build_router(state: Arc<AppState>, cors: bool) -> Router {
    let mut router = Router::new()
        .route("/", get(identity_handler))
        .route("/ping", get(status_handler))
        .route("/status", get(status_handler))
        .route("/command", post(command_handler))
        .route("/memory/add", post(add_note_handler))
        .route("/remember", post(add_note_handler))
        .route("/memory", get(list_memory_handler))
        .route("/memory/list", get(list_memory_handler))
        .route("/memory/clear", delete(clear_memory_handler))
        .route("/backup", post(backup_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    if cors {
        router = router.layer(CorsLayer::permissive());
    }
    router
}

// ── Ungated routes ─────────────────────────────────────────────

async fn identity_handler(State(state): State<Arc<AppState>>) -> Json<Persona> {
    Json(state.persona.clone())
}

async fn status_handler(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "time": Utc::now().to_rfc3339(),
        "entries": state.store.count(),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

async fn command_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CommandRequest>,
) -> Result<Json<CommandResponse>, ApiError> {
    let command = req
        .command
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .ok_or_else(|| bad_request("command missing or empty"))?
        .to_string();

    let entry = format!("{} Executed: {}", Utc::now().to_rfc3339(), command);
    state.store.append(&entry)?;
    state.schedule_auto_backup();

    Ok(Json(CommandResponse {
        result: format!("Executing: {command}"),
    }))
}

async fn add_note_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<NoteRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let note = req
        .note
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .ok_or_else(|| bad_request("note missing or empty"))?
        .to_string();

    state.store.append(&note)?;
    state.schedule_auto_backup();

    Ok(Json(serde_json::json!({
        "status": "remembered",
        "entries": state.store.count(),
    })))
}

async fn list_memory_handler(State(state): State<Arc<AppState>>) -> Json<MemoryResponse> {
    let entries = state.store.list();
    Json(MemoryResponse {
        count: entries.len(),
        entries,
    })
}

// ── Gated routes ───────────────────────────────────────────────

async fn clear_memory_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<serde_json::Value>, ApiError> {
    state.gate.require(&headers)?;
    state.store.clear()?;
    info!("memory cleared via API");
    Ok(Json(serde_json::json!({ "status": "cleared" })))
}

async fn backup_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<BackupResponse>, ApiError> {
    state.gate.require(&headers)?;

    // The trigger is journaled whether or not the pushes succeed.
    state.store.journal().record("manual backup triggered");

    let client = state.backup.as_ref().ok_or_else(|| {
        ApiError::from(MnemonError::BackupUnconfigured(
            "remote credentials not set".into(),
        ))
    })?;

    let results = client.backup(true).await?;
    Ok(Json(BackupResponse { results }))
}
