pub mod ai;
pub mod enrichment;
pub mod trends;

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};

use crate::AppState;

// --- Helpers ---

pub(crate) fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(serde_json::json!({ "error": message }))).into_response()
}

pub(crate) fn not_found(what: &str) -> Response {
    error_response(StatusCode::NOT_FOUND, &format!("{what} not found"))
}

// --- Handlers ---

pub async fn api_root() -> impl IntoResponse {
    Json(serde_json::json!({
        "name": "Fashioning API",
        "version": env!("CARGO_PKG_VERSION"),
        "docs": "/api/v1",
    }))
}

pub async fn api_health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "remote_index": state.facade.has_remote(),
        "generator": state.advisor.generator_name(),
    }))
}
