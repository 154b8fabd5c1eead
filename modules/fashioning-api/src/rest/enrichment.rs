use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use tracing::{info, warn};
use uuid::Uuid;

use fashioning_scout::{sources::CATALOG, EnrichmentRequest};

use super::not_found;
use crate::AppState;

/// Always accepts; poll the status routes. A body that does not decode
/// is treated as an empty request.
pub async fn api_enrich_trends(State(state): State<Arc<AppState>>, body: Bytes) -> Response {
    let job = state.enrichment.trigger(decode_request(&body)).await;
    info!(job_id = %job.id, "Enrichment triggered over HTTP");
    (StatusCode::ACCEPTED, Json(job)).into_response()
}

fn decode_request(body: &[u8]) -> EnrichmentRequest {
    if body.iter().all(u8::is_ascii_whitespace) {
        return EnrichmentRequest::default();
    }
    serde_json::from_slice(body).unwrap_or_else(|e| {
        warn!(error = %e, "Undecodable enrichment request, running with defaults");
        EnrichmentRequest::default()
    })
}

pub async fn api_latest_status(State(state): State<Arc<AppState>>) -> Response {
    match state.enrichment.latest().await {
        Some(job) => Json(job).into_response(),
        None => not_found("Enrichment job"),
    }
}

pub async fn api_job_status(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Response {
    match state.enrichment.status(id).await {
        Some(job) => Json(job).into_response(),
        None => not_found("Enrichment job"),
    }
}

pub async fn api_scraped_sources(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(serde_json::json!({
        "sources": CATALOG,
        "active": state.enrichment.source_names(),
    }))
}

/// Trends sampled for the analytics report.
const ANALYTICS_SAMPLE: u32 = 50;

pub async fn api_enrichment_analytics(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(serde_json::json!({
        "success": true,
        "data": state.facade.analytics(ANALYTICS_SAMPLE).await,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_and_malformed_bodies_decode_to_defaults() {
        assert!(decode_request(b"").sources.is_empty());
        assert!(decode_request(b"not json").sources.is_empty());
        assert!(decode_request(br#"{"sources":"vogue"}"#).sources.is_empty());
    }

    #[test]
    fn well_formed_body_is_kept() {
        let request = decode_request(br#"{"sources":["Vogue"],"force_refresh":true}"#);
        assert_eq!(request.sources, vec!["Vogue".to_string()]);
        assert!(request.force_refresh);
    }
}
