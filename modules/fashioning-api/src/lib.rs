use std::sync::Arc;

use axum::{
    http::{header, HeaderValue},
    routing::{get, post},
    Router,
};
use tower_http::set_header::SetResponseHeaderLayer;

use fashioning_assistant::FashionAdvisor;
use fashioning_index::IndexFacade;
use fashioning_scout::EnrichmentService;

pub mod rest;

pub struct AppState {
    pub facade: IndexFacade,
    pub enrichment: EnrichmentService,
    pub advisor: FashionAdvisor,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health
        .route("/", get(rest::api_root))
        .route("/health", get(rest::api_health))
        // Trends
        .route("/api/v1/trends", get(rest::trends::api_trends))
        .route("/api/v1/trends/categories", get(rest::trends::api_categories))
        .route("/api/v1/trends/regions", get(rest::trends::api_regions))
        .route("/api/v1/trends/stats/combined", get(rest::trends::api_combined_stats))
        .route("/api/v1/trends/{id}", get(rest::trends::api_trend_detail))
        .route("/api/v1/trends/{id}/analysis", get(rest::trends::api_trend_analysis))
        // Enrichment
        .route("/api/v1/enrichment/enrich-trends", post(rest::enrichment::api_enrich_trends))
        .route("/api/v1/enrichment/status", get(rest::enrichment::api_latest_status))
        .route("/api/v1/enrichment/status/{id}", get(rest::enrichment::api_job_status))
        .route("/api/v1/enrichment/scraped-sources", get(rest::enrichment::api_scraped_sources))
        .route("/api/v1/enrichment/enrichment-analytics", get(rest::enrichment::api_enrichment_analytics))
        // Assistant
        .route("/api/v1/ai/chat", post(rest::ai::api_chat))
        .route("/api/v1/ai/analyze-trend", post(rest::ai::api_analyze_trend))
        .route("/api/v1/ai/comprehensive-analysis", post(rest::ai::api_comprehensive_analysis))
        .route("/api/v1/ai/ai-insights/{trend_id}", get(rest::ai::api_trend_insights))
        .route("/api/v1/ai/style-recommendations", post(rest::ai::api_style_recommendations))
        .route("/api/v1/ai/predict-trends", get(rest::ai::api_predict_trends))
        .route("/api/v1/ai/suggestions", get(rest::ai::api_suggestions))
        .with_state(state)
        .layer(
            tower_http::cors::CorsLayer::new()
                .allow_origin(tower_http::cors::Any)
                .allow_methods(tower_http::cors::Any)
                .allow_headers(tower_http::cors::Any),
        )
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
        .layer(tower_http::compression::CompressionLayer::new())
        .layer(
            tower_http::trace::TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        path = %request.uri().path(),
                    )
                }),
        )
}
