//! HTTP surface: routing, status codes and response shapes, served offline.

use std::sync::Arc;
use std::time::Duration;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use fashioning_api::{router, AppState};
use fashioning_assistant::testing::ScriptedGenerator;
use fashioning_assistant::FashionAdvisor;
use fashioning_index::IndexFacade;
use fashioning_scout::testing::StaticAdapter;
use fashioning_scout::{EnrichmentService, SourceAdapter};

// ---------------------------------------------------------------------------
// Harness
// ---------------------------------------------------------------------------

fn app_with(generator: ScriptedGenerator) -> Router {
    let adapters: Vec<Arc<dyn SourceAdapter>> = vec![Arc::new(StaticAdapter::with_titles(
        "Vogue",
        &["Oversized Blazer Trend", "Ballet Flats Are Back Again"],
    ))];
    router(Arc::new(AppState {
        facade: IndexFacade::offline(),
        enrichment: EnrichmentService::new(adapters, None),
        advisor: FashionAdvisor::new(Arc::new(generator)),
    }))
}

fn app() -> Router {
    app_with(ScriptedGenerator::failing())
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Request::get(uri).body(Body::empty()).unwrap()).await
}

async fn post(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::post(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

// ---------------------------------------------------------------------------
// Trends
// ---------------------------------------------------------------------------

#[tokio::test]
async fn health_reports_offline_index() {
    let (status, body) = get(&app(), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["remote_index"], false);
}

#[tokio::test]
async fn trends_search_echoes_one_indexed_page() {
    let (status, body) = get(&app(), "/api/v1/trends?limit=2&page=2").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 3);
    assert_eq!(body["page"], 2);
    assert_eq!(body["page_count"], 2);
    assert_eq!(body["hits"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn trends_search_filters_by_category() {
    let (_, body) = get(&app(), "/api/v1/trends?category=streetwear").await;
    assert_eq!(body["total"], 1);
    assert_eq!(body["hits"][0]["id"], "trend_002");
    assert_eq!(body["facets"]["category"]["streetwear"], 1);
}

#[tokio::test]
async fn invalid_paging_is_bad_request() {
    let app = app();
    for uri in [
        "/api/v1/trends?page=0",
        "/api/v1/trends?limit=0",
        "/api/v1/trends?limit=500",
        "/api/v1/trends?page=-1",
    ] {
        let (status, _) = get(&app, uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
    }
}

#[tokio::test]
async fn categories_and_regions_list_the_taxonomy() {
    let app = app();
    let (_, body) = get(&app, "/api/v1/trends/categories").await;
    assert_eq!(body["categories"].as_array().unwrap().len(), 10);

    let (_, body) = get(&app, "/api/v1/trends/regions").await;
    assert!(body["regions"]
        .as_array()
        .unwrap()
        .contains(&Value::from("North America")));
}

#[tokio::test]
async fn combined_stats_count_trends_and_taxonomy() {
    let (status, body) = get(&app(), "/api/v1/trends/stats/combined").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["trends_total"], 3);
    assert_eq!(body["data"]["categories"], 10);
    assert_eq!(body["data"]["regions"], 7);
}

#[tokio::test]
async fn trend_detail_and_missing_trend() {
    let app = app();
    let (status, body) = get(&app, "/api/v1/trends/trend_001").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], "trend_001");

    let (status, body) = get(&app, "/api/v1/trends/nope").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Trend not found");
}

#[tokio::test]
async fn trend_analysis_returns_insight() {
    let (status, body) = get(&app(), "/api/v1/trends/trend_001/analysis").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["trend_id"], "trend_001");
    assert_eq!(body["recommendations"].as_array().unwrap().len(), 2);
}

// ---------------------------------------------------------------------------
// Enrichment
// ---------------------------------------------------------------------------

#[tokio::test]
async fn enrichment_is_accepted_then_completes() {
    let app = app();
    let (status, job) = post(&app, "/api/v1/enrichment/enrich-trends", serde_json::json!({})).await;
    assert_eq!(status, StatusCode::ACCEPTED);
    let id = job["id"].as_str().unwrap().to_string();

    let mut state = Value::Null;
    for _ in 0..50 {
        let (_, job) = get(&app, &format!("/api/v1/enrichment/status/{id}")).await;
        state = job["state"]["state"].clone();
        if state == "completed" {
            break;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    assert_eq!(state, "completed");

    let (status, latest) = get(&app, "/api/v1/enrichment/status").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(latest["id"], id.as_str());
}

#[tokio::test]
async fn enrichment_accepts_bodies_it_cannot_decode() {
    let app = app();
    let (status, _) = post(
        &app,
        "/api/v1/enrichment/enrich-trends",
        serde_json::json!({ "sources": "vogue" }),
    )
    .await;
    assert_eq!(status, StatusCode::ACCEPTED);

    let request = Request::post("/api/v1/enrichment/enrich-trends")
        .header("content-type", "application/json")
        .body(Body::from("not json"))
        .unwrap();
    let (status, _) = send(&app, request).await;
    assert_eq!(status, StatusCode::ACCEPTED);

    let request = Request::post("/api/v1/enrichment/enrich-trends")
        .body(Body::empty())
        .unwrap();
    let (status, job) = send(&app, request).await;
    assert_eq!(status, StatusCode::ACCEPTED);
    assert_eq!(job["sources"], serde_json::json!(["Vogue"]));
}

#[tokio::test]
async fn enrichment_analytics_summarise_current_trends() {
    let (status, body) = get(&app(), "/api/v1/enrichment/enrichment-analytics").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["total_trends"], 3);
    assert_eq!(body["data"]["analyzed"], 3);
    assert_eq!(body["data"]["category_analysis"]["luxury"], 1);
    assert_eq!(body["data"]["source_analysis"]["Vogue Runway"]["count"], 3);
}

#[tokio::test]
async fn unknown_job_is_not_found() {
    let app = app();
    let (status, _) = get(&app, "/api/v1/enrichment/status").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = get(
        &app,
        "/api/v1/enrichment/status/00000000-0000-0000-0000-000000000000",
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn scraped_sources_lists_catalog_and_active() {
    let (_, body) = get(&app(), "/api/v1/enrichment/scraped-sources").await;
    assert_eq!(body["sources"].as_array().unwrap().len(), 5);
    assert_eq!(body["active"], serde_json::json!(["Vogue"]));
}

// ---------------------------------------------------------------------------
// Assistant
// ---------------------------------------------------------------------------

#[tokio::test]
async fn chat_uses_model_reply_when_available() {
    let app = app_with(ScriptedGenerator::replying("Try a relaxed blazer."));
    let (status, body) = post(
        &app,
        "/api/v1/ai/chat",
        serde_json::json!({ "message": "What should I wear on Friday?" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["response"], "Try a relaxed blazer.");
    assert_eq!(body["data"]["type"], "style_advice");
}

#[tokio::test]
async fn chat_falls_back_to_templates() {
    let (_, body) = post(&app(), "/api/v1/ai/chat", serde_json::json!({ "message": "hello" })).await;
    assert_eq!(body["data"]["type"], "general");
    assert!(body["data"]["response"]
        .as_str()
        .unwrap()
        .starts_with("I'm your fashion trend assistant"));
}

#[tokio::test]
async fn empty_chat_message_is_bad_request() {
    let (status, _) = post(&app(), "/api/v1/ai/chat", serde_json::json!({ "message": "  " })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn analyze_missing_trend_is_not_found() {
    let app = app();
    let (status, _) = post(&app, "/api/v1/ai/analyze-trend", serde_json::json!({ "trend_id": "nope" })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = post(
        &app,
        "/api/v1/ai/analyze-trend",
        serde_json::json!({ "trend_id": "trend_003" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["generated"], false);
}

#[tokio::test]
async fn style_recommendations_cite_at_most_three_trends() {
    let (_, body) = post(
        &app(),
        "/api/v1/ai/style-recommendations",
        serde_json::json!({ "user_preferences": { "preferred_categories": ["luxury"] } }),
    )
    .await;
    assert_eq!(body["data"]["based_on_trends"].as_array().unwrap().len(), 3);

    let (_, body) = post(
        &app(),
        "/api/v1/ai/style-recommendations",
        serde_json::json!({ "include_trends": false }),
    )
    .await;
    assert!(body["data"]["based_on_trends"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn predictions_report_their_basis() {
    let (_, body) = get(&app(), "/api/v1/ai/predict-trends").await;
    assert_eq!(body["data"]["based_on"], "3 current trends");
}

#[tokio::test]
async fn suggestions_are_fixed() {
    let (_, body) = get(&app(), "/api/v1/ai/suggestions").await;
    assert_eq!(body["data"]["suggestions"].as_array().unwrap().len(), 8);
    assert_eq!(body["data"]["categories"].as_array().unwrap().len(), 6);
}

#[tokio::test]
async fn comprehensive_analysis_reports_score_and_insight() {
    let app = app_with(ScriptedGenerator::replying("Built to last."));
    let (status, body) = post(
        &app,
        "/api/v1/ai/comprehensive-analysis",
        serde_json::json!({ "trend_id": "trend_001" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let report = &body["data"]["comprehensive_analysis"];
    assert_eq!(report["analysis"], "Built to last.");
    assert_eq!(report["score"]["analysis_bonus"], 10.0);
    assert_eq!(report["insight"]["trend_id"], "trend_001");
    assert_eq!(body["data"]["trend"]["id"], "trend_001");

    let (status, _) = post(
        &app,
        "/api/v1/ai/comprehensive-analysis",
        serde_json::json!({ "trend_id": "nope" }),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn ai_insights_by_path() {
    let app = app();
    let (status, body) = get(&app, "/api/v1/ai/ai-insights/trend_002").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["trend_id"], "trend_002");

    let (status, _) = get(&app, "/api/v1/ai/ai-insights/nope").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
