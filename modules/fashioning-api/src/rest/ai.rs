use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};

use fashioning_assistant::UserPreferences;
use fashioning_common::Trend;
use fashioning_index::SearchRequest;

use super::{error_response, not_found};
use crate::AppState;

const CHAT_CONTEXT_TRENDS: u32 = 10;
const PREDICTION_TRENDS: u32 = 20;

// --- Request / response bodies ---

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ChatContext {
    trend_id: Option<String>,
    trends: Vec<Trend>,
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    message: String,
    #[serde(default)]
    context: ChatContext,
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeTrendRequest {
    trend_id: String,
}

#[derive(Debug, Deserialize)]
pub struct StyleRequest {
    #[serde(default)]
    user_preferences: UserPreferences,
    #[serde(default = "default_true")]
    include_trends: bool,
    #[serde(default = "default_style_limit")]
    limit: u32,
}

fn default_true() -> bool {
    true
}

fn default_style_limit() -> u32 {
    5
}

#[derive(Serialize)]
struct Envelope<T> {
    success: bool,
    data: T,
}

fn ok<T: Serialize>(data: T) -> Response {
    Json(Envelope {
        success: true,
        data,
    })
    .into_response()
}

async fn top_trends(state: &AppState, limit: u32) -> Vec<Trend> {
    let request = SearchRequest {
        page_size: limit,
        ..Default::default()
    };
    state.facade.search(&request).await.hits
}

// --- Handlers ---

pub async fn api_chat(
    State(state): State<Arc<AppState>>,
    Json(body): Json<ChatRequest>,
) -> Response {
    let message = body.message.trim();
    if message.is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "message must not be empty");
    }

    let trends = if body.context.trends.is_empty() {
        top_trends(&state, CHAT_CONTEXT_TRENDS).await
    } else {
        body.context.trends
    };
    let focus = match &body.context.trend_id {
        Some(id) => state.facade.get_by_id(id).await,
        None => None,
    };

    let reply = state.advisor.chat(message, focus.as_ref(), &trends).await;
    ok(serde_json::json!({
        "response": reply.response,
        "type": reply.intent,
        "message": message,
    }))
}

pub async fn api_analyze_trend(
    State(state): State<Arc<AppState>>,
    Json(body): Json<AnalyzeTrendRequest>,
) -> Response {
    analyze(&state, &body.trend_id).await
}

/// Path form of the trend analysis.
pub async fn api_trend_insights(
    State(state): State<Arc<AppState>>,
    Path(trend_id): Path<String>,
) -> Response {
    analyze(&state, &trend_id).await
}

async fn analyze(state: &AppState, trend_id: &str) -> Response {
    let Some(trend) = state.facade.get_by_id(trend_id).await else {
        return not_found("Trend");
    };
    ok(state.advisor.analyze_trend(&trend).await)
}

pub async fn api_comprehensive_analysis(
    State(state): State<Arc<AppState>>,
    Json(body): Json<AnalyzeTrendRequest>,
) -> Response {
    let Some(trend) = state.facade.get_by_id(&body.trend_id).await else {
        return not_found("Trend");
    };
    ok(serde_json::json!({
        "trend": trend,
        "comprehensive_analysis": state.advisor.comprehensive_analysis(&trend).await,
    }))
}

pub async fn api_style_recommendations(
    State(state): State<Arc<AppState>>,
    Json(body): Json<StyleRequest>,
) -> Response {
    let trends = if body.include_trends {
        top_trends(&state, body.limit).await
    } else {
        Vec::new()
    };

    let advice = state
        .advisor
        .style_recommendations(&body.user_preferences, &trends)
        .await;
    let based_on: Vec<&str> = trends.iter().take(3).map(|t| t.name.as_str()).collect();

    ok(serde_json::json!({
        "recommendations": advice.text,
        "generated": advice.generated,
        "user_preferences": body.user_preferences,
        "based_on_trends": based_on,
    }))
}

pub async fn api_predict_trends(State(state): State<Arc<AppState>>) -> Response {
    let trends = top_trends(&state, PREDICTION_TRENDS).await;
    let advice = state.advisor.predict(&trends).await;
    ok(serde_json::json!({
        "predictions": advice.text,
        "generated": advice.generated,
        "based_on": format!("{} current trends", trends.len()),
    }))
}

pub async fn api_suggestions() -> impl IntoResponse {
    ok(serde_json::json!({
        "suggestions": [
            "What are the biggest fashion trends right now?",
            "Analyze the quiet luxury trend",
            "What should I wear to a summer wedding?",
            "Predict next season's key colors",
            "Which sustainable brands are trending?",
            "How do I style Y2K pieces for work?",
            "What streetwear trends are coming next?",
            "Recommend a minimalist capsule wardrobe",
        ],
        "categories": [
            "Trend Analysis",
            "Style Advice",
            "Predictions",
            "Sustainability",
            "Shopping",
            "Market Insights",
        ],
    }))
}
