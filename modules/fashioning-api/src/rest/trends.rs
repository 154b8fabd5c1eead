use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Deserialize;
use tracing::debug;

use fashioning_assistant::TrendInsight;
use fashioning_index::{Facet, SearchRequest, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

use super::{error_response, not_found};
use crate::AppState;

/// `page` is 1-indexed on the wire.
#[derive(Debug, Deserialize)]
pub struct TrendsQuery {
    q: Option<String>,
    category: Option<String>,
    region: Option<String>,
    page: Option<u32>,
    limit: Option<u32>,
}

impl TrendsQuery {
    fn into_request(self) -> Result<SearchRequest, String> {
        let page = self.page.unwrap_or(1);
        if page < 1 {
            return Err("page must be at least 1".to_string());
        }
        let limit = self.limit.unwrap_or(DEFAULT_PAGE_SIZE);
        if !(1..=MAX_PAGE_SIZE).contains(&limit) {
            return Err(format!("limit must be between 1 and {MAX_PAGE_SIZE}"));
        }

        Ok(SearchRequest {
            query: self.q.unwrap_or_default(),
            category: self.category.filter(|c| !c.is_empty()),
            region: self.region.filter(|r| !r.is_empty()),
            page: page - 1,
            page_size: limit,
        })
    }
}

pub async fn api_trends(
    State(state): State<Arc<AppState>>,
    Query(params): Query<TrendsQuery>,
) -> Response {
    let request = match params.into_request() {
        Ok(r) => r,
        Err(message) => return error_response(StatusCode::BAD_REQUEST, &message),
    };

    let mut response = state.facade.search(&request).await;
    response.page = request.page + 1;
    debug!(total = response.total, page = response.page, "Trends search");
    Json(response).into_response()
}

pub async fn api_categories(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let categories = state.facade.facet_values(Facet::Category).await;
    Json(serde_json::json!({ "categories": categories }))
}

pub async fn api_regions(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let regions = state.facade.facet_values(Facet::Regions).await;
    Json(serde_json::json!({ "regions": regions }))
}

pub async fn api_combined_stats(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(serde_json::json!({
        "success": true,
        "data": state.facade.combined_stats().await,
    }))
}

pub async fn api_trend_detail(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Response {
    match state.facade.get_by_id(&id).await {
        Some(trend) => Json(trend).into_response(),
        None => not_found("Trend"),
    }
}

pub async fn api_trend_analysis(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Response {
    match state.facade.get_by_id(&id).await {
        Some(trend) => Json(TrendInsight::from_trend(&trend)).into_response(),
        None => not_found("Trend"),
    }
}
