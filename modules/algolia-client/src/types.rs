use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

// --- Search ---

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    pub query: String,
    pub page: u32,
    pub hits_per_page: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filters: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub facets: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult<T> {
    pub hits: Vec<T>,
    pub nb_hits: u64,
    pub page: u32,
    pub nb_pages: u32,
    pub hits_per_page: u32,
    /// facet name -> value -> count
    #[serde(default)]
    pub facets: BTreeMap<String, BTreeMap<String, u64>>,
    #[serde(rename = "processingTimeMS", default)]
    pub processing_time_ms: u64,
}

// --- Facet values ---

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FacetQuery {
    pub facet_query: String,
    pub max_facet_hits: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FacetHit {
    pub value: String,
    pub count: u64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FacetSearchResult {
    pub facet_hits: Vec<FacetHit>,
}

// --- Batch writes ---

#[derive(Debug, Serialize)]
pub struct BatchRequest {
    pub requests: Vec<BatchOperation>,
}

#[derive(Debug, Serialize)]
pub struct BatchOperation {
    pub action: &'static str,
    pub body: serde_json::Value,
}

impl BatchOperation {
    /// Full replace of the record with the body's `objectID`, creating it if absent.
    pub fn update_object(body: serde_json::Value) -> Self {
        Self {
            action: "updateObject",
            body,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct BatchResponse {
    #[serde(rename = "taskID")]
    pub task_id: u64,
    #[serde(rename = "objectIDs", default)]
    pub object_ids: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_params_use_camel_case_and_skip_empty() {
        let params = SearchParams {
            query: "y2k".into(),
            page: 0,
            hits_per_page: 20,
            filters: None,
            facets: vec![],
        };
        let json = serde_json::to_value(&params).unwrap();
        assert_eq!(json["hitsPerPage"], 20);
        assert!(json.get("filters").is_none());
        assert!(json.get("facets").is_none());
    }

    #[test]
    fn search_result_reads_processing_time_and_facets() {
        let body = serde_json::json!({
            "hits": [{"objectID": "a"}],
            "nbHits": 1,
            "page": 0,
            "nbPages": 1,
            "hitsPerPage": 20,
            "processingTimeMS": 3,
            "facets": {"category": {"luxury": 1}}
        });
        let result: SearchResult<serde_json::Value> = serde_json::from_value(body).unwrap();
        assert_eq!(result.processing_time_ms, 3);
        assert_eq!(result.facets["category"]["luxury"], 1);
    }
}
