pub mod error;
pub mod types;

pub use error::{AlgoliaError, Result};
pub use types::{
    BatchOperation, BatchRequest, BatchResponse, FacetHit, FacetQuery, FacetSearchResult,
    SearchParams, SearchResult,
};

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;

/// Header carrying the application id on every request.
const APP_ID_HEADER: &str = "X-Algolia-Application-Id";
/// Header carrying the API key on every request.
const API_KEY_HEADER: &str = "X-Algolia-API-Key";

pub struct AlgoliaClient {
    client: reqwest::Client,
    app_id: String,
    api_key: String,
    read_url: String,
    write_url: String,
}

impl AlgoliaClient {
    pub fn new(app_id: &str, api_key: &str) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            app_id: app_id.to_string(),
            api_key: api_key.to_string(),
            read_url: format!("https://{app_id}-dsn.algolia.net/1"),
            write_url: format!("https://{app_id}.algolia.net/1"),
        }
    }

    /// Point reads and writes at a single host (tests, proxies).
    pub fn with_base_url(mut self, url: &str) -> Self {
        let url = url.trim_end_matches('/');
        self.read_url = url.to_string();
        self.write_url = url.to_string();
        self
    }

    pub fn app_id(&self) -> &str {
        &self.app_id
    }

    /// Query one index. Hits are decoded into `T`.
    pub async fn search<T: DeserializeOwned>(
        &self,
        index: &str,
        params: &SearchParams,
    ) -> Result<SearchResult<T>> {
        let url = format!("{}/indexes/{}/query", self.read_url, encode(index));
        tracing::debug!(index, query = %params.query, page = params.page, "Algolia search");
        self.post_json(&url, params).await
    }

    /// Fetch a single record by `objectID`. A 404 is `Ok(None)`.
    pub async fn get_object<T: DeserializeOwned>(
        &self,
        index: &str,
        object_id: &str,
    ) -> Result<Option<T>> {
        let url = format!(
            "{}/indexes/{}/{}",
            self.read_url,
            encode(index),
            encode(object_id)
        );
        let resp = self
            .client
            .get(&url)
            .header(APP_ID_HEADER, &self.app_id)
            .header(API_KEY_HEADER, &self.api_key)
            .send()
            .await?;

        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(AlgoliaError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body = resp.text().await?;
        Ok(Some(serde_json::from_str(&body)?))
    }

    /// All values of a facet attribute with their counts.
    pub async fn search_for_facet_values(
        &self,
        index: &str,
        facet: &str,
    ) -> Result<Vec<FacetHit>> {
        let url = format!(
            "{}/indexes/{}/facets/{}/query",
            self.read_url,
            encode(index),
            encode(facet)
        );
        let query = FacetQuery {
            facet_query: String::new(),
            max_facet_hits: 100,
        };
        let result: FacetSearchResult = self.post_json(&url, &query).await?;
        Ok(result.facet_hits)
    }

    /// Run a batch of write operations against one index.
    pub async fn batch(&self, index: &str, operations: Vec<BatchOperation>) -> Result<BatchResponse> {
        let url = format!("{}/indexes/{}/batch", self.write_url, encode(index));
        let request = BatchRequest {
            requests: operations,
        };
        self.post_json(&url, &request).await
    }

    async fn post_json<B: Serialize, T: DeserializeOwned>(&self, url: &str, body: &B) -> Result<T> {
        let resp = self
            .client
            .post(url)
            .header(APP_ID_HEADER, &self.app_id)
            .header(API_KEY_HEADER, &self.api_key)
            .json(body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(AlgoliaError::Api {
                status: status.as_u16(),
                message,
            });
        }

        // Decode from text so malformed payloads surface as Parse, not Network.
        let body = resp.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

fn encode(segment: &str) -> String {
    url::form_urlencoded::byte_serialize(segment.as_bytes()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hosts_derive_from_app_id() {
        let client = AlgoliaClient::new("ABC123", "key");
        assert_eq!(client.read_url, "https://ABC123-dsn.algolia.net/1");
        assert_eq!(client.write_url, "https://ABC123.algolia.net/1");
    }

    #[test]
    fn base_url_override_applies_to_both_hosts() {
        let client = AlgoliaClient::new("ABC123", "key").with_base_url("http://localhost:9000/1/");
        assert_eq!(client.read_url, "http://localhost:9000/1");
        assert_eq!(client.write_url, "http://localhost:9000/1");
    }

    #[test]
    fn path_segments_are_encoded() {
        assert_eq!(encode("fashion_trends"), "fashion_trends");
        assert_eq!(encode("a b/c"), "a+b%2Fc");
    }
}
