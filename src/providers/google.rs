//! Google provider using the Custom Search JSON API

use super::traits::*;
use crate::config::ProviderSettings;
use crate::error::{Error, Result};
use crate::network::HttpClient;
use crate::results::{SearchResult, Source};
use async_trait::async_trait;
use serde_json::Value;
use tracing::warn;

/// Custom Search returns at most 10 items per call
const MAX_RESULTS_LIMIT: u32 = 10;

/// Google web search provider
pub struct Google {
    client: HttpClient,
    api_key: String,
    cse_id: String,
    api_url: String,
}

impl Google {
    pub fn new(client: HttpClient, settings: &ProviderSettings) -> Self {
        Self {
            client,
            api_key: settings.google_api_key.clone(),
            cse_id: settings.google_cse_id.clone(),
            api_url: settings.google_api_url.clone(),
        }
    }

    fn request(&self, query: &str, max_results: u32) -> ApiRequest {
        ApiRequest::get(&self.api_url)
            .header("Accept", "application/json")
            .param("q", query)
            .param("key", &self.api_key)
            .param("cx", &self.cse_id)
            .param("num", max_results.clamp(1, MAX_RESULTS_LIMIT))
    }

    /// First `og:site_name` found in the item's page metadata
    fn site_name(item: &Value) -> Option<String> {
        item.get("pagemap")
            .and_then(|p| p.get("metatags"))
            .and_then(|m| m.as_array())?
            .iter()
            .find_map(|tag| tag.get("og:site_name").and_then(|v| v.as_str()))
            .map(|s| s.to_string())
    }

    fn parse_results(&self, response: &ApiResponse) -> Result<Vec<SearchResult>> {
        if !response.is_success() {
            return Err(Error::provider(
                self.name(),
                format!("HTTP error: {} {}", response.status, response.text.trim()),
            ));
        }

        let data: Value = response
            .json()
            .map_err(|e| Error::provider(self.name(), e))?;

        // No "items" key means no results
        let items = match data.get("items").and_then(|i| i.as_array()) {
            Some(items) => items,
            None => return Ok(vec![]),
        };

        let results = items
            .iter()
            .enumerate()
            .filter_map(|(idx, item)| {
                let url = item.get("link").and_then(|v| v.as_str())?;
                let title = item
                    .get("title")
                    .and_then(|v| v.as_str())
                    .unwrap_or_default();
                let snippet = item
                    .get("snippet")
                    .and_then(|v| v.as_str())
                    .map(|s| s.to_string());

                let mut result =
                    SearchResult::new(Source::Google, title.to_string(), url.to_string(), idx as u32)
                        .with_snippet(snippet);
                if let Some(site) = Self::site_name(item) {
                    result = result.with_author(site);
                }
                Some(result)
            })
            .collect();

        Ok(results)
    }

    async fn try_search(&self, query: &str, max_results: u32) -> Result<Vec<SearchResult>> {
        let response = self
            .client
            .execute(self.request(query, max_results))
            .await
            .map_err(|e| Error::provider(self.name(), e))?;
        self.parse_results(&response)
    }
}

#[async_trait]
impl Provider for Google {
    fn name(&self) -> &str {
        "google"
    }

    fn source(&self) -> Source {
        Source::Google
    }

    async fn search(&self, query: &str, max_results: u32) -> Vec<SearchResult> {
        if self.api_key.is_empty() || self.cse_id.is_empty() {
            warn!("Google API key or search engine ID not configured, skipping search");
            return vec![];
        }

        match self.try_search(query, max_results).await {
            Ok(results) => results,
            Err(e) => {
                warn!("Error fetching Google search results: {}", e);
                vec![]
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn google(api_url: &str) -> Google {
        let settings = ProviderSettings {
            google_api_key: "g-key".to_string(),
            google_cse_id: "cse-id".to_string(),
            google_api_url: api_url.to_string(),
            ..Default::default()
        };
        Google::new(HttpClient::new().unwrap(), &settings)
    }

    fn ok(body: Value) -> ApiResponse {
        ApiResponse {
            status: 200,
            text: body.to_string(),
        }
    }

    #[test]
    fn test_google_request() {
        let g = google("https://www.googleapis.com/customsearch/v1");
        let request = g.request("rust programming", 5);

        assert_eq!(request.url, "https://www.googleapis.com/customsearch/v1");
        assert_eq!(request.param_value("q"), Some("rust programming"));
        assert_eq!(request.param_value("cx"), Some("cse-id"));
        assert_eq!(request.param_value("num"), Some("5"));
        assert_eq!(request.headers.get("Accept").unwrap(), "application/json");
        assert_eq!(g.request("rust", 50).param_value("num"), Some("10"));
    }

    #[test]
    fn test_site_name_extraction() {
        let g = google("http://localhost");
        let body = json!({
            "items": [
                {
                    "title": "The Rust Book",
                    "link": "https://doc.rust-lang.org/book/",
                    "snippet": "Learn Rust",
                    "pagemap": {"metatags": [{"viewport": "width"}, {"og:site_name": "Rust Docs"}]}
                },
                {
                    "title": "No metadata",
                    "link": "https://example.com/"
                },
                {
                    "title": "Metatags without site name",
                    "link": "https://example.org/",
                    "pagemap": {"metatags": [{"og:title": "x"}]}
                }
            ]
        });

        let results = g.parse_results(&ok(body)).unwrap();
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].author, "Rust Docs");
        assert_eq!(results[0].snippet.as_deref(), Some("Learn Rust"));
        assert_eq!(results[1].author, "N/A");
        assert_eq!(results[2].author, "N/A");
        assert!(results.iter().all(|r| r.views.is_none()));
        assert_eq!(
            results.iter().map(|r| r.order).collect::<Vec<_>>(),
            vec![0, 1, 2]
        );
    }

    #[test]
    fn test_missing_items_and_links() {
        let g = google("http://localhost");
        assert!(g.parse_results(&ok(json!({"kind": "customsearch#search"}))).unwrap().is_empty());

        let body = json!({"items": [{"title": "no link"}, {"title": "linked", "link": "https://a.example/"}]});
        let results = g.parse_results(&ok(body)).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].order, 1);
    }

    #[tokio::test]
    async fn test_search_against_mock() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("q", "rust"))
            .and(query_param("key", "g-key"))
            .and(query_param("cx", "cse-id"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "items": [
                    {"title": "one", "link": "https://one.example/"},
                    {"title": "two", "link": "https://two.example/"}
                ]
            })))
            .mount(&server)
            .await;

        let results = google(&server.uri()).search("rust", 5).await;
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].source, Source::Google);
        assert_eq!(results[1].title, "two");
    }

    #[tokio::test]
    async fn test_error_status_returns_empty() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(429).set_body_string("rate limited"))
            .mount(&server)
            .await;

        assert!(google(&server.uri()).search("rust", 5).await.is_empty());
    }

    #[tokio::test]
    async fn test_unreachable_returns_empty() {
        // nothing listens on port 9 of localhost
        let results = google("http://127.0.0.1:9/customsearch").search("rust", 5).await;
        assert!(results.is_empty());
    }
}
