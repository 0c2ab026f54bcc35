//! Provider traits and request/response types

use crate::results::{SearchResult, Source};
use async_trait::async_trait;
use std::collections::HashMap;

/// HTTP request to be made by a provider
#[derive(Debug, Clone)]
pub struct ApiRequest {
    /// URL to request
    pub url: String,
    /// Request headers
    pub headers: HashMap<String, String>,
    /// Query parameters, sent in insertion order
    pub params: Vec<(String, String)>,
}

impl ApiRequest {
    /// Create a GET request
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            headers: HashMap::new(),
            params: Vec::new(),
        }
    }

    /// Add a header
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Add a query parameter
    pub fn param(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.params.push((key.into(), value.to_string()));
        self
    }

    /// Look up a query parameter by name
    pub fn param_value(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// HTTP response to a provider request
#[derive(Debug)]
pub struct ApiResponse {
    /// HTTP status code
    pub status: u16,
    /// Response body as text
    pub text: String,
}

impl ApiResponse {
    /// Parse response as JSON
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> anyhow::Result<T> {
        Ok(serde_json::from_str(&self.text)?)
    }

    /// Check if response is successful (2xx)
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// A search provider translating a free-text query into normalized results.
///
/// Implementations never fail: an unavailable upstream yields an empty list
/// and a logged warning.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Provider name used in logs
    fn name(&self) -> &str;

    /// Source tag stamped on every result
    fn source(&self) -> Source;

    /// Search for `query`, returning at most `max_results` results in the
    /// provider's relevance order
    async fn search(&self, query: &str, max_results: u32) -> Vec<SearchResult>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_builder_keeps_param_order() {
        let request = ApiRequest::get("https://example.com/api")
            .param("q", "rust")
            .param("maxResults", 5)
            .header("Accept", "application/json");

        assert_eq!(request.params[0].0, "q");
        assert_eq!(request.params[1].0, "maxResults");
        assert_eq!(request.param_value("maxResults"), Some("5"));
        assert_eq!(request.param_value("missing"), None);
        assert_eq!(request.headers.get("Accept").unwrap(), "application/json");
    }

    #[test]
    fn test_response_status() {
        let ok = ApiResponse {
            status: 204,
            text: String::new(),
        };
        assert!(ok.is_success());

        let forbidden = ApiResponse {
            status: 403,
            text: "{\"error\":{}}".to_string(),
        };
        assert!(!forbidden.is_success());
        assert!(forbidden.json::<serde_json::Value>().is_ok());
    }
}
