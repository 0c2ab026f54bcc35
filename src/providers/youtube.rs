//! YouTube provider using the YouTube Data API v3
//!
//! A search is two calls: `search` returns the matching video IDs in relevance
//! order, then `videos` returns statistics for those IDs. The statistics
//! response is keyed back onto the search order by video ID, so a partial or
//! reordered statistics response never shifts view counts onto the wrong video.

use super::traits::*;
use crate::config::ProviderSettings;
use crate::error::{Error, Result};
use crate::network::HttpClient;
use crate::results::{SearchResult, Source};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use tracing::{debug, warn};

/// The search endpoint accepts at most 50 results per page
const MAX_RESULTS_LIMIT: u32 = 50;

/// Video found by the search step
#[derive(Debug, Clone, PartialEq)]
struct VideoHit {
    video_id: String,
    title: String,
    channel_title: Option<String>,
    description: Option<String>,
}

/// Details returned by the statistics step
#[derive(Debug, Clone, PartialEq)]
struct VideoDetails {
    title: Option<String>,
    channel_title: Option<String>,
    views: Option<u64>,
}

/// YouTube video search provider
pub struct YouTube {
    client: HttpClient,
    api_key: String,
    api_base: String,
}

impl YouTube {
    pub fn new(client: HttpClient, settings: &ProviderSettings) -> Self {
        Self {
            client,
            api_key: settings.youtube_api_key.clone(),
            api_base: settings.youtube_api_base.trim_end_matches('/').to_string(),
        }
    }

    fn search_request(&self, query: &str, max_results: u32) -> ApiRequest {
        ApiRequest::get(format!("{}/search", self.api_base))
            .header("Accept", "application/json")
            .param("part", "snippet")
            .param("q", query)
            .param("type", "video")
            .param("maxResults", max_results.clamp(1, MAX_RESULTS_LIMIT))
            .param("key", &self.api_key)
    }

    fn videos_request(&self, video_ids: &[&str]) -> ApiRequest {
        ApiRequest::get(format!("{}/videos", self.api_base))
            .header("Accept", "application/json")
            .param("part", "statistics,snippet")
            .param("id", video_ids.join(","))
            .param("key", &self.api_key)
    }

    fn check_status(&self, response: &ApiResponse) -> Result<()> {
        if response.is_success() {
            Ok(())
        } else {
            Err(Error::provider(
                self.name(),
                format!("HTTP error: {} {}", response.status, response.text.trim()),
            ))
        }
    }

    /// Parse the search step. Items without a video ID (channels, playlists)
    /// are skipped.
    fn parse_search(&self, response: &ApiResponse) -> Result<Vec<VideoHit>> {
        self.check_status(response)?;
        let data: Value = response
            .json()
            .map_err(|e| Error::provider(self.name(), e))?;

        let items = match data.get("items").and_then(|i| i.as_array()) {
            Some(items) => items,
            None => return Ok(vec![]),
        };

        let hits = items
            .iter()
            .filter_map(|item| {
                let video_id = item
                    .get("id")
                    .and_then(|id| id.get("videoId"))
                    .and_then(|v| v.as_str())?;
                let snippet = item.get("snippet");
                Some(VideoHit {
                    video_id: video_id.to_string(),
                    title: snippet_str(snippet, "title").unwrap_or_default(),
                    channel_title: snippet_str(snippet, "channelTitle"),
                    description: snippet_str(snippet, "description"),
                })
            })
            .collect();

        Ok(hits)
    }

    /// Parse the statistics step into a map keyed by video ID
    fn parse_videos(&self, response: &ApiResponse) -> Result<HashMap<String, VideoDetails>> {
        self.check_status(response)?;
        let data: Value = response
            .json()
            .map_err(|e| Error::provider(self.name(), e))?;

        let mut details = HashMap::new();
        let items = match data.get("items").and_then(|i| i.as_array()) {
            Some(items) => items,
            None => return Ok(details),
        };

        for item in items {
            let id = match item.get("id").and_then(|v| v.as_str()) {
                Some(id) => id,
                None => continue,
            };
            let snippet = item.get("snippet");
            // viewCount is a decimal string; hidden counts are absent
            let views = item
                .get("statistics")
                .and_then(|s| s.get("viewCount"))
                .and_then(|v| match v {
                    Value::String(s) => s.parse::<u64>().ok(),
                    other => other.as_u64(),
                });

            details.insert(
                id.to_string(),
                VideoDetails {
                    title: snippet_str(snippet, "title"),
                    channel_title: snippet_str(snippet, "channelTitle"),
                    views,
                },
            );
        }

        Ok(details)
    }

    /// Combine both steps, keeping the search step's order
    fn merge(hits: Vec<VideoHit>, mut details: HashMap<String, VideoDetails>) -> Vec<SearchResult> {
        hits.into_iter()
            .enumerate()
            .map(|(idx, hit)| {
                let detail = details.remove(&hit.video_id);
                let url = format!("https://www.youtube.com/watch?v={}", hit.video_id);

                let (title, channel, views) = match detail {
                    Some(d) => (
                        d.title.unwrap_or(hit.title),
                        d.channel_title.or(hit.channel_title),
                        d.views,
                    ),
                    None => (hit.title, hit.channel_title, None),
                };

                let mut result = SearchResult::new(Source::YouTube, title, url, idx as u32)
                    .with_views(views)
                    .with_snippet(hit.description);
                if let Some(channel) = channel {
                    result = result.with_author(channel);
                }
                result
            })
            .collect()
    }

    async fn fetch(&self, request: ApiRequest) -> Result<ApiResponse> {
        self.client
            .execute(request)
            .await
            .map_err(|e| Error::provider(self.name(), e))
    }

    async fn try_search(&self, query: &str, max_results: u32) -> Result<Vec<SearchResult>> {
        let response = self.fetch(self.search_request(query, max_results)).await?;
        let hits = self.parse_search(&response)?;
        if hits.is_empty() {
            return Ok(vec![]);
        }

        let ids: Vec<&str> = hits.iter().map(|h| h.video_id.as_str()).collect();
        let response = self.fetch(self.videos_request(&ids)).await?;
        let details = self.parse_videos(&response)?;

        debug!(
            "YouTube returned {} videos, statistics for {}",
            hits.len(),
            details.len()
        );

        Ok(Self::merge(hits, details))
    }
}

fn snippet_str(snippet: Option<&Value>, key: &str) -> Option<String> {
    snippet
        .and_then(|s| s.get(key))
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
}

#[async_trait]
impl Provider for YouTube {
    fn name(&self) -> &str {
        "youtube"
    }

    fn source(&self) -> Source {
        Source::YouTube
    }

    async fn search(&self, query: &str, max_results: u32) -> Vec<SearchResult> {
        if self.api_key.is_empty() {
            warn!("YouTube API key not configured, skipping search");
            return vec![];
        }

        match self.try_search(query, max_results).await {
            Ok(results) => results,
            Err(e) => {
                warn!("Error fetching YouTube search results: {}", e);
                vec![]
            }
        }
    }
}
