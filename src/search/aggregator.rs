//! Search aggregation across providers

use crate::providers::Provider;
use crate::results::SearchResult;
use futures::future::join;
use std::sync::Arc;
use tracing::{debug, info};

/// Runs a query against YouTube and Google and concatenates the results
pub struct Aggregator {
    youtube: Arc<dyn Provider>,
    google: Arc<dyn Provider>,
}

impl Aggregator {
    pub fn new(youtube: Arc<dyn Provider>, google: Arc<dyn Provider>) -> Self {
        Self { youtube, google }
    }

    /// Query both providers concurrently. The YouTube results always come
    /// first, each list in its provider's own order, regardless of which call
    /// finishes first.
    pub async fn aggregate(&self, query: &str, max_results_per_source: u32) -> Vec<SearchResult> {
        info!("Executing search '{}' on 2 providers", query);

        let (mut results, google) = join(
            self.youtube.search(query, max_results_per_source),
            self.google.search(query, max_results_per_source),
        )
        .await;

        debug!(
            "{} returned {} results, {} returned {}",
            self.youtube.source(),
            results.len(),
            self.google.source(),
            google.len()
        );

        results.extend(google);
        results
    }
}
