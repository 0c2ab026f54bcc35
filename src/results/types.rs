//! Result type definitions

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Author placeholder used when a provider reports none
pub const UNKNOWN_AUTHOR: &str = "N/A";

/// Provider a search result came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Source {
    YouTube,
    Google,
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::YouTube => write!(f, "YouTube"),
            Self::Google => write!(f, "Google"),
        }
    }
}

/// A single search result from one provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Provider that returned this result
    pub source: Source,
    pub title: String,
    pub url: String,
    /// Channel name for videos, site name for web pages
    pub author: String,
    /// View count (videos only)
    pub views: Option<u64>,
    /// Rank within the provider's own result page, starting at 0
    pub order: u32,
    /// Description text
    pub snippet: Option<String>,
}

impl SearchResult {
    /// Create a new result with an unknown author
    pub fn new(source: Source, title: String, url: String, order: u32) -> Self {
        Self {
            source,
            title,
            url,
            author: UNKNOWN_AUTHOR.to_string(),
            views: None,
            order,
            snippet: None,
        }
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = author.into();
        self
    }

    pub fn with_views(mut self, views: Option<u64>) -> Self {
        self.views = views;
        self
    }

    pub fn with_snippet(mut self, snippet: Option<String>) -> Self {
        self.snippet = snippet.filter(|s| !s.trim().is_empty());
        self
    }
}

/// One arXiv listing entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaperSummary {
    /// arXiv identifier URL, e.g. `http://arxiv.org/abs/2401.00001v1`
    pub id: String,
    pub title: String,
    pub authors: Vec<String>,
    /// Submission date
    pub published: Option<DateTime<Utc>>,
    pub updated: Option<DateTime<Utc>>,
    /// Abstract
    pub summary: String,
    /// Abstract page
    pub link: String,
    pub pdf_url: Option<String>,
    #[serde(default)]
    pub categories: Vec<String>,
}

/// A client-side page over a fetched batch of papers
#[derive(Debug, Clone, Serialize)]
pub struct PaperPage {
    pub papers: Vec<PaperSummary>,
    /// 1-based page number
    pub page: u32,
    pub per_page: u32,
    /// Size of the fetched batch
    pub total: usize,
    pub total_pages: u32,
}

impl PaperPage {
    /// Slice `batch` into the requested page. Pages past the end are empty.
    pub fn slice(batch: Vec<PaperSummary>, page: u32, per_page: u32) -> Self {
        let page = page.max(1);
        let per_page = per_page.max(1);
        let total = batch.len();
        let start = (page as usize - 1).saturating_mul(per_page as usize);
        let papers = batch
            .into_iter()
            .skip(start)
            .take(per_page as usize)
            .collect();

        Self {
            papers,
            page,
            per_page,
            total,
            total_pages: total.div_ceil(per_page as usize) as u32,
        }
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}
