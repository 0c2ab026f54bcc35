//! arXiv listing client
//!
//! Fetches the most recent submissions for one category from the arXiv API
//! and pages through them client-side. Unlike the search providers, failures
//! here are returned to the caller.

use super::traits::*;
use crate::config::PaperSettings;
use crate::error::{Error, Result};
use crate::network::HttpClient;
use crate::results::{PaperPage, PaperSummary};
use chrono::{DateTime, Utc};
use tracing::debug;

/// arXiv listing client for recent papers
pub struct ArXiv {
    client: HttpClient,
    api_url: String,
    category: String,
    batch_size: u32,
}

impl ArXiv {
    pub fn new(client: HttpClient, settings: &PaperSettings) -> Self {
        Self {
            client,
            api_url: settings.api_url.clone(),
            category: settings.category.clone(),
            batch_size: settings.batch_size,
        }
    }

    fn request(&self) -> ApiRequest {
        ApiRequest::get(&self.api_url)
            .header("Accept", "application/atom+xml")
            .param("search_query", &self.category)
            .param("start", 0)
            .param("max_results", self.batch_size)
            .param("sortBy", "submittedDate")
            .param("sortOrder", "descending")
    }

    /// Fetch the batch of most recent papers and return one page of it
    pub async fn fetch_papers(&self, page: u32, per_page: u32) -> Result<PaperPage> {
        let response = self
            .client
            .execute(self.request())
            .await
            .map_err(Error::PaperFeed)?;

        if !response.is_success() {
            return Err(Error::PaperFeed(anyhow::anyhow!(
                "HTTP error: {}",
                response.status
            )));
        }

        let batch = parse_atom_feed(&response.text);
        debug!("arXiv returned {} papers for {}", batch.len(), self.category);

        Ok(PaperPage::slice(batch, page, per_page))
    }
}

/// Parse the Atom feed returned by the arXiv API
fn parse_atom_feed(xml: &str) -> Vec<PaperSummary> {
    let mut papers = Vec::new();

    for entry_str in xml.split("<entry>").skip(1) {
        let entry = match entry_str.find("</entry>") {
            Some(end) => &entry_str[..end],
            None => continue,
        };

        let id = match extract_tag(entry, "id") {
            Some(id) if !id.trim().is_empty() => id.trim().to_string(),
            _ => continue,
        };

        let title = extract_tag(entry, "title")
            .map(|t| collapse_whitespace(&t))
            .unwrap_or_default();

        let summary = extract_tag(entry, "summary")
            .map(|s| collapse_whitespace(&s))
            .unwrap_or_default();

        let authors: Vec<String> = entry
            .split("<author>")
            .skip(1)
            .filter_map(|block| extract_tag(block, "name"))
            .map(|name| collapse_whitespace(&name))
            .collect();

        let categories: Vec<String> = entry
            .split("<category term=\"")
            .skip(1)
            .filter_map(|cat| cat.find('"').map(|end| cat[..end].to_string()))
            .collect();

        let link = find_link(entry, |attrs| attr(attrs, "rel") == Some("alternate"))
            .unwrap_or_else(|| id.clone());
        let pdf_url = find_link(entry, |attrs| attr(attrs, "title") == Some("pdf"));

        papers.push(PaperSummary {
            id,
            title,
            authors,
            published: extract_tag(entry, "published").and_then(|d| parse_date(&d)),
            updated: extract_tag(entry, "updated").and_then(|d| parse_date(&d)),
            summary,
            link,
            pdf_url,
            categories,
        });
    }

    papers
}

/// Extract text content from an XML tag
fn extract_tag(xml: &str, tag: &str) -> Option<String> {
    let start_tag = format!("<{}", tag);
    let end_tag = format!("</{}>", tag);

    let start = xml.find(&start_tag)?;
    let content_start = xml[start..].find('>')? + start + 1;
    let end = xml[content_start..].find(&end_tag)? + content_start;

    Some(unescape(&xml[content_start..end]))
}

/// href of the first `<link>` whose attributes satisfy `matches`
fn find_link(entry: &str, matches: impl Fn(&str) -> bool) -> Option<String> {
    entry
        .split("<link ")
        .skip(1)
        .filter_map(|rest| rest.find('>').map(|end| &rest[..end]))
        .find(|attrs| matches(*attrs))
        .and_then(|attrs| attr(attrs, "href"))
        .map(unescape)
}

/// Value of `name="..."` within a tag's attribute text
fn attr<'a>(attrs: &'a str, name: &str) -> Option<&'a str> {
    let needle = format!("{}=\"", name);
    let mut search_from = 0;
    while let Some(pos) = attrs[search_from..].find(&needle) {
        let start = search_from + pos;
        // require a word boundary so `rel` does not match inside `xmlrel`
        let boundary = start == 0 || attrs[..start].ends_with(char::is_whitespace);
        let value_start = start + needle.len();
        if boundary {
            let len = attrs[value_start..].find('"')?;
            return Some(&attrs[value_start..value_start + len]);
        }
        search_from = value_start;
    }
    None
}

fn parse_date(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value.trim())
        .ok()
        .map(|d| d.with_timezone(&Utc))
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn unescape(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}
