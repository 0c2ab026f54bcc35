//! HTTP request handlers

use super::state::AppState;
use crate::error::{Error, Result};
use crate::results::{PaperPage, PaperSummary, SearchResult};
use crate::votes::{VoteKind, VoteRecord, VoteStore};
use axum::{
    extract::{rejection::FormRejection, Form, Query, State},
    response::{Html, IntoResponse},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tera::Context;

/// Query parameters for the paper listing fragment
#[derive(Debug, Deserialize)]
pub struct PapersParams {
    /// 1-based page number
    pub page: Option<u32>,
}

/// Form body for the search fragment
#[derive(Debug, Deserialize)]
pub struct SearchForm {
    pub query: Option<String>,
}

/// Form body for a vote
#[derive(Debug, Deserialize)]
pub struct VoteForm {
    pub url: Option<String>,
    pub vote: Option<String>,
}

/// A paper with its current tallies
#[derive(Debug, Serialize)]
struct PaperRow {
    paper: PaperSummary,
    votes: VoteRecord,
}

/// A search result with its current tallies
#[derive(Debug, Serialize)]
struct ResultRow {
    result: SearchResult,
    votes: VoteRecord,
}

/// Run a vote store operation off the async runtime
async fn with_votes<T, F>(store: &Arc<VoteStore>, op: F) -> Result<T>
where
    T: Send + 'static,
    F: FnOnce(&VoteStore) -> Result<T> + Send + 'static,
{
    let store = Arc::clone(store);
    tokio::task::spawn_blocking(move || op(&store)).await?
}

fn render(state: &AppState, template: &str, ctx: &Context) -> Result<Html<String>> {
    state
        .templates
        .render_with_context(template, ctx)
        .map(Html)
        .map_err(|e| Error::Template(format!("{:#}", e)))
}

/// Fetch a page of papers and build the template context for it
async fn papers_context(state: &AppState, page: u32) -> Result<Context> {
    let mut page: PaperPage = state
        .papers
        .fetch_papers(page, state.settings.papers.per_page)
        .await?;

    let papers = std::mem::take(&mut page.papers);
    let urls: Vec<String> = papers.iter().map(|p| p.link.clone()).collect();
    let tallies = with_votes(&state.votes, move |store| {
        store.tallies(urls.iter().map(String::as_str))
    })
    .await?;

    let rows: Vec<PaperRow> = papers
        .into_iter()
        .zip(tallies)
        .map(|(paper, votes)| PaperRow { paper, votes })
        .collect();

    let mut ctx = Context::new();
    ctx.insert("instance_name", state.instance_name());
    ctx.insert("page", &page);
    ctx.insert("papers", &rows);
    Ok(ctx)
}

/// Home page: first page of recent papers plus the search tab
pub async fn index(State(state): State<AppState>) -> Result<Html<String>> {
    let ctx = papers_context(&state, 1).await?;
    render(&state, "index.html", &ctx)
}

/// Paper listing fragment
pub async fn papers_partial(
    State(state): State<AppState>,
    Query(params): Query<PapersParams>,
) -> Result<Html<String>> {
    let page = params.page.unwrap_or(1).max(1);
    let ctx = papers_context(&state, page).await?;
    render(&state, "papers_partial.html", &ctx)
}

/// Aggregated YouTube + Google results fragment
pub async fn search_partial(
    State(state): State<AppState>,
    form: std::result::Result<Form<SearchForm>, FormRejection>,
) -> Result<Html<String>> {
    // a body that is not a form searches for nothing
    let query = form
        .ok()
        .and_then(|Form(form)| form.query)
        .unwrap_or_default()
        .trim()
        .to_string();

    let results = if query.is_empty() {
        vec![]
    } else {
        state
            .search
            .aggregate(&query, state.settings.providers.results_per_source)
            .await
    };

    let urls: Vec<String> = results.iter().map(|r| r.url.clone()).collect();
    let tallies = with_votes(&state.votes, move |store| {
        store.tallies(urls.iter().map(String::as_str))
    })
    .await?;

    let rows: Vec<ResultRow> = results
        .into_iter()
        .zip(tallies)
        .map(|(result, votes)| ResultRow { result, votes })
        .collect();

    let mut ctx = Context::new();
    ctx.insert("query", &query);
    ctx.insert("results", &rows);
    render(&state, "search_partial.html", &ctx)
}

/// Record an upvote or downvote for a URL
pub async fn vote(
    State(state): State<AppState>,
    form: std::result::Result<Form<VoteForm>, FormRejection>,
) -> Result<Json<VoteRecord>> {
    let Form(form) =
        form.map_err(|e| Error::invalid_input(format!("Invalid parameters: {}", e)))?;
    let url = form
        .url
        .filter(|u| !u.trim().is_empty())
        .ok_or_else(|| Error::invalid_input("Invalid parameters: url is required"))?;
    let kind: VoteKind = form.vote.as_deref().unwrap_or_default().parse()?;

    let record = with_votes(&state.votes, move |store| store.increment(&url, kind)).await?;
    Ok(Json(record))
}

/// Health check handler
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "version": crate::VERSION
    }))
}
