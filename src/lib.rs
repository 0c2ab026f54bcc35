//! papervote: a research feed that lists recent arXiv papers, searches
//! YouTube and Google side by side, and keeps anonymous per-URL vote tallies.

pub mod config;
pub mod error;
pub mod network;
pub mod providers;
pub mod results;
pub mod search;
pub mod votes;
pub mod web;

pub use config::Settings;
pub use error::{Error, Result};
pub use results::{PaperSummary, SearchResult, Source};
pub use search::Aggregator;
pub use votes::{VoteKind, VoteRecord, VoteStore};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
