//! Provider clients
//!
//! Defines the Provider trait and the clients wrapping the YouTube Data API,
//! the Google Custom Search API and the arXiv listing API.

mod traits;

pub mod arxiv;
pub mod google;
pub mod youtube;

pub use arxiv::ArXiv;
pub use google::Google;
pub use traits::*;
pub use youtube::YouTube;
