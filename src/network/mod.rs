//! HTTP networking module
//!
//! Provides the outbound HTTP client used by every provider.

mod client;

pub use client::HttpClient;
