//! Search orchestration module
//!
//! Fans a query out to the video and web providers and concatenates what
//! they return.

mod aggregator;

pub use aggregator::Aggregator;
