//! Result types shared by providers, the aggregator and the web layer

mod types;

pub use types::*;
