//! Vote tally storage
//!
//! Anonymous per-URL upvote/downvote counters persisted in SQLite.

mod schema;
mod store;
mod types;

pub use schema::MAX_URL_LEN;
pub use store::VoteStore;
pub use types::{VoteKind, VoteRecord};
