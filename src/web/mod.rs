//! Web server module
//!
//! Serves the paper listing, the search fragment and the vote API.

mod handlers;
mod routes;
mod state;
mod templates;

pub use routes::create_router;
pub use state::AppState;
pub use templates::Templates;
