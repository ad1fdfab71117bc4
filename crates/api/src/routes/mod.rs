pub mod health;

use axum::routing::post;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the API route tree.
///
/// ```text
/// /contact     POST   store a contact submission
/// ```
///
/// Everything else falls through to the static file service.
pub fn api_routes() -> Router<AppState> {
    Router::new().route("/contact", post(handlers::contact::submit_contact))
}
