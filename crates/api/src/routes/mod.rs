pub mod health;
pub mod segment;

use axum::Router;

use crate::state::AppState;

/// Build the scoring route tree.
///
/// Route hierarchy:
///
/// ```text
/// /meta              rule set metadata (GET)
/// /segment           score one record (POST)
/// /segment/batch     score many records (POST)
/// ```
///
/// Mounted at the root alongside `/health`; existing clients call these
/// paths without a version prefix.
pub fn api_routes() -> Router<AppState> {
    Router::new().merge(segment::router())
}
