//! Route definitions for rule set metadata and scoring.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::segment;
use crate::state::AppState;

/// Segmentation routes.
///
/// ```text
/// GET    /meta            -> meta
/// POST   /segment         -> segment         (?include_features, ?pretty_scores)
/// POST   /segment/batch   -> segment_batch   (?include_features, ?pretty_scores)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/meta", get(segment::meta))
        .route("/segment", post(segment::segment))
        .route("/segment/batch", post(segment::segment_batch))
}
