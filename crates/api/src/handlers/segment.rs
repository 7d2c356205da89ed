//! Handlers for rule set metadata and record scoring.
//!
//! Scoring is pure and synchronous. Single records are scored inline;
//! batches are moved to the blocking pool so a large request does not stall
//! the async workers.

use axum::extract::{Query, State};
use axum::Json;
use segmenter_core::scoring::{score, score_batch, ScoreOptions};
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::{AppError, AppResult};
use crate::query::ScoreParams;
use crate::response::{BatchResponse, MetaResponse, SegmentResponse};
use crate::state::AppState;

/// GET /meta
///
/// Segment list, thresholds, feature count and version of the loaded rule set.
pub async fn meta(State(state): State<AppState>) -> Json<MetaResponse> {
    Json(MetaResponse::from_rule_set(&state.rule_set))
}

/// POST /segment
///
/// Score a single record. The body may be any JSON; anything other than an
/// object is rejected with 400.
pub async fn segment(
    State(state): State<AppState>,
    Query(params): Query<ScoreParams>,
    Json(payload): Json<Value>,
) -> AppResult<Json<SegmentResponse>> {
    let Value::Object(record) = payload else {
        return Err(AppError::BadRequest(
            "Request body must be a JSON object".to_string(),
        ));
    };

    let result = score(&record, &state.rule_set, ScoreOptions::from(params));
    tracing::debug!(segment = %result.segment, kind = result.segment_type.as_str(), "Scored record");

    Ok(Json(SegmentResponse {
        result,
        rule_set_version: state.rule_set.rule_set_version().to_string(),
    }))
}

/// Request body for the batch endpoint.
#[derive(Debug, Deserialize)]
pub struct BatchRequest {
    #[serde(default)]
    pub items: Vec<Value>,
}

/// POST /segment/batch
///
/// Score every item, returning results in input order. A single non-object
/// item rejects the whole batch with 400.
pub async fn segment_batch(
    State(state): State<AppState>,
    Query(params): Query<ScoreParams>,
    Json(body): Json<BatchRequest>,
) -> AppResult<Json<BatchResponse>> {
    let records = body
        .items
        .into_iter()
        .map(|item| match item {
            Value::Object(record) => Ok(record),
            _ => Err(AppError::BadRequest(
                "Each item must be a JSON object".to_string(),
            )),
        })
        .collect::<AppResult<Vec<Map<String, Value>>>>()?;

    let options = ScoreOptions::from(params);
    let rule_set = state.rule_set.clone();
    let count = records.len();
    let results =
        tokio::task::spawn_blocking(move || score_batch(&records, &rule_set, options)).await?;
    tracing::debug!(count, "Scored batch");

    let version = state.rule_set.rule_set_version().to_string();
    Ok(Json(BatchResponse {
        results: results
            .into_iter()
            .map(|result| SegmentResponse {
                result,
                rule_set_version: version.clone(),
            })
            .collect(),
        rule_set_version: version,
    }))
}
