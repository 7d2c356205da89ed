//! Response bodies for the segmentation endpoints.
//!
//! Bodies are flat objects (no `data` envelope); the field names are the
//! public contract of the service.

use segmenter_core::rules::{RuleSet, Thresholds};
use segmenter_core::scoring::ScoreResult;
use serde::Serialize;

/// `GET /meta`.
#[derive(Debug, Serialize)]
pub struct MetaResponse {
    pub segments: Vec<String>,
    pub thresholds: Thresholds,
    pub feature_count: usize,
    pub rule_set_version: String,
}

impl MetaResponse {
    pub fn from_rule_set(rule_set: &RuleSet) -> Self {
        Self {
            segments: rule_set.segments().to_vec(),
            thresholds: rule_set.thresholds(),
            feature_count: rule_set.features().len(),
            rule_set_version: rule_set.rule_set_version().to_string(),
        }
    }
}

/// One scored record, tagged with the rule set version that produced it.
#[derive(Debug, Serialize)]
pub struct SegmentResponse {
    #[serde(flatten)]
    pub result: ScoreResult,
    pub rule_set_version: String,
}

/// `POST /segment/batch`.
#[derive(Debug, Serialize)]
pub struct BatchResponse {
    pub results: Vec<SegmentResponse>,
    pub rule_set_version: String,
}
