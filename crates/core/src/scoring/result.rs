//! Scoring output types.

use serde::Serialize;

use crate::rules::SegmentScores;

/// How clearly the best segment beats the runner-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SegmentType {
    Core,
    Mid,
    Rest,
}

impl SegmentType {
    /// Classify a best/second-best difference.
    ///
    /// Both bounds are strict: a difference equal to `core_threshold` is
    /// `Mid`, one equal to `mid_threshold` is `Rest`. When
    /// `core_threshold <= mid_threshold`, `Mid` is unreachable.
    pub fn classify(difference: f64, core_threshold: f64, mid_threshold: f64) -> Self {
        if difference > core_threshold {
            Self::Core
        } else if difference > mid_threshold {
            Self::Mid
        } else {
            Self::Rest
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Core => "Core",
            Self::Mid => "Mid",
            Self::Rest => "Rest",
        }
    }
}

/// Per-feature diagnostic, emitted in rule order when requested.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchedFeature {
    pub feature_id: String,
    pub input_field: String,
    pub match_value: String,
    /// 1 when the feature was active, else 0.
    pub value: u8,
}

/// Flags for a scoring call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScoreOptions {
    pub include_features: bool,
    pub pretty_scores: bool,
}

/// Outcome of scoring one record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreResult {
    pub segment: String,
    pub second_segment: Option<String>,
    #[serde(rename = "type")]
    pub segment_type: SegmentType,
    pub difference: f64,
    pub best_score: f64,
    pub second_best_score: Option<f64>,
    pub scores: SegmentScores,
    pub matched_features: Option<Vec<MatchedFeature>>,
}
