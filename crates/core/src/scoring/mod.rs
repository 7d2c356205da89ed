//! Scoring engine.
//!
//! Evaluates a [`RuleSet`](crate::rules::RuleSet) against arbitrary JSON
//! records and classifies the winning margin.

pub mod engine;
pub mod result;

pub use engine::{score, score_batch};
pub use result::{MatchedFeature, ScoreOptions, ScoreResult, SegmentType};
