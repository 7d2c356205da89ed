//! Shared query parameter types for API handlers.

use segmenter_core::scoring::ScoreOptions;
use serde::{Deserialize, Deserializer};

use crate::config::parse_flag;

/// Scoring flags (`?include_features=&pretty_scores=`), shared by the
/// single and batch endpoints. Accepts the same spellings as the boolean
/// environment variables (`1`, `yes`, `True`, ...).
#[derive(Debug, Default, Deserialize)]
pub struct ScoreParams {
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub include_features: bool,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub pretty_scores: bool,
}

fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_flag(&raw).ok_or_else(|| serde::de::Error::custom(format!("invalid boolean flag '{raw}'")))
}

impl From<ScoreParams> for ScoreOptions {
    fn from(params: ScoreParams) -> Self {
        ScoreOptions {
            include_features: params.include_features,
            pretty_scores: params.pretty_scores,
        }
    }
}
