//! Linear scoring engine: pure logic, no I/O.

use serde_json::{Map, Value};

use super::result::{MatchedFeature, ScoreOptions, ScoreResult, SegmentType};
use crate::normalize::{fold_text, normalize_value, round_to, value_text};
use crate::rules::{FeatureRule, RuleSet};

/// Decimal places used when `pretty_scores` is requested.
pub const PRETTY_DECIMALS: i32 = 4;

/// Score one record against a rule set.
///
/// Never fails: absent, `null` or mismatched fields leave a feature
/// inactive. Ties between segment scores resolve to the lexicographically
/// smaller segment name.
pub fn score(record: &Map<String, Value>, rule_set: &RuleSet, options: ScoreOptions) -> ScoreResult {
    let mut scores = rule_set.intercepts().clone();
    let mut matched = Vec::new();

    for feature in rule_set.features() {
        let value = feature_value(record, feature, rule_set);
        if value == 1 {
            for (segment, coefficient) in &feature.coefficients {
                if let Some(score) = scores.get_mut(segment) {
                    *score += coefficient;
                }
            }
        }
        if options.include_features {
            matched.push(MatchedFeature {
                feature_id: feature.feature_id.clone(),
                input_field: feature.input_field.clone(),
                match_value: feature.match_value.clone(),
                value,
            });
        }
    }

    let mut ranked: Vec<(&String, f64)> = scores.iter().map(|(name, score)| (name, *score)).collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0)));

    // A RuleSet always has at least one segment.
    let (best_segment, mut best_score) = (ranked[0].0.clone(), ranked[0].1);
    let second = ranked.get(1).map(|(name, score)| ((*name).clone(), *score));
    let (second_segment, mut second_best_score) = match second {
        Some((name, score)) => (Some(name), Some(score)),
        None => (None, None),
    };

    let mut difference = second_best_score.map_or(0.0, |second| best_score - second);
    let thresholds = rule_set.thresholds();
    let segment_type =
        SegmentType::classify(difference, thresholds.core_threshold, thresholds.mid_threshold);

    if options.pretty_scores {
        for value in scores.values_mut() {
            *value = round_to(*value, PRETTY_DECIMALS);
        }
        best_score = round_to(best_score, PRETTY_DECIMALS);
        second_best_score = second_best_score.map(|s| round_to(s, PRETTY_DECIMALS));
        difference = round_to(difference, PRETTY_DECIMALS);
    }

    ScoreResult {
        segment: best_segment,
        second_segment,
        segment_type,
        difference,
        best_score,
        second_best_score,
        scores,
        matched_features: options.include_features.then_some(matched),
    }
}

/// Score several records, preserving input order.
pub fn score_batch(
    records: &[Map<String, Value>],
    rule_set: &RuleSet,
    options: ScoreOptions,
) -> Vec<ScoreResult> {
    records
        .iter()
        .map(|record| score(record, rule_set, options))
        .collect()
}

/// 1 when the record's field normalizes to the rule's match value, else 0.
fn feature_value(record: &Map<String, Value>, feature: &FeatureRule, rule_set: &RuleSet) -> u8 {
    let case_insensitive = rule_set.case_insensitive();
    let tables = rule_set.value_tables();
    let raw = record.get(&feature.input_field);

    let normalized = if tables.apply {
        raw.and_then(value_text).map(|text| {
            let canonical = tables.canonical(&feature.input_field, text.trim());
            fold_text(canonical, case_insensitive)
        })
    } else {
        normalize_value(raw, case_insensitive)
    };

    match normalized {
        Some(text) => u8::from(text == fold_text(&feature.match_value, case_insensitive)),
        None => 0,
    }
}
