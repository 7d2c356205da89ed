//! Immutable rule set model.

use std::collections::BTreeSet;

use indexmap::IndexMap;
use serde::Serialize;

use crate::error::RulesLoadError;

/// Per-segment numbers keyed by segment display name, in segment order.
pub type SegmentScores = IndexMap<String, f64>;

/// Field name -> (raw value -> replacement value).
pub type FieldTable = IndexMap<String, IndexMap<String, String>>;

/// Margins that split a best/second-best difference into a type.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Thresholds {
    /// A difference strictly above this is `Core`.
    pub core_threshold: f64,
    /// A difference strictly above this (and not `Core`) is `Mid`.
    pub mid_threshold: f64,
}

/// One binary feature: `input_field == match_value`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureRule {
    /// `"<input_field>==<match_value>"`, for diagnostics only.
    pub feature_id: String,
    pub input_field: String,
    pub match_value: String,
    /// Weight added to each segment's score when the feature is active.
    pub coefficients: SegmentScores,
}

impl FeatureRule {
    pub fn new(
        input_field: impl Into<String>,
        match_value: impl Into<String>,
        coefficients: SegmentScores,
    ) -> Self {
        let input_field = input_field.into();
        let match_value = match_value.into();
        Self {
            feature_id: format!("{input_field}=={match_value}"),
            input_field,
            match_value,
            coefficients,
        }
    }
}

/// Optional lookup tables that translate raw input values before matching.
///
/// Both tables are keyed by input field. They are only consulted when
/// `apply` is set; otherwise they are carried for inspection only.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValueTables {
    /// Raw code -> label, from the companion code-list file.
    pub code_mappings: FieldTable,
    /// Raw value -> canonical value, from the rule document.
    pub value_aliases: FieldTable,
    pub apply: bool,
}

impl ValueTables {
    /// Translate `text` for `field`: code mapping first, then alias.
    pub fn canonical<'a>(&'a self, field: &str, text: &'a str) -> &'a str {
        if !self.apply {
            return text;
        }
        let mapped = lookup(&self.code_mappings, field, text).unwrap_or(text);
        lookup(&self.value_aliases, field, mapped).unwrap_or(mapped)
    }
}

fn lookup<'a>(table: &'a FieldTable, field: &str, text: &str) -> Option<&'a str> {
    table
        .get(field)
        .and_then(|entries| entries.get(text))
        .map(String::as_str)
}

/// The validated, versioned model a record is scored against.
///
/// Built once, then shared read-only (typically behind an `Arc`). Fields are
/// private so the segment/coefficient invariants established at
/// construction cannot be broken afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleSet {
    segments: Vec<String>,
    intercepts: SegmentScores,
    thresholds: Thresholds,
    features: Vec<FeatureRule>,
    rule_set_version: String,
    case_insensitive: bool,
    tables: ValueTables,
}

impl RuleSet {
    /// Assemble a rule set from already-resolved parts.
    ///
    /// Segments follow the intercept order. Fails if there are no intercepts
    /// or any feature's coefficient keys differ from the intercept keys.
    pub fn from_parts(
        intercepts: SegmentScores,
        thresholds: Thresholds,
        features: Vec<FeatureRule>,
        rule_set_version: impl Into<String>,
        case_insensitive: bool,
    ) -> Result<Self, RulesLoadError> {
        if intercepts.is_empty() {
            return Err(RulesLoadError::invalid("No intercepts found in rules"));
        }

        let expected: BTreeSet<&str> = intercepts.keys().map(String::as_str).collect();
        for feature in &features {
            let actual: BTreeSet<&str> = feature.coefficients.keys().map(String::as_str).collect();
            if actual != expected {
                return Err(RulesLoadError::invalid(format!(
                    "Coefficients for '{}' must include keys {:?}",
                    feature.input_field, expected
                )));
            }
        }

        Ok(Self {
            segments: intercepts.keys().cloned().collect(),
            intercepts,
            thresholds,
            features,
            rule_set_version: rule_set_version.into(),
            case_insensitive,
            tables: ValueTables::default(),
        })
    }

    pub fn with_value_tables(mut self, tables: ValueTables) -> Self {
        self.tables = tables;
        self
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn intercepts(&self) -> &SegmentScores {
        &self.intercepts
    }

    pub fn thresholds(&self) -> Thresholds {
        self.thresholds
    }

    pub fn features(&self) -> &[FeatureRule] {
        &self.features
    }

    pub fn rule_set_version(&self) -> &str {
        &self.rule_set_version
    }

    pub fn case_insensitive(&self) -> bool {
        self.case_insensitive
    }

    pub fn value_tables(&self) -> &ValueTables {
        &self.tables
    }

    pub fn code_mappings(&self) -> &FieldTable {
        &self.tables.code_mappings
    }

    pub fn value_aliases(&self) -> &FieldTable {
        &self.tables.value_aliases
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scores(pairs: &[(&str, f64)]) -> SegmentScores {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    fn thresholds() -> Thresholds {
        Thresholds {
            core_threshold: 1.0,
            mid_threshold: 0.5,
        }
    }

    #[test]
    fn feature_id_joins_field_and_value() {
        let rule = FeatureRule::new("status", "Active", scores(&[("A", 1.0)]));
        assert_eq!(rule.feature_id, "status==Active");
    }

    #[test]
    fn segments_follow_intercept_order() {
        let rs = RuleSet::from_parts(
            scores(&[("Zeta", 0.0), ("Alpha", 1.0)]),
            thresholds(),
            vec![],
            "v1",
            false,
        )
        .unwrap();
        assert_eq!(rs.segments(), ["Zeta", "Alpha"]);
    }

    #[test]
    fn rejects_empty_intercepts() {
        let err = RuleSet::from_parts(SegmentScores::new(), thresholds(), vec![], "v", false);
        assert!(err.is_err());
    }

    #[test]
    fn rejects_feature_with_extra_segment() {
        let feature = FeatureRule::new("tier", "Gold", scores(&[("A", 1.0), ("B", 0.0), ("C", 0.0)]));
        let err = RuleSet::from_parts(
            scores(&[("A", 0.0), ("B", 0.0)]),
            thresholds(),
            vec![feature],
            "v",
            false,
        )
        .unwrap_err();
        assert!(err.to_string().contains("tier"));
    }

    #[test]
    fn tables_translate_only_when_applied() {
        let mut tables = ValueTables::default();
        tables
            .code_mappings
            .entry("tier".into())
            .or_default()
            .insert("G".into(), "Gold".into());
        tables
            .value_aliases
            .entry("tier".into())
            .or_default()
            .insert("Gold".into(), "Premium".into());

        assert_eq!(tables.canonical("tier", "G"), "G");
        tables.apply = true;
        assert_eq!(tables.canonical("tier", "G"), "Premium");
        assert_eq!(tables.canonical("tier", "Silver"), "Silver");
        assert_eq!(tables.canonical("status", "G"), "G");
    }
}
