//! Rule document loading and validation.
//!
//! Turns untrusted bytes into a [`RuleSet`]. Validation order follows the
//! document layout: intercepts, segments, thresholds, rules, metadata. The
//! first problem found is reported; nothing is partially loaded.

use std::collections::BTreeSet;
use std::io::ErrorKind;
use std::path::Path;

use serde_json::{Map, Value};

use super::model::{FeatureRule, FieldTable, RuleSet, SegmentScores, Thresholds, ValueTables};
use super::segments::resolve_segment_names;
use super::tables::{parse_code_list, parse_field_table};
use crate::error::RulesLoadError;
use crate::hashing::sha256_hex;

/// Caller-side settings that the rule document may not carry itself.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadOptions {
    /// Used when the document has no `case_insensitive` flag.
    pub default_case_insensitive: bool,
    /// Translate input values through the code-list / alias tables before matching.
    pub apply_value_tables: bool,
}

/// Read and load a rule document (and optional code list) from disk.
///
/// A missing rules file is an error; a missing code-list file is not and
/// simply leaves the code mappings empty.
pub fn load_rule_set_from_paths(
    rules_path: &Path,
    code_list_path: Option<&Path>,
    options: &LoadOptions,
) -> Result<RuleSet, RulesLoadError> {
    let document = match std::fs::read(rules_path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(RulesLoadError::NotFound {
                path: rules_path.to_path_buf(),
            });
        }
        Err(source) => {
            return Err(RulesLoadError::Io {
                path: rules_path.to_path_buf(),
                source,
            });
        }
    };

    let code_list = match code_list_path {
        Some(path) => match std::fs::read(path) {
            Ok(bytes) => Some(bytes),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "Code list not present, using empty mappings");
                None
            }
            Err(source) => {
                return Err(RulesLoadError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        },
        None => None,
    };

    let rule_set = load_rule_set(&document, code_list.as_deref(), options)?;
    tracing::info!(
        path = %rules_path.display(),
        segments = rule_set.segments().len(),
        features = rule_set.features().len(),
        version = %rule_set.rule_set_version(),
        "Rule set loaded",
    );
    Ok(rule_set)
}

/// Parse and validate a rule document.
pub fn load_rule_set(
    document: &[u8],
    code_list: Option<&[u8]>,
    options: &LoadOptions,
) -> Result<RuleSet, RulesLoadError> {
    let payload: Value =
        serde_json::from_slice(document).map_err(|source| RulesLoadError::InvalidJson {
            document: "Rules file",
            source,
        })?;
    let Value::Object(payload) = payload else {
        return Err(RulesLoadError::invalid("Rules document must be a JSON object"));
    };

    // --- Intercepts and segment names ---
    let intercepts_raw = ensure_object(payload.get("intercepts"), "intercepts")?;
    let intercept_keys: Vec<String> = intercepts_raw.keys().cloned().collect();
    if intercept_keys.is_empty() {
        return Err(RulesLoadError::invalid("No intercepts found in rules"));
    }

    let raw_segments = match payload.get("segments") {
        None => &[][..],
        Some(value) => ensure_array(Some(value), "segments")?,
    };
    let names = resolve_segment_names(raw_segments, &intercept_keys);
    ensure_unique_names(&names)?;

    let mut intercepts = SegmentScores::with_capacity(intercept_keys.len());
    for (key, value) in intercepts_raw {
        let value = value
            .as_f64()
            .ok_or_else(|| RulesLoadError::invalid(format!("Intercept for '{key}' must be a number")))?;
        intercepts.insert(names[key].clone(), value);
    }

    // --- Thresholds ---
    let thresholds_raw = ensure_object(payload.get("type_thresholds"), "type_thresholds")?;
    let core = thresholds_raw.get("core_gt").and_then(Value::as_f64);
    let mid = thresholds_raw.get("mid_gt").and_then(Value::as_f64);
    let (Some(core_threshold), Some(mid_threshold)) = (core, mid) else {
        return Err(RulesLoadError::invalid(
            "type_thresholds must include numeric 'core_gt' and 'mid_gt'",
        ));
    };
    let thresholds = Thresholds {
        core_threshold,
        mid_threshold,
    };

    // --- Feature rules ---
    let expected_keys: BTreeSet<&str> = intercept_keys.iter().map(String::as_str).collect();
    let rules_raw = ensure_array(payload.get("rules"), "rules")?;
    let mut features = Vec::with_capacity(rules_raw.len());
    for rule in rules_raw {
        features.push(parse_feature(rule, &expected_keys, &names)?);
    }

    // --- Metadata ---
    let rule_set_version = resolve_version(&payload, document);
    let case_insensitive = match payload.get("case_insensitive") {
        None | Some(Value::Null) => options.default_case_insensitive,
        Some(Value::Bool(flag)) => *flag,
        Some(_) => {
            return Err(RulesLoadError::invalid("case_insensitive must be a boolean"));
        }
    };

    // --- Lookup tables ---
    let code_mappings = match code_list {
        Some(bytes) => parse_code_list(bytes)?,
        None => FieldTable::new(),
    };
    let value_aliases = match payload.get("value_aliases") {
        None | Some(Value::Null) => FieldTable::new(),
        Some(value) => parse_field_table(value, "value_aliases")?,
    };

    let rule_set = RuleSet::from_parts(
        intercepts,
        thresholds,
        features,
        rule_set_version,
        case_insensitive,
    )?;
    Ok(rule_set.with_value_tables(ValueTables {
        code_mappings,
        value_aliases,
        apply: options.apply_value_tables,
    }))
}

fn parse_feature(
    rule: &Value,
    expected_keys: &BTreeSet<&str>,
    names: &indexmap::IndexMap<String, String>,
) -> Result<FeatureRule, RulesLoadError> {
    let Value::Object(rule) = rule else {
        return Err(RulesLoadError::invalid("Each rule must be an object"));
    };

    // `crm_field` wins unless it is empty/falsy, then `input_field`.
    let input_field = rule
        .get("crm_field")
        .filter(|v| is_truthy(v))
        .or_else(|| rule.get("input_field"));
    let match_value = rule.get("match_value");
    let coefficients_raw = ensure_object(rule.get("coefficients"), "coefficients")?;

    let (Some(Value::String(input_field)), Some(Value::String(match_value))) =
        (input_field, match_value)
    else {
        return Err(RulesLoadError::invalid(
            "Each rule must include string 'crm_field'/'input_field' and 'match_value'",
        ));
    };

    let actual_keys: BTreeSet<&str> = coefficients_raw.keys().map(String::as_str).collect();
    if &actual_keys != expected_keys {
        return Err(RulesLoadError::invalid(format!(
            "Coefficients for '{input_field}' must include keys {expected_keys:?}"
        )));
    }

    let mut coefficients = SegmentScores::with_capacity(coefficients_raw.len());
    for (key, value) in coefficients_raw {
        let value = value.as_f64().ok_or_else(|| {
            RulesLoadError::invalid(format!("Coefficient for '{key}' must be a number"))
        })?;
        coefficients.insert(names[key].clone(), value);
    }

    Ok(FeatureRule::new(input_field.as_str(), match_value.as_str(), coefficients))
}

/// Explicit `rule_set_version`, then `version`, then the content fingerprint.
fn resolve_version(payload: &Map<String, Value>, document: &[u8]) -> String {
    ["rule_set_version", "version"]
        .iter()
        .filter_map(|key| payload.get(*key).and_then(Value::as_str))
        .find(|v| !v.is_empty())
        .map_or_else(|| sha256_hex(document), str::to_string)
}

fn ensure_unique_names(names: &indexmap::IndexMap<String, String>) -> Result<(), RulesLoadError> {
    let mut seen = BTreeSet::new();
    for name in names.values() {
        if !seen.insert(name.as_str()) {
            return Err(RulesLoadError::invalid(format!(
                "Segment name '{name}' is used by more than one intercept key"
            )));
        }
    }
    Ok(())
}

fn ensure_object<'a>(
    value: Option<&'a Value>,
    field_name: &str,
) -> Result<&'a Map<String, Value>, RulesLoadError> {
    value
        .and_then(Value::as_object)
        .ok_or_else(|| RulesLoadError::invalid(format!("Expected '{field_name}' to be an object")))
}

fn ensure_array<'a>(value: Option<&'a Value>, field_name: &str) -> Result<&'a [Value], RulesLoadError> {
    value
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .ok_or_else(|| RulesLoadError::invalid(format!("Expected '{field_name}' to be an array")))
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}
