//! Parsing of the field-keyed lookup tables (code list, value aliases).

use indexmap::IndexMap;
use serde_json::Value;

use super::model::FieldTable;
use crate::error::RulesLoadError;

/// Parse the companion code-list document.
///
/// Shape: `{ "<field>": { "<raw code>": "<label>", ... }, ... }`.
pub fn parse_code_list(bytes: &[u8]) -> Result<FieldTable, RulesLoadError> {
    let payload: Value =
        serde_json::from_slice(bytes).map_err(|source| RulesLoadError::InvalidJson {
            document: "Code list",
            source,
        })?;
    parse_field_table(&payload, "Code list")
}

/// Validate an already-parsed field table.
///
/// The top level and every field entry must be objects. Inside a field
/// entry, pairs whose value is not a string are skipped.
pub fn parse_field_table(payload: &Value, what: &str) -> Result<FieldTable, RulesLoadError> {
    let Value::Object(fields) = payload else {
        return Err(RulesLoadError::invalid(format!("{what} must be a JSON object")));
    };

    let mut table = FieldTable::new();
    for (field, entries) in fields {
        let Value::Object(entries) = entries else {
            return Err(RulesLoadError::invalid(format!(
                "{what} entry for '{field}' must be an object"
            )));
        };

        let mut mapping = IndexMap::with_capacity(entries.len());
        for (raw, label) in entries {
            match label.as_str() {
                Some(label) => {
                    mapping.insert(raw.clone(), label.to_string());
                }
                None => {
                    tracing::debug!(table = what, field = %field, code = %raw, "Skipping non-string mapping value");
                }
            }
        }
        table.insert(field.clone(), mapping);
    }
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn parses_nested_mappings() {
        let table = parse_code_list(br#"{"tier": {"G": "Gold", "S": "Silver"}}"#).unwrap();
        assert_eq!(table["tier"]["G"], "Gold");
        assert_eq!(table["tier"].len(), 2);
    }

    #[test]
    fn skips_non_string_values() {
        let table = parse_code_list(br#"{"tier": {"G": "Gold", "X": 5, "N": null}}"#).unwrap();
        assert_eq!(table["tier"].len(), 1);
    }

    #[test]
    fn rejects_invalid_json() {
        let err = parse_code_list(b"{not json").unwrap_err();
        assert_matches!(err, RulesLoadError::InvalidJson { document: "Code list", .. });
    }

    #[test]
    fn rejects_non_object_top_level() {
        let err = parse_code_list(b"[1, 2]").unwrap_err();
        assert_matches!(err, RulesLoadError::Invalid(_));
    }

    #[test]
    fn rejects_non_object_field_entry() {
        let err = parse_code_list(br#"{"tier": ["G"]}"#).unwrap_err();
        assert!(err.to_string().contains("'tier'"));
    }
}
