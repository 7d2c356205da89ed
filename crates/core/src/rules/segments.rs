//! Intercept key -> segment display name resolution.

use std::collections::HashMap;

use indexmap::IndexMap;
use serde_json::Value;

/// Resolve each intercept key to the display name used throughout the rule set.
///
/// `raw_segments` is the document's `segments` array. Object entries of the
/// form `{"id": <int>, "name": <string>}` build an id table; a key `seg<N>`
/// resolves to the name registered for id `N`. Every other key (and any
/// `seg<N>` without a matching id) resolves to itself. Plain string entries
/// do not rename anything.
pub fn resolve_segment_names(raw_segments: &[Value], intercept_keys: &[String]) -> IndexMap<String, String> {
    let mut id_to_name: HashMap<i64, &str> = HashMap::new();
    for segment in raw_segments {
        if let Value::Object(obj) = segment {
            let id = obj.get("id").and_then(Value::as_i64);
            let name = obj.get("name").and_then(Value::as_str);
            if let (Some(id), Some(name)) = (id, name) {
                id_to_name.insert(id, name);
            }
        }
    }

    intercept_keys
        .iter()
        .map(|key| {
            let name = segment_id(key)
                .and_then(|id| id_to_name.get(&id))
                .map_or_else(|| key.clone(), |name| (*name).to_string());
            (key.clone(), name)
        })
        .collect()
}

/// Parse the numeric id out of a `seg<digits>` key.
fn segment_id(key: &str) -> Option<i64> {
    let digits = key.strip_prefix("seg")?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn keys(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn seg_keys_resolve_through_id_table() {
        let raw = vec![
            json!({"id": 1, "name": "Segment A"}),
            json!({"id": 2, "name": "Segment B"}),
        ];
        let names = resolve_segment_names(&raw, &keys(&["seg1", "seg2"]));
        assert_eq!(names["seg1"], "Segment A");
        assert_eq!(names["seg2"], "Segment B");
    }

    #[test]
    fn unmatched_and_plain_keys_resolve_to_themselves() {
        let raw = vec![json!("Alpha"), json!({"id": 9, "name": "Nine"})];
        let names = resolve_segment_names(&raw, &keys(&["Alpha", "seg3", "segx", "seg"]));
        assert_eq!(names["Alpha"], "Alpha");
        assert_eq!(names["seg3"], "seg3");
        assert_eq!(names["segx"], "segx");
        assert_eq!(names["seg"], "seg");
    }

    #[test]
    fn leading_zeros_still_match_id() {
        let raw = vec![json!({"id": 7, "name": "Seven"})];
        let names = resolve_segment_names(&raw, &keys(&["seg07"]));
        assert_eq!(names["seg07"], "Seven");
    }

    #[test]
    fn malformed_segment_objects_are_ignored() {
        let raw = vec![json!({"id": "1", "name": "Str Id"}), json!({"id": 1})];
        let names = resolve_segment_names(&raw, &keys(&["seg1"]));
        assert_eq!(names["seg1"], "seg1");
    }

    #[test]
    fn preserves_intercept_key_order() {
        let names = resolve_segment_names(&[], &keys(&["b", "a", "c"]));
        let order: Vec<&str> = names.keys().map(String::as_str).collect();
        assert_eq!(order, ["b", "a", "c"]);
    }
}
