//! Value normalization shared by rule matching.
//!
//! Input records carry arbitrary JSON, so every value is reduced to a
//! trimmed string before comparison. Match values from the rule document go
//! through the same function, which keeps both sides of the comparison in
//! one form.

use serde_json::Value;

/// Render a JSON value as the string compared against a rule's match value.
///
/// Strings are used verbatim (not quoted). Booleans render as `True` /
/// `False`, the spelling existing rule files use. Numbers, arrays and
/// objects use their compact JSON form. `null` has no string form.
pub fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(true) => Some("True".to_string()),
        Value::Bool(false) => Some("False".to_string()),
        other => Some(other.to_string()),
    }
}

/// Trim surrounding whitespace and, when `case_insensitive`, lower-case.
pub fn fold_text(text: &str, case_insensitive: bool) -> String {
    let trimmed = text.trim();
    if case_insensitive {
        trimmed.to_lowercase()
    } else {
        trimmed.to_string()
    }
}

/// Normalize an optional record value. Absent and `null` both yield `None`.
pub fn normalize_value(value: Option<&Value>, case_insensitive: bool) -> Option<String> {
    value
        .and_then(value_text)
        .map(|text| fold_text(&text, case_insensitive))
}

/// Round to `decimals` places, half away from zero.
///
/// Values too large to scale without overflowing are returned unchanged.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    let scaled = value * factor;
    if !scaled.is_finite() {
        return value;
    }
    scaled.round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn absent_and_null_have_no_form() {
        assert_eq!(normalize_value(None, false), None);
        assert_eq!(normalize_value(Some(&Value::Null), true), None);
    }

    #[test]
    fn strings_are_trimmed() {
        let v = json!("  Active \n");
        assert_eq!(normalize_value(Some(&v), false).as_deref(), Some("Active"));
    }

    #[test]
    fn case_folding_only_when_requested() {
        let v = json!("GoLd");
        assert_eq!(normalize_value(Some(&v), false).as_deref(), Some("GoLd"));
        assert_eq!(normalize_value(Some(&v), true).as_deref(), Some("gold"));
    }

    #[test]
    fn scalars_use_json_form() {
        assert_eq!(value_text(&json!(42)).as_deref(), Some("42"));
        assert_eq!(value_text(&json!(1.5)).as_deref(), Some("1.5"));
        assert_eq!(value_text(&json!([1, "a"])).as_deref(), Some(r#"[1,"a"]"#));
    }

    #[test]
    fn booleans_render_capitalized() {
        assert_eq!(value_text(&json!(true)).as_deref(), Some("True"));
        assert_eq!(value_text(&json!(false)).as_deref(), Some("False"));
        assert_eq!(normalize_value(Some(&json!(true)), true).as_deref(), Some("true"));
    }

    #[test]
    fn rounds_to_four_places() {
        assert_eq!(round_to(1.234_56, 4), 1.2346);
        assert_eq!(round_to(-0.333_33, 4), -0.3333);
        assert_eq!(round_to(2.0, 4), 2.0);
    }

    #[test]
    fn huge_values_pass_through_rounding() {
        assert_eq!(round_to(1e308, 4), 1e308);
        assert_eq!(round_to(-1e308, 4), -1e308);
    }
}
