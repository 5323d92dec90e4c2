//! Internal helpers for model validation and conversion.
//!
//! These utilities are **not** part of the public API.

use uuid::Uuid;

use crate::{EngineError, ResultEngine};

/// Parse a UUID from storage and return a labeled error on failure.
pub(crate) fn parse_uuid(value: &str, label: &str) -> ResultEngine<Uuid> {
    Uuid::parse_str(value).map_err(|_| EngineError::InvalidId(format!("invalid {label} id")))
}

/// Parse a JSON array of strings stored in a text column.
pub(crate) fn parse_string_list(value: &str, label: &str) -> ResultEngine<Vec<String>> {
    if value.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(value)
        .map_err(|_| EngineError::InvalidId(format!("invalid {label} list")))
}

/// Serialize a list of strings for a text column.
pub(crate) fn encode_string_list(values: &[String]) -> String {
    serde_json::to_string(values).unwrap_or_else(|_| "[]".to_string())
}

pub(crate) fn normalize_optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_list_round_trip() {
        let values = vec!["food".to_string(), "clothing".to_string()];
        let encoded = encode_string_list(&values);

        assert_eq!(parse_string_list(&encoded, "tags").unwrap(), values);
        assert!(parse_string_list("", "tags").unwrap().is_empty());
        assert!(parse_string_list("not json", "tags").is_err());
    }

    #[test]
    fn optional_text_trims_and_drops_empty() {
        assert_eq!(normalize_optional_text(Some("  x ")), Some("x".to_string()));
        assert_eq!(normalize_optional_text(Some("   ")), None);
        assert_eq!(normalize_optional_text(None), None);
    }
}
