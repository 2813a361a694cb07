//! Request DTOs for the cache server API
//!
//! Defines the structure of incoming HTTP request parameters and bodies.

use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;

/// Query parameters for the list operation (GET /v1/keys)
///
/// Both parameters are optional; the default is the full, unpaginated key
/// sequence in insertion order.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListParams {
    /// Number of keys to skip from the front of the sequence
    #[serde(default)]
    pub offset: Option<usize>,
    /// Maximum number of keys to return
    #[serde(default)]
    pub limit: Option<usize>,
}

/// Converts a form-encoded request body into the opaque value payload.
///
/// Each form field becomes a string member of a JSON object, mirroring how
/// an urlencoded body parser presents the payload.
pub fn form_fields_to_value(fields: HashMap<String, String>) -> Value {
    Value::Object(
        fields
            .into_iter()
            .map(|(name, text)| (name, Value::String(text)))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_list_params_defaults() {
        let params: ListParams = serde_json::from_value(json!({})).unwrap();
        assert!(params.offset.is_none());
        assert!(params.limit.is_none());
    }

    #[test]
    fn test_list_params_deserialize_both() {
        let params: ListParams = serde_json::from_value(json!({"offset": 2, "limit": 10})).unwrap();
        assert_eq!(params.offset, Some(2));
        assert_eq!(params.limit, Some(10));
    }

    #[test]
    fn test_form_fields_to_value() {
        let mut fields = HashMap::new();
        fields.insert("color".to_string(), "green".to_string());
        fields.insert("size".to_string(), "42".to_string());

        let value = form_fields_to_value(fields);
        assert_eq!(value, json!({"color": "green", "size": "42"}));
    }

    #[test]
    fn test_form_fields_to_value_empty_body() {
        let value = form_fields_to_value(HashMap::new());
        assert_eq!(value, json!({}));
    }
}
