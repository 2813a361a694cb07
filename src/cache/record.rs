//! Cache Record Module
//!
//! Defines the structure for individual cached records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

// == Cache Record ==
/// A single cached key/value pair.
///
/// The key is unique within the store and immutable once created; a replace
/// swaps `value` and `last_modified`, never the key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Record {
    /// Unique key identifying the record
    pub key: String,
    /// Opaque payload supplied by the caller or synthesized on miss
    pub value: Value,
    /// Last create/update time, stamped by the engine, never by callers
    pub last_modified: DateTime<Utc>,
}

impl Record {
    // == Constructor ==
    /// Creates a new record stamped with the current time.
    pub fn new(key: impl Into<String>, value: Value) -> Self {
        Self {
            key: key.into(),
            value,
            last_modified: Utc::now(),
        }
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_record_new() {
        let record = Record::new("key1", json!("value1"));

        assert_eq!(record.key, "key1");
        assert_eq!(record.value, json!("value1"));
        assert!(record.last_modified <= Utc::now());
    }

    #[test]
    fn test_record_structured_value() {
        let record = Record::new("key1", json!({"color": "green", "count": 3}));

        assert_eq!(record.value["color"], "green");
        assert_eq!(record.value["count"], 3);
    }

    #[test]
    fn test_record_serialize_round_trip() {
        let record = Record::new("key1", json!("value1"));

        let encoded = serde_json::to_string(&record).unwrap();
        let decoded: Record = serde_json::from_str(&encoded).unwrap();

        assert_eq!(decoded.key, record.key);
        assert_eq!(decoded.value, record.value);
        assert_eq!(decoded.last_modified, record.last_modified);
    }
}
