//! Response envelope returned by the record API

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One row of a table, keyed by field name
pub type Record = Map<String, Value>;

/// `{ success, message?, data?, results? }`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub results: Option<Vec<RecordOutcome>>,
}

impl<T> Envelope<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
            results: None,
        }
    }

    pub fn with_results(results: Vec<RecordOutcome>) -> Self {
        Self {
            success: true,
            message: None,
            data: None,
            results: Some(results),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            data: None,
            results: None,
        }
    }
}

/// Per-record result of a multi-record write
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordOutcome {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Record>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<FieldError>,
}

impl RecordOutcome {
    pub fn saved(data: Record) -> Self {
        Self {
            success: true,
            data: Some(data),
            ..Default::default()
        }
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            ..Default::default()
        }
    }

    /// User-facing messages for a failed record: one per field error, then the record message
    pub fn notices(&self) -> Vec<String> {
        let mut notices: Vec<String> = self.errors.iter().map(FieldError::to_string).collect();
        if let Some(message) = self.message.as_deref().filter(|m| !m.is_empty()) {
            notices.push(message.to_string());
        }
        notices
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldError {
    pub field_label: String,
    pub message: String,
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field_label, self.message)
    }
}

/// Body of create and update requests
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WritePayload {
    pub records: Vec<Record>,
}

/// Body of delete requests
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeletePayload {
    #[serde(rename = "RecordIds")]
    pub record_ids: Vec<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_partial_write_response() {
        let envelope: Envelope<Value> = serde_json::from_value(json!({
            "success": true,
            "results": [
                {"success": true, "data": {"Id": 4}},
                {"success": false, "message": "Duplicate", "errors": [
                    {"fieldLabel": "Amount", "message": "must be positive"}
                ]}
            ]
        }))
        .unwrap();

        let results = envelope.results.unwrap();
        assert!(results[0].success);
        assert_eq!(
            results[1].notices(),
            vec!["Amount: must be positive".to_string(), "Duplicate".to_string()]
        );
    }

    #[derive(Debug, Deserialize)]
    struct Row {
        #[serde(rename = "Id")]
        id: i64,
    }

    fn decode<T: serde::de::DeserializeOwned>(value: Value) -> Envelope<T> {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn payload_type_needs_no_default() {
        let envelope: Envelope<Row> = decode(json!({"success": true, "data": {"Id": 3}}));
        assert_eq!(envelope.data.unwrap().id, 3);
        let empty: Envelope<Row> = decode(json!({"success": false, "message": "offline"}));
        assert!(empty.data.is_none());
        assert_eq!(empty.message.as_deref(), Some("offline"));
    }

    #[test]
    fn delete_payload_shape() {
        let value = serde_json::to_value(DeletePayload { record_ids: vec![7] }).unwrap();
        assert_eq!(value, json!({"RecordIds": [7]}));
    }
}
