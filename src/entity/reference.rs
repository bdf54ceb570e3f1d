//! Foreign-key reference
//!
//! The backend sends reference fields either as a bare id (`3`, `"3"`) or
//! expanded (`{"Id": 3, "Name": "Jane Doe"}`). Both shapes normalize into
//! [`Reference`] at deserialization time.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::coerce::parse_int;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Reference {
    #[serde(rename = "Id")]
    pub id: Option<i64>,
    #[serde(rename = "Name", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Reference {
    pub fn to(id: i64) -> Self {
        Self {
            id: Some(id),
            name: None,
        }
    }

    pub fn named(id: i64, name: impl Into<String>) -> Self {
        Self {
            id: Some(id),
            name: Some(name.into()),
        }
    }

    pub fn is_set(&self) -> bool {
        self.id.is_some()
    }

    /// Embedded display name sent by the backend, if any
    pub fn embedded_name(&self) -> Option<&str> {
        self.name.as_deref().filter(|n| !n.trim().is_empty())
    }

    /// Id as editable text ("" when unset)
    pub fn id_text(&self) -> String {
        self.id.map(|id| id.to_string()).unwrap_or_default()
    }

    fn from_value(value: &Value) -> Self {
        match value {
            Value::Number(n) => Self {
                id: n.as_i64(),
                name: None,
            },
            Value::String(s) => Self {
                id: parse_int(s),
                name: None,
            },
            Value::Object(map) => {
                let inner = map.get("Id").map(Self::from_value).unwrap_or_default();
                Self {
                    id: inner.id,
                    name: map.get("Name").and_then(Value::as_str).map(str::to_string),
                }
            }
            _ => Self::default(),
        }
    }
}

impl<'de> Deserialize<'de> for Reference {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(Self::from_value(&value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn accepts_both_shapes() {
        let bare: Reference = serde_json::from_value(json!(3)).unwrap();
        let text: Reference = serde_json::from_value(json!("3")).unwrap();
        let expanded: Reference = serde_json::from_value(json!({"Id": 3, "Name": "Jane Doe"})).unwrap();
        let null: Reference = serde_json::from_value(json!(null)).unwrap();

        assert_eq!(bare, Reference::to(3));
        assert_eq!(text, Reference::to(3));
        assert_eq!(expanded, Reference::named(3, "Jane Doe"));
        assert!(!null.is_set());
        assert_eq!(expanded.embedded_name(), Some("Jane Doe"));
        assert_eq!(null.id_text(), "");
    }
}
