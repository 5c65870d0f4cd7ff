use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Backend identifiers are usually numeric, but nothing here depends on that.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Number(i64),
    Text(String),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Number(n) => write!(f, "{}", n),
            RecordId::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for RecordId {
    fn from(value: i64) -> Self {
        RecordId::Number(value)
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        RecordId::Text(value.to_string())
    }
}

/// A backend row whose schema this client does not interpret.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Record {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.to_string(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_record_keeps_unknown_fields() {
        let record: Record = serde_json::from_value(json!({
            "id": 7,
            "numero": 3,
            "capacidad": 4
        }))
        .unwrap();

        assert_eq!(record.id, Some(RecordId::Number(7)));
        assert_eq!(record.get("capacidad"), Some(&json!(4)));
        assert_eq!(serde_json::to_value(&record).unwrap()["numero"], json!(3));
    }

    #[test]
    fn test_new_record_omits_id() {
        let record = Record::new().with("nombre", "Bebidas");
        let value = serde_json::to_value(&record).unwrap();
        assert!(value.get("id").is_none());
        assert_eq!(value["nombre"], json!("Bebidas"));
    }

    #[test]
    fn test_text_ids() {
        let id: RecordId = serde_json::from_value(json!("a1b2")).unwrap();
        assert_eq!(id, RecordId::from("a1b2"));
        assert_eq!(id.to_string(), "a1b2");
    }
}
