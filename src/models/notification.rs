use serde::{Deserialize, Serialize};

use super::common::RecordId;

pub type NotificationId = RecordId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: NotificationId,
    #[serde(rename = "descripcion")]
    pub description: String,
    /// `true` while the notification still waits for staff.
    #[serde(rename = "estado")]
    pub pending: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateNotification {
    #[serde(rename = "descripcion")]
    pub description: String,
    #[serde(rename = "estado", default = "default_pending")]
    pub pending: bool,
}

fn default_pending() -> bool {
    true
}

impl CreateNotification {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            pending: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_wire_shape() {
        let list: Vec<Notification> = serde_json::from_value(json!([
            { "id": 1, "descripcion": "Mesa 3 pide la cuenta", "estado": true },
            { "id": 2, "descripcion": "Vieja", "estado": false }
        ]))
        .unwrap();

        assert_eq!(list.len(), 2);
        assert_eq!(list[0].id, RecordId::Number(1));
        assert_eq!(list[0].description, "Mesa 3 pide la cuenta");
        assert!(list[0].pending);
        assert!(!list[1].pending);
    }

    #[test]
    fn test_create_payload() {
        let body = serde_json::to_value(CreateNotification::new("Mesa 5 llama al mesero")).unwrap();
        assert_eq!(body, json!({ "descripcion": "Mesa 5 llama al mesero", "estado": true }));
    }
}
