use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::common::RecordId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRef {
    pub id: RecordId,
}

/// One line of an order. The backend links it to its order through `pedido`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderDetail {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    #[serde(rename = "pedido", default, skip_serializing_if = "Option::is_none")]
    pub order: Option<OrderRef>,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl OrderDetail {
    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.to_string(), value.into());
        self
    }

    pub fn for_order(mut self, order_id: RecordId) -> Self {
        self.order = Some(OrderRef { id: order_id });
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_detail_links_to_order() {
        let detail = OrderDetail::default()
            .with("cantidad", 2)
            .for_order(RecordId::Number(41));

        assert_eq!(
            serde_json::to_value(&detail).unwrap(),
            json!({ "cantidad": 2, "pedido": { "id": 41 } })
        );
    }
}
