use replay_log::ResourceId;
use serde::Serialize;

#[derive(Serialize, Debug, Copy, Clone, Eq, PartialEq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Received,
    Completed,
    Canceled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Received => "RECEIVED",
            OrderStatus::Completed => "COMPLETED",
            OrderStatus::Canceled => "CANCELED",
        }
    }
}

#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemRequest {
    pub product_id: ResourceId,
    pub quantity: u32,
}

#[derive(Serialize, Debug, Clone)]
pub struct OrderCreateRequest {
    pub items: Vec<OrderItemRequest>,
}

#[derive(Serialize, Debug, Clone)]
pub struct OrderStatusUpdateRequest {
    pub status: OrderStatus,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn order_items_keep_id_types() {
        let request = OrderCreateRequest {
            items: vec![
                OrderItemRequest {
                    product_id: ResourceId::from(1u64),
                    quantity: 2,
                },
                OrderItemRequest {
                    product_id: ResourceId::from("p-2"),
                    quantity: 1,
                },
            ],
        };

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"items": [{"productId": 1, "quantity": 2}, {"productId": "p-2", "quantity": 1}]})
        );
    }

    #[test]
    fn status_update_uses_api_names() {
        let request = OrderStatusUpdateRequest {
            status: OrderStatus::Canceled,
        };

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"status": "CANCELED"})
        );
        assert_eq!(OrderStatus::Completed.as_str(), "COMPLETED");
    }
}
