use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::recipe::DrinkType;

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrderId(pub String);

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl OrderId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrderItemId(pub String);

impl fmt::Display for OrderItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl OrderItemId {
    pub fn for_drink(order_id: &OrderId, drink_type: DrinkType) -> Self {
        Self(format!("{}-{}", order_id.0, drink_type.key()))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    pub id: OrderItemId,
    pub drink_type: DrinkType,
    pub quantity: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerOrder {
    pub id: OrderId,
    pub customer_name: String,
    pub items: Vec<OrderItem>,
}

impl CustomerOrder {
    pub fn item_for(&self, drink_type: DrinkType) -> Option<&OrderItem> {
        self.items.iter().find(|item| item.drink_type == drink_type)
    }
}
