use serde::{Deserialize, Serialize};
use tracing::info;

use crate::calc::catalog::Catalog;
use crate::confirm::ConfirmationPrompt;
use crate::domain::order::{CustomerOrder, OrderId, OrderItem, OrderItemId};
use crate::domain::recipe::DrinkType;
use crate::errors::DomainError;

pub const RESET_ORDERS_PROMPT: &str = "Are you sure you want to clear all orders?";

/// Parses a quantity the way a numeric form field would: leading whitespace,
/// an optional sign, then the leading run of digits. Anything unparseable
/// becomes 0, negatives clamp to 0, and overflow saturates.
pub fn parse_quantity(raw: &str) -> u32 {
    match parse_leading_int(raw) {
        Some(value) if value > 0 => u32::try_from(value).unwrap_or(u32::MAX),
        _ => 0,
    }
}

/// Signed leading-integer parse; `None` when no digits lead the input.
pub fn parse_leading_int(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digit_count = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digit_count == 0 {
        return None;
    }

    let magnitude = rest[..digit_count].parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -magnitude } else { magnitude })
}

/// The calculator's order list.
///
/// Every update returns a new book and leaves the receiver untouched, so a
/// caller holding an older book never observes a later edit.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderBook {
    orders: Vec<CustomerOrder>,
}

impl OrderBook {
    pub fn new(orders: Vec<CustomerOrder>) -> Self {
        Self { orders }
    }

    pub fn orders(&self) -> &[CustomerOrder] {
        &self.orders
    }

    pub fn find(&self, order_id: &OrderId) -> Option<&CustomerOrder> {
        self.orders.iter().find(|order| &order.id == order_id)
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// Appends an order with one zero-quantity item per catalog recipe.
    #[must_use]
    pub fn with_new_order(&self, catalog: &Catalog, customer_name: impl Into<String>) -> Self {
        let id = OrderId::generate();
        let items = catalog
            .recipes()
            .map(|recipe| OrderItem {
                id: OrderItemId::for_drink(&id, recipe.product_id),
                drink_type: recipe.product_id,
                quantity: 0,
            })
            .collect();

        let mut orders = self.orders.clone();
        orders.push(CustomerOrder { id, customer_name: customer_name.into(), items });
        Self { orders }
    }

    pub fn with_customer_name(
        &self,
        order_id: &OrderId,
        customer_name: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let customer_name = customer_name.into();
        self.map_order(order_id, |order| {
            Ok(CustomerOrder { customer_name: customer_name.clone(), ..order.clone() })
        })
    }

    pub fn with_item_quantity(
        &self,
        order_id: &OrderId,
        item_id: &OrderItemId,
        quantity: u32,
    ) -> Result<Self, DomainError> {
        self.map_order(order_id, |order| {
            if !order.items.iter().any(|item| &item.id == item_id) {
                return Err(DomainError::OrderItemNotFound {
                    order_id: order.id.clone(),
                    item_id: item_id.clone(),
                });
            }

            let items = order
                .items
                .iter()
                .map(|item| {
                    if &item.id == item_id {
                        OrderItem { quantity, ..item.clone() }
                    } else {
                        item.clone()
                    }
                })
                .collect();
            Ok(CustomerOrder { items, ..order.clone() })
        })
    }

    /// Quantity update from raw user input; see [`parse_quantity`].
    pub fn with_item_quantity_input(
        &self,
        order_id: &OrderId,
        item_id: &OrderItemId,
        raw: &str,
    ) -> Result<Self, DomainError> {
        self.with_item_quantity(order_id, item_id, parse_quantity(raw))
    }

    pub fn with_drink_quantity(
        &self,
        order_id: &OrderId,
        drink_type: DrinkType,
        quantity: u32,
    ) -> Result<Self, DomainError> {
        let order =
            self.find(order_id).ok_or_else(|| DomainError::OrderNotFound(order_id.clone()))?;
        let item_id = order
            .item_for(drink_type)
            .map(|item| item.id.clone())
            .unwrap_or_else(|| OrderItemId::for_drink(order_id, drink_type));
        self.with_item_quantity(order_id, &item_id, quantity)
    }

    pub fn without_order(&self, order_id: &OrderId) -> Result<Self, DomainError> {
        if self.find(order_id).is_none() {
            return Err(DomainError::OrderNotFound(order_id.clone()));
        }

        Ok(Self {
            orders: self.orders.iter().filter(|order| &order.id != order_id).cloned().collect(),
        })
    }

    /// Clears every order once `prompt` agrees; a declined prompt keeps the book.
    #[must_use]
    pub fn reset(&self, prompt: &dyn ConfirmationPrompt) -> Self {
        if !prompt.confirm(RESET_ORDERS_PROMPT) {
            info!(
                event_name = "orders.reset.declined",
                order_count = self.orders.len(),
                "order reset declined"
            );
            return self.clone();
        }

        info!(event_name = "orders.reset", order_count = self.orders.len(), "orders cleared");
        Self::default()
    }

    fn map_order<F>(&self, order_id: &OrderId, update: F) -> Result<Self, DomainError>
    where
        F: Fn(&CustomerOrder) -> Result<CustomerOrder, DomainError>,
    {
        if self.find(order_id).is_none() {
            return Err(DomainError::OrderNotFound(order_id.clone()));
        }

        let orders = self
            .orders
            .iter()
            .map(|order| if &order.id == order_id { update(order) } else { Ok(order.clone()) })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { orders })
    }
}
