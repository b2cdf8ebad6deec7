use thiserror::Error;

use crate::domain::order::{OrderId, OrderItemId};
use crate::domain::product::ProductId;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("unknown recipe `{0}`")]
    UnknownRecipe(String),
    #[error("order `{0}` not found")]
    OrderNotFound(OrderId),
    #[error("order item `{item_id}` not found in order `{order_id}`")]
    OrderItemNotFound { order_id: OrderId, item_id: OrderItemId },
    #[error("product `{0}` not found")]
    ProductNotFound(ProductId),
    #[error("domain invariant violation: {0}")]
    InvariantViolation(String),
}

#[cfg(test)]
mod tests {
    use crate::domain::order::{OrderId, OrderItemId};
    use crate::domain::product::ProductId;
    use crate::errors::DomainError;

    #[test]
    fn missing_item_names_both_ids() {
        let error = DomainError::OrderItemNotFound {
            order_id: OrderId("o-1".to_owned()),
            item_id: OrderItemId("o-1-cold-brew".to_owned()),
        };

        assert_eq!(error.to_string(), "order item `o-1-cold-brew` not found in order `o-1`");
    }

    #[test]
    fn lookup_failures_quote_the_offending_key() {
        assert_eq!(
            DomainError::UnknownRecipe("mango-lassi".to_owned()).to_string(),
            "unknown recipe `mango-lassi`"
        );
        assert_eq!(
            DomainError::ProductNotFound(ProductId("kombucha".to_owned())).to_string(),
            "product `kombucha` not found"
        );
    }
}
