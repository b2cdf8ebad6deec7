use tracing::{error, info};

use bottler_core::products::ProductList;

use crate::repositories::ProductRepository;

/// Best-effort persistence in front of a [`ProductRepository`].
///
/// Storage problems never reach the caller: a failed or malformed load yields
/// an empty list and a failed save is logged and dropped.
pub struct ProductStore<R> {
    repository: R,
}

impl<R: ProductRepository> ProductStore<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    pub async fn load(&self) -> ProductList {
        match self.repository.load().await {
            Ok(products) => ProductList::new(products),
            Err(err) => {
                error!(
                    event_name = "products.load.failed",
                    error = %err,
                    "could not load products; starting with an empty list"
                );
                ProductList::default()
            }
        }
    }

    pub async fn save(&self, products: &ProductList) {
        match self.repository.save(products.products()).await {
            Ok(()) => info!(
                event_name = "products.saved",
                product_count = products.products().len(),
                "products saved"
            ),
            Err(err) => error!(
                event_name = "products.save.failed",
                error = %err,
                "could not save products"
            ),
        }
    }
}
