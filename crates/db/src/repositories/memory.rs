use tokio::sync::RwLock;

use bottler_core::domain::product::Product;

use super::{ProductRepository, RepositoryError};

#[derive(Default)]
pub struct InMemoryProductRepository {
    products: RwLock<Option<Vec<Product>>>,
}

impl InMemoryProductRepository {
    pub fn with_products(products: Vec<Product>) -> Self {
        Self { products: RwLock::new(Some(products)) }
    }
}

#[async_trait::async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn load(&self) -> Result<Vec<Product>, RepositoryError> {
        let products = self.products.read().await;
        Ok(products.clone().unwrap_or_default())
    }

    async fn save(&self, products: &[Product]) -> Result<(), RepositoryError> {
        let mut stored = self.products.write().await;
        *stored = Some(products.to_vec());
        Ok(())
    }
}
