use async_trait::async_trait;
use thiserror::Error;

use bottler_core::domain::product::Product;

pub mod memory;
pub mod product;

pub use memory::InMemoryProductRepository;
pub use product::{SqlProductRepository, PRODUCTS_STORAGE_KEY};

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("decode error: {0}")]
    Decode(String),
}

/// Whole-list persistence for the product table.
///
/// `load` returns an empty list when nothing has been saved yet. `save`
/// replaces whatever was stored before.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn load(&self) -> Result<Vec<Product>, RepositoryError>;
    async fn save(&self, products: &[Product]) -> Result<(), RepositoryError>;
}
