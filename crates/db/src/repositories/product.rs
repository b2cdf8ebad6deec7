use chrono::Utc;
use sqlx::Row;

use bottler_core::domain::product::Product;

use super::{ProductRepository, RepositoryError};
use crate::DbPool;

/// Key under which the product table is stored as one JSON document.
pub const PRODUCTS_STORAGE_KEY: &str = "bottledDrinksProducts";

pub struct SqlProductRepository {
    pool: DbPool,
}

impl SqlProductRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl ProductRepository for SqlProductRepository {
    async fn load(&self) -> Result<Vec<Product>, RepositoryError> {
        let row = sqlx::query("SELECT value FROM kv_store WHERE key = ?")
            .bind(PRODUCTS_STORAGE_KEY)
            .fetch_optional(&self.pool)
            .await?;

        let Some(row) = row else {
            return Ok(Vec::new());
        };

        let raw: String = row.try_get("value")?;
        serde_json::from_str(&raw).map_err(|error| {
            RepositoryError::Decode(format!("stored products are not valid JSON: {error}"))
        })
    }

    async fn save(&self, products: &[Product]) -> Result<(), RepositoryError> {
        let value = serde_json::to_string(products)
            .map_err(|error| RepositoryError::Decode(error.to_string()))?;

        sqlx::query(
            r#"
            INSERT INTO kv_store (key, value, updated_at) VALUES (?, ?, ?)
            ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at
            "#,
        )
        .bind(PRODUCTS_STORAGE_KEY)
        .bind(value)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
