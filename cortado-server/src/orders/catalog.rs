//! Catalog lookup port
//!
//! The order builder resolves prices through this trait rather than
//! touching product storage directly, so validation logic stays
//! testable against a fixture catalog.

use async_trait::async_trait;
use sqlx::SqlitePool;

use super::error::{OrderError, OrderResult};

/// Price and availability of one product at lookup time
#[derive(Debug, Clone, Copy)]
pub struct ResolvedProduct {
    /// Price in minor currency units
    pub unit_price: i64,
    pub is_available: bool,
}

/// Read-only catalog access for order validation
///
/// `Ok(None)` means the product does not exist; callers treat that the
/// same as an unavailable product. Errors are storage failures only.
#[async_trait]
pub trait CatalogLookup: Send + Sync {
    async fn resolve(&self, product_id: i64) -> OrderResult<Option<ResolvedProduct>>;
}

/// Catalog backed by the products table
pub struct SqliteCatalog {
    pool: SqlitePool,
}

impl SqliteCatalog {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CatalogLookup for SqliteCatalog {
    async fn resolve(&self, product_id: i64) -> OrderResult<Option<ResolvedProduct>> {
        let row: Option<(i64, bool)> =
            sqlx::query_as("SELECT price, is_available FROM products WHERE id = ?")
                .bind(product_id)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| OrderError::Storage(e.into()))?;

        Ok(row.map(|(unit_price, is_available)| ResolvedProduct {
            unit_price,
            is_available,
        }))
    }
}
