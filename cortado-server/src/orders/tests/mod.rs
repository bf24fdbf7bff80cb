use std::collections::HashMap;

use async_trait::async_trait;
use shared::models::{CartLine, OrderCreate};
use sqlx::SqlitePool;

use super::*;
use crate::db::DbService;


// ========================================================================
// Fixtures
// ========================================================================

/// In-memory catalog fixture for builder tests
struct StaticCatalog {
    products: HashMap<i64, ResolvedProduct>,
    fail: bool,
}

impl StaticCatalog {
    fn new() -> Self {
        Self {
            products: HashMap::new(),
            fail: false,
        }
    }

    fn with(mut self, product_id: i64, unit_price: i64, is_available: bool) -> Self {
        self.products.insert(
            product_id,
            ResolvedProduct {
                unit_price,
                is_available,
            },
        );
        self
    }

    fn failing() -> Self {
        Self {
            products: HashMap::new(),
            fail: true,
        }
    }
}

#[async_trait]
impl CatalogLookup for StaticCatalog {
    async fn resolve(&self, product_id: i64) -> OrderResult<Option<ResolvedProduct>> {
        if self.fail {
            return Err(OrderError::Storage(
                crate::db::repository::RepoError::Database(sqlx::Error::PoolTimedOut),
            ));
        }
        Ok(self.products.get(&product_id).copied())
    }
}

async fn test_pool() -> SqlitePool {
    DbService::in_memory()
        .await
        .expect("in-memory database")
        .pool
}

fn line(product_id: i64, quantity: i64) -> CartLine {
    CartLine {
        product_id,
        quantity,
        notes: None,
    }
}

fn cart(items: Vec<CartLine>) -> OrderCreate {
    OrderCreate {
        items,
        payment_method: None,
    }
}

// ========================================================================
// Database seeding
// ========================================================================

async fn seed_category(pool: &SqlitePool, name: &str) -> i64 {
    sqlx::query_scalar("INSERT INTO categories (name) VALUES (?) RETURNING id")
        .bind(name)
        .fetch_one(pool)
        .await
        .expect("seed category")
}

async fn seed_product(pool: &SqlitePool, category_id: i64, name: &str, price: i64) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO products (name, price, category_id, is_available) \
         VALUES (?, ?, ?, 1) RETURNING id",
    )
    .bind(name)
    .bind(price)
    .bind(category_id)
    .fetch_one(pool)
    .await
    .expect("seed product")
}

/// Insert an order row directly, bypassing the builder, so tests can
/// control `status` and `created_at`
async fn seed_order(pool: &SqlitePool, status: &str, total_amount: i64, created_at: i64) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO orders (user_id, total_amount, status, payment_method, created_at) \
         VALUES (NULL, ?, ?, 'cash', ?) RETURNING id",
    )
    .bind(total_amount)
    .bind(status)
    .bind(created_at)
    .fetch_one(pool)
    .await
    .expect("seed order")
}
