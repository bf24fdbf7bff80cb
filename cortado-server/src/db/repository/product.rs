//! Product Repository

use shared::models::{Product, ProductCreate, ProductUpdate};
use sqlx::SqlitePool;

use super::{RepoError, RepoResult};

const COLUMNS: &str = "id, name, price, category_id, image_url, is_available";

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Product>> {
    let products = sqlx::query_as::<_, Product>(&format!(
        "SELECT {COLUMNS} FROM products ORDER BY category_id, name"
    ))
    .fetch_all(pool)
    .await?;
    Ok(products)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Product>> {
    let product =
        sqlx::query_as::<_, Product>(&format!("SELECT {COLUMNS} FROM products WHERE id = ?"))
            .bind(id)
            .fetch_optional(pool)
            .await?;
    Ok(product)
}

pub async fn find_by_category(pool: &SqlitePool, category_id: i64) -> RepoResult<Vec<Product>> {
    let products = sqlx::query_as::<_, Product>(&format!(
        "SELECT {COLUMNS} FROM products WHERE category_id = ? ORDER BY name"
    ))
    .bind(category_id)
    .fetch_all(pool)
    .await?;
    Ok(products)
}

pub async fn create(pool: &SqlitePool, data: ProductCreate) -> RepoResult<Product> {
    let id: i64 = sqlx::query_scalar(
        "INSERT INTO products (name, price, category_id, image_url, is_available) \
         VALUES (?, ?, ?, ?, ?) RETURNING id",
    )
    .bind(&data.name)
    .bind(data.price)
    .bind(data.category_id)
    .bind(&data.image_url)
    .bind(data.is_available.unwrap_or(true))
    .fetch_one(pool)
    .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database(sqlx::Error::RowNotFound))
}

pub async fn update(pool: &SqlitePool, id: i64, data: ProductUpdate) -> RepoResult<Product> {
    let rows = sqlx::query(
        "UPDATE products SET \
            name = COALESCE(?1, name), \
            price = COALESCE(?2, price), \
            category_id = COALESCE(?3, category_id), \
            image_url = COALESCE(?4, image_url), \
            is_available = COALESCE(?5, is_available) \
         WHERE id = ?6",
    )
    .bind(&data.name)
    .bind(data.price)
    .bind(data.category_id)
    .bind(&data.image_url)
    .bind(data.is_available)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Product {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Product {id} not found")))
}

/// Delete a product
///
/// Historical order lines keep their captured price; their display
/// name joins to "Unknown Product" once the product is gone.
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM products WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}
