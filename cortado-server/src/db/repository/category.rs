//! Category Repository

use shared::models::{Category, CategoryCreate, CategoryUpdate};
use sqlx::SqlitePool;

use super::{RepoError, RepoResult, is_unique_violation};

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Category>> {
    let categories =
        sqlx::query_as::<_, Category>("SELECT id, name FROM categories ORDER BY name")
            .fetch_all(pool)
            .await?;
    Ok(categories)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Category>> {
    let category = sqlx::query_as::<_, Category>("SELECT id, name FROM categories WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(category)
}

pub async fn create(pool: &SqlitePool, data: CategoryCreate) -> RepoResult<Category> {
    let id: i64 = sqlx::query_scalar("INSERT INTO categories (name) VALUES (?) RETURNING id")
        .bind(&data.name)
        .fetch_one(pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                RepoError::Duplicate(format!("Category '{}' already exists", data.name))
            } else {
                e.into()
            }
        })?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database(sqlx::Error::RowNotFound))
}

pub async fn update(pool: &SqlitePool, id: i64, data: CategoryUpdate) -> RepoResult<Category> {
    let rows = sqlx::query("UPDATE categories SET name = COALESCE(?1, name) WHERE id = ?2")
        .bind(&data.name)
        .bind(id)
        .execute(pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                RepoError::Duplicate("Category name already exists".into())
            } else {
                RepoError::from(e)
            }
        })?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Category {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Category {id} not found")))
}

/// Delete a category; refused while products still reference it
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let product_count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM products WHERE category_id = ?")
            .bind(id)
            .fetch_one(pool)
            .await?;
    if product_count > 0 {
        return Err(RepoError::Validation(
            "Cannot delete category with products".into(),
        ));
    }
    let rows = sqlx::query("DELETE FROM categories WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}
