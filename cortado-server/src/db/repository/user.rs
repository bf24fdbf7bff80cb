//! User Repository
//!
//! Callers pass an already-hashed password; plaintext never reaches
//! this layer.

use shared::models::{User, UserResponse};
use sqlx::SqlitePool;

use super::{RepoError, RepoResult, is_unique_violation};

const COLUMNS: &str = "id, username, password_hash, full_name, role, is_active, created_at";

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<UserResponse>> {
    let users = sqlx::query_as::<_, User>(&format!("SELECT {COLUMNS} FROM users ORDER BY id"))
        .fetch_all(pool)
        .await?;
    Ok(users.into_iter().map(UserResponse::from).collect())
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<User>> {
    let user = sqlx::query_as::<_, User>(&format!("SELECT {COLUMNS} FROM users WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(user)
}

pub async fn find_by_username(pool: &SqlitePool, username: &str) -> RepoResult<Option<User>> {
    let user =
        sqlx::query_as::<_, User>(&format!("SELECT {COLUMNS} FROM users WHERE username = ?"))
            .bind(username)
            .fetch_optional(pool)
            .await?;
    Ok(user)
}

pub async fn count(pool: &SqlitePool) -> RepoResult<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(pool)
        .await?;
    Ok(count)
}

pub async fn create(
    pool: &SqlitePool,
    username: &str,
    password_hash: &str,
    full_name: Option<&str>,
    role: &str,
    created_at: i64,
) -> RepoResult<User> {
    let id: i64 = sqlx::query_scalar(
        "INSERT INTO users (username, password_hash, full_name, role, is_active, created_at) \
         VALUES (?, ?, ?, ?, 1, ?) RETURNING id",
    )
    .bind(username)
    .bind(password_hash)
    .bind(full_name)
    .bind(role)
    .bind(created_at)
    .fetch_one(pool)
    .await
    .map_err(|e| {
        if is_unique_violation(&e) {
            RepoError::Duplicate(format!("Username '{}' is taken", username))
        } else {
            e.into()
        }
    })?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database(sqlx::Error::RowNotFound))
}

pub async fn update(
    pool: &SqlitePool,
    id: i64,
    password_hash: Option<&str>,
    full_name: Option<&str>,
    role: Option<&str>,
    is_active: Option<bool>,
) -> RepoResult<User> {
    let rows = sqlx::query(
        "UPDATE users SET \
            password_hash = COALESCE(?1, password_hash), \
            full_name = COALESCE(?2, full_name), \
            role = COALESCE(?3, role), \
            is_active = COALESCE(?4, is_active) \
         WHERE id = ?5",
    )
    .bind(password_hash)
    .bind(full_name)
    .bind(role)
    .bind(is_active)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("User {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("User {id} not found")))
}

/// Delete a user
///
/// `orders.user_id` is `ON DELETE SET NULL`, so order history survives
/// and reads show "Unknown User".
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM users WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}
