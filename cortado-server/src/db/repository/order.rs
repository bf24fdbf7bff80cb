//! Order Repository
//!
//! Orders and their lines are written in one transaction; a failure
//! anywhere rolls the whole submission back. After commit the only
//! mutable column is `status`.

use std::collections::HashMap;

use shared::models::{Order, OrderItem, OrderStatus};
use sqlx::SqlitePool;

use super::RepoResult;
use crate::orders::{DraftLine, OrderDraft};

const HEADER_QUERY: &str = "SELECT o.id, o.user_id, \
        COALESCE(u.username, 'Unknown User') AS created_by, \
        o.total_amount, o.status, o.payment_method, o.created_at \
     FROM orders o LEFT JOIN users u ON u.id = o.user_id";

const ITEM_COLUMNS: &str = "oi.order_id, oi.product_id, \
        COALESCE(p.name, 'Unknown Product') AS product_name, \
        p.image_url AS product_image, \
        oi.quantity, oi.unit_price, oi.notes";

/// Commit a validated draft atomically, returning the new order id
pub async fn create(pool: &SqlitePool, draft: &OrderDraft) -> RepoResult<i64> {
    let mut tx = pool.begin().await?;

    let order_id: i64 = sqlx::query_scalar(
        "INSERT INTO orders (user_id, total_amount, status, payment_method, created_at) \
         VALUES (?, ?, ?, ?, ?) RETURNING id",
    )
    .bind(draft.user_id)
    .bind(draft.total_amount)
    .bind(draft.status)
    .bind(&draft.payment_method)
    .bind(draft.created_at)
    .fetch_one(&mut *tx)
    .await?;

    for line in &draft.lines {
        insert_line(&mut tx, order_id, line).await?;
    }

    // An early return above drops `tx`, which rolls back
    tx.commit().await?;
    Ok(order_id)
}

async fn insert_line(
    tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
    order_id: i64,
    line: &DraftLine,
) -> RepoResult<()> {
    sqlx::query(
        "INSERT INTO order_items (order_id, product_id, quantity, unit_price, notes) \
         VALUES (?, ?, ?, ?, ?)",
    )
    .bind(order_id)
    .bind(line.product_id)
    .bind(line.quantity)
    .bind(line.unit_price)
    .bind(&line.notes)
    .execute(&mut **tx)
    .await?;
    Ok(())
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Order>> {
    let order = sqlx::query_as::<_, Order>(&format!("{HEADER_QUERY} WHERE o.id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;

    let Some(mut order) = order else {
        return Ok(None);
    };

    order.items = sqlx::query_as::<_, OrderItem>(&format!(
        "SELECT {ITEM_COLUMNS} FROM order_items oi \
         LEFT JOIN products p ON p.id = oi.product_id \
         WHERE oi.order_id = ? ORDER BY oi.id"
    ))
    .bind(id)
    .fetch_all(pool)
    .await?;

    Ok(Some(order))
}

/// Most recent orders first, lines resolved, at most `limit` rows
pub async fn find_all(pool: &SqlitePool, limit: i64) -> RepoResult<Vec<Order>> {
    let mut orders = sqlx::query_as::<_, Order>(&format!(
        "{HEADER_QUERY} ORDER BY o.created_at DESC, o.id DESC LIMIT ?"
    ))
    .bind(limit)
    .fetch_all(pool)
    .await?;

    // One batched query for the lines of the selected orders
    let items = sqlx::query_as::<_, OrderItem>(&format!(
        "SELECT {ITEM_COLUMNS} FROM order_items oi \
         JOIN (SELECT id FROM orders ORDER BY created_at DESC, id DESC LIMIT ?) recent \
           ON recent.id = oi.order_id \
         LEFT JOIN products p ON p.id = oi.product_id \
         ORDER BY oi.order_id, oi.id"
    ))
    .bind(limit)
    .fetch_all(pool)
    .await?;

    let mut by_order: HashMap<i64, Vec<OrderItem>> = HashMap::new();
    for item in items {
        by_order.entry(item.order_id).or_default().push(item);
    }
    for order in &mut orders {
        if let Some(lines) = by_order.remove(&order.id) {
            order.items = lines;
        }
    }

    Ok(orders)
}

pub async fn find_status(pool: &SqlitePool, id: i64) -> RepoResult<Option<OrderStatus>> {
    let status = sqlx::query_scalar::<_, OrderStatus>("SELECT status FROM orders WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(status)
}

pub async fn update_status(pool: &SqlitePool, id: i64, status: OrderStatus) -> RepoResult<bool> {
    let rows = sqlx::query("UPDATE orders SET status = ? WHERE id = ?")
        .bind(status)
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}

// ── Aggregates for the dashboard ──

pub async fn count_all(pool: &SqlitePool) -> RepoResult<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders")
        .fetch_one(pool)
        .await?;
    Ok(count)
}

pub async fn count_by_status(pool: &SqlitePool) -> RepoResult<Vec<(OrderStatus, i64)>> {
    let counts = sqlx::query_as::<_, (OrderStatus, i64)>(
        "SELECT status, COUNT(*) FROM orders GROUP BY status",
    )
    .fetch_all(pool)
    .await?;
    Ok(counts)
}

/// Lifetime revenue over completed orders only
pub async fn completed_revenue(pool: &SqlitePool) -> RepoResult<i64> {
    let revenue: i64 = sqlx::query_scalar(
        "SELECT COALESCE(SUM(total_amount), 0) FROM orders WHERE status = ?",
    )
    .bind(OrderStatus::Completed)
    .fetch_one(pool)
    .await?;
    Ok(revenue)
}

/// Completed revenue within `[start, end)` millis
pub async fn completed_revenue_between(
    pool: &SqlitePool,
    start: i64,
    end: i64,
) -> RepoResult<i64> {
    let revenue: i64 = sqlx::query_scalar(
        "SELECT COALESCE(SUM(total_amount), 0) FROM orders \
         WHERE status = ? AND created_at >= ? AND created_at < ?",
    )
    .bind(OrderStatus::Completed)
    .bind(start)
    .bind(end)
    .fetch_one(pool)
    .await?;
    Ok(revenue)
}
