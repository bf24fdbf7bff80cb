//! Order processing core
//!
//! The write path is two stages: [`builder`] validates a submitted
//! cart against the catalog and prices it, then the order repository
//! commits the draft atomically. Status changes go through
//! [`lifecycle`]; the dashboard reads come from [`stats`].
//!
//! - [`builder`] - cart validation and price capture
//! - [`catalog`] - catalog lookup port used by the builder
//! - [`lifecycle`] - status transition rules
//! - [`stats`] - revenue and status aggregates
//! - [`error`] - [`OrderError`] taxonomy

pub mod builder;
pub mod catalog;
pub mod error;
pub mod lifecycle;
pub mod stats;

pub use builder::{DEFAULT_PAYMENT_METHOD, DraftLine, OrderDraft, build_order};
pub use catalog::{CatalogLookup, ResolvedProduct, SqliteCatalog};
pub use error::{OrderError, OrderResult};
pub use lifecycle::{Transition, plan_transition};
pub use stats::{DAILY_WINDOW_DAYS, DailyRevenue, DashboardStats, StatusCounts, compute_stats};

use shared::models::{Order, OrderCreate};
use sqlx::SqlitePool;

use crate::db::repository::order as order_repo;

/// Validate, price and commit a submitted cart
///
/// Nothing is written unless the whole cart passes validation; the
/// returned order is re-read from storage with its lines resolved.
pub async fn submit_order(
    pool: &SqlitePool,
    user_id: Option<i64>,
    submission: OrderCreate,
) -> OrderResult<Order> {
    let catalog = SqliteCatalog::new(pool.clone());
    let draft = build_order(&catalog, user_id, submission).await?;
    let order_id = order_repo::create(pool, &draft).await?;

    tracing::info!(
        order_id,
        total_amount = draft.total_amount,
        lines = draft.lines.len(),
        anonymous = draft.user_id.is_none(),
        "Order created"
    );

    order_repo::find_by_id(pool, order_id)
        .await?
        .ok_or(OrderError::NotFound(order_id))
}

/// Apply a requested status change
///
/// No-op requests succeed and return the order unchanged. Concurrent
/// changes are last-write-wins; there is no optimistic locking.
pub async fn change_status(
    pool: &SqlitePool,
    order_id: i64,
    requested: &str,
) -> OrderResult<Order> {
    let current = order_repo::find_status(pool, order_id)
        .await?
        .ok_or(OrderError::NotFound(order_id))?;

    match plan_transition(current, requested)? {
        Transition::Unchanged => {}
        Transition::Apply(next) => {
            if !order_repo::update_status(pool, order_id, next).await? {
                return Err(OrderError::NotFound(order_id));
            }
            tracing::info!(order_id, from = %current, to = %next, "Order status changed");
        }
    }

    order_repo::find_by_id(pool, order_id)
        .await?
        .ok_or(OrderError::NotFound(order_id))
}

#[cfg(test)]
mod tests;
