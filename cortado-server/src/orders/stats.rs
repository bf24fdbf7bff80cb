//! Dashboard statistics
//!
//! Aggregates are computed from the orders table on every request; no
//! counters are maintained elsewhere.
//!
//! Day bucketing is UTC. Date windows are converted to millis here and
//! compared against `created_at`, so SQLite needs no date functions.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use shared::models::OrderStatus;
use sqlx::SqlitePool;

use super::error::OrderResult;
use crate::db::repository::order as order_repo;
use crate::utils::time::{day_bounds_millis, format_date};

/// Days covered by the daily revenue series, today included
pub const DAILY_WINDOW_DAYS: i64 = 7;

/// Order counts per status; always carries all three keys
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCounts {
    pub pending: i64,
    pub completed: i64,
    pub cancelled: i64,
}

/// Completed revenue of one UTC day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyRevenue {
    /// YYYY-MM-DD
    pub date: String,
    /// Minor currency units
    pub revenue: i64,
}

/// Dashboard payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardStats {
    /// Lifetime revenue over completed orders, minor units
    pub total_revenue: i64,
    /// Lifetime order count across all statuses
    pub total_orders: i64,
    pub status_counts: StatusCounts,
    /// Oldest day first, today last; zero-revenue days included
    pub daily_stats: Vec<DailyRevenue>,
}

/// Compute the dashboard snapshot as of `now`
pub async fn compute_stats(pool: &SqlitePool, now: DateTime<Utc>) -> OrderResult<DashboardStats> {
    let total_revenue = order_repo::completed_revenue(pool).await?;
    let total_orders = order_repo::count_all(pool).await?;

    let mut status_counts = StatusCounts::default();
    for (status, count) in order_repo::count_by_status(pool).await? {
        match status {
            OrderStatus::Pending => status_counts.pending = count,
            OrderStatus::Completed => status_counts.completed = count,
            OrderStatus::Cancelled => status_counts.cancelled = count,
        }
    }

    let today = now.date_naive();
    let mut daily_stats = Vec::with_capacity(DAILY_WINDOW_DAYS as usize);
    for offset in (0..DAILY_WINDOW_DAYS).rev() {
        let date = today - Duration::days(offset);
        let (start, end) = day_bounds_millis(date);
        let revenue = order_repo::completed_revenue_between(pool, start, end).await?;
        daily_stats.push(DailyRevenue {
            date: format_date(date),
            revenue,
        });
    }

    Ok(DashboardStats {
        total_revenue,
        total_orders,
        status_counts,
        daily_stats,
    })
}
