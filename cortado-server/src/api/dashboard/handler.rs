//! Dashboard API Handlers

use axum::{Json, extract::State};
use chrono::Utc;

use crate::core::ServerState;
use crate::orders::{DashboardStats, compute_stats};
use crate::utils::AppResult;

/// GET /api/dashboard/stats - revenue and order aggregates
pub async fn stats(State(state): State<ServerState>) -> AppResult<Json<DashboardStats>> {
    let stats = compute_stats(&state.pool, Utc::now()).await?;
    Ok(Json(stats))
}
