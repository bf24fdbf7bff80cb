//! Order API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use shared::models::{Order, OrderCreate, OrderStatusUpdate};

use crate::auth::MaybeUser;
use crate::core::ServerState;
use crate::db::repository::order as order_repo;
use crate::orders;
use crate::utils::{AppError, AppResult, ErrorCode};

const MAX_PAGE_SIZE: i64 = 100;

fn default_limit() -> i64 {
    50
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default = "default_limit")]
    pub limit: i64,
}

/// POST /api/orders - submit a cart
///
/// Public: the kiosk posts without a token. When a staff token is
/// attached the order records who placed it.
pub async fn create(
    State(state): State<ServerState>,
    MaybeUser(user): MaybeUser,
    Json(payload): Json<OrderCreate>,
) -> AppResult<Json<Order>> {
    let order = orders::submit_order(&state.pool, user.map(|u| u.id), payload).await?;
    Ok(Json(order))
}

/// GET /api/orders - recent orders, newest first
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<Order>>> {
    let limit = query.limit.clamp(1, MAX_PAGE_SIZE);
    let orders = order_repo::find_all(&state.pool, limit).await?;
    Ok(Json(orders))
}

/// GET /api/orders/{id} - fetch one order with its lines
pub async fn get(State(state): State<ServerState>, Path(id): Path<i64>) -> AppResult<Json<Order>> {
    let order = order_repo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| {
            AppError::with_message(ErrorCode::OrderNotFound, format!("Order {} not found", id))
        })?;
    Ok(Json(order))
}

/// PUT /api/orders/{id}/status - move an order through its lifecycle
pub async fn update_status(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<OrderStatusUpdate>,
) -> AppResult<Json<Order>> {
    let order = orders::change_status(&state.pool, id, &payload.status).await?;
    Ok(Json(order))
}
