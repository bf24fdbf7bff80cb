//! Product API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::models::{Product, ProductCreate, ProductUpdate};

use crate::core::ServerState;
use crate::db::repository::{RepoError, category as category_repo, product as product_repo};
use crate::utils::{AppError, AppResult, ErrorCode};

/// GET /api/products - list all products
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Product>>> {
    let products = product_repo::find_all(&state.pool).await?;
    Ok(Json(products))
}

/// GET /api/products/{id} - fetch one product
pub async fn get(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Product>> {
    let product = product_repo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::ProductNotFound))?;
    Ok(Json(product))
}

/// GET /api/products/by-category/{category_id} - products of one category
pub async fn list_by_category(
    State(state): State<ServerState>,
    Path(category_id): Path<i64>,
) -> AppResult<Json<Vec<Product>>> {
    if category_repo::find_by_id(&state.pool, category_id)
        .await?
        .is_none()
    {
        return Err(AppError::new(ErrorCode::CategoryNotFound));
    }
    let products = product_repo::find_by_category(&state.pool, category_id).await?;
    Ok(Json(products))
}

/// POST /api/products - create a product
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<ProductCreate>,
) -> AppResult<Json<Product>> {
    let name = payload.name.trim().to_string();
    if name.is_empty() {
        return Err(AppError::validation("Product name is required"));
    }
    if payload.price < 0 {
        return Err(AppError::validation("Price cannot be negative"));
    }
    if category_repo::find_by_id(&state.pool, payload.category_id)
        .await?
        .is_none()
    {
        return Err(AppError::new(ErrorCode::CategoryNotFound));
    }

    let product = product_repo::create(&state.pool, ProductCreate { name, ..payload }).await?;
    Ok(Json(product))
}

/// PUT /api/products/{id} - update a product
///
/// Historical order lines keep the price captured at purchase time,
/// so edits here never rewrite past orders.
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<ProductUpdate>,
) -> AppResult<Json<Product>> {
    if let Some(price) = payload.price {
        if price < 0 {
            return Err(AppError::validation("Price cannot be negative"));
        }
    }
    if let Some(category_id) = payload.category_id {
        if category_repo::find_by_id(&state.pool, category_id)
            .await?
            .is_none()
        {
            return Err(AppError::new(ErrorCode::CategoryNotFound));
        }
    }
    let payload = ProductUpdate {
        name: payload
            .name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty()),
        ..payload
    };

    match product_repo::update(&state.pool, id, payload).await {
        Ok(product) => Ok(Json(product)),
        Err(RepoError::NotFound(_)) => Err(AppError::new(ErrorCode::ProductNotFound)),
        Err(e) => Err(e.into()),
    }
}

/// DELETE /api/products/{id} - remove a product from the catalog
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    match product_repo::delete(&state.pool, id).await {
        Ok(true) => Ok(Json(true)),
        Ok(false) => Err(AppError::new(ErrorCode::ProductNotFound)),
        Err(e) => Err(e.into()),
    }
}
