//! Category API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::models::{Category, CategoryCreate, CategoryUpdate};

use crate::core::ServerState;
use crate::db::repository::{RepoError, category as category_repo};
use crate::utils::{AppError, AppResult, ErrorCode};

/// GET /api/categories - list all categories
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Category>>> {
    let categories = category_repo::find_all(&state.pool).await?;
    Ok(Json(categories))
}

/// POST /api/categories - create a category
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<CategoryCreate>,
) -> AppResult<Json<Category>> {
    let name = payload.name.trim().to_string();
    if name.is_empty() {
        return Err(AppError::validation("Category name is required"));
    }

    match category_repo::create(&state.pool, CategoryCreate { name }).await {
        Ok(category) => Ok(Json(category)),
        Err(RepoError::Duplicate(msg)) => {
            Err(AppError::with_message(ErrorCode::CategoryNameExists, msg))
        }
        Err(e) => Err(e.into()),
    }
}

/// PUT /api/categories/{id} - rename a category
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<CategoryUpdate>,
) -> AppResult<Json<Category>> {
    let payload = CategoryUpdate {
        name: payload
            .name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty()),
    };

    match category_repo::update(&state.pool, id, payload).await {
        Ok(category) => Ok(Json(category)),
        Err(RepoError::NotFound(_)) => Err(AppError::new(ErrorCode::CategoryNotFound)),
        Err(RepoError::Duplicate(msg)) => {
            Err(AppError::with_message(ErrorCode::CategoryNameExists, msg))
        }
        Err(e) => Err(e.into()),
    }
}

/// DELETE /api/categories/{id} - delete a category without products
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    match category_repo::delete(&state.pool, id).await {
        Ok(true) => Ok(Json(true)),
        Ok(false) => Err(AppError::new(ErrorCode::CategoryNotFound)),
        Err(RepoError::Validation(msg)) => {
            Err(AppError::with_message(ErrorCode::CategoryHasProducts, msg))
        }
        Err(e) => Err(e.into()),
    }
}
