//! User Administration Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::models::{UserCreate, UserResponse, UserUpdate};

use crate::api::{MIN_PASSWORD_LEN, MIN_USERNAME_LEN};
use crate::auth::{CurrentUser, ROLE_MANAGER, ROLE_STAFF, hash_password};
use crate::core::ServerState;
use crate::db::repository::{RepoError, user as user_repo};
use crate::utils::time::now_millis;
use crate::utils::{AppError, AppResult, ErrorCode};

fn validate_role(role: &str) -> AppResult<()> {
    if role == ROLE_STAFF || role == ROLE_MANAGER {
        Ok(())
    } else {
        Err(AppError::validation(format!(
            "Role must be '{}' or '{}'",
            ROLE_STAFF, ROLE_MANAGER
        )))
    }
}

/// GET /api/users - list all accounts
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<UserResponse>>> {
    let users = user_repo::find_all(&state.pool).await?;
    Ok(Json(users))
}

/// POST /api/users - create an account
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<UserCreate>,
) -> AppResult<Json<UserResponse>> {
    let username = payload.username.trim().to_string();
    if username.len() < MIN_USERNAME_LEN {
        return Err(AppError::validation(format!(
            "Username must be at least {} characters",
            MIN_USERNAME_LEN
        )));
    }
    if payload.password.len() < MIN_PASSWORD_LEN {
        return Err(AppError::validation(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LEN
        )));
    }
    let role = payload.role.unwrap_or_else(|| ROLE_STAFF.to_string());
    validate_role(&role)?;

    let password_hash = hash_password(&payload.password)?;
    let user = match user_repo::create(
        &state.pool,
        &username,
        &password_hash,
        payload.full_name.as_deref(),
        &role,
        now_millis(),
    )
    .await
    {
        Ok(user) => user,
        Err(RepoError::Duplicate(msg)) => {
            return Err(AppError::with_message(ErrorCode::UsernameExists, msg));
        }
        Err(e) => return Err(e.into()),
    };

    tracing::info!(user_id = user.id, username = %user.username, role = %user.role, "User created");
    Ok(Json(user.into()))
}

/// PUT /api/users/{id} - update role, activation, name or password
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<UserUpdate>,
) -> AppResult<Json<UserResponse>> {
    if let Some(password) = payload.password.as_deref() {
        if password.len() < MIN_PASSWORD_LEN {
            return Err(AppError::validation(format!(
                "Password must be at least {} characters",
                MIN_PASSWORD_LEN
            )));
        }
    }
    if let Some(role) = payload.role.as_deref() {
        validate_role(role)?;
    }
    let password_hash = match payload.password.as_deref() {
        Some(password) => Some(hash_password(password)?),
        None => None,
    };

    match user_repo::update(
        &state.pool,
        id,
        password_hash.as_deref(),
        payload.full_name.as_deref(),
        payload.role.as_deref(),
        payload.is_active,
    )
    .await
    {
        Ok(user) => Ok(Json(user.into())),
        Err(RepoError::NotFound(_)) => Err(AppError::new(ErrorCode::UserNotFound)),
        Err(e) => Err(e.into()),
    }
}

/// DELETE /api/users/{id} - remove an account
///
/// Order history is kept; the deleted user's orders fall back to
/// "Unknown User" on display.
pub async fn delete(
    State(state): State<ServerState>,
    current: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    if current.id == id {
        return Err(AppError::new(ErrorCode::CannotDeleteSelf));
    }

    match user_repo::delete(&state.pool, id).await {
        Ok(true) => {
            tracing::info!(user_id = id, deleted_by = current.id, "User deleted");
            Ok(Json(true))
        }
        Ok(false) => Err(AppError::new(ErrorCode::UserNotFound)),
        Err(e) => Err(e.into()),
    }
}
