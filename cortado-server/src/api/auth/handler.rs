//! Authentication Handlers
//!
//! Handles registration, login, logout and identity lookup.

use std::time::Duration;

use axum::{Json, extract::State};
use shared::models::{LoginRequest, LoginResponse, RegisterRequest, UserResponse};

use crate::api::{MIN_PASSWORD_LEN, MIN_USERNAME_LEN};
use crate::auth::{CurrentUser, ROLE_MANAGER, ROLE_STAFF, hash_password, verify_password};
use crate::core::ServerState;
use crate::db::repository::{RepoError, user as user_repo};
use crate::security_log;
use crate::utils::time::now_millis;
use crate::utils::{AppError, AppResult, ErrorCode};

/// Fixed delay for authentication to prevent timing attacks
const AUTH_FIXED_DELAY_MS: u64 = 500;

/// POST /api/auth/register - self-registration
///
/// The first account of an empty system is granted the manager role so
/// a fresh install is administrable; everyone after that starts as
/// staff and must be promoted by a manager.
pub async fn register(
    State(state): State<ServerState>,
    Json(payload): Json<RegisterRequest>,
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

    let role = if user_repo::count(&state.pool).await? == 0 {
        ROLE_MANAGER
    } else {
        ROLE_STAFF
    };

    let password_hash = hash_password(&payload.password)?;
    let user = match user_repo::create(
        &state.pool,
        &username,
        &password_hash,
        payload.full_name.as_deref(),
        role,
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

    tracing::info!(
        user_id = user.id,
        username = %user.username,
        role = %user.role,
        "User registered"
    );
    Ok(Json(user.into()))
}

/// POST /api/auth/login - authenticate and issue a JWT
///
/// Unknown usernames and wrong passwords produce the same error, and a
/// fixed delay keeps their timings identical.
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let user = user_repo::find_by_username(&state.pool, req.username.trim()).await?;

    // Delay before inspecting the result so found/not-found cost the same
    tokio::time::sleep(Duration::from_millis(AUTH_FIXED_DELAY_MS)).await;

    let user = match user {
        Some(user) => user,
        None => {
            security_log!(
                "WARN",
                "login_failed",
                username = req.username.clone(),
                reason = "user_not_found"
            );
            return Err(AppError::invalid_credentials());
        }
    };

    if !user.is_active {
        return Err(AppError::new(ErrorCode::AccountDisabled));
    }

    if !verify_password(&req.password, &user.password_hash) {
        security_log!(
            "WARN",
            "login_failed",
            username = req.username.clone(),
            reason = "invalid_credentials"
        );
        return Err(AppError::invalid_credentials());
    }

    let token = state
        .jwt_service
        .generate_token(user.id, &user.username, &user.role)
        .map_err(|e| AppError::internal(format!("Failed to generate token: {}", e)))?;

    tracing::info!(
        user_id = user.id,
        username = %user.username,
        role = %user.role,
        "User logged in"
    );

    Ok(Json(LoginResponse {
        token,
        user: user.into(),
    }))
}

/// GET /api/auth/me - current identity
///
/// Re-reads the account so `is_active` and role changes made after the
/// token was issued show up.
pub async fn me(
    State(state): State<ServerState>,
    current: CurrentUser,
) -> AppResult<Json<UserResponse>> {
    let user = user_repo::find_by_id(&state.pool, current.id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::UserNotFound))?;
    Ok(Json(user.into()))
}

/// POST /api/auth/logout
///
/// JWTs are stateless; this exists for the audit trail.
pub async fn logout(user: CurrentUser) -> AppResult<Json<()>> {
    tracing::info!(user_id = user.id, username = %user.username, "User logged out");
    Ok(Json(()))
}
