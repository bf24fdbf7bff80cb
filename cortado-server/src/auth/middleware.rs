//! Authentication middleware
//!
//! Axum middleware for JWT authentication and the manager gate.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use http::Method;

use crate::AppError;
use crate::auth::{CurrentUser, JwtService};
use crate::core::ServerState;
use crate::security_log;

/// Routes reachable without a token
///
/// The menu is browsable by anyone and the kiosk places orders without
/// logging in; everything else under `/api/` needs a valid token.
fn is_public_route(method: &Method, path: &str) -> bool {
    match *method {
        Method::GET => {
            path == "/api/categories" || path == "/api/products" || path.starts_with("/api/products/")
        }
        Method::POST => matches!(path, "/api/auth/login" | "/api/auth/register" | "/api/orders"),
        _ => false,
    }
}

/// Authentication middleware, applied at the router level
///
/// Extracts and validates the JWT from `Authorization: Bearer <token>`,
/// then injects [`CurrentUser`] into the request extensions.
///
/// # Skipped paths
///
/// - `OPTIONS *` (CORS preflight)
/// - anything outside `/api/` (`/health`, unknown paths fall through to 404)
/// - the public routes listed in [`is_public_route`]
///
/// On public routes a token is still honored when present: a logged-in
/// staff member placing an order gets recorded as its creator, while a
/// missing or invalid token leaves the request anonymous.
pub async fn require_auth(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    // Allow OPTIONS requests for CORS preflight
    if req.method() == Method::OPTIONS {
        return Ok(next.run(req).await);
    }

    let path = req.uri().path().to_string();
    if !path.starts_with("/api/") {
        return Ok(next.run(req).await);
    }

    if is_public_route(req.method(), &path) {
        if let Some(user) = try_extract_user(&state, &req) {
            req.extensions_mut().insert(user);
        }
        return Ok(next.run(req).await);
    }

    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let token = match auth_header {
        Some(header) => JwtService::extract_from_header(header)
            .ok_or_else(|| AppError::invalid_token("Invalid authorization header"))?,
        None => {
            security_log!("WARN", "auth_missing", uri = format!("{:?}", req.uri()));
            return Err(AppError::unauthorized());
        }
    };

    match state.jwt_service.validate_token(token) {
        Ok(claims) => {
            let user = CurrentUser::try_from(claims)
                .map_err(|e| AppError::invalid_token(format!("Malformed JWT claims: {}", e)))?;
            req.extensions_mut().insert(user);
            Ok(next.run(req).await)
        }
        Err(e) => {
            security_log!(
                "WARN",
                "auth_failed",
                error = format!("{}", e),
                uri = format!("{:?}", req.uri())
            );

            match e {
                crate::auth::JwtError::ExpiredToken => Err(AppError::token_expired()),
                _ => Err(AppError::invalid_token("Invalid token")),
            }
        }
    }
}

/// Best-effort identity for public routes; never fails the request
fn try_extract_user(state: &ServerState, req: &Request) -> Option<CurrentUser> {
    let header = req
        .headers()
        .get(http::header::AUTHORIZATION)?
        .to_str()
        .ok()?;
    let token = JwtService::extract_from_header(header)?;
    let claims = state.jwt_service.validate_token(token).ok()?;
    CurrentUser::try_from(claims).ok()
}

/// Manager gate, applied per route group
///
/// Requires `require_auth` to have run first so the user is present in
/// the request extensions. Non-managers get 403.
pub async fn require_manager(req: Request, next: Next) -> Result<Response, AppError> {
    let user = req
        .extensions()
        .get::<CurrentUser>()
        .ok_or_else(AppError::unauthorized)?;

    if !user.is_manager() {
        security_log!(
            "WARN",
            "manager_required",
            user_id = user.id,
            username = user.username.clone(),
            uri = format!("{:?}", req.uri())
        );
        return Err(AppError::manager_required());
    }

    Ok(next.run(req).await)
}
