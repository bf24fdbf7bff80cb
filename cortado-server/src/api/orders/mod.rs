//! Order API module
//!
//! Submission is public so the kiosk can place orders without a login;
//! a staff token, when present, is recorded on the order. Reads need a
//! token and status changes need the manager role.

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post, put},
};

use crate::auth::require_manager;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/orders", routes())
}

fn routes() -> Router<ServerState> {
    let open = Router::new()
        .route("/", post(handler::create).get(handler::list))
        .route("/{id}", get(handler::get));

    let managed = Router::new()
        .route("/{id}/status", put(handler::update_status))
        .layer(middleware::from_fn(require_manager));

    open.merge(managed)
}
