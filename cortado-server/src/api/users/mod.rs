//! User administration API module
//!
//! Every route here is manager-only.

mod handler;

use axum::{
    Router, middleware,
    routing::{delete, get},
};

use crate::auth::require_manager;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/users", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/{id}", delete(handler::delete).put(handler::update))
        .layer(middleware::from_fn(require_manager))
}
