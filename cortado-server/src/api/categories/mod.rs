//! Category API module
//!
//! Reads are public (the kiosk menu); writes are manager-gated.

mod handler;

use axum::{
    Router, middleware,
    routing::{delete, get, post},
};

use crate::auth::require_manager;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/categories", routes())
}

fn routes() -> Router<ServerState> {
    let public = Router::new().route("/", get(handler::list));

    let managed = Router::new()
        .route("/", post(handler::create))
        .route("/{id}", delete(handler::delete).put(handler::update))
        .layer(middleware::from_fn(require_manager));

    public.merge(managed)
}
