//! Core module - configuration, state and the HTTP server
//!
//! # Structure
//!
//! - [`Config`] - server configuration
//! - [`ServerState`] - shared state cloned into every handler
//! - [`Server`] - HTTP server startup and shutdown

pub mod config;
pub mod server;
pub mod state;

pub use config::Config;
pub use server::{Server, build_app};
pub use state::ServerState;
