//! Cortado Server - café point-of-sale backend
//!
//! # Overview
//!
//! Single-store POS backend: a public kiosk submits orders against a
//! managed catalog, staff track and complete them, and a manager
//! dashboard reads revenue analytics.
//!
//! - **Order core** (`orders`): cart validation, price capture, status
//!   lifecycle, revenue aggregation
//! - **Database** (`db`): embedded SQLite via sqlx
//! - **Auth** (`auth`): JWT + Argon2, staff/manager roles
//! - **HTTP API** (`api`): RESTful endpoints
//!
//! # Module structure
//!
//! ```text
//! cortado-server/src/
//! ├── core/          # config, state, HTTP server
//! ├── auth/          # JWT auth, role gates
//! ├── api/           # HTTP routes and handlers
//! ├── db/            # pool, migrations, repositories
//! ├── orders/        # order processing core
//! ├── bootstrap.rs   # first-start admin account + demo menu
//! └── utils/         # logger, time helpers
//! ```

pub mod api;
pub mod auth;
pub mod bootstrap;
pub mod core;
pub mod db;
pub mod orders;
pub mod utils;

// Re-export public types
pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState, build_app};
pub use utils::{AppError, AppResult};

// Re-export unified error types from shared
pub use utils::{ApiResponse, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

// Security logging macro - named fields forwarded to tracing
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

/// Prepare the process environment
///
/// Loads `.env`, then initializes logging: `LOG_LEVEL` sets the
/// default filter and `LOG_DIR` switches from stdout to daily rolling
/// files.
pub fn setup_environment() {
    dotenv::dotenv().ok();

    let log_level = std::env::var("LOG_LEVEL").ok();
    let log_dir = std::env::var("LOG_DIR").ok();
    init_logger_with_file(log_level.as_deref(), log_dir.as_deref());
}

pub fn print_banner() {
    println!(
        r#"
   ______           __            __
  / ____/___  _____/ /_____ _____/ /___
 / /   / __ \/ ___/ __/ __ `/ __  / __ \
/ /___/ /_/ / /  / /_/ /_/ / /_/ / /_/ /
\____/\____/_/   \__,_/\__,_/\__,_/\____/
    "#
    );
}
