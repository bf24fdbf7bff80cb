use std::sync::Arc;

use sqlx::SqlitePool;

use crate::auth::JwtService;
use crate::bootstrap;
use crate::core::Config;
use crate::db::DbService;
use crate::utils::AppResult;

/// Shared server state
///
/// Cloned into every handler; all members are cheap to clone.
///
/// | Field | Meaning |
/// |-------|---------|
/// | config | immutable configuration |
/// | pool | SQLite connection pool |
/// | jwt_service | token signing / validation |
#[derive(Clone, Debug)]
pub struct ServerState {
    pub config: Config,
    pub pool: SqlitePool,
    pub jwt_service: Arc<JwtService>,
}

impl ServerState {
    /// Open the database, run first-start bootstrap and assemble state
    pub async fn initialize(config: &Config) -> AppResult<Self> {
        let db = DbService::new(&config.database_path).await?;
        bootstrap::initialize(&db.pool, config).await?;

        Ok(Self::with_pool(config.clone(), db.pool))
    }

    /// Assemble state around an existing pool
    ///
    /// Used by tests that run against an in-memory database.
    pub fn with_pool(config: Config, pool: SqlitePool) -> Self {
        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));
        Self {
            config,
            pool,
            jwt_service,
        }
    }
}
