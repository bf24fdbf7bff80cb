use crate::auth::JwtConfig;

/// Server configuration
///
/// # Environment variables
///
/// Every setting can be overridden through the environment:
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | HTTP_PORT | 3000 | HTTP API port |
/// | DATABASE_PATH | cortado.db | SQLite database file |
/// | ENVIRONMENT | development | development \| staging \| production |
/// | LOG_DIR | (stdout) | daily rolling log files when set |
/// | BOOTSTRAP_ADMIN_USERNAME | admin | first-run manager account name |
/// | BOOTSTRAP_ADMIN_PASSWORD | (unset) | first-run manager password |
/// | SEED_DEMO_DATA | false | insert the demo menu on first run |
///
/// JWT settings (`JWT_SECRET`, `JWT_EXPIRATION_MINUTES`, …) are read by
/// [`JwtConfig`].
///
/// # Example
///
/// ```ignore
/// HTTP_PORT=8080 DATABASE_PATH=/data/cortado.db cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP API port
    pub http_port: u16,
    /// Path of the SQLite database file
    pub database_path: String,
    /// JWT settings
    pub jwt: JwtConfig,
    /// Runtime environment: development | staging | production
    pub environment: String,
    /// Log directory; `None` logs to stdout
    pub log_dir: Option<String>,
    /// Username for the bootstrap manager account
    pub bootstrap_admin_username: String,
    /// Password for the bootstrap manager account; when unset no
    /// account is created
    pub bootstrap_admin_password: Option<String>,
    /// Insert the demo café menu when the catalog is empty
    pub seed_demo_data: bool,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Unset variables fall back to their defaults.
    pub fn from_env() -> Self {
        Self {
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            database_path: std::env::var("DATABASE_PATH").unwrap_or_else(|_| "cortado.db".into()),
            jwt: JwtConfig::default(),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            log_dir: std::env::var("LOG_DIR").ok(),
            bootstrap_admin_username: std::env::var("BOOTSTRAP_ADMIN_USERNAME")
                .unwrap_or_else(|_| "admin".into()),
            bootstrap_admin_password: std::env::var("BOOTSTRAP_ADMIN_PASSWORD").ok(),
            seed_demo_data: std::env::var("SEED_DEMO_DATA")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
