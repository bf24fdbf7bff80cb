//! Data models
//!
//! Shared between cortado-server and frontend (via API).
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` (SQLite INTEGER PRIMARY KEY); money amounts are `i64`
//! minor currency units; timestamps are Unix epoch milliseconds.

pub mod category;
pub mod order;
pub mod product;
pub mod user;

// Re-exports
pub use category::*;
pub use order::*;
pub use product::*;
pub use user::*;
