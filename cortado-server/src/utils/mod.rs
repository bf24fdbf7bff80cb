//! Utility module
//!
//! - [`AppError`] / [`ApiResponse`] - unified error types (from `shared::error`)
//! - [`logger`] - tracing subscriber setup
//! - [`time`] - epoch-millis helpers and UTC day bucketing

pub mod logger;
pub mod time;

// Re-export error types from shared so call sites can use crate::utils::*
pub use shared::error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
