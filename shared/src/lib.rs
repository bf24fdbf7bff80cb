//! Shared types for the cortado point-of-sale backend
//!
//! Error codes, the unified API response envelope, and the data models
//! exchanged between the server and its clients.

pub mod error;
pub mod models;

// Re-exports
pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
pub use serde::{Deserialize, Serialize};
