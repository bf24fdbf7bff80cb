//! Order processing errors

use shared::models::OrderStatus;
use thiserror::Error;

use crate::db::repository::RepoError;
use crate::utils::{AppError, ErrorCode};

/// Errors surfaced by order submission, status changes and stats
#[derive(Debug, Error)]
pub enum OrderError {
    #[error("Order must contain at least one item")]
    EmptyCart,

    #[error("Cart line {index} is invalid: {reason}")]
    InvalidLine { index: usize, reason: &'static str },

    #[error("Product {product_id} is not available")]
    ProductUnavailable { product_id: i64 },

    #[error("Cannot change status from '{from}' to '{requested}'")]
    InvalidTransition { from: OrderStatus, requested: String },

    #[error("Order {0} not found")]
    NotFound(i64),

    #[error("Storage error: {0}")]
    Storage(#[from] RepoError),
}

pub type OrderResult<T> = Result<T, OrderError>;

impl From<OrderError> for AppError {
    fn from(err: OrderError) -> Self {
        match err {
            OrderError::EmptyCart => AppError::new(ErrorCode::EmptyCart),
            OrderError::InvalidLine { index, reason } => {
                AppError::with_message(ErrorCode::InvalidOrderLine, reason)
                    .with_detail("line", index as i64)
            }
            OrderError::ProductUnavailable { product_id } => AppError::with_message(
                ErrorCode::ProductUnavailable,
                format!("Product {} is not available", product_id),
            )
            .with_detail("product_id", product_id),
            OrderError::InvalidTransition { from, requested } => AppError::with_message(
                ErrorCode::InvalidStatusTransition,
                format!("Cannot change status from '{}' to '{}'", from, requested),
            )
            .with_detail("from", from.as_str())
            .with_detail("requested", requested),
            OrderError::NotFound(id) => {
                AppError::with_message(ErrorCode::OrderNotFound, format!("Order {} not found", id))
            }
            OrderError::Storage(repo) => repo.into(),
        }
    }
}
