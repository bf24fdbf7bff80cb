//! Order builder
//!
//! Turns a submitted cart into a priced draft, or rejects it. All
//! validation happens here, before anything is written: a draft that
//! comes back `Ok` is committable as-is.
//!
//! Prices come from the catalog at build time, never from the client,
//! and are captured into the draft lines so later catalog edits cannot
//! change what an order was sold for.

use shared::models::{OrderCreate, OrderStatus};

use super::catalog::CatalogLookup;
use super::error::{OrderError, OrderResult};
use crate::utils::time::now_millis;

/// Payment method recorded when the client does not name one
pub const DEFAULT_PAYMENT_METHOD: &str = "cash";

/// Validated, priced order ready for atomic commit
#[derive(Debug, Clone)]
pub struct OrderDraft {
    /// Submitting user; `None` for anonymous kiosk orders
    pub user_id: Option<i64>,
    /// Sum of line subtotals, minor units
    pub total_amount: i64,
    pub status: OrderStatus,
    pub payment_method: String,
    /// Unix epoch milliseconds
    pub created_at: i64,
    pub lines: Vec<DraftLine>,
}

/// One priced line of a draft
#[derive(Debug, Clone)]
pub struct DraftLine {
    pub product_id: i64,
    pub quantity: i64,
    /// Catalog price at build time, minor units
    pub unit_price: i64,
    pub notes: Option<String>,
}

/// Validate a cart and price it against the catalog
///
/// Rejections, in the order they are checked:
/// - empty cart
/// - malformed line (non-positive product id or quantity)
/// - unknown or unavailable product
///
/// The line index is carried in the error so clients can point at the
/// offending row.
pub async fn build_order(
    catalog: &dyn CatalogLookup,
    user_id: Option<i64>,
    submission: OrderCreate,
) -> OrderResult<OrderDraft> {
    if submission.items.is_empty() {
        return Err(OrderError::EmptyCart);
    }

    let mut lines = Vec::with_capacity(submission.items.len());
    let mut total_amount: i64 = 0;

    for (index, line) in submission.items.into_iter().enumerate() {
        if line.product_id <= 0 {
            return Err(OrderError::InvalidLine {
                index,
                reason: "product_id must be a positive id",
            });
        }
        if line.quantity <= 0 {
            return Err(OrderError::InvalidLine {
                index,
                reason: "quantity must be positive",
            });
        }

        let product = catalog
            .resolve(line.product_id)
            .await?
            .filter(|p| p.is_available)
            .ok_or(OrderError::ProductUnavailable {
                product_id: line.product_id,
            })?;

        total_amount = product
            .unit_price
            .checked_mul(line.quantity)
            .and_then(|subtotal| total_amount.checked_add(subtotal))
            .ok_or(OrderError::InvalidLine {
                index,
                reason: "quantity out of range",
            })?;

        lines.push(DraftLine {
            product_id: line.product_id,
            quantity: line.quantity,
            unit_price: product.unit_price,
            notes: line.notes,
        });
    }

    let payment_method = submission
        .payment_method
        .map(|m| m.trim().to_string())
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| DEFAULT_PAYMENT_METHOD.to_string());

    Ok(OrderDraft {
        user_id,
        total_amount,
        status: OrderStatus::Pending,
        payment_method,
        created_at: now_millis(),
        lines,
    })
}
