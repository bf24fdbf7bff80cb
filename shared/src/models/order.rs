//! Order Model
//!
//! Orders are append-only apart from the single mutable `status` column.
//! Each line keeps the unit price captured at submission time; product
//! names and images are joined in at read time purely for display.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Order status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
pub enum OrderStatus {
    #[default]
    Pending,
    Completed,
    Cancelled,
}

impl OrderStatus {
    /// All statuses an order can hold
    pub const ALL: [OrderStatus; 3] = [
        OrderStatus::Pending,
        OrderStatus::Completed,
        OrderStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    /// Parse a client-submitted status string; `None` for anything unknown
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(OrderStatus::Pending),
            "completed" => Some(OrderStatus::Completed),
            "cancelled" => Some(OrderStatus::Cancelled),
            _ => None,
        }
    }

    /// Terminal statuses accept no further transition
    pub fn is_terminal(&self) -> bool {
        !matches!(self, OrderStatus::Pending)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Order line as stored and served
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct OrderItem {
    pub order_id: i64,
    /// Weak product reference; the product may have been deleted since
    pub product_id: i64,
    /// Joined display name, "Unknown Product" when the product is gone
    pub product_name: String,
    /// Joined image URL, `None` when the product is gone or has no image
    pub product_image: Option<String>,
    pub quantity: i64,
    /// Unit price in minor units, captured when the order was placed
    pub unit_price: i64,
    pub notes: Option<String>,
}

/// Order entity with lines resolved
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Order {
    pub id: i64,
    /// Submitting user; `None` for anonymous kiosk orders
    pub user_id: Option<i64>,
    /// Joined username, "Unknown User" when absent or deleted
    pub created_by: String,
    /// Total in minor units, fixed at creation
    pub total_amount: i64,
    pub status: OrderStatus,
    pub payment_method: String,
    /// Unix epoch milliseconds
    pub created_at: i64,
    #[cfg_attr(feature = "db", sqlx(skip))]
    #[serde(default)]
    pub items: Vec<OrderItem>,
}

/// One line of a submitted cart
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartLine {
    pub product_id: i64,
    pub quantity: i64,
    pub notes: Option<String>,
}

/// Submit order payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderCreate {
    pub items: Vec<CartLine>,
    /// Defaults to "cash" when omitted
    pub payment_method: Option<String>,
}

/// Status change payload
///
/// Kept as a raw string so unrecognized values surface as a transition
/// error instead of a deserialization failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderStatusUpdate {
    pub status: String,
}
