//! Product Model

use serde::{Deserialize, Serialize};

/// Product entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Product {
    pub id: i64,
    pub name: String,
    /// Price in minor currency units
    pub price: i64,
    /// Category reference (required)
    pub category_id: i64,
    pub image_url: Option<String>,
    /// Whether the product can currently be ordered
    pub is_available: bool,
}

/// Create product payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductCreate {
    pub name: String,
    /// Price in minor currency units
    pub price: i64,
    pub category_id: i64,
    pub image_url: Option<String>,
    pub is_available: Option<bool>,
}

/// Update product payload
///
/// Price changes never touch historical order lines; those keep the
/// unit price captured when the order was placed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub price: Option<i64>,
    pub category_id: Option<i64>,
    pub image_url: Option<String>,
    pub is_available: Option<bool>,
}
