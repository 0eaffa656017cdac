//! Product Model

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Product entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// Purchase price
    pub price_in: Decimal,
    /// Selling price
    pub price_out: Decimal,
    pub stock: i32,
    /// Alert threshold; `stock <= minimum_stock` is low stock
    pub minimum_stock: i32,
    #[serde(default)]
    pub supplier_id: Option<i64>,
    #[serde(default)]
    pub supplier_name: Option<String>,
    pub active: bool,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub updated_at: Option<NaiveDateTime>,
}

impl Product {
    pub fn is_low_stock(&self) -> bool {
        crate::analytics::is_low_stock(self.stock, self.minimum_stock)
    }
}

pub(crate) fn positive_price(value: &Decimal) -> Result<(), ValidationError> {
    if *value <= Decimal::ZERO {
        let mut err = ValidationError::new("range");
        err.message = Some("Price must be greater than 0".into());
        return Err(err);
    }
    Ok(())
}

/// Create product payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProductCreate {
    #[validate(length(min = 1, max = 100, message = "Product name is required (max 100 characters)"))]
    pub name: String,
    #[validate(length(max = 50, message = "Category must not exceed 50 characters"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[validate(length(max = 20, message = "SKU must not exceed 20 characters"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    #[validate(length(max = 500, message = "Description must not exceed 500 characters"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[validate(custom(function = "positive_price"))]
    pub price_in: Decimal,
    #[validate(custom(function = "positive_price"))]
    pub price_out: Decimal,
    #[validate(range(min = 0, message = "Minimum stock cannot be negative"))]
    pub minimum_stock: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supplier_id: Option<i64>,
}

fn validate_update_prices(update: &ProductUpdate) -> Result<(), ValidationError> {
    for price in [update.price_in.as_ref(), update.price_out.as_ref()]
        .into_iter()
        .flatten()
    {
        positive_price(price)?;
    }
    Ok(())
}

/// Update product payload
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_update_prices"))]
pub struct ProductUpdate {
    #[validate(length(min = 1, max = 100, message = "Product name is required (max 100 characters)"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[validate(length(max = 50, message = "Category must not exceed 50 characters"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[validate(length(max = 20, message = "SKU must not exceed 20 characters"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    #[validate(length(max = 500, message = "Description must not exceed 500 characters"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_in: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_out: Option<Decimal>,
    #[validate(range(min = 0, message = "Minimum stock cannot be negative"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum_stock: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supplier_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}
