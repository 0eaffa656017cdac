//! Inventory Transaction Model

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use super::product::positive_price;

/// Ledger direction: `IN` adds stock, `OUT` removes it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionType {
    In,
    Out,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::In => "IN",
            Self::Out => "OUT",
        }
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TransactionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "IN" => Ok(Self::In),
            "OUT" => Ok(Self::Out),
            other => Err(format!("unknown transaction type: {other}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: i64,
    pub product_id: i64,
    #[serde(default)]
    pub product_name: Option<String>,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub quantity: i32,
    pub unit_price: Decimal,
    pub total_price: Decimal,
    #[serde(default)]
    pub supplier_id: Option<i64>,
    #[serde(default)]
    pub supplier_name: Option<String>,
    pub user_id: i64,
    #[serde(default)]
    pub username: Option<String>,
    pub transaction_date: NaiveDateTime,
    #[serde(default)]
    pub reference_number: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

fn validate_unit_price(payload: &TransactionCreate) -> Result<(), ValidationError> {
    payload.unit_price.as_ref().map_or(Ok(()), positive_price)
}

/// Record transaction payload
///
/// `unit_price` may be omitted; the service then uses the product's price.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_unit_price"))]
pub struct TransactionCreate {
    pub product_id: i64,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    #[validate(range(min = 1, message = "Quantity must be at least 1"))]
    pub quantity: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supplier_id: Option<i64>,
    pub user_id: i64,
    #[validate(length(max = 500, message = "Notes must not exceed 500 characters"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[validate(length(max = 50, message = "Reference number must not exceed 50 characters"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_number: Option<String>,
}

fn validate_update_unit_price(payload: &TransactionUpdate) -> Result<(), ValidationError> {
    payload.unit_price.as_ref().map_or(Ok(()), positive_price)
}

/// Amend transaction payload (admin only)
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_update_unit_price"))]
pub struct TransactionUpdate {
    #[validate(range(min = 1, message = "Quantity must be at least 1"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supplier_id: Option<i64>,
    #[validate(length(max = 500, message = "Notes must not exceed 500 characters"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[validate(length(max = 50, message = "Reference number must not exceed 50 characters"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_number: Option<String>,
}
